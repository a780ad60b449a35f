//! Link management service
//!
//! Create, update, remove and resolve links. Authentication is done by the
//! caller before any of these run.

use std::sync::Arc;

use tracing::{info, warn};

use super::IdAllocator;
use crate::errors::{LinkError, Result};
use crate::storage::{Link, LinkStore};
use crate::utils::{canonicalize, decode_id};

pub struct LinkService {
    store: Arc<dyn LinkStore>,
    allocator: IdAllocator,
}

impl LinkService {
    pub fn new(store: Arc<dyn LinkStore>, allocator: IdAllocator) -> Self {
        Self { store, allocator }
    }

    pub fn store(&self) -> &Arc<dyn LinkStore> {
        &self.store
    }

    /// Shorten an address.
    ///
    /// The same canonical target always yields the same live record; a new
    /// record is only allocated the first time a target is seen.
    pub async fn create(&self, address: &str) -> Result<Link> {
        let target = canonicalize(address)?;

        if let Some(existing) = self.store.find_by_target(&target).await? {
            return self.store.touch(existing.id).await;
        }

        let budget = self.allocator.max_attempts();
        let mut conflicts = 0;
        loop {
            let id = self.allocator.allocate(self.store.as_ref()).await?;
            match self.store.insert(id, &target).await {
                Ok(link) => {
                    info!("Link created: {} -> {}", link.code(), link.target);
                    return Ok(link);
                }
                Err(LinkError::Conflict(msg)) => {
                    conflicts += 1;
                    warn!("Insert raced on identifier {}: {}", id, msg);

                    // 并发请求可能刚好写入了同一个目标地址
                    if let Some(existing) = self.store.find_by_target(&target).await? {
                        return Ok(existing);
                    }
                    if conflicts >= budget {
                        return Err(LinkError::keyspace_exhausted(format!(
                            "identifier collided {} times on insert",
                            conflicts
                        )));
                    }
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Soft-delete the live record for an address.
    pub async fn remove(&self, address: &str) -> Result<Link> {
        let target = canonicalize(address)?;

        let link = self
            .store
            .find_by_target(&target)
            .await?
            .ok_or_else(|| LinkError::not_found("URL not found"))?;

        self.store.soft_delete(link.id).await?;
        info!("Link removed: {} -> {}", link.code(), link.target);
        Ok(link)
    }

    /// Point an existing record at a new address, keeping its identifier.
    pub async fn update(&self, old_address: &str, new_address: &str) -> Result<Link> {
        let old_target = canonicalize(old_address)?;
        let new_target = canonicalize(new_address)?;

        let link = self
            .store
            .find_by_target(&old_target)
            .await?
            .ok_or_else(|| LinkError::not_found("URL not found"))?;

        if old_target == new_target {
            return self.store.touch(link.id).await;
        }

        if let Some(owner) = self.store.find_by_target(&new_target).await?
            && owner.id != link.id
        {
            return Err(LinkError::conflict(format!(
                "{} is already shortened as {}",
                new_target,
                owner.code()
            )));
        }

        let updated = self.store.update_target(link.id, &new_target).await?;
        info!(
            "Link updated: {} {} -> {}",
            updated.code(),
            old_target,
            updated.target
        );
        Ok(updated)
    }

    /// Look up the live record behind a path segment.
    pub async fn resolve(&self, code: &str) -> Result<Link> {
        let id = decode_id(code)?;
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| LinkError::not_found(format!("No link for {}", code)))
    }
}
