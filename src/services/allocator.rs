//! 短标识分配
//!
//! 在整个 u32 空间随机探测，返回第一个未被占用的值。

use tracing::debug;

use crate::errors::{LinkError, Result};
use crate::storage::LinkStore;

#[derive(Debug, Clone, Copy)]
pub struct IdAllocator {
    max_attempts: u32,
}

impl IdAllocator {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Draw random identifiers until one is free among live records.
    ///
    /// Fails with [`LinkError::KeyspaceExhausted`] after `max_attempts`
    /// collisions.
    pub async fn allocate(&self, store: &dyn LinkStore) -> Result<u32> {
        for attempt in 1..=self.max_attempts {
            let candidate = rand::random::<u32>();
            if !store.id_in_use(candidate).await? {
                return Ok(candidate);
            }
            debug!(
                "Identifier {} already in use (attempt {}/{})",
                candidate, attempt, self.max_attempts
            );
        }

        Err(LinkError::keyspace_exhausted(format!(
            "no free identifier found after {} attempts",
            self.max_attempts
        )))
    }
}
