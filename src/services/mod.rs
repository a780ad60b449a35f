//! Service layer for business logic
//!
//! Canonicalization, identifier allocation and the link lifecycle live here;
//! the HTTP handlers only bind requests and render responses.

mod allocator;
mod link_service;

pub use allocator::IdAllocator;
pub use link_service::LinkService;
