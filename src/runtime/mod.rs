//! Application lifecycle
//!
//! - `lifetime`: startup preparation and graceful shutdown
//! - `server`: the HTTP server

pub mod lifetime;
pub mod server;

pub use server::run_server;
