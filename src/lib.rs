//! linkshrink - a minimal URL shortener
//!
//! Clients submit a long URL together with a shared secret and receive a
//! short identifier; visiting the identifier redirects to the stored target.
//!
//! # Architecture
//! - `utils`: URL canonicalization, identifier codec, secret hashing
//! - `storage`: the `LinkStore` trait and its SeaORM backend
//! - `services`: identifier allocation and the link lifecycle
//! - `api`: HTTP handlers and middleware
//! - `config`: configuration loading and validation
//! - `runtime`: startup, server and shutdown
//! - `system`: logging

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
