// src/lib.rs

//! Atelier Client Library
//!
//! The client-side core of the Atelier art marketplace: listing
//! aggregation across category endpoints, in-memory filtering and
//! pagination, form/CRUD plumbing for the admin dashboard, and the
//! credential-hiding search proxy.

pub mod config;
pub mod error;
pub mod models;
#[cfg(feature = "proxy")]
pub mod proxy;
pub mod services;
pub mod utils;
