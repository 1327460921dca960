//! Photo Polish
//!
//! Level-driven photo enhancement service built on `pixel-enhance`.
//! This library exposes modules for integration testing.

pub mod api;
pub mod error;
pub mod models;
pub mod rendering;
pub mod server;
pub mod services;
