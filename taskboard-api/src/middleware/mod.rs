//! Middleware modules for the API server
//!
//! - `security`: security response headers
//!
//! Request metrics middleware lives in `crate::metrics`.

pub mod security;
