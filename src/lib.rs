//! Conditional HTTP - static file server
//!
//! Serves files from a single root directory over HTTP/1.0 and HTTP/1.1 with
//! ETag / Last-Modified validation and persistent connections.

pub mod config;
pub mod error;
pub mod files;
pub mod http;
pub mod server;
