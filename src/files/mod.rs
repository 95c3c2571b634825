//! Filesystem side of request handling.
//!
//! - **`resource`**: maps a URI onto the served root and classifies the result
//! - **`validators`**: ETag and Last-Modified values for a file

pub mod resource;
pub mod validators;

pub use resource::{Resource, resolve};
pub use validators::Validators;
