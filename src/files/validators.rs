use std::time::SystemTime;

use chrono::{DateTime, Local};
use sha2::{Digest, Sha256};

/// Cache validators derived from a file's current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validators {
    /// Quoted hex digest of the content
    pub etag: String,
    /// RFC 1123 modification time in the server's local zone
    pub last_modified: String,
}

impl Validators {
    pub fn new(content: &[u8], modified: SystemTime) -> Self {
        Self {
            etag: generate_etag(content),
            last_modified: generate_last_modified(modified),
        }
    }
}

/// Strong entity tag: SHA-256 of the content, hex-encoded and double-quoted.
pub fn generate_etag(content: &[u8]) -> String {
    format!("\"{}\"", hex::encode(Sha256::digest(content)))
}

pub fn generate_last_modified(modified: SystemTime) -> String {
    http_date(modified)
}

/// Formats a timestamp as an RFC 1123 date in local time.
///
/// The zone is written as a numeric offset (`+0000`) rather than `GMT`, so
/// the value reflects the server's local zone as sent.
pub fn http_date(time: SystemTime) -> String {
    DateTime::<Local>::from(time).to_rfc2822()
}
