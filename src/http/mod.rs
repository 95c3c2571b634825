//! HTTP protocol implementation.
//!
//! This module implements the HTTP/1.0 and HTTP/1.1 side of the file server,
//! including conditional GET and keep-alive connections.
//!
//! # Architecture
//!
//! - **`connection`**: The per-connection request-response state machine
//! - **`parser`**: Parses incoming HTTP requests from byte buffers
//! - **`request`**: HTTP request representation and header lookup
//! - **`conditional`**: `If-Match` / `If-Modified-Since` / `If-None-Match` evaluation
//! - **`handler`**: Chooses status, headers and body for a request
//! - **`response`**: HTTP response representation with builder pattern
//! - **`writer`**: Serializes and writes HTTP responses to the client
//! - **`mime`**: MIME type detection based on file extensions
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Wait for incoming request data
//!        └──────┬──────┘
//!               │ Request received (malformed → 400, then Closed)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Resolve file, evaluate preconditions
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ├─ Keep-Alive → Reading (same connection)
//!               └─ Close → Closed
//! ```
//!
//! The keep-alive decision comes from the request: HTTP/1.1 persists unless
//! `Connection: close`, HTTP/1.0 only with `Connection: keep-alive`.

pub mod request;
pub mod response;
pub mod parser;
pub mod conditional;
pub mod handler;
pub mod connection;
pub mod writer;
pub mod mime;
