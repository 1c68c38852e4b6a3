//! HTTP protocol implementation.
//!
//! This module implements a minimal HTTP/1.1 request/response cycle: one
//! request per connection, no keep-alive.
//!
//! # Architecture
//!
//! The HTTP layer is organized into several submodules:
//!
//! - **`parser`**: Parses an incoming HTTP request from a raw byte buffer
//! - **`request`**: HTTP request representation and accessors
//! - **`response`**: HTTP response representation and one-shot composition
//! - **`handler`**: The request handler implementing the per-request state machine
//! - **`connection`**: Drives one client connection through the handler
//! - **`writer`**: Writes a composed response buffer to the client
//!
//! # Handler State Machine
//!
//! Each request goes through a state machine:
//!
//! ```text
//!        ┌─────────────┐
//!        │   Created   │ ← Parsed request received
//!        └──────┬──────┘
//!               │ Path validated against the content root
//!               ▼
//!        ┌──────────────────┐
//!        │  PathValidated   │ ← Canonical on-disk path in hand
//!        └──────┬───────────┘
//!               │ Dispatch by method (GET/HEAD/POST)
//!               ▼
//!        ┌──────────────────┐
//!        │ MethodDispatched │ ← Status, headers and body set
//!        └──────┬───────────┘
//!               │ Compose the response buffer
//!               ▼
//!        ┌──────────────────┐
//!        │    Composed      │ ← Terminal; buffer handed to the transport
//!        └──────────────────┘
//! ```
//!
//! A path rejection or an unrecognized method short-circuits straight to
//! `Composed` with the matching error status. There is no retry or re-entry.

pub mod connection;
pub mod handler;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
