//! Types shared between the lease ingestion service and its clients.
//!
//! - `model`: fields, column mappings, staged rows, validation errors and
//!   persisted records, with the exact wire names the HTTP API uses.
//! - `requests`: request and response payloads of the HTTP endpoints.
//! - `error`: the ingestion error taxonomy.
//! - `review`: the client-side review store and upload session state machine.

pub mod error;
pub mod model;
pub mod requests;
pub mod review;
