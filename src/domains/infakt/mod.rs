//! inFakt domain module.
//!
//! Everything needed to talk to the inFakt REST API: the HTTP client, typed
//! request payloads, the line item price normalizer and the optional
//! diagnostics trace.

pub mod client;
pub mod diagnostics;
mod error;
pub mod models;
pub mod pricing;

pub use client::{DEFAULT_BASE_URL, InfaktClient};
pub use diagnostics::{DiagnosticEvent, DiagnosticsSink, FileSink, NopSink, sink_from_config};
pub use error::{InfaktError, InfaktResult};
