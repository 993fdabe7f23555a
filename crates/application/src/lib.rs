//! Application layer - Use cases and orchestration
//!
//! Defines the source gateway port, the all-or-nothing aggregate fetch over
//! it, and the displayed-snapshot slot that drops superseded results.

pub mod error;
pub mod ports;
pub mod services;

pub use error::{AggregateFetchError, ApplicationError, SourceError, SourceFailure, SourceKind};
pub use ports::*;
pub use services::*;
