//! Disposable services for integration tests.

pub mod error;
pub mod shortener;

pub use error::{Result, TestInfraError};
pub use shortener::{MockConfig, MockShortener, RecordedRequest};
