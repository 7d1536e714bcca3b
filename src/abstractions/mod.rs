//! Abstraction layers for external dependencies
//!
//! This module provides trait-based abstractions for the upstream HTTP API
//! and the wall clock to enable better testing and dependency injection.

pub mod clock;
pub mod http;

pub use clock::{Clock, FixedClock, SystemClock};
pub use http::{HttpFetcher, MockFetcher, ReqwestFetcher};
