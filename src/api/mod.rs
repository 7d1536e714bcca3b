//! Upstream API surface
//!
//! Wire models for the paginated shifts API and the locators used to reach it.

pub mod endpoints;
pub mod models;

pub use endpoints::{Endpoints, DEFAULT_BASE_URL};
pub use models::{Entity, PagedResult, RankedResult, Role, Shift};
