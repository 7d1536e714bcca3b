use crate::api::models::Role;
use crate::error::{ErrorCode, RankError, Result};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Builds locators for every resource the ranking pipeline reads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    pub fn new(base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url).map_err(|e| {
            RankError::config_with_code(
                ErrorCode::CONFIG_INVALID_URL,
                format!("Invalid API base URL '{}'", base_url),
            )
            .with_source(e)
        })?;

        if !matches!(base.scheme(), "http" | "https") || base.cannot_be_a_base() {
            return Err(RankError::config_with_code(
                ErrorCode::CONFIG_INVALID_URL,
                format!("API base URL must be an absolute http(s) URL: '{}'", base_url),
            ));
        }

        Ok(Self { base })
    }

    /// Collection of workers or workplaces
    pub fn entities(&self, role: Role) -> String {
        match role {
            Role::Worker => self.path("/workers"),
            Role::Workplace => self.path("/workplaces"),
        }
    }

    /// Shifts claimed by one worker, already filtered server-side
    pub fn worker_claims(&self, worker_id: i64) -> Result<String> {
        self.with_query(
            "/workers/claims",
            &[("workerId", worker_id.to_string().as_str())],
        )
    }

    /// The full shift collection, unfiltered by entity
    pub fn shifts(&self) -> Result<String> {
        self.with_query(
            "/shifts",
            &[("workerId", ""), ("jobType", ""), ("location", "")],
        )
    }

    /// Turn a page's `next` link into a fetchable locator.
    ///
    /// Absolute links pass through untouched; relative ones resolve against
    /// `page`, the locator the link was served from.
    pub fn resolve_cursor(&self, page: &str, cursor: &str) -> Result<String> {
        let from = Url::parse(page).unwrap_or_else(|_| self.base.clone());
        from.join(cursor).map(String::from).map_err(|e| {
            RankError::unexpected_shape_with_code(
                ErrorCode::RESPONSE_BAD_CURSOR,
                cursor,
                "page cursor is not a valid URL",
            )
            .with_source(e)
        })
    }

    fn path(&self, path: &str) -> String {
        format!("{}{}", self.base.as_str().trim_end_matches('/'), path)
    }

    fn with_query(&self, path: &str, params: &[(&str, &str)]) -> Result<String> {
        let locator = self.path(path);
        Url::parse_with_params(&locator, params)
            .map(String::from)
            .map_err(|e| {
                RankError::config_with_code(
                    ErrorCode::CONFIG_INVALID_URL,
                    format!("Could not build locator from '{}'", locator),
                )
                .with_source(e)
            })
    }
}
