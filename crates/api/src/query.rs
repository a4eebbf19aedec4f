//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Default page size for paginated lists.
pub const DEFAULT_LIMIT: i64 = 10;
/// Largest page size a caller may request.
pub const MAX_LIMIT: i64 = 100;

/// Generic pagination parameters (`?limit=&offset=`).
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationParams {
    /// Limit clamped to `1..=MAX_LIMIT`, defaulting to [`DEFAULT_LIMIT`].
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    /// Offset, never negative.
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

/// `GET /properties` query string.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyListParams {
    pub status: Option<String>,
    pub beds: Option<String>,
    pub price_range: Option<String>,
    pub neighborhood: Option<String>,
    pub keyword: Option<String>,
    pub sort: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults_and_clamps() {
        let p = PaginationParams::default();
        assert_eq!((p.limit(), p.offset()), (DEFAULT_LIMIT, 0));

        let p = PaginationParams {
            limit: Some(10_000),
            offset: Some(-5),
        };
        assert_eq!((p.limit(), p.offset()), (MAX_LIMIT, 0));

        let p = PaginationParams {
            limit: Some(0),
            offset: Some(20),
        };
        assert_eq!((p.limit(), p.offset()), (1, 20));
    }
}
