//! Validated query requests.
//!
//! Construction is the validation: a [`LookupRequest`] can only hold a
//! well-formed [`AreaId`], and a [`SearchRequest`] only a non-blank query
//! and an in-range [`ResultLimit`].

use std::fmt;

use serde::Serialize;

use crate::fault::ValidationError;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Area identifier
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A `site:path:area` key naming one interactive element on one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AreaId(String);

impl AreaId {
    /// Parse and validate an area identifier.
    ///
    /// The input is trimmed.  It must split on `:` into at least three
    /// segments and the first three must be non-blank.  Anything after the
    /// third colon belongs to the area segment and is kept verbatim.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::AreaIdRequired);
        }

        let parts: Vec<&str> = trimmed.split(':').collect();
        if parts.len() < 3 {
            return Err(ValidationError::InvalidAreaIdFormat(trimmed.to_owned()));
        }
        if parts[..3].iter().any(|p| p.trim().is_empty()) {
            return Err(ValidationError::EmptyAreaIdSegment(trimmed.to_owned()));
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn segment(&self, n: usize) -> &str {
        self.0.splitn(3, ':').nth(n).unwrap_or_default()
    }

    pub fn site(&self) -> &str {
        self.segment(0)
    }

    pub fn path(&self) -> &str {
        self.segment(1)
    }

    pub fn area(&self) -> &str {
        self.segment(2)
    }
}

impl fmt::Display for AreaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Result limit
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 50;

/// Number of search results to request, always in `[1, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResultLimit(u32);

impl ResultLimit {
    /// `Some` only when `value` lies in `[1, max]`.
    pub fn within(value: i64, max: u32) -> Option<Self> {
        (1..=i64::from(max))
            .contains(&value)
            .then(|| Self(value as u32))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for ResultLimit {
    fn default() -> Self {
        Self(DEFAULT_LIMIT)
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Requests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    query: String,
    domain: Option<String>,
    limit: ResultLimit,
}

impl SearchRequest {
    /// Blank queries are rejected; blank domains count as absent.
    pub fn new(
        query: &str,
        domain: Option<&str>,
        limit: ResultLimit,
    ) -> Result<Self, ValidationError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ValidationError::QueryRequired);
        }
        let domain = domain
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_owned);
        Ok(Self {
            query: query.to_owned(),
            domain,
            limit,
        })
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    pub fn limit(&self) -> ResultLimit {
        self.limit
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupRequest {
    pub area_id: AreaId,
}
