//! Pagination accounting for Satellite collection endpoints.
//!
//! Satellite pages collections through `full_result`, `per_page` and
//! `page` query parameters and reports a `subtotal` of matching records;
//! the fetch loop is complete once the accumulated results reach that
//! subtotal.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

use crate::models::NullString;

/// Query parameter keys shared by Satellite collection endpoints.
pub const QUERY_PARAM_FULL_RESULT: &str = "full_result";
pub const QUERY_PARAM_PER_PAGE: &str = "per_page";
pub const QUERY_PARAM_PAGE: &str = "page";

/// Value requesting that the API report the full result set metadata.
pub const QUERY_PARAM_FULL_RESULT_VALUE: &str = "1";

/// Envelope for Satellite collection query responses.
#[derive(Debug, Deserialize)]
pub struct ListResponse<T> {
    /// Records returned for the current page.
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,

    /// Number of records matching the query across all pages. Equal to
    /// `total` when no search narrows the query.
    #[serde(default)]
    pub subtotal: usize,

    /// Total number of records without any search parameters.
    #[serde(default)]
    pub total: usize,

    /// Page number for this response. Observed as an integer on the
    /// first response and a string on subsequent pages.
    #[serde(default)]
    pub page: PageNumber,

    #[serde(default)]
    pub per_page: PageNumber,

    #[serde(default)]
    pub search: NullString,

    #[serde(default)]
    pub sort: SortOptions,

    #[serde(default)]
    pub error: NullString,
}

/// Sorting criteria echoed in API query responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SortOptions {
    #[serde(default)]
    pub by: NullString,

    #[serde(default)]
    pub order: NullString,
}

/// A page count that the API returns either as a JSON number or as a
/// numeric string, depending on the page and Satellite release.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageNumber(pub usize);

impl<'de> Deserialize<'de> for PageNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PageNumberVisitor;

        impl Visitor<'_> for PageNumberVisitor {
            type Value = PageNumber;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a page number as an integer or numeric string")
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
                Ok(PageNumber(value as usize))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
                if value < 0 {
                    return Err(E::custom(format!("negative page number {value}")));
                }
                Ok(PageNumber(value as usize))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                value.parse::<usize>().map(PageNumber).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(PageNumberVisitor)
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ephemeral per-fetch pagination cursor: current page number (starting
/// at 1), accumulated result count and the server-reported subtotal.
#[derive(Debug, Default)]
pub struct PageCursor {
    page: usize,
    collected: usize,
    subtotal: usize,
}

impl PageCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to the next page number and return it.
    pub fn advance(&mut self) -> usize {
        self.page += 1;
        self.page
    }

    /// Record the outcome of a page fetch.
    pub fn record(&mut self, new_results: usize, subtotal: usize) {
        self.collected += new_results;
        self.subtotal = subtotal;
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn collected(&self) -> usize {
        self.collected
    }

    /// Records still outstanding according to the server-reported
    /// subtotal.
    pub fn remaining(&self) -> usize {
        self.subtotal.saturating_sub(self.collected)
    }

    pub fn done(&self) -> bool {
        self.remaining() == 0
    }
}
