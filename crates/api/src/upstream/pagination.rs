//! Pagination metadata carried in availability API response headers.
//!
//! Values are passed through as received; nothing is computed here.

use reqwest::header::HeaderMap;
use serde::Serialize;

pub const CURRENT_PAGE_HEADER: &str = "x-pagination-currentpage";
pub const TOTAL_PAGES_HEADER: &str = "x-pagination-totalpages";
pub const TOTAL_RESULTS_HEADER: &str = "x-pagination-totalresults";
pub const PAGE_SIZE_HEADER: &str = "x-pagination-pagesize";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: Option<u32>,
    pub total_pages: Option<u32>,
    pub total_results: Option<u64>,
    pub page_size: Option<u32>,
}

impl PaginationMeta {
    /// Read the pagination headers. Missing or malformed values are `None`.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            page: header_number(headers, CURRENT_PAGE_HEADER),
            total_pages: header_number(headers, TOTAL_PAGES_HEADER),
            total_results: header_number(headers, TOTAL_RESULTS_HEADER),
            page_size: header_number(headers, PAGE_SIZE_HEADER),
        }
    }
}

fn header_number<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    headers.get(name)?.to_str().ok()?.trim().parse().ok()
}
