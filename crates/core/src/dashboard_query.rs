//! Canonical filter, sort and pagination parameters for out-of-service bed
//! listings.
//!
//! Raw query strings are normalised into a [`DashboardQuery`] together with
//! an `href_prefix` that pagination links append `page=N` to. Identical
//! logical inputs always produce byte-identical prefixes.

use serde::{Deserialize, Serialize};

use crate::temporality::Temporality;

/// Filter value a select control submits for "no filter".
pub const ALL_FILTER: &str = "all";

/// Fixed order in which parameters appear in `href_prefix`.
const HREF_KEY_ORDER: [&str; 5] = ["premisesId", "apAreaId", "perPage", "sortBy", "sortDirection"];

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Parse `asc` / `desc`. Anything else is `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

/// Query string parameters exactly as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDashboardQuery {
    pub page: Option<String>,
    pub per_page: Option<String>,
    pub sort_by: Option<String>,
    pub sort_direction: Option<String>,
    pub premises_id: Option<String>,
    pub ap_area_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct QueryDefaults {
    pub sort_by: String,
}

/// Normalised listing query. An empty filter string means "no filter".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub sort_by: String,
    pub sort_direction: Option<SortDirection>,
    pub temporality: Temporality,
    pub premises_filter: String,
    pub area_filter: String,
    pub href_prefix: String,
}

impl DashboardQuery {
    /// Link to page `page` of this listing.
    pub fn page_href(&self, page: u32) -> String {
        format!("{}page={page}", self.href_prefix)
    }

    /// Parameters forwarded to the remote listing endpoint, empty values
    /// omitted.
    pub fn upstream_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("temporality", self.temporality.to_string())];
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        params.extend(self.link_params());
        params
    }

    /// Non-empty parameters in [`HREF_KEY_ORDER`].
    fn link_params(&self) -> Vec<(&'static str, String)> {
        HREF_KEY_ORDER
            .iter()
            .filter_map(|&key| {
                let value = match key {
                    "premisesId" => self.premises_filter.clone(),
                    "apAreaId" => self.area_filter.clone(),
                    "perPage" => self.per_page.map(|n| n.to_string()).unwrap_or_default(),
                    "sortBy" => self.sort_by.clone(),
                    "sortDirection" => self
                        .sort_direction
                        .map(|d| d.as_str().to_string())
                        .unwrap_or_default(),
                    _ => String::new(),
                };
                (!value.is_empty()).then_some((key, value))
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Composition
// ---------------------------------------------------------------------------

/// Normalise `raw` into a [`DashboardQuery`] for `temporality`.
///
/// Listing links are rooted at `{base_path}/{temporality}`.
pub fn compose(
    raw: &RawDashboardQuery,
    temporality: Temporality,
    defaults: &QueryDefaults,
    base_path: &str,
) -> DashboardQuery {
    let sort_by = raw
        .sort_by
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(&defaults.sort_by)
        .to_string();

    let mut query = DashboardQuery {
        page: parse_positive(raw.page.as_deref()),
        per_page: parse_positive(raw.per_page.as_deref()),
        sort_by,
        sort_direction: raw.sort_direction.as_deref().and_then(SortDirection::parse),
        temporality,
        premises_filter: normalize_filter(raw.premises_id.as_deref()),
        area_filter: normalize_filter(raw.ap_area_id.as_deref()),
        href_prefix: String::new(),
    };
    query.href_prefix = href_prefix(base_path, temporality, &query.link_params());
    query
}

/// `None`, `""` and `"all"` all mean "no filter" and become `""`.
pub fn normalize_filter(value: Option<&str>) -> String {
    match value {
        None | Some("") | Some(ALL_FILTER) => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Positive integers only; anything else is treated as absent.
fn parse_positive(value: Option<&str>) -> Option<u32> {
    value?.parse::<u32>().ok().filter(|n| *n > 0)
}

fn href_prefix(base_path: &str, temporality: Temporality, params: &[(&str, String)]) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        serializer.append_pair(key, value);
    }
    let query_string = serializer.finish();

    if query_string.is_empty() {
        format!("{base_path}/{temporality}?")
    } else {
        format!("{base_path}/{temporality}?{query_string}&")
    }
}
