//! Positional parameters and query filters for TestRail requests
//!
//! TestRail takes its arguments inside the query string of
//! `index.php?/api/v2/...`, so a call like "cases of project 5 in suite 3"
//! ends up as `get_cases/5&suite_id=3`. [`Params`] keeps the positional part
//! and the filters apart and renders them deterministically.

use std::fmt;

use url::form_urlencoded;

/// Known TestRail filter keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiFilter {
    CreatedAfter,
    CreatedBefore,
    CreatedBy,
    DefectsFilter,
    Email,
    IsCompleted,
    Limit,
    MilestoneId,
    Offset,
    PriorityId,
    SectionId,
    StatusId,
    SuiteId,
    TemplateId,
    TypeId,
    UpdatedAfter,
    UpdatedBefore,
    UpdatedBy,
}

impl ApiFilter {
    /// Get the query key for this filter
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiFilter::CreatedAfter => "created_after",
            ApiFilter::CreatedBefore => "created_before",
            ApiFilter::CreatedBy => "created_by",
            ApiFilter::DefectsFilter => "defects_filter",
            ApiFilter::Email => "email",
            ApiFilter::IsCompleted => "is_completed",
            ApiFilter::Limit => "limit",
            ApiFilter::MilestoneId => "milestone_id",
            ApiFilter::Offset => "offset",
            ApiFilter::PriorityId => "priority_id",
            ApiFilter::SectionId => "section_id",
            ApiFilter::StatusId => "status_id",
            ApiFilter::SuiteId => "suite_id",
            ApiFilter::TemplateId => "template_id",
            ApiFilter::TypeId => "type_id",
            ApiFilter::UpdatedAfter => "updated_after",
            ApiFilter::UpdatedBefore => "updated_before",
            ApiFilter::UpdatedBy => "updated_by",
        }
    }
}

impl fmt::Display for ApiFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A filter key bound to an already formatted value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiFilterValue {
    filter: ApiFilter,
    value: String,
}

impl ApiFilterValue {
    /// Bind a value verbatim (numbers, comma separated id lists, timestamps)
    pub fn new(filter: ApiFilter, value: impl fmt::Display) -> Self {
        Self {
            filter,
            value: value.to_string(),
        }
    }

    /// Bind free text, percent-encoding it
    pub fn text(filter: ApiFilter, value: &str) -> Self {
        Self {
            filter,
            value: form_urlencoded::byte_serialize(value.as_bytes()).collect(),
        }
    }

    /// `is_completed` takes a numerical boolean
    pub fn is_completed(completed: bool) -> Self {
        Self::new(ApiFilter::IsCompleted, if completed { 1 } else { 0 })
    }

    /// Cap the number of returned items
    pub fn limit(limit: u32) -> Self {
        Self::new(ApiFilter::Limit, limit)
    }

    pub fn filter(&self) -> ApiFilter {
        self.filter
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Ordered request parameters: `/`-joined positional segments followed by
/// `&key=value` filters
///
/// Filters render in insertion order. Setting a key twice replaces the value
/// but keeps the original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    segments: Vec<String>,
    filters: Vec<(ApiFilter, String)>,
}

impl Params {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters made of a single numeric id
    pub fn id(id: i64) -> Self {
        Self::new().segment(id)
    }

    /// Append a positional segment
    pub fn segment(mut self, segment: impl fmt::Display) -> Self {
        self.segments.push(segment.to_string());
        self
    }

    /// Set a filter
    pub fn filter(mut self, filter: ApiFilter, value: impl fmt::Display) -> Self {
        self.insert(ApiFilterValue::new(filter, value));
        self
    }

    /// Set a filter only when an id is actually given (`> 0`)
    pub fn filter_id(self, filter: ApiFilter, id: i64) -> Self {
        if id > 0 {
            self.filter(filter, id)
        } else {
            self
        }
    }

    /// Append caller supplied filters, in the order given
    pub fn filters(mut self, filters: &[ApiFilterValue]) -> Self {
        for filter in filters {
            self.insert(filter.clone());
        }
        self
    }

    fn insert(&mut self, filter: ApiFilterValue) {
        match self.filters.iter_mut().find(|(key, _)| *key == filter.filter) {
            Some(entry) => entry.1 = filter.value,
            None => self.filters.push((filter.filter, filter.value)),
        }
    }

    /// Check if there is nothing to render
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty() && self.filters.is_empty()
    }

    /// Look up a filter value
    pub fn get(&self, filter: ApiFilter) -> Option<&str> {
        self.filters
            .iter()
            .find(|(key, _)| *key == filter)
            .map(|(_, value)| value.as_str())
    }

    /// Parameters for the page a `_links.next` link points at
    ///
    /// The link looks like `/api/v2/get_cases/1&offset=250&limit=250`; only
    /// its `offset` and `limit` are taken over. `None` when the link carries no
    /// offset or does not move past the current one.
    pub fn next_page(&self, link: &str) -> Option<Self> {
        let (_, query) = link.split_once('&')?;
        let mut next = self.clone();
        let mut offset = None;
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match &*key {
                "offset" => {
                    next = next.filter(ApiFilter::Offset, &value);
                    offset = Some(value);
                }
                "limit" => next = next.filter(ApiFilter::Limit, &value),
                _ => {}
            }
        }
        match offset {
            Some(offset) if self.get(ApiFilter::Offset) != Some(&*offset) => Some(next),
            _ => None,
        }
    }
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))?;
        for (key, value) in &self.filters {
            write!(f, "&{}={}", key, value)?;
        }
        Ok(())
    }
}

impl From<i64> for Params {
    fn from(id: i64) -> Self {
        Params::id(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_params() {
        let params = Params::new();
        assert!(params.is_empty());
        assert_eq!(params.to_string(), "");
    }

    #[test]
    fn test_single_and_composite_ids() {
        assert_eq!(Params::id(16).to_string(), "16");
        assert_eq!(Params::id(16).segment(1231).to_string(), "16/1231");
    }

    #[test]
    fn test_filters_keep_insertion_order() {
        let params = Params::id(5)
            .filter(ApiFilter::SuiteId, 3)
            .filter(ApiFilter::SectionId, 2)
            .filters(&[ApiFilterValue::limit(10), ApiFilterValue::new(ApiFilter::TypeId, "1,3")]);
        assert_eq!(params.to_string(), "5&suite_id=3&section_id=2&limit=10&type_id=1,3");
    }

    #[test]
    fn test_repeated_key_replaces_in_place() {
        let params = Params::id(5)
            .filter(ApiFilter::Limit, 1)
            .filter(ApiFilter::Offset, 20)
            .filter(ApiFilter::Limit, 50);
        assert_eq!(params.to_string(), "5&limit=50&offset=20");
        assert_eq!(params.get(ApiFilter::Limit), Some("50"));
    }

    #[test]
    fn test_next_page_takes_offset_and_limit() {
        let params = Params::id(1).filter(ApiFilter::SuiteId, 3);
        let next = params.next_page("/api/v2/get_cases/1&suite_id=3&limit=250&offset=250").unwrap();
        assert_eq!(next.to_string(), "1&suite_id=3&limit=250&offset=250");

        let again = next.next_page("/api/v2/get_cases/1&suite_id=3&limit=250&offset=500").unwrap();
        assert_eq!(again.get(ApiFilter::Offset), Some("500"));
    }

    #[test]
    fn test_next_page_needs_a_new_offset() {
        let params = Params::new().filter(ApiFilter::Offset, 250);
        assert!(params.next_page("/api/v2/get_projects&offset=250").is_none());
        assert!(params.next_page("/api/v2/get_projects").is_none());
        assert!(Params::new().next_page("/api/v2/get_projects&limit=10").is_none());
    }

    #[test]
    fn test_filter_id_skips_unset_ids() {
        let params = Params::id(5)
            .filter_id(ApiFilter::SuiteId, -1)
            .filter_id(ApiFilter::SectionId, 0);
        assert_eq!(params.to_string(), "5");
    }

    #[test]
    fn test_text_filter_is_encoded() {
        let value = ApiFilterValue::text(ApiFilter::Email, "qa+bot@example.com");
        assert_eq!(value.value(), "qa%2Bbot%40example.com");
        let params = Params::new().filters(&[value]);
        assert_eq!(params.to_string(), "&email=qa%2Bbot%40example.com");
    }

    #[test]
    fn test_is_completed_is_numeric() {
        assert_eq!(ApiFilterValue::is_completed(true).value(), "1");
        assert_eq!(ApiFilterValue::is_completed(false).value(), "0");
        assert_eq!(ApiFilterValue::is_completed(false).filter(), ApiFilter::IsCompleted);
    }
}
