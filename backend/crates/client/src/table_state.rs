//! Data-table query state
//!
//! [`TableState`] owns page, page size, sorting and filters for one listing
//! screen. Filters are edited as *pending* values and only take effect on
//! [`TableState::apply_filters`]; sorting and paging commit immediately.
//! Every committed change returns the one [`ListRequest`] to send. Committed
//! filters are mirrored into the page URL, one query parameter per declared
//! filter, so a copied link reproduces the view.

use std::collections::BTreeMap;

use table_query::{ListRequest, PageRequest, SortItem};
use url::Url;

use crate::url_state::{StringParser, UrlStateParser};

pub const PAGE_SIZE_OPTIONS: [u32; 5] = [10, 20, 30, 40, 50];
pub const DEFAULT_PAGE_SIZE: u32 = PAGE_SIZE_OPTIONS[0];

/// Sentinel some select inputs emit for "nothing selected"
const BLANK: &str = " ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Text,
    Select,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub label: String,
    pub value: String,
}

impl FilterOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A filter control declared by a listing screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterDescriptor {
    pub id: String,
    pub label: String,
    pub kind: FilterKind,
    pub placeholder: Option<String>,
    pub options: Vec<FilterOption>,
}

impl FilterDescriptor {
    pub fn text(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind: FilterKind::Text,
            placeholder: None,
            options: Vec::new(),
        }
    }

    pub fn select(
        id: impl Into<String>,
        label: impl Into<String>,
        options: impl IntoIterator<Item = FilterOption>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind: FilterKind::Select,
            placeholder: None,
            options: options.into_iter().collect(),
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    One(String),
    Many(Vec<String>),
}

impl FilterValue {
    /// `""`, `" "` and an empty list all mean "no filter".
    fn is_cleared(&self) -> bool {
        match self {
            FilterValue::One(v) => v.is_empty() || v == BLANK,
            FilterValue::Many(vs) => vs.is_empty(),
        }
    }

    /// Wire form; lists are joined with `,`
    pub fn to_wire(&self) -> String {
        match self {
            FilterValue::One(v) => v.clone(),
            FilterValue::Many(vs) => vs.join(","),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::One(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::One(value)
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(values: Vec<String>) -> Self {
        FilterValue::Many(values)
    }
}

/// What happens to the page when filters or sorting change
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PageResetPolicy {
    /// Keep the current page
    #[default]
    Preserve,
    /// Go back to page 1
    ResetOnChange,
}

#[derive(Debug, Clone)]
pub struct TableState {
    descriptors: Vec<FilterDescriptor>,
    policy: PageResetPolicy,
    page: u32,
    limit: u32,
    sorting: Vec<SortItem>,
    filters: BTreeMap<String, FilterValue>,
    /// `None` marks a pending clear
    pending: BTreeMap<String, Option<FilterValue>>,
    url: Url,
}

impl TableState {
    pub fn new(descriptors: Vec<FilterDescriptor>, url: Url) -> Self {
        Self {
            descriptors,
            policy: PageResetPolicy::default(),
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            sorting: Vec::new(),
            filters: BTreeMap::new(),
            pending: BTreeMap::new(),
            url,
        }
    }

    pub fn with_policy(mut self, policy: PageResetPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Restore committed filters from the declared parameters already in `url`.
    pub fn from_url(descriptors: Vec<FilterDescriptor>, url: Url) -> Self {
        let mut state = Self::new(descriptors, url);
        let parser = StringParser;

        let found: Vec<(String, FilterValue)> = state
            .url
            .query_pairs()
            .filter(|(key, _)| state.is_declared(key))
            .filter_map(|(key, raw)| Some((key.into_owned(), FilterValue::One(parser.parse(&raw)?))))
            .filter(|(_, value)| !value.is_cleared())
            .collect();

        for (key, value) in found {
            state.filters.entry(key).or_insert(value);
        }
        state.sync_url();
        state
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn sorting(&self) -> &[SortItem] {
        &self.sorting
    }

    pub fn filters(&self) -> &BTreeMap<String, FilterValue> {
        &self.filters
    }

    pub fn descriptors(&self) -> &[FilterDescriptor] {
        &self.descriptors
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Number of committed filters, e.g. for a badge on the filter button
    pub fn active_filter_count(&self) -> usize {
        self.filters.len()
    }

    /// What a filter input should display: the pending edit, else the
    /// committed value, else empty.
    pub fn filter_input(&self, id: &str) -> String {
        match self.pending.get(id) {
            Some(Some(value)) => value.to_wire(),
            Some(None) => String::new(),
            None => self.filters.get(id).map(FilterValue::to_wire).unwrap_or_default(),
        }
    }

    /// Stage a filter edit. Nothing is sent until [`apply_filters`](Self::apply_filters).
    ///
    /// Returns false for an undeclared filter id.
    pub fn set_pending_filter(&mut self, id: &str, value: Option<FilterValue>) -> bool {
        if !self.is_declared(id) {
            return false;
        }
        self.pending.insert(id.to_string(), value);
        true
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Commit staged edits. `None` when nothing was staged.
    pub fn apply_filters(&mut self) -> Option<ListRequest> {
        if self.pending.is_empty() {
            return None;
        }

        for (id, value) in std::mem::take(&mut self.pending) {
            match value.filter(|v| !v.is_cleared()) {
                Some(value) => {
                    self.filters.insert(id, value);
                }
                None => {
                    self.filters.remove(&id);
                }
            }
        }

        self.after_criteria_change();
        self.sync_url();
        Some(self.request())
    }

    /// Drop every filter, staged or committed.
    pub fn clear_filters(&mut self) -> ListRequest {
        self.pending.clear();
        self.filters.clear();
        self.after_criteria_change();
        self.sync_url();
        self.request()
    }

    pub fn set_sorting(&mut self, sorting: Vec<SortItem>) -> ListRequest {
        self.sorting = sorting;
        self.after_criteria_change();
        self.request()
    }

    /// 1-based; 0 is treated as 1.
    pub fn set_page(&mut self, page: u32) -> ListRequest {
        self.page = page.max(1);
        self.request()
    }

    /// `None` when `limit` is not one of [`PAGE_SIZE_OPTIONS`].
    pub fn set_page_size(&mut self, limit: u32) -> Option<ListRequest> {
        if !PAGE_SIZE_OPTIONS.contains(&limit) {
            return None;
        }
        self.limit = limit;
        if self.policy == PageResetPolicy::ResetOnChange {
            self.page = 1;
        }
        Some(self.request())
    }

    /// The request for the current committed state
    pub fn request(&self) -> ListRequest {
        ListRequest {
            pagination: PageRequest {
                page: self.page,
                limit: self.limit,
            },
            sorting: self.sorting.clone(),
            filters: self
                .filters
                .iter()
                .map(|(id, value)| (id.clone(), value.to_wire()))
                .collect(),
        }
    }

    fn is_declared(&self, id: &str) -> bool {
        self.descriptors.iter().any(|d| d.id == id)
    }

    fn after_criteria_change(&mut self) {
        if self.policy == PageResetPolicy::ResetOnChange {
            self.page = 1;
        }
    }

    /// Rewrite declared filter params; everything else in the query stays.
    fn sync_url(&mut self) {
        let kept: Vec<(String, String)> = self
            .url
            .query_pairs()
            .filter(|(key, _)| !self.is_declared(key))
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        let parser = StringParser;
        let declared: Vec<(String, String)> = self
            .descriptors
            .iter()
            .filter_map(|d| {
                let value = self.filters.get(&d.id)?;
                Some((d.id.clone(), parser.serialize(&value.to_wire())))
            })
            .collect();

        if kept.is_empty() && declared.is_empty() {
            self.url.set_query(None);
            return;
        }

        self.url
            .query_pairs_mut()
            .clear()
            .extend_pairs(kept)
            .extend_pairs(declared);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptors() -> Vec<FilterDescriptor> {
        vec![
            FilterDescriptor::text("name", "Name").with_placeholder("Search by name"),
            FilterDescriptor::text("email", "Email"),
            FilterDescriptor::select(
                "role",
                "Role",
                [
                    FilterOption::new("Admin", "admin"),
                    FilterOption::new("Student", "student"),
                ],
            ),
        ]
    }

    fn state() -> TableState {
        TableState::new(
            descriptors(),
            Url::parse("http://client.test/admin/users").unwrap(),
        )
    }

    #[test]
    fn test_initial_request() {
        let request = state().request();
        assert_eq!(request.pagination, PageRequest { page: 1, limit: 10 });
        assert!(request.sorting.is_empty());
        assert!(request.filters.is_empty());
    }

    #[test]
    fn test_pending_edits_send_nothing() {
        let mut state = state();
        assert!(state.apply_filters().is_none());

        assert!(state.set_pending_filter("name", Some("ann".into())));
        assert!(state.request().filters.is_empty());
        assert_eq!(state.filter_input("name"), "ann");

        let request = state.apply_filters().unwrap();
        assert_eq!(request.filters.get("name").map(String::as_str), Some("ann"));
        assert_eq!(state.url().as_str(), "http://client.test/admin/users?name=ann");
        assert!(state.apply_filters().is_none());
    }

    #[test]
    fn test_undeclared_filter_is_refused() {
        let mut state = state();
        assert!(!state.set_pending_filter("password", Some("x".into())));
        assert!(!state.has_pending());
    }

    #[test]
    fn test_empty_and_blank_clear_the_filter() {
        let cases: [Option<FilterValue>; 3] = [Some("".into()), Some(" ".into()), None];
        for cleared in cases {
            let mut state = state();
            state.set_pending_filter("role", Some("admin".into()));
            state.apply_filters();
            assert_eq!(state.active_filter_count(), 1);

            state.set_pending_filter("role", cleared);
            let request = state.apply_filters().unwrap();
            assert!(request.filters.is_empty());
            assert_eq!(state.url().query(), None);
        }
    }

    #[test]
    fn test_lists_are_joined() {
        let mut state = state();
        state.set_pending_filter(
            "role",
            Some(vec!["admin".to_string(), "student".to_string()].into()),
        );
        let request = state.apply_filters().unwrap();
        assert_eq!(request.filters["role"], "admin,student");
        assert_eq!(state.url().query(), Some("role=admin%2Cstudent"));
    }

    #[test]
    fn test_page_is_preserved_by_default() {
        let mut state = state();
        state.set_page(3);
        state.set_pending_filter("name", Some("ann".into()));
        assert_eq!(state.apply_filters().unwrap().pagination.page, 3);
        assert_eq!(state.set_sorting(vec![SortItem::asc("name")]).pagination.page, 3);
    }

    #[test]
    fn test_reset_on_change_policy() {
        let mut state = state().with_policy(PageResetPolicy::ResetOnChange);
        state.set_page(3);
        state.set_pending_filter("name", Some("ann".into()));
        assert_eq!(state.apply_filters().unwrap().pagination.page, 1);

        state.set_page(2);
        assert_eq!(state.set_sorting(vec![SortItem::desc("createdAt")]).pagination.page, 1);

        state.set_page(2);
        assert_eq!(state.set_page_size(20).unwrap().pagination.page, 1);
    }

    #[test]
    fn test_page_size_options() {
        let mut state = state();
        assert!(state.set_page_size(25).is_none());
        assert_eq!(state.limit(), 10);
        assert_eq!(state.set_page_size(50).unwrap().pagination.limit, 50);
        assert_eq!(state.set_page(0).pagination.page, 1);
    }

    #[test]
    fn test_clear_filters_keeps_unrelated_params() {
        let mut state = TableState::new(
            descriptors(),
            Url::parse("http://client.test/admin/users?tab=all").unwrap(),
        );
        state.set_pending_filter("name", Some("ann".into()));
        state.set_pending_filter("email", Some("example".into()));
        state.apply_filters();
        assert_eq!(state.url().query(), Some("tab=all&name=ann&email=example"));

        state.set_pending_filter("role", Some("admin".into()));
        let request = state.clear_filters();
        assert!(request.filters.is_empty());
        assert!(!state.has_pending());
        assert_eq!(state.url().query(), Some("tab=all"));
    }

    #[test]
    fn test_hydrate_from_url() {
        let state = TableState::from_url(
            descriptors(),
            Url::parse("http://client.test/admin/users?name=Ann%20Lee&role=%20&other=1&name=Bob")
                .unwrap(),
        );
        let request = state.request();
        assert_eq!(request.filters.len(), 1);
        assert_eq!(request.filters["name"], "Ann Lee");
        assert_eq!(state.url().query(), Some("other=1&name=Ann+Lee"));
    }

    #[test]
    fn test_wire_pairs() {
        let mut state = state();
        state.set_pending_filter("role", Some("admin".into()));
        state.apply_filters();
        state.set_page(2);
        let request = state.set_sorting(vec![SortItem::desc("createdAt")]);

        let pairs: Vec<_> = request
            .to_query_pairs()
            .into_iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        assert_eq!(pairs, vec!["page=2", "limit=10", "sort=-createdAt", "role=admin"]);
    }
}
