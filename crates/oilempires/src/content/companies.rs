//! Company listing with client-side pagination and selection.

use std::ops::Range;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::Result;
use crate::model::Company;
use crate::query::{Cached, Ticket};
use crate::store::ContentStore;

/// Key of the single company-list query.
const COMPANIES_QUERY: &str = "oil-companies";

/// Page arithmetic over a list of known length. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
    total: usize,
    page: usize,
}

impl Paginator {
    /// A paginator on page 1. A `page_size` of zero is treated as one.
    #[must_use]
    pub fn new(page_size: usize, total: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            total,
            page: 1,
        }
    }

    /// Items per page.
    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Current page, 1-based.
    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    /// `ceil(total / page_size)`; zero for an empty list.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.total.div_ceil(self.page_size)
    }

    /// Change the list length, pulling the current page back into range.
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
        self.page = self.page.min(self.page_count()).max(1);
    }

    /// Index range of the current page's items.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        let start = ((self.page - 1) * self.page_size).min(self.total);
        let end = (start + self.page_size).min(self.total);
        start..end
    }

    /// Whether there is a page before this one.
    #[must_use]
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Whether there is a page after this one.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.page_count()
    }

    /// Pagination controls are only worth drawing with more than one page.
    #[must_use]
    pub fn shows_controls(&self) -> bool {
        self.page_count() > 1
    }

    /// Advance one page; stays put on the last page.
    pub fn next_page(&mut self) {
        if self.has_next() {
            self.page += 1;
        }
    }

    /// Go back one page; stays put on the first page.
    pub fn prev_page(&mut self) {
        if self.has_prev() {
            self.page -= 1;
        }
    }

    /// Jump to `page`, clamped to `1..=page_count`.
    pub fn go_to_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.page_count().max(1));
    }
}

/// The companies view: fetched list, current page, selected company.
#[derive(Debug)]
pub struct CompanyTable {
    companies: Cached<&'static str, Vec<Company>>,
    paginator: Paginator,
    selected: Option<Uuid>,
}

impl CompanyTable {
    /// An empty table. Call [`load`](Self::load) to fetch.
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            companies: Cached::new(),
            paginator: Paginator::new(page_size, 0),
            selected: None,
        }
    }

    /// Fetch the company list, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns the store error; the table keeps whatever it had before.
    pub async fn load<S: ContentStore + ?Sized>(&mut self, store: &S) -> Result<()> {
        let ticket = self.companies.begin(COMPANIES_QUERY);
        let companies = store.list_companies().await.map_err(|e| {
            warn!("Loading companies failed: {}", e);
            e
        })?;
        self.set_companies(ticket, companies);
        Ok(())
    }

    /// Populate from an already-fetched list.
    pub fn replace(&mut self, companies: Vec<Company>) {
        let ticket = self.companies.begin(COMPANIES_QUERY);
        self.set_companies(ticket, companies);
    }

    fn set_companies(&mut self, ticket: Ticket<&'static str>, companies: Vec<Company>) {
        let total = companies.len();
        if self.companies.settle(ticket, companies) {
            debug!("Company table holds {} rows", total);
            self.paginator.set_total(total);
            if let Some(id) = self.selected {
                if !self.all().iter().any(|c| c.id == id) {
                    self.selected = None;
                }
            }
        }
    }

    /// Whether a fetch has completed.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.companies.get().is_some()
    }

    /// Every fetched company.
    #[must_use]
    pub fn all(&self) -> &[Company] {
        self.companies.get().map(Vec::as_slice).unwrap_or_default()
    }

    /// Page state.
    #[must_use]
    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    /// Current page, 1-based.
    #[must_use]
    pub fn page(&self) -> usize {
        self.paginator.page()
    }

    /// Number of pages.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.paginator.page_count()
    }

    /// Companies on the current page.
    #[must_use]
    pub fn current_page_rows(&self) -> &[Company] {
        self.all().get(self.paginator.range()).unwrap_or_default()
    }

    /// See [`Paginator::next_page`].
    pub fn next_page(&mut self) {
        self.paginator.next_page();
    }

    /// See [`Paginator::prev_page`].
    pub fn prev_page(&mut self) {
        self.paginator.prev_page();
    }

    /// See [`Paginator::go_to_page`].
    pub fn go_to_page(&mut self, page: usize) {
        self.paginator.go_to_page(page);
    }

    /// Select the company with `id`. Returns `false` if it is not listed.
    pub fn select(&mut self, id: Uuid) -> bool {
        if self.all().iter().any(|c| c.id == id) {
            self.selected = Some(id);
            true
        } else {
            false
        }
    }

    /// Select by case-insensitive name.
    pub fn select_by_name(&mut self, name: &str) -> bool {
        let found = self
            .all()
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .map(|c| c.id);
        match found {
            Some(id) => self.select(id),
            None => false,
        }
    }

    /// Close the detail card.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// The selected company, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&Company> {
        let id = self.selected?;
        self.all().iter().find(|c| c.id == id)
    }
}
