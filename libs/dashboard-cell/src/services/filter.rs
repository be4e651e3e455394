// libs/dashboard-cell/src/services/filter.rs
use chrono::{DateTime, Utc};
use tracing::debug;

use shared_utils::temporal;

use crate::models::{DateFilter, FilterCriteria, Filterable, Page, StatusFilter};

/// Applies the combined search/status/date predicate and slices pages.
///
/// Filtering never fails. The three predicates are independent and joined
/// with AND, so narrowing one control never changes what the other two
/// match.
pub struct FilterEngine;

impl FilterEngine {
    pub fn new() -> Self {
        Self
    }

    /// Keep the records matching all three criteria, in their input order.
    ///
    /// Search is case-insensitive and matches a substring of any
    /// searchable field; an all-whitespace search text counts as empty.
    pub fn filter<T: Filterable + Clone>(
        &self,
        items: &[T],
        criteria: &FilterCriteria,
        now: DateTime<Utc>,
    ) -> Vec<T> {
        let needle = criteria.search_text.trim().to_lowercase();
        let kept: Vec<T> = items
            .iter()
            .filter(|item| Self::matches_search(*item, &needle))
            .filter(|item| Self::matches_status(*item, criteria.status))
            .filter(|item| Self::matches_date(*item, criteria.date, now))
            .cloned()
            .collect();
        debug!("Filter kept {} of {} records", kept.len(), items.len());
        kept
    }

    /// Slice one 1-indexed page out of `items`.
    ///
    /// A page past the end, page zero, or a zero page size all come back as
    /// an empty slice with the true totals intact; the engine never refuses
    /// a request.
    pub fn paginate<T: Clone>(&self, items: &[T], page: usize, page_size: usize) -> Page<T> {
        let total_items = items.len();
        if page_size == 0 {
            return Page {
                items: Vec::new(),
                page,
                total_pages: 0,
                total_items,
            };
        }

        let total_pages = (total_items + page_size - 1) / page_size;
        let items = if page == 0 {
            Vec::new()
        } else {
            items
                .iter()
                .skip((page - 1).saturating_mul(page_size))
                .take(page_size)
                .cloned()
                .collect()
        };

        Page {
            items,
            page,
            total_pages,
            total_items,
        }
    }

    /// Filter then paginate in one step.
    pub fn filter_page<T: Filterable + Clone>(
        &self,
        items: &[T],
        criteria: &FilterCriteria,
        page: usize,
        page_size: usize,
        now: DateTime<Utc>,
    ) -> Page<T> {
        let kept = self.filter(items, criteria, now);
        self.paginate(&kept, page, page_size)
    }

    fn matches_search<T: Filterable>(item: &T, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        item.search_fields()
            .iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(needle))
    }

    fn matches_status<T: Filterable>(item: &T, filter: StatusFilter) -> bool {
        match filter {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => item.status() == Some(wanted),
        }
    }

    fn matches_date<T: Filterable>(item: &T, filter: DateFilter, now: DateTime<Utc>) -> bool {
        let at = match item.occurs_at() {
            Some(at) => at,
            None => return filter == DateFilter::All,
        };
        match filter {
            DateFilter::All => true,
            DateFilter::Today => temporal::is_same_day(at, now),
            DateFilter::ThisWeek => temporal::is_in_coming_week(at, now),
            DateFilter::ThisMonth => temporal::is_same_month(at, now),
            DateFilter::Past => temporal::is_past_day(at, now),
        }
    }
}

impl Default for FilterEngine {
    fn default() -> Self {
        Self::new()
    }
}
