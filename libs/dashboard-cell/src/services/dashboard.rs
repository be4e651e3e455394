// libs/dashboard-cell/src/services/dashboard.rs
use std::sync::Arc;

use tracing::debug;

use appointment_cell::models::Appointment;
use patient_cell::models::Patient;
use shared_models::clock::{Clock, SystemClock};

use crate::models::{DashboardStats, FilterCriteria, Filterable, Page};
use crate::services::filter::FilterEngine;
use crate::services::stats::StatisticsService;

/// Entry point the application shell talks to.
///
/// Reads its clock exactly once per call and hands that instant to the
/// pure engines underneath, so every figure inside one response agrees on
/// what "now" was.
pub struct DashboardService {
    clock: Arc<dyn Clock>,
    filter: FilterEngine,
    statistics: StatisticsService,
}

impl DashboardService {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            filter: FilterEngine::new(),
            statistics: StatisticsService::new(),
        }
    }

    /// One filtered, paginated page of listable records.
    pub fn page<T: Filterable + Clone>(
        &self,
        items: &[T],
        criteria: &FilterCriteria,
        page: usize,
        page_size: usize,
    ) -> Page<T> {
        let now = self.clock.now();
        debug!("Serving page {} (size {}) at {}", page, page_size, now);
        self.filter.filter_page(items, criteria, page, page_size, now)
    }

    /// Dashboard tiles and charts over the unfiltered collections.
    pub fn stats(&self, appointments: &[Appointment], patients: &[Patient]) -> DashboardStats {
        self.statistics.aggregate(appointments, patients, self.clock.now())
    }
}

impl Default for DashboardService {
    fn default() -> Self {
        Self::new()
    }
}
