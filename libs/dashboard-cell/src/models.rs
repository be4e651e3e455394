// libs/dashboard-cell/src/models.rs
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};

use appointment_cell::models::AppointmentStatus;
use patient_cell::models::Patient;

// ==============================================================================
// LIST VIEW MODELS
// ==============================================================================

/// One row of the appointment list as the dashboards render it: the
/// appointment joined with its patient's name by whatever loaded it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentOverview {
    pub id: Uuid,
    pub patient_first_name: String,
    pub patient_last_name: String,
    pub reason: String,
    pub scheduled_at: DateTime<Utc>,
    pub status: AppointmentStatus,
}

impl AppointmentOverview {
    pub fn patient_full_name(&self) -> String {
        format!("{} {}", self.patient_first_name, self.patient_last_name)
    }
}

// ==============================================================================
// FILTER MODELS
// ==============================================================================

/// Status narrowing: everything, or exactly one lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    All,
    Only(AppointmentStatus),
}

/// Date narrowing applied to a record's scheduled instant.
///
/// `ThisMonth` here means the reference instant's calendar month, both
/// sides of it; the forward-looking windows belong to the bucket partition
/// in `shared_utils::temporal`, not to list filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateFilter {
    All,
    Today,
    ThisWeek,
    ThisMonth,
    Past,
}

/// The three list controls a user can combine.
///
/// Callers must reset their page to 1 whenever any of these change: the
/// engine happily serves a now-out-of-range page as an empty slice, which
/// on screen reads as "no results" even though matches exist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub search_text: String,
    pub status: StatusFilter,
    pub date: DateFilter,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            status: StatusFilter::All,
            date: DateFilter::All,
        }
    }
}

/// One page of a filtered listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

// ==============================================================================
// STATISTICS MODELS
// ==============================================================================

/// Appointments per lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub pending: usize,
    pub confirmed: usize,
    pub cancelled: usize,
}

/// Appointments in one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyCount {
    pub year: i32,
    pub month: u32,
    pub count: usize,
}

/// Patients per activity flag. The flags are independent, so one patient
/// can appear under more than one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityTierCounts {
    pub recent: usize,
    pub chronic: usize,
    pub inactive: usize,
}

/// Everything the dashboard tiles and charts need, computed in one pass
/// over the full unfiltered collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_appointments: usize,
    pub status_counts: StatusCounts,
    pub today: usize,
    pub monthly: Vec<MonthlyCount>,
    pub activity: ActivityTierCounts,
    pub total_patients: usize,
}

// ==============================================================================
// FILTERABLE RECORDS
// ==============================================================================

/// A record the filter engine can sift.
///
/// Absent fields are non-matching rather than errors: a record with no
/// status never satisfies a narrowed status filter, and a missing
/// searchable field never matches a non-empty search term. Partial data
/// must not take the rest of the list down with it.
pub trait Filterable {
    /// Field values the free-text search runs over.
    fn search_fields(&self) -> Vec<Option<String>>;

    /// Lifecycle state, for records that have one.
    fn status(&self) -> Option<AppointmentStatus> {
        None
    }

    /// The instant the date filter classifies, for records that have one.
    fn occurs_at(&self) -> Option<DateTime<Utc>> {
        None
    }
}

impl Filterable for AppointmentOverview {
    fn search_fields(&self) -> Vec<Option<String>> {
        vec![
            Some(self.patient_first_name.clone()),
            Some(self.patient_last_name.clone()),
            Some(self.reason.clone()),
        ]
    }

    fn status(&self) -> Option<AppointmentStatus> {
        Some(self.status)
    }

    fn occurs_at(&self) -> Option<DateTime<Utc>> {
        Some(self.scheduled_at)
    }
}

/// Patients are searched by name and contact details. They carry no status
/// and no scheduled instant, so any narrowed status or date filter matches
/// none of them.
impl Filterable for Patient {
    fn search_fields(&self) -> Vec<Option<String>> {
        vec![
            Some(self.first_name.clone()),
            Some(self.last_name.clone()),
            Some(self.email.clone()),
            self.phone_number.clone(),
        ]
    }
}
