// libs/dashboard-cell/src/services/stats.rs
use chrono::{DateTime, Utc};
use tracing::debug;

use appointment_cell::models::{Appointment, AppointmentStatus};
use patient_cell::models::Patient;
use patient_cell::services::activity::PatientActivityService;
use shared_utils::temporal::{self, TemporalBucket};

use crate::models::{ActivityTierCounts, DashboardStats, MonthlyCount, StatusCounts};

/// Months of history the dashboard chart shows.
const HISTOGRAM_MONTHS: u32 = 6;

/// Rolls the full appointment and patient collections up into dashboard
/// numbers.
///
/// Always fed the unfiltered collections: the tiles keep their values
/// while the list below them is narrowed. Identical inputs and reference
/// instant produce identical output whatever order the records arrive in.
pub struct StatisticsService {
    activity: PatientActivityService,
}

impl StatisticsService {
    pub fn new() -> Self {
        Self {
            activity: PatientActivityService::new(),
        }
    }

    pub fn with_activity(activity: PatientActivityService) -> Self {
        Self { activity }
    }

    /// Compute every dashboard figure at once.
    pub fn aggregate(
        &self,
        appointments: &[Appointment],
        patients: &[Patient],
        now: DateTime<Utc>,
    ) -> DashboardStats {
        let status_counts = self.status_counts(appointments);
        let today = appointments
            .iter()
            .filter(|appointment| {
                temporal::bucket_of(appointment.scheduled_at, now) == TemporalBucket::Today
            })
            .count();
        let monthly = self.monthly_histogram(appointments, now);
        let activity = self.activity_counts(appointments, patients, now);

        debug!(
            "Aggregated dashboard stats over {} appointments and {} patients",
            appointments.len(),
            patients.len()
        );

        DashboardStats {
            total_appointments: appointments.len(),
            status_counts,
            today,
            monthly,
            activity,
            total_patients: patients.len(),
        }
    }

    /// Count appointments per lifecycle state. Cancelled records are in the
    /// collection and therefore in the totals.
    pub fn status_counts(&self, appointments: &[Appointment]) -> StatusCounts {
        let mut counts = StatusCounts {
            pending: 0,
            confirmed: 0,
            cancelled: 0,
        };
        for appointment in appointments {
            match appointment.status {
                AppointmentStatus::Pending => counts.pending += 1,
                AppointmentStatus::Confirmed => counts.confirmed += 1,
                AppointmentStatus::Cancelled => counts.cancelled += 1,
            }
        }
        counts
    }

    /// Appointment counts for the trailing six calendar months, oldest
    /// first, with empty months kept at zero so the chart never collapses.
    pub fn monthly_histogram(
        &self,
        appointments: &[Appointment],
        now: DateTime<Utc>,
    ) -> Vec<MonthlyCount> {
        temporal::trailing_months(now, HISTOGRAM_MONTHS)
            .into_iter()
            .map(|(year, month)| MonthlyCount {
                year,
                month,
                count: appointments
                    .iter()
                    .filter(|appointment| {
                        temporal::month_key(appointment.scheduled_at) == (year, month)
                    })
                    .count(),
            })
            .collect()
    }

    /// Tally the activity flags across the whole roster. The flags are not
    /// exclusive, so the three columns may sum past the patient count.
    pub fn activity_counts(
        &self,
        appointments: &[Appointment],
        patients: &[Patient],
        now: DateTime<Utc>,
    ) -> ActivityTierCounts {
        let mut counts = ActivityTierCounts {
            recent: 0,
            chronic: 0,
            inactive: 0,
        };
        for patient in patients {
            let flags = self.activity.activity_for(patient.id, appointments, now);
            if flags.is_recent {
                counts.recent += 1;
            }
            if flags.is_chronic {
                counts.chronic += 1;
            }
            if flags.is_inactive {
                counts.inactive += 1;
            }
        }
        counts
    }
}

impl Default for StatisticsService {
    fn default() -> Self {
        Self::new()
    }
}
