// libs/patient-cell/src/services/activity.rs
use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use appointment_cell::models::Appointment;
use shared_utils::temporal;

use crate::models::{ActivityThresholds, PatientActivity};

/// Classifies patients by how recently and how often they attend.
pub struct PatientActivityService {
    thresholds: ActivityThresholds,
}

impl PatientActivityService {
    pub fn new() -> Self {
        Self {
            thresholds: ActivityThresholds::default(),
        }
    }

    pub fn with_thresholds(thresholds: ActivityThresholds) -> Self {
        Self { thresholds }
    }

    /// Derive the activity flags from one patient's appointment history.
    ///
    /// Every appointment counts whatever its status: cancelled bookings are
    /// part of the record too. The recency windows are inclusive at both
    /// ends, and a patient whose visits all lie in the future has no recent
    /// attendance, which makes them inactive.
    pub fn classify(&self, history: &[Appointment], now: DateTime<Utc>) -> PatientActivity {
        let attended_within = |days: i64| {
            history
                .iter()
                .any(|appointment| temporal::is_within_last_days(appointment.scheduled_at, now, days))
        };

        let activity = PatientActivity {
            is_recent: attended_within(self.thresholds.recent_within_days),
            is_chronic: history.len() >= self.thresholds.chronic_visit_count,
            is_inactive: !attended_within(self.thresholds.inactive_after_days),
        };
        debug!(
            "Classified {} appointments: recent={} chronic={} inactive={}",
            history.len(),
            activity.is_recent,
            activity.is_chronic,
            activity.is_inactive
        );
        activity
    }

    /// Pick one patient's appointments out of the full collection and
    /// classify them.
    pub fn activity_for(
        &self,
        patient_id: Uuid,
        appointments: &[Appointment],
        now: DateTime<Utc>,
    ) -> PatientActivity {
        let history: Vec<Appointment> = appointments
            .iter()
            .filter(|appointment| appointment.patient_id == patient_id)
            .cloned()
            .collect();
        self.classify(&history, now)
    }
}

impl Default for PatientActivityService {
    fn default() -> Self {
        Self::new()
    }
}
