use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, Utc};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Patient {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Derived attendance flags for one patient at one instant.
///
/// The flags are independent rather than exclusive: a long-standing patient
/// seen last week is both recent and chronic. Nothing here is stored;
/// callers recompute from the appointment history on every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientActivity {
    pub is_recent: bool,
    pub is_chronic: bool,
    pub is_inactive: bool,
}

/// Windows and counts behind the activity flags.
#[derive(Debug, Clone)]
pub struct ActivityThresholds {
    pub recent_within_days: i64,
    pub inactive_after_days: i64,
    pub chronic_visit_count: usize,
}

impl Default for ActivityThresholds {
    fn default() -> Self {
        Self {
            recent_within_days: 30,
            inactive_after_days: 90,
            chronic_visit_count: 3,
        }
    }
}
