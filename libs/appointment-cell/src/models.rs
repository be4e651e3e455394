// libs/appointment-cell/src/models.rs
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use std::fmt;

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

/// A concrete, dated booking between one patient and one doctor.
///
/// `scheduled_at` never changes after creation; a reschedule is modelled
/// by the booking flow as a cancellation plus a new appointment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub reason: String,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
}

/// Lifecycle states of an appointment.
///
/// Cancellation is a status, not a deletion: cancelled records stay in the
/// collection for history and statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl AppointmentStatus {
    /// Terminal states accept no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, AppointmentStatus::Cancelled)
    }

    /// Still on the calendar, pending or confirmed
    pub fn is_active(&self) -> bool {
        !self.is_terminal()
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Pending => write!(f, "pending"),
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

/// Why a requested status change was refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum TransitionError {
    #[error("Cannot move appointment from {from} to {to}")]
    InvalidTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    #[error("Actor does not hold the required role on this appointment")]
    NotOwner,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&AppointmentStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::to_string(&AppointmentStatus::Cancelled).unwrap(),
            "\"cancelled\""
        );
    }

    #[test]
    fn test_appointment_accepts_boundary_payload() {
        let json = r#"{
            "id": "7f2c1a90-33aa-4be0-9f0e-0e2d8a6f5c11",
            "patient_id": "0d4f2a6e-1a7b-4c64-8a2f-55b6f34b9ad1",
            "doctor_id": "b1f5c9d2-7e38-4b0a-9f61-c2a84d7e3f20",
            "scheduled_at": "2024-03-20T10:00:00Z",
            "reason": "Annual check-up",
            "status": "pending",
            "created_at": "2024-03-01T08:30:00Z"
        }"#;
        let appointment: Appointment = serde_json::from_str(json).unwrap();
        assert_eq!(appointment.status, AppointmentStatus::Pending);
        assert_eq!(appointment.reason, "Annual check-up");
    }

    #[test]
    fn test_terminal_and_active_partition_statuses() {
        assert!(AppointmentStatus::Cancelled.is_terminal());
        assert!(!AppointmentStatus::Pending.is_terminal());
        assert!(AppointmentStatus::Pending.is_active());
        assert!(AppointmentStatus::Confirmed.is_active());
        assert!(!AppointmentStatus::Cancelled.is_active());
    }

    #[test]
    fn test_transition_error_names_both_states() {
        let err = TransitionError::InvalidTransition {
            from: AppointmentStatus::Cancelled,
            to: AppointmentStatus::Confirmed,
        };
        assert_eq!(err.to_string(), "Cannot move appointment from cancelled to confirmed");
    }
}
