// libs/appointment-cell/src/services/lifecycle.rs
use tracing::{debug, info, warn};

use shared_models::roles::{Actor, ActorRole};

use crate::models::{Appointment, AppointmentStatus, TransitionError};

/// Decides which status changes are legal and who may request them.
///
/// Pure decision logic: persistence and participant notification happen in
/// the mutation flow, and only after this service has said yes.
pub struct AppointmentLifecycleService;

impl AppointmentLifecycleService {
    pub fn new() -> Self {
        Self
    }

    /// Apply `target` to `appointment` on behalf of `actor`.
    ///
    /// Returns the updated appointment; the input is untouched. State
    /// legality is checked before ownership, so probing a cancelled
    /// appointment reports `InvalidTransition` to every caller instead of
    /// leaking who its participants are.
    pub fn transition(
        &self,
        appointment: &Appointment,
        target: AppointmentStatus,
        actor: &Actor,
    ) -> Result<Appointment, TransitionError> {
        let current = appointment.status;
        debug!(
            "Transition requested for appointment {}: {} -> {} by {} {}",
            appointment.id, current, target, actor.role, actor.user_id
        );

        // Terminal state first: nothing leaves cancelled, whoever asks.
        if current == AppointmentStatus::Cancelled {
            warn!("Transition attempted on cancelled appointment {}", appointment.id);
            return Err(TransitionError::InvalidTransition {
                from: current,
                to: target,
            });
        }

        // Re-confirming a confirmed appointment is a harmless no-op.
        if current == AppointmentStatus::Confirmed && target == AppointmentStatus::Confirmed {
            debug!("Appointment {} already confirmed", appointment.id);
            return Ok(appointment.clone());
        }

        match (current, target) {
            (AppointmentStatus::Pending, AppointmentStatus::Confirmed) => {
                self.require_owning_doctor(appointment, actor)?;
            }
            (AppointmentStatus::Pending, AppointmentStatus::Cancelled)
            | (AppointmentStatus::Confirmed, AppointmentStatus::Cancelled) => {
                self.require_participant(appointment, actor)?;
            }
            (from, to) => {
                warn!("Invalid status transition attempted: {} -> {}", from, to);
                return Err(TransitionError::InvalidTransition { from, to });
            }
        }

        info!(
            "Appointment {} moves {} -> {}",
            appointment.id, current, target
        );
        let mut updated = appointment.clone();
        updated.status = target;
        Ok(updated)
    }

    /// Get all target statuses legal from `current`, ignoring who asks.
    ///
    /// Includes the idempotent confirmed-to-confirmed edge, so this list
    /// agrees with what `transition` accepts.
    pub fn allowed_transitions(&self, current: &AppointmentStatus) -> Vec<AppointmentStatus> {
        match current {
            AppointmentStatus::Pending => vec![
                AppointmentStatus::Confirmed,
                AppointmentStatus::Cancelled,
            ],
            AppointmentStatus::Confirmed => vec![
                AppointmentStatus::Confirmed,
                AppointmentStatus::Cancelled,
            ],
            // Terminal state - no transitions allowed
            AppointmentStatus::Cancelled => vec![],
        }
    }

    /// Role-independent edge check on the status graph
    pub fn can_transition(&self, current: &AppointmentStatus, target: &AppointmentStatus) -> bool {
        self.allowed_transitions(current).contains(target)
    }

    fn require_owning_doctor(
        &self,
        appointment: &Appointment,
        actor: &Actor,
    ) -> Result<(), TransitionError> {
        if actor.role == ActorRole::Doctor && actor.user_id == appointment.doctor_id {
            return Ok(());
        }
        warn!(
            "{} {} may not confirm appointment {}",
            actor.role, actor.user_id, appointment.id
        );
        Err(TransitionError::NotOwner)
    }

    fn require_participant(
        &self,
        appointment: &Appointment,
        actor: &Actor,
    ) -> Result<(), TransitionError> {
        let allowed = match actor.role {
            ActorRole::Doctor => actor.user_id == appointment.doctor_id,
            ActorRole::Patient => actor.user_id == appointment.patient_id,
            // Administrative tooling is out of scope here; admins go
            // through their own surface, not this one.
            ActorRole::Admin => false,
        };
        if allowed {
            return Ok(());
        }
        warn!(
            "{} {} may not cancel appointment {}",
            actor.role, actor.user_id, appointment.id
        );
        Err(TransitionError::NotOwner)
    }
}

impl Default for AppointmentLifecycleService {
    fn default() -> Self {
        Self::new()
    }
}
