// libs/schedule-cell/src/services/registry.rs
use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc, Weekday};
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::{CreateSlotRequest, SlotError, TimeSlot, WeeklySchedule};
use crate::services::validation::SlotValidationService;

/// In-memory slot store, keyed by owning doctor.
///
/// The duplicate/overlap constraint is enforced inside the mutating calls
/// themselves, against the live slot set. Advisory validation run earlier
/// against a snapshot is welcome but never trusted: two candidates that
/// both passed it cannot both get in if they collide.
pub struct SlotRegistry {
    slots: HashMap<Uuid, Vec<TimeSlot>>,
    validation: SlotValidationService,
}

impl SlotRegistry {
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
            validation: SlotValidationService::new(),
        }
    }

    pub fn with_validation(validation: SlotValidationService) -> Self {
        Self {
            slots: HashMap::new(),
            validation,
        }
    }

    /// Validate and store a new slot for `doctor_id`.
    pub fn create_slot(
        &mut self,
        doctor_id: Uuid,
        request: &CreateSlotRequest,
    ) -> Result<TimeSlot, SlotError> {
        let existing = self.slots.get(&doctor_id).map(Vec::as_slice).unwrap_or(&[]);
        let (start, end) = self.validation.validate_request(request, existing)?;
        Ok(self.store(doctor_id, request.day_of_week, start, end))
    }

    /// Store an interval the caller already validated.
    ///
    /// The full check suite runs again here against the live set, so a
    /// candidate whose earlier validation raced a competing insert is still
    /// rejected, with the same error kind the form knows how to display.
    pub fn insert_validated(
        &mut self,
        doctor_id: Uuid,
        day: Weekday,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<TimeSlot, SlotError> {
        let existing = self.slots.get(&doctor_id).map(Vec::as_slice).unwrap_or(&[]);
        self.validation.validate_interval(day, start, end, existing)?;
        Ok(self.store(doctor_id, day, start, end))
    }

    fn store(&mut self, doctor_id: Uuid, day: Weekday, start: NaiveTime, end: NaiveTime) -> TimeSlot {
        let slot = TimeSlot {
            id: Uuid::new_v4(),
            doctor_id,
            day_of_week: day,
            start_time: start,
            end_time: end,
            is_available: true,
        };
        info!("Slot stored for doctor {}: {} {} - {}", doctor_id, day, start, end);
        self.slots.entry(doctor_id).or_default().push(slot.clone());
        slot
    }

    /// Flip a slot's published flag without touching its times.
    ///
    /// Returns the updated slot, or `None` when `doctor_id` owns no slot
    /// with this id. A hidden slot keeps its place in the week and still
    /// counts for conflict checks.
    pub fn set_availability(
        &mut self,
        doctor_id: Uuid,
        slot_id: Uuid,
        available: bool,
    ) -> Option<TimeSlot> {
        let slot = self
            .slots
            .get_mut(&doctor_id)?
            .iter_mut()
            .find(|slot| slot.id == slot_id)?;
        slot.is_available = available;
        debug!("Slot {} availability set to {}", slot_id, available);
        Some(slot.clone())
    }

    /// Remove a slot. Returns the removed slot, or `None` when `doctor_id`
    /// owns no slot with this id.
    pub fn remove_slot(&mut self, doctor_id: Uuid, slot_id: Uuid) -> Option<TimeSlot> {
        let owned = self.slots.get_mut(&doctor_id)?;
        let index = owned.iter().position(|slot| slot.id == slot_id)?;
        let removed = owned.remove(index);
        info!("Slot {} removed for doctor {}", slot_id, doctor_id);
        Some(removed)
    }

    /// All slots owned by a doctor, ordered by weekday then start time.
    pub fn slots_for(&self, doctor_id: Uuid) -> Vec<TimeSlot> {
        let mut slots = self.slots.get(&doctor_id).cloned().unwrap_or_default();
        slots.sort_by_key(|slot| (slot.day_of_week.num_days_from_monday(), slot.start_time));
        slots
    }

    /// The doctor's week grouped Monday through Sunday.
    pub fn weekly_schedule(&self, doctor_id: Uuid) -> WeeklySchedule {
        WeeklySchedule::from_slots(self.slots.get(&doctor_id).map(Vec::as_slice).unwrap_or(&[]))
    }

    /// Concrete start instants offered to patients on one calendar date.
    ///
    /// Only slots published for that date's weekday and currently marked
    /// available contribute; each yields its start time anchored to the
    /// date, in ascending order.
    pub fn offered_starts(&self, doctor_id: Uuid, date: NaiveDate) -> Vec<DateTime<Utc>> {
        let mut starts: Vec<DateTime<Utc>> = self
            .slots
            .get(&doctor_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
            .iter()
            .filter(|slot| slot.is_available && slot.occurs_on(date))
            .map(|slot| slot.start_on(date))
            .collect();
        starts.sort();
        starts
    }
}

impl Default for SlotRegistry {
    fn default() -> Self {
        Self::new()
    }
}
