// libs/schedule-cell/src/models.rs
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc, Weekday};

// ==============================================================================
// CORE SLOT MODELS
// ==============================================================================

/// A recurring weekly availability window published by a doctor.
///
/// A slot knows its weekday and time range only. Booked appointments store
/// absolute timestamps and never point back at a slot, so editing the weekly
/// pattern later cannot corrupt bookings already made.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: Uuid,
    pub doctor_id: Uuid,
    pub day_of_week: Weekday,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_available: bool,
}

impl TimeSlot {
    /// Length of the window in whole minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }

    /// Whether this weekly slot recurs on the given calendar date.
    pub fn occurs_on(&self, date: NaiveDate) -> bool {
        self.day_of_week == date.weekday()
    }

    /// The concrete start instant of this slot on the given date.
    pub fn start_on(&self, date: NaiveDate) -> DateTime<Utc> {
        date.and_time(self.start_time).and_utc()
    }
}

/// Payload of the create-slot form. Times arrive as text and are parsed
/// during validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSlotRequest {
    pub day_of_week: Weekday,
    pub start_time: String,
    pub end_time: String,
}

// ==============================================================================
// SCHEDULING RULES
// ==============================================================================

/// Bounds a candidate slot must respect before any conflict checks run.
#[derive(Debug, Clone)]
pub struct SchedulingRules {
    pub min_slot_minutes: i64,
    pub opening_time: NaiveTime,
    pub closing_time: NaiveTime,
}

impl Default for SchedulingRules {
    fn default() -> Self {
        Self {
            min_slot_minutes: 30,
            opening_time: NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
            closing_time: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
        }
    }
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

/// Why a candidate slot was rejected. One rejection carries one kind; the
/// checks run in a fixed order and stop at the first failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum SlotError {
    #[error("time range is not valid: {0}")]
    InvalidFormat(String),

    #[error("slot is shorter than the minimum consultation length")]
    TooShort,

    #[error("slot falls outside working hours")]
    OutOfHours,

    #[error("an identical slot already exists on this day")]
    Duplicate,

    #[error("slot overlaps an existing slot on the same day")]
    Overlap,
}

// ==============================================================================
// DERIVED VIEWS
// ==============================================================================

/// One weekday's slots, ordered by start time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaySchedule {
    pub day: Weekday,
    pub slots: Vec<TimeSlot>,
}

/// A doctor's full week, Monday through Sunday, every day present even
/// when empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklySchedule {
    pub days: Vec<DaySchedule>,
}

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

impl WeeklySchedule {
    /// Group `slots` by weekday, Monday first, each day ordered by start
    /// time.
    pub fn from_slots(slots: &[TimeSlot]) -> Self {
        let mut days: Vec<DaySchedule> = WEEK
            .iter()
            .map(|day| DaySchedule {
                day: *day,
                slots: Vec::new(),
            })
            .collect();

        for slot in slots {
            let index = slot.day_of_week.num_days_from_monday() as usize;
            days[index].slots.push(slot.clone());
        }
        for day in &mut days {
            day.slots.sort_by_key(|slot| slot.start_time);
        }

        Self { days }
    }

    /// The schedule for one weekday.
    pub fn day(&self, day: Weekday) -> &DaySchedule {
        &self.days[day.num_days_from_monday() as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_accepts_form_payload() {
        let json = r#"{"day_of_week": "Mon", "start_time": "09:00", "end_time": "10:30"}"#;
        let request: CreateSlotRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.day_of_week, Weekday::Mon);
        assert_eq!(request.start_time, "09:00");
        assert_eq!(request.end_time, "10:30");
    }

    #[test]
    fn test_duration_minutes() {
        let slot = TimeSlot {
            id: Uuid::new_v4(),
            doctor_id: Uuid::new_v4(),
            day_of_week: Weekday::Mon,
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
            is_available: true,
        };
        assert_eq!(slot.duration_minutes(), 90);
    }

    #[test]
    fn test_occurs_on_matches_weekday() {
        let slot = TimeSlot {
            id: Uuid::new_v4(),
            doctor_id: Uuid::new_v4(),
            day_of_week: Weekday::Mon,
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
            is_available: true,
        };
        // 2024-03-18 is a Monday, 2024-03-19 a Tuesday.
        assert!(slot.occurs_on(NaiveDate::from_ymd_opt(2024, 3, 18).unwrap()));
        assert!(!slot.occurs_on(NaiveDate::from_ymd_opt(2024, 3, 19).unwrap()));
    }
}
