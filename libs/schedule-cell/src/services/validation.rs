// libs/schedule-cell/src/services/validation.rs
use chrono::{NaiveTime, Weekday};
use tracing::{debug, warn};

use crate::models::{CreateSlotRequest, SchedulingRules, SlotError, TimeSlot};

/// Pre-flight checks for a candidate weekly slot.
///
/// This service holds no state beyond its rules, so it can run anywhere a
/// candidate needs checking (form submission, previews). The registry runs
/// the conflict checks again inside the mutating call, which is what makes
/// a stale advisory result here harmless.
#[derive(Debug, Clone)]
pub struct SlotValidationService {
    rules: SchedulingRules,
}

impl SlotValidationService {
    pub fn new() -> Self {
        Self {
            rules: SchedulingRules::default(),
        }
    }

    pub fn with_rules(rules: SchedulingRules) -> Self {
        Self { rules }
    }

    /// Validate a raw create-slot payload against a doctor's existing slots.
    ///
    /// Returns the parsed `(start, end)` pair so callers do not parse the
    /// text fields twice. Checks run in a fixed order and the first failure
    /// wins: format, duration, working hours, duplicate, overlap.
    pub fn validate_request(
        &self,
        request: &CreateSlotRequest,
        existing: &[TimeSlot],
    ) -> Result<(NaiveTime, NaiveTime), SlotError> {
        let start = parse_slot_time(&request.start_time)?;
        let end = parse_slot_time(&request.end_time)?;
        self.validate_interval(request.day_of_week, start, end, existing)?;
        Ok((start, end))
    }

    /// Validate an already-parsed candidate interval.
    pub fn validate_interval(
        &self,
        day: Weekday,
        start: NaiveTime,
        end: NaiveTime,
        existing: &[TimeSlot],
    ) -> Result<(), SlotError> {
        debug!("Validating candidate slot: {} {} - {}", day, start, end);

        if start >= end {
            warn!("Candidate slot has a non-increasing range: {} - {}", start, end);
            return Err(SlotError::InvalidFormat(format!("{} - {}", start, end)));
        }

        if (end - start).num_minutes() < self.rules.min_slot_minutes {
            return Err(SlotError::TooShort);
        }

        if start < self.rules.opening_time || end > self.rules.closing_time {
            return Err(SlotError::OutOfHours);
        }

        let same_day: Vec<&TimeSlot> = existing
            .iter()
            .filter(|slot| slot.day_of_week == day)
            .collect();

        if same_day
            .iter()
            .any(|slot| slot.start_time == start && slot.end_time == end)
        {
            return Err(SlotError::Duplicate);
        }

        // Half-open intervals: a slot starting exactly where another ends
        // is legal.
        if let Some(conflict) = same_day
            .iter()
            .find(|slot| start < slot.end_time && slot.start_time < end)
        {
            warn!(
                "Candidate slot {} - {} overlaps existing slot: {} - {}",
                start, end, conflict.start_time, conflict.end_time
            );
            return Err(SlotError::Overlap);
        }

        Ok(())
    }
}

impl Default for SlotValidationService {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse an `HH:MM` (or `HH:MM:SS`) time-of-day field.
fn parse_slot_time(text: &str) -> Result<NaiveTime, SlotError> {
    NaiveTime::parse_from_str(text, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M:%S"))
        .map_err(|_| SlotError::InvalidFormat(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_slot_time_accepts_both_forms() {
        assert_eq!(
            parse_slot_time("09:00").unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap()
        );
        assert_eq!(
            parse_slot_time("09:00:00").unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_slot_time_reports_offending_text() {
        let err = parse_slot_time("9am").unwrap_err();
        assert_eq!(err, SlotError::InvalidFormat("9am".to_string()));
    }
}
