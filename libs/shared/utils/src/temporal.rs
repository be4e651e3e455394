// libs/shared/utils/src/temporal.rs
use chrono::{DateTime, Datelike, Duration, Months, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a timestamp falls relative to a reference instant.
///
/// Every timestamp lands in exactly one bucket. `Today` is decided on the
/// calendar day, so this morning's 08:00 is still today at noon; the week
/// and month buckets are forward-looking windows anchored at the reference
/// instant itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemporalBucket {
    Today,
    ThisWeek,
    ThisMonth,
    Past,
    FutureBeyondMonth,
}

/// Midnight opening the reference instant's calendar day.
pub fn start_of_day(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// Classify `date` against `now` into its single bucket.
///
/// Checks run same-day first, then past, then the `[now, now + 7 days)`
/// and `[now, now + 1 calendar month)` windows. The month step uses
/// calendar arithmetic, so the window's width follows the month lengths
/// it spans.
pub fn bucket_of(date: DateTime<Utc>, now: DateTime<Utc>) -> TemporalBucket {
    if date.date_naive() == now.date_naive() {
        return TemporalBucket::Today;
    }
    if date < start_of_day(now) {
        return TemporalBucket::Past;
    }
    if date < now + Duration::days(7) {
        return TemporalBucket::ThisWeek;
    }
    match now.checked_add_months(Months::new(1)) {
        Some(month_ahead) if date >= month_ahead => TemporalBucket::FutureBeyondMonth,
        _ => TemporalBucket::ThisMonth,
    }
}

/// True when `date` lies in the rolling window `[now - n days, now]`,
/// inclusive at both ends. No calendar truncation here: measured from a
/// Wednesday noon, a timestamp exactly n days back at noon is in, one
/// second earlier is out.
pub fn is_within_last_days(date: DateTime<Utc>, now: DateTime<Utc>, n: i64) -> bool {
    date >= now - Duration::days(n) && date <= now
}

/// Same calendar day as the reference instant.
pub fn is_same_day(date: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    date.date_naive() == now.date_naive()
}

/// Inside the coming seven days, `[now, now + 7 days)`.
pub fn is_in_coming_week(date: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    date >= now && date < now + Duration::days(7)
}

/// Same `(year, month)` calendar key as the reference instant, past or
/// future side of it alike.
pub fn is_same_month(date: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    month_key(date) == month_key(now)
}

/// Strictly before the reference day's opening midnight.
pub fn is_past_day(date: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    date < start_of_day(now)
}

/// Calendar month key of a timestamp.
pub fn month_key(date: DateTime<Utc>) -> (i32, u32) {
    (date.year(), date.month())
}

/// The `count` calendar month keys ending with the reference instant's
/// month, oldest first.
pub fn trailing_months(now: DateTime<Utc>, count: u32) -> Vec<(i32, u32)> {
    (0..count)
        .rev()
        .filter_map(|back| now.checked_sub_months(Months::new(back)))
        .map(month_key)
        .collect()
}
