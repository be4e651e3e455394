// libs/dashboard-cell/tests/filter_test.rs
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use appointment_cell::models::AppointmentStatus;
use dashboard_cell::models::{
    AppointmentOverview, DateFilter, FilterCriteria, Filterable, StatusFilter,
};
use dashboard_cell::services::dashboard::DashboardService;
use dashboard_cell::services::filter::FilterEngine;
use patient_cell::models::Patient;
use shared_models::clock::FixedClock;

fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0).unwrap()
}

fn now() -> DateTime<Utc> {
    utc(2024, 3, 20, 12, 0)
}

fn overview(
    first: &str,
    last: &str,
    reason: &str,
    scheduled_at: DateTime<Utc>,
    status: AppointmentStatus,
) -> AppointmentOverview {
    AppointmentOverview {
        id: Uuid::new_v4(),
        patient_first_name: first.to_string(),
        patient_last_name: last.to_string(),
        reason: reason.to_string(),
        scheduled_at,
        status,
    }
}

/// Five rows spread across today, the coming week, the past and the next
/// month, in every lifecycle state.
fn roster() -> Vec<AppointmentOverview> {
    vec![
        overview("Alice", "Murphy", "Annual check-up", utc(2024, 3, 20, 9, 0), AppointmentStatus::Confirmed),
        overview("Brian", "Okafor", "Back pain", utc(2024, 3, 21, 10, 0), AppointmentStatus::Pending),
        overview("Clara", "Nowak", "Migraine", utc(2024, 3, 15, 11, 0), AppointmentStatus::Cancelled),
        overview("Daniel", "Silva", "Flu symptoms", utc(2024, 4, 2, 9, 30), AppointmentStatus::Pending),
        overview("Emma", "Lynch", "Skin rash follow-up", utc(2024, 3, 24, 14, 0), AppointmentStatus::Confirmed),
    ]
}

fn patient(first: &str, last: &str, email: &str, phone: Option<&str>) -> Patient {
    Patient {
        id: Uuid::new_v4(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: email.to_string(),
        phone_number: phone.map(str::to_string),
        date_of_birth: None,
        created_at: utc(2023, 1, 10, 9, 0),
    }
}

fn criteria(search: &str, status: StatusFilter, date: DateFilter) -> FilterCriteria {
    FilterCriteria {
        search_text: search.to_string(),
        status,
        date,
    }
}

fn names(rows: &[AppointmentOverview]) -> Vec<String> {
    rows.iter().map(|row| row.patient_first_name.clone()).collect()
}

// ==============================================================================
// SEARCH
// ==============================================================================

#[test]
fn test_empty_search_matches_everything() {
    let engine = FilterEngine::new();
    let kept = engine.filter(&roster(), &FilterCriteria::default(), now());
    assert_eq!(kept.len(), 5);
}

#[test]
fn test_whitespace_search_counts_as_empty() {
    let engine = FilterEngine::new();
    let kept = engine.filter(
        &roster(),
        &criteria("   ", StatusFilter::All, DateFilter::All),
        now(),
    );
    assert_eq!(kept.len(), 5);
}

#[test]
fn test_search_is_case_insensitive() {
    let engine = FilterEngine::new();
    let kept = engine.filter(
        &roster(),
        &criteria("MURPHY", StatusFilter::All, DateFilter::All),
        now(),
    );
    assert_eq!(names(&kept), vec!["Alice"]);
}

#[test]
fn test_search_matches_reason_substring() {
    let engine = FilterEngine::new();
    let kept = engine.filter(
        &roster(),
        &criteria("pain", StatusFilter::All, DateFilter::All),
        now(),
    );
    assert_eq!(names(&kept), vec!["Brian"]);
}

#[test]
fn test_search_without_matches_returns_empty() {
    let engine = FilterEngine::new();
    let kept = engine.filter(
        &roster(),
        &criteria("zzzz", StatusFilter::All, DateFilter::All),
        now(),
    );
    assert!(kept.is_empty());
}

#[test]
fn test_missing_phone_field_never_matches() {
    let engine = FilterEngine::new();
    let patients = vec![
        patient("Aoife", "Byrne", "aoife@example.com", None),
        patient("Sean", "Walsh", "sean@example.com", Some("0871234567")),
    ];

    let kept = engine.filter(
        &patients,
        &criteria("0871", StatusFilter::All, DateFilter::All),
        now(),
    );
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].first_name, "Sean");
}

// ==============================================================================
// STATUS
// ==============================================================================

#[test]
fn test_status_filter_keeps_exact_state_only() {
    let engine = FilterEngine::new();
    let kept = engine.filter(
        &roster(),
        &criteria("", StatusFilter::Only(AppointmentStatus::Pending), DateFilter::All),
        now(),
    );
    assert_eq!(names(&kept), vec!["Brian", "Daniel"]);
}

#[test]
fn test_patients_never_match_a_narrowed_status() {
    let engine = FilterEngine::new();
    let patients = vec![patient("Aoife", "Byrne", "aoife@example.com", None)];

    let kept = engine.filter(
        &patients,
        &criteria("", StatusFilter::Only(AppointmentStatus::Pending), DateFilter::All),
        now(),
    );
    assert!(kept.is_empty());
}

// ==============================================================================
// DATE
// ==============================================================================

#[test]
fn test_today_filter_is_calendar_day_not_last_24_hours() {
    let engine = FilterEngine::new();
    // Alice's 09:00 slot is earlier than the reference noon but still today.
    let kept = engine.filter(
        &roster(),
        &criteria("", StatusFilter::All, DateFilter::Today),
        now(),
    );
    assert_eq!(names(&kept), vec!["Alice"]);
}

#[test]
fn test_week_filter_looks_forward_seven_days() {
    let engine = FilterEngine::new();
    let kept = engine.filter(
        &roster(),
        &criteria("", StatusFilter::All, DateFilter::ThisWeek),
        now(),
    );
    // This morning is already behind the reference instant, and Daniel is
    // thirteen days out.
    assert_eq!(names(&kept), vec!["Brian", "Emma"]);
}

#[test]
fn test_month_filter_covers_the_whole_calendar_month() {
    let engine = FilterEngine::new();
    let rows = vec![
        overview("Early", "March", "Review", utc(2024, 3, 1, 9, 0), AppointmentStatus::Confirmed),
        overview("Mid", "March", "Review", utc(2024, 3, 15, 9, 0), AppointmentStatus::Confirmed),
        overview("Early", "April", "Review", utc(2024, 4, 2, 9, 0), AppointmentStatus::Confirmed),
    ];

    let kept = engine.filter(
        &rows,
        &criteria("", StatusFilter::All, DateFilter::ThisMonth),
        now(),
    );
    assert_eq!(kept.len(), 2);
    assert!(kept.iter().all(|row| row.patient_last_name == "March"));
}

#[test]
fn test_past_filter_keeps_completed_days_only() {
    let engine = FilterEngine::new();
    let kept = engine.filter(
        &roster(),
        &criteria("", StatusFilter::All, DateFilter::Past),
        now(),
    );
    assert_eq!(names(&kept), vec!["Clara"]);
}

#[test]
fn test_patients_never_match_a_narrowed_date() {
    let engine = FilterEngine::new();
    let patients = vec![patient("Aoife", "Byrne", "aoife@example.com", None)];

    let kept = engine.filter(
        &patients,
        &criteria("", StatusFilter::All, DateFilter::Today),
        now(),
    );
    assert!(kept.is_empty());
}

// ==============================================================================
// COMBINATION
// ==============================================================================

#[test]
fn test_filters_combine_with_and() {
    let engine = FilterEngine::new();
    let kept = engine.filter(
        &roster(),
        &criteria(
            "a",
            StatusFilter::Only(AppointmentStatus::Pending),
            DateFilter::ThisWeek,
        ),
        now(),
    );
    // Daniel matches the text and the status but sits outside the week.
    assert_eq!(names(&kept), vec!["Brian"]);
}

#[test]
fn test_combined_filter_equals_intersection_of_single_filters() {
    let engine = FilterEngine::new();
    let rows = roster();

    let by_search = engine.filter(
        &rows,
        &criteria("a", StatusFilter::All, DateFilter::All),
        now(),
    );
    let by_status = engine.filter(
        &rows,
        &criteria("", StatusFilter::Only(AppointmentStatus::Confirmed), DateFilter::All),
        now(),
    );
    let by_date = engine.filter(
        &rows,
        &criteria("", StatusFilter::All, DateFilter::ThisMonth),
        now(),
    );
    let combined = engine.filter(
        &rows,
        &criteria(
            "a",
            StatusFilter::Only(AppointmentStatus::Confirmed),
            DateFilter::ThisMonth,
        ),
        now(),
    );

    let expected: Vec<Uuid> = rows
        .iter()
        .map(|row| row.id)
        .filter(|id| {
            by_search.iter().any(|row| row.id == *id)
                && by_status.iter().any(|row| row.id == *id)
                && by_date.iter().any(|row| row.id == *id)
        })
        .collect();
    let actual: Vec<Uuid> = combined.iter().map(|row| row.id).collect();
    assert_eq!(actual, expected);
}

#[test]
fn test_filter_preserves_input_order() {
    let engine = FilterEngine::new();
    let kept = engine.filter(&roster(), &FilterCriteria::default(), now());
    assert_eq!(names(&kept), vec!["Alice", "Brian", "Clara", "Daniel", "Emma"]);
}

// ==============================================================================
// PAGINATION
// ==============================================================================

#[test]
fn test_seven_items_split_five_then_two() {
    let engine = FilterEngine::new();
    let items: Vec<i32> = (1..=7).collect();

    let first = engine.paginate(&items, 1, 5);
    assert_eq!(first.items, vec![1, 2, 3, 4, 5]);
    assert_eq!(first.total_pages, 2);
    assert_eq!(first.total_items, 7);

    let second = engine.paginate(&items, 2, 5);
    assert_eq!(second.items, vec![6, 7]);
    assert_eq!(second.total_pages, 2);
}

#[test]
fn test_page_past_the_end_is_empty_with_totals_intact() {
    let engine = FilterEngine::new();
    let items: Vec<i32> = (1..=7).collect();

    let page = engine.paginate(&items, 3, 5);
    assert!(page.items.is_empty());
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.total_items, 7);
}

#[test]
fn test_empty_collection_pages_cleanly() {
    let engine = FilterEngine::new();
    let items: Vec<i32> = Vec::new();

    let page = engine.paginate(&items, 1, 5);
    assert!(page.items.is_empty());
    assert_eq!(page.total_pages, 0);
    assert_eq!(page.total_items, 0);

    let far_out = engine.paginate(&items, 40, 5);
    assert!(far_out.items.is_empty());
}

#[test]
fn test_exact_multiple_has_no_trailing_page() {
    let engine = FilterEngine::new();
    let items: Vec<i32> = (1..=10).collect();
    assert_eq!(engine.paginate(&items, 1, 5).total_pages, 2);
}

#[test]
fn test_page_zero_serves_an_empty_slice() {
    let engine = FilterEngine::new();
    let items: Vec<i32> = (1..=7).collect();

    let page = engine.paginate(&items, 0, 5);
    assert!(page.items.is_empty());
    assert_eq!(page.total_pages, 2);
}

#[test]
fn test_zero_page_size_serves_an_empty_slice() {
    let engine = FilterEngine::new();
    let items: Vec<i32> = (1..=7).collect();

    let page = engine.paginate(&items, 1, 0);
    assert!(page.items.is_empty());
    assert_eq!(page.total_pages, 0);
    assert_eq!(page.total_items, 7);
}

#[test]
fn test_stale_page_after_narrowing_reads_as_no_results() {
    let engine = FilterEngine::new();
    // Page 2 was valid for the broad criteria; after narrowing to pending
    // only two rows remain and the same page number serves an empty slice.
    let page = engine.filter_page(
        &roster(),
        &criteria("", StatusFilter::Only(AppointmentStatus::Pending), DateFilter::All),
        2,
        5,
        now(),
    );
    assert!(page.items.is_empty());
    assert_eq!(page.total_items, 2);
    assert_eq!(page.total_pages, 1);
}

// ==============================================================================
// FACADE
// ==============================================================================

#[test]
fn test_dashboard_service_uses_its_injected_clock() {
    let service = DashboardService::with_clock(Arc::new(FixedClock(now())));

    let page = service.page(
        &roster(),
        &criteria("", StatusFilter::All, DateFilter::Today),
        1,
        10,
    );
    assert_eq!(names(&page.items), vec!["Alice"]);
    assert_eq!(page.total_items, 1);
}

#[test]
fn test_overview_search_fields_feed_the_engine() {
    let row = overview(
        "Alice",
        "Murphy",
        "Annual check-up",
        utc(2024, 3, 20, 9, 0),
        AppointmentStatus::Confirmed,
    );
    let fields = row.search_fields();
    assert!(fields.contains(&Some("Annual check-up".to_string())));
}
