use atelier_types::{DayHours, Hours, Weekday};
use serde_json::json;

#[test]
fn default_hours_cover_every_day() {
    let hours = Hours::default();
    assert_eq!(hours.iter().count(), 7);
    assert_eq!(hours.closed_days().count(), 0);
    assert_eq!(hours.day(Weekday::Friday).close, "8:00 PM");
}

#[test]
fn weekdays_start_on_sunday() {
    assert_eq!(Weekday::ALL[0], Weekday::Sunday);
    assert_eq!(Weekday::ALL[6], Weekday::Saturday);
    assert_eq!(Weekday::Wednesday.to_string(), "wednesday");
}

#[test]
fn with_day_replaces_single_day() {
    let hours = Hours::default().with_day(Weekday::Monday, DayHours::closed("9:00 AM", "5:00 PM"));
    assert!(hours.monday.closed);
    assert_eq!(hours.closed_days().collect::<Vec<_>>(), vec![Weekday::Monday]);
    assert_eq!(hours.tuesday, Hours::default().tuesday);
}

#[test]
fn hours_roundtrip_uses_weekday_keys() {
    let value = serde_json::to_value(Hours::default()).unwrap();
    for day in Weekday::ALL {
        assert!(value.get(day.as_str()).is_some(), "missing {day}");
    }
}

#[test]
fn hours_row_with_extra_columns_decodes() {
    let mut value = serde_json::to_value(Hours::default()).unwrap();
    value["id"] = json!("main");
    value["created_at"] = json!("2025-01-01T00:00:00Z");
    let hours: Hours = serde_json::from_value(value).unwrap();
    assert_eq!(hours, Hours::default());
}

#[test]
fn hours_missing_a_day_fails_to_decode() {
    let mut value = serde_json::to_value(Hours::default()).unwrap();
    value.as_object_mut().unwrap().remove("thursday");
    assert!(serde_json::from_value::<Hours>(value).is_err());
}

#[test]
fn day_missing_a_field_fails_to_decode() {
    let mut value = serde_json::to_value(Hours::default()).unwrap();
    value["monday"] = json!({ "open": "9:00 AM", "close": "5:00 PM" });
    assert!(serde_json::from_value::<Hours>(value).is_err());
}
