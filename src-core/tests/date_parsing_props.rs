//! Property tests for the display/input date parsers and range overlap.

use chrono::{Datelike, NaiveDate};
use proptest::prelude::*;

use permisos_core::dates::{
    format_display_date, format_input_date, parse_display_date, parse_input_date, DateRange,
};
use permisos_core::DateParseError;

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (1900i32..=2100, 1u32..=12, 1u32..=31).prop_filter_map("valid calendar day", |(y, m, d)| {
        NaiveDate::from_ymd_opt(y, m, d)
    })
}

fn arb_range() -> impl Strategy<Value = DateRange> {
    (arb_date(), 0i64..60).prop_map(|(start, len)| DateRange {
        start,
        end: start + chrono::Duration::days(len),
    })
}

proptest! {
    #[test]
    fn display_format_parses_back(date in arb_date()) {
        prop_assert_eq!(parse_display_date(&format_display_date(date)), Ok(date));
        prop_assert_eq!(parse_input_date(&format_input_date(date)), Ok(date));
    }

    #[test]
    fn unpadded_components_are_accepted(date in arb_date()) {
        let text = format!("{}/{}/{:04}", date.day(), date.month(), date.year());
        prop_assert_eq!(parse_display_date(&text), Ok(date));
    }

    #[test]
    fn parser_never_panics(input in "\\PC{0,24}") {
        let _ = parse_display_date(&input);
        let _ = parse_input_date(&input);
    }

    #[test]
    fn missing_separators_are_rejected(digits in "[0-9]{1,12}") {
        let is_component_error = matches!(
            parse_display_date(&digits),
            Err(DateParseError::Components { .. })
        );
        prop_assert!(is_component_error);
    }

    #[test]
    fn extra_separators_are_rejected(date in arb_date(), extra in "[0-9]{1,2}") {
        let text = format!("{}/{}", format_display_date(date), extra);
        let is_component_error = matches!(
            parse_display_date(&text),
            Err(DateParseError::Components { .. })
        );
        prop_assert!(is_component_error);
    }

    #[test]
    fn non_numeric_components_are_rejected(
        date in arb_date(),
        junk in "[a-zA-Z ]{1,3}",
        slot in 0usize..3,
    ) {
        let mut parts = vec![
            format!("{:02}", date.day()),
            format!("{:02}", date.month()),
            format!("{:04}", date.year()),
        ];
        parts[slot] = junk;
        let text = parts.join("/");
        prop_assert!(parse_display_date(&text).is_err());
    }

    #[test]
    fn overlap_matches_inclusive_definition(a in arb_range(), b in arb_range()) {
        let expected = a.start <= b.end && a.end >= b.start;
        prop_assert_eq!(a.overlaps(&b), expected);
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
    }

    #[test]
    fn range_always_overlaps_itself(r in arb_range()) {
        prop_assert!(r.overlaps(&r));
        prop_assert!(r.days() >= 1);
    }
}
