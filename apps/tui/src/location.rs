/// District and state split out of a free-text "District, State" location.
///
/// Empty strings mean "unknown, let the backend use its default".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedLocation {
    pub district: String,
    pub state: String,
}

impl ParsedLocation {
    pub fn is_empty(&self) -> bool {
        self.district.is_empty() && self.state.is_empty()
    }
}

/// Best-effort split of a location string on commas.
///
/// Fewer than two parts yields empty district and state. With more than two
/// parts the first is the district and the last is the state.
pub fn parse_location(location: &str) -> ParsedLocation {
    let parts: Vec<&str> = location.split(',').map(str::trim).collect();

    match parts.as_slice() {
        [district, .., state] => ParsedLocation {
            district: (*district).to_string(),
            state: (*state).to_string(),
        },
        _ => ParsedLocation::default(),
    }
}

/// First comma-separated part of a location, used as the geocoding query.
pub fn primary_place(location: &str) -> &str {
    location.split(',').next().unwrap_or("").trim()
}

/// Builds the stored "District, State" form from its parts.
pub fn format_location(district: &str, state: &str) -> String {
    format!("{}, {}", district.trim(), state.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_district_and_state() {
        let parsed = parse_location("Pune, Maharashtra");
        assert_eq!(parsed.district, "Pune");
        assert_eq!(parsed.state, "Maharashtra");
    }

    #[test]
    fn trims_whitespace_around_parts() {
        let parsed = parse_location("   Karnal ,   Haryana  ");
        assert_eq!(parsed.district, "Karnal");
        assert_eq!(parsed.state, "Haryana");
    }

    #[test]
    fn no_comma_yields_empty_parts() {
        for input in ["Unknown", "", "   ", "Bhopal Madhya Pradesh"] {
            let parsed = parse_location(input);
            assert!(parsed.is_empty(), "expected empty parts for {input:?}");
        }
    }

    #[test]
    fn every_comma_separated_input_has_both_parts() {
        let samples = [
            "Pune, Maharashtra",
            "a,b",
            "Nashik, Nashik Division, Maharashtra",
            "Indore,Madhya Pradesh",
        ];
        for input in samples {
            let parsed = parse_location(input);
            assert!(!parsed.district.is_empty(), "district empty for {input:?}");
            assert!(!parsed.state.is_empty(), "state empty for {input:?}");
        }
    }

    #[test]
    fn extra_parts_take_first_and_last() {
        let parsed = parse_location("Nashik, Nashik Division, Maharashtra");
        assert_eq!(parsed.district, "Nashik");
        assert_eq!(parsed.state, "Maharashtra");
    }

    #[test]
    fn primary_place_is_first_part() {
        assert_eq!(primary_place("Bhopal, Madhya Pradesh"), "Bhopal");
        assert_eq!(primary_place("Bhopal"), "Bhopal");
        assert_eq!(primary_place(""), "");
    }

    #[test]
    fn format_round_trips_through_parse() {
        let stored = format_location(" Pune", "Maharashtra ");
        assert_eq!(stored, "Pune, Maharashtra");
        assert_eq!(
            parse_location(&stored),
            ParsedLocation {
                district: "Pune".to_string(),
                state: "Maharashtra".to_string(),
            }
        );
    }
}
