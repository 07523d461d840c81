use lazy_static::lazy_static;
use regex::Regex;

/// Canonical marker names and the lowercase substrings that identify them in
/// report text. Order matters: the first entry matching a line wins, so a
/// line mentioning two markers yields only one record.
static MARKER_SYNONYMS: &[(&str, &[&str])] = &[
    ("Hemoglobin", &["hemoglobin", "hgb", "hb"]),
    ("White Blood Cells", &["wbc", "white blood cells", "leucocytes"]),
    ("Platelets", &["platelets", "plt"]),
    ("Cholesterol", &["cholesterol", "chol"]),
    ("HDL", &["hdl"]),
    ("LDL", &["ldl"]),
    ("Triglycerides", &["triglycerides", "tg"]),
    ("Glucose", &["glucose", "blood sugar"]),
    ("Creatinine", &["creatinine"]),
    ("ALT", &["alt", "alanine aminotransferase"]),
    ("AST", &["ast", "aspartate aminotransferase"]),
];

lazy_static! {
    static ref NUMBER_RE: Regex = Regex::new(r"\d+\.?\d*").unwrap();
    static ref UNIT_RE: Regex = Regex::new(r"(\w+/\w+|\w+)").unwrap();
}

/// One lab value pulled out of the report text. `is_normal` is left to the
/// persistence layer (always unset here, no reference ranges are consulted);
/// callers must treat the whole record as advisory.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedMarker {
    pub name: String,
    pub value: f64,
    pub unit: Option<String>,
    pub category: String,
}

/// Heuristic line scan: lowercase the text, and for each line take the first
/// marker whose synonym appears, with the first numeric token on that line as
/// its value and the following word-like token as a best-effort unit. Lines
/// with a keyword but no number produce nothing; duplicates across lines are
/// kept as separate records.
pub fn extract_markers(content: &str) -> Vec<ExtractedMarker> {
    let mut markers = Vec::new();

    for line in content.to_lowercase().lines() {
        for (name, keywords) in MARKER_SYNONYMS {
            if !keywords.iter().any(|kw| line.contains(kw)) {
                continue;
            }
            let Some(m) = NUMBER_RE.find(line) else {
                continue;
            };
            let Ok(value) = m.as_str().parse::<f64>() else {
                continue;
            };

            let unit = UNIT_RE
                .find(&line[m.end()..])
                .map(|u| u.as_str().to_string());

            markers.push(ExtractedMarker {
                name: (*name).to_string(),
                value,
                unit,
                category: "General".to_string(),
            });
            break;
        }
    }

    markers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_yields_no_markers() {
        assert!(extract_markers("").is_empty());
    }

    #[test]
    fn hemoglobin_line_with_value_and_unit() {
        let markers = extract_markers("Hemoglobin 13.5 g/dL");
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].name, "Hemoglobin");
        assert_eq!(markers[0].value, 13.5);
        assert_eq!(markers[0].unit.as_deref(), Some("g/dl"));
    }

    #[test]
    fn keyword_without_number_yields_nothing() {
        assert!(extract_markers("Hemoglobin level looks fine").is_empty());
    }

    #[test]
    fn first_matching_marker_wins_per_line() {
        // "cholesterol" appears before "hdl" in the table, so one record only.
        let markers = extract_markers("HDL Cholesterol 45 mg/dL");
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].name, "Cholesterol");
        assert_eq!(markers[0].value, 45.0);
    }

    #[test]
    fn duplicate_markers_across_lines_are_separate_records() {
        let markers = extract_markers("Glucose 90 mg/dL\nGlucose 110 mg/dL");
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].value, 90.0);
        assert_eq!(markers[1].value, 110.0);
    }

    #[test]
    fn unit_is_optional() {
        let markers = extract_markers("creatinine 1.1");
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].unit, None);
    }
}
