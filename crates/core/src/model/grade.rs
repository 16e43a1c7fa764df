use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── GRADE ─────────────────────────────────────────────────────────────────────
//

/// A final grade for an approved course, normalized to one decimal place.
///
/// Normalization rounds half away from zero at the first decimal, so `"5.55"`
/// becomes `"5.6"` and `"-2.25"` becomes `"-2.3"`. The textual form is what gets
/// displayed and persisted.
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Grade(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GradeError {
    #[error("grade cannot be empty")]
    Empty,
    #[error("grade is not a number: {0}")]
    NotANumber(String),
}

impl Grade {
    /// Parse and normalize a grade.
    ///
    /// Accepts anything Rust parses as a finite `f64` once surrounding
    /// whitespace is removed. `NaN` and infinities are rejected.
    ///
    /// Parsing is strict: the whole text must be a number. A decimal comma
    /// (`"6,5"`) or trailing text (`"7abc"`) is rejected rather than truncated
    /// to its numeric prefix, so such input reaches the user as an invalid
    /// grade instead of being stored as `"6.0"` or `"7.0"`.
    ///
    /// # Errors
    ///
    /// Returns `GradeError::Empty` for blank input and
    /// `GradeError::NotANumber` when the text is not a finite number.
    pub fn parse(raw: &str) -> Result<Self, GradeError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(GradeError::Empty);
        }
        let value: f64 = trimmed
            .parse()
            .map_err(|_| GradeError::NotANumber(trimmed.to_owned()))?;
        if !value.is_finite() {
            return Err(GradeError::NotANumber(trimmed.to_owned()));
        }
        Ok(Self(format_one_decimal(value)))
    }

    /// Returns the normalized text, e.g. `"6.5"`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the numeric value of the normalized grade.
    #[must_use]
    pub fn value(&self) -> f64 {
        // The stored text always came out of `format_one_decimal`.
        self.0.parse().unwrap_or_default()
    }
}

fn format_one_decimal(value: f64) -> String {
    let scaled = value * 10.0;
    let rounded = if scaled.is_finite() {
        // `f64::round` rounds half away from zero.
        scaled.round() / 10.0
    } else {
        value
    };
    // Adding zero folds `-0.0` into `0.0` so `"-0.04"` does not print as `"-0.0"`.
    format!("{:.1}", rounded + 0.0)
}

impl fmt::Debug for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grade({})", self.0)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Grade {
    type Err = GradeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'de> Deserialize<'de> for Grade {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

//
// ─── PROMPT INPUT ──────────────────────────────────────────────────────────────
//

/// Classification of a raw answer to the grade prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GradeInput {
    /// The prompt was dismissed or left blank.
    Cancelled,
    /// Non-blank text that is not a number. Holds the trimmed input.
    Invalid(String),
    Valid(Grade),
}

impl GradeInput {
    #[must_use]
    pub fn classify(response: Option<&str>) -> Self {
        let Some(raw) = response else {
            return Self::Cancelled;
        };
        match Grade::parse(raw) {
            Ok(grade) => Self::Valid(grade),
            Err(GradeError::Empty) => Self::Cancelled,
            Err(GradeError::NotANumber(input)) => Self::Invalid(input),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalized(raw: &str) -> String {
        Grade::parse(raw).unwrap().as_str().to_owned()
    }

    #[test]
    fn pads_integers_to_one_decimal() {
        assert_eq!(normalized("6"), "6.0");
        assert_eq!(normalized(" 7 "), "7.0");
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(normalized("5.55"), "5.6");
        assert_eq!(normalized("6.45"), "6.5");
        assert_eq!(normalized("2.25"), "2.3");
        assert_eq!(normalized("-2.25"), "-2.3");
        assert_eq!(normalized("4.44"), "4.4");
        assert_eq!(normalized("0.05"), "0.1");
    }

    #[test]
    fn never_prints_negative_zero() {
        assert_eq!(normalized("-0.04"), "0.0");
        assert_eq!(normalized("-0"), "0.0");
    }

    #[test]
    fn rejects_non_numeric_and_non_finite() {
        assert_eq!(
            Grade::parse("abc"),
            Err(GradeError::NotANumber("abc".to_owned()))
        );
        assert!(matches!(Grade::parse("NaN"), Err(GradeError::NotANumber(_))));
        assert!(matches!(Grade::parse("inf"), Err(GradeError::NotANumber(_))));
        assert!(matches!(Grade::parse("6,5"), Err(GradeError::NotANumber(_))));
        assert_eq!(
            Grade::parse("7abc"),
            Err(GradeError::NotANumber("7abc".to_owned()))
        );
        assert_eq!(Grade::parse("  "), Err(GradeError::Empty));
    }

    #[test]
    fn exposes_numeric_value() {
        let grade = Grade::parse("6.46").unwrap();
        assert!((grade.value() - 6.5).abs() < f64::EPSILON);
    }

    #[test]
    fn classifies_prompt_responses() {
        assert_eq!(GradeInput::classify(None), GradeInput::Cancelled);
        assert_eq!(GradeInput::classify(Some("")), GradeInput::Cancelled);
        assert_eq!(GradeInput::classify(Some(" \t ")), GradeInput::Cancelled);
        assert_eq!(
            GradeInput::classify(Some(" seven ")),
            GradeInput::Invalid("seven".to_owned())
        );
        assert_eq!(
            GradeInput::classify(Some("6")),
            GradeInput::Valid(Grade::parse("6.0").unwrap())
        );
    }

    #[test]
    fn deserializes_with_normalization() {
        let grade: Grade = serde_json::from_str("\"5.55\"").unwrap();
        assert_eq!(grade.as_str(), "5.6");
        assert!(serde_json::from_str::<Grade>("\"x\"").is_err());
    }
}
