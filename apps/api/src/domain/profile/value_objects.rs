use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder label shown by the gender dropdown before a choice is made
pub const GENDER_PLACEHOLDER: &str = "Select your gender";

/// Age value object
///
/// Any numeric value is accepted, including zero and negative ages.
/// Whole numbers display without a fractional part so that `45.0`
/// reads as `45` inside prompt text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Age(f64);

impl Age {
    pub fn new(years: f64) -> Self {
        Age(years)
    }

    /// Parses the raw form field
    ///
    /// # Returns
    /// * `Ok(Age)` - For numeric input; an empty field reads as zero
    /// * `Err(String)` - If the field is not a number
    ///
    /// # Example
    /// ```
    /// use healthcrew_api::domain::profile::value_objects::Age;
    ///
    /// assert_eq!(Age::parse("45").unwrap().to_string(), "45");
    /// assert_eq!(Age::parse("").unwrap().to_string(), "0");
    /// assert!(Age::parse("forty").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(Age(0.0));
        }

        trimmed
            .parse::<f64>()
            .map(Age)
            .map_err(|_| format!("Age must be a number, got '{}'", raw))
    }

    pub fn years(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_finite() && self.0.fract() == 0.0 {
            write!(f, "{}", self.0 as i64)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Gender as chosen in the form dropdown
///
/// Labels outside the offered choices are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Unset,
    Male,
    Female,
    Other,
    Custom(String),
}

impl Gender {
    /// Labels offered by the dropdown, placeholder first
    pub const CHOICES: [&'static str; 4] = [GENDER_PLACEHOLDER, "Male", "Female", "Other"];

    /// Parses a dropdown label (case-insensitive for the offered choices)
    pub fn from_label(label: &str) -> Self {
        let trimmed = label.trim();
        match trimmed.to_lowercase().as_str() {
            "" => Gender::Unset,
            "male" => Gender::Male,
            "female" => Gender::Female,
            "other" => Gender::Other,
            _ if trimmed == GENDER_PLACEHOLDER => Gender::Unset,
            _ => Gender::Custom(label.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Gender::Unset => GENDER_PLACEHOLDER,
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
            Gender::Custom(label) => label,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Whether the user declared a disease
///
/// Decided once when the input is parsed: the disease is present iff the
/// raw text, lowercased, equals `"yes"`. Both variants keep the raw text
/// exactly as submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiseaseStatus {
    Present(String),
    Absent(String),
}

impl DiseaseStatus {
    pub fn from_flag(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        if raw.to_lowercase() == "yes" {
            DiseaseStatus::Present(raw)
        } else {
            DiseaseStatus::Absent(raw)
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, DiseaseStatus::Present(_))
    }

    /// The text as the user typed it
    pub fn raw(&self) -> &str {
        match self {
            DiseaseStatus::Present(raw) | DiseaseStatus::Absent(raw) => raw,
        }
    }
}

impl fmt::Display for DiseaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw())
    }
}
