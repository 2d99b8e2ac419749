use super::value_objects::{Age, DiseaseStatus, Gender};
use serde::{Deserialize, Serialize};

/// The three answers a user submits through the form
///
/// Created once per request and never mutated or persisted. No
/// validation happens here: every value is interpolated into prompt
/// text as-is.
///
/// # Example
/// ```
/// use healthcrew_api::domain::profile::UserProfile;
///
/// let profile = UserProfile::from_inputs(45.0, "Male", "no");
/// assert!(!profile.has_disease());
/// assert_eq!(profile.age().to_string(), "45");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    age: Age,
    gender: Gender,
    disease: DiseaseStatus,
}

impl UserProfile {
    pub fn new(age: Age, gender: Gender, disease: DiseaseStatus) -> Self {
        Self {
            age,
            gender,
            disease,
        }
    }

    /// Builds a profile from raw form values
    pub fn from_inputs(age: f64, gender: &str, disease: &str) -> Self {
        Self::new(
            Age::new(age),
            Gender::from_label(gender),
            DiseaseStatus::from_flag(disease),
        )
    }

    pub fn age(&self) -> Age {
        self.age
    }

    pub fn gender(&self) -> &Gender {
        &self.gender
    }

    pub fn disease(&self) -> &DiseaseStatus {
        &self.disease
    }

    pub fn has_disease(&self) -> bool {
        self.disease.is_present()
    }
}
