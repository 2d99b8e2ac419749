// User profile domain module
// Contains the per-request profile and its value objects

#![allow(clippy::module_inception)]

pub mod profile;
pub mod value_objects;

// Re-export main types for convenience
pub use profile::UserProfile;
pub use value_objects::{Age, DiseaseStatus, Gender};
