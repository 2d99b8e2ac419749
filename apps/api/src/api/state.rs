use crate::agents::HealthCrew;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub crew: HealthCrew,
}

impl AppState {
    pub fn new(crew: HealthCrew) -> Self {
        Self { crew }
    }
}
