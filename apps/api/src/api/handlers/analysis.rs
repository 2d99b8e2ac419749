use axum::{extract::State, http::StatusCode, response::Html, Form, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::api::views::{self, FormValues, Outcome};
use crate::domain::profile::{Age, DiseaseStatus, Gender, UserProfile};

/// Form body posted by the analysis page
#[derive(Debug, Default, Deserialize)]
pub struct AnalysisForm {
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub disease: String,
}

impl AnalysisForm {
    /// Parses the raw fields; only a non-numeric age is rejected
    pub fn to_profile(&self) -> Result<UserProfile, String> {
        let age = Age::parse(&self.age)?;

        Ok(UserProfile::new(
            age,
            Gender::from_label(&self.gender),
            DiseaseStatus::from_flag(self.disease.as_str()),
        ))
    }

    fn values(&self) -> FormValues<'_> {
        FormValues {
            age: &self.age,
            gender: &self.gender,
            disease: &self.disease,
        }
    }
}

/// Request body for the JSON analysis endpoint
#[derive(Debug, Deserialize)]
pub struct AnalysisRequest {
    pub age: f64,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub disease: String,
}

/// Response from the JSON analysis endpoint
#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub run_id: Uuid,
    pub result: String,
    pub disease_branch: bool,
    pub task_count: usize,
    pub generated_at: DateTime<Utc>,
}

/// Analysis form page
///
/// GET /
pub async fn index() -> Html<String> {
    Html(views::render_page(&FormValues::default(), None))
}

/// Run the crew for a submitted form and render the result page
///
/// POST /analyze
pub async fn analyze_form(
    State(state): State<AppState>,
    Form(form): Form<AnalysisForm>,
) -> (StatusCode, Html<String>) {
    let profile = match form.to_profile() {
        Ok(profile) => profile,
        Err(message) => {
            let page = views::render_page(&form.values(), Some(Outcome::Error(&message)));
            return (StatusCode::BAD_REQUEST, Html(page));
        }
    };

    match state.crew.run(&profile).await {
        Ok(run) => {
            let page = views::render_page(&form.values(), Some(Outcome::Result(&run.result)));
            (StatusCode::OK, Html(page))
        }
        Err(err) => {
            let err = ApiError::from(err);
            let page = views::render_page(&form.values(), Some(Outcome::Error(&err.message)));
            (err.status, Html(page))
        }
    }
}

/// Run the crew and return the result as JSON
///
/// POST /api/analysis
pub async fn analyze_json(
    State(state): State<AppState>,
    Json(req): Json<AnalysisRequest>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let profile = UserProfile::from_inputs(req.age, &req.gender, &req.disease);
    let run = state.crew.run(&profile).await?;

    Ok(Json(AnalysisResponse {
        run_id: run.run_id,
        result: run.result,
        disease_branch: run.disease_branch,
        task_count: run.task_count,
        generated_at: Utc::now(),
    }))
}
