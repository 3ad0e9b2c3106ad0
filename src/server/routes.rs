//! HTTP handlers

use crate::processing::cover_letter::Identity;
use crate::processing::engine::TailorRequest;
use crate::server::errors::AppError;
use crate::server::AppState;
use anyhow::Context;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Body of `POST /api/tailor`. Every field is optional; missing identity fields take the
/// configured defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TailorPayload {
    pub resume: String,
    pub job_desc: String,
    pub name: Option<String>,
    pub company: Option<String>,
    pub position: Option<String>,
    pub summary: Option<String>,
}

impl TailorPayload {
    fn into_request(self) -> TailorRequest {
        TailorRequest {
            resume_text: self.resume,
            job_text: self.job_desc,
            identity: Identity::new(
                self.name.unwrap_or_default(),
                self.company.unwrap_or_default(),
                self.position.unwrap_or_default(),
                self.summary.unwrap_or_default(),
            ),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TailorResponse {
    pub keywords: Vec<String>,
    pub tailored: String,
    pub cover: String,
    pub diff: String,
    pub warnings: Vec<String>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/tailor", post(tailor_handler))
        .with_state(state)
}

/// GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "resume-tailor",
        "extractor": state.engine.extractor_name(),
    }))
}

/// POST /api/tailor
pub async fn tailor_handler(
    State(state): State<AppState>,
    payload: Result<Json<TailorPayload>, JsonRejection>,
) -> Result<Json<TailorResponse>, AppError> {
    let Json(payload) = payload?;
    let request = payload.into_request();

    let engine = state.engine.clone();
    let outcome = tokio::task::spawn_blocking(move || engine.tailor(&request))
        .await
        .context("tailoring task panicked")?;

    info!(
        "Tailored resume: {} keywords, {} warnings, {}ms",
        outcome.keywords.len(),
        outcome.warnings.len(),
        outcome.processing_time_ms
    );

    Ok(Json(TailorResponse {
        keywords: outcome.keywords,
        tailored: outcome.tailored,
        cover: outcome.cover,
        diff: outcome.diff_html,
        warnings: outcome.warnings,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::processing::annotator::SUGGESTIONS_HEADER;

    fn state() -> AppState {
        AppState::new(&Config::default())
    }

    #[tokio::test]
    async fn test_tailor_handler() {
        let payload = TailorPayload {
            resume: "Built scalable data infrastructure\nLed a team of 5".to_string(),
            job_desc: "Looking for a Data Engineer with experience in cloud infrastructure.".to_string(),
            name: Some("Ada".to_string()),
            company: Some("Acme".to_string()),
            ..Default::default()
        };

        let Json(response) = tailor_handler(State(state()), Ok(Json(payload))).await.unwrap();

        assert_eq!(response.keywords[0], "data engineer");
        assert!(response.tailored.starts_with("Built scalable data infrastructure  (keywords:"));
        assert!(response.cover.contains("Dear Hiring Team at Acme,"));
        assert!(response.cover.contains("apply for the Position role"));
        assert!(response.cover.ends_with("Sincerely,\nAda\n"));
        assert!(response.diff.contains("<ins>"));
    }

    #[tokio::test]
    async fn test_empty_payload_is_not_an_error() {
        let Json(response) = tailor_handler(State(state()), Ok(Json(TailorPayload::default())))
            .await
            .unwrap();

        assert!(response.keywords.is_empty());
        assert_eq!(response.tailored, format!("\n\n{}", SUGGESTIONS_HEADER));
        assert_eq!(response.warnings.len(), 2);
    }

    #[tokio::test]
    async fn test_health() {
        let Json(body) = health_handler(State(state())).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["extractor"], "ngram");
    }
}
