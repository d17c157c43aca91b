// src/serve/ask.rs

use super::{error::ApiError, AppState};
use crate::advisor::{self, AskOutcome, DataStats, DebugReport, NO_DATA_REPLY};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AskResponse {
    pub reply: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_stats: Option<DataStats>,
}

pub async fn ask(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>, ApiError> {
    let outcome = advisor::ask(&state.cfg, &state.completion, &request.message).await?;

    let response = match outcome {
        AskOutcome::NoData => AskResponse {
            reply: NO_DATA_REPLY.to_string(),
            data_stats: None,
        },
        AskOutcome::Answered { reply, stats } => AskResponse {
            reply,
            data_stats: Some(stats),
        },
    };
    Ok(Json(response))
}

pub async fn debug(State(state): State<AppState>) -> Result<Json<DebugReport>, ApiError> {
    let report = advisor::debug_report(&state.cfg)?;
    Ok(Json(report))
}
