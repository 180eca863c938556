//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::state::{AppState, Settings};
use super::responses::{ApiResponse, ErrorResponse, HealthResponse, SettingsResponse, StatusResponse};

/// Handle POST /focus - Start a focus phase
pub async fn focus_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.start_focus().await {
        Ok(reply) => {
            let message = if reply.applied {
                info!("Focus endpoint called - focus phase started");
                "Focus phase started"
            } else {
                info!("Focus endpoint called while running - ignored");
                "Timer already running"
            };
            Ok(Json(ApiResponse::new(message.to_string(), reply.snapshot)))
        }
        Err(e) => {
            error!("Failed to start focus phase: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /pause - Toggle pause/resume
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.toggle_pause().await {
        Ok(reply) => {
            let timer = reply.snapshot;
            let message = if !reply.applied {
                "Nothing to pause or resume"
            } else if timer.is_paused {
                "Timer paused"
            } else {
                "Timer running"
            };
            info!("Pause endpoint called - {}", message);
            Ok(Json(ApiResponse::new(message.to_string(), timer)))
        }
        Err(e) => {
            error!("Failed to toggle pause: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /reset - Stop the timer and return to idle
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.reset().await {
        Ok(reply) => {
            info!("Reset endpoint called - timer reset");
            Ok(Json(ApiResponse::new("Timer reset".to_string(), reply.snapshot)))
        }
        Err(e) => {
            error!("Failed to reset timer: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /settings - Return the configured phase lengths
pub async fn get_settings_handler(State(state): State<Arc<AppState>>) -> Json<SettingsResponse> {
    Json(SettingsResponse::from(state.get_snapshot().settings))
}

/// Handle PUT /settings - Replace the configured phase lengths
pub async fn put_settings_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Settings>, JsonRejection>,
) -> Result<Json<SettingsResponse>, (StatusCode, Json<ErrorResponse>)> {
    let Json(settings) = payload.map_err(|rejection| {
        warn!("Rejected settings update: {}", rejection.body_text());
        (rejection.status(), Json(ErrorResponse::new(rejection.body_text())))
    })?;

    match state.update_settings(settings).await {
        Ok(reply) => {
            info!("Settings endpoint called - settings updated");
            Ok(Json(SettingsResponse::from(reply.snapshot.settings)))
        }
        Err(e) => {
            error!("Failed to update settings: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(e.to_string())),
            ))
        }
    }
}

/// Handle GET /status - Return current timer status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        timer: state.get_snapshot(),
        current_time: StatusResponse::current_time(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
