//! Service health endpoints
//!
//! `/health` reports the running version, `/health/live` answers whenever
//! the process is up, and `/health/ready` only reports ready once Postgres
//! answers a probe query, so orchestrators hold traffic until the pool works.

use crate::{db, state::AppState};
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<DependencyChecks>,
}

/// Per-dependency probe results, reported by the readiness endpoint
#[derive(Serialize)]
pub struct DependencyChecks {
    pub database: ProbeStatus,
}

#[derive(Serialize)]
pub struct ProbeStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: version(),
        checks: None,
    })
}

/// GET /health/ready
///
/// 503 until every dependency probe passes; currently that is just the
/// database pool.
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let database = match db::health_check(state.db()).await {
        Ok(()) => ProbeStatus {
            status: "healthy".to_string(),
            message: None,
        },
        Err(e) => ProbeStatus {
            status: "unhealthy".to_string(),
            message: Some(e.to_string()),
        },
    };

    let ready = database.status == "healthy";
    let response = HealthResponse {
        status: if ready { "ready" } else { "not_ready" }.to_string(),
        version: version(),
        checks: Some(DependencyChecks { database }),
    };

    if ready {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// GET /health/live
pub async fn liveness_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "alive".to_string(),
        version: version(),
        checks: None,
    })
}
