//! Health & readiness handlers.
//!
//! - GET /healthz  -> simple liveness ("ok")
//! - GET /readyz   -> readiness that checks the event store and writeup adapter

use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use std::{collections::HashMap, time::Duration};
use tokio::time::timeout;

const STORE_CHECK_TIMEOUT: Duration = Duration::from_secs(1);

/// `GET /healthz`
///
/// Very small liveness probe — always returns 200 OK with a plain JSON body.
pub async fn healthz() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".into(),
        }),
    )
}

/// `GET /readyz`
///
/// Readiness probe that:
/// 1. Takes a read lock on the event store within `STORE_CHECK_TIMEOUT`.
/// 2. Reports whether the writeup adapter has credentials. Missing
///    credentials do not fail readiness; writeups fall back to fixed text.
///
/// HTTP 200 when all checks pass, HTTP 503 when any check fails.
pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    // 1) Store check
    let store_check = match timeout(STORE_CHECK_TIMEOUT, state.events.len()).await {
        Ok(_) => (true, None::<String>),
        Err(_) => (false, Some("event store lock timed out".to_string())),
    };

    // 2) Writeup adapter
    let writeup_check = if state.writeups.is_configured() {
        (true, None)
    } else {
        (
            true,
            Some("API key not configured; writeups use fallback text".to_string()),
        )
    };

    let overall_ok = store_check.0 && writeup_check.0;

    let mut checks = HashMap::new();
    checks.insert(
        "store",
        CheckStatus {
            ok: store_check.0,
            error: store_check.1,
        },
    );
    checks.insert(
        "writeup",
        CheckStatus {
            ok: writeup_check.0,
            error: writeup_check.1,
        },
    );

    let body = ReadyResponse {
        status: if overall_ok {
            "ok".into()
        } else {
            "error".into()
        },
        checks,
    };

    let status = if overall_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(body))
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

#[derive(Serialize)]
struct ReadyResponse {
    status: String,
    checks: HashMap<&'static str, CheckStatus>,
}

#[derive(Serialize)]
struct CheckStatus {
    ok: bool,
    error: Option<String>,
}
