use axum::Json;
use axum::extract::{ConnectInfo, State};
use axum::http::HeaderMap;
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::error::ApiError;
use crate::metrics::{
    ORIGIN_REJECTED, RATE_LIMITED, REQUEST_LATENCY, REQUEST_TOTAL, UPSTREAM_FAILURES,
};
use crate::models::UpstreamSessionRequest;
use crate::origin;
use crate::rate_limit;
use crate::state::AppState;
use crate::upstream;

// session handler, guard order matters: credential, then origin, then
// rate limit, then the upstream call
pub async fn session_handler(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    REQUEST_TOTAL.inc();
    let start_time = Instant::now();

    // no credential -> nothing else runs, not even the ledger
    let Some(transport) = state.transport.clone() else {
        return Err(ApiError::MissingCredential);
    };

    let candidate = origin::candidate_origin(&headers);
    if !origin::origin_allowed(candidate.as_deref(), &state.allowed_origins) {
        ORIGIN_REJECTED.inc();
        return Err(ApiError::OriginRejected {
            // rejection implies a candidate was present
            origin: candidate.unwrap_or_default(),
            allowlist: state.allowed_origins.clone(),
        });
    }

    let key = rate_limit::client_key(&headers, Some(addr), candidate.as_deref());
    let now_ms = chrono::Utc::now().timestamp_millis() as u64;
    if !state.ledger.admit(&key, now_ms) {
        RATE_LIMITED.inc();
        return Err(ApiError::RateLimited);
    }

    let request = UpstreamSessionRequest::fixed();
    let mut session = match upstream::create_session(transport.as_ref(), &request).await {
        Ok(session) => session,
        Err(e) => {
            UPSTREAM_FAILURES.inc();
            return Err(e);
        }
    };

    // relay the upstream object with our instructions attached
    let Value::Object(map) = &mut session else {
        return Err(ApiError::Internal(
            "upstream response was not a JSON object".to_string(),
        ));
    };
    map.insert(
        "instructions".to_string(),
        Value::String(state.instructions.clone()),
    );

    REQUEST_LATENCY.observe(start_time.elapsed().as_secs_f64());
    info!(client = %key, "session created");
    Ok(Json(session))
}
