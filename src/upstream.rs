use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::warn;

use crate::error::ApiError;
use crate::metrics::UPSTREAM_TRANSIENT_FAILURES;
use crate::models::UpstreamSessionRequest;

pub const UPSTREAM_TIMEOUT_MS: u64 = 15_000;
pub const MAX_ATTEMPTS: u32 = 3;
pub const BACKOFF_BASE_MS: u64 = 500;

// What a single upstream attempt came back with, before classification
pub struct UpstreamReply {
    pub status: u16,
    pub body: String,
}

// Seam between the retry loop and the network so tests can swap in a fake.
// A transport error (Err) covers timeouts and connection failures
#[async_trait]
pub trait SessionTransport: Send + Sync {
    async fn create_session(
        &self,
        request: &UpstreamSessionRequest,
    ) -> Result<UpstreamReply, String>;
}

pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
    api_key: String,
}

impl HttpTransport {
    pub fn new(url: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
            api_key,
        }
    }
}

#[async_trait]
impl SessionTransport for HttpTransport {
    async fn create_session(
        &self,
        request: &UpstreamSessionRequest,
    ) -> Result<UpstreamReply, String> {
        let res = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .timeout(Duration::from_millis(UPSTREAM_TIMEOUT_MS))
            .json(request)
            .send()
            .await
            .map_err(|e| format!("request failed: {}", e))?;

        let status = res.status().as_u16();
        let body = res
            .text()
            .await
            .map_err(|e| format!("reading body failed: {}", e))?;
        Ok(UpstreamReply { status, body })
    }
}

// Bounded retry loop: 3 attempts total, backoff 500ms * 2^attempt between
// them. 5xx and transport errors retry, any other non-2xx is terminal
// immediately. Both failure shapes surface as 502 at the handler
pub async fn create_session(
    transport: &dyn SessionTransport,
    request: &UpstreamSessionRequest,
) -> Result<Value, ApiError> {
    let mut last_detail = String::new();

    for attempt in 0..MAX_ATTEMPTS {
        if attempt > 0 {
            let backoff = Duration::from_millis(BACKOFF_BASE_MS * 2u64.pow(attempt - 1));
            tokio::time::sleep(backoff).await;
        }

        match transport.create_session(request).await {
            Ok(reply) if (200..300).contains(&reply.status) => {
                return serde_json::from_str(&reply.body).map_err(|e| ApiError::Upstream {
                    detail: format!("invalid upstream JSON: {}", e),
                });
            }
            Ok(reply) if reply.status >= 500 => {
                warn!(status = reply.status, attempt, "upstream 5xx");
                UPSTREAM_TRANSIENT_FAILURES.inc();
                last_detail = format!("upstream returned {}: {}", reply.status, reply.body);
            }
            Ok(reply) => {
                // 4xx will not get better on retry
                return Err(ApiError::Upstream {
                    detail: format!("upstream returned {}: {}", reply.status, reply.body),
                });
            }
            Err(e) => {
                warn!(error = %e, attempt, "upstream transport error");
                UPSTREAM_TRANSIENT_FAILURES.inc();
                last_detail = e;
            }
        }
    }

    Err(ApiError::Upstream {
        detail: last_detail,
    })
}
