use lazy_static::lazy_static;
use prometheus::{Counter, Histogram, register_counter, register_histogram};

lazy_static! {
    pub static ref REQUEST_TOTAL: Counter = register_counter!(
        "gateway_session_requests_total",
        "Total number of session requests"
    )
    .unwrap();
    pub static ref ORIGIN_REJECTED: Counter = register_counter!(
        "gateway_origin_rejected_total",
        "Requests rejected by the origin guard"
    )
    .unwrap();
    pub static ref RATE_LIMITED: Counter = register_counter!(
        "gateway_rate_limited_total",
        "Requests rejected by the rate limiter"
    )
    .unwrap();
    pub static ref UPSTREAM_TRANSIENT_FAILURES: Counter = register_counter!(
        "gateway_upstream_transient_failures_total",
        "Upstream attempts that failed with 5xx or a transport error"
    )
    .unwrap();
    pub static ref UPSTREAM_FAILURES: Counter = register_counter!(
        "gateway_upstream_failures_total",
        "Session requests that ended in a 502"
    )
    .unwrap();
    pub static ref REQUEST_LATENCY: Histogram = register_histogram!(
        "gateway_request_latency_seconds",
        "Request latency in seconds"
    )
    .unwrap();
}
