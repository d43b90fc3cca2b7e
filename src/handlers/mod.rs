mod health;
mod metrics;
mod session;

pub use health::health_handler;
pub use metrics::metrics_handler;
pub use session::session_handler;
