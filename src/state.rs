use std::sync::Arc;

use crate::rate_limit::RateLimitLedger;
use crate::upstream::SessionTransport;

// app's shared state
pub struct AppState {
    // None when the credential is missing. The handler then answers 500
    // without touching the origin guard, the ledger or the network
    pub transport: Option<Arc<dyn SessionTransport>>,
    pub ledger: RateLimitLedger,
    pub allowed_origins: Vec<String>, // normalized at startup
    pub instructions: String,
}
