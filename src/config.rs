use clap::Parser;

// Built-in allowlist used when no override is configured
pub const DEFAULT_ALLOWED_ORIGINS: &str =
    "https://voice.example.com,http://localhost:5173,http://localhost:3000";

// Default instructions injected into every session object
pub const DEFAULT_INSTRUCTIONS: &str =
    "You are a friendly realtime voice assistant. Keep answers short and conversational.";

pub const DEFAULT_UPSTREAM_URL: &str = "https://api.openai.com/v1/realtime/sessions";

// CLI argument structure
#[derive(Parser, Debug, Clone)]
#[command(name = "realtime-session-gateway")]
#[command(about = "Session-minting proxy for a realtime voice API")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    // Upstream session creation endpoint
    #[arg(long, default_value = DEFAULT_UPSTREAM_URL)]
    pub upstream_url: String,

    // Upstream API credential. A missing credential is reported per-request
    // with a 500 instead of aborting startup
    #[arg(long, env = "REALTIME_API_KEY")]
    pub api_key: Option<String>,

    // Allowed origins (comma-separated)
    #[arg(long, env = "ALLOWED_ORIGINS", default_value = DEFAULT_ALLOWED_ORIGINS)]
    pub allowed_origins: String,

    // Override for the injected instructions string
    #[arg(long, env = "SESSION_INSTRUCTIONS", default_value = DEFAULT_INSTRUCTIONS)]
    pub instructions: String,
}

// Split the comma-separated list and normalize every entry the same way
// the origin guard normalizes candidates
pub fn parse_allowlist(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(crate::origin::normalize_origin)
        .collect()
}
