use axum::http::HeaderMap;
use dashmap::DashMap;
use std::net::SocketAddr;

// Fixed admission window and cap, per client key
pub const WINDOW_MS: u64 = 60_000;
pub const MAX_REQUESTS: usize = 8;

// Sliding-window ledger: client key -> timestamps (epoch millis) of admitted
// requests. Process-local and best effort only, it is not shared across
// instances and is lost on restart
pub struct RateLimitLedger {
    entries: DashMap<String, Vec<u64>>,
}

impl RateLimitLedger {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    // Prune stale timestamps for this key, then admit unless the key has
    // already spent its budget inside the current window
    pub fn admit(&self, key: &str, now_ms: u64) -> bool {
        let mut stamps = self.entries.entry(key.to_string()).or_default();
        let cutoff = now_ms.saturating_sub(WINDOW_MS);
        stamps.retain(|&t| t >= cutoff);

        if stamps.len() >= MAX_REQUESTS {
            return false;
        }
        stamps.push(now_ms);
        true
    }
}

// Client key precedence: forwarded-for header, socket address, origin,
// "unknown". Always computed up front, before any admission decision
pub fn client_key(headers: &HeaderMap, addr: Option<SocketAddr>, origin: Option<&str>) -> String {
    if let Some(fwd) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        let fwd = fwd.trim();
        if !fwd.is_empty() {
            return fwd.to_string();
        }
    }
    if let Some(addr) = addr {
        return addr.ip().to_string();
    }
    if let Some(origin) = origin {
        return origin.to_string();
    }
    "unknown".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn eight_admitted_ninth_denied() {
        let ledger = RateLimitLedger::new();
        let now = 1_000_000;
        for i in 0..8 {
            assert!(ledger.admit("1.2.3.4", now + i), "request {} should pass", i + 1);
        }
        assert!(!ledger.admit("1.2.3.4", now + 100));
    }

    #[test]
    fn window_elapse_resets_budget() {
        let ledger = RateLimitLedger::new();
        for _ in 0..8 {
            assert!(ledger.admit("1.2.3.4", 1_000));
        }
        assert!(!ledger.admit("1.2.3.4", 2_000));

        // a full window later the old stamps are pruned
        let later = 1_000 + WINDOW_MS + 1;
        for _ in 0..8 {
            assert!(ledger.admit("1.2.3.4", later));
        }
        assert!(!ledger.admit("1.2.3.4", later + 1));
    }

    #[test]
    fn keys_are_independent() {
        let ledger = RateLimitLedger::new();
        for _ in 0..8 {
            assert!(ledger.admit("1.2.3.4", 1_000));
        }
        assert!(!ledger.admit("1.2.3.4", 1_000));
        assert!(ledger.admit("5.6.7.8", 1_000));
    }

    #[test]
    fn key_prefers_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("9.9.9.9"));
        let addr: SocketAddr = "10.0.0.1:5000".parse().unwrap();
        assert_eq!(client_key(&headers, Some(addr), Some("https://a.com")), "9.9.9.9");
    }

    #[test]
    fn key_falls_back_to_socket_then_origin_then_unknown() {
        let headers = HeaderMap::new();
        let addr: SocketAddr = "10.0.0.1:5000".parse().unwrap();
        assert_eq!(client_key(&headers, Some(addr), None), "10.0.0.1");
        assert_eq!(client_key(&headers, None, Some("https://a.com")), "https://a.com");
        assert_eq!(client_key(&headers, None, None), "unknown");
    }
}
