use axum::http::HeaderMap;

// Strip a trailing slash and lowercase
pub fn normalize_origin(raw: &str) -> String {
    raw.trim_end_matches('/').to_ascii_lowercase()
}

// Reduce a full URL (eg a Referer carrying a path) to scheme+host
pub fn scheme_and_host(raw: &str) -> &str {
    let Some(idx) = raw.find("://") else {
        return raw;
    };
    let after = &raw[idx + 3..];
    match after.find(['/', '?', '#']) {
        Some(end) => &raw[..idx + 3 + end],
        None => raw,
    }
}

// Pull the candidate origin out of the request headers.
// Origin wins, Referer is the fallback
pub fn candidate_origin(headers: &HeaderMap) -> Option<String> {
    let raw = headers
        .get("origin")
        .or_else(|| headers.get("referer"))
        .and_then(|v| v.to_str().ok())?;
    Some(normalize_origin(scheme_and_host(raw)))
}

// Admission rule. Deliberately loose: exact match, prefix match, or the
// entry's hostname showing up anywhere in the candidate all admit. This is
// a known weakness kept for behavioral parity with existing deployments,
// do not tighten it here
pub fn origin_allowed(candidate: Option<&str>, allowlist: &[String]) -> bool {
    // no Origin/Referer at all, or nothing configured -> fail open
    let Some(candidate) = candidate else {
        return true;
    };
    if allowlist.is_empty() {
        return true;
    }

    allowlist.iter().any(|entry| {
        let entry = normalize_origin(entry);
        if candidate == entry || candidate.starts_with(&entry) {
            return true;
        }
        let host = entry.split("://").nth(1).unwrap_or(&entry);
        candidate.contains(host)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn allowlist() -> Vec<String> {
        vec![
            "https://voice.example.com".to_string(),
            "http://localhost:5173".to_string(),
        ]
    }

    #[test]
    fn normalizes_case_and_trailing_slash() {
        assert_eq!(normalize_origin("HTTPS://Voice.Example.COM/"), "https://voice.example.com");
    }

    #[test]
    fn referer_is_reduced_to_scheme_and_host() {
        assert_eq!(scheme_and_host("https://voice.example.com/app/page?x=1"), "https://voice.example.com");
        assert_eq!(scheme_and_host("https://voice.example.com"), "https://voice.example.com");
    }

    #[test]
    fn origin_header_beats_referer() {
        let mut headers = HeaderMap::new();
        headers.insert("origin", HeaderValue::from_static("https://voice.example.com"));
        headers.insert("referer", HeaderValue::from_static("https://other.example.com/page"));
        assert_eq!(candidate_origin(&headers).as_deref(), Some("https://voice.example.com"));
    }

    #[test]
    fn exact_match_is_admitted() {
        assert!(origin_allowed(Some("https://voice.example.com"), &allowlist()));
    }

    #[test]
    fn prefix_match_is_admitted() {
        // loose on purpose, see origin_allowed
        assert!(origin_allowed(Some("https://voice.example.com.evil.net"), &allowlist()));
    }

    #[test]
    fn hostname_substring_is_admitted() {
        assert!(origin_allowed(Some("https://cdn.localhost:5173"), &allowlist()));
    }

    #[test]
    fn unrelated_origin_is_rejected() {
        assert!(!origin_allowed(Some("https://attacker.net"), &allowlist()));
    }

    #[test]
    fn missing_header_fails_open() {
        assert!(origin_allowed(None, &allowlist()));
    }

    #[test]
    fn empty_allowlist_fails_open() {
        assert!(origin_allowed(Some("https://attacker.net"), &[]));
    }
}
