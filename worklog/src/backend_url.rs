use std::env;

#[derive(Debug, Clone)]
pub struct BackendUrl(String);

impl AsRef<str> for BackendUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl BackendUrl {
    /// Creates a new BackendUrl from the environment variable `WORKLOG_URL`,
    /// falling back to the local development backend.
    pub fn from_env() -> Self {
        Self(env::var("WORKLOG_URL").unwrap_or_else(|_| "http://127.0.0.1:5000".to_string()))
    }

    pub fn new(base: impl Into<String>) -> Self {
        Self(base.into().trim_end_matches('/').to_string())
    }

    /// Append the given path to the URL.
    pub fn append_path(&self, path: &str) -> Self {
        let trimmed_url = self.0.trim_end_matches('/');
        let trimmed_path = path.trim_start_matches('/');
        Self(format!("{}/{}", trimmed_url, trimmed_path))
    }

    /// Append query pairs, percent-encoding values. Pairs with empty values
    /// are skipped so optional filters can be passed through unconditionally.
    pub fn with_query<'a>(&self, pairs: impl IntoIterator<Item = (&'a str, String)>) -> Self {
        let mut url = self.0.clone();
        for (key, value) in pairs {
            if value.is_empty() {
                continue;
            }
            let sep = if url.contains('?') { '&' } else { '?' };
            url.push(sep);
            url.push_str(key);
            url.push('=');
            url.push_str(&encode_component(&value));
        }
        Self(url)
    }
}

fn encode_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_path_normalizes_slashes() {
        let url = BackendUrl::new("http://localhost:5000/");
        assert_eq!(
            url.append_path("/api/daily-logs/save").as_ref(),
            "http://localhost:5000/api/daily-logs/save"
        );
    }

    #[test]
    fn test_with_query_encodes_and_chains() {
        let url = BackendUrl::new("http://localhost:5000").append_path("api/employee-info");
        let url = url.with_query([("email", "tina.46@example.com".to_string())]);
        assert_eq!(
            url.as_ref(),
            "http://localhost:5000/api/employee-info?email=tina.46%40example.com"
        );
        let url = url.with_query([("status_review", "Pending".to_string())]);
        assert!(url.as_ref().ends_with("&status_review=Pending"));
    }

    #[test]
    fn test_with_query_skips_empty_values() {
        let url = BackendUrl::new("http://localhost:5000")
            .with_query([("start_date", String::new()), ("end_date", "2025-08-04".to_string())]);
        assert_eq!(url.as_ref(), "http://localhost:5000?end_date=2025-08-04");
    }
}
