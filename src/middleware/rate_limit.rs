use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};

/// Simple in-memory sliding-window rate limiter keyed by caller identity.
#[derive(Clone)]
pub struct RateLimiter {
    requests: Arc<Mutex<HashMap<String, Vec<std::time::Instant>>>>,
    max_requests: usize,
    window: Duration,
}

impl RateLimiter {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            requests: Arc::new(Mutex::new(HashMap::new())),
            max_requests,
            window,
        }
    }

    pub fn is_allowed(&self, key: &str) -> bool {
        let mut requests = self.requests.lock().unwrap();
        let now = std::time::Instant::now();

        // Drop clients whose whole window has lapsed, so the map does not
        // keep a key for every address ever seen.
        requests.retain(|_, timestamps| {
            timestamps.retain(|&timestamp| now.duration_since(timestamp) < self.window);
            !timestamps.is_empty()
        });

        let entry = requests.entry(key.to_string()).or_insert_with(Vec::new);

        if entry.len() < self.max_requests {
            entry.push(now);
            true
        } else {
            false
        }
    }
}

pub async fn rate_limit_middleware(
    State(limiter): State<Arc<RateLimiter>>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let client_id = get_client_id(&request);

    if !limiter.is_allowed(&client_id) {
        return Err(StatusCode::TOO_MANY_REQUESTS);
    }

    Ok(next.run(request).await)
}

fn get_client_id(request: &Request) -> String {
    request
        .headers()
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.split(',').next())
        .unwrap_or("unknown")
        .to_string()
}

/// General API budget, applied to every /api route.
pub fn api_rate_limiter() -> RateLimiter {
    RateLimiter::new(120, Duration::from_secs(60))
}

/// Credential-guessing protection on the login route.
pub fn login_rate_limiter() -> RateLimiter {
    RateLimiter::new(5, Duration::from_secs(3600))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allows_up_to_limit() {
        let limiter = RateLimiter::new(3, Duration::from_secs(60));

        assert!(limiter.is_allowed("1.2.3.4"));
        assert!(limiter.is_allowed("1.2.3.4"));
        assert!(limiter.is_allowed("1.2.3.4"));
        assert!(!limiter.is_allowed("1.2.3.4"));
    }

    #[test]
    fn test_keys_are_independent() {
        let limiter = RateLimiter::new(1, Duration::from_secs(60));

        assert!(limiter.is_allowed("1.2.3.4"));
        assert!(!limiter.is_allowed("1.2.3.4"));
        assert!(limiter.is_allowed("5.6.7.8"));
    }

    #[test]
    fn test_idle_clients_are_evicted() {
        let limiter = RateLimiter::new(1, Duration::from_millis(10));

        assert!(limiter.is_allowed("1.2.3.4"));
        std::thread::sleep(Duration::from_millis(20));
        assert!(limiter.is_allowed("5.6.7.8"));

        let requests = limiter.requests.lock().unwrap();
        assert!(!requests.contains_key("1.2.3.4"));
        assert_eq!(requests.len(), 1);
    }

    #[test]
    fn test_window_expiry() {
        let limiter = RateLimiter::new(1, Duration::from_millis(10));

        assert!(limiter.is_allowed("1.2.3.4"));
        assert!(!limiter.is_allowed("1.2.3.4"));
        std::thread::sleep(Duration::from_millis(20));
        assert!(limiter.is_allowed("1.2.3.4"));
    }
}
