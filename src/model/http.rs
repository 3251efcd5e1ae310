/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 12/2/26
******************************************************************************/

//! HTTP transport with rate limiting and retry
//!
//! Two distinct retry policies apply and are deliberately not unified:
//! throttling responses (429) are retried without bound, waiting out the
//! server-supplied `Retry-After` or an exponentially growing fallback,
//! because the server dictates the pace; transport failures and server
//! errors are retried with bounded, jittered exponential backoff and the
//! final failure is surfaced as-is.

use crate::application::rate_limiter::EndpointRateLimiter;
use crate::error::AppError;
use crate::model::retry::RetryConfig;
use rand::Rng;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Client, Method, Response, StatusCode};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Sends a request to the export API, enforcing the per-endpoint rate limit
/// and the two retry policies described in the module docs.
///
/// The call timestamp is recorded in the limiter ledger after every attempt
/// that produced a response, throttled attempts included, so a following
/// call to the same endpoint waits out the full interval. The immediate
/// retry of a throttled attempt is the exception: it waits only the
/// server-directed delay, not the ledger interval on top.
///
/// # Arguments
/// * `client` - The HTTP client to use for the request
/// * `limiter` - Per-endpoint rate limiter owned by the calling client
/// * `retry` - Bounded retry policy for transient failures
/// * `method` - HTTP method
/// * `base_url` - API base URL
/// * `path` - Endpoint path, also the basis of the rate-limit ledger key
/// * `headers` - Header name/value pairs added to the request
/// * `body` - Optional request body, serialized as JSON
pub async fn send_with_retry<B: Serialize>(
    client: &Client,
    limiter: &EndpointRateLimiter,
    retry: &RetryConfig,
    method: Method,
    base_url: &str,
    path: &str,
    headers: &[(&str, String)],
    body: Option<&B>,
) -> Result<Response, AppError> {
    let key = EndpointRateLimiter::endpoint_key(&method, path);
    let url = format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'));

    let mut transient_attempts: u32 = 0;
    let mut throttle_attempts: u32 = 0;
    let mut throttle_wait_served = false;

    loop {
        // A throttled attempt already waited out the server-directed delay,
        // so the ledger interval does not apply on top of it.
        if throttle_wait_served {
            throttle_wait_served = false;
        } else {
            limiter.acquire(&key).await;
        }

        debug!("{} {}", method, url);

        let mut request = client.request(method.clone(), &url);
        for (name, value) in headers {
            request = request.header(*name, value);
        }
        if let Some(b) = body {
            request = request.json(b);
        }

        match request.send().await {
            Ok(response) => {
                limiter.record_call(&key);

                let status = response.status();
                debug!("Response status: {}", status);

                if status.is_success() {
                    return Ok(response);
                }

                if status == StatusCode::TOO_MANY_REQUESTS {
                    let wait = parse_retry_after(response.headers())
                        .unwrap_or_else(|| throttle_fallback_secs(retry, throttle_attempts));
                    throttle_attempts += 1;
                    warn!(
                        "Rate limited (attempt {}). Waiting {} seconds before retry...",
                        throttle_attempts, wait
                    );
                    tokio::time::sleep(Duration::from_secs(wait)).await;
                    throttle_wait_served = true;
                    continue;
                }

                if status == StatusCode::UNAUTHORIZED {
                    let body_text = response.text().await.unwrap_or_default();
                    error!("Unauthorized: {}", body_text);
                    return Err(AppError::Unauthorized);
                }

                if status.is_server_error() {
                    transient_attempts += 1;
                    if transient_attempts >= retry.max_retries {
                        let body_text = response.text().await.unwrap_or_default();
                        error!(
                            "Request failed with status {} after {} attempts: {}",
                            status, transient_attempts, body_text
                        );
                        return Err(AppError::Unexpected(status));
                    }
                    let delay = backoff_with_jitter(retry, transient_attempts - 1);
                    warn!(
                        "Server error {}. Retrying in {:.1} seconds...",
                        status,
                        delay.as_secs_f64()
                    );
                    tokio::time::sleep(delay).await;
                    continue;
                }

                let body_text = response.text().await.unwrap_or_default();
                error!("Request failed with status {}: {}", status, body_text);
                return Err(AppError::Unexpected(status));
            }
            Err(e) => {
                transient_attempts += 1;
                if transient_attempts >= retry.max_retries {
                    return Err(AppError::Network(e));
                }
                let delay = backoff_with_jitter(retry, transient_attempts - 1);
                warn!(
                    "Request failed: {}. Retrying in {:.1} seconds...",
                    e,
                    delay.as_secs_f64()
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}

/// Seconds to wait as directed by a `Retry-After` header, when present and
/// expressed in seconds
fn parse_retry_after(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<u64>().ok())
}

/// Fallback throttle wait when the server sends no `Retry-After`; grows
/// exponentially with the number of throttled attempts
fn throttle_fallback_secs(retry: &RetryConfig, attempt: u32) -> u64 {
    retry.backoff_delay(attempt).as_secs()
}

/// Bounded-policy backoff: exponential delay plus up to one second of jitter
fn backoff_with_jitter(retry: &RetryConfig, attempt: u32) -> Duration {
    let jitter = rand::thread_rng().gen_range(0.0..1.0);
    retry.backoff_delay(attempt) + Duration::from_secs_f64(jitter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    // No rules, so retry timing is not mixed up with rate-limit waits
    fn limiter() -> EndpointRateLimiter {
        EndpointRateLimiter::new(std::collections::HashMap::new())
    }

    fn fast_retry(max_retries: u32) -> RetryConfig {
        RetryConfig {
            max_retries,
            base_delay_secs: 0,
        }
    }

    #[test]
    fn test_parse_retry_after() {
        let mut headers = HeaderMap::new();
        headers.insert(RETRY_AFTER, HeaderValue::from_static("17"));
        assert_eq!(parse_retry_after(&headers), Some(17));

        headers.insert(RETRY_AFTER, HeaderValue::from_static("Wed, 21 Oct 2015"));
        assert_eq!(parse_retry_after(&headers), None);

        assert_eq!(parse_retry_after(&HeaderMap::new()), None);
    }

    #[test]
    fn test_throttle_fallback_grows() {
        let retry = RetryConfig {
            max_retries: 5,
            base_delay_secs: 2,
        };
        assert_eq!(throttle_fallback_secs(&retry, 0), 2);
        assert_eq!(throttle_fallback_secs(&retry, 1), 4);
        assert_eq!(throttle_fallback_secs(&retry, 3), 16);
    }

    #[tokio::test]
    async fn test_success_passes_response_through() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/history/exports")
            .with_status(200)
            .with_body(r#"[]"#)
            .create_async()
            .await;

        let client = Client::new();
        let response = send_with_retry(
            &client,
            &limiter(),
            &fast_retry(3),
            Method::GET,
            &server.url(),
            "/history/exports",
            &[("Authorization", "token".to_string())],
            None::<&()>,
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_server_errors_exhaust_bounded_retries() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/history/exports")
            .with_status(500)
            .expect(3)
            .create_async()
            .await;

        let client = Client::new();
        let result = send_with_retry(
            &client,
            &limiter(),
            &fast_retry(3),
            Method::GET,
            &server.url(),
            "/history/exports",
            &[],
            None::<&()>,
        )
        .await;

        assert!(matches!(
            result,
            Err(AppError::Unexpected(StatusCode::INTERNAL_SERVER_ERROR))
        ));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_client_errors_are_not_retried() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/history/exports")
            .with_status(404)
            .expect(1)
            .create_async()
            .await;

        let client = Client::new();
        let result = send_with_retry(
            &client,
            &limiter(),
            &fast_retry(5),
            Method::GET,
            &server.url(),
            "/history/exports",
            &[],
            None::<&()>,
        )
        .await;

        assert!(matches!(
            result,
            Err(AppError::Unexpected(StatusCode::NOT_FOUND))
        ));
        mock.assert_async().await;
    }

    // mockito cannot serve different statuses to identical requests, so this
    // one drives a raw listener: 429 with Retry-After 0, then 200.
    #[tokio::test]
    async fn test_throttled_retry_waits_only_the_directed_delay() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let responses = [
                "HTTP/1.1 429 Too Many Requests\r\nRetry-After: 0\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                "HTTP/1.1 200 OK\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            ];
            for response in responses {
                let (mut stream, _) = listener.accept().await.unwrap();
                let mut buf = [0u8; 1024];
                let _ = stream.read(&mut buf).await;
                let _ = stream.write_all(response.as_bytes()).await;
            }
        });

        let client = Client::new();
        let started = std::time::Instant::now();
        // Full export-API rules: if the retry went back through the limiter,
        // it would also wait out the 60s listing interval recorded by the
        // throttled attempt.
        let response = send_with_retry(
            &client,
            &EndpointRateLimiter::for_export_api(),
            &fast_retry(3),
            Method::GET,
            &format!("http://{addr}"),
            "/history/exports",
            &[],
            None::<&()>,
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(started.elapsed() < Duration::from_secs(30));
    }

    #[tokio::test]
    async fn test_unauthorized_is_terminal() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/history/exports")
            .with_status(401)
            .create_async()
            .await;

        let client = Client::new();
        let result = send_with_retry(
            &client,
            &limiter(),
            &fast_retry(5),
            Method::POST,
            &server.url(),
            "/history/exports",
            &[],
            Some(&serde_json::json!({})),
        )
        .await;

        assert!(matches!(result, Err(AppError::Unauthorized)));
    }
}
