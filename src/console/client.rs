use crate::config::ConsoleConfig;
use crate::console::digest::{parse_challenge, Challenge, DigestAuth};
use crate::error::ConsoleError;
use reqwest::header::{AUTHORIZATION, USER_AGENT, WWW_AUTHENTICATE};
use reqwest::{Client as HttpClient, Response, StatusCode, Url};
use std::time::Duration;

const USER_AGENT_VALUE: &str = concat!("fujitsu-exporter/", env!("CARGO_PKG_VERSION"));

/// Fetches pages from the management console, answering its Digest
/// challenge.
///
/// Holds only read-only state after construction (the optional per-nonce
/// counter aside), so one client is shared by every concurrent scrape.
pub struct Client {
    http_client: HttpClient,
    base_url: String,
    auth: DigestAuth,
    timeout_seconds: u64,
    retry_attempts: u32,
    retry_backoff: Duration,
}

impl Client {
    pub fn new(config: ConsoleConfig) -> Result<Self, ConsoleError> {
        let http_client = HttpClient::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            http_client,
            base_url: config.url.trim_end_matches('/').to_string(),
            auth: DigestAuth::new(config.credentials(), config.nonce_count),
            timeout_seconds: config.timeout_seconds,
            retry_attempts: config.retry_attempts,
            retry_backoff: config.retry_backoff(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GETs `path`, authenticating when challenged.
    ///
    /// The first request goes out without credentials. Anything other than a
    /// `401` is taken as the final answer (the console let us in without
    /// asking). A `401` must carry a Digest challenge, which is answered once.
    pub async fn get(&self, path: &str) -> Result<String, ConsoleError> {
        let url = format!("{}{}", self.base_url, path);

        let unauthenticated = self.send(&url, None).await?;
        if unauthenticated.status() != StatusCode::UNAUTHORIZED {
            tracing::debug!(
                path,
                status = %unauthenticated.status(),
                "Received status without challenge, auth skipped"
            );
            return self.read_body(unauthenticated).await;
        }

        let challenge = challenge_from(&unauthenticated)?;
        // the digest covers the request URI as sent, base path prefix included
        let request_url = unauthenticated.url().clone();
        let uri = request_uri(&request_url);
        let authorization = self.auth.authorize(&challenge, "GET", &uri);
        tracing::trace!(
            %uri,
            realm = %challenge.realm,
            nc = authorization.nonce_count(),
            "Answering digest challenge"
        );

        let response = self
            .send(request_url.as_str(), Some(authorization.as_str()))
            .await?;
        self.read_body(response).await
    }

    /// [`Client::get`] with bounded retries on transient failures.
    ///
    /// Waits `retry_backoff` before the first retry and doubles the wait for
    /// each further one. Authentication problems are returned immediately.
    pub async fn get_with_retry(&self, path: &str) -> Result<String, ConsoleError> {
        let mut backoff = self.retry_backoff;
        let mut attempt = 0;
        loop {
            match self.get(path).await {
                Ok(body) => return Ok(body),
                Err(e) if e.is_transient() && attempt < self.retry_attempts => {
                    attempt += 1;
                    tracing::warn!(
                        path,
                        attempt,
                        backoff_ms = backoff.as_millis() as u64,
                        error = %e,
                        "Transient fetch failure, retrying"
                    );
                    tokio::time::sleep(backoff).await;
                    backoff = backoff.saturating_mul(2);
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn send(&self, url: &str, authorization: Option<&str>) -> Result<Response, ConsoleError> {
        let mut request = self
            .http_client
            .get(url)
            .header(USER_AGENT, USER_AGENT_VALUE);
        if let Some(authorization) = authorization {
            request = request.header(AUTHORIZATION, authorization);
        }
        request.send().await.map_err(|e| self.classify(e))
    }

    async fn read_body(&self, response: Response) -> Result<String, ConsoleError> {
        let status = response.status();
        let body = response.text().await.map_err(|e| self.classify(e))?;
        if status == StatusCode::OK {
            Ok(body)
        } else {
            Err(ConsoleError::fetch(status, &body))
        }
    }

    fn classify(&self, err: reqwest::Error) -> ConsoleError {
        if err.is_timeout() {
            ConsoleError::Timeout(self.timeout_seconds)
        } else {
            ConsoleError::Http(err)
        }
    }
}

/// Path and query of `url`, the form the Digest `uri` parameter takes.
fn request_uri(url: &Url) -> String {
    match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    }
}

/// Picks the Digest challenge among the response's `WWW-Authenticate`
/// headers.
fn challenge_from(response: &Response) -> Result<Challenge, ConsoleError> {
    let values: Vec<&str> = response
        .headers()
        .get_all(WWW_AUTHENTICATE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .collect();

    let header = values
        .iter()
        .find(|value| {
            value
                .trim_start()
                .get(..6)
                .is_some_and(|scheme| scheme.eq_ignore_ascii_case("digest"))
        })
        .or_else(|| values.first())
        .ok_or_else(|| {
            ConsoleError::AuthChallengeMissing("401 without WWW-Authenticate header".to_string())
        })?;

    parse_challenge(header)
}
