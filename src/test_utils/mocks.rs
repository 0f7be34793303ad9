//! Mock implementations and server helpers for testing.
//!
//! The Digest side of the console is simulated with wiremock: a request is
//! answered with the page only when its `Authorization` header carries a
//! response that verifies against the test credentials, and with a 401
//! challenge otherwise.

use async_trait::async_trait;
use md5::{Digest, Md5};
use std::collections::HashMap;
use wiremock::matchers::{method, path};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

use crate::error::{CollectorError, ExtractionError, MetricError};
use crate::model::{MetricCollector, MetricKey, MetricSample};
use crate::test_utils::config::TestConsoleConfigBuilder;

/// Realm announced by the mock console.
pub const TEST_REALM: &str = "iRMC@RX300";

/// Nonce announced by the mock console.
pub const TEST_NONCE: &str = "dcd98b7102dd2f0e8b11d0f600bfb0c093";

fn md5_hex(input: &str) -> String {
    hex::encode(Md5::digest(input.as_bytes()))
}

/// Splits `key=value, key="value"` pairs; quoted values may contain commas.
fn digest_params(header: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();
    let mut rest = header.trim();
    while !rest.is_empty() {
        let Some((key, after)) = rest.split_once('=') else {
            break;
        };
        let key = key.trim().trim_start_matches(',').trim().to_ascii_lowercase();
        let after = after.trim_start();
        let (value, remaining) = if let Some(quoted) = after.strip_prefix('"') {
            let end = quoted.find('"').unwrap_or(quoted.len());
            (&quoted[..end], quoted.get(end + 1..).unwrap_or(""))
        } else {
            let end = after.find(',').unwrap_or(after.len());
            (after[..end].trim(), &after[end..])
        };
        params.insert(key, value.to_string());
        rest = remaining.trim_start().trim_start_matches(',').trim_start();
    }
    params
}

/// Matches requests whose Digest `Authorization` header verifies for the
/// given credentials and realm.
pub struct ValidDigest {
    user: String,
    password: String,
    realm: String,
}

impl ValidDigest {
    pub fn new(user: &str, password: &str, realm: &str) -> Self {
        Self {
            user: user.to_string(),
            password: password.to_string(),
            realm: realm.to_string(),
        }
    }
}

impl Match for ValidDigest {
    fn matches(&self, request: &Request) -> bool {
        let Some(header) = request
            .headers
            .get("authorization")
            .and_then(|value| value.to_str().ok())
        else {
            return false;
        };
        let Some(params) = header.strip_prefix("Digest ").map(digest_params) else {
            return false;
        };
        let field = |name: &str| params.get(name).cloned().unwrap_or_default();

        if field("username") != self.user
            || field("realm") != self.realm
            || field("qop") != "auth"
            || field("uri") != request.url.path()
        {
            return false;
        }

        let ha1 = md5_hex(&format!("{}:{}:{}", self.user, self.realm, self.password));
        let ha2 = md5_hex(&format!("{}:{}", request.method, field("uri")));
        let expected = md5_hex(&format!(
            "{}:{}:{}:{}:auth:{}",
            ha1,
            field("nonce"),
            field("nc"),
            field("cnonce"),
            ha2
        ));
        field("response") == expected
    }
}

/// Mounts `body` at `page` behind Digest authentication using the default
/// test credentials.
pub async fn mount_digest_page(server: &MockServer, page: &str, body: &str) {
    let config = TestConsoleConfigBuilder::new().build();

    Mock::given(method("GET"))
        .and(path(page))
        .and(ValidDigest::new(&config.user, &config.password, TEST_REALM))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(ResponseTemplate::new(401).insert_header(
            "WWW-Authenticate",
            format!(
                r#"Digest realm="{}", qop="auth", nonce="{}", opaque="5ccc069c403ebaf9f0171e9517f40e41""#,
                TEST_REALM, TEST_NONCE
            ),
        ))
        .mount(server)
        .await;
}

enum MockOutcome {
    Values(Vec<f64>),
    Failure,
    Defect,
}

/// A collector returning canned samples or a canned error.
pub struct MockMetricCollector {
    name: &'static str,
    outcome: MockOutcome,
}

impl MockMetricCollector {
    /// Succeeds with one power overall sample per value.
    pub fn new_with_values(name: &'static str, values: &[f64]) -> Self {
        Self {
            name,
            outcome: MockOutcome::Values(values.to_vec()),
        }
    }

    /// Fails with an extraction error.
    pub fn new_failure(name: &'static str) -> Self {
        Self {
            name,
            outcome: MockOutcome::Failure,
        }
    }

    /// Fails with a label arity error.
    pub fn new_defect(name: &'static str) -> Self {
        Self {
            name,
            outcome: MockOutcome::Defect,
        }
    }
}

#[async_trait]
impl MetricCollector for MockMetricCollector {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn collect(&self) -> Result<Vec<MetricSample>, CollectorError> {
        match &self.outcome {
            MockOutcome::Values(values) => Ok(values
                .iter()
                .map(|value| MetricSample {
                    key: MetricKey::PowerOverall,
                    label_values: vec!["1200".to_string()],
                    value: *value,
                })
                .collect()),
            MockOutcome::Failure => Err(ExtractionError::element_not_found(".sensor").into()),
            MockOutcome::Defect => Err(MetricError::LabelArityMismatch {
                metric: "fujitsu_power_overall".to_string(),
                expected: 1,
                actual: 0,
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::digest::{compute_authorization, parse_challenge, Credentials};

    #[test]
    fn test_digest_params() {
        let params = digest_params(r#"username="admin", uri="/13", nc=00000001, qop=auth"#);
        assert_eq!(params["username"], "admin");
        assert_eq!(params["uri"], "/13");
        assert_eq!(params["nc"], "00000001");
        assert_eq!(params["qop"], "auth");
    }

    #[test]
    fn test_digest_params_quoted_comma() {
        let params = digest_params(r#"realm="a, b", nonce="n""#);
        assert_eq!(params["realm"], "a, b");
        assert_eq!(params["nonce"], "n");
    }

    #[test]
    fn test_verifier_agrees_with_client_header() {
        let challenge = parse_challenge(&format!(
            r#"Digest realm="{}", qop="auth", nonce="{}""#,
            TEST_REALM, TEST_NONCE
        ))
        .unwrap();
        let header = compute_authorization(
            &Credentials::new("admin", "secret"),
            &challenge,
            "GET",
            "/13",
            1,
            "0a4f113b",
        );
        let params = digest_params(header.as_str().strip_prefix("Digest ").unwrap());

        let ha1 = md5_hex(&format!("admin:{}:secret", TEST_REALM));
        let ha2 = md5_hex("GET:/13");
        let expected = md5_hex(&format!(
            "{}:{}:00000001:0a4f113b:auth:{}",
            ha1, TEST_NONCE, ha2
        ));
        assert_eq!(params["response"], expected);
    }
}
