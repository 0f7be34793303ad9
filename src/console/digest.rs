//! HTTP Digest authentication (RFC 2617, MD5, `qop=auth`).
//!
//! The console answers every page with a `401` and a Digest challenge. This
//! module turns that challenge plus the configured credentials into the
//! `Authorization` header for the retried request.

use crate::error::ConsoleError;
use md5::{Digest, Md5};
use rand::RngCore;
use serde_derive::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, PoisonError};

/// The only quality-of-protection mode we speak.
pub const QOP_AUTH: &str = "auth";

/// Random bytes in a client nonce; hex encoding doubles the length.
const CNONCE_BYTES: usize = 8;

/// Upper bound on nonces remembered in [`NonceCountMode::PerNonce`] mode.
const MAX_TRACKED_NONCES: usize = 64;

/// Username and password for the console. Fixed for the process lifetime.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    #[cfg(test)]
    pub fn username(&self) -> &str {
        &self.username
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Parameters of a `WWW-Authenticate: Digest ...` challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    pub realm: String,
    pub nonce: String,
    /// Always [`QOP_AUTH`] once parsed.
    pub qop: String,
    pub opaque: Option<String>,
    pub algorithm: Option<String>,
}

/// How the `nc` value is chosen for each authenticated request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NonceCountMode {
    /// Every request sends `nc=00000001`. Each scrape asks for a fresh
    /// nonce, so this is what the console sees in practice.
    #[default]
    Fixed,
    /// Count requests per server nonce, for consoles that hand out the same
    /// nonce repeatedly and reject a repeated `nc`.
    PerNonce,
}

/// A computed `Authorization` header value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationHeader {
    value: String,
    response: String,
    cnonce: String,
    nonce_count: u32,
}

impl AuthorizationHeader {
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// The hex `response` digest.
    #[cfg(test)]
    pub fn response(&self) -> &str {
        &self.response
    }

    #[cfg(test)]
    pub fn cnonce(&self) -> &str {
        &self.cnonce
    }

    pub fn nonce_count(&self) -> u32 {
        self.nonce_count
    }
}

impl fmt::Display for AuthorizationHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Parses the value of a `WWW-Authenticate` header into a [`Challenge`].
///
/// Fails with [`ConsoleError::AuthChallengeMissing`] when the scheme is not
/// Digest or any of `nonce`, `realm` or `qop` is absent, and with
/// [`ConsoleError::UnsupportedChallenge`] when the server does not offer
/// `qop=auth` with MD5.
pub fn parse_challenge(header_value: &str) -> Result<Challenge, ConsoleError> {
    let trimmed = header_value.trim();
    let (scheme, rest) = trimmed
        .split_once(char::is_whitespace)
        .unwrap_or((trimmed, ""));
    if !scheme.eq_ignore_ascii_case("digest") {
        return Err(ConsoleError::AuthChallengeMissing(format!(
            "not a Digest challenge: {}",
            header_value
        )));
    }
    let params = split_params(rest);

    let mut realm = None;
    let mut nonce = None;
    let mut qop = None;
    let mut opaque = None;
    let mut algorithm = None;
    for (key, value) in params {
        if value.is_empty() {
            continue;
        }
        match key.as_str() {
            "realm" => realm = Some(value),
            "nonce" => nonce = Some(value),
            "qop" => qop = Some(value),
            "opaque" => opaque = Some(value),
            "algorithm" => algorithm = Some(value),
            _ => {}
        }
    }

    let missing: Vec<&str> = [("nonce", &nonce), ("realm", &realm), ("qop", &qop)]
        .iter()
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| *name)
        .collect();
    let (Some(realm), Some(nonce), Some(qop)) = (realm, nonce, qop) else {
        return Err(ConsoleError::AuthChallengeMissing(format!(
            "missing {}",
            missing.join(", ")
        )));
    };

    if !qop.split(',').any(|q| q.trim().eq_ignore_ascii_case(QOP_AUTH)) {
        return Err(ConsoleError::UnsupportedChallenge(format!("qop={}", qop)));
    }
    if let Some(algorithm) = &algorithm {
        if !algorithm.eq_ignore_ascii_case("MD5") {
            return Err(ConsoleError::UnsupportedChallenge(format!(
                "algorithm={}",
                algorithm
            )));
        }
    }

    Ok(Challenge {
        realm,
        nonce,
        qop: QOP_AUTH.to_string(),
        opaque,
        algorithm,
    })
}

/// Splits `key=value, key="quoted, value"` pairs. Keys are lower-cased.
fn split_params(input: &str) -> Vec<(String, String)> {
    let mut params = Vec::new();
    let mut chars = input.chars().peekable();

    loop {
        while matches!(chars.peek(), Some(c) if c.is_whitespace() || *c == ',') {
            chars.next();
        }
        if chars.peek().is_none() {
            break;
        }

        let mut key = String::new();
        while let Some(&c) = chars.peek() {
            if c == '=' || c == ',' {
                break;
            }
            key.push(c);
            chars.next();
        }

        let mut value = String::new();
        if chars.peek() == Some(&'=') {
            chars.next();
            while matches!(chars.peek(), Some(c) if c.is_whitespace()) {
                chars.next();
            }
            if chars.peek() == Some(&'"') {
                chars.next();
                while let Some(c) = chars.next() {
                    match c {
                        '\\' => {
                            if let Some(escaped) = chars.next() {
                                value.push(escaped);
                            }
                        }
                        '"' => break,
                        _ => value.push(c),
                    }
                }
            } else {
                while let Some(&c) = chars.peek() {
                    if c == ',' {
                        break;
                    }
                    value.push(c);
                    chars.next();
                }
                value = value.trim().to_string();
            }
        }

        let key = key.trim().to_ascii_lowercase();
        if !key.is_empty() {
            params.push((key, value));
        }
    }

    params
}

fn md5_hex(input: &str) -> String {
    hex::encode(Md5::digest(input.as_bytes()))
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Computes the `Authorization` header for one request.
///
/// Pure: the same inputs always give the same header, which is what lets the
/// RFC 2617 example be checked directly.
pub fn compute_authorization(
    credentials: &Credentials,
    challenge: &Challenge,
    method: &str,
    uri: &str,
    nonce_count: u32,
    cnonce: &str,
) -> AuthorizationHeader {
    let ha1 = md5_hex(&format!(
        "{}:{}:{}",
        credentials.username, challenge.realm, credentials.password
    ));
    let ha2 = md5_hex(&format!("{}:{}", method, uri));
    let nc = format!("{:08x}", nonce_count);
    let response = md5_hex(&format!(
        "{}:{}:{}:{}:{}:{}",
        ha1, challenge.nonce, nc, cnonce, challenge.qop, ha2
    ));

    let mut value = format!(
        "Digest username={}, realm={}, nonce={}, uri={}",
        quote(&credentials.username),
        quote(&challenge.realm),
        quote(&challenge.nonce),
        quote(uri),
    );
    if challenge.algorithm.is_some() {
        value.push_str(", algorithm=MD5");
    }
    value.push_str(&format!(
        ", qop={}, nc={}, cnonce={}, response={}",
        challenge.qop,
        nc,
        quote(cnonce),
        quote(&response),
    ));
    if let Some(opaque) = &challenge.opaque {
        value.push_str(&format!(", opaque={}", quote(opaque)));
    }

    AuthorizationHeader {
        value,
        response,
        cnonce: cnonce.to_string(),
        nonce_count,
    }
}

/// Generates a client nonce: 8 random bytes as 16 lower-case hex characters.
pub fn generate_cnonce() -> String {
    let mut bytes = [0u8; CNONCE_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

enum NonceCounter {
    Fixed,
    PerNonce(Mutex<HashMap<String, u32>>),
}

/// Digest authenticator holding the credentials and the nonce-count policy.
pub struct DigestAuth {
    credentials: Credentials,
    counter: NonceCounter,
}

impl DigestAuth {
    pub fn new(credentials: Credentials, mode: NonceCountMode) -> Self {
        let counter = match mode {
            NonceCountMode::Fixed => NonceCounter::Fixed,
            NonceCountMode::PerNonce => NonceCounter::PerNonce(Mutex::new(HashMap::new())),
        };
        Self {
            credentials,
            counter,
        }
    }

    /// Builds the header for `method uri` answering `challenge`, with a
    /// fresh cnonce.
    pub fn authorize(&self, challenge: &Challenge, method: &str, uri: &str) -> AuthorizationHeader {
        let nonce_count = self.next_nonce_count(&challenge.nonce);
        compute_authorization(
            &self.credentials,
            challenge,
            method,
            uri,
            nonce_count,
            &generate_cnonce(),
        )
    }

    fn next_nonce_count(&self, nonce: &str) -> u32 {
        match &self.counter {
            NonceCounter::Fixed => 1,
            NonceCounter::PerNonce(counts) => {
                let mut counts = counts.lock().unwrap_or_else(PoisonError::into_inner);
                if !counts.contains_key(nonce) && counts.len() >= MAX_TRACKED_NONCES {
                    counts.clear();
                }
                let count = counts.entry(nonce.to_string()).or_insert(0);
                *count = count.wrapping_add(1).max(1);
                *count
            }
        }
    }
}
