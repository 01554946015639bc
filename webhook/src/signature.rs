//! Slack request signature verification.
//!
//! Slack signs every request with `HMAC-SHA256("v0:{timestamp}:{body}")`
//! keyed by the app's signing secret and sends the result as
//! `X-Slack-Signature: v0=<hex>`. Requests older than five minutes are
//! rejected to limit replays.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the request signature.
pub const SIGNATURE_HEADER: &str = "x-slack-signature";
/// Header carrying the signing timestamp.
pub const TIMESTAMP_HEADER: &str = "x-slack-request-timestamp";

/// Maximum accepted age of a request timestamp, in seconds.
pub const MAX_TIMESTAMP_AGE_SECS: i64 = 300;

const VERSION: &str = "v0";

/// Computes the `v0=<hex>` signature of `body` at `timestamp`.
///
/// ```
/// use slackbot_webhook::sign_request;
///
/// let signature = sign_request("secret", "1700000000", b"{}");
/// assert!(signature.starts_with("v0="));
/// assert_eq!(signature.len(), 3 + 64);
/// ```
pub fn sign_request(signing_secret: &str, timestamp: &str, body: &[u8]) -> String {
    // HMAC accepts keys of any length.
    let mut mac = match HmacSha256::new_from_slice(signing_secret.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => unreachable!("HMAC-SHA256 accepts any key length"),
    };
    mac.update(format!("{VERSION}:{timestamp}:").as_bytes());
    mac.update(body);
    format!("{VERSION}={}", hex::encode(mac.finalize().into_bytes()))
}

/// Verifies a request signature against the current time.
pub fn verify_request_signature(
    signing_secret: &str,
    timestamp: &str,
    body: &[u8],
    signature: &str,
) -> bool {
    verify_request_signature_at(
        signing_secret,
        timestamp,
        body,
        signature,
        chrono::Utc::now().timestamp(),
    )
}

/// Verifies a request signature as of `now` (Unix seconds).
pub fn verify_request_signature_at(
    signing_secret: &str,
    timestamp: &str,
    body: &[u8],
    signature: &str,
    now: i64,
) -> bool {
    let Some(ts) = parse_timestamp(timestamp) else {
        return false;
    };
    if (now - ts).abs() > MAX_TIMESTAMP_AGE_SECS {
        return false;
    }

    let expected = sign_request(signing_secret, timestamp, body);
    expected.as_bytes().ct_eq(signature.as_bytes()).into()
}

fn parse_timestamp(timestamp: &str) -> Option<i64> {
    if timestamp.is_empty() || timestamp.len() > 32 {
        return None;
    }
    if !timestamp.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    timestamp.parse().ok()
}
