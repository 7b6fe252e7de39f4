//! Daily auth-key derivation for the catalog API.
//!
//! Every call must carry an `X-Auth` header whose value is the lowercase hex
//! MD5 digest of `"{secret}_{YYYYMMDD}"`, where the date is the current UTC
//! calendar day. The server rejects tokens derived from a stale date, so the
//! key is recomputed per request rather than cached; the digest is cheap and
//! needs no invalidation logic.

use chrono::{NaiveDate, Utc};
use md5::{Digest, Md5};

/// Derives today's auth key from the shared secret.
///
/// Pure function of the secret and the current UTC date.
#[must_use]
pub fn auth_key(secret: &str) -> String {
    auth_key_for_date(secret, Utc::now().date_naive())
}

/// Derives the auth key for an explicit calendar date.
///
/// Exposed so tests can pin the date; production callers go through
/// [`auth_key`].
#[must_use]
pub fn auth_key_for_date(secret: &str, date: NaiveDate) -> String {
    let stamp = date.format("%Y%m%d");
    let digest = Md5::digest(format!("{secret}_{stamp}").as_bytes());
    hex_encode(digest.as_slice())
}

fn hex_encode(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push(char::from(HEX[usize::from(byte >> 4)]));
        out.push(char::from(HEX[usize::from(byte & 0x0f)]));
    }
    out
}
