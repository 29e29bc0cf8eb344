//! Opaque, tamper-resistant pagination cursors.
//!
//! A cursor carries serialized scan position (a continuation key, or a map of
//! them for multi-index queries) across request boundaries, so it must come
//! back exactly as it left. Tokens have the form
//! `base64url(payload).base64url(HMAC-SHA256(secret, payload))`; the payload
//! is a version-tagged JSON envelope, so a token minted against an older
//! payload schema is rejected outright instead of being silently
//! misinterpreted.
//!
//! Absence round-trips as absence: sealing `None` yields `None` (never a
//! ciphertext of nothing) and opening `None` or an empty string yields
//! `Ok(None)`.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD as BASE64;
use hmac::{Hmac, KeyInit, Mac};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::error::{Error, Result};

type HmacSha256 = Hmac<Sha256>;

/// Current cursor payload schema version.
const CURSOR_VERSION: u8 = 1;

/// The signed envelope around a scan position.
#[derive(Debug, Serialize, Deserialize)]
struct Envelope<T> {
    v: u8,
    value: T,
}

/// Seals `value` into an opaque token under `secret`.
///
/// `None` seals to `None`.
pub fn encrypt<T: Serialize>(value: Option<&T>, secret: &str) -> Result<Option<String>> {
    let Some(value) = value else {
        return Ok(None);
    };
    let payload = serde_json::to_vec(&Envelope {
        v: CURSOR_VERSION,
        value,
    })
    .map_err(|e| Error::InvalidCursor {
        reason: format!("unserializable payload: {e}"),
    })?;
    let tag = sign(secret, &payload);
    Ok(Some(format!(
        "{}.{}",
        BASE64.encode(&payload),
        BASE64.encode(tag)
    )))
}

/// Opens a token sealed by [`encrypt`] with the same secret.
///
/// `None` and the empty string open to `Ok(None)`. A malformed, tampered, or
/// version-mismatched token is an [`Error::InvalidCursor`].
pub fn decrypt<T: DeserializeOwned>(token: Option<&str>, secret: &str) -> Result<Option<T>> {
    let Some(token) = token.filter(|t| !t.is_empty()) else {
        return Ok(None);
    };

    let (payload_b64, tag_b64) = token.split_once('.').ok_or_else(|| Error::InvalidCursor {
        reason: "missing signature".to_owned(),
    })?;
    let payload = BASE64
        .decode(payload_b64)
        .map_err(|_| Error::InvalidCursor {
            reason: "malformed payload encoding".to_owned(),
        })?;
    let tag = BASE64.decode(tag_b64).map_err(|_| Error::InvalidCursor {
        reason: "malformed signature encoding".to_owned(),
    })?;

    let expected = sign(secret, &payload);
    if !bool::from(tag.as_slice().ct_eq(&expected)) {
        return Err(Error::InvalidCursor {
            reason: "signature mismatch".to_owned(),
        });
    }

    let envelope: Envelope<T> =
        serde_json::from_slice(&payload).map_err(|e| Error::InvalidCursor {
            reason: format!("undecodable payload: {e}"),
        })?;
    if envelope.v != CURSOR_VERSION {
        return Err(Error::InvalidCursor {
            reason: format!(
                "unsupported cursor version {} (expected {CURSOR_VERSION})",
                envelope.v
            ),
        });
    }
    Ok(Some(envelope.value))
}

fn sign(secret: &str, payload: &[u8]) -> Vec<u8> {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can accept any key length");
    mac.update(payload);
    mac.finalize().into_bytes().to_vec()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use dynaquery_model::{AttributeValue, Key};

    use super::*;

    const SECRET: &str = "super-secret";

    fn sample_key() -> Key {
        let mut key = Key::new();
        key.insert("pk".to_owned(), AttributeValue::from("product"));
        key.insert("sk".to_owned(), AttributeValue::from("0042"));
        key
    }

    #[test]
    fn test_should_roundtrip_a_continuation_key() {
        let key = sample_key();
        let token = encrypt(Some(&key), SECRET).unwrap().unwrap();
        let opened: Key = decrypt(Some(&token), SECRET).unwrap().unwrap();
        assert_eq!(opened, key);
    }

    #[test]
    fn test_should_roundtrip_a_key_map() {
        let mut map = HashMap::new();
        map.insert("default".to_owned(), sample_key());
        let token = encrypt(Some(&map), SECRET).unwrap().unwrap();
        let opened: HashMap<String, Key> = decrypt(Some(&token), SECRET).unwrap().unwrap();
        assert_eq!(opened, map);
    }

    #[test]
    fn test_should_seal_absence_as_absence() {
        assert!(encrypt::<Key>(None, SECRET).unwrap().is_none());
    }

    #[test]
    fn test_should_open_absent_and_empty_tokens_as_none() {
        assert!(decrypt::<Key>(None, SECRET).unwrap().is_none());
        assert!(decrypt::<Key>(Some(""), SECRET).unwrap().is_none());
    }

    #[test]
    fn test_should_reject_tampered_tokens() {
        let token = encrypt(Some(&sample_key()), SECRET).unwrap().unwrap();
        let mut tampered = token.clone();
        // flip a character inside the payload half
        tampered.replace_range(1..2, if &token[1..2] == "A" { "B" } else { "A" });
        let err = decrypt::<Key>(Some(&tampered), SECRET).unwrap_err();
        assert!(matches!(err, Error::InvalidCursor { .. }));
    }

    #[test]
    fn test_should_reject_wrong_secret() {
        let token = encrypt(Some(&sample_key()), SECRET).unwrap().unwrap();
        let err = decrypt::<Key>(Some(&token), "other-secret").unwrap_err();
        assert!(matches!(err, Error::InvalidCursor { .. }));
    }

    #[test]
    fn test_should_reject_unknown_versions() {
        let payload = serde_json::to_vec(&Envelope {
            v: 9,
            value: sample_key(),
        })
        .unwrap();
        let tag = sign(SECRET, &payload);
        let token = format!("{}.{}", BASE64.encode(&payload), BASE64.encode(tag));
        let err = decrypt::<Key>(Some(&token), SECRET).unwrap_err();
        assert!(matches!(err, Error::InvalidCursor { reason } if reason.contains("version")));
    }
}
