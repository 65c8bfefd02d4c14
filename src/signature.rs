//! Webhook signature verification

use hmac::{Hmac, Mac};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// Checks the webhook body against the `sha1=<hex>` signature candidates
/// from the `X-Hub-Signature` header.
///
/// An empty secret disables verification entirely. Candidates without the
/// `sha1=` prefix or with non-hex payloads are skipped, never fatal. The
/// comparison of secret-dependent data is constant-time
/// (`Mac::verify_slice`).
pub fn verify(secret: &str, payload: &[u8], candidates: &[&str]) -> bool {
    if secret.is_empty() {
        return true;
    }

    let mac = match HmacSha1::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => return false,
    };

    for candidate in candidates {
        let Some(hex_digest) = candidate.strip_prefix("sha1=") else {
            continue;
        };
        let Ok(digest) = hex::decode(hex_digest) else {
            continue;
        };
        if mac
            .clone()
            .chain_update(payload)
            .verify_slice(&digest)
            .is_ok()
        {
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::verify;

    // hex(HMAC-SHA1("secret", "hello world"))
    const HELLO_SIG: &str = "03376ee7ad7bbfceee98660439a4d8b125122a5a";

    #[test]
    fn empty_secret_disables_verification() {
        assert!(verify("", b"hello world", &[]));
        assert!(verify("", b"hello world", &["sha1=deadbeef"]));
        assert!(verify("", b"", &["not-a-signature"]));
    }

    #[test]
    fn accepts_correct_signature() {
        assert!(verify(
            "secret",
            b"hello world",
            &[&format!("sha1={}", HELLO_SIG)]
        ));
    }

    #[test]
    fn rejects_wrong_signature() {
        assert!(!verify(
            "secret",
            b"hello world",
            &["sha1=0000000000000000000000000000000000000000"]
        ));
        assert!(!verify("other-secret", b"hello world", &[&format!("sha1={}", HELLO_SIG)]));
    }

    #[test]
    fn rejects_when_no_candidates() {
        assert!(!verify("secret", b"hello world", &[]));
    }

    #[test]
    fn accepts_if_any_candidate_matches() {
        let good = format!("sha1={}", HELLO_SIG);
        assert!(verify(
            "secret",
            b"hello world",
            &["sha1=ffffffffffffffffffffffffffffffffffffffff", &good]
        ));
    }

    #[test]
    fn skips_candidates_without_prefix() {
        // A bare hex digest without "sha1=" never matches.
        assert!(!verify("secret", b"hello world", &[HELLO_SIG]));
        // But it does not poison later candidates either.
        let good = format!("sha1={}", HELLO_SIG);
        assert!(verify("secret", b"hello world", &[HELLO_SIG, &good]));
    }

    #[test]
    fn skips_non_hex_candidates() {
        assert!(!verify("secret", b"hello world", &["sha1=not-hex-at-all"]));
    }
}
