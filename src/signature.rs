// 🔏 Request signatures - Ed25519 over timestamp ‖ body

use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use thiserror::Error;

pub const SIGNATURE_HEADER: &str = "x-signature-ed25519";
pub const TIMESTAMP_HEADER: &str = "x-signature-timestamp";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("public key is not valid hex")]
    KeyEncoding,

    #[error("public key is not a valid Ed25519 key")]
    InvalidKey,

    #[error("missing signature headers")]
    MissingHeaders,

    #[error("signature is not valid hex or has the wrong length")]
    SignatureEncoding,

    #[error("signature does not match")]
    Mismatch,
}

/// RequestVerifier - checks that an interaction really came from the platform
#[derive(Debug, Clone)]
pub struct RequestVerifier {
    key: VerifyingKey,
}

impl RequestVerifier {
    /// Build from the application's hex-encoded public key
    pub fn from_hex(public_key: &str) -> Result<Self, SignatureError> {
        let bytes = hex::decode(public_key.trim()).map_err(|_| SignatureError::KeyEncoding)?;
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|_| SignatureError::KeyEncoding)?;
        let key = VerifyingKey::from_bytes(&bytes).map_err(|_| SignatureError::InvalidKey)?;
        Ok(RequestVerifier { key })
    }

    pub fn new(key: VerifyingKey) -> Self {
        RequestVerifier { key }
    }

    pub fn verify(
        &self,
        signature: Option<&str>,
        timestamp: Option<&str>,
        body: &[u8],
    ) -> Result<(), SignatureError> {
        let (Some(signature), Some(timestamp)) = (signature, timestamp) else {
            return Err(SignatureError::MissingHeaders);
        };

        let bytes = hex::decode(signature).map_err(|_| SignatureError::SignatureEncoding)?;
        let signature =
            Signature::from_slice(&bytes).map_err(|_| SignatureError::SignatureEncoding)?;

        let mut message = Vec::with_capacity(timestamp.len() + body.len());
        message.extend_from_slice(timestamp.as_bytes());
        message.extend_from_slice(body);

        self.key
            .verify(&message, &signature)
            .map_err(|_| SignatureError::Mismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Signer, SigningKey};

    fn signing_key() -> SigningKey {
        SigningKey::from_bytes(&[7u8; 32])
    }

    fn sign(timestamp: &str, body: &str) -> String {
        let message = format!("{}{}", timestamp, body);
        hex::encode(signing_key().sign(message.as_bytes()).to_bytes())
    }

    fn verifier() -> RequestVerifier {
        RequestVerifier::from_hex(&hex::encode(signing_key().verifying_key().to_bytes())).unwrap()
    }

    #[test]
    fn test_valid_signature() {
        let body = r#"{"type":1}"#;
        let signature = sign("1700000000", body);

        assert_eq!(
            verifier().verify(Some(&signature), Some("1700000000"), body.as_bytes()),
            Ok(())
        );
    }

    #[test]
    fn test_tampered_body_rejected() {
        let signature = sign("1700000000", r#"{"type":1}"#);

        assert_eq!(
            verifier().verify(Some(&signature), Some("1700000000"), br#"{"type":2}"#),
            Err(SignatureError::Mismatch)
        );
        assert_eq!(
            verifier().verify(Some(&signature), Some("1700000001"), br#"{"type":1}"#),
            Err(SignatureError::Mismatch)
        );
    }

    #[test]
    fn test_missing_or_malformed_headers() {
        let v = verifier();

        assert_eq!(v.verify(None, Some("1"), b"{}"), Err(SignatureError::MissingHeaders));
        assert_eq!(v.verify(Some("ab"), None, b"{}"), Err(SignatureError::MissingHeaders));
        assert_eq!(
            v.verify(Some("zz"), Some("1"), b"{}"),
            Err(SignatureError::SignatureEncoding)
        );
        assert_eq!(
            v.verify(Some("abcd"), Some("1"), b"{}"),
            Err(SignatureError::SignatureEncoding)
        );
    }

    #[test]
    fn test_bad_public_key() {
        assert_eq!(
            RequestVerifier::from_hex("not-hex").unwrap_err(),
            SignatureError::KeyEncoding
        );
        assert_eq!(
            RequestVerifier::from_hex("abcd").unwrap_err(),
            SignatureError::KeyEncoding
        );
    }
}
