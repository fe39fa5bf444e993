//! Serialisable types exchanged with codec callers.
//!
//! These types travel as JSON between the command-line front end and whatever
//! invokes it. Ciphertext is carried as standard base64.

use serde::{Deserialize, Serialize};

use crate::error::CodecError;
use crate::params::{BlockMode, PaddingScheme};

// ---------------------------------------------------------------------------
// Sealed payload
// ---------------------------------------------------------------------------

/// A ciphertext envelope plus the parameters needed to open it.
///
/// The key is never part of this structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealedPayload {
    /// Mode the payload was encrypted with.
    pub mode: BlockMode,
    /// Padding scheme applied before encryption (ignored for streaming modes).
    pub padding: PaddingScheme,
    /// Whether `payload` starts with a `Salted__` header.
    pub salted: bool,
    /// Standard base64 of the full envelope.
    pub payload: String,
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Error body emitted on any failed operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-readable error code (e.g. `"authentication_failure"`).
    pub code: String,
    /// Human-readable description. Never contains key or plaintext material.
    pub message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<&CodecError> for ErrorResponse {
    fn from(err: &CodecError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sealed_payload_round_trip() {
        let sealed = SealedPayload {
            mode: BlockMode::Gcm,
            padding: PaddingScheme::NoPadding,
            salted: true,
            payload: "U2FsdGVkX18=".into(),
        };
        let json = serde_json::to_string(&sealed).unwrap();
        assert!(json.contains("\"GCM\""));
        let decoded: SealedPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, sealed);
    }

    #[test]
    fn sealed_payload_rejects_unknown_mode() {
        let json = r#"{"mode":"XTS","padding":"PKCS7","salted":false,"payload":""}"#;
        assert!(serde_json::from_str::<SealedPayload>(json).is_err());
    }

    #[test]
    fn error_response_from_codec_error() {
        let e = ErrorResponse::from(&CodecError::AuthenticationFailure);
        assert_eq!(e.code, "authentication_failure");
        assert!(e.message.contains("authentication"));
    }
}
