//! Response envelope parsing and normalization.
//!
//! Every backend response body is wrapped in a uniform envelope that reports
//! domain success or failure independently of the HTTP status. Normalization
//! unwraps the payload on success and converts a `Failed` envelope into a
//! [`DomainError`], emitting one user notification as a side effect.

use serde::Deserialize;

use crate::error::{DomainError, Error, ProtocolError};
use crate::notify::Notifier;

/// Domain-level outcome reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Status {
    Succeed,
    Failed,
}

/// The backend's uniform response wrapper.
///
/// The explicit deserialize bound stops serde from also requiring
/// `T: Default` for the defaulted `data` field.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: serde::Deserialize<'de>"))]
pub struct Envelope<T> {
    #[serde(default)]
    pub data: Option<T>,
    pub status: Status,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub meta_data: Option<serde_json::Value>,
}

impl<T> Envelope<T> {
    /// Unwrap the envelope into its payload or a normalized domain error.
    ///
    /// A `Failed` envelope notifies the user through `notifier` exactly once
    /// before the error is returned.
    pub fn normalize(self, notifier: &dyn Notifier) -> Result<T, Error> {
        match self.status {
            Status::Succeed => self.data.ok_or_else(|| {
                ProtocolError::new(
                    200,
                    self.code,
                    Some("success envelope carried no data".to_string()),
                )
                .into()
            }),
            Status::Failed => {
                let error = DomainError::new(
                    self.message
                        .unwrap_or_else(|| "request failed".to_string()),
                    self.code,
                    self.errors,
                );
                notifier.notify(&error);
                Err(error.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingNotifier {
        seen: Mutex<Vec<String>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, error: &DomainError) {
            self.seen.lock().unwrap().push(error.message.clone());
        }
    }

    #[test]
    fn parses_success_envelope() {
        let json = r#"{
            "data": {"name": "Flat 4b"},
            "status": "Succeed",
            "message": "",
            "code": "",
            "errors": [],
            "metaData": {}
        }"#;

        let envelope: Envelope<serde_json::Value> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.status, Status::Succeed);

        let notifier = RecordingNotifier::default();
        let data = envelope.normalize(&notifier).unwrap();
        assert_eq!(data["name"], "Flat 4b");
        assert!(notifier.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn failed_envelope_becomes_domain_error_and_notifies_once() {
        let json = r#"{
            "data": null,
            "status": "Failed",
            "message": "Property not found",
            "code": "E404",
            "errors": ["no such property"],
            "metaData": {}
        }"#;

        let envelope: Envelope<serde_json::Value> = serde_json::from_str(json).unwrap();
        let notifier = RecordingNotifier::default();
        let err = envelope.normalize(&notifier).unwrap_err();

        match err {
            Error::Domain(domain) => {
                assert_eq!(domain.message, "Property not found");
                assert_eq!(domain.code.as_deref(), Some("E404"));
                assert_eq!(domain.errors, vec!["no such property"]);
            }
            other => panic!("expected domain error, got {other:?}"),
        }
        assert_eq!(notifier.seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn deserializes_payloads_without_a_default_impl() {
        // Listing deliberately has no Default; the envelope must still
        // deserialize around it.
        #[derive(Debug, Deserialize)]
        struct Listing {
            name: String,
        }

        let json = r#"{"data": {"name": "Flat 4b"}, "status": "Succeed"}"#;
        let envelope: Envelope<Listing> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.data.unwrap().name, "Flat 4b");
    }

    #[test]
    fn success_without_data_is_protocol_error() {
        let json = r#"{"status": "Succeed"}"#;
        let envelope: Envelope<i64> = serde_json::from_str(json).unwrap();
        let notifier = RecordingNotifier::default();
        assert!(matches!(
            envelope.normalize(&notifier),
            Err(Error::Protocol(_))
        ));
    }
}
