//! Remote failure envelope
//!
//! Failures from remote tool invocation arrive either as a protocol-level
//! error, a transport failure, or an aggregate of sub-failures when a
//! fan-out over several servers fails on every branch. The duck-typed
//! attribute checks of the protocol layer become an explicit tagged tree
//! here so the classifier can do a typed traversal.

use serde_json::Value;
use thiserror::Error;

/// A failure raised by a remote tool operation
#[derive(Error, Debug)]
pub enum RemoteFailure {
    /// Protocol-level error envelope: numeric code, message, optional
    /// structured data (which may carry a nested `message.text` and `url`)
    #[error("remote tool error {code}: {message}")]
    Protocol {
        code: i32,
        message: String,
        data: Option<Value>,
    },

    /// Join failure of a fan-out: every contained branch failed. Children
    /// keep the deterministic order the branches were joined in.
    #[error("{} concurrent remote operations failed", .failures.len())]
    Aggregate { failures: Vec<RemoteFailure> },

    /// Connection or transport-level failure
    #[error("remote transport failure: {0}")]
    Transport(String),
}

impl RemoteFailure {
    pub fn protocol(code: i32, message: impl Into<String>, data: Option<Value>) -> Self {
        RemoteFailure::Protocol {
            code,
            message: message.into(),
            data,
        }
    }

    pub fn aggregate(failures: Vec<RemoteFailure>) -> Self {
        RemoteFailure::Aggregate { failures }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        RemoteFailure::Transport(message.into())
    }

    /// Lift an rmcp protocol error into the envelope
    pub fn from_error_data(err: rmcp::model::ErrorData) -> Self {
        RemoteFailure::Protocol {
            code: err.code.0,
            message: err.message.to_string(),
            data: err.data,
        }
    }
}

impl From<rmcp::service::ServiceError> for RemoteFailure {
    fn from(err: rmcp::service::ServiceError) -> Self {
        match err {
            rmcp::service::ServiceError::McpError(data) => RemoteFailure::from_error_data(data),
            other => RemoteFailure::Transport(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_display_keeps_code_and_message() {
        let failure = RemoteFailure::protocol(-32001, "server busy", None);
        assert_eq!(failure.to_string(), "remote tool error -32001: server busy");
    }

    #[test]
    fn test_from_error_data_preserves_fields() {
        let data = rmcp::model::ErrorData::new(
            rmcp::model::ErrorCode(-32003),
            "interaction_required",
            Some(serde_json::json!({"url": "https://auth.example/login"})),
        );
        let failure = RemoteFailure::from_error_data(data);
        match failure {
            RemoteFailure::Protocol { code, message, data } => {
                assert_eq!(code, -32003);
                assert_eq!(message, "interaction_required");
                assert_eq!(data.unwrap()["url"], "https://auth.example/login");
            }
            other => panic!("expected Protocol, got {other:?}"),
        }
    }
}
