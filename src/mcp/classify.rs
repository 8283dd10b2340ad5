//! Interaction-required classification
//!
//! Decides whether a remote failure is the one recoverable case - the
//! reserved "interaction required" protocol error, meaning the end user
//! must re-authenticate at a URL - or anything else, which passes through
//! unchanged. When in doubt the original failure is preserved so no
//! information is ever lost.

use serde_json::Value;

use super::error::RemoteFailure;

/// Reserved protocol error code signaling the user must complete an
/// external authentication step
pub const INTERACTION_REQUIRED_CODE: i32 = -32003;

/// Fallback text when the error carries no usable message
pub const DEFAULT_INTERACTION_MESSAGE: &str = "Required interaction";

/// Outcome of classifying a remote failure
#[derive(Debug)]
pub enum Classified {
    /// The user must re-authenticate. `message` already has the URL
    /// appended when one was present.
    InteractionRequired {
        message: String,
        url: Option<String>,
    },
    /// Anything else: the original failure, unmodified
    Unrecognized(RemoteFailure),
}

/// Classify a remote failure.
///
/// Searches the failure tree depth-first (aggregate children in stored
/// order, first match wins) for a protocol-level error. Only the reserved
/// code is special-cased; other codes and code-less failures come back as
/// `Unrecognized` wrapping the original.
pub fn classify(failure: RemoteFailure) -> Classified {
    match find_protocol(&failure) {
        Some((INTERACTION_REQUIRED_CODE, data)) => {
            let (message, url) = interaction_details(data);
            Classified::InteractionRequired { message, url }
        }
        _ => Classified::Unrecognized(failure),
    }
}

/// Depth-first search for the first protocol-level error in the tree
fn find_protocol(failure: &RemoteFailure) -> Option<(i32, Option<&Value>)> {
    match failure {
        RemoteFailure::Protocol { code, data, .. } => Some((*code, data.as_ref())),
        RemoteFailure::Aggregate { failures } => failures.iter().find_map(find_protocol),
        RemoteFailure::Transport(_) => None,
    }
}

/// Extract the user-facing message and redirect URL from the error data.
///
/// Message comes from `data.message.text` when present and a string,
/// otherwise the fixed default. A string `data.url` is appended as
/// `"{message} {url}"`.
fn interaction_details(data: Option<&Value>) -> (String, Option<String>) {
    let text = data
        .and_then(|d| d.get("message"))
        .and_then(|m| m.get("text"))
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_INTERACTION_MESSAGE);

    let url = data
        .and_then(|d| d.get("url"))
        .and_then(Value::as_str)
        .map(str::to_string);

    let message = match &url {
        Some(url) => format!("{text} {url}"),
        None => text.to_string(),
    };

    (message, url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_interaction_required_with_message_and_url() {
        let failure = RemoteFailure::protocol(
            INTERACTION_REQUIRED_CODE,
            "interaction_required",
            Some(json!({
                "message": {"text": "Please log in"},
                "url": "https://auth.example/login"
            })),
        );

        match classify(failure) {
            Classified::InteractionRequired { message, url } => {
                assert_eq!(message, "Please log in https://auth.example/login");
                assert_eq!(url.as_deref(), Some("https://auth.example/login"));
            }
            other => panic!("expected InteractionRequired, got {other:?}"),
        }
    }

    #[test]
    fn test_default_message_when_data_absent() {
        let failure = RemoteFailure::protocol(INTERACTION_REQUIRED_CODE, "boom", None);

        match classify(failure) {
            Classified::InteractionRequired { message, url } => {
                assert_eq!(message, "Required interaction");
                assert!(url.is_none());
            }
            other => panic!("expected InteractionRequired, got {other:?}"),
        }
    }

    #[test]
    fn test_default_message_when_text_is_not_a_string() {
        let failure = RemoteFailure::protocol(
            INTERACTION_REQUIRED_CODE,
            "boom",
            Some(json!({"message": {"text": 42}, "url": "https://auth.example/x"})),
        );

        match classify(failure) {
            Classified::InteractionRequired { message, .. } => {
                assert_eq!(message, "Required interaction https://auth.example/x");
            }
            other => panic!("expected InteractionRequired, got {other:?}"),
        }
    }

    #[test]
    fn test_other_codes_pass_through_unchanged() {
        let failure = RemoteFailure::protocol(-32001, "server busy", Some(json!({"k": "v"})));

        match classify(failure) {
            Classified::Unrecognized(RemoteFailure::Protocol { code, message, data }) => {
                assert_eq!(code, -32001);
                assert_eq!(message, "server busy");
                assert_eq!(data.unwrap()["k"], "v");
            }
            other => panic!("expected Unrecognized protocol failure, got {other:?}"),
        }
    }

    #[test]
    fn test_transport_failure_is_unrecognized() {
        let failure = RemoteFailure::transport("connection reset");

        match classify(failure) {
            Classified::Unrecognized(RemoteFailure::Transport(msg)) => {
                assert_eq!(msg, "connection reset");
            }
            other => panic!("expected Unrecognized transport failure, got {other:?}"),
        }
    }

    #[test]
    fn test_aggregate_finds_nested_interaction_required() {
        // Three branches failed; only the middle one is the reserved code
        let failure = RemoteFailure::aggregate(vec![
            RemoteFailure::transport("connection refused"),
            RemoteFailure::protocol(
                INTERACTION_REQUIRED_CODE,
                "interaction_required",
                Some(json!({
                    "message": {"text": "Please log in"},
                    "url": "https://auth.example/login"
                })),
            ),
            RemoteFailure::protocol(-32000, "unrelated", None),
        ]);

        match classify(failure) {
            Classified::InteractionRequired { message, .. } => {
                assert_eq!(message, "Please log in https://auth.example/login");
            }
            other => panic!("expected InteractionRequired, got {other:?}"),
        }
    }

    #[test]
    fn test_aggregate_first_protocol_error_wins() {
        // Depth-first, sibling order: the -32001 in the first branch is
        // found before the nested -32003, so nothing is special-cased
        let failure = RemoteFailure::aggregate(vec![
            RemoteFailure::protocol(-32001, "busy", None),
            RemoteFailure::aggregate(vec![RemoteFailure::protocol(
                INTERACTION_REQUIRED_CODE,
                "interaction_required",
                None,
            )]),
        ]);

        assert!(matches!(classify(failure), Classified::Unrecognized(_)));
    }

    #[test]
    fn test_aggregate_with_no_protocol_error_is_unrecognized() {
        let failure = RemoteFailure::aggregate(vec![
            RemoteFailure::transport("dns failure"),
            RemoteFailure::transport("timeout"),
        ]);

        match classify(failure) {
            Classified::Unrecognized(RemoteFailure::Aggregate { failures }) => {
                assert_eq!(failures.len(), 2);
            }
            other => panic!("expected Unrecognized aggregate, got {other:?}"),
        }
    }
}
