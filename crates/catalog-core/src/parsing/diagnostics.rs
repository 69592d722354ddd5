use serde::{Deserialize, Serialize};
use std::fmt;

/// Why the positional fallback gave up on a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UnparsedReason {
    TooFewTokens { count: usize },
    NoEuroToken,
    EuroTooEarly { position: usize },
    InvalidPrice { token: String },
}

impl fmt::Display for UnparsedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnparsedReason::TooFewTokens { count } => {
                write!(f, "expected at least 6 tokens, found {count}")
            }
            UnparsedReason::NoEuroToken => write!(f, "no token contains '€'"),
            UnparsedReason::EuroTooEarly { position } => write!(
                f,
                "euro token at position {position} leaves no room for article, fabric code and tipology"
            ),
            UnparsedReason::InvalidPrice { token } => {
                write!(f, "price '{token}' is not a whole number")
            }
        }
    }
}

/// A catalog line dropped by both parsing strategies, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnparsedLine {
    pub line_text: String,
    pub reason: UnparsedReason,
}

/// Receives one event per dropped line.
pub trait DiagnosticSink {
    fn unparsed(&mut self, line: UnparsedLine);
}

impl DiagnosticSink for Vec<UnparsedLine> {
    fn unparsed(&mut self, line: UnparsedLine) {
        self.push(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_sink_collects_in_order() {
        let mut sink: Vec<UnparsedLine> = Vec::new();
        sink.unparsed(UnparsedLine {
            line_text: "first".into(),
            reason: UnparsedReason::NoEuroToken,
        });
        sink.unparsed(UnparsedLine {
            line_text: "second".into(),
            reason: UnparsedReason::TooFewTokens { count: 2 },
        });
        assert_eq!(sink.len(), 2);
        assert_eq!(sink[0].line_text, "first");
        assert_eq!(sink[1].reason, UnparsedReason::TooFewTokens { count: 2 });
    }

    #[test]
    fn test_reason_display() {
        let reason = UnparsedReason::InvalidPrice {
            token: "JACKET".into(),
        };
        assert_eq!(reason.to_string(), "price 'JACKET' is not a whole number");
    }

    #[test]
    fn test_reason_serializes_with_kind_tag() {
        let json = serde_json::to_string(&UnparsedReason::EuroTooEarly { position: 1 }).unwrap();
        assert_eq!(json, r#"{"kind":"euro_too_early","position":1}"#);
    }
}
