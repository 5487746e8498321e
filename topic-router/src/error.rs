//! Error taxonomy shared across declaration, routing, and expression layers.

use thiserror::Error;

/// Rejection of a subscription declaration at registration time.
///
/// A rejected declaration never reaches the registry; other declarations in
/// the same batch still proceed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("subscription for pubsub '{pubsub_name}' declares an empty topic name")]
    EmptyTopic { pubsub_name: String },

    #[error("rule {position} on topic '{topic}' declares an empty route path")]
    EmptyRuleRoute { topic: String, position: usize },

    #[error("default route on topic '{topic}' is empty")]
    EmptyDefaultRoute { topic: String },

    #[error("declaration source failed: {0}")]
    Source(String),
}

/// A match expression that does not parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("match expression '{expression}' does not parse: {reason}")]
pub struct ExpressionError {
    pub expression: String,
    pub reason: String,
}

/// Failure to evaluate one rule's match expression against an event.
///
/// Recovered locally by the router: the rule is treated as non-matching and
/// the scan continues, so a single bad rule never aborts a dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    #[error("match expression '{expression}' does not parse: {reason}")]
    Unparsable { expression: String, reason: String },

    #[error("expression references unknown root '{name}'; attributes are rooted at 'event'")]
    UnknownRoot { name: String },

    #[error("undefined attribute '{path}'")]
    UndefinedAttribute { path: String },

    #[error("operator '{operator}' has no overload for {lhs} and {rhs}")]
    MismatchedOperands {
        operator: &'static str,
        lhs: &'static str,
        rhs: &'static str,
    },

    #[error("expected a boolean, got {actual}")]
    NotBoolean { actual: &'static str },
}

impl From<&ExpressionError> for EvaluationError {
    fn from(error: &ExpressionError) -> Self {
        EvaluationError::Unparsable {
            expression: error.expression.clone(),
            reason: error.reason.clone(),
        }
    }
}

/// Failure to produce a route decision for an event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("no subscription registered for topic '{topic}'")]
    NoSubscription { topic: String },
}
