//! Boundary records for subscription declarations.
//!
//! Field names mirror the wire shape brokers commonly emit for programmatic
//! subscriptions: a `pubsubname`, a `topic`, an optional legacy `route`, and
//! an optional `routes` block of ordered rules plus a default.

use serde::{Deserialize, Serialize};

/// One declared subscription, as received from configuration or a runtime
/// registration call. Not yet validated.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SubscriptionDeclaration {
    #[serde(rename = "pubsubname")]
    pub pubsub_name: String,
    pub topic: String,
    /// Legacy single unconditional route.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routes: Option<RoutesDeclaration>,
}

/// Ordered conditional rules plus an optional default route.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RoutesDeclaration {
    #[serde(default)]
    pub rules: Vec<RuleDeclaration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

/// One (match expression, route path) pair.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RuleDeclaration {
    #[serde(rename = "match")]
    pub match_expression: String,
    pub path: String,
}

impl SubscriptionDeclaration {
    /// Starts a programmatic declaration for `topic` on `pubsub_name`.
    pub fn new(pubsub_name: &str, topic: &str) -> Self {
        Self {
            pubsub_name: pubsub_name.to_string(),
            topic: topic.to_string(),
            route: None,
            routes: None,
        }
    }

    /// Appends one conditional rule, preserving declaration order.
    pub fn with_rule(mut self, match_expression: &str, path: &str) -> Self {
        self.routes
            .get_or_insert_with(RoutesDeclaration::default)
            .rules
            .push(RuleDeclaration {
                match_expression: match_expression.to_string(),
                path: path.to_string(),
            });
        self
    }

    /// Sets the unconditional default route.
    pub fn with_default_route(mut self, route: &str) -> Self {
        self.route = Some(route.to_string());
        self
    }

    /// The effective default route: `routes.default` wins over the legacy
    /// top-level `route`.
    pub fn default_route(&self) -> Option<&str> {
        self.routes
            .as_ref()
            .and_then(|routes| routes.default.as_deref())
            .or(self.route.as_deref())
    }

    /// The declared conditional rules, in order.
    pub fn rules(&self) -> &[RuleDeclaration] {
        self.routes
            .as_ref()
            .map(|routes| routes.rules.as_slice())
            .unwrap_or_default()
    }
}
