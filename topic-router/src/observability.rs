//! Event and field naming tables for structured tracing output.
//!
//! Library code emits `tracing` events referencing these constants and never
//! installs a global subscriber; binaries and tests own one-time
//! `tracing_subscriber` initialization at process boundaries.

pub mod events {
    pub const SUBSCRIPTION_REGISTERED: &str = "subscription_registered";
    pub const SUBSCRIPTION_REJECTED: &str = "subscription_rejected";
    pub const SUBSCRIPTION_SUPERSEDED: &str = "subscription_superseded";
    pub const DECLARATION_WARNING: &str = "declaration_warning";
    pub const RULE_EVALUATION_FAILED: &str = "rule_evaluation_failed";
    pub const ROUTE_RESOLVED: &str = "route_resolved";
    pub const ROUTE_NO_MATCH: &str = "route_no_match";
    pub const TOPIC_NOT_SUBSCRIBED: &str = "topic_not_subscribed";
}

pub mod fields {
    use crate::declaration::Subscription;

    /// Renders a subscription's identity as `pubsub/topic` for log fields.
    pub fn format_subscription(subscription: &Subscription) -> String {
        format!(
            "{}/{}",
            subscription.pubsub_name(),
            subscription.topic()
        )
    }
}
