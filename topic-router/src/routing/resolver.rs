//! Dispatch-time scan from event to route decision.

use tracing::{debug, warn};

use crate::api::decision::RouteDecision;
use crate::api::event::Event;
use crate::error::RouteError;
use crate::observability::{events, fields};
use crate::routing::registry::SubscriptionRegistry;

const COMPONENT: &str = "route_resolver";

/// Resolves one event against a read-only registry.
pub(crate) struct RouteResolver;

impl RouteResolver {
    /// Walks the topic's rule chain in order and returns the first match.
    ///
    /// A rule whose expression fails to evaluate is warned about and treated
    /// as non-matching; later rules still get their chance. Exhausting the
    /// chain is a normal [`RouteDecision::NoMatch`].
    pub(crate) fn resolve(
        registry: &SubscriptionRegistry,
        event: &Event,
    ) -> Result<RouteDecision, RouteError> {
        let Some(topic_rules) = registry.rules_for(event.topic()) else {
            warn!(
                event = events::TOPIC_NOT_SUBSCRIBED,
                component = COMPONENT,
                topic = event.topic(),
                "no subscription registered for published topic"
            );
            return Err(RouteError::NoSubscription {
                topic: event.topic().to_string(),
            });
        };

        let subscription = topic_rules.subscription();

        for entry in topic_rules.chain().entries() {
            let matched = match entry.match_expression() {
                None => true,
                Some(expression) => match expression.evaluate(event) {
                    Ok(matched) => matched,
                    Err(error) => {
                        warn!(
                            event = events::RULE_EVALUATION_FAILED,
                            component = COMPONENT,
                            subscription = %fields::format_subscription(subscription),
                            origin = %entry.origin(),
                            expression = expression.source(),
                            err = %error,
                            "treating rule as non-matching after evaluation failure"
                        );
                        false
                    }
                },
            };

            if matched {
                debug!(
                    event = events::ROUTE_RESOLVED,
                    component = COMPONENT,
                    subscription = %fields::format_subscription(subscription),
                    origin = %entry.origin(),
                    route = entry.route(),
                    "route resolved"
                );
                return Ok(RouteDecision::Deliver {
                    route: entry.route().to_string(),
                });
            }
        }

        debug!(
            event = events::ROUTE_NO_MATCH,
            component = COMPONENT,
            subscription = %fields::format_subscription(subscription),
            topic = event.topic(),
            "no rule matched and no default route declared"
        );
        Ok(RouteDecision::NoMatch)
    }
}
