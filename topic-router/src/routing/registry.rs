//! Topic-keyed subscription registry and its builder.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::declaration::{DeclarationWarning, Subscription, SubscriptionDeclaration};
use crate::error::ConfigurationError;
use crate::observability::{events, fields};
use crate::routing::rule_chain::RuleChain;

const COMPONENT: &str = "subscription_registry";

/// Accumulates validated subscriptions during startup registration.
///
/// Declarations for the same topic replace each other: the most recently
/// registered one wins and the caller is warned. Rejected declarations never
/// enter the registry; the rest of a batch proceeds.
#[derive(Default)]
pub struct SubscriptionRegistryBuilder {
    topics: HashMap<String, TopicEntry>,
}

/// Immutable topic-to-subscription lookup handed to every router.
///
/// Built once, single-threaded, then shared read-only; concurrent routing
/// calls need no synchronization.
#[derive(Debug)]
pub struct SubscriptionRegistry {
    topics: HashMap<String, TopicEntry>,
}

#[derive(Debug)]
struct TopicEntry {
    subscription: Subscription,
    chain: RuleChain,
}

/// The merged, ordered rule view one topic resolves to.
#[derive(Debug, Clone, Copy)]
pub struct TopicRules<'a> {
    subscription: &'a Subscription,
    chain: &'a RuleChain,
}

impl<'a> TopicRules<'a> {
    /// The subscription owning every entry in the chain.
    pub fn subscription(&self) -> &'a Subscription {
        self.subscription
    }

    pub fn chain(&self) -> &'a RuleChain {
        self.chain
    }
}

/// Outcome summary of registering a batch of declarations.
#[derive(Debug, Default)]
pub struct RegistryBuildReport {
    pub registered: usize,
    pub rejected: Vec<RejectedDeclaration>,
    pub warnings: Vec<DeclarationWarning>,
}

/// One declaration that failed validation, with the error that rejected it.
#[derive(Debug)]
pub struct RejectedDeclaration {
    pub pubsub_name: String,
    pub topic: String,
    pub error: ConfigurationError,
}

impl SubscriptionRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and registers one declaration, returning the caller-visible
    /// warnings it produced.
    pub fn register(
        &mut self,
        declaration: &SubscriptionDeclaration,
    ) -> Result<Vec<DeclarationWarning>, ConfigurationError> {
        let (subscription, mut warnings) = match Subscription::from_declaration(declaration) {
            Ok(compiled) => compiled,
            Err(error) => {
                warn!(
                    event = events::SUBSCRIPTION_REJECTED,
                    component = COMPONENT,
                    pubsub = declaration.pubsub_name.as_str(),
                    topic = declaration.topic.as_str(),
                    err = %error,
                    "rejecting subscription declaration"
                );
                return Err(error);
            }
        };

        for warning in &warnings {
            warn!(
                event = events::DECLARATION_WARNING,
                component = COMPONENT,
                subscription = %fields::format_subscription(&subscription),
                warning = %warning,
                "declaration registered with warning"
            );
        }

        let chain = RuleChain::from_subscription(&subscription);
        let topic = subscription.topic().to_string();

        debug!(
            event = events::SUBSCRIPTION_REGISTERED,
            component = COMPONENT,
            subscription = %fields::format_subscription(&subscription),
            rules = subscription.rules().len(),
            has_default = subscription.default_route().is_some(),
            "subscription registered"
        );

        if let Some(previous) = self.topics.insert(
            topic.clone(),
            TopicEntry {
                subscription,
                chain,
            },
        ) {
            let superseded = DeclarationWarning::SupersededSubscription {
                topic,
                superseded_pubsub: previous.subscription.pubsub_name().to_string(),
            };
            warn!(
                event = events::SUBSCRIPTION_SUPERSEDED,
                component = COMPONENT,
                subscription = %fields::format_subscription(&previous.subscription),
                "later declaration supersedes existing subscription for topic"
            );
            warnings.push(superseded);
        }

        Ok(warnings)
    }

    /// Registers a batch, recording rejections instead of aborting on them.
    pub fn register_all<I>(&mut self, declarations: I) -> RegistryBuildReport
    where
        I: IntoIterator<Item = SubscriptionDeclaration>,
    {
        let mut report = RegistryBuildReport::default();

        for declaration in declarations {
            match self.register(&declaration) {
                Ok(warnings) => {
                    report.registered += 1;
                    report.warnings.extend(warnings);
                }
                Err(error) => report.rejected.push(RejectedDeclaration {
                    pubsub_name: declaration.pubsub_name,
                    topic: declaration.topic,
                    error,
                }),
            }
        }

        report
    }

    /// Freezes registration and produces the shared read-only registry.
    pub fn build(self) -> SubscriptionRegistry {
        SubscriptionRegistry {
            topics: self.topics,
        }
    }
}

impl SubscriptionRegistry {
    /// The ordered rule sequence `topic` resolves to, with its owning
    /// subscription; `None` when the topic has no registered subscription.
    pub fn rules_for(&self, topic: &str) -> Option<TopicRules<'_>> {
        self.topics.get(topic).map(|entry| TopicRules {
            subscription: &entry.subscription,
            chain: &entry.chain,
        })
    }

    pub fn topic_count(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::SubscriptionRegistryBuilder;
    use crate::declaration::{DeclarationWarning, SubscriptionDeclaration};

    #[test]
    fn rules_for_unknown_topic_is_none() {
        let registry = SubscriptionRegistryBuilder::new().build();
        assert!(registry.rules_for("orders").is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn later_registration_supersedes_earlier_topic_entry() {
        let mut builder = SubscriptionRegistryBuilder::new();
        builder
            .register(&SubscriptionDeclaration::new("first", "orders").with_default_route("/old"))
            .unwrap();
        let warnings = builder
            .register(&SubscriptionDeclaration::new("second", "orders").with_default_route("/new"))
            .unwrap();

        assert!(matches!(
            warnings.as_slice(),
            [DeclarationWarning::SupersededSubscription { superseded_pubsub, .. }]
                if superseded_pubsub == "first"
        ));

        let registry = builder.build();
        assert_eq!(registry.topic_count(), 1);
        let rules = registry.rules_for("orders").unwrap();
        assert_eq!(rules.subscription().pubsub_name(), "second");
        assert_eq!(rules.chain().entries()[0].route(), "/new");
    }

    #[test]
    fn register_all_records_rejections_and_proceeds() {
        let mut builder = SubscriptionRegistryBuilder::new();
        let report = builder.register_all(vec![
            SubscriptionDeclaration::new("mypub", "").with_default_route("/a"),
            SubscriptionDeclaration::new("mypub", "orders").with_default_route("/orders"),
        ]);

        assert_eq!(report.registered, 1);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].pubsub_name, "mypub");

        let registry = builder.build();
        assert!(registry.rules_for("orders").is_some());
    }

    #[test]
    fn distinct_topics_do_not_interfere() {
        let mut builder = SubscriptionRegistryBuilder::new();
        builder
            .register(&SubscriptionDeclaration::new("mypub", "orders").with_default_route("/o"))
            .unwrap();
        builder
            .register(&SubscriptionDeclaration::new("mypub", "billing").with_default_route("/b"))
            .unwrap();

        let registry = builder.build();
        assert_eq!(registry.topic_count(), 2);
    }
}
