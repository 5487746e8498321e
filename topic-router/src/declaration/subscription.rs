//! Validated, immutable subscriptions and their compiled rules.

use std::collections::HashMap;
use std::fmt;

use crate::declaration::record::SubscriptionDeclaration;
use crate::error::ConfigurationError;
use crate::expression::MatchExpression;

/// One compiled routing rule: an optional match expression and a route.
///
/// A rule without an expression is unconditional; it arises from an
/// empty/whitespace match string.
#[derive(Debug, Clone)]
pub struct Rule {
    match_expression: Option<MatchExpression>,
    route: String,
}

impl Rule {
    pub fn match_expression(&self) -> Option<&MatchExpression> {
        self.match_expression.as_ref()
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    pub fn is_unconditional(&self) -> bool {
        self.match_expression.is_none()
    }
}

/// Non-fatal findings surfaced to the caller while compiling a declaration
/// or registering it. None of these reject the declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclarationWarning {
    /// A later rule repeats an earlier rule's expression; the first wins per
    /// evaluation order, the later one is unreachable.
    DuplicateRuleExpression {
        topic: String,
        expression: String,
        first_position: usize,
        duplicate_position: usize,
    },
    /// A rule's match expression does not parse; the rule fails open (never
    /// matches) at dispatch.
    UnparsableExpression {
        topic: String,
        expression: String,
        reason: String,
    },
    /// A later declaration for the same topic superseded this one.
    SupersededSubscription {
        topic: String,
        superseded_pubsub: String,
    },
}

impl fmt::Display for DeclarationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclarationWarning::DuplicateRuleExpression {
                topic,
                expression,
                first_position,
                duplicate_position,
            } => write!(
                f,
                "rule {duplicate_position} on topic '{topic}' repeats expression '{expression}' of rule {first_position} and is unreachable"
            ),
            DeclarationWarning::UnparsableExpression {
                topic,
                expression,
                reason,
            } => write!(
                f,
                "rule expression '{expression}' on topic '{topic}' does not parse ({reason}); the rule will never match"
            ),
            DeclarationWarning::SupersededSubscription {
                topic,
                superseded_pubsub,
            } => write!(
                f,
                "subscription '{superseded_pubsub}/{topic}' was superseded by a later declaration for the same topic"
            ),
        }
    }
}

/// A validated subscription declaration: topic, pubsub component name,
/// compiled ordered rules, and an optional unconditional default route.
///
/// Immutable after construction; destroyed at process shutdown.
#[derive(Debug, Clone)]
pub struct Subscription {
    pubsub_name: String,
    topic: String,
    rules: Vec<Rule>,
    default_route: Option<String>,
}

impl Subscription {
    /// Validates and compiles one declaration.
    ///
    /// Fails with [`ConfigurationError`] on an empty topic or an empty route;
    /// non-destructive oddities (duplicate expressions, unparsable
    /// expressions) come back as warnings alongside the subscription.
    pub fn from_declaration(
        declaration: &SubscriptionDeclaration,
    ) -> Result<(Self, Vec<DeclarationWarning>), ConfigurationError> {
        let topic = declaration.topic.trim();
        if topic.is_empty() {
            return Err(ConfigurationError::EmptyTopic {
                pubsub_name: declaration.pubsub_name.clone(),
            });
        }

        let default_route = match declaration.default_route() {
            Some(route) if route.trim().is_empty() => {
                return Err(ConfigurationError::EmptyDefaultRoute {
                    topic: topic.to_string(),
                })
            }
            Some(route) => Some(route.to_string()),
            None => None,
        };

        let mut warnings = Vec::new();
        let mut rules = Vec::with_capacity(declaration.rules().len());
        let mut seen_expressions: HashMap<String, usize> = HashMap::new();

        for (position, rule) in declaration.rules().iter().enumerate() {
            if rule.path.trim().is_empty() {
                return Err(ConfigurationError::EmptyRuleRoute {
                    topic: topic.to_string(),
                    position,
                });
            }

            let source = rule.match_expression.trim();
            if let Some(&first_position) = seen_expressions.get(source) {
                warnings.push(DeclarationWarning::DuplicateRuleExpression {
                    topic: topic.to_string(),
                    expression: source.to_string(),
                    first_position,
                    duplicate_position: position,
                });
            } else {
                seen_expressions.insert(source.to_string(), position);
            }

            let match_expression = if source.is_empty() {
                // An empty expression is an unconditional rule, not an
                // evaluation target.
                None
            } else {
                let (expression, parse_failure) = MatchExpression::parse_lenient(source);
                if let Some(failure) = parse_failure {
                    warnings.push(DeclarationWarning::UnparsableExpression {
                        topic: topic.to_string(),
                        expression: failure.expression,
                        reason: failure.reason,
                    });
                }
                Some(expression)
            };

            rules.push(Rule {
                match_expression,
                route: rule.path.to_string(),
            });
        }

        Ok((
            Self {
                pubsub_name: declaration.pubsub_name.clone(),
                topic: topic.to_string(),
                rules,
                default_route,
            },
            warnings,
        ))
    }

    pub fn pubsub_name(&self) -> &str {
        &self.pubsub_name
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// The compiled conditional rules, in declaration order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn default_route(&self) -> Option<&str> {
        self.default_route.as_deref()
    }
}
