//! Per-topic ordered rule chain.

use std::fmt;

use crate::declaration::Subscription;
use crate::expression::MatchExpression;

/// The ordered evaluation sequence one topic resolves to: the owning
/// subscription's rules in declaration order, then its default route (when
/// declared) as a trailing unconditional entry.
#[derive(Debug, Clone)]
pub struct RuleChain {
    entries: Vec<ChainEntry>,
}

/// One link in a [`RuleChain`].
#[derive(Debug, Clone)]
pub struct ChainEntry {
    match_expression: Option<MatchExpression>,
    route: String,
    origin: ChainOrigin,
}

/// Where a chain entry came from, for observability output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainOrigin {
    /// The declaration's rule at this position.
    Rule { position: usize },
    /// The declaration's unconditional default route.
    DefaultRoute,
}

impl RuleChain {
    pub(crate) fn from_subscription(subscription: &Subscription) -> Self {
        let mut entries: Vec<ChainEntry> = subscription
            .rules()
            .iter()
            .enumerate()
            .map(|(position, rule)| ChainEntry {
                match_expression: rule.match_expression().cloned(),
                route: rule.route().to_string(),
                origin: ChainOrigin::Rule { position },
            })
            .collect();

        if let Some(route) = subscription.default_route() {
            entries.push(ChainEntry {
                match_expression: None,
                route: route.to_string(),
                origin: ChainOrigin::DefaultRoute,
            });
        }

        Self { entries }
    }

    pub fn entries(&self) -> &[ChainEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl ChainEntry {
    pub fn match_expression(&self) -> Option<&MatchExpression> {
        self.match_expression.as_ref()
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    pub fn origin(&self) -> ChainOrigin {
        self.origin
    }
}

impl fmt::Display for ChainOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainOrigin::Rule { position } => write!(f, "rule[{position}]"),
            ChainOrigin::DefaultRoute => write!(f, "default"),
        }
    }
}
