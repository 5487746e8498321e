//! Route decision returned to the transport collaborator.

/// Outcome of routing one event.
///
/// `NoMatch` is a normal outcome, not an error: every rule in the topic's
/// chain evaluated false and no default route was declared, so the event is
/// simply not delivered on this path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Deliver the event to this application route.
    Deliver { route: String },
    /// No rule matched; do not deliver.
    NoMatch,
}

impl RouteDecision {
    /// The chosen route, if any.
    pub fn route(&self) -> Option<&str> {
        match self {
            RouteDecision::Deliver { route } => Some(route),
            RouteDecision::NoMatch => None,
        }
    }
}
