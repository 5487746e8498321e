//! Outward router facade over the registry and the resolver.

use std::sync::Arc;

use tracing::debug;

use crate::api::decision::RouteDecision;
use crate::api::event::Event;
use crate::declaration::SubscriptionSource;
use crate::error::{ConfigurationError, RouteError};
use crate::routing::registry::{RegistryBuildReport, SubscriptionRegistry};
use crate::routing::resolver::RouteResolver;
use crate::routing::SubscriptionRegistryBuilder;
use crate::runtime::declaration_runtime::fetch_declarations;

/// The routing engine handle collaborators call per inbound event.
///
/// Holds a shared read-only [`SubscriptionRegistry`]; `route` is reentrant
/// and free of shared mutable state, so one router may serve concurrent
/// deliveries.
#[derive(Clone)]
pub struct TopicRouter {
    registry: Arc<SubscriptionRegistry>,
}

impl TopicRouter {
    /// Wraps an already-built registry.
    pub fn new(registry: Arc<SubscriptionRegistry>) -> Self {
        debug!(
            topics = registry.topic_count(),
            "topic router created over registry"
        );
        Self { registry }
    }

    /// Bootstraps a router from a declaration source.
    ///
    /// Fetches once, registers every declaration through the common
    /// construction path, and reports rejections/warnings so misdeclared
    /// subscriptions surface at startup.
    pub fn from_source(
        source: Arc<dyn SubscriptionSource>,
    ) -> Result<(Self, RegistryBuildReport), ConfigurationError> {
        let declarations = fetch_declarations(source)?;

        let mut builder = SubscriptionRegistryBuilder::new();
        let report = builder.register_all(declarations);

        Ok((Self::new(Arc::new(builder.build())), report))
    }

    /// Decides which route receives `event`.
    pub fn route(&self, event: &Event) -> Result<RouteDecision, RouteError> {
        RouteResolver::resolve(&self.registry, event)
    }

    pub fn registry(&self) -> &SubscriptionRegistry {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::TopicRouter;
    use crate::api::decision::RouteDecision;
    use crate::api::event::Event;
    use crate::declaration::{SubscriptionDeclaration, SubscriptionSource};
    use crate::error::ConfigurationError;
    use crate::routing::SubscriptionRegistryBuilder;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct StaticDeclarations(Vec<SubscriptionDeclaration>);

    #[async_trait]
    impl SubscriptionSource for StaticDeclarations {
        async fn fetch_declarations(
            &self,
        ) -> Result<Vec<SubscriptionDeclaration>, ConfigurationError> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl SubscriptionSource for FailingSource {
        async fn fetch_declarations(
            &self,
        ) -> Result<Vec<SubscriptionDeclaration>, ConfigurationError> {
            Err(ConfigurationError::Source("backend unavailable".to_string()))
        }
    }

    #[test]
    fn routes_through_prebuilt_registry() {
        let mut builder = SubscriptionRegistryBuilder::new();
        builder
            .register(
                &SubscriptionDeclaration::new("mypub", "orders").with_default_route("/orders"),
            )
            .unwrap();
        let router = TopicRouter::new(Arc::new(builder.build()));

        let decision = router.route(&Event::new("orders")).unwrap();
        assert_eq!(
            decision,
            RouteDecision::Deliver {
                route: "/orders".to_string()
            }
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn bootstraps_from_source_and_reports() {
        let source: Arc<dyn SubscriptionSource> = Arc::new(StaticDeclarations(vec![
            SubscriptionDeclaration::new("mypub", "orders").with_default_route("/orders"),
            SubscriptionDeclaration::new("mypub", "").with_default_route("/broken"),
        ]));

        let (router, report) = TopicRouter::from_source(source).unwrap();

        assert_eq!(report.registered, 1);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(router.registry().topic_count(), 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn source_failure_surfaces_as_configuration_error() {
        let source: Arc<dyn SubscriptionSource> = Arc::new(FailingSource);
        let result = TopicRouter::from_source(source);
        assert!(matches!(result, Err(ConfigurationError::Source(_))));
    }
}
