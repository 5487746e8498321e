/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! # topic-router
//!
//! `topic-router` implements the topic-subscription routing engine of a
//! publish/subscribe broker integration layer: given declared subscriptions
//! to a topic, each carrying an ordered list of conditional routing rules
//! and an optional default route, it decides for every inbound event which
//! single application route receives it.
//!
//! Typical usage is API-first and remains centered on [`TopicRouter`],
//! [`Event`], and [`RouteDecision`]. Internal modules are organized by
//! domain layer to keep behavior ownership explicit. Delivering an event
//! over a wire is the transport collaborator's job; this crate only decides
//! where it should go.
//!
//! ## Programmatic Registration Mode
//!
//! ```
//! use std::sync::Arc;
//! use topic_router::{Event, RouteDecision, SubscriptionDeclaration, SubscriptionRegistryBuilder, TopicRouter};
//!
//! let declaration = SubscriptionDeclaration::new("mypub", "orders")
//!     .with_rule(r#"event.topic == "orders""#, "/orders/matched")
//!     .with_default_route("/orders");
//!
//! let mut builder = SubscriptionRegistryBuilder::new();
//! builder.register(&declaration).unwrap();
//! let router = TopicRouter::new(Arc::new(builder.build()));
//!
//! let decision = router.route(&Event::new("orders")).unwrap();
//! assert_eq!(
//!     decision,
//!     RouteDecision::Deliver { route: "/orders/matched".to_string() }
//! );
//! ```
//!
//! ## Static Configuration Mode
//!
//! ```
//! use std::sync::Arc;
//! use subscription_static_file::SubscriptionStaticFile;
//! use topic_router::{Event, SubscriptionSource, TopicRouter};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let source: Arc<dyn SubscriptionSource> = Arc::new(SubscriptionStaticFile::new(
//!     "../utils/subscription-static-file/static-configs/testdata.json".to_string(),
//! ));
//!
//! let (router, report) = TopicRouter::from_source(source).unwrap();
//! assert!(report.rejected.is_empty());
//!
//! let decision = router.route(&Event::new("a")).unwrap();
//! assert_eq!(decision.route(), Some("/123"));
//! # });
//! ```
//!
//! ## Routing contract
//!
//! Within one subscription, rules evaluate in declaration order and the
//! first `true` expression wins; the subscription's own default route sits
//! behind its rules as a trailing unconditional entry. When several
//! declarations name the same topic, the most recently registered one
//! supersedes the earlier ones (the registry warns). Exhausting a chain
//! without a match is the normal [`RouteDecision::NoMatch`] outcome, while a
//! completely unsubscribed topic is [`RouteError::NoSubscription`].
//!
//! ```
//! use std::sync::Arc;
//! use topic_router::{Event, RouteDecision, SubscriptionDeclaration, SubscriptionRegistryBuilder, TopicRouter};
//!
//! let mut builder = SubscriptionRegistryBuilder::new();
//! builder.register(
//!     &SubscriptionDeclaration::new("mypub", "c")
//!         .with_rule(r#"event.topic == "c""#, "/123"),
//! ).unwrap();
//! // Same topic declared again: the later declaration supersedes.
//! let warnings = builder.register(
//!     &SubscriptionDeclaration::new("mypub", "c").with_default_route("/a/b/c/d"),
//! ).unwrap();
//! assert_eq!(warnings.len(), 1);
//!
//! let router = TopicRouter::new(Arc::new(builder.build()));
//! let decision = router.route(&Event::new("c")).unwrap();
//! assert_eq!(decision, RouteDecision::Deliver { route: "/a/b/c/d".to_string() });
//!
//! assert!(router.route(&Event::new("unknown")).is_err());
//! ```
//!
//! ## Internal architecture map
//!
//! - API facade: outward `TopicRouter`/`Event`/`RouteDecision` surface
//! - Declaration: boundary records, validation, one-time rule compilation
//! - Routing: topic registry, per-topic rule chains, the dispatch scan
//! - Expression: match-expression AST, parser, and strict evaluator
//! - Runtime: bootstrap bridge for async declaration sources
//!
//! ## Observability model
//!
//! The workspace uses `tracing` for logs/events. Library code emits
//! events/spans and does not unconditionally initialize a global subscriber.
//! Binaries and tests are responsible for one-time `tracing_subscriber`
//! initialization at process boundaries.

mod api;
pub use api::decision::RouteDecision;
pub use api::event::Event;
pub use api::router::TopicRouter;

mod declaration;
pub use declaration::{
    DeclarationWarning, RoutesDeclaration, Rule, RuleDeclaration, Subscription,
    SubscriptionDeclaration, SubscriptionSource,
};

mod error;
pub use error::{ConfigurationError, EvaluationError, ExpressionError, RouteError};

mod expression;
pub use expression::MatchExpression;

#[doc(hidden)]
pub mod observability;

mod routing;
pub use routing::{
    ChainEntry, ChainOrigin, RegistryBuildReport, RejectedDeclaration, RuleChain,
    SubscriptionRegistry, SubscriptionRegistryBuilder, TopicRules,
};

mod runtime;
