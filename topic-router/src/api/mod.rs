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

//! API facade layer.
//!
//! Keeps outward usage router-centric: collaborators hand the engine an
//! [`Event`](crate::Event) and receive a
//! [`RouteDecision`](crate::RouteDecision); everything about delivering the
//! event over a wire stays with the transport collaborator.
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

pub mod decision;
pub mod event;
pub mod router;
