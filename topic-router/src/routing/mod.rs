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

//! Routing layer.
//!
//! Owns the topic-to-subscription registry, the per-topic rule chain a topic
//! resolves to, and the dispatch-time scan that turns an event into a route
//! decision. The registry is built once during startup and read-only
//! afterwards; routing calls share it without synchronization.
//!
//! When several declarations name the same topic, the most recently
//! registered one supersedes the earlier ones (the registry warns). Within
//! the winning declaration the chain is its rules in declared order followed
//! by its own default route as a trailing unconditional rule.

pub mod registry;
pub(crate) mod resolver;
pub mod rule_chain;

pub use registry::{
    RegistryBuildReport, RejectedDeclaration, SubscriptionRegistry, SubscriptionRegistryBuilder,
    TopicRules,
};
pub use rule_chain::{ChainEntry, ChainOrigin, RuleChain};
