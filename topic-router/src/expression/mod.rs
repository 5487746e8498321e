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

//! Match-expression layer.
//!
//! Owns the boolean expression language rules are conditioned on: the AST,
//! the parser, and the evaluator. Expressions are compiled once when a
//! subscription is constructed and evaluated read-only per dispatch, so no
//! text is re-parsed on the hot path.
//!
//! ```
//! use topic_router::{Event, MatchExpression};
//!
//! let expression = MatchExpression::parse(r#"event.topic == "orders""#).unwrap();
//! assert!(expression.evaluate(&Event::new("orders")).unwrap());
//! assert!(!expression.evaluate(&Event::new("billing")).unwrap());
//! ```

pub(crate) mod ast;
pub(crate) mod eval;
pub(crate) mod parser;

use crate::api::event::Event;
use crate::error::{EvaluationError, ExpressionError};
use ast::Expr;

/// A compiled boolean match expression over an event's attributes.
#[derive(Debug, Clone)]
pub struct MatchExpression {
    source: String,
    compiled: CompiledMatch,
}

#[derive(Debug, Clone)]
enum CompiledMatch {
    Parsed(Expr),
    /// Kept so a bad rule fails open at dispatch instead of poisoning the
    /// declaration it arrived in.
    Invalid(ExpressionError),
}

impl MatchExpression {
    /// Compiles `source`, rejecting expressions that do not parse.
    pub fn parse(source: &str) -> Result<Self, ExpressionError> {
        let expr = parser::parse_expression(source)?;
        Ok(Self {
            source: source.to_string(),
            compiled: CompiledMatch::Parsed(expr),
        })
    }

    /// Compiles `source`, retaining a parse failure as a poisoned match that
    /// reports it as an [`EvaluationError`] on every evaluation.
    pub(crate) fn parse_lenient(source: &str) -> (Self, Option<ExpressionError>) {
        match parser::parse_expression(source) {
            Ok(expr) => (
                Self {
                    source: source.to_string(),
                    compiled: CompiledMatch::Parsed(expr),
                },
                None,
            ),
            Err(error) => (
                Self {
                    source: source.to_string(),
                    compiled: CompiledMatch::Invalid(error.clone()),
                },
                Some(error),
            ),
        }
    }

    /// Evaluates the expression against one event.
    pub fn evaluate(&self, event: &Event) -> Result<bool, EvaluationError> {
        match &self.compiled {
            CompiledMatch::Parsed(expr) => eval::evaluate(expr, event),
            CompiledMatch::Invalid(error) => Err(EvaluationError::from(error)),
        }
    }

    /// The expression text as declared.
    pub fn source(&self) -> &str {
        &self.source
    }
}
