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

//! Static-file subscription source.
//!
//! Reads a JSON array of subscription declarations from disk and serves it
//! through [`SubscriptionSource`], so statically configured deployments feed
//! the same registry construction path as runtime registration. The backend
//! is read-only; the file is parsed once per fetch.

use async_trait::async_trait;
use serde_json::Value;
use std::fs::{self, canonicalize};
use std::path::PathBuf;
use tracing::{debug, error};

use topic_router::{ConfigurationError, SubscriptionDeclaration, SubscriptionSource};

pub struct SubscriptionStaticFile {
    static_file: String,
}

impl SubscriptionStaticFile {
    pub fn new(static_file: String) -> Self {
        Self { static_file }
    }

    fn canonicalized_static_file_path(&self) -> Result<PathBuf, ConfigurationError> {
        let declaration_json_file = PathBuf::from(self.static_file.clone());
        debug!("declaration_json_file: {declaration_json_file:?}");

        canonicalize(declaration_json_file).map_err(|error| {
            ConfigurationError::Source(format!("static declaration file not found: {error:?}"))
        })
    }

    fn read_static_config_json(&self) -> Result<Value, ConfigurationError> {
        let declaration_json_file = self.canonicalized_static_file_path()?;
        let data = fs::read_to_string(declaration_json_file).map_err(|error| {
            ConfigurationError::Source(format!("unable to read file: {error:?}"))
        })?;

        serde_json::from_str(&data).map_err(|error| {
            ConfigurationError::Source(format!("unable to parse JSON: {error:?}"))
        })
    }

    fn parse_static_declarations(&self) -> Result<Vec<SubscriptionDeclaration>, ConfigurationError> {
        let value = self.read_static_config_json()?;
        let Some(entries) = value.as_array() else {
            return Err(ConfigurationError::Source(
                "static declaration file must be a JSON array of subscription declaration objects"
                    .to_string(),
            ));
        };

        let mut declarations = Vec::with_capacity(entries.len());

        for entry in entries {
            match serde_json::from_value::<SubscriptionDeclaration>(entry.clone()) {
                Ok(declaration) => declarations.push(declaration),
                Err(parse_error) => {
                    error!("Error deserializing declaration '{entry}': {parse_error}");
                    continue;
                }
            }
        }

        Ok(declarations)
    }
}

#[async_trait]
impl SubscriptionSource for SubscriptionStaticFile {
    async fn fetch_declarations(&self) -> Result<Vec<SubscriptionDeclaration>, ConfigurationError> {
        self.parse_static_declarations()
    }
}

#[cfg(test)]
mod tests {
    use super::SubscriptionStaticFile;
    use topic_router::{ConfigurationError, SubscriptionSource};

    #[tokio::test]
    async fn loads_testdata_declarations_in_order() {
        let source = SubscriptionStaticFile::new("static-configs/testdata.json".to_string());

        let declarations = source.fetch_declarations().await.unwrap();

        assert_eq!(declarations.len(), 5);
        let topics: Vec<_> = declarations.iter().map(|d| d.topic.as_str()).collect();
        assert_eq!(topics, ["a", "b", "b", "c", "c"]);
        assert_eq!(declarations[0].default_route(), Some("/a/b/c/d"));
        assert_eq!(declarations[0].rules().len(), 1);
    }

    #[tokio::test]
    async fn missing_file_is_a_source_error() {
        let source = SubscriptionStaticFile::new("static-configs/absent.json".to_string());

        let result = source.fetch_declarations().await;
        assert!(matches!(result, Err(ConfigurationError::Source(_))));
    }

    #[tokio::test]
    async fn malformed_entries_are_skipped() {
        let source =
            SubscriptionStaticFile::new("static-configs/testdata-partial.json".to_string());

        let declarations = source.fetch_declarations().await.unwrap();

        // The entry missing its topic is dropped; the valid one survives.
        assert_eq!(declarations.len(), 1);
        assert_eq!(declarations[0].topic, "orders");
    }
}
