/*
 * Copyright 2016-2019 Ben Ashford
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

//! Implementation of the Aliases API
//!
//! See: https://www.elastic.co/guide/en/elasticsearch/reference/current/indices-aliases.html

use reqwest::StatusCode;

use serde::Serialize;

use crate::error::EsError;
use crate::{Client, EsResponse};

use super::GenericResult;

/// A single add/remove action, serialized in the `{"add": {...}}` form the
/// `_aliases` endpoint expects
#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AliasAction {
    Add { index: String, alias: String },
    Remove { index: String, alias: String },
}

impl AliasAction {
    pub fn add(index: &str, alias: &str) -> Self {
        AliasAction::Add {
            index: index.to_owned(),
            alias: alias.to_owned(),
        }
    }

    pub fn remove(index: &str, alias: &str) -> Self {
        AliasAction::Remove {
            index: index.to_owned(),
            alias: alias.to_owned(),
        }
    }
}

#[derive(Serialize)]
struct AliasesBody<'b> {
    actions: &'b [AliasAction],
}

/// An operation updating one or more aliases atomically
pub struct AliasesOperation<'a, 'b> {
    /// The HTTP client
    client: &'a mut Client,

    /// The actions to apply, in order
    actions: &'b [AliasAction],
}

impl<'a, 'b> AliasesOperation<'a, 'b> {
    pub fn new(client: &'a mut Client, actions: &'b [AliasAction]) -> Self {
        AliasesOperation { client, actions }
    }

    pub fn send(&'b mut self) -> Result<GenericResult, EsError> {
        let body = AliasesBody {
            actions: self.actions,
        };
        let response = self.client.post_body_op("/_aliases", &body)?;

        match response.status_code() {
            StatusCode::OK => Ok(response.read_response()?),
            status_code => Err(EsError::EsError(format!(
                "Unexpected status: {}",
                status_code
            ))),
        }
    }
}

impl Client {
    /// Apply a batch of alias add/remove actions in one call
    pub fn aliases<'a, 'b>(&'a mut self, actions: &'b [AliasAction]) -> AliasesOperation<'a, 'b> {
        AliasesOperation::new(self, actions)
    }
}
