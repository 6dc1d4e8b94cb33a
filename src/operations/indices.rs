/*
 * Copyright 2015-2019 Ben Ashford
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

//! Index lifecycle operations: existence checks, creation and deletion
//!
//! See: https://www.elastic.co/guide/en/elasticsearch/reference/current/indices.html

use reqwest::StatusCode;

use serde_json::Value;

use crate::error::EsError;
use crate::{Client, EsResponse};

use super::GenericResult;

/// An operation to create an index, optionally with settings
pub struct CreateIndexOperation<'a, 'b> {
    /// The HTTP client
    client: &'a mut Client,

    /// The index to be created
    index: &'b str,

    /// Optional index settings, sent verbatim as the request body
    settings: Option<&'b Value>,
}

impl<'a, 'b> CreateIndexOperation<'a, 'b> {
    pub fn new(client: &'a mut Client, index: &'b str) -> Self {
        CreateIndexOperation {
            client,
            index,
            settings: None,
        }
    }

    pub fn with_settings(&'b mut self, settings: &'b Value) -> &'b mut Self {
        self.settings = Some(settings);
        self
    }

    pub fn send(&'b mut self) -> Result<GenericResult, EsError> {
        let url = format!("/{}", self.index);
        let response = match self.settings {
            Some(settings) => self.client.put_body_op(&url, settings)?,
            None => self.client.put_op(&url)?,
        };

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
    /// Test whether the given index exists, with a `HEAD` request
    ///
    /// See: https://www.elastic.co/guide/en/elasticsearch/reference/current/indices-exists.html
    pub fn index_exists(&mut self, index: &str) -> Result<bool, EsError> {
        let url = format!("/{}", index);
        let response = self.head_op(&url)?;

        match response.status_code() {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status_code => Err(EsError::EsError(format!(
                "Unexpected status: {}",
                status_code
            ))),
        }
    }

    /// Create the given index
    ///
    /// See: https://www.elastic.co/guide/en/elasticsearch/reference/current/indices-create-index.html
    pub fn create_index<'a, 'b>(&'a mut self, index: &'b str) -> CreateIndexOperation<'a, 'b> {
        CreateIndexOperation::new(self, index)
    }

    /// Delete the given index.  Deleting an index that does not exist is an
    /// error.
    ///
    /// See: https://www.elastic.co/guide/en/elasticsearch/reference/current/indices-delete-index.html
    pub fn delete_index(&mut self, index: &str) -> Result<GenericResult, EsError> {
        let url = format!("/{}", index);
        let response = self.delete_op(&url)?;

        match response.status_code() {
            StatusCode::OK => Ok(response.read_response()?),
            status_code => Err(EsError::EsError(format!(
                "Unexpected status: {}",
                status_code
            ))),
        }
    }
}

#[cfg(test)]
pub mod tests {
    use crate::tests::{clean_db, make_client, TestDocument};

    #[test]
    #[ignore = "requires a running ElasticSearch"]
    fn test_create_and_delete_index() {
        let index_name = "test_create_and_delete_index";
        let mut client = make_client();

        clean_db(&mut client, index_name);
        {
            let result = client.create_index(index_name).send();
            assert!(result.unwrap().acknowledged);
        }
        {
            let result = client.delete_index(index_name);
            log::info!("DELETE INDEX RESULT: {:?}", result);
            assert!(result.unwrap().acknowledged);
        }
    }

    #[test]
    #[ignore = "requires a running ElasticSearch"]
    fn test_create_index_with_settings() {
        let index_name = "test_create_index_with_settings";
        let mut client = make_client();

        clean_db(&mut client, index_name);

        let settings = serde_json::json!({
            "settings": {
                "number_of_shards": 1,
                "number_of_replicas": 0
            }
        });
        let result = client
            .create_index(index_name)
            .with_settings(&settings)
            .send();
        assert!(result.unwrap().acknowledged);
    }

    #[test]
    #[ignore = "requires a running ElasticSearch"]
    fn test_index_exists() {
        let index_name = "test_index_exists";
        let mut client = make_client();

        clean_db(&mut client, index_name);
        assert!(!client.index_exists(index_name).unwrap());

        let result = client
            .index(index_name, "test_type")
            .with_doc(&TestDocument::new().with_int_field(1))
            .send();
        assert!(result.is_ok());

        assert!(client.index_exists(index_name).unwrap());
    }
}
