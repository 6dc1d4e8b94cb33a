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

//! Implementation of the Put Mapping API
//!
//! The mapping itself is an arbitrary `serde_json::Value`, this library does
//! not model field types.

use reqwest::StatusCode;

use serde_json::Value;

use crate::error::EsError;
use crate::{Client, EsResponse};

use super::GenericResult;

impl Client {
    /// Put the mapping for a doc type in the given index
    ///
    /// See: https://www.elastic.co/guide/en/elasticsearch/reference/current/indices-put-mapping.html
    pub fn put_mapping(
        &mut self,
        index: &str,
        doc_type: &str,
        mapping: &Value,
    ) -> Result<GenericResult, EsError> {
        let url = format!("/{}/_mapping/{}", index, doc_type);
        let response = self.put_body_op(&url, mapping)?;

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
    use crate::tests::{clean_db, make_client};

    #[test]
    #[ignore = "requires a running ElasticSearch"]
    fn test_put_mapping() {
        let index_name = "test_put_mapping";
        let mut client = make_client();

        clean_db(&mut client, index_name);
        let _ = client.create_index(index_name).send().unwrap();

        let mapping = serde_json::json!({
            "post": {
                "properties": {
                    "created_at": {
                        "type": "date",
                        "format": "date_time"
                    },
                    "title": {
                        "type": "string",
                        "index": "not_analyzed"
                    }
                }
            }
        });

        let result = client.put_mapping(index_name, "post", &mapping);
        assert!(result.unwrap().acknowledged);
    }
}
