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

//! Implementation of the Get API
//!
//! See: https://www.elastic.co/guide/en/elasticsearch/reference/current/docs-get.html

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::EsError;
use crate::{Client, EsResponse};

use super::common::{Options, OptionVal};

/// Values for the `preference` query parameter
pub enum Preference {
    Primary,
    Local,
}

impl From<Preference> for OptionVal {
    fn from(from: Preference) -> OptionVal {
        OptionVal(
            match from {
                Preference::Primary => "_primary",
                Preference::Local => "_local",
            }
            .to_owned(),
        )
    }
}

/// An ES GET operation, to get a document by ID
pub struct GetOperation<'a, 'b> {
    /// The HTTP connection
    client: &'a mut Client,

    /// The index to load the document from
    index: &'b str,

    /// The type of the document, `_all` when unspecified
    doc_type: Option<&'b str>,

    /// The ID of the document
    id: &'b str,

    /// Optional options
    options: Options<'b>,
}

impl<'a, 'b> GetOperation<'a, 'b> {
    pub fn new(client: &'a mut Client, index: &'b str, id: &'b str) -> Self {
        GetOperation {
            client,
            index,
            doc_type: None,
            id,
            options: Options::new(),
        }
    }

    pub fn with_doc_type(&'b mut self, doc_type: &'b str) -> &'b mut Self {
        self.doc_type = Some(doc_type);
        self
    }

    pub fn with_fields(&'b mut self, fields: &[&'b str]) -> &'b mut Self {
        self.options.push("fields", fields.join(","));
        self
    }

    add_option!(with_source, "_source");
    add_option!(with_routing, "routing");
    add_option!(with_preference, "preference");
    add_option!(with_refresh, "refresh");
    add_option!(with_version, "version");

    fn format_url(&self, source_only: bool) -> String {
        let doc_type = self.doc_type.unwrap_or("_all");
        let suffix = if source_only { "/_source" } else { "" };
        format!(
            "/{}/{}/{}{}{}",
            self.index, doc_type, self.id, suffix, self.options
        )
    }

    /// Fetch the document with its metadata
    pub fn send<T>(&'b mut self) -> Result<GetResult<T>, EsError>
    where
        T: DeserializeOwned,
    {
        let url = self.format_url(false);
        // We're ignoring status_code as all valid codes should return a value,
        // so anything else is an error.
        let response = self.client.get_op(&url)?;
        Ok(response.read_response()?)
    }

    /// Fetch only the `_source` of the document, without metadata
    pub fn send_source<T>(&'b mut self) -> Result<T, EsError>
    where
        T: DeserializeOwned,
    {
        let url = self.format_url(true);
        let response = self.client.get_op(&url)?;
        Ok(response.read_response()?)
    }
}

impl Client {
    /// Implementation of the ES GET API
    ///
    /// See: https://www.elastic.co/guide/en/elasticsearch/reference/current/docs-get.html
    pub fn get<'a, 'b>(&'a mut self, index: &'b str, id: &'b str) -> GetOperation<'a, 'b> {
        GetOperation::new(self, index, id)
    }
}

/// The result of a GET request
#[derive(Debug, Deserialize)]
pub struct GetResult<T> {
    #[serde(rename = "_index")]
    pub index: String,
    #[serde(rename = "_type")]
    pub doc_type: String,
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_version")]
    pub version: Option<u64>,
    pub found: bool,
    #[serde(rename = "_source")]
    pub source: Option<T>,
}

#[cfg(test)]
pub mod tests {
    use crate::tests::{clean_db, make_client, TestDocument};

    use super::{GetResult, Preference};

    #[test]
    fn test_url() {
        let mut client = make_client();
        let url = client
            .get("test_idx", "test_id")
            .with_doc_type("test_type")
            .format_url(false);
        assert_eq!("/test_idx/test_type/test_id", url);
    }

    #[test]
    fn test_url_defaults_to_all_types() {
        let mut client = make_client();
        let url = client.get("test_idx", "test_id").format_url(false);
        assert_eq!("/test_idx/_all/test_id", url);
    }

    #[test]
    fn test_source_only_url() {
        let mut client = make_client();
        let url = client.get("test_idx", "test_id").format_url(true);
        assert!(url.ends_with("/_source"));
    }

    #[test]
    fn test_url_with_options() {
        let mut client = make_client();
        let url = client
            .get("test_idx", "test_id")
            .with_fields(&["a", "b", "c"])
            .with_preference(Preference::Primary)
            .with_routing("test_routing")
            .with_refresh(true)
            .format_url(false);
        assert_eq!(
            "/test_idx/_all/test_id?fields=a,b,c&preference=_primary&routing=test_routing&refresh=true",
            url
        );
    }

    #[test]
    fn test_result_without_source() {
        let raw = r#"{
            "_index": "test_idx",
            "_type": "test_type",
            "_id": "missing",
            "found": false
        }"#;
        let result: GetResult<TestDocument> = serde_json::from_str(raw).unwrap();
        assert!(!result.found);
        assert!(result.source.is_none());
        assert!(result.version.is_none());
    }

    #[test]
    #[ignore = "requires a running ElasticSearch"]
    fn test_get() {
        let index_name = "test_get";
        let mut client = make_client();

        clean_db(&mut client, index_name);
        {
            let doc = TestDocument::new().with_int_field(3);
            client
                .index(index_name, "test_type")
                .with_doc(&doc)
                .with_id("TEST_GETTING")
                .send()
                .unwrap();
        }
        {
            let result: GetResult<TestDocument> = client
                .get(index_name, "TEST_GETTING")
                .with_doc_type("test_type")
                .send()
                .unwrap();
            assert!(result.found);
            let doc = result.source.unwrap();
            assert_eq!(3, doc.int_field);
        }
    }

    #[test]
    #[ignore = "requires a running ElasticSearch"]
    fn test_get_source_only() {
        let index_name = "test_get_source_only";
        let mut client = make_client();

        clean_db(&mut client, index_name);
        {
            let doc = TestDocument::new().with_str_field("source only");
            client
                .index(index_name, "test_type")
                .with_doc(&doc)
                .with_id("TEST_SOURCE")
                .send()
                .unwrap();
        }
        {
            let doc: TestDocument = client
                .get(index_name, "TEST_SOURCE")
                .with_doc_type("test_type")
                .send_source()
                .unwrap();
            assert_eq!("source only", doc.str_field);
        }
    }
}
