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

//! Implementation of the Index API
//!
//! See: https://www.elastic.co/guide/en/elasticsearch/reference/current/docs-index_.html

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EsError;
use crate::{Client, EsResponse};

use super::common::{Options, OptionVal};

/// Values for the op_type option
pub enum OpType {
    Create,
}

impl fmt::Display for OpType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("create")
    }
}

impl From<OpType> for OptionVal {
    fn from(from: OpType) -> OptionVal {
        OptionVal(from.to_string())
    }
}

/// An indexing operation
pub struct IndexOperation<'a, 'b, E: Serialize + 'b> {
    /// The HTTP client that this operation will use
    client: &'a mut Client,

    /// The index into which the document will be added
    index: &'b str,

    /// The type of the document
    doc_type: &'b str,

    /// Optional the ID of the document.  When absent the server assigns one.
    id: Option<&'b str>,

    /// The optional options
    options: Options<'b>,

    /// The document to be indexed
    document: Option<&'b E>,
}

impl<'a, 'b, E: Serialize + 'b> IndexOperation<'a, 'b, E> {
    pub fn new(client: &'a mut Client, index: &'b str, doc_type: &'b str) -> Self {
        IndexOperation {
            client,
            index,
            doc_type,
            id: None,
            options: Options::new(),
            document: None,
        }
    }

    pub fn with_doc(&'b mut self, doc: &'b E) -> &'b mut Self {
        self.document = Some(doc);
        self
    }

    pub fn with_id(&'b mut self, id: &'b str) -> &'b mut Self {
        self.id = Some(id);
        self
    }

    add_option!(with_version, "version");
    add_option!(with_version_type, "version_type");
    add_option!(with_op_type, "op_type");
    add_option!(with_routing, "routing");
    add_option!(with_refresh, "refresh");
    add_option!(with_timeout, "timeout");

    fn format_url(&self) -> String {
        match self.id {
            // With an explicit id the document is PUT at its own URL,
            // without one it is POSTed to the type and ES assigns the id
            Some(id) => format!("/{}/{}/{}{}", self.index, self.doc_type, id, self.options),
            None => format!("/{}/{}{}", self.index, self.doc_type, self.options),
        }
    }

    pub fn send(&'b mut self) -> Result<IndexResult, EsError> {
        let url = self.format_url();
        // Ignoring status_code as everything should return an IndexResult or
        // already be an error
        let response = match (self.id, self.document) {
            (Some(_), Some(doc)) => self.client.put_body_op(&url, doc)?,
            (Some(_), None) => self.client.put_op(&url)?,
            (None, Some(doc)) => self.client.post_body_op(&url, doc)?,
            (None, None) => self.client.post_op(&url)?,
        };
        Ok(response.read_response()?)
    }
}

impl Client {
    /// An index operation to index a document in the specified index
    ///
    /// See: https://www.elastic.co/guide/en/elasticsearch/reference/current/docs-index_.html
    pub fn index<'a, 'b, E: Serialize>(
        &'a mut self,
        index: &'b str,
        doc_type: &'b str,
    ) -> IndexOperation<'a, 'b, E> {
        IndexOperation::new(self, index, doc_type)
    }
}

/// The result of an index operation
#[derive(Debug, Deserialize)]
pub struct IndexResult {
    #[serde(rename = "_index")]
    pub index: String,
    #[serde(rename = "_type")]
    pub doc_type: String,
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_version")]
    pub version: u64,
    pub created: bool,
}
