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

//! Implementation of the Bulk API
//!
//! Two entry points: [`BulkOperation`] sends a ready-made slice of actions in
//! one request, and [`BulkIndexer`] accumulates single-document submissions
//! into batches, flushing them when a threshold is reached.
//!
//! See: https://www.elastic.co/guide/en/elasticsearch/reference/current/docs-bulk.html

use std::cmp;
use std::fmt;

use reqwest::StatusCode;

use serde::de::{Deserializer, Error as DeError, MapAccess, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::EsError;
use crate::json::{FieldBased, NoOuter, ShouldSkip};
use crate::{Client, EsResponse};

use super::common::Options;
use super::ShardCountResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionType {
    Index,
    Create,
    Delete,
}

impl ActionType {
    fn as_str(&self) -> &'static str {
        match self {
            ActionType::Index => "index",
            ActionType::Create => "create",
            ActionType::Delete => "delete",
        }
    }
}

impl Serialize for ActionType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The metadata accompanying each action line
#[derive(Debug, Default, Serialize)]
pub struct ActionOptions {
    #[serde(rename = "_index", skip_serializing_if = "ShouldSkip::should_skip")]
    index: Option<String>,
    #[serde(rename = "_type", skip_serializing_if = "ShouldSkip::should_skip")]
    doc_type: Option<String>,
    #[serde(rename = "_id", skip_serializing_if = "ShouldSkip::should_skip")]
    id: Option<String>,
}

/// An action line and the (optional) document that follows it
#[derive(Serialize)]
pub struct Action<S>(FieldBased<ActionType, ActionOptions, NoOuter>, Option<S>);

impl<S> Action<S>
where
    S: Serialize,
{
    /// An index action.
    ///
    /// Takes the document to be indexed, other parameters can be set as
    /// optional on the `Action` struct returned.
    pub fn index(document: S) -> Self {
        Action(
            FieldBased::new(ActionType::Index, Default::default(), NoOuter),
            Some(document),
        )
    }

    /// Create action
    pub fn create(document: S) -> Self {
        Action(
            FieldBased::new(ActionType::Create, Default::default(), NoOuter),
            Some(document),
        )
    }

    /// Append the serialized form of this action to the bulk payload: the
    /// action line, then the document line when there is a document
    fn write_to(&self, payload: &mut String) -> Result<(), EsError> {
        let action_str = serde_json::to_string(&self.0)?;
        payload.push_str(&action_str);
        payload.push('\n');

        if let Some(ref source) = self.1 {
            let document_str = serde_json::to_string(source)?;
            payload.push_str(&document_str);
            payload.push('\n');
        }
        Ok(())
    }
}

impl<S> Action<S> {
    /// Delete a document based on ID, carries no document line
    pub fn delete<A: Into<String>>(id: A) -> Self {
        Action(
            FieldBased::new(
                ActionType::Delete,
                ActionOptions {
                    id: Some(id.into()),
                    ..Default::default()
                },
                NoOuter,
            ),
            None,
        )
    }

    add_inner_field!(with_index, index, String);
    add_inner_field!(with_doc_type, doc_type, String);
    add_inner_field!(with_id, id, String);
}

/// When the accumulated batch is considered due for flushing
#[derive(Debug, Clone, Copy)]
pub struct FlushPolicy {
    /// Flush when this many documents are buffered
    pub max_documents: usize,

    /// Flush when the serialized buffer reaches this size, whatever the
    /// document count.  Guards against a few oversized documents holding
    /// unbounded memory.
    pub max_bytes: usize,
}

impl Default for FlushPolicy {
    fn default() -> Self {
        FlushPolicy {
            max_documents: 200,
            max_bytes: 10 * 1024 * 1024,
        }
    }
}

/// A guess at a typical serialized document, used to pre-size the buffer
const DOCUMENT_SIZE_HINT: usize = 512;

/// Accumulates index/create/delete actions into a single newline-delimited
/// payload, to be flushed as one bulk request.
///
/// The accumulator never performs I/O itself; flushing hands the payload to a
/// caller-supplied function.  It is not internally synchronized, a single
/// owner (or external locking) is assumed.
pub struct BulkAccumulator {
    /// The pending payload, exactly as it will be submitted
    payload: String,

    /// Number of actions appended since the last successful flush
    count: usize,

    policy: FlushPolicy,
}

impl BulkAccumulator {
    pub fn new(policy: FlushPolicy) -> Self {
        let capacity = cmp::min(
            policy.max_documents.saturating_mul(DOCUMENT_SIZE_HINT),
            policy.max_bytes,
        );
        BulkAccumulator {
            payload: String::with_capacity(capacity),
            count: 0,
            policy,
        }
    }

    /// Append one action to the batch.  A serialization failure leaves the
    /// batch unchanged.
    pub fn push<S>(&mut self, action: &Action<S>) -> Result<(), EsError>
    where
        S: Serialize,
    {
        let mut pair = String::new();
        action.write_to(&mut pair)?;
        self.payload.push_str(&pair);
        self.count += 1;
        Ok(())
    }

    /// Append an index action for the given document.  Passing no id leaves
    /// id assignment to the server.
    pub fn add_document<S>(
        &mut self,
        index: &str,
        doc_type: &str,
        id: Option<&str>,
        document: &S,
    ) -> Result<(), EsError>
    where
        S: Serialize,
    {
        let mut action = Action::index(document)
            .with_index(index)
            .with_doc_type(doc_type);
        if let Some(id) = id {
            action = action.with_id(id);
        }
        self.push(&action)
    }

    /// Whether the batch has reached either threshold of the flush policy
    pub fn should_flush(&self) -> bool {
        self.count >= self.policy.max_documents || self.payload.len() >= self.policy.max_bytes
    }

    /// Number of actions currently buffered
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The pending payload as it stands
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Change the document-count threshold, takes effect on the next
    /// `should_flush` check
    pub fn set_max_documents(&mut self, max_documents: usize) {
        self.policy.max_documents = max_documents;
    }

    /// Hand the pending payload to `submit`, exactly once.  The batch is
    /// cleared only when `submit` succeeds; on failure it is left untouched
    /// so the caller can retry the identical payload or keep appending.
    pub fn flush_with<T, F>(&mut self, submit: F) -> Result<T, EsError>
    where
        F: FnOnce(&str) -> Result<T, EsError>,
    {
        let outcome = submit(&self.payload);
        if outcome.is_ok() {
            self.payload.clear();
            self.count = 0;
        }
        outcome
    }
}

impl Default for BulkAccumulator {
    fn default() -> Self {
        BulkAccumulator::new(FlushPolicy::default())
    }
}

/// The outcome of submitting one document for bulk indexing
#[derive(Debug)]
pub enum BulkOutcome {
    /// The document was buffered, no request was made
    Buffered,

    /// A threshold was reached and the batch was submitted
    Flushed(BulkResult),
}

/// Batches single-document submissions over a client connection, one bulk
/// request per `FlushPolicy` threshold reached
pub struct BulkIndexer<'a> {
    client: &'a mut Client,
    accumulator: BulkAccumulator,
}

impl<'a> BulkIndexer<'a> {
    pub fn new(client: &'a mut Client) -> Self {
        BulkIndexer::with_policy(client, FlushPolicy::default())
    }

    pub fn with_policy(client: &'a mut Client, policy: FlushPolicy) -> Self {
        BulkIndexer {
            client,
            accumulator: BulkAccumulator::new(policy),
        }
    }

    /// Buffer a document for indexing without checking the flush policy
    pub fn add<S>(
        &mut self,
        index: &str,
        doc_type: &str,
        id: Option<&str>,
        document: &S,
    ) -> Result<(), EsError>
    where
        S: Serialize,
    {
        self.accumulator.add_document(index, doc_type, id, document)
    }

    /// Buffer a document for indexing and flush the batch if it is now due.
    /// After a failed flush the batch is retained, a later call retries it.
    pub fn bulk_index<S>(
        &mut self,
        index: &str,
        doc_type: &str,
        id: Option<&str>,
        document: &S,
    ) -> Result<BulkOutcome, EsError>
    where
        S: Serialize,
    {
        self.add(index, doc_type, id, document)?;
        if self.accumulator.should_flush() {
            Ok(BulkOutcome::Flushed(self.flush()?))
        } else {
            Ok(BulkOutcome::Buffered)
        }
    }

    /// Submit whatever is buffered, regardless of the flush policy.  The
    /// result carries the per-item report from the server; `errors` set to
    /// true means some items failed even though the request succeeded.
    pub fn flush(&mut self) -> Result<BulkResult, EsError> {
        let client = &mut *self.client;
        let result = self.accumulator.flush_with(|payload| {
            let response = client.post_ndjson_op("/_bulk", payload.to_owned())?;
            match response.status_code() {
                StatusCode::OK => Ok(response.read_response()?),
                status_code => Err(EsError::EsError(format!(
                    "Unexpected status: {}",
                    status_code
                ))),
            }
        });
        if let Err(ref err) = result {
            log::error!(
                "Bulk flush of {} documents failed, batch retained: {}",
                self.accumulator.count(),
                err
            );
        }
        result
    }

    /// Number of documents waiting for the next flush
    pub fn pending(&self) -> usize {
        self.accumulator.count()
    }

    pub fn set_max_documents(&mut self, max_documents: usize) {
        self.accumulator.set_max_documents(max_documents);
    }
}

/// A one-shot bulk request from a ready-made slice of actions
pub struct BulkOperation<'a, 'b, S: 'b> {
    client: &'a mut Client,
    index: Option<&'b str>,
    doc_type: Option<&'b str>,
    actions: &'b [Action<S>],
    options: Options<'b>,
}

impl<'a, 'b, S> BulkOperation<'a, 'b, S>
where
    S: Serialize,
{
    pub fn new(client: &'a mut Client, actions: &'b [Action<S>]) -> Self {
        BulkOperation {
            client,
            index: None,
            doc_type: None,
            actions,
            options: Options::new(),
        }
    }

    pub fn with_index(&'b mut self, index: &'b str) -> &'b mut Self {
        self.index = Some(index);
        self
    }

    pub fn with_doc_type(&'b mut self, doc_type: &'b str) -> &'b mut Self {
        self.doc_type = Some(doc_type);
        self
    }

    add_option!(with_refresh, "refresh");

    fn format_url(&self) -> String {
        let mut url = String::new();
        url.push('/');
        if let Some(index) = self.index {
            url.push_str(index);
            url.push('/');
        }
        if let Some(doc_type) = self.doc_type {
            url.push_str(doc_type);
            url.push('/');
        }
        url.push_str("_bulk");
        url.push_str(&self.options.to_string());
        url
    }

    fn format_actions(&self) -> Result<String, EsError> {
        let mut payload = String::new();
        for action in self.actions {
            action.write_to(&mut payload)?;
        }
        Ok(payload)
    }

    pub fn send(&'b mut self) -> Result<BulkResult, EsError> {
        let url = self.format_url();
        let body = self.format_actions()?;
        // Not the standard GET/POST/DELETE functions of the client as the
        // payload is newline-delimited JSON, not a single document
        let response = self.client.post_ndjson_op(&url, body)?;

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
    /// Bulk
    ///
    /// See: https://www.elastic.co/guide/en/elasticsearch/reference/current/docs-bulk.html
    pub fn bulk<'a, 'b, S>(&'a mut self, actions: &'b [Action<S>]) -> BulkOperation<'a, 'b, S>
    where
        S: Serialize,
    {
        BulkOperation::new(self, actions)
    }

    /// A bulk indexer over this connection, with the default flush policy
    pub fn bulk_indexer(&mut self) -> BulkIndexer {
        BulkIndexer::new(self)
    }
}

/// The result of a specific action
#[derive(Debug)]
pub struct ActionResult {
    pub action: ActionType,
    pub inner: ActionResultInner,
}

impl<'de> Deserialize<'de> for ActionResult {
    fn deserialize<D>(deserializer: D) -> Result<ActionResult, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ActionResultVisitor;

        impl<'de> Visitor<'de> for ActionResultVisitor {
            type Value = ActionResult;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map with one action key")
            }

            fn visit_map<V>(self, mut map: V) -> Result<ActionResult, V::Error>
            where
                V: MapAccess<'de>,
            {
                let (key, inner): (String, ActionResultInner) = match map.next_entry()? {
                    Some(entry) => entry,
                    None => return Err(V::Error::custom("expecting at least one field")),
                };

                let action = match key.as_ref() {
                    "index" => ActionType::Index,
                    "create" => ActionType::Create,
                    "delete" => ActionType::Delete,
                    _ => return Err(V::Error::custom(format!("Unrecognised key: {}", key))),
                };

                Ok(ActionResult { action, inner })
            }
        }

        deserializer.deserialize_map(ActionResultVisitor)
    }
}

/// The error reported for a single failed item
#[derive(Debug, Deserialize)]
pub struct ActionError {
    #[serde(rename = "type")]
    pub error_type: String,
    pub reason: String,
}

#[derive(Debug, Deserialize)]
pub struct ActionResultInner {
    #[serde(rename = "_index")]
    pub index: String,
    #[serde(rename = "_type")]
    pub doc_type: String,
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_version")]
    pub version: Option<u64>,
    #[serde(rename = "_shards")]
    pub shards: Option<ShardCountResult>,
    pub status: u16,
    pub error: Option<ActionError>,
}

/// The result of a bulk operation.  `errors` is the server's per-item error
/// flag: the request as a whole succeeded but individual items may not have.
#[derive(Debug, Deserialize)]
pub struct BulkResult {
    pub took: u64,
    pub errors: bool,
    pub items: Vec<ActionResult>,
}
