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

//! Implementation of the Cluster Health API
//!
//! See: https://www.elastic.co/guide/en/elasticsearch/reference/current/cluster-health.html

use std::fmt;

use serde::Deserialize;

use crate::error::EsError;
use crate::{Client, EsResponse};

use super::common::{Options, OptionVal};

/// The traffic-light health of a cluster or index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClusterStatus {
    Green,
    Yellow,
    Red,
}

impl fmt::Display for ClusterStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            ClusterStatus::Green => "green",
            ClusterStatus::Yellow => "yellow",
            ClusterStatus::Red => "red",
        })
    }
}

impl From<ClusterStatus> for OptionVal {
    fn from(from: ClusterStatus) -> OptionVal {
        OptionVal(from.to_string())
    }
}

/// An ES Cluster Health operation
pub struct ClusterHealthOperation<'a, 'b> {
    /// The HTTP client
    client: &'a mut Client,

    /// Optional options
    options: Options<'b>,
}

impl<'a, 'b> ClusterHealthOperation<'a, 'b> {
    pub fn new(client: &'a mut Client) -> Self {
        ClusterHealthOperation {
            client,
            options: Options::new(),
        }
    }

    add_option!(with_wait_for_status, "wait_for_status");
    add_option!(with_timeout, "timeout");
    add_option!(with_level, "level");
    add_option!(with_local, "local");

    pub fn send(&'b mut self) -> Result<ClusterHealthResult, EsError> {
        let url = format!("/_cluster/health{}", self.options);
        let response = self.client.get_op(&url)?;
        Ok(response.read_response()?)
    }
}

impl Client {
    /// Cluster health
    ///
    /// See: https://www.elastic.co/guide/en/elasticsearch/reference/current/cluster-health.html
    pub fn cluster_health(&mut self) -> ClusterHealthOperation {
        ClusterHealthOperation::new(self)
    }

    /// Wait until the cluster reaches the given status or better
    /// (green > yellow > red), or the timeout elapses.  Returns whether the
    /// status was reached within the timeout.
    pub fn wait_for_status(
        &mut self,
        status: ClusterStatus,
        timeout: &str,
    ) -> Result<bool, EsError> {
        let result = self
            .cluster_health()
            .with_wait_for_status(status)
            .with_timeout(timeout)
            .send()?;
        Ok(!result.timed_out)
    }
}

/// The result of a cluster health request
#[derive(Debug, Deserialize)]
pub struct ClusterHealthResult {
    pub cluster_name: String,
    pub status: ClusterStatus,
    pub timed_out: bool,
    pub number_of_nodes: u64,
    pub number_of_data_nodes: u64,
    pub active_primary_shards: u64,
    pub active_shards: u64,
    pub relocating_shards: u64,
    pub initializing_shards: u64,
    pub unassigned_shards: u64,
}

#[cfg(test)]
pub mod tests {
    use crate::tests::make_client;

    use super::{ClusterHealthResult, ClusterStatus};

    #[test]
    fn test_status_is_deserialized() {
        let result: ClusterStatus = serde_json::from_str("\"yellow\"").unwrap();
        assert_eq!(ClusterStatus::Yellow, result);
    }

    #[test]
    fn test_health_result_is_deserialized() {
        let raw = r#"{
            "cluster_name": "elasticsearch",
            "status": "green",
            "timed_out": false,
            "number_of_nodes": 3,
            "number_of_data_nodes": 3,
            "active_primary_shards": 5,
            "active_shards": 10,
            "relocating_shards": 0,
            "initializing_shards": 0,
            "unassigned_shards": 0
        }"#;
        let result: ClusterHealthResult = serde_json::from_str(raw).unwrap();
        assert_eq!(ClusterStatus::Green, result.status);
        assert!(!result.timed_out);
        assert_eq!(3, result.number_of_nodes);
    }

    #[test]
    #[ignore = "requires a running ElasticSearch"]
    fn test_cluster_health() {
        let mut client = make_client();
        let result = client.cluster_health().send().unwrap();
        assert!(!result.cluster_name.is_empty());
    }

    #[test]
    #[ignore = "requires a running ElasticSearch"]
    fn test_wait_for_status() {
        let mut client = make_client();
        let reached = client.wait_for_status(ClusterStatus::Yellow, "5s").unwrap();
        assert!(reached);
    }
}
