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

//! Fetch the ElasticSearch banner (name, cluster and version information)

use serde::Deserialize;

use crate::error::EsError;
use crate::{Client, EsResponse};

#[derive(Debug)]
pub struct VersionOperation<'a> {
    client: &'a mut Client,
}

impl<'a> VersionOperation<'a> {
    pub fn new(client: &'a mut Client) -> Self {
        VersionOperation { client }
    }

    pub fn send(&mut self) -> Result<VersionResult, EsError> {
        let response = self.client.get_op("/")?;
        Ok(response.read_response()?)
    }
}

impl Client {
    /// Calls the base ES path, returning the server banner
    pub fn version(&mut self) -> VersionOperation {
        VersionOperation::new(self)
    }
}

#[derive(Debug, Deserialize)]
pub struct Version {
    pub number: String,
    pub lucene_version: String,
}

/// The banner served from the root URL
#[derive(Debug, Deserialize)]
pub struct VersionResult {
    pub name: String,
    pub cluster_name: String,
    pub cluster_uuid: Option<String>,
    pub version: Version,
    pub tagline: String,
}

#[cfg(test)]
pub mod tests {
    use regex::Regex;

    use crate::tests::make_client;

    use super::VersionResult;

    #[test]
    fn test_operation_is_debuggable() {
        let mut client = make_client();
        let op = client.version();
        assert!(format!("{:?}", op).contains("VersionOperation"));
    }

    #[test]
    fn test_banner_is_deserialized() {
        let raw = r#"{
            "name": "node-1",
            "cluster_name": "elasticsearch",
            "cluster_uuid": "na",
            "version": {
                "number": "2.4.6",
                "build_hash": "5376dca",
                "build_timestamp": "2017-07-18T12:17:44Z",
                "build_snapshot": false,
                "lucene_version": "5.5.4"
            },
            "tagline": "You Know, for Search"
        }"#;
        let result: VersionResult = serde_json::from_str(raw).unwrap();
        assert_eq!("elasticsearch", result.cluster_name);
        assert_eq!("2.4.6", result.version.number);
        assert_eq!("5.5.4", result.version.lucene_version);
    }

    #[test]
    #[ignore = "requires a running ElasticSearch"]
    fn test_version() {
        let mut client = make_client();
        let result = client.version().send().unwrap();

        let expected_regex = Regex::new(r"^\d+\.\d+\.\d+$").unwrap();
        assert!(expected_regex.is_match(&result.version.number));
    }
}
