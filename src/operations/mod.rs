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

//! Implementations of specific ElasticSearch operations
//!
//! The various methods on [`Client`](../struct.Client.html) are entry points to
//! ElasticSearch's set of operations.  This module, and its child modules, are
//! the implementation of those operations.

use serde::Deserialize;

// Specific operations
#[macro_use]
pub mod common;

pub mod alias;
pub mod bulk;
pub mod cluster;
pub mod get;
pub mod index;
pub mod indices;
pub mod mapping;
pub mod version;

// Results

/// Acknowledgement-only result, returned by the various administrative
/// operations (index lifecycle, mappings, aliases)
#[derive(Debug, Deserialize)]
pub struct GenericResult {
    pub acknowledged: bool,
}

/// Shared struct for operations that include counts of successful/failed
/// shards.  This is returned within various other result structs.
#[derive(Debug, Deserialize)]
pub struct ShardCountResult {
    pub total: i64,
    pub successful: i64,
    pub failed: i64,
}

#[cfg(test)]
mod tests {
    use super::GenericResult;

    #[test]
    fn test_generic_result() {
        let result: GenericResult = serde_json::from_str("{\"acknowledged\":true}").unwrap();
        assert!(result.acknowledged);
    }
}
