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

//! A lightweight client for ElasticSearch's REST API
//!
//! The `Client` is the central access point. Each supported endpoint (cluster
//! health, index lifecycle, document indexing and retrieval, aliases, bulk
//! indexing) is implemented as an operation in [`operations`](operations/index.html),
//! reachable from a method on `Client`.
//!
//! Documents are anything implementing `serde::Serialize` on the way in and
//! `serde::Deserialize` on the way out; the client does not model mappings or
//! queries beyond what the endpoints themselves require.

#[macro_use]
pub mod json;

pub mod error;
pub mod operations;

use reqwest::blocking::{Client as HttpClient, Response};
use reqwest::header::CONTENT_TYPE;
use reqwest::{StatusCode, Url};

use serde::de::DeserializeOwned;
use serde::ser::Serialize;

use crate::error::EsError;

/// Process the result of an HTTP request, returning the response if the
/// status code is one a caller can meaningfully act on
fn do_req(resp: Response) -> Result<Response, EsError> {
    match resp.status() {
        StatusCode::OK | StatusCode::CREATED | StatusCode::NOT_FOUND => Ok(resp),
        _ => Err(EsError::from(resp)),
    }
}

/// A trait for reading the status code and typed body of a response
pub trait EsResponse {
    fn status_code(&self) -> StatusCode;
    fn read_response<R>(self) -> Result<R, EsError>
    where
        R: DeserializeOwned;
}

impl EsResponse for Response {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn read_response<R>(self) -> Result<R, EsError>
    where
        R: DeserializeOwned,
    {
        Ok(serde_json::from_reader(self)?)
    }
}

// The client

/// Create a HTTP function for the given method (GET/PUT/POST/DELETE/HEAD)
macro_rules! es_op {
    ($n:ident, $cn:ident) => {
        fn $n(&mut self, url: &str) -> Result<Response, EsError> {
            let full_url = self.full_url(url);
            log::debug!("Doing {} on {}", stringify!($cn), full_url);
            let result = self.http_client.$cn(&full_url).send()?;
            do_req(result)
        }
    };
}

/// Create a HTTP function with a JSON request body for the given method
/// (PUT/POST)
macro_rules! es_body_op {
    ($n:ident, $cn:ident) => {
        fn $n<E>(&mut self, url: &str, body: &E) -> Result<Response, EsError>
        where
            E: Serialize,
        {
            let full_url = self.full_url(url);
            let json_string = serde_json::to_string(body)?;
            log::debug!("Doing {} on {}, body: {}", stringify!($cn), full_url, json_string);
            let result = self
                .http_client
                .$cn(&full_url)
                .header(CONTENT_TYPE, "application/json")
                .body(json_string)
                .send()?;
            do_req(result)
        }
    };
}

/// The core of the ElasticSearch client, owns the HTTP connection
#[derive(Debug)]
pub struct Client {
    base_url: String,
    http_client: HttpClient,
}

impl Client {
    /// Create a new client from the full base URL of the server, without a
    /// trailing slash, e.g. `http://localhost:9200`
    pub fn new(url_s: &str) -> Result<Client, EsError> {
        let url =
            Url::parse(url_s).map_err(|e| EsError::EsError(format!("Invalid url: {}", e)))?;
        let http_client = HttpClient::builder().build()?;
        Ok(Client {
            base_url: url.as_str().trim_end_matches('/').to_owned(),
            http_client,
        })
    }

    fn full_url(&self, suffix: &str) -> String {
        format!("{}{}", self.base_url, suffix)
    }

    es_op!(get_op, get);
    es_op!(post_op, post);
    es_body_op!(post_body_op, post);
    es_op!(put_op, put);
    es_body_op!(put_body_op, put);
    es_op!(delete_op, delete);
    es_op!(head_op, head);

    /// Bulk payloads are newline-delimited JSON rather than a single
    /// document, so they bypass the standard JSON body functions
    fn post_ndjson_op(&mut self, url: &str, body: String) -> Result<Response, EsError> {
        let full_url = self.full_url(url);
        log::debug!("Doing post on {}, ndjson body of {} bytes", full_url, body.len());
        let result = self
            .http_client
            .post(&full_url)
            .header(CONTENT_TYPE, "application/x-ndjson")
            .body(body)
            .send()?;
        do_req(result)
    }
}

#[cfg(test)]
pub mod tests {
    use std::env;

    use serde::{Deserialize, Serialize};

    use super::Client;

    // test setup

    pub fn make_client() -> Client {
        let _ = env_logger::builder().is_test(true).try_init();
        let hostname = match env::var("ES_HOST") {
            Ok(val) => val,
            Err(_) => "localhost".to_owned(),
        };
        Client::new(&format!("http://{}:9200", hostname)).unwrap()
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TestDocument {
        pub str_field: String,
        pub int_field: i64,
    }

    impl TestDocument {
        pub fn new() -> TestDocument {
            TestDocument {
                str_field: "I am a test".to_owned(),
                int_field: 1,
            }
        }

        pub fn with_str_field(mut self, s: &str) -> TestDocument {
            self.str_field = s.to_owned();
            self
        }

        pub fn with_int_field(mut self, i: i64) -> TestDocument {
            self.int_field = i;
            self
        }
    }

    pub fn clean_db(client: &mut Client, test_idx: &str) {
        // failure allowed, the index may not exist yet
        let _ = client.delete_index(test_idx);
    }

    // tests

    #[test]
    fn test_invalid_url_is_rejected() {
        assert!(Client::new("not a url").is_err());
    }

    #[test]
    fn test_full_url() {
        let client = Client::new("http://localhost:9200").unwrap();
        assert_eq!(client.base_url, "http://localhost:9200");
        assert_eq!(
            client.full_url("/test_idx/_bulk"),
            "http://localhost:9200/test_idx/_bulk"
        );
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = Client::new("http://localhost:9200/").unwrap();
        assert_eq!(client.full_url("/"), "http://localhost:9200/");
    }
}
