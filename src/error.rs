use std::error::Error;
use std::fmt;
use std::io;

use reqwest::blocking::Response;

// Error handling

/// Error that can occur include IO and parsing errors, as well as specific
/// errors from the ElasticSearch server and logic errors from this library
#[derive(Debug)]
pub enum EsError {
    /// An internal error from this library
    EsError(String),

    /// An error reported by the ElasticSearch server
    EsServerError(String),

    /// Miscellaneous error from the HTTP library
    HttpError(reqwest::Error),

    /// Miscellaneous IO error
    IoError(io::Error),

    /// Miscellaneous JSON error
    JsonError(serde_json::Error),
}

impl From<io::Error> for EsError {
    fn from(err: io::Error) -> EsError {
        EsError::IoError(err)
    }
}

impl From<reqwest::Error> for EsError {
    fn from(err: reqwest::Error) -> EsError {
        EsError::HttpError(err)
    }
}

impl From<serde_json::Error> for EsError {
    fn from(err: serde_json::Error) -> EsError {
        EsError::JsonError(err)
    }
}

impl From<Response> for EsError {
    fn from(err: Response) -> EsError {
        let status = err.status();
        match err.text() {
            Ok(body) => EsError::EsServerError(format!("{} - {}", status, body)),
            Err(_) => EsError::EsServerError(format!("{}", status)),
        }
    }
}

impl Error for EsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            EsError::EsError(_) => None,
            EsError::EsServerError(_) => None,
            EsError::HttpError(err) => Some(err),
            EsError::IoError(err) => Some(err),
            EsError::JsonError(err) => Some(err),
        }
    }
}

impl fmt::Display for EsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EsError::EsError(s) => fmt::Display::fmt(s, f),
            EsError::EsServerError(s) => fmt::Display::fmt(s, f),
            EsError::HttpError(err) => fmt::Display::fmt(err, f),
            EsError::IoError(err) => fmt::Display::fmt(err, f),
            EsError::JsonError(err) => fmt::Display::fmt(err, f),
        }
    }
}
