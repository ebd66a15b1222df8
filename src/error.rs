// Copyright (c) 2026 hazwatch contributors
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/hazwatch/hazwatch

//! Error taxonomy for the weather ingestion path

use std::time::Duration;
use thiserror::Error;

/// Failure while fetching current conditions from a weather provider.
///
/// Every variant is recoverable. The engine logs the failure, keeps the
/// previous reading in place, and waits for the next scheduled refresh.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a usable response (DNS, connect, TLS,
    /// or body transfer failed). The request URL is stripped on
    /// conversion; it carries the provider credential.
    #[error("weather provider request failed: {0}")]
    Network(#[source] reqwest::Error),

    /// The provider answered with a non-success status code.
    #[error("weather provider returned HTTP {status}")]
    Provider {
        /// HTTP status code from the provider.
        status: u16,
    },

    /// The response body did not match the expected shape.
    #[error("malformed weather provider response: {0}")]
    Parse(#[from] serde_json::Error),

    /// The engine-side bound on a single fetch elapsed.
    #[error("weather fetch exceeded {limit:?}")]
    Timeout {
        /// The bound that was exceeded.
        limit: Duration,
    },
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        // Fetch failures go to the warn log; the URL would carry the
        // appid query parameter into it.
        FetchError::Network(err.without_url())
    }
}
