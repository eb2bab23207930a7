/*
 *  httpsource.rs
 *
 *  ParkMon - parking distance monitor
 *  (c) 2025-26 Stuart Hunter
 *
 *  HTTP client for the distance endpoint
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use reqwest::{Client, header, Error as ReqwestError, StatusCode};
use serde_json::Error as SerdeJsonError;
use std::fmt::{self, Display, Formatter};
use std::future::Future;
use std::time::Duration;

use crate::reading::DistancePayload;

/// Why a poll produced no reading.
#[derive(Debug)]
pub enum SourceError {
    /// Network failure, timeout, refused connection.
    HttpRequestError(ReqwestError),
    /// Backend answered with a non-2xx status.
    BadStatus(StatusCode),
    /// Body was not the expected JSON object.
    DeserializationError(SerdeJsonError),
    /// Body parsed but carried no numeric `distance`.
    MissingDistance,
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::HttpRequestError(e) => write!(f, "HTTP request error: {}", e),
            SourceError::BadStatus(s) => write!(f, "Sensor backend returned {}", s),
            SourceError::DeserializationError(e) => write!(f, "JSON deserialization error: {}", e),
            SourceError::MissingDistance => write!(f, "Sensor response missing 'distance' field"),
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SourceError::HttpRequestError(e) => Some(e),
            SourceError::DeserializationError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ReqwestError> for SourceError {
    fn from(err: ReqwestError) -> Self {
        SourceError::HttpRequestError(err)
    }
}

impl From<SerdeJsonError> for SourceError {
    fn from(err: SerdeJsonError) -> Self {
        SourceError::DeserializationError(err)
    }
}

/// Something that can be asked for one distance sample.
///
/// Implementations are cloned into each tick's request task, so they should
/// be cheap handles.
pub trait DistanceSource: Clone + Send + Sync + 'static {
    fn fetch(&self) -> impl Future<Output = Result<f64, SourceError>> + Send;
}

/// Polls the sensor backend's JSON endpoint.
#[derive(Debug, Clone)]
pub struct DistanceClient {
    url: String,
    client: Client,
}

impl DistanceClient {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, SourceError> {
        const VERSION: &'static str = concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"));

        let mut headers = header::HeaderMap::new();
        headers.insert("User-Agent", header::HeaderValue::from_static(VERSION));
        headers.insert("Accept", header::HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .http1_only()
            .connect_timeout(timeout.min(Duration::from_millis(500)))
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(DistanceClient {
            url: url.to_string(),
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn get_distance(&self) -> Result<f64, SourceError> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::BadStatus(status));
        }

        let body = response.text().await?;
        let payload: DistancePayload = serde_json::from_str(&body)?;

        payload.distance.ok_or(SourceError::MissingDistance)
    }
}

impl DistanceSource for DistanceClient {
    fn fetch(&self) -> impl Future<Output = Result<f64, SourceError>> + Send {
        self.get_distance()
    }
}
