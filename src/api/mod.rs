// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Minimal HTTP seam between the UI and the manifest API.
//!
//! Create, verify, delete and list all go through [`Transport::request`], so
//! the request logic is shared and can be exercised with a fake transport.

pub mod client;
pub mod http;

use std::fmt;

pub use client::{ActionOutcome, ApiError, ManifestApi, NewManifest};
pub use http::HttpTransport;

/// HTTP methods used by the manifest API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        })
    }
}

/// A completed HTTP exchange, regardless of status code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

/// The request never produced a response.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid request URL: {0}")]
    InvalidUrl(String),
    #[error("{0}")]
    Network(String),
}

/// Issue one request against the API, relative to the transport's base URL.
///
/// `segments` are raw path segments (`["api", "romaneios", id]`); the
/// transport encodes each one, so an id can never change the endpoint.
pub trait Transport: Send + Sync {
    fn request(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&serde_json::Value>,
    ) -> Result<ApiResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn request(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&serde_json::Value>,
    ) -> Result<ApiResponse, TransportError> {
        (**self).request(method, segments, body)
    }
}
