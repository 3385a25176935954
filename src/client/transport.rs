//! Request transport for the console agent.
//!
//! The agent speaks to the service through [`CourseTransport`]; the HTTP
//! implementation attaches the shared key as the `key` query parameter.

use std::fs;
use std::path::Path;

use reqwest::blocking::Client;

use crate::course::CoursePayload;

use super::errors::{ClientError, ClientResult};

/// Request method on a course resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// Raw status and body, rendered verbatim by the console
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues course requests on behalf of the console
pub trait CourseTransport {
    /// Send a request for one course (`Some(id)`) or the collection (`None`)
    fn send(
        &self,
        method: Method,
        course_id: Option<&str>,
        payload: Option<&CoursePayload>,
    ) -> ClientResult<TransportResponse>;
}

/// Blocking HTTP transport
pub struct HttpTransport {
    client: Client,
    base_url: String,
    key: String,
}

impl HttpTransport {
    /// `base_url` is the API root, e.g. `http://localhost:5000/api/v1`
    pub fn new(base_url: impl Into<String>, key: impl Into<String>) -> ClientResult<Self> {
        Self::build(base_url.into(), key.into(), Client::builder())
    }

    /// Like [`HttpTransport::new`], additionally trusting a PEM root
    /// certificate for HTTPS servers with a private CA
    pub fn with_ca_cert(
        base_url: impl Into<String>,
        key: impl Into<String>,
        ca_cert: &Path,
    ) -> ClientResult<Self> {
        let pem = fs::read(ca_cert)
            .map_err(|e| ClientError::Certificate(format!("{}: {}", ca_cert.display(), e)))?;
        let cert = reqwest::Certificate::from_pem(&pem)
            .map_err(|e| ClientError::Certificate(e.to_string()))?;
        Self::build(
            base_url.into(),
            key.into(),
            Client::builder().add_root_certificate(cert),
        )
    }

    fn build(
        base_url: String,
        key: String,
        builder: reqwest::blocking::ClientBuilder,
    ) -> ClientResult<Self> {
        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            key,
        })
    }

    fn url(&self, course_id: Option<&str>) -> String {
        match course_id {
            Some(id) => format!("{}/courses/{}", self.base_url, id),
            None => format!("{}/courses", self.base_url),
        }
    }
}

impl CourseTransport for HttpTransport {
    fn send(
        &self,
        method: Method,
        course_id: Option<&str>,
        payload: Option<&CoursePayload>,
    ) -> ClientResult<TransportResponse> {
        let url = self.url(course_id);
        let request = match method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
            Method::Delete => self.client.delete(&url),
        };
        let mut request = request.query(&[("key", self.key.as_str())]);
        if let Some(payload) = payload {
            request = request.json(payload);
        }

        let response = request.send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(TransportResponse { status, body })
    }
}
