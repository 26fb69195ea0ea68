//! The HTTP capability the service calls need, and its `reqwest` implementation.

use std::fmt::Write as _;

use url::Url;

use super::error::FnsError;

/// An authenticated GET request to the receipt-check API.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// Absolute request URL.
    pub url: Url,
    /// HTTP Basic login.
    pub login: String,
    /// HTTP Basic password.
    pub password: String,
    /// Extra headers sent with the request.
    pub headers: Vec<(&'static str, String)>,
}

impl ApiRequest {
    /// Value of the named extra header, if set.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Render the request as raw HTTP text, with the credentials redacted.
    pub fn dump(&self) -> String {
        let mut target = self.url.path().to_string();
        if let Some(query) = self.url.query() {
            target.push('?');
            target.push_str(query);
        }
        let mut out = format!("GET {target} HTTP/1.1\r\n");
        if let Some(host) = self.url.host_str() {
            match self.url.port() {
                Some(port) => {
                    let _ = write!(out, "Host: {host}:{port}\r\n");
                }
                None => {
                    let _ = write!(out, "Host: {host}\r\n");
                }
            }
        }
        out.push_str("Authorization: Basic ***\r\n");
        for (name, value) in &self.headers {
            let _ = write!(out, "{name}: {value}\r\n");
        }
        out
    }
}

/// Status, headers and body of a completed request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers, in wire order.
    pub headers: Vec<(String, String)>,
    /// Full response body.
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// A response with the given status and body and no headers.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Render the response as raw HTTP text.
    pub fn dump(&self) -> String {
        let mut out = format!("HTTP/1.1 {}\r\n", self.status);
        for (name, value) in &self.headers {
            let _ = write!(out, "{name}: {value}\r\n");
        }
        out.push_str("\r\n");
        out.push_str(&String::from_utf8_lossy(&self.body));
        out
    }
}

/// Issues a single GET with Basic auth and custom headers.
///
/// [`HttpTransport`] talks to the network; tests substitute a recording fake.
pub trait Transport {
    /// Send `request` once and return the full response.
    ///
    /// # Errors
    ///
    /// [`FnsError::Transport`] if no response arrives,
    /// [`FnsError::BodyRead`] if the body cannot be read.
    fn get(&self, request: &ApiRequest) -> Result<ApiResponse, FnsError>;
}

/// Blocking `reqwest` transport with the client's default timeouts.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Build the underlying HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`FnsError::Transport`] if the TLS backend cannot be initialised.
    pub fn new() -> Result<Self, FnsError> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| FnsError::Transport(e.to_string()))?;
        Ok(Self { client })
    }

    /// Use a preconfigured client, e.g. with custom timeouts or proxies.
    pub fn from_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    fn get(&self, request: &ApiRequest) -> Result<ApiResponse, FnsError> {
        let mut builder = self
            .client
            .get(request.url.clone())
            .basic_auth(&request.login, Some(&request.password));
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }

        let resp = builder
            .send()
            .map_err(|e| FnsError::Transport(e.to_string()))?;

        let status = resp.status().as_u16();
        let headers = resp
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = resp
            .bytes()
            .map_err(|e| FnsError::BodyRead(e.to_string()))?
            .to_vec();

        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }
}
