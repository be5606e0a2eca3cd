use std::{fmt::Debug, sync::OnceLock, time::Duration};

use url::Url;

use crate::{
    error::Error,
    http::{HeaderFields, ResponseHeader},
};

#[derive(Debug, Clone)]
pub struct Config {
    http_user_agent: String,
    http_headers: HeaderFields,
    connect_timeout: Duration,
    timeout: Option<Duration>,
    tls_verification: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Self {
            http_user_agent: default_user_agent().to_string(),
            http_headers: Self::make_default_http_headers(),
            connect_timeout: Duration::from_secs(30),
            timeout: None,
            tls_verification: true,
        }
    }

    fn make_default_http_headers() -> HeaderFields {
        let mut fields = HeaderFields::new();

        for (name, value) in default_http_headers() {
            fields.append(*name, *value);
        }

        fields
    }

    pub fn http_user_agent(&self) -> &str {
        self.http_user_agent.as_ref()
    }

    pub fn set_http_user_agent(&mut self, user_agent: String) -> &mut Self {
        self.http_user_agent = user_agent;
        self
    }

    pub fn http_headers(&self) -> &HeaderFields {
        &self.http_headers
    }

    pub fn http_headers_mut(&mut self) -> &mut HeaderFields {
        &mut self.http_headers
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    pub fn set_connect_timeout(&mut self, timeout: Duration) -> &mut Self {
        self.connect_timeout = timeout;
        self
    }

    /// Limit on the whole transfer. `None` leaves it to the transport.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn set_timeout(&mut self, timeout: Option<Duration>) -> &mut Self {
        self.timeout = timeout;
        self
    }

    pub fn tls_verification(&self) -> bool {
        self.tls_verification
    }

    pub fn set_tls_verification(&mut self, enabled: bool) -> &mut Self {
        self.tls_verification = enabled;
        self
    }
}

#[derive(Debug, Clone)]
pub struct Request {
    url: Url,
    http_headers: HeaderFields,
}

impl Request {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            http_headers: HeaderFields::new(),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn http_headers(&self) -> &HeaderFields {
        &self.http_headers
    }

    pub fn http_headers_mut(&mut self) -> &mut HeaderFields {
        &mut self.http_headers
    }
}

#[derive(Debug, Clone)]
pub struct Response {
    header: ResponseHeader,
    body: Vec<u8>,
}

impl Response {
    pub fn new(header: ResponseHeader, body: Vec<u8>) -> Self {
        Self { header, body }
    }

    pub fn header(&self) -> &ResponseHeader {
        &self.header
    }

    pub fn status_code(&self) -> u16 {
        self.header.status_code
    }

    pub fn is_success(&self) -> bool {
        self.header.is_success()
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

/// Performs a single blocking GET request.
///
/// A returned [`Response`] means the server answered, whatever its status
/// code. Errors mean no usable response was received.
pub trait Transport: Debug {
    fn get(&self, request: &Request) -> Result<Response, Error>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, request: &Request) -> Result<Response, Error> {
        (**self).get(request)
    }
}

pub fn default_user_agent() -> &'static str {
    static DEFAULT_USER_AGENT: OnceLock<String> = OnceLock::new();

    DEFAULT_USER_AGENT.get_or_init(|| {
        let crate_version = crate::version::get_crate_version_mmp();
        let curl_version = curl::Version::get();

        format!(
            "geo/{}.{} curl/{}.{}",
            crate_version.0,
            crate_version.1,
            (curl_version.version_num() >> 16) as u8,
            (curl_version.version_num() >> 8) as u8
        )
    })
}

pub fn default_http_headers() -> &'static [(&'static str, &'static str)] {
    &[("Accept", "application/json")]
}
