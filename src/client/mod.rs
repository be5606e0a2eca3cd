mod common;
mod curl;

use crate::error::Error;

pub use common::*;

/// HTTP client backed by libcurl. Each request uses a fresh handle.
#[derive(Debug, Clone)]
pub struct Client {
    config: Config,
}

impl Client {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Transport for Client {
    fn get(&self, request: &Request) -> Result<Response, Error> {
        let span = tracing::info_span!("client request", host = request.url().host_str());
        let _guard = span.enter();

        match request.url().scheme() {
            "http" | "https" => curl::perform_get(&self.config, request),
            scheme => Err(Error::UnsupportedFeature {
                feature: scheme.to_string(),
            }),
        }
    }
}
