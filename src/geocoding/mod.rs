//! OpenWeather geocoding API client.
//!
//! See <https://openweathermap.org/api/geocoding-api>.

mod model;
mod query;

use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    client::{Client, Request, Transport},
    error::Error,
};

pub use model::*;
pub use query::*;

pub const DEFAULT_BASE_URL: &str = "http://api.openweathermap.org/";

/// Name of the environment variable holding the API key.
pub const API_KEY_VAR: &str = "OPEN_WEATHER_API_KEY";

const DIRECT_PATH: &str = "geo/1.0/direct";
const ZIP_PATH: &str = "geo/1.0/zip";
const API_KEY_PARAM: &str = "appid";

#[derive(Clone)]
pub struct Config {
    api_key: String,
    base_url: Url,
}

impl Config {
    pub fn new<S: Into<String>>(api_key: S) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Points the client at another deployment of the API.
    pub fn set_base_url(&mut self, mut base_url: Url) -> Result<&mut Self, Error> {
        match base_url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(Error::UnsupportedFeature {
                    feature: scheme.to_string(),
                })
            }
        }

        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidArgument {
                value: base_url.to_string(),
                reason: "is not a base URL".to_string(),
            });
        }

        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        base_url.set_query(None);
        self.base_url = base_url;

        Ok(self)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"...")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).unwrap()
}

/// Outcome of one lookup.
///
/// `status_code` is `None` when no response was received. A response with an
/// error status may still carry an `Ok` result; see
/// [`Geocoder::lookup_by_name`].
#[derive(Debug)]
pub struct Lookup<T> {
    status_code: Option<u16>,
    result: Result<T, Error>,
}

impl<T> Lookup<T> {
    fn new(status_code: Option<u16>, result: Result<T, Error>) -> Self {
        Self {
            status_code,
            result,
        }
    }

    fn no_response(error: Error) -> Self {
        Self::new(None, Err(error))
    }

    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    /// The service rejected the API key.
    pub fn is_unauthorized(&self) -> bool {
        self.status_code == Some(401)
    }

    pub fn result(&self) -> Result<&T, &Error> {
        self.result.as_ref()
    }

    pub fn into_result(self) -> Result<T, Error> {
        self.result
    }
}

#[derive(Debug, Clone)]
pub struct Geocoder<T: Transport = Client> {
    config: Config,
    transport: T,
}

impl<T: Transport> Geocoder<T> {
    pub fn new(config: Config, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Finds places matching `name`.
    ///
    /// Names with fewer than three comma separated parts are qualified with
    /// [`DEFAULT_COUNTRY`]. A non-success status yields an empty list and no
    /// error; callers inspect [`Lookup::status_code`]. Unmatched names are an
    /// empty list as well.
    pub fn lookup_by_name(&self, name: &str) -> Lookup<Vec<NameResult>> {
        let span = tracing::info_span!("lookup by name", name);
        let _guard = span.enter();

        let query = qualify_name(name);
        let response = match self.get(DIRECT_PATH, &[("q", query.as_str())]) {
            Ok(response) => response,
            Err(error) => return Lookup::no_response(error),
        };
        let status_code = Some(response.status_code());

        if !response.is_success() {
            tracing::debug!(status_code, "lookup by name unsuccessful status");
            return Lookup::new(status_code, Ok(Vec::new()));
        }

        let result = decode_json::<Vec<NameResult>>(response.body());

        if let Ok(locations) = &result {
            tracing::debug!(len = locations.len(), "lookup by name ok");
        }

        Lookup::new(status_code, result)
    }

    /// Finds the location of a postal code.
    ///
    /// The body is decoded whatever the status, so error statuses usually
    /// surface as [`Error::NotFound`] together with that status.
    pub fn lookup_by_zip(&self, zip: &str) -> Lookup<ZipResult> {
        let span = tracing::info_span!("lookup by zip", zip);
        let _guard = span.enter();

        let response = match self.get(ZIP_PATH, &[("zip", zip)]) {
            Ok(response) => response,
            Err(error) => return Lookup::no_response(error),
        };
        let status_code = Some(response.status_code());

        let result = decode_json::<ZipResult>(response.body()).and_then(|location| {
            if location.is_empty() {
                Err(Error::NotFound {
                    zip: zip.to_string(),
                })
            } else {
                Ok(location)
            }
        });

        tracing::debug!(?status_code, found = result.is_ok(), "lookup by zip done");

        Lookup::new(status_code, result)
    }

    fn endpoint_url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, Error> {
        let mut url = self
            .config
            .base_url
            .join(path)
            .map_err(|error| Error::InvalidArgument {
                value: path.to_string(),
                reason: error.to_string(),
            })?;

        url.query_pairs_mut()
            .extend_pairs(params)
            .append_pair(API_KEY_PARAM, self.config.api_key());

        Ok(url)
    }

    fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<crate::client::Response, Error> {
        let url = self.endpoint_url(path, params)?;

        tracing::debug!(
            url = %crate::string::redact_query(&url, &[API_KEY_PARAM]),
            "request"
        );

        self.transport.get(&Request::new(url))
    }
}

fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, Error> {
    serde_json::from_slice(body).map_err(|error| {
        tracing::debug!(body = %crate::string::preview_bytes(body, 200), "undecodable body");
        Error::from(error)
    })
}
