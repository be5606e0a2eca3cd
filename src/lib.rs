//! Look up coordinates for place names and ZIP codes using the OpenWeather
//! geocoding API.

pub mod client;
pub mod error;
pub mod geocoding;
pub mod http;
pub mod string;
pub mod version;
