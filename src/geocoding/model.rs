use std::fmt::Display;

use serde::{Deserialize, Deserializer, Serialize};

/// A place matched by name.
///
/// See <https://openweathermap.org/api/geocoding-api#direct_name>.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NameResult {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub lat: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub lon: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub country: String,
    #[serde(deserialize_with = "null_as_default")]
    pub state: String,
}

/// A postal code match.
///
/// The service answers unknown codes with an error object, which decodes into
/// a record whose `zip` is empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZipResult {
    #[serde(deserialize_with = "null_as_default")]
    pub zip: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub lat: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub lon: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub country: String,
}

impl ZipResult {
    pub fn is_empty(&self) -> bool {
        self.zip.is_empty()
    }
}

/// Reads a JSON `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Display for NameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "  Name: {}, {}, {}", self.name, self.state, self.country)?;
        write!(f, "  Lat,Lon: {:.6}, {:.6}", self.lat, self.lon)
    }
}

impl Display for ZipResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "  Name: {}, {}, {}", self.name, self.country, self.zip)?;
        write!(f, "  Lat,Lon: {:.6}, {:.6}", self.lat, self.lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_name_results_in_order() {
        let body = r#"[
            {"name": "Richmond", "local_names": {"en": "Richmond"}, "lat": 37.5385087, "lon": -77.43428, "country": "US", "state": "Virginia"},
            {"name": "Richmond", "lat": -37.8182, "lon": 144.9984, "country": "AU", "state": "Victoria"},
            {"name": "Richmond", "lat": 51.4613, "lon": -0.3037, "country": "GB"}
        ]"#;

        let results: Vec<NameResult> = serde_json::from_str(body).unwrap();

        assert_eq!(
            results,
            vec![
                NameResult {
                    name: "Richmond".to_string(),
                    lat: 37.5385087,
                    lon: -77.43428,
                    country: "US".to_string(),
                    state: "Virginia".to_string(),
                },
                NameResult {
                    name: "Richmond".to_string(),
                    lat: -37.8182,
                    lon: 144.9984,
                    country: "AU".to_string(),
                    state: "Victoria".to_string(),
                },
                NameResult {
                    name: "Richmond".to_string(),
                    lat: 51.4613,
                    lon: -0.3037,
                    country: "GB".to_string(),
                    state: String::new(),
                },
            ]
        );
    }

    #[test]
    fn test_decode_null_fields_as_empty() {
        let body = r#"[
            {"name": "Richmond", "lat": 37.5385087, "lon": -77.43428, "country": "US", "state": null},
            {"name": null, "lat": null, "lon": 144.9984, "country": "AU"}
        ]"#;

        let results: Vec<NameResult> = serde_json::from_str(body).unwrap();

        assert_eq!(results[0].state, "");
        assert_eq!(results[0].country, "US");
        assert_eq!(results[1].name, "");
        assert_eq!(results[1].lat, 0.0);
        assert_eq!(results[1].lon, 144.9984);

        let result: ZipResult =
            serde_json::from_str(r#"{"zip": null, "name": "Nowhere", "country": null}"#).unwrap();

        assert!(result.is_empty());
        assert_eq!(result.name, "Nowhere");
    }

    #[test]
    fn test_decode_wrong_type_is_error() {
        let result = serde_json::from_str::<Vec<NameResult>>(r#"[{"name": 5}]"#);

        assert!(result.is_err());
    }

    #[test]
    fn test_decode_zip_error_body_is_empty() {
        let result: ZipResult =
            serde_json::from_str(r#"{"cod": "404", "message": "not found"}"#).unwrap();

        assert!(result.is_empty());
    }

    #[test]
    fn test_display_name_result() {
        let result = NameResult {
            name: "Henrico".to_string(),
            lat: 37.4957017,
            lon: -77.3352574,
            country: "US".to_string(),
            state: "Virginia".to_string(),
        };

        assert_eq!(
            result.to_string(),
            "  Name: Henrico, Virginia, US\n  Lat,Lon: 37.495702, -77.335257"
        );
    }

    #[test]
    fn test_display_zip_result() {
        let result = ZipResult {
            zip: "23228".to_string(),
            name: "Henrico County".to_string(),
            lat: 37.4638,
            lon: -77.398,
            country: "US".to_string(),
        };

        assert_eq!(
            result.to_string(),
            "  Name: Henrico County, US, 23228\n  Lat,Lon: 37.463800, -77.398000"
        );
    }
}
