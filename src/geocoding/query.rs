use std::fmt::Display;

/// Country appended to place names that lack enough qualifiers.
pub const DEFAULT_COUNTRY: &str = "USA";

/// How a location argument is looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationQuery {
    /// Argument parses as an integer.
    Zip(String),
    Name(String),
}

impl LocationQuery {
    pub fn classify<S: Into<String>>(text: S) -> Self {
        let text = text.into();

        if text.parse::<i64>().is_ok() {
            Self::Zip(text)
        } else {
            Self::Name(text)
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Zip(text) | Self::Name(text) => text,
        }
    }
}

impl Display for LocationQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Appends [`DEFAULT_COUNTRY`] unless the name already has at least three
/// comma separated parts, so `"Springfield, IL"` is qualified as well.
pub fn qualify_name(name: &str) -> String {
    if name.split(',').count() < 3 {
        format!("{}, {}", name, DEFAULT_COUNTRY)
    } else {
        name.to_string()
    }
}
