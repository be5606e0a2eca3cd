use url::Url;

pub fn preview_bytes(data: &[u8], length: usize) -> String {
    if data.len() <= length {
        String::from_utf8_lossy(data).into_owned()
    } else {
        let mut text = String::from_utf8_lossy(&data[0..length]).into_owned();
        text.push('…');
        text
    }
}

/// Copy of `url` with the values of the named query parameters masked, for
/// logging URLs that carry credentials.
pub fn redact_query(url: &Url, names: &[&str]) -> String {
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(name, value)| {
            if names.iter().any(|n| name == *n) {
                (name.into_owned(), "REDACTED".to_string())
            } else {
                (name.into_owned(), value.into_owned())
            }
        })
        .collect();

    if !pairs.is_empty() {
        redacted.query_pairs_mut().clear().extend_pairs(pairs);
    }

    redacted.to_string()
}
