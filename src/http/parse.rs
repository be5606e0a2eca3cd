use crate::error::{Error, ParseError};

use super::ResponseHeader;

/// Returns the offset just past the blank line ending a header block.
pub fn scan_header_boundary(data: &[u8]) -> Option<usize> {
    let mut index = 0;

    for line in data.split_inclusive(|&v| v == b'\n') {
        index += line.len();

        if line.iter().all(|v| v.is_ascii_whitespace()) && line.ends_with(&[b'\n']) {
            return Some(index);
        }
    }

    None
}

pub(super) fn parse_response_header(data: &[u8]) -> Result<ResponseHeader, Error> {
    let mut headers = [httparse::EMPTY_HEADER; 64];
    let mut response = httparse::Response::new(&mut headers);

    match response.parse(data) {
        Ok(httparse::Status::Complete(_)) => Ok(response.into()),
        Ok(httparse::Status::Partial) => {
            Err(ParseError::new("HTTP response header incomplete").into())
        }
        Err(error) => Err(ParseError::new("HTTP response header parse error")
            .with_source(Box::new(error))
            .into()),
    }
}

impl From<httparse::Response<'_, '_>> for ResponseHeader {
    fn from(value: httparse::Response<'_, '_>) -> Self {
        let mut header = ResponseHeader::new();
        header.version = format!("HTTP/1.{}", value.version.unwrap_or(1));
        header.status_code = value.code.unwrap_or_default();
        header.reason_phrase = value.reason.unwrap_or_default().to_string();

        for field in value.headers.iter() {
            header
                .fields
                .append(field.name, String::from_utf8_lossy(field.value));
        }

        header
    }
}
