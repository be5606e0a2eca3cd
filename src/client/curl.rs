use std::cell::RefCell;

use curl::easy::{Easy, InfoType, List};

use crate::{
    error::{BoxedError, Error, OtherError, ProtocolError},
    http::{FieldName, ResponseHeader},
};

use super::{Config, Request, Response};

pub(super) fn perform_get(config: &Config, request: &Request) -> Result<Response, Error> {
    let mut curl_handle = Easy::new();
    set_up(&mut curl_handle, config, request)?;

    let collector = RefCell::new(ResponseCollector::new());

    let result = {
        let mut transfer = curl_handle.transfer();

        transfer.debug_function(debug_function)?;
        transfer.header_function(|data| collector.borrow_mut().header_function(data))?;
        transfer.write_function(|data| Ok(collector.borrow_mut().write_function(data)))?;

        transfer.perform()
    };

    let collector = collector.into_inner();

    if let Some(error) = collector.error {
        return Err(Error::Other(OtherError::Custom(error)));
    }

    result?;

    match collector.header {
        Some(header) => {
            tracing::debug!(
                status_code = header.status_code,
                body_len = collector.body.len(),
                "http response"
            );
            Ok(Response::new(header, collector.body))
        }
        None => Err(ProtocolError::InvalidResponse("no HTTP response header received".into()).into()),
    }
}

fn set_up(curl_handle: &mut Easy, config: &Config, request: &Request) -> Result<(), Error> {
    curl_handle.verbose(true)?;
    curl_handle.get(true)?;
    curl_handle.url(request.url().as_str())?;
    curl_handle.ssl_verify_host(config.tls_verification())?;
    curl_handle.ssl_verify_peer(config.tls_verification())?;
    curl_handle.connect_timeout(config.connect_timeout())?;

    if let Some(timeout) = config.timeout() {
        curl_handle.timeout(timeout)?;
    }

    if !config.http_user_agent().is_empty() {
        curl_handle.useragent(config.http_user_agent())?;
    }

    let mut header_list = List::new();

    for (name, value) in config.http_headers() {
        if !request.http_headers().contains_key(name) {
            header_list.append(&format_header_field(name, value))?;
        }
    }

    for (name, value) in request.http_headers() {
        header_list.append(&format_header_field(name, value))?;
    }

    curl_handle.http_headers(header_list)?;

    Ok(())
}

fn debug_function(info_type: InfoType, data: &[u8]) {
    match info_type {
        InfoType::Text => {
            let text = String::from_utf8_lossy(data);
            tracing::debug!(text = text.trim_end(), "curl");
        }
        InfoType::HeaderIn | InfoType::HeaderOut | InfoType::DataIn | InfoType::DataOut => {
            tracing::trace!(?info_type, data = ?crate::string::preview_bytes(data, 100), "debug");
        }
        _ => {}
    }
}

/// Accumulates the final response header block and the body.
#[derive(Default)]
struct ResponseCollector {
    header_buf: Vec<u8>,
    header: Option<ResponseHeader>,
    body: Vec<u8>,
    error: Option<BoxedError>,
}

impl ResponseCollector {
    fn new() -> Self {
        Self::default()
    }

    fn header_function(&mut self, data: &[u8]) -> bool {
        if self.header.is_some() {
            if !data.starts_with(b"HTTP/") {
                // trailer fields
                return true;
            }

            // Another response follows, such as the origin's reply after a
            // proxy CONNECT.
            tracing::debug!("superseded response header block");
            self.header = None;
            self.header_buf.clear();
            self.body.clear();
        }

        self.header_buf.extend_from_slice(data);

        if crate::http::scan_header_boundary(&self.header_buf).is_none() {
            return true;
        }

        match ResponseHeader::parse(&self.header_buf) {
            Ok(header) if header.is_informational() => {
                tracing::debug!(status_code = header.status_code, "informational response");
                self.header_buf.clear();
                true
            }
            Ok(header) => {
                tracing::info!(
                    status_code = header.status_code,
                    reason_phrase = &header.reason_phrase,
                    content_type = header.fields.get("content-type"),
                    "http response header"
                );
                self.header = Some(header);
                true
            }
            Err(error) => {
                self.error = Some(Box::new(error));
                false
            }
        }
    }

    fn write_function(&mut self, data: &[u8]) -> usize {
        self.body.extend_from_slice(data);
        data.len()
    }
}

fn format_header_field(name: &FieldName, value: &str) -> String {
    format!("{}: {}", name, value)
}
