use std::{
    io::{StdoutLock, Write},
    time::Duration,
};

use clap::CommandFactory;
use geolocate::{
    client::{self, Client},
    error::Error,
    geocoding::{self, Geocoder, LocationQuery, NameResult, ZipResult, API_KEY_VAR},
};
use serde::Serialize;

use super::args::ProgramArgs;

const API_KEY_HELP_URL: &str = "https://openweathermap.org/api";

/// Conditions that end the program with a failure status.
#[derive(Debug, thiserror::Error)]
pub enum Failure {
    #[error(
        "No location arguments provided, please provide at least one location name, ZIP or Postal Code.\n\n{usage}"
    )]
    NoLocations { usage: String },

    #[error(
        "'{}' not set. Please visit '{}' and obtain an API key.\nSet the key before running 'geo' with:\n\texport {}=<your openweather api key>",
        API_KEY_VAR,
        API_KEY_HELP_URL,
        API_KEY_VAR
    )]
    MissingApiKey,

    #[error(
        "'{}' is invalid. Please ensure you have the correct key from '{}'.",
        API_KEY_VAR,
        API_KEY_HELP_URL
    )]
    InvalidApiKey,

    #[error("No matches found for '{location}'.")]
    NoMatches { location: String },

    #[error("unexpected error when getting the location '{location}': {source}")]
    Unexpected {
        location: String,
        #[source]
        source: Error,
    },
}

pub fn run(args: &ProgramArgs) -> anyhow::Result<()> {
    if args.locations.is_empty() {
        let usage = ProgramArgs::command().render_usage().to_string();
        return Err(Failure::NoLocations { usage }.into());
    }

    let api_key = match std::env::var(API_KEY_VAR) {
        Ok(key) if !key.is_empty() => key,
        _ => return Err(Failure::MissingApiKey.into()),
    };

    let geocoder = make_geocoder(args, api_key)?;
    let mut stdout = std::io::stdout().lock();

    for location in &args.locations {
        let query = LocationQuery::classify(location.as_str());
        tracing::debug!(?query, "locate");

        match query {
            LocationQuery::Zip(zip) => locate_zip(&geocoder, &zip, args.json, &mut stdout)?,
            LocationQuery::Name(name) => locate_name(&geocoder, &name, args.json, &mut stdout)?,
        }
    }

    Ok(())
}

fn make_geocoder(args: &ProgramArgs, api_key: String) -> anyhow::Result<Geocoder> {
    let mut config = geocoding::Config::new(api_key);

    if let Some(endpoint) = &args.endpoint {
        config.set_base_url(endpoint.clone())?;
    }

    let mut client_config = client::Config::new();
    client_config
        .set_timeout(args.timeout.map(Duration::from_secs))
        .set_connect_timeout(Duration::from_secs(args.connect_timeout))
        .set_tls_verification(!args.insecure);

    Ok(Geocoder::new(config, Client::new(client_config)))
}

fn locate_zip(
    geocoder: &Geocoder,
    zip: &str,
    json: bool,
    stdout: &mut StdoutLock,
) -> anyhow::Result<()> {
    if !json {
        writeln!(stdout, "'{}' results:", zip)?;
    }

    let lookup = geocoder.lookup_by_zip(zip);

    if lookup.is_unauthorized() {
        return Err(Failure::InvalidApiKey.into());
    }

    let location = match lookup.into_result() {
        Ok(location) => location,
        Err(error) => return Err(classify_error(zip, error).into()),
    };

    if json {
        print_json(stdout, zip, std::slice::from_ref(&location))?;
    } else {
        print_zip_result(stdout, &location)?;
    }

    Ok(())
}

fn locate_name(
    geocoder: &Geocoder,
    name: &str,
    json: bool,
    stdout: &mut StdoutLock,
) -> anyhow::Result<()> {
    if !json {
        writeln!(stdout, "'{}' results:", name)?;
    }

    let lookup = geocoder.lookup_by_name(name);

    if lookup.is_unauthorized() {
        return Err(Failure::InvalidApiKey.into());
    }

    if let Some(status_code) = lookup
        .status_code()
        .filter(|code| !(200..300).contains(code))
    {
        tracing::warn!(
            status_code,
            location = name,
            "geocoding service returned an error status"
        );
    }

    let locations = match lookup.into_result() {
        Ok(locations) => locations,
        Err(error) => return Err(classify_error(name, error).into()),
    };

    if locations.is_empty() {
        return Err(Failure::NoMatches {
            location: name.to_string(),
        }
        .into());
    }

    if json {
        print_json(stdout, name, &locations)?;
    } else {
        print_name_results(stdout, &locations)?;
    }

    Ok(())
}

fn classify_error(location: &str, error: Error) -> Failure {
    if error.is_not_found() {
        Failure::NoMatches {
            location: location.to_string(),
        }
    } else {
        Failure::Unexpected {
            location: location.to_string(),
            source: error,
        }
    }
}

fn print_name_results<W: Write>(output: &mut W, locations: &[NameResult]) -> std::io::Result<()> {
    for location in locations {
        writeln!(output, "{}\n", location)?;
    }

    output.flush()
}

fn print_zip_result<W: Write>(output: &mut W, location: &ZipResult) -> std::io::Result<()> {
    writeln!(output, "{}\n", location)?;
    output.flush()
}

fn print_json<W: Write, T: Serialize>(
    output: &mut W,
    query: &str,
    results: &[T],
) -> anyhow::Result<()> {
    let doc = OutputDoc { query, results };
    let text = serde_json::to_string_pretty(&doc)?;
    writeln!(output, "{}", text)?;
    output.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct OutputDoc<'a, T: Serialize> {
    query: &'a str,
    results: &'a [T],
}
