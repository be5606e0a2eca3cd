use std::{fs::File, path::Path, sync::Mutex};

use reopen::Reopen;
use tracing::metadata::LevelFilter;
use tracing_subscriber::{filter::Targets, prelude::*};

use super::args::ProgramArgs;

const CRATE_TARGETS: [&str; 2] = ["geolocate", "geo"];

pub fn set_up_logging(args: &ProgramArgs) -> anyhow::Result<()> {
    tracing_log::LogTracer::init()?;

    let filter = make_filter(args.log_level);
    let subscriber = tracing_subscriber::Registry::default().with(filter);

    // Standard output carries the results, so console logging goes to stderr.
    let layer = if args.log_file.is_none() && !args.log_journald {
        Some(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
    } else {
        None
    };
    let subscriber = subscriber.with(layer);

    let layer = match &args.log_file {
        Some(path) => {
            let file = open_reopenable(path)?;
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };
    let subscriber = subscriber.with(layer);

    let layer = if args.log_journald {
        Some(tracing_journald::layer()?)
    } else {
        None
    };
    let subscriber = subscriber.with(layer);

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

fn make_filter(level: LevelFilter) -> Targets {
    if level == LevelFilter::TRACE {
        Targets::new().with_default(level)
    } else {
        CRATE_TARGETS
            .iter()
            .fold(Targets::new(), |targets, target| targets.with_target(*target, level))
    }
}

/// Log file that is reopened on SIGHUP, for use with logrotate.
fn open_reopenable(path: &Path) -> anyhow::Result<Reopen<File>> {
    let path = path.to_owned();
    let file = Reopen::new(Box::new(move || {
        File::options().create(true).append(true).open(&path)
    }))?;
    file.handle().register_signal(signal_hook::consts::SIGHUP)?;

    Ok(file)
}
