mod args;
mod locate;
mod logging;

use clap::Parser;

use self::args::ProgramArgs;

pub use self::locate::Failure;

pub fn run() -> anyhow::Result<()> {
    curl::init();

    let args = ProgramArgs::parse();

    logging::set_up_logging(&args)?;

    locate::run(&args)
}
