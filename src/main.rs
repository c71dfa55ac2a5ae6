use clap::Parser;
use prefix_expand::config::{Cli, Config};
use prefix_expand::logging::init_logging;
use std::error::Error;
use std::io::{self, BufWriter, Write};

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    let config = Config::from(Cli::parse());
    init_logging(&config.log_config)?;
    //
    log::info!("#Start main() file={} mode={:?}", config.file, config.mode);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let lines = prefix_expand::run(&config, &mut out)?;
    out.flush()?;

    log::info!("#End main() wrote {lines} line(s)");
    Ok(())
}
