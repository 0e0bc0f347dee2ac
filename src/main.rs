use clap::Parser;
use sonda::cli::{Cli, OutputFormat};
use sonda::error::SmokeError;
use sonda::json_output::JsonSmokeReport;
use sonda::smoke::{self, SmokeConfig};
use std::io::{self, Write};
use std::process;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Text mode: fd diagnostic line, then the read phase echoed verbatim
fn run_text(config: &SmokeConfig) -> Result<(), SmokeError> {
    if !config.skip_write {
        let write = smoke::write_phase(&config.path, &config.payload)?;
        println!("fd: {}", write.fd);
    }
    if !config.skip_read {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        smoke::read_phase(&config.path, &mut out)?;
        let _ = out.flush();
    }
    Ok(())
}

/// JSON mode: capture the echo, print a single report document
fn run_json(config: &SmokeConfig) -> anyhow::Result<()> {
    let mut echoed = Vec::new();
    let report = smoke::run(config, &mut echoed)?;
    let json = JsonSmokeReport::from_report(&config.path, &report, &echoed);
    println!("{}", json.render()?);
    Ok(())
}

fn main() {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    if args.skip_write && args.skip_read {
        eprintln!("Nothing to do: --skip-write and --skip-read are both set");
        process::exit(1);
    }

    let config = SmokeConfig {
        path: args.path,
        payload: args.payload.into_bytes(),
        skip_write: args.skip_write,
        skip_read: args.skip_read,
    };

    let result: anyhow::Result<()> = match args.format {
        OutputFormat::Text => run_text(&config).map_err(Into::into),
        OutputFormat::Json => run_json(&config),
    };

    if let Err(err) = result {
        // The original harness prints the read-phase open failure on stdout
        // as a fixed message; every other failure goes to stderr with the
        // OS error description.
        let generic = err
            .downcast_ref::<SmokeError>()
            .is_some_and(SmokeError::is_generic);
        if generic {
            println!("{err}");
        } else {
            eprintln!("{err}");
        }
        process::exit(1);
    }
}
