//! Query the General Catalogue of Photometric Data
//!
//! Prints, for each requested photometric system, the magnitudes of a star in the
//! line format read by SED fitting tools, followed by the bibliography.
//!
//! Usage:
//! ```text
//! gcpd --target HD174881 --system UBV --system uvby
//! gcpd --target HD174881 --systemlist
//! gcpd --supported
//! gcpd --target HD174881 --system UBV --file page.html
//! ```
//!
//! See --help for detailed options.

use anyhow::{bail, Context, Result};
use camino::Utf8PathBuf;
use clap::Parser;
use gcpd::{
    config::GcpdConfig,
    constants::DEFAULT_SYSTEM,
    env_state::DocumentFetcher,
    gcpd::{Gcpd, PhotometryResult},
    gcpd_errors::GcpdError,
    photometry::registry::SystemRegistry,
    report::render,
};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(
    name = "gcpd",
    about = "Retrieves stellar photometry from the General Catalogue of Photometric Data",
    long_about = None
)]
struct Args {
    /// Star designation (HD, SAO, HIP or PPM number, e.g. HD174881)
    #[arg(short, long)]
    target: Option<String>,

    /// Photometric system identifier or alias, may be repeated
    #[arg(short, long = "system", default_values_t = [DEFAULT_SYSTEM.to_string()])]
    systems: Vec<String>,

    /// Free text sent as the `rem` query parameter
    #[arg(long, default_value = "")]
    rem: String,

    /// Do not print the bibliography
    #[arg(long)]
    no_references: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// List the systems measured for the target instead of its photometry
    #[arg(long)]
    systemlist: bool,

    /// List the supported photometric systems
    #[arg(long)]
    supported: bool,

    /// Parse a saved photometry document instead of querying the server
    #[arg(long)]
    file: Option<Utf8PathBuf>,

    /// JSON client configuration (endpoints, query type, timeout)
    #[arg(long)]
    config: Option<Utf8PathBuf>,

    /// HTTP timeout in seconds, overrides the configuration
    #[arg(long)]
    timeout: Option<u64>,

    /// Increase log verbosity
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(args: &Args) -> Result<GcpdConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read configuration {path}"))?;
            GcpdConfig::from_json_str(&json)?
        }
        None => GcpdConfig::default(),
    };
    if let Some(timeout) = args.timeout {
        config.timeout_secs = timeout;
        config.validate()?;
    }
    Ok(config)
}

/// Comment line reported when one system cannot be processed.
fn failure_line(target: &str, system: &str, err: &GcpdError) -> String {
    match err {
        GcpdError::NoData(_) => format!("# No data for star {target} in photosystem {system}"),
        GcpdError::UnknownSystem(_) => format!("# Unknown photometric system {system}"),
        GcpdError::Http(err) => format!("# HTTP error for photosystem {system}: {err}"),
        err => format!("# Failed to process photosystem {system}: {err}"),
    }
}

fn print_result(args: &Args, target: &str, result: &PhotometryResult) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        print!("{}", render(target, result, !args.no_references));
    }
    Ok(())
}

fn print_system_list<F: DocumentFetcher>(gcpd: &Gcpd<F>, args: &Args, target: &str) -> Result<()> {
    let list = gcpd.system_list(target)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&list)?);
        return Ok(());
    }
    println!("# photometric systems available for {target}");
    for (i, designation) in list.designations.iter().enumerate() {
        match list.system_numbers.get(i) {
            Some(number) => println!("{number}\t{designation}"),
            None => println!("\t{designation}"),
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if args.supported {
        for system in SystemRegistry::global().systems() {
            println!(
                "{}\t{}\t{}",
                system.key(),
                system.common_name,
                system.bands.join(" ")
            );
        }
        return Ok(());
    }

    let Some(target) = args.target.clone() else {
        bail!("--target is required unless --supported is given");
    };
    let gcpd = Gcpd::new(load_config(&args)?);

    if args.systemlist {
        return print_system_list(&gcpd, &args, &target);
    }

    for system in &args.systems {
        let result = match &args.file {
            Some(path) => gcpd.photometry_from_file(system, path),
            None => gcpd.photometry(&target, system, &args.rem),
        };
        match result {
            Ok(result) => print_result(&args, &target, &result)?,
            Err(err) => {
                log::debug!("{system}: {err}");
                println!("{}", failure_line(&target, system, &err));
            }
        }
    }
    Ok(())
}
