//! CLI argument parsing and configuration.

use std::io;
use std::path::PathBuf;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Configuration from CLI arguments. Everything here overrides the
/// config file.
#[derive(Debug, Default)]
pub struct CliConfig {
    pub config_path: Option<PathBuf>,
    pub hero_style: Option<String>,
    pub api_url: Option<String>,
    pub debug: bool,
}

/// Print usage information
pub fn print_usage() {
    eprintln!("Blockhead TUI - terminal front-end for the Blockhead Consulting site");
    eprintln!();
    eprintln!("Usage: blockhead-tui [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --config <PATH>      Path to a config JSON file");
    eprintln!("  --hero-style <NAME>      Hero style profile (professional, cyberpunk)");
    eprintln!("  --api-url <URL>          Base URL for the booking/contact API");
    eprintln!("  -d, --debug              Enable debug logging to blockhead-tui.log");
    eprintln!("  -h, --help               Show this help message");
    eprintln!("  -V, --version            Show version");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  blockhead-tui                                # Embedded defaults");
    eprintln!("  blockhead-tui --hero-style cyberpunk         # Typewriter entrance");
    eprintln!("  blockhead-tui -c site.json --api-url http://localhost:8080");
}

/// Parse CLI arguments and return configuration
pub fn parse_args() -> io::Result<CliConfig> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        print_usage();
        std::process::exit(0);
    }
    if args.iter().any(|a| a == "-V" || a == "--version") {
        println!("blockhead-tui {}", VERSION);
        std::process::exit(0);
    }
    parse_from(&args)
}

fn parse_from(args: &[String]) -> io::Result<CliConfig> {
    let mut cli = CliConfig::default();

    let mut i = 0;
    while i < args.len() {
        let arg = &args[i];
        if arg == "-c" || arg == "--config" {
            i += 1;
            let value = args.get(i).ok_or_else(|| {
                print_usage();
                io::Error::new(io::ErrorKind::InvalidInput, "Missing value for --config")
            })?;
            cli.config_path = Some(PathBuf::from(value));
            i += 1;
        } else if arg == "--hero-style" {
            i += 1;
            let value = args.get(i).ok_or_else(|| {
                print_usage();
                io::Error::new(io::ErrorKind::InvalidInput, "Missing value for --hero-style")
            })?;
            cli.hero_style = Some(value.clone());
            i += 1;
        } else if arg == "--api-url" {
            i += 1;
            let value = args.get(i).ok_or_else(|| {
                print_usage();
                io::Error::new(io::ErrorKind::InvalidInput, "Missing value for --api-url")
            })?;
            cli.api_url = Some(value.clone());
            i += 1;
        } else if arg == "-d" || arg == "--debug" {
            cli.debug = true;
            i += 1;
        } else {
            print_usage();
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Unknown argument: {}", arg),
            ));
        }
    }

    Ok(cli)
}
