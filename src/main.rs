mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commands::ExtractParams;
use wpreport::config::{Config, LoggingConfig};

#[derive(Parser)]
#[command(
    name = "wpreport",
    version,
    about = "Extract WordPress REST API content into JSON snapshots and summarize it",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json); overrides the configured format
    #[arg(long, global = true)]
    log_format: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render report.txt from the JSON snapshots in a directory
    Report {
        /// Directory holding info.json, categories.json, posts.json, ...
        output_dir: PathBuf,
    },

    /// Fetch a site's REST collections into a directory, then report on them
    Extract {
        /// Site base URL (scheme optional)
        target: String,

        /// Directory receiving the snapshots and report.txt
        output_dir: PathBuf,

        /// TOML configuration file (defaults to WPREPORT_* environment variables)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Proxy server URL
        #[arg(long)]
        proxy: Option<String>,

        /// Cookies in Cookie header format ("a=1; b=2")
        #[arg(long)]
        cookies: Option<String>,

        /// Basic authentication user name
        #[arg(short, long)]
        user: Option<String>,

        /// Basic authentication password
        #[arg(short, long, requires = "user")]
        password: Option<String>,

        /// Skip TLS certificate verification
        #[arg(long, default_value = "false")]
        insecure: bool,

        /// Items requested per page (1-100)
        #[arg(long)]
        per_page: Option<u32>,
    },
}

fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version are not usage errors
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = parse_cli();

    let logging = logging_config(&cli);
    let format = cli.log_format.as_deref().unwrap_or(&logging.format);
    setup_tracing(&logging, format, cli.verbose)?;

    match cli.command {
        Commands::Report { output_dir } => {
            tracing::info!(output_dir = %output_dir.display(), "Starting report command");
            commands::report(output_dir)?;
        }

        Commands::Extract {
            target,
            output_dir,
            config,
            proxy,
            cookies,
            user,
            password,
            insecure,
            per_page,
        } => {
            tracing::info!(
                target = %target,
                output_dir = %output_dir.display(),
                proxy = ?proxy,
                insecure = %insecure,
                "Starting extract command"
            );
            commands::extract(ExtractParams {
                target,
                output_dir,
                config,
                proxy,
                cookies,
                user,
                password,
                insecure,
                per_page,
            })
            .await?;
        }
    }

    Ok(())
}

/// Logging settings from the extract config file, else from the environment
fn logging_config(cli: &Cli) -> LoggingConfig {
    let config = match &cli.command {
        Commands::Extract {
            config: Some(path), ..
        } => Config::from_file(path),
        _ => Config::from_env(),
    };
    // A broken config file is reported by the command itself.
    config.map(|c| c.logging).unwrap_or_default()
}

fn setup_tracing(logging: &LoggingConfig, format: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new(logging.filter_directive(true))
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(logging.filter_directive(false)))
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}
