//! twmd - CLI entry point.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use twmd::{
    cli::Args,
    config::{resolve_run_config, Config, DownloadMode},
    download::{run_single, run_timeline, Fetcher, Orchestrator},
    error::{exit_codes, Error, Result},
    fs::prepare_output_dirs,
    output::{print_banner, print_config_summary, print_error, print_run_stats, print_success},
    session::{establish_session, FileSessionStore},
    source::{ArchivePostSource, PostSource},
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            let code = if e.is_config() {
                exit_codes::CONFIG_ERROR
            } else if e.is_source() {
                exit_codes::SOURCE_ERROR
            } else {
                exit_codes::UNEXPECTED_ERROR
            };
            ExitCode::from(code as u8)
        }
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    // Load configuration
    let config_path = args.config.clone();
    let mut config = if config_path.exists() {
        Config::load(&config_path)?
    } else {
        tracing::debug!(
            "Configuration file not found: {}, using CLI arguments only",
            config_path.display()
        );
        Config::default()
    };

    // Merge CLI arguments into config
    args.merge_into_config(&mut config);

    if config.options.show_banner {
        print_banner();
    }

    // Validate configuration
    let run_config = Arc::new(resolve_run_config(&config)?);
    print_config_summary(&run_config);

    // Open the post source
    let archive = config.source.archive.as_deref().ok_or_else(|| {
        Error::MissingConfig(
            "post source (specify a timeline archive with --archive or [source] archive)"
                .to_string(),
        )
    })?;
    let source = ArchivePostSource::open(archive)?;
    tracing::info!("Reading posts from {}", source.path().display());

    // Log in if requested
    if config.session.login || config.session.use_cookies {
        let store = FileSessionStore::new(&config.session.cookie_file);
        let credentials = {
            let stdin = std::io::stdin();
            let mut input = stdin.lock();
            establish_session(&store, config.session.use_cookies, &mut input)?
        };
        source.authenticate(&credentials).await?;
        print_success(&format!("Session saved to {}", store.path().display()));
    }

    let fetcher = Fetcher::new(&run_config)?;
    prepare_output_dirs(&run_config)?;

    let orchestrator = Orchestrator::new(run_config.clone(), fetcher, Arc::new(source));

    let stats = match (run_config.mode(), run_config.single_post_id.as_deref()) {
        (DownloadMode::Single, Some(id)) => run_single(&orchestrator, id).await?,
        _ => run_timeline(&orchestrator).await?,
    };

    print_run_stats(&stats);

    if stats.failed > 0 {
        tracing::warn!("{} job(s) failed, see the log above", stats.failed);
    }

    Ok(())
}
