//! Console output utilities.

use console::style;

use crate::config::RunConfig;

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("INFO").cyan().bold(), message);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("OK").green().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print the application banner.
pub fn print_banner() {
    let banner = r#"
╔═══════════════════════════════════════════════════════╗
║     twmd                                              ║
║     Apiless Twitter/X media downloader                ║
╚═══════════════════════════════════════════════════════╝
"#;
    println!("{}", style(banner).cyan());
}

/// Print configuration summary.
pub fn print_config_summary(config: &RunConfig) {
    let target = match (&config.single_post_id, &config.user) {
        (Some(id), _) => format!("post {}", id),
        (None, Some(user)) => format!("@{} (up to {} posts)", user, config.limit),
        (None, None) => "-".to_string(),
    };

    let media = match (config.download_images, config.download_videos) {
        (true, true) => "images, videos",
        (true, false) => "images",
        (false, true) => "videos",
        (false, false) => "-",
    };

    let retweets = if config.only_retweets {
        "only"
    } else if config.include_retweets {
        "included"
    } else {
        "excluded"
    };

    println!();
    println!("{}", style("Configuration:").bold());
    println!("  Target:    {}", target);
    println!("  Mode:      {}", config.mode());
    println!("  Media:     {} ({})", media, config.size);
    println!("  Retweets:  {}", retweets);
    println!("  Directory: {}", config.output_root.display());
    if config.skip_existing {
        println!("  Update:    skipping existing files");
    }
    if config.url_only {
        println!("  URL only:  nothing will be downloaded");
    }
    if let Some(proxy) = &config.proxy {
        println!("  Proxy:     {}", proxy);
    }
    println!();
}
