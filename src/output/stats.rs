//! Statistics reporting.

use console::style;

use crate::download::RunStats;

/// Print the end-of-run statistics block.
pub fn print_run_stats(stats: &RunStats) {
    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!("{}", style("Statistics:").bold());
    println!("  Posts:      {}", stats.posts_processed);
    println!("  Images:     {}", stats.images);
    println!("  Videos:     {}", stats.videos);
    println!("  Thumbnails: {}", stats.thumbnails);
    println!("  Sidecars:   {}", stats.sidecars);
    println!("  Skipped:    {} (already present)", stats.skipped);
    if stats.listed > 0 {
        println!("  Listed:     {}", stats.listed);
    }
    if stats.failed > 0 {
        println!("  Failed:     {}", style(stats.failed).red());
    }
    println!("  Total:      {} downloaded", stats.total_downloaded());
    println!("{}", style("═".repeat(50)).dim());
}
