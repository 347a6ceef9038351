//! CLI entry point for pairwise element-map correlation

use clap::Parser;
use corrmaps::io::cli::{Cli, RunProcessor};

fn main() -> corrmaps::Result<()> {
    // Keep the handle alive for the whole run; a failed init leaves logging off
    let _logger = flexi_logger::Logger::try_with_env_or_str("info")
        .and_then(flexi_logger::Logger::start)
        .ok();

    let cli = Cli::parse();
    let mut processor = RunProcessor::new(cli);
    processor.process()
}
