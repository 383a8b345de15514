// CLI module for the gardener gateway
// Author: kelexine (https://github.com/kelexine)

use clap::Parser;
use std::path::PathBuf;

/// gardener-gateway - Offline-capable asset gateway for the Gardener plant-care assistant
#[derive(Parser, Debug)]
#[command(name = "gardener-gateway", version, about, long_about = None)]
pub struct Args {
    /// Path to an alternate configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}
