use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about = "Paint on your webcam feed with a pinch", long_about = None)]
pub struct Args {
    /// Camera index (overrides the config file)
    #[arg(short, long)]
    pub cam_index: Option<u32>,

    /// JSON config file; defaults are used when it does not exist
    #[arg(long, default_value = "gesture-paint.json")]
    pub config: PathBuf,

    /// Show the camera unmirrored
    #[arg(long, default_value_t = false)]
    pub no_mirror: bool,

    /// Seed for the spray brush (reproducible patterns)
    #[arg(long)]
    pub seed: Option<u64>,
}
