use std::path::PathBuf;

use clap::Parser;

use crate::department::Department;

#[derive(Parser, Debug, Clone)]
#[command(name = "clinic_desk", version, about = "Clinic operations desk")]
pub struct Cli {
    /// Department to open at startup
    #[arg(short, long, value_enum)]
    pub department: Option<Department>,

    /// Settings file (defaults to the per-user location)
    #[arg(long, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Milliseconds between ticks
    #[arg(short, long, value_name = "MS")]
    pub tick_rate: Option<u64>,

    /// Frames per second
    #[arg(short, long, value_name = "FPS")]
    pub frame_rate: Option<f64>,

    /// Milliseconds the aside stays locked after a department switch
    #[arg(long, value_name = "MS")]
    pub settle_delay: Option<u64>,
}
