use std::num::NonZeroU32;
use std::path::PathBuf;

use adforge_core::ProviderId;
use clap::Parser;

/// adforge ad-creative generator
#[derive(Debug, Parser)]
#[command(
    name = "adforge",
    about = "Batch ad-creative image generation across text-to-image vendors"
)]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "adforge.toml", env = "ADFORGE_CONFIG")]
    pub config: PathBuf,

    /// Product name
    #[arg(long)]
    pub product: String,

    /// Short product description
    #[arg(long)]
    pub description: String,

    /// Target audience
    #[arg(long)]
    pub audience: String,

    /// Creative angle; repeat the flag for a batch of labeled variants
    #[arg(long = "angle", required = true)]
    pub angles: Vec<String>,

    /// Vendor to generate with ("fal" or "freepik")
    #[arg(long, default_value = "fal")]
    pub provider: ProviderId,

    /// Images requested per variant (only the first is kept per label)
    #[arg(long, default_value = "1")]
    pub num_images: NonZeroU32,

    /// Directory to write inline image payloads into as PNG files
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
}
