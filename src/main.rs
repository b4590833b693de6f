//! # logoqr CLI
//!
//! Command-line interface for branded QR code generation.
//!
//! ## Usage
//!
//! ```bash
//! # Read logo.jpeg, write the four artifacts to the working directory
//! logoqr
//!
//! # Different logo, URL and output directory
//! logoqr --logo brand.png --url https://example.com --out-dir build/qr
//!
//! # Drop the logo's white background before compositing
//! logoqr --knockout-white
//!
//! # Debug logging
//! RUST_LOG=logoqr=debug logoqr
//! ```

use std::io;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use logoqr::{
    LogoQrError, OutputProfile, Pipeline, PipelineConfig,
    config::{ArtifactFormat, DEFAULT_DPI, DEFAULT_LOGO, DEFAULT_URL},
    pipeline::{RunEvent, RunSummary, StepStatus},
    qr::QrErrorLevel,
};

/// logoqr - QR codes with a centered logo, for print, screen and editing
#[derive(Parser, Debug)]
#[command(name = "logoqr")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Source logo (any format the image decoder recognizes)
    #[arg(long, value_name = "PATH", default_value = DEFAULT_LOGO)]
    logo: PathBuf,

    /// Text encoded into the QR symbol
    #[arg(long, default_value = DEFAULT_URL)]
    url: String,

    /// Directory receiving all output files
    #[arg(long, value_name = "DIR", default_value = ".")]
    out_dir: PathBuf,

    /// DPI written into the converted logo and the print copy
    #[arg(long, default_value_t = DEFAULT_DPI, value_parser = clap::value_parser!(u32).range(1..=10000))]
    dpi: u32,

    /// Pixels per module for the print copy
    #[arg(long, default_value_t = OutputProfile::PRINT.scale, value_parser = clap::value_parser!(u32).range(1..=64))]
    print_scale: u32,

    /// Pixels per module for the digital copy
    #[arg(long, default_value_t = OutputProfile::DIGITAL.scale, value_parser = clap::value_parser!(u32).range(1..=64))]
    digital_scale: u32,

    /// Units per module for the SVG copy
    #[arg(long, default_value_t = OutputProfile::VECTOR.scale, value_parser = clap::value_parser!(u32).range(1..=64))]
    svg_scale: u32,

    /// Error correction level: l ~7%, m ~15%, q ~25%, h ~30% recovery (h survives the logo covering the center)
    #[arg(long, value_enum, default_value_t = ErrorLevelArg::H)]
    error_level: ErrorLevelArg,

    /// Make near-white logo pixels transparent (optional threshold, default 240)
    #[arg(long, value_name = "THRESHOLD", num_args = 0..=1, default_missing_value = "240")]
    knockout_white: Option<u8>,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ErrorLevelArg {
    L,
    M,
    Q,
    H,
}

impl From<ErrorLevelArg> for QrErrorLevel {
    fn from(level: ErrorLevelArg) -> Self {
        match level {
            ErrorLevelArg::L => QrErrorLevel::L,
            ErrorLevelArg::M => QrErrorLevel::M,
            ErrorLevelArg::Q => QrErrorLevel::Q,
            ErrorLevelArg::H => QrErrorLevel::H,
        }
    }
}

impl Cli {
    fn into_config(self) -> PipelineConfig {
        PipelineConfig {
            logo: self.logo,
            url: self.url,
            error_level: self.error_level.into(),
            out_dir: self.out_dir,
            dpi: self.dpi,
            knockout_white: self.knockout_white,
            outputs: vec![
                OutputProfile::PRINT
                    .with_scale(self.print_scale)
                    .with_dpi(Some(self.dpi)),
                OutputProfile::DIGITAL.with_scale(self.digital_scale),
                OutputProfile::VECTOR.with_scale(self.svg_scale),
            ],
        }
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), LogoQrError> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "logoqr=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(io::stderr)
        .init();

    let summary = Pipeline::new(cli.into_config()).run_with(print_event)?;
    print_hints(&summary);

    Ok(())
}

/// One status line per stage, printed as soon as the stage finishes.
fn print_event(event: RunEvent<'_>) {
    match event {
        RunEvent::LogoConverted(logo) => println!(
            "✅ Logo converted: {} ({}x{}, {} DPI)",
            logo.path.display(),
            logo.width(),
            logo.height(),
            logo.dpi
        ),
        RunEvent::Encoded { payload, modules } => println!(
            "✅ Encoded {} bytes: {}x{} modules, level {:?} (~{:.0}% recovery)",
            payload.data().len(),
            modules,
            modules,
            payload.level(),
            payload.level().recovery_ratio() * 100.0
        ),
        RunEvent::Step(step) => match (&step.status, &step.composite) {
            (StepStatus::Written, Some(report)) => println!(
                "✅ {} QR written: {} ({}x{}, logo {}px)",
                step.profile.name,
                step.path.display(),
                report.width,
                report.height,
                report.placement.size
            ),
            (StepStatus::Written, None) => println!(
                "✅ {} QR written: {} (no logo, add it in your editor)",
                step.profile.name,
                step.path.display()
            ),
            (StepStatus::Failed(reason), _) => {
                println!("❌ {} QR failed: {}", step.profile.name, reason)
            }
        },
    }
}

/// Closing usage hints for every artifact that was written.
fn print_hints(summary: &RunSummary) {
    println!();
    for step in summary.steps.iter().filter(|s| s.is_written()) {
        let hint = match (step.profile.format, step.profile.dpi) {
            (ArtifactFormat::Png, Some(_)) => "🖨️  optimized for printing",
            (ArtifactFormat::Png, None) => "🌐 optimized for screens and the web",
            (ArtifactFormat::Svg, _) => "✏️  editable in Illustrator or Inkscape",
        };
        println!("{} {}", hint, step.path.display());
    }
}
