//! # Generation Pipeline
//!
//! Runs one batch: check the logo, convert it, encode the payload once, then
//! produce every configured artifact.
//!
//! ## Failure Policy
//!
//! | Step | On failure |
//! |------|------------|
//! | Logo lookup | fatal, nothing written |
//! | Logo conversion | fatal, no composite is attempted |
//! | QR encoding | fatal |
//! | Each artifact | logged and recorded, next artifact still runs |
//!
//! ```no_run
//! use logoqr::config::PipelineConfig;
//! use logoqr::pipeline::{Pipeline, RunEvent};
//!
//! let summary = Pipeline::new(PipelineConfig::default()).run_with(|event| {
//!     if let RunEvent::Step(step) = event {
//!         println!("{}: {:?}", step.profile.name, step.status);
//!     }
//! })?;
//! println!("{} of {} artifacts written", summary.succeeded(), summary.steps.len());
//! # Ok::<(), logoqr::LogoQrError>(())
//! ```

use std::fs;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::compose::{CompositeReport, create_qr_with_logo};
use crate::config::{ArtifactFormat, OutputProfile, PipelineConfig};
use crate::error::{LogoQrError, Result};
use crate::logo::{ConvertOptions, LogoAsset, conversion_error, convert_logo};
use crate::qr::{EncodedQr, QrPayload, export_svg};

/// Outcome of one artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    Written,
    Failed(String),
}

/// One artifact and what happened to it.
#[derive(Debug, Clone)]
pub struct StepReport {
    pub profile: OutputProfile,
    pub path: PathBuf,
    pub status: StepStatus,
    /// Raster size and logo placement, for written PNG artifacts
    pub composite: Option<CompositeReport>,
}

impl StepReport {
    pub fn is_written(&self) -> bool {
        self.status == StepStatus::Written
    }
}

/// Result of a run that got past the fatal checks.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub logo: LogoAsset,
    /// Modules per side of the encoded symbol
    pub modules: u32,
    pub steps: Vec<StepReport>,
}

impl RunSummary {
    pub fn succeeded(&self) -> usize {
        self.steps.iter().filter(|s| s.is_written()).count()
    }

    pub fn failed(&self) -> usize {
        self.steps.len() - self.succeeded()
    }
}

/// Progress reported while [`Pipeline::run_with`] is still working.
#[derive(Debug, Clone, Copy)]
pub enum RunEvent<'a> {
    LogoConverted(&'a LogoAsset),
    Encoded { payload: &'a QrPayload, modules: u32 },
    Step(&'a StepReport),
}

/// A configured batch.
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Run every step in order.
    ///
    /// Returns `Err` only for the fatal conditions listed in the module docs;
    /// artifact failures are reported through [`RunSummary::steps`].
    pub fn run(&self) -> Result<RunSummary> {
        self.run_with(|_| {})
    }

    /// Like [`run`](Self::run), calling `on_event` as soon as each stage
    /// finishes.
    pub fn run_with(&self, mut on_event: impl FnMut(RunEvent<'_>)) -> Result<RunSummary> {
        let config = &self.config;

        if !config.logo.is_file() {
            return Err(LogoQrError::MissingLogo(config.logo.clone()));
        }

        fs::create_dir_all(&config.out_dir)?;

        let options = ConvertOptions {
            dpi: config.dpi,
            knockout_white: config.knockout_white,
        };
        let logo = convert_logo(&config.logo, &config.converted_logo_path(), options)
            .map_err(|e| conversion_error(&config.logo, e))?;
        on_event(RunEvent::LogoConverted(&logo));

        let payload = QrPayload::new(config.url.as_str(), config.error_level);
        let qr = payload.encode()?;
        info!(
            modules = qr.width(),
            level = ?payload.level(),
            bytes = payload.data().len(),
            "payload encoded"
        );
        on_event(RunEvent::Encoded {
            payload: &payload,
            modules: qr.width(),
        });

        let mut steps = Vec::with_capacity(config.outputs.len());
        for profile in &config.outputs {
            let step = self.run_step(&qr, &logo, profile);
            on_event(RunEvent::Step(&step));
            steps.push(step);
        }

        Ok(RunSummary {
            logo,
            modules: qr.width(),
            steps,
        })
    }

    /// Produce one artifact, turning any error into a recorded failure.
    fn run_step(&self, qr: &EncodedQr, logo: &LogoAsset, profile: &OutputProfile) -> StepReport {
        let path = self.config.output_path(profile);
        let result = match profile.format {
            ArtifactFormat::Png => create_qr_with_logo(qr, &logo.image, &path, profile).map(Some),
            ArtifactFormat::Svg => export_svg(qr, &path, profile).map(|()| None),
        };

        let (status, composite) = match result {
            Ok(composite) => {
                info!(profile = profile.name, path = %path.display(), "artifact written");
                (StepStatus::Written, composite)
            }
            Err(e) => {
                warn!(profile = profile.name, path = %path.display(), "artifact failed: {}", e);
                (StepStatus::Failed(e.to_string()), None)
            }
        };

        StepReport {
            profile: *profile,
            path,
            status,
            composite,
        }
    }
}
