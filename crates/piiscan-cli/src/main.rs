//! `piiscan` — verify, redact, and evaluate image PII from the command line.
//!
//! OCR and PII analysis are external collaborators; the CLI consumes their
//! output as JSON sidecar files (the shapes of [`RawOcrOutput`] and
//! `Vec<TextSpan>`), which keeps engine inference out of this binary and
//! makes runs reproducible.
//!
//! ```text
//! piiscan verify scan.png --ocr ocr.json --analysis spans.json -o annotated.png
//! piiscan redact scan.png --ocr ocr.json --analysis spans.json -o clean.png
//! piiscan eval scan.png --ocr ocr.json --analysis spans.json \
//!     --ground-truth gt.json --tolerance 50
//! piiscan eval-dicom scan.dcm --ocr ocr.json --analysis spans.json \
//!     --ground-truth gt.json
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use image::DynamicImage;
use piiscan_core::{RawOcrOutput, TextSpan};
use piiscan_dicom::DicomPiiVerifyEngine;
use piiscan_engine::{redact, ImagePiiVerifyEngine, OcrProvider, PiiAnalyzer, VerifyConfig};
use piiscan_eval::{load_ground_truth, EvaluationEngine};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "piiscan", version, about = "Detect and redact PII rendered inside images")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Detect PII and render a non-destructive overlay
    Verify {
        /// Input image
        image: PathBuf,
        /// OCR output JSON (parallel-array word boxes)
        #[arg(long)]
        ocr: PathBuf,
        /// Analyzer output JSON (entity spans over the reconstructed text)
        #[arg(long)]
        analysis: PathBuf,
        /// Padding added before OCR, in pixels
        #[arg(long)]
        padding: Option<u32>,
        /// Where to save the annotated image
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Detect PII and irreversibly obscure it
    Redact {
        /// Input image
        image: PathBuf,
        /// OCR output JSON
        #[arg(long)]
        ocr: PathBuf,
        /// Analyzer output JSON
        #[arg(long)]
        analysis: PathBuf,
        /// Padding added before OCR, in pixels
        #[arg(long)]
        padding: Option<u32>,
        /// Where to save the redacted image
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Score detection against human-labeled ground truth
    Eval {
        /// Input image
        image: PathBuf,
        /// OCR output JSON
        #[arg(long)]
        ocr: PathBuf,
        /// Analyzer output JSON
        #[arg(long)]
        analysis: PathBuf,
        /// Ground-truth JSON ({"ground_truth": [...], "all_pos": n})
        #[arg(long)]
        ground_truth: PathBuf,
        /// Padding added before OCR, in pixels
        #[arg(long)]
        padding: Option<u32>,
        /// Per-edge match tolerance, in pixels
        #[arg(long, default_value_t = 50)]
        tolerance: u32,
        /// Save the annotated image alongside the metrics
        #[arg(long)]
        save_annotated: Option<PathBuf>,
    },
    /// Score detection over a DICOM instance's pixel payload
    EvalDicom {
        /// Input DICOM file
        file: PathBuf,
        /// OCR output JSON
        #[arg(long)]
        ocr: PathBuf,
        /// Analyzer output JSON
        #[arg(long)]
        analysis: PathBuf,
        /// Ground-truth JSON
        #[arg(long)]
        ground_truth: PathBuf,
        /// Padding added before OCR, in pixels
        #[arg(long)]
        padding: Option<u32>,
        /// Per-edge match tolerance, in pixels
        #[arg(long, default_value_t = 50)]
        tolerance: u32,
    },
}

/// OCR collaborator backed by a pre-computed JSON sidecar file.
struct JsonOcr {
    raw: RawOcrOutput,
}

impl JsonOcr {
    fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read OCR output {}", path.display()))?;
        let raw = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse OCR output {}", path.display()))?;
        Ok(Self { raw })
    }
}

impl OcrProvider for JsonOcr {
    fn recognize(&self, _image: &DynamicImage) -> Result<RawOcrOutput> {
        Ok(self.raw.clone())
    }
}

/// Analyzer collaborator backed by a pre-computed JSON sidecar file.
struct JsonAnalyzer {
    spans: Vec<TextSpan>,
}

impl JsonAnalyzer {
    fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read analyzer output {}", path.display()))?;
        let spans = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse analyzer output {}", path.display()))?;
        Ok(Self { spans })
    }
}

impl PiiAnalyzer for JsonAnalyzer {
    fn analyze(&self, _text: &str, _language: Option<&str>) -> Result<Vec<TextSpan>> {
        Ok(self.spans.clone())
    }
}

fn build_engine(ocr: &Path, analysis: &Path) -> Result<ImagePiiVerifyEngine<JsonOcr, JsonAnalyzer>> {
    Ok(ImagePiiVerifyEngine::with_config(
        JsonOcr::load(ocr)?,
        JsonAnalyzer::load(analysis)?,
        VerifyConfig::from_env(),
    ))
}

fn open_image(path: &Path) -> Result<DynamicImage> {
    image::open(path).with_context(|| format!("failed to open image {}", path.display()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Verify {
            image,
            ocr,
            analysis,
            padding,
            output,
        } => {
            let engine = build_engine(&ocr, &analysis)?;
            let padding = padding.unwrap_or(engine.config().padding_width);
            let outcome = engine.verify(&open_image(&image)?, padding)?;

            println!("{}", serde_json::to_string_pretty(&outcome.findings)?);
            if let Some(path) = output {
                outcome
                    .annotated
                    .save(&path)
                    .with_context(|| format!("failed to save {}", path.display()))?;
            }
        }
        Command::Redact {
            image,
            ocr,
            analysis,
            padding,
            output,
        } => {
            let engine = build_engine(&ocr, &analysis)?;
            let padding = padding.unwrap_or(engine.config().padding_width);
            let input = open_image(&image)?;
            // Redaction needs findings only; skip overlay rendering
            let detection = engine.detect(&input, padding)?;

            let fill = engine.config().fill;
            let redacted = redact(&input, &detection.findings, fill);
            redacted
                .save(&output)
                .with_context(|| format!("failed to save {}", output.display()))?;
            eprintln!("redacted {} region(s) -> {}", detection.findings.len(), output.display());
        }
        Command::Eval {
            image,
            ocr,
            analysis,
            ground_truth,
            padding,
            tolerance,
            save_annotated,
        } => {
            let engine = EvaluationEngine::new(build_engine(&ocr, &analysis)?);
            let padding = padding.unwrap_or(engine.verify_engine().config().padding_width);
            let truth = load_ground_truth(&ground_truth)?;

            let (annotated, summary) = engine.eval(
                &open_image(&image)?,
                &truth.ground_truth,
                padding,
                tolerance,
                save_annotated.is_some(),
            )?;

            if let (Some(path), Some(img)) = (save_annotated, annotated) {
                img.save(&path)
                    .with_context(|| format!("failed to save {}", path.display()))?;
            }
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Command::EvalDicom {
            file,
            ocr,
            analysis,
            ground_truth,
            padding,
            tolerance,
        } => {
            let engine = DicomPiiVerifyEngine::new(JsonOcr::load(&ocr)?, JsonAnalyzer::load(&analysis)?);
            let padding = padding.unwrap_or(VerifyConfig::from_env().padding_width);
            let truth = load_ground_truth(&ground_truth)?;

            let obj = dicom_object::open_file(&file)
                .with_context(|| format!("failed to open DICOM file {}", file.display()))?;
            let (_, summary) =
                engine.eval_instance(&obj, &truth.ground_truth, padding, tolerance, false)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}
