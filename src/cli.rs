// ============================================================================
// retouch CLI — headless editing via command-line arguments
// ============================================================================
//
// Usage examples:
//   retouch -i photo.png -o out.png --op grayscale --op rotate90
//   retouch -i photo.jpg -o out.jpg --op brightness=1.3 --op crop=10,10,640,480
//   retouch -i photo.png -o framed.png --config retouch.toml --op frame=leafy
//
// All processing runs synchronously on the current thread; each operation
// completes before the next begins. Exit code 0 on success, 1 on any error.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use crate::config::EngineConfig;
use crate::frames::FrameRegistry;
use crate::io::{decode_image, encode_image};
use crate::ops::Operation;
use crate::session::EditSession;
use crate::{log_err, log_info};

// ============================================================================
// CLI argument definition (clap Derive)
// ============================================================================

/// retouch headless image editor.
///
/// Apply a pipeline of editing operations to one image, no GUI required.
#[derive(Parser, Debug)]
#[command(
    name = "retouch",
    about = "Headless raster-image editor",
    long_about = "Decode an image, run a pipeline of editing operations, and encode the\n\
                  result. Output format follows the output extension (png, jpg, bmp).\n\n\
                  Operations (repeat --op to chain, applied in order):\n  \
                  grayscale | sepia | invert | cyberpunk | retro | polaroid | comic\n  \
                  rotate90 | brightness=F | contrast=F | color=R,G,B\n  \
                  crop=X,Y,W,H | resize=W,H | frame=NAME | original\n\n\
                  Example:\n  \
                  retouch -i photo.png -o out.png --op sepia --op crop=0,0,800,600"
)]
pub struct CliArgs {
    /// Input image file (PNG, JPEG, BMP, or anything the decoder recognises).
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Output image file. The extension selects the encoder.
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Operation spec, applied in order of appearance.
    #[arg(long = "op", value_name = "SPEC")]
    pub ops: Vec<String>,

    /// TOML config: history caps and the [frames] registry.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory of frame images, registered by file stem (in addition to
    /// any [frames] entries from --config).
    #[arg(long, value_name = "DIR")]
    pub frames_dir: Option<PathBuf>,

    /// Print per-operation timing information.
    #[arg(short, long)]
    pub verbose: bool,
}

// ============================================================================
// Public entry point
// ============================================================================

/// Run one headless edit and return an OS exit code.
pub fn run(args: CliArgs) -> ExitCode {
    let config = match &args.config {
        Some(path) => match EngineConfig::load(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("error: {}", e);
                log_err!("config load failed: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => EngineConfig::default(),
    };

    let mut registry = FrameRegistry::from_config(&config);
    if let Some(dir) = &args.frames_dir
        && let Err(e) = registry.add_dir(dir)
    {
        eprintln!("error: cannot read frames dir {}: {}", dir.display(), e);
        return ExitCode::FAILURE;
    }

    // Resolve every op spec before touching the image, so a typo in the last
    // spec does not waste work on the first ones.
    let mut ops = Vec::with_capacity(args.ops.len());
    for spec in &args.ops {
        match parse_op(spec, &registry) {
            Ok(op) => ops.push(op),
            Err(e) => {
                eprintln!("error: bad --op '{}': {}", spec, e);
                return ExitCode::FAILURE;
            }
        }
    }

    let image = match decode_image(&args.input) {
        Ok(img) => img,
        Err(e) => {
            eprintln!("error: cannot decode {}: {}", args.input.display(), e);
            log_err!("decode failed for {}: {}", args.input.display(), e);
            return ExitCode::FAILURE;
        }
    };
    log_info!(
        "loaded {} ({}x{})",
        args.input.display(),
        image.width(),
        image.height()
    );

    let mut session =
        EditSession::with_limits(image, config.max_history_depth, config.max_history_bytes);

    for op in &ops {
        let start = Instant::now();
        let result = match op {
            PipelineStep::Edit(op) => session.apply(op).map(|_| ()).map_err(|e| e.to_string()),
            PipelineStep::Original => {
                session.reset_to_original();
                Ok(())
            }
        };
        if let Err(e) = result {
            eprintln!("error: {} failed: {}", op.describe(), e);
            log_err!("{} failed: {}", op.describe(), e);
            return ExitCode::FAILURE;
        }
        if args.verbose {
            println!("{} ... {:.1?}", op.describe(), start.elapsed());
        }
    }

    if let Err(e) = encode_image(session.current(), &args.output) {
        eprintln!("error: cannot write {}: {}", args.output.display(), e);
        log_err!("encode failed for {}: {}", args.output.display(), e);
        return ExitCode::FAILURE;
    }

    if args.verbose {
        println!(
            "wrote {} ({}x{}, {} ops)",
            args.output.display(),
            session.current().width(),
            session.current().height(),
            ops.len()
        );
    }
    log_info!("wrote {}", args.output.display());
    ExitCode::SUCCESS
}

// ============================================================================
// Op-spec parsing
// ============================================================================

/// A parsed pipeline step: a regular operation or the "original" reset.
#[derive(Debug)]
pub enum PipelineStep {
    Edit(Operation),
    Original,
}

impl PipelineStep {
    fn describe(&self) -> String {
        match self {
            PipelineStep::Edit(op) => op.description(),
            PipelineStep::Original => "Original".to_string(),
        }
    }
}

/// Parse one `--op` spec. Frame specs are resolved through the registry
/// immediately, so a missing overlay fails before any pixels move.
pub fn parse_op(spec: &str, registry: &FrameRegistry) -> Result<PipelineStep, String> {
    let (name, value) = match spec.split_once('=') {
        Some((n, v)) => (n.trim(), Some(v.trim())),
        None => (spec.trim(), None),
    };

    let bare = |op: Operation| -> Result<PipelineStep, String> {
        if value.is_some() {
            return Err(format!("'{}' takes no value", name));
        }
        Ok(PipelineStep::Edit(op))
    };

    match name {
        "grayscale" => bare(Operation::Grayscale),
        "sepia" => bare(Operation::Sepia),
        "invert" => bare(Operation::Invert),
        "cyberpunk" => bare(Operation::Cyberpunk),
        "retro" => bare(Operation::Retro),
        "polaroid" => bare(Operation::Polaroid),
        "comic" => bare(Operation::Comic),
        "rotate90" => bare(Operation::Rotate90),
        "original" => {
            if value.is_some() {
                return Err("'original' takes no value".to_string());
            }
            Ok(PipelineStep::Original)
        }
        "brightness" => Ok(PipelineStep::Edit(Operation::Brightness(parse_factor(
            value.ok_or("expected brightness=FACTOR")?,
        )?))),
        "contrast" => Ok(PipelineStep::Edit(Operation::Contrast(parse_factor(
            value.ok_or("expected contrast=FACTOR")?,
        )?))),
        "color" => {
            let [red, green, blue] = parse_numbers(value.ok_or("expected color=R,G,B")?)?;
            Ok(PipelineStep::Edit(Operation::ColorAdjust { red, green, blue }))
        }
        "crop" => {
            let [x, y, width, height] = parse_u32s(value.ok_or("expected crop=X,Y,W,H")?)?;
            Ok(PipelineStep::Edit(Operation::Crop { x, y, width, height }))
        }
        "resize" => {
            let [width, height] = parse_u32s(value.ok_or("expected resize=W,H")?)?;
            Ok(PipelineStep::Edit(Operation::Resize { width, height }))
        }
        "frame" => {
            let frame_name = value.ok_or("expected frame=NAME")?;
            let overlay = registry.resolve(frame_name).map_err(|e| e.to_string())?;
            Ok(PipelineStep::Edit(Operation::CompositeFrame(overlay)))
        }
        other => Err(format!("unknown operation '{}'", other)),
    }
}

fn parse_factor(text: &str) -> Result<f64, String> {
    let v: f64 = text.parse().map_err(|_| format!("'{}' is not a number", text))?;
    if !v.is_finite() {
        return Err(format!("'{}' is not a finite factor", text));
    }
    Ok(v)
}

fn parse_numbers<const N: usize>(text: &str) -> Result<[f64; N], String> {
    let parts: Vec<&str> = text.split(',').map(str::trim).collect();
    if parts.len() != N {
        return Err(format!("expected {} comma-separated values, got {}", N, parts.len()));
    }
    let mut out = [0.0; N];
    for (slot, part) in out.iter_mut().zip(parts) {
        *slot = parse_factor(part)?;
    }
    Ok(out)
}

fn parse_u32s<const N: usize>(text: &str) -> Result<[u32; N], String> {
    let parts: Vec<&str> = text.split(',').map(str::trim).collect();
    if parts.len() != N {
        return Err(format!("expected {} comma-separated integers, got {}", N, parts.len()));
    }
    let mut out = [0u32; N];
    for (slot, part) in out.iter_mut().zip(parts) {
        *slot = part.parse().map_err(|_| format!("'{}' is not an integer", part))?;
    }
    Ok(out)
}
