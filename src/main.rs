use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use tracing::{error, info, warn};

use camera_preproc_rs::image_pipeline::raw::is_camera_raw;
use camera_preproc_rs::image_pipeline::{
    BayerPattern, CapturePipeline, FileFrameSource, FrameType, ImageView, PipelineConfig, PixelFormat,
    RawFrameReader, RawLoaderReader, Rect, StandardTiffWriter, TiffCompression, TiffFrameSink, TiffOptions,
    TiffWriter,
};
use camera_preproc_rs::logger;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FrameTypeArg {
    Raw8,
    Rgb565,
    Rgb888,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PatternArg {
    Rggb,
    Bggr,
    Grbg,
    Gbrg,
}

impl From<PatternArg> for BayerPattern {
    fn from(arg: PatternArg) -> Self {
        match arg {
            PatternArg::Rggb => BayerPattern::RGGB,
            PatternArg::Bggr => BayerPattern::BGGR,
            PatternArg::Grbg => BayerPattern::GRBG,
            PatternArg::Gbrg => BayerPattern::GBRG,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CompressionArg {
    None,
    Lzw,
    Deflate,
}

impl From<CompressionArg> for TiffCompression {
    fn from(arg: CompressionArg) -> Self {
        match arg {
            CompressionArg::None => TiffCompression::None,
            CompressionArg::Lzw => TiffCompression::Lzw,
            CompressionArg::Deflate => TiffCompression::Deflate,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "camera_preproc", version, about = "Camera frame preprocessing for on-device inference")]
struct Args {
    /// Camera frame dumps (RAW8, RGB565 LE, RGB888) or camera RAW files
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Camera frame size WxH; probed from the first camera RAW file when omitted
    #[arg(long, value_parser = parse_size, env = "CAMERA_SIZE")]
    camera_size: Option<(usize, usize)>,

    /// Camera frame layout
    #[arg(long, value_enum, default_value_t = FrameTypeArg::Raw8)]
    frame_type: FrameTypeArg,

    /// Bayer pattern of RAW8 frames; probed from camera RAW files when omitted
    #[arg(long, value_enum)]
    pattern: Option<PatternArg>,

    /// Intermediate RGB image size WxH
    #[arg(long, value_parser = parse_size, default_value = "384x384")]
    rgb_size: (usize, usize),

    /// Model input size WxH
    #[arg(long, value_parser = parse_size, default_value = "192x192")]
    model_size: (usize, usize),

    /// Display frame size WxH
    #[arg(long, value_parser = parse_size, default_value = "480x800")]
    display_size: (usize, usize),

    /// Directory for model input and display TIFFs
    #[arg(short, long, default_value = "out")]
    output_dir: PathBuf,

    /// TIFF compression
    #[arg(long, value_enum, default_value_t = CompressionArg::None)]
    compression: CompressionArg,

    /// Detection box x,y,w,h in model input coordinates (repeatable)
    #[arg(long = "mark", value_parser = parse_rect)]
    marks: Vec<Rect>,

    /// Frame acquire timeout in milliseconds
    #[arg(long, default_value_t = 1000)]
    timeout_ms: u64,
}

fn parse_size(s: &str) -> std::result::Result<(usize, usize), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got '{s}'"))?;
    let w = w.trim().parse().map_err(|e| format!("bad width '{w}': {e}"))?;
    let h = h.trim().parse().map_err(|e| format!("bad height '{h}': {e}"))?;
    Ok((w, h))
}

fn parse_rect(s: &str) -> std::result::Result<Rect, String> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<usize>().map_err(|e| format!("bad box '{s}': {e}")))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    match parts.as_slice() {
        &[x, y, width, height] => Ok(Rect::new(x, y, width, height)),
        _ => Err(format!("expected x,y,w,h, got '{s}'")),
    }
}

/// Camera size and Bayer pattern of the first camera RAW input, if any.
fn probe_camera_raw(inputs: &[PathBuf]) -> Result<Option<((usize, usize), BayerPattern)>> {
    let Some(path) = inputs.iter().find(|p| is_camera_raw(p)) else {
        return Ok(None);
    };
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let frame = RawLoaderReader
        .read_raw(&bytes)
        .with_context(|| format!("decoding {}", path.display()))?;
    info!(
        "Probed {}: {}x{} {} ({} bits)",
        path.display(),
        frame.width,
        frame.height,
        frame.pattern,
        frame.bits_per_sample
    );
    Ok(Some(((frame.width, frame.height), frame.pattern)))
}

fn build_config(args: &Args) -> Result<PipelineConfig> {
    let probed = match args.frame_type {
        FrameTypeArg::Raw8 => probe_camera_raw(&args.inputs)?,
        _ => None,
    };

    let frame_type = match args.frame_type {
        FrameTypeArg::Raw8 => {
            let pattern = match (args.pattern, probed) {
                (Some(pattern), Some((_, found))) if BayerPattern::from(pattern) != found => {
                    warn!("--pattern {:?} overrides {} from the RAW file", pattern, found);
                    pattern.into()
                }
                (Some(pattern), _) => pattern.into(),
                (None, Some((_, found))) => found,
                (None, None) => BayerPattern::GBRG,
            };
            FrameType::Raw8(pattern)
        }
        FrameTypeArg::Rgb565 => FrameType::Rgb565,
        FrameTypeArg::Rgb888 => FrameType::Rgb888,
    };

    let (camera_width, camera_height) = match (args.camera_size, probed) {
        (Some(size), _) => size,
        (None, Some((size, _))) => size,
        (None, None) => {
            let default = PipelineConfig::default();
            (default.camera_width, default.camera_height)
        }
    };

    let config = PipelineConfig::builder()
        .camera_size(camera_width, camera_height)
        .frame_type(frame_type)
        .rgb_size(args.rgb_size.0, args.rgb_size.1)
        .model_size(args.model_size.0, args.model_size.1)
        .display_size(args.display_size.0, args.display_size.1)
        .build();
    config.validate()?;
    Ok(config)
}

fn run(args: Args) -> Result<()> {
    let config = build_config(&args)?;
    fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("creating {}", args.output_dir.display()))?;

    let display_dir = args.output_dir.join("display");
    fs::create_dir_all(&display_dir).with_context(|| format!("creating {}", display_dir.display()))?;

    let options = TiffOptions::builder().compression(args.compression.into()).build();
    let source = FileFrameSource::new(args.inputs.clone(), &config);
    let sink = TiffFrameSink::new(display_dir, config.display_width, config.display_height, options.clone());

    let mut pipeline = CapturePipeline::new(config.clone(), source, sink)?;
    let timeout = Duration::from_millis(args.timeout_ms);
    let writer = StandardTiffWriter;
    let mut frame = 0usize;

    while let Some(timings) = pipeline.open_frame_with_timings(timeout)? {
        timings.log_summary();

        for &bbox in &args.marks {
            if let Err(e) = pipeline.mark_detection(bbox) {
                warn!("Skipping box: {}", e);
            }
        }

        let model_path = args.output_dir.join(format!("model_{frame:04}.tif"));
        let mut output = BufWriter::new(
            File::create(&model_path).with_context(|| format!("creating {}", model_path.display()))?,
        );
        writer.write_tiff(
            &ImageView::new(pipeline.model_input(), config.model_width, config.model_height),
            PixelFormat::Rgb888,
            &mut output,
            &options,
        )?;
        output.flush()?;

        pipeline.present()?;
        frame += 1;
    }

    if frame == 0 {
        bail!("no frames were converted");
    }
    info!("Converted {} frames into {}", frame, args.output_dir.display());
    Ok(())
}

fn main() -> Result<()> {
    logger::init();
    let args = Args::parse();

    info!("Starting camera_preproc...");
    info!("Inputs: {}", args.inputs.len());

    if let Err(e) = run(args) {
        error!("Preprocessing failed: {:#}", e);
        return Err(e);
    }
    Ok(())
}
