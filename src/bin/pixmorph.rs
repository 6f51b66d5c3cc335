use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

/// The session is stepped on a synthetic 60 Hz timeline, matching the
/// display-refresh cadence the engine is designed around.
const TICK_HZ: f64 = 60.0;

#[derive(Parser, Debug)]
#[command(name = "pixmorph", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the animation frame at a given time as a PNG.
    Frame(FrameArgs),
    /// Render the whole animation as a looping GIF.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Source image path.
    #[arg(long)]
    source: PathBuf,

    /// Target image path.
    #[arg(long)]
    target: PathBuf,

    /// Animation time to evaluate, in seconds.
    #[arg(long, default_value_t = 0.0)]
    at_secs: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Morph configuration JSON; individual flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Working grid side length (1-512).
    #[arg(long)]
    grid: Option<u32>,

    /// Animation speed (1-100, higher is faster).
    #[arg(long)]
    speed: Option<u32>,

    /// Mode: particles | reveal | crossfade.
    #[arg(long)]
    mode: Option<String>,

    /// Seed for particle timing and reveal order.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Output pixels per grid cell.
    #[arg(long, default_value_t = 8)]
    pixel_size: u32,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Source image path.
    #[arg(long)]
    source: PathBuf,

    /// Target image path.
    #[arg(long)]
    target: PathBuf,

    /// Output GIF path.
    #[arg(long)]
    out: PathBuf,

    /// GIF frame rate (1-60).
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Morph configuration JSON; individual flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Working grid side length (1-512).
    #[arg(long)]
    grid: Option<u32>,

    /// Animation speed (1-100, higher is faster).
    #[arg(long)]
    speed: Option<u32>,

    /// Mode: particles | reveal | crossfade.
    #[arg(long)]
    mode: Option<String>,

    /// Seed for particle timing and reveal order.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Output pixels per grid cell.
    #[arg(long, default_value_t = 8)]
    pixel_size: u32,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn resolve_config(
    path: Option<&Path>,
    grid: Option<u32>,
    speed: Option<u32>,
    mode: Option<&str>,
) -> anyhow::Result<pixmorph::MorphConfig> {
    let mut cfg = match path {
        Some(path) => {
            let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
            let r = BufReader::new(f);
            serde_json::from_reader(r).with_context(|| "parse config JSON")?
        }
        None => pixmorph::MorphConfig::default(),
    };
    if let Some(n) = grid {
        cfg.grid = pixmorph::GridSize::new(n)?;
    }
    if let Some(s) = speed {
        cfg.speed = pixmorph::Speed::new(s)?;
    }
    if let Some(m) = mode {
        cfg.mode = pixmorph::parse_mode(m)?;
    }
    Ok(cfg)
}

fn build_session(
    source: &Path,
    target: &Path,
    cfg: pixmorph::MorphConfig,
    seed: u64,
) -> anyhow::Result<pixmorph::MorphSession> {
    let source_img = pixmorph::acquire::load_image(source)?;
    let target_img = pixmorph::acquire::load_image(target)?;
    let source = pixmorph::fit_to_square(&source_img, cfg.grid)?;
    let target = pixmorph::fit_to_square(&target_img, cfg.grid)?;
    Ok(pixmorph::MorphSession::new(cfg, source, target, seed)?)
}

fn tick_time(tick: u64) -> Duration {
    Duration::from_secs_f64(tick as f64 / TICK_HZ)
}

fn write_png(out: &Path, img: &image::RgbaImage) -> anyhow::Result<()> {
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        out,
        img.as_raw(),
        img.width(),
        img.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", out.display()))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    anyhow::ensure!(
        args.at_secs.is_finite() && args.at_secs >= 0.0,
        "--at-secs must be finite and >= 0"
    );

    let cfg = resolve_config(
        args.config.as_deref(),
        args.grid,
        args.speed,
        args.mode.as_deref(),
    )?;
    let mut session = build_session(&args.source, &args.target, cfg, args.seed)?;
    session.start(Duration::ZERO)?;

    let ticks = (args.at_secs * TICK_HZ).round() as u64;
    for tick in 1..=ticks {
        if !session.advance(tick_time(tick)).should_continue() {
            break;
        }
    }

    let img = pixmorph::upscale_frame(session.frame(), args.pixel_size)?;
    write_png(&args.out, &img)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    use image::codecs::gif::{GifEncoder, Repeat};
    use image::{Delay, Frame};

    anyhow::ensure!(
        (1..=60).contains(&args.fps),
        "--fps must be within 1..=60"
    );

    let cfg = resolve_config(
        args.config.as_deref(),
        args.grid,
        args.speed,
        args.mode.as_deref(),
    )?;
    let mut session = build_session(&args.source, &args.target, cfg, args.seed)?;
    session.start(Duration::ZERO)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let file =
        File::create(&args.out).with_context(|| format!("create gif '{}'", args.out.display()))?;
    let mut encoder = GifEncoder::new(file);
    encoder.set_repeat(Repeat::Infinite)?;

    let mut encode = |buf: &pixmorph::PixelBuffer| -> anyhow::Result<()> {
        let img = pixmorph::upscale_frame(buf, args.pixel_size)?;
        let delay = Delay::from_numer_denom_ms(1000, args.fps);
        encoder.encode_frame(Frame::from_parts(img, 0, 0, delay))?;
        Ok(())
    };

    // First GIF frame is the untouched source image.
    encode(session.frame())?;
    let mut frames = 1u64;

    let dt = 1.0 / f64::from(args.fps);
    let mut tick = 1u64;
    loop {
        let report = session.advance(Duration::from_secs_f64(tick as f64 * dt));
        encode(session.frame())?;
        frames += 1;
        if !report.should_continue() {
            break;
        }
        tick += 1;
    }

    eprintln!("wrote {} ({} frames)", args.out.display(), frames);
    Ok(())
}
