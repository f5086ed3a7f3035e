use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use wiremorph::{
    Canvas, FrameClock, FrameRgb, Generator, PatternMask, RenderToMp4Opts, SceneConfig,
};

#[derive(Parser, Debug)]
#[command(name = "wiremorph", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single time sample as a PNG.
    Frame(FrameArgs),
    /// Render a numbered PNG sequence into a directory.
    Frames(FramesArgs),
    /// Render an MP4 video (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Print the resolved scene configuration as JSON.
    Config(SceneArgs),
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// Scene configuration JSON. Missing fields use defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the number of cloud points.
    #[arg(long)]
    points: Option<usize>,

    /// Override the random seed.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args, Debug)]
struct PatternArgs {
    /// Bitmap whose bright pixels form the target silhouette.
    #[arg(long)]
    pattern: Option<PathBuf>,

    /// Luma threshold (0-255) at or above which a pixel is part of the silhouette.
    #[arg(long, default_value_t = 128)]
    threshold: u8,

    /// Treat dark pixels as the silhouette instead.
    #[arg(long)]
    invert_pattern: bool,
}

#[derive(Args, Debug)]
struct SizeArgs {
    #[arg(long, default_value_t = 1280)]
    width: u32,

    #[arg(long, default_value_t = 720)]
    height: u32,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scene: SceneArgs,
    #[command(flatten)]
    pattern: PatternArgs,
    #[command(flatten)]
    size: SizeArgs,

    /// Time sample in [0, 1).
    #[arg(long, default_value_t = 0.0)]
    time: f32,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    #[command(flatten)]
    scene: SceneArgs,
    #[command(flatten)]
    pattern: PatternArgs,
    #[command(flatten)]
    size: SizeArgs,

    /// Number of frames; frame i samples t = i / frames.
    #[arg(long, default_value_t = 300)]
    frames: u32,

    /// Output directory for `<index>.png` files.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    scene: SceneArgs,
    #[command(flatten)]
    pattern: PatternArgs,
    #[command(flatten)]
    size: SizeArgs,

    #[arg(long, default_value_t = 300)]
    frames: u32,

    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Render(args) => cmd_render(args),
        Command::Config(args) => cmd_config(args),
    }
}

fn read_config(args: &SceneArgs) -> anyhow::Result<SceneConfig> {
    let mut cfg = match &args.config {
        Some(path) => {
            let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
            SceneConfig::from_json_reader(BufReader::new(f))
                .with_context(|| format!("parse config '{}'", path.display()))?
        }
        None => SceneConfig::default(),
    };
    if let Some(points) = args.points {
        cfg.point_count = points;
    }
    if let Some(seed) = args.seed {
        cfg.seed = seed;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn read_pattern(args: &PatternArgs) -> anyhow::Result<Option<PatternMask>> {
    let Some(path) = &args.pattern else {
        return Ok(None);
    };
    let img = image::open(path).with_context(|| format!("decode pattern '{}'", path.display()))?;
    let mask = PatternMask::from_image(&img, args.threshold, args.invert_pattern);
    tracing::info!(
        w = mask.width(),
        h = mask.height(),
        on = mask.count_on(),
        "pattern loaded"
    );
    Ok(Some(mask))
}

fn prepare(scene: &SceneArgs, pattern: &PatternArgs) -> anyhow::Result<Generator> {
    let mut generator = Generator::new(read_config(scene)?)?;
    generator.setup()?;
    if let Some(mask) = read_pattern(pattern)? {
        generator.set_pattern(mask);
        generator.process_pattern()?;
    }
    Ok(generator)
}

fn write_png(frame: &FrameRgb, path: &Path) -> anyhow::Result<()> {
    wiremorph::ensure_parent_dir(path)?;
    let img = frame
        .clone()
        .into_image()
        .context("frame buffer does not match its dimensions")?;
    img.save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut generator = prepare(&args.scene, &args.pattern)?;
    let canvas = Canvas::new(args.size.width, args.size.height)?;
    let mut frame = FrameRgb::new(canvas, generator.config().background);

    let stats = generator.render_at(args.time, &mut frame)?;
    write_png(&frame, &args.out)?;

    eprintln!(
        "wrote {} ({} edges drawn, {} pixels)",
        args.out.display(),
        stats.edges_drawn,
        stats.pixels_set
    );
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let mut generator = prepare(&args.scene, &args.pattern)?;
    let clock = FrameClock::new(args.frames)?;
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let out_dir = args.out_dir.clone();
    wiremorph::render_sequence(
        &mut generator,
        clock,
        args.size.width,
        args.size.height,
        |i, frame| {
            let path = out_dir.join(format!("{i}.png"));
            write_png(frame, &path).map_err(wiremorph::WireError::from)
        },
    )?;

    eprintln!("wrote {} frames to {}", args.frames, args.out_dir.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut generator = prepare(&args.scene, &args.pattern)?;
    let opts = RenderToMp4Opts {
        frames: args.frames,
        fps: args.fps,
        width: args.size.width,
        height: args.size.height,
        overwrite: true,
    };
    let stats = wiremorph::render_to_mp4(&mut generator, &args.out, &opts)?;

    eprintln!(
        "wrote {} ({} frames, {} edges drawn)",
        args.out.display(),
        args.frames,
        stats.edges_drawn
    );
    Ok(())
}

fn cmd_config(args: SceneArgs) -> anyhow::Result<()> {
    let cfg = read_config(&args)?;
    println!("{}", cfg.to_json_pretty()?);
    Ok(())
}
