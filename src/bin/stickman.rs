use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

const DEFAULT_TEXT: &str = "A throws a vase at B";

#[derive(Parser, Debug)]
#[command(name = "stickman", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Synthesize a scene and export it as indented JSON.
    Generate(GenerateArgs),
    /// Validate a scene JSON file.
    Validate(ValidateArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Play a scene headlessly once, writing one PNG per frame change.
    Frames(FramesArgs),
    /// Print the draw calls that render one frame.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Prompt text.
    #[arg(long, default_value = DEFAULT_TEXT)]
    text: String,

    /// RNG seed.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Output JSON path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Also report bones whose length drifts from the standing template.
    #[arg(long)]
    bones: bool,

    /// Allowed bone length drift in pixels.
    #[arg(long, default_value_t = 1.0, requires = "bones")]
    tolerance: f64,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct SceneSource {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Synthesize the scene from this seed instead of reading a file.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    source: SceneSource,

    /// Prompt text when synthesizing.
    #[arg(long, default_value = DEFAULT_TEXT)]
    text: String,

    /// Frame index (0-based, clamped to the timeline).
    #[arg(long, allow_negative_numbers = true)]
    frame: i64,

    /// Draw the neighbouring frames at reduced opacity.
    #[arg(long)]
    onion_skin: bool,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    #[command(flatten)]
    source: SceneSource,

    /// Prompt text when synthesizing.
    #[arg(long, default_value = DEFAULT_TEXT)]
    text: String,

    /// Draw the neighbouring frames at reduced opacity.
    #[arg(long)]
    onion_skin: bool,

    /// Output directory for `frame_NNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    #[command(flatten)]
    source: SceneSource,

    /// Prompt text when synthesizing.
    #[arg(long, default_value = DEFAULT_TEXT)]
    text: String,

    /// Frame index (0-based, clamped to the timeline).
    #[arg(long, allow_negative_numbers = true)]
    frame: i64,

    /// Draw the neighbouring frames at reduced opacity.
    #[arg(long)]
    onion_skin: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stickman=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Validate(args) => cmd_validate(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn load_scene(source: &SceneSource, text: &str) -> anyhow::Result<stickman::Scene> {
    match (&source.in_path, source.seed) {
        (Some(path), _) => stickman::Scene::from_path(path)
            .with_context(|| format!("load scene '{}'", path.display())),
        (None, Some(seed)) => {
            tracing::info!(seed, text, "synthesizing scene");
            Ok(stickman::build_throw_scene(text, seed))
        }
        (None, None) => anyhow::bail!("either --in or --seed is required"),
    }
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let scene = stickman::build_throw_scene(&args.text, args.seed);
    let json = scene.to_json_pretty()?;
    let fingerprint = scene.fingerprint()?;
    tracing::info!(
        seed = args.seed,
        fingerprint = %format!("{fingerprint:016x}"),
        "generated scene"
    );

    match &args.out {
        Some(out) => {
            ensure_parent_dir(out)?;
            std::fs::write(out, json).with_context(|| format!("write '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let scene = stickman::Scene::from_path(&args.in_path)
        .with_context(|| format!("validate scene '{}'", args.in_path.display()))?;
    println!(
        "ok: {} frames at {} fps, {} catalog objects",
        scene.frames().len(),
        scene.fps(),
        scene.catalog().len()
    );

    if args.bones {
        let deviations = stickman::check_skeleton_lengths(&scene, args.tolerance);
        for d in &deviations {
            tracing::warn!(
                frame = d.frame,
                actor = %d.actor,
                bone = %format!("{}-{}", d.from, d.to),
                deviation = d.deviation,
                "bone length drift"
            );
        }
        println!(
            "bones: {} deviation(s) beyond {} px",
            deviations.len(),
            args.tolerance
        );
    }
    Ok(())
}

fn cpu_engine(
    scene: stickman::Scene,
    onion_skin: bool,
) -> anyhow::Result<stickman::PlaybackEngine<stickman::CpuSurface>> {
    let surface = stickman::CpuSurface::new(stickman::CpuSurfaceOpts::default())?;
    Ok(stickman::PlaybackEngine::new(
        scene,
        surface,
        stickman::PlaybackOpts {
            onion_skin,
            ..stickman::PlaybackOpts::default()
        },
    ))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let scene = load_scene(&args.source, &args.text)?;
    let mut engine = cpu_engine(scene, args.onion_skin)?;
    engine.goto(args.frame);

    let frame = engine.surface_mut().snapshot();
    write_png(&args.out, frame)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let scene = load_scene(&args.source, &args.text)?;
    let mut engine = cpu_engine(scene, args.onion_skin)?;
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let mut written = 0usize;
    let mut write_current =
        |engine: &mut stickman::PlaybackEngine<stickman::CpuSurface>| -> anyhow::Result<()> {
            let path = args
                .out_dir
                .join(format!("frame_{:03}.png", engine.current_frame().0));
            write_png(&path, engine.surface_mut().snapshot())?;
            written += 1;
            Ok(())
        };

    write_current(&mut engine)?;
    engine.play(false);
    while engine.is_playing() {
        if engine.tick(stickman::FrameClock::INTERVAL) > 0 {
            write_current(&mut engine)?;
        }
    }

    eprintln!("wrote {written} frames to {}", args.out_dir.display());
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let scene = load_scene(&args.source, &args.text)?;
    let mut engine = stickman::PlaybackEngine::new(
        scene,
        stickman::RecordingSurface::new(),
        stickman::PlaybackOpts {
            onion_skin: args.onion_skin,
            ..stickman::PlaybackOpts::default()
        },
    );
    engine.goto(args.frame);

    println!("frame {}", engine.current_frame());
    for call in engine.surface().last_redraw() {
        println!("  {call}");
    }
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn write_png(path: &Path, frame: stickman::FrameRGBA) -> anyhow::Result<()> {
    ensure_parent_dir(path)?;
    let frame = frame.into_straight();
    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}
