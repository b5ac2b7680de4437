use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use photostrip::{
    BoothConfig, BoothEvent, CameraState, CaptureController, CompositeRenderer,
    CompositeSpec, PhotoBoothState, ReplayCamera, Schedule, Snapshot, StripArtifact, TimerOutcome,
    leaves_capture,
};

#[derive(Parser, Debug)]
#[command(name = "photostrip", version)]
struct Cli {
    /// Booth config JSON.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List available layouts.
    Layouts(ListArgs),
    /// List available themes.
    Themes(ListArgs),
    /// Composite existing photos into a strip.
    Compose(ComposeArgs),
    /// Run a capture session against replayed frames, then composite.
    Session(SessionArgs),
}

#[derive(Args, Debug)]
struct ListArgs {
    /// Print JSON instead of a table.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Args, Debug)]
struct StripArgs {
    /// Layout id.
    #[arg(long)]
    layout: String,

    /// Theme id.
    #[arg(long)]
    theme: String,

    /// Caption drawn along the bottom (max 100 characters).
    #[arg(long, default_value = "")]
    caption: String,

    /// Convert photos to grayscale.
    #[arg(long, default_value_t = false)]
    grayscale: bool,

    /// Output directory (overrides the config).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ComposeArgs {
    #[command(flatten)]
    strip: StripArgs,

    /// Photo files, in cell order.
    #[arg(long = "photo", num_args = 1.., required = true)]
    photos: Vec<PathBuf>,
}

#[derive(Args, Debug)]
struct SessionArgs {
    #[command(flatten)]
    strip: StripArgs,

    /// Frames the replay camera cycles through.
    #[arg(long, num_args = 1.., required = true)]
    frames: Vec<PathBuf>,

    /// Wait out countdown and hand-off delays in real time.
    #[arg(long, default_value_t = false)]
    realtime: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = match &cli.config {
        Some(path) => BoothConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => BoothConfig::default(),
    };

    match cli.cmd {
        Command::Layouts(args) => cmd_layouts(&cfg, args),
        Command::Themes(args) => cmd_themes(&cfg, args),
        Command::Compose(args) => cmd_compose(&cfg, args),
        Command::Session(args) => cmd_session(&cfg, args),
    }
}

fn cmd_layouts(cfg: &BoothConfig, args: ListArgs) -> anyhow::Result<()> {
    let catalog = cfg.catalog()?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(catalog.layouts())?);
        return Ok(());
    }
    for l in catalog.layouts() {
        println!(
            "{:<18} {:<20} {} photos  {}x{} grid  {}x{}px",
            l.id, l.name, l.count, l.arrangement.columns, l.arrangement.rows, l.width, l.height
        );
    }
    Ok(())
}

fn cmd_themes(cfg: &BoothConfig, args: ListArgs) -> anyhow::Result<()> {
    let catalog = cfg.catalog()?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(catalog.themes())?);
        return Ok(());
    }
    for t in catalog.themes() {
        println!(
            "{:<10} {:<16} bg {}  border {}  text {}",
            t.id,
            t.name,
            t.background_color.to_hex(),
            t.border_color.to_hex(),
            t.text_color.to_hex()
        );
    }
    Ok(())
}

fn cmd_compose(cfg: &BoothConfig, args: ComposeArgs) -> anyhow::Result<()> {
    let catalog = cfg.catalog()?;
    let layout = catalog.layout(&args.strip.layout)?.clone();
    let theme = catalog.theme(&args.strip.theme)?.clone();

    let photos = args
        .photos
        .iter()
        .map(|p| Snapshot::open(p))
        .collect::<Result<Vec<_>, _>>()?;

    let spec = CompositeSpec::new(layout, theme)
        .with_caption(&args.strip.caption)
        .with_grayscale(args.strip.grayscale)
        .with_images(photos);
    write_strip(cfg, &spec, args.strip.out.as_deref())
}

fn cmd_session(cfg: &BoothConfig, args: SessionArgs) -> anyhow::Result<()> {
    let catalog = cfg.catalog()?;
    let strip = &args.strip;

    let mut state = PhotoBoothState::new()
        .reduce(BoothEvent::SelectLayout(strip.layout.clone()))
        .reduce(BoothEvent::SelectTheme(strip.theme.clone()))
        .reduce(BoothEvent::SubmitCaption(strip.caption.clone()));
    let layout = catalog.layout(&strip.layout)?;
    catalog.theme(&strip.theme)?;

    let camera = ReplayCamera::from_paths(&args.frames)?;
    let mut ctl = CaptureController::new(
        Box::new(camera),
        layout.required_count(),
        cfg.capture_settings(),
    )?;

    if ctl.initialize() == CameraState::Error {
        let msg = ctl
            .last_error()
            .map(ToString::to_string)
            .unwrap_or_else(|| "camera error".to_string());
        anyhow::bail!(msg);
    }
    ctl.on_first_frame();

    while ctl.state() != CameraState::Done {
        let mut pending = if ctl.is_full() {
            None
        } else {
            Some(ctl.begin_capture()?)
        };
        while let Some(schedule) = pending.take() {
            wait(schedule, args.realtime);
            match ctl.on_timer(schedule.timer) {
                TimerOutcome::Tick { remaining, next } => {
                    eprintln!("{remaining}...");
                    pending = Some(next);
                }
                TimerOutcome::Captured { index, handoff } => {
                    let (captured, required) = ctl.progress();
                    eprintln!("captured photo {} ({captured}/{required})", index + 1);
                    pending = handoff;
                }
                TimerOutcome::FrameUnavailable => {
                    anyhow::bail!("camera produced no frame for photo {}", ctl.next_photo_number())
                }
                TimerOutcome::Completed | TimerOutcome::Ignored => {}
            }
        }
        if ctl.is_full() && ctl.state() != CameraState::Done {
            ctl.proceed()?;
        }
    }

    let prev = state.clone();
    state = state.reduce(BoothEvent::PhotosCaptured(ctl.photos().to_vec()));
    if leaves_capture(&prev, &state) {
        ctl.release();
    }
    if strip.grayscale {
        state = state.reduce(BoothEvent::ToggleGrayscale);
    }

    let spec = state.composite_spec(&catalog)?;
    write_strip(cfg, &spec, strip.out.as_deref())
}

fn wait(schedule: Schedule, realtime: bool) {
    if realtime && schedule.delay > Duration::ZERO {
        std::thread::sleep(schedule.delay);
    }
}

fn write_strip(cfg: &BoothConfig, spec: &CompositeSpec, out: Option<&Path>) -> anyhow::Result<()> {
    let mut renderer = CompositeRenderer::new(cfg.caption_font()?);
    let strip = renderer.render(spec)?;
    let artifact = StripArtifact::encode(&strip, cfg.jpeg_quality)?;
    let dir = out.unwrap_or(&cfg.output_dir);
    let path = artifact.save_to(dir)?;
    println!("{}", path.display());
    Ok(())
}
