use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use promptmotion::{
    AnimationPlan, Canvas, Composition, FadeStyle, FontProvider, FrameCompositor, PromptCompiler,
    RenderConfig, SceneClip, compile_scene,
};

#[derive(Parser, Debug)]
#[command(name = "promptmotion", version, about = "Render prompts as motion graphics")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a prompt into an animation plan (JSON).
    Plan(PlanArgs),
    /// Compile a prompt into a scene spec (JSON).
    Scene(SceneArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render an MP4 video (requires `ffmpeg`).
    Render(RenderArgs),
}

#[derive(Args, Debug)]
#[group(multiple = false)]
struct PromptArgs {
    /// Prompt text.
    #[arg(long)]
    prompt: Option<String>,

    /// Read the prompt from a UTF-8 file.
    #[arg(long)]
    prompt_file: Option<PathBuf>,
}

impl PromptArgs {
    fn read(&self) -> anyhow::Result<Option<String>> {
        match (&self.prompt, &self.prompt_file) {
            (Some(p), _) => Ok(Some(p.clone())),
            (None, Some(path)) => std::fs::read_to_string(path)
                .with_context(|| format!("read prompt file '{}'", path.display()))
                .map(Some),
            (None, None) => Ok(None),
        }
    }

    fn require(&self) -> anyhow::Result<String> {
        self.read()?
            .context("a prompt is required (--prompt or --prompt-file)")
    }
}

#[derive(Args, Debug)]
struct CanvasArgs {
    #[arg(long, default_value_t = 1280)]
    width: u32,

    #[arg(long, default_value_t = 720)]
    height: u32,

    #[arg(long, default_value_t = 30)]
    fps: u32,
}

impl CanvasArgs {
    fn canvas(&self) -> anyhow::Result<Canvas> {
        Ok(Canvas::new(self.width, self.height)?)
    }
}

#[derive(Args, Debug)]
struct PlanArgs {
    #[command(flatten)]
    prompt: PromptArgs,

    #[command(flatten)]
    canvas: CanvasArgs,

    /// Write JSON here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct SceneArgs {
    #[command(flatten)]
    prompt: PromptArgs,

    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Title, subtitles and shapes over a gradient.
    Text,
    /// Procedural environment only.
    Scene,
    /// Text overlay on a procedural environment.
    Layered,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FadeChoice {
    Alpha,
    Tint,
}

impl From<FadeChoice> for FadeStyle {
    fn from(c: FadeChoice) -> Self {
        match c {
            FadeChoice::Alpha => FadeStyle::Alpha,
            FadeChoice::Tint => FadeStyle::TintTowardBlack,
        }
    }
}

#[derive(Args, Debug)]
struct CompositionArgs {
    #[command(flatten)]
    prompt: PromptArgs,

    #[arg(long, value_enum, default_value_t = Mode::Text)]
    mode: Mode,

    /// Use a previously compiled plan instead of compiling the prompt.
    #[arg(long)]
    plan: Option<PathBuf>,

    /// Scene length in seconds (scene mode; text plans size themselves).
    #[arg(long)]
    seconds: Option<f64>,

    #[command(flatten)]
    canvas: CanvasArgs,

    /// Font file tried before the system fonts.
    #[arg(long)]
    font: Option<PathBuf>,

    #[arg(long, value_enum)]
    fade: Option<FadeChoice>,

    /// Print the resolved font family and SHA-256 of its bytes.
    #[arg(long)]
    dump_fonts: bool,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    comp: CompositionArgs,

    /// Time in seconds.
    #[arg(long, default_value_t = 0.0)]
    time: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    comp: CompositionArgs,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// Worker threads; 1 renders sequentially.
    #[arg(long)]
    threads: Option<usize>,

    /// ffmpeg binary to run.
    #[arg(long)]
    ffmpeg: Option<PathBuf>,
}

const DEFAULT_SCENE_SECONDS: f64 = 6.0;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Plan(args) => cmd_plan(args),
        Command::Scene(args) => cmd_scene(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn write_json<T: serde::Serialize>(value: &T, out: Option<&Path>) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("serialize JSON")?;
    match out {
        Some(path) => {
            promptmotion::encode::ensure_parent_dir(path)?;
            std::fs::write(path, json + "\n")
                .with_context(|| format!("write '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let prompt = args.prompt.require()?;
    let plan = PromptCompiler::new(args.canvas.canvas()?, args.canvas.fps).compile(&prompt);
    write_json(&plan, args.out.as_deref())
}

fn cmd_scene(args: SceneArgs) -> anyhow::Result<()> {
    let prompt = args.prompt.require()?;
    write_json(&compile_scene(&prompt), args.out.as_deref())
}

fn read_plan_json(path: &Path) -> anyhow::Result<AnimationPlan> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("open plan '{}'", path.display()))?;
    AnimationPlan::from_json(&json).with_context(|| format!("load plan '{}'", path.display()))
}

fn build_composition(args: &CompositionArgs) -> anyhow::Result<Composition> {
    let canvas = args.canvas.canvas()?;
    let fps = args.canvas.fps;
    let prompt = args.prompt.read()?;

    let plan = || -> anyhow::Result<AnimationPlan> {
        match (&args.plan, &prompt) {
            (Some(path), _) => read_plan_json(path),
            (None, Some(prompt)) => Ok(PromptCompiler::new(canvas, fps).compile(prompt)),
            (None, None) => anyhow::bail!("text modes need --prompt, --prompt-file or --plan"),
        }
    };
    let spec = || -> anyhow::Result<_> {
        let prompt = prompt
            .as_deref()
            .context("scene modes need --prompt or --prompt-file")?;
        Ok(compile_scene(prompt))
    };

    let comp = match args.mode {
        Mode::Text => {
            anyhow::ensure!(args.seconds.is_none(), "--seconds only applies to --mode scene");
            Composition::Plan(plan()?)
        }
        Mode::Scene => {
            let seconds = args.seconds.unwrap_or(DEFAULT_SCENE_SECONDS);
            Composition::Scene(SceneClip::new(spec()?, canvas, fps, seconds)?)
        }
        Mode::Layered => {
            anyhow::ensure!(
                args.seconds.is_none(),
                "--seconds only applies to --mode scene (layered clips follow the plan)"
            );
            let plan = plan()?;
            let clip = SceneClip::new(spec()?, plan.canvas(), plan.fps(), plan.duration())?;
            Composition::layered(clip, plan)?
        }
    };
    Ok(comp)
}

fn make_compositor(
    args: &CompositionArgs,
    cfg: &mut RenderConfig,
) -> anyhow::Result<FrameCompositor> {
    if let Some(font) = &args.font {
        cfg.font_path = Some(font.clone());
    }
    if let Some(fade) = args.fade {
        cfg.fade_style = fade.into();
    }

    let fonts = cfg.fonts();
    if args.dump_fonts {
        dump_font_diagnostics(fonts.as_ref());
    }

    let comp = build_composition(args)?;
    Ok(FrameCompositor::new(comp, fonts)?.with_fade_style(cfg.fade_style))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut cfg = RenderConfig::from_env()?;
    let compositor = make_compositor(&args.comp, &mut cfg)?;

    let frame = compositor.render_frame(args.time)?;
    promptmotion::encode::ensure_parent_dir(&args.out)?;
    promptmotion::write_png(&args.out, &frame)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut cfg = RenderConfig::from_env()?;
    if let Some(threads) = args.threads {
        cfg = cfg.with_threads(threads)?;
    }
    if let Some(bin) = &args.ffmpeg {
        cfg.ffmpeg_bin = bin.clone();
    }
    let compositor = make_compositor(&args.comp, &mut cfg)?;

    let encoder = cfg.encoder();
    let stats =
        promptmotion::render_to_video(&compositor, &args.out, &encoder, &cfg.sequencer_opts())?;

    eprintln!("wrote {} ({} frames)", args.out.display(), stats.frames_total);
    Ok(())
}

fn dump_font_diagnostics(fonts: &dyn FontProvider) {
    eprintln!("text font diagnostics:");
    eprintln!("    family:      {}", fonts.family());
    match fonts.fingerprint() {
        Some(sha) => eprintln!("    sha256:      {sha}"),
        None => eprintln!("    sha256:      (built-in)"),
    }
}
