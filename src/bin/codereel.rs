use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use codereel::Manifest as _;

#[derive(Parser, Debug)]
#[command(name = "codereel", version, about = "Code screenshots and narrated demo videos")]
struct Cli {
    /// Verbose logging (debug level); `RUST_LOG` overrides.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a source file as a syntax-highlighted image per theme.
    Image(ImageArgs),
    /// Render one screenshot per line range listed in a scene manifest.
    Scenes(ScenesArgs),
    /// Letterbox every PNG of a directory into fixed-size frames.
    Fit(FitArgs),
    /// Speak narration clips with `say` and convert them to MP3 (macOS).
    Narrate(NarrateArgs),
    /// Assemble still images and narration into an MP4 (requires `ffmpeg`).
    Assemble(AssembleArgs),
    /// Render a gradient slideshow to MP4 (requires `ffmpeg`).
    Slides(SlidesArgs),
}

#[derive(Parser, Debug)]
struct StyleArgs {
    /// Font size in output pixels.
    #[arg(long)]
    font_size: Option<u32>,

    /// Line height as a multiple of the font size.
    #[arg(long)]
    line_height: Option<f32>,

    /// Monospace font file to use instead of the built-in search list.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Print the resolved font (origin + SHA-256 of font bytes).
    #[arg(long)]
    dump_fonts: bool,
}

impl StyleArgs {
    fn style(&self, default_font_size: u32) -> codereel::CodeStyle {
        let mut style = codereel::CodeStyle {
            font_size: default_font_size,
            ..codereel::CodeStyle::default()
        };
        if let Some(size) = self.font_size {
            style.font_size = size;
        }
        if let Some(ratio) = self.line_height {
            style.line_height_ratio = ratio;
        }
        style
    }

    fn font(&self) -> codereel::LoadedFont {
        let font = codereel::LoadedFont::load(codereel::FontRole::Monospace, self.font.as_deref());
        if self.dump_fonts {
            dump_font_diagnostics(&font);
        }
        font
    }
}

#[derive(Parser, Debug)]
struct ImageArgs {
    /// Source file to render.
    #[arg(default_value = codereel::DEFAULT_INPUT)]
    input: PathBuf,

    /// `dark`, `light` or `both`.
    #[arg(long, default_value = "both")]
    theme: String,

    /// Output directory.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    #[command(flatten)]
    style: StyleArgs,
}

#[derive(Parser, Debug)]
struct ScenesArgs {
    /// Scene manifest JSON.
    #[arg(long)]
    manifest: PathBuf,

    /// Source file the scenes slice.
    #[arg(long)]
    source: PathBuf,

    /// Output directory for `{name}.png`.
    #[arg(long)]
    out_dir: PathBuf,

    #[arg(long, default_value = "light")]
    theme: String,

    #[command(flatten)]
    style: StyleArgs,
}

#[derive(Parser, Debug)]
struct FitArgs {
    #[arg(long)]
    in_dir: PathBuf,

    #[arg(long)]
    out_dir: PathBuf,

    #[arg(long, default_value_t = 1920)]
    width: u32,

    #[arg(long, default_value_t = 1080)]
    height: u32,

    /// Letterbox color (`#RRGGBB`).
    #[arg(long, default_value = "#2d2d2d")]
    background: codereel::Rgba8,

    /// Fraction of the largest fitting size to use.
    #[arg(long, default_value_t = 0.9)]
    fill: f64,
}

#[derive(Parser, Debug)]
struct NarrateArgs {
    /// Narration manifest JSON.
    #[arg(long)]
    manifest: PathBuf,

    /// Output directory for `{id}_narration.mp3`.
    #[arg(long)]
    out_dir: PathBuf,

    #[arg(long, default_value = "Kyoko")]
    voice: String,

    /// Words per minute.
    #[arg(long, default_value_t = 225)]
    rate: u32,

    /// Keep the intermediate AIFF files.
    #[arg(long)]
    keep_aiff: bool,
}

#[derive(Parser, Debug)]
struct AssembleArgs {
    /// Video manifest JSON.
    #[arg(long)]
    manifest: PathBuf,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    #[arg(long, default_value_t = 30)]
    fps: u32,

    #[arg(long, default_value_t = 1920)]
    width: u32,

    #[arg(long, default_value_t = 1080)]
    height: u32,

    /// Keep the per-scene segments in the temp directory.
    #[arg(long)]
    keep_segments: bool,
}

#[derive(Parser, Debug)]
struct SlidesArgs {
    /// Slide manifest JSON.
    #[arg(long)]
    manifest: PathBuf,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    #[arg(long, default_value_t = 30)]
    fps: u32,

    #[arg(long, default_value_t = 1920)]
    width: u32,

    #[arg(long, default_value_t = 1080)]
    height: u32,

    /// Sans-serif font file for captions.
    #[arg(long)]
    font: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Image(args) => cmd_image(args),
        Command::Scenes(args) => cmd_scenes(args),
        Command::Fit(args) => cmd_fit(args),
        Command::Narrate(args) => cmd_narrate(args),
        Command::Assemble(args) => cmd_assemble(args),
        Command::Slides(args) => cmd_slides(args),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn cmd_image(args: ImageArgs) -> anyhow::Result<()> {
    let themes = codereel::parse_theme_selection(&args.theme);
    let font = args.style.font();
    let written = codereel::render_code_images(
        &args.input,
        &args.out_dir,
        &themes,
        args.style.style(14),
        &font,
    )?;
    for path in written {
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

fn cmd_scenes(args: ScenesArgs) -> anyhow::Result<()> {
    let manifest = codereel::SceneManifest::from_path(&args.manifest)?;
    let theme = codereel::ThemeName::parse_lossy(&args.theme);
    let mut renderer =
        codereel::CodeImageRenderer::new(theme, args.style.style(16), args.style.font())?;
    let (report, written) =
        codereel::render_scenes(&mut renderer, &args.source, &manifest, &args.out_dir)?;
    for path in &written {
        eprintln!("wrote {}", path.display());
    }
    report.into_result()?;
    Ok(())
}

fn cmd_fit(args: FitArgs) -> anyhow::Result<()> {
    let opts = codereel::FitOpts {
        size: codereel::FrameSize::new(args.width, args.height)?,
        background: args.background,
        fill: args.fill,
    };
    let report = codereel::fit_directory(&args.in_dir, &args.out_dir, &opts)?;
    eprintln!(
        "fitted {} image(s) into {}",
        report.succeeded().len(),
        args.out_dir.display()
    );
    report.into_result()?;
    Ok(())
}

fn cmd_narrate(args: NarrateArgs) -> anyhow::Result<()> {
    let manifest = codereel::NarrationManifest::from_path(&args.manifest)?;
    let opts = codereel::NarrateOpts {
        speech: codereel::SpeechOpts {
            voice: args.voice,
            rate: args.rate,
        },
        keep_aiff: args.keep_aiff,
    };
    let (report, clips) = codereel::narrate(&manifest, &args.out_dir, &opts)?;
    eprintln!("audio durations:");
    for clip in &clips {
        match clip.duration {
            Some(secs) => eprintln!("  {}: {secs:.1} seconds", clip.id),
            None => eprintln!("  {}: unable to get duration", clip.id),
        }
    }
    report.into_result()?;
    Ok(())
}

fn cmd_assemble(args: AssembleArgs) -> anyhow::Result<()> {
    let manifest = codereel::VideoManifest::from_path(&args.manifest)?;
    let opts = codereel::AssembleOpts {
        size: codereel::FrameSize::new(args.width, args.height)?,
        fps: codereel::Fps::whole(args.fps)?,
        keep_segments: args.keep_segments,
    };
    let report = codereel::assemble(&manifest, &args.out, &opts)?;
    eprintln!("wrote {}", args.out.display());
    report.into_result()?;
    Ok(())
}

fn cmd_slides(args: SlidesArgs) -> anyhow::Result<()> {
    let manifest = codereel::SlideManifest::from_path(&args.manifest)?;
    let font = codereel::LoadedFont::load(codereel::FontRole::SansSerif, args.font.as_deref());
    let size = codereel::FrameSize::new(args.width, args.height)?;
    let fps = codereel::Fps::whole(args.fps)?;
    codereel::render_slides_to_mp4(&manifest, &args.out, size, fps, font)
        .with_context(|| format!("render slideshow '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn dump_font_diagnostics(font: &codereel::LoadedFont) {
    eprintln!("font diagnostics:");
    eprintln!("- origin={}", font.origin());
    match (font.bytes(), font.sha256_hex()) {
        (Some((bytes, index)), Some(sha)) => {
            eprintln!("  index={index} bytes={} sha256={sha}", bytes.len());
        }
        _ => eprintln!("  built-in block glyphs (no font bytes)"),
    }
}
