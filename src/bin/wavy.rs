use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use sha2::Digest as _;

#[derive(Parser, Debug)]
#[command(name = "wavy", version)]
struct Cli {
    /// Log at debug level instead of warnings only.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a waveform file as a PNG timing diagram.
    Render(RenderArgs),
    /// Print the compiled draw plan as JSON.
    Plan(PlanArgs),
}

#[derive(Args, Debug)]
struct CompileArgs {
    /// Input waveform text.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Font size unit in pixels; every dimension scales with it.
    #[arg(long, default_value_t = 16.0)]
    fs: f64,

    /// Draw vertical gridlines at column centres.
    #[arg(long)]
    debug: bool,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    compile: CompileArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Backend to use.
    #[arg(long, value_enum, default_value_t = BackendChoice::Cpu)]
    backend: BackendChoice,

    /// Font file for names and labels (overrides WAVY_FONT).
    #[arg(long)]
    font: Option<PathBuf>,

    /// Compile tracks on a worker pool.
    #[arg(long)]
    parallel: bool,

    /// Worker thread count for --parallel.
    #[arg(long)]
    threads: Option<usize>,

    /// Print the resolved font family and SHA-256 of its bytes.
    #[arg(long)]
    dump_font: bool,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    #[command(flatten)]
    compile: CompileArgs,

    /// Write the JSON here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BackendChoice {
    Cpu,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Plan(args) => cmd_plan(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn read_source(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read waveform '{}'", path.display()))
}

fn wave_opts(args: &CompileArgs, threading: wavy::CompileThreading) -> wavy::WaveOpts {
    wavy::WaveOpts {
        font_size: args.fs,
        debug: args.debug,
        threading,
    }
}

fn make_backend(
    choice: BackendChoice,
    settings: &wavy::RenderSettings,
) -> anyhow::Result<Box<dyn wavy::RenderBackend>> {
    let kind = match choice {
        BackendChoice::Cpu => wavy::BackendKind::Cpu,
    };

    Ok(wavy::create_backend(kind, settings)?)
}

fn create_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let source = read_source(&args.compile.in_path)?;
    let input = args.compile.in_path.display().to_string();
    let opts = wave_opts(
        &args.compile,
        wavy::CompileThreading {
            parallel: args.parallel,
            threads: args.threads,
        },
    );

    let settings = wavy::RenderSettings {
        font: match &args.font {
            Some(path) => wavy::FontSource::File(path.clone()),
            None => wavy::FontSource::from_env_or_system(),
        },
    };

    if args.dump_font {
        dump_font_diagnostics(&settings.font)?;
    }

    let mut backend = make_backend(args.backend, &settings)?;
    let out = wavy::render_source(&source, &input, &opts, backend.as_mut())?;

    create_parent_dir(&args.out)?;
    image::save_buffer_with_format(
        &args.out,
        &out.frame.data,
        out.frame.width,
        out.frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    if !out.diagnostics.is_empty() {
        eprintln!(
            "{} unrecognized signal pair(s); affected columns left blank",
            out.diagnostics.len()
        );
    }
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let source = read_source(&args.compile.in_path)?;
    let input = args.compile.in_path.display().to_string();
    let opts = wave_opts(&args.compile, wavy::CompileThreading::default());

    let plan = wavy::compile_source(&source, &input, &opts)?;
    let json = plan.to_json_pretty()?;

    match &args.out {
        Some(path) => {
            create_parent_dir(path)?;
            std::fs::write(path, json)
                .with_context(|| format!("write plan '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn dump_font_diagnostics(source: &wavy::FontSource) -> anyhow::Result<()> {
    let font = source.load().context("resolve font")?;
    let origin = match source {
        wavy::FontSource::System => "system".to_string(),
        wavy::FontSource::File(path) => path.display().to_string(),
    };

    eprintln!("font diagnostics:");
    eprintln!("  source:  {origin}");
    eprintln!(
        "  family:  {}",
        font.family.as_deref().unwrap_or("(from file)")
    );
    eprintln!("  index:   {}", font.index);
    eprintln!("  sha256:  {}", sha256_hex(&font.bytes));
    Ok(())
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}
