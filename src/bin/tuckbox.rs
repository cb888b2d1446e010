use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "tuckbox", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a box description to a PNG page template.
    Render(RenderArgs),
    /// Print a sample box description to stdout.
    Sample,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input box description JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Log per-panel progress.
    #[arg(long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Sample => {
            print!("{}", tuckbox::SAMPLE_CONFIG);
            Ok(())
        }
    }
}

fn init_tracing(debug: bool) {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    init_tracing(args.debug);

    let config = tuckbox::BoxConfig::from_path(&args.in_path)
        .with_context(|| format!("load box description '{}'", args.in_path.display()))?;
    let tuck_box = tuckbox::TuckBox::new(config)?;
    let page = tuck_box.generate(&tuckbox::ParleyText::new())?;

    let warnings = page.diagnostics.warnings().len();
    if warnings > 0 {
        eprintln!("{warnings} warning(s) raised; see log above");
    }

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    page.save_png(&args.out)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
