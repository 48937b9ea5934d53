use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "cardcast", version)]
struct Cli {
    /// Run configuration JSON. Defaults are used when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render every slide of a record's carousel as PNGs.
    Render(RenderArgs),
    /// Print the paginated storyboard of a record as JSON.
    Storyboard(StoryboardArgs),
    /// Render only the cover card of a record.
    Cover(CoverArgs),
    /// Print the resolved font faces (family name + SHA-256 of font bytes).
    Fonts,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input record JSON.
    #[arg(long)]
    record: PathBuf,

    /// Output directory; overrides `output_dir` from the config.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Render cards on a worker pool.
    #[arg(long)]
    parallel: bool,

    /// Worker threads for `--parallel`.
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct StoryboardArgs {
    /// Input record JSON.
    #[arg(long)]
    record: PathBuf,
}

#[derive(Parser, Debug)]
struct CoverArgs {
    /// Input record JSON.
    #[arg(long)]
    record: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = read_config(cli.config.as_deref())?;
    cardcast::init_logging(&config.logging);

    match cli.cmd {
        Command::Render(args) => cmd_render(config, args),
        Command::Storyboard(args) => cmd_storyboard(&config, args),
        Command::Cover(args) => cmd_cover(&config, args),
        Command::Fonts => cmd_fonts(&config),
    }
}

fn read_config(path: Option<&Path>) -> anyhow::Result<cardcast::CarouselConfig> {
    match path {
        Some(path) => cardcast::CarouselConfig::load(path)
            .with_context(|| format!("load config '{}'", path.display())),
        None => Ok(cardcast::CarouselConfig::default()),
    }
}

fn read_record(path: &Path) -> anyhow::Result<cardcast::ContentRecord> {
    cardcast::ContentRecord::from_json_file(path)
        .with_context(|| format!("load record '{}'", path.display()))
}

fn cmd_render(mut config: cardcast::CarouselConfig, args: RenderArgs) -> anyhow::Result<()> {
    let record = read_record(&args.record)?;
    if args.parallel {
        config.render.threading.parallel = true;
    }
    if args.threads.is_some() {
        config.render.threading.threads = args.threads;
    }
    let out_dir = args.out.unwrap_or_else(|| config.output_dir.clone());

    let engine = config.engine().context("prepare render engine")?;
    let builder = config.storyboard_builder();
    let slides = cardcast::CarouselAssembler::new(&builder, &engine)
        .with_opts(config.render.clone())
        .assemble(&record, &out_dir)
        .with_context(|| format!("render carousel for '{}'", record.name))?;

    for path in &slides {
        println!("{}", path.display());
    }
    eprintln!("wrote {} slides to {}", slides.len(), out_dir.display());
    Ok(())
}

fn cmd_storyboard(config: &cardcast::CarouselConfig, args: StoryboardArgs) -> anyhow::Result<()> {
    let record = read_record(&args.record)?;
    let storyboard = config.storyboard_builder().build(&record).paginate();
    let json = serde_json::to_string_pretty(&storyboard).context("serialize storyboard")?;
    println!("{json}");
    Ok(())
}

fn cmd_cover(config: &cardcast::CarouselConfig, args: CoverArgs) -> anyhow::Result<()> {
    let record = read_record(&args.record)?;
    let engine = config.engine().context("prepare render engine")?;
    let builder = config.storyboard_builder();
    cardcast::CarouselAssembler::new(&builder, &engine)
        .render_cover(&record, &args.out)
        .with_context(|| format!("render cover '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_fonts(config: &cardcast::CarouselConfig) -> anyhow::Result<()> {
    let fonts = cardcast::FontSet::load(&config.fonts).context("load fonts")?;
    for face in fonts.iter() {
        println!("{}:", face.face);
        println!("  family: {}", face.family);
        println!("  index:  {}", face.index);
        println!("  sha256: {}", face.fingerprint());
    }
    Ok(())
}
