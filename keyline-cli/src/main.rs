use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "keyline", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a summary of every composition in a project file.
    Inspect(InspectArgs),
    /// Sample a layer property at a composition frame.
    Sample(SampleArgs),
    /// Write the bundled demo project as JSON.
    Demo(DemoArgs),
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct SampleArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Composition id (defaults to the first composition).
    #[arg(long)]
    comp: Option<String>,

    /// Layer id.
    #[arg(long)]
    layer: String,

    /// Property name, e.g. `opacity` or `x`.
    #[arg(long)]
    prop: String,

    /// Composition frame (0-based, clamped into the composition).
    #[arg(long)]
    frame: i64,
}

#[derive(Parser, Debug)]
struct DemoArgs {
    /// Output JSON path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Inspect(args) => cmd_inspect(args),
        Command::Sample(args) => cmd_sample(args),
        Command::Demo(args) => cmd_demo(args),
    }
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let comps = keyline::load_project(&args.in_path)?;
    let collapsed = HashSet::new();
    for comp in &comps {
        println!(
            "{} ({}): {} frames @ {} fps",
            comp.id, comp.name, comp.duration_in_frames.0, comp.fps.0
        );
        for row in comp.layers.flatten(&collapsed) {
            let layer = row.layer.as_ref();
            let keyframes: usize = layer
                .properties
                .values()
                .filter_map(|p| match p {
                    keyline::Property::Animated(keys) => Some(keys.len()),
                    keyline::Property::Static(_) => None,
                })
                .sum();
            println!(
                "  {:indent$}{} [{}..{}] {} properties, {} keyframes",
                "",
                layer.id,
                layer.from.0,
                layer.range().end.0,
                layer.properties.len(),
                keyframes,
                indent = row.depth * 2
            );
        }
    }
    Ok(())
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let comps = keyline::load_project(&args.in_path)?;
    let comp = match &args.comp {
        Some(id) => comps
            .iter()
            .find(|c| c.id == *id)
            .with_context(|| format!("no composition '{id}' in project"))?,
        None => comps.first().context("project has no compositions")?,
    };
    let layer = comp
        .layer(&args.layer)
        .with_context(|| format!("no layer '{}' in '{}'", args.layer, comp.id))?;
    let key = keyline::PropertyKey::parse(&args.prop)
        .with_context(|| format!("unknown property '{}'", args.prop))?;

    let frame = comp.clamp_frame(keyline::FrameIndex(args.frame));
    let value = layer
        .property_value(key, frame)
        .with_context(|| format!("layer '{}' has no '{}' channel", args.layer, args.prop))?;
    println!("{}", serde_json::to_string(&value)?);
    Ok(())
}

fn cmd_demo(args: DemoArgs) -> anyhow::Result<()> {
    let comps = keyline::demo_project();
    let json = serde_json::to_string_pretty(&comps)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, json)
        .with_context(|| format!("write project JSON '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
