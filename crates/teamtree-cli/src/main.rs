use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::PathBuf;
use teamtree_core::{NodeId, normalize};
use teamtree_layout::{CollapseSet, TreeLayout, TreeLayouter, TreeModel};

/// Headless driver for the referral tree pipeline: normalize a team
/// JSON export, seed collapse state, run layout and print the result.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the team JSON export
    #[arg(short, long)]
    input: PathBuf,

    /// Expand nodes up to this depth initially
    #[arg(short, long, default_value_t = 2)]
    depth: usize,

    /// Additionally toggle these node ids after seeding
    #[arg(short, long)]
    collapse: Vec<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let text = std::fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {:?}", args.input))?;
    let value: serde_json::Value = serde_json::from_str(&text).context("invalid JSON")?;
    let Some(root) = normalize(&value) else {
        bail!("{:?} contains no referral data", args.input);
    };

    let model = TreeModel::from_root(&root);
    let mut collapsed = CollapseSet::seed(&model, args.depth);
    for id in &args.collapse {
        collapsed.toggle(&model, &NodeId::from(id.as_str()));
    }

    let layout = TreeLayouter::default().layout(&model, &collapsed);
    print_layout(&model, &layout);
    println!(
        "{} of {} members visible, {} collapsed",
        layout.nodes.len(),
        model.node_count(),
        collapsed.len()
    );

    Ok(())
}

fn print_layout(model: &TreeModel, layout: &TreeLayout) {
    println!(
        "{:<12} {:<24} {:>5} {:>10} {:>10}",
        "id", "name", "depth", "x", "y"
    );
    for positioned in &layout.nodes {
        let node = &model[positioned.index];
        println!(
            "{:<12} {:<24} {:>5} {:>10.1} {:>10.1}",
            node.id,
            truncate(&node.member.name, 24),
            positioned.depth,
            positioned.x,
            positioned.y
        );
    }
    let bounds = &layout.bounds;
    println!(
        "canvas: {:.0} x {:.0} (x {:.0}..{:.0}, y {:.0}..{:.0})",
        bounds.width(),
        bounds.height(),
        bounds.min_x,
        bounds.max_x,
        bounds.min_y,
        bounds.max_y
    );
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{head}…")
    }
}
