use super::document::{read_design, resolve};
use anyhow::Result;
use artboard_model::Face;
use artboard_render::{render_artboard, render_thumbnail, RenderContext, VNode};
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Design document (<store dir>/<id>.json)
    pub file: PathBuf,

    /// Face to render (front, back); defaults to the design's active face
    #[arg(short, long, value_parser = parse_face)]
    pub face: Option<Face>,

    /// Render a thumbnail whose longest side is this many pixels
    #[arg(short, long)]
    pub thumbnail: Option<f64>,

    /// Mark this element as selected
    #[arg(short, long)]
    pub selected: Option<String>,

    /// Single-line JSON output
    #[arg(long)]
    pub compact: bool,
}

pub fn parse_face(value: &str) -> Result<Face, String> {
    Face::parse(value).ok_or_else(|| format!("unknown face '{}', use front or back", value))
}

pub fn render(args: RenderArgs, cwd: &str) -> Result<()> {
    let design = read_design(&resolve(&args.file, cwd))?;
    let face = args.face.unwrap_or(design.canvas.active_face);

    let node = match args.thumbnail {
        Some(max_px) => render_thumbnail(&design, face, max_px),
        None => {
            let ctx = RenderContext::new(face).with_selected(args.selected.as_deref());
            render_artboard(&design, &ctx)
        }
    };

    println!("{}", to_json(&node, args.compact)?);
    Ok(())
}

fn to_json(node: &VNode, compact: bool) -> serde_json::Result<String> {
    if compact {
        serde_json::to_string(node)
    } else {
        serde_json::to_string_pretty(node)
    }
}
