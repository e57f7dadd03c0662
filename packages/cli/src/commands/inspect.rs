use super::document::{read_design, resolve};
use anyhow::Result;
use artboard_model::{paint_order, Design, DesignElement, ElementKind, Face};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Design document (<store dir>/<id>.json)
    pub file: PathBuf,

    /// Only list elements visible on this face
    #[arg(short, long, value_parser = super::render::parse_face)]
    pub face: Option<Face>,
}

pub fn inspect(args: InspectArgs, cwd: &str) -> Result<()> {
    let design = read_design(&resolve(&args.file, cwd))?;

    print_summary(&design);
    println!();

    let elements = match args.face {
        Some(face) => paint_order(design.elements.iter().filter(|e| e.visible_on(face))),
        None => paint_order(&design.elements),
    };

    if elements.is_empty() {
        println!("  {}", "(no elements)".dimmed());
        return Ok(());
    }

    for element in elements {
        println!("  {}", describe(element));
    }

    Ok(())
}

fn print_summary(design: &Design) {
    let canvas = &design.canvas;
    println!(
        "{} {}",
        "📐".bright_blue(),
        design.meta.project_name.bright_white().bold()
    );
    if let Some(id) = &design.meta.design_id {
        println!("   id:         {}", id);
    }
    if let Some(product) = &design.meta.product_id {
        println!("   product:    {}", product);
    }
    println!(
        "   canvas:     {}×{} {:?}",
        canvas.size.width, canvas.size.height, canvas.shape
    );
    println!("   background: {}", canvas.background().to_css());
    println!("   elements:   {}", design.elements.len());
}

fn describe(element: &DesignElement) -> String {
    let face = match element.face {
        Some(Face::Front) => "front",
        Some(Face::Back) => "back",
        None => "both",
    };
    let kind = element.kind.type_name().unwrap_or("?");

    let mut line = format!(
        "{:>4}  {:<10} {:<8} {:<6} x={} y={} {}×{}",
        element.z_index,
        element.id,
        kind,
        face,
        element.x,
        element.y,
        element.width,
        element.height
    );
    if element.rotation != 0.0 {
        line.push_str(&format!(" ⟳{}°", element.rotation));
    }
    if let ElementKind::Text(text) = &element.kind {
        line.push_str(&format!(" {:?}", text.content));
    }
    if matches!(element.kind, ElementKind::Unsupported { .. }) {
        return line.yellow().to_string();
    }
    if element.locked {
        line.push_str(" 🔒");
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use artboard_model::{ElementType, TextProps};

    #[test]
    fn test_describe_text() {
        let element = DesignElement::new(
            "t1",
            ElementKind::Text(TextProps {
                content: "Hello".to_string(),
                ..TextProps::default()
            }),
        )
        .with_bounds(10.0, 20.0, 200.0, 40.0)
        .on_face(Face::Back);

        let line = describe(&element);
        assert!(line.contains("t1"));
        assert!(line.contains("text"));
        assert!(line.contains("back"));
        assert!(line.contains("\"Hello\""));
    }

    #[test]
    fn test_describe_shared_element() {
        let element = DesignElement::new("g", ElementKind::with_defaults(ElementType::Graphic));
        assert!(describe(&element).contains("both"));
    }
}
