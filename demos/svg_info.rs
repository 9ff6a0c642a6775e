//! Prints information about an SVG file and renders it with several option sets.
//!
//! Usage: `cargo run --example svg_info -- input.svg [output-prefix]`

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{bail, Context, Result};

use svgrender::{
    ImageRendering, Options, RenderTree, RgbaImage, ShapeRendering, TextRendering, Transform,
};

fn save(image: &RgbaImage, filename: &str) -> Result<()> {
    let file = File::create(filename).with_context(|| format!("creating {filename}"))?;
    image.write_png(BufWriter::new(file))?;
    println!("  saved {} ({}x{})", filename, image.width(), image.height());
    Ok(())
}

fn parse(data: &[u8], options: &Options) -> Result<RenderTree> {
    let tree = RenderTree::from_data(data, options)?;
    if tree.is_empty() {
        bail!("SVG is empty");
    }
    Ok(tree)
}

fn render_scaled(data: &[u8], options: &Options, scale: f32, filename: &str) -> Result<()> {
    let tree = parse(data, options)?;
    let size = tree.image_size();

    let width = (size.width * scale).ceil() as u32;
    let height = (size.height * scale).ceil() as u32;

    let image = tree.render(&Transform::from_scale(scale, scale), width, height)?;
    save(&image, filename)
}

fn print_info(data: &[u8]) -> Result<()> {
    let tree = parse(data, &Options::new())?;

    let size = tree.image_size();
    println!("  natural size: {:.1} x {:.1}", size.width, size.height);

    if let Some(r) = tree.object_bbox() {
        println!("  object bbox: ({:.1}, {:.1}) {:.1} x {:.1}", r.x, r.y, r.width, r.height);
    }

    if let Some(r) = tree.image_bbox() {
        println!("  image bbox: ({:.1}, {:.1}) {:.1} x {:.1}", r.x, r.y, r.width, r.height);
    }

    Ok(())
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <input.svg> [output-prefix]", args[0]);
        std::process::exit(1);
    }

    let input = Path::new(&args[1]);
    let prefix = match args.get(2) {
        Some(p) => p.clone(),
        None => input.with_extension("").to_string_lossy().into_owned(),
    };

    svgrender::init_log();

    let data = std::fs::read(input).with_context(|| format!("reading {}", input.display()))?;

    println!("Information:");
    print_info(&data)?;

    println!("Default options:");
    save(&svgrender::render(&data)?, &format!("{prefix}_default.png"))?;

    println!("Twice the DPI:");
    let mut options = Options::new();
    options.set_dpi(192.0);
    render_scaled(&data, &options, 1.0, &format!("{prefix}_highdpi.png"))?;

    println!("Optimized for speed:");
    let mut options = Options::new();
    options.set_shape_rendering_mode(ShapeRendering::OptimizeSpeed);
    options.set_text_rendering_mode(TextRendering::OptimizeSpeed);
    options.set_image_rendering_mode(ImageRendering::OptimizeSpeed);
    render_scaled(&data, &options, 1.0, &format!("{prefix}_speed.png"))?;

    println!("At 2x scale:");
    render_scaled(&data, &Options::new(), 2.0, &format!("{prefix}_2x.png"))?;

    println!("Fitted into 256x256:");
    let image = svgrender::render_scaled_to_size(&data, 256, 256)?;
    save(&image, &format!("{prefix}_fit.png"))?;

    println!("With system fonts:");
    let mut options = Options::new();
    options.load_system_fonts();
    options.set_font_family("Arial");
    options.set_font_size(12.0);
    println!("  {} font faces loaded", options.font_count());
    render_scaled(&data, &options, 1.0, &format!("{prefix}_with_fonts.png"))?;

    Ok(())
}
