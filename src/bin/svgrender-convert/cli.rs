//! Command-line definition for `svgrender-convert`.

use clap::crate_version;
use clap_complete::Shell;

use svgrender::{ImageRendering, ShapeRendering, TextRendering};

use std::ffi::OsString;
use std::path::PathBuf;

pub fn build_cli() -> clap::Command {
    clap::Command::new("svgrender-convert")
        .version(concat!("version ", crate_version!()))
        .about("Render an SVG file to a PNG image")
        .disable_version_flag(true)
        .arg(
            clap::Arg::new("version")
                .short('v')
                .long("version")
                .help("Display the version information")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("dpi")
                .short('d')
                .long("dpi")
                .num_args(1)
                .value_name("number")
                .default_value("96")
                .value_parser(parse_positive_number)
                .help("Pixels per inch, for converting physical units")
                .action(clap::ArgAction::Set),
        )
        .arg(
            clap::Arg::new("font_family")
                .long("font-family")
                .num_args(1)
                .value_name("family")
                .value_parser(clap::builder::NonEmptyStringValueParser::new())
                .help("Font family for text without one [default: Times New Roman]")
                .action(clap::ArgAction::Set),
        )
        .arg(
            clap::Arg::new("font_size")
                .long("font-size")
                .num_args(1)
                .value_name("number")
                .value_parser(parse_positive_number)
                .help("Font size for text without one [default: 12]")
                .action(clap::ArgAction::Set),
        )
        .arg(family_arg("serif_family", "serif-family", "serif"))
        .arg(family_arg("sans_serif_family", "sans-serif-family", "sans-serif"))
        .arg(family_arg("cursive_family", "cursive-family", "cursive"))
        .arg(family_arg("fantasy_family", "fantasy-family", "fantasy"))
        .arg(family_arg("monospace_family", "monospace-family", "monospace"))
        .arg(
            clap::Arg::new("languages")
                .short('l')
                .long("languages")
                .num_args(1)
                .value_name("language-tags")
                .value_parser(clap::builder::NonEmptyStringValueParser::new())
                .help("Languages for systemLanguage, for example \"es-MX,de,en\" [default: en]")
                .action(clap::ArgAction::Set),
        )
        .arg(
            clap::Arg::new("shape_rendering")
                .long("shape-rendering")
                .num_args(1)
                .value_name("mode")
                .value_parser(clap::builder::ValueParser::new(
                    str::parse::<ShapeRendering>,
                ))
                .help("optimizeSpeed, crispEdges or geometricPrecision")
                .action(clap::ArgAction::Set),
        )
        .arg(
            clap::Arg::new("text_rendering")
                .long("text-rendering")
                .num_args(1)
                .value_name("mode")
                .value_parser(clap::builder::ValueParser::new(
                    str::parse::<TextRendering>,
                ))
                .help("optimizeSpeed, optimizeLegibility or geometricPrecision")
                .action(clap::ArgAction::Set),
        )
        .arg(
            clap::Arg::new("image_rendering")
                .long("image-rendering")
                .num_args(1)
                .value_name("mode")
                .value_parser(clap::builder::ValueParser::new(
                    str::parse::<ImageRendering>,
                ))
                .help("optimizeQuality or optimizeSpeed")
                .action(clap::ArgAction::Set),
        )
        .arg(
            clap::Arg::new("resources_dir")
                .short('r')
                .long("resources-dir")
                .num_args(1)
                .value_name("directory")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Directory for resolving relative references [default: none]")
                .action(clap::ArgAction::Set),
        )
        .arg(
            clap::Arg::new("stylesheet")
                .short('s')
                .long("stylesheet")
                .num_args(1)
                .value_parser(clap::value_parser!(PathBuf))
                .value_name("filename.css")
                .help("Filename of CSS stylesheet to apply")
                .action(clap::ArgAction::Set),
        )
        .arg(
            clap::Arg::new("font_file")
                .long("font-file")
                .num_args(1)
                .value_parser(clap::value_parser!(PathBuf))
                .value_name("filename")
                .help("Font file to load; can be given more than once")
                .action(clap::ArgAction::Append),
        )
        .arg(
            clap::Arg::new("no_system_fonts")
                .long("no-system-fonts")
                .help("Do not load the fonts installed on the system")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("export_id")
                .short('i')
                .long("export-id")
                .value_parser(clap::builder::NonEmptyStringValueParser::new())
                .value_name("object-id")
                .help("SVG id of object to export [default is to export all objects]")
                .action(clap::ArgAction::Set),
        )
        .arg(
            clap::Arg::new("keep_aspect")
                .short('a')
                .long("keep-aspect-ratio")
                .help("Scale to WIDTH and HEIGHT, preserving the aspect ratio")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("completion")
                .long("completion")
                .help("Output shell completion for the given shell")
                .num_args(1)
                .action(clap::ArgAction::Set)
                .value_parser(clap::value_parser!(Shell))
                .value_name("shell-name"),
        )
        .arg(
            clap::Arg::new("INPUT")
                .value_parser(clap::value_parser!(OsString))
                .help("The SVG or SVGZ file to render")
                .required_unless_present_any(["version", "completion"])
                .index(1),
        )
        .arg(
            clap::Arg::new("OUTPUT")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Output PNG file [defaults to INPUT with a .png extension]")
                .index(2),
        )
        .arg(
            clap::Arg::new("WIDTH")
                .value_parser(parse_dimension)
                .help("Output width in pixels [defaults to the width of the SVG]")
                .index(3),
        )
        .arg(
            clap::Arg::new("HEIGHT")
                .value_parser(parse_dimension)
                .help("Output height in pixels [defaults to the height of the SVG]")
                .index(4),
        )
}

fn family_arg(id: &'static str, long: &'static str, generic: &'static str) -> clap::Arg {
    clap::Arg::new(id)
        .long(long)
        .num_args(1)
        .value_name("family")
        .value_parser(clap::builder::NonEmptyStringValueParser::new())
        .help(format!("Font family for the generic \"{generic}\" name"))
        .action(clap::ArgAction::Set)
}

fn parse_positive_number(v: &str) -> Result<f32, String> {
    match v.parse::<f32>() {
        Ok(n) if n > 0.0 && n.is_finite() => Ok(n),
        Ok(_) => Err(String::from("must be a positive number")),
        Err(e) => Err(format!("{e}")),
    }
}

fn parse_dimension(v: &str) -> Result<u32, String> {
    match v.parse::<u32>() {
        Ok(0) => Err(String::from("must be greater than zero")),
        Ok(n) => Ok(n),
        Err(e) => Err(format!("{e}")),
    }
}
