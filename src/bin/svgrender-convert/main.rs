use clap::crate_version;
use clap_complete::{Generator, Shell};

use svgrender::{
    ImageRendering, Options, RenderTree, Rect, RgbaImage, ShapeRendering, Size, TextRendering,
    Transform,
};

use std::ffi::OsString;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

mod cli;

use crate::cli::build_cli;

#[derive(Debug)]
pub struct Error(String);

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

macro_rules! impl_error_from {
    ($err:ty) => {
        impl From<$err> for Error {
            fn from(e: $err) -> Self {
                Self(format!("{e}"))
            }
        }
    };
}

impl_error_from!(svgrender::RenderingError);
impl_error_from!(clap::Error);

macro_rules! error {
    ($($arg:tt)*) => (Error(std::format!($($arg)*)));
}

/// Font configuration taken from the command line.
#[derive(Debug, Default)]
struct Fonts {
    family: Option<String>,
    size: Option<f32>,
    serif: Option<String>,
    sans_serif: Option<String>,
    cursive: Option<String>,
    fantasy: Option<String>,
    monospace: Option<String>,
    files: Vec<PathBuf>,
    system: bool,
}

#[derive(Debug)]
struct Converter {
    dpi: f32,
    fonts: Fonts,
    languages: Option<Vec<String>>,
    shape_rendering: Option<ShapeRendering>,
    text_rendering: Option<TextRendering>,
    image_rendering: Option<ImageRendering>,
    resources_dir: Option<PathBuf>,
    stylesheet: Option<PathBuf>,
    export_id: Option<String>,
    keep_aspect_ratio: bool,
    size: Option<(u32, u32)>,
    input: PathBuf,
    output: PathBuf,
}

impl Converter {
    fn options(&self) -> Result<Options, Error> {
        let mut options = Options::new();

        options.set_dpi(self.dpi);

        if self.fonts.system {
            options.load_system_fonts();
        }

        for path in &self.fonts.files {
            options
                .load_font_file(path)
                .map_err(|e| error!("Error loading font \"{}\": {}", path.display(), e))?;
        }

        if let Some(ref family) = self.fonts.family {
            options.set_font_family(family);
        }
        if let Some(size) = self.fonts.size {
            options.set_font_size(size);
        }
        if let Some(ref family) = self.fonts.serif {
            options.set_serif_family(family);
        }
        if let Some(ref family) = self.fonts.sans_serif {
            options.set_sans_serif_family(family);
        }
        if let Some(ref family) = self.fonts.cursive {
            options.set_cursive_family(family);
        }
        if let Some(ref family) = self.fonts.fantasy {
            options.set_fantasy_family(family);
        }
        if let Some(ref family) = self.fonts.monospace {
            options.set_monospace_family(family);
        }

        if let Some(ref languages) = self.languages {
            let languages: Vec<&str> = languages.iter().map(String::as_str).collect();
            options.set_languages(&languages);
        }

        if let Some(mode) = self.shape_rendering {
            options.set_shape_rendering_mode(mode);
        }
        if let Some(mode) = self.text_rendering {
            options.set_text_rendering_mode(mode);
        }
        if let Some(mode) = self.image_rendering {
            options.set_image_rendering_mode(mode);
        }

        if let Some(ref dir) = self.resources_dir {
            options.set_resources_dir(dir);
        }

        if let Some(ref path) = self.stylesheet {
            let css = std::fs::read_to_string(path)
                .map_err(|e| error!("Error reading stylesheet \"{}\": {}", path.display(), e))?;
            options.set_stylesheet(&css);
        }

        Ok(options)
    }

    pub fn convert(self) -> Result<(), Error> {
        let options = self.options()?;
        let input = self.input.display();

        let tree = RenderTree::from_path(&self.input, &options)
            .map_err(|e| error!("Error reading SVG {}: {}", input, e))?;

        let natural = self.natural_geometry(&tree)?;
        let natural_size = natural.size();

        let (width, height) = match self.size {
            Some(size) => size,
            None => natural_size
                .to_pixels()
                .ok_or_else(|| error!("The SVG {} has no dimensions", input))?,
        };

        let transform = if self.keep_aspect_ratio && self.size.is_some() {
            Transform::fit_to(natural_size, Size::new(width as f32, height as f32))?
        } else {
            Transform::identity()
        };

        let image = match self.export_id {
            None => {
                if tree.is_empty() {
                    return Err(error!("The SVG {} has no renderable elements", input));
                }

                tree.render(&transform, width, height)
            }

            Some(ref id) => tree.render_node(id, &transform, width, height),
        }
        .map_err(|e| error!("Error rendering SVG {}: {}", input, e))?;

        self.write_output(&image)
    }

    /// Area to render: the whole document, or the exported element's bounding box.
    fn natural_geometry(&self, tree: &RenderTree) -> Result<Rect, Error> {
        match self.export_id {
            None => {
                let size = tree.image_size();
                Ok(Rect::new(0.0, 0.0, size.width, size.height))
            }

            Some(ref id) => {
                if !tree.has_element_with_id(id) {
                    return Err(error!(
                        "File {} does not have an object with id \"{}\"",
                        self.input.display(),
                        id
                    ));
                }

                tree.node_bbox(id).ok_or_else(|| {
                    error!(
                        "Object \"{}\" in {} has nothing to render",
                        id,
                        self.input.display()
                    )
                })
            }
        }
    }

    fn write_output(&self, image: &RgbaImage) -> Result<(), Error> {
        let file = File::create(&self.output)
            .map_err(|e| error!("Error opening output \"{}\": {}", self.output.display(), e))?;

        image
            .write_png(BufWriter::new(file))
            .map_err(|e| error!("Error saving output \"{}\": {}", self.output.display(), e))
    }
}

fn default_output(input: &Path) -> PathBuf {
    input.with_extension("png")
}

fn print_completions<G: Generator>(gen: G, cmd: &mut clap::Command) {
    clap_complete::generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

fn print_version() {
    println!("svgrender-convert version {}", crate_version!());
}

fn parse_args() -> Result<Converter, Error> {
    let cli = build_cli();

    let matches = match cli.try_get_matches() {
        Ok(matches) => matches,

        Err(e) => match e.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => e.exit(),
            _ => return Err(e.into()),
        },
    };

    if let Some(shell) = matches.get_one::<Shell>("completion").copied() {
        let mut cmd = build_cli();
        eprintln!("Generating completion file for {shell}");
        print_completions(shell, &mut cmd);
        std::process::exit(0);
    }

    if matches.get_flag("version") {
        print_version();
        std::process::exit(0);
    }

    let input = matches
        .get_one::<OsString>("INPUT")
        .map(PathBuf::from)
        .ok_or_else(|| error!("No input file given"))?;

    let output = matches
        .get_one::<PathBuf>("OUTPUT")
        .cloned()
        .unwrap_or_else(|| default_output(&input));

    let width: Option<u32> = matches.get_one("WIDTH").copied();
    let height: Option<u32> = matches.get_one("HEIGHT").copied();

    let size = match (width, height) {
        (None, None) => None,
        (Some(_), None) | (None, Some(_)) => {
            return Err(error!("height must be specified when width is provided"));
        }
        (Some(w), Some(h)) => Some((w, h)),
    };

    let string_arg = |id: &str| matches.get_one::<String>(id).cloned();

    let languages: Option<Vec<String>> = string_arg("languages").map(|s| {
        s.split(',')
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect()
    });

    Ok(Converter {
        dpi: matches.get_one::<f32>("dpi").copied().unwrap_or(96.0),
        fonts: Fonts {
            family: string_arg("font_family"),
            size: matches.get_one::<f32>("font_size").copied(),
            serif: string_arg("serif_family"),
            sans_serif: string_arg("sans_serif_family"),
            cursive: string_arg("cursive_family"),
            fantasy: string_arg("fantasy_family"),
            monospace: string_arg("monospace_family"),
            files: matches
                .get_many::<PathBuf>("font_file")
                .map(|paths| paths.cloned().collect())
                .unwrap_or_default(),
            system: !matches.get_flag("no_system_fonts"),
        },
        languages,
        shape_rendering: matches.get_one("shape_rendering").copied(),
        text_rendering: matches.get_one("text_rendering").copied(),
        image_rendering: matches.get_one("image_rendering").copied(),
        resources_dir: matches.get_one("resources_dir").cloned(),
        stylesheet: matches.get_one("stylesheet").cloned(),
        export_id: string_arg("export_id"),
        keep_aspect_ratio: matches.get_flag("keep_aspect"),
        size,
        input,
        output,
    })
}

fn main() {
    svgrender::init_log();

    if let Err(e) = parse_args().and_then(|converter| converter.convert()) {
        std::eprintln!("{e}");
        std::process::exit(1);
    }
}
