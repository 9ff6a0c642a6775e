#![warn(unused)]

use anyhow::Result;
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;

use svgrender::{Options, RenderTree, Size, Transform};

/// Size of the image that every file is rendered into.
const RENDER_SIZE: u32 = 100;

#[derive(Parser, Debug)]
#[command(name = "svgrender-bench", version, about = "Benchmarking utility for svgrender.")]
struct Opt {
    /// Number of seconds to sleep before starting to process SVGs
    #[arg(short = 's', long = "sleep", default_value_t = 0)]
    sleep_secs: u64,

    /// Number of times to parse each file
    #[arg(short = 'p', long = "num-parse", default_value_t = 100)]
    num_parse: usize,

    /// Number of times to render each file
    #[arg(short = 'r', long = "num-render", default_value_t = 100)]
    num_render: usize,

    /// Stop all processing when a file cannot be loaded or rendered
    #[arg(long = "hard-failures")]
    hard_failures: bool,

    /// Do not load the fonts installed on the system
    #[arg(long = "no-system-fonts")]
    no_system_fonts: bool,

    /// Input files or directories
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

#[derive(Debug, Error)]
enum ProcessingError {
    #[error("could not load {path}: {error}")]
    Loading {
        path: String,
        error: svgrender::LoadingError,
    },

    #[error("could not render {path}: {error}")]
    Rendering {
        path: String,
        error: svgrender::RenderingError,
    },
}

/// Totals over all processed files.
#[derive(Debug, Default)]
struct Stats {
    files: usize,
    skipped: usize,
    parse_time: Duration,
    render_time: Duration,
}

fn is_svg(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => ext.eq_ignore_ascii_case("svg") || ext.eq_ignore_ascii_case("svgz"),
        None => false,
    }
}

fn process_path(opt: &Opt, options: &Options, path: &Path, stats: &mut Stats) -> Result<()> {
    let meta = fs::metadata(path)?;

    if meta.is_dir() {
        process_directory(opt, options, path, stats)?;
    } else if is_svg(path) {
        process_file(opt, options, path, stats)?;
    }

    Ok(())
}

fn process_directory(opt: &Opt, options: &Options, path: &Path, stats: &mut Stats) -> Result<()> {
    println!("Processing {:?}", path);

    let mut entries = fs::read_dir(path)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()?;
    entries.sort();

    for entry in entries {
        process_path(opt, options, &entry, stats)?;
    }

    Ok(())
}

/// Reports a failure, which stops processing only with `--hard-failures`.
fn failure(opt: &Opt, error: ProcessingError, stats: &mut Stats) -> Result<()> {
    if opt.hard_failures {
        Err(error.into())
    } else {
        println!("skipping: {error}");
        stats.skipped += 1;
        Ok(())
    }
}

fn process_file(opt: &Opt, options: &Options, path: &Path, stats: &mut Stats) -> Result<()> {
    println!("Processing {:?}", path);

    let path_str = path.to_string_lossy().to_string();

    let start = Instant::now();
    let mut tree = None;

    for _ in 0..opt.num_parse {
        match RenderTree::from_path(path, options) {
            Ok(t) => tree = Some(t),
            Err(error) => {
                let path = path_str;
                return failure(opt, ProcessingError::Loading { path, error }, stats);
            }
        }
    }

    stats.parse_time += start.elapsed();

    let tree = match tree {
        Some(t) => t,
        None => return Ok(()),
    };

    let transform = match Transform::fit_to(
        tree.image_size(),
        Size::new(RENDER_SIZE as f32, RENDER_SIZE as f32),
    ) {
        Ok(t) => t,
        Err(error) => {
            let path = path_str;
            return failure(opt, ProcessingError::Rendering { path, error }, stats);
        }
    };

    let start = Instant::now();

    for _ in 0..opt.num_render {
        if let Err(error) = tree.render(&transform, RENDER_SIZE, RENDER_SIZE) {
            let path = path_str;
            return failure(opt, ProcessingError::Rendering { path, error }, stats);
        }
    }

    stats.render_time += start.elapsed();
    stats.files += 1;

    Ok(())
}

fn print_options(opt: &Opt) {
    println!("Will parse each file {} times", opt.num_parse);
    println!("Will render each file {} times", opt.num_render);
    if opt.num_render > 0 {
        println!("Rendering to {RENDER_SIZE}x{RENDER_SIZE} RGBA images");
    }
    println!(
        "Sleeping for {} seconds before processing SVGs...",
        opt.sleep_secs
    );
}

fn run(opt: &Opt) -> Result<Stats> {
    let mut options = Options::new();
    if !opt.no_system_fonts {
        options.load_system_fonts();
    }

    print_options(opt);

    thread::sleep(Duration::from_secs(opt.sleep_secs));
    println!("Processing files!");

    let mut stats = Stats::default();

    for path in &opt.inputs {
        process_path(opt, &options, path, &mut stats)?;
    }

    Ok(stats)
}

fn main() {
    let opt = Opt::parse();

    if opt.num_parse < 1 {
        eprintln!("Must parse files at least 1 time; please specify a higher number\n");
        process::exit(1);
    }

    svgrender::init_log();

    println!("hard_failures: {:?}", opt.hard_failures);

    match run(&opt) {
        Ok(stats) => {
            println!(
                "Processed {} files ({} skipped); parsing took {:?}, rendering took {:?}",
                stats.files, stats.skipped, stats.parse_time, stats.render_time
            );
        }

        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    }
}
