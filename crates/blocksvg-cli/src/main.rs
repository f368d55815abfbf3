//! blocksvg CLI
//!
//! Usage:
//!   blocksvg [OPTIONS] <INPUT>...
//!
//! Options:
//!   -m, --mode <MODE>      color, bw or grayscale
//!   -c, --colors <N>       Target number of colors (2-64)
//!   -d, --detail <N>       Detail level (1-10)
//!   -s, --scale <F>        Output scale applied before sampling
//!   -o, --output <PATH>    Output file (one input) or directory (many inputs)
//!       --config <FILE>    Conversion parameters (TOML format)
//!       --stdout           Print the SVG instead of writing a file
//!   -v, --verbose          Increase log verbosity (repeatable)

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::{ArgAction, Parser};
use rayon::prelude::*;
use tracing::{debug, error, info, Level};

use blocksvg_core::{
    build_document, default_output_path, load_image, write_svg, ConversionMode,
    ConversionParams, SvgOptions,
};

#[derive(Parser, Debug)]
#[command(name = "blocksvg")]
#[command(about = "Convert raster images to block-quantized SVG")]
#[command(version)]
struct Cli {
    /// Input images (PNG, JPEG, BMP, GIF)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Conversion mode: color, bw or grayscale
    #[arg(short, long)]
    mode: Option<ConversionMode>,

    /// Target number of colors (2-64)
    #[arg(short, long)]
    colors: Option<u32>,

    /// Detail level (1-10); higher means smaller blocks
    #[arg(short, long)]
    detail: Option<u32>,

    /// Output scale applied before sampling (e.g. 0.5, 1.0, 2.0)
    #[arg(short, long)]
    scale: Option<f64>,

    /// Output file for a single input, or directory for several
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Conversion parameters file (TOML format); flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the SVG to stdout instead of writing a file
    #[arg(long)]
    stdout: bool,

    /// Clamp out-of-range colors/detail instead of failing
    #[arg(long)]
    clamp: bool,

    /// Omit the attribution comment
    #[arg(long)]
    no_comment: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Outcome of one successful conversion.
#[derive(Debug)]
struct Converted {
    output: Option<PathBuf>,
    width: u32,
    height: u32,
    colors: usize,
    rects: usize,
    svg: String,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let params = resolve_params(cli)?;
    let options = if cli.no_comment {
        SvgOptions::new().without_comments()
    } else {
        SvgOptions::default()
    };

    if cli.stdout && cli.inputs.len() != 1 {
        bail!("--stdout requires exactly one input");
    }

    if let Some(dir) = &cli.output {
        if !cli.stdout && cli.inputs.len() > 1 {
            prepare_output_dir(dir)?;
        }
    }

    debug!(?params, inputs = cli.inputs.len(), "starting conversion");

    let planned = plan_outputs(&cli.inputs, cli.output.as_deref(), cli.stdout);
    let results: Vec<(PathBuf, Result<Converted>)> = cli
        .inputs
        .par_iter()
        .zip(planned.into_par_iter())
        .map(|(input, output)| {
            let result = output.and_then(|output| convert_one(input, output, &params, &options));
            (input.clone(), result)
        })
        .collect();

    let mut failures = 0;
    for (input, result) in results {
        match result {
            Ok(converted) => match &converted.output {
                Some(path) => {
                    info!(input = %input.display(), output = %path.display(), "converted");
                    println!(
                        "{} -> {} ({}x{}, {} colors, {} rects)",
                        input.display(),
                        path.display(),
                        converted.width,
                        converted.height,
                        converted.colors,
                        converted.rects
                    );
                }
                None => println!("{}", converted.svg),
            },
            Err(e) => {
                failures += 1;
                error!(input = %input.display(), "conversion failed");
                eprintln!("Error converting '{}': {:#}", input.display(), e);
            }
        }
    }

    if failures > 0 {
        bail!("{} of {} conversions failed", failures, cli.inputs.len());
    }
    Ok(())
}

/// Merge the config file, defaults and command-line overrides.
fn resolve_params(cli: &Cli) -> Result<ConversionParams> {
    let mut params = match &cli.config {
        Some(path) => load_params(path)?,
        None => ConversionParams::default(),
    };

    if let Some(mode) = cli.mode {
        params.mode = mode;
    }
    if let Some(colors) = cli.colors {
        params.num_colors = colors;
    }
    if let Some(detail) = cli.detail {
        params.detail_level = detail;
    }
    if let Some(scale) = cli.scale {
        params.output_scale = scale;
    }
    if cli.clamp {
        params = params.clamped();
    }

    params.validate()?;
    Ok(params)
}

fn load_params(path: &Path) -> Result<ConversionParams> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config '{}'", path.display()))?;
    parse_params(&text).with_context(|| format!("parsing config '{}'", path.display()))
}

fn parse_params(text: &str) -> Result<ConversionParams> {
    Ok(toml::from_str(text)?)
}

/// Pick where an input's SVG goes.
///
/// With a single input, `--output` names the file unless it is an existing
/// directory. With several inputs it is always treated as a directory.
fn output_path(input: &Path, output: Option<&Path>, input_count: usize) -> PathBuf {
    let default = default_output_path(input);
    match output {
        Some(out) if input_count == 1 && !out.is_dir() => out.to_path_buf(),
        Some(dir) => match default.file_name() {
            Some(name) => dir.join(name),
            None => dir.join(blocksvg_core::encode::FALLBACK_FILE_NAME),
        },
        None => default,
    }
}

/// Resolve every input's destination up front.
///
/// Inputs whose outputs collide (e.g. `a/cat.png` and `b/cat.png` into one
/// directory) all get an error instead of overwriting each other.
fn plan_outputs(
    inputs: &[PathBuf],
    output: Option<&Path>,
    stdout: bool,
) -> Vec<Result<Option<PathBuf>>> {
    if stdout {
        return inputs.iter().map(|_| Ok(None)).collect();
    }

    let paths: Vec<PathBuf> = inputs
        .iter()
        .map(|input| output_path(input, output, inputs.len()))
        .collect();

    let mut counts: HashMap<&Path, usize> = HashMap::new();
    for path in &paths {
        *counts.entry(path.as_path()).or_default() += 1;
    }

    paths
        .iter()
        .map(|path| {
            if counts.get(path.as_path()).copied().unwrap_or(0) > 1 {
                Err(anyhow!(
                    "output '{}' would be written by more than one input",
                    path.display()
                ))
            } else {
                Ok(Some(path.clone()))
            }
        })
        .collect()
}

/// Create the output directory used for multiple inputs.
fn prepare_output_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("creating output directory '{}'", dir.display()))
}

fn convert_one(
    input: &Path,
    output: Option<PathBuf>,
    params: &ConversionParams,
    options: &SvgOptions,
) -> Result<Converted> {
    let image = load_image(input)?;
    let document = build_document(&image, params)?;
    let svg = document.render(options);

    if let Some(path) = &output {
        write_svg(path, &svg)?;
    }

    Ok(Converted {
        output,
        width: document.width,
        height: document.height,
        colors: document.color_count(),
        rects: document.rect_count(),
        svg,
    })
}
