//! islandgen CLI - procedural island map generator.
//!
//! Samples fractal Perlin noise over a pixel grid and paints each pixel with
//! the biome band its normalized intensity falls into.

use clap::{Args, Parser, Subcommand};
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::time::Instant;
use thiserror::Error;

use islandgen::biomes::{BandWidths, Biome};
use islandgen::config::{parse_zoom, prompt_size_and_zoom, ConfigError, ImageSize, MapConfig};
use islandgen::export::{export_intensity_png, intensity_path, ExportError, ImageSink, PngSink};
use islandgen::noise::FractalNoise;
use islandgen::terrain::{generate_map, sample_intensities};

/// Procedural island map generator.
#[derive(Parser)]
#[command(name = "islandgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a biome map and write it as PNG.
    Generate(GenerateArgs),

    /// Display the band table and output size for a configuration.
    Info(InfoArgs),
}

#[derive(Args)]
struct GenerateArgs {
    /// TOML config file; flags override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Image size: WIDTHxHEIGHT, or 5k, 4k, 2k, 1k.
    #[arg(short, long)]
    size: Option<ImageSize>,

    /// Zoom level; larger values give larger landmasses.
    #[arg(short, long, value_parser = parse_zoom)]
    zoom: Option<f64>,

    /// Random seed for reproducible generation.
    #[arg(long)]
    seed: Option<u32>,

    /// Number of noise octaves.
    #[arg(long)]
    octaves: Option<u8>,

    /// Base noise frequency.
    #[arg(long)]
    frequency: Option<f64>,

    /// Frequency multiplier per octave (lacunarity).
    #[arg(long)]
    lacunarity: Option<f64>,

    /// Amplitude decay per octave (persistence).
    #[arg(long)]
    persistence: Option<f64>,

    #[command(flatten)]
    bands: BandArgs,

    /// Output PNG path.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also export the grayscale intensity field next to the output.
    #[arg(long)]
    intensity_map: bool,

    /// Ask for size and zoom on stdin.
    #[arg(short, long)]
    interactive: bool,
}

#[derive(Args)]
struct InfoArgs {
    /// TOML config file; flags override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Image size: WIDTHxHEIGHT, or 5k, 4k, 2k, 1k.
    #[arg(short, long)]
    size: Option<ImageSize>,

    #[command(flatten)]
    bands: BandArgs,
}

/// Band widths, counted in intensity levels from 255 downward.
#[derive(Args)]
struct BandArgs {
    /// Width of the mountain (snow) band.
    #[arg(long)]
    snow: Option<u8>,

    /// Width of the forest band.
    #[arg(long)]
    forest: Option<u8>,

    /// Width of the grass band.
    #[arg(long)]
    grass: Option<u8>,

    /// Width of the sand band.
    #[arg(long)]
    sand: Option<u8>,
}

impl BandArgs {
    fn apply(&self, widths: &mut BandWidths) {
        if let Some(snow) = self.snow {
            widths.snow = snow;
        }
        if let Some(forest) = self.forest {
            widths.forest = forest;
        }
        if let Some(grass) = self.grass {
            widths.grass = grass;
        }
        if let Some(sand) = self.sand {
            widths.sand = sand;
        }
    }
}

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate(args) => run_generate(args),
        Commands::Info(args) => run_info(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<MapConfig, ConfigError> {
    match path {
        Some(path) => MapConfig::from_toml_file(path),
        None => Ok(MapConfig::default()),
    }
}

/// Layers defaults, the config file, the interactive prompt and CLI flags.
fn build_config<R: BufRead>(args: &GenerateArgs, input: &mut R) -> Result<MapConfig, ConfigError> {
    let mut config = load_config(args.config.as_ref())?;

    if args.interactive {
        prompt_size_and_zoom(input, &mut io::stdout(), &mut config)?;
    }

    if let Some(size) = args.size {
        config.size = size;
    }
    if let Some(zoom) = args.zoom {
        config.zoom = zoom;
    }
    if let Some(seed) = args.seed {
        config.noise.seed = seed;
    }
    if let Some(octaves) = args.octaves {
        config.noise.octaves = octaves;
    }
    if let Some(frequency) = args.frequency {
        config.noise.frequency = frequency;
    }
    if let Some(lacunarity) = args.lacunarity {
        config.noise.lacunarity = lacunarity;
    }
    if let Some(persistence) = args.persistence {
        config.noise.persistence = persistence;
    }
    args.bands.apply(&mut config.bands);
    if let Some(output) = &args.output {
        config.output = output.clone();
    }

    Ok(config)
}

fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    let config = build_config(&args, &mut io::stdin().lock())?;
    let (grid, zoom) = config.validate()?;
    let noise = FractalNoise::new(&config.noise)?;

    println!("islandgen - Procedural Island Generator");
    println!("=======================================");
    println!("Size: {}x{}", grid.width(), grid.height());
    println!("Zoom: {}", zoom.get());
    println!("Seed: {} ({} octaves)", config.noise.seed, noise.octave_count());
    println!("Output: {}", config.output.display());

    let start = Instant::now();

    println!("\nGenerating map...");
    let map = generate_map(&config, &noise)?;
    println!("Generation completed in {:.2?}", start.elapsed());
    print!("{}", map.coverage);

    println!("\nExporting...");
    let export_start = Instant::now();
    let sink = PngSink::default();
    sink.write(map.into_image(), &config.output)?;
    println!("  Exported biome map: {}", config.output.display());

    if args.intensity_map {
        let intensities = sample_intensities(grid, zoom, &noise);
        let path = intensity_path(&config.output);
        export_intensity_png(grid, &intensities, &path, &sink)?;
        println!("  Exported intensity map: {}", path.display());
    }

    println!("Export completed in {:.2?}", export_start.elapsed());
    println!("\nTotal time: {:.2?}", start.elapsed());
    println!("Done!");
    Ok(())
}

fn run_info(args: InfoArgs) -> Result<(), CliError> {
    let mut config = load_config(args.config.as_ref())?;
    if let Some(size) = args.size {
        config.size = size;
    }
    args.bands.apply(&mut config.bands);
    let (grid, _) = config.validate()?;

    let pixels = grid.cell_count() as u64;
    let bytes_rgba = pixels * 4;

    println!("islandgen - Map Configuration Info");
    println!("==================================");
    println!();
    println!("Size: {}x{} ({} pixels)", grid.width(), grid.height(), pixels);
    println!(
        "Pixel buffer: {} bytes ({:.2} MB)",
        bytes_rgba,
        bytes_rgba as f64 / 1024.0 / 1024.0
    );
    println!();
    println!("Bands (intensity 0-255, total width {}):", config.bands.total());
    for biome in Biome::ALL {
        let range = match config.bands.band_range(biome) {
            Some(r) => format!("{:>3}..={:<3}", r.start(), r.end()),
            None => "  (empty) ".to_string(),
        };
        let [r, g, b, a] = config.palette.color(biome);
        println!(
            "  {:<9} {}  rgba({}, {}, {}, {})",
            biome.name(),
            range,
            r,
            g,
            b,
            a
        );
    }
    if !config.bands.fits_budget() {
        println!();
        println!("Warning: band widths exceed 255; lower bands are shrunk or empty.");
    }
    Ok(())
}
