use banner_stitch::imaging::SliceRatios;
use banner_stitch::{archive, batch, config, output};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Banner geometry overrides shared by the stitch and check commands.
/// Flags win over config-file values; unset flags leave the file value.
#[derive(clap::Args, Clone)]
struct BannerArgs {
    /// Overall banner scale factor relative to photo width
    #[arg(long)]
    base_ratio: Option<f64>,

    /// Aspect-ratio sensitivity: wider photos get thinner banners
    #[arg(long)]
    exponent: Option<f64>,

    /// Left band fraction (the right fraction is derived as 1 - left - center)
    #[arg(long)]
    slice_left: Option<f64>,

    /// Center band fraction
    #[arg(long)]
    slice_center: Option<f64>,
}

#[derive(Parser)]
#[command(name = "banner-stitch")]
#[command(about = "Stitch a brand banner beneath photos")]
#[command(long_about = "\
Stitch a brand banner beneath photos

Each photo is rotated right-side-up (EXIF orientation), the template is
sliced into left/center/right bands and refitted to the photo's width, and
photo + banner are stacked into a single JPEG.

Inputs may be photo files (JPEG/PNG), directories, or zip archives; archive
entries without a photo extension are skipped. Outputs are named
stitched_<original name> and land in a directory — or in a single zip
bundle when --out ends in .zip.

Banner geometry:

  height = photo_width * base_ratio * aspect^(-exponent)

  template  | left | center | right |
  banner    | left |  c e n t e r  | right |    center stretches to fit;
                                               outer bands shrink when the
                                               photo is narrower than both.

Run 'banner-stitch gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Config file (stock defaults when omitted)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Stitch the banner beneath every input photo
    Stitch {
        /// Photo files, directories, or zip archives
        inputs: Vec<PathBuf>,

        /// Template image to slice into the banner
        #[arg(long)]
        template: PathBuf,

        /// Output directory, or a .zip path to bundle the results
        #[arg(long, default_value = "stitched")]
        out: PathBuf,

        #[command(flatten)]
        banner: BannerArgs,

        /// JPEG quality (1-100)
        #[arg(long)]
        quality: Option<u8>,

        /// Max parallel workers
        #[arg(long)]
        threads: Option<usize>,
    },
    /// Validate config and template and list what would be processed
    Check {
        /// Photo files, directories, or zip archives
        inputs: Vec<PathBuf>,

        /// Template image to slice into the banner
        #[arg(long)]
        template: PathBuf,

        #[command(flatten)]
        banner: BannerArgs,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Stitch {
            inputs,
            template,
            out,
            banner,
            quality,
            threads,
        } => {
            let mut cfg = load_config(cli.config.as_deref())?;
            apply_banner_args(&mut cfg, &banner)?;
            if let Some(q) = quality {
                cfg.output.quality = q;
            }
            if let Some(t) = threads {
                cfg.processing.max_threads = Some(t);
            }
            cfg.validate()?;
            init_thread_pool(&cfg.processing);

            batch::enforce_size_cap(&inputs, cfg.max_input_bytes())?;
            let entries = batch::collect_entries(&inputs)?;
            let template = batch::load_template(&template)?;

            let outcomes =
                batch::stitch_batch(&entries, &template, &cfg.stitch_params(), cfg.quality());

            let mut sink = make_sink(&out)?;
            let written = batch::write_outcomes(&outcomes, sink.as_mut())?;

            output::print_stitch_report(&outcomes);
            println!("Wrote {} entries to {}", written, out.display());
        }
        Command::Check {
            inputs,
            template,
            banner,
        } => {
            let mut cfg = load_config(cli.config.as_deref())?;
            apply_banner_args(&mut cfg, &banner)?;
            cfg.validate()?;

            batch::enforce_size_cap(&inputs, cfg.max_input_bytes())?;
            let entries = batch::collect_entries(&inputs)?;
            let template = batch::load_template(&template)?;

            output::print_check_output(template.dimensions(), &entries);
            println!("Configuration is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<config::StitchConfig, config::ConfigError> {
    match path {
        Some(p) => config::StitchConfig::load(p),
        None => Ok(config::StitchConfig::default()),
    }
}

/// Fold the CLI banner flags into the config. Slice flags mirror the
/// two-slider surface of the original tool: left and center are given, the
/// right fraction is the remainder — and a negative remainder is refused
/// here rather than propagated into band math.
fn apply_banner_args(
    cfg: &mut config::StitchConfig,
    args: &BannerArgs,
) -> Result<(), config::ConfigError> {
    if let Some(b) = args.base_ratio {
        cfg.banner.base_ratio = b;
    }
    if let Some(e) = args.exponent {
        cfg.banner.exponent = e;
    }
    if args.slice_left.is_some() || args.slice_center.is_some() {
        let left = args.slice_left.unwrap_or(cfg.banner.slice_ratios[0]);
        let center = args.slice_center.unwrap_or(cfg.banner.slice_ratios[1]);
        let slices = SliceRatios::from_left_center(left, center).ok_or_else(|| {
            config::ConfigError::Validation(format!(
                "slice fractions left={left} center={center} leave a negative right fraction"
            ))
        })?;
        cfg.banner.slice_ratios = [slices.left, slices.center, slices.right];
    }
    Ok(())
}

/// A `.zip` out path bundles the results; anything else is a directory of
/// loose files.
fn make_sink(out: &Path) -> Result<Box<dyn archive::EntrySink>, archive::ArchiveError> {
    if out
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("zip"))
    {
        Ok(Box::new(archive::ZipSink::create(out)?))
    } else {
        Ok(Box::new(archive::DirSink::create(out)?))
    }
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores — user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
