use artwall::environment::StaticEnvironment;
use artwall::{config, generate, inventory, output, plan, random};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    let on_tag = env!("ARTWALL_ON_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("ARTWALL_GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "artwall")]
#[command(about = "Static gallery generator for an art inventory")]
#[command(long_about = "\
Static gallery generator for an art inventory

The inventory is a JSON list of works whose images are already hosted at four
resolutions. Artwall plans a session (shuffled order, masonry rows, deck and
canvas orders, overview mosaic) and renders one page per viewing mode.

Content structure:

  content/
  ├── inventory.json     # [{ id, category, path_id, urls, meta }, ...]
  └── config.toml        # Optional, sparse overrides of the stock config

Pages:

  index.html        Reel (default)
  grid.html         Grid
  deck.html         Deck
  playground.html   Canvas
  overview.html     Overview

Set ARTWALL_LOG=debug for planner diagnostics on stderr.
Run 'artwall gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (plan.json)
    #[arg(long, default_value = ".artwall-temp", global = true)]
    temp_dir: PathBuf,

    /// Seed for every shuffle and layout draw; omit for a fresh session
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

/// Reference viewport overrides.
#[derive(clap::Args, Clone)]
struct ViewportArgs {
    #[arg(long)]
    width: Option<u32>,
    #[arg(long)]
    height: Option<u32>,
    #[arg(long)]
    dpr: Option<f64>,
}

#[derive(Subcommand)]
enum Command {
    /// Validate the inventory and config without building
    Check,
    /// Plan a session and write plan.json
    Plan(ViewportArgs),
    /// Render the site from an existing plan.json
    Generate,
    /// Run the full pipeline: load → plan → generate
    Build(ViewportArgs),
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("ARTWALL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let site_config = config::load_config(&cli.source)?;
            let inventory = inventory::load_inventory(&cli.source)?;
            output::print_check_output(&inventory, &site_config);
            println!("==> Content is valid");
        }
        Command::Plan(viewport) => {
            let site_config = with_viewport(config::load_config(&cli.source)?, &viewport)?;
            let inventory = inventory::load_inventory(&cli.source)?;
            let env = StaticEnvironment::from(&site_config.viewport);
            let mut rng = random::rng_from_seed(cli.seed);
            let session = plan::plan(&inventory, &site_config, &env, &mut rng, cli.seed);
            let path = plan::write_plan(&session, &cli.temp_dir)?;
            output::print_plan_output(&session);
            println!("==> Plan written to {}", path.display());
        }
        Command::Generate => {
            let plan_path = cli.temp_dir.join(plan::PLAN_FILE);
            let report = generate::generate_from_files(&plan_path, &cli.source, &cli.output)?;
            output::print_build_output(&report);
        }
        Command::Build(viewport) => {
            println!("==> Stage 1: Loading {}", cli.source.display());
            let site_config = with_viewport(config::load_config(&cli.source)?, &viewport)?;
            let inventory = inventory::load_inventory(&cli.source)?;
            output::print_check_output(&inventory, &site_config);

            println!("==> Stage 2: Planning");
            let env = StaticEnvironment::from(&site_config.viewport);
            let mut rng = random::rng_from_seed(cli.seed);
            let session = plan::plan(&inventory, &site_config, &env, &mut rng, cli.seed);
            plan::write_plan(&session, &cli.temp_dir)?;
            output::print_plan_output(&session);

            println!("==> Stage 3: Generating HTML → {}", cli.output.display());
            let report = generate::generate(&session, &inventory, &cli.output)?;
            output::print_build_output(&report);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Apply command-line viewport overrides and re-validate.
fn with_viewport(
    mut site_config: config::SiteConfig,
    args: &ViewportArgs,
) -> Result<config::SiteConfig, config::ConfigError> {
    if let Some(width) = args.width {
        site_config.viewport.width = width;
    }
    if let Some(height) = args.height {
        site_config.viewport.height = height;
    }
    if let Some(dpr) = args.dpr {
        site_config.viewport.dpr = dpr;
    }
    site_config.validate()?;
    Ok(site_config)
}
