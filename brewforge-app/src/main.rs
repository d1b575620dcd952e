use anyhow::Result;
use brewforge_core::{equipment::DEFAULT_PROFILE, styles::StyleFilter};
use brewforge_schemas::style::Range;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod config;
mod workflow;

#[derive(Parser)]
#[command(
    name = "brewforge",
    version,
    about = "Turns recipe drafts into calculated BeerXML recipes"
)]
struct Cli {
    /// Enables debug-level logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory of YAML equipment profiles merged over the built-in ones.
    #[arg(long, global = true)]
    equipment_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Calculates a draft and writes a BeerXML document.
    Calculate {
        #[arg(short, long)]
        draft: PathBuf,
        #[arg(short, long, default_value = DEFAULT_PROFILE)]
        profile: String,
        /// Defaults to `<recipe name>_<timestamp>.xml`.
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Also writes a CSV ingredient breakdown.
        #[arg(long)]
        breakdown: Option<PathBuf>,
        /// Prints a plain-text recipe summary.
        #[arg(long)]
        summary: bool,
        /// BJCP catalog used with `--style`.
        #[arg(long, requires = "style")]
        styles: Option<PathBuf>,
        /// Style number (e.g. 21A) the result is checked against.
        #[arg(long, requires = "styles")]
        style: Option<String>,
    },
    /// Checks a draft without calculating it.
    Validate {
        #[arg(short, long)]
        draft: PathBuf,
    },
    /// Lists the available equipment profiles.
    Profiles,
    /// Filters a BJCP style catalog.
    Styles {
        #[arg(short, long)]
        file: PathBuf,
        /// Lists the catalog's categories instead of filtering.
        #[arg(long, conflicts_with = "number")]
        categories: bool,
        /// Shows a single style by number.
        #[arg(long)]
        number: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long, default_value_t = 0.0)]
        abv_min: f64,
        #[arg(long, default_value_t = 100.0)]
        abv_max: f64,
        #[arg(long, default_value_t = 0.0)]
        ibu_min: f64,
        #[arg(long, default_value_t = 1000.0)]
        ibu_max: f64,
        #[arg(long, default_value_t = 0.0)]
        srm_min: f64,
        #[arg(long, default_value_t = 100.0)]
        srm_max: f64,
        #[arg(long, default_value_t = 0.0)]
        og_min: f64,
        #[arg(long, default_value_t = 2.0)]
        og_max: f64,
        #[arg(long, default_value_t = 0.0)]
        fg_min: f64,
        #[arg(long, default_value_t = 2.0)]
        fg_max: f64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    println!("--- Brewforge ---");

    match cli.command {
        Command::Calculate { draft, profile, output, breakdown, summary, styles, style } => {
            let catalog = config::load_catalog(cli.equipment_dir.as_deref())?;
            let written = workflow::run_calculate(
                &catalog,
                workflow::CalculateRequest {
                    draft_path: &draft,
                    profile: &profile,
                    output,
                    breakdown,
                    summary,
                    style_check: styles.zip(style),
                },
            )?;
            println!("\nRecipe written to '{}'", written.display());
        }
        Command::Validate { draft } => {
            if !workflow::run_validate(&draft)? {
                std::process::exit(1);
            }
        }
        Command::Profiles => {
            let catalog = config::load_catalog(cli.equipment_dir.as_deref())?;
            workflow::list_profiles(&catalog);
        }
        Command::Styles {
            file,
            categories,
            number,
            category,
            abv_min,
            abv_max,
            ibu_min,
            ibu_max,
            srm_min,
            srm_max,
            og_min,
            og_max,
            fg_min,
            fg_max,
        } => {
            if categories {
                workflow::list_categories(&file)?;
                return Ok(());
            }
            if let Some(number) = number {
                workflow::show_style(&file, &number)?;
                return Ok(());
            }
            let filter = StyleFilter {
                category,
                abv: Range { min: abv_min, max: abv_max },
                ibu: Range { min: ibu_min, max: ibu_max },
                srm: Range { min: srm_min, max: srm_max },
                og: Range { min: og_min, max: og_max },
                fg: Range { min: fg_min, max: fg_max },
            };
            workflow::run_styles(&file, &filter)?;
        }
    }

    Ok(())
}
