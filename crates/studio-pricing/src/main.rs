use anyhow::Result;
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use std::path::PathBuf;
use std::process::ExitCode;
use studio_pricing::domain::{PackagePriceEngine, StandardMarginCalculator};
use studio_pricing::{logging, PricingConfig, QuoteRequest};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(author, version, long_about = None)]
#[command(name = "studio-pricing")]
#[command(
    about = "Studio package pricing - reconcile personalized and recalculated prices"
)]
struct Args {
    #[arg(
        short,
        long,
        env = "STUDIO_PRICING_CONFIG",
        help = "Path to configuration file"
    )]
    config: Option<PathBuf>,

    #[arg(long, help = "Generate sample configuration file")]
    gen_config: bool,

    #[arg(short, long, help = "Quote request to price (.json or .toml)")]
    request: Option<PathBuf>,

    #[arg(long, help = "Print the price result on a single line")]
    compact: bool,

    #[command(flatten)]
    verbosity: Verbosity<WarnLevel>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Unable to compute price: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    if args.gen_config {
        println!("{}", PricingConfig::default().to_toml()?);
        return Ok(());
    }

    let config = PricingConfig::load(args.config)?;
    logging::init_logging(&args.verbosity, &config.logging.default_filter)?;

    let Some(request_path) = args.request else {
        info!("Configuration validated successfully, no quote request given");
        return Ok(());
    };

    info!("Pricing quote request {}", request_path.display());
    let request = QuoteRequest::load(&request_path)?;

    let engine = PackagePriceEngine::with_collaborators(StandardMarginCalculator, config.rounding);
    let result = request.evaluate(&engine, &config)?;

    let rendered = if args.compact {
        serde_json::to_string(&result)?
    } else {
        serde_json::to_string_pretty(&result)?
    };
    println!("{}", rendered);

    Ok(())
}
