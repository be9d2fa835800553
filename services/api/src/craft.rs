use crate::infra::build_crafter;
use clap::Args;
use outreach_ai::config::AppConfig;
use outreach_ai::error::AppError;
use outreach_ai::telemetry;
use outreach_ai::workflows::outreach::{CraftRequest, CraftResult, CrafterConfig};
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub(crate) struct CraftArgs {
    /// JSON craft request (use `-` to read from stdin)
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Override the configured quality threshold
    #[arg(long)]
    pub(crate) threshold: Option<f64>,
    /// Override the configured refinement budget
    #[arg(long)]
    pub(crate) max_refinements: Option<u32>,
}

pub(crate) async fn run_craft(args: CraftArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let request = load_request(&args.input)?;
    let crafter_config = apply_overrides(config.crafter.clone(), &args);
    let crafter = build_crafter(&config.llm, crafter_config)?;

    let result = crafter.craft_email(&request).await;
    println!("{}", render_result(&result)?);
    Ok(())
}

fn load_request(path: &Path) -> Result<CraftRequest, AppError> {
    let raw = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(path)?
    };
    Ok(serde_json::from_str(&raw)?)
}

fn apply_overrides(mut config: CrafterConfig, args: &CraftArgs) -> CrafterConfig {
    if let Some(threshold) = args.threshold {
        config.quality_threshold = threshold;
    }
    if let Some(max_refinements) = args.max_refinements {
        config.max_refinement_loops = max_refinements;
    }
    config
}

fn render_result(result: &CraftResult) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(result)?)
}
