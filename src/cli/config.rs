use clap::Args;
use tracing::info;

use crate::case::{AssembleOptions, CaseAssembler};
use crate::cli::Context;

#[derive(Args, Debug)]
pub struct ConfigArgs {
    pub(crate) customer: String,
    pub(crate) family: String,

    /// Print JSON instead of YAML
    #[arg(long)]
    pub(crate) json: bool,

    /// Skip the parent sex check
    #[arg(long)]
    pub(crate) force: bool,

    /// Use these gene panels instead of the ones in the LIMS
    #[arg(long = "panel")]
    pub(crate) panels: Vec<String>,

    /// Capture kit for all exome samples
    #[arg(long)]
    pub(crate) capture_kit: Option<String>,
}

impl ConfigArgs {
    pub(crate) fn options(&self) -> AssembleOptions {
        AssembleOptions {
            gene_panels: (!self.panels.is_empty()).then(|| self.panels.clone()),
            capture_kit: self.capture_kit.clone(),
            force: self.force,
            ..Default::default()
        }
    }
}

pub fn handle(args: ConfigArgs, ctx: &Context) -> anyhow::Result<()> {
    let mut lims = ctx.open_lims()?;
    let rules = ctx.rules()?;
    let config = CaseAssembler::new(&mut lims, &rules).basic_config(
        &args.customer,
        &args.family,
        &args.options(),
    )?;
    info!(
        owner = %config.owner,
        family = %config.family,
        samples = config.samples.len(),
        "assembled case config"
    );

    let text = if args.json {
        serde_json::to_string_pretty(&config)?
    } else {
        serde_yaml::to_string(&config)?
    };
    println!("{}", text.trim_end());

    lims.save()?;
    Ok(())
}
