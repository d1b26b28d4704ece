use clap::Args;

use crate::cli::Context;
use crate::panels::convert_panels;

#[derive(Args, Debug)]
pub struct PanelsArgs {
    customer: String,

    /// Requested gene panels
    #[arg(required = true)]
    panels: Vec<String>,
}

pub fn handle(args: PanelsArgs, ctx: &Context) -> anyhow::Result<()> {
    let rules = ctx.rules()?;
    for panel in convert_panels(&rules.panels, &args.customer, &args.panels) {
        println!("{panel}");
    }
    Ok(())
}
