use clap::Args;

use crate::cli::Context;
use crate::lims::Lims;
use crate::model::summarize;

#[derive(Args, Debug)]
pub struct SampleArgs {
    /// LIMS id, Clinical Genomics id or sample name
    id: String,
}

pub fn handle(args: SampleArgs, ctx: &Context) -> anyhow::Result<()> {
    let lims = ctx.open_lims()?;
    let rules = ctx.rules()?;
    let sample = lims.fetch_sample(&args.id)?;
    let summary = summarize(&sample, &rules.categories)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
