use clap::Args;

use crate::cli::Context;
use crate::lims::{Lims, update_attribute};

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// LIMS id, Clinical Genomics id or sample name
    pub(crate) id: String,
    pub(crate) field: String,
    pub(crate) value: String,

    /// Show the change without writing it
    #[arg(long)]
    pub(crate) dry_run: bool,
}

pub fn handle(args: UpdateArgs, ctx: &Context) -> anyhow::Result<()> {
    let mut lims = ctx.open_lims()?;
    if args.dry_run {
        let sample = lims.fetch_sample(&args.id)?;
        let old = sample.udf(&args.field);
        println!(
            "{}\t{}\t{} -> {}",
            sample.id,
            args.field,
            old.as_deref().unwrap_or("N/A"),
            args.value
        );
        return Ok(());
    }

    let change = update_attribute(&mut lims, &args.id, &args.field, &args.value)?;
    println!(
        "{}\t{}\t{} -> {}",
        change.sample,
        change.key,
        change.old.as_deref().unwrap_or("N/A"),
        change.new
    );
    lims.save()?;
    Ok(())
}
