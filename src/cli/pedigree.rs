use std::io::Write;

use clap::Args;

use crate::case::{AssembleOptions, CaseAssembler};
use crate::cli::Context;
use crate::pedigree::{pedigree_records, write_pedigree};

#[derive(Args, Debug)]
pub struct PedigreeArgs {
    customer: String,
    family: String,

    /// Skip the parent sex check
    #[arg(long)]
    force: bool,
}

pub fn handle(args: PedigreeArgs, ctx: &Context) -> anyhow::Result<()> {
    let mut lims = ctx.open_lims()?;
    let rules = ctx.rules()?;
    let options = AssembleOptions {
        force: args.force,
        ..Default::default()
    };
    let config =
        CaseAssembler::new(&mut lims, &rules).basic_config(&args.customer, &args.family, &options)?;
    let records = pedigree_records(&config)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_pedigree(&records, &mut out)?;
    out.flush()?;

    lims.save()?;
    Ok(())
}
