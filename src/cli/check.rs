use clap::Args;
use tracing::info;

use crate::checks::{Severity, check_sample, set_missing_reads};
use crate::cli::Context;
use crate::lims::Lims;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// LIMS id, Clinical Genomics id or sample name
    id: String,

    /// Fill in missing reads from the application tag
    #[arg(long)]
    pub(crate) update: bool,

    /// Overwrite an existing missing reads value
    #[arg(long, requires = "update")]
    pub(crate) force: bool,
}

pub fn handle(args: CheckArgs, ctx: &Context) -> anyhow::Result<()> {
    let mut lims = ctx.open_lims()?;
    let rules = ctx.rules()?;
    let sample = lims.fetch_sample(&args.id)?;

    let findings = check_sample(&lims, &rules.categories, &sample)?;
    for finding in &findings {
        println!(
            "{}\t{}\t{}",
            finding.sample,
            finding.severity.as_str(),
            finding.message
        );
    }

    if args.update && set_missing_reads(&mut lims, &rules.categories, &sample, args.force)? {
        lims.save()?;
    }

    let errors = findings
        .iter()
        .filter(|f| f.severity == Severity::Error)
        .count();
    if errors > 0 {
        anyhow::bail!("{} failed {errors} check(s)", sample.id);
    }
    info!(sample = %sample.id, "all checks passed");
    Ok(())
}
