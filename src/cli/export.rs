use clap::Args;

use crate::cli::Context;
use crate::export::{export_family, split_case_id};

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Customer, or a case id like `cust003-17010`
    pub(crate) customer_or_case: String,

    pub(crate) family_id: Option<String>,

    /// Print JSON instead of YAML
    #[arg(long)]
    pub(crate) json: bool,
}

pub fn handle(args: ExportArgs, ctx: &Context) -> anyhow::Result<()> {
    let Some((customer, family_id)) =
        split_case_id(&args.customer_or_case, args.family_id.as_deref())
    else {
        anyhow::bail!(
            "expected <customer> <family> or <customer>-<family>, got '{}'",
            args.customer_or_case
        );
    };
    let lims = ctx.open_lims()?;
    let rules = ctx.rules()?;
    let export = export_family(&lims, &rules.categories, customer, family_id)?;

    let text = if args.json {
        serde_json::to_string_pretty(&export)?
    } else {
        serde_yaml::to_string(&export)?
    };
    println!("{}", text.trim_end());
    Ok(())
}
