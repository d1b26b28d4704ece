use clap::Args;
use serde::Serialize;

use crate::apptag::{ApplicationClass, ApplicationTag, Pipeline, SequencingType};
use crate::cli::Context;

#[derive(Args, Debug)]
pub struct ApptagArgs {
    tag: String,

    /// Tissue type used to pick the analysis pipeline
    #[arg(long)]
    tissue_type: Option<String>,
}

#[derive(Debug, Serialize)]
struct TagReport {
    tag: String,
    application: String,
    library_prep: String,
    class: Option<ApplicationClass>,
    category: Option<String>,
    is_human: bool,
    is_external: bool,
    sequencing_type: Option<SequencingType>,
    reads: Option<u64>,
    expected_reads: Option<u64>,
    pipeline: Option<Pipeline>,
}

pub fn handle(args: ApptagArgs, ctx: &Context) -> anyhow::Result<()> {
    let rules = ctx.rules()?;
    let tag = ApplicationTag::parse_with(&args.tag, &rules.categories)?;
    let report = TagReport {
        tag: tag.to_string(),
        application: tag.application().to_string(),
        library_prep: tag.library_prep().to_string(),
        class: tag.application_class(),
        category: tag.category().ok(),
        is_human: tag.is_human(),
        is_external: tag.is_external(),
        sequencing_type: tag.sequencing_type().ok(),
        reads: tag.reads().ok(),
        expected_reads: tag.expected_reads().ok(),
        pipeline: tag.pipeline(args.tissue_type.as_deref()),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
