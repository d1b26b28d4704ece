use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing::debug;

use crate::lims::MemoryLims;
use crate::rules::{Rules, default_rules_dir};
use crate::settings::Settings;

mod apptag;
mod check;
mod config;
mod export;
mod panels;
mod pedigree;
mod sample;
mod update;

#[derive(Parser, Debug)]
#[command(name = "lims-case", version, about = "Clinical genomics case config CLI")]
pub struct Cli {
    /// Settings file (defaults to $LIMS_CASE_CONFIG, then ~/.lims-case.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// LIMS snapshot JSON, overrides the settings file
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,

    /// Directory with rule table overrides
    #[arg(long, global = true)]
    rules_dir: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `lims_case=trace`
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Assemble the analysis config of a family
    Config(config::ConfigArgs),
    /// Render the pedigree of a family
    Pedigree(pedigree::PedigreeArgs),
    /// Decode an application tag
    Apptag(apptag::ApptagArgs),
    /// Expand requested gene panels for a customer
    Panels(panels::PanelsArgs),
    /// Show one sample
    Sample(sample::SampleArgs),
    /// Run sanity checks on a sample
    Check(check::CheckArgs),
    /// Report what the lab did for each sample of a family
    Export(export::ExportArgs),
    /// Set one attribute on a sample
    Update(update::UpdateArgs),
}

/// Resolved settings shared by all subcommands.
pub struct Context {
    settings: Settings,
}

impl Context {
    pub fn open_lims(&self) -> anyhow::Result<MemoryLims> {
        let path = self
            .settings
            .snapshot
            .as_deref()
            .context("no LIMS snapshot configured, pass --snapshot or set it in the settings file")?;
        Ok(MemoryLims::open(path)?)
    }

    pub fn rules(&self) -> anyhow::Result<Rules> {
        let dir = self.settings.rules_dir.clone().or_else(default_rules_dir);
        debug!(rules_dir = ?dir, "loading rules");
        Ok(Rules::load(dir.as_deref())?)
    }
}

impl Cli {
    pub fn dispatch(self) -> anyhow::Result<()> {
        let mut settings = Settings::load(self.config.as_deref())?;
        if self.snapshot.is_some() {
            settings.snapshot = self.snapshot;
        }
        if self.rules_dir.is_some() {
            settings.rules_dir = self.rules_dir;
        }
        let ctx = Context { settings };

        match self.command {
            Command::Config(args) => config::handle(args, &ctx),
            Command::Pedigree(args) => pedigree::handle(args, &ctx),
            Command::Apptag(args) => apptag::handle(args, &ctx),
            Command::Panels(args) => panels::handle(args, &ctx),
            Command::Sample(args) => sample::handle(args, &ctx),
            Command::Check(args) => check::handle(args, &ctx),
            Command::Export(args) => export::handle(args, &ctx),
            Command::Update(args) => update::handle(args, &ctx),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/cli/mod.rs"]
mod tests;
