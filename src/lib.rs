pub mod apptag;
pub mod capture;
pub mod case;
pub mod checks;
pub mod cli;
pub mod export;
pub mod lims;
pub mod model;
pub mod panels;
pub mod pedigree;
pub mod rules;
pub mod settings;

pub mod prelude {
    pub use crate::apptag::ApplicationTag;
    pub use crate::case::{AssembleOptions, CaseAssembler};
    pub use crate::lims::{Lims, MemoryLims};
    pub use crate::model::CaseConfig;
    pub use crate::rules::Rules;
}
