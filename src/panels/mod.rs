pub mod defs;
pub mod resolve;

pub use defs::{BASELINE_PANEL, PanelRules};
pub use resolve::convert_panels;
