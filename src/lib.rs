pub mod analysis;
pub mod config;
pub mod info;
pub mod report;
pub mod resolve;
pub mod table_format;

pub use analysis::{AccessibilityReport, AnalysisOptions, Run, StrideCandidate, analyze};
pub use config::Config;
pub use fragmat_error::{FragError, Result};
pub use fragmat_parser::{LoadOptions, MaterialSource, Model, SchemaLayout};
pub use info::{AccessMethod, MaterialInfo, ReferenceMaterial};
pub use report::{MaterialReport, ReportFormat, write_report_file};
pub use resolve::{Resolver, resolve};
