//! Analysis orchestration and report generation.
//!
//! - [`session::analyze`]: run every metric on an image triple
//! - [`session::AnalysisSession`]: directory-aware load / analyze / write
//! - [`session::AnalysisConfig`]: directory layout and output options
//! - [`report`]: report types and their text, CSV and JSON renderings

pub mod report;
pub mod session;

pub use report::AnalysisReport;
pub use session::{AnalysisConfig, AnalysisConfigBuilder, AnalysisInputs, AnalysisSession, analyze};
