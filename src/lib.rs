// Export modules for library usage
pub mod analyzers;
pub mod cli;
pub mod cohesion;
pub mod commands;
pub mod config;
pub mod core;
pub mod extraction;
pub mod io;

// Re-export commonly used types
pub use crate::cohesion::{scan_pairs, CohesionScorer, CohesionThresholds, PairScan};
pub use crate::core::{
    AnalysisResults, CohesionFinding, MethodFieldAccess, TypeSnapshot,
};

pub use crate::analyzers::{analyze_file, FileCohesionReport};
pub use crate::config::CohesionConfig;
pub use crate::extraction::extract_file;
pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};
