pub mod rust;

pub use rust::{analyze_file, FileCohesionReport};
