pub mod axis;
pub mod error;
pub mod estimation;
pub mod feed;
pub mod file;
pub mod parser;
pub mod predictor;
pub mod types;
