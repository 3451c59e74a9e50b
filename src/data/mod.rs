pub mod dataset;
pub mod discretize;
pub mod reader;
pub mod value;
