pub mod confusion;
pub mod entropy;
pub mod report;
