pub mod classifier;
pub mod node;
pub mod params;
