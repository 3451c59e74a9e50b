pub mod cross_validation;
pub mod kfold;
