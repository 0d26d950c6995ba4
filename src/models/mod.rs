pub mod gbm;
pub mod market;
