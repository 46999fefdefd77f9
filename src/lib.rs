pub mod config;
pub mod domain;
pub mod encoder;
pub mod model;
pub mod normalizer;
pub mod predictor;
pub mod utils;
