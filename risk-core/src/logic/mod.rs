//! Logic Module - Business Logic & Engines
//!
//! - `features/` - request normalization and the feature layout
//! - `model/` - encoders, classifier, bundle, predictor
//! - `dataset/` - CSV preprocessing for training
//! - `training/` - split, fit, evaluate
//! - `recommend/` - rule engine + generative source

pub mod features;
pub mod model;
pub mod dataset;
pub mod training;
pub mod recommend;
