//! Career prediction service: synthetic Big Five training data, a random
//! forest classifier, and the HTTP surface that serves it.

pub mod config;
pub mod dataset;
pub mod domain;
pub mod errors;
pub mod explain;
pub mod forest;
pub mod metrics;
pub mod model;
pub mod predictor;
pub mod routes;
pub mod state;
