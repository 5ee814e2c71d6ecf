//! Pipelines.
//!
//! The bitext filtering pipeline is implemented here, and the module
//! provides a light [pipeline::Pipeline] trait that enables easy and flexible pipeline creation.
mod bitext;
pub mod pipeline;

pub use bitext::BitextFilter;
pub use pipeline::Pipeline;
