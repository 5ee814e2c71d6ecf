pub mod error;
pub mod identifiers;
pub mod io;
pub mod modes;
pub mod pipelines;
