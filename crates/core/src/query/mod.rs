//! Search query generation.

mod builder;

pub use builder::{QueryGenerator, QueryGeneratorConfig};
