//! Parser module — line classification and directive accumulation.

pub mod accumulate;
pub mod classify;

pub use accumulate::accumulate;
pub use classify::{classify, Classifier, DirectiveLine};
