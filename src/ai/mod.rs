//! Listing and discovery helpers
//!
//! Rule-based stand-ins for machine learning features: image
//! categorisation from labels, tag suggestion, query expansion, listing
//! copy and recommendations.

pub mod generate;
pub mod recommend;
pub mod search;
pub mod tags;
pub mod vision;

pub use vision::{LabelSource, MockLabelSource};
