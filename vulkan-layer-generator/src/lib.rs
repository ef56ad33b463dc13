pub mod aliases;
pub mod config;
pub mod decayed;
pub mod dispatch;
pub mod emit;
pub mod error;
pub mod intercept;
pub mod layer_trait;
pub mod model;
pub mod names;
pub mod project;
pub mod registry;
pub mod signature;
pub mod transform;

#[cfg(test)]
mod test_utils;

pub use config::Config;
pub use emit::{Target, generate};
pub use error::GenError;
pub use model::Model;
pub use registry::{Registry, parse_registry};
