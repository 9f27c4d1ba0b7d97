pub mod color;
pub mod config;
pub mod error;
pub mod id;
pub mod model;

pub use color::Color;
pub use config::SurfaceConfig;
pub use error::{ColorError, ConfigError};
pub use id::LayerId;
pub use model::*;
