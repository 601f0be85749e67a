pub mod camera;
pub mod config;
pub mod deform;
pub mod error;
pub mod geometry;
pub mod lifecycle;
pub mod motion;
pub mod noise;
pub mod peaks;
pub mod viewport;

pub use camera::*;
pub use config::*;
pub use deform::*;
pub use error::*;
pub use geometry::*;
pub use lifecycle::*;
pub use motion::*;
pub use peaks::*;
pub use viewport::*;
