pub mod color;
pub mod fit;
pub mod history;
pub mod io;
pub mod state;
pub mod stroke;
pub mod tess;

pub use color::Color;
pub use state::{CanvasState, StrokeSink};
pub use stroke::{Stroke, StrokeSample};

/// World-space position, also used for tangents, normals, and offsets.
pub type Point2 = ultraviolet::Vec2;
