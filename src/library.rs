//! Track library: the `Track` model and a directory scanner that builds
//! tracks from audio files on disk.

mod display;
mod model;
mod scan;

pub use display::format_clock;
pub use model::Track;
pub use scan::scan;
