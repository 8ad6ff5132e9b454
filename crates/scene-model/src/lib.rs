//! Inlay Scene Model
//!
//! Defines the core data contracts for Inlay compositions:
//! - **Geometry:** Pixel-space rectangles and margins
//! - **Layout:** Anchors, edge references, and per-axis placement rules
//! - **Windows:** Inclusive frame-index activity intervals
//! - **Codecs & filters:** Output fourcc registry and per-frame conversions
//! - **Element specs:** Explicit per-variant construction options
//! - **Export:** Settings and the post-render report
//!
//! All coordinates are signed frame pixels (an element may hang off the
//! frame edge); sizes are unsigned. Nothing in this crate touches pixel
//! data or spawns processes.

pub mod codec;
pub mod element_spec;
pub mod export;
pub mod filter;
pub mod geometry;
pub mod layout;
pub mod window;

pub use codec::*;
pub use element_spec::*;
pub use export::*;
pub use filter::*;
pub use geometry::*;
pub use layout::*;
pub use window::*;
