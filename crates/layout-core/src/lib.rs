//! Inlay Layout Core
//!
//! Pure placement and sampling algorithms, free of pixel data and I/O:
//! - **Resolve:** per-axis anchor arithmetic turning placement rules into
//!   literal coordinates
//! - **Bounds:** bounding-rectangle and activity-span aggregation over a
//!   timeline's elements
//! - **Wrap:** word-boundary text wrapping and column derivation
//! - **Sampling:** loop-index arithmetic for embedded animations and clips
//!
//! Everything here is deterministic arithmetic over `inlay-scene-model`
//! types.

pub mod bounds;
pub mod resolve;
pub mod sampling;
pub mod wrap;

pub use bounds::*;
pub use resolve::*;
pub use sampling::*;
pub use wrap::*;
