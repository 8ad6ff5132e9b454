//! Inlay Render Engine
//!
//! Offline rendering pipeline that composites overlay elements
//! (images, text, animations, clips, nested timelines) onto the
//! frames of a source video and encodes the result.
//!
//! # Pipeline Architecture
//!
//! ```text
//! source.mp4 ──┐
//!              ├── Decode (ffmpeg, raw BGR frames)
//! timeline ────┘         │
//!                        ├── Composite (fill + elements per frame)
//! assets (png/gif/ttf) ──┘         │
//!                                  ├── Encode (ffmpeg, chosen codec)
//!                                  │
//!                                  ├── Audio (extract / overlay / mux)
//!                                  ▼
//!                              output.mp4 (+ render report)
//! ```
//!
//! Frames travel through the pipeline as packed BGR24 buffers; the
//! only RGBA detour is the alpha-compositing path for translucent
//! overlays and rasterized text.

pub mod audio;
pub mod composite;
pub mod element;
pub mod export;
pub mod frame;
pub mod text;
pub mod timeline;
pub mod video_io;

pub use element::Element;
pub use export::{export, ExportJob, ExportProgress, ExportStage, ProgressCallback};
pub use frame::Frame;
pub use timeline::Timeline;
