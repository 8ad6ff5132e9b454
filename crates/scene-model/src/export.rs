//! Export settings and the post-render report.

use crate::codec::CodecId;
use crate::geometry::Rect;
use crate::window::FrameWindow;
use inlay_common::{InlayResult, RenderDefaults};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings for one export run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ExportSettings {
    /// Output codec; decides the container extension.
    pub codec: CodecId,

    /// Output path. `None` derives a timestamped name from the source stem
    /// and the codec extension.
    pub output: Option<PathBuf>,

    /// Output frame rate; `None` keeps the source rate.
    pub fps: Option<f64>,

    /// Output width; `None` falls back to the timeline bounding rectangle.
    pub width: Option<u32>,
    /// Output height; `None` falls back to the timeline bounding rectangle.
    pub height: Option<u32>,

    /// Stop after this many frames even if the source has more.
    pub frame_limit: Option<u32>,

    /// Frame positions to also save as PNG stills next to the output.
    pub stills: Vec<u32>,

    /// Audio reattachment settings.
    pub audio: AudioSettings,

    /// Whether to write a JSON render report next to the output.
    pub report: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            codec: CodecId::H264,
            output: None,
            fps: None,
            width: None,
            height: None,
            frame_limit: None,
            stills: Vec::new(),
            audio: AudioSettings::default(),
            report: true,
        }
    }
}

impl ExportSettings {
    /// Settings seeded from the app config's render defaults.
    ///
    /// Fails when the configured codec string is not a supported
    /// fourcc.
    pub fn with_defaults(defaults: &RenderDefaults) -> InlayResult<Self> {
        Ok(Self {
            codec: defaults.codec.parse()?,
            fps: Some(defaults.fps),
            ..Self::default()
        })
    }
}

/// Audio pipeline settings for an export.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AudioSettings {
    /// Run the audio pass at all. When off, the export ends with the
    /// silent rendered video.
    pub enabled: bool,

    /// Base track source; `None` extracts audio from the source video.
    pub source: Option<PathBuf>,

    /// Trim seconds off the start of the base track.
    pub trim_start: Option<f64>,

    /// Trim the base track down to this end position in seconds.
    pub trim_end: Option<f64>,

    /// Gain applied to the base track, in dB.
    pub volume_db: Option<f64>,

    /// `-itsoffset` value in seconds for the final mux.
    pub offset: f64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            source: None,
            trim_start: None,
            trim_end: None,
            volume_db: None,
            offset: 0.0,
        }
    }
}

/// Summary written next to the output after a successful export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderReport {
    /// RFC 3339 timestamp of report creation.
    pub created_at: String,

    /// Source video path.
    pub source: PathBuf,

    /// Rendered (muxed, when audio ran) output path.
    pub output: PathBuf,

    /// Composed audio track, when the audio pass produced one.
    pub audio: Option<PathBuf>,

    /// Output dimensions.
    pub width: u32,
    pub height: u32,

    /// Output frame rate.
    pub fps: f64,

    /// Frames actually written (may undershoot on early source exhaustion).
    pub frames_written: u32,

    /// Per-element placement summary.
    pub elements: Vec<ElementReport>,
}

impl RenderReport {
    pub fn new(source: PathBuf, output: PathBuf, width: u32, height: u32, fps: f64) -> Self {
        Self {
            created_at: chrono::Utc::now().to_rfc3339(),
            source,
            output,
            audio: None,
            width,
            height,
            fps,
            frames_written: 0,
            elements: Vec::new(),
        }
    }
}

/// One element's resolved placement, as recorded in the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementReport {
    /// Timeline-assigned label, e.g. `"image.0"`.
    pub label: String,

    /// Variant name, e.g. `"text"`.
    pub kind: String,

    /// Resolved rectangle.
    pub rect: Rect,

    /// Activity window.
    pub window: FrameWindow,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults() {
        let s = ExportSettings::default();
        assert_eq!(s.codec, CodecId::H264);
        assert!(s.audio.enabled);
        assert!(s.report);
        assert!(s.stills.is_empty());
    }

    #[test]
    fn test_settings_from_render_defaults() {
        let s = ExportSettings::with_defaults(&RenderDefaults::default()).unwrap();
        assert_eq!(s.codec, CodecId::H264);
        assert_eq!(s.fps, Some(30.0));

        let bad = RenderDefaults {
            codec: "h264".to_string(),
            ..RenderDefaults::default()
        };
        assert!(ExportSettings::with_defaults(&bad).is_err());
    }

    #[test]
    fn test_settings_partial_json() {
        let s: ExportSettings = serde_json::from_str(r#"{"codec":"VP80","fps":24.0}"#).unwrap();
        assert_eq!(s.codec, CodecId::Vp80);
        assert_eq!(s.fps, Some(24.0));
        assert_eq!(s.width, None);
    }

    #[test]
    fn test_settings_reject_unknown_keys() {
        let result = serde_json::from_str::<ExportSettings>(r#"{"bitrate": 9000}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_report_roundtrip() {
        let mut report = RenderReport::new("in.mp4".into(), "out.mp4".into(), 640, 360, 30.0);
        report.frames_written = 42;
        report.elements.push(ElementReport {
            label: "image.0".to_string(),
            kind: "image".to_string(),
            rect: Rect::new(0, 0, 64, 64),
            window: FrameWindow::ALWAYS,
        });
        let json = serde_json::to_string_pretty(&report).unwrap();
        let back: RenderReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.frames_written, 42);
        assert_eq!(back.elements.len(), 1);
        assert_eq!(back.elements[0].rect, Rect::new(0, 0, 64, 64));
    }
}
