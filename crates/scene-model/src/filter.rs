//! Per-frame pixel conversions applied to image and clip sources.

use inlay_common::{InlayError, InlayResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A whole-frame pixel conversion.
///
/// Filters run on the decoded source pixels before an element composites
/// them; the render engine owns the per-pixel implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameFilter {
    /// Pass pixels through untouched.
    #[default]
    None,
    /// Negative: bitwise complement of every channel.
    Nega,
    /// Swap the blue and red channels.
    Bgr2Rgb,
    /// BT.601 luma replicated across all three channels.
    Gray,
    /// Luma mapped through a jet-style colormap.
    Heatmap,
    /// Per-frame min-max normalization to the full [0, 255] range.
    MinMax,
}

impl FrameFilter {
    pub const ALL: [FrameFilter; 6] = [
        FrameFilter::None,
        FrameFilter::Nega,
        FrameFilter::Bgr2Rgb,
        FrameFilter::Gray,
        FrameFilter::Heatmap,
        FrameFilter::MinMax,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FrameFilter::None => "none",
            FrameFilter::Nega => "nega",
            FrameFilter::Bgr2Rgb => "bgr2rgb",
            FrameFilter::Gray => "gray",
            FrameFilter::Heatmap => "heatmap",
            FrameFilter::MinMax => "minmax",
        }
    }
}

impl fmt::Display for FrameFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FrameFilter {
    type Err = InlayError;

    /// Parse a filter name. The empty string is accepted as `none`.
    fn from_str(s: &str) -> InlayResult<Self> {
        if s.is_empty() {
            return Ok(FrameFilter::None);
        }
        Self::ALL
            .iter()
            .find(|m| m.name() == s)
            .copied()
            .ok_or_else(|| {
                InlayError::unsupported("conversion method", s, Self::ALL.iter().map(|m| m.name()))
            })
    }
}
