//! Output codec registry.
//!
//! Codecs are identified by their 4-character fourcc string. The mapping to
//! a container extension is fixed, and fourccs are case-sensitive: `MP4V`
//! targets an `.mp4` container while `mp4v` targets `.mov`.

use inlay_common::{InlayError, InlayResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A supported output video codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodecId {
    #[serde(rename = "VP80")]
    Vp80,
    #[serde(rename = "MP4S")]
    Mp4s,
    #[serde(rename = "MP4V")]
    Mp4v,
    /// Lowercase `mp4v`, the QuickTime flavor.
    #[serde(rename = "mp4v")]
    Mp4vQt,
    #[serde(rename = "H264")]
    H264,
    #[serde(rename = "X264")]
    X264,
    #[serde(rename = "DIV3")]
    Div3,
    #[serde(rename = "DIVX")]
    Divx,
    #[serde(rename = "IYUV")]
    Iyuv,
    #[serde(rename = "MJPG")]
    Mjpg,
    #[serde(rename = "XVID")]
    Xvid,
    #[serde(rename = "THEO")]
    Theo,
    #[serde(rename = "H263")]
    H263,
    #[serde(rename = "avc1")]
    Avc1,
}

impl CodecId {
    /// Every supported codec, in registry order.
    pub const ALL: [CodecId; 14] = [
        CodecId::Vp80,
        CodecId::Mp4s,
        CodecId::Mp4v,
        CodecId::Mp4vQt,
        CodecId::H264,
        CodecId::X264,
        CodecId::Div3,
        CodecId::Divx,
        CodecId::Iyuv,
        CodecId::Mjpg,
        CodecId::Xvid,
        CodecId::Theo,
        CodecId::H263,
        CodecId::Avc1,
    ];

    /// The exact fourcc string.
    pub fn fourcc(&self) -> &'static str {
        match self {
            CodecId::Vp80 => "VP80",
            CodecId::Mp4s => "MP4S",
            CodecId::Mp4v => "MP4V",
            CodecId::Mp4vQt => "mp4v",
            CodecId::H264 => "H264",
            CodecId::X264 => "X264",
            CodecId::Div3 => "DIV3",
            CodecId::Divx => "DIVX",
            CodecId::Iyuv => "IYUV",
            CodecId::Mjpg => "MJPG",
            CodecId::Xvid => "XVID",
            CodecId::Theo => "THEO",
            CodecId::H263 => "H263",
            CodecId::Avc1 => "avc1",
        }
    }

    /// Container extension for this codec, with the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            CodecId::Vp80 => ".webm",
            CodecId::Mp4s | CodecId::Mp4v | CodecId::H264 | CodecId::X264 | CodecId::Avc1 => ".mp4",
            CodecId::Mp4vQt => ".mov",
            CodecId::Div3 | CodecId::Divx | CodecId::Iyuv | CodecId::Mjpg | CodecId::Xvid => ".avi",
            CodecId::Theo => ".ogg",
            CodecId::H263 => ".wmv",
        }
    }
}

impl fmt::Display for CodecId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.fourcc())
    }
}

impl FromStr for CodecId {
    type Err = InlayError;

    /// Exact, case-sensitive fourcc lookup. Anything else errors listing
    /// every supported codec.
    fn from_str(s: &str) -> InlayResult<Self> {
        Self::ALL
            .iter()
            .find(|c| c.fourcc() == s)
            .copied()
            .ok_or_else(|| InlayError::unsupported("codec", s, Self::ALL.iter().map(|c| c.fourcc())))
    }
}
