//! Audio extraction, overlay mixing, and muxing.
//!
//! The render loop produces silent video; audio is assembled in a
//! separate ffmpeg pass. The source track is extracted (with optional
//! trim and gain), each clip element mixes its own audio in at its
//! start position, and the result is muxed back onto the rendered
//! video.

use std::path::{Path, PathBuf};

use inlay_common::{InlayError, InlayResult};
use inlay_scene_model::AudioSettings;

use crate::video_io::run_ffmpeg;

/// Extract the audio track of `video` as a stereo file at `out`.
///
/// Trim bounds and gain from the settings are applied in the same
/// pass.
pub fn extract_audio(video: &Path, out: &Path, settings: &AudioSettings) -> InlayResult<PathBuf> {
    let video = InlayError::require_asset(video)?;
    let args = extraction_args(&video, out, settings);
    run_ffmpeg(&args, "audio extraction")?;
    Ok(out.to_path_buf())
}

fn extraction_args(video: &Path, out: &Path, settings: &AudioSettings) -> Vec<String> {
    let mut args: Vec<String> = vec![
        "-y".into(),
        "-v".into(),
        "error".into(),
        "-i".into(),
        video.to_string_lossy().into_owned(),
    ];
    if let Some(start) = settings.trim_start {
        args.extend(["-ss".into(), format!("{}", start)]);
    }
    if let Some(end) = settings.trim_end {
        args.extend(["-to".into(), format!("{}", end)]);
    }
    if let Some(db) = settings.volume_db {
        args.extend(["-filter:a".into(), format!("volume={}dB", db)]);
    }
    args.extend([
        "-vn".into(),
        "-ac".into(),
        "2".into(),
        out.to_string_lossy().into_owned(),
    ]);
    args
}

/// Mix the audio of `overlay` into `base` starting at `position_secs`,
/// writing the result to `out`. The output keeps the base's duration.
pub fn overlay_audio(
    base: &Path,
    overlay: &Path,
    position_secs: f64,
    out: &Path,
) -> InlayResult<PathBuf> {
    let base = InlayError::require_asset(base)?;
    let overlay = InlayError::require_asset(overlay)?;
    let args = overlay_args(&base, &overlay, position_secs, out);
    run_ffmpeg(&args, "audio overlay")?;
    Ok(out.to_path_buf())
}

fn overlay_args(base: &Path, overlay: &Path, position_secs: f64, out: &Path) -> Vec<String> {
    let delay_ms = (position_secs * 1000.0).round().max(0.0) as u64;
    let filter = format!(
        "[1:a]adelay={0}|{0}[ov];[0:a][ov]amix=inputs=2:duration=first[mix]",
        delay_ms
    );
    vec![
        "-y".into(),
        "-v".into(),
        "error".into(),
        "-i".into(),
        base.to_string_lossy().into_owned(),
        "-i".into(),
        overlay.to_string_lossy().into_owned(),
        "-filter_complex".into(),
        filter,
        "-map".into(),
        "[mix]".into(),
        out.to_string_lossy().into_owned(),
    ]
}

/// Mux a silent rendered video with an audio file.
///
/// `offset_secs` shifts the video stream against the audio; the flag
/// binds to the video input.
pub fn mux_audio(video: &Path, audio: &Path, offset_secs: f64, out: &Path) -> InlayResult<PathBuf> {
    let video = InlayError::require_asset(video)?;
    let audio = InlayError::require_asset(audio)?;
    let args = mux_args(&video, &audio, offset_secs, out);
    run_ffmpeg(&args, "audio mux")?;
    Ok(out.to_path_buf())
}

fn mux_args(video: &Path, audio: &Path, offset_secs: f64, out: &Path) -> Vec<String> {
    vec![
        "-y".into(),
        "-itsoffset".into(),
        format!("{}", offset_secs),
        "-i".into(),
        video.to_string_lossy().into_owned(),
        "-i".into(),
        audio.to_string_lossy().into_owned(),
        "-c:v".into(),
        "copy".into(),
        "-c:a".into(),
        "aac".into(),
        "-map".into(),
        "0:v:0".into(),
        "-map".into(),
        "1:a:0".into(),
        "-async".into(),
        "1".into(),
        "-strict".into(),
        "-2".into(),
        out.to_string_lossy().into_owned(),
    ]
}
