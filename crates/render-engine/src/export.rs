//! Export orchestration: decode, composite, encode, audio, report.

use std::path::{Path, PathBuf};
use std::time::Instant;

use inlay_common::{InlayError, InlayResult};
use inlay_scene_model::{ExportSettings, RenderReport};

use crate::audio::{extract_audio, mux_audio, overlay_audio};
use crate::timeline::Timeline;
use crate::video_io::{command_exists, probe_media, timestamped_name, FrameReader, FrameWriter};

/// An export job ready to be rendered.
#[derive(Debug)]
pub struct ExportJob {
    /// Source video whose frames are composited over.
    pub source: PathBuf,

    /// The overlay stack.
    pub timeline: Timeline,

    /// Output, codec, and audio settings.
    pub settings: ExportSettings,
}

impl ExportJob {
    pub fn new(source: impl Into<PathBuf>, timeline: Timeline, settings: ExportSettings) -> Self {
        Self {
            source: source.into(),
            timeline,
            settings,
        }
    }
}

/// Progress callback for export rendering.
pub type ProgressCallback = Box<dyn Fn(ExportProgress) + Send>;

/// Export progress report.
#[derive(Debug, Clone)]
pub struct ExportProgress {
    /// Current progress [0.0, 1.0]; stays at 0.0 while the total is
    /// unknown.
    pub progress: f64,

    /// Frames rendered so far.
    pub frames_rendered: u32,

    /// Total frames to render, when the container reports one.
    pub total_frames: Option<u32>,

    /// Estimated time remaining in seconds, when computable.
    pub eta_secs: Option<f64>,

    /// Current stage.
    pub stage: ExportStage,
}

/// Stages of the export process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportStage {
    Preparing,
    Rendering,
    Audio,
    Finalizing,
    Complete,
}

/// Render a timeline over a source video.
///
/// Decodes the source frame by frame, composites the timeline at each
/// position, encodes the result, then runs the audio pass (extract,
/// per-clip overlay, mux) and writes the render report.
pub fn export(job: &ExportJob, progress: Option<ProgressCallback>) -> InlayResult<RenderReport> {
    if !command_exists("ffmpeg") || !command_exists("ffprobe") {
        return Err(InlayError::ffmpeg(
            "ffmpeg and ffprobe must be on PATH to export",
        ));
    }
    InlayError::require_asset(&job.source)?;
    if let Some(source) = &job.settings.audio.source {
        InlayError::require_asset(source)?;
    }

    let started = Instant::now();
    let emit = |stage: ExportStage, frames: u32, total: Option<u32>| {
        if let Some(cb) = &progress {
            let fraction = match total {
                Some(t) if t > 0 => (frames as f64 / t as f64).min(1.0),
                _ => 0.0,
            };
            let eta = match total {
                Some(t) if frames > 0 && t > frames => {
                    let per_frame = started.elapsed().as_secs_f64() / frames as f64;
                    Some(per_frame * (t - frames) as f64)
                }
                _ => None,
            };
            cb(ExportProgress {
                progress: if stage == ExportStage::Complete {
                    1.0
                } else {
                    fraction
                },
                frames_rendered: frames,
                total_frames: total,
                eta_secs: eta,
                stage,
            });
        }
    };

    emit(ExportStage::Preparing, 0, None);
    let probe = probe_media(&job.source)?;

    // Output size: explicit settings win, then the element bounding
    // rectangle, then the source.
    let bounds = job.timeline.bounds();
    let out_w = job
        .settings
        .width
        .or(bounds.map(|b| b.width).filter(|w| *w > 0))
        .unwrap_or(probe.width);
    let out_h = job
        .settings
        .height
        .or(bounds.map(|b| b.height).filter(|h| *h > 0))
        .unwrap_or(probe.height);
    let fps = job.settings.fps.filter(|f| *f > 0.0).unwrap_or(probe.fps);

    let total: Option<u32> = match (probe.frames, job.settings.frame_limit) {
        (Some(n), Some(limit)) => Some(n.min(limit as u64) as u32),
        (Some(n), None) => Some(n.min(u32::MAX as u64) as u32),
        (None, Some(limit)) => Some(limit),
        (None, None) => None,
    };

    let output = match &job.settings.output {
        Some(path) => {
            let expected = job.settings.codec.extension();
            let actual = path
                .extension()
                .map(|e| format!(".{}", e.to_string_lossy()))
                .unwrap_or_default();
            if actual != expected {
                tracing::warn!(
                    output = %path.display(),
                    codec = %job.settings.codec,
                    expected,
                    "Output extension does not match the codec's container"
                );
            }
            path.clone()
        }
        None => {
            let stem = job
                .source
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "render".to_owned());
            let dir = job.source.parent().unwrap_or(Path::new("."));
            dir.join(timestamped_name(&stem, job.settings.codec))
        }
    };

    tracing::info!(
        source = %job.source.display(),
        output = %output.display(),
        codec = %job.settings.codec,
        width = out_w,
        height = out_h,
        fps,
        elements = job.timeline.len(),
        "Starting export"
    );

    let mut reader = FrameReader::open(&job.source, out_w, out_h)?;
    let mut writer = FrameWriter::create(&output, out_w, out_h, fps, job.settings.codec)?;

    let mut pos: u32 = 0;
    let mut limit_hit = false;
    while let Some(mut frame) = reader.next_frame()? {
        if job.settings.frame_limit.is_some_and(|limit| pos >= limit) {
            limit_hit = true;
            break;
        }
        job.timeline.composite(&mut frame, pos);
        if job.settings.stills.contains(&pos) {
            let still = output.with_extension(format!("frame{}.png", pos));
            frame.to_rgb_image().save(&still)?;
            tracing::info!(path = %still.display(), pos, "Saved still frame");
        }
        writer.write_frame(&frame)?;
        pos += 1;
        emit(ExportStage::Rendering, pos, total);
    }
    if limit_hit {
        // Dropping the reader stops the decoder mid-stream.
        drop(reader);
    } else {
        reader.close()?;
    }
    let frames_written = writer.finish()?;
    if total.is_some_and(|t| frames_written < t) {
        tracing::warn!(
            frames_written,
            expected = total,
            "Source ended before the expected frame count"
        );
    }

    let mut final_output = output.clone();
    let mut audio_track = None;
    if job.settings.audio.enabled {
        emit(ExportStage::Audio, frames_written, total);
        match build_audio_track(job, &output, fps) {
            Ok(track) => {
                emit(ExportStage::Finalizing, frames_written, total);
                let muxed = path_with_suffix(&output, "_audio");
                mux_audio(&output, &track, job.settings.audio.offset, &muxed)?;
                audio_track = Some(track);
                final_output = muxed;
            }
            Err(err) => {
                tracing::warn!(%err, "Audio pass failed, keeping the silent render");
            }
        }
    }

    let mut report = RenderReport::new(
        job.source.clone(),
        final_output.clone(),
        out_w,
        out_h,
        fps,
    );
    report.audio = audio_track;
    report.frames_written = frames_written;
    report.elements = job.timeline.reports();

    if job.settings.report {
        let report_path = final_output.with_extension("report.json");
        std::fs::write(&report_path, serde_json::to_string_pretty(&report)?)?;
        tracing::info!(path = %report_path.display(), "Wrote render report");
    }

    emit(ExportStage::Complete, frames_written, total);
    tracing::info!(
        output = %final_output.display(),
        frames = frames_written,
        elapsed_secs = started.elapsed().as_secs_f64(),
        "Export complete"
    );
    Ok(report)
}

/// Extract the base audio and mix in every clip's track.
fn build_audio_track(job: &ExportJob, output: &Path, fps: f64) -> InlayResult<PathBuf> {
    let base_source = job.settings.audio.source.as_ref().unwrap_or(&job.source);
    let mut chain = extract_audio(
        base_source,
        &output.with_extension("base.m4a"),
        &job.settings.audio,
    )?;

    for (i, (clip, start)) in job.timeline.audio_clips().into_iter().enumerate() {
        let next = output.with_extension(format!("mix{}.m4a", i + 1));
        chain = overlay_audio(&chain, &clip, start as f64 / fps, &next)?;
    }
    Ok(chain)
}

/// `render.mp4` with suffix `_audio` becomes `render_audio.mp4`.
fn path_with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    path.with_file_name(format!("{}{}{}", stem, suffix, ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_lands_between_stem_and_extension() {
        assert_eq!(
            path_with_suffix(Path::new("/tmp/render.mp4"), "_audio"),
            PathBuf::from("/tmp/render_audio.mp4")
        );
        assert_eq!(
            path_with_suffix(Path::new("clip"), "_audio"),
            PathBuf::from("clip_audio")
        );
    }

    #[test]
    fn missing_ffmpeg_or_source_fails_before_rendering() {
        let job = ExportJob::new(
            "/nonexistent/source.mp4",
            Timeline::new(),
            ExportSettings::default(),
        );
        let err = export(&job, None).unwrap_err();
        match err {
            // Without ffmpeg installed the preflight fails first.
            InlayError::Ffmpeg { .. } | InlayError::AssetNotFound { .. } => {}
            other => panic!("unexpected error: {other}"),
        }
    }
}
