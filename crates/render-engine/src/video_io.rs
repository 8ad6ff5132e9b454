//! ffmpeg and ffprobe subprocess plumbing.
//!
//! Decoding and encoding both go through ffmpeg child processes
//! moving raw BGR24 frames over pipes. Every child is waited on and
//! its exit status checked; stderr is drained on a separate thread so
//! a chatty encoder cannot deadlock the pipe.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::thread::JoinHandle;

use chrono::Local;
use inlay_common::{InlayError, InlayResult};
use inlay_scene_model::CodecId;

use crate::frame::Frame;

/// Check whether a binary is available on PATH.
pub fn command_exists(binary: &str) -> bool {
    Command::new("sh")
        .arg("-c")
        .arg(format!("command -v {} >/dev/null 2>&1", binary))
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Video stream properties reported by ffprobe.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaProbe {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
    /// Frame count when the container reports one.
    pub frames: Option<u64>,
}

/// Probe the first video stream of a media file.
pub fn probe_media(path: &Path) -> InlayResult<MediaProbe> {
    let path = InlayError::require_asset(path)?;
    let output = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-select_streams",
            "v:0",
            "-show_entries",
            "stream=width,height,r_frame_rate,nb_frames",
            "-of",
            "default=noprint_wrappers=1",
        ])
        .arg(&path)
        .output()?;
    if !output.status.success() {
        return Err(InlayError::ffmpeg(format!(
            "ffprobe failed for {}: {}",
            path.display(),
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let mut width = None;
    let mut height = None;
    let mut fps = None;
    let mut frames = None;
    for line in stdout.lines() {
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        match key.trim() {
            "width" => width = value.trim().parse().ok(),
            "height" => height = value.trim().parse().ok(),
            "r_frame_rate" => fps = parse_rate(value.trim()),
            "nb_frames" => frames = value.trim().parse().ok(),
            _ => {}
        }
    }

    match (width, height, fps) {
        (Some(width), Some(height), Some(fps)) => Ok(MediaProbe {
            width,
            height,
            fps,
            frames,
        }),
        _ => Err(InlayError::ffmpeg(format!(
            "no video stream found in {} (ffprobe said: {})",
            path.display(),
            stdout.trim()
        ))),
    }
}

/// Parse an ffprobe rational like `30000/1001` into frames per second.
fn parse_rate(s: &str) -> Option<f64> {
    match s.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.parse().ok()?;
            let den: f64 = den.parse().ok()?;
            if den == 0.0 {
                None
            } else {
                Some(num / den)
            }
        }
        None => s.parse().ok(),
    }
}

/// Streams decoded BGR frames out of a media file.
pub struct FrameReader {
    child: Option<Child>,
    stdout: ChildStdout,
    stderr: Option<JoinHandle<String>>,
    width: u32,
    height: u32,
}

impl FrameReader {
    /// Start decoding `path`, scaling every frame to `width x height`.
    pub fn open(path: &Path, width: u32, height: u32) -> InlayResult<Self> {
        let path = InlayError::require_asset(path)?;
        let mut child = Command::new("ffmpeg")
            .args(["-v", "error", "-i"])
            .arg(&path)
            .args([
                "-f",
                "rawvideo",
                "-pix_fmt",
                "bgr24",
                "-vf",
                &format!("scale={}:{}", width, height),
                "-",
            ])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        tracing::debug!(path = %path.display(), width, height, pid = child.id(), "Started frame decoder");

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| InlayError::ffmpeg("failed to capture decoder stdout"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| InlayError::ffmpeg("failed to capture decoder stderr"))?;
        let stderr = std::thread::spawn(move || -> String {
            let mut s = String::new();
            let _ = std::io::BufReader::new(stderr).read_to_string(&mut s);
            s
        });

        Ok(Self {
            child: Some(child),
            stdout,
            stderr: Some(stderr),
            width,
            height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The next decoded frame, or `None` once the stream ends.
    ///
    /// A truncated trailing frame is logged and treated as the end of
    /// the stream.
    pub fn next_frame(&mut self) -> InlayResult<Option<Frame>> {
        let len = self.width as usize * self.height as usize * 3;
        let mut buf = vec![0u8; len];
        let mut filled = 0;
        while filled < len {
            let n = self.stdout.read(&mut buf[filled..])?;
            if n == 0 {
                break;
            }
            filled += n;
        }
        if filled == 0 {
            return Ok(None);
        }
        if filled < len {
            tracing::warn!(filled, expected = len, "Discarding truncated trailing frame");
            return Ok(None);
        }
        Ok(Some(Frame::from_bgr(self.width, self.height, buf)?))
    }

    /// Collect every remaining frame.
    pub fn collect_frames(mut self) -> InlayResult<Vec<Frame>> {
        let mut frames = Vec::new();
        while let Some(frame) = self.next_frame()? {
            frames.push(frame);
        }
        self.close().map(|_| frames)
    }

    /// Wait for the decoder to exit after the stream is drained.
    pub fn close(mut self) -> InlayResult<()> {
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };
        let status = child.wait()?;
        let stderr = self
            .stderr
            .take()
            .map(|h| h.join().unwrap_or_default())
            .unwrap_or_default();
        if !status.success() {
            return Err(InlayError::ffmpeg(format!(
                "decoder exited with {}: {}",
                status,
                stderr.trim()
            )));
        }
        Ok(())
    }
}

impl Drop for FrameReader {
    fn drop(&mut self) {
        // Reached when the caller stops before the stream ends.
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

/// Streams composited BGR frames into an encoder.
pub struct FrameWriter {
    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stderr: Option<JoinHandle<String>>,
    width: u32,
    height: u32,
    frames_written: u32,
    path: PathBuf,
}

impl FrameWriter {
    /// Start an encoder writing to `path` with the codec's container
    /// and encoder settings.
    pub fn create(
        path: &Path,
        width: u32,
        height: u32,
        fps: f64,
        codec: CodecId,
    ) -> InlayResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut args: Vec<String> = vec![
            "-y".into(),
            "-v".into(),
            "error".into(),
            "-f".into(),
            "rawvideo".into(),
            "-pix_fmt".into(),
            "bgr24".into(),
            "-s".into(),
            format!("{}x{}", width, height),
            "-r".into(),
            format!("{}", fps),
            "-i".into(),
            "-".into(),
        ];
        args.extend(encoder_args(codec));
        // Most encoders reject odd dimensions.
        args.extend([
            "-vf".into(),
            "pad=ceil(iw/2)*2:ceil(ih/2)*2".into(),
            "-an".into(),
            path.to_string_lossy().into_owned(),
        ]);

        let mut child = Command::new("ffmpeg")
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()?;

        tracing::debug!(
            path = %path.display(),
            codec = %codec,
            width,
            height,
            fps,
            pid = child.id(),
            "Started frame encoder"
        );

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| InlayError::ffmpeg("failed to capture encoder stdin"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| InlayError::ffmpeg("failed to capture encoder stderr"))?;
        let stderr = std::thread::spawn(move || -> String {
            let mut s = String::new();
            let _ = std::io::BufReader::new(stderr).read_to_string(&mut s);
            s
        });

        Ok(Self {
            child: Some(child),
            stdin: Some(stdin),
            stderr: Some(stderr),
            width,
            height,
            frames_written: 0,
            path: path.to_path_buf(),
        })
    }

    pub fn frames_written(&self) -> u32 {
        self.frames_written
    }

    /// Push one frame into the encoder.
    pub fn write_frame(&mut self, frame: &Frame) -> InlayResult<()> {
        if frame.width() != self.width || frame.height() != self.height {
            return Err(InlayError::render(format!(
                "frame is {}x{} but the encoder expects {}x{}",
                frame.width(),
                frame.height(),
                self.width,
                self.height
            )));
        }
        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| InlayError::ffmpeg("encoder already finished"))?;
        stdin.write_all(frame.data())?;
        self.frames_written += 1;
        Ok(())
    }

    /// Close the pipe and wait for the encoder to finalize the file.
    pub fn finish(mut self) -> InlayResult<u32> {
        drop(self.stdin.take());
        let Some(mut child) = self.child.take() else {
            return Ok(self.frames_written);
        };
        let status = child.wait()?;
        let stderr = self
            .stderr
            .take()
            .map(|h| h.join().unwrap_or_default())
            .unwrap_or_default();
        if !status.success() {
            return Err(InlayError::ffmpeg(format!(
                "encoder for {} exited with {}: {}",
                self.path.display(),
                status,
                stderr.trim()
            )));
        }
        tracing::info!(path = %self.path.display(), frames = self.frames_written, "Encoded video");
        Ok(self.frames_written)
    }
}

impl Drop for FrameWriter {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take() {
            drop(self.stdin.take());
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

/// Encoder flags for each supported codec.
pub fn encoder_args(codec: CodecId) -> Vec<String> {
    let args: &[&str] = match codec {
        CodecId::H264 | CodecId::X264 | CodecId::Avc1 => &[
            "-c:v", "libx264", "-preset", "medium", "-crf", "23", "-pix_fmt", "yuv420p",
        ],
        CodecId::Vp80 => &["-c:v", "libvpx", "-b:v", "1M", "-pix_fmt", "yuv420p"],
        CodecId::Mp4s | CodecId::Mp4v | CodecId::Mp4vQt => &["-c:v", "mpeg4", "-q:v", "5"],
        CodecId::Divx => &["-c:v", "mpeg4", "-vtag", "DIVX", "-q:v", "5"],
        CodecId::Xvid => &["-c:v", "mpeg4", "-vtag", "XVID", "-q:v", "5"],
        CodecId::Div3 => &["-c:v", "msmpeg4", "-q:v", "5"],
        CodecId::Iyuv => &["-c:v", "rawvideo", "-pix_fmt", "yuv420p"],
        CodecId::Mjpg => &["-c:v", "mjpeg", "-q:v", "3"],
        CodecId::Theo => &["-c:v", "libtheora", "-q:v", "7"],
        CodecId::H263 => &["-c:v", "h263p"],
    };
    args.iter().map(|s| s.to_string()).collect()
}

/// Default output name: source stem, timestamp, codec extension.
pub fn timestamped_name(stem: &str, codec: CodecId) -> String {
    format!(
        "{}_{}{}",
        stem,
        Local::now().format("%Y-%m-%d@%H.%M.%S"),
        codec.extension()
    )
}

/// Run ffmpeg to completion, surfacing stderr on failure.
pub(crate) fn run_ffmpeg(args: &[String], context: &str) -> InlayResult<()> {
    tracing::debug!(?args, "Running ffmpeg");
    let output = Command::new("ffmpeg")
        .args(args)
        .stdin(Stdio::null())
        .output()?;
    if !output.status.success() {
        return Err(InlayError::ffmpeg(format!(
            "{} failed ({}): {}",
            context,
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }
    Ok(())
}
