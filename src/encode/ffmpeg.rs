use std::{
    io::{Read as _, Write as _},
    path::{Path, PathBuf},
    process::{Child, ChildStdin, Command, Stdio},
    thread::JoinHandle,
};

use crate::{
    foundation::error::{WireError, WireResult},
    raster::surface::FrameRgb,
};

#[derive(Clone, Debug)]
pub struct EncodeConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub out_path: PathBuf,
    pub overwrite: bool,
}

impl EncodeConfig {
    pub fn new(out_path: impl Into<PathBuf>, width: u32, height: u32, fps: u32) -> Self {
        Self {
            width,
            height,
            fps,
            out_path: out_path.into(),
            overwrite: true,
        }
    }

    pub fn validate(&self) -> WireResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(WireError::validation("encode width/height must be non-zero"));
        }
        if self.fps == 0 {
            return Err(WireError::validation("encode fps must be non-zero"));
        }
        if !self.width.is_multiple_of(2) || !self.height.is_multiple_of(2) {
            // yuv420p subsamples chroma 2x2
            return Err(WireError::validation(
                "encode width/height must be even (required for yuv420p mp4 output)",
            ));
        }
        Ok(())
    }

    fn frame_len(&self) -> usize {
        self.width as usize * self.height as usize * 3
    }
}

pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

pub fn ensure_parent_dir(path: &Path) -> WireResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

type StderrDrain = JoinHandle<std::io::Result<Vec<u8>>>;

/// Collect a child's piped stderr on a background thread so a chatty process never blocks on a
/// full pipe while the caller is still writing to its stdin.
fn spawn_stderr_drain(child: &mut Child) -> WireResult<StderrDrain> {
    let mut stderr = child
        .stderr
        .take()
        .ok_or_else(|| WireError::encode("failed to open ffmpeg stderr"))?;
    Ok(std::thread::spawn(move || {
        let mut bytes = Vec::new();
        stderr.read_to_end(&mut bytes)?;
        Ok(bytes)
    }))
}

fn join_stderr_drain(drain: Option<StderrDrain>) -> WireResult<Vec<u8>> {
    match drain {
        Some(handle) => handle
            .join()
            .map_err(|_| WireError::encode("ffmpeg stderr drain thread panicked"))?
            .map_err(|e| WireError::encode(format!("ffmpeg stderr read failed: {e}"))),
        None => Ok(Vec::new()),
    }
}

/// Streams raw `rgb24` frames into a system `ffmpeg` process producing H.264 MP4.
///
/// Dropping an unfinished encoder kills and reaps the child process.
pub struct FfmpegEncoder {
    cfg: EncodeConfig,
    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stderr_drain: Option<StderrDrain>,
    frames_written: u64,
}

impl FfmpegEncoder {
    pub fn new(cfg: EncodeConfig) -> WireResult<Self> {
        cfg.validate()?;
        ensure_parent_dir(&cfg.out_path)?;

        if !cfg.overwrite && cfg.out_path.exists() {
            return Err(WireError::validation(format!(
                "output file '{}' already exists",
                cfg.out_path.display()
            )));
        }
        if !is_ffmpeg_on_path() {
            return Err(WireError::encode(
                "ffmpeg is required for MP4 encoding, but was not found on PATH",
            ));
        }

        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        cmd.arg(if cfg.overwrite { "-y" } else { "-n" });
        cmd.args([
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgb24",
            "-s",
            &format!("{}x{}", cfg.width, cfg.height),
            "-r",
            &cfg.fps.to_string(),
            "-i",
            "pipe:0",
            "-an",
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-movflags",
            "+faststart",
        ])
        .arg(&cfg.out_path);

        tracing::debug!(
            out = %cfg.out_path.display(),
            w = cfg.width,
            h = cfg.height,
            fps = cfg.fps,
            "spawning ffmpeg"
        );
        let mut child = cmd.spawn().map_err(|e| {
            WireError::encode(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| WireError::encode("failed to open ffmpeg stdin"))?;
        let stderr_drain = match spawn_stderr_drain(&mut child) {
            Ok(drain) => drain,
            Err(e) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(e);
            }
        };

        Ok(Self {
            cfg,
            child: Some(child),
            stdin: Some(stdin),
            stderr_drain: Some(stderr_drain),
            frames_written: 0,
        })
    }

    pub fn encode_frame(&mut self, frame: &FrameRgb) -> WireResult<()> {
        if frame.width != self.cfg.width || frame.height != self.cfg.height {
            return Err(WireError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, self.cfg.width, self.cfg.height
            )));
        }
        if frame.data.len() != self.cfg.frame_len() {
            return Err(WireError::validation(
                "frame.data size mismatch with width*height*3",
            ));
        }

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(WireError::encode("ffmpeg encoder is already finalized"));
        };
        stdin.write_all(&frame.data).map_err(|e| {
            WireError::encode(format!("failed to write frame to ffmpeg stdin: {e}"))
        })?;
        self.frames_written += 1;
        Ok(())
    }

    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    pub fn finish(mut self) -> WireResult<()> {
        drop(self.stdin.take());
        let mut child = self
            .child
            .take()
            .ok_or_else(|| WireError::encode("ffmpeg encoder is already finalized"))?;

        let status = child.wait().map_err(|e| {
            WireError::encode(format!("failed to wait for ffmpeg to finish: {e}"))
        })?;
        let stderr_bytes = join_stderr_drain(self.stderr_drain.take())?;
        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr_bytes);
            return Err(WireError::encode(format!(
                "ffmpeg exited with status {}: {}",
                status,
                stderr.trim()
            )));
        }

        tracing::info!(
            frames = self.frames_written,
            out = %self.cfg.out_path.display(),
            "mp4 written"
        );
        Ok(())
    }
}

impl Drop for FfmpegEncoder {
    fn drop(&mut self) {
        drop(self.stdin.take());
        if let Some(mut child) = self.child.take() {
            tracing::warn!(
                frames = self.frames_written,
                out = %self.cfg.out_path.display(),
                "ffmpeg encoder dropped before finish; killing child"
            );
            let _ = child.kill();
            let _ = child.wait();
        }
        let _ = join_stderr_drain(self.stderr_drain.take());
    }
}
