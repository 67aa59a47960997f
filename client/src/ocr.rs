//! Battle text extraction from recorded videos
//!
//! `ffmpeg` samples the video, crops the message box and thresholds it; each
//! sampled frame is then read with `tesseract`, one at a time, as the frame
//! iterator is consumed.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use std::str::FromStr;

use tempfile::TempDir;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MediaError {
    #[error("Video not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to run {tool}: {source}")]
    Tool {
        tool: String,
        #[source]
        source: io::Error,
    },

    #[error("{tool} exited with {status}: {stderr}")]
    Decode {
        tool: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("Failed to read sampled frames: {0}")]
    Io(#[from] io::Error),
}

/// Source of per-frame OCR text for a video
pub trait FrameReader {
    type Frames: Iterator<Item = Result<String, MediaError>>;

    /// Open `path` and return the text of each sampled frame, in order
    fn open(&self, path: &Path) -> Result<Self::Frames, MediaError>;
}

/// Pixel rectangle of the battle message box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRegion {
    pub width: u32,
    pub height: u32,
    pub x: u32,
    pub y: u32,
}

impl Default for CropRegion {
    fn default() -> Self {
        Self {
            width: 800,
            height: 100,
            x: 200,
            y: 500,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid crop geometry {0:?}, expected WIDTHxHEIGHT+X+Y")]
pub struct CropParseError(String);

/// Parses `WIDTHxHEIGHT+X+Y`, e.g. `800x100+200+500`
impl FromStr for CropRegion {
    type Err = CropParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CropParseError(s.to_string());

        let (size, offset) = s.split_once('+').ok_or_else(invalid)?;
        let (width, height) = size.split_once('x').ok_or_else(invalid)?;
        let (x, y) = offset.split_once('+').ok_or_else(invalid)?;

        let parse = |v: &str| v.trim().parse::<u32>().map_err(|_| invalid());
        let region = CropRegion {
            width: parse(width)?,
            height: parse(height)?,
            x: parse(x)?,
            y: parse(y)?,
        };

        if region.width == 0 || region.height == 0 {
            return Err(invalid());
        }
        Ok(region)
    }
}

impl fmt::Display for CropRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

/// Sampling and preprocessing applied before recognition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcrSettings {
    pub ffmpeg: PathBuf,
    pub tesseract: PathBuf,
    /// Keep one frame out of every `sample_every`
    pub sample_every: u32,
    pub crop: CropRegion,
    /// Luma at or below this is zeroed; brighter pixels are kept as-is
    pub threshold: u8,
}

impl Default for OcrSettings {
    fn default() -> Self {
        Self {
            ffmpeg: PathBuf::from("ffmpeg"),
            tesseract: PathBuf::from("tesseract"),
            sample_every: 20,
            crop: CropRegion::default(),
            threshold: 200,
        }
    }
}

impl OcrSettings {
    /// ffmpeg filter graph: sample, crop, grayscale, threshold to zero
    pub fn filter_graph(&self) -> String {
        let crop = self.crop;
        format!(
            "select=not(mod(n\\,{every})),crop={w}:{h}:{x}:{y},format=gray,lutyuv=y=if(gt(val\\,{t})\\,val\\,0)",
            every = self.sample_every.max(1),
            w = crop.width,
            h = crop.height,
            x = crop.x,
            y = crop.y,
            t = self.threshold,
        )
    }
}

/// OCR through the `ffmpeg` and `tesseract` command line tools
#[derive(Debug, Clone, Default)]
pub struct FfmpegOcr {
    settings: OcrSettings,
}

impl FfmpegOcr {
    pub fn new(settings: OcrSettings) -> Self {
        Self { settings }
    }

    fn extract_frames(&self, video: &Path, dir: &Path) -> Result<Vec<PathBuf>, MediaError> {
        let output = Command::new(&self.settings.ffmpeg)
            .args(["-hide_banner", "-loglevel", "error", "-nostdin", "-i"])
            .arg(video)
            .arg("-vf")
            .arg(self.settings.filter_graph())
            .args(["-fps_mode", "passthrough"])
            .arg(dir.join("frame-%06d.png"))
            .output()
            .map_err(|source| MediaError::Tool {
                tool: tool_name(&self.settings.ffmpeg),
                source,
            })?;

        if !output.status.success() {
            return Err(MediaError::Decode {
                tool: tool_name(&self.settings.ffmpeg),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let mut frames = fs::read_dir(dir)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<Result<Vec<_>, io::Error>>()?;
        frames.sort();

        Ok(frames)
    }
}

impl FrameReader for FfmpegOcr {
    type Frames = OcrFrames;

    fn open(&self, path: &Path) -> Result<OcrFrames, MediaError> {
        if !path.is_file() {
            return Err(MediaError::NotFound(path.to_path_buf()));
        }

        let dir = tempfile::tempdir()?;
        let frames = self.extract_frames(path, dir.path())?;
        tracing::debug!(
            video = %path.display(),
            frames = frames.len(),
            sample_every = self.settings.sample_every,
            "video sampled"
        );

        Ok(OcrFrames {
            frames: frames.into_iter(),
            tesseract: self.settings.tesseract.clone(),
            _dir: dir,
        })
    }
}

/// Lazily recognised frames; the sampled images live until this is dropped
pub struct OcrFrames {
    frames: std::vec::IntoIter<PathBuf>,
    tesseract: PathBuf,
    _dir: TempDir,
}

impl Iterator for OcrFrames {
    type Item = Result<String, MediaError>;

    fn next(&mut self) -> Option<Self::Item> {
        let frame = self.frames.next()?;
        Some(recognize(&self.tesseract, &frame))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.frames.size_hint()
    }
}

fn recognize(tesseract: &Path, frame: &Path) -> Result<String, MediaError> {
    let output = Command::new(tesseract)
        .arg(frame)
        .arg("stdout")
        .output()
        .map_err(|source| MediaError::Tool {
            tool: tool_name(tesseract),
            source,
        })?;

    if !output.status.success() {
        return Err(MediaError::Decode {
            tool: tool_name(tesseract),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

fn tool_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}
