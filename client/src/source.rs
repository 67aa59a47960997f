//! Input list entries

use std::fmt;
use std::path::PathBuf;

/// One replay to process
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplaySource {
    /// Showdown replay page URL
    Log(String),
    /// Recorded battle video
    Video(PathBuf),
}

impl ReplaySource {
    /// Parse one input list line
    ///
    /// Anything starting with `http` is a replay URL; everything else is a
    /// video path. Blank lines and `#` comments yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            return None;
        }

        if line.starts_with("http") {
            Some(ReplaySource::Log(line.to_string()))
        } else {
            Some(ReplaySource::Video(PathBuf::from(line)))
        }
    }

    /// Parse a whole input list, in order
    pub fn parse_list(text: &str) -> Vec<Self> {
        text.lines().filter_map(Self::parse).collect()
    }
}

impl fmt::Display for ReplaySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplaySource::Log(url) => f.write_str(url),
            ReplaySource::Video(path) => write!(f, "{}", path.display()),
        }
    }
}
