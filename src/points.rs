use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, info};

use crate::splitter::{split_command, SplitError};
use crate::{ErrorKind, FrameRate};

pub const DEFAULT_POINTS_FILE: &str = "points.txt";
pub const DEFAULT_INPUT_FILE: &str = "audio_corrected.mov";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub points_file: PathBuf,
    pub input_file: String,
    pub frame_rate: FrameRate,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            points_file: PathBuf::from(DEFAULT_POINTS_FILE),
            input_file: String::from(DEFAULT_INPUT_FILE),
            frame_rate: FrameRate::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum PointsError {
    #[error("Error opening {path}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Error reading {path}:{line}")]
    Read {
        path: String,
        line: usize,
        #[source]
        source: io::Error,
    },
    #[error("At {path}:{line}")]
    Line {
        path: String,
        line: usize,
        #[source]
        source: SplitError,
    },
    #[error("Error writing command")]
    Write(#[source] io::Error),
}

impl PointsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PointsError::Open { .. } => ErrorKind::FileOpen,
            PointsError::Read { .. } | PointsError::Write(_) => ErrorKind::Io,
            PointsError::Line { source, .. } => source.kind(),
        }
    }
}

/// Name of the file the segment on line `line` (1-based) is copied to.
pub fn segment_name(line: usize) -> String {
    format!("segment_{}.mov", line)
}

/// Opens the configured points file and writes one command per line to `out`.
pub fn run<W: Write>(config: &Config, out: W) -> Result<usize, PointsError> {
    let path = config.points_file.display().to_string();
    let f = File::open(&config.points_file).map_err(|source| PointsError::Open {
        path: path.clone(),
        source,
    })?;
    debug!("Reading points from {}", path);
    write_commands(BufReader::new(f), &path, config, out)
}

/// Writes the split command for every line of `reader`, stopping at the first
/// line that fails. Commands already written are left in `out`.
///
/// `source_name` only labels errors.
pub fn write_commands<R: BufRead, W: Write>(
    reader: R,
    source_name: &str,
    config: &Config,
    mut out: W,
) -> Result<usize, PointsError> {
    let mut count = 0;
    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let range = line.map_err(|source| PointsError::Read {
            path: source_name.to_string(),
            line: line_no,
            source,
        })?;
        let path_out = segment_name(line_no);
        let range = range.trim();
        let cmd = split_command(range, &config.input_file, &path_out, config.frame_rate)
            .map_err(|source| PointsError::Line {
                path: source_name.to_string(),
                line: line_no,
                source,
            })?;
        debug!("{}:{}: {} -> {}", source_name, line_no, range, path_out);
        writeln!(out, "{}", cmd).map_err(PointsError::Write)?;
        count += 1;
    }
    out.flush().map_err(PointsError::Write)?;
    info!("Wrote {} split commands from {}", count, source_name);
    Ok(count)
}
