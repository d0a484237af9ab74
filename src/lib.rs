use std::fmt;

use thiserror::Error;

pub mod points;
pub mod splitter;

pub use points::{run, segment_name, write_commands, Config, PointsError};
pub use splitter::{ffmpeg_args, split_command, SplitError};

const DELIMITER_TIMECODE: char = ':';

const SECONDS_HOUR: u64 = 60 * 60;
const SECONDS_MIN: u64 = 60;

/// Frames per second used when nothing else is asked for.
pub const FRAME_RATE: u32 = 25;

/// A nonzero number of frames per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRate(u32);

impl FrameRate {
    pub const PAL: FrameRate = FrameRate(FRAME_RATE);

    /// Returns `None` for zero.
    ///
    /// # Example
    ///
    /// ```
    /// assert!(splitpoints::FrameRate::new(0).is_none());
    /// assert_eq!(splitpoints::FrameRate::new(30).unwrap().get(), 30);
    /// ```
    pub fn new(fps: u32) -> Option<FrameRate> {
        (fps > 0).then_some(FrameRate(fps))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    fn per_second(self) -> u64 {
        u64::from(self.0)
    }

    // Widest frame field accepted when parsing: two digits, or more when
    // the rate needs them.
    fn frame_digits(self) -> usize {
        (self.0 - 1).to_string().len().max(2)
    }
}

impl Default for FrameRate {
    fn default() -> Self {
        FrameRate::PAL
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Broad category of a failure, for callers that branch on what went wrong
/// rather than on message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    FileOpen,
    /// Reading the points or writing the commands failed after opening.
    Io,
    Format,
    Range,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimecodeError {
    #[error("invalid timecode {input:?}: expected H:MM:SS:FF")]
    InvalidFormat { input: String },
    #[error("invalid timecode {input:?}: number too high")]
    InvalidRange { input: String },
}

impl TimecodeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TimecodeError::InvalidFormat { .. } => ErrorKind::Format,
            TimecodeError::InvalidRange { .. } => ErrorKind::Range,
        }
    }
}

/// A point in time as hour:minute:second:frame.
///
/// The frame rate is not stored; every conversion takes it explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timecode {
    pub hour: u64,
    pub minute: u32,
    pub second: u32,
    pub frame: u32,
}

impl Timecode {
    pub fn new(hour: u64, minute: u32, second: u32, frame: u32) -> Timecode {
        Timecode {
            hour,
            minute,
            second,
            frame,
        }
    }

    /// Parses a `H:MM:SS:FF` timecode.
    ///
    /// Fields are read as decimal, so a leading zero never means octal.
    ///
    /// # Example
    ///
    /// Basic usage
    ///
    /// ```
    /// use splitpoints::{FrameRate, Timecode};
    ///
    /// let tc = Timecode::parse("1:09:03:24", FrameRate::PAL);
    ///
    /// assert!(!tc.is_err());
    /// assert_eq!(tc.unwrap(), Timecode::new(1, 9, 3, 24));
    /// ```
    pub fn parse(input: &str, rate: FrameRate) -> Result<Timecode, TimecodeError> {
        let invalid_format = || TimecodeError::InvalidFormat {
            input: input.to_string(),
        };

        let parts = Vec::from_iter(input.split(DELIMITER_TIMECODE));
        let &[hour, minute, second, frame] = parts.as_slice() else {
            return Err(invalid_format());
        };

        let hour: u64 = parse_field(hour, usize::MAX).ok_or_else(invalid_format)?;
        let minute: u32 = parse_field(minute, 2).ok_or_else(invalid_format)?;
        let second: u32 = parse_field(second, 2).ok_or_else(invalid_format)?;
        let frame: u32 = parse_field(frame, rate.frame_digits()).ok_or_else(invalid_format)?;

        let tc = Timecode::new(hour, minute, second, frame);
        if minute >= 60 || second >= 60 || frame >= rate.get() || tc.frames(rate).is_none() {
            return Err(TimecodeError::InvalidRange {
                input: input.to_string(),
            });
        }
        Ok(tc)
    }

    /// Converts the timecode to a number of frames since `0:00:00:00`.
    ///
    /// Returns `None` when the count does not fit in a `u64`.
    ///
    /// # Example
    ///
    /// Basic usage
    ///
    /// ```
    /// use splitpoints::{FrameRate, Timecode};
    ///
    /// let frames = Timecode::new(0, 0, 1, 18).frames(FrameRate::PAL);
    ///
    /// assert_eq!(frames, Some(43));
    /// ```
    pub fn frames(&self, rate: FrameRate) -> Option<u64> {
        let secs = SECONDS_HOUR
            .checked_mul(self.hour)?
            .checked_add(SECONDS_MIN * u64::from(self.minute))?
            .checked_add(u64::from(self.second))?;
        rate.per_second()
            .checked_mul(secs)?
            .checked_add(u64::from(self.frame))
    }

    /// Converts a number of frames to a timecode.
    ///
    /// # Example
    ///
    /// Basic usage
    ///
    /// ```
    /// use splitpoints::{FrameRate, Timecode};
    ///
    /// let tc = Timecode::from_frames(15241, FrameRate::PAL);
    ///
    /// assert_eq!(tc, Timecode::new(0, 10, 9, 16));
    /// ```
    pub fn from_frames(frames: u64, rate: FrameRate) -> Timecode {
        let fps = rate.per_second();
        Timecode {
            hour: frames / (SECONDS_HOUR * fps),
            minute: ((frames / (SECONDS_MIN * fps)) % 60) as u32,
            second: ((frames / fps) % 60) as u32,
            frame: (frames % fps) as u32,
        }
    }

    /// Renders the timecode as `H:MM:SS.mmm`, truncating the frame to whole
    /// milliseconds.
    ///
    /// # Example
    ///
    /// Basic usage
    ///
    /// ```
    /// use splitpoints::{FrameRate, Timecode};
    ///
    /// let decimal = Timecode::new(1, 2, 3, 4).decimal(FrameRate::PAL);
    ///
    /// assert_eq!(decimal, "1:02:03.160");
    /// ```
    pub fn decimal(&self, rate: FrameRate) -> String {
        let msec = 1000 * u64::from(self.frame) / rate.per_second();
        format!(
            "{}:{:02}:{:02}.{:03}",
            self.hour, self.minute, self.second, msec
        )
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{:02}:{:02}:{:02}",
            self.hour, self.minute, self.second, self.frame
        )
    }
}

fn parse_field<T: std::str::FromStr>(field: &str, max_digits: usize) -> Option<T> {
    if field.is_empty() || field.len() > max_digits {
        return None;
    }
    if !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}
