use thiserror::Error;

use crate::{ErrorKind, FrameRate, Timecode, TimecodeError};

const DELIMITER_RANGE: char = '-';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitError {
    #[error("expected START-END")]
    ExpectedStartEnd { segments: usize },
    #[error("invalid start time")]
    Start(#[source] TimecodeError),
    #[error("invalid end time")]
    End(#[source] TimecodeError),
    #[error("end time {end} is before start time {start}")]
    EndBeforeStart { start: Timecode, end: Timecode },
}

impl SplitError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SplitError::ExpectedStartEnd { .. } => ErrorKind::Format,
            SplitError::Start(err) | SplitError::End(err) => err.kind(),
            SplitError::EndBeforeStart { .. } => ErrorKind::Range,
        }
    }
}

/// Builds the ffmpeg command that copies the `START-END` range of `path_in`
/// into `path_out` without re-encoding.
///
/// `-to` receives the length of the segment: with `-ss` placed before `-i`,
/// ffmpeg measures it from the seek point.
pub fn split_command(
    range: &str,
    path_in: &str,
    path_out: &str,
    rate: FrameRate,
) -> Result<String, SplitError> {
    let segments = Vec::from_iter(range.split(DELIMITER_RANGE));
    let &[start, end] = segments.as_slice() else {
        return Err(SplitError::ExpectedStartEnd {
            segments: segments.len(),
        });
    };
    let (start, start_frames) = parse_point(start, rate).map_err(SplitError::Start)?;
    let (end, end_frames) = parse_point(end, rate).map_err(SplitError::End)?;

    let frames = end_frames
        .checked_sub(start_frames)
        .ok_or(SplitError::EndBeforeStart { start, end })?;
    let length = Timecode::from_frames(frames, rate);

    let args = ffmpeg_args(&start.decimal(rate), path_in, &length.decimal(rate), path_out);
    Ok(format!("ffmpeg {}", args.join(" ")))
}

fn parse_point(input: &str, rate: FrameRate) -> Result<(Timecode, u64), TimecodeError> {
    let tc = Timecode::parse(input, rate)?;
    let frames = tc.frames(rate).ok_or_else(|| TimecodeError::InvalidRange {
        input: input.to_string(),
    })?;
    Ok((tc, frames))
}

pub fn ffmpeg_args(start: &str, path_in: &str, length: &str, path_out: &str) -> Vec<String> {
    vec![
        String::from("-ss"),
        String::from(start),
        String::from("-i"),
        String::from(path_in),
        String::from("-to"),
        String::from(length),
        String::from("-c"),
        String::from("copy"),
        String::from(path_out),
    ]
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    fn split(range: &str) -> Result<String, SplitError> {
        split_command(range, "input.mov", "output.mov", FrameRate::PAL)
    }

    #[test]
    fn builds_commands() {
        assert_eq!(
            split("00:00:01:18-00:10:11:09").unwrap(),
            "ffmpeg -ss 0:00:01.720 -i input.mov -to 0:10:09.640 -c copy output.mov"
        );
        assert_eq!(
            split("00:10:11:10-00:28:46:15").unwrap(),
            "ffmpeg -ss 0:10:11.400 -i input.mov -to 0:18:35.200 -c copy output.mov"
        );
    }

    #[test]
    fn empty_range_has_zero_length() {
        assert_eq!(
            split("0:00:05:00-0:00:05:00").unwrap(),
            "ffmpeg -ss 0:00:05.000 -i input.mov -to 0:00:00.000 -c copy output.mov"
        );
    }

    #[test]
    fn requires_exactly_two_timecodes() {
        for range in ["00:00:01:18", "00:00:01:18-00:00:02:00-00:00:03:00", ""] {
            let err = split(range).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Format, "splitting {range:?}");
            assert_eq!(err.to_string(), "expected START-END");
        }
        assert_eq!(
            split("1:00:00:00").unwrap_err(),
            SplitError::ExpectedStartEnd { segments: 1 }
        );
    }

    #[test]
    fn reports_which_side_failed() {
        let err = split("1:09:93:22-2:00:00:00").unwrap_err();
        assert!(matches!(err, SplitError::Start(_)));
        assert_eq!(err.kind(), ErrorKind::Range);
        assert_eq!(err.to_string(), "invalid start time");
        assert_eq!(
            err.source().unwrap().to_string(),
            r#"invalid timecode "1:09:93:22": number too high"#
        );

        let err = split("0:00:00:00-0:00:xx:00").unwrap_err();
        assert!(matches!(err, SplitError::End(_)));
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn rejects_hours_too_large_to_count() {
        let err = split("99999999999999999:00:00:00-99999999999999999:00:00:01").unwrap_err();
        assert!(matches!(err, SplitError::Start(TimecodeError::InvalidRange { .. })));
        assert_eq!(err.kind(), ErrorKind::Range);
    }

    #[test]
    fn rejects_end_before_start() {
        let err = split("0:00:02:00-0:00:01:24").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
        assert_eq!(
            err.to_string(),
            "end time 0:00:01:24 is before start time 0:00:02:00"
        );
    }

    #[test]
    fn uses_given_frame_rate() {
        let rate = FrameRate::new(30).unwrap();
        assert_eq!(
            split_command("0:00:00:15-0:00:01:00", "in.mkv", "out.mkv", rate).unwrap(),
            "ffmpeg -ss 0:00:00.500 -i in.mkv -to 0:00:00.500 -c copy out.mkv"
        );
    }
}
