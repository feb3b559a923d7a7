//! SMPTE-style `HH:MM:SS:FF` timecodes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// A validated timecode.
///
/// Drop-frame timecodes (`;` before the frame field) are accepted and the
/// separator is preserved, but frame arithmetic treats them as non-drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timecode {
    hours: u8,
    minutes: u8,
    seconds: u8,
    frames: u8,
    drop_frame: bool,
}

impl Timecode {
    pub const ZERO: Timecode = Timecode {
        hours: 0,
        minutes: 0,
        seconds: 0,
        frames: 0,
        drop_frame: false,
    };

    pub fn new(hours: u8, minutes: u8, seconds: u8, frames: u8) -> Result<Self, String> {
        if hours >= 24 || minutes >= 60 || seconds >= 60 || frames >= 100 {
            return Err(format!(
                "Timecode out of range: {:02}:{:02}:{:02}:{:02}",
                hours, minutes, seconds, frames
            ));
        }
        Ok(Self {
            hours,
            minutes,
            seconds,
            frames,
            drop_frame: false,
        })
    }

    /// Absolute frame count since midnight at a nominal frame rate.
    pub fn to_frames(&self, frame_rate: u32) -> u64 {
        let seconds =
            self.hours as u64 * 3600 + self.minutes as u64 * 60 + self.seconds as u64;
        seconds * frame_rate as u64 + self.frames as u64
    }

    /// True when the frame field is a valid frame index at `frame_rate`.
    pub fn fits_frame_rate(&self, frame_rate: u32) -> bool {
        (self.frames as u32) < frame_rate
    }

    /// Seconds elapsed from `self` to `end`, wrapping past midnight.
    ///
    /// Frame fields beyond `frame_rate` still yield a duration within one day.
    pub fn seconds_until(&self, end: &Timecode, frame_rate: u32) -> f64 {
        if frame_rate == 0 {
            return 0.0;
        }
        let day = SECONDS_PER_DAY * frame_rate as i64;
        let start = self.to_frames(frame_rate) as i64;
        let stop = end.to_frames(frame_rate) as i64;
        let elapsed = (stop - start).rem_euclid(day);
        elapsed as f64 / frame_rate as f64
    }

    pub fn is_drop_frame(&self) -> bool {
        self.drop_frame
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.drop_frame { ';' } else { ':' };
        write!(
            f,
            "{:02}:{:02}:{:02}{}{:02}",
            self.hours, self.minutes, self.seconds, sep, self.frames
        )
    }
}

impl FromStr for Timecode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let malformed = || format!("Invalid timecode '{}' (expected HH:MM:SS:FF)", s);

        let bytes = s.as_bytes();
        if bytes.len() != 11 || bytes[2] != b':' || bytes[5] != b':' {
            return Err(malformed());
        }
        let drop_frame = match bytes[8] {
            b':' => false,
            b';' => true,
            _ => return Err(malformed()),
        };

        let field = |start: usize| -> Result<u8, String> {
            let digits = &s[start..start + 2];
            if !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(malformed());
            }
            digits.parse::<u8>().map_err(|_| malformed())
        };

        let mut tc = Timecode::new(field(0)?, field(3)?, field(6)?, field(9)?)?;
        tc.drop_frame = drop_frame;
        Ok(tc)
    }
}

impl TryFrom<String> for Timecode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Timecode> for String {
    fn from(tc: Timecode) -> Self {
        tc.to_string()
    }
}
