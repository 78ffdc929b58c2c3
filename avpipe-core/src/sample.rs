//! Sample format registry
//!
//! A closed enumeration of raw audio sample encodings with derived
//! properties: byte width, planar-ness, and a debug display name. These are
//! advisory queries with no failure mode; the sentinel [`SampleFormat::Unknown`]
//! answers width 0 and display `"?"`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw audio sample encoding
///
/// Interleaved formats store all channels in a single plane; planar formats
/// store one plane per channel. Which of the two a frame actually uses is
/// reported by [`SampleFormat::is_planar`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SampleFormat {
    /// Unrecognized or not-yet-negotiated format
    #[default]
    Unknown,
    /// Unsigned 8-bit, interleaved
    U8,
    /// Signed 16-bit, interleaved
    S16,
    /// Signed 32-bit, interleaved
    S32,
    /// 32-bit float, interleaved
    Flt,
    /// 64-bit float, interleaved
    Dbl,
    /// Unsigned 8-bit, planar
    U8p,
    /// Signed 16-bit, planar
    S16p,
    /// Signed 32-bit, planar
    S32p,
    /// 32-bit float, planar
    Fltp,
    /// 64-bit float, planar
    Dblp,
    /// Unsigned 32-bit, interleaved
    U32,
}

impl SampleFormat {
    /// Width of a single sample in bytes.
    ///
    /// Total over the enumeration; [`SampleFormat::Unknown`] answers 0,
    /// meaning byte offsets cannot be computed for it.
    pub fn bytes_per_sample(&self) -> usize {
        match self {
            SampleFormat::U8 | SampleFormat::U8p => 1,
            SampleFormat::S16 | SampleFormat::S16p => 2,
            SampleFormat::Flt
            | SampleFormat::Fltp
            | SampleFormat::S32
            | SampleFormat::S32p
            | SampleFormat::U32 => 4,
            SampleFormat::Dbl | SampleFormat::Dblp => 8,
            SampleFormat::Unknown => 0,
        }
    }

    /// True iff samples are stored one plane per channel.
    pub fn is_planar(&self) -> bool {
        matches!(
            self,
            SampleFormat::U8p
                | SampleFormat::S16p
                | SampleFormat::S32p
                | SampleFormat::Fltp
                | SampleFormat::Dblp
        )
    }
}

impl fmt::Display for SampleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SampleFormat::U8 => "U8",
            SampleFormat::S16 => "S16",
            SampleFormat::S32 => "S32",
            SampleFormat::Flt => "FLT",
            SampleFormat::Dbl => "DBL",
            SampleFormat::U8p => "U8P",
            SampleFormat::S16p => "S16P",
            SampleFormat::S32p => "S32P",
            SampleFormat::Fltp => "FLTP",
            SampleFormat::Dblp => "DBLP",
            SampleFormat::U32 => "U32",
            SampleFormat::Unknown => "?",
        };
        f.write_str(name)
    }
}
