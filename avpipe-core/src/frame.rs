//! Decoded audio frame representation
//!
//! An [`AudioFrame`] holds raw sample planes plus the format triple a
//! consumer needs to interpret them. Slicing produces zero-copy views that
//! share the source planes' backing storage; concatenation rebuilds the
//! receiver's planes, so it may reallocate.
//!
//! The type does not enforce that the plane count matches the sample
//! format's planar-ness; callers keep `data.len()` consistent with
//! [`SampleFormat::is_planar`] (one plane interleaved, one plane per channel
//! planar).

use crate::error::{AvError, AvResult};
use crate::layout::ChannelLayout;
use crate::sample::SampleFormat;
use bytes::{BufMut, Bytes, BytesMut};

/// One timed unit of decoded multi-plane sample data
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AudioFrame {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Sample encoding of every plane
    pub sample_format: SampleFormat,
    /// Speaker layout
    pub channel_layout: ChannelLayout,
    /// Number of samples per channel
    pub sample_count: usize,
    /// Sample planes: one for interleaved formats, one per channel for planar
    pub data: Vec<Bytes>,
}

impl AudioFrame {
    /// True iff `other` has the same sample rate, channel layout, and sample
    /// format. This is strict mask equality: two layouts with equal channel
    /// counts but different speaker assignments do not match.
    pub fn has_same_format(&self, other: &AudioFrame) -> bool {
        self.sample_rate == other.sample_rate
            && self.channel_layout == other.channel_layout
            && self.sample_format == other.sample_format
    }

    /// Duration of this frame in seconds, 0 if the sample rate is unset
    pub fn duration(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.sample_count as f64 / self.sample_rate as f64
    }

    /// View of the sample range `[start, end)`.
    ///
    /// Every plane of the result aliases the source plane's backing storage;
    /// no sample bytes are copied. Fails with
    /// [`AvError::SliceOutOfRange`] when the range does not satisfy
    /// `start <= end <= sample_count` or the byte stride overflows, and with
    /// [`AvError::UnknownSampleFormat`] when the format has no defined
    /// sample width.
    pub fn slice(&self, start: usize, end: usize) -> AvResult<AudioFrame> {
        if start > end || end > self.sample_count {
            return Err(AvError::SliceOutOfRange {
                start,
                end,
                len: self.sample_count,
            });
        }

        let size = self.sample_format.bytes_per_sample();
        if size == 0 {
            return Err(AvError::UnknownSampleFormat {
                format: self.sample_format.to_string(),
            });
        }

        let byte_start = start.checked_mul(size).ok_or(AvError::SliceOutOfRange {
            start,
            end,
            len: self.sample_count,
        })?;
        let byte_end = end.checked_mul(size).ok_or(AvError::SliceOutOfRange {
            start,
            end,
            len: self.sample_count,
        })?;

        let mut planes = Vec::with_capacity(self.data.len());
        for (index, plane) in self.data.iter().enumerate() {
            if plane.len() < byte_end {
                return Err(AvError::ShortPlane {
                    plane: index,
                    needed: byte_end,
                    available: plane.len(),
                });
            }
            planes.push(plane.slice(byte_start..byte_end));
        }

        Ok(AudioFrame {
            sample_count: end - start,
            data: planes,
            ..*self
        })
    }

    /// Append `other`'s samples after this frame's, plane by plane.
    ///
    /// Requires [`has_same_format`](AudioFrame::has_same_format) and an equal
    /// plane count; a mismatch fails without touching the receiver. The
    /// receiver's planes are rebuilt, so its storage no longer aliases
    /// whatever the planes previously shared.
    pub fn concat(&mut self, other: &AudioFrame) -> AvResult<()> {
        if !self.has_same_format(other) {
            return Err(AvError::FormatMismatch {
                expected: self.format_summary(),
                actual: other.format_summary(),
            });
        }
        if self.data.len() != other.data.len() {
            return Err(AvError::PlaneCountMismatch {
                expected: self.data.len(),
                actual: other.data.len(),
            });
        }

        for (plane, incoming) in self.data.iter_mut().zip(other.data.iter()) {
            let mut grown = BytesMut::with_capacity(plane.len() + incoming.len());
            grown.put_slice(plane);
            grown.put_slice(incoming);
            *plane = grown.freeze();
        }
        self.sample_count += other.sample_count;
        Ok(())
    }

    fn format_summary(&self) -> String {
        format!(
            "{} Hz {} {}",
            self.sample_rate, self.channel_layout, self.sample_format
        )
    }
}
