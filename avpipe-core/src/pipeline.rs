//! Pipeline stage contracts
//!
//! The capability interfaces that concrete muxers, demuxers, and audio
//! transforms implement to be interchangeable in a shared pipeline. All
//! contracts here are synchronous; any blocking I/O is the concrete
//! implementation's business, not this layer's.
//!
//! Data flow: a [`Demuxer`] yields `(stream_index, Packet)` pairs plus the
//! descriptors of its streams; an [`AudioDecoder`] turns packets into
//! frames; an [`AudioResampler`] transforms frames; an [`AudioEncoder`]
//! turns frames back into packets; a [`Muxer`] consumes packets against the
//! stream descriptors it was given up front.

use crate::codec::{AudioCodecData, CodecData};
use crate::error::{AvError, AvResult};
use crate::frame::AudioFrame;
use crate::packet::Packet;
use std::fmt;
use std::sync::Arc;

/// Container writer contract.
///
/// Call order is `write_header` exactly once, then any number of
/// `write_packet` calls, then `write_trailer` exactly once. Implementations
/// should surface out-of-order calls as [`AvError::InvalidState`] rather
/// than corrupting output; [`CheckedMuxer`] does this for any inner muxer.
pub trait Muxer {
    /// Declare the streams this container will carry. Must be called exactly
    /// once, before any packet.
    fn write_header(&mut self, streams: &[Arc<dyn CodecData>]) -> AvResult<()>;

    /// Write one packet for the stream at `stream_index` (an index into the
    /// header's stream list).
    fn write_packet(&mut self, stream_index: usize, packet: Packet) -> AvResult<()>;

    /// Finalize the container. Must be the last write.
    fn write_trailer(&mut self) -> AvResult<()>;
}

/// Container reader contract
pub trait Demuxer {
    /// Descriptors of the streams in this container, indexed by the stream
    /// index that [`read_packet`](Demuxer::read_packet) reports. Stable once
    /// returned.
    fn streams(&mut self) -> AvResult<Vec<Arc<dyn CodecData>>>;

    /// Next packet in decode order, with the index of the stream it belongs
    /// to. Signals exhaustion with [`AvError::EndOfStream`], which callers
    /// must treat as a clean stop rather than a transport failure.
    fn read_packet(&mut self) -> AvResult<(usize, Packet)>;

    /// Total duration in seconds, 0 if not determinable up front
    fn duration(&self) -> f64;
}

/// Audio encoder contract.
///
/// Each call is an independent request/response transform. Flush/drain
/// semantics for buffered encoders are deliberately left out of this
/// contract for now.
pub trait AudioEncoder {
    /// Descriptor of the stream this encoder produces, for the muxer header
    fn codec_data(&self) -> Arc<dyn AudioCodecData>;

    /// Encode one frame into zero or more packets
    fn encode(&mut self, frame: AudioFrame) -> AvResult<Vec<Packet>>;
}

/// Audio decoder contract
pub trait AudioDecoder {
    /// Decode one packet into a frame
    fn decode(&mut self, packet: Packet) -> AvResult<AudioFrame>;
}

/// Audio resampler contract
pub trait AudioResampler {
    /// Transform one frame into another sample rate/format/layout
    fn resample(&mut self, frame: AudioFrame) -> AvResult<AudioFrame>;
}

/// Lifecycle stage of a muxer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MuxerStage {
    /// No header written yet
    Created,
    /// Header written, packets may be written
    HeaderWritten,
    /// Trailer written, the muxer is finished
    TrailerWritten,
}

impl fmt::Display for MuxerStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MuxerStage::Created => "Created",
            MuxerStage::HeaderWritten => "HeaderWritten",
            MuxerStage::TrailerWritten => "TrailerWritten",
        };
        f.write_str(name)
    }
}

/// Wrapper enforcing the muxer call-order state machine for any inner
/// [`Muxer`].
///
/// Rejects a second header, packets before the header or after the trailer,
/// and packets whose stream index was not declared in the header, before the
/// inner muxer ever sees them.
#[derive(Debug)]
pub struct CheckedMuxer<M> {
    inner: M,
    stage: MuxerStage,
    stream_count: usize,
}

impl<M: Muxer> CheckedMuxer<M> {
    /// Wrap a muxer in call-order checking
    pub fn new(inner: M) -> Self {
        Self {
            inner,
            stage: MuxerStage::Created,
            stream_count: 0,
        }
    }

    /// Current lifecycle stage
    pub fn stage(&self) -> MuxerStage {
        self.stage
    }

    /// Unwrap the inner muxer
    pub fn into_inner(self) -> M {
        self.inner
    }

    fn expect_stage(&self, expected: MuxerStage) -> AvResult<()> {
        if self.stage != expected {
            return Err(AvError::InvalidState {
                expected: expected.to_string(),
                actual: self.stage.to_string(),
            });
        }
        Ok(())
    }
}

impl<M: Muxer> Muxer for CheckedMuxer<M> {
    fn write_header(&mut self, streams: &[Arc<dyn CodecData>]) -> AvResult<()> {
        self.expect_stage(MuxerStage::Created)?;
        self.inner.write_header(streams)?;
        self.stage = MuxerStage::HeaderWritten;
        self.stream_count = streams.len();
        tracing::debug!(streams = self.stream_count, "muxer header written");
        Ok(())
    }

    fn write_packet(&mut self, stream_index: usize, packet: Packet) -> AvResult<()> {
        self.expect_stage(MuxerStage::HeaderWritten)?;
        if stream_index >= self.stream_count {
            return Err(AvError::UnknownStream {
                index: stream_index,
                count: self.stream_count,
            });
        }
        self.inner.write_packet(stream_index, packet)
    }

    fn write_trailer(&mut self) -> AvResult<()> {
        self.expect_stage(MuxerStage::HeaderWritten)?;
        self.inner.write_trailer()?;
        self.stage = MuxerStage::TrailerWritten;
        tracing::debug!("muxer trailer written");
        Ok(())
    }
}
