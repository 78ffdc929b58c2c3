//! # avpipe - shared media-type contracts for streaming pipelines
//!
//! avpipe defines the data model that audio/video muxers, demuxers,
//! encoders, and decoders exchange: codec descriptors, encoded packets, and
//! decoded audio frames, plus the stage contracts ([`Muxer`], [`Demuxer`],
//! [`AudioEncoder`], [`AudioDecoder`], [`AudioResampler`]) that concrete
//! container and codec implementations satisfy to be interchangeable in a
//! shared pipeline.
//!
//! This crate performs no I/O and implements no compression.
//!
//! ## Key pieces
//!
//! - **Sample formats and channel layouts**: [`SampleFormat`] with derived
//!   byte widths, [`ChannelLayout`] as an open bitmask over speaker
//!   positions
//! - **Codec descriptors**: the [`CodecData`] capability hierarchy with
//!   concrete [`H264Descriptor`], [`AacDescriptor`], and PCM mu-law
//!   implementations
//! - **Packets and frames**: [`Packet`] as an opaque timed envelope,
//!   [`AudioFrame`] with checked zero-copy slicing and plane-wise
//!   concatenation
//!
//! ## Quick start
//!
//! ```rust
//! use avpipe::{AudioFrame, ChannelLayout, SampleFormat};
//! use bytes::Bytes;
//!
//! # fn main() -> Result<(), avpipe::AvError> {
//! let mut frame = AudioFrame {
//!     sample_rate: 8000,
//!     sample_format: SampleFormat::S16,
//!     channel_layout: ChannelLayout::MONO,
//!     sample_count: 4,
//!     data: vec![Bytes::from_static(&[0, 1, 2, 3, 4, 5, 6, 7])],
//! };
//!
//! // Zero-copy view of the last two samples.
//! let tail = frame.slice(2, 4)?;
//! assert_eq!(&tail.data[0][..], &[4, 5, 6, 7]);
//!
//! // Append it back; plane bytes are copied, the view stays valid.
//! frame.concat(&tail)?;
//! assert_eq!(frame.sample_count, 6);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]

pub use avpipe_core::{
    AacCodecData, AudioCodecData, AudioDecoder, AudioEncoder, AudioFrame, AudioResampler, AvError,
    AvResult, ChannelLayout, CheckedMuxer, CodecData, CodecType, Demuxer, ErrorCategory,
    GenericAudioCodecData, H264CodecData, MediaKind, Muxer, MuxerStage, Packet, SampleFormat,
    VideoCodecData,
};

pub use avpipe_codec::{new_pcm_mulaw_codec_data, AacDescriptor, H264Descriptor};
