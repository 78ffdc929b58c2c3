//! # avpipe core
//!
//! The shared media data model for audio/video streaming pipelines: sample
//! formats, channel layouts, codec descriptors, encoded packets, decoded
//! audio frames, and the stage contracts ([`Muxer`], [`Demuxer`],
//! [`AudioEncoder`], [`AudioDecoder`], [`AudioResampler`]) that concrete
//! container and codec implementations plug into.
//!
//! This crate performs no I/O and implements no compression; it is the
//! contract every other pipeline component is built against.

#![warn(clippy::all)]

pub mod codec;
pub mod error;
pub mod frame;
pub mod layout;
pub mod packet;
pub mod pipeline;
pub mod sample;

pub use codec::{
    AacCodecData, AudioCodecData, CodecData, CodecType, GenericAudioCodecData, H264CodecData,
    MediaKind, VideoCodecData,
};
pub use error::{AvError, AvResult, ErrorCategory};
pub use frame::AudioFrame;
pub use layout::ChannelLayout;
pub use packet::Packet;
pub use pipeline::{
    AudioDecoder, AudioEncoder, AudioResampler, CheckedMuxer, Demuxer, Muxer, MuxerStage,
};
pub use sample::SampleFormat;
