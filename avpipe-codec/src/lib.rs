//! # avpipe codec descriptors
//!
//! Concrete codec descriptors for the predefined codec families: H.264
//! (AVCDecoderConfigurationRecord parsing, SPS/PPS access, picture
//! dimensions), AAC (AudioSpecificConfig parsing, ADTS header synthesis),
//! and PCM mu-law. Each implements the descriptor traits from
//! [`avpipe_core`]; this crate never touches packet payloads.

#![warn(clippy::all)]

mod bits;

pub mod aac;
pub mod h264;
pub mod pcm;

pub use aac::AacDescriptor;
pub use h264::H264Descriptor;
pub use pcm::new_pcm_mulaw_codec_data;
