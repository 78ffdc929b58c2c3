//! Codec descriptor hierarchy
//!
//! A codec descriptor carries the out-of-band metadata for one elementary
//! stream: what codec family it is, whether it is audio or video, and the
//! family-specific configuration a decoder needs before the first packet
//! arrives. Descriptors are constructed once at stream-header time by a
//! demuxer or encoder and held immutably for the stream's lifetime.
//!
//! The hierarchy is expressed as capability queries rather than downcasts:
//! any [`CodecData`] can be asked for its audio, video, H.264, or AAC view,
//! and gets `None` back when the capability is absent.

use crate::error::AvResult;
use crate::layout::ChannelLayout;
use crate::sample::SampleFormat;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Codec family tag
///
/// Three values are reserved here; everything at or above
/// [`CodecType::PRIVATE_BASE`] is open to external codec families. External
/// families must not reuse the reserved values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CodecType(u32);

impl CodecType {
    /// H.264 / AVC video
    pub const H264: CodecType = CodecType(0x264);
    /// AAC audio
    pub const AAC: CodecType = CodecType(0x265);
    /// PCM mu-law audio
    pub const PCM_MULAW: CodecType = CodecType(0x266);

    /// First tag value available to external codec families
    pub const PRIVATE_BASE: u32 = 0x1000;

    /// Build a tag for an external codec family.
    ///
    /// Callers should pick values at or above [`CodecType::PRIVATE_BASE`];
    /// reusing a reserved tag makes streams indistinguishable from the
    /// predefined families.
    pub const fn new(tag: u32) -> CodecType {
        CodecType(tag)
    }

    /// Raw numeric tag
    pub const fn tag(&self) -> u32 {
        self.0
    }

    /// True for the tags reserved by this crate
    pub const fn is_reserved(&self) -> bool {
        matches!(*self, CodecType::H264 | CodecType::AAC | CodecType::PCM_MULAW)
    }
}

impl fmt::Display for CodecType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            CodecType::H264 => f.write_str("H264"),
            CodecType::AAC => f.write_str("AAC"),
            CodecType::PCM_MULAW => f.write_str("PCM_MULAW"),
            CodecType(tag) => write!(f, "CodecType({:#x})", tag),
        }
    }
}

/// Whether a descriptor describes an audio or a video stream.
///
/// Every descriptor is exactly one of the two; there is no "neither" or
/// "both" state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaKind {
    /// Audio elementary stream
    Audio,
    /// Video elementary stream
    Video,
}

/// Common contract of every codec descriptor
pub trait CodecData: fmt::Debug + Send + Sync {
    /// Codec family tag of this stream
    fn codec_type(&self) -> CodecType;

    /// Whether this stream is audio or video
    fn kind(&self) -> MediaKind;

    /// True iff this descriptor describes an audio stream
    fn is_audio(&self) -> bool {
        self.kind() == MediaKind::Audio
    }

    /// True iff this descriptor describes a video stream
    fn is_video(&self) -> bool {
        self.kind() == MediaKind::Video
    }

    /// Audio capability view, if this descriptor has one
    fn as_audio(&self) -> Option<&dyn AudioCodecData> {
        None
    }

    /// Video capability view, if this descriptor has one
    fn as_video(&self) -> Option<&dyn VideoCodecData> {
        None
    }

    /// H.264 capability view, if this descriptor has one
    fn as_h264(&self) -> Option<&dyn H264CodecData> {
        None
    }

    /// AAC capability view, if this descriptor has one
    fn as_aac(&self) -> Option<&dyn AacCodecData> {
        None
    }
}

/// Capability contract of video stream descriptors
pub trait VideoCodecData: CodecData {
    /// Coded picture width in pixels
    fn width(&self) -> u32;

    /// Coded picture height in pixels
    fn height(&self) -> u32;
}

/// Capability contract of audio stream descriptors
pub trait AudioCodecData: CodecData {
    /// Sample encoding the decoder produces
    fn sample_format(&self) -> SampleFormat;

    /// Sample rate in Hz
    fn sample_rate(&self) -> u32;

    /// Speaker layout
    fn channel_layout(&self) -> ChannelLayout;
}

/// H.264-specific descriptor contract
pub trait H264CodecData: VideoCodecData {
    /// Raw AVCDecoderConfigurationRecord bytes (ISO/IEC 14496-15)
    fn avc_decoder_config_bytes(&self) -> &[u8];

    /// Sequence parameter set NAL unit payload, without length framing
    fn sps(&self) -> &[u8];

    /// Picture parameter set NAL unit payload, without length framing
    fn pps(&self) -> &[u8];
}

/// AAC-specific descriptor contract
pub trait AacCodecData: AudioCodecData {
    /// Raw MPEG-4 AudioSpecificConfig bytes (ISO/IEC 14496-3)
    fn mpeg4_audio_config_bytes(&self) -> &[u8];

    /// Synthesize the 7-byte ADTS header for a raw AAC payload.
    ///
    /// `samples` is the per-channel sample count covered by the payload
    /// (normally 1024), `payload_len` the raw payload length in bytes,
    /// excluding the header itself. The encoded fields follow this
    /// descriptor's own rate and channel configuration, so any ADTS-aware
    /// consumer can parse the header standalone. Fails with
    /// [`AvError::InvalidCodecData`](crate::error::AvError::InvalidCodecData)
    /// when the payload or configuration cannot be represented in ADTS
    /// fields: the frame length is 13 bits wide, the profile covers object
    /// types 1 through 4 only, and an explicit (escaped) sample rate has no
    /// sampling index.
    fn make_adts_header(&self, samples: usize, payload_len: usize) -> AvResult<Vec<u8>>;
}

/// Audio descriptor for codec families with no out-of-band configuration
/// payload, such as PCM mu-law. Stores exactly the four audio fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericAudioCodecData {
    codec_type: CodecType,
    sample_rate: u32,
    channel_layout: ChannelLayout,
    sample_format: SampleFormat,
}

impl GenericAudioCodecData {
    /// Create a generic audio descriptor
    pub fn new(
        codec_type: CodecType,
        sample_rate: u32,
        channel_layout: ChannelLayout,
        sample_format: SampleFormat,
    ) -> Self {
        Self {
            codec_type,
            sample_rate,
            channel_layout,
            sample_format,
        }
    }
}

impl CodecData for GenericAudioCodecData {
    fn codec_type(&self) -> CodecType {
        self.codec_type
    }

    fn kind(&self) -> MediaKind {
        MediaKind::Audio
    }

    fn as_audio(&self) -> Option<&dyn AudioCodecData> {
        Some(self)
    }
}

impl AudioCodecData for GenericAudioCodecData {
    fn sample_format(&self) -> SampleFormat {
        self.sample_format
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn channel_layout(&self) -> ChannelLayout {
        self.channel_layout
    }
}
