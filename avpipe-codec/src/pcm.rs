//! PCM descriptors
//!
//! Mu-law has no out-of-band configuration payload, so its descriptor is a
//! [`GenericAudioCodecData`] with fixed telephony parameters.

use avpipe_core::{ChannelLayout, CodecType, GenericAudioCodecData, SampleFormat};

/// Descriptor for a PCM mu-law stream: 16-bit signed samples after decode,
/// mono, 8000 Hz.
pub fn new_pcm_mulaw_codec_data() -> GenericAudioCodecData {
    GenericAudioCodecData::new(
        CodecType::PCM_MULAW,
        8000,
        ChannelLayout::MONO,
        SampleFormat::S16,
    )
}
