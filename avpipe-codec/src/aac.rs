//! AAC stream descriptor
//!
//! Built from the MPEG-4 AudioSpecificConfig (ISO/IEC 14496-3) a demuxer
//! finds in the container header. Besides the audio format triple, the
//! descriptor can synthesize the 7-byte ADTS header that wraps a raw AAC
//! payload for transport-stream style consumers.

use crate::bits::BitReader;
use avpipe_core::{
    AacCodecData, AudioCodecData, AvError, AvResult, ChannelLayout, CodecData, CodecType,
    MediaKind, SampleFormat,
};
use bytes::Bytes;

const SAMPLE_RATES: [u32; 13] = [
    96000, 88200, 64000, 48000, 44100, 32000, 24000, 22050, 16000, 12000, 11025, 8000, 7350,
];

// Speaker layouts for channel configurations 1..=7.
const CHANNEL_LAYOUTS: [ChannelLayout; 7] = [
    ChannelLayout::FRONT_CENTER,
    ChannelLayout::STEREO,
    ChannelLayout::SURROUND,
    ChannelLayout::FOUR_POINT_ZERO,
    ChannelLayout::FIVE_POINT_ZERO,
    ChannelLayout::FIVE_POINT_ONE,
    ChannelLayout::from_bits(
        ChannelLayout::SURROUND.bits()
            | ChannelLayout::SIDE_LEFT.bits()
            | ChannelLayout::SIDE_RIGHT.bits()
            | ChannelLayout::BACK_LEFT.bits()
            | ChannelLayout::BACK_RIGHT.bits()
            | ChannelLayout::LOW_FREQUENCY.bits(),
    ),
];

/// Descriptor of one AAC elementary stream
#[derive(Debug, Clone)]
pub struct AacDescriptor {
    config: Bytes,
    object_type: u32,
    sample_rate_index: u32,
    sample_rate: u32,
    channel_config: u32,
    channel_layout: ChannelLayout,
}

fn bad(reason: impl Into<String>) -> AvError {
    AvError::InvalidCodecData {
        codec: "AAC".to_string(),
        reason: reason.into(),
    }
}

impl AacDescriptor {
    /// Parse an MPEG-4 AudioSpecificConfig into a descriptor
    pub fn from_mpeg4_audio_config(config: impl Into<Bytes>) -> AvResult<Self> {
        let config: Bytes = config.into();
        let truncated = || bad("truncated AudioSpecificConfig");
        let mut r = BitReader::new(&config);

        let mut object_type = r.read_bits(5).ok_or_else(truncated)?;
        if object_type == 31 {
            object_type = 32 + r.read_bits(6).ok_or_else(truncated)?;
        }
        if object_type == 0 {
            return Err(bad("audio object type 0"));
        }

        let sample_rate_index = r.read_bits(4).ok_or_else(truncated)?;
        let sample_rate = if sample_rate_index == 0xf {
            r.read_bits(24).ok_or_else(truncated)?
        } else {
            *SAMPLE_RATES
                .get(sample_rate_index as usize)
                .ok_or_else(|| bad(format!("reserved sample rate index {}", sample_rate_index)))?
        };

        let channel_config = r.read_bits(4).ok_or_else(truncated)?;
        let channel_layout = *CHANNEL_LAYOUTS
            .get(channel_config.wrapping_sub(1) as usize)
            .ok_or_else(|| bad(format!("unsupported channel configuration {}", channel_config)))?;

        tracing::debug!(
            object_type,
            sample_rate,
            channel_config,
            "parsed MPEG-4 AudioSpecificConfig"
        );

        Ok(Self {
            config,
            object_type,
            sample_rate_index,
            sample_rate,
            channel_config,
            channel_layout,
        })
    }

    /// MPEG-4 audio object type (2 for AAC-LC)
    pub fn object_type(&self) -> u32 {
        self.object_type
    }

    /// Channel configuration field from the config (1..=7)
    pub fn channel_config(&self) -> u32 {
        self.channel_config
    }
}

impl CodecData for AacDescriptor {
    fn codec_type(&self) -> CodecType {
        CodecType::AAC
    }

    fn kind(&self) -> MediaKind {
        MediaKind::Audio
    }

    fn as_audio(&self) -> Option<&dyn AudioCodecData> {
        Some(self)
    }

    fn as_aac(&self) -> Option<&dyn AacCodecData> {
        Some(self)
    }
}

impl AudioCodecData for AacDescriptor {
    fn sample_format(&self) -> SampleFormat {
        // AAC decoders emit planar float.
        SampleFormat::Fltp
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn channel_layout(&self) -> ChannelLayout {
        self.channel_layout
    }
}

impl AacCodecData for AacDescriptor {
    fn mpeg4_audio_config_bytes(&self) -> &[u8] {
        &self.config
    }

    fn make_adts_header(&self, samples: usize, payload_len: usize) -> AvResult<Vec<u8>> {
        // AAAAAAAA AAAABCCD EEFFFFGH HHIJKLMM MMMMMMMM MMMOOOOO OOOOOOPP
        let frame_len = payload_len + 7;
        if frame_len > 0x1fff {
            return Err(bad(format!(
                "payload of {} bytes overflows the 13-bit ADTS frame length",
                payload_len
            )));
        }
        // The 2-bit profile field encodes object types 1..=4 only.
        if !(1..=4).contains(&self.object_type) {
            return Err(bad(format!(
                "audio object type {} has no ADTS profile",
                self.object_type
            )));
        }
        // Index 15 is the config-level rate escape; ADTS has no equivalent.
        if self.sample_rate_index == 0xf {
            return Err(bad(format!(
                "explicit sample rate {} Hz has no ADTS sampling index",
                self.sample_rate
            )));
        }
        let raw_blocks = (samples / 1024).max(1) - 1;

        let mut header = vec![0u8; 7];
        header[0] = 0xff;
        header[1] = 0xf1; // MPEG-4, layer 0, no CRC
        header[2] = ((self.object_type as u8 - 1) & 0x3) << 6
            | (self.sample_rate_index as u8 & 0xf) << 2
            | (self.channel_config >> 2) as u8 & 0x1;
        header[3] = ((self.channel_config & 0x3) as u8) << 6 | (frame_len >> 11) as u8 & 0x3;
        header[4] = (frame_len >> 3) as u8;
        header[5] = ((frame_len & 0x7) as u8) << 5 | 0x1f;
        header[6] = 0xfc | raw_blocks as u8 & 0x3;
        Ok(header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // AAC-LC, 44100 Hz, stereo
    const ASC_LC_44100_STEREO: [u8; 2] = [0x12, 0x10];

    #[test]
    fn test_parses_audio_specific_config() {
        let codec = AacDescriptor::from_mpeg4_audio_config(&ASC_LC_44100_STEREO[..]).unwrap();

        assert_eq!(codec.object_type(), 2);
        assert_eq!(codec.sample_rate(), 44100);
        assert_eq!(codec.channel_config(), 2);
        assert_eq!(codec.channel_layout(), ChannelLayout::STEREO);
        assert_eq!(codec.sample_format(), SampleFormat::Fltp);
        assert_eq!(codec.mpeg4_audio_config_bytes(), &ASC_LC_44100_STEREO[..]);
    }

    #[test]
    fn test_capability_queries() {
        let codec = AacDescriptor::from_mpeg4_audio_config(&ASC_LC_44100_STEREO[..]).unwrap();

        assert_eq!(codec.codec_type(), CodecType::AAC);
        assert!(codec.is_audio());
        assert!(!codec.is_video());
        assert!(codec.as_audio().is_some());
        assert!(codec.as_aac().is_some());
        assert!(codec.as_video().is_none());
        assert!(codec.as_h264().is_none());
    }

    #[test]
    fn test_adts_header_fields() {
        let codec = AacDescriptor::from_mpeg4_audio_config(&ASC_LC_44100_STEREO[..]).unwrap();
        let header = codec.make_adts_header(1024, 100).unwrap();

        assert_eq!(header, vec![0xff, 0xf1, 0x50, 0x80, 0x0d, 0x7f, 0xfc]);

        // A standalone ADTS consumer can recover the frame length.
        let frame_len =
            ((header[3] as usize & 0x3) << 11) | ((header[4] as usize) << 3) | (header[5] as usize >> 5);
        assert_eq!(frame_len, 107);
    }

    #[test]
    fn test_adts_header_mono_8k() {
        // AAC-LC, 8000 Hz (index 11), mono: 00010 1011 0001 000 -> 0x15 0x88
        let codec = AacDescriptor::from_mpeg4_audio_config(vec![0x15, 0x88]).unwrap();
        assert_eq!(codec.sample_rate(), 8000);
        assert_eq!(codec.channel_layout(), ChannelLayout::MONO);

        let header = codec.make_adts_header(1024, 9).unwrap();
        assert_eq!(header[0], 0xff);
        // Sample rate index 11, channel config 1.
        assert_eq!(header[2], 0x40 | (11 << 2));
        assert_eq!(header[3] >> 6, 1);
        // Frame length 16 = 9 + 7.
        assert_eq!((header[4] as usize) << 3 | (header[5] >> 5) as usize, 16);
    }

    #[test]
    fn test_explicit_sample_rate_escape() {
        // Object type 2, index 15, 24-bit rate 12345, channel config 1:
        // 00010 1111 000000000011000000111001 0001 000...
        let mut bits = String::new();
        bits.push_str("00010");
        bits.push_str("1111");
        bits.push_str(&format!("{:024b}", 12345));
        bits.push_str("0001");
        while bits.len() % 8 != 0 {
            bits.push('0');
        }
        let bytes: Vec<u8> = bits
            .as_bytes()
            .chunks(8)
            .map(|chunk| u8::from_str_radix(std::str::from_utf8(chunk).unwrap(), 2).unwrap())
            .collect();

        let codec = AacDescriptor::from_mpeg4_audio_config(bytes).unwrap();
        assert_eq!(codec.sample_rate(), 12345);
        assert_eq!(codec.channel_layout(), ChannelLayout::MONO);

        // An escaped rate is a valid descriptor but has no ADTS sampling
        // index, so header synthesis refuses it.
        let err = codec.make_adts_header(1024, 100).unwrap_err();
        assert!(matches!(err, AvError::InvalidCodecData { .. }));
    }

    #[test]
    fn test_adts_header_rejects_oversized_payload() {
        let codec = AacDescriptor::from_mpeg4_audio_config(&ASC_LC_44100_STEREO[..]).unwrap();

        // 13-bit frame length: 8184 payload bytes plus the 7-byte header is
        // the largest expressible frame.
        let header = codec.make_adts_header(1024, 8184).unwrap();
        let frame_len =
            ((header[3] as usize & 0x3) << 11) | ((header[4] as usize) << 3) | (header[5] as usize >> 5);
        assert_eq!(frame_len, 8191);

        assert!(matches!(
            codec.make_adts_header(1024, 8185),
            Err(AvError::InvalidCodecData { .. })
        ));
        // A clearly oversized payload must fail, not wrap into a bogus but
        // parseable length field.
        assert!(codec.make_adts_header(1024, 9000).is_err());
    }

    #[test]
    fn test_adts_header_rejects_high_object_types() {
        // Object type 5 (SBR), 44100 Hz, stereo: 00101 0100 0010 000.
        let codec = AacDescriptor::from_mpeg4_audio_config(vec![0x2A, 0x10]).unwrap();
        assert_eq!(codec.object_type(), 5);

        // The 2-bit ADTS profile field cannot express object types above 4.
        assert!(matches!(
            codec.make_adts_header(1024, 100),
            Err(AvError::InvalidCodecData { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_config() {
        assert!(AacDescriptor::from_mpeg4_audio_config(vec![]).is_err());
        // Channel configuration 0 (program config element) is unsupported.
        assert!(AacDescriptor::from_mpeg4_audio_config(vec![0x12, 0x00]).is_err());
        // Reserved sample rate index 13.
        assert!(AacDescriptor::from_mpeg4_audio_config(vec![0x16, 0x88]).is_err());
    }
}
