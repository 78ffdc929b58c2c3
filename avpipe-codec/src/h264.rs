//! H.264 stream descriptor
//!
//! Built from the AVCDecoderConfigurationRecord (ISO/IEC 14496-15) a
//! demuxer finds in the container header. The record embeds the SPS and PPS
//! NAL units with two-byte length framing; this module extracts them as
//! plain payload views and derives the coded picture dimensions by parsing
//! the SPS.

use crate::bits::BitReader;
use avpipe_core::{AvError, AvResult, CodecData, CodecType, H264CodecData, MediaKind, VideoCodecData};
use bytes::Bytes;

// Profiles whose SPS carries chroma format and bit depth fields.
const HIGH_PROFILES: [u32; 13] = [100, 110, 122, 244, 44, 83, 86, 118, 128, 138, 139, 134, 135];

/// Descriptor of one H.264 elementary stream
#[derive(Debug, Clone)]
pub struct H264Descriptor {
    record: Bytes,
    sps: Bytes,
    pps: Bytes,
    width: u32,
    height: u32,
}

fn bad(reason: impl Into<String>) -> AvError {
    AvError::InvalidCodecData {
        codec: "H264".to_string(),
        reason: reason.into(),
    }
}

impl H264Descriptor {
    /// Parse an AVCDecoderConfigurationRecord into a descriptor.
    ///
    /// Keeps the raw record, zero-copy views of the first SPS and PPS, and
    /// the picture dimensions parsed out of the SPS.
    pub fn from_avc_decoder_config(record: impl Into<Bytes>) -> AvResult<Self> {
        let record: Bytes = record.into();
        if record.len() < 7 {
            return Err(bad(format!("record too short: {} bytes", record.len())));
        }
        if record[0] != 1 {
            return Err(bad(format!("unsupported record version {}", record[0])));
        }

        let sps_count = (record[5] & 0x1f) as usize;
        if sps_count == 0 {
            return Err(bad("record carries no SPS"));
        }

        // Keep the first parameter set of each kind; skip the remainder.
        let mut cursor = 6;
        let sps = Self::read_nal(&record, &mut cursor)?;
        for _ in 1..sps_count {
            Self::read_nal(&record, &mut cursor)?;
        }
        if sps.is_empty() || sps[0] & 0x1f != 7 {
            return Err(bad("first parameter set is not an SPS NAL unit"));
        }

        let pps_count = *record.get(cursor).ok_or_else(|| bad("truncated PPS count"))? as usize;
        cursor += 1;
        if pps_count == 0 {
            return Err(bad("record carries no PPS"));
        }
        let pps = Self::read_nal(&record, &mut cursor)?;
        for _ in 1..pps_count {
            Self::read_nal(&record, &mut cursor)?;
        }

        let (width, height) = parse_sps_dimensions(&sps)?;
        tracing::debug!(width, height, "parsed AVC decoder configuration record");

        Ok(Self {
            record,
            sps,
            pps,
            width,
            height,
        })
    }

    /// Read one length-prefixed NAL unit, advancing `cursor` past it
    fn read_nal(record: &Bytes, cursor: &mut usize) -> AvResult<Bytes> {
        let end = cursor
            .checked_add(2)
            .filter(|end| *end <= record.len())
            .ok_or_else(|| bad("truncated NAL length"))?;
        let len = u16::from_be_bytes([record[*cursor], record[*cursor + 1]]) as usize;
        let unit_end = end
            .checked_add(len)
            .filter(|unit_end| *unit_end <= record.len())
            .ok_or_else(|| bad("truncated NAL unit"))?;
        let unit = record.slice(end..unit_end);
        *cursor = unit_end;
        Ok(unit)
    }
}

impl CodecData for H264Descriptor {
    fn codec_type(&self) -> CodecType {
        CodecType::H264
    }

    fn kind(&self) -> MediaKind {
        MediaKind::Video
    }

    fn as_video(&self) -> Option<&dyn VideoCodecData> {
        Some(self)
    }

    fn as_h264(&self) -> Option<&dyn H264CodecData> {
        Some(self)
    }
}

impl VideoCodecData for H264Descriptor {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

impl H264CodecData for H264Descriptor {
    fn avc_decoder_config_bytes(&self) -> &[u8] {
        &self.record
    }

    fn sps(&self) -> &[u8] {
        &self.sps
    }

    fn pps(&self) -> &[u8] {
        &self.pps
    }
}

/// Strip emulation-prevention bytes (00 00 03 -> 00 00) from a NAL unit
fn unescape_rbsp(nal: &[u8]) -> Vec<u8> {
    let mut rbsp = Vec::with_capacity(nal.len());
    let mut zeros = 0;
    for &byte in nal {
        if zeros >= 2 && byte == 3 {
            zeros = 0;
            continue;
        }
        if byte == 0 {
            zeros += 1;
        } else {
            zeros = 0;
        }
        rbsp.push(byte);
    }
    rbsp
}

/// Coded picture dimensions from an SPS NAL unit (header byte included)
fn parse_sps_dimensions(sps: &[u8]) -> AvResult<(u32, u32)> {
    let truncated = || bad("truncated SPS");
    if sps.len() < 4 {
        return Err(truncated());
    }

    let rbsp = unescape_rbsp(&sps[1..]);
    let mut r = BitReader::new(&rbsp);

    let profile_idc = r.read_bits(8).ok_or_else(truncated)?;
    r.read_bits(8).ok_or_else(truncated)?; // constraint flags + reserved
    r.read_bits(8).ok_or_else(truncated)?; // level_idc
    r.read_ue().ok_or_else(truncated)?; // seq_parameter_set_id

    let mut chroma_format_idc = 1; // 4:2:0 unless stated otherwise
    let mut separate_colour_plane = false;
    if HIGH_PROFILES.contains(&profile_idc) {
        chroma_format_idc = r.read_ue().ok_or_else(truncated)?;
        if chroma_format_idc == 3 {
            separate_colour_plane = r.read_flag().ok_or_else(truncated)?;
        }
        r.read_ue().ok_or_else(truncated)?; // bit_depth_luma_minus8
        r.read_ue().ok_or_else(truncated)?; // bit_depth_chroma_minus8
        r.read_flag().ok_or_else(truncated)?; // qpprime_y_zero_transform_bypass
        if r.read_flag().ok_or_else(truncated)? {
            let list_count = if chroma_format_idc == 3 { 12 } else { 8 };
            for index in 0..list_count {
                if r.read_flag().ok_or_else(truncated)? {
                    let size = if index < 6 { 16 } else { 64 };
                    skip_scaling_list(&mut r, size).ok_or_else(truncated)?;
                }
            }
        }
    }

    r.read_ue().ok_or_else(truncated)?; // log2_max_frame_num_minus4
    let pic_order_cnt_type = r.read_ue().ok_or_else(truncated)?;
    if pic_order_cnt_type == 0 {
        r.read_ue().ok_or_else(truncated)?; // log2_max_pic_order_cnt_lsb_minus4
    } else if pic_order_cnt_type == 1 {
        r.read_flag().ok_or_else(truncated)?; // delta_pic_order_always_zero
        r.read_se().ok_or_else(truncated)?; // offset_for_non_ref_pic
        r.read_se().ok_or_else(truncated)?; // offset_for_top_to_bottom_field
        let cycle_len = r.read_ue().ok_or_else(truncated)?;
        for _ in 0..cycle_len {
            r.read_se().ok_or_else(truncated)?;
        }
    }

    r.read_ue().ok_or_else(truncated)?; // max_num_ref_frames
    r.read_flag().ok_or_else(truncated)?; // gaps_in_frame_num_value_allowed
    let pic_width_in_mbs = r.read_ue().ok_or_else(truncated)? + 1;
    let pic_height_in_map_units = r.read_ue().ok_or_else(truncated)? + 1;
    let frame_mbs_only = r.read_flag().ok_or_else(truncated)?;
    if !frame_mbs_only {
        r.read_flag().ok_or_else(truncated)?; // mb_adaptive_frame_field
    }
    r.read_flag().ok_or_else(truncated)?; // direct_8x8_inference

    let mut crop = (0u32, 0u32, 0u32, 0u32);
    if r.read_flag().ok_or_else(truncated)? {
        crop = (
            r.read_ue().ok_or_else(truncated)?,
            r.read_ue().ok_or_else(truncated)?,
            r.read_ue().ok_or_else(truncated)?,
            r.read_ue().ok_or_else(truncated)?,
        );
    }

    let chroma_array_type = if separate_colour_plane { 0 } else { chroma_format_idc };
    let (sub_width, sub_height) = match chroma_array_type {
        0 => (1, 1),
        1 => (2, 2),
        2 => (2, 1),
        _ => (1, 1),
    };
    let frame_height_factor = if frame_mbs_only { 1 } else { 2 };
    let crop_unit_x = sub_width;
    let crop_unit_y = sub_height * frame_height_factor;

    let width = pic_width_in_mbs * 16 - crop_unit_x * (crop.0 + crop.1);
    let height = frame_height_factor * pic_height_in_map_units * 16 - crop_unit_y * (crop.2 + crop.3);
    Ok((width, height))
}

fn skip_scaling_list(r: &mut BitReader<'_>, size: usize) -> Option<()> {
    let mut last_scale = 8i32;
    let mut next_scale = 8i32;
    for _ in 0..size {
        if next_scale != 0 {
            let delta = r.read_se()?;
            next_scale = (last_scale + delta + 256) % 256;
        }
        if next_scale != 0 {
            last_scale = next_scale;
        }
    }
    Some(())
}
