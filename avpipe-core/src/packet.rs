//! Encoded packet representation

use bytes::Bytes;

/// One timed unit of encoded bytes moving through the pipeline.
///
/// A packet is a transport envelope with no computed behavior: an encoder or
/// demuxer produces one per access unit and the next stage consumes it
/// exactly once. Packets arrive in decode order; when presentation order
/// differs (B-frame reordering), `composition_time` carries the offset a
/// consumer needs to recover it. The pipeline never reorders on the
/// consumer's behalf.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Packet {
    /// True if the packet starts a decodable access unit (e.g. an IDR frame)
    pub is_key_frame: bool,
    /// Encoded payload bytes
    pub data: Bytes,
    /// Duration covered by this packet, in seconds
    pub duration: f64,
    /// Offset from decode time to presentation time, in seconds
    pub composition_time: f64,
}

impl Packet {
    /// Create a packet holding `data`, with all timing fields zeroed
    pub fn new(data: impl Into<Bytes>) -> Packet {
        Packet {
            data: data.into(),
            ..Packet::default()
        }
    }

    /// Mark this packet as a keyframe
    pub fn key_frame(mut self, is_key_frame: bool) -> Packet {
        self.is_key_frame = is_key_frame;
        self
    }

    /// Set the packet duration in seconds
    pub fn duration(mut self, duration: f64) -> Packet {
        self.duration = duration;
        self
    }

    /// Set the decode-to-presentation offset in seconds
    pub fn composition_time(mut self, composition_time: f64) -> Packet {
        self.composition_time = composition_time;
        self
    }

    /// Payload length in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if the payload is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packet_builder() {
        let packet = Packet::new(vec![1u8, 2, 3])
            .key_frame(true)
            .duration(0.02)
            .composition_time(0.04);

        assert!(packet.is_key_frame);
        assert_eq!(packet.len(), 3);
        assert_eq!(packet.duration, 0.02);
        assert_eq!(packet.composition_time, 0.04);
    }

    #[test]
    fn test_default_packet_is_empty() {
        let packet = Packet::default();
        assert!(packet.is_empty());
        assert!(!packet.is_key_frame);
        assert_eq!(packet.duration, 0.0);
    }
}
