//! Integration tests for the pipeline stage contracts
//!
//! A scripted in-memory demuxer, a pass-through "decoder", and a recording
//! muxer are wired together the way a real pipeline composes the contracts,
//! checking decode-order delivery, clean end-of-stream handling, and the
//! muxer call-order state machine.

use avpipe_core::{
    AudioDecoder, AudioFrame, AvError, AvResult, ChannelLayout, CheckedMuxer, CodecData, CodecType,
    Demuxer, GenericAudioCodecData, Muxer, Packet, SampleFormat,
};
use bytes::Bytes;
use std::sync::Arc;

fn mulaw_stream() -> Arc<dyn CodecData> {
    Arc::new(GenericAudioCodecData::new(
        CodecType::PCM_MULAW,
        8000,
        ChannelLayout::MONO,
        SampleFormat::S16,
    ))
}

/// Demuxer replaying a fixed packet script
struct ScriptedDemuxer {
    streams: Vec<Arc<dyn CodecData>>,
    script: Vec<(usize, Packet)>,
    position: usize,
}

impl ScriptedDemuxer {
    fn new(streams: Vec<Arc<dyn CodecData>>, script: Vec<(usize, Packet)>) -> Self {
        Self {
            streams,
            script,
            position: 0,
        }
    }
}

impl Demuxer for ScriptedDemuxer {
    fn streams(&mut self) -> AvResult<Vec<Arc<dyn CodecData>>> {
        Ok(self.streams.clone())
    }

    fn read_packet(&mut self) -> AvResult<(usize, Packet)> {
        let entry = self.script.get(self.position).ok_or(AvError::EndOfStream)?;
        self.position += 1;
        Ok(entry.clone())
    }

    fn duration(&self) -> f64 {
        self.script.iter().map(|(_, packet)| packet.duration).sum()
    }
}

/// "Decoder" that widens each mu-law byte to a zeroed-high-byte S16 sample
struct WideningDecoder;

impl AudioDecoder for WideningDecoder {
    fn decode(&mut self, packet: Packet) -> AvResult<AudioFrame> {
        let mut plane = Vec::with_capacity(packet.len() * 2);
        for &byte in packet.data.iter() {
            plane.push(byte);
            plane.push(0);
        }
        Ok(AudioFrame {
            sample_rate: 8000,
            sample_format: SampleFormat::S16,
            channel_layout: ChannelLayout::MONO,
            sample_count: packet.len(),
            data: vec![Bytes::from(plane)],
        })
    }
}

#[derive(Default)]
struct RecordingMuxer {
    header_streams: usize,
    packets: Vec<(usize, Packet)>,
    finalized: bool,
}

impl Muxer for RecordingMuxer {
    fn write_header(&mut self, streams: &[Arc<dyn CodecData>]) -> AvResult<()> {
        self.header_streams = streams.len();
        Ok(())
    }

    fn write_packet(&mut self, stream_index: usize, packet: Packet) -> AvResult<()> {
        self.packets.push((stream_index, packet));
        Ok(())
    }

    fn write_trailer(&mut self) -> AvResult<()> {
        self.finalized = true;
        Ok(())
    }
}

// ============================================================================
// DEMUX -> MUX FLOW TESTS
// ============================================================================

#[test]
fn test_remux_flow_preserves_order_and_payloads() {
    let script = vec![
        (0, Packet::new(vec![1u8, 2]).key_frame(true).duration(0.25)),
        (0, Packet::new(vec![3u8]).duration(0.125)),
        (0, Packet::new(vec![4u8, 5, 6]).duration(0.375)),
    ];
    let mut demuxer = ScriptedDemuxer::new(vec![mulaw_stream()], script.clone());
    let mut muxer = CheckedMuxer::new(RecordingMuxer::default());

    let streams = demuxer.streams().unwrap();
    muxer.write_header(&streams).unwrap();

    loop {
        match demuxer.read_packet() {
            Ok((index, packet)) => muxer.write_packet(index, packet).unwrap(),
            Err(err) if err.is_end_of_stream() => break,
            Err(err) => panic!("transport failure: {}", err),
        }
    }
    muxer.write_trailer().unwrap();

    let inner = muxer.into_inner();
    assert_eq!(inner.header_streams, 1);
    assert!(inner.finalized);
    assert_eq!(inner.packets.len(), 3);
    for ((_, written), (_, scripted)) in inner.packets.iter().zip(script.iter()) {
        assert_eq!(written, scripted);
    }
}

#[test]
fn test_demuxer_duration_and_exhaustion() {
    let mut demuxer = ScriptedDemuxer::new(
        vec![mulaw_stream()],
        vec![(0, Packet::new(vec![0u8]).duration(0.5))],
    );
    assert!((demuxer.duration() - 0.5).abs() < f64::EPSILON);

    demuxer.read_packet().unwrap();
    let err = demuxer.read_packet().unwrap_err();
    assert!(err.is_end_of_stream());
    // Exhaustion is terminal and repeatable.
    assert!(demuxer.read_packet().unwrap_err().is_end_of_stream());
}

// ============================================================================
// DECODE FLOW TESTS
// ============================================================================

#[test]
fn test_decode_accumulate_frames() {
    let mut demuxer = ScriptedDemuxer::new(
        vec![mulaw_stream()],
        vec![
            (0, Packet::new(vec![10u8, 11])),
            (0, Packet::new(vec![12u8])),
        ],
    );
    let mut decoder = WideningDecoder;

    let mut accumulated: Option<AudioFrame> = None;
    while let Ok((_, packet)) = demuxer.read_packet() {
        let decoded = decoder.decode(packet).unwrap();
        match accumulated.as_mut() {
            Some(frame) => frame.concat(&decoded).unwrap(),
            None => accumulated = Some(decoded),
        }
    }

    let frame = accumulated.unwrap();
    assert_eq!(frame.sample_count, 3);
    assert_eq!(&frame.data[0][..], &[10, 0, 11, 0, 12, 0]);
    assert!((frame.duration() - 3.0 / 8000.0).abs() < 1e-12);
}

// ============================================================================
// MUXER STATE MACHINE TESTS
// ============================================================================

#[test]
fn test_muxer_ordering_violations_surface_errors() {
    let mut muxer = CheckedMuxer::new(RecordingMuxer::default());

    // Trailer before header.
    assert!(matches!(
        muxer.write_trailer(),
        Err(AvError::InvalidState { .. })
    ));

    muxer.write_header(&[mulaw_stream()]).unwrap();

    // Stream index outside the declared header.
    assert!(matches!(
        muxer.write_packet(3, Packet::default()),
        Err(AvError::UnknownStream { index: 3, count: 1 })
    ));

    muxer.write_trailer().unwrap();
    assert!(matches!(
        muxer.write_packet(0, Packet::default()),
        Err(AvError::InvalidState { .. })
    ));

    // The inner muxer never saw a bad call.
    let inner = muxer.into_inner();
    assert!(inner.packets.is_empty());
    assert!(inner.finalized);
}
