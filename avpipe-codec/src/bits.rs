//! Big-endian bitstream reader shared by the descriptor parsers.
//!
//! Reads return `None` past the end of input; callers map that into their
//! codec-specific parse error.

pub struct BitReader<'a> {
    data: &'a [u8],
    /// Absolute bit position from the start of `data`
    pos: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn read_bit(&mut self) -> Option<u32> {
        let byte = self.data.get(self.pos / 8)?;
        let bit = (byte >> (7 - (self.pos % 8))) & 1;
        self.pos += 1;
        Some(bit as u32)
    }

    pub fn read_bits(&mut self, count: u32) -> Option<u32> {
        debug_assert!(count <= 32);
        let mut value = 0u32;
        for _ in 0..count {
            value = (value << 1) | self.read_bit()?;
        }
        Some(value)
    }

    pub fn read_flag(&mut self) -> Option<bool> {
        Some(self.read_bit()? == 1)
    }

    /// Unsigned exp-Golomb code (ue(v) in H.264)
    pub fn read_ue(&mut self) -> Option<u32> {
        let mut zeros = 0u32;
        while self.read_bit()? == 0 {
            zeros += 1;
            if zeros > 31 {
                return None;
            }
        }
        if zeros == 0 {
            return Some(0);
        }
        let suffix = self.read_bits(zeros)?;
        Some((1u32 << zeros) - 1 + suffix)
    }

    /// Signed exp-Golomb code (se(v) in H.264)
    pub fn read_se(&mut self) -> Option<i32> {
        let code = self.read_ue()?;
        if code % 2 == 1 {
            Some(((code / 2) + 1) as i32)
        } else {
            Some(-((code / 2) as i32))
        }
    }
}
