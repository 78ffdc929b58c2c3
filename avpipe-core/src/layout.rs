//! Channel layout algebra
//!
//! A speaker layout is a 64-bit mask with one bit per named speaker
//! position. Presets are plain bitwise-OR combinations and the preset list is
//! deliberately non-exhaustive: OR-ing raw bits together is a legal way to
//! describe any layout a codec can produce, and the bits at or above
//! [`ChannelLayout::RESERVED`] are left to container or codec extensions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign};

/// Bitmask over named speaker positions
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ChannelLayout(u64);

impl ChannelLayout {
    /// Empty layout, no speakers assigned
    pub const EMPTY: ChannelLayout = ChannelLayout(0);

    /// Front center speaker
    pub const FRONT_CENTER: ChannelLayout = ChannelLayout(1 << 0);
    /// Front left speaker
    pub const FRONT_LEFT: ChannelLayout = ChannelLayout(1 << 1);
    /// Front right speaker
    pub const FRONT_RIGHT: ChannelLayout = ChannelLayout(1 << 2);
    /// Back center speaker
    pub const BACK_CENTER: ChannelLayout = ChannelLayout(1 << 3);
    /// Back left speaker
    pub const BACK_LEFT: ChannelLayout = ChannelLayout(1 << 4);
    /// Back right speaker
    pub const BACK_RIGHT: ChannelLayout = ChannelLayout(1 << 5);
    /// Side left speaker
    pub const SIDE_LEFT: ChannelLayout = ChannelLayout(1 << 6);
    /// Side right speaker
    pub const SIDE_RIGHT: ChannelLayout = ChannelLayout(1 << 7);
    /// Low-frequency effects channel
    pub const LOW_FREQUENCY: ChannelLayout = ChannelLayout(1 << 8);

    /// First bit past the named speaker positions; bits at or above this
    /// value are available to external extensions.
    pub const RESERVED: ChannelLayout = ChannelLayout(1 << 9);

    /// Mono: front center only
    pub const MONO: ChannelLayout = Self::FRONT_CENTER;
    /// Stereo: front left and right
    pub const STEREO: ChannelLayout = ChannelLayout(Self::FRONT_LEFT.0 | Self::FRONT_RIGHT.0);
    /// 2.1: stereo plus back center
    pub const TWO_ONE: ChannelLayout = ChannelLayout(Self::STEREO.0 | Self::BACK_CENTER.0);
    /// 2.1 with a subwoofer: stereo plus low-frequency
    pub const TWO_POINT_ONE: ChannelLayout = ChannelLayout(Self::STEREO.0 | Self::LOW_FREQUENCY.0);
    /// Surround: stereo plus front center
    pub const SURROUND: ChannelLayout = ChannelLayout(Self::STEREO.0 | Self::FRONT_CENTER.0);
    /// 3.1: surround plus low-frequency
    pub const THREE_POINT_ONE: ChannelLayout =
        ChannelLayout(Self::SURROUND.0 | Self::LOW_FREQUENCY.0);
    /// 4.0: surround plus back center
    pub const FOUR_POINT_ZERO: ChannelLayout =
        ChannelLayout(Self::SURROUND.0 | Self::BACK_CENTER.0);
    /// Quad: stereo plus back left and right
    pub const QUAD: ChannelLayout =
        ChannelLayout(Self::STEREO.0 | Self::BACK_LEFT.0 | Self::BACK_RIGHT.0);
    /// 5.0: surround plus side left and right
    pub const FIVE_POINT_ZERO: ChannelLayout =
        ChannelLayout(Self::SURROUND.0 | Self::SIDE_LEFT.0 | Self::SIDE_RIGHT.0);
    /// 5.1: 5.0 plus low-frequency
    pub const FIVE_POINT_ONE: ChannelLayout =
        ChannelLayout(Self::FIVE_POINT_ZERO.0 | Self::LOW_FREQUENCY.0);

    /// Build a layout from a raw bitmask. Any 64-bit pattern is meaningful;
    /// only cardinality and exact bit identity ever matter downstream.
    pub const fn from_bits(bits: u64) -> ChannelLayout {
        ChannelLayout(bits)
    }

    /// Raw bitmask of this layout
    pub const fn bits(&self) -> u64 {
        self.0
    }

    /// Number of channels in this layout.
    ///
    /// Counts set bits by repeatedly clearing the lowest one, so the result
    /// depends only on cardinality, never on bit ordering.
    pub fn count(&self) -> usize {
        let mut bits = self.0;
        let mut n = 0;
        while bits != 0 {
            n += 1;
            bits = (bits - 1) & bits;
        }
        n
    }

    /// True if no speaker bit is set
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// True if every bit of `other` is also set in `self`
    pub fn contains(&self, other: ChannelLayout) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for ChannelLayout {
    type Output = ChannelLayout;

    fn bitor(self, rhs: ChannelLayout) -> ChannelLayout {
        ChannelLayout(self.0 | rhs.0)
    }
}

impl BitOrAssign for ChannelLayout {
    fn bitor_assign(&mut self, rhs: ChannelLayout) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for ChannelLayout {
    type Output = ChannelLayout;

    fn bitand(self, rhs: ChannelLayout) -> ChannelLayout {
        ChannelLayout(self.0 & rhs.0)
    }
}

impl BitAndAssign for ChannelLayout {
    fn bitand_assign(&mut self, rhs: ChannelLayout) {
        self.0 &= rhs.0;
    }
}

impl fmt::Display for ChannelLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(ChannelLayout, &str); 9] = [
            (ChannelLayout::FRONT_CENTER, "FC"),
            (ChannelLayout::FRONT_LEFT, "FL"),
            (ChannelLayout::FRONT_RIGHT, "FR"),
            (ChannelLayout::BACK_CENTER, "BC"),
            (ChannelLayout::BACK_LEFT, "BL"),
            (ChannelLayout::BACK_RIGHT, "BR"),
            (ChannelLayout::SIDE_LEFT, "SL"),
            (ChannelLayout::SIDE_RIGHT, "SR"),
            (ChannelLayout::LOW_FREQUENCY, "LFE"),
        ];

        if self.is_empty() {
            return f.write_str("none");
        }

        let mut remaining = self.0;
        let mut first = true;
        for (bit, name) in NAMES {
            if self.contains(bit) {
                if !first {
                    f.write_str("|")?;
                }
                f.write_str(name)?;
                first = false;
                remaining &= !bit.0;
            }
        }
        if remaining != 0 {
            if !first {
                f.write_str("|")?;
            }
            write!(f, "{:#x}", remaining)?;
        }
        Ok(())
    }
}
