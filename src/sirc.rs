//! Sony SIRC protocol codec.
//!
//! SIRC is a pulse-width protocol: every block opens with a 2.4 ms
//! lead-in mark and a 600 µs space, followed by one mark/space pair
//! per data bit, least-significant bit first. A `1` bit is a 1.2 ms
//! mark, a `0` bit a 600 µs mark; the space is always 600 µs. The
//! carrier is 40 kHz.
//!
//! ## Bit-width variants
//!
//! The family has three members, distinguished by how the packed value
//! splits into fields:
//!
//! | Variant | Command | Address        | Extra          | Edges |
//! |---------|---------|----------------|----------------|-------|
//! | 12-bit  | 7 bits  | 5 bits (≤0x1F) | —              | 26    |
//! | 15-bit  | 7 bits  | 8 bits (≤0xFF) | —              | 32    |
//! | 20-bit  | 7 bits  | 5 bits (≤0x1F) | 8 bits (≤0xFF) | 42    |
//!
//! The command occupies the low 7 bits, the address starts at bit 7,
//! and the 20-bit variant adds the extra byte at bit 12. Variant
//! selection is a construction-time decision ([`SircBits`]); decode
//! and encode never switch variants at runtime.
//!
//! ## Example
//!
//! ```rust
//! use irpulse::protocol::Protocol;
//! use irpulse::sirc::{Sirc, SircBits};
//! use irpulse::xmit::PulseTrain;
//!
//! let sirc = Sirc::new(SircBits::B12);
//! let mut train = PulseTrain::new(sirc.carrier_hz(), sirc.duty_percent());
//! sirc.encode(0x05, 0x3A, 0, &mut train);
//! assert_eq!(train.len(), 26); // lead-in pair + 12 bit pairs
//! ```

use crate::consts::{
    SIRC_BIT_SPACE, SIRC_CARRIER_HZ, SIRC_DUTY_PERCENT, SIRC_LEAD_MARK, SIRC_LEAD_MARK_WINDOW,
    SIRC_LEAD_SPACE, SIRC_LEAD_SPACE_WINDOW, SIRC_ONE_MARK, SIRC_ONE_THRESHOLD_US, SIRC_TBLOCK_US,
    SIRC_ZERO_MARK,
};
use crate::protocol::{ConfigError, DecodeError, DecodeResult, Packet, Protocol};
use crate::xmit::PulseTrain;

/// Bit-width variant of the SIRC family.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum SircBits {
    /// 12-bit: 7-bit command, 5-bit address.
    B12,
    /// 15-bit: 7-bit command, 8-bit address.
    B15,
    /// 20-bit: 7-bit command, 5-bit address, 8-bit extra.
    B20,
}

impl SircBits {
    /// Number of data bits carried by this variant.
    pub const fn bits(self) -> u8 {
        match self {
            Self::B12 => 12,
            Self::B15 => 15,
            Self::B20 => 20,
        }
    }

    /// Maximum valid address for this variant.
    pub const fn max_addr(self) -> u16 {
        match self {
            Self::B12 | Self::B20 => 0x1f,
            Self::B15 => 0xff,
        }
    }

    /// Maximum valid extra value for this variant.
    pub const fn max_ext(self) -> u8 {
        match self {
            Self::B12 | Self::B15 => 0,
            Self::B20 => 0xff,
        }
    }
}

impl TryFrom<u8> for SircBits {
    type Error = ConfigError;

    fn try_from(bits: u8) -> Result<Self, ConfigError> {
        match bits {
            12 => Ok(Self::B12),
            15 => Ok(Self::B15),
            20 => Ok(Self::B20),
            other => Err(ConfigError::InvalidBitWidth(other)),
        }
    }
}

/// Sony SIRC codec for one fixed bit-width variant.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct Sirc {
    bits: SircBits,
}

impl Sirc {
    /// Creates a codec for the given variant.
    pub const fn new(bits: SircBits) -> Self {
        Self { bits }
    }

    /// Creates a codec from a raw bit count.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidBitWidth`] for anything other
    /// than 12, 15 or 20.
    pub fn from_bits(bits: u8) -> Result<Self, ConfigError> {
        Ok(Self::new(SircBits::try_from(bits)?))
    }

    /// The configured variant.
    pub const fn variant(&self) -> SircBits {
        self.bits
    }

    /// Packs `(addr, data, ext)` into the wire value, masking each
    /// field to the variant's width.
    pub fn pack(&self, addr: u16, data: u8, ext: u8) -> u32 {
        let mut v = u32::from(data & 0x7f);
        v |= u32::from(addr & self.bits.max_addr()) << 7;
        if self.bits == SircBits::B20 {
            v |= u32::from(ext) << 12;
        }
        v
    }

    /// Unpacks a wire value back into a [`Packet`], validating the
    /// recovered fields against the variant's ranges.
    ///
    /// # Errors
    /// [`DecodeError::BadAddr`] when the address field exceeds the
    /// variant's maximum; [`DecodeError::BadData`] when bits are set
    /// beyond the variant's width.
    pub fn unpack(&self, v: u32) -> DecodeResult {
        let cmd = (v & 0x7f) as u8;
        let rest = v >> 7;
        let (addr, ext) = match self.bits {
            SircBits::B12 | SircBits::B15 => {
                if rest > u32::from(self.bits.max_addr()) {
                    return Err(DecodeError::BadAddr);
                }
                (rest as u16, 0)
            }
            SircBits::B20 => {
                let ext = v >> 12;
                if ext > u32::from(SircBits::B20.max_ext()) {
                    return Err(DecodeError::BadData);
                }
                ((rest & 0x1f) as u16, ext as u8)
            }
        };
        Ok(Packet { addr, cmd, ext })
    }
}

impl Protocol for Sirc {
    fn nedges(&self) -> usize {
        2 + usize::from(self.bits.bits()) * 2
    }

    fn tblock_us(&self) -> u32 {
        SIRC_TBLOCK_US
    }

    fn carrier_hz(&self) -> u32 {
        SIRC_CARRIER_HZ
    }

    fn duty_percent(&self) -> u8 {
        SIRC_DUTY_PERCENT
    }

    fn decode(&self, times: &[i32], edges: usize) -> DecodeResult {
        if edges == 0 {
            // Spurious timer expiry with nothing captured.
            return Err(DecodeError::BadStart);
        }
        if edges > self.nedges() {
            return Err(DecodeError::Overrun);
        }
        if edges != self.nedges() {
            return Err(DecodeError::BadBlock);
        }

        let width = times[1].wrapping_sub(times[0]);
        if width <= SIRC_LEAD_MARK_WINDOW.0 || width >= SIRC_LEAD_MARK_WINDOW.1 {
            return Err(DecodeError::BadStart);
        }
        let width = times[2].wrapping_sub(times[1]);
        if width <= SIRC_LEAD_SPACE_WINDOW.0 || width >= SIRC_LEAD_SPACE_WINDOW.1 {
            return Err(DecodeError::BadStart);
        }

        // Data marks start at the third edge, LSB first.
        let mut v: u32 = 0;
        let mut bit: u32 = 1;
        let mut x = 2;
        while x + 1 < edges {
            if times[x + 1].wrapping_sub(times[x]) > SIRC_ONE_THRESHOLD_US {
                v |= bit;
            }
            bit <<= 1;
            x += 2;
        }

        self.unpack(v)
    }

    fn encode(&self, addr: u16, data: u8, ext: u8, train: &mut PulseTrain) {
        train.append(SIRC_LEAD_MARK, SIRC_LEAD_SPACE);
        let mut v = self.pack(addr, data, ext);
        for _ in 0..self.bits.bits() {
            let mark = if v & 1 == 1 { SIRC_ONE_MARK } else { SIRC_ZERO_MARK };
            train.append(mark, SIRC_BIT_SPACE);
            v >>= 1;
        }
    }
}
