//! Decode result taxonomy and the protocol codec contract.
//!
//! This module defines the shared vocabulary of the receive and
//! transmit paths: the [`Packet`] triple produced by a successful
//! decode, the closed [`DecodeError`] classification set, and the
//! [`Protocol`] trait every concrete codec implements.
//!
//! ## Result model
//!
//! The original serial IR receivers multiplexed errors into the
//! command value as negative integers, with a threshold separating
//! "valid command" from "error code" at dispatch time. Here the same
//! classification set is a tagged sum type: [`DecodeResult`] is
//! `Ok(Packet)` for a valid block and `Err(DecodeError)` for everything
//! else, including repeat codes. Command `0` is therefore always a
//! valid command, never an error sentinel. The legacy negative codes
//! remain available through [`DecodeError::code`] for applications that
//! log or forward them.
//!
//! ## Codec contract
//!
//! A [`Protocol`] value is an immutable per-variant configuration: it
//! knows its expected edge count, block timeout, and carrier, and it
//! owns both directions of the wire format. `decode` turns a captured
//! edge-timestamp prefix into a [`DecodeResult`]; `encode` drives a
//! [`PulseTrain`](crate::xmit::PulseTrain) from an `(address, data,
//! extra)` triple. Variant selection happens at construction time;
//! an unsupported variant is a [`ConfigError`], never a decode error.

use crate::xmit::PulseTrain;

/// A successfully decoded IR command.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct Packet {
    /// Device address. Protocols with short address fields leave the
    /// upper bits zero; NEC extended addressing uses all 16 bits.
    pub addr: u16,
    /// Command value. Always non-negative; `0` is a valid command.
    pub cmd: u8,
    /// Extra payload byte. Zero for variants without an extended field.
    pub ext: u8,
}

/// Classification of a block that did not decode to a [`Packet`].
///
/// This is a closed set mirroring the classic negative result codes of
/// serial IR receivers. All variants are routed to the receiver's
/// error handler; none are raised across the interrupt or timer
/// boundary.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum DecodeError {
    /// Repeat-button block: the previous command is still held down.
    /// Carries no new data.
    #[error("repeat code")]
    Repeat,
    /// The lead-in mark/space pair did not match the protocol, or the
    /// block was empty (a spurious timer expiry with no edges).
    #[error("invalid lead-in")]
    BadStart,
    /// Wrong edge count for a data block.
    #[error("malformed block")]
    BadBlock,
    /// A repeat block with the wrong edge count.
    #[error("malformed repeat block")]
    BadRep,
    /// More edges arrived than the buffer could hold.
    #[error("edge buffer overrun")]
    Overrun,
    /// Checksum, parity, or field validation failed.
    #[error("data validation failed")]
    BadData,
    /// Decoded address outside the variant's valid range.
    #[error("address out of range")]
    BadAddr,
}

impl DecodeError {
    /// The legacy negative result code for this classification.
    pub const fn code(self) -> i8 {
        match self {
            Self::Repeat => -1,
            Self::BadStart => -2,
            Self::BadBlock => -3,
            Self::BadRep => -4,
            Self::Overrun => -5,
            Self::BadData => -6,
            Self::BadAddr => -7,
        }
    }
}

/// Outcome of decoding one captured block.
pub type DecodeResult = Result<Packet, DecodeError>;

/// Error raised at construction time for unsupported protocol
/// configurations.
///
/// Distinct from [`DecodeError`]: a misconfigured codec is a
/// programming error reported immediately, not a runtime condition of
/// the receive path.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum ConfigError {
    /// The requested bit-width variant is not defined by the protocol.
    #[error("bits must be 12, 15 or 20")]
    InvalidBitWidth(u8),
}

/// The codec contract implemented by each concrete protocol variant.
///
/// Implementations are immutable once constructed. The receiver calls
/// [`decode`](Protocol::decode) from timer-expiry context only; the
/// transmitter calls [`encode`](Protocol::encode) from application
/// context. Neither is ever invoked from the edge interrupt.
pub trait Protocol {
    /// Expected edge count of a complete data block.
    ///
    /// The receiver records up to one edge beyond this so decode can
    /// distinguish overrun from a merely short block.
    fn nedges(&self) -> usize;

    /// Block timeout in microseconds.
    ///
    /// Must exceed the worst-case block transmission time and stay
    /// below the gap before a repeat block starts.
    fn tblock_us(&self) -> u32;

    /// Carrier frequency in Hz for transmission.
    fn carrier_hz(&self) -> u32;

    /// Carrier duty cycle in percent for transmission.
    fn duty_percent(&self) -> u8;

    /// Decode one captured block.
    ///
    /// `times` is the full timestamp buffer, `edges` the number of
    /// entries recorded for this block. Implementations must report
    /// [`DecodeError::Overrun`] when `edges` exceeds
    /// [`nedges`](Protocol::nedges) before extracting any field, and
    /// must never index past `times[..edges]`. Timing comparisons are
    /// made on wrapped differences, so a platform clock narrower than
    /// the block duration still decodes.
    fn decode(&self, times: &[i32], edges: usize) -> DecodeResult;

    /// Append one encoded block for `(addr, data, ext)` to `train`.
    ///
    /// Fields wider than the variant's ranges are masked to fit, the
    /// same as the wire would truncate them.
    fn encode(&self, addr: u16, data: u8, ext: u8, train: &mut PulseTrain);
}
