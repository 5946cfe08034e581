//! Transmit-side pulse-train accumulation.
//!
//! This module provides [`PulseTrain`], the growable mark/space buffer
//! concrete codecs write into, and [`IrTransmitter`], which pairs one
//! codec instance with one train and turns `(address, data, extra)`
//! triples into ready-to-play buffers.
//!
//! The train is pure accumulation: it performs no validation of timing
//! values and trusts the codec layer for protocol-correct lengths. The
//! actual carrier-modulated playout is a platform concern; see
//! [`play_pulse_train`](crate::timer::play_pulse_train) for a blocking
//! reference player behind the `delay-loop` feature.
//!
//! ## Example
//!
//! ```rust
//! use irpulse::sirc::{Sirc, SircBits};
//! use irpulse::xmit::IrTransmitter;
//!
//! let mut tx = IrTransmitter::new(Sirc::new(SircBits::B12));
//! let train = tx.transmit(0x05, 0x3A, 0);
//! assert_eq!(train.as_slice()[0], 2400); // lead-in mark
//! ```

#[cfg(not(feature = "std"))]
use crate::consts::IR_TX_BUF_LEN;
use crate::protocol::Protocol;

#[cfg(not(feature = "std"))]
use heapless::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

/// An ordered sequence of mark/space durations in microseconds.
///
/// Durations are stored flat: even indices are marks (carrier on), odd
/// indices are spaces (carrier off). A trailing mark without a closing
/// space is legal and used by protocols that end on a burst (NEC).
///
/// The train also carries the carrier parameters the playout driver
/// needs, fixed at construction and never changed for the lifetime of
/// the owning transmitter.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct PulseTrain {
    #[cfg(not(feature = "std"))]
    times: Vec<u16, IR_TX_BUF_LEN>,
    #[cfg(feature = "std")]
    times: Vec<u16>,
    carrier_hz: u32,
    duty_percent: u8,
}

impl PulseTrain {
    /// Creates an empty train for the given carrier configuration.
    pub fn new(carrier_hz: u32, duty_percent: u8) -> Self {
        Self {
            times: Vec::new(),
            carrier_hz,
            duty_percent,
        }
    }

    /// Appends one mark/space pair.
    ///
    /// Durations beyond the buffer capacity
    /// ([`IR_TX_BUF_LEN`](crate::consts::IR_TX_BUF_LEN) under
    /// `no_std`) are silently dropped; codecs never exceed it.
    pub fn append(&mut self, mark_us: u16, space_us: u16) {
        #[cfg(not(feature = "std"))]
        {
            let _ = self.times.push(mark_us);
            let _ = self.times.push(space_us);
        }
        #[cfg(feature = "std")]
        {
            self.times.push(mark_us);
            self.times.push(space_us);
        }
    }

    /// Appends a trailing mark with no closing space.
    pub fn append_mark(&mut self, mark_us: u16) {
        #[cfg(not(feature = "std"))]
        let _ = self.times.push(mark_us);
        #[cfg(feature = "std")]
        self.times.push(mark_us);
    }

    /// Discards all accumulated durations, keeping the carrier
    /// configuration.
    pub fn clear(&mut self) {
        self.times.clear();
    }

    /// The accumulated durations, marks at even indices.
    pub fn as_slice(&self) -> &[u16] {
        &self.times
    }

    /// Number of durations accumulated.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Whether the train holds no durations.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Iterates `(mark, space)` pairs. A trailing mark is paired with a
    /// zero-length space.
    pub fn pairs(&self) -> impl Iterator<Item = (u16, u16)> + '_ {
        self.times
            .chunks(2)
            .map(|c| (c[0], c.get(1).copied().unwrap_or(0)))
    }

    /// Carrier frequency in Hz the train should be played at.
    pub fn carrier_hz(&self) -> u32 {
        self.carrier_hz
    }

    /// Carrier duty cycle in percent.
    pub fn duty_percent(&self) -> u8 {
        self.duty_percent
    }
}

/// Transmit half of an IR link: one codec instance plus one reusable
/// pulse-train buffer.
///
/// The protocol variant is fixed at construction. Each call to
/// [`transmit`](IrTransmitter::transmit) rebuilds the train in place;
/// the returned borrow is valid until the next call.
#[derive(Debug)]
pub struct IrTransmitter<P: Protocol> {
    proto: P,
    train: PulseTrain,
}

impl<P: Protocol> IrTransmitter<P> {
    /// Creates a transmitter for the given protocol variant.
    pub fn new(proto: P) -> Self {
        let train = PulseTrain::new(proto.carrier_hz(), proto.duty_percent());
        Self { proto, train }
    }

    /// Encodes `(addr, data, ext)` and returns the finished train.
    ///
    /// Fields wider than the variant's ranges are masked to fit, the
    /// same truncation the wire format itself would apply.
    pub fn transmit(&mut self, addr: u16, data: u8, ext: u8) -> &PulseTrain {
        self.train.clear();
        self.proto.encode(addr, data, ext, &mut self.train);
        &self.train
    }

    /// The codec this transmitter was built with.
    pub fn protocol(&self) -> &P {
        &self.proto
    }

    /// The most recently encoded train.
    pub fn train(&self) -> &PulseTrain {
        &self.train
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sirc::{Sirc, SircBits};

    #[test]
    fn test_append_accumulates_pairs() {
        let mut train = PulseTrain::new(40_000, 30);
        train.append(2400, 600);
        train.append(1200, 600);
        assert_eq!(train.as_slice(), &[2400, 600, 1200, 600][..]);
        assert_eq!(train.len(), 4);
    }

    #[test]
    fn test_trailing_mark_pairs_with_zero_space() {
        let mut train = PulseTrain::new(38_000, 33);
        train.append(9000, 4500);
        train.append_mark(563);
        let pairs: Vec<_> = train.pairs().collect();
        assert_eq!(pairs, vec![(9000, 4500), (563, 0)]);
    }

    #[test]
    fn test_clear_keeps_carrier_configuration() {
        let mut train = PulseTrain::new(40_000, 30);
        train.append(2400, 600);
        train.clear();
        assert!(train.is_empty());
        assert_eq!(train.carrier_hz(), 40_000);
        assert_eq!(train.duty_percent(), 30);
    }

    #[test]
    fn test_transmitter_rebuilds_train_in_place() {
        let mut tx = IrTransmitter::new(Sirc::new(SircBits::B12));
        let first_len = tx.transmit(0x05, 0x3A, 0).len();
        let second_len = tx.transmit(0x01, 0x00, 0).len();
        assert_eq!(first_len, second_len);
        assert_eq!(tx.train().as_slice()[0], 2400);
    }

    #[test]
    fn test_transmitter_carries_protocol_carrier() {
        let tx = IrTransmitter::new(Sirc::new(SircBits::B15));
        assert_eq!(tx.train().carrier_hz(), 40_000);
        assert_eq!(tx.train().duty_percent(), 30);
    }
}
