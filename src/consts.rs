//! Constants used across the IR protocol implementations.
//!
//! This module defines the protocol-wide constants used for
//! edge-buffer sizing, pulse timing, block timeouts, and carrier
//! configuration.
//!
//! The timing figures follow the published Sony SIRC and NEC protocol
//! specifications, with the receive-side windows widened to tolerate
//! the jitter of interrupt-timestamped edges from cheap demodulator
//! modules.
//!
//! ## Key Concepts
//!
//! - **Marks and spaces**: every IR symbol is a carrier-on duration
//!   followed by a carrier-off duration, both in microseconds.
//! - **Lead-in**: the oversized first mark/space pair that identifies
//!   the start of a block and lets the receiver AGC settle.
//! - **Block timeout**: armed on the first edge of a block; must exceed
//!   the worst-case block duration but stay below the gap preceding a
//!   repeat block.
//! - **Buffer sizing**: the edge buffer is sized for the largest
//!   protocol in the family plus one slot reserved for overrun
//!   detection.

/// Largest expected edge count of any supported protocol.
///
/// An NEC data block produces 68 edges; SIRC blocks top out at 42.
pub const IR_MAX_EDGES: usize = 68;

/// Capacity of the edge timestamp buffer.
///
/// One slot beyond [`IR_MAX_EDGES`] so a single excess edge can be
/// recorded and later reported as an overrun.
pub const IR_EDGE_BUF_LEN: usize = IR_MAX_EDGES + 1;

/// Maximum number of mark/space durations an encoded pulse train can
/// hold.
///
/// Sized for the largest transmit buffer in the family: an NEC frame
/// occupies 67 slots and the SIRC tables claim `3 + bits * 2`, so 68
/// covers both with the customary spare slot.
pub const IR_TX_BUF_LEN: usize = 68;

// ---- Sony SIRC -------------------------------------------------------

/// SIRC lead-in mark duration in microseconds.
pub const SIRC_LEAD_MARK: u16 = 2400;

/// SIRC lead-in space duration in microseconds.
pub const SIRC_LEAD_SPACE: u16 = 600;

/// SIRC mark duration encoding a `1` bit, in microseconds.
pub const SIRC_ONE_MARK: u16 = 1200;

/// SIRC mark duration encoding a `0` bit, in microseconds.
pub const SIRC_ZERO_MARK: u16 = 600;

/// SIRC inter-bit space duration in microseconds. Fixed for both bit
/// values.
pub const SIRC_BIT_SPACE: u16 = 600;

/// Sony specifies a 40 kHz carrier.
pub const SIRC_CARRIER_HZ: u32 = 40_000;

/// SIRC carrier duty cycle in percent.
pub const SIRC_DUTY_PERCENT: u8 = 30;

/// SIRC block timeout in microseconds.
///
/// Long enough for the widest (20-bit) block including its worst-case
/// all-ones bit pattern, short of the 45 ms repeat interval used by
/// Sony remotes.
pub const SIRC_TBLOCK_US: u32 = 30_000;

/// Accepted window for the SIRC lead-in mark, in microseconds.
pub const SIRC_LEAD_MARK_WINDOW: (i32, i32) = (1800, 3000);

/// Accepted window for the SIRC lead-in space, in microseconds.
pub const SIRC_LEAD_SPACE_WINDOW: (i32, i32) = (350, 1000);

/// Marks longer than this decode as a `1` bit, in microseconds.
pub const SIRC_ONE_THRESHOLD_US: i32 = 900;

// ---- NEC -------------------------------------------------------------

/// Edge count of a complete NEC data block.
pub const NEC_NEDGES: usize = 68;

/// Edge count of an NEC repeat block.
pub const NEC_REPEAT_EDGES: usize = 4;

/// NEC lead-in mark duration in microseconds.
pub const NEC_LEAD_MARK: u16 = 9000;

/// NEC lead-in space duration in microseconds.
pub const NEC_LEAD_SPACE: u16 = 4500;

/// NEC burst (mark) duration in microseconds. All NEC marks are this
/// long; the bits live in the spaces.
pub const NEC_TBURST: u16 = 563;

/// NEC space duration encoding a `1` bit, in microseconds.
pub const NEC_T_ONE: u16 = 1687;

/// NEC specifies a 38 kHz carrier.
pub const NEC_CARRIER_HZ: u32 = 38_000;

/// NEC carrier duty cycle in percent.
pub const NEC_DUTY_PERCENT: u8 = 33;

/// NEC block timeout in microseconds.
///
/// An extended-address block lasts up to ~80 ms; repeat blocks start
/// 108 ms after the previous lead-in.
pub const NEC_TBLOCK_US: u32 = 80_000;

/// Minimum accepted NEC lead-in mark, in microseconds.
pub const NEC_LEAD_MARK_MIN: i32 = 4000;

/// Lead-in spaces above this width belong to a data block, in
/// microseconds.
pub const NEC_DATA_SPACE_MIN: i32 = 3000;

/// Lead-in spaces above this width (and below the data threshold)
/// belong to a repeat block, in microseconds.
pub const NEC_REPEAT_SPACE_MIN: i32 = 1700;

/// Spaces longer than this decode as a `1` bit, in microseconds.
pub const NEC_ONE_THRESHOLD_US: i32 = 1120;
