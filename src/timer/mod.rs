//! Platform timer integration for the IR receiver and transmitter.
//!
//! The receive engine needs exactly one platform timing primitive: a
//! re-armable one-shot countdown ([`OneShotTimer`]) whose expiry
//! handler calls [`IrReceiver::block_timeout`](crate::recv::IrReceiver::block_timeout).
//! This module defines that contract and hosts the optional
//! integration helpers:
//!
//! - `timer-isr` (default): `critical_section`-protected global
//!   receiver singletons for platforms where the pin interrupt and the
//!   timer interrupt are separate ISRs — see
//!   [`global_ir_receiver_init`] and the `init_ir_receiver!` /
//!   `setup_ir_receiver!` macros.
//! - `delay-loop`: a blocking reference player,
//!   [`play_pulse_train`], that gates a carrier-generating pin through
//!   `embedded_hal::delay::DelayNs`.
//!
//! ## Timer requirements
//!
//! The block timer must support one-shot operation with microsecond
//! periods up to the longest protocol timeout (80 ms for NEC), firing
//! its callback exactly once per arming. Re-arming an already-armed
//! timer restarts it; this never happens in normal operation because
//! the receiver arms only on the first edge of a block.

#[cfg(feature = "delay-loop")]
mod delay;
#[cfg(feature = "delay-loop")]
pub use delay::*;

#[cfg(feature = "timer-isr")]
mod isr;
#[cfg(feature = "timer-isr")]
pub use isr::*;

#[cfg(feature = "timer-isr")]
mod macros;

/// A re-armable single-shot countdown timer.
///
/// Implementations bind a hardware or software timer whose expiry
/// handler invokes the receiver's decode entry point exactly once per
/// arming. [`disarm`](OneShotTimer::disarm) cancels a pending expiry
/// and must be safe to call when the timer is idle.
pub trait OneShotTimer {
    /// Start (or restart) the countdown for `period_us` microseconds.
    fn arm(&mut self, period_us: u32);

    /// Cancel any pending expiry. Safe to call repeatedly.
    fn disarm(&mut self);
}
