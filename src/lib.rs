//! # irpulse
//!
//! A portable, no_std Rust driver for infrared remote-control links,
//! compatible with the cheap 38–40 kHz demodulating receiver modules
//! (TSOP38xx, VS1838B and friends) and PWM-gated emitter diodes.
//!
//! This driver implements the timing layer of IR remote control using:
//! - `embedded-hal` traits for digital I/O and timing
//! - interrupt-timestamped edge capture with block-timeout framing
//! - optional interrupt-safe receiver singletons with `critical-section`
//! - pluggable protocol codecs behind a single contract (Sony SIRC in
//!   12/15/20-bit variants, NEC in standard and extended addressing)
//!
//! ## Crate features
//! | Feature               | Description |
//! |-----------------------|-------------|
//! | `std`                 | Disables `#![no_std]` support and replaces `heapless::Vec`s with
//! `std::vec::Vec`s |
//! | `delay-loop`          | Blocking pulse-train player using `embedded_hal::delay::DelayNs` |
//! | `timer-isr` (default) | `critical_section`-protected global receiver helpers |
//! | `defmt-0-3`           | Uses `defmt` logging |
//! | `log`                 | Uses `log` logging |
//!
//! ## Software Features
//!
//! - **Receiver and transmitter** in pure software (no dedicated IR
//!   peripheral required)
//! - Allocation-free, lock-free edge capture suitable for interrupt
//!   context, with deferred overrun reporting
//! - The classic result-code taxonomy (`REPEAT`, `BADSTART`,
//!   `BADBLOCK`, `BADREP`, `OVERRUN`, `BADDATA`, `BADADDR`) as a tagged
//!   sum type
//! - Fully portable across AVR and ARM Cortex-M targets
//!
//! ## Usage
//!
//! Transmit side — encode a command into a mark/space pulse train:
//!
//! ```rust
//! use irpulse::sirc::{Sirc, SircBits};
//! use irpulse::xmit::IrTransmitter;
//!
//! let mut tx = IrTransmitter::new(Sirc::new(SircBits::B12));
//! let train = tx.transmit(0x05, 0x3A, 0);
//! assert_eq!(&train.as_slice()[..2], &[2400, 600][..]); // SIRC lead-in
//! ```
//!
//! Receive side — platform glue feeds the two interrupt entry points:
//!
//! ```ignore
//! let mut rx = IrReceiver::new(irq, timer, Sirc::new(SircBits::B12), on_packet);
//! rx.error_function(on_error);
//! // GPIO edge ISR:    rx.on_edge(now_us());
//! // Timer expiry ISR: rx.block_timeout();
//! ```
//!
//! ## Integration Notes
//!
//! - The edge interrupt must fire on **both** rising and falling
//!   transitions; each invocation passes a monotonic microsecond
//!   timestamp to [`recv::IrReceiver::on_edge`].
//! - The block timer must be a re-armable one-shot whose expiry calls
//!   [`recv::IrReceiver::block_timeout`] exactly once.
//! - Decode arithmetic is difference-based, so a platform clock
//!   narrower than the block duration range may wrap mid-block without
//!   corrupting the result.
//! - Only one receiver should share a given pin/timer pair; each
//!   receiver owns its bindings and releases both in
//!   [`recv::IrReceiver::close`].
//!
//! --
//! Designed for `#![no_std]` use in resource-constrained embedded environments.

#![deny(
    bad_style,
    dead_code,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused,
    while_true,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results
)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "timer-isr")]
pub use critical_section;

#[cfg(not(feature = "std"))]
pub use heapless;

pub mod consts;
pub mod nec;
pub mod protocol;
pub mod recv;
pub mod sirc;
pub mod timer;
pub mod xmit;

#[cfg(test)]
pub(crate) mod testutil;

// Fans debug-level classification messages out to whichever logging
// backend is enabled; compiles to nothing with both features off.
macro_rules! ir_debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt-0-3")]
        defmt::debug!($($arg)*);
        #[cfg(all(feature = "log", not(feature = "defmt-0-3")))]
        log::debug!($($arg)*);
    }};
}
pub(crate) use ir_debug;
