//! Receive-side capture and framing engine.
//!
//! This module provides the [`EdgeRecorder`], which timestamps pin
//! edges from interrupt context, and the [`IrReceiver`], which owns
//! the recorder, the pin-interrupt binding, the block timer, and one
//! protocol codec, and turns captured blocks into callback dispatches.
//!
//! ## Capture model
//!
//! On the first edge of a block the receiver arms its one-shot block
//! timer. While the timer runs, every edge is timestamped into the
//! recorder. When the timer expires the active codec decodes the
//! captured prefix, the edge counter is reset so the next block can
//! start, and the result is dispatched: valid packets to the callback,
//! everything else (including repeat codes) to the error handler.
//!
//! The edge path is the hard real-time boundary: it never allocates,
//! never branches on protocol state, and never reports errors. All
//! anomalies — including overrun — are deferred to decode time.
//!
//! ## Handoff protocol
//!
//! The timestamp buffer and edge counter are shared between the pin
//! interrupt (writer) and the timer callback (reader) without locks.
//! Correctness relies on the temporal handoff: the timer is armed only
//! on the first edge of a block, its duration exceeds the worst-case
//! block length, and the counter is reset only as decode exits. A new
//! block's writes therefore never interleave with an unread one. When
//! both contexts can preempt each other on your platform, wrap the
//! whole receiver in the `timer-isr` helpers
//! ([`crate::timer::global_ir_receiver_init`]) rather than adding a
//! lock inside the edge path.
//!
//! ## Example
//!
//! ```rust
//! use irpulse::protocol::{DecodeError, Packet};
//! use irpulse::recv::{EdgeIrq, IrReceiver};
//! use irpulse::sirc::{Sirc, SircBits};
//! use irpulse::timer::OneShotTimer;
//!
//! struct Irq;
//! impl EdgeIrq for Irq {
//!     fn enable(&mut self) {}
//!     fn disable(&mut self) {}
//! }
//! struct Timer;
//! impl OneShotTimer for Timer {
//!     fn arm(&mut self, _period_us: u32) {}
//!     fn disarm(&mut self) {}
//! }
//!
//! fn on_packet(_packet: Packet) { /* application dispatch */ }
//! fn on_error(_err: DecodeError) { /* count or log */ }
//!
//! let mut rx = IrReceiver::new(Irq, Timer, Sirc::new(SircBits::B12), on_packet);
//! rx.error_function(on_error);
//! // Platform GPIO ISR:   rx.on_edge(now_us);
//! // Platform timer ISR:  rx.block_timeout();
//! rx.close();
//! ```

use crate::consts::{IR_EDGE_BUF_LEN, IR_MAX_EDGES};
use crate::protocol::{DecodeError, DecodeResult, Packet, Protocol};
use crate::timer::OneShotTimer;

/// Pin-interrupt binding for an IR receiver.
///
/// Implementations register a handler for both rising and falling
/// edges on construction of the platform glue; the handler forwards a
/// monotonic microsecond timestamp to [`IrReceiver::on_edge`].
/// `disable` must detach the handler so no further edges are delivered
/// after [`IrReceiver::close`].
pub trait EdgeIrq {
    /// Attach the edge handler.
    fn enable(&mut self);
    /// Detach the edge handler. Must be safe to call repeatedly.
    fn disable(&mut self);
}

/// Interrupt-context timestamp capture with overrun detection.
///
/// Holds a fixed buffer of [`IR_EDGE_BUF_LEN`] signed microsecond
/// timestamps; the active protocol's expected edge count bounds the
/// live region, with one slot beyond it reserved so a single excess
/// edge can be recorded and later classified as an overrun. Once that
/// slot is used, further recordings are silently dropped until
/// [`reset`](EdgeRecorder::reset) — the block is already malformed and
/// decode will report it.
#[derive(Debug)]
pub struct EdgeRecorder {
    times: [i32; IR_EDGE_BUF_LEN],
    nedges: usize,
    edge: usize,
}

impl EdgeRecorder {
    /// Creates a recorder expecting `nedges` edges per block.
    ///
    /// `nedges` must not exceed [`IR_MAX_EDGES`].
    pub fn new(nedges: usize) -> Self {
        debug_assert!(nedges <= IR_MAX_EDGES);
        Self {
            times: [0; IR_EDGE_BUF_LEN],
            nedges,
            edge: 0,
        }
    }

    /// Records one edge timestamp.
    ///
    /// Bounded and allocation-free; safe for interrupt context.
    /// Returns `true` iff this was the first edge of a new block, in
    /// which case the caller arms the block timer.
    pub fn record(&mut self, t_us: i32) -> bool {
        // One slot past nedges is recorded so decode can tell overrun
        // from a complete block; anything later is dropped.
        if self.edge <= self.nedges {
            let first = self.edge == 0;
            self.times[self.edge] = t_us;
            self.edge += 1;
            first
        } else {
            false
        }
    }

    /// Number of edges recorded for the current block.
    pub fn edges(&self) -> usize {
        self.edge
    }

    /// Expected edge count of a complete block.
    pub fn nedges(&self) -> usize {
        self.nedges
    }

    /// Whether more edges arrived than a complete block allows.
    pub fn overrun(&self) -> bool {
        self.edge > self.nedges
    }

    /// The timestamp buffer. Only the first [`edges`](EdgeRecorder::edges)
    /// entries are meaningful for the current block.
    pub fn times(&self) -> &[i32] {
        &self.times
    }

    /// Resets the edge counter, opening the buffer for the next block.
    ///
    /// This is the single synchronization point between the interrupt
    /// writer and the decode reader.
    pub fn reset(&mut self) {
        self.edge = 0;
    }
}

/// Receive half of an IR link: capture, framing, decode dispatch.
///
/// Owns one pin-interrupt binding, one one-shot timer, and one
/// protocol codec, all fixed at construction. The platform glue wires
/// two entry points: the GPIO edge handler calls
/// [`on_edge`](IrReceiver::on_edge) with the current microsecond
/// timestamp, and the timer expiry handler calls
/// [`block_timeout`](IrReceiver::block_timeout).
///
/// ## Dispatch rule
///
/// Valid decodes go to the callback; every [`DecodeError`] — repeat
/// codes included — goes to the error handler. Command `0` is a valid
/// command. The default error handler discards silently: a receiver
/// that never registers one simply ignores malformed traffic, which is
/// the intended out-of-the-box behavior, not an oversight.
///
/// Callbacks are plain `fn` pointers so the receiver type stays
/// nameable inside the `static` singletons the `timer-isr` helpers
/// declare.
#[derive(Debug)]
pub struct IrReceiver<IRQ, TIM, P>
where
    IRQ: EdgeIrq,
    TIM: OneShotTimer,
    P: Protocol,
{
    /// Pin-interrupt binding. Exposed for platform glue.
    pub irq: IRQ,
    /// Block timer. Exposed for platform glue.
    pub tim: TIM,
    proto: P,
    rec: EdgeRecorder,
    callback: fn(Packet),
    errf: fn(DecodeError),
    closed: bool,
}

impl<IRQ, TIM, P> IrReceiver<IRQ, TIM, P>
where
    IRQ: EdgeIrq,
    TIM: OneShotTimer,
    P: Protocol,
{
    /// Creates a receiver and attaches the edge interrupt.
    ///
    /// `callback` is invoked synchronously from decode context on
    /// every valid packet. Errors are discarded until
    /// [`error_function`](IrReceiver::error_function) installs a
    /// handler.
    pub fn new(mut irq: IRQ, tim: TIM, proto: P, callback: fn(Packet)) -> Self {
        irq.enable();
        let rec = EdgeRecorder::new(proto.nedges());
        Self {
            irq,
            tim,
            proto,
            rec,
            callback,
            errf: |_| {},
            closed: false,
        }
    }

    /// Replaces the error handler. Takes effect for the next dispatch.
    pub fn error_function(&mut self, errf: fn(DecodeError)) {
        self.errf = errf;
    }

    /// Edge-interrupt entry point.
    ///
    /// `t_us` is a monotonic microsecond timestamp read by the caller
    /// at interrupt time; wraparound of a narrow platform clock is
    /// tolerated because all decode arithmetic is difference-based.
    /// Bounded and allocation-free. On the first edge of a block the
    /// block timer is armed for the protocol's timeout.
    pub fn on_edge(&mut self, t_us: i32) {
        if self.closed {
            return;
        }
        if self.rec.record(t_us) {
            self.tim.arm(self.proto.tblock_us());
        }
    }

    /// Timer-expiry entry point: decode and dispatch one block.
    ///
    /// Runs the codec over the captured prefix, resets the edge
    /// counter — re-opening capture for the next block — and then
    /// dispatches the result.
    pub fn block_timeout(&mut self) {
        if self.closed {
            return;
        }
        let result = self.proto.decode(self.rec.times(), self.rec.edges());
        self.rec.reset();
        self.dispatch(result);
    }

    /// Routes a decode result: `Ok` to the callback, `Err` to the
    /// error handler.
    ///
    /// Normally invoked from [`block_timeout`](IrReceiver::block_timeout);
    /// exposed so protocol extensions and tests can inject results.
    pub fn dispatch(&mut self, result: DecodeResult) {
        match result {
            Ok(packet) => (self.callback)(packet),
            Err(err) => {
                crate::ir_debug!("ir: block rejected: {}", err);
                (self.errf)(err);
            }
        }
    }

    /// Detaches the edge interrupt and disarms the block timer.
    ///
    /// Idempotent. After `close` returns, no further edges are
    /// recorded and no further decodes or dispatches occur.
    pub fn close(&mut self) {
        self.irq.disable();
        self.tim.disarm();
        self.rec.reset();
        self.closed = true;
    }

    /// Whether [`close`](IrReceiver::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// The codec this receiver was built with.
    pub fn protocol(&self) -> &P {
        &self.proto
    }

    /// The capture state. Read-only; useful for diagnostics.
    pub fn recorder(&self) -> &EdgeRecorder {
        &self.rec
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIRC_TBLOCK_US;
    use crate::sirc::{Sirc, SircBits};
    use crate::testutil::times_from_train;
    use crate::xmit::PulseTrain;
    use core::sync::atomic::{AtomicI32, AtomicU32, AtomicUsize, Ordering};

    #[derive(Debug, Default)]
    struct FakeIrq {
        enabled: bool,
    }

    impl EdgeIrq for FakeIrq {
        fn enable(&mut self) {
            self.enabled = true;
        }
        fn disable(&mut self) {
            self.enabled = false;
        }
    }

    #[derive(Debug, Default)]
    struct FakeTimer {
        armed: bool,
        period_us: u32,
        arm_count: usize,
    }

    impl OneShotTimer for FakeTimer {
        fn arm(&mut self, period_us: u32) {
            self.armed = true;
            self.period_us = period_us;
            self.arm_count += 1;
        }
        fn disarm(&mut self) {
            self.armed = false;
        }
    }

    fn sirc_times(addr: u16, data: u8) -> Vec<i32> {
        let sirc = Sirc::new(SircBits::B12);
        let mut train = PulseTrain::new(sirc.carrier_hz(), sirc.duty_percent());
        sirc.encode(addr, data, 0, &mut train);
        times_from_train(&train)
    }

    #[test]
    fn test_recorder_flags_only_first_edge() {
        let mut rec = EdgeRecorder::new(26);
        assert!(rec.record(0));
        assert!(!rec.record(2400));
        assert!(!rec.record(3000));
        rec.reset();
        assert!(rec.record(50_000));
    }

    #[test]
    fn test_recorder_overrun_suppression() {
        let mut rec = EdgeRecorder::new(4);
        for t in 0..10 {
            let _ = rec.record(t);
        }
        // Four expected edges plus the one overrun slot.
        assert_eq!(rec.edges(), 5);
        assert!(rec.overrun());
        rec.reset();
        assert_eq!(rec.edges(), 0);
        assert!(!rec.overrun());
    }

    #[test]
    fn test_first_edge_arms_block_timer() {
        static GOOD: AtomicUsize = AtomicUsize::new(0);
        fn cb(_: Packet) {
            let _ = GOOD.fetch_add(1, Ordering::SeqCst);
        }

        let sirc = Sirc::new(SircBits::B12);
        let mut rx = IrReceiver::new(FakeIrq::default(), FakeTimer::default(), sirc, cb);
        assert!(rx.irq.enabled);

        for t in sirc_times(0x05, 0x3A) {
            rx.on_edge(t);
        }
        assert_eq!(rx.tim.arm_count, 1);
        assert_eq!(rx.tim.period_us, SIRC_TBLOCK_US);
    }

    #[test]
    fn test_block_dispatches_packet_and_resets() {
        static CMD: AtomicI32 = AtomicI32::new(-1);
        static ADDR: AtomicU32 = AtomicU32::new(u32::MAX);
        static GOOD: AtomicUsize = AtomicUsize::new(0);
        fn cb(p: Packet) {
            CMD.store(i32::from(p.cmd), Ordering::SeqCst);
            ADDR.store(u32::from(p.addr), Ordering::SeqCst);
            let _ = GOOD.fetch_add(1, Ordering::SeqCst);
        }

        let mut rx = IrReceiver::new(
            FakeIrq::default(),
            FakeTimer::default(),
            Sirc::new(SircBits::B12),
            cb,
        );

        for round in 0..2 {
            for t in sirc_times(0x05, 0x3A) {
                rx.on_edge(t);
            }
            rx.block_timeout();
            assert_eq!(GOOD.load(Ordering::SeqCst), round + 1);
            assert_eq!(rx.recorder().edges(), 0);
        }
        assert_eq!(CMD.load(Ordering::SeqCst), 0x3A);
        assert_eq!(ADDR.load(Ordering::SeqCst), 0x05);
        assert_eq!(rx.tim.arm_count, 2);
    }

    #[test]
    fn test_spurious_timeout_reports_bad_start() {
        static GOOD: AtomicUsize = AtomicUsize::new(0);
        static ERR: AtomicI32 = AtomicI32::new(0);
        fn cb(_: Packet) {
            let _ = GOOD.fetch_add(1, Ordering::SeqCst);
        }
        fn errf(e: DecodeError) {
            ERR.store(i32::from(e.code()), Ordering::SeqCst);
        }

        let mut rx = IrReceiver::new(
            FakeIrq::default(),
            FakeTimer::default(),
            Sirc::new(SircBits::B12),
            cb,
        );
        rx.error_function(errf);
        rx.block_timeout();
        assert_eq!(GOOD.load(Ordering::SeqCst), 0);
        assert_eq!(ERR.load(Ordering::SeqCst), i32::from(DecodeError::BadStart.code()));
    }

    #[test]
    fn test_overrun_block_reports_overrun() {
        static ERR: AtomicI32 = AtomicI32::new(0);
        fn cb(_: Packet) {}
        fn errf(e: DecodeError) {
            ERR.store(i32::from(e.code()), Ordering::SeqCst);
        }

        let mut rx = IrReceiver::new(
            FakeIrq::default(),
            FakeTimer::default(),
            Sirc::new(SircBits::B12),
            cb,
        );
        rx.error_function(errf);
        for t in 0..40 {
            rx.on_edge(t * 700);
        }
        assert_eq!(rx.recorder().edges(), 27);
        rx.block_timeout();
        assert_eq!(ERR.load(Ordering::SeqCst), i32::from(DecodeError::Overrun.code()));
    }

    #[test]
    fn test_close_silences_and_is_idempotent() {
        static GOOD: AtomicUsize = AtomicUsize::new(0);
        static ERRS: AtomicUsize = AtomicUsize::new(0);
        fn cb(_: Packet) {
            let _ = GOOD.fetch_add(1, Ordering::SeqCst);
        }
        fn errf(_: DecodeError) {
            let _ = ERRS.fetch_add(1, Ordering::SeqCst);
        }

        let mut rx = IrReceiver::new(
            FakeIrq::default(),
            FakeTimer::default(),
            Sirc::new(SircBits::B12),
            cb,
        );
        rx.error_function(errf);
        rx.on_edge(0);
        rx.close();
        rx.close();
        assert!(rx.is_closed());
        assert!(!rx.irq.enabled);
        assert!(!rx.tim.armed);

        rx.on_edge(1_000);
        rx.block_timeout();
        assert_eq!(GOOD.load(Ordering::SeqCst), 0);
        assert_eq!(ERRS.load(Ordering::SeqCst), 0);
        assert_eq!(rx.recorder().edges(), 0);
    }
}
