use crate::protocol::{Packet, Protocol};
use crate::recv::{EdgeIrq, IrReceiver};
use crate::timer::OneShotTimer;
use core::cell::RefCell;
use critical_section::Mutex;

/// Creates the empty global static slot for an [`IrReceiver`] shared
/// between the pin ISR and the timer ISR.
///
/// On platforms where the two interrupt handlers can preempt each
/// other, the receiver lives in a `critical_section` mutex and both
/// handlers go through these helpers. The mutex serializes the
/// handlers; the receiver's own arm/reset handoff still governs the
/// buffer lifecycle inside.
///
/// # Example
/// ```ignore
/// static IR_RECEIVER: Mutex<RefCell<Option<IrReceiver<Irq, Timer, Sirc>>>> =
///     global_ir_receiver_init::<Irq, Timer, Sirc>();
/// ```
pub const fn global_ir_receiver_init<IRQ: EdgeIrq, TIM: OneShotTimer, P: Protocol>()
-> Mutex<RefCell<Option<IrReceiver<IRQ, TIM, P>>>> {
    Mutex::new(RefCell::new(None))
}

/// Stores a freshly constructed receiver into the global slot.
///
/// # Example
/// ```ignore
/// fn main() {
///     global_ir_receiver_setup(&IR_RECEIVER, irq, timer, Sirc::new(SircBits::B12), on_packet);
/// }
/// ```
pub fn global_ir_receiver_setup<IRQ: EdgeIrq, TIM: OneShotTimer, P: Protocol>(
    global: &'static Mutex<RefCell<Option<IrReceiver<IRQ, TIM, P>>>>,
    irq: IRQ,
    tim: TIM,
    proto: P,
    callback: fn(Packet),
) {
    critical_section::with(|cs| {
        let _ = global
            .borrow(cs)
            .replace(Some(IrReceiver::new(irq, tim, proto, callback)));
    });
}

/// Forwards one edge timestamp to the global receiver.
///
/// Call from the GPIO edge interrupt with the current monotonic
/// microsecond count.
///
/// # Example
/// ```ignore
/// #[interrupt]
/// fn EXTI0() {
///     global_ir_on_edge(&IR_RECEIVER, now_us());
/// }
/// ```
pub fn global_ir_on_edge<IRQ: EdgeIrq, TIM: OneShotTimer, P: Protocol>(
    global: &'static Mutex<RefCell<Option<IrReceiver<IRQ, TIM, P>>>>,
    t_us: i32,
) {
    critical_section::with(|cs| {
        if let Some(rx) = global.borrow(cs).borrow_mut().as_mut() {
            rx.on_edge(t_us);
        }
    });
}

/// Runs block decode and dispatch on the global receiver.
///
/// Call from the block timer's expiry interrupt.
///
/// # Example
/// ```ignore
/// #[interrupt]
/// fn TIM2() {
///     global_ir_block_timeout(&IR_RECEIVER);
/// }
/// ```
pub fn global_ir_block_timeout<IRQ: EdgeIrq, TIM: OneShotTimer, P: Protocol>(
    global: &'static Mutex<RefCell<Option<IrReceiver<IRQ, TIM, P>>>>,
) {
    critical_section::with(|cs| {
        if let Some(rx) = global.borrow(cs).borrow_mut().as_mut() {
            rx.block_timeout();
        }
    });
}

/// Closes the global receiver, detaching its interrupt and timer.
pub fn global_ir_close<IRQ: EdgeIrq, TIM: OneShotTimer, P: Protocol>(
    global: &'static Mutex<RefCell<Option<IrReceiver<IRQ, TIM, P>>>>,
) {
    critical_section::with(|cs| {
        if let Some(rx) = global.borrow(cs).borrow_mut().as_mut() {
            rx.close();
        }
    });
}
