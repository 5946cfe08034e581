/// Declares a static global `IR_RECEIVER` singleton protected by a
/// `critical_section` mutex.
///
/// This macro creates the `static` slot both interrupt handlers share
/// on platforms where the pin ISR and the block-timer ISR can preempt
/// each other.
///
/// # Arguments
/// - `$irq`: The concrete pin-interrupt binding type (must implement
///   [`EdgeIrq`](crate::recv::EdgeIrq))
/// - `$tim`: The concrete timer type (must implement
///   [`OneShotTimer`](crate::timer::OneShotTimer))
/// - `$proto`: The concrete protocol codec type
///
/// # Example
/// ```ignore
/// init_ir_receiver!(MyIrqType, MyTimerType, Sirc);
/// ```
#[macro_export]
macro_rules! init_ir_receiver {
    ( $irq:ty, $tim:ty, $proto:ty ) => {
        pub static IR_RECEIVER: $crate::critical_section::Mutex<
            core::cell::RefCell<Option<$crate::recv::IrReceiver<$irq, $tim, $proto>>>,
        > = $crate::critical_section::Mutex::new(core::cell::RefCell::new(None));
    };
}

/// Initializes the global `IR_RECEIVER` singleton with a new receiver
/// instance.
///
/// Wraps construction of the [`IrReceiver`](crate::recv::IrReceiver)
/// and stores it inside the slot declared by
/// [`init_ir_receiver!`](crate::init_ir_receiver).
///
/// # Arguments
/// - `$irq`: The pin-interrupt binding value
/// - `$tim`: The block-timer value
/// - `$proto`: The protocol codec value
/// - `$callback`: A `fn(Packet)` invoked on every valid decode
///
/// # Example
/// ```ignore
/// fn main() {
///     setup_ir_receiver!(irq, timer, Sirc::new(SircBits::B12), on_packet);
/// }
/// ```
///
/// # Notes
/// - Requires `init_ir_receiver!` to have been used earlier.
#[macro_export]
macro_rules! setup_ir_receiver {
    ( $irq:expr, $tim:expr, $proto:expr, $callback:expr ) => {
        $crate::critical_section::with(|cs| {
            let _ = IR_RECEIVER.borrow(cs).replace(Some(
                $crate::recv::IrReceiver::new($irq, $tim, $proto, $callback),
            ));
        })
    };
}

/// Forwards one edge timestamp to the `IR_RECEIVER` singleton.
///
/// Call from the GPIO edge interrupt with the current monotonic
/// microsecond count.
///
/// # Example
/// ```ignore
/// #[interrupt]
/// fn EXTI0() {
///     ir_on_edge!(now_us());
/// }
/// ```
#[macro_export]
macro_rules! ir_on_edge {
    ( $t_us:expr ) => {
        $crate::critical_section::with(|cs| {
            if let Some(rx) = IR_RECEIVER.borrow(cs).borrow_mut().as_mut() {
                rx.on_edge($t_us);
            }
        })
    };
}

/// Runs block decode and dispatch on the `IR_RECEIVER` singleton.
///
/// Call from the block timer's expiry interrupt.
///
/// # Example
/// ```ignore
/// #[interrupt]
/// fn TIM2() {
///     ir_block_timeout!();
/// }
/// ```
#[macro_export]
macro_rules! ir_block_timeout {
    () => {
        $crate::critical_section::with(|cs| {
            if let Some(rx) = IR_RECEIVER.borrow(cs).borrow_mut().as_mut() {
                rx.block_timeout();
            }
        })
    };
}
