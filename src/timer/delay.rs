use crate::xmit::PulseTrain;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

/// Plays one encoded pulse train by gating a carrier pin.
///
/// This is a blocking reference player for platforms whose carrier is
/// generated in hardware (a PWM channel running at the train's
/// [`carrier_hz`](PulseTrain::carrier_hz) and duty cycle) and gated by
/// a digital enable pin: the gate is driven high for each mark and low
/// for each space, with a `DelayNs` provider supplying the timing.
///
/// # Arguments
/// - `train`: The encoded mark/space sequence to play.
/// - `gate`: Output pin enabling the modulated carrier while high.
/// - `delay`: A delay provider, typically from the HAL.
///
/// # Example
/// ```ignore
/// let mut tx = IrTransmitter::new(Sirc::new(SircBits::B12));
/// let train = tx.transmit(0x05, 0x3A, 0);
/// play_pulse_train(train, &mut gate_pin, &mut delay);
/// ```
///
/// # Notes
/// - Timing accuracy is bounded by the delay provider; busy-wait
///   delays from the HAL are usually accurate enough for the 600 µs
///   granularity of remote-control protocols.
/// - Pin errors are ignored, which is acceptable in typical HALs where
///   the only error case is an uninitialized peripheral.
/// - The gate is left low when the function returns.
pub fn play_pulse_train<G, D>(train: &PulseTrain, gate: &mut G, delay: &mut D)
where
    G: OutputPin,
    D: DelayNs,
{
    for (mark, space) in train.pairs() {
        let _ = gate.set_high();
        delay.delay_us(u32::from(mark));
        let _ = gate.set_low();
        if space > 0 {
            delay.delay_us(u32::from(space));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };

    #[test]
    fn test_player_gates_marks_and_spaces() {
        let mut train = PulseTrain::new(40_000, 30);
        train.append(2400, 600);
        train.append(1200, 600);

        let mut gate = PinMock::new(&[
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
        ]);
        let mut delay = NoopDelay::new();

        play_pulse_train(&train, &mut gate, &mut delay);
        gate.done();
    }

    #[test]
    fn test_player_handles_trailing_mark() {
        let mut train = PulseTrain::new(38_000, 33);
        train.append(9000, 4500);
        train.append_mark(563);

        let mut gate = PinMock::new(&[
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
        ]);
        let mut delay = NoopDelay::new();

        play_pulse_train(&train, &mut gate, &mut delay);
        gate.done();
    }
}
