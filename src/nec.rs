//! NEC protocol codec.
//!
//! NEC is a pulse-distance protocol: all marks are 563 µs bursts and
//! the bits live in the spaces (563 µs for `0`, 1687 µs for `1`). A
//! data block opens with a 9 ms mark and 4.5 ms space, then carries 32
//! bits LSB first: a 16-bit address group followed by the 8-bit command
//! and its complement, closed by a trailing burst. 68 edges in total.
//!
//! While a button is held the remote sends repeat blocks instead of
//! data: the 9 ms mark, a short 2.25 ms space, and a single burst —
//! four edges. These decode to [`DecodeError::Repeat`] and reach the
//! application through the receiver's error handler.
//!
//! ## Addressing
//!
//! Standard NEC sends an 8-bit address followed by its complement; the
//! extended variant reuses the complement byte as the high address
//! byte. A standard-variant codec rejects blocks whose complement
//! check fails with [`DecodeError::BadAddr`]; an extended codec passes
//! the full 16 bits through. Blocks whose high byte happens to equal
//! the complement of the low byte are indistinguishable from standard
//! addressing on the wire and decode as 8-bit addresses.

use crate::consts::{
    NEC_CARRIER_HZ, NEC_DATA_SPACE_MIN, NEC_DUTY_PERCENT, NEC_LEAD_MARK, NEC_LEAD_MARK_MIN,
    NEC_LEAD_SPACE, NEC_NEDGES, NEC_ONE_THRESHOLD_US, NEC_REPEAT_EDGES, NEC_REPEAT_SPACE_MIN,
    NEC_T_ONE, NEC_TBLOCK_US, NEC_TBURST,
};
use crate::protocol::{DecodeError, DecodeResult, Packet, Protocol};
use crate::xmit::PulseTrain;

/// NEC codec, standard (8-bit) or extended (16-bit) addressing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct Nec {
    extended: bool,
}

impl Nec {
    /// Codec for standard NEC: 8-bit address plus complement.
    pub const fn standard() -> Self {
        Self { extended: false }
    }

    /// Codec for extended NEC: 16-bit address, no complement check.
    pub const fn extended() -> Self {
        Self { extended: true }
    }

    /// Whether this codec accepts 16-bit addresses.
    pub const fn is_extended(&self) -> bool {
        self.extended
    }
}

impl Protocol for Nec {
    fn nedges(&self) -> usize {
        NEC_NEDGES
    }

    fn tblock_us(&self) -> u32 {
        NEC_TBLOCK_US
    }

    fn carrier_hz(&self) -> u32 {
        NEC_CARRIER_HZ
    }

    fn duty_percent(&self) -> u8 {
        NEC_DUTY_PERCENT
    }

    fn decode(&self, times: &[i32], edges: usize) -> DecodeResult {
        if edges == 0 {
            return Err(DecodeError::BadStart);
        }
        if edges > NEC_NEDGES {
            return Err(DecodeError::Overrun);
        }
        if edges < NEC_REPEAT_EDGES {
            return Err(DecodeError::BadBlock);
        }

        let width = times[1].wrapping_sub(times[0]);
        if width < NEC_LEAD_MARK_MIN {
            return Err(DecodeError::BadStart);
        }

        let gap = times[2].wrapping_sub(times[1]);
        let val = if gap > NEC_DATA_SPACE_MIN {
            if edges < NEC_NEDGES {
                return Err(DecodeError::BadBlock);
            }
            // Time the spaces only; marks are always 563 µs. The
            // trailing burst is skipped.
            let mut val: u32 = 0;
            for edge in (3..NEC_NEDGES - 2).step_by(2) {
                val >>= 1;
                if times[edge + 1].wrapping_sub(times[edge]) > NEC_ONE_THRESHOLD_US {
                    val |= 0x8000_0000;
                }
            }
            val
        } else if gap > NEC_REPEAT_SPACE_MIN {
            return Err(if edges == NEC_REPEAT_EDGES {
                DecodeError::Repeat
            } else {
                DecodeError::BadRep
            });
        } else {
            return Err(DecodeError::BadStart);
        };

        let mut addr = (val & 0xff) as u16;
        let cmd = ((val >> 16) & 0xff) as u8;
        if u32::from(cmd) != (val >> 24) ^ 0xff {
            return Err(DecodeError::BadData);
        }
        if u32::from(addr) != ((val >> 8) ^ 0xff) & 0xff {
            if !self.extended {
                return Err(DecodeError::BadAddr);
            }
            addr |= (val & 0xff00) as u16;
        }
        Ok(Packet { addr, cmd, ext: 0 })
    }

    fn encode(&self, addr: u16, data: u8, _ext: u8, train: &mut PulseTrain) {
        train.append(NEC_LEAD_MARK, NEC_LEAD_SPACE);
        let mut a = u32::from(addr);
        if addr < 0x100 {
            // Short address: send the complement in the high byte.
            a |= (a ^ 0xff) << 8;
        }
        for x in 0..16 {
            let space = if a >> x & 1 == 1 { NEC_T_ONE } else { NEC_TBURST };
            train.append(NEC_TBURST, space);
        }
        let d = u32::from(data) | ((u32::from(data) ^ 0xff) << 8);
        for x in 0..16 {
            let space = if d >> x & 1 == 1 { NEC_T_ONE } else { NEC_TBURST };
            train.append(NEC_TBURST, space);
        }
        train.append_mark(NEC_TBURST);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::times_from_train;

    fn encode_to_times(nec: &Nec, addr: u16, data: u8) -> Vec<i32> {
        let mut train = PulseTrain::new(nec.carrier_hz(), nec.duty_percent());
        nec.encode(addr, data, 0, &mut train);
        times_from_train(&train)
    }

    fn repeat_block() -> Vec<i32> {
        // 9 ms mark, 2.25 ms space, single burst.
        vec![0, 9000, 9000 + 2250, 9000 + 2250 + 563]
    }

    #[test]
    fn test_round_trip_standard_address() {
        let nec = Nec::standard();
        let times = encode_to_times(&nec, 0x04, 0x18);
        assert_eq!(times.len(), 68);
        let packet = nec.decode(&times, times.len()).unwrap();
        assert_eq!(
            packet,
            Packet {
                addr: 0x04,
                cmd: 0x18,
                ext: 0
            }
        );
    }

    #[test]
    fn test_round_trip_extended_address() {
        let nec = Nec::extended();
        let times = encode_to_times(&nec, 0x1234, 0x5A);
        let packet = nec.decode(&times, times.len()).unwrap();
        assert_eq!(
            packet,
            Packet {
                addr: 0x1234,
                cmd: 0x5A,
                ext: 0
            }
        );
    }

    #[test]
    fn test_extended_block_rejected_by_standard_codec() {
        let times = encode_to_times(&Nec::extended(), 0x1234, 0x5A);
        assert_eq!(
            Nec::standard().decode(&times, times.len()),
            Err(DecodeError::BadAddr)
        );
    }

    #[test]
    fn test_repeat_block_classification() {
        let nec = Nec::standard();
        let times = repeat_block();
        assert_eq!(nec.decode(&times, times.len()), Err(DecodeError::Repeat));
    }

    #[test]
    fn test_malformed_repeat_is_bad_rep() {
        let nec = Nec::standard();
        let mut times = repeat_block();
        times.push(times[3] + 563);
        assert_eq!(nec.decode(&times, times.len()), Err(DecodeError::BadRep));
    }

    #[test]
    fn test_corrupted_command_complement_is_bad_data() {
        let nec = Nec::standard();
        let mut times = encode_to_times(&nec, 0x04, 0x18);
        // Widen the space carrying command bit 0 (wire bit 16) from a
        // zero-space to a one-space.
        let edge = 3 + 2 * 16;
        let delta = i32::from(NEC_T_ONE - NEC_TBURST);
        for t in times.iter_mut().skip(edge + 1) {
            *t += delta;
        }
        assert_eq!(nec.decode(&times, times.len()), Err(DecodeError::BadData));
    }

    #[test]
    fn test_truncated_data_block_is_bad_block() {
        let nec = Nec::standard();
        let times = encode_to_times(&nec, 0x04, 0x18);
        assert_eq!(nec.decode(&times[..50], 50), Err(DecodeError::BadBlock));
    }

    #[test]
    fn test_zero_edges_is_bad_start() {
        assert_eq!(Nec::standard().decode(&[], 0), Err(DecodeError::BadStart));
    }

    #[test]
    fn test_overrun_reported_first() {
        let times = [0i32; 69];
        assert_eq!(
            Nec::standard().decode(&times, 69),
            Err(DecodeError::Overrun)
        );
    }

    #[test]
    fn test_short_lead_mark_is_bad_start() {
        let nec = Nec::standard();
        let mut times = encode_to_times(&nec, 0x04, 0x18);
        // Shrink the 9 ms lead mark below the acceptance floor.
        let shift = times[1] - times[0] - 3000;
        for t in times.iter_mut().skip(1) {
            *t -= shift;
        }
        assert_eq!(
            nec.decode(&times, times.len()),
            Err(DecodeError::BadStart)
        );
    }

    #[test]
    fn test_command_zero_is_valid() {
        let nec = Nec::standard();
        let times = encode_to_times(&nec, 0x00, 0x00);
        let packet = nec.decode(&times, times.len()).unwrap();
        assert_eq!(packet.cmd, 0);
        assert_eq!(packet.addr, 0);
    }
}
