//! Logical button to report bit mapping, and protocol token lookup.
//!
//! The report bits follow the HORI Pokken Tournament Pro Pad layout, which
//! the Switch recognizes as a Pro Controller. The first 13 bits are the
//! pad's own buttons; Capture was found in the remaining 3 "unused" bits.

use crate::types::{Buttons, LogicalButton};

/// Report bit for each logical button, indexed by [`LogicalButton::index`].
pub const BUTTON_MAP: [u16; 16] = [
    0x0001, // Y
    0x0002, // B
    0x0004, // A
    0x0008, // X
    0x0010, // L
    0x0020, // R
    0x0040, // ZL
    0x0080, // ZR
    0x0100, // Minus
    0x0200, // Plus
    0x0400, // L-stick
    0x0800, // R-stick
    0x1000, // Home
    0x2000, // Capture
    0x4000, // Unknown
    0x8000, // Unknown
];

/// Report bit for a single logical button.
#[inline]
#[must_use]
pub const fn report_bit(button: LogicalButton) -> u16 {
    BUTTON_MAP[button.index()]
}

/// Translate a logical button mask into the report's button bitfield.
#[must_use]
pub fn report_bits(buttons: Buttons) -> u16 {
    buttons
        .pressed()
        .fold(0u16, |bits, button| bits | report_bit(button))
}

/// Button addressed by a single-letter protocol token, if any.
///
/// Only 10 of the 16 logical buttons are reachable from the serial
/// protocol: `Q` and `P` stand for ZL and ZR.
#[inline]
#[must_use]
pub const fn button_for_token(token: u8) -> Option<LogicalButton> {
    Some(match token {
        b'Y' => LogicalButton::Y,
        b'B' => LogicalButton::B,
        b'A' => LogicalButton::A,
        b'X' => LogicalButton::X,
        b'L' => LogicalButton::L,
        b'R' => LogicalButton::R,
        b'Q' => LogicalButton::ZL,
        b'P' => LogicalButton::ZR,
        b'-' => LogicalButton::Minus,
        b'+' => LogicalButton::Plus,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_matches_pokken_layout() {
        assert_eq!(report_bit(LogicalButton::Y), 0x01);
        assert_eq!(report_bit(LogicalButton::ZR), 0x80);
        assert_eq!(report_bit(LogicalButton::Plus), 0x200);
        assert_eq!(report_bit(LogicalButton::Home), 0x1000);
        assert_eq!(report_bit(LogicalButton::Capture), 0x2000);
        assert_eq!(report_bit(LogicalButton::Unk1), 0x8000);
    }

    #[test]
    fn test_every_entry_is_a_distinct_single_bit() {
        let mut seen = 0u16;
        for bit in BUTTON_MAP {
            assert_eq!(bit.count_ones(), 1);
            assert_eq!(seen & bit, 0);
            seen |= bit;
        }
        assert_eq!(seen, 0xFFFF);
    }

    #[test]
    fn test_report_bits() {
        assert_eq!(report_bits(Buttons::NONE), 0);
        assert_eq!(report_bits(Buttons::A | Buttons::B), 0x06);
        assert_eq!(report_bits(Buttons(0xFFFF)), 0xFFFF);
    }

    #[test]
    fn test_token_table() {
        assert_eq!(button_for_token(b'Q'), Some(LogicalButton::ZL));
        assert_eq!(button_for_token(b'P'), Some(LogicalButton::ZR));
        assert_eq!(button_for_token(b'-'), Some(LogicalButton::Minus));
        assert_eq!(button_for_token(b'+'), Some(LogicalButton::Plus));
        assert_eq!(button_for_token(b'S'), None);
        assert_eq!(button_for_token(b'U'), None);
        assert_eq!(button_for_token(b'a'), None);
    }
}
