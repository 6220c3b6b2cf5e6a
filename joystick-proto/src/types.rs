//! Core controller types: Buttons, LogicalButton, Stick, Axes.

use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

/// Logical button state as a 16-bit mask.
///
/// Bit `i` is the logical button with index `i` (see [`LogicalButton`]).
/// The mask is translated to report bits by [`crate::mapping::BUTTON_MAP`]
/// when a report is synthesized.
///
/// # Example
///
/// ```
/// use joystick_proto::Buttons;
///
/// let buttons = Buttons::A | Buttons::B;
/// assert!(buttons.contains(Buttons::A));
/// assert!(buttons.contains(Buttons::B));
/// assert!(!buttons.contains(Buttons::X));
/// ```
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Buttons(pub u16);

impl Buttons {
    pub const Y: Self = Self(1 << 0);
    pub const B: Self = Self(1 << 1);
    pub const A: Self = Self(1 << 2);
    pub const X: Self = Self(1 << 3);
    pub const L: Self = Self(1 << 4);
    pub const R: Self = Self(1 << 5);
    pub const ZL: Self = Self(1 << 6);
    pub const ZR: Self = Self(1 << 7);
    pub const MINUS: Self = Self(1 << 8);
    pub const PLUS: Self = Self(1 << 9);
    pub const LSTICK: Self = Self(1 << 10); // Left stick press
    pub const RSTICK: Self = Self(1 << 11); // Right stick press
    pub const HOME: Self = Self(1 << 12);
    pub const CAPTURE: Self = Self(1 << 13);
    pub const UNK0: Self = Self(1 << 14);
    pub const UNK1: Self = Self(1 << 15);

    /// No buttons pressed.
    pub const NONE: Self = Self(0);

    /// Check if the given button(s) are pressed.
    #[inline]
    #[must_use]
    pub const fn contains(self, button: Buttons) -> bool {
        (self.0 & button.0) == button.0
    }

    /// Check if the given logical button is pressed.
    #[inline]
    #[must_use]
    pub const fn is_pressed(self, button: LogicalButton) -> bool {
        self.contains(button.mask())
    }

    /// Set or clear button(s).
    #[inline]
    pub fn set(&mut self, button: Buttons, pressed: bool) {
        if pressed {
            self.0 |= button.0;
        } else {
            self.0 &= !button.0;
        }
    }

    /// Release every button.
    #[inline]
    pub fn clear(&mut self) {
        self.0 = 0;
    }

    /// Get the raw u16 value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Check if no buttons are pressed.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate over the pressed logical buttons in index order.
    pub fn pressed(self) -> impl Iterator<Item = LogicalButton> {
        LogicalButton::ALL
            .into_iter()
            .filter(move |button| self.is_pressed(*button))
    }
}

impl From<LogicalButton> for Buttons {
    #[inline]
    fn from(button: LogicalButton) -> Self {
        button.mask()
    }
}

impl BitOr for Buttons {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Buttons {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Buttons {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl BitAndAssign for Buttons {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl Not for Buttons {
    type Output = Self;

    #[inline]
    fn not(self) -> Self::Output {
        Self(!self.0)
    }
}

/// One of the 16 semantic controller inputs.
///
/// The discriminant is the logical bit index inside [`Buttons`] and the
/// row of [`crate::mapping::BUTTON_MAP`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum LogicalButton {
    Y = 0,
    B = 1,
    A = 2,
    X = 3,
    L = 4,
    R = 5,
    ZL = 6,
    ZR = 7,
    Minus = 8,
    Plus = 9,
    LStick = 10,
    RStick = 11,
    Home = 12,
    Capture = 13,
    Unk0 = 14,
    Unk1 = 15,
}

impl LogicalButton {
    /// Every logical button, in index order.
    pub const ALL: [Self; 16] = [
        Self::Y,
        Self::B,
        Self::A,
        Self::X,
        Self::L,
        Self::R,
        Self::ZL,
        Self::ZR,
        Self::Minus,
        Self::Plus,
        Self::LStick,
        Self::RStick,
        Self::Home,
        Self::Capture,
        Self::Unk0,
        Self::Unk1,
    ];

    /// Logical bit index (0..16).
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Single-bit logical mask for this button.
    #[inline]
    #[must_use]
    pub const fn mask(self) -> Buttons {
        Buttons(1 << self as u16)
    }
}

/// Which analog stick an axis update targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Stick {
    Left,
    Right,
}

/// Analog axes, one byte each. 127 is center.
///
/// Values are used verbatim; there is no clamping or dead zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Axes {
    pub lx: u8,
    pub ly: u8,
    pub rx: u8,
    pub ry: u8,
}

impl Axes {
    /// Center position of every axis.
    pub const CENTER_VALUE: u8 = 127;

    /// Both sticks centered.
    pub const CENTERED: Self = Self {
        lx: Self::CENTER_VALUE,
        ly: Self::CENTER_VALUE,
        rx: Self::CENTER_VALUE,
        ry: Self::CENTER_VALUE,
    };

    /// Update one stick's X/Y pair.
    #[inline]
    pub fn set_stick(&mut self, stick: Stick, x: u8, y: u8) {
        match stick {
            Stick::Left => {
                self.lx = x;
                self.ly = y;
            }
            Stick::Right => {
                self.rx = x;
                self.ry = y;
            }
        }
    }
}

impl Default for Axes {
    fn default() -> Self {
        Self::CENTERED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buttons_set_clear() {
        let mut buttons = Buttons::NONE;
        buttons.set(Buttons::A, true);
        assert!(buttons.is_pressed(LogicalButton::A));
        buttons.set(Buttons::A, false);
        assert!(!buttons.is_pressed(LogicalButton::A));
    }

    #[test]
    fn test_logical_button_masks_follow_index() {
        for (i, button) in LogicalButton::ALL.iter().enumerate() {
            assert_eq!(button.index(), i);
            assert_eq!(button.mask().raw(), 1 << i);
        }
    }

    #[test]
    fn test_pressed_iterates_in_index_order() {
        let buttons = Buttons::HOME | Buttons::Y | Buttons::ZR;
        let mut pressed = buttons.pressed();
        assert_eq!(pressed.next(), Some(LogicalButton::Y));
        assert_eq!(pressed.next(), Some(LogicalButton::ZR));
        assert_eq!(pressed.next(), Some(LogicalButton::Home));
        assert_eq!(pressed.next(), None);
    }

    #[test]
    fn test_axes_default_centered() {
        let axes = Axes::default();
        assert_eq!(axes, Axes::CENTERED);
        assert_eq!(axes.lx, 127);
        assert_eq!(axes.ry, 127);
    }

    #[test]
    fn test_set_stick_touches_one_pair() {
        let mut axes = Axes::default();
        axes.set_stick(Stick::Right, 0, 255);
        assert_eq!(axes.lx, 127);
        assert_eq!(axes.ly, 127);
        assert_eq!(axes.rx, 0);
        assert_eq!(axes.ry, 255);
    }
}
