//! Input and output report structures exchanged with the USB transport.

use crate::types::Axes;

/// Input report delivered to the host.
///
/// Wire layout (8 bytes, HORI Pokken Tournament Pro Pad):
///
/// | Byte | Field |
/// |------|-------|
/// | 0-1  | Button bitfield (little endian) |
/// | 2    | Hat switch, always centered |
/// | 3-6  | LX, LY, RX, RY |
/// | 7    | Vendor specific, always 0 |
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(C)]
pub struct InputReport {
    /// Button bitfield, already translated through the button map.
    pub buttons: u16,
    pub lx: u8,
    pub ly: u8,
    pub rx: u8,
    pub ry: u8,
}

impl InputReport {
    /// Size of the report in bytes.
    pub const SIZE: usize = 8;

    /// Hat switch value meaning "no direction".
    pub const HAT_CENTER: u8 = 0x08;

    /// All-zero report.
    #[must_use]
    pub const fn zeroed() -> Self {
        Self {
            buttons: 0,
            lx: 0,
            ly: 0,
            rx: 0,
            ry: 0,
        }
    }

    /// Report of an idle pad: no buttons, both sticks centered.
    pub const NEUTRAL: Self = Self {
        buttons: 0,
        lx: Axes::CENTER_VALUE,
        ly: Axes::CENTER_VALUE,
        rx: Axes::CENTER_VALUE,
        ry: Axes::CENTER_VALUE,
    };

    /// Convert the report to bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; Self::SIZE] {
        let buttons = self.buttons.to_le_bytes();
        [
            buttons[0],
            buttons[1],
            Self::HAT_CENTER,
            self.lx,
            self.ly,
            self.rx,
            self.ry,
            0,
        ]
    }
}

/// Output report received from the host.
///
/// The pad accepts these to keep the endpoint flowing but never acts on
/// their contents.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutputReport(pub [u8; 8]);

impl OutputReport {
    /// Size of the report in bytes.
    pub const SIZE: usize = 8;

    /// Copy a report out of a received packet.
    ///
    /// Short packets are zero padded and long ones are cut.
    #[must_use]
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut bytes = [0u8; Self::SIZE];
        let len = data.len().min(Self::SIZE);
        bytes[..len].copy_from_slice(&data[..len]);
        Self(bytes)
    }
}
