//! Idle-state command opcodes
//!
//! These bytes are only interpreted as commands while the parser is idle;
//! in any other state the same values are address, length or data bytes.

/// Open an I2C transaction (start condition follows)
pub const CMD_START: u8 = b'S';

/// Close the current I2C transaction (stop condition)
pub const CMD_STOP: u8 = b'P';

/// Return and clear the accumulated error flags
pub const CMD_GET_ERRORS: u8 = b'E';

/// A decoded idle-state command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// `'S'` - open an I2C transaction
    Start,
    /// `'P'` - close the open I2C transaction
    Stop,
    /// `'E'` - drain the error flags
    GetErrors,
}

impl Command {
    /// Decode an idle-state byte into a command
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            CMD_START => Some(Command::Start),
            CMD_STOP => Some(Command::Stop),
            CMD_GET_ERRORS => Some(Command::GetErrors),
            _ => None,
        }
    }

    /// Convert to the wire byte
    pub fn to_byte(self) -> u8 {
        match self {
            Command::Start => CMD_START,
            Command::Stop => CMD_STOP,
            Command::GetErrors => CMD_GET_ERRORS,
        }
    }
}
