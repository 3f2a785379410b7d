//! Protocol command definitions

use std::fmt;

use crate::error::{Error, Result};

/// Protocol command codes
///
/// The closed set of commands the reader understands. The write variants
/// have no typed wrapper in the device interface and are reachable only
/// through the raw-command escape hatch.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Command {
    /// Read device model information
    Info = 0x0102,

    /// Drive the buzzer for a number of beep units
    Beep = 0x0103,

    /// Switch the LED off, red or green
    Led = 0x0104,

    /// Probe for a tag and read its identifier
    Read = 0x010C,

    /// First tag write variant
    Write2 = 0x020C,

    /// Second tag write variant
    Write3 = 0x030C,
}

impl Command {
    /// Get command name
    pub fn name(self) -> &'static str {
        match self {
            Self::Info => "CMD_INFO",
            Self::Beep => "CMD_BEEP",
            Self::Led => "CMD_LED",
            Self::Read => "CMD_READ",
            Self::Write2 => "CMD_WRITE2",
            Self::Write3 => "CMD_WRITE3",
        }
    }
}

impl From<Command> for u16 {
    fn from(cmd: Command) -> u16 {
        cmd as u16
    }
}

impl TryFrom<u16> for Command {
    type Error = Error;

    fn try_from(value: u16) -> Result<Self> {
        match value {
            0x0102 => Ok(Self::Info),
            0x0103 => Ok(Self::Beep),
            0x0104 => Ok(Self::Led),
            0x010C => Ok(Self::Read),
            0x020C => Ok(Self::Write2),
            0x030C => Ok(Self::Write3),
            _ => Err(Error::UnknownCommand(value)),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(0x{:04X})", self.name(), *self as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_conversion() {
        assert_eq!(u16::from(Command::Info), 0x0102);
        assert_eq!(Command::try_from(0x0102).unwrap(), Command::Info);
        assert_eq!(Command::try_from(0x030C).unwrap(), Command::Write3);
    }

    #[test]
    fn test_unknown_command() {
        let result = Command::try_from(0x0105);
        assert!(matches!(result, Err(Error::UnknownCommand(0x0105))));
    }

    #[test]
    fn test_command_display() {
        assert_eq!(Command::Read.to_string(), "CMD_READ(0x010C)");
    }
}
