//! Power commands
//!
//! [`Command`] is what the operator asks for; [`DeviceCommand`] is what goes
//! over the wire. A reboot is not a device command of its own: it is a
//! power-off followed by a power-on with no check or delay in between.

use serde::{Deserialize, Serialize};

/// Operator-facing power command
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Command {
    /// Turn the device on
    #[value(name = "on")]
    PowerOn,

    /// Turn the device off
    #[value(name = "off")]
    PowerOff,

    /// Turn the device off, then on
    #[value(name = "reboot")]
    Reboot,
}

impl Command {
    /// Device commands to send, in order
    #[must_use]
    pub const fn device_commands(self) -> &'static [DeviceCommand] {
        match self {
            Self::PowerOn => &[DeviceCommand::TurnOn],
            Self::PowerOff => &[DeviceCommand::TurnOff],
            Self::Reboot => &[DeviceCommand::TurnOff, DeviceCommand::TurnOn],
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PowerOn => write!(f, "on"),
            Self::PowerOff => write!(f, "off"),
            Self::Reboot => write!(f, "reboot"),
        }
    }
}

/// Command name understood by the device API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeviceCommand {
    /// `turnOn`
    TurnOn,
    /// `turnOff`
    TurnOff,
}

impl DeviceCommand {
    /// Wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TurnOn => "turnOn",
            Self::TurnOff => "turnOff",
        }
    }
}

impl std::fmt::Display for DeviceCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JSON body of a command request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRequest {
    /// Command to run
    pub command: DeviceCommand,
}
