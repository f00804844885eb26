//! Signed client for the `SwitchBot` cloud API
//!
//! Each call builds a fresh [`SignedHeaders`] and issues one POST to
//! `<endpoint>/devices/<device_id>/commands`. Calls are independent: there
//! is no retry, and a reboot sends its second command even when the first
//! was rejected.

mod transport;

use std::io::Write;

use reqwest::StatusCode;

pub use transport::{ApiRequest, ApiResponse, HttpTransport, Transport};

use crate::command::{Command, CommandRequest, DeviceCommand};
use crate::config::{Config, Credentials};
use crate::signing::SignedHeaders;
use crate::Result;

/// Result of a single command request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The API answered with a 2xx status
    Success(StatusCode),

    /// The API rejected the request
    Failure {
        /// HTTP status
        status: StatusCode,
        /// Reason phrase sent by the server, else the canonical one
        reason: String,
    },
}

impl CommandOutcome {
    /// Classify a response
    ///
    /// The server's own reason phrase wins over the canonical phrase for
    /// the status; a status with neither falls back to its number.
    #[must_use]
    pub fn from_response(response: &ApiResponse) -> Self {
        let status = response.status;
        if status.is_success() {
            return Self::Success(status);
        }

        let reason = response
            .reason
            .as_deref()
            .map(str::trim)
            .filter(|reason| !reason.is_empty())
            .or_else(|| status.canonical_reason())
            .map_or_else(|| status.as_str().to_string(), ToString::to_string);
        Self::Failure { status, reason }
    }

    /// Whether the request succeeded
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// HTTP status of the response
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Success(status) | Self::Failure { status, .. } => *status,
        }
    }
}

/// Client for power commands against one API endpoint
pub struct SwitchBot<T = HttpTransport> {
    transport: T,
    credentials: Credentials,
    endpoint: String,
}

impl SwitchBot<HttpTransport> {
    /// Create a client that talks HTTP
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self::with_transport(config, HttpTransport::new())
    }
}

impl<T: Transport> SwitchBot<T> {
    /// Create a client over a custom transport
    #[must_use]
    pub fn with_transport(config: Config, transport: T) -> Self {
        Self {
            transport,
            credentials: config.credentials,
            endpoint: config.endpoint,
        }
    }

    /// Configured device identifier, `""` when missing
    #[must_use]
    pub fn device_id(&self) -> &str {
        self.credentials.device_id.as_str()
    }

    /// Send `command` to `device_id`
    ///
    /// A rejected request is returned as [`CommandOutcome::Failure`].
    ///
    /// # Errors
    ///
    /// Returns error if signing fails or the request cannot be sent
    pub async fn execute_command(
        &self,
        device_id: &str,
        command: DeviceCommand,
    ) -> Result<CommandOutcome> {
        let url = format!("{}/devices/{device_id}/commands", self.endpoint);
        let headers = SignedHeaders::generate(
            self.credentials.api_token.as_str(),
            self.credentials.expose_secret(),
        )?;

        tracing::debug!(
            %device_id,
            %command,
            t = headers.timestamp,
            nonce = %headers.nonce,
            "sending device command"
        );

        let response = self
            .transport
            .post(ApiRequest {
                url,
                headers,
                body: CommandRequest { command },
            })
            .await?;

        let outcome = CommandOutcome::from_response(&response);
        let status = outcome.status();
        if outcome.is_success() {
            tracing::info!(%device_id, %command, %status, "device command accepted");
        } else {
            tracing::warn!(%device_id, %command, %status, "device command rejected");
        }

        Ok(outcome)
    }

    /// Turn the device on, reporting a rejection to `out`
    ///
    /// # Errors
    ///
    /// Returns error if the request cannot be sent or `out` cannot be written
    pub async fn power_on<W: Write + ?Sized>(
        &self,
        device_id: &str,
        out: &mut W,
    ) -> Result<CommandOutcome> {
        self.execute_reported(device_id, DeviceCommand::TurnOn, out)
            .await
    }

    /// Turn the device off, reporting a rejection to `out`
    ///
    /// # Errors
    ///
    /// Returns error if the request cannot be sent or `out` cannot be written
    pub async fn power_off<W: Write + ?Sized>(
        &self,
        device_id: &str,
        out: &mut W,
    ) -> Result<CommandOutcome> {
        self.execute_reported(device_id, DeviceCommand::TurnOff, out)
            .await
    }

    /// Run an operator command, returning one outcome per request sent
    ///
    /// Requests go out strictly in order. For a reboot the power-on is sent
    /// whatever the power-off outcome.
    ///
    /// # Errors
    ///
    /// Returns error if a request cannot be sent
    pub async fn run<W: Write + ?Sized>(
        &self,
        command: Command,
        device_id: &str,
        out: &mut W,
    ) -> Result<Vec<CommandOutcome>> {
        tracing::debug!(%command, %device_id, "running command");

        let device_commands = command.device_commands();
        let mut outcomes = Vec::with_capacity(device_commands.len());
        for &device_command in device_commands {
            outcomes.push(
                self.execute_reported(device_id, device_command, &mut *out)
                    .await?,
            );
        }
        Ok(outcomes)
    }

    async fn execute_reported<W: Write + ?Sized>(
        &self,
        device_id: &str,
        command: DeviceCommand,
        out: &mut W,
    ) -> Result<CommandOutcome> {
        let outcome = self.execute_command(device_id, command).await?;
        report(&outcome, out)?;
        Ok(outcome)
    }
}

/// Write the operator-facing line for a rejected request
///
/// # Errors
///
/// Returns error if `out` cannot be written
pub fn report<W: Write + ?Sized>(outcome: &CommandOutcome, out: &mut W) -> Result<()> {
    if let CommandOutcome::Failure { reason, .. } = outcome {
        writeln!(out, "Request failed:  {reason}")?;
    }
    Ok(())
}
