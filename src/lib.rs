//! `SwitchBot` power control
//!
//! Turns a single registered device on or off, or reboots it, through the
//! `SwitchBot` cloud API:
//! - Credential loading from a `.env` override file or the environment
//! - Per-request HMAC-SHA256 signing with timestamp and nonce
//! - Power commands over a pluggable HTTP transport
//!
//! # Flow
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────────────────┐
//! │ .env / env   │──▶│   Config     │──▶│        SwitchBot         │
//! │ (Credential  │   │ (Credentials │   │ SignedHeaders per call   │
//! │  Source)     │   │  + endpoint) │   │ POST /devices/{id}/cmds  │
//! └──────────────┘   └──────────────┘   └──────────────────────────┘
//! ```

pub mod client;
pub mod command;
pub mod config;
pub mod error;
pub mod signing;

pub use client::{CommandOutcome, HttpTransport, SwitchBot, Transport};
pub use command::{Command, DeviceCommand};
pub use config::{Config, Credential, CredentialSource, Credentials};
pub use error::{Error, Result};
pub use signing::SignedHeaders;
