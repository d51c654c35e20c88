// Copyright 2024 Lexi Robinson
// Licensed under the EUPL-1.2

//! Client library for the Hayward OmniLogic/OmniHub local UDP protocol.
//!
//! [`OmniLogicClient`] is the main entry point: it opens a fresh transient
//! UDP endpoint per call, speaks the controller's binary-framed,
//! XML-bodied wire protocol (see [`wire`]), and hands back a typed
//! [`model::config::MspConfig`] or [`model::telemetry::Telemetry`] tree.

pub mod channel;
pub mod client;
pub mod constants;
pub mod error;
pub mod model;
pub mod reassembly;
pub mod types;
pub mod validate;
pub mod wire;
pub mod xml;

#[cfg(test)]
pub(crate) mod testutil;

pub use client::{ClientConfig, OmniLogicClient};
pub use error::{OmniError, Result};
