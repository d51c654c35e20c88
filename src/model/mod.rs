// Copyright 2024 Lexi Robinson
// Licensed under the EUPL-1.2

//! Typed parsers for the controller's XML response documents.

pub mod config;
pub mod filter_diagnostics;
pub mod leadmessage;
pub mod telemetry;
