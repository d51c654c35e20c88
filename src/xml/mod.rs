// Copyright 2024 Lexi Robinson
// Licensed under the EUPL-1.2

//! XML request building and response DOM helpers.

pub mod dom;
pub mod request;
