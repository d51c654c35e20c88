// Copyright 2024 Lexi Robinson
// Licensed under the EUPL-1.2

//! Wire framing: the 24-byte header and message codec.

pub mod message;

pub use message::Message;
