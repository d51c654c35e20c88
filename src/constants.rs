// Copyright 2024 Lexi Robinson
// Licensed under the EUPL-1.2

//! Protocol timing, sizing and namespace constants.

use std::time::Duration;

/// Size of the fixed wire header, in bytes.
pub const PROTOCOL_HEADER_SIZE: usize = 24;

/// Protocol version string sent on outgoing messages.
pub const PROTOCOL_VERSION: &str = "1.19";

/// Offset to skip past a block message's own header and reach its payload.
pub const BLOCK_MESSAGE_HEADER_OFFSET: usize = 8;

/// Time the controller itself waits before retransmitting an unacknowledged packet.
pub const OMNI_RETRANSMIT_TIME: Duration = Duration::from_millis(2100);

/// Number of retransmit attempts the controller makes (6 total including the initial send).
pub const OMNI_RETRANSMIT_COUNT: u32 = 5;

/// How long we wait for an ACK before retransmitting ourselves.
pub const ACK_WAIT_TIMEOUT: Duration = Duration::from_millis(500);

/// Total attempts (initial send plus retransmits) before a send fails with `Timeout`.
pub const MAX_SEND_ATTEMPTS: u32 = 5;

/// Default timeout for an entire request/response exchange.
pub const DEFAULT_RESPONSE_TIMEOUT: Duration = Duration::from_secs(5);

/// Default UDP port the controller listens on.
pub const DEFAULT_CONTROLLER_PORT: u16 = 10444;

/// Capacity of the inbound message queue used by the reliable channel.
pub const MAX_QUEUE_SIZE: usize = 100;

/// Overall wall-clock budget for collecting every fragment of a reassembled response.
pub const MAX_FRAGMENT_WAIT_TIME: Duration = Duration::from_secs(30);

/// Per-fragment wait: long enough for the controller to exhaust its own retransmits.
pub fn fragment_timeout() -> Duration {
    OMNI_RETRANSMIT_TIME * OMNI_RETRANSMIT_COUNT
}

pub const MAX_TEMPERATURE_F: i32 = 104;
pub const MIN_TEMPERATURE_F: i32 = 65;
pub const MAX_SPEED_PERCENT: i32 = 100;
pub const MIN_SPEED_PERCENT: i32 = 0;

/// Theoretical maximum UDP payload size; not enforced, kept for caller reference.
pub const MAX_MESSAGE_SIZE: usize = 65507;

pub const XML_NAMESPACE: &str = "http://nextgen.hayward.com/api";
