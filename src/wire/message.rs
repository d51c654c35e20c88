// Copyright 2024 Lexi Robinson
// Licensed under the EUPL-1.2

//! The 24-byte framed message that wraps every request/response/ACK.
//!
//! Wire layout (big-endian, `!LQ4sLBBBB` in Python `struct` notation):
//!
//! ```text
//! id: u32 | timestamp: u64 | version: [u8; 4] | type: u32 | client_type: u8 | reserved: u8 | compressed: u8 | reserved: u8
//! ```
//!
//! followed by an optional NUL-terminated UTF-8 XML payload, optionally
//! zlib-compressed.

use std::fmt;

use winnow::binary::{be_u32, be_u64, be_u8};
use winnow::error::{ErrMode, ErrorKind, ParserError};
use winnow::prelude::*;
use winnow::token::take;

use crate::constants::{PROTOCOL_HEADER_SIZE, PROTOCOL_VERSION};
use crate::error::{OmniError, Result};
use crate::types::{ClientType, MessageType};

/// A fully decoded wire message: header fields plus the raw payload bytes
/// (still compressed, if `compressed` is set — decompression is the
/// reassembler's job, not the codec's).
///
/// `reserved_1`/`reserved_2` round-trip whatever the controller put in the
/// two reserved header bytes; we always send zero but some firmware
/// revisions are seen echoing non-zero values back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: u32,
    pub timestamp: u64,
    pub version: [u8; 4],
    pub msg_type: u32,
    pub client_type: u8,
    pub reserved_1: u8,
    pub compressed: bool,
    pub reserved_2: u8,
    pub payload: Vec<u8>,
}

impl Message {
    /// Build a message, applying the implicit-compression override: a
    /// telemetry update is always treated as compressed regardless of the
    /// caller-supplied flag, because the controller sends it compressed
    /// without bothering to set the header bit.
    pub fn new(id: u32, msg_type: u32, client_type: ClientType, compressed: bool, payload: Vec<u8>) -> Self {
        let implied = compressed || msg_type == MessageType::MspTelemetryUpdate.as_u32();
        Message {
            id,
            timestamp: 0,
            version: version_bytes(),
            msg_type,
            client_type: client_type as u8,
            reserved_1: 0,
            compressed: implied,
            reserved_2: 0,
            payload,
        }
    }

    pub fn ack(id: u32) -> Self {
        Message::new(id, MessageType::Ack.as_u32(), ClientType::Omni, false, Vec::new())
    }

    /// An `XML_ACK` carrying the mandatory `<Ack/>` body, for acking an
    /// inbound XML-bearing message (LeadMessage, block message, telemetry
    /// update).
    pub fn xml_ack(id: u32) -> Self {
        let mut body = format!("<?xml version=\"1.0\" encoding=\"utf-8\"?><Ack xmlns=\"{}\" />", crate::constants::XML_NAMESPACE);
        body.push('\0');
        Message::new(id, MessageType::XmlAck.as_u32(), ClientType::Xml, false, body.into_bytes())
    }

    pub fn message_type(&self) -> Option<MessageType> {
        MessageType::from_u32(self.msg_type)
    }

    pub fn is_ack(&self) -> bool {
        matches!(self.message_type(), Some(MessageType::Ack) | Some(MessageType::XmlAck))
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(PROTOCOL_HEADER_SIZE + self.payload.len());
        buf.extend_from_slice(&self.id.to_be_bytes());
        buf.extend_from_slice(&self.timestamp.to_be_bytes());
        buf.extend_from_slice(&self.version);
        buf.extend_from_slice(&self.msg_type.to_be_bytes());
        buf.push(self.client_type);
        buf.push(self.reserved_1);
        buf.push(self.compressed as u8);
        buf.push(self.reserved_2);
        buf.extend_from_slice(&self.payload);
        buf
    }

    pub fn decode(input: &[u8]) -> Result<Self> {
        let mut cursor = input;
        parse_message
            .parse_next(&mut cursor)
            .map_err(|e| OmniError::malformed(format!("failed to parse message header: {e}")))
    }
}

impl fmt::Display for Message {
    /// Compressed or block-carrying messages print only the header fields;
    /// anything else also shows the NUL-stripped UTF-8 body, for tracing
    /// spans and manual wire debugging.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let type_name = self.message_type().map(|t| t.to_string()).unwrap_or_else(|| format!("0x{:x}", self.msg_type));
        if self.compressed || matches!(self.message_type(), Some(MessageType::MspBlockMessage)) {
            write!(f, "Message(id={}, type={}, client={}, compressed={})", self.id, type_name, self.client_type, self.compressed)
        } else {
            let body = String::from_utf8_lossy(&self.payload);
            write!(f, "Message(id={}, type={}, client={}, body={:?})", self.id, type_name, self.client_type, body.trim_end_matches('\0'))
        }
    }
}

fn version_bytes() -> [u8; 4] {
    let mut out = [0u8; 4];
    let src = PROTOCOL_VERSION.as_bytes();
    let n = src.len().min(4);
    out[..n].copy_from_slice(&src[..n]);
    out
}

fn parse_message(input: &mut &[u8]) -> PResult<Message> {
    if input.len() < PROTOCOL_HEADER_SIZE {
        return Err(ErrMode::from_error_kind(input, ErrorKind::Eof));
    }

    let id = be_u32.parse_next(input)?;
    let timestamp = be_u64.parse_next(input)?;
    let version_slice = take(4usize).parse_next(input)?;
    let mut version = [0u8; 4];
    version.copy_from_slice(version_slice);
    let msg_type = be_u32.parse_next(input)?;
    let client_type = be_u8.parse_next(input)?;
    let reserved_1 = be_u8.parse_next(input)?;
    let compressed_flag = be_u8.parse_next(input)?;
    let reserved_2 = be_u8.parse_next(input)?;

    if MessageType::from_u32(msg_type).is_none() {
        return Err(ErrMode::from_error_kind(input, ErrorKind::Verify));
    }
    if ClientType::from_u8(client_type).is_none() {
        return Err(ErrMode::from_error_kind(input, ErrorKind::Verify));
    }

    let payload = input.to_vec();
    *input = &input[input.len()..];

    let compressed = compressed_flag == 1 || msg_type == MessageType::MspTelemetryUpdate.as_u32();

    Ok(Message {
        id,
        timestamp,
        version,
        msg_type,
        client_type,
        reserved_1,
        compressed,
        reserved_2,
        payload,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_basic_ack() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&42u32.to_be_bytes());
        bytes.extend_from_slice(&0u64.to_be_bytes());
        bytes.extend_from_slice(b"1.19");
        bytes.extend_from_slice(&MessageType::Ack.as_u32().to_be_bytes());
        bytes.push(ClientType::Omni as u8);
        bytes.push(0);
        bytes.push(0);
        bytes.push(0);

        let msg = Message::decode(&bytes).expect("valid header");
        assert_eq!(msg.id, 42);
        assert_eq!(msg.message_type(), Some(MessageType::Ack));
        assert!(!msg.compressed);
        assert!(msg.payload.is_empty());
    }

    #[test]
    fn encode_basic_ack_round_trips() {
        let msg = Message::ack(7);
        let bytes = msg.encode();
        let decoded = Message::decode(&bytes).expect("round trip");
        assert_eq!(decoded.id, 7);
        assert_eq!(decoded.msg_type, MessageType::Ack.as_u32());
    }

    #[test]
    fn telemetry_update_is_always_treated_as_compressed() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&1u32.to_be_bytes());
        bytes.extend_from_slice(&0u64.to_be_bytes());
        bytes.extend_from_slice(b"1.19");
        bytes.extend_from_slice(&MessageType::MspTelemetryUpdate.as_u32().to_be_bytes());
        bytes.push(ClientType::Omni as u8);
        bytes.push(0);
        bytes.push(0); // compressed flag explicitly 0 on the wire
        bytes.push(0);

        let msg = Message::decode(&bytes).expect("valid header");
        assert!(msg.compressed, "telemetry updates are implicitly compressed");
    }

    #[test]
    fn decode_rejects_truncated_header() {
        let bytes = vec![0u8; PROTOCOL_HEADER_SIZE - 1];
        assert!(Message::decode(&bytes).is_err());
    }

    #[test]
    fn decode_rejects_unknown_opcode() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&1u32.to_be_bytes());
        bytes.extend_from_slice(&0u64.to_be_bytes());
        bytes.extend_from_slice(b"1.19");
        bytes.extend_from_slice(&0xFFFF_FFFFu32.to_be_bytes());
        bytes.push(ClientType::Omni as u8);
        bytes.push(0);
        bytes.push(0);
        bytes.push(0);

        assert!(Message::decode(&bytes).is_err());
    }

    #[test]
    fn decode_rejects_unknown_client_type() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&1u32.to_be_bytes());
        bytes.extend_from_slice(&0u64.to_be_bytes());
        bytes.extend_from_slice(b"1.19");
        bytes.extend_from_slice(&MessageType::Ack.as_u32().to_be_bytes());
        bytes.push(7);
        bytes.push(0);
        bytes.push(0);
        bytes.push(0);

        assert!(Message::decode(&bytes).is_err());
    }

    #[test]
    fn decode_rejects_bad_compressed_zlib_payload() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&1u32.to_be_bytes());
        bytes.extend_from_slice(&0u64.to_be_bytes());
        bytes.extend_from_slice(b"1.19");
        bytes.extend_from_slice(&MessageType::GetAlarmList.as_u32().to_be_bytes());
        bytes.push(ClientType::Xml as u8);
        bytes.push(0);
        bytes.push(1); // compressed
        bytes.push(0);
        bytes.extend_from_slice(b"not actually zlib");

        let msg = Message::decode(&bytes).expect("header still parses");
        assert!(msg.compressed);
        // Decompression itself is the reassembler's job, exercised in reassembly.rs.
    }
}
