// Copyright 2024 Lexi Robinson
// Licensed under the EUPL-1.2

//! Turn one or more inbound messages into a single decoded UTF-8 document:
//! ACK the lead message, optionally collect `MsgBlockCount` block messages
//! in id order, then zlib-decompress if flagged.

use std::collections::BTreeMap;
use std::io::Read;

use flate2::read::ZlibDecoder;

use crate::channel::Channel;
use crate::constants::{BLOCK_MESSAGE_HEADER_OFFSET, MAX_FRAGMENT_WAIT_TIME};
use crate::error::{OmniError, Result};
use crate::model::leadmessage::LeadMessage;
use crate::types::MessageType;
use crate::wire::Message;

/// Receive and decode exactly one logical response from `channel`.
pub async fn receive_response(channel: &mut Channel) -> Result<String> {
    let lead = next_non_ack(channel).await?;
    channel.send(&Message::xml_ack(lead.id)).await?;

    let raw = if lead.message_type() == Some(MessageType::MspLeadMessage) {
        collect_fragments(channel, &lead).await?
    } else {
        lead.payload.clone()
    };

    decode_payload(&raw, lead.compressed)
}

/// Skip any residual `ACK`/`XML_ACK` messages left over from a retransmit,
/// returning the first substantive message.
async fn next_non_ack(channel: &mut Channel) -> Result<Message> {
    loop {
        let msg = channel.recv().await?;
        if !msg.is_ack() {
            return Ok(msg);
        }
    }
}

async fn collect_fragments(channel: &mut Channel, lead: &Message) -> Result<Vec<u8>> {
    let body = strip_nul(&lead.payload);
    let lead_doc = std::str::from_utf8(body).map_err(|e| OmniError::fragmentation(format!("LeadMessage payload is not UTF-8: {e}")))?;
    let lead_info = LeadMessage::parse(lead_doc).map_err(|e| OmniError::fragmentation(format!("failed to parse LeadMessage: {e}")))?;

    let block_count = lead_info.msg_block_count as usize;
    let mut fragments: BTreeMap<u32, Vec<u8>> = BTreeMap::new();
    let started = tokio::time::Instant::now();
    let per_fragment_timeout = crate::constants::fragment_timeout();

    while fragments.len() < block_count {
        if started.elapsed() >= MAX_FRAGMENT_WAIT_TIME {
            return Err(OmniError::fragmentation(format!(
                "fragment reassembly exceeded {MAX_FRAGMENT_WAIT_TIME:?} budget with {}/{block_count} blocks collected",
                fragments.len()
            )));
        }

        let remaining_budget = MAX_FRAGMENT_WAIT_TIME.saturating_sub(started.elapsed());
        let wait = per_fragment_timeout.min(remaining_budget);
        let msg = match tokio::time::timeout(wait, next_non_ack(channel)).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(OmniError::fragmentation(format!(
                    "timed out waiting for a block message ({}/{block_count} collected)",
                    fragments.len()
                )));
            }
        };

        if msg.message_type() != Some(MessageType::MspBlockMessage) {
            tracing::debug!(id = msg.id, r#type = ?msg.message_type(), "expected a block message, dropping");
            continue;
        }

        channel.send(&Message::xml_ack(msg.id)).await?;
        if msg.payload.len() < BLOCK_MESSAGE_HEADER_OFFSET {
            return Err(OmniError::fragmentation(format!("block message id={} payload shorter than the 8-byte prefix", msg.id)));
        }
        fragments.insert(msg.id, msg.payload[BLOCK_MESSAGE_HEADER_OFFSET..].to_vec());
    }

    Ok(fragments.into_values().flatten().collect())
}

fn strip_nul(payload: &[u8]) -> &[u8] {
    match payload.last() {
        Some(0) => &payload[..payload.len() - 1],
        _ => payload,
    }
}

fn decode_payload(raw: &[u8], compressed: bool) -> Result<String> {
    let bytes = if compressed {
        let mut decoder = ZlibDecoder::new(raw);
        let mut out = Vec::new();
        decoder.read_to_end(&mut out).map_err(|e| OmniError::malformed(format!("zlib decompression failed: {e}")))?;
        out
    } else {
        raw.to_vec()
    };

    let text = String::from_utf8(bytes).map_err(|e| OmniError::malformed(format!("response payload is not valid UTF-8: {e}")))?;
    Ok(text.trim_end_matches('\0').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_payload_strips_trailing_nul() {
        let text = decode_payload(b"<Response/>\0", false).expect("decode");
        assert_eq!(text, "<Response/>");
    }

    #[test]
    fn decode_payload_decompresses_zlib_stream() {
        use flate2::write::ZlibEncoder;
        use flate2::Compression;
        use std::io::Write;

        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"<STATUS/>").unwrap();
        let compressed = encoder.finish().unwrap();

        let text = decode_payload(&compressed, true).expect("decompress");
        assert_eq!(text, "<STATUS/>");
    }

    #[test]
    fn decode_payload_rejects_non_zlib_bytes_when_compressed() {
        assert!(decode_payload(b"not zlib", true).is_err());
    }

    #[test]
    fn strip_nul_handles_payload_without_terminator() {
        assert_eq!(strip_nul(b"abc"), b"abc");
        assert_eq!(strip_nul(b"abc\0"), b"abc");
    }
}
