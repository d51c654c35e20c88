// Copyright 2024 Lexi Robinson
// Licensed under the EUPL-1.2

//! A per-request reliable UDP endpoint: send-with-retransmit, an ordered
//! inbound queue, and the dropped-ACK recovery policy from spec.md §4.B.
//!
//! Each [`Channel`] owns one connected [`UdpSocket`] and a background task
//! that reads datagrams off it, decodes them, and pushes them onto a
//! bounded queue. There is no cross-request routing: a fresh channel is
//! created per call (§4.B/§5), so the queue only ever sees replies to our
//! own outstanding request.

use std::collections::VecDeque;
use std::sync::Arc;

use tokio::net::UdpSocket;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::constants::{ACK_WAIT_TIMEOUT, MAX_MESSAGE_SIZE, MAX_QUEUE_SIZE, MAX_SEND_ATTEMPTS};
use crate::error::{OmniError, Result};
use crate::types::MessageType;
use crate::wire::Message;

/// Outcome of waiting for the ACK of one outstanding send.
enum AckWait {
    Acked,
    /// The controller skipped straight to the response phase; the message
    /// that proves it has been pushed to the front of the inbound queue.
    MovedOn,
    TimedOut,
}

pub struct Channel {
    socket: Arc<UdpSocket>,
    data_rx: mpsc::Receiver<Message>,
    error_rx: mpsc::Receiver<OmniError>,
    /// Messages pushed back to the front of the queue by the dropped-ACK
    /// policy (§4.B); `recv()` drains this before the channel.
    pending: VecDeque<Message>,
    recv_task: JoinHandle<()>,
}

impl Channel {
    /// Bind an ephemeral local socket and connect it to the controller.
    /// Spawns the background receive loop for the lifetime of this channel.
    pub async fn connect(host: &str, port: u16) -> Result<Self> {
        let socket = UdpSocket::bind("0.0.0.0:0").await?;
        socket.connect((host, port)).await?;
        let socket = Arc::new(socket);

        let (data_tx, data_rx) = mpsc::channel(MAX_QUEUE_SIZE);
        let (error_tx, error_rx) = mpsc::channel(MAX_QUEUE_SIZE);
        let recv_socket = socket.clone();
        let recv_task = tokio::spawn(recv_loop(recv_socket, data_tx, error_tx));

        Ok(Channel { socket, data_rx, error_rx, pending: VecDeque::new(), recv_task })
    }

    /// Send `msg` reliably. ACKs (`XML_ACK`/`ACK`) are fire-and-forget —
    /// the controller never acknowledges an acknowledgement. Anything else
    /// is retransmitted up to [`MAX_SEND_ATTEMPTS`] times while waiting for
    /// an inbound message whose `id` matches.
    pub async fn send(&mut self, msg: &Message) -> Result<()> {
        let bytes = msg.encode();
        self.socket.send(&bytes).await?;

        if msg.is_ack() {
            return Ok(());
        }

        for attempt in 1..=MAX_SEND_ATTEMPTS {
            match self.wait_for_ack(msg.id).await? {
                AckWait::Acked | AckWait::MovedOn => return Ok(()),
                AckWait::TimedOut if attempt < MAX_SEND_ATTEMPTS => {
                    tracing::warn!(
                        id = msg.id,
                        r#type = %msg.message_type().map(|t| t.to_string()).unwrap_or_default(),
                        attempt,
                        max_attempts = MAX_SEND_ATTEMPTS,
                        "no ACK received, retransmitting"
                    );
                    self.socket.send(&bytes).await?;
                }
                AckWait::TimedOut => {
                    return Err(OmniError::timeout(format!(
                        "no ACK for message id={} type={:?} after {} attempts",
                        msg.id,
                        msg.message_type(),
                        MAX_SEND_ATTEMPTS
                    )));
                }
            }
        }
        unreachable!("loop always returns within MAX_SEND_ATTEMPTS iterations")
    }

    /// Wait up to [`ACK_WAIT_TIMEOUT`] for an inbound message whose `id`
    /// matches `expected_id`, applying the dropped-ACK recovery policy to
    /// anything else that arrives in the meantime.
    async fn wait_for_ack(&mut self, expected_id: u32) -> Result<AckWait> {
        let deadline = tokio::time::Instant::now() + ACK_WAIT_TIMEOUT;
        loop {
            let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
            if remaining.is_zero() {
                return Ok(AckWait::TimedOut);
            }
            let msg = match tokio::time::timeout(remaining, self.next_raw_or_error()).await {
                Ok(Ok(msg)) => msg,
                Ok(Err(e)) => return Err(e),
                Err(_) => return Ok(AckWait::TimedOut),
            };

            if msg.id == expected_id {
                return Ok(AckWait::Acked);
            }
            if msg.is_ack() {
                // A stale ACK for a retransmit that raced our own send; discard.
                continue;
            }
            if matches!(msg.message_type(), Some(MessageType::MspLeadMessage) | Some(MessageType::MspTelemetryUpdate)) {
                // The controller has moved on to the response phase without
                // our ACK wait observing its intermediate ACK. Treat the
                // send as complete and hand the message to the next reader.
                self.pending.push_front(msg);
                return Ok(AckWait::MovedOn);
            }
            tracing::debug!(id = msg.id, r#type = ?msg.message_type(), "unexpected message while waiting for ACK");
        }
    }

    /// Pop the next inbound message, preferring anything pushed back to the
    /// front of the queue by [`Self::wait_for_ack`], and racing the error
    /// channel so a socket/decode fault surfaces instead of hanging.
    async fn next_raw_or_error(&mut self) -> Result<Message> {
        if let Some(msg) = self.pending.pop_front() {
            return Ok(msg);
        }
        tokio::select! {
            biased;
            Some(err) = self.error_rx.recv() => Err(err),
            msg = self.data_rx.recv() => msg.ok_or_else(OmniError::connection_closed),
        }
    }

    /// Pop the next inbound message, surfacing any asynchronously-reported
    /// socket/decode error ahead of the data it would otherwise block on.
    pub async fn recv(&mut self) -> Result<Message> {
        self.next_raw_or_error().await
    }
}

impl Drop for Channel {
    fn drop(&mut self) {
        self.recv_task.abort();
    }
}

async fn recv_loop(socket: Arc<UdpSocket>, data_tx: mpsc::Sender<Message>, error_tx: mpsc::Sender<OmniError>) {
    let mut buf = vec![0u8; MAX_MESSAGE_SIZE];
    loop {
        let n = match socket.recv(&mut buf).await {
            Ok(n) => n,
            Err(e) => {
                let _ = error_tx.send(OmniError::Connection(e)).await;
                return;
            }
        };
        match Message::decode(&buf[..n]) {
            Ok(msg) => match data_tx.try_send(msg) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    tracing::error!(capacity = MAX_QUEUE_SIZE, "inbound queue full, dropping newest datagram");
                }
                Err(mpsc::error::TrySendError::Closed(_)) => return,
            },
            Err(e) => {
                if error_tx.send(e).await.is_err() {
                    return;
                }
            }
        }
    }
}

impl OmniError {
    fn connection_closed() -> Self {
        OmniError::Connection(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "channel closed"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ClientType;

    /// A loopback fixture standing in for the controller: replies to the
    /// first datagram it sees with an ACK carrying the same id.
    async fn spawn_echo_ack(local_port_tx: tokio::sync::oneshot::Sender<u16>) {
        let server = UdpSocket::bind("127.0.0.1:0").await.expect("bind fixture socket");
        let _ = local_port_tx.send(server.local_addr().unwrap().port());
        let mut buf = vec![0u8; 2048];
        let (n, peer) = server.recv_from(&mut buf).await.expect("recv request");
        let req = Message::decode(&buf[..n]).expect("decode request");
        let ack = Message::ack(req.id);
        server.send_to(&ack.encode(), peer).await.expect("send ack");
    }

    #[tokio::test]
    async fn send_succeeds_on_first_ack() {
        let (tx, rx) = tokio::sync::oneshot::channel();
        tokio::spawn(spawn_echo_ack(tx));
        let port = rx.await.expect("fixture port");

        let mut channel = Channel::connect("127.0.0.1", port).await.expect("connect");
        let msg = Message::new(99, MessageType::RequestLogConfig.as_u32(), ClientType::Simple, false, Vec::new());
        channel.send(&msg).await.expect("send should succeed once ACKed");
    }

    #[tokio::test]
    async fn ack_type_messages_do_not_wait_for_a_reply() {
        let server = UdpSocket::bind("127.0.0.1:0").await.expect("bind fixture socket");
        let port = server.local_addr().unwrap().port();
        let mut channel = Channel::connect("127.0.0.1", port).await.expect("connect");
        let ack = Message::ack(5);
        // Nothing ever replies; this must still return immediately.
        channel.send(&ack).await.expect("acks are fire-and-forget");
    }

    /// Exercises spec.md §8 scenario 6: no ACK within [`ACK_WAIT_TIMEOUT`],
    /// a retransmit, then the controller's ACK arrives and the call
    /// succeeds after exactly 2 `sendto`s. Runs on a paused clock so the
    /// 0.5s ACK wait is skipped instantly instead of costing real wall time.
    #[tokio::test(start_paused = true)]
    async fn send_retransmits_once_then_succeeds() {
        crate::testutil::init_tracing();

        let server = UdpSocket::bind("127.0.0.1:0").await.expect("bind fixture socket");
        let port = server.local_addr().unwrap().port();

        let mut channel = Channel::connect("127.0.0.1", port).await.expect("connect");
        let msg = Message::new(123, MessageType::RequestLogConfig.as_u32(), ClientType::Simple, false, Vec::new());
        let send_task = tokio::spawn(async move { channel.send(&msg).await });

        let mut buf = vec![0u8; 2048];
        // The controller never ACKs the first attempt; paused time auto-advances
        // past ACK_WAIT_TIMEOUT once `send_task` has nothing left to do but wait.
        let (n, first_peer) = server.recv_from(&mut buf).await.expect("recv initial send");
        let first = Message::decode(&buf[..n]).expect("decode initial send");
        assert_eq!(first.id, 123);

        let (n, retransmit_peer) = server.recv_from(&mut buf).await.expect("recv retransmit");
        let retransmit = Message::decode(&buf[..n]).expect("decode retransmit");
        assert_eq!(retransmit.id, 123);
        assert_eq!(first_peer, retransmit_peer, "retransmit must come from the same endpoint");
        assert_eq!(&buf[..n], &msg_bytes_for(123), "retransmit bytes must be identical to the original send");

        let ack = Message::ack(123);
        server.send_to(&ack.encode(), retransmit_peer).await.expect("send ack");

        send_task.await.expect("task panicked").expect("send succeeds once the retransmit is ACKed");
    }

    fn msg_bytes_for(id: u32) -> Vec<u8> {
        Message::new(id, MessageType::RequestLogConfig.as_u32(), ClientType::Simple, false, Vec::new()).encode()
    }
}
