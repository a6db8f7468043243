//! Message channel seam between the controller and whatever transport carries
//! frames to the scripting service.

use shared::protocol::{ServiceMessage, Subscription};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::error::{ClientError, ClientResult};

pub trait MessageChannel {
    /// Queues `msg` for delivery. Never waits for a reply.
    fn send(&self, msg: ServiceMessage) -> ClientResult<()>;

    fn subscribe(&self, subscription: Subscription) -> ClientResult<()>;
}

/// Frames emitted by [`QueueChannel`], in the order they were issued.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelFrame {
    Subscribe(Subscription),
    Send(ServiceMessage),
}

/// In-process channel backed by an unbounded queue; the receiving half is
/// drained by the transport.
#[derive(Debug, Clone)]
pub struct QueueChannel {
    tx: UnboundedSender<ChannelFrame>,
}

impl QueueChannel {
    pub fn new() -> (Self, UnboundedReceiver<ChannelFrame>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    fn push(&self, frame: ChannelFrame) -> ClientResult<()> {
        self.tx
            .send(frame)
            .map_err(|_| ClientError::ChannelClosed("transport receiver dropped".to_string()))
    }
}

impl MessageChannel for QueueChannel {
    fn send(&self, msg: ServiceMessage) -> ClientResult<()> {
        self.push(ChannelFrame::Send(msg))
    }

    fn subscribe(&self, subscription: Subscription) -> ClientResult<()> {
        self.push(ChannelFrame::Subscribe(subscription))
    }
}
