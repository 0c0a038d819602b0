#[cfg(feature = "rtrb")]
use rtrb::{Consumer, Producer};

use crate::params::ControlParameters;

#[cfg(feature = "rtrb")]
use crate::error::CsgError;

/// Control-thread to audio-thread messages, applied at the start of an update.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ControlMessage {
    Params(ControlParameters),
    Trigger,
    SampleRate(u32),
    Reset,
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<ControlMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<ControlMessage> {
    fn pop(&mut self) -> Option<ControlMessage> {
        Consumer::pop(self).ok()
    }
}

/// Host-side end of the control queue.
#[cfg(feature = "rtrb")]
pub struct ControlHandle {
    tx: Producer<ControlMessage>,
}

#[cfg(feature = "rtrb")]
impl ControlHandle {
    pub(crate) fn new(tx: Producer<ControlMessage>) -> Self {
        Self { tx }
    }

    /// Replace the engine's whole parameter snapshot.
    ///
    /// The snapshot includes the amplitude and feedback resistors, so start
    /// from the values given in [`EngineConfig`](crate::EngineConfig) rather
    /// than `ControlParameters::default()` when they differ from 100 ohms.
    pub fn send_params(&mut self, params: ControlParameters) -> Result<(), CsgError> {
        self.send(ControlMessage::Params(params))
    }

    pub fn trigger(&mut self) -> Result<(), CsgError> {
        self.send(ControlMessage::Trigger)
    }

    pub fn set_sample_rate(&mut self, sample_rate: u32) -> Result<(), CsgError> {
        self.send(ControlMessage::SampleRate(sample_rate))
    }

    pub fn reset(&mut self) -> Result<(), CsgError> {
        self.send(ControlMessage::Reset)
    }

    /// Free slots left in the queue.
    pub fn slots(&self) -> usize {
        self.tx.slots()
    }

    fn send(&mut self, msg: ControlMessage) -> Result<(), CsgError> {
        self.tx.push(msg).map_err(|_| {
            tracing::warn!(?msg, "control queue full, message dropped");
            CsgError::ControlQueueFull
        })
    }
}

#[cfg(all(test, feature = "rtrb"))]
mod tests {
    use super::*;
    use rtrb::RingBuffer;

    #[test]
    fn messages_arrive_in_order() {
        let (tx, mut rx) = RingBuffer::<ControlMessage>::new(4);
        let mut handle = ControlHandle::new(tx);
        handle.trigger().unwrap();
        handle.set_sample_rate(48_000).unwrap();
        handle.reset().unwrap();

        assert_eq!(MessageReceiver::pop(&mut rx), Some(ControlMessage::Trigger));
        assert_eq!(MessageReceiver::pop(&mut rx), Some(ControlMessage::SampleRate(48_000)));
        assert_eq!(MessageReceiver::pop(&mut rx), Some(ControlMessage::Reset));
        assert_eq!(MessageReceiver::pop(&mut rx), None);
    }

    #[test]
    fn full_queue_is_reported() {
        let (tx, _rx) = RingBuffer::<ControlMessage>::new(1);
        let mut handle = ControlHandle::new(tx);
        handle.trigger().unwrap();
        assert_eq!(handle.slots(), 0);
        assert_eq!(handle.trigger(), Err(CsgError::ControlQueueFull));
    }
}
