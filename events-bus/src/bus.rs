use tokio::sync::broadcast;
use tracing::debug;

use crate::error::{EventBusError, Result};
use crate::event::{Channel, Event, EventPayload};
use crate::subscriber::Subscriber;

/// Events buffered per subscriber before the slowest one starts lagging
pub const DEFAULT_CAPACITY: usize = 256;

/// Cloneable handle to a broadcast bus; all clones share the same channel
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<Event>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(DEFAULT_CAPACITY);
        Self { sender }
    }

    /// # Errors
    ///
    /// `EventBusError::InvalidCapacity` when `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(EventBusError::InvalidCapacity);
        }
        let (sender, _) = broadcast::channel(capacity);
        Ok(Self { sender })
    }

    /// Broadcast `payload` and return the envelope that was sent.
    ///
    /// Every live subscription receives it; subscriptions filter by channel
    /// on their side.
    pub fn publish(&self, payload: EventPayload) -> Event {
        let event = Event::new(payload);
        match self.sender.send(event.clone()) {
            Ok(receivers) => {
                debug!(event_id = %event.id, channel = %event.channel, receivers, "event published");
            }
            Err(_) => {
                debug!(event_id = %event.id, channel = %event.channel, "event dropped, no listeners");
            }
        }
        event
    }

    /// Subscribe to a single channel
    pub fn subscribe(&self, channel: Channel) -> Subscriber {
        Subscriber::new(self.sender.subscribe(), Some(channel))
    }

    /// Subscribe to every channel
    pub fn subscribe_all(&self) -> Subscriber {
        Subscriber::new(self.sender.subscribe(), None)
    }

    /// Number of live subscriptions across all channels
    pub fn listener_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{AudioAction, ChatAction};

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(matches!(
            EventBus::with_capacity(0),
            Err(EventBusError::InvalidCapacity)
        ));
    }

    #[test]
    fn test_publish_without_listeners_is_harmless() {
        let bus = EventBus::new();
        let event = bus.publish(EventPayload::audio(AudioAction::PlayLastMessage));
        assert_eq!(event.channel, Channel::VoiceCommandAudio);
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn test_clones_share_channel() {
        let bus = EventBus::new();
        let publisher = bus.clone();
        let mut chat = bus.subscribe(Channel::VoiceCommandChat);
        assert_eq!(publisher.listener_count(), 1);

        let sent = publisher.publish(EventPayload::chat(ChatAction::ClearChat, Some("clear chat".into())));
        let received = chat.try_recv().unwrap().unwrap();
        assert_eq!(received.id, sent.id);
    }
}
