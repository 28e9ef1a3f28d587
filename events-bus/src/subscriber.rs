use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};
use tokio_stream::{wrappers::BroadcastStream, Stream, StreamExt};
use tracing::warn;

use crate::error::{EventBusError, Result};
use crate::event::{Channel, Event};

/// Receiving end of a bus subscription, optionally limited to one channel
#[derive(Debug)]
pub struct Subscriber {
    receiver: broadcast::Receiver<Event>,
    channel: Option<Channel>,
}

impl Subscriber {
    pub(crate) fn new(receiver: broadcast::Receiver<Event>, channel: Option<Channel>) -> Self {
        Self { receiver, channel }
    }

    pub fn channel(&self) -> Option<Channel> {
        self.channel
    }

    fn accepts(&self, event: &Event) -> bool {
        self.channel.map_or(true, |channel| channel == event.channel)
    }

    /// Wait for the next matching event
    ///
    /// # Errors
    ///
    /// `EventBusError::SubscriptionClosed` once every bus handle is dropped.
    pub async fn recv(&mut self) -> Result<Event> {
        loop {
            match self.receiver.recv().await {
                Ok(event) if self.accepts(&event) => return Ok(event),
                Ok(_) => continue,
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, channel = ?self.channel, "subscriber lagged, events skipped");
                }
                Err(RecvError::Closed) => return Err(EventBusError::SubscriptionClosed),
            }
        }
    }

    /// Next matching event if one is already queued
    ///
    /// # Errors
    ///
    /// `EventBusError::SubscriptionClosed` once every bus handle is dropped.
    pub fn try_recv(&mut self) -> Result<Option<Event>> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) if self.accepts(&event) => return Ok(Some(event)),
                Ok(_) => continue,
                Err(TryRecvError::Empty) => return Ok(None),
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, channel = ?self.channel, "subscriber lagged, events skipped");
                }
                Err(TryRecvError::Closed) => return Err(EventBusError::SubscriptionClosed),
            }
        }
    }

    /// Every matching event queued so far
    ///
    /// # Errors
    ///
    /// `EventBusError::SubscriptionClosed` once every bus handle is dropped.
    pub fn drain(&mut self) -> Result<Vec<Event>> {
        let mut events = Vec::new();
        while let Some(event) = self.try_recv()? {
            events.push(event);
        }
        Ok(events)
    }

    /// Convert into a stream of matching events; lag is skipped silently
    pub fn into_stream(self) -> impl Stream<Item = Event> + Send + 'static {
        let channel = self.channel;
        BroadcastStream::new(self.receiver).filter_map(move |item| match item {
            Ok(event) if channel.map_or(true, |c| c == event.channel) => Some(event),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::bus::EventBus;
    use crate::error::EventBusError;
    use crate::event::{AudioAction, Channel, ChatAction, EventPayload};
    use tokio_stream::StreamExt;

    #[test]
    fn test_channel_filtering() {
        let bus = EventBus::new();
        let mut audio = bus.subscribe(Channel::VoiceCommandAudio);
        let mut everything = bus.subscribe_all();

        bus.publish(EventPayload::chat(ChatAction::SendMessage, Some("send".into())));
        bus.publish(EventPayload::audio(AudioAction::PlayLastMessage));

        let audio_events = audio.drain().unwrap();
        assert_eq!(audio_events.len(), 1);
        assert_eq!(audio_events[0].channel, Channel::VoiceCommandAudio);

        assert_eq!(everything.drain().unwrap().len(), 2);
    }

    #[test]
    fn test_try_recv_empty() {
        let bus = EventBus::new();
        let mut chat = bus.subscribe(Channel::VoiceCommandChat);
        assert!(chat.try_recv().unwrap().is_none());
    }

    #[test]
    fn test_lagged_subscriber_keeps_latest() {
        let bus = EventBus::with_capacity(2).unwrap();
        let mut chat = bus.subscribe(Channel::VoiceCommandChat);

        for n in 0..5 {
            bus.publish(EventPayload::chat(ChatAction::SendText, Some(format!("message {n}"))));
        }

        let texts: Vec<_> = chat
            .drain()
            .unwrap()
            .into_iter()
            .filter_map(|event| match event.payload {
                EventPayload::Chat(command) => command.text,
                EventPayload::Audio(_) => None,
            })
            .collect();
        assert_eq!(texts, vec!["message 3".to_string(), "message 4".to_string()]);
    }

    #[test]
    fn test_closed_after_bus_dropped() {
        let bus = EventBus::new();
        let mut chat = bus.subscribe(Channel::VoiceCommandChat);
        drop(bus);
        assert!(matches!(chat.try_recv(), Err(EventBusError::SubscriptionClosed)));
    }

    #[tokio::test]
    async fn test_async_recv_skips_other_channels() {
        let bus = EventBus::new();
        let mut audio = bus.subscribe(Channel::VoiceCommandAudio);

        let publisher = bus.clone();
        tokio::spawn(async move {
            publisher.publish(EventPayload::chat(ChatAction::ClearChat, None));
            publisher.publish(EventPayload::audio(AudioAction::PlayLastMessage));
        });

        let event = audio.recv().await.unwrap();
        assert_eq!(event.payload, EventPayload::audio(AudioAction::PlayLastMessage));
    }

    #[tokio::test]
    async fn test_stream_yields_matching_events() {
        let bus = EventBus::new();
        let stream = bus.subscribe(Channel::VoiceCommandChat).into_stream();

        bus.publish(EventPayload::audio(AudioAction::PlayLastMessage));
        bus.publish(EventPayload::chat(ChatAction::SendText, Some("hello".into())));
        drop(bus);

        let events: Vec<_> = stream.collect().await;
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].channel, Channel::VoiceCommandChat);
    }
}
