use tracing::warn;

use crate::error::Result;
use crate::event::Event;
use crate::subscriber::Subscriber;

/// A listener component reacting to bus events
pub trait EventHandler {
    /// # Errors
    ///
    /// Implementations report failures they want surfaced to the caller.
    fn handle_event(&mut self, event: &Event) -> Result<()>;
}

/// Feed every queued event of `subscriber` to `handler`.
///
/// A failing event is logged and skipped so one bad event does not starve
/// the rest. Returns the number of events handled successfully.
///
/// # Errors
///
/// Only when the subscription itself is closed.
pub fn dispatch_pending<H>(subscriber: &mut Subscriber, handler: &mut H) -> Result<usize>
where
    H: EventHandler + ?Sized,
{
    let mut handled = 0;
    while let Some(event) = subscriber.try_recv()? {
        match handler.handle_event(&event) {
            Ok(()) => handled += 1,
            Err(err) => warn!(event_id = %event.id, channel = %event.channel, error = %err, "event handler failed"),
        }
    }
    Ok(handled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::EventBus;
    use crate::error::EventBusError;
    use crate::event::{Channel, ChatAction, EventPayload};

    #[derive(Default)]
    struct ChatLog {
        lines: Vec<String>,
    }

    impl EventHandler for ChatLog {
        fn handle_event(&mut self, event: &Event) -> Result<()> {
            match &event.payload {
                EventPayload::Chat(command) => match &command.text {
                    Some(text) => {
                        self.lines.push(text.clone());
                        Ok(())
                    }
                    None => Err(EventBusError::HandlerFailed("chat event without text".into())),
                },
                EventPayload::Audio(_) => Ok(()),
            }
        }
    }

    #[test]
    fn test_dispatch_pending_skips_failures() {
        let bus = EventBus::new();
        let mut subscriber = bus.subscribe(Channel::VoiceCommandChat);
        let mut log = ChatLog::default();

        bus.publish(EventPayload::chat(ChatAction::SendText, Some("first".into())));
        bus.publish(EventPayload::chat(ChatAction::ClearChat, None));
        bus.publish(EventPayload::chat(ChatAction::SendText, Some("second".into())));

        let handled = dispatch_pending(&mut subscriber, &mut log).unwrap();
        assert_eq!(handled, 2);
        assert_eq!(log.lines, vec!["first".to_string(), "second".to_string()]);
    }
}
