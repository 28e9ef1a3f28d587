//! Utterances reach log records only after PII redaction

use events_bus::EventBus;
use parking_lot::Mutex;
use std::io;
use std::sync::Arc;
use tracing_subscriber::fmt::MakeWriter;
use voice_command_service::{MemoryNavigator, ServiceComponents, VoiceCommandConfig, VoiceCommandService};

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn capture_logs(run: impl FnOnce()) -> String {
    let buffer = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buffer.clone())
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .finish();
    tracing::subscriber::with_default(subscriber, run);
    buffer.contents()
}

#[test]
fn test_resolved_utterance_is_redacted() {
    let logs = capture_logs(|| {
        let mut service = VoiceCommandService::new(VoiceCommandConfig::default(), EventBus::new()).unwrap();
        service.process_command("call me on 555 123 4567").unwrap();
        service.process_command("my email is asha@example.com").unwrap();
    });

    assert!(logs.contains("voice command resolved"));
    assert!(logs.contains("[PHONE]"));
    assert!(!logs.contains("555 123 4567"));
    assert!(!logs.contains("asha@example.com"));
}

#[test]
fn test_failed_command_warning_is_redacted() {
    let components = ServiceComponents {
        navigator: Box::new(MemoryNavigator::with_routes(vec!["/".to_string()])),
        ..ServiceComponents::default()
    };

    let logs = capture_logs(|| {
        let mut service =
            VoiceCommandService::with_components(VoiceCommandConfig::default(), EventBus::new(), components)
                .unwrap();
        assert!(service.process_command("go to chatbot 555 123 4567").is_err());
    });

    assert!(logs.contains("voice command not carried out"));
    assert!(logs.contains("WARN"));
    assert!(!logs.contains("555 123 4567"));
}
