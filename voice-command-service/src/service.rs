use chrono::{DateTime, Utc};
use config_engine::Validate;
use events_bus::EventBus;
use logger_redacted::{redacted_debug, redacted_warn, PiiRedactor};
use secrecy::SecretString;
use std::sync::Arc;
use tracing::{info, warn};

use crate::capture::{
    CaptureController, CaptureState, RecognitionError, RecognitionResult, RECOGNITION_ERROR_FEEDBACK,
};
use crate::config::VoiceCommandConfig;
use crate::dispatch::{CommandDispatcher, LocalEffect};
use crate::error::{VoiceError, VoiceResult};
use crate::feedback::{Feedback, FeedbackSurface};
use crate::history::{CommandHistory, CommandLogEntry};
use crate::hotkey::{Hotkey, KeyPress};
use crate::navigation::{MemoryNavigator, Navigator};
use crate::resolver::{CommandResolver, Resolution};
use crate::session::{MemorySessionStore, Role, SessionContext, SessionStore};
use crate::speech::{SilentSynthesizer, SpeechRecognizer, SpeechSynthesizer, UnsupportedRecognizer};

/// Host integrations injected into the service
pub struct ServiceComponents {
    pub navigator: Box<dyn Navigator>,
    pub recognizer: Box<dyn SpeechRecognizer>,
    pub synthesizer: Box<dyn SpeechSynthesizer>,
    pub session_store: Box<dyn SessionStore>,
}

impl Default for ServiceComponents {
    /// Text-only components: in-memory router and session, no speech
    fn default() -> Self {
        Self {
            navigator: Box::new(MemoryNavigator::new()),
            recognizer: Box::new(UnsupportedRecognizer),
            synthesizer: Box::new(SilentSynthesizer),
            session_store: Box::new(MemorySessionStore::new()),
        }
    }
}

/// Voice command front end: resolves utterances, dispatches them, and
/// owns the capture, feedback, history, and session state around them
pub struct VoiceCommandService {
    config: VoiceCommandConfig,
    resolver: CommandResolver,
    dispatcher: CommandDispatcher,
    capture: CaptureController,
    feedback: FeedbackSurface,
    history: CommandHistory,
    session: SessionContext,
    hotkey: Hotkey,
    redactor: PiiRedactor,
}

impl VoiceCommandService {
    /// Create a text-only service with default components
    ///
    /// # Errors
    ///
    /// See [`VoiceCommandService::with_components`].
    pub fn new(config: VoiceCommandConfig, bus: EventBus) -> VoiceResult<Self> {
        Self::with_components(config, bus, ServiceComponents::default())
    }

    /// Create a service around host-provided components
    ///
    /// # Errors
    ///
    /// Invalid configuration, an alias table that fails to build, or a
    /// session store that cannot be read.
    pub fn with_components(
        config: VoiceCommandConfig,
        bus: EventBus,
        components: ServiceComponents,
    ) -> VoiceResult<Self> {
        config.validate()?;

        let table = Arc::new(config.alias_table()?);
        let resolver = CommandResolver::with_threshold(table, config.similarity_threshold)?;
        let hotkey: Hotkey = config.hotkey.parse()?;
        let session = SessionContext::load(components.session_store)?;

        info!(
            aliases = resolver.table().len(),
            threshold = resolver.threshold(),
            hotkey = %hotkey,
            "voice command service ready"
        );

        Ok(Self {
            dispatcher: CommandDispatcher::new(bus, components.navigator),
            capture: CaptureController::new(components.recognizer, config.recognition_settings()),
            feedback: FeedbackSurface::new(
                components.synthesizer,
                config.feedback_duration(),
                config.speech_feedback_enabled,
            ),
            history: CommandHistory::new(),
            redactor: PiiRedactor::from_logger_config(&config.logging),
            resolver,
            session,
            hotkey,
            config,
        })
    }

    /// Resolve and carry out an utterance. `Ok(None)` for whitespace-only
    /// input, which leaves no trace.
    ///
    /// # Errors
    ///
    /// Navigation or session storage failures. The utterance is still
    /// recorded in the history.
    pub fn process_command(&mut self, text: &str) -> VoiceResult<Option<Resolution>> {
        self.process_command_at(text, Utc::now())
    }

    /// [`process_command`](Self::process_command) with an explicit clock
    ///
    /// # Errors
    ///
    /// As [`process_command`](Self::process_command).
    pub fn process_command_at(&mut self, text: &str, now: DateTime<Utc>) -> VoiceResult<Option<Resolution>> {
        let Some(resolution) = self.resolver.resolve(text) else {
            return Ok(None);
        };
        self.history.record(resolution.utterance.clone(), now);

        redacted_debug!(
            self.redactor,
            &resolution.utterance,
            action = ?resolution.action().map(ToString::to_string),
            matched = ?resolution.matched.as_ref().map(|m| m.kind),
            "voice command resolved"
        );

        let effect = match self.dispatcher.dispatch(&resolution) {
            Ok(effect) => effect,
            Err(err) => {
                redacted_warn!(
                    self.redactor,
                    &resolution.utterance,
                    error = %err,
                    "voice command not carried out"
                );
                return Err(err);
            }
        };

        match effect {
            Some(LocalEffect::StopListening) => {
                self.capture.stop();
            }
            Some(LocalEffect::SignOut) => {
                self.session.sign_out()?;
                self.dispatcher.navigate(&self.config.sign_out_redirect)?;
            }
            None => {}
        }

        self.feedback.surface(resolution.response.clone(), now);
        Ok(Some(resolution))
    }

    /// Begin listening. Returns whether a recognition session started.
    /// Failures other than a missing recognizer are shown as feedback.
    pub fn start_listening(&mut self) -> bool {
        match self.capture.start() {
            Ok(started) => started,
            Err(VoiceError::RecognitionUnsupported) => {
                warn!("speech recognition unavailable; text commands only");
                false
            }
            Err(err) => {
                warn!(error = %err, "could not start speech recognition");
                self.feedback.surface(RECOGNITION_ERROR_FEEDBACK, Utc::now());
                false
            }
        }
    }

    /// Returns whether a recognition session was running
    pub fn stop_listening(&mut self) -> bool {
        self.capture.stop()
    }

    /// Returns whether voice control is now enabled
    pub fn toggle_voice_control(&mut self) -> bool {
        self.capture.toggle()
    }

    /// Returns whether speech feedback is now enabled
    pub fn toggle_speech(&mut self) -> bool {
        self.feedback.toggle_speech()
    }

    /// Toggle voice control on the configured hotkey, starting to listen
    /// when it turns the control on. Returns whether the press matched.
    pub fn handle_hotkey(&mut self, press: &KeyPress) -> bool {
        if !self.hotkey.matches(press) {
            return false;
        }
        if self.capture.toggle() {
            self.start_listening();
        }
        true
    }

    /// Feed a recognizer result; finalized text is processed as a command.
    ///
    /// # Errors
    ///
    /// As [`process_command`](Self::process_command).
    pub fn handle_recognition_result(&mut self, result: &RecognitionResult) -> VoiceResult<Option<Resolution>> {
        match self.capture.on_result(result) {
            Some(text) => self.process_command(&text),
            None => Ok(None),
        }
    }

    /// Recognizer error; "no-speech" resets silently
    pub fn handle_recognition_error(&mut self, error: &RecognitionError) {
        if let Some(message) = self.capture.on_error(error) {
            self.feedback.surface(message, Utc::now());
        }
    }

    pub fn handle_recognition_end(&mut self) {
        self.capture.on_end();
    }

    /// Sign in and persist the session
    ///
    /// # Errors
    ///
    /// Session storage failures.
    pub fn login(&mut self, user_name: &str, role: Role, access_token: SecretString) -> VoiceResult<()> {
        self.session.login(user_name, role, access_token)
    }

    pub fn config(&self) -> &VoiceCommandConfig {
        &self.config
    }

    pub fn resolver(&self) -> &CommandResolver {
        &self.resolver
    }

    pub fn bus(&self) -> &EventBus {
        self.dispatcher.bus()
    }

    pub fn hotkey(&self) -> &Hotkey {
        &self.hotkey
    }

    pub fn capture_state(&self) -> CaptureState {
        self.capture.state()
    }

    pub fn is_enabled(&self) -> bool {
        self.capture.is_enabled()
    }

    pub fn is_listening(&self) -> bool {
        self.capture.is_listening()
    }

    pub fn speech_enabled(&self) -> bool {
        self.feedback.speech_enabled()
    }

    pub fn transcript(&self) -> &str {
        self.capture.transcript()
    }

    /// Toast visible at `now`
    pub fn feedback_at(&self, now: DateTime<Utc>) -> Option<&Feedback> {
        self.feedback.visible_at(now)
    }

    pub fn last_feedback(&self) -> Option<&Feedback> {
        self.feedback.current()
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    /// History entries for the recent commands view
    pub fn recent_commands(&self) -> &[CommandLogEntry] {
        self.history.recent(self.config.history_display_limit)
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }
}

impl std::fmt::Debug for VoiceCommandService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoiceCommandService")
            .field("capture", &self.capture)
            .field("feedback", &self.feedback)
            .field("history", &self.history.len())
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speech::RecognitionSettings;
    use events_bus::Channel;
    use parking_lot::Mutex;

    #[derive(Clone, Default)]
    struct FakeRecognizer {
        running: Arc<Mutex<bool>>,
    }

    impl SpeechRecognizer for FakeRecognizer {
        fn is_supported(&self) -> bool {
            true
        }

        fn start(&mut self, _settings: &RecognitionSettings) -> VoiceResult<()> {
            *self.running.lock() = true;
            Ok(())
        }

        fn stop(&mut self) {
            *self.running.lock() = false;
        }
    }

    fn service() -> (VoiceCommandService, FakeRecognizer, MemoryNavigator) {
        let recognizer = FakeRecognizer::default();
        let navigator = MemoryNavigator::new();
        let components = ServiceComponents {
            navigator: Box::new(navigator.clone()),
            recognizer: Box::new(recognizer.clone()),
            ..ServiceComponents::default()
        };
        let service =
            VoiceCommandService::with_components(VoiceCommandConfig::default(), EventBus::new(), components)
                .unwrap();
        (service, recognizer, navigator)
    }

    #[test]
    fn test_hotkey_enables_and_listens() {
        let (mut service, recognizer, _) = service();

        assert!(service.handle_hotkey(&KeyPress::new("m").with_ctrl()));
        assert!(service.is_listening());
        assert!(*recognizer.running.lock());

        assert!(service.handle_hotkey(&KeyPress::new("m").with_ctrl()));
        assert_eq!(service.capture_state(), CaptureState::Disabled);
        assert!(!*recognizer.running.lock());

        assert!(!service.handle_hotkey(&KeyPress::new("k").with_ctrl()));
    }

    #[test]
    fn test_stop_command_stops_listening() {
        let (mut service, recognizer, _) = service();
        service.toggle_voice_control();
        assert!(service.start_listening());

        let resolution = service.process_command("stop").unwrap().unwrap();

        assert_eq!(resolution.response, "Turning off voice recognition.");
        assert!(!service.is_listening());
        assert!(service.is_enabled());
        assert!(!*recognizer.running.lock());
    }

    #[test]
    fn test_final_result_is_processed() {
        let (mut service, _, navigator) = service();
        service.toggle_voice_control();
        service.start_listening();

        let result = RecognitionResult::new(0, vec![crate::capture::TranscriptSegment::final_text("Go Home")]);
        let resolution = service.handle_recognition_result(&result).unwrap().unwrap();

        assert_eq!(resolution.response, "Navigating to home.");
        assert_eq!(navigator.current().as_deref(), Some("/"));
        assert_eq!(service.transcript(), "Go Home");
    }

    #[test]
    fn test_recognition_error_feedback() {
        let (mut service, _, _) = service();
        service.toggle_voice_control();
        service.start_listening();

        service.handle_recognition_error(&RecognitionError::from("no-speech"));
        assert!(service.last_feedback().is_none());
        assert_eq!(service.capture_state(), CaptureState::Idle);

        service.start_listening();
        service.handle_recognition_error(&RecognitionError::from("audio-capture"));
        assert_eq!(service.last_feedback().unwrap().message, RECOGNITION_ERROR_FEEDBACK);
        assert!(!service.is_listening());
    }

    #[test]
    fn test_empty_utterance_leaves_no_trace() {
        let (mut service, _, navigator) = service();
        let mut all = service.bus().subscribe_all();

        assert!(service.process_command("   ").unwrap().is_none());

        assert!(service.history().is_empty());
        assert!(service.last_feedback().is_none());
        assert!(navigator.history().is_empty());
        assert!(all.try_recv().unwrap().is_none());
    }

    #[test]
    fn test_free_text_reaches_chat_listener() {
        let (mut service, _, _) = service();
        let mut chat = service.bus().subscribe(Channel::VoiceCommandChat);

        service.process_command("what is my blood pressure").unwrap();

        let event = chat.try_recv().unwrap().unwrap();
        assert_eq!(
            event.payload,
            events_bus::EventPayload::chat(
                events_bus::ChatAction::SendText,
                Some("what is my blood pressure".into())
            )
        );
    }

    #[test]
    fn test_unsupported_recognizer_degrades_silently() {
        let mut service = VoiceCommandService::new(VoiceCommandConfig::default(), EventBus::new()).unwrap();
        assert!(service.toggle_voice_control());

        assert!(!service.start_listening());
        assert_eq!(service.capture_state(), CaptureState::Idle);
        assert!(service.last_feedback().is_none());

        let resolution = service.process_command("home").unwrap().unwrap();
        assert_eq!(resolution.response, "Navigating to home.");
    }

    struct BusyRecognizer;

    impl SpeechRecognizer for BusyRecognizer {
        fn is_supported(&self) -> bool {
            true
        }

        fn start(&mut self, _settings: &RecognitionSettings) -> VoiceResult<()> {
            Err(VoiceError::Recognition("microphone in use".into()))
        }

        fn stop(&mut self) {}
    }

    #[test]
    fn test_recognizer_start_failure_shows_feedback() {
        let components = ServiceComponents {
            recognizer: Box::new(BusyRecognizer),
            ..ServiceComponents::default()
        };
        let mut service =
            VoiceCommandService::with_components(VoiceCommandConfig::default(), EventBus::new(), components)
                .unwrap();
        service.toggle_voice_control();

        assert!(!service.start_listening());
        assert!(!service.is_listening());
        assert_eq!(service.last_feedback().unwrap().message, RECOGNITION_ERROR_FEEDBACK);
    }

    #[test]
    fn test_navigation_failure_is_recorded_and_returned() {
        let navigator = MemoryNavigator::with_routes(vec!["/".to_string()]);
        let components = ServiceComponents {
            navigator: Box::new(navigator.clone()),
            ..ServiceComponents::default()
        };
        let mut service =
            VoiceCommandService::with_components(VoiceCommandConfig::default(), EventBus::new(), components)
                .unwrap();

        let err = service.process_command("go to chatbot").unwrap_err();

        assert!(matches!(err, VoiceError::Navigation(ref m) if m.contains("/chatbot")));
        assert_eq!(service.history().len(), 1);
        assert_eq!(service.history().entries()[0].text, "go to chatbot");
        assert!(service.last_feedback().is_none());
        assert!(navigator.current().is_none());
    }

    #[test]
    fn test_recent_commands_window() {
        let (mut service, _, _) = service();
        for text in ["home", "profile", "help", "metrics"] {
            service.process_command(text).unwrap();
        }
        let recent: Vec<&str> = service.recent_commands().iter().map(|e| e.text.as_str()).collect();
        assert_eq!(recent, vec!["profile", "help", "metrics"]);
        assert_eq!(service.history().len(), 4);
    }
}
