use colored::Colorize;
use color_eyre::eyre::{Report, Result};
use error_common::{log_error_with_context, CareVoiceError, ErrorContext};
use events_bus::{dispatch_pending, Channel, EventBus};
use secrecy::Secret;
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use voice_command_service::{
    CommandResolver, MatchKind, MemoryNavigator, Resolution, Role, ServiceComponents, VoiceCommandConfig,
    VoiceCommandService, VoiceError,
};

use crate::listeners::{ConsoleAudioPlayer, ConsoleChatPanel};

const COMPONENT: &str = "carevoice";

/// Machine-readable form of a resolution
#[derive(Debug, Serialize, PartialEq)]
pub struct ResolutionView {
    pub utterance: String,
    pub action: Option<String>,
    pub alias: Option<String>,
    #[serde(rename = "match")]
    pub match_kind: Option<&'static str>,
    pub score: Option<f64>,
    pub response: String,
}

impl From<&Resolution> for ResolutionView {
    fn from(resolution: &Resolution) -> Self {
        let matched = resolution.matched.as_ref();
        Self {
            utterance: resolution.utterance.clone(),
            action: resolution.action().map(ToString::to_string),
            alias: matched.map(|m| m.alias.clone()),
            match_kind: matched.map(|m| match m.kind {
                MatchKind::Exact => "exact",
                MatchKind::Fuzzy { .. } => "fuzzy",
            }),
            score: matched.and_then(|m| match m.kind {
                MatchKind::Fuzzy { score } => Some(score),
                MatchKind::Exact => None,
            }),
            response: resolution.response.clone(),
        }
    }
}

/// Log a service error with context and turn it into a report
pub fn report(action: &str, err: VoiceError) -> Report {
    let shared = CareVoiceError::from(err);
    let context = ErrorContext::new().with_component(COMPONENT).with_action(action);
    log_error_with_context(&context, &shared);
    Report::new(shared)
}

pub fn render_resolution(resolution: &Resolution) -> String {
    let target = match (&resolution.matched, resolution.action()) {
        (Some(matched), Some(action)) => {
            let how = match matched.kind {
                MatchKind::Exact => "contains".to_string(),
                MatchKind::Fuzzy { score } => format!("~{score:.3}"),
            };
            format!("{} ({how} \"{}\")", action.to_string().green().bold(), matched.alias)
        }
        _ => format!("{}", "free text".yellow().bold()),
    };
    format!("{target}\n{} {}", "»".blue(), resolution.response)
}

fn build_resolver(config: &VoiceCommandConfig) -> Result<CommandResolver> {
    let table = config.alias_table().map_err(|e| report("build_alias_table", e))?;
    CommandResolver::with_threshold(Arc::new(table), config.similarity_threshold)
        .map_err(|e| report("build_resolver", e))
}

/// `carevoice resolve`: resolution only, nothing is dispatched
pub fn resolve(config: &VoiceCommandConfig, utterance: &str, json: bool) -> Result<()> {
    let resolver = build_resolver(config)?;
    let Some(resolution) = resolver.resolve(utterance) else {
        eprintln!("{}", "nothing to resolve".dimmed());
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&ResolutionView::from(&resolution))?);
    } else {
        println!("{}", render_resolution(&resolution));
    }
    Ok(())
}

/// `carevoice aliases`
pub fn aliases(config: &VoiceCommandConfig) -> Result<()> {
    let table = config.alias_table().map_err(|e| report("build_alias_table", e))?;
    for group in table.groups() {
        let action = group.action.to_string();
        let action = if group.action.is_route() { action.green() } else { action.cyan() };
        println!("{action:<28} {}", group.phrases.join(", "));
    }
    println!("{}", format!("{} aliases, threshold {}", table.len(), config.similarity_threshold).dimmed());
    Ok(())
}

/// `carevoice config`
pub fn config(config: &VoiceCommandConfig) -> Result<()> {
    print!("{}", config_engine::render_yaml(config)?);
    Ok(())
}

/// `carevoice shell`: one utterance per line, as if it had been spoken
pub fn shell(config: VoiceCommandConfig) -> Result<()> {
    let bus = EventBus::new();
    let mut chat = bus.subscribe(Channel::VoiceCommandChat);
    let mut audio = bus.subscribe(Channel::VoiceCommandAudio);
    let mut panel = ConsoleChatPanel::new();
    let mut player = ConsoleAudioPlayer::new();

    let navigator = MemoryNavigator::with_routes(config.routes.clone());
    let components = ServiceComponents {
        navigator: Box::new(navigator.clone()),
        ..ServiceComponents::default()
    };
    let mut service =
        VoiceCommandService::with_components(config, bus, components).map_err(|e| report("start_shell", e))?;

    println!(
        "{} type a command, {} for help, {} to leave",
        "carevoice".bold(),
        ":help".cyan(),
        ":quit".cyan()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("{} ", ">".blue().bold());
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();

        if let Some(meta) = line.strip_prefix(':') {
            if !meta_command(&mut service, meta) {
                break;
            }
            continue;
        }

        let before = navigator.current();
        match service.process_command(line) {
            Ok(Some(resolution)) => println!("{}", render_resolution(&resolution)),
            Ok(None) => continue,
            Err(err) => {
                eprintln!("{} {}", "error:".red().bold(), report("process_command", err));
                continue;
            }
        }

        if navigator.current() != before {
            if let Some(path) = navigator.current() {
                println!("{} {}", "[router]".green(), path);
            }
        }
        dispatch_pending(&mut chat, &mut panel)?;
        dispatch_pending(&mut audio, &mut player)?;
        for line in panel.take_lines().into_iter().chain(player.take_lines()) {
            println!("{line}");
        }
    }

    println!("{}", format!("{} commands processed", service.history().len()).dimmed());
    Ok(())
}

/// Returns `false` when the shell should exit
fn meta_command(service: &mut VoiceCommandService, meta: &str) -> bool {
    let mut parts = meta.split_whitespace();
    match parts.next().unwrap_or_default() {
        "q" | "quit" | "exit" => return false,
        "history" => {
            for entry in service.recent_commands() {
                println!("{} {}", entry.timestamp.format("%H:%M:%S").to_string().dimmed(), entry.text);
            }
        }
        "speech" => {
            let enabled = service.toggle_speech();
            println!("speech feedback {}", if enabled { "on" } else { "off" });
        }
        "login" => match (parts.next(), parts.next().map(str::parse::<Role>)) {
            (Some(name), Some(Ok(role))) => {
                match service.login(name, role, Secret::new(format!("cli-{name}"))) {
                    Ok(()) => println!("signed in as {name} ({role})"),
                    Err(err) => eprintln!("{} {}", "error:".red().bold(), report("login", err)),
                }
            }
            _ => println!("usage: :login <name> <patient|doctor|admin>"),
        },
        "whoami" => match service.session().current() {
            Some(session) => println!("{}", session.user_name),
            None => println!("{}", "not signed in".dimmed()),
        },
        _ => println!(":history  :speech  :login <name> <role>  :whoami  :quit"),
    }
    true
}
