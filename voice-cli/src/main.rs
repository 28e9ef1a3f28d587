use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use std::path::PathBuf;
use tracing::debug;

use voice_cli::commands;
use voice_command_service::VoiceCommandConfig;

/// CareVoice voice command resolver
#[derive(Parser, Debug)]
#[command(name = "carevoice", version)]
#[command(about = "Resolve spoken commands into navigation, app actions, or assistant messages")]
struct Args {
    /// Configuration file (YAML, TOML, or JSON); defaults to the platform config directory
    #[arg(short, long, global = true, env = "CAREVOICE_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve one utterance without dispatching it
    Resolve {
        /// Words of the utterance
        #[arg(required = true, num_args = 1..)]
        utterance: Vec<String>,

        /// Print the resolution as JSON
        #[arg(long)]
        json: bool,
    },
    /// Read utterances from stdin and carry them out
    Shell,
    /// Print the alias table
    Aliases,
    /// Print the effective configuration as YAML
    Config,
}

impl Command {
    /// Subcommand name; arguments stay out of log records
    fn name(&self) -> &'static str {
        match self {
            Command::Resolve { .. } => "resolve",
            Command::Shell => "shell",
            Command::Aliases => "aliases",
            Command::Config => "config",
        }
    }
}

fn log_start(args: &Args) {
    debug!(command = args.command.name(), verbose = args.verbose, "starting");
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let mut config =
        VoiceCommandConfig::load(args.config.as_deref()).map_err(|e| commands::report("load_config", e))?;
    if args.verbose {
        config.logging.level = "debug".to_string();
    }
    logger_redacted::init_tracing(&config.logging)?;
    log_start(&args);

    match args.command {
        Command::Resolve { utterance, json } => commands::resolve(&config, &utterance.join(" "), json),
        Command::Shell => commands::shell(config),
        Command::Aliases => commands::aliases(&config),
        Command::Config => commands::config(&config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::io;
    use std::sync::Arc;
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

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

    #[test]
    fn test_start_log_omits_utterance() {
        let args = Args::try_parse_from(["carevoice", "-v", "resolve", "call", "me", "on", "555", "123", "4567"])
            .unwrap();
        let buffer = LogBuffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(buffer.clone())
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || log_start(&args));

        let logs = String::from_utf8(buffer.0.lock().clone()).unwrap();
        assert!(logs.contains("starting"));
        assert!(logs.contains("resolve"));
        assert!(!logs.contains("4567"));
        assert!(!logs.contains("call me"));
    }

    #[test]
    fn test_command_names() {
        let args = Args::try_parse_from(["carevoice", "aliases"]).unwrap();
        assert_eq!(args.command.name(), "aliases");
    }
}
