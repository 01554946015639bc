mod demo;

use std::fs;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde_json::json;
use slackbot_core::{
    CommandRegistry, Event, Outbound, RecordingMessenger, render_help, tokenize, try_execute,
};
use slackbot_webhook::{
    BotConfig, RETRY_NUM_HEADER, SIGNATURE_HEADER, SlackBot, TIMESTAMP_HEADER, WebhookRequest,
    sign_request,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// CLI output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum CliOutputFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "slackbot-local")]
#[command(about = "Run slackbot commands and webhook payloads locally")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Dispatch message text against the registered commands.
    Dispatch(DispatchArgs),
    /// Feed a webhook payload file through the bot.
    Replay(ReplayArgs),
    /// List the registered commands.
    Commands(CommandsArgs),
}

#[derive(Debug, Args)]
struct DispatchArgs {
    /// Message text, e.g. `repeat hello 3 bold`.
    #[arg(required = true)]
    text: Vec<String>,
    /// Channel ID of the simulated message.
    #[arg(long, default_value = "CLOCAL")]
    channel: String,
    /// User ID of the simulated sender.
    #[arg(long, default_value = "ULOCAL")]
    user: String,
    /// Render `help` without choices and descriptions by default.
    #[arg(long)]
    simple_help: bool,
    /// Output format.
    #[arg(long, value_enum, default_value = "text")]
    format: CliOutputFormat,
}

#[derive(Debug, Args)]
struct ReplayArgs {
    /// Webhook body (JSON) to replay.
    #[arg(long)]
    input: PathBuf,
    /// Bot configuration YAML. `SLACK_*` environment variables override it.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Mark the request as a Slack redelivery.
    #[arg(long)]
    retry: bool,
    /// Output format.
    #[arg(long, value_enum, default_value = "text")]
    format: CliOutputFormat,
}

#[derive(Debug, Args)]
struct CommandsArgs {
    /// Render usage without choices and descriptions.
    #[arg(long)]
    simple: bool,
    /// Output format.
    #[arg(long, value_enum, default_value = "text")]
    format: CliOutputFormat,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Dispatch(args) => run_dispatch(args),
        Command::Replay(args) => run_replay(args),
        Command::Commands(args) => run_commands(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn build_registry(help_verbose: bool) -> Result<CommandRegistry, String> {
    let mut registry = CommandRegistry::new();
    registry.set_default_help_verbosity(help_verbose);
    registry
        .setup(demo::commands())
        .map_err(|e| format!("invalid command definition: {e}"))?;
    Ok(registry)
}

fn run_dispatch(args: DispatchArgs) -> Result<(), String> {
    let registry = build_registry(!args.simple_help)?;
    let messenger = RecordingMessenger::new();

    let mut event = Event::new()
        .with("type", "message")
        .with("channel", args.channel)
        .with("user", args.user)
        .with("event_ts", local_timestamp())
        .with("text", args.text.join(" "));
    event.normalize_text();

    let tokens = tokenize(event.text());
    debug!(?tokens, "dispatching local message");
    let handled = try_execute(&registry, &messenger, &event, &tokens);
    let sent = messenger.take();

    match args.format {
        CliOutputFormat::Json => print_json(&json!({ "handled": handled, "sent": sent }))?,
        CliOutputFormat::Text => {
            for outbound in &sent {
                println!("{}", format_outbound(outbound));
            }
        }
    }

    if handled {
        Ok(())
    } else {
        Err(format!(
            "no command matched {:?}",
            tokens.first().map(String::as_str).unwrap_or_default()
        ))
    }
}

fn run_replay(args: ReplayArgs) -> Result<(), String> {
    let config = match &args.config {
        Some(path) => BotConfig::load(path)
            .map_err(|e| format!("failed to load config '{}': {e}", path.display()))?,
        None => BotConfig::default(),
    }
    .merge_env();

    let body = fs::read(&args.input)
        .map_err(|e| format!("failed to read '{}': {e}", args.input.display()))?;

    let mut request = WebhookRequest::new(body);
    if let Some(secret) = config.signing_secret.as_deref() {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = sign_request(secret, &timestamp, request.body());
        request = request
            .with_header(TIMESTAMP_HEADER, timestamp)
            .with_header(SIGNATURE_HEADER, signature);
    }
    if args.retry {
        request = request.with_header(RETRY_NUM_HEADER, "1");
    }

    let mut bot = SlackBot::new(config, RecordingMessenger::new());
    bot.setup_commands(demo::commands())
        .map_err(|e| format!("invalid command definition: {e}"))?;

    let response = bot.handle(&request);
    let sent = bot.messenger().take();

    match args.format {
        CliOutputFormat::Json => print_json(&json!({
            "status": response.status,
            "content_type": response.content_type,
            "body": response.body,
            "sent": sent,
        }))?,
        CliOutputFormat::Text => {
            println!("status: {}", response.status);
            if !response.body.is_empty() {
                println!("body: {}", response.body);
            }
            for outbound in &sent {
                println!("{}", format_outbound(outbound));
            }
        }
    }

    if response.is_success() {
        Ok(())
    } else {
        Err(format!("webhook responded with status {}", response.status))
    }
}

fn run_commands(args: CommandsArgs) -> Result<(), String> {
    let registry = build_registry(!args.simple)?;

    match args.format {
        CliOutputFormat::Json => print_json(&registry.summaries())?,
        CliOutputFormat::Text => {
            for command in registry.commands() {
                println!("{}", render_help(command, !args.simple));
            }
        }
    }
    Ok(())
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<(), String> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| format!("failed to serialize output: {e}"))?;
    println!("{text}");
    Ok(())
}

fn local_timestamp() -> String {
    let now = chrono::Utc::now();
    format!("{}.{:06}", now.timestamp(), now.timestamp_subsec_micros())
}

fn format_outbound(outbound: &Outbound) -> String {
    match outbound {
        Outbound::Message { channel, text } => format!("[message {channel}]\n{text}"),
        Outbound::Ephemeral {
            channel,
            user,
            text,
        } => format!("[ephemeral {channel} {user}]\n{text}"),
        Outbound::Thread {
            channel,
            thread_ts,
            text,
        } => format!("[thread {channel} {thread_ts}]\n{text}"),
    }
}

#[cfg(test)]
mod tests {
    use super::{format_outbound, local_timestamp};
    use slackbot_core::Outbound;

    #[test]
    fn test_format_outbound_headers() {
        let thread = Outbound::Thread {
            channel: "C1".into(),
            thread_ts: "1.5".into(),
            text: "pong".into(),
        };
        assert_eq!(format_outbound(&thread), "[thread C1 1.5]\npong");

        let ephemeral = Outbound::Ephemeral {
            channel: "C1".into(),
            user: "U1".into(),
            text: "help".into(),
        };
        assert_eq!(format_outbound(&ephemeral), "[ephemeral C1 U1]\nhelp");
    }

    #[test]
    fn test_local_timestamp_shape() {
        let ts = local_timestamp();
        let (secs, micros) = ts.split_once('.').unwrap();
        assert!(secs.parse::<i64>().unwrap() > 0);
        assert_eq!(micros.len(), 6);
    }
}
