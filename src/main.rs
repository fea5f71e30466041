//! Wren - A minimalist terminal composer for posting to X
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use tokio::runtime::Runtime;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use wren::credentials::ALL_VARS;
use wren::{Config, Credentials, DraftSession, MAX_POST_CHARS, Outcome, SubmissionFlow, XClient};

fn main() -> Result<()> {
    // Initialize logging (RUST_LOG=debug for verbose output)
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Parse CLI arguments
    match parse_args()? {
        Command::Run => run_tui(),
        Command::Post { content } => post_cli(&content),
        Command::WhoAmI => whoami_cli(),
        Command::Config => show_config(),
        Command::Help => {
            print_help();
            Ok(())
        }
        Command::Version => {
            print_version();
            Ok(())
        }
    }
}

/// CLI commands
enum Command {
    Run,
    Post { content: String },
    WhoAmI,
    Config,
    Help,
    Version,
}

fn parse_args() -> Result<Command> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() == 1 {
        return Ok(Command::Run);
    }

    match args[1].as_str() {
        "-h" | "--help" | "help" => Ok(Command::Help),
        "-v" | "--version" | "version" => Ok(Command::Version),
        "post" => {
            if args.len() < 3 {
                anyhow::bail!("Missing post content\nExample: wren post \"Hello world!\"");
            }
            // Unquoted words are joined back together
            Ok(Command::Post {
                content: args[2..].join(" "),
            })
        }
        "whoami" => Ok(Command::WhoAmI),
        "config" => Ok(Command::Config),
        other => Err(anyhow::anyhow!(
            "Unknown command: {other}\nRun 'wren --help' for usage"
        )),
    }
}

fn print_help() {
    let config_path = Config::default_path()
        .map_or_else(|_| "Unknown".to_string(), |p| p.display().to_string());
    let credential_vars = ALL_VARS.join(", ");

    println!(
        r#"🐦 Wren - A minimalist terminal composer for X

USAGE:
    wren                               Launch the composer
    wren [COMMAND]

COMMANDS:
    post <content>                     Post once from the command line
      Example:
        wren post "Hello world!"

    whoami                             Check credentials against the X API
    config                             Show config file path and values

OPTIONS:
    -h, --help                         Show this help message
    -v, --version                      Show version information

KEYBINDINGS (composer):
    Ctrl+S                             Send post
    Ctrl+T                             Next theme
    Esc / Ctrl+C                       Close

CREDENTIALS (environment):
    {credential_vars}

CONFIG:
    {config_path}

Posts are limited to {MAX_POST_CHARS} characters."#
    );
}

fn print_version() {
    println!("wren {}", wren::VERSION);
}

fn run_tui() -> Result<()> {
    let config = Config::load()?;
    let credentials = Credentials::from_env()?;
    let rt = Runtime::new()?;
    wren::app::run(&rt, config, credentials)
}

fn post_cli(content: &str) -> Result<()> {
    let config = Config::load()?;
    let credentials = Credentials::from_env()?;
    let client = XClient::new(credentials, &config.api_base, config.request_timeout())?;

    let mut draft = DraftSession::new();
    draft.set_text(content);
    if draft.text().len() < content.len() {
        println!("⚠ Trimmed to {} characters", MAX_POST_CHARS);
    }

    let mut flow = SubmissionFlow::new(config.feedback_delay(), config.clear_draft_on_failure);
    let rt = Runtime::new()?;
    let outcome = rt.block_on(flow.submit(&draft, &client));

    match outcome {
        Ok(Outcome::Posted(post)) => {
            println!("✓ Post successfully sent!");
            println!("  {}", post.url());
            Ok(())
        }
        Ok(Outcome::Blank) => Err(anyhow::anyhow!("Nothing to post")),
        Ok(Outcome::Busy) => Err(anyhow::anyhow!("A submission is already in progress")),
        Err(e) => {
            println!("✗ Post failed to send!");
            Err(e.into())
        }
    }
}

fn whoami_cli() -> Result<()> {
    let config = Config::load()?;
    let credentials = Credentials::from_env()?;
    let client = XClient::new(credentials, &config.api_base, config.request_timeout())?;

    let rt = Runtime::new()?;
    let user = rt.block_on(client.verify_credentials())?;
    println!("✓ Authenticated as @{} ({})", user.username, user.name);
    println!("  id: {}", user.id);
    Ok(())
}

fn show_config() -> Result<()> {
    let path = Config::default_path()?;
    let config = Config::load_from(&path)?;

    println!("Config file: {}", path.display());
    if !path.exists() {
        println!("(not created yet, showing defaults)");
    }
    println!();
    println!("  theme                   {}", config.theme);
    println!("  feedback_delay_secs     {}", config.feedback_delay_secs);
    println!("  clear_draft_on_failure  {}", config.clear_draft_on_failure);
    println!("  api_base                {}", config.api_base);
    println!("  request_timeout_secs    {}", config.request_timeout_secs);
    Ok(())
}
