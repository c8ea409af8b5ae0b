//! voiceclone - 终端客户端
//!
//! 连接运行中的代理服务：先克隆音色，再用它合成语音

use anyhow::Result;
use clap::Parser;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use voiceclone::client::{
    view, CommandError, ExternalPlayer, HttpProxyApi, ObjectUrlStore, TerminalApp,
    TerminalCommand, Workflow,
};

#[derive(Parser, Debug)]
#[command(name = "voiceclone")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "VoiceClone AI - clone a voice and make it say anything")]
struct Args {
    /// Proxy server URL
    #[arg(long, env = "VOICECLONE_SERVER_URL", default_value = "http://localhost:3001")]
    server: String,

    /// Player command, audio is written to its stdin
    #[arg(long, default_value = "ffplay")]
    player: String,

    /// Player arguments
    #[arg(
        long = "player-arg",
        value_name = "ARG",
        allow_hyphen_values = true,
        default_values = ["-nodisp", "-autoexit", "-loglevel", "quiet", "-"]
    )]
    player_args: Vec<String>,

    /// Log level (RUST_LOG takes precedence)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn setup_tracing(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    setup_tracing(&args.log_level);

    let api = Arc::new(HttpProxyApi::new(&args.server)?);
    let store = ObjectUrlStore::new();
    let player = ExternalPlayer::new(&args.player, args.player_args.clone(), store.clone());
    let mut app = TerminalApp::new(Workflow::new(api, store, player));

    tracing::info!(server = %args.server, player = %args.player, "Client started");

    let mut stdout = std::io::stdout();
    writeln!(stdout, "{}", view::header())?;
    write!(stdout, "{}", app.render())?;
    writeln!(stdout, "Type 'help' for commands.")?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match TerminalCommand::parse(&line) {
            Ok(command) => command,
            Err(CommandError::Empty) => {
                app.poll();
                write!(stdout, "{}", app.render())?;
                continue;
            }
            Err(e) => {
                writeln!(stdout, "{}", e)?;
                continue;
            }
        };

        let redraw = !matches!(command, TerminalCommand::Help | TerminalCommand::Show);
        if !app.handle(command, &mut stdout).await? {
            break;
        }
        if redraw {
            write!(stdout, "{}", app.render())?;
        }
    }

    Ok(())
}
