mod render;
mod repl;

use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use combatboard::config::RemoteConfig;
use combatboard::model::{Character, Position};
use combatboard::placement::{CellPress, ENEMY_TEMPLATES, TokenEdit};
use combatboard::remote::RemoteStore;
use combatboard::rng::StdRandom;
use combatboard::store::StoreError;
use combatboard::sync::SyncChannel;
use combatboard::{Session, SessionError, SessionEvent};
use frames::ErrorCode;
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, BufReader};
use uuid::Uuid;

use crate::repl::{ReplCommand, parse_command};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned HTTP {status} for {path}")]
    ServerError { status: u16, path: String },
    #[error("document store: {0}")]
    Store(#[from] StoreError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("terminal input failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "combatboard", about = "Shared tabletop combat board client")]
struct Cli {
    #[arg(long, env = "COMBATBOARD_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check the server health endpoint.
    Ping,
    /// Print the stored document at a path, e.g. `rooms/keep`.
    Peek { path: String },
    /// Join a room and play interactively.
    Play(PlayArgs),
}

#[derive(Args, Debug)]
struct PlayArgs {
    #[arg(long)]
    room: String,

    #[arg(long, env = "COMBATBOARD_PLAYER")]
    player: String,

    #[arg(long, default_value_t = false)]
    dm: bool,

    /// Seed the dice for reproducible sessions.
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Ping => run_ping(&cli.base_url).await,
        Command::Peek { path } => run_peek(&cli.base_url, &path).await,
        Command::Play(args) => run_play(&cli.base_url, args).await,
    }
}

async fn run_ping(base_url: &str) -> Result<(), CliError> {
    let path = "/healthz";
    let response = reqwest::get(http_url(base_url, path)).await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CliError::ServerError { status: status.as_u16(), path: path.to_owned() });
    }
    println!("ok");
    Ok(())
}

async fn run_peek(base_url: &str, doc_path: &str) -> Result<(), CliError> {
    let path = format!("/api/doc/{}", doc_path.trim_matches('/'));
    let response = reqwest::get(http_url(base_url, &path)).await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CliError::ServerError { status: status.as_u16(), path });
    }
    let json: Value = response.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

// =============================================================================
// PLAY
// =============================================================================

async fn run_play(base_url: &str, args: PlayArgs) -> Result<(), CliError> {
    let store = RemoteStore::connect(RemoteConfig::from_env(ws_url(base_url)?)).await?;
    let rng = match args.seed {
        Some(seed) => StdRandom::seeded(seed),
        None => StdRandom::from_os(),
    };
    let channel = SyncChannel::new(Arc::new(store));
    let mut session = Session::new(&args.player, args.dm, channel, Box::new(rng))?;
    session.join(&args.room).await?;

    let role = if args.dm { "DM" } else { "player" };
    println!("joined {} as {} ({role}); `help` lists commands", args.room, args.player);
    show(&session);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pending: Option<Uuid> = None;
    let mut feed_open = true;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim().is_empty() {
                    continue;
                }
                match parse_command(&line) {
                    Ok(ReplCommand::Quit) => break,
                    Ok(command) => {
                        if let Err(e) = execute(&mut session, &mut pending, command).await {
                            println!("error [{}]: {e}", e.error_code());
                        }
                        feed_open = session.room().is_some();
                    }
                    Err(e) => println!("{e}"),
                }
            }
            event = session.next_event(), if feed_open => match event {
                Some(SessionEvent::Updated) => {}
                Some(SessionEvent::ConnectionLost) => {
                    println!("connection lost; the board shown is the last known state");
                }
                None => feed_open = false,
            },
        }
    }

    session.leave();
    Ok(())
}

async fn execute(
    session: &mut Session,
    pending: &mut Option<Uuid>,
    command: ReplCommand,
) -> Result<(), SessionError> {
    match command {
        ReplCommand::Help => println!("{}", repl::HELP),
        ReplCommand::Quit => {}
        ReplCommand::Show => show(session),
        ReplCommand::History => {
            for result in session.dice_history().iter() {
                println!("{}", render::roll(result));
            }
        }
        ReplCommand::Join(room) => {
            session.join(&room).await?;
            *pending = None;
            show(session);
        }
        ReplCommand::Leave => {
            session.leave();
            *pending = None;
            println!("left the room");
        }
        ReplCommand::Roll { notation, mode } => {
            let result = session.roll_dice(notation.sides, notation.quantity, notation.modifier, mode)?;
            println!("{}", render::roll(&result));
        }
        ReplCommand::Initiative => {
            session.roll_initiative().await?;
            print!("{}", render::initiative(session.state()));
        }
        ReplCommand::Next => {
            if session.advance_turn().await? {
                print!("{}", render::initiative(session.state()));
            } else {
                println!("not in combat");
            }
        }
        ReplCommand::End => {
            session.end_combat().await?;
            println!("combat ended");
        }
        ReplCommand::Press(position) => press(session, pending, position).await?,
        ReplCommand::Enemy { position, template } => {
            let token = session.place_enemy(position, &template).await?;
            println!("placed {} at {}", token.name, position.label());
        }
        ReplCommand::Choose(name) => {
            let Some(ticket) = *pending else {
                println!("nothing to choose; press an empty cell first");
                return Ok(());
            };
            let token = session.resolve_placement(ticket, &name).await?;
            *pending = None;
            println!("placed {} at {}", token.name, token.position.label());
        }
        ReplCommand::Place { position, character } => {
            let token = session.place_character_token(position, &character).await?;
            println!("placed {} at {}", token.name, position.label());
        }
        ReplCommand::Effect { position, effect } => {
            let active = session.toggle_effect(position, effect).await?;
            let state = if active { "on" } else { "off" };
            println!("{} {state} at {}", effect.label(), position.label());
        }
        ReplCommand::Hp { position, hp, max_hp } => {
            let edit = TokenEdit { hp: Some(hp), max_hp, ..TokenEdit::default() };
            let token = session.edit_token(position, edit).await?;
            println!("{} hp {}/{}", token.name, token.hp, token.max_hp);
        }
        ReplCommand::Loot { currency, amount } => {
            let mut loot = session.state().party_loot.clone();
            loot.currency.insert(currency, amount);
            session.update_party_loot(loot).await?;
            print!("{}", render::loot(session.state()));
        }
        ReplCommand::Character { name, class } => {
            let mut character = session
                .characters()
                .iter()
                .find(|c| c.name == name)
                .cloned()
                .unwrap_or_else(|| Character::new(name.as_str(), session.actor().player_name.as_str()));
            if let Some(class) = class {
                character.class = class;
            }
            session.save_character(character).await?;
            println!("saved {name}");
        }
        ReplCommand::DeleteCharacter(name) => {
            session.delete_character(&name).await?;
            println!("deleted {name}");
        }
    }
    Ok(())
}

async fn press(
    session: &mut Session,
    pending: &mut Option<Uuid>,
    position: Position,
) -> Result<(), SessionError> {
    match session.press_cell(position).await? {
        CellPress::Removed(token) => println!("removed {} from {}", token.name, position.label()),
        CellPress::Placed(token) => println!("placed {} at {}", token.name, position.label()),
        CellPress::ChooseEnemy(_) => {
            let names: Vec<&str> = ENEMY_TEMPLATES.iter().map(|t| t.name).collect();
            println!("empty cell; `enemy {} <template>` with one of: {}", position.label(), names.join(", "));
        }
        CellPress::ChooseCharacter(choice) => {
            *pending = Some(choice.ticket);
            println!("`choose <name>` with one of: {}", choice.options.join(", "));
        }
    }
    Ok(())
}

fn show(session: &Session) {
    let state = session.state();
    print!("{}", render::board(state));
    print!("{}", render::tokens(state));
    print!("{}", render::initiative(state));
    print!("{}", render::loot(state));
}

// =============================================================================
// URLS
// =============================================================================

fn http_url(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}

fn ws_url(base_url: &str) -> Result<String, CliError> {
    let base = base_url.trim_end_matches('/');
    let ws_base = if let Some(rest) = base.strip_prefix("https://") {
        format!("wss://{rest}")
    } else if let Some(rest) = base.strip_prefix("http://") {
        format!("ws://{rest}")
    } else {
        return Err(CliError::InvalidBaseUrl(base_url.to_owned()));
    };
    Ok(format!("{ws_base}/api/ws"))
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
