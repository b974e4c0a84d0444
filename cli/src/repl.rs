//! Line commands for the interactive `play` loop.

use combatboard::dice::{DiceError, DiceNotation, RollMode};
use combatboard::model::{Currency, Position, StatusEffect};

pub const HELP: &str = "\
commands:
  show                         board, initiative, loot
  history                      recent dice rolls
  roll <NdS+M> [adv|dis]       roll dice locally
  init | next | end            roll initiative, advance turn, end combat
  press <cell>                 remove a token or start a placement
  enemy <cell> <template>      place an enemy (DM)
  choose <character>           finish a pending character placement
  place <cell> <character>     place one of your characters
  effect <cell> <effect>       toggle a status effect
  hp <cell> <hp> [max]         set hit points
  loot <currency> <amount>     set a party currency total
  char <name> [class]          create or update a character
  delchar <name>               delete a character
  join <room> | leave          switch rooms
  quit";

#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    Help,
    Quit,
    Show,
    History,
    Join(String),
    Leave,
    Roll { notation: DiceNotation, mode: RollMode },
    Initiative,
    Next,
    End,
    Press(Position),
    Enemy { position: Position, template: String },
    Choose(String),
    Place { position: Position, character: String },
    Effect { position: Position, effect: StatusEffect },
    Hp { position: Position, hp: i32, max_hp: Option<i32> },
    Loot { currency: Currency, amount: i64 },
    Character { name: String, class: Option<String> },
    DeleteCharacter(String),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command: {0} (try `help`)")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("invalid cell: {0}")]
    Cell(String),
    #[error(transparent)]
    Dice(#[from] DiceError),
    #[error("unknown effect: {0}")]
    Effect(String),
    #[error("unknown currency: {0}")]
    Currency(String),
    #[error("invalid number: {0}")]
    Number(String),
}

/// Parse one input line.
///
/// # Errors
///
/// `ParseError` describing the first problem found.
pub fn parse_command(line: &str) -> Result<ReplCommand, ParseError> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((&verb, args)) = words.split_first() else {
        return Err(ParseError::Empty);
    };

    match (verb.to_ascii_lowercase().as_str(), args) {
        ("help" | "?", _) => Ok(ReplCommand::Help),
        ("quit" | "exit", _) => Ok(ReplCommand::Quit),
        ("show", _) => Ok(ReplCommand::Show),
        ("history", _) => Ok(ReplCommand::History),
        ("leave", _) => Ok(ReplCommand::Leave),
        ("init", _) => Ok(ReplCommand::Initiative),
        ("next", _) => Ok(ReplCommand::Next),
        ("end", _) => Ok(ReplCommand::End),
        ("join", [room]) => Ok(ReplCommand::Join((*room).to_owned())),
        ("join", _) => Err(ParseError::Usage("join <room>")),
        ("roll", [notation]) => Ok(ReplCommand::Roll { notation: notation.parse()?, mode: RollMode::Normal }),
        ("roll", [notation, mode]) => Ok(ReplCommand::Roll { notation: notation.parse()?, mode: mode.parse()? }),
        ("roll", _) => Err(ParseError::Usage("roll <NdS+M> [adv|dis]")),
        ("press", [cell]) => Ok(ReplCommand::Press(cell_arg(cell)?)),
        ("press", _) => Err(ParseError::Usage("press <cell>")),
        ("enemy", [cell, template @ ..]) if !template.is_empty() => Ok(ReplCommand::Enemy {
            position: cell_arg(cell)?,
            template: template.join(" "),
        }),
        ("enemy", _) => Err(ParseError::Usage("enemy <cell> <template>")),
        ("choose", name) if !name.is_empty() => Ok(ReplCommand::Choose(name.join(" "))),
        ("choose", _) => Err(ParseError::Usage("choose <character>")),
        ("place", [cell, name @ ..]) if !name.is_empty() => Ok(ReplCommand::Place {
            position: cell_arg(cell)?,
            character: name.join(" "),
        }),
        ("place", _) => Err(ParseError::Usage("place <cell> <character>")),
        ("effect", [cell, effect]) => Ok(ReplCommand::Effect {
            position: cell_arg(cell)?,
            effect: StatusEffect::from_id(effect).ok_or_else(|| ParseError::Effect((*effect).to_owned()))?,
        }),
        ("effect", _) => Err(ParseError::Usage("effect <cell> <effect>")),
        ("hp", [cell, hp]) => Ok(ReplCommand::Hp { position: cell_arg(cell)?, hp: number(hp)?, max_hp: None }),
        ("hp", [cell, hp, max]) => Ok(ReplCommand::Hp {
            position: cell_arg(cell)?,
            hp: number(hp)?,
            max_hp: Some(number(max)?),
        }),
        ("hp", _) => Err(ParseError::Usage("hp <cell> <hp> [max]")),
        ("loot", [code, amount]) => Ok(ReplCommand::Loot {
            currency: Currency::from_code(code).ok_or_else(|| ParseError::Currency((*code).to_owned()))?,
            amount: number(amount)?,
        }),
        ("loot", _) => Err(ParseError::Usage("loot <currency> <amount>")),
        ("char", [name]) => Ok(ReplCommand::Character { name: (*name).to_owned(), class: None }),
        ("char", [name, class @ ..]) => Ok(ReplCommand::Character {
            name: (*name).to_owned(),
            class: Some(class.join(" ")),
        }),
        ("char", _) => Err(ParseError::Usage("char <name> [class]")),
        ("delchar", name) if !name.is_empty() => Ok(ReplCommand::DeleteCharacter(name.join(" "))),
        ("delchar", _) => Err(ParseError::Usage("delchar <name>")),
        (other, _) => Err(ParseError::Unknown(other.to_owned())),
    }
}

fn cell_arg(text: &str) -> Result<Position, ParseError> {
    Position::parse_label(text).map_err(|_| ParseError::Cell(text.to_owned()))
}

fn number<T: std::str::FromStr>(text: &str) -> Result<T, ParseError> {
    text.parse().map_err(|_| ParseError::Number(text.to_owned()))
}

#[cfg(test)]
#[path = "repl_test.rs"]
mod tests;
