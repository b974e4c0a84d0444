//! Plain-text views of the room for the terminal.

use std::fmt::Write as _;

use combatboard::dice::{DiceRollResult, RollMode};
use combatboard::model::{Currency, Position, RoomState};

/// Grid with row letters and column numbers; each occupied cell shows the
/// first two characters of its token's name.
#[must_use]
pub fn board(state: &RoomState) -> String {
    let size = state.grid_size();
    let mut out = String::from("   ");
    for col in 1..=size {
        let _ = write!(out, "{col:>3}");
    }
    out.push('\n');

    for row in 0..size {
        let label = Position::new(row, 0).label();
        let _ = write!(out, "{:>3}", label.trim_end_matches(char::is_numeric));
        for col in 0..size {
            let cell = match state.token_at(Position::new(row, col)) {
                Some(token) => token.name.chars().take(2).collect::<String>(),
                None => ".".to_owned(),
            };
            let _ = write!(out, "{cell:>3}");
        }
        out.push('\n');
    }
    out
}

/// One line per token: position, name, hit points, armour, effects.
#[must_use]
pub fn tokens(state: &RoomState) -> String {
    let mut out = String::new();
    for (position, token) in &state.tokens {
        let _ = write!(
            out,
            "{:<4} {} [{}] hp {}/{} ac {}",
            position.label(),
            token.name,
            token.owner,
            token.hp,
            token.max_hp,
            token.ac
        );
        if !token.effects.is_empty() {
            let effects: Vec<&str> = token.effects.iter().map(|e| e.label()).collect();
            let _ = write!(out, " ({})", effects.join(", "));
        }
        out.push('\n');
    }
    out
}

/// Initiative order with the current turn marked; empty when idle.
#[must_use]
pub fn initiative(state: &RoomState) -> String {
    if !state.in_combat {
        return String::new();
    }
    let mut out = String::from("initiative:\n");
    for (index, entry) in state.initiative.iter().enumerate() {
        let marker = if index == state.current_turn { '>' } else { ' ' };
        let ghost = if state.token_at(entry.position).is_none() { " (gone)" } else { "" };
        let _ = writeln!(out, " {marker} {}{ghost}", entry.details);
    }
    out
}

#[must_use]
pub fn loot(state: &RoomState) -> String {
    let purse: Vec<String> = Currency::ALL
        .iter()
        .map(|c| format!("{} {}", state.party_loot.currency.get(c).copied().unwrap_or(0), c.code()))
        .collect();
    let mut out = format!("loot: {}\n", purse.join(", "));
    for item in &state.party_loot.items {
        let _ = writeln!(out, "  {} x{}", item.name, item.quantity);
    }
    out
}

#[must_use]
pub fn roll(result: &DiceRollResult) -> String {
    let mode = match result.roll_mode {
        RollMode::Normal => "",
        RollMode::Advantage => " with advantage",
        RollMode::Disadvantage => " with disadvantage",
    };
    let modifier = match result.modifier {
        0 => String::new(),
        m if m > 0 => format!(" +{m}"),
        m => format!(" {m}"),
    };
    format!(
        "{}{mode}: {:?}{modifier} = {}",
        result.dice_label, result.chosen_totals, result.grand_total
    )
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
