use std::collections::BTreeSet;

use combatboard::model::{InitiativeEntry, StatusEffect, Token};

use super::*;

fn wolf(position: Position) -> Token {
    Token {
        name: "Wolf 1".into(),
        hp: 11,
        max_hp: 11,
        ac: 13,
        initiative_bonus: 2,
        color: "#808080".into(),
        effects: BTreeSet::from([StatusEffect::Prone]),
        position,
        owner: "DM".into(),
        character_id: None,
    }
}

#[test]
fn board_marks_occupied_cells() {
    let mut state = RoomState::default();
    let pos = Position::new(1, 2);
    state.tokens.insert(pos, wolf(pos));

    let text = board(&state);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 11);
    assert!(lines[0].trim_start().starts_with("1  2"));
    assert!(lines[1].trim_start().starts_with('A'));
    assert!(lines[2].contains("Wo"));
    assert_eq!(lines[2].matches('.').count(), 9);
}

#[test]
fn token_lines_include_effects() {
    let mut state = RoomState::default();
    let pos = Position::new(0, 0);
    state.tokens.insert(pos, wolf(pos));

    assert_eq!(tokens(&state), "A1   Wolf 1 [DM] hp 11/11 ac 13 (Prone)\n");
}

#[test]
fn initiative_marks_current_turn_and_ghosts() {
    let mut state = RoomState::default();
    assert!(initiative(&state).is_empty());

    let pos = Position::new(0, 0);
    state.tokens.insert(pos, wolf(pos));
    state.in_combat = true;
    state.current_turn = 1;
    state.initiative = vec![
        InitiativeEntry { position: pos, initiative: 15, details: "Wolf 1 (15)".into() },
        InitiativeEntry { position: Position::new(5, 5), initiative: 9, details: "Ayla (9)".into() },
    ];

    let text = initiative(&state);
    assert!(text.contains("   Wolf 1 (15)\n"));
    assert!(text.contains(" > Ayla (9) (gone)\n"));
}

#[test]
fn loot_lists_every_currency() {
    let mut state = RoomState::default();
    state.party_loot.currency.insert(Currency::Gp, 25);
    assert_eq!(loot(&state), "loot: 0 CP, 0 SP, 0 EP, 25 GP, 0 PP\n");
}

#[test]
fn roll_summary() {
    let result = DiceRollResult {
        dice_label: "2d6".into(),
        raw_rolls: vec![3, 5],
        chosen_totals: vec![3, 5],
        modifier: -1,
        roll_mode: RollMode::Normal,
        grand_total: 7,
        timestamp: 0,
    };
    assert_eq!(roll(&result), "2d6: [3, 5] -1 = 7");
}
