use super::*;

#[test]
fn blank_and_unknown_lines() {
    assert_eq!(parse_command("   "), Err(ParseError::Empty));
    assert_eq!(parse_command("dance"), Err(ParseError::Unknown("dance".into())));
}

#[test]
fn bare_verbs() {
    assert_eq!(parse_command("SHOW"), Ok(ReplCommand::Show));
    assert_eq!(parse_command("init"), Ok(ReplCommand::Initiative));
    assert_eq!(parse_command("next"), Ok(ReplCommand::Next));
    assert_eq!(parse_command("end"), Ok(ReplCommand::End));
    assert_eq!(parse_command("exit"), Ok(ReplCommand::Quit));
}

#[test]
fn roll_with_and_without_mode() {
    let ReplCommand::Roll { notation, mode } = parse_command("roll 2d6+3").expect("roll") else {
        panic!("expected roll");
    };
    assert_eq!((notation.quantity, notation.sides, notation.modifier), (2, 6, 3));
    assert_eq!(mode, RollMode::Normal);

    let ReplCommand::Roll { mode, .. } = parse_command("roll d20 adv").expect("roll") else {
        panic!("expected roll");
    };
    assert_eq!(mode, RollMode::Advantage);

    assert!(matches!(parse_command("roll banana"), Err(ParseError::Dice(_))));
    assert!(matches!(parse_command("roll"), Err(ParseError::Usage(_))));
}

#[test]
fn cells_accept_labels_and_keys() {
    assert_eq!(parse_command("press A1"), Ok(ReplCommand::Press(Position::new(0, 0))));
    assert_eq!(parse_command("press 2-3"), Ok(ReplCommand::Press(Position::new(2, 3))));
    assert_eq!(parse_command("press ??"), Err(ParseError::Cell("??".into())));
}

#[test]
fn multi_word_names_are_joined() {
    assert_eq!(
        parse_command("place B2 Ayla Stormborn"),
        Ok(ReplCommand::Place { position: Position::new(1, 1), character: "Ayla Stormborn".into() })
    );
    assert_eq!(parse_command("choose Brom the Bold"), Ok(ReplCommand::Choose("Brom the Bold".into())));
    assert_eq!(
        parse_command("char Ayla Wild Magic Sorcerer"),
        Ok(ReplCommand::Character { name: "Ayla".into(), class: Some("Wild Magic Sorcerer".into()) })
    );
    assert!(matches!(parse_command("enemy C3"), Err(ParseError::Usage(_))));
}

#[test]
fn effects_hp_and_loot() {
    assert_eq!(
        parse_command("effect A1 Prone"),
        Ok(ReplCommand::Effect { position: Position::new(0, 0), effect: StatusEffect::Prone })
    );
    assert_eq!(parse_command("effect A1 sleepy"), Err(ParseError::Effect("sleepy".into())));
    assert_eq!(
        parse_command("hp A1 4 12"),
        Ok(ReplCommand::Hp { position: Position::new(0, 0), hp: 4, max_hp: Some(12) })
    );
    assert_eq!(parse_command("hp A1 lots"), Err(ParseError::Number("lots".into())));
    assert_eq!(
        parse_command("loot gp 25"),
        Ok(ReplCommand::Loot { currency: Currency::Gp, amount: 25 })
    );
    assert_eq!(parse_command("loot xp 1"), Err(ParseError::Currency("xp".into())));
}
