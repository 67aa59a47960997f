use crate::{Dialect, Event, LogDialect, Nickname, Species};

fn move_used(actor: &str, move_name: &str) -> Event<Nickname> {
    Event::MoveUsed {
        actor: Nickname::from(actor),
        move_name: move_name.to_string(),
    }
}

#[test]
fn test_classify_move() {
    let dialect = LogDialect::new();
    let event = dialect.classify("|move|p1a: Sparky|Thunderbolt|p2a: Rocky");

    assert_eq!(event, Some(move_used("Sparky", "Thunderbolt")));
}

#[test]
fn test_classify_move_with_empty_target() {
    let dialect = LogDialect::new();
    let event = dialect.classify("|move|p1a: A|Tackle|");

    assert_eq!(event, Some(move_used("A", "Tackle")));
}

#[test]
fn test_classify_move_without_target_separator() {
    let dialect = LogDialect::new();

    assert_eq!(dialect.classify("|move|p1a: A|Tackle"), None);
}

#[test]
fn test_classify_faint_from_damage() {
    let dialect = LogDialect::new();
    let event = dialect.classify("|-damage|p2a: Rocky|0 fnt|[from] Stealth Rock");

    assert_eq!(
        event,
        Some(Event::Fainted {
            actor: Nickname::from("Rocky")
        })
    );
}

#[test]
fn test_classify_bare_faint_fragment() {
    let dialect = LogDialect::new();
    let event = dialect.classify(": B|0 fnt");

    assert_eq!(
        event,
        Some(Event::Fainted {
            actor: Nickname::from("B")
        })
    );
}

#[test]
fn test_faint_message_is_not_a_death_line() {
    // |faint| always follows the |-damage| line that carried "0 fnt"
    let dialect = LogDialect::new();

    assert_eq!(dialect.classify("|faint|p2a: Rocky"), None);
}

#[test]
fn test_classify_switch() {
    let dialect = LogDialect::new();
    let event = dialect.classify("|switch|p1a: Sparky|Pikachu, L50, M|100/100");

    assert_eq!(
        event,
        Some(Event::SwitchIn {
            nickname: Nickname::from("Sparky"),
            species: Species::from("Pikachu"),
        })
    );
}

#[test]
fn test_classify_replace_and_drag() {
    let dialect = LogDialect::new();

    let replace = dialect.classify("|replace|p2a: Shade|Zoroark-Hisui, L50, F");
    assert_eq!(
        replace,
        Some(Event::SwitchIn {
            nickname: Nickname::from("Shade"),
            species: Species::from("Zoroark-Hisui"),
        })
    );

    let drag = dialect.classify("|drag|p2a: Tank|Snorlax, L50|100/100");
    assert_eq!(
        drag,
        Some(Event::SwitchIn {
            nickname: Nickname::from("Tank"),
            species: Species::from("Snorlax"),
        })
    );
}

#[test]
fn test_switch_level_filter() {
    let line = "|switch|p1a: Sparky|Pikachu, L84|100/100";

    assert_eq!(LogDialect::new().classify(line), None);
    assert!(matches!(
        LogDialect::with_level(None).classify(line),
        Some(Event::SwitchIn { .. })
    ));
    assert!(matches!(
        LogDialect::with_level(Some(84)).classify(line),
        Some(Event::SwitchIn { .. })
    ));
}

#[test]
fn test_any_level_accepts_missing_level() {
    let dialect = LogDialect::with_level(None);
    let event = dialect.classify("|switch|p1a: Sparky|Pikachu|100/100");

    assert_eq!(
        event,
        Some(Event::SwitchIn {
            nickname: Nickname::from("Sparky"),
            species: Species::from("Pikachu"),
        })
    );
}

#[test]
fn test_unrelated_lines_are_ignored() {
    let dialect = LogDialect::new();

    for line in [
        "",
        "|",
        "|turn|3",
        "|c|☆Alice|gg",
        "|-damage|p2a: Rocky|42/100",
        "|poke|p1|Pikachu, L50|",
        "|switch|p1a Sparky|Pikachu, L50",
    ] {
        assert_eq!(dialect.classify(line), None, "line: {line:?}");
    }
}
