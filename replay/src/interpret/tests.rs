use faintlog_protocol::{DisplayName, Event, LogDialect, Nickname, Species, VideoDialect};

use super::*;
use crate::tally::KillDeath;

fn nick(name: &str) -> Nickname {
    Nickname::from(name)
}

fn shown(name: &str) -> DisplayName {
    DisplayName::from(name)
}

fn log(lines: &[&str]) -> LogReplay {
    interpret_log(lines, &LogDialect::new(), LedgerOptions::default())
}

fn video(frames: &[&str]) -> Tally<DisplayName> {
    interpret_video(frames, &VideoDialect::new(), LedgerOptions::default())
}

#[test]
fn test_self_knockout_is_excluded() {
    let replay = log(&["|move|p1a: A|Tackle|", ": A|0 fnt"]);

    assert!(replay.tally.is_empty());
}

#[test]
fn test_kill_and_death_are_paired() {
    let replay = log(&["|move|p1a: A|Tackle|", ": B|0 fnt"]);

    assert_eq!(replay.tally.len(), 2);
    assert_eq!(replay.tally.get(&nick("A")), Some(KillDeath::new(1, 0)));
    assert_eq!(replay.tally.get(&nick("B")), Some(KillDeath::new(0, 1)));
}

#[test]
fn test_empty_replay() {
    let replay = log(&[]);

    assert!(replay.tally.is_empty());
    assert!(replay.switches.is_empty());
}

#[test]
fn test_faint_before_any_move_is_dropped() {
    let replay = log(&["|-damage|p2a: B|0 fnt|[from] Stealth Rock"]);

    assert!(replay.tally.is_empty());
}

#[test]
fn test_unattributed_death_can_be_counted() {
    let options = LedgerOptions {
        count_unattributed_deaths: true,
    };
    let replay = interpret_log(
        ["|-damage|p2a: B|0 fnt|[from] Stealth Rock"],
        &LogDialect::new(),
        options,
    );

    assert_eq!(replay.tally.len(), 1);
    assert_eq!(replay.tally.get(&nick("B")), Some(KillDeath::new(0, 1)));
}

#[test]
fn test_attacker_persists_across_faints() {
    let replay = log(&[
        "|move|p1a: A|Explosion|p2a: B",
        "|-damage|p2a: B|0 fnt",
        "|-damage|p2b: C|0 fnt",
    ]);

    assert_eq!(replay.tally.get(&nick("A")), Some(KillDeath::new(2, 0)));
    assert_eq!(replay.tally.get(&nick("B")), Some(KillDeath::new(0, 1)));
    assert_eq!(replay.tally.get(&nick("C")), Some(KillDeath::new(0, 1)));
}

#[test]
fn test_switches_are_collected_not_scored() {
    let replay = log(&[
        "|switch|p1a: Sparky|Pikachu, L50, M|100/100",
        "|switch|p2a: Rocky|Geodude, L50|100/100",
        "|move|p1a: Sparky|Thunderbolt|p2a: Rocky",
        "|-damage|p2a: Rocky|0 fnt",
    ]);

    assert_eq!(
        replay.switches,
        vec![
            (nick("Sparky"), Species::from("Pikachu")),
            (nick("Rocky"), Species::from("Geodude")),
        ]
    );
    assert_eq!(replay.tally.get(&nick("Sparky")), Some(KillDeath::new(1, 0)));
}

#[test]
fn test_ledger_step_outcomes() {
    let mut ledger = Ledger::new(LedgerOptions::default());

    assert_eq!(
        ledger.step(Event::Fainted { actor: nick("B") }),
        Outcome::Unattributed {
            death_recorded: false
        }
    );
    assert_eq!(
        ledger.step(Event::MoveUsed {
            actor: nick("A"),
            move_name: "Tackle".to_string(),
        }),
        Outcome::AttackerSet
    );
    assert_eq!(ledger.last_attacker(), Some(&nick("A")));
    assert_eq!(
        ledger.step(Event::Fainted { actor: nick("A") }),
        Outcome::SelfKnockout
    );
    assert_eq!(
        ledger.step(Event::Fainted { actor: nick("B") }),
        Outcome::Kill
    );
    assert_eq!(
        ledger.step(Event::SwitchIn {
            nickname: nick("C"),
            species: Species::from("Mew"),
        }),
        Outcome::Ignored
    );

    let tally = ledger.finish();
    assert_eq!(tally.get(&nick("A")), Some(KillDeath::new(1, 0)));
    assert_eq!(tally.get(&nick("B")), Some(KillDeath::new(0, 1)));
}

#[test]
fn test_ocr_repeated_detections_collapse() {
    let mut dedup = OcrDedup::new();
    let dialect = VideoDialect::new();
    let frames = [
        "A used Tackle!",
        "A used Tackle!",
        "A used Tackle!",
        "B fainted!",
    ];

    let passed: Vec<Event<DisplayName>> = frames
        .iter()
        .filter_map(|text| dialect.classify(text))
        .filter_map(|event| dedup.filter(event))
        .collect();

    assert_eq!(
        passed,
        vec![
            Event::MoveUsed {
                actor: shown("A"),
                move_name: "Tackle".to_string(),
            },
            Event::Fainted { actor: shown("B") },
        ]
    );
}

#[test]
fn test_ocr_dedup_tally() {
    let tally = video(&[
        "A used Tackle!",
        "A used Tackle!",
        "A used Tackle!",
        "B fainted!",
    ]);

    assert_eq!(tally.len(), 2);
    assert_eq!(tally.get(&shown("A")), Some(KillDeath::new(1, 0)));
    assert_eq!(tally.get(&shown("B")), Some(KillDeath::new(0, 1)));
}

#[test]
fn test_ocr_repeated_faint_counts_once() {
    let tally = video(&[
        "A used Tackle!",
        "The opposing B fainted!",
        "The opposing B fainted!",
        "",
        "The opposing B fainted!",
    ]);

    assert_eq!(tally.get(&shown("A")), Some(KillDeath::new(1, 0)));
    assert_eq!(tally.get(&shown("B")), Some(KillDeath::new(0, 1)));
}

#[test]
fn test_ocr_move_and_faint_in_one_frame() {
    let frame = "The opposing A used Tackle!\nThe opposing B fainted!";
    let tally = video(&[frame, frame, frame]);

    assert_eq!(tally.get(&shown("A")), Some(KillDeath::new(1, 0)));
    assert_eq!(tally.get(&shown("B")), Some(KillDeath::new(0, 1)));
    assert_eq!(tally.len(), 2);
}

#[test]
fn test_ocr_faint_resets_pending_attacker() {
    let mut dedup = OcrDedup::new();
    dedup.filter(Event::MoveUsed {
        actor: shown("A"),
        move_name: "Tackle".to_string(),
    });
    assert_eq!(dedup.pending_attacker(), Some(&shown("A")));
    assert_eq!(dedup.pending_move(), Some("Tackle"));

    dedup.filter(Event::Fainted { actor: shown("B") });
    assert_eq!(dedup.pending_attacker(), None);
    assert_eq!(dedup.pending_move(), None);
    assert_eq!(dedup.last_victim(), Some(&shown("B")));

    // Same attacker again after a faint is new information
    let again = dedup.filter(Event::MoveUsed {
        actor: shown("A"),
        move_name: "Tackle".to_string(),
    });
    assert!(again.is_some());
}

#[test]
fn test_ocr_self_knockout_is_excluded() {
    let tally = video(&["A used Explosion!", "A fainted!"]);

    assert!(tally.is_empty());
}

#[test]
fn test_ocr_noise_is_skipped() {
    let tally = video(&["", "\x0c", "~~ ,.", "What will A do?", "A used Tackle!", "B fainted!"]);

    assert_eq!(tally.get(&shown("A")), Some(KillDeath::new(1, 0)));
}

#[test]
fn test_interpreter_feed_matches_batch() {
    let lines = ["|move|p1a: A|Tackle|", ": B|0 fnt"];

    let mut interpreter = LogInterpreter::new(LogDialect::new(), LedgerOptions::default());
    for line in lines {
        interpreter.feed(line);
    }

    assert_eq!(interpreter.finish().tally, log(&lines).tally);
}
