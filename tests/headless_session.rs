use std::sync::mpsc;

use assert_matches::assert_matches;
use invoker::attempt::{Attempt, Feedback, Outcome, Step};
use invoker::catalog::{Catalog, Combination, PracticeList};
use invoker::console::Console;
use invoker::keys::ChannelKeySource;
use invoker::session::{Ending, Session};
use invoker::GameError;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn spell(name: &'static str, keys: &str) -> Combination {
    Combination::new(name, keys).unwrap()
}

fn practice(spells: &[(&'static str, &str)]) -> PracticeList {
    spells
        .iter()
        .map(|&(name, keys)| spell(name, keys))
        .collect::<Vec<_>>()
        .into()
}

fn scripted(input: &str) -> ChannelKeySource {
    let (tx, rx) = mpsc::channel();
    for c in input.chars() {
        tx.send(c).unwrap();
    }
    ChannelKeySource::new(rx)
}

#[test]
fn full_practice_list_played_to_the_end() {
    let mut rng = StdRng::seed_from_u64(3);
    let list = Catalog::standard().practice_list(10, &mut rng);

    // Invoke each spell with its keys reversed, proving order does not matter
    let input: String = list
        .iter()
        .map(|c| format!("{}r", c.keys().chars().rev().collect::<String>()))
        .collect();

    let mut session = Session::new(list);
    let mut console = Console::new(Vec::new());
    let result = session.run(&mut scripted(&input), &mut console).unwrap();

    assert_eq!(result.ending, Ending::Completed);
    assert_eq!(result.score, 10);
    assert_eq!(result.attempts, 10);
    assert_eq!(result.records.len(), 10);

    let out = String::from_utf8(console.into_inner()).unwrap();
    assert!(out.contains("--- Spell 10 of 10: "));
    assert!(out.contains("Your score: 10 out of 10 (100% accuracy)."));
}

#[test]
fn sliding_window_scenario_matches() {
    let target = spell("Deafening Blast", "QWE");
    let mut attempt = Attempt::new(&target);
    for c in "QWEQ".chars() {
        assert_eq!(attempt.feed(c), Step::Continue(Feedback::QueueChanged));
    }
    assert_eq!(attempt.queue().to_string(), "WEQ");
    assert_eq!(attempt.feed('R'), Step::Done(Outcome::Matched));
}

#[test]
fn insufficient_confirm_never_mutates_queue() {
    let target = spell("EMP", "WWW");
    for prefix in ["", "W", "WW", "wq"] {
        let mut attempt = Attempt::new(&target);
        for c in prefix.chars() {
            attempt.feed(c);
        }
        let before = *attempt.queue();
        assert_matches!(
            attempt.feed('R'),
            Step::Continue(Feedback::Insufficient { .. })
        );
        assert_eq!(*attempt.queue(), before);
        assert_eq!(attempt.outcome(), None);
    }
}

#[test]
fn score_never_exceeds_attempts_and_attempts_step_by_one() {
    let list = practice(&[
        ("Cold Snap", "QQQ"),
        ("Tornado", "WWQ"),
        ("Sunstrike", "EEE"),
        ("Ice Wall", "QQE"),
    ]);
    // Lots of noise, clears and early invokes within each attempt
    let input = "qwzzcrQQQR\
                 wrwrQcwwqqwwQR\
                 EEWR\
                 eqeqeqeqQQER";

    let mut session = Session::new(list);
    let mut console = Console::new(Vec::new());
    let result = session.run(&mut scripted(input), &mut console).unwrap();

    assert_eq!(result.attempts, 4);
    assert_eq!(result.score, 3);
    assert!(result.score <= result.attempts);
    assert!(result.attempts <= result.total);
    assert_eq!(
        result.records.iter().map(|r| r.matched).collect::<Vec<_>>(),
        vec![true, true, false, true]
    );
}

#[test]
fn quit_mid_session_counts_only_finished_attempts() {
    let list = practice(&[("Cold Snap", "QQQ"), ("EMP", "WWW"), ("Alacrity", "WWE")]);
    let mut session = Session::new(list);
    let mut console = Console::new(Vec::new());
    let result = session
        .run(&mut scripted("QQQRWWWRWX"), &mut console)
        .unwrap();

    assert_eq!(result.ending, Ending::Quit);
    assert_eq!(result.attempts, 2);
    assert_eq!(result.score, 2);
    assert_eq!(result.presented, 3);
    assert_eq!(session.state().attempts, 2);

    let out = String::from_utf8(console.into_inner()).unwrap();
    assert!(out.contains("Quitting the drill."));
    assert!(out.contains("You attempted 2 of 3 spells."));
}

#[test]
fn closed_key_source_ends_session_with_error() {
    let list = practice(&[("Cold Snap", "QQQ"), ("EMP", "WWW")]);
    let mut session = Session::new(list);
    let mut console = Console::new(Vec::new());

    let err = session.run(&mut scripted("QQ"), &mut console).unwrap_err();
    assert_matches!(err, GameError::InputRead { ref partial, .. } if partial.attempts == 0);
    assert!(err.to_string().starts_with("error reading input"));
}
