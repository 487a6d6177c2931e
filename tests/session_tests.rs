//! Integration tests for the session lifecycle, driven by the manual
//! scheduler so no test ever waits on a real timer

use std::time::Duration;

use tui_snake::core::{GameSession, ManualScheduler, Position, SessionEvent};
use tui_snake::types::{Direction, Occupant};

fn new_session() -> GameSession<ManualScheduler> {
    GameSession::new(ManualScheduler::new(), 12345)
}

fn fire_tick(session: &mut GameSession<ManualScheduler>) {
    let handle = session
        .scheduler_mut()
        .fire()
        .expect("expected a pending tick");
    session.timer_fired(handle);
}

fn apple_cells(session: &GameSession<ManualScheduler>) -> usize {
    session
        .board()
        .cells()
        .iter()
        .filter(|c| **c == Some(Occupant::Apple))
        .count()
}

#[test]
fn test_session_lifecycle() {
    let mut session = new_session();

    // Idle: paused, nothing scheduled.
    assert!(session.paused());
    assert!(!session.running());
    assert!(session.scheduler().pending().is_none());

    // Running: ticks flow.
    session.toggle_status();
    assert!(session.running());
    fire_tick(&mut session);
    assert_eq!(session.board().head(), Position::new(7, 5));

    // Paused: pending tick cancelled, state kept.
    session.toggle_status();
    assert!(session.scheduler().pending().is_none());
    assert_eq!(session.board().head(), Position::new(7, 5));

    // Resumed: ticking continues from where it stopped.
    session.toggle_status();
    fire_tick(&mut session);
    assert_eq!(session.board().head(), Position::new(7, 6));
}

#[test]
fn test_first_tick_scenario() {
    let mut session = new_session();
    session.toggle_status();

    fire_tick(&mut session);

    assert_eq!(session.board().head(), Position::new(7, 5));
    assert_eq!(session.board().snake_len(), 4);
    assert_eq!(session.score(), 0);
}

#[test]
fn test_apple_scenario_scores_and_relocates() {
    let mut session = new_session();
    session.toggle_status();

    for _ in 0..5 {
        fire_tick(&mut session);
    }
    assert_eq!(session.board().head(), Position::new(7, 9));

    fire_tick(&mut session);

    assert_eq!(session.score(), 1);
    assert_eq!(session.board().snake_len(), 5);
    assert_eq!(apple_cells(&session), 1);
    assert_ne!(session.board().apple(), Position::new(7, 10));
}

#[test]
fn test_exactly_one_apple_at_every_tick_boundary() {
    let mut session = new_session();
    session.toggle_status();

    // Through the first apple and well beyond it.
    for _ in 0..10 {
        assert_eq!(apple_cells(&session), 1, "apple count drifted");
        fire_tick(&mut session);
        if session.game_over() {
            break;
        }
    }
}

#[test]
fn test_wall_hit_scenario() {
    let mut session = new_session();
    session.toggle_status();
    assert!(session.request_direction(Direction::Up));

    for _ in 0..7 {
        fire_tick(&mut session);
    }
    assert_eq!(session.board().head(), Position::new(0, 4));

    fire_tick(&mut session);

    assert!(session.game_over());
    assert_eq!(session.score(), 0);
    assert_eq!(session.record(), 0);
    assert_eq!(
        session.take_last_event(),
        Some(SessionEvent::GameOver { score: 0 })
    );
    assert_eq!(session.take_last_event(), None);
    assert!(session.scheduler().pending().is_none());
}

#[test]
fn test_reset_scenario_preserves_record() {
    let mut session = new_session();
    session.toggle_status();

    for _ in 0..6 {
        fire_tick(&mut session);
    }
    assert!(session.score() >= 1);

    while !session.game_over() {
        fire_tick(&mut session);
    }
    let record = session.record();
    assert!(record >= 1);

    session.reset();

    assert!(session.paused());
    assert!(!session.running());
    assert!(!session.game_over());
    assert_eq!(session.score(), 0);
    assert_eq!(session.record(), record);
    assert_eq!(session.direction(), Direction::Right);
    assert_eq!(session.board().head(), Position::new(7, 4));
    assert_eq!(session.board().apple(), Position::new(7, 10));
    assert_eq!(session.board().snake_len(), 4);
}

#[test]
fn test_scheduled_interval_never_increases() {
    let mut session = new_session();
    session.toggle_status();

    let (_, mut prev) = session.scheduler().pending().expect("tick scheduled");
    assert_eq!(prev, Duration::from_millis(200));

    while !session.game_over() {
        fire_tick(&mut session);
        if let Some((_, delay)) = session.scheduler().pending() {
            assert!(delay <= prev, "interval grew from {:?} to {:?}", prev, delay);
            assert!(delay >= Duration::from_millis(100));
            prev = delay;
        }
    }
}

#[test]
fn test_direction_buffering_is_once_per_tick() {
    let mut session = new_session();
    session.toggle_status();

    // A burst of requests between two ticks: only the first wins.
    assert!(session.request_direction(Direction::Down));
    assert!(!session.request_direction(Direction::Up));
    assert!(!session.request_direction(Direction::Left));
    assert_eq!(session.direction(), Direction::Down);

    fire_tick(&mut session);
    assert_eq!(session.board().head(), Position::new(8, 4));

    // Next tick window accepts one change again.
    assert!(session.request_direction(Direction::Right));
}

#[test]
fn test_pause_prevents_stale_tick_from_firing() {
    let mut session = new_session();
    session.toggle_status();

    let (stale, _) = session.scheduler().pending().expect("tick scheduled");
    session.toggle_status();

    // Deliver the cancelled handle anyway; the board must not move.
    session.timer_fired(stale);
    assert_eq!(session.board().head(), Position::new(7, 4));
}

#[test]
fn test_reset_prevents_stale_tick_from_firing() {
    let mut session = new_session();
    session.toggle_status();
    fire_tick(&mut session);

    let (stale, _) = session.scheduler().pending().expect("tick scheduled");
    session.reset();
    session.timer_fired(stale);

    assert_eq!(session.board().head(), Position::new(7, 4));
    assert!(session.paused());
}

#[test]
fn test_restart_after_game_over_via_toggle() {
    let mut session = new_session();
    session.toggle_status();
    assert!(session.request_direction(Direction::Up));
    for _ in 0..8 {
        fire_tick(&mut session);
    }
    assert!(session.game_over());

    // Space restarts: implicit reset plus running.
    session.toggle_status();
    assert!(session.running());
    assert!(!session.paused());
    assert!(!session.game_over());
    assert_eq!(session.score(), 0);
    assert_eq!(session.board().head(), Position::new(7, 4));

    fire_tick(&mut session);
    assert_eq!(session.board().head(), Position::new(7, 5));
}

#[test]
fn test_deterministic_replay_for_equal_seeds() {
    let mut a = GameSession::new(ManualScheduler::new(), 7);
    let mut b = GameSession::new(ManualScheduler::new(), 7);
    a.toggle_status();
    b.toggle_status();

    for _ in 0..20 {
        if a.game_over() {
            break;
        }
        fire_tick(&mut a);
        fire_tick(&mut b);
        assert_eq!(a.board().apple(), b.board().apple());
        assert_eq!(a.board().head(), b.board().head());
        assert_eq!(a.score(), b.score());
    }
}
