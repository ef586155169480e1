//! Integration test: timer-driven game loop
//!
//! Drives `GameController` through `advance` the way the terminal front end
//! does, with seeded RNGs so sessions are repeatable.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use droplet_catch::core::geometry::Coords;
use droplet_catch::input::{handle_key_event, GameOverButton, GameOverMenu, InputResult};
use droplet_catch::sprites::DropletKind;
use droplet_catch::{
    GameConfig, GameController, GameEvent, ShapeCanvas, CUP_SPEED, MOVE_INTERVAL_MS,
    REALTIME_FRAME_MS,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn new_game(config: GameConfig) -> GameController<ShapeCanvas> {
    let canvas = ShapeCanvas::new(config.width as f64, config.height as f64);
    GameController::new(config, canvas)
}

fn press(code: KeyCode) -> KeyEvent {
    KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Press)
}

fn release(code: KeyCode) -> KeyEvent {
    KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Release)
}

/// Run frames until the game ends or `max_ms` of game time passes.
fn play_frames(
    game: &mut GameController<ShapeCanvas>,
    rng: &mut ChaCha8Rng,
    max_ms: u64,
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let mut elapsed = 0;
    while elapsed < max_ms && !game.model.game_over {
        events.extend(game.advance(REALTIME_FRAME_MS, rng));
        elapsed += REALTIME_FRAME_MS;
    }
    events
}

fn end_with_danger_catch(game: &mut GameController<ShapeCanvas>, rng: &mut ChaCha8Rng) {
    let cup_x = game.cup().coords.x;
    game.create_droplet(Coords::new(cup_x + 30.0, 570.0), DropletKind::Danger, 5.0);
    game.move_droplets(rng);
    assert!(game.model.game_over);
    // Flush what the direct calls above queued
    game.advance(0, rng);
}

// =============================================================================
// Session flow
// =============================================================================

#[test]
fn test_same_seed_same_session() {
    let mut a = new_game(GameConfig::default());
    let mut b = new_game(GameConfig::default());
    let mut rng_a = ChaCha8Rng::seed_from_u64(99);
    let mut rng_b = ChaCha8Rng::seed_from_u64(99);

    let events_a = play_frames(&mut a, &mut rng_a, 30_000);
    let events_b = play_frames(&mut b, &mut rng_b, 30_000);

    assert!(!events_a.is_empty());
    assert_eq!(events_a, events_b);
    assert_eq!(a.model.score, b.model.score);
}

#[test]
fn test_spawn_speeds_follow_difficulty_ramp() {
    let config = GameConfig {
        rare_droplet_chance: 0.0,
        ..GameConfig::default()
    };
    let mut game = new_game(config);
    let mut rng = ChaCha8Rng::seed_from_u64(5);

    let events = play_frames(&mut game, &mut rng, 20_000);

    let common_speeds: Vec<f64> = events
        .iter()
        .filter_map(|e| match e {
            GameEvent::DropletSpawned {
                kind: DropletKind::Common,
                speed,
                ..
            } => Some(*speed),
            _ => None,
        })
        .collect();
    assert!(!common_speeds.is_empty());
    for (n, speed) in common_speeds.iter().enumerate() {
        let expected = 5.0 * 1.01_f64.powi(n as i32 + 1);
        assert!(
            (speed - expected).abs() < 1e-9,
            "spawn {} fell at {} instead of {}",
            n,
            speed,
            expected
        );
    }
}

#[test]
fn test_danger_drops_fall_twice_as_fast() {
    let config = GameConfig {
        rare_droplet_chance: 0.0,
        ..GameConfig::default()
    };
    let mut game = new_game(config);
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let events = play_frames(&mut game, &mut rng, 60_000);

    // Nobody steers, so most droplets miss and danger drops follow
    let mut last_speed: Option<f64> = None;
    let mut dangers = 0;
    for event in &events {
        match event {
            GameEvent::DropletSpawned {
                kind: DropletKind::Danger,
                speed,
                ..
            } => {
                let base = last_speed.expect("danger drop before any droplet");
                assert!((speed - base * 2.0).abs() < 1e-9);
                dangers += 1;
            }
            GameEvent::DropletSpawned { speed, .. } => last_speed = Some(*speed),
            _ => {}
        }
    }
    assert!(dangers > 0);
}

#[test]
fn test_catch_scores_and_clears_shape_next_tick() {
    let mut game = new_game(GameConfig::default());
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    game.create_droplet(Coords::new(395.0, 500.0), DropletKind::Common, 5.0);
    let handle = game.droplets()[0].handle;

    let mut caught = false;
    for _ in 0..40 {
        let events = game.advance(MOVE_INTERVAL_MS, &mut rng);
        if events.contains(&GameEvent::DropletCaught {
            kind: DropletKind::Common,
            points: 10,
        }) {
            caught = true;
            break;
        }
    }
    assert!(caught);
    assert_eq!(game.model.score, 10);
    assert_eq!(game.model.high_score, 10);
    assert!(game.surface().contains(handle));

    game.advance(MOVE_INTERVAL_MS, &mut rng);
    assert!(!game.surface().contains(handle));
}

#[test]
fn test_game_over_freezes_everything() {
    let mut game = new_game(GameConfig::default());
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    game.advance(0, &mut rng);
    end_with_danger_catch(&mut game, &mut rng);

    let shapes = game.surface().len();
    let cup_x = game.cup().coords.x;
    let droplet_y: Vec<f64> = game.droplets().iter().map(|d| d.coords.y).collect();
    game.key_pressed("Right");
    let events = play_frames_ignoring_state(&mut game, &mut rng, 10_000);

    assert!(events.is_empty(), "events after game over: {:?}", events);
    assert_eq!(game.surface().len(), shapes);
    let after: Vec<f64> = game.droplets().iter().map(|d| d.coords.y).collect();
    assert_eq!(droplet_y, after);
    // No move or poll chain survives
    assert_eq!(game.cup().coords.x, cup_x);
    assert_eq!(game.scheduler().pending(), 0);
}

fn play_frames_ignoring_state(
    game: &mut GameController<ShapeCanvas>,
    rng: &mut ChaCha8Rng,
    ms: u64,
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for _ in 0..ms / REALTIME_FRAME_MS {
        events.extend(game.advance(REALTIME_FRAME_MS, rng));
    }
    events
}

#[test]
fn test_restart_resumes_play() {
    let mut game = new_game(GameConfig::default());
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    game.advance(0, &mut rng);
    end_with_danger_catch(&mut game, &mut rng);

    game.restart();
    let events = game.advance(0, &mut rng);

    assert!(events.contains(&GameEvent::Restarted));
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::DropletSpawned { .. })));
    assert_eq!(game.droplets().len(), 1);
    assert!((game.model.droplet_speed - 5.05).abs() < 1e-9);
}

// =============================================================================
// Keyboard routing
// =============================================================================

#[test]
fn test_arrow_keys_steer_cup_through_poll_ticks() {
    let mut game = new_game(GameConfig::default());
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut menu = GameOverMenu::default();

    handle_key_event(press(KeyCode::Right), &mut game, &mut menu);
    game.advance(0, &mut rng);
    assert_eq!(game.cup().coords.x, 350.0 + CUP_SPEED);

    game.advance(50, &mut rng);
    assert_eq!(game.cup().coords.x, 350.0 + 2.0 * CUP_SPEED);

    handle_key_event(release(KeyCode::Right), &mut game, &mut menu);
    game.advance(50, &mut rng);
    assert_eq!(game.cup().coords.x, 350.0 + 2.0 * CUP_SPEED);
}

#[test]
fn test_quit_keys_during_play() {
    let mut menu = GameOverMenu::default();
    for code in [KeyCode::Char('q'), KeyCode::Esc] {
        let mut game = new_game(GameConfig::default());
        assert_eq!(
            handle_key_event(press(code), &mut game, &mut menu),
            InputResult::Quit
        );
        assert!(game.quit_requested());
    }

    let mut game = new_game(GameConfig::default());
    let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert_eq!(
        handle_key_event(ctrl_c, &mut game, &mut menu),
        InputResult::Quit
    );
}

#[test]
fn test_game_over_menu_retry_and_quit() {
    let mut game = new_game(GameConfig::default());
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let mut menu = GameOverMenu::default();
    end_with_danger_catch(&mut game, &mut rng);

    // Arrows pick a button instead of moving the cup
    handle_key_event(press(KeyCode::Right), &mut game, &mut menu);
    assert_eq!(menu.selected, GameOverButton::Quit);
    handle_key_event(press(KeyCode::Left), &mut game, &mut menu);
    assert_eq!(menu.selected, GameOverButton::Retry);

    assert_eq!(
        handle_key_event(press(KeyCode::Enter), &mut game, &mut menu),
        InputResult::Continue
    );
    assert!(!game.model.game_over);
    assert_eq!(game.model.score, 0);

    end_with_danger_catch(&mut game, &mut rng);
    handle_key_event(press(KeyCode::Tab), &mut game, &mut menu);
    assert_eq!(
        handle_key_event(press(KeyCode::Enter), &mut game, &mut menu),
        InputResult::Quit
    );
    assert!(game.quit_requested());
}

#[test]
fn test_r_retries_after_game_over() {
    let mut game = new_game(GameConfig::default());
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let mut menu = GameOverMenu::default();
    end_with_danger_catch(&mut game, &mut rng);

    handle_key_event(press(KeyCode::Char('r')), &mut game, &mut menu);
    assert!(!game.model.game_over);
    assert_eq!(menu.selected, GameOverButton::Retry);
}

// =============================================================================
// Cup bounds
// =============================================================================

proptest! {
    #[test]
    fn prop_cup_stays_on_field(moves in prop::collection::vec(0u8..3, 0..300)) {
        let mut game = new_game(GameConfig::default());
        for m in moves {
            game.key_released("Left");
            game.key_released("Right");
            match m {
                0 => game.key_pressed("Left"),
                1 => game.key_pressed("Right"),
                _ => {}
            }
            game.handle_keyboard();
            let x = game.cup().coords.x;
            prop_assert!((0.0..=700.0).contains(&x), "cup left edge at {}", x);
        }
    }
}

#[test]
fn test_cup_reaches_but_never_crosses_walls() {
    let mut game = new_game(GameConfig::default());
    game.key_pressed("Left");
    for _ in 0..100 {
        game.handle_keyboard();
    }
    assert_eq!(game.cup().coords.x, 0.0);

    game.key_released("Left");
    game.key_pressed("Right");
    for _ in 0..100 {
        game.handle_keyboard();
    }
    assert_eq!(game.cup().coords.x, 700.0);
}
