//! Game controller: owns the entities and drives them from the timer queue.
//!
//! Three repeating chains run while the game is active:
//! - spawn (`spawn_interval_ms`): ramp difficulty, drop a new droplet
//! - move (`move_interval_ms`): advance droplets, resolve catches and misses
//! - input poll (`input_poll_interval_ms`): turn held keys into cup movement
//!
//! Each handler re-arms its chain only while the game is not over.

use super::config::GameConfig;
use super::constants::SPAWN_MARGIN;
use super::geometry::{hits_cup, Coords};
use super::model::GameModel;
use super::scheduler::{Fired, Scheduler, TimerTask};
use crate::input::KeyboardControl;
use crate::sprites::{Cup, Droplet, DropletKind, MoveDirection, Sprite};
use crate::surface::RenderSurface;
use rand::Rng;

/// Something that happened during `advance`, for logging and the view.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    DropletSpawned { kind: DropletKind, x: f64, speed: f64 },
    DropletCaught { kind: DropletKind, points: i64 },
    DropletMissed { kind: DropletKind },
    GameOver { score: i64, high_score: i64 },
    Restarted,
}

/// Pick common or rare for a new collectible droplet.
pub fn roll_droplet_kind<R: Rng>(rng: &mut R, rare_chance: f64) -> DropletKind {
    if rng.gen::<f64>() < rare_chance {
        DropletKind::Rare
    } else {
        DropletKind::Common
    }
}

pub struct GameController<S: RenderSurface> {
    pub model: GameModel,
    config: GameConfig,
    surface: S,
    scheduler: Scheduler,
    keyboard: KeyboardControl,
    cup: Cup,
    droplets: Vec<Droplet>,
    danger_drops: Vec<Droplet>,
    quit_requested: bool,
    events: Vec<GameEvent>,
}

impl<S: RenderSurface> GameController<S> {
    /// Set up a session and install its timer chains. Nothing runs until the
    /// first `advance`.
    pub fn new(config: GameConfig, mut surface: S) -> Self {
        let model = GameModel::new(&config);
        let cup = Self::init_cup(&mut surface, &config);
        let mut controller = Self {
            model,
            config,
            surface,
            scheduler: Scheduler::new(),
            keyboard: KeyboardControl::new(),
            cup,
            droplets: Vec::new(),
            danger_drops: Vec::new(),
            quit_requested: false,
            events: Vec::new(),
        };
        controller.reset_timers();
        controller
    }

    /// Replace the key tracker (e.g. with a release-timeout one).
    pub fn with_keyboard(mut self, keyboard: KeyboardControl) -> Self {
        self.keyboard = keyboard;
        self
    }

    fn init_cup(surface: &mut S, config: &GameConfig) -> Cup {
        Cup::new(
            surface,
            Coords::new(config.cup_start_x(), config.height as f64),
            config.cup_width,
            config.cup_height,
            config.cup_speed,
        )
    }

    /// Drop every pending timer and start fresh spawn, move and poll chains.
    fn reset_timers(&mut self) {
        self.scheduler.start_generation();
        self.scheduler
            .every(self.config.spawn_interval_ms, TimerTask::SpawnDroplet);
        self.scheduler
            .every(self.config.move_interval_ms, TimerTask::MoveDroplets);
        self.scheduler
            .every(self.config.input_poll_interval_ms, TimerTask::PollInput);
    }

    /// Start a new session. The high score carries over.
    pub fn restart(&mut self) {
        self.model.reset();
        self.surface.clear_all();
        self.droplets.clear();
        self.danger_drops.clear();
        self.keyboard.clear();
        self.cup = Self::init_cup(&mut self.surface, &self.config);
        self.reset_timers();
        log::info!("Restarted (high score {})", self.model.high_score);
        self.events.push(GameEvent::Restarted);
    }

    pub fn quit(&mut self) {
        self.quit_requested = true;
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn key_pressed(&mut self, key: &str) {
        let now = self.scheduler.now_ms();
        self.keyboard.press(key, now);
    }

    pub fn key_released(&mut self, key: &str) {
        self.keyboard.release(key);
    }

    /// Advance the clock by `dt_ms` and run every task that comes due.
    pub fn advance<R: Rng>(&mut self, dt_ms: u64, rng: &mut R) -> Vec<GameEvent> {
        self.scheduler.advance(dt_ms);
        while let Some(fired) = self.scheduler.pop_due() {
            self.dispatch(fired, rng);
        }
        std::mem::take(&mut self.events)
    }

    fn dispatch<R: Rng>(&mut self, fired: Fired, rng: &mut R) {
        match fired.task {
            TimerTask::SpawnDroplet => {
                if self.model.game_over {
                    return;
                }
                self.spawn_droplet(rng);
                self.scheduler.renew(&fired);
            }
            TimerTask::MoveDroplets => {
                if self.model.game_over {
                    return;
                }
                self.move_droplets(rng);
                if !self.model.game_over {
                    self.scheduler.renew(&fired);
                }
            }
            TimerTask::PollInput => {
                if self.model.game_over {
                    return;
                }
                self.handle_keyboard();
                self.scheduler.renew(&fired);
            }
            TimerTask::DeleteShape(handle) => self.surface.delete_shape(handle),
        }
    }

    fn random_spawn_x<R: Rng>(&self, rng: &mut R) -> f64 {
        let max = self.model.width.saturating_sub(SPAWN_MARGIN).max(SPAWN_MARGIN);
        rng.gen_range(SPAWN_MARGIN..=max) as f64
    }

    /// Spawn tick: speed up, then drop a common or rare droplet at the top.
    pub fn spawn_droplet<R: Rng>(&mut self, rng: &mut R) {
        self.model.increase_difficulty();
        let x = self.random_spawn_x(rng);
        let kind = roll_droplet_kind(rng, self.config.rare_droplet_chance);
        self.create_droplet(Coords::new(x, 0.0), kind, self.model.droplet_speed);
    }

    /// Drop a danger droplet at a random x. Nothing spawns once the game is over.
    pub fn spawn_danger_drop<R: Rng>(&mut self, rng: &mut R) {
        if self.model.game_over {
            return;
        }
        let x = self.random_spawn_x(rng);
        self.create_droplet(
            Coords::new(x, 0.0),
            DropletKind::Danger,
            self.model.droplet_speed,
        );
    }

    /// Place a droplet of `kind` falling at `base_speed` times the kind's
    /// multiplier. Danger droplets go to their own list.
    pub fn create_droplet(&mut self, coords: Coords, kind: DropletKind, base_speed: f64) {
        let droplet = Droplet::spawn(&mut self.surface, kind, coords, base_speed);
        log::debug!(
            "Spawned {:?} droplet at x={} speed={:.2}",
            kind,
            coords.x,
            droplet.speed
        );
        self.events.push(GameEvent::DropletSpawned {
            kind,
            x: coords.x,
            speed: droplet.speed,
        });
        if kind.is_collectible() {
            self.droplets.push(droplet);
        } else {
            self.danger_drops.push(droplet);
        }
    }

    /// Leave the shape on screen for one more move tick, then delete it.
    fn schedule_removal(&mut self, droplet: &Droplet) {
        self.scheduler.after(
            self.config.move_interval_ms,
            TimerTask::DeleteShape(droplet.handle),
        );
    }

    /// Move tick: advance every droplet and resolve it against the cup and floor.
    pub fn move_droplets<R: Rng>(&mut self, rng: &mut R) {
        let floor = self.model.height as f64;
        let cup_box = self.cup.bounds();

        let droplets = std::mem::take(&mut self.droplets);
        let mut next_droplets = Vec::with_capacity(droplets.len());
        for mut droplet in droplets {
            droplet.step(&mut self.surface);
            if hits_cup(&droplet.hit_box(), &cup_box) {
                self.schedule_removal(&droplet);
                self.model.update_score(droplet.points);
                log::debug!("Caught {:?} droplet (+{})", droplet.kind, droplet.points);
                self.events.push(GameEvent::DropletCaught {
                    kind: droplet.kind,
                    points: droplet.points,
                });
            } else if droplet.is_below(floor) {
                self.schedule_removal(&droplet);
                self.events
                    .push(GameEvent::DropletMissed { kind: droplet.kind });
                self.spawn_danger_drop(rng);
            } else {
                next_droplets.push(droplet);
            }
        }
        // Danger droplets spawned above are already in their list
        self.droplets = next_droplets;

        let mut dangers = std::mem::take(&mut self.danger_drops).into_iter();
        let mut next_dangers = Vec::with_capacity(dangers.len());
        while let Some(mut drop) = dangers.next() {
            drop.step(&mut self.surface);
            if hits_cup(&drop.hit_box(), &cup_box) {
                // The caught drop stays drawn under the game-over banner
                self.end_game();
                break;
            } else if drop.is_below(floor) {
                self.schedule_removal(&drop);
                self.events.push(GameEvent::DropletMissed { kind: drop.kind });
            } else {
                next_dangers.push(drop);
            }
        }
        next_dangers.extend(dangers);
        self.danger_drops = next_dangers;
    }

    /// Input-poll tick: steer the cup from the held arrow keys, then step it.
    pub fn handle_keyboard(&mut self) {
        self.keyboard.expire(self.scheduler.now_ms());
        let direction =
            MoveDirection::from_held(self.keyboard.get("Left"), self.keyboard.get("Right"));
        self.cup.set_move_direction(direction);
        self.cup.step(&mut self.surface);
    }

    fn end_game(&mut self) {
        if self.model.end_game() {
            log::info!(
                "Game over: score {} (high score {})",
                self.model.score,
                self.model.high_score
            );
            self.events.push(GameEvent::GameOver {
                score: self.model.score,
                high_score: self.model.high_score,
            });
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn cup(&self) -> &Cup {
        &self.cup
    }

    pub fn droplets(&self) -> &[Droplet] {
        &self.droplets
    }

    pub fn danger_drops(&self) -> &[Droplet] {
        &self.danger_drops
    }
}
