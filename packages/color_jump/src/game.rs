//! The frame driver. Owns every body on the board and advances them through the frame phases.

use crate::{
    settings::Settings,
    input::Input,
    alarm_mgr::{
        AlarmMgr,
        Scheduler,
    },
    cube_index::{
        Attribute,
        CubeIndex,
    },
    objects::{
        color_cube::{
            ColorCube,
            DEPTH,
            EXTENSION,
        },
        player::Player,
    },
    physics::prelude::*,
};
use std::collections::VecDeque;
use slab::Slab;
use vek::*;
use anyhow::*;


/// Colors the active color is drawn from, in the order they come up.
pub const COLORS: [u32; 4] = [
    0xffff00,
    0x0000ff,
    0x00ff00,
    0xff0000,
];

/// Fewest upcoming colors the queue is allowed to drop to.
const MIN_QUEUED_COLORS: usize = 5;

/// Frames longer than this get a warning, they usually mean the caller stalled.
const LONG_FRAME: f32 = 1.0;

/// Leftover frame time shorter than this is dropped rather than run as its own step.
const MIN_STEP: f32 = 1e-6;

/// Score points per unit of height.
const SCORE_SCALE: f32 = 10.0;

/// Z of the center of a retracted cube. Extending moves a cube into the player's plane at z = 0.
pub const BOARD_Z: f32 = -DEPTH / 2.0 - EXTENSION / 2.0;


/// Something the game asked to happen later.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum GameEvent {
    /// Make the next queued color the active one.
    ChangeColor,
    /// Pull back the cubes of a no-longer-active color.
    Retract(u32),
}


/// Change in how the game is going, reported by `update`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum StateChange {
    /// The player climbed higher than ever before, reaching this score.
    NewHighScore(i64),
    /// The player fell too far. The game has been paused.
    Lose,
}


/// Board, player, and the clocks driving them.
#[derive(Debug)]
pub struct Game {
    settings: Settings,
    spawn: Vec3<f32>,
    player: Player,
    cubes: Slab<ColorCube>,
    index: CubeIndex,
    alarms: AlarmMgr<GameEvent>,
    collisions: CollisionMgr,
    color_queue: VecDeque<u32>,
    next_palette: usize,
    active_color: Option<u32>,
    running: bool,
    /// Highest the player has been, which the lose distance is measured from.
    max_height: f32,
    high_score: i64,
    lost: bool,
    state_changes: Vec<StateChange>,
}

impl Game {
    /// Paused game with an empty board and the player at `spawn`.
    pub fn new(settings: Settings, spawn: Vec3<f32>) -> Result<Self> {
        settings.validate()?;
        let mut alarms = AlarmMgr::new();
        alarms.set_running(false);
        Ok(Game {
            player: Player::new(spawn, &settings),
            settings,
            spawn,
            cubes: Slab::new(),
            index: CubeIndex::new(),
            alarms,
            collisions: CollisionMgr::new(),
            color_queue: VecDeque::new(),
            next_palette: 0,
            active_color: None,
            running: false,
            max_height: spawn.y,
            high_score: 0,
            lost: false,
            state_changes: Vec::new(),
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn cube(&self, id: usize) -> Option<&ColorCube> {
        self.cubes.get(id)
    }

    pub fn cubes(&self) -> impl Iterator<Item=(usize, &ColorCube)> + '_ {
        self.cubes.iter()
    }

    pub fn active_color(&self) -> Option<u32> {
        self.active_color
    }

    /// Colors that will become active next, soonest first.
    pub fn upcoming_colors(&self) -> impl Iterator<Item=u32> + '_ {
        self.color_queue.iter().copied()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Game time passed while running.
    pub fn elapsed(&self) -> f32 {
        self.alarms.elapsed()
    }

    /// Score for the player's current height. Zero at spawn height.
    pub fn score(&self) -> i64 {
        self.score_at(self.player.position().y)
    }

    pub fn high_score(&self) -> i64 {
        self.high_score
    }

    pub fn is_lost(&self) -> bool {
        self.lost
    }

    /// State changes since this was last called, oldest first.
    pub fn take_state_changes(&mut self) -> Vec<StateChange> {
        std::mem::take(&mut self.state_changes)
    }

    fn score_at(&self, height: f32) -> i64 {
        (height * SCORE_SCALE).floor() as i64 - (self.spawn.y * SCORE_SCALE).floor() as i64
    }

    pub fn collision_mgr(&self) -> &CollisionMgr {
        &self.collisions
    }

    /// Board cell containing a world point.
    pub fn cell_of(&self, point: Vec3<f32>) -> Vec2<i64> {
        let size = self.settings.block_size;
        Vec2::new(
            (point.x / size).floor() as i64,
            (point.y / size).floor() as i64,
        )
    }

    /// Place a cube `length` cells long with its leftmost cell at `cell`, and return its id.
    pub fn add_cube(&mut self, color: u32, length: u32, cell: Vec2<i64>, extended: bool) -> Result<usize> {
        ensure!(length > 0, "cube at {},{} has zero length", cell.x, cell.y);

        let size = self.settings.block_size;
        let center = Vec3::new(
            (cell.x as f32 + length as f32 / 2.0) * size,
            (cell.y as f32 + 0.5) * size,
            BOARD_Z,
        );
        let mut cube = ColorCube::new(color, size, length, cell, center);
        cube.extend(extended, false);

        let id = self.cubes.insert(cube);
        let columns = (0..length as i64).map(|i| (Attribute::X, cell.x + i));
        self.index.insert(id, columns.chain([
            (Attribute::Y, cell.y),
            (Attribute::Color, color as i64),
        ]));
        Ok(id)
    }

    pub fn remove_cube(&mut self, id: usize) -> Option<ColorCube> {
        let cube = self.cubes.try_remove(id)?;
        self.index.remove(id);
        Some(cube)
    }

    pub fn start(&mut self) {
        info!("starting");
        self.running = true;
        self.alarms.set_running(true);
    }

    pub fn pause(&mut self) {
        info!("pausing");
        self.running = false;
        self.alarms.set_running(false);
    }

    /// Cancel everything scheduled, retract the board, and put the player back at spawn.
    pub fn reset(&mut self) {
        info!("resetting");
        self.alarms.cancel_all();
        for (_, cube) in self.cubes.iter_mut() {
            cube.extend(false, false);
        }
        self.active_color = None;
        self.color_queue.clear();
        self.next_palette = 0;
        self.player = Player::new(self.spawn, &self.settings);
        self.max_height = self.spawn.y;
        self.high_score = 0;
        self.lost = false;
        self.state_changes.clear();
    }

    /// Ids of cubes close enough to the player to be worth testing, ascending.
    pub fn candidates(&self) -> Vec<usize> {
        let cell = self.cell_of(self.player.position());
        let range = self.settings.candidate_range;
        self.index.query_ranges(&[
            (Attribute::X, cell.x - range, cell.x + range + 1),
            (Attribute::Y, cell.y - range, cell.y + range + 1),
        ])
    }

    /// Advance the game by `frame_dt` seconds of input-driven time. Does nothing while paused.
    ///
    /// Stops early if the game is lost partway through the frame.
    pub fn update(&mut self, frame_dt: f32, input: &Input) -> Result<()> {
        ensure!(
            frame_dt.is_finite() && frame_dt >= 0.0,
            "invalid frame time {}",
            frame_dt,
        );
        if !self.running {
            return Ok(());
        }
        if frame_dt > LONG_FRAME {
            warn!(frame_dt, "long frame, simulating anyway");
        }

        if self.active_color.is_none() {
            self.change_color();
        }

        let mut remaining = frame_dt;
        while remaining > MIN_STEP && self.running {
            let dt = remaining.min(self.settings.max_step);
            remaining -= dt;
            self.step(dt, input)?;
        }
        Ok(())
    }

    fn step(&mut self, dt: f32, input: &Input) -> Result<()> {
        for event in self.alarms.update(dt) {
            self.handle(event);
        }

        self.player.pre_update(dt, input);
        for (_, cube) in self.cubes.iter_mut() {
            cube.pre_update(dt, input);
        }

        let candidates = self.candidates();
        let mut near = self.cubes
            .iter_mut()
            .filter(|&(id, _)| candidates.binary_search(&id).is_ok())
            .map(|(_, cube)| cube as &mut dyn Body)
            .collect::<Vec<_>>();
        self.collisions.test_all(dt, &mut [&mut self.player], &mut near)?;

        self.player.update(dt);
        for (_, cube) in self.cubes.iter_mut() {
            cube.update(dt);
        }

        self.player.post_update(dt);
        for (_, cube) in self.cubes.iter_mut() {
            cube.post_update(dt);
        }

        self.track_player();
        Ok(())
    }

    fn track_player(&mut self) {
        let height = self.player.position().y;
        let score = self.score_at(height);
        if score > self.high_score {
            self.high_score = score;
            self.state_changes.push(StateChange::NewHighScore(score));
        }

        self.max_height = f32::max(self.max_height, height);
        if height < self.max_height - self.settings.lose_distance {
            info!(high_score = self.high_score, "player fell too far");
            self.lost = true;
            self.state_changes.push(StateChange::Lose);
            self.pause();
        }
    }

    fn handle(&mut self, event: GameEvent) {
        match event {
            GameEvent::ChangeColor => self.change_color(),
            GameEvent::Retract(color) => {
                if self.active_color == Some(color) {
                    debug!(color = %format!("{:06x}", color), "not retracting active color");
                } else {
                    self.extend_color(color, false);
                }
            }
        }
    }

    /// Activate the next queued color and schedule the one after it.
    fn change_color(&mut self) {
        let color = self.next_color();
        if self.active_color != Some(color) {
            debug!(color = %format!("{:06x}", color), "changing active color");
            if let Some(old) = self.active_color {
                self.alarms.schedule(self.settings.retract_delay, GameEvent::Retract(old));
            }
            self.extend_color(color, true);
            self.active_color = Some(color);
        }
        self.alarms.schedule(self.settings.color_interval, GameEvent::ChangeColor);
    }

    fn next_color(&mut self) -> u32 {
        while self.color_queue.len() < MIN_QUEUED_COLORS {
            self.color_queue.push_back(COLORS[self.next_palette % COLORS.len()]);
            self.next_palette += 1;
        }
        self.color_queue.pop_front().unwrap_or(COLORS[0])
    }

    fn extend_color(&mut self, color: u32, active: bool) {
        for id in self.index.query(Attribute::Color, color as i64) {
            if let Some(cube) = self.cubes.get_mut(id) {
                cube.extend(active, true);
            }
        }
    }
}


#[cfg(test)]
fn test_game() -> Game {
    let mut game = Game::new(Settings::default(), Vec3::new(2.75, 1.25, 0.0)).unwrap();
    for x in 0..10 {
        game.add_cube(COLORS[0], 1, Vec2::new(x, 0), true).unwrap();
    }
    game
}

#[test]
fn test_paused_game_stands_still() {
    let mut game = test_game();
    game.update(1.0, &Input::default()).unwrap();
    assert_eq!(game.player().position(), Vec3::new(2.75, 1.25, 0.0));
    assert_eq!(game.active_color(), None);
    assert_eq!(game.elapsed(), 0.0);
}

#[test]
fn test_candidates_near_player() {
    let game = test_game();
    assert_eq!(game.cell_of(game.player().position()), Vec2::new(5, 2));
    assert_eq!(game.candidates(), vec![3, 4, 5, 6, 7]);
}

#[test]
fn test_long_cube_indexed_by_every_column() {
    let mut game = Game::new(Settings::default(), Vec3::new(0.25, 0.25, 0.0)).unwrap();
    let long = game.add_cube(COLORS[1], 6, Vec2::new(-10, 0), false).unwrap();
    assert!(game.candidates().is_empty());
    let near = game.add_cube(COLORS[1], 9, Vec2::new(-10, 0), false).unwrap();
    assert_eq!(game.candidates(), vec![near]);
    assert!(game.remove_cube(long).is_some());
    assert!(game.cube(long).is_none());
}

#[test]
fn test_player_lands_on_extended_cubes() {
    let mut game = test_game();
    game.start();
    for _ in 0..120 {
        game.update(1.0 / 60.0, &Input::default()).unwrap();
    }
    assert_eq!(game.active_color(), Some(COLORS[0]));
    let y = game.player().position().y;
    assert!(y >= 0.75 - 1e-3, "fell through the board to {}", y);
    assert!(y < 0.8, "never landed, at {}", y);
    assert!(game.collision_mgr().colliding_pairs() > 0);
}

#[test]
fn test_frames_split_into_steps() {
    let mut game = test_game();
    game.start();
    game.update(0.5, &Input::default()).unwrap();
    assert!((game.elapsed() - 0.5).abs() < 1e-4);
    // 5 candidates tested in each of 30 steps
    assert_eq!(game.collision_mgr().tested_pairs(), 150);
    assert!(game.update(-1.0, &Input::default()).is_err());
}

#[test]
fn test_color_cycle() {
    let mut game = Game::new(Settings::default(), Vec3::new(100.0, 100.0, 0.0)).unwrap();
    let cubes = COLORS
        .iter()
        .enumerate()
        .map(|(i, &color)| game.add_cube(color, 1, Vec2::new(i as i64 * 4, 0), false).unwrap())
        .collect::<Vec<_>>();
    game.start();

    game.update(0.0, &Input::default()).unwrap();
    assert_eq!(game.active_color(), Some(COLORS[0]));
    assert!(game.cube(cubes[0]).unwrap().is_extended());
    assert_eq!(
        game.upcoming_colors().collect::<Vec<_>>(),
        vec![COLORS[1], COLORS[2], COLORS[3], COLORS[0]],
    );

    game.update(4.1, &Input::default()).unwrap();
    assert_eq!(game.active_color(), Some(COLORS[1]));
    assert!(game.cube(cubes[0]).unwrap().is_extended());
    assert!(game.cube(cubes[1]).unwrap().is_extended());

    game.update(1.6, &Input::default()).unwrap();
    assert!(!game.cube(cubes[0]).unwrap().is_extended());
    assert!(game.cube(cubes[1]).unwrap().is_extended());
    assert!(!game.cube(cubes[2]).unwrap().is_extended());
}

#[test]
fn test_pause_stops_the_clock() {
    let mut game = test_game();
    game.start();
    game.update(0.25, &Input::default()).unwrap();
    game.pause();
    let elapsed = game.elapsed();
    let position = game.player().position();
    game.update(10.0, &Input::default()).unwrap();
    assert_eq!(game.elapsed(), elapsed);
    assert_eq!(game.player().position(), position);
}

#[test]
fn test_reset() {
    let mut game = test_game();
    game.start();
    game.update(0.5, &Input::default()).unwrap();
    game.reset();
    assert_eq!(game.active_color(), None);
    assert_eq!(game.player().position(), Vec3::new(2.75, 1.25, 0.0));
    assert!(game.cubes().all(|(_, cube)| !cube.is_extended()));
}

#[test]
fn test_jump_raises_high_score() {
    let mut game = test_game();
    game.spawn = Vec3::new(2.75, 0.75, 0.0);
    game.reset();
    for (_, cube) in game.cubes.iter_mut() {
        cube.extend(true, false);
    }
    assert_eq!(game.score(), 0);

    game.start();
    let jump = Input {
        action: true,
        ..Input::default()
    };
    game.update(1.0 / 60.0, &jump).unwrap();
    assert!(game.player().is_jumping());
    for _ in 0..180 {
        game.update(1.0 / 60.0, &Input::default()).unwrap();
    }

    let changes = game.take_state_changes();
    assert!(!changes.is_empty());
    let mut last = 0;
    for change in changes {
        match change {
            StateChange::NewHighScore(score) => {
                assert!(score > last);
                last = score;
            }
            StateChange::Lose => panic!("lost while jumping in place"),
        }
    }
    assert_eq!(last, game.high_score());
    assert!(game.high_score() >= 5, "high score only {}", game.high_score());
    assert!(game.score() < game.high_score());
    assert!(game.take_state_changes().is_empty());
}

#[test]
fn test_falling_too_far_loses() {
    let mut game = Game::new(Settings::default(), Vec3::zero()).unwrap();
    game.start();
    game.update(3.0, &Input::default()).unwrap();

    assert!(game.is_lost());
    assert!(!game.is_running());
    assert_eq!(game.take_state_changes(), vec![StateChange::Lose]);
    let y = game.player().position().y;
    assert!(y < -7.0 && y > -7.5, "lost at {}", y);
    // the rest of the frame is not simulated
    assert!(game.elapsed() < 1.5);

    game.reset();
    assert!(!game.is_lost());
    assert_eq!(game.high_score(), 0);
    game.start();
    game.update(0.1, &Input::default()).unwrap();
    assert!(!game.is_lost());
}
