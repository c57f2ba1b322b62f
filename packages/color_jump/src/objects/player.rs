//! The player.

use crate::{
    input::Input,
    settings::Settings,
    physics::prelude::*,
};
use vek::*;
use anyhow::*;


/// Size of the player's box.
pub const PLAYER_EXT: Extent3<f32> = Extent3 { w: 0.2, h: 0.5, d: 0.2 };

pub const GRAVITY_FORCE: &'static str = "gravity";
pub const MOVEMENT_FORCE: &'static str = "movement";
pub const JUMP_FORCE: &'static str = "jump";


/// The player-controlled body. Falls, walks left and right, and jumps off whatever it is standing
/// on.
#[derive(Debug, Clone)]
pub struct Player {
    position: Vec3<f32>,
    forces: ForceSystem,
    /// Collisions which push the player along z, applied directly as position corrections.
    active_collisions: Vec<Collision>,
    move_speed: f32,
    jump_factor: f32,
    input: Input,
}

impl Player {
    pub fn new(position: Vec3<f32>, settings: &Settings) -> Self {
        let mut forces = ForceSystem::new();
        forces.add(GRAVITY_FORCE, PhysicsForce::gravity());
        Player {
            position,
            forces,
            active_collisions: Vec::new(),
            move_speed: settings.move_speed,
            jump_factor: settings.jump_factor,
            input: Input::default(),
        }
    }

    pub fn position(&self) -> Vec3<f32> {
        self.position
    }

    pub fn forces(&self) -> &ForceSystem {
        &self.forces
    }

    pub fn is_jumping(&self) -> bool {
        self.forces.has(JUMP_FORCE)
    }

    /// Whether the force named `name` would be brought to rest by a reaction from `direction`.
    ///
    /// The force must exist. Gravity is added on construction and never removed, and the jump is
    /// only checked while present.
    fn neutralized_by(&self, name: &str, direction: Vec3<f32>) -> bool {
        debug_assert!(self.forces.has(name), "player has no force named {:?}", name);
        match self.forces.get(name) {
            Result::Ok(force) => force.is_normal_force(direction),
            Err(e) => {
                error!(%e, "checking neutralization of missing force");
                false
            }
        }
    }
}

impl Body for Player {
    fn label(&self) -> &str {
        "player"
    }

    fn bounding_box(&mut self, dt: f32) -> Result<AaBox> {
        let position = self.position;
        self.forces.speculate(dt, |offset| AaBox::from_center(position + offset, PLAYER_EXT))
    }

    fn on_collision(&mut self, other: &dyn Body, collisions: &[Collision]) {
        let best = match best_collision(collisions, Vec3::unit_y()) {
            Some(best) => best,
            None => return,
        };
        let direction = best.direction();

        if self.forces.has(JUMP_FORCE) {
            if self.neutralized_by(JUMP_FORCE, direction)
                || self.neutralized_by(GRAVITY_FORCE, direction)
            {
                debug!(other = other.label(), "jump ended");
                self.forces.remove(JUMP_FORCE);
            }
        } else if self.input.action {
            debug!(other = other.label(), "jumping");
            let jump = Vec3::new(0.0, -self.jump_factor * GRAVITY, 0.0);
            self.forces.add(JUMP_FORCE, PhysicsForce::constant(jump));
        }

        if direction.z != 0.0 {
            // something is pushing the player off the board plane
            self.active_collisions.push(best);
        } else {
            self.forces.add_reaction(direction);
        }
    }

    fn pre_update(&mut self, _dt: f32, input: &Input) {
        self.input = *input;

        let horizontal = input.horizontal();
        if horizontal != 0.0 {
            let movement = Vec3::new(horizontal * self.move_speed, 0.0, 0.0);
            self.forces.add(MOVEMENT_FORCE, PhysicsForce::constant(movement));
        } else {
            self.forces.remove(MOVEMENT_FORCE);
        }
    }

    fn update(&mut self, dt: f32) {
        self.position += self.forces.run(dt);
        for collision in &self.active_collisions {
            self.position += collision.offset_direction();
        }
    }

    fn post_update(&mut self, _dt: f32) {
        self.forces.clear_reactions();
        self.active_collisions.clear();
    }
}


#[cfg(test)]
fn floor() -> AaBox {
    AaBox::from_center(Vec3::new(0.0, -0.25, 1.5), Extent3::new(8.0, 0.5, 2.0))
}

#[cfg(test)]
struct Floor;

#[cfg(test)]
impl Body for Floor {
    fn label(&self) -> &str {
        "floor"
    }

    fn bounding_box(&mut self, _dt: f32) -> Result<AaBox> {
        Ok(floor())
    }

    fn on_collision(&mut self, _other: &dyn Body, _collisions: &[Collision]) {}

    fn pre_update(&mut self, _dt: f32, _input: &Input) {}

    fn update(&mut self, _dt: f32) {}

    fn post_update(&mut self, _dt: f32) {}
}

#[cfg(test)]
fn step(player: &mut Player, input: Input, dt: f32) {
    let mut floor = Floor;
    player.pre_update(dt, &input);
    CollisionMgr::new()
        .test_all(dt, &mut [&mut *player], &mut [&mut floor])
        .unwrap();
    player.update(dt);
    player.post_update(dt);
}

#[test]
fn test_bounding_box_does_not_move_player() {
    let mut player = Player::new(Vec3::new(0.0, 2.0, 1.5), &Settings::default());
    let predicted = player.bounding_box(0.1).unwrap();
    assert!(predicted.center().y < 2.0);
    assert_eq!(player.position(), Vec3::new(0.0, 2.0, 1.5));
    assert_eq!(player.forces().checkpoint_depth(), 0);
    assert_eq!(player.bounding_box(0.1).unwrap(), predicted);
}

#[test]
fn test_player_falls_and_lands() {
    let dt = 1.0 / 60.0;
    let mut player = Player::new(Vec3::new(0.0, 1.0, 1.5), &Settings::default());
    for _ in 0..120 {
        step(&mut player, Input::default(), dt);
    }
    // resting on the floor's top at y = 0, box half height 0.25
    let y = player.position().y;
    assert!(y >= 0.25 - 1e-3, "fell through floor to {}", y);
    assert!(y < 0.3, "never landed, at {}", y);

    // standing still stays still
    for _ in 0..60 {
        step(&mut player, Input::default(), dt);
    }
    assert!((player.position().y - y).abs() < 1e-3);
}

#[test]
fn test_player_walks() {
    let dt = 1.0 / 60.0;
    let settings = Settings::default();
    let mut player = Player::new(Vec3::new(0.0, 0.25, 1.5), &settings);
    let right = Input {
        right: true,
        ..Input::default()
    };
    for _ in 0..30 {
        step(&mut player, right, dt);
    }
    let expected = settings.move_speed * dt * 30.0;
    assert!((player.position().x - expected).abs() < 1e-3);
    assert!(player.forces().has(MOVEMENT_FORCE));

    step(&mut player, Input::default(), dt);
    assert!(!player.forces().has(MOVEMENT_FORCE));
}

#[test]
fn test_player_jumps_and_lands() {
    let dt = 1.0 / 60.0;
    let mut player = Player::new(Vec3::new(0.0, 0.25, 1.5), &Settings::default());
    let jump = Input {
        action: true,
        ..Input::default()
    };
    step(&mut player, jump, dt);
    assert!(player.is_jumping());

    let mut peak = player.position().y;
    for _ in 0..30 {
        step(&mut player, Input::default(), dt);
        peak = f32::max(peak, player.position().y);
    }
    assert!(peak > 0.4, "jump peaked at {}", peak);

    for _ in 0..180 {
        step(&mut player, Input::default(), dt);
    }
    assert!(!player.is_jumping());
    assert!(player.position().y >= 0.25 - 1e-3);
    assert!(player.position().y < 0.3);
}

#[test]
fn test_landing_neutralizes_gravity() {
    let mut player = Player::new(Vec3::new(0.0, 5.0, 1.5), &Settings::default());
    for _ in 0..10 {
        player.update(1.0 / 60.0);
    }
    assert!(player.neutralized_by(GRAVITY_FORCE, Vec3::unit_y()));
    assert!(!player.neutralized_by(GRAVITY_FORCE, -Vec3::unit_y()));
}

#[test]
#[should_panic(expected = "player has no force named \"gravity\"")]
fn test_missing_gravity_is_loud() {
    let mut player = Player::new(Vec3::zero(), &Settings::default());
    player.forces.remove(GRAVITY_FORCE);
    player.neutralized_by(GRAVITY_FORCE, Vec3::unit_y());
}
