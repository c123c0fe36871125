//! Simulation step
//!
//! One call to `step` is one tick:
//! 1. gravity on the root, then ground resolution against the lowest
//!    extent of the whole tree
//! 2. horizontal velocity, only with a grounded foot
//! 3. jump impulse (single-shot request)
//! 4. horizontal integration
//! 5. walking gait
//! 6. propagation, then shift the tree back inside the world
//! 7. hands and grabbing
//!
//! Gravity, movement and the gait are suspended while editing.

use log::{debug, info};
use super::event::CreatureEvent;
use super::gait::Gait;
use super::grab::{Grabbable, Grabbables};
use super::math::Vec2;
use super::propagate::reach_cap;
use super::settings::Settings;
use super::shape::Shape;
use super::tree::Creature;

/// Root body size at startup
pub const ROOT_SIZE: f32 = 50.0;

/// Player intent for the coming tick
#[derive(Debug, Clone, Default)]
pub struct Intents {
    pub move_left: bool,
    pub move_right: bool,
    /// Cleared by the step that sees it, honoured or not
    pub jump: bool,
    pub grab_held: bool,
    pub pointer: Vec2,
}

impl Intents {
    /// -1 left, +1 right, 0 for neither or both
    pub fn direction(&self) -> f32 {
        match (self.move_left, self.move_right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

pub struct Simulation {
    creature: Creature,
    grabbables: Grabbables,
    settings: Settings,
    intents: Intents,
    gait: Gait,
    edit_mode: bool,
    airborne: bool,
}

impl Simulation {
    /// Triangle body in the middle of the world and a ball on the ground
    pub fn new(settings: Settings) -> Self {
        let center = Vec2::new(settings.world.width * 0.5, settings.world.height * 0.5);
        let creature = Creature::new(Shape::Triangle, center, ROOT_SIZE, ROOT_SIZE);
        let mut sim = Self::with_creature(settings, creature);

        let radius = sim.settings.grab.ball_radius;
        let ball = Vec2::new(sim.settings.world.width * 0.75, sim.settings.world.height - radius);
        sim.grabbables.spawn(Grabbable::new(ball, radius));
        sim
    }

    /// Wrap an existing creature; no grabbables
    pub fn with_creature(settings: Settings, mut creature: Creature) -> Self {
        creature.set_ground_y(settings.world.height);
        creature.propagate();
        Self {
            creature,
            grabbables: Grabbables::new(),
            edit_mode: settings.start_in_edit_mode,
            settings,
            intents: Intents::default(),
            gait: Gait::new(),
            airborne: true,
        }
    }

    pub fn creature(&self) -> &Creature {
        &self.creature
    }

    pub fn creature_mut(&mut self) -> &mut Creature {
        &mut self.creature
    }

    pub fn grabbables(&self) -> &Grabbables {
        &self.grabbables
    }

    pub fn grabbables_mut(&mut self) -> &mut Grabbables {
        &mut self.grabbables
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn intents(&self) -> &Intents {
        &self.intents
    }

    pub fn gait(&self) -> &Gait {
        &self.gait
    }

    pub fn ground_y(&self) -> f32 {
        self.settings.world.height
    }

    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    pub fn set_edit_mode(&mut self, open: bool) {
        if open != self.edit_mode {
            info!("edit mode {}", if open { "open" } else { "closed" });
        }
        self.edit_mode = open;
    }

    pub fn toggle_edit_mode(&mut self) {
        self.set_edit_mode(!self.edit_mode);
    }

    pub fn set_movement(&mut self, left: bool, right: bool) {
        self.intents.move_left = left;
        self.intents.move_right = right;
    }

    pub fn request_jump(&mut self) {
        self.intents.jump = true;
    }

    pub fn set_grab(&mut self, held: bool, pointer: Vec2) {
        self.intents.grab_held = held;
        self.intents.pointer = pointer;
    }

    /// One tick at the nominal frame interval
    pub fn update(&mut self) {
        self.step(self.settings.tick_seconds());
    }

    pub fn step(&mut self, dt: f32) {
        let ground_y = self.ground_y();
        self.creature.set_ground_y(ground_y);

        if !self.edit_mode {
            self.apply_gravity(ground_y);
        }

        let grounded = self.creature.grounded_feet();
        let direction = self.intents.direction();
        let can_move = !self.edit_mode && grounded > 0;

        let physics = &self.settings.physics;
        let mut vx = if can_move { direction * physics.move_speed } else { 0.0 };

        if self.intents.jump {
            if can_move {
                let scale = 1.0 + physics.jump_extra_foot_scale * (grounded - 1) as f32;
                self.creature.root_part_mut().velocity.y = -physics.jump_velocity * scale;
                vx += direction * physics.jump_horizontal_boost;
                self.airborne = true;
                info!("jump with {} grounded feet", grounded);
                self.creature.events_mut().send(CreatureEvent::Jumped { grounded_feet: grounded });
            }
            self.intents.jump = false;
        }

        self.creature.root_part_mut().velocity.x = vx;
        if vx != 0.0 {
            self.creature.translate(Vec2::new(vx, 0.0));
        }

        self.animate_gait(dt, can_move && direction != 0.0);
        self.creature.propagate();
        // After the gait so swinging feet stay inside too
        self.keep_inside_world();

        if !self.edit_mode {
            self.grabbables.fall(self.settings.physics.gravity, ground_y);
        }
        self.process_hands(ground_y);
    }

    fn apply_gravity(&mut self, ground_y: f32) {
        let gravity = self.settings.physics.gravity;
        let root = self.creature.root_part_mut();
        root.velocity.y += gravity;
        let dy = root.velocity.y;
        root.translate(Vec2::new(0.0, dy));
        self.creature.propagate();

        let lowest = self.creature.extents().max.y;
        let gap = ground_y - lowest;
        let penetrating = gap <= 0.0;
        // A stepping foot lifts the lowest point a little; stay planted
        let snapping = !self.airborne && dy >= 0.0 && gap <= self.settings.physics.ground_snap;

        if penetrating || snapping {
            self.creature.translate(Vec2::new(0.0, gap));
            self.creature.refresh_ground_contact();
            self.creature.root_part_mut().velocity.y = 0.0;
            if self.airborne {
                debug!("ground contact at y={:.2}, fall speed {:.2}", ground_y, dy);
                self.creature.events_mut().send(CreatureEvent::Landed { fall_speed: dy });
            }
            self.airborne = false;
        } else {
            self.airborne = true;
        }
    }

    /// Shift rather than clip so the tree keeps its shape
    fn keep_inside_world(&mut self) {
        let width = self.settings.world.width;
        let extents = self.creature.extents();
        let shift = if extents.min.x < 0.0 {
            -extents.min.x
        } else if extents.max.x > width {
            width - extents.max.x
        } else {
            0.0
        };
        if shift != 0.0 {
            self.creature.translate(Vec2::new(shift, 0.0));
        }
    }

    fn animate_gait(&mut self, dt: f32, walking: bool) {
        let feet: Vec<_> = self.creature.legs().into_iter().take(2).collect();
        let gait_settings = &self.settings.gait;

        if walking {
            self.gait.advance(dt, gait_settings.cycle_duration);
            let direction = self.intents.direction();
            for (i, &foot) in feet.iter().enumerate() {
                let pose = self.gait.pose(i, direction, gait_settings);
                if let Some(part) = self.creature.part_mut(foot) {
                    part.frame.rotation = pose.rotation;
                    part.offset = pose.offset;
                }
            }
        } else if self.gait.stop() {
            let pose = Gait::neutral(gait_settings);
            for &foot in &feet {
                if let Some(part) = self.creature.part_mut(foot) {
                    part.frame.rotation = pose.rotation;
                    part.offset = pose.offset;
                }
            }
        }
    }

    fn process_hands(&mut self, ground_y: f32) {
        let creature = &self.creature;
        let orphans = self.grabbables.release_orphans(|id| creature.contains(id));
        for (hand, object) in orphans {
            info!("{} dropped {} (hand destroyed)", hand, object);
            self.creature.events_mut().send(CreatureEvent::Released { hand, object });
        }

        if self.edit_mode {
            return;
        }

        let hands = self.creature.hands();
        let held = self.intents.grab_held;
        let pointer = self.intents.pointer;

        if held {
            let smoothing = self.settings.grab.hand_smoothing;
            for &hand in &hands {
                let Some(node) = self.creature.parent_node_position(hand) else {
                    continue;
                };
                let Some(part) = self.creature.part_mut(hand) else {
                    continue;
                };
                let target = (pointer - node).clamp_len(reach_cap(part)).rotate(-part.frame.rotation);
                part.offset = part.offset.lerp(target, smoothing);
            }
            self.creature.propagate();
        }

        let tolerance = self.settings.grab.tolerance;
        for hand in hands {
            let Some(part) = self.creature.part_mut(hand) else {
                continue;
            };
            part.grabbing = held;
            let center = part.frame.center;

            if held {
                if part.grabbed.is_none() {
                    if let Some(object) = self.grabbables.get_grabbable_at(center, tolerance, ground_y) {
                        part.grabbed = Some(object);
                        if let Some(obj) = self.grabbables.get_mut(object) {
                            obj.held_by = Some(hand);
                        }
                        info!("{} grabbed {}", hand, object);
                        self.creature.events_mut().send(CreatureEvent::Grabbed { hand, object });
                    }
                }
            } else if let Some(object) = part.grabbed.take() {
                if let Some(obj) = self.grabbables.get_mut(object) {
                    if obj.held_by == Some(hand) {
                        obj.held_by = None;
                    }
                }
                info!("{} released {}", hand, object);
                self.creature.events_mut().send(CreatureEvent::Released { hand, object });
                continue;
            }

            let grabbed = self.creature.part(hand).and_then(|p| p.grabbed);
            if let Some(obj) = grabbed.and_then(|object| self.grabbables.get_mut(object)) {
                obj.position = center;
                obj.velocity = Vec2::ZERO;
            }
        }
    }
}
