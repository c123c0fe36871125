//! Application state
//!
//! Owns the simulation, the edit session and the toolbar, and routes each
//! frame's input to whichever of them is live: the toolbar and session
//! while the edit overlay is open, the creature's intents otherwise.

use log::{debug, info};
use crate::creature::{CreatureEvent, EditError, EditSession, PressOutcome, Settings, Simulation};
use crate::input::{Action, FrameInput, InputState};
use crate::renderer::{self, DrawCommand};
use crate::ui::{Toolbar, ToolbarHit};

pub struct AppState {
    pub sim: Simulation,
    pub session: EditSession,
    pub toolbar: Toolbar,
    pub input: InputState,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let toolbar = Toolbar::new(settings.world.width);
        Self {
            sim: Simulation::new(settings),
            session: EditSession::new(),
            toolbar,
            input: InputState::new(),
        }
    }

    /// Poll, route, step, report. Returns this frame's draw list.
    pub fn frame(&mut self) -> Vec<DrawCommand> {
        let input = self.input.poll();
        self.handle_input(&input);
        self.sim.update();
        self.report_events();
        renderer::prepare(&self.sim, &self.session, &self.toolbar)
    }

    pub fn handle_input(&mut self, input: &FrameInput) {
        if input.pressed(Action::ToggleEdit) {
            self.sim.toggle_edit_mode();
            // Closing the overlay mid-drag must not leave a drag behind
            self.session.primary_release();
            self.session.secondary_release();
        }

        if self.sim.edit_mode() {
            self.sim.set_movement(false, false);
            self.sim.set_grab(false, input.pointer);
            self.handle_edit_input(input);
        } else {
            self.sim.set_movement(input.down(Action::MoveLeft), input.down(Action::MoveRight));
            if input.pressed(Action::Jump) {
                self.sim.request_jump();
            }
            self.sim.set_grab(input.down(Action::Primary), input.pointer);
        }
    }

    fn handle_edit_input(&mut self, input: &FrameInput) {
        let pointer = input.pointer;

        if input.pressed(Action::RemoveNode) {
            let result = self.session.remove_at(self.sim.creature_mut(), pointer);
            log_outcome("remove node", result);
        }

        if input.pressed(Action::Primary) {
            match self.toolbar.hit(pointer.x, pointer.y, self.session.mode()) {
                Some(hit) => self.apply_toolbar(hit),
                None => {
                    let result = self.session.primary_press(self.sim.creature_mut(), pointer);
                    log_outcome("primary press", result);
                }
            }
        }
        if input.pressed(Action::Secondary) {
            let outcome = self.session.secondary_press(self.sim.creature(), pointer);
            log_outcome("secondary press", Ok(outcome));
        }

        if input.pointer_moved {
            self.session.pointer_moved(self.sim.creature_mut(), pointer);
        }

        if input.released(Action::Primary) {
            self.session.primary_release();
        }
        if input.released(Action::Secondary) {
            self.session.secondary_release();
        }
    }

    fn apply_toolbar(&mut self, hit: ToolbarHit) {
        debug!("toolbar: {:?}", hit);
        match hit {
            ToolbarHit::Shape(shape) => {
                if let Err(e) = self.session.select_shape(self.sim.creature_mut(), shape) {
                    debug!("shape button refused: {}", e);
                }
            }
            ToolbarHit::PlaceNode => {
                self.session.arm_place_node();
            }
            ToolbarHit::RemoveNode => {
                self.session.arm_remove_node();
            }
            ToolbarHit::Mode(mode) => self.session.set_mode(mode),
        }
    }

    /// Drain this frame's creature events into the log
    pub fn report_events(&mut self) -> usize {
        let creature = self.sim.creature();
        if creature.events().has_structural() {
            debug!("creature now has {} parts", creature.len());
        }
        let mut count = 0;
        for event in self.sim.creature_mut().events_mut().drain() {
            count += 1;
            match event {
                CreatureEvent::Landed { fall_speed } => info!("landed at {:.2} px/tick", fall_speed),
                CreatureEvent::Jumped { grounded_feet } => info!("jumped off {} feet", grounded_feet),
                CreatureEvent::Grabbed { hand, object } => info!("{} grabbed {}", hand, object),
                CreatureEvent::Released { hand, object } => info!("{} released {}", hand, object),
                other => debug!("{:?}", other),
            }
        }
        count
    }
}

fn log_outcome(action: &str, result: Result<PressOutcome, EditError>) {
    match result {
        Ok(PressOutcome::Nothing) => {}
        Ok(outcome) => debug!("{}: {:?}", action, outcome),
        Err(e) => debug!("{} refused: {}", action, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creature::{DragKind, EditMode, Shape, Tool, Vec2};
    use crate::input::ActionSet;

    fn input(pointer: Vec2, pressed: ActionSet, down: ActionSet) -> FrameInput {
        FrameInput {
            pointer,
            pointer_moved: true,
            down,
            pressed,
            released: ActionSet::EMPTY,
        }
    }

    fn press(pointer: Vec2, action: Action) -> FrameInput {
        let set = ActionSet::EMPTY.with(action);
        input(pointer, set, set)
    }

    fn open_editor() -> AppState {
        let mut app = AppState::new(Settings::default());
        app.handle_input(&press(Vec2::ZERO, Action::ToggleEdit));
        assert!(app.sim.edit_mode());
        app
    }

    #[test]
    fn test_play_input_sets_intents() {
        let mut app = AppState::new(Settings::default());
        let down = ActionSet::EMPTY.with(Action::MoveRight).with(Action::Primary);
        app.handle_input(&input(Vec2::new(10.0, 20.0), ActionSet::EMPTY.with(Action::Jump), down));

        let intents = app.sim.intents();
        assert!(intents.move_right && !intents.move_left);
        assert!(intents.jump);
        assert!(intents.grab_held);
        assert_eq!(intents.pointer, Vec2::new(10.0, 20.0));
    }

    #[test]
    fn test_edit_mode_blocks_movement() {
        let mut app = open_editor();
        app.handle_input(&input(Vec2::ZERO, ActionSet::EMPTY, ActionSet::EMPTY.with(Action::MoveLeft)));
        assert!(!app.sim.intents().move_left);
        assert!(!app.sim.intents().grab_held);
    }

    #[test]
    fn test_toolbar_routes_to_session() {
        let mut app = open_editor();
        // Circle button in torso mode
        app.handle_input(&press(Vec2::new(30.0, 120.0), Action::Primary));
        assert_eq!(app.sim.creature().root_part().shape, Shape::Circle);

        // Hands/feet tab, then the rectangle button
        app.handle_input(&press(Vec2::new(670.0, 130.0), Action::Primary));
        assert_eq!(app.session.mode(), EditMode::HandsFeet);
        app.handle_input(&press(Vec2::new(30.0, 70.0), Action::Primary));
        assert_eq!(app.session.tool(), Tool::Appendage(Shape::Rectangle));

        // Node buttons are hidden here, so this press falls through to the world
        app.handle_input(&press(Vec2::new(30.0, 220.0), Action::Primary));
        assert_eq!(app.session.tool(), Tool::Appendage(Shape::Rectangle));
    }

    #[test]
    fn test_attach_then_drag() {
        let mut app = open_editor();
        app.handle_input(&press(Vec2::new(670.0, 80.0), Action::Primary));
        app.handle_input(&press(Vec2::new(30.0, 120.0), Action::Primary));
        assert_eq!(app.session.tool(), Tool::Appendage(Shape::Circle));

        // Triangle body of 50 at the centre: bottom-left node at (325, 375)
        app.handle_input(&press(Vec2::new(325.0, 375.0), Action::Primary));
        assert_eq!(app.sim.creature().len(), 2);
        assert!(app.report_events() >= 1);

        assert!(app.sim.creature().hands().is_empty());
        let limb = app.sim.creature().preorder()[1];
        let center = app.sim.creature().part(limb).unwrap().frame.center;
        app.handle_input(&press(center, Action::Secondary));
        assert_eq!(app.session.drag().map(|d| d.kind), Some(DragKind::Rotate));

        let mut release = input(center, ActionSet::EMPTY, ActionSet::EMPTY);
        release.released = ActionSet::EMPTY.with(Action::Secondary);
        app.handle_input(&release);
        assert_eq!(app.session.drag(), None);
    }

    #[test]
    fn test_closing_editor_ends_drag() {
        let mut app = open_editor();
        app.handle_input(&press(Vec2::new(670.0, 80.0), Action::Primary));
        app.handle_input(&press(Vec2::new(30.0, 70.0), Action::Primary));
        app.handle_input(&press(Vec2::new(375.0, 375.0), Action::Primary));
        let limb = app.sim.creature().preorder()[1];
        let center = app.sim.creature().part(limb).unwrap().frame.center;
        app.handle_input(&press(center, Action::Primary));
        assert!(app.session.drag().is_some());

        app.handle_input(&press(center, Action::ToggleEdit));
        assert!(!app.sim.edit_mode());
        assert_eq!(app.session.drag(), None);
    }

    #[test]
    fn test_remove_node_key() {
        let mut app = open_editor();
        let before = app.sim.creature().root_part().nodes.len();
        // Triangle apex at (350, 325)
        app.handle_input(&press(Vec2::new(350.0, 325.0), Action::RemoveNode));
        assert_eq!(app.sim.creature().root_part().nodes.len(), before - 1);
    }
}
