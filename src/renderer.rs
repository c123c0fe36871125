//! Scene Renderer
//!
//! Two passes: `prepare` walks the simulation read-only and produces a flat
//! list of draw commands, `draw` hands them to macroquad. Only `draw` needs
//! a window.

use macroquad::prelude::*;
use crate::creature::shape::triangle_vertices;
use crate::creature::{Creature, EditSession, Part, Rgba, Shape, Simulation, Vec2, Visit};
use crate::ui::{Rect, Toolbar};

pub const BACKGROUND: Rgba = Rgba::new(100, 100, 100, 255);
pub const EDIT_OVERLAY: Rgba = Rgba::new(100, 0, 100, 255);
pub const OUTLINE: Rgba = Rgba::new(255, 255, 255, 255);
pub const BALL: Rgba = Rgba::new(230, 140, 30, 255);

/// Half size of a node marker
const NODE_MARKER: f32 = 3.0;
const LINK_THICKNESS: f32 = 2.0;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Rotated about its centre
    Rectangle { center: Vec2, width: f32, height: f32, rotation: f32, color: Rgba },
    Circle { center: Vec2, radius: f32, color: Rgba },
    Triangle { vertices: [Vec2; 3], color: Rgba },
    Line { from: Vec2, to: Vec2, thickness: f32, color: Rgba },
    /// Axis-aligned fill, screen space
    Fill { rect: Rect, color: Rgba },
    Outline { rect: Rect, color: Rgba },
}

/// Draw commands for one frame, back to front
pub fn prepare(sim: &Simulation, session: &EditSession, toolbar: &Toolbar) -> Vec<DrawCommand> {
    let world = &sim.settings().world;
    let screen = Rect::new(0.0, 0.0, world.width, world.height);
    let mut commands = Vec::new();

    if sim.edit_mode() {
        commands.push(DrawCommand::Fill { rect: screen, color: EDIT_OVERLAY });
        push_toolbar(&mut commands, sim.creature(), session, toolbar);
    }

    push_creature(&mut commands, sim.creature());

    for (_, ball) in sim.grabbables().iter() {
        commands.push(DrawCommand::Circle {
            center: ball.position,
            radius: ball.radius,
            color: BALL,
        });
    }

    let ground = sim.ground_y() - 1.0;
    commands.push(DrawCommand::Line {
        from: Vec2::new(0.0, ground),
        to: Vec2::new(world.width, ground),
        thickness: 1.0,
        color: OUTLINE,
    });
    commands
}

fn push_toolbar(commands: &mut Vec<DrawCommand>, creature: &Creature, session: &EditSession, toolbar: &Toolbar) {
    for button in toolbar.visible(session.mode()) {
        commands.push(DrawCommand::Fill { rect: button.rect, color: button.color });
    }
    for rect in toolbar.highlighted(session, creature.root_part().shape) {
        commands.push(DrawCommand::Outline { rect, color: OUTLINE });
    }
}

/// Every part in pre-order, each followed by its node markers and the
/// links from its parent's node
fn push_creature(commands: &mut Vec<DrawCommand>, creature: &Creature) {
    creature.walk(creature.root(), |_, part, _| {
        commands.push(shape_command(part));
        for node in part.nodes.iter() {
            commands.push(DrawCommand::Fill {
                rect: Rect::new(node.abs.x - NODE_MARKER, node.abs.y - NODE_MARKER, NODE_MARKER * 2.0, NODE_MARKER * 2.0),
                color: OUTLINE,
            });
        }
        for &child_id in &part.children {
            let Some(child) = creature.part(child_id) else { continue };
            let Some(node) = child.attachment.and_then(|i| part.node_position(i)) else { continue };
            commands.push(DrawCommand::Line {
                from: node,
                to: link_anchor(child),
                thickness: LINK_THICKNESS,
                color: OUTLINE,
            });
        }
        Visit::Continue
    });
}

/// Where a link from the parent node meets a part: the top edge midpoint,
/// or the centre for hands and feet
pub fn link_anchor(part: &Part) -> Vec2 {
    if part.role.is_hand_or_foot {
        part.frame.center
    } else {
        part.frame.local_to_world(Vec2::new(0.0, -part.frame.height * 0.5))
    }
}

fn shape_command(part: &Part) -> DrawCommand {
    let frame = &part.frame;
    match part.shape {
        Shape::Rectangle => DrawCommand::Rectangle {
            center: frame.center,
            width: frame.width,
            height: frame.height,
            rotation: frame.rotation,
            color: part.color,
        },
        Shape::Circle => DrawCommand::Circle {
            center: frame.center,
            radius: frame.width * 0.5,
            color: part.color,
        },
        Shape::Triangle => {
            let [a, b, c] = triangle_vertices(frame.half_extents());
            DrawCommand::Triangle {
                vertices: [frame.local_to_world(a), frame.local_to_world(b), frame.local_to_world(c)],
                color: part.color,
            }
        }
    }
}

fn color(c: Rgba) -> Color {
    Color::from_rgba(c.r, c.g, c.b, c.a)
}

/// Clear and draw one frame
pub fn draw(commands: &[DrawCommand]) {
    clear_background(color(BACKGROUND));
    for command in commands {
        match *command {
            DrawCommand::Rectangle { center, width, height, rotation, color: c } => {
                draw_rectangle_ex(
                    center.x,
                    center.y,
                    width,
                    height,
                    DrawRectangleParams {
                        offset: vec2(0.5, 0.5),
                        rotation,
                        color: color(c),
                    },
                );
            }
            DrawCommand::Circle { center, radius, color: c } => {
                draw_circle(center.x, center.y, radius, color(c));
            }
            DrawCommand::Triangle { vertices: [a, b, c], color: col } => {
                draw_triangle(vec2(a.x, a.y), vec2(b.x, b.y), vec2(c.x, c.y), color(col));
            }
            DrawCommand::Line { from, to, thickness, color: c } => {
                draw_line(from.x, from.y, to.x, to.y, thickness, color(c));
            }
            DrawCommand::Fill { rect, color: c } => {
                draw_rectangle(rect.x, rect.y, rect.w, rect.h, color(c));
            }
            DrawCommand::Outline { rect, color: c } => {
                let r = rect.expand(1.0);
                draw_rectangle_lines(r.x, r.y, r.w, r.h, 2.0, color(c));
            }
        }
    }
}
