//! Scene drawing as a flat list of screen-space primitives.
//!
//! The window maps each [`DrawCommand`] onto painter calls; keeping the list
//! here lets tests check what a frame shows without a GPU.

use glam::DVec2;
use shared::Rgba;

use crate::interaction::{Gesture, Tool};
use crate::physics::{ConstraintKind, ShapeKind};
use crate::state::AppState;

pub const OUTLINE_COLOR: Rgba = [0, 0, 0, 255];
pub const SELECTED_OUTLINE_COLOR: Rgba = [255, 255, 0, 255];
pub const JOINT_COLOR: Rgba = [0, 200, 255, 255];
pub const JOINT_RIM_COLOR: Rgba = [255, 255, 255, 255];
pub const GUIDE_COLOR: Rgba = [255, 255, 255, 255];
pub const SELECTION_BOX_COLOR: Rgba = [0, 255, 0, 255];
pub const CENTROID_COLOR: Rgba = [255, 0, 0, 255];
pub const PENDING_JOINT_COLOR: Rgba = [255, 0, 255, 255];
pub const TRAIL_COLOR: Rgba = [255, 0, 0, 255];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub width: f64,
    pub color: Rgba,
}

impl Stroke {
    pub fn new(width: f64, color: Rgba) -> Self {
        Self { width, color }
    }
}

/// One primitive in viewport pixels (y down)
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Closed polygon
    Polygon {
        points: Vec<DVec2>,
        fill: Option<Rgba>,
        stroke: Option<Stroke>,
    },
    Circle {
        center: DVec2,
        radius: f64,
        fill: Option<Rgba>,
        stroke: Option<Stroke>,
    },
    /// Open polyline
    Polyline { points: Vec<DVec2>, stroke: Stroke },
    Line {
        from: DVec2,
        to: DVec2,
        stroke: Stroke,
    },
}

/// Everything the viewport shows for the current state, back to front.
pub fn build_draw_list(state: &AppState) -> Vec<DrawCommand> {
    let camera = state.scene.camera;
    let zoom = camera.zoom;
    // line widths scale with zoom but never vanish
    let px = |w: f64| (w * zoom).max(1.0);
    let mut out = Vec::new();

    // ── Shapes ──
    for body in state.scene.world.bodies() {
        for shape in &body.shapes {
            match shape.kind {
                ShapeKind::Circle { radius } => out.push(DrawCommand::Circle {
                    center: camera.to_screen(body.position),
                    radius: camera.scale(radius),
                    fill: Some(shape.color),
                    stroke: Some(Stroke::new(1.0, OUTLINE_COLOR)),
                }),
                ShapeKind::Box { .. } => out.push(DrawCommand::Polygon {
                    points: screen_vertices(state, body, shape),
                    fill: Some(shape.color),
                    stroke: Some(Stroke::new(1.0, OUTLINE_COLOR)),
                }),
            }
        }
    }

    // ── Selection outlines ──
    for body in state
        .selection
        .bodies()
        .iter()
        .filter_map(|id| state.scene.world.body(*id))
    {
        for shape in &body.shapes {
            let stroke = Some(Stroke::new(px(3.0), SELECTED_OUTLINE_COLOR));
            match shape.kind {
                ShapeKind::Circle { radius } => out.push(DrawCommand::Circle {
                    center: camera.to_screen(body.position),
                    radius: camera.scale(radius) + 4.0 * zoom,
                    fill: None,
                    stroke,
                }),
                ShapeKind::Box { .. } => out.push(DrawCommand::Polygon {
                    points: screen_vertices(state, body, shape),
                    fill: None,
                    stroke,
                }),
            }
        }
    }

    // ── Joints ──
    for constraint in state.scene.world.constraints() {
        let Some((a, b)) = state.scene.world.constraint_anchors(constraint) else {
            continue;
        };
        let selected = state.selection.is_constraint_selected(constraint.id);
        let (a, b) = (camera.to_screen(a), camera.to_screen(b));
        match constraint.kind {
            ConstraintKind::PinJoint { .. } => {
                out.push(DrawCommand::Circle {
                    center: a,
                    radius: 5.0 * zoom,
                    fill: Some(JOINT_COLOR),
                    stroke: Some(Stroke::new(1.0, JOINT_RIM_COLOR)),
                });
                if selected {
                    out.push(DrawCommand::Circle {
                        center: a,
                        radius: 8.0 * zoom,
                        fill: None,
                        stroke: Some(Stroke::new(px(2.0), SELECTED_OUTLINE_COLOR)),
                    });
                }
            }
            ConstraintKind::DampedSpring { .. } => {
                out.push(DrawCommand::Line {
                    from: a,
                    to: b,
                    stroke: Stroke::new(px(2.0), JOINT_COLOR),
                });
                if selected {
                    out.push(DrawCommand::Line {
                        from: a,
                        to: b,
                        stroke: Stroke::new(px(4.0), SELECTED_OUTLINE_COLOR),
                    });
                }
            }
        }
    }

    // ── Gesture previews ──
    let guide = Stroke::new(px(3.0), GUIDE_COLOR);
    match state.interaction.gesture {
        Gesture::DrawingShape { start, end } => {
            let (s, e) = (camera.to_screen(start), camera.to_screen(end));
            match state.interaction.tool {
                Tool::Box => out.push(DrawCommand::Polygon {
                    points: rect_points(s, e),
                    fill: None,
                    stroke: Some(guide),
                }),
                Tool::Circle => out.push(DrawCommand::Circle {
                    center: (s + e) / 2.0,
                    radius: s.distance(e) / 2.0,
                    fill: None,
                    stroke: Some(guide),
                }),
                _ => {}
            }
        }
        Gesture::BoxSelecting { start, end } => out.push(DrawCommand::Polygon {
            points: rect_points(camera.to_screen(start), camera.to_screen(end)),
            fill: None,
            stroke: Some(Stroke::new(px(2.0), SELECTION_BOX_COLOR)),
        }),
        _ => {}
    }

    if state.interaction.tool == Tool::Rotate {
        let centroid = match state.interaction.gesture {
            Gesture::Rotating { centroid, .. } => Some(centroid),
            _ => state.scene.centroid(state.selection.bodies()),
        };
        if let Some(c) = centroid {
            let c = camera.to_screen(c);
            let arm = 10.0 * zoom;
            let stroke = Stroke::new(px(3.0), CENTROID_COLOR);
            out.push(DrawCommand::Circle {
                center: c,
                radius: 5.0 * zoom,
                fill: Some(CENTROID_COLOR),
                stroke: None,
            });
            out.push(DrawCommand::Line {
                from: c - DVec2::new(arm, 0.0),
                to: c + DVec2::new(arm, 0.0),
                stroke,
            });
            out.push(DrawCommand::Line {
                from: c - DVec2::new(0.0, arm),
                to: c + DVec2::new(0.0, arm),
                stroke,
            });
        }
    }

    // hidden while a notice covers the viewport
    if let (Some(draft), Some(pointer)) = (state.interaction.joint_draft, state.interaction.pointer)
    {
        if state.interaction.tool.joint_kind().is_some() && state.notices.is_empty() {
            out.push(DrawCommand::Line {
                from: camera.to_screen(draft.anchor),
                to: pointer,
                stroke: Stroke::new(px(3.0), PENDING_JOINT_COLOR),
            });
        }
    }

    // ── Trails ──
    if state.scene.show_trails {
        for (id, points) in state.trails.iter() {
            let dynamic = state.scene.world.body(*id).is_some_and(|b| b.is_dynamic());
            if dynamic && points.len() > 1 {
                out.push(DrawCommand::Polyline {
                    points: points.iter().copied().collect(),
                    stroke: Stroke::new(px(2.0), TRAIL_COLOR),
                });
            }
        }
    }

    out
}

fn screen_vertices(
    state: &AppState,
    body: &crate::physics::Body,
    shape: &crate::physics::Shape,
) -> Vec<DVec2> {
    body.world_vertices(shape)
        .into_iter()
        .map(|v| state.scene.camera.to_screen(v))
        .collect()
}

/// Axis-aligned rectangle through two opposite corners
fn rect_points(a: DVec2, b: DVec2) -> Vec<DVec2> {
    let (min, max) = (a.min(b), a.max(b));
    vec![
        min,
        DVec2::new(max.x, min.y),
        max,
        DVec2::new(min.x, max.y),
    ]
}
