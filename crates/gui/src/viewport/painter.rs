//! Maps draw list primitives onto egui painter shapes.

use egui::{Color32, Painter, Pos2, Rect, Shape};
use glam::DVec2;
use shared::Rgba;

use crate::render::{DrawCommand, Stroke};

fn color(c: Rgba) -> Color32 {
    let [r, g, b, a] = c;
    Color32::from_rgba_unmultiplied(r, g, b, a)
}

fn stroke(s: Stroke) -> egui::Stroke {
    egui::Stroke::new(s.width as f32, color(s.color))
}

pub fn paint(painter: &Painter, rect: Rect, background: Rgba, list: &[DrawCommand]) {
    painter.rect_filled(rect, 0.0, color(background));

    let to_pos = |p: DVec2| Pos2::new(rect.min.x + p.x as f32, rect.min.y + p.y as f32);

    for command in list {
        match command {
            DrawCommand::Polygon {
                points,
                fill,
                stroke: outline,
            } => {
                let points: Vec<Pos2> = points.iter().copied().map(to_pos).collect();
                let outline = outline.map(stroke).unwrap_or(egui::Stroke::NONE);
                match fill {
                    Some(fill) => {
                        painter.add(Shape::convex_polygon(points, color(*fill), outline));
                    }
                    None => {
                        painter.add(Shape::closed_line(points, outline));
                    }
                }
            }
            DrawCommand::Circle {
                center,
                radius,
                fill,
                stroke: outline,
            } => {
                painter.circle(
                    to_pos(*center),
                    *radius as f32,
                    fill.map(color).unwrap_or(Color32::TRANSPARENT),
                    outline.map(stroke).unwrap_or(egui::Stroke::NONE),
                );
            }
            DrawCommand::Polyline { points, stroke: s } => {
                if points.len() < 2 {
                    continue;
                }
                let points: Vec<Pos2> = points.iter().copied().map(to_pos).collect();
                painter.add(Shape::line(points, stroke(*s)));
            }
            DrawCommand::Line { from, to, stroke: s } => {
                painter.line_segment([to_pos(*from), to_pos(*to)], stroke(*s));
            }
        }
    }
}
