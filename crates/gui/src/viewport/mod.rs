//! Simulation viewport: feeds pointer input to the editor, steps the world and
//! paints the draw list.

mod painter;

use egui::Ui;
use glam::DVec2;

use crate::interaction::{Modifiers, PointerButton, PointerEvent};
use crate::render::build_draw_list;
use crate::state::AppState;

/// Wheel movement in points that counts as one notch
const POINTS_PER_NOTCH: f32 = 50.0;

/// Central simulation area
pub struct ViewportPanel {
    /// Fractional wheel movement not yet turned into a notch
    scroll_accum: f32,
}

impl ViewportPanel {
    pub fn new() -> Self {
        Self { scroll_accum: 0.0 }
    }

    /// Input, then one fixed physics step, then paint.
    pub fn show(&mut self, ui: &mut Ui, state: &mut AppState, interactive: bool) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
        state.scene.camera.screen_height = f64::from(rect.height());

        if interactive {
            for event in self.collect_events(ui, &response, rect) {
                state.handle_pointer(event);
            }
        } else if state.interaction.gesture != crate::interaction::Gesture::Idle {
            // a modal opened mid-gesture; nothing will deliver the release
            state.cancel_gesture();
        }

        state.advance_frame();

        if !ui.is_rect_visible(rect) {
            return;
        }
        let painter = ui.painter_at(rect);
        painter::paint(&painter, rect, state.scene.background_color, &build_draw_list(state));
    }

    fn collect_events(
        &mut self,
        ui: &Ui,
        response: &egui::Response,
        rect: egui::Rect,
    ) -> Vec<PointerEvent> {
        let to_local = |p: egui::Pos2| DVec2::new(f64::from(p.x - rect.min.x), f64::from(p.y - rect.min.y));
        let hovered = response.hovered();
        let mut out = Vec::new();

        ui.input(|i| {
            for event in &i.events {
                match event {
                    egui::Event::PointerMoved(pos) => out.push(PointerEvent::Moved {
                        pos: to_local(*pos),
                    }),
                    egui::Event::PointerButton {
                        pos,
                        button,
                        pressed,
                        modifiers,
                    } => {
                        let button = match button {
                            egui::PointerButton::Primary => PointerButton::Primary,
                            egui::PointerButton::Secondary => PointerButton::Secondary,
                            _ => continue,
                        };
                        let pos = to_local(*pos);
                        if *pressed {
                            // presses over other widgets belong to them
                            if hovered {
                                out.push(PointerEvent::Pressed {
                                    pos,
                                    button,
                                    modifiers: Modifiers {
                                        shift: modifiers.shift,
                                        ctrl: modifiers.command,
                                    },
                                });
                            }
                        } else {
                            out.push(PointerEvent::Released { pos, button });
                        }
                    }
                    _ => {}
                }
            }

            if hovered {
                self.scroll_accum += i.raw_scroll_delta.y;
                let notches = (self.scroll_accum / POINTS_PER_NOTCH).trunc();
                if notches != 0.0 {
                    self.scroll_accum -= notches * POINTS_PER_NOTCH;
                    if let Some(pos) = i.pointer.hover_pos() {
                        out.push(PointerEvent::Wheel {
                            pos: to_local(pos),
                            notches: notches as i32,
                        });
                    }
                }
            } else {
                self.scroll_accum = 0.0;
            }
        });
        out
    }
}
