//! The drawing tool: click to anchor points, with a live trailing point
//! tracking the pointer.
//!
//! A new path always carries two coincident points: the anchored start
//! and the trailing point. Pointer motion repositions the trailing
//! point; a click anchors it and spawns the next one. On commit the
//! trailing point is dropped, so a path anchored with `n` clicks keeps
//! `n` points.

use super::Transition;
use crate::dock::{DockInput, SliderOpts, WidgetId};
use crate::editor::EditorCtx;
use crate::event::{Event, Key};
use crate::scene::{Path, PathId};
use kurbo::Point;

#[derive(Debug)]
pub struct DrawTool {
    path: PathId,
    stroke_picker: WidgetId,
    fill_picker: WidgetId,
    thickness: WidgetId,
    close_toggle: WidgetId,
}

impl DrawTool {
    pub fn enter(ctx: &mut EditorCtx, at: Point) -> Self {
        let mut path = Path::new(vec![at, at], ctx.style);
        path.smooth();
        let path = ctx.scene.add(path);

        let style = ctx.style;
        Self {
            path,
            stroke_picker: ctx.dock.spawn_picker("stroke color", Some(style.stroke)),
            fill_picker: ctx.dock.spawn_picker("fill color", Some(style.fill)),
            thickness: ctx.dock.spawn_slider(
                "thickness",
                SliderOpts {
                    initial: style.stroke_width,
                    fire_initial: true,
                    ..SliderOpts::default()
                },
            ),
            close_toggle: ctx.dock.spawn_button("close"),
        }
    }

    /// Drop the trailing point and freeze the final curve. The path may
    /// already be gone when the drawing was aborted.
    pub fn exit(&mut self, ctx: &mut EditorCtx) {
        if let Some(path) = ctx.scene.get_mut(self.path) {
            path.pop_point();
            path.smooth();
        }
        for widget in [
            self.stroke_picker,
            self.fill_picker,
            self.thickness,
            self.close_toggle,
        ] {
            ctx.dock.remove(widget);
        }
    }

    pub fn on_event(&mut self, ctx: &mut EditorCtx, event: &Event) -> Option<Transition> {
        match event {
            Event::PointerDown(point) => {
                if let Some(path) = ctx.scene.get_mut(self.path) {
                    path.push_point(*point);
                    path.smooth();
                }
                None
            }
            // The trailing point follows the pointer whether or not
            // the button is held.
            Event::PointerMove(point) => {
                self.track(ctx, *point);
                None
            }
            Event::PointerDrag(sample) => {
                self.track(ctx, sample.point);
                None
            }
            Event::KeyUp { key, ctrl } => self.on_key(ctx, *key, *ctrl),
            Event::Dock(dock) => {
                self.on_dock(ctx, dock.widget, dock.input);
                None
            }
            _ => None,
        }
    }

    fn track(&mut self, ctx: &mut EditorCtx, point: Point) {
        if let Some(path) = ctx.scene.get_mut(self.path) {
            path.set_last_point(point);
            path.smooth();
        }
    }

    fn on_key(&mut self, ctx: &mut EditorCtx, key: Key, ctrl: bool) -> Option<Transition> {
        match (key, ctrl) {
            (Key::Escape, false) => Some(Transition::ToIdle { save: true }),
            (Key::Space, false) => {
                self.toggle_closed(ctx);
                None
            }
            (Key::Z, true) => self.undo_point(ctx),
            _ => None,
        }
    }

    /// Retract the last anchored point; the trailing point stays on
    /// the pointer. Once fewer than two anchored points remain the
    /// drawing is abandoned: the nascent path leaves the scene and no
    /// archive entry is made.
    fn undo_point(&mut self, ctx: &mut EditorCtx) -> Option<Transition> {
        let Some(path) = ctx.scene.get_mut(self.path) else {
            return Some(Transition::ToIdle { save: false });
        };
        let n = path.len();
        if n >= 2 {
            path.segments.remove(n - 2);
        }
        if path.len() >= 3 {
            path.smooth();
            return None;
        }
        ctx.scene.remove(self.path);
        Some(Transition::ToIdle { save: false })
    }

    fn toggle_closed(&mut self, ctx: &mut EditorCtx) {
        if let Some(path) = ctx.scene.get_mut(self.path) {
            path.closed = !path.closed;
            path.smooth();
            let label = if path.closed { "open" } else { "close" };
            ctx.dock.set_label(self.close_toggle, label);
        }
    }

    /// Style changes apply to the live path and stick as the default
    /// for the next drawing.
    fn on_dock(&mut self, ctx: &mut EditorCtx, widget: WidgetId, input: DockInput) {
        match input {
            DockInput::Color(color) if widget == self.stroke_picker => {
                ctx.style.stroke = color;
            }
            DockInput::Color(color) if widget == self.fill_picker => {
                ctx.style.fill = color;
            }
            DockInput::Number(width) if widget == self.thickness => {
                ctx.style.stroke_width = width;
            }
            DockInput::Clicked if widget == self.close_toggle => {
                self.toggle_closed(ctx);
                return;
            }
            _ => return,
        }
        if let Some(path) = ctx.scene.get_mut(self.path) {
            path.style = ctx.style;
        }
    }
}
