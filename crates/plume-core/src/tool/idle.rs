//! The resting tool: waits for a reason to draw or edit.

use super::Transition;
use crate::dock::{DockInput, WidgetId};
use crate::editor::EditorCtx;
use crate::event::{Event, Key};

#[derive(Debug)]
pub struct IdleTool {
    edit_button: WidgetId,
}

impl IdleTool {
    pub fn enter(ctx: &mut EditorCtx) -> Self {
        Self {
            edit_button: ctx.dock.spawn_button("Edit"),
        }
    }

    pub fn exit(&mut self, ctx: &mut EditorCtx) {
        ctx.dock.remove(self.edit_button);
    }

    pub fn on_event(&mut self, ctx: &mut EditorCtx, event: &Event) -> Option<Transition> {
        match event {
            Event::PointerDown(point) => Some(Transition::ToDrawing { at: *point }),
            Event::KeyUp { key, ctrl } => self.on_key(ctx, *key, *ctrl),
            Event::Dock(dock) if dock.widget == self.edit_button => {
                matches!(dock.input, DockInput::Clicked).then_some(Transition::ToEditing {
                    select_all: false,
                    paste: false,
                })
            }
            _ => None,
        }
    }

    fn on_key(&mut self, ctx: &mut EditorCtx, key: Key, ctrl: bool) -> Option<Transition> {
        match (key, ctrl) {
            (Key::E, false) => Some(Transition::ToEditing {
                select_all: false,
                paste: false,
            }),
            (Key::A, true) => Some(Transition::ToEditing {
                select_all: true,
                paste: false,
            }),
            (Key::V, true) => Some(Transition::ToEditing {
                select_all: false,
                paste: true,
            }),
            (Key::Z, true) => {
                ctx.undo();
                None
            }
            (Key::Y, true) => {
                ctx.redo();
                None
            }
            _ => None,
        }
    }
}
