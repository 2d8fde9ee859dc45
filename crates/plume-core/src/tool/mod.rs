//! The tool state machine: Idle, Drawing, Editing.
//!
//! Exactly one tool is active at a time. Tools own the dock widgets
//! they spawn and tear them down on exit; transitions are requested by
//! returning a [`Transition`] from `on_event` and executed by the
//! editor, which guarantees exit-then-enter ordering.

mod draw;
mod edit;
mod idle;

pub use draw::DrawTool;
pub use edit::EditTool;
pub use idle::IdleTool;

use crate::editor::EditorCtx;
use crate::event::Event;
use kurbo::Point;

/// A requested tool change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    /// Back to Idle; `save` commits the scene to the archive after the
    /// outgoing tool has finished its exit work.
    ToIdle { save: bool },
    /// Start drawing a path anchored at `at`.
    ToDrawing { at: Point },
    /// Enter edit mode, optionally selecting everything or kicking off
    /// a clipboard paste once the tool is up.
    ToEditing { select_all: bool, paste: bool },
}

/// Which tool is active, without its state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Idle,
    Drawing,
    Editing,
}

/// The active tool.
#[derive(Debug)]
pub enum Tool {
    Idle(IdleTool),
    Drawing(DrawTool),
    Editing(EditTool),
}

impl Tool {
    pub fn kind(&self) -> ToolKind {
        match self {
            Tool::Idle(_) => ToolKind::Idle,
            Tool::Drawing(_) => ToolKind::Drawing,
            Tool::Editing(_) => ToolKind::Editing,
        }
    }

    /// Feed one event to the active tool.
    pub fn on_event(&mut self, ctx: &mut EditorCtx, event: &Event) -> Option<Transition> {
        match self {
            Tool::Idle(tool) => tool.on_event(ctx, event),
            Tool::Drawing(tool) => tool.on_event(ctx, event),
            Tool::Editing(tool) => tool.on_event(ctx, event),
        }
    }

    /// Run the active tool's teardown.
    pub fn exit(&mut self, ctx: &mut EditorCtx) {
        match self {
            Tool::Idle(tool) => tool.exit(ctx),
            Tool::Drawing(tool) => tool.exit(ctx),
            Tool::Editing(tool) => tool.exit(ctx),
        }
    }
}
