//! The editor: owns the scene, the archive, the collaborators, and the
//! active tool, and drives tool transitions.
//!
//! Hosts feed raw input through the `pointer_*`, `key_up`,
//! `dock_input`, and `clipboard_text` methods; the editor converts it
//! into [`Event`]s, tracks press state so tools see drags rather than
//! raw motion, and executes the transitions tools request with
//! exit-before-enter ordering.

use crate::archive::{Archive, ArchiveError};
use crate::clipboard::Clipboard;
use crate::color::Color;
use crate::dock::{Dock, DockEvent, DockInput, WidgetId};
use crate::event::{DragSample, Event, Key};
use crate::notify::{Level, Notifier};
use crate::scene::{PathStyle, Scene};
use crate::tool::{DrawTool, EditTool, IdleTool, Tool, ToolKind, Transition};
use kurbo::{Point, Size};
use log::{debug, error};

/// Shared state every tool works against.
pub struct EditorCtx {
    pub scene: Scene,
    pub archive: Archive,
    /// Style applied to the next drawn path; updated as the user
    /// adjusts the drawing widgets.
    pub style: PathStyle,
    pub dock: Box<dyn Dock>,
    pub clipboard: Box<dyn Clipboard>,
    pub notifier: Box<dyn Notifier>,
}

impl EditorCtx {
    pub fn notify(&mut self, message: &str, level: Level) {
        self.notifier.notify(message, level);
    }

    /// Commit the scene's state to the archive.
    pub fn save(&mut self) {
        if let Err(err) = self.archive.save(&self.scene) {
            error!("archive save failed: {err}");
        }
    }

    pub fn undo(&mut self) {
        match self.archive.undo(&mut self.scene) {
            Ok(()) => {}
            Err(ArchiveError::NothingToUndo) => self.notify("Nothing to undo", Level::Info),
            Err(err) => {
                error!("undo failed: {err}");
                self.notify("Undo failed", Level::Error);
            }
        }
    }

    pub fn redo(&mut self) {
        match self.archive.redo(&mut self.scene) {
            Ok(()) => {}
            Err(ArchiveError::NothingToRedo) => self.notify("Nothing to redo", Level::Info),
            Err(err) => {
                error!("redo failed: {err}");
                self.notify("Redo failed", Level::Error);
            }
        }
    }
}

/// Press tracking used to turn raw motion into drag samples.
#[derive(Debug, Default)]
struct Pointer {
    pressed: bool,
    down: Point,
    last: Point,
    count: u32,
}

pub struct Editor {
    ctx: EditorCtx,
    tool: Tool,
    pointer: Pointer,
    /// Always-present picker for the backdrop color, owned by the
    /// editor rather than any tool.
    background_picker: WidgetId,
}

impl Editor {
    pub fn new(
        size: Size,
        dock: Box<dyn Dock>,
        clipboard: Box<dyn Clipboard>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        let mut ctx = EditorCtx {
            scene: Scene::new(size),
            archive: Archive::new(),
            style: PathStyle::default(),
            dock,
            clipboard,
            notifier,
        };
        // The pristine scene is the floor of the undo history.
        ctx.save();
        let background_picker = ctx.dock.spawn_picker("background color", Some(Color::BLACK));
        let tool = Tool::Idle(IdleTool::enter(&mut ctx));
        Self {
            ctx,
            tool,
            pointer: Pointer::default(),
            background_picker,
        }
    }

    pub fn pointer_down(&mut self, point: Point) {
        self.pointer = Pointer {
            pressed: true,
            down: point,
            last: point,
            count: 0,
        };
        self.dispatch(Event::PointerDown(point));
    }

    pub fn pointer_moved(&mut self, point: Point) {
        if self.pointer.pressed {
            let sample = DragSample {
                point,
                last: self.pointer.last,
                delta: point - self.pointer.last,
                count: self.pointer.count,
            };
            self.pointer.last = point;
            self.pointer.count += 1;
            self.dispatch(Event::PointerDrag(sample));
        } else {
            self.dispatch(Event::PointerMove(point));
        }
    }

    pub fn pointer_up(&mut self, point: Point) {
        let down = self.pointer.down;
        self.pointer.pressed = false;
        self.dispatch(Event::PointerUp { point, down });
    }

    pub fn key_up(&mut self, key: Key, ctrl: bool) {
        self.dispatch(Event::KeyUp { key, ctrl });
    }

    pub fn dock_input(&mut self, event: DockEvent) {
        self.dispatch(Event::Dock(event));
    }

    /// Completion of a clipboard read requested by the active tool.
    pub fn clipboard_text(&mut self, text: String) {
        self.dispatch(Event::ClipboardText(text));
    }

    pub fn scene(&self) -> &Scene {
        &self.ctx.scene
    }

    pub fn archive(&self) -> &Archive {
        &self.ctx.archive
    }

    pub fn tool_kind(&self) -> ToolKind {
        self.tool.kind()
    }

    pub fn default_style(&self) -> PathStyle {
        self.ctx.style
    }

    fn dispatch(&mut self, event: Event) {
        // The backdrop picker outlives every tool; intercept it here.
        if let Event::Dock(dock) = &event {
            if dock.widget == self.background_picker {
                if let DockInput::Color(color) = dock.input {
                    self.ctx.scene.set_background_color(color);
                    self.ctx.save();
                }
                return;
            }
        }
        if let Some(transition) = self.tool.on_event(&mut self.ctx, &event) {
            self.apply(transition);
        }
    }

    fn apply(&mut self, transition: Transition) {
        debug!("tool transition: {:?} -> {:?}", self.tool.kind(), transition);
        self.tool.exit(&mut self.ctx);
        match transition {
            Transition::ToIdle { save } => {
                self.tool = Tool::Idle(IdleTool::enter(&mut self.ctx));
                // Saving after the exit work lets the outgoing tool
                // finish shaping the scene (e.g. dropping the trailing
                // point) before the state is archived.
                if save {
                    self.ctx.save();
                }
            }
            Transition::ToDrawing { at } => {
                self.tool = Tool::Drawing(DrawTool::enter(&mut self.ctx, at));
            }
            Transition::ToEditing { select_all, paste } => {
                let mut tool = EditTool::enter(&mut self.ctx);
                if select_all {
                    tool.select_all(&mut self.ctx);
                }
                if paste {
                    tool.begin_paste(&mut self.ctx);
                }
                self.tool = Tool::Editing(tool);
            }
        }
    }
}
