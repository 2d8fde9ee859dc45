//! Plume Core Library
//!
//! Platform-agnostic interaction core for the Plume freeform vector
//! editor: scene model, snapshot archive, hit-test and selection
//! engine, and the Idle/Drawing/Editing tool state machine. Hosts
//! supply the control dock, clipboard, and notification surfaces
//! through the trait interfaces and feed input to [`Editor`].

pub mod archive;
pub mod clipboard;
pub mod color;
pub mod dock;
pub mod editor;
pub mod event;
pub mod notify;
pub mod scene;
pub mod selection;
pub mod tool;

pub use archive::{Archive, ArchiveError};
pub use clipboard::Clipboard;
pub use color::Color;
pub use dock::{Dock, DockEvent, DockInput, SliderOpts, WidgetId};
pub use editor::{Editor, EditorCtx};
pub use event::{DragSample, Event, Key};
pub use notify::{Level, LogNotifier, Notifier};
pub use scene::{Path, PathId, PathStyle, Scene, Segment};
pub use selection::{Hit, HIT_TOLERANCE};
pub use tool::{Tool, ToolKind, Transition};
