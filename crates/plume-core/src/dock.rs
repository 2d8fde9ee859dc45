//! Control dock interface.
//!
//! Tools populate a host-provided dock with pickers, sliders, and
//! buttons. The dock is write-only from the core's side: spawning
//! returns a [`WidgetId`], and user input on a widget comes back through
//! the host's event stream as [`DockEvent`]s, so tools hold ids rather
//! than callbacks. Every widget a tool spawns must be removed when the
//! tool exits.

use crate::color::Color;

/// Host-assigned handle to a dock widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId(pub u64);

/// Slider configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderOpts {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub initial: f64,
    /// Echo the initial value back as a [`DockInput::Number`] event as
    /// soon as the slider exists.
    pub fire_initial: bool,
}

impl Default for SliderOpts {
    fn default() -> Self {
        Self {
            min: 1.0,
            max: 500.0,
            step: 1.0,
            initial: 1.0,
            fire_initial: false,
        }
    }
}

/// User input on a dock widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DockInput {
    Color(Color),
    Number(f64),
    Clicked,
}

/// A widget input event, delivered through the host event stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DockEvent {
    pub widget: WidgetId,
    pub input: DockInput,
}

/// The host's control dock.
pub trait Dock {
    /// Add a color picker. `initial` preloads the swatch when known.
    fn spawn_picker(&mut self, label: &str, initial: Option<Color>) -> WidgetId;

    /// Add a numeric slider.
    fn spawn_slider(&mut self, label: &str, opts: SliderOpts) -> WidgetId;

    /// Add a push button.
    fn spawn_button(&mut self, label: &str) -> WidgetId;

    /// Change a widget's label in place.
    fn set_label(&mut self, widget: WidgetId, label: &str);

    /// Remove a widget. Unknown ids are ignored.
    fn remove(&mut self, widget: WidgetId);
}
