//! The editing tool: hover-to-select, click-to-deselect, and three
//! kinds of drag (move, rotate, lasso), plus clipboard and deletion.

use super::Transition;
use crate::color::Color;
use crate::dock::{DockInput, SliderOpts, WidgetId};
use crate::editor::EditorCtx;
use crate::event::{DragSample, Event, Key};
use crate::notify::Level;
use crate::scene::{svg, Path, PathId, PathStyle, Scene};
use crate::selection::{self, Hit};
use kurbo::{Affine, Point, Vec2};

/// Translucent blue, matching the marquee of every other editor.
const LASSO_STYLE: PathStyle = PathStyle {
    stroke: Color::new(0x00, 0x66, 0xee, 0xff),
    fill: Color::new(0x00, 0x66, 0xee, 0x33),
    stroke_width: 1.0,
};

/// What an in-progress drag means. Decided on the first motion sample
/// and never revised mid-gesture.
#[derive(Debug)]
enum Drag {
    /// Translate the selected segments.
    Move { set: Vec<(PathId, usize)> },
    /// Rotate the selected segments around their centroid.
    Rotate {
        set: Vec<(PathId, usize)>,
        pivot: Point,
    },
    /// Sweep out a lasso; selection happens on release.
    Select { lasso: PathId },
}

/// The entity a hover provisionally selected, so a later miss can
/// revert exactly that selection.
#[derive(Debug, Clone, Copy)]
enum Hover {
    Path(PathId),
    Segment(PathId, usize),
}

/// Widgets shown only while something is selected.
#[derive(Debug)]
struct SelectionWidgets {
    stroke_picker: WidgetId,
    fill_picker: WidgetId,
    thickness: WidgetId,
    delete_button: WidgetId,
}

#[derive(Debug)]
pub struct EditTool {
    done_button: WidgetId,
    widgets: Option<SelectionWidgets>,
    hover: Option<Hover>,
    drag: Option<Drag>,
}

impl EditTool {
    pub fn enter(ctx: &mut EditorCtx) -> Self {
        ctx.notify("Switched to Edit mode", Level::Info);
        Self {
            done_button: ctx.dock.spawn_button("Done"),
            widgets: None,
            hover: None,
            drag: None,
        }
    }

    pub fn exit(&mut self, ctx: &mut EditorCtx) {
        ctx.scene.deselect_all();
        self.update_selected(ctx);
        ctx.notify("Leaving edit mode", Level::Info);
        ctx.dock.remove(self.done_button);
    }

    pub fn on_event(&mut self, ctx: &mut EditorCtx, event: &Event) -> Option<Transition> {
        match event {
            Event::PointerMove(point) => {
                self.hover_move(ctx, *point);
                None
            }
            Event::PointerDrag(sample) => {
                self.drag_sample(ctx, *sample);
                None
            }
            Event::PointerUp { point, down } => {
                self.pointer_up(ctx, *point, *down);
                None
            }
            Event::KeyUp { key, ctrl } => self.on_key(ctx, *key, *ctrl),
            Event::Dock(dock) => self.on_dock(ctx, dock.widget, dock.input),
            Event::ClipboardText(text) => {
                self.finish_paste(ctx, text);
                None
            }
            Event::PointerDown(_) => None,
        }
    }

    /// Select everything and show the selection widgets.
    pub fn select_all(&mut self, ctx: &mut EditorCtx) {
        selection::select_all(&mut ctx.scene);
        self.update_selected(ctx);
    }

    /// Start a paste: pasted paths replace the selection, so clear it
    /// up front, then ask the host for the clipboard text. The result
    /// arrives later as [`Event::ClipboardText`].
    pub fn begin_paste(&mut self, ctx: &mut EditorCtx) {
        ctx.scene.deselect_all();
        self.update_selected(ctx);
        ctx.clipboard.request_read();
    }

    /// Keep the selection widgets in step with whether anything is
    /// selected.
    fn update_selected(&mut self, ctx: &mut EditorCtx) {
        let any = ctx
            .scene
            .iter()
            .any(|path| path.selected && !path.is_background());
        match (&self.widgets, any) {
            (None, true) => {
                self.widgets = Some(SelectionWidgets {
                    stroke_picker: ctx.dock.spawn_picker("stroke color", None),
                    fill_picker: ctx.dock.spawn_picker("fill color", None),
                    thickness: ctx.dock.spawn_slider("thickness", SliderOpts::default()),
                    delete_button: ctx.dock.spawn_button("Delete"),
                });
            }
            (Some(widgets), false) => {
                for widget in [
                    widgets.stroke_picker,
                    widgets.fill_picker,
                    widgets.thickness,
                    widgets.delete_button,
                ] {
                    ctx.dock.remove(widget);
                }
                self.widgets = None;
            }
            _ => {}
        }
    }

    /// Hovering over an unselected entity selects it provisionally;
    /// moving off it reverts exactly that selection.
    fn hover_move(&mut self, ctx: &mut EditorCtx, point: Point) {
        match selection::hit_test(&ctx.scene, point) {
            Some(Hit::Segment { path, index }) => {
                let already = ctx
                    .scene
                    .get(path)
                    .and_then(|p| p.segments.get(index))
                    .is_some_and(|seg| seg.selected);
                if !already {
                    if let Some(p) = ctx.scene.get_mut(path) {
                        p.select_segment(index);
                    }
                    self.hover = Some(Hover::Segment(path, index));
                    self.update_selected(ctx);
                }
            }
            Some(hit) => {
                let id = hit.path();
                if !ctx.scene.get(id).is_some_and(|p| p.selected) {
                    if let Some(p) = ctx.scene.get_mut(id) {
                        p.select();
                    }
                    self.hover = Some(Hover::Path(id));
                    self.update_selected(ctx);
                }
            }
            None => {
                if let Some(hover) = self.hover.take() {
                    match hover {
                        Hover::Path(id) => {
                            if let Some(p) = ctx.scene.get_mut(id) {
                                p.deselect();
                            }
                        }
                        Hover::Segment(id, index) => {
                            if let Some(seg) = ctx
                                .scene
                                .get_mut(id)
                                .and_then(|p| p.segments.get_mut(index))
                            {
                                seg.selected = false;
                            }
                        }
                    }
                    selection::path_check(&mut ctx.scene);
                    self.update_selected(ctx);
                }
            }
        }
    }

    fn drag_sample(&mut self, ctx: &mut EditorCtx, sample: DragSample) {
        if sample.count == 0 {
            self.drag = Some(self.decide_drag(ctx, sample));
        }
        match &self.drag {
            Some(Drag::Move { set }) => {
                transform_set(&mut ctx.scene, set, Affine::translate(sample.delta));
            }
            Some(Drag::Rotate { set, pivot }) => {
                let angle = (sample.point - *pivot).atan2() - (sample.last - *pivot).atan2();
                transform_set(&mut ctx.scene, set, Affine::rotate_about(angle, *pivot));
            }
            Some(Drag::Select { lasso }) => {
                if sample.count > 0 {
                    if let Some(path) = ctx.scene.get_mut(*lasso) {
                        path.push_point(sample.point);
                    }
                }
            }
            None => {}
        }
    }

    fn decide_drag(&mut self, ctx: &mut EditorCtx, sample: DragSample) -> Drag {
        let set = selection::selected_segments(&ctx.scene);
        if selection::hit_test(&ctx.scene, sample.last).is_some() {
            Drag::Move { set }
        } else if ctx.scene.has_selection() {
            let pivot = centroid(&ctx.scene, &set).unwrap_or(sample.point);
            Drag::Rotate { set, pivot }
        } else {
            let mut lasso = Path::new(vec![sample.last, sample.point], LASSO_STYLE);
            lasso.closed = true;
            Drag::Select {
                lasso: ctx.scene.add(lasso),
            }
        }
    }

    fn pointer_up(&mut self, ctx: &mut EditorCtx, point: Point, down: Point) {
        match self.drag.take() {
            Some(Drag::Select { lasso }) => {
                if point != down {
                    selection::lasso_select(&mut ctx.scene, lasso);
                }
                ctx.scene.remove(lasso);
            }
            // A completed move or rotate is a committed mutation; the
            // archive drops it again if nothing actually changed.
            Some(Drag::Move { .. } | Drag::Rotate { .. }) => ctx.save(),
            None if point == down => self.click(ctx, point),
            None => {}
        }
        self.update_selected(ctx);
    }

    /// A plain click on hovered content confirms the hover selection;
    /// on already-selected content it deselects; on empty space it
    /// clears the whole selection.
    fn click(&mut self, ctx: &mut EditorCtx, point: Point) {
        if self.hover.take().is_some() {
            selection::path_check(&mut ctx.scene);
            return;
        }
        match selection::hit_test(&ctx.scene, point) {
            Some(Hit::Segment { path, index }) => {
                if let Some(seg) = ctx
                    .scene
                    .get_mut(path)
                    .and_then(|p| p.segments.get_mut(index))
                {
                    seg.selected = false;
                }
            }
            Some(hit) => {
                if let Some(p) = ctx.scene.get_mut(hit.path()) {
                    p.deselect();
                }
            }
            None => ctx.scene.deselect_all(),
        }
        selection::path_check(&mut ctx.scene);
    }

    fn on_key(&mut self, ctx: &mut EditorCtx, key: Key, ctrl: bool) -> Option<Transition> {
        match (key, ctrl) {
            (Key::E | Key::Escape, false) => {
                return Some(Transition::ToIdle { save: false });
            }
            (Key::C, true) => self.copy_selection(ctx),
            (Key::A, true) => self.select_all(ctx),
            (Key::V, true) => self.begin_paste(ctx),
            (Key::Z, true) => {
                ctx.undo();
                self.after_history(ctx);
            }
            (Key::Y, true) => {
                ctx.redo();
                self.after_history(ctx);
            }
            (Key::Delete, false) => self.delete_selected(ctx),
            _ => {}
        }
        None
    }

    /// History restores wipe selection and may drop hovered or dragged
    /// entities, so all transient pointer state resets.
    fn after_history(&mut self, ctx: &mut EditorCtx) {
        self.hover = None;
        self.drag = None;
        self.update_selected(ctx);
    }

    fn copy_selection(&mut self, ctx: &mut EditorCtx) {
        if !ctx.scene.has_selection() {
            ctx.notify("Nothing Selected", Level::Error);
            return;
        }
        let selected = ctx
            .scene
            .iter()
            .filter(|path| path.selected && !path.is_background());
        let text = svg::export(selected);
        ctx.clipboard.write_text(&text);
        ctx.notify("Selection Copied", Level::Success);
    }

    fn delete_selected(&mut self, ctx: &mut EditorCtx) {
        let doomed: Vec<PathId> = ctx
            .scene
            .iter()
            .filter(|path| path.selected && !path.is_background())
            .map(Path::id)
            .collect();
        if doomed.is_empty() {
            ctx.notify("Nothing Selected", Level::Error);
            return;
        }
        for id in doomed {
            ctx.scene.remove(id);
        }
        self.hover = None;
        self.update_selected(ctx);
        ctx.save();
    }

    /// Completion of a paste request. The scene may have changed since
    /// the request went out; pasted paths simply land on top of
    /// whatever is there now.
    fn finish_paste(&mut self, ctx: &mut EditorCtx, text: &str) {
        match svg::import(text) {
            Ok(paths) => {
                for mut path in paths {
                    path.smooth();
                    path.select();
                    ctx.scene.add(path);
                }
                ctx.save();
            }
            Err(err) => {
                log::debug!("paste rejected: {err}");
                ctx.notify("Didn't recognize clipboard contents", Level::Error);
            }
        }
        self.update_selected(ctx);
    }

    fn on_dock(
        &mut self,
        ctx: &mut EditorCtx,
        widget: WidgetId,
        input: DockInput,
    ) -> Option<Transition> {
        if widget == self.done_button && input == DockInput::Clicked {
            return Some(Transition::ToIdle { save: false });
        }
        let Some(widgets) = &self.widgets else {
            return None;
        };
        if widget == widgets.delete_button && input == DockInput::Clicked {
            self.delete_selected(ctx);
            return None;
        }
        let changed = match input {
            DockInput::Color(color) if widget == widgets.stroke_picker => {
                restyle_selected(&mut ctx.scene, |style| style.stroke = color)
            }
            DockInput::Color(color) if widget == widgets.fill_picker => {
                restyle_selected(&mut ctx.scene, |style| style.fill = color)
            }
            DockInput::Number(width) if widget == widgets.thickness => {
                restyle_selected(&mut ctx.scene, |style| style.stroke_width = width)
            }
            _ => false,
        };
        if changed {
            ctx.save();
        }
        None
    }
}

/// Apply a style edit to every selected path. Returns whether anything
/// was touched.
fn restyle_selected(scene: &mut Scene, edit: impl Fn(&mut PathStyle)) -> bool {
    let mut touched = false;
    for path in scene.iter_mut() {
        if path.selected && !path.is_background() {
            edit(&mut path.style);
            touched = true;
        }
    }
    touched
}

/// Transform the segments in `set` and re-smooth the paths they belong
/// to.
fn transform_set(scene: &mut Scene, set: &[(PathId, usize)], affine: Affine) {
    for (id, index) in set {
        if let Some(seg) = scene
            .get_mut(*id)
            .and_then(|path| path.segments.get_mut(*index))
        {
            seg.point = affine * seg.point;
        }
    }
    let mut touched: Vec<PathId> = set.iter().map(|(id, _)| *id).collect();
    touched.dedup();
    for id in touched {
        if let Some(path) = scene.get_mut(id) {
            path.smooth();
        }
    }
}

/// Mean position of the segments in `set`.
fn centroid(scene: &Scene, set: &[(PathId, usize)]) -> Option<Point> {
    let mut sum = Vec2::ZERO;
    let mut n = 0.0;
    for (id, index) in set {
        if let Some(seg) = scene.get(*id).and_then(|path| path.segments.get(*index)) {
            sum += seg.point.to_vec2();
            n += 1.0;
        }
    }
    (n > 0.0).then(|| (sum / n).to_point())
}
