//! Scene model: freeform paths of segments plus the backdrop.
//!
//! The scene is mutable shared state: whichever tool is active reads and
//! writes it directly, and the archive serializes the whole of it as an
//! opaque snapshot. Storage is an ordered `Vec` (insertion order is
//! z-order, back to front) so snapshots serialize deterministically and
//! the archive's dedup-by-comparison works.

pub mod svg;

use crate::color::Color;
use kurbo::{Affine, BezPath, Point, Shape as _, Size, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a path.
pub type PathId = Uuid;

/// Name of the non-editable backdrop path.
pub const BACKGROUND_NAME: &str = "background";

/// Stroke and fill styling for a path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathStyle {
    pub stroke: Color,
    pub fill: Color,
    pub stroke_width: f64,
}

impl Default for PathStyle {
    fn default() -> Self {
        // The original editor's defaults: white stroke, transparent fill.
        Self {
            stroke: Color::WHITE,
            fill: Color::new(255, 255, 255, 0),
            stroke_width: 1.0,
        }
    }
}

/// A geometry-bearing point of a path.
///
/// Order within the owning path is significant and preserved across
/// undo/redo. The `selected` flag is live UI state and is never
/// serialized into snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub point: Point,
    #[serde(skip)]
    pub selected: bool,
}

impl Segment {
    pub fn new(point: Point) -> Self {
        Self {
            point,
            selected: false,
        }
    }
}

/// An ordered sequence of segments with styling and a closed/open flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Path {
    id: PathId,
    /// Optional name; [`BACKGROUND_NAME`] marks the backdrop.
    pub name: Option<String>,
    pub segments: Vec<Segment>,
    pub closed: bool,
    pub style: PathStyle,
    /// Live selection flag, never serialized. Invariant: a path is
    /// selected iff at least one of its segments is selected; see
    /// [`crate::selection::path_check`].
    #[serde(skip)]
    pub selected: bool,
    /// Smoothed curve cache, rebuilt by [`Path::smooth`].
    #[serde(skip)]
    curve: Option<BezPath>,
}

impl Path {
    pub fn new(points: Vec<Point>, style: PathStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: None,
            segments: points.into_iter().map(Segment::new).collect(),
            closed: false,
            style,
            selected: false,
            curve: None,
        }
    }

    pub fn id(&self) -> PathId {
        self.id
    }

    pub fn is_background(&self) -> bool {
        self.name.as_deref() == Some(BACKGROUND_NAME)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Append a point at the end of the path.
    pub fn push_point(&mut self, point: Point) {
        self.segments.push(Segment::new(point));
    }

    /// Remove and return the trailing point.
    pub fn pop_point(&mut self) -> Option<Point> {
        self.segments.pop().map(|seg| seg.point)
    }

    /// Reposition the trailing point.
    pub fn set_last_point(&mut self, point: Point) {
        if let Some(seg) = self.segments.last_mut() {
            seg.point = point;
        }
    }

    /// Select the whole path: its own flag and every segment.
    pub fn select(&mut self) {
        self.selected = true;
        for seg in &mut self.segments {
            seg.selected = true;
        }
    }

    /// Clear the path's flag and every segment's flag.
    pub fn deselect(&mut self) {
        self.selected = false;
        for seg in &mut self.segments {
            seg.selected = false;
        }
    }

    /// Select one segment, keeping the path flag in sync.
    pub fn select_segment(&mut self, index: usize) {
        if let Some(seg) = self.segments.get_mut(index) {
            seg.selected = true;
            self.selected = true;
        }
    }

    /// Apply an affine transform to every segment point.
    pub fn transform(&mut self, affine: Affine) {
        for seg in &mut self.segments {
            seg.point = affine * seg.point;
        }
    }

    /// Index of the closest segment within `tolerance` of `point`.
    pub fn nearest_segment(&self, point: Point, tolerance: f64) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, seg) in self.segments.iter().enumerate() {
            let d2 = (seg.point - point).hypot2();
            if d2 <= tolerance * tolerance && best.is_none_or(|(_, b)| d2 < b) {
                best = Some((i, d2));
            }
        }
        best.map(|(i, _)| i)
    }

    /// Whether `point` lies on the stroked outline, within `tolerance`
    /// plus half the stroke width (the polyline between segment points;
    /// closed paths include the closing edge).
    pub fn hit_stroke(&self, point: Point, tolerance: f64) -> bool {
        if !self.style.stroke.is_visible() || self.segments.len() < 2 {
            return false;
        }
        let reach = tolerance + self.style.stroke_width / 2.0;
        let n = self.segments.len();
        let edges = if self.closed { n } else { n - 1 };
        for i in 0..edges {
            let a = self.segments[i].point;
            let b = self.segments[(i + 1) % n].point;
            if segment_distance(point, a, b) <= reach {
                return true;
            }
        }
        false
    }

    /// Whether `point` lies inside the path's interior. Open paths are
    /// implicitly closed for this test, as fills are.
    pub fn contains(&self, point: Point) -> bool {
        if self.segments.len() < 3 {
            return false;
        }
        self.outline().contains(point)
    }

    /// The path's polygon outline (straight edges, always closed).
    pub fn outline(&self) -> BezPath {
        let mut path = BezPath::new();
        if let Some(first) = self.segments.first() {
            path.move_to(first.point);
            for seg in &self.segments[1..] {
                path.line_to(seg.point);
            }
            path.close_path();
        }
        path
    }

    /// Recompute the smoothed curve through the segment points.
    ///
    /// Catmull-Rom spline converted to cubic beziers, wrapping around for
    /// closed paths. Callers re-smooth after editing geometry; the cache
    /// is not invalidated automatically.
    pub fn smooth(&mut self) {
        const TENSION: f64 = 0.5;

        let pts: Vec<Point> = self.segments.iter().map(|seg| seg.point).collect();
        let mut curve = BezPath::new();
        let n = pts.len();
        if n >= 2 {
            curve.move_to(pts[0]);
            let edges = if self.closed { n } else { n - 1 };
            for i in 0..edges {
                let p0 = if i == 0 {
                    if self.closed { pts[n - 1] } else { pts[0] }
                } else {
                    pts[i - 1]
                };
                let p1 = pts[i];
                let p2 = pts[(i + 1) % n];
                let p3 = if i + 2 < n {
                    pts[i + 2]
                } else if self.closed {
                    pts[(i + 2) % n]
                } else {
                    pts[n - 1]
                };

                let t1 = (p2 - p0) * TENSION;
                let t2 = (p3 - p1) * TENSION;
                let cp1 = p1 + t1 / 3.0;
                let cp2 = p2 - t2 / 3.0;
                curve.curve_to(cp1, cp2, p2);
            }
            if self.closed {
                curve.close_path();
            }
        }
        self.curve = Some(curve);
    }

    /// The curve last computed by [`Path::smooth`], if any.
    pub fn smoothed(&self) -> Option<&BezPath> {
        self.curve.as_ref()
    }
}

/// Distance from `point` to the line segment `a`-`b`.
fn segment_distance(point: Point, a: Point, b: Point) -> f64 {
    let line: Vec2 = b - a;
    let len2 = line.hypot2();
    if len2 < f64::EPSILON {
        return (point - a).hypot();
    }
    // Project onto the segment, clamped to its ends.
    let t = ((point - a).dot(line) / len2).clamp(0.0, 1.0);
    let projection = a + line * t;
    (point - projection).hypot()
}

/// All drawable entities, back to front.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    paths: Vec<Path>,
}

impl Scene {
    /// Create a scene with a full-canvas backdrop path.
    pub fn new(size: Size) -> Self {
        let mut background = Path::new(
            vec![
                Point::ZERO,
                Point::new(size.width, 0.0),
                Point::new(size.width, size.height),
                Point::new(0.0, size.height),
            ],
            PathStyle {
                stroke: Color::TRANSPARENT,
                fill: Color::BLACK,
                stroke_width: 0.0,
            },
        );
        background.name = Some(BACKGROUND_NAME.to_string());
        background.closed = true;

        let mut scene = Self::default();
        scene.add(background);
        scene
    }

    /// Insert a path on top of everything else, returning its id.
    pub fn add(&mut self, path: Path) -> PathId {
        let id = path.id();
        self.paths.push(path);
        id
    }

    pub fn remove(&mut self, id: PathId) -> Option<Path> {
        let index = self.paths.iter().position(|p| p.id() == id)?;
        Some(self.paths.remove(index))
    }

    pub fn get(&self, id: PathId) -> Option<&Path> {
        self.paths.iter().find(|p| p.id() == id)
    }

    pub fn get_mut(&mut self, id: PathId) -> Option<&mut Path> {
        self.paths.iter_mut().find(|p| p.id() == id)
    }

    /// Paths in z-order, back to front.
    pub fn iter(&self) -> std::slice::Iter<'_, Path> {
        self.paths.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Path> {
        self.paths.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn clear(&mut self) {
        self.paths.clear();
    }

    pub fn background(&self) -> Option<&Path> {
        self.paths.iter().find(|p| p.is_background())
    }

    pub fn set_background_color(&mut self, color: Color) {
        if let Some(background) = self.paths.iter_mut().find(|p| p.is_background()) {
            background.style.fill = color;
        }
    }

    /// Whether anything in the scene is selected.
    pub fn has_selection(&self) -> bool {
        self.paths.iter().any(|p| p.selected)
    }

    /// Clear every selection flag, path and segment alike.
    pub fn deselect_all(&mut self) {
        for path in &mut self.paths {
            path.deselect();
        }
    }

    /// Serialize the whole scene. Selection flags are excluded, so two
    /// scenes differing only in selection produce identical snapshots.
    pub fn to_snapshot(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Replace the scene's contents with a deserialized snapshot.
    pub fn load_snapshot(&mut self, snapshot: &str) -> Result<(), serde_json::Error> {
        *self = serde_json::from_str(snapshot)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Path {
        Path::new(
            vec![
                Point::new(0.0, 0.0),
                Point::new(100.0, 0.0),
                Point::new(50.0, 80.0),
            ],
            PathStyle::default(),
        )
    }

    #[test]
    fn test_scene_has_backdrop() {
        let scene = Scene::new(Size::new(800.0, 600.0));
        let background = scene.background().expect("backdrop missing");
        assert!(background.is_background());
        assert!(background.closed);
        assert_eq!(background.style.fill, Color::BLACK);
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_add_remove() {
        let mut scene = Scene::new(Size::new(100.0, 100.0));
        let id = scene.add(triangle());
        assert_eq!(scene.len(), 2);
        assert!(scene.get(id).is_some());

        let removed = scene.remove(id);
        assert!(removed.is_some());
        assert!(scene.get(id).is_none());
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut scene = Scene::new(Size::new(100.0, 100.0));
        let id = scene.add(triangle());

        let snapshot = scene.to_snapshot().unwrap();
        let mut restored = Scene::default();
        restored.load_snapshot(&snapshot).unwrap();

        assert_eq!(restored.len(), 2);
        let path = restored.get(id).expect("path lost in round trip");
        assert_eq!(path.len(), 3);
        assert_eq!(path.style, PathStyle::default());
    }

    #[test]
    fn test_snapshot_excludes_selection() {
        let mut scene = Scene::new(Size::new(100.0, 100.0));
        let id = scene.add(triangle());
        let plain = scene.to_snapshot().unwrap();

        scene.get_mut(id).unwrap().select();
        let selected = scene.to_snapshot().unwrap();
        assert_eq!(plain, selected);

        let mut restored = Scene::default();
        restored.load_snapshot(&selected).unwrap();
        assert!(!restored.has_selection());
    }

    #[test]
    fn test_nearest_segment() {
        let path = triangle();
        assert_eq!(path.nearest_segment(Point::new(2.0, 2.0), 5.0), Some(0));
        assert_eq!(path.nearest_segment(Point::new(98.0, 1.0), 5.0), Some(1));
        assert_eq!(path.nearest_segment(Point::new(50.0, 40.0), 5.0), None);
    }

    #[test]
    fn test_hit_stroke() {
        let mut path = triangle();
        // Midpoint of the first edge.
        assert!(path.hit_stroke(Point::new(50.0, 3.0), 5.0));
        assert!(!path.hit_stroke(Point::new(50.0, 30.0), 5.0));

        // The closing edge only counts once the path is closed.
        let on_closing_edge = Point::new(25.0, 40.0);
        assert!(!path.hit_stroke(on_closing_edge, 5.0));
        path.closed = true;
        assert!(path.hit_stroke(on_closing_edge, 5.0));
    }

    #[test]
    fn test_contains() {
        let path = triangle();
        assert!(path.contains(Point::new(50.0, 20.0)));
        assert!(!path.contains(Point::new(5.0, 70.0)));
    }

    #[test]
    fn test_smooth_open_and_closed() {
        let mut path = triangle();
        path.smooth();
        // Open: one cubic per edge.
        let open_elements = path.smoothed().unwrap().elements().len();
        assert_eq!(open_elements, 1 + 2); // move + 2 curves

        path.closed = true;
        path.smooth();
        let closed_elements = path.smoothed().unwrap().elements().len();
        assert_eq!(closed_elements, 1 + 3 + 1); // move + 3 curves + close
    }

    #[test]
    fn test_transform() {
        let mut path = triangle();
        path.transform(Affine::translate(Vec2::new(10.0, -5.0)));
        assert_eq!(path.segments[0].point, Point::new(10.0, -5.0));
        assert_eq!(path.segments[2].point, Point::new(60.0, 75.0));
    }

    #[test]
    fn test_selection_helpers() {
        let mut path = triangle();
        path.select_segment(1);
        assert!(path.selected);
        assert!(path.segments[1].selected);
        assert!(!path.segments[0].selected);

        path.deselect();
        assert!(!path.selected);
        assert!(path.segments.iter().all(|s| !s.selected));
    }
}
