//! Hit testing and selection bookkeeping.

use crate::scene::{PathId, Scene};
use kurbo::Point;

/// How close the pointer must be, in scene units, for a segment handle
/// or stroke to count as hit.
pub const HIT_TOLERANCE: f64 = 5.0;

/// Result of probing the scene at a point, most specific first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// A segment handle of a path.
    Segment { path: PathId, index: usize },
    /// The stroked outline of a path.
    Stroke(PathId),
    /// The filled interior of a path.
    Fill(PathId),
}

impl Hit {
    pub fn path(&self) -> PathId {
        match *self {
            Hit::Segment { path, .. } | Hit::Stroke(path) | Hit::Fill(path) => path,
        }
    }
}

/// Probe the scene at `point`, front to back.
///
/// Per path, segment handles win over the stroke, the stroke over the
/// fill; a hit on a front path shadows everything behind it. The
/// background never hit-tests.
pub fn hit_test(scene: &Scene, point: Point) -> Option<Hit> {
    for path in scene.iter().rev() {
        if path.is_background() {
            continue;
        }
        if let Some(index) = path.nearest_segment(point, HIT_TOLERANCE) {
            return Some(Hit::Segment {
                path: path.id(),
                index,
            });
        }
        if path.hit_stroke(point, HIT_TOLERANCE) {
            return Some(Hit::Stroke(path.id()));
        }
        if path.style.fill.is_visible() && path.contains(point) {
            return Some(Hit::Fill(path.id()));
        }
    }
    None
}

/// Restore the selection invariant: a path whose segments are all
/// unselected must not stay flagged. Run after any operation that
/// clears segment flags.
pub fn path_check(scene: &mut Scene) {
    for path in scene.iter_mut() {
        if path.selected && path.segments.iter().all(|seg| !seg.selected) {
            path.selected = false;
        }
    }
}

/// Select every path except the background.
pub fn select_all(scene: &mut Scene) {
    for path in scene.iter_mut() {
        if !path.is_background() {
            path.select();
        }
    }
}

/// All selected segments as `(path, index)` pairs, in scene order.
pub fn selected_segments(scene: &Scene) -> Vec<(PathId, usize)> {
    scene
        .iter()
        .filter(|path| path.selected)
        .flat_map(|path| {
            let id = path.id();
            path.segments
                .iter()
                .enumerate()
                .filter(|(_, seg)| seg.selected)
                .map(move |(i, _)| (id, i))
        })
        .collect()
}

/// Select every segment whose point falls inside the lasso path's
/// polygon. Partial enclosure selects only the enclosed segments.
pub fn lasso_select(scene: &mut Scene, lasso: PathId) {
    let Some(outline) = scene.get(lasso).map(|path| path.outline()) else {
        return;
    };
    use kurbo::Shape as _;
    for path in scene.iter_mut() {
        if path.is_background() || path.id() == lasso {
            continue;
        }
        for seg in &mut path.segments {
            if outline.contains(seg.point) {
                seg.selected = true;
                path.selected = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::scene::{Path, PathStyle};
    use kurbo::Size;

    fn scene_with(paths: Vec<Path>) -> Scene {
        let mut scene = Scene::new(Size::new(200.0, 200.0));
        for path in paths {
            scene.add(path);
        }
        scene
    }

    fn square(origin: Point, side: f64, style: PathStyle) -> Path {
        let mut path = Path::new(
            vec![
                origin,
                Point::new(origin.x + side, origin.y),
                Point::new(origin.x + side, origin.y + side),
                Point::new(origin.x, origin.y + side),
            ],
            style,
        );
        path.closed = true;
        path
    }

    fn filled() -> PathStyle {
        PathStyle {
            stroke: Color::WHITE,
            fill: Color::opaque(40, 40, 40),
            stroke_width: 2.0,
        }
    }

    #[test]
    fn test_hit_priority_within_path() {
        let scene = scene_with(vec![square(Point::new(10.0, 10.0), 50.0, filled())]);
        let id = scene.iter().last().unwrap().id();

        // Near a corner: the segment handle wins.
        assert_eq!(
            hit_test(&scene, Point::new(11.0, 12.0)),
            Some(Hit::Segment { path: id, index: 0 })
        );
        // On an edge, away from corners: the stroke.
        assert_eq!(
            hit_test(&scene, Point::new(35.0, 10.0)),
            Some(Hit::Stroke(id))
        );
        // Deep inside: the fill.
        assert_eq!(
            hit_test(&scene, Point::new(35.0, 35.0)),
            Some(Hit::Fill(id))
        );
        // Nowhere near (and the background is never reported).
        assert_eq!(hit_test(&scene, Point::new(150.0, 150.0)), None);
    }

    #[test]
    fn test_front_path_shadows_back() {
        let back = square(Point::new(10.0, 10.0), 80.0, filled());
        let front = square(Point::new(30.0, 30.0), 20.0, filled());
        let front_id = front.id();
        let scene = scene_with(vec![back, front]);

        assert_eq!(
            hit_test(&scene, Point::new(40.0, 40.0)),
            Some(Hit::Fill(front_id))
        );
    }

    #[test]
    fn test_invisible_fill_ignored() {
        let mut style = filled();
        style.fill = Color::TRANSPARENT;
        let scene = scene_with(vec![square(Point::new(10.0, 10.0), 50.0, style)]);
        assert_eq!(hit_test(&scene, Point::new(35.0, 35.0)), None);
    }

    #[test]
    fn test_path_check() {
        let mut scene = scene_with(vec![square(Point::new(0.0, 0.0), 10.0, filled())]);
        let id = scene.iter().last().unwrap().id();

        let path = scene.get_mut(id).unwrap();
        path.select();
        for seg in &mut path.segments {
            seg.selected = false;
        }
        assert!(scene.get(id).unwrap().selected);

        path_check(&mut scene);
        assert!(!scene.get(id).unwrap().selected);
    }

    #[test]
    fn test_select_all_skips_background() {
        let mut scene = scene_with(vec![square(Point::new(0.0, 0.0), 10.0, filled())]);
        select_all(&mut scene);
        for path in scene.iter() {
            assert_eq!(path.selected, !path.is_background());
        }
    }

    #[test]
    fn test_selected_segments() {
        let mut scene = scene_with(vec![square(Point::new(0.0, 0.0), 10.0, filled())]);
        let id = scene.iter().last().unwrap().id();
        scene.get_mut(id).unwrap().select_segment(2);

        assert_eq!(selected_segments(&scene), vec![(id, 2)]);
    }

    #[test]
    fn test_lasso_partial_enclosure() {
        let mut scene = scene_with(vec![square(Point::new(10.0, 10.0), 100.0, filled())]);
        let target = scene.iter().last().unwrap().id();

        // Lasso around the top-left corner only.
        let lasso = scene.add(square(
            Point::new(0.0, 0.0),
            30.0,
            PathStyle::default(),
        ));
        lasso_select(&mut scene, lasso);

        let path = scene.get(target).unwrap();
        assert!(path.selected);
        let flags: Vec<bool> = path.segments.iter().map(|s| s.selected).collect();
        assert_eq!(flags, vec![true, false, false, false]);
        assert!(!scene.background().unwrap().selected);
        assert!(!scene.get(lasso).unwrap().selected);
    }
}
