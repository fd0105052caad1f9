//! Pointer interaction between the icon palette and the scene.

use crate::resources::{IconKind, IconPalette};
use crate::scene::{IconId, SceneSurface};

/// What a primary press on the canvas did.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PressOutcome {
    /// The armed palette icon was stamped at the press point.
    Added(IconId),
    /// An existing icon was grabbed and will follow drags.
    DragStarted(IconId),
    Missed,
}

/// Tracks the armed palette icon and the current drag session.
///
/// The armed icon stays armed after stamping so the same icon can be placed
/// repeatedly; selecting `None` returns the canvas to drag mode.
#[derive(Debug, Clone)]
pub struct IconPaletteController {
    palette: IconPalette,
    armed: Option<IconKind>,
    dragging: Option<IconId>,
}

impl IconPaletteController {
    pub fn new(palette: IconPalette) -> Self {
        Self {
            palette,
            armed: None,
            dragging: None,
        }
    }

    pub fn palette(&self) -> &IconPalette {
        &self.palette
    }

    pub fn armed(&self) -> Option<IconKind> {
        self.armed
    }

    /// Arms an icon for the next press. Kinds missing from the palette disarm.
    pub fn select_icon(&mut self, kind: Option<IconKind>) {
        self.armed = kind.filter(|k| self.palette.get(*k).is_some());
    }

    pub fn dragging(&self) -> Option<IconId> {
        self.dragging
    }

    pub fn on_canvas_press(&mut self, scene: &mut SceneSurface, x: i32, y: i32) -> PressOutcome {
        self.dragging = None;

        if let Some(entry) = self.armed.and_then(|kind| self.palette.get(kind)) {
            let id = scene.add_icon(entry.bitmap.clone(), x, y);
            return PressOutcome::Added(id);
        }

        match scene.find_icon_at(x, y) {
            Some(id) => {
                self.dragging = Some(id);
                PressOutcome::DragStarted(id)
            }
            None => PressOutcome::Missed,
        }
    }

    /// Moves the grabbed icon by the pointer delta. Returns whether anything moved.
    pub fn on_canvas_drag(&mut self, scene: &mut SceneSurface, dx: i32, dy: i32) -> bool {
        let Some(id) = self.dragging else {
            return false;
        };
        if scene.move_icon(id, dx, dy) {
            true
        } else {
            // The icon vanished mid-drag (e.g. the picture was cleared).
            self.dragging = None;
            false
        }
    }

    pub fn on_canvas_release(&mut self) {
        self.dragging = None;
    }

    /// Secondary press: deletes the topmost icon under the pointer.
    pub fn on_canvas_remove(&mut self, scene: &mut SceneSurface, x: i32, y: i32) -> bool {
        self.dragging = None;
        scene.remove_icon_at(x, y).is_some()
    }

    /// Forgets any drag in progress; the armed icon is kept.
    pub fn reset(&mut self) {
        self.dragging = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> IconPaletteController {
        IconPaletteController::new(IconPalette::bundled())
    }

    #[test]
    fn armed_press_stamps_and_stays_armed() {
        let mut scene = SceneSurface::new();
        let mut ctl = controller();
        ctl.select_icon(Some(IconKind::Star));

        assert!(matches!(ctl.on_canvas_press(&mut scene, 50, 50), PressOutcome::Added(_)));
        assert!(matches!(ctl.on_canvas_press(&mut scene, 150, 50), PressOutcome::Added(_)));
        assert_eq!(scene.icon_count(), 2);
        assert_eq!(ctl.armed(), Some(IconKind::Star));
        assert_eq!(ctl.dragging(), None);
    }

    #[test]
    fn unarmed_press_grabs_and_drags_topmost_icon() {
        let mut scene = SceneSurface::new();
        let mut ctl = controller();
        ctl.select_icon(Some(IconKind::Heart));
        ctl.on_canvas_press(&mut scene, 100, 100);
        ctl.select_icon(None);

        let PressOutcome::DragStarted(id) = ctl.on_canvas_press(&mut scene, 105, 95) else {
            panic!("expected a drag");
        };
        assert!(ctl.on_canvas_drag(&mut scene, 10, 0));
        assert!(ctl.on_canvas_drag(&mut scene, 5, 5));
        assert_eq!(scene.icon(id).map(|i| i.center()), Some((115, 105)));

        ctl.on_canvas_release();
        assert!(!ctl.on_canvas_drag(&mut scene, 10, 10));
        assert_eq!(scene.icon(id).map(|i| i.center()), Some((115, 105)));
    }

    #[test]
    fn press_on_empty_canvas_misses() {
        let mut scene = SceneSurface::new();
        let mut ctl = controller();
        assert_eq!(ctl.on_canvas_press(&mut scene, 10, 10), PressOutcome::Missed);
        assert!(!ctl.on_canvas_drag(&mut scene, 1, 1));
    }

    #[test]
    fn drag_ends_when_icon_disappears() {
        let mut scene = SceneSurface::new();
        let mut ctl = controller();
        ctl.select_icon(Some(IconKind::Sun));
        ctl.on_canvas_press(&mut scene, 60, 60);
        ctl.select_icon(None);
        ctl.on_canvas_press(&mut scene, 60, 60);
        scene.clear();
        assert!(!ctl.on_canvas_drag(&mut scene, 3, 3));
        assert_eq!(ctl.dragging(), None);
    }

    #[test]
    fn secondary_press_removes_icon() {
        let mut scene = SceneSurface::new();
        let mut ctl = controller();
        ctl.select_icon(Some(IconKind::Flower));
        ctl.on_canvas_press(&mut scene, 60, 60);
        assert!(ctl.on_canvas_remove(&mut scene, 60, 60));
        assert!(!ctl.on_canvas_remove(&mut scene, 60, 60));
        assert_eq!(scene.icon_count(), 0);
    }
}
