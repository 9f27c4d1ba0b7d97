//! Integration tests: snapshot undo/redo through the design surface.
//!
//! Drives `DesignSurface` with real pointer input over a tiny-skia
//! surface and checks pixel content after restores settle.

use pretty_assertions::assert_eq;
use vc_core::{SurfaceConfig, ToolMode};
use vc_editor::{DesignSurface, InputEvent};
use vc_render::{FixedElement, Snapshot};

fn drawing_surface(width: f32, height: f32) -> DesignSurface {
    let _ = env_logger::builder().is_test(true).try_init();
    let config = SurfaceConfig {
        brush_color: "#ff0000".into(),
        brush_size: 4.0,
        tool: ToolMode::Draw,
        ..SurfaceConfig::default()
    };
    let mut surface = DesignSurface::new(config).unwrap();
    surface.attach(&FixedElement::new(width, height, 1.0)).unwrap();
    surface
}

fn stroke(surface: &mut DesignSurface, from: (f32, f32), to: (f32, f32)) {
    surface.handle_event(&InputEvent::pointer_down(from.0, from.1, 1));
    surface.handle_event(&InputEvent::pointer_move(to.0, to.1, 1));
    surface.handle_event(&InputEvent::pointer_up(to.0, to.1, 1));
}

fn snapshot(surface: &DesignSurface) -> Snapshot {
    surface.capture_snapshot().unwrap()
}

fn is_blank(surface: &DesignSurface) -> bool {
    snapshot(surface).ink_bytes().iter().all(|b| *b == 0)
}

fn ink_rgba(surface: &DesignSurface, x: u32, y: u32) -> (u8, u8, u8, u8) {
    let px = surface.surface().unwrap().ink().pixel(x, y).unwrap();
    (px.red(), px.green(), px.blue(), px.alpha())
}

// ─── Example scenario ───────────────────────────────────────────────────

#[test]
fn red_line_undo_redo_roundtrip() {
    let mut surface = drawing_surface(400.0, 300.0);
    assert!(is_blank(&surface));

    stroke(&mut surface, (10.0, 10.0), (10.0, 50.0));
    assert_eq!(ink_rgba(&surface, 10, 30), (255, 0, 0, 255));
    let drawn = snapshot(&surface);

    assert!(surface.undo().is_some());
    surface.settle_restores();
    assert!(is_blank(&surface), "undo should return to a blank surface");

    assert!(surface.redo().is_some());
    surface.settle_restores();
    assert!(snapshot(&surface).same_pixels(&drawn), "redo should restore the segment unchanged");
}

#[test]
fn redraw_shows_restored_state() {
    let mut surface = drawing_surface(100.0, 100.0);
    stroke(&mut surface, (10.0, 10.0), (10.0, 50.0));
    surface.undo();

    // Restore is pending until something settles it.
    assert_eq!(surface.pending_restores(), 1);
    assert!(surface.redraw());
    assert_eq!(surface.pending_restores(), 0);
    let px = surface.surface().unwrap().frame().pixel(10, 30).unwrap();
    assert_eq!(px.alpha(), 0);
}

// ─── Properties ─────────────────────────────────────────────────────────

#[test]
fn undo_n_then_redo_n_is_pixel_identical() {
    let mut surface = drawing_surface(200.0, 200.0);
    for i in 0..5 {
        let x = 20.0 + i as f32 * 30.0;
        stroke(&mut surface, (x, 20.0), (x, 120.0));
    }
    let last = snapshot(&surface);

    for _ in 0..5 {
        assert!(surface.undo().is_some());
        surface.settle_restores();
    }
    assert!(is_blank(&surface));

    for _ in 0..5 {
        assert!(surface.redo().is_some());
        surface.settle_restores();
    }
    assert!(snapshot(&surface).same_pixels(&last));
}

#[test]
fn rapid_undo_redo_without_settling_stays_symmetric() {
    let mut surface = drawing_surface(200.0, 200.0);
    for i in 0..3 {
        let x = 20.0 + i as f32 * 40.0;
        stroke(&mut surface, (x, 20.0), (x, 120.0));
    }
    let last = snapshot(&surface);

    for _ in 0..3 {
        surface.undo();
    }
    for _ in 0..3 {
        surface.redo();
    }
    assert_eq!(surface.pending_restores(), 6);
    surface.settle_restores();
    assert!(snapshot(&surface).same_pixels(&last));
    assert_eq!((surface.undo_len(), surface.redo_len()), (3, 0));
}

#[test]
fn new_action_after_undo_discards_redo() {
    let mut surface = drawing_surface(200.0, 200.0);
    stroke(&mut surface, (20.0, 20.0), (20.0, 80.0));
    stroke(&mut surface, (60.0, 20.0), (60.0, 80.0));

    surface.undo();
    assert!(surface.can_redo());

    stroke(&mut surface, (100.0, 20.0), (100.0, 80.0));
    assert_eq!(surface.redo_len(), 0);
    assert_eq!(surface.redo(), None);
}

#[test]
fn history_is_bounded_with_fifo_eviction() {
    let mut surface = drawing_surface(400.0, 100.0);
    let limit = surface.config().history_limit;
    assert_eq!(limit, 20);

    for i in 0..(limit + 5) {
        let x = 6.0 + i as f32 * 12.0;
        stroke(&mut surface, (x, 10.0), (x, 60.0));
    }
    assert_eq!(surface.undo_len(), limit);

    for _ in 0..limit {
        surface.undo();
    }
    surface.settle_restores();
    assert!(!surface.can_undo());
    // The five oldest pre-states were evicted: the earliest reachable
    // state still holds the first five strokes.
    assert_eq!(ink_rgba(&surface, 6, 30).3, 255);
    assert_eq!(ink_rgba(&surface, 6 + 4 * 12, 30).3, 255);
    assert_eq!(ink_rgba(&surface, 6 + 5 * 12, 30).3, 0);
}

#[test]
fn undo_on_empty_history_is_a_noop() {
    let mut surface = drawing_surface(50.0, 50.0);
    assert_eq!(surface.undo(), None);
    assert_eq!(surface.redo(), None);
    assert_eq!(surface.pending_restores(), 0);
}

// ─── Restore ordering ───────────────────────────────────────────────────

#[test]
fn stale_restore_completion_is_discarded() {
    let mut surface = drawing_surface(100.0, 100.0);
    stroke(&mut surface, (20.0, 10.0), (20.0, 60.0));
    stroke(&mut surface, (60.0, 10.0), (60.0, 60.0));

    let first = surface.undo().unwrap();
    let second = surface.undo().unwrap();

    // The newest request lands first and wins.
    assert!(surface.complete_restore(second));
    assert!(is_blank(&surface));

    // The superseded one arriving late paints nothing.
    assert!(!surface.complete_restore(first));
    assert!(is_blank(&surface));
}

#[test]
fn older_restore_completing_first_is_ignored() {
    let mut surface = drawing_surface(100.0, 100.0);
    stroke(&mut surface, (20.0, 10.0), (20.0, 60.0));
    stroke(&mut surface, (60.0, 10.0), (60.0, 60.0));
    let live = snapshot(&surface);

    let first = surface.undo().unwrap();
    let second = surface.undo().unwrap();

    assert!(!surface.complete_restore(first));
    assert!(snapshot(&surface).same_pixels(&live));
    assert!(surface.complete_restore(second));
    assert!(is_blank(&surface));
}

#[test]
fn drawing_settles_pending_restores_first() {
    let mut surface = drawing_surface(100.0, 100.0);
    stroke(&mut surface, (20.0, 10.0), (20.0, 60.0));
    surface.undo();

    stroke(&mut surface, (60.0, 10.0), (60.0, 60.0));
    assert_eq!(surface.pending_restores(), 0);
    // The undone stroke stays gone; only the new one is present.
    assert_eq!(ink_rgba(&surface, 20, 30).3, 0);
    assert_eq!(ink_rgba(&surface, 60, 30).3, 255);
}

// ─── Clear ──────────────────────────────────────────────────────────────

#[test]
fn clear_is_undoable() {
    let mut surface = drawing_surface(100.0, 100.0);
    stroke(&mut surface, (20.0, 10.0), (20.0, 60.0));
    let drawn = snapshot(&surface);

    assert!(surface.clear());
    assert!(is_blank(&surface));

    surface.undo();
    surface.settle_restores();
    assert!(snapshot(&surface).same_pixels(&drawn));
}
