//! End-to-end sculpting scenarios driven through `SculptSession`.
//!
//! Each test exercises the public control surface the way the UI does:
//! begin/move/end strokes, undo/redo, and export.

use glam::Vec3;
use sculpting::constants::{INTENSITY_SCALE, MAX_HISTORY};
use sculpting::{
    Brush, HistoryOutcome, MeshBuffer, SculptSession, SphereParams, ToolType, parse_hex_color,
};

const POLE: Vec3 = Vec3::new(0.0, 2.0, 0.0);

fn sphere_session(segments: u32) -> SculptSession {
    SculptSession::from_sphere(&SphereParams::new(2.0, segments), MAX_HISTORY).unwrap()
}

/// One complete stroke consisting of a single tap.
fn tap(session: &mut SculptSession, point: Vec3) {
    session.begin_stroke(point);
    session.end_stroke();
}

#[test]
fn standard_stamp_at_pole_lifts_along_normals() {
    let mut session = sphere_session(64);
    let before = session.mesh().clone();

    session.begin_stroke(POLE);
    session.end_stroke();
    let after = session.mesh();

    let mut inside: Vec<(f32, f32)> = Vec::new();
    for i in 0..before.vertex_count() {
        let p0 = before.position(i);
        let n0 = before.normal(i);
        let distance = p0.distance(POLE);
        let delta = after.position(i) - p0;

        if distance >= 0.5 {
            assert_eq!(delta, Vec3::ZERO, "vertex {i} outside the brush moved");
            assert_eq!(after.color(i), before.color(i));
            continue;
        }
        // The unreferenced seam copy of the pole has no normal to push along.
        if n0 == Vec3::ZERO {
            continue;
        }

        let moved = delta.length();
        assert!(moved <= INTENSITY_SCALE + 1e-6);
        if moved > 1e-4 {
            assert!(delta.normalize().dot(n0) > 0.999, "vertex {i} moved off its normal");
        }
        inside.push((distance, moved));
    }

    assert!(inside.len() > 10);
    inside.sort_by(|a, b| a.0.total_cmp(&b.0));
    for pair in inside.windows(2) {
        assert!(
            pair[1].1 <= pair[0].1 + 1e-6,
            "displacement grew with distance: {:?} -> {:?}",
            pair[0],
            pair[1]
        );
    }

    let (nearest_distance, nearest_moved) = inside[0];
    assert!(nearest_distance < 1e-5);
    assert!((nearest_moved - INTENSITY_SCALE).abs() < 1e-5);
    for &(distance, moved) in &inside {
        if distance > 0.45 {
            assert!(moved < 1e-3);
        }
    }
}

#[test]
fn paint_stamps_approach_target_without_overshoot() {
    let mut session = sphere_session(32);
    session
        .set_brush(Brush {
            tool: ToolType::Paint,
            ..Brush::default()
        })
        .unwrap();
    let target = parse_hex_color("#ef4444").unwrap();
    let start = session.mesh().snapshot();

    session.begin_stroke(POLE);
    for _ in 0..4 {
        session.perform_stroke(POLE);
    }
    let summary = session.end_stroke().unwrap();
    assert_eq!(summary.stamps, 5);

    let mesh = session.mesh();
    let mut painted = 0;
    for i in 0..mesh.vertex_count() {
        let c0 = start.colors()[i];
        let c = mesh.color(i);
        assert_eq!(mesh.position(i), start.positions()[i], "paint moved vertex {i}");

        for axis in 0..3 {
            let (from, to, now) = (c0[axis], target[axis], c[axis]);
            assert!((0.0..=1.0).contains(&now));
            let lo = from.min(to) - 1e-6;
            let hi = from.max(to) + 1e-6;
            assert!(now >= lo && now <= hi, "vertex {i} channel {axis} overshot: {now}");
        }
        if c != c0 {
            painted += 1;
            assert!(c.distance(target) < c0.distance(target));
        }
    }
    assert!(painted > 0);
}

#[test]
fn history_holds_most_recent_twenty() {
    let mut session = sphere_session(16);
    for _ in 0..25 {
        tap(&mut session, POLE);
    }

    let state = session.history_state();
    assert_eq!(state.len, MAX_HISTORY);
    assert_eq!(state.pointer, MAX_HISTORY - 1);
    assert!(state.can_undo);
    assert!(!state.can_redo);

    let mut undone = 0;
    while session.undo() == HistoryOutcome::Applied {
        undone += 1;
    }
    assert_eq!(undone, MAX_HISTORY - 1);
}

#[test]
fn new_stroke_after_undo_discards_redo_branch() {
    let mut session = sphere_session(16);
    for x in [0.0, 0.3, 0.6] {
        tap(&mut session, POLE + Vec3::new(x, 0.0, 0.0));
    }
    // [S0, S1, S2, S3] -> pointer at S1
    session.undo();
    session.undo();
    let s1 = session.history().current().unwrap().clone();

    session.set_tool(ToolType::Pinch);
    tap(&mut session, POLE);

    let history = session.history();
    assert_eq!(history.len(), 3);
    assert_eq!(history.pointer(), 2);
    assert_eq!(history.get(1), Some(&s1));
    assert_eq!(session.redo(), HistoryOutcome::AtLimit);
}

#[test]
fn undo_and_redo_past_the_ends_are_idempotent() {
    let mut session = sphere_session(16);
    tap(&mut session, POLE);
    let edited = session.mesh().snapshot();

    assert_eq!(session.undo(), HistoryOutcome::Applied);
    let initial = session.mesh().snapshot();
    for _ in 0..3 {
        assert_eq!(session.undo(), HistoryOutcome::AtLimit);
        assert_eq!(session.mesh().snapshot(), initial);
    }

    assert_eq!(session.redo(), HistoryOutcome::Applied);
    for _ in 0..3 {
        assert_eq!(session.redo(), HistoryOutcome::AtLimit);
        assert_eq!(session.mesh().snapshot(), edited);
    }
}

#[test]
fn export_quad_writes_one_based_faces() {
    let mesh = MeshBuffer::new(
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 0.0),
        ],
        vec![[0, 1, 2], [0, 2, 3]],
        Vec3::splat(0.8),
    )
    .unwrap();
    let session = SculptSession::new(mesh);

    let obj = session.export_current_state();
    let v_lines = obj.lines().filter(|l| l.starts_with("v ")).count();
    let f_lines: Vec<&str> = obj.lines().filter(|l| l.starts_with("f ")).collect();

    assert_eq!(v_lines, 4);
    assert_eq!(f_lines, vec!["f 1 2 3", "f 1 3 4"]);
}
