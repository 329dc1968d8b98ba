//! Wavefront OBJ export of the current mesh state.

use std::fmt::Write;

use crate::mesh::MeshBuffer;

/// First line of every exported file.
pub const OBJ_HEADER: &str = "# Os-s Export";

/// Serialize positions and faces as OBJ text.
///
/// Faces use 1-based indices. A mesh without faces falls back to grouping
/// every three consecutive vertices into a face; a trailing partial group is
/// dropped. Colors and normals are not written.
pub fn export_obj(mesh: &MeshBuffer) -> String {
    // Rough per-line size to avoid regrowing on large meshes
    let mut out = String::with_capacity(32 + mesh.vertex_count() * 36 + mesh.face_count() * 24);

    // Writing into a String cannot fail
    let _ = writeln!(out, "{OBJ_HEADER}");
    let _ = writeln!(out, "o object");

    for p in mesh.positions() {
        let _ = writeln!(out, "v {} {} {}", p.x, p.y, p.z);
    }

    if mesh.face_count() > 0 {
        for [a, b, c] in mesh.faces() {
            let _ = writeln!(out, "f {} {} {}", a + 1, b + 1, c + 1);
        }
    } else {
        let n = mesh.vertex_count();
        for i in (0..n.saturating_sub(2)).step_by(3) {
            let _ = writeln!(out, "f {} {} {}", i + 1, i + 2, i + 3);
        }
    }

    out
}

/// Download name for an export taken at `timestamp_ms` (Unix millis).
pub fn export_file_name(timestamp_ms: u64) -> String {
    format!("sculpt_{timestamp_ms}.obj")
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn quad() -> MeshBuffer {
        MeshBuffer::new(
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(0.0, 0.0, 1.0),
                Vec3::new(1.0, 0.0, 1.0),
                Vec3::new(1.5, -2.25, 0.0),
            ],
            vec![[0, 1, 2], [0, 2, 3]],
            Vec3::splat(0.8),
        )
        .unwrap()
    }

    #[test]
    fn test_export_quad() {
        let obj = export_obj(&quad());
        let lines: Vec<&str> = obj.lines().collect();

        assert_eq!(lines[0], "# Os-s Export");
        assert_eq!(lines[1], "o object");
        assert_eq!(lines.iter().filter(|l| l.starts_with("v ")).count(), 4);
        assert_eq!(lines.iter().filter(|l| l.starts_with("f ")).count(), 2);
        assert_eq!(lines[5], "v 1.5 -2.25 0");
        assert_eq!(lines[6], "f 1 2 3");
        assert_eq!(lines[7], "f 1 3 4");
        assert!(obj.ends_with('\n'));
    }

    #[test]
    fn test_fallback_groups_consecutive_vertices() {
        let mesh = MeshBuffer::new(vec![Vec3::ZERO; 7], Vec::new(), Vec3::ONE).unwrap();
        let obj = export_obj(&mesh);
        let faces: Vec<&str> = obj.lines().filter(|l| l.starts_with("f ")).collect();
        assert_eq!(faces, vec!["f 1 2 3", "f 4 5 6"]);
    }

    #[test]
    fn test_file_name() {
        assert_eq!(export_file_name(1_700_000_000_123), "sculpt_1700000000123.obj");
    }
}
