//! Procedurally generated SVG character portraits.
//!
//! Portraits are a pure function of the character's id and name, so the
//! same sheet always renders the same image and nothing is stored.

use std::fmt::Write;

use crate::types::DbId;

const SIZE: u32 = 128;

/// Background/feature palette. Muted tones that read well on both themes.
const PALETTE: [&str; 8] = [
    "#264653", "#2a9d8f", "#e9c46a", "#f4a261", "#e76f51", "#6d597a", "#355070", "#b56576",
];

/// FNV-1a, the classic 64-bit variant. Stable across platforms and releases,
/// unlike `DefaultHasher`.
fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf29ce484222325;
    for b in bytes {
        hash ^= u64::from(*b);
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}

/// Render a deterministic 128x128 SVG portrait for a character.
pub fn render(character_id: DbId, name: &str) -> String {
    let seed = fnv1a(format!("{character_id}:{name}").as_bytes());

    let bg = PALETTE[(seed & 0x7) as usize];
    let skin = PALETTE[((seed >> 3) & 0x7) as usize];
    let accent = PALETTE[((seed >> 6) & 0x7) as usize];

    // Jittered facial geometry, all derived from distinct seed bits.
    let head_r = 34 + ((seed >> 9) % 13) as u32;
    let eye_dx = 12 + ((seed >> 13) % 7) as u32;
    let eye_r = 3 + ((seed >> 17) % 3) as u32;
    let mouth_w = 16 + ((seed >> 20) % 17) as u32;
    let cx = SIZE / 2;
    let cy = SIZE / 2;

    let mut svg = String::with_capacity(768);
    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{SIZE}\" height=\"{SIZE}\" \
         viewBox=\"0 0 {SIZE} {SIZE}\">"
    );
    let _ = write!(svg, "<rect width=\"{SIZE}\" height=\"{SIZE}\" fill=\"{bg}\"/>");
    // Shoulders.
    let _ = write!(
        svg,
        "<ellipse cx=\"{cx}\" cy=\"{}\" rx=\"44\" ry=\"26\" fill=\"{accent}\"/>",
        SIZE - 14
    );
    // Head.
    let _ = write!(svg, "<circle cx=\"{cx}\" cy=\"{cy}\" r=\"{head_r}\" fill=\"{skin}\"/>");
    // Eyes.
    let eye_y = cy - head_r / 4;
    let _ = write!(
        svg,
        "<circle cx=\"{}\" cy=\"{eye_y}\" r=\"{eye_r}\" fill=\"#1d1d1d\"/>",
        cx - eye_dx
    );
    let _ = write!(
        svg,
        "<circle cx=\"{}\" cy=\"{eye_y}\" r=\"{eye_r}\" fill=\"#1d1d1d\"/>",
        cx + eye_dx
    );
    // Mouth.
    let _ = write!(
        svg,
        "<rect x=\"{}\" y=\"{}\" width=\"{mouth_w}\" height=\"3\" rx=\"1.5\" fill=\"#1d1d1d\"/>",
        cx - mouth_w / 2,
        cy + head_r / 2
    );
    svg.push_str("</svg>");
    svg
}
