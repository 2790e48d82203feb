// SPDX-License-Identifier: MIT OR Apache-2.0

//! Styled fragments and the automatic namespace palette.
//!
//! Style strings are carried opaque end to end: on a terminal they are ANSI
//! SGR parameters (`"1;35"`), on wasm they are CSS (`"color:#e91e63"`). The
//! sinks decide how to consume them; everything upstream just tags text.

use crate::arg::Arg;

/// Builds a pre-styled fragment.
///
/// The fragment is recognized by the normalizer regardless of stringify or
/// concat settings: runtimes with a styled-output mechanism expand it into
/// their native call shape, everything else reduces it to the plain text.
///
/// ```
/// let frag = conso::styled("hot path", "1;31");
/// ```
pub fn styled(text: impl Into<String>, style: impl Into<String>) -> Arg {
    Arg::Styled {
        text: text.into(),
        style: style.into(),
    }
}

/// ANSI 256-color codes used for automatic namespace coloring.
///
/// Restricted to hues that stay legible on both dark and light backgrounds.
const ANSI_PALETTE: &[u8] = &[
    33, 39, 45, 51, 69, 75, 81, 87, 99, 105, 111, 117, 129, 135, 141, 147, 160, 166, 172, 178,
    196, 202, 208, 214,
];

/// Hex colors used for automatic namespace coloring on wasm.
const CSS_PALETTE: &[&str] = &[
    "#0074d9", "#1e90ff", "#00bcd4", "#2ecc40", "#3d9970", "#b10dc9", "#e91e63", "#f012be",
    "#ff4136", "#ff851b", "#ffb700", "#795548",
];

/// FNV-1a over the namespace bytes. Stable across platforms and processes,
/// so a namespace keeps its color between runs.
fn namespace_hash(namespace: &str) -> u32 {
    let mut hash: u32 = 0x811c_9dc5;
    for byte in namespace.bytes() {
        hash ^= byte as u32;
        hash = hash.wrapping_mul(0x0100_0193);
    }
    hash
}

/// Deterministically derives a terminal style for a namespace.
pub fn auto_style(namespace: &str) -> String {
    let code = ANSI_PALETTE[namespace_hash(namespace) as usize % ANSI_PALETTE.len()];
    format!("38;5;{code}")
}

/// Deterministically derives a CSS style for a namespace (wasm).
pub fn auto_css(namespace: &str) -> String {
    let color = CSS_PALETTE[namespace_hash(namespace) as usize % CSS_PALETTE.len()];
    format!("color:{color}")
}

/// Wraps text in an SGR sequence. Empty style or empty text wraps nothing,
/// so no bare escape sequences leak into the output.
pub(crate) fn ansi_wrap(text: &str, style: &str) -> String {
    if style.is_empty() || text.is_empty() {
        return text.to_string();
    }
    format!("\x1b[{style}m{text}\x1b[0m")
}
