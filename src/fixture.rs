//! Worked example graphs.

/// The strongly connected component example from Wikipedia.
///
/// The graph has three components, `{a, b, e}`, `{c, d, h}` and `{f, g}`,
/// whose condensation is the chain `{a, b, e} -> {c, d, h} -> {f, g}` plus the
/// shortcut `{a, b, e} -> {f, g}`.
///
/// See <https://en.wikipedia.org/wiki/Strongly_connected_component>.
pub const WIKIPEDIA_SCC: &[(&str, &str)] = &[
    ("a", "b"),
    ("b", "e"),
    ("e", "a"),
    ("b", "f"),
    ("e", "f"),
    ("f", "g"),
    ("g", "f"),
    ("b", "c"),
    ("c", "d"),
    ("d", "c"),
    ("d", "h"),
    ("h", "d"),
    ("c", "g"),
    ("h", "g"),
];
