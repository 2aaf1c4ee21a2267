//! Source-path normalization.
//!
//! Folder pickers may hand back a path with or without a trailing
//! separator, so a cached path is normalized by stripping exactly one
//! trailing separator before it is compared with a new selection.

/// Separator used by the device file system the source folders live on.
pub const PATH_SEPARATOR: char = '/';

/// Removes one trailing [`PATH_SEPARATOR`] from `path`, if present.
///
/// Only a single separator is stripped: `"/a//"` becomes `"/a/"`.
pub fn strip_trailing_separator(path: &str) -> &str {
    path.strip_suffix(PATH_SEPARATOR).unwrap_or(path)
}

/// Returns `true` when `selected` differs from the `previous` source path.
///
/// The previous path is normalized with [`strip_trailing_separator`]; the
/// selection is compared as-is.  An unknown previous path always counts as
/// a change.
pub fn source_path_changed(previous: Option<&str>, selected: &str) -> bool {
    match previous {
        Some(previous) => strip_trailing_separator(previous) != selected,
        None => true,
    }
}
