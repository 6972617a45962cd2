//! Structural path validation
//!
//! Validates Unix and Windows path syntax without touching the filesystem.
//! Used by the I/O layer to reject malformed user-supplied paths before any
//! open is attempted; existence is checked separately.

/// Path syntax family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStyle {
    Unix,
    Windows,
}

impl PathStyle {
    /// The style native to the current platform.
    pub fn native() -> Self {
        if cfg!(windows) {
            PathStyle::Windows
        } else {
            PathStyle::Unix
        }
    }
}

impl std::fmt::Display for PathStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathStyle::Unix => write!(f, "unix"),
            PathStyle::Windows => write!(f, "windows"),
        }
    }
}

/// Check that a path is structurally valid (absolute or relative) for the
/// given style.
pub fn is_valid_path(path: &str, style: PathStyle) -> bool {
    match style {
        PathStyle::Unix => is_valid_unix(path),
        PathStyle::Windows => is_valid_windows(path),
    }
}

fn is_valid_unix(path: &str) -> bool {
    if path.is_empty() || path.contains('\0') {
        return false;
    }

    if let Some(rest) = path.strip_prefix('/') {
        // Absolute: "/" alone and a trailing slash are fine, empty interior
        // segments ("//") are not.
        if rest.is_empty() {
            return true;
        }
        let rest = rest.strip_suffix('/').unwrap_or(rest);
        rest.split('/').all(|segment| !segment.is_empty())
    } else {
        // Relative: must end with a segment
        path.split('/').all(|segment| !segment.is_empty())
    }
}

/// Characters Windows forbids inside a path segment.
fn is_valid_windows_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment.chars().all(|c| {
            !matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*') && c >= '\u{20}'
        })
}

fn is_valid_windows(path: &str) -> bool {
    if path.is_empty() {
        return false;
    }

    // UNC: \\server\share[\segment...]
    if let Some(rest) = path.strip_prefix("\\\\") {
        let mut parts = rest.split('\\');
        let server = parts.next().unwrap_or("");
        let share = match parts.next() {
            Some(share) => share,
            None => return false,
        };
        if !is_valid_windows_segment(server) || !is_valid_windows_segment(share) {
            return false;
        }
        return parts.all(is_valid_windows_segment);
    }

    // Drive letter: C:\segment...
    let mut chars = path.chars();
    if let (Some(drive), Some(':')) = (chars.next(), chars.clone().next()) {
        if drive.is_ascii_alphabetic() {
            let rest = &path[2..];
            let rest = match rest.strip_prefix('\\') {
                Some(rest) => rest,
                None => return false,
            };
            // "C:\" alone and a trailing backslash are fine
            if rest.is_empty() {
                return true;
            }
            let rest = rest.strip_suffix('\\').unwrap_or(rest);
            return rest.split('\\').all(is_valid_windows_segment);
        }
    }

    // Relative, optionally prefixed with .\ or ..\
    let rest = path
        .strip_prefix(".\\")
        .or_else(|| path.strip_prefix("..\\"))
        .unwrap_or(path);
    if rest.is_empty() {
        return false;
    }
    rest.split('\\')
        .all(|segment| segment == "." || segment == ".." || is_valid_windows_segment(segment))
}
