use std::io;
use std::path::{Path, PathBuf};

use crate::http::response::StatusCode;

/// Longest accepted request path, in bytes.
pub const MAX_PATH_LEN: usize = 255;

/// Characters never allowed in a request path. A denylist, checked before
/// any filesystem access; `%` is included, so percent-encoded sequences are
/// rejected outright rather than decoded.
const DISALLOWED: [char; 10] = ['\0', '%', '#', '\\', ':', '*', '<', '>', '|', '"'];

/// Why a request path was refused. Each reason carries the HTTP status the
/// handler answers with.
#[derive(Debug, PartialEq, Eq)]
pub enum Rejection {
    /// Path exceeded [`MAX_PATH_LEN`].
    PathTooLong,
    /// Path contained a denylisted character.
    Malformed,
    /// The root or an intermediate directory could not be canonicalized.
    Resolve,
    /// The canonical target escapes the content root.
    NotAllowed(PathBuf),
    /// The canonical target does not exist.
    NotFound(PathBuf),
}

impl Rejection {
    pub fn status(&self) -> StatusCode {
        match self {
            Rejection::PathTooLong => StatusCode::BadRequest,
            Rejection::Malformed => StatusCode::Forbidden,
            Rejection::Resolve => StatusCode::InternalServerError,
            Rejection::NotAllowed(_) => StatusCode::Forbidden,
            Rejection::NotFound(_) => StatusCode::NotFound,
        }
    }

    /// Operator-facing description, recorded as the response detail.
    pub fn details(&self) -> String {
        match self {
            Rejection::PathTooLong => "Requested path too long.".to_string(),
            Rejection::Malformed => "Requested path is malformed.".to_string(),
            Rejection::Resolve => "Error parsing file path".to_string(),
            Rejection::NotAllowed(path) => {
                format!("Requested resource {} not allowed.", path.display())
            }
            Rejection::NotFound(path) => {
                format!("Requested resource {} not found.", path.display())
            }
        }
    }
}

/// Maps a request path to a canonical location under `root`.
///
/// Checks run in order, short-circuiting on the first failure: length cap,
/// character denylist, default-document substitution for `/`,
/// canonicalization of target and root, containment of the canonical target
/// under the canonical root, and existence. Canonicalization must precede
/// containment — it is what collapses `..` segments and symlinks, making the
/// prefix check meaningful.
///
/// The returned path is the one the dispatcher opens; nothing here reads
/// file contents.
pub fn resolve(
    request_path: &str,
    root: &Path,
    default_document: &str,
) -> Result<PathBuf, Rejection> {
    if request_path.len() > MAX_PATH_LEN {
        return Err(Rejection::PathTooLong);
    }

    if request_path.contains(DISALLOWED) {
        return Err(Rejection::Malformed);
    }

    let file_req = if request_path == "/" {
        default_document
    } else {
        request_path
    };

    // A leading slash would make `join` discard the root entirely.
    let joined = root.join(file_req.trim_start_matches('/'));

    let canonical_root = std::fs::canonicalize(root).map_err(|_| Rejection::Resolve)?;
    let canonical = canonicalize_target(&joined)?;

    if !canonical.starts_with(&canonical_root) {
        return Err(Rejection::NotAllowed(canonical));
    }

    if !canonical.exists() {
        return Err(Rejection::NotFound(canonical));
    }

    Ok(canonical)
}

/// Canonicalizes the requested target, tolerating a missing final component.
///
/// A target that does not exist yet must still reach the containment check in
/// canonical form so a missing file reports 404 rather than a resolution
/// error; its parent directory is canonicalized and the file name
/// re-appended. Missing intermediate directories stay a resolution failure.
fn canonicalize_target(joined: &Path) -> Result<PathBuf, Rejection> {
    match std::fs::canonicalize(joined) {
        Ok(path) => Ok(path),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            let (Some(dir), Some(name)) = (joined.parent(), joined.file_name()) else {
                return Err(Rejection::Resolve);
            };
            let dir = std::fs::canonicalize(dir).map_err(|_| Rejection::Resolve)?;
            Ok(dir.join(name))
        }
        Err(_) => Err(Rejection::Resolve),
    }
}
