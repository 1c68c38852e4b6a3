use std::fs;
use std::path::{Path, PathBuf};

use hearth::content::resolver::{MAX_PATH_LEN, Rejection, resolve};
use hearth::http::response::StatusCode;

/// Fresh scratch directory directly under the system temp dir.
fn scratch(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("hearth-resolver-{}-{}", tag, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

const DEFAULT_DOC: &str = "/index.html";

#[test]
fn test_long_path_rejected_before_any_filesystem_access() {
    let path = format!("/{}", "a".repeat(MAX_PATH_LEN));
    let missing_root = Path::new("/no/such/root/anywhere");

    let rejection = resolve(&path, missing_root, DEFAULT_DOC).unwrap_err();

    assert_eq!(rejection, Rejection::PathTooLong);
    assert_eq!(rejection.status(), StatusCode::BadRequest);
}

#[test]
fn test_path_at_cap_is_accepted_by_length_check() {
    // Exactly 255 bytes passes the length check and fails later instead.
    let path = format!("/{}", "a".repeat(MAX_PATH_LEN - 1));
    let root = scratch("at-cap");

    let rejection = resolve(&path, &root, DEFAULT_DOC).unwrap_err();

    assert!(matches!(rejection, Rejection::NotFound(_)));
}

#[test]
fn test_length_check_precedes_denylist() {
    let path = format!("/{}%", "a".repeat(MAX_PATH_LEN));
    let missing_root = Path::new("/no/such/root/anywhere");

    let rejection = resolve(&path, missing_root, DEFAULT_DOC).unwrap_err();

    assert_eq!(rejection, Rejection::PathTooLong);
}

#[test]
fn test_disallowed_characters_rejected_before_any_filesystem_access() {
    let missing_root = Path::new("/no/such/root/anywhere");

    for path in [
        "/file\0name",
        "/file%20name",
        "/file#section",
        "/file\\name",
        "/file:name",
        "/file*name",
        "/file<name",
        "/file>name",
        "/file|name",
        "/file\"name",
    ] {
        let rejection = resolve(path, missing_root, DEFAULT_DOC).unwrap_err();

        assert_eq!(rejection, Rejection::Malformed, "path {:?}", path);
        assert_eq!(rejection.status(), StatusCode::Forbidden);
    }
}

#[test]
fn test_root_path_substitutes_default_document() {
    let root = scratch("default-doc");
    fs::write(root.join("index.html"), "hello").unwrap();

    let resolved = resolve("/", &root, DEFAULT_DOC).unwrap();

    assert!(resolved.ends_with("index.html"));
    assert!(resolved.exists());
}

#[test]
fn test_existing_file_resolves_canonically() {
    let root = scratch("existing");
    fs::write(root.join("page.html"), "page").unwrap();

    let resolved = resolve("/page.html", &root, DEFAULT_DOC).unwrap();
    let canonical_root = fs::canonicalize(&root).unwrap();

    assert!(resolved.starts_with(&canonical_root));
    assert!(resolved.ends_with("page.html"));
}

#[test]
fn test_dot_dot_collapsing_inside_root_is_allowed() {
    let root = scratch("inside-dotdot");
    fs::create_dir_all(root.join("sub")).unwrap();
    fs::write(root.join("page.html"), "page").unwrap();

    let resolved = resolve("/sub/../page.html", &root, DEFAULT_DOC).unwrap();

    assert!(resolved.ends_with("page.html"));
}

#[test]
fn test_missing_file_is_not_found() {
    let root = scratch("missing");

    let rejection = resolve("/missing.html", &root, DEFAULT_DOC).unwrap_err();

    assert!(matches!(rejection, Rejection::NotFound(_)));
    assert_eq!(rejection.status(), StatusCode::NotFound);
    assert!(rejection.details().contains("not found"));
}

#[test]
fn test_traversal_outside_root_is_not_allowed() {
    // The scratch root sits two components below /, so this resolves to
    // /etc/passwd.
    let root = scratch("traversal");

    let rejection = resolve("/../../etc/passwd", &root, DEFAULT_DOC).unwrap_err();

    assert!(matches!(rejection, Rejection::NotAllowed(_)));
    assert_eq!(rejection.status(), StatusCode::Forbidden);
    assert!(rejection.details().contains("not allowed"));
}

#[test]
fn test_traversal_into_sibling_directory_is_not_allowed() {
    let scratch = scratch("sibling");
    let root = scratch.join("root");
    fs::create_dir_all(&root).unwrap();
    fs::create_dir_all(scratch.join("outside")).unwrap();
    fs::write(scratch.join("outside/secret.txt"), "secret").unwrap();

    let rejection = resolve("/../outside/secret.txt", &root, DEFAULT_DOC).unwrap_err();

    assert!(matches!(rejection, Rejection::NotAllowed(_)));
}

#[test]
fn test_containment_checked_before_existence() {
    // A missing file outside the root still reports the traversal, not 404.
    let scratch = scratch("contain-order");
    let root = scratch.join("root");
    fs::create_dir_all(&root).unwrap();
    fs::create_dir_all(scratch.join("outside")).unwrap();

    let rejection = resolve("/../outside/absent.txt", &root, DEFAULT_DOC).unwrap_err();

    assert!(matches!(rejection, Rejection::NotAllowed(_)));
}

#[cfg(unix)]
#[test]
fn test_symlink_escaping_root_is_not_allowed() {
    let scratch = scratch("symlink");
    let root = scratch.join("root");
    fs::create_dir_all(&root).unwrap();
    fs::write(scratch.join("outside.txt"), "secret").unwrap();
    std::os::unix::fs::symlink(scratch.join("outside.txt"), root.join("link.txt")).unwrap();

    let rejection = resolve("/link.txt", &root, DEFAULT_DOC).unwrap_err();

    assert!(matches!(rejection, Rejection::NotAllowed(_)));
}

#[test]
fn test_missing_intermediate_directory_is_a_resolve_error() {
    let root = scratch("intermediate");

    let rejection = resolve("/no/such/dir/file.html", &root, DEFAULT_DOC).unwrap_err();

    assert_eq!(rejection, Rejection::Resolve);
    assert_eq!(rejection.status(), StatusCode::InternalServerError);
}

#[test]
fn test_nonexistent_root_is_a_resolve_error() {
    let missing_root = Path::new("/no/such/root/anywhere");

    let rejection = resolve("/index.html", missing_root, DEFAULT_DOC).unwrap_err();

    assert_eq!(rejection, Rejection::Resolve);
}

#[test]
fn test_empty_path_resolves_to_the_root_itself() {
    let root = scratch("empty-path");

    let resolved = resolve("", &root, DEFAULT_DOC).unwrap();

    assert_eq!(resolved, fs::canonicalize(&root).unwrap());
}
