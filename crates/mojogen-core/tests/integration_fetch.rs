//! Integration test: content-addressed fetch against a local HTTP object store.
//!
//! Starts a minimal server keyed by `/<bucket>/<sha1>`, runs the fetcher
//! through `HttpObjectStore` and checks what ends up on disk.

mod common;

use mojogen_core::checksum::{sha1_bytes, sha1_path};
use mojogen_core::sidecar::sidecar_path;
use mojogen_core::{ensure_file, EnsureOutcome, Error, FetchTarget, HttpObjectStore};
use std::fs;
use tempfile::tempdir;

const BUCKET: &str = "mojo/mojom_parser/linux64";

fn parser_body() -> Vec<u8> {
    let mut body = b"\x7fELF".to_vec();
    body.extend((0u8..200).cycle().take(32 * 1024));
    body
}

#[test]
fn downloads_object_named_by_sidecar_digest() {
    let body = parser_body();
    let digest = sha1_bytes(&body);
    let server = common::object_server::start(vec![(
        format!("/{}/{}", BUCKET, digest),
        body.clone(),
    )]);

    let dir = tempdir().unwrap();
    let path = dir.path().join("mojom_parser");
    fs::write(sidecar_path(&path), format!("{}\n", digest)).unwrap();

    let store = HttpObjectStore::new(&server.base_url).unwrap();
    let outcome = ensure_file(&FetchTarget::new(&path, BUCKET), &store).unwrap();

    assert_eq!(
        outcome,
        EnsureOutcome::Downloaded {
            bytes: body.len() as u64
        }
    );
    assert_eq!(fs::read(&path).unwrap(), body);
    assert_eq!(sha1_path(&path).unwrap(), digest);
    assert_eq!(server.requests(), vec![format!("/{}/{}", BUCKET, digest)]);

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o555);
    }
}

#[test]
fn second_ensure_is_a_no_op() {
    let body = parser_body();
    let digest = sha1_bytes(&body);
    let server = common::object_server::start(vec![(
        format!("/{}/{}", BUCKET, digest),
        body.clone(),
    )]);

    let dir = tempdir().unwrap();
    let path = dir.path().join("mojom_parser");
    fs::write(sidecar_path(&path), digest.to_string()).unwrap();

    let store = HttpObjectStore::new(&server.base_url).unwrap();
    let target = FetchTarget::new(&path, BUCKET);
    ensure_file(&target, &store).unwrap();
    let outcome = ensure_file(&target, &store).unwrap();

    assert_eq!(outcome, EnsureOutcome::UpToDate);
    assert_eq!(server.requests().len(), 1);
}

#[test]
fn server_serving_wrong_bytes_fails_integrity() {
    let expected = parser_body();
    let digest = sha1_bytes(&expected);
    let server = common::object_server::start(vec![(
        format!("/{}/{}", BUCKET, digest),
        b"not the parser".to_vec(),
    )]);

    let dir = tempdir().unwrap();
    let path = dir.path().join("mojom_parser");
    fs::write(sidecar_path(&path), digest.to_string()).unwrap();

    let store = HttpObjectStore::new(&server.base_url).unwrap();
    let err = ensure_file(&FetchTarget::new(&path, BUCKET), &store).unwrap_err();
    assert!(matches!(err, Error::Integrity { .. }), "got {err:?}");
}

#[test]
fn missing_object_is_http_error() {
    let server = common::object_server::start(Vec::new());

    let dir = tempdir().unwrap();
    let path = dir.path().join("mojom_parser");
    fs::write(sidecar_path(&path), sha1_bytes(b"absent").to_string()).unwrap();

    let store = HttpObjectStore::new(&server.base_url).unwrap();
    let err = ensure_file(&FetchTarget::new(&path, BUCKET), &store).unwrap_err();
    assert!(matches!(err, Error::Http { status: 404, .. }), "got {err:?}");
    assert!(!path.exists());
}

#[test]
fn missing_sidecar_makes_no_request() {
    let server = common::object_server::start(Vec::new());

    let dir = tempdir().unwrap();
    let path = dir.path().join("mojom_parser");

    let store = HttpObjectStore::new(&server.base_url).unwrap();
    let err = ensure_file(&FetchTarget::new(&path, BUCKET), &store).unwrap_err();
    assert!(err.is_precondition());
    assert!(server.requests().is_empty());
}
