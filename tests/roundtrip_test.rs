/// Integration test for the file transform pipeline
///
/// Tests the following scenarios:
/// 1. Encrypt/decrypt round trip over real files spanning multiple chunks
/// 2. Companion path naming when toggling the reserved extension
/// 3. Degenerate key refusal before any output byte is written
/// 4. Canonical key display matching the mask actually used
///
/// Note: Uses a temp directory for all files

use kameleon::engine::{self, EngineError, MAX_CHUNK};
use kameleon::key::{self, KeyError};
use kameleon::paths;
use kameleon::progress::NullProgress;
use std::fs::{self, File};
use std::path::Path;

/// Helper: Run the engine file-to-file, companion naming included
fn transform(input: &Path, raw_key: &str) -> Result<std::path::PathBuf, EngineError> {
    let total = fs::metadata(input).expect("input metadata").len();
    let out_path = paths::companion(input);
    let reader = File::open(input).expect("open input");
    let writer = File::create(&out_path).expect("create output");
    engine::run(reader, writer, raw_key, total, &mut NullProgress)?;
    Ok(out_path)
}

#[test]
fn test_multi_chunk_round_trip() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();

    let dir = tempfile::tempdir().expect("temp dir");
    let plain_path = dir.path().join("payload.bin");

    // two full chunks plus a short final chunk
    let size = 2 * MAX_CHUNK + 123_457;
    let data: Vec<u8> = (0..size).map(|i| (i * 31 % 251) as u8).collect();
    fs::write(&plain_path, &data).expect("write input");

    let kam_path = transform(&plain_path, "0005a6e").expect("encrypt");
    assert_eq!(kam_path, dir.path().join("payload.bin.kam"));

    let obscured = fs::read(&kam_path).expect("read encrypted");
    assert_eq!(obscured.len(), data.len());
    assert_ne!(obscured, data);

    // decrypting must not clobber the source before we compare, so move
    // the original out of the companion position first
    let moved = dir.path().join("payload.orig");
    fs::rename(&plain_path, &moved).expect("move original");

    let restored_path = transform(&kam_path, "0005a6e").expect("decrypt");
    assert_eq!(restored_path, dir.path().join("payload.bin"));
    assert_eq!(fs::read(&restored_path).expect("read restored"), data);
}

#[test]
fn test_decryption_needs_the_same_canonical_key() {
    let dir = tempfile::tempdir().expect("temp dir");
    let plain_path = dir.path().join("note.txt");
    fs::write(&plain_path, b"kameleon integration test payload").expect("write input");

    let kam_path = transform(&plain_path, "00FF").expect("encrypt");
    fs::remove_file(&plain_path).expect("remove original");

    // "FF" is the canonical form of "00FF": both name the same mask
    assert_eq!(key::canonicalize("00FF").unwrap().to_string(), "FF");
    let restored_path = transform(&kam_path, "FF").expect("decrypt");
    assert_eq!(
        fs::read(&restored_path).expect("read restored"),
        b"kameleon integration test payload"
    );
}

#[test]
fn test_degenerate_key_writes_nothing() {
    let dir = tempfile::tempdir().expect("temp dir");
    let plain_path = dir.path().join("secret.txt");
    fs::write(&plain_path, b"must stay untouched").expect("write input");

    let result = transform(&plain_path, "0000");
    match result {
        Err(EngineError::Key(KeyError::Degenerate)) => {}
        other => panic!("expected degenerate key error, got {other:?}"),
    }

    // the engine failed before its first write; the created companion file
    // is still empty
    let kam_path = dir.path().join("secret.txt.kam");
    assert_eq!(fs::metadata(&kam_path).expect("output metadata").len(), 0);
}

#[test]
fn test_kam_input_round_trips_backwards() {
    // starting from a .kam file: the companion strips the extension, and
    // re-encrypting the result recreates the .kam path
    let dir = tempfile::tempdir().expect("temp dir");
    let kam_path = dir.path().join("blob.dat.kam");
    let data: Vec<u8> = (0u8..=255).collect();
    fs::write(&kam_path, &data).expect("write input");

    let plain_path = transform(&kam_path, "1234abcd").expect("decrypt");
    assert_eq!(plain_path, dir.path().join("blob.dat"));

    fs::remove_file(&kam_path).expect("remove original");
    let back = transform(&plain_path, "1234abcd").expect("encrypt");
    assert_eq!(back, kam_path);
    assert_eq!(fs::read(&back).expect("read round trip"), data);
}
