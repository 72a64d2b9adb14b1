use std::path::Path;

use anyhow::Result;
use tempfile::tempdir;
use tokio::sync::mpsc;
use vfile_fs::{
    normalize, read, read_sync, read_with, write, write_sync, write_with, Encoding, ReadOptions,
    VFile, VFileOptions, Value,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

#[test]
fn test_normalize_string_sets_only_path() -> Result<()> {
    for path in ["a.txt", "nested/dir/b.md", "/abs/c", "..", "with space.txt"] {
        let file = normalize(path)?;
        assert_eq!(file.path(), Some(Path::new(path)));
        assert!(file.value().is_none());
    }
    Ok(())
}

#[test]
fn test_nul_in_path_fails_at_the_filesystem() -> Result<()> {
    let file = normalize("a\0b")?;
    assert_eq!(file.path(), Some(Path::new("a\0b")));

    let err = read_sync(file, ()).unwrap_err();
    assert!(!err.is_construction());
    assert_eq!(err.io_kind(), Some(std::io::ErrorKind::InvalidInput));
    Ok(())
}

#[test]
fn test_deferred_construction_error_is_immediate() -> Result<()> {
    let err = read("", ()).err().expect("empty path rejected at the call");
    assert!(err.is_construction());
    let err = write(VFileOptions::new().cwd("relative"), ())
        .err()
        .expect("relative cwd rejected at the call");
    assert!(err.is_construction());
    Ok(())
}

#[test]
fn test_sync_round_trip_is_byte_exact() -> Result<()> {
    init_tracing();
    let dir = tempdir()?;
    let source = dir.path().join("blob.bin");
    let original: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
    std::fs::write(&source, &original)?;

    let mut file = read_sync(&source, ())?;
    let copy = dir.path().join("copy.bin");
    file.set_path(&copy)?;
    write_sync(file, ())?;

    assert_eq!(std::fs::read(&copy)?, original);
    Ok(())
}

#[test]
fn test_sync_round_trip_in_place() -> Result<()> {
    let dir = tempdir()?;
    let target = dir.path().join("same.txt");
    std::fs::write(&target, "unchanged\n")?;

    write_sync(read_sync(&target, ())?, ())?;
    assert_eq!(std::fs::read_to_string(&target)?, "unchanged\n");
    Ok(())
}

#[test]
fn test_relative_path_uses_cwd() -> Result<()> {
    let dir = tempdir()?;
    std::fs::create_dir(dir.path().join("sub"))?;
    std::fs::write(dir.path().join("sub/file.txt"), "in sub")?;

    let options = VFileOptions::new().cwd(dir.path().join("sub/../sub")).path("./file.txt");
    let file = read_sync(options, Encoding::Utf8)?;
    assert_eq!(file.value(), Some(&Value::from("in sub")));
    Ok(())
}

#[tokio::test]
async fn test_deferred_read_matches_disk() -> Result<()> {
    init_tracing();
    let dir = tempdir()?;
    let target = dir.path().join("disk.txt");
    std::fs::write(&target, b"on disk")?;

    let file = read(&target, ())?.await?;
    assert_eq!(file.value().map(Value::as_bytes), Some(&b"on disk"[..]));
    Ok(())
}

#[tokio::test]
async fn test_deferred_read_missing_rejects() -> Result<()> {
    let dir = tempdir()?;
    let err = read(dir.path().join("nope.txt"), ())?.await.unwrap_err();
    assert_eq!(err.io_kind(), Some(std::io::ErrorKind::NotFound));
    Ok(())
}

#[tokio::test]
async fn test_deferred_write_then_sync_read() -> Result<()> {
    let dir = tempdir()?;
    let target = dir.path().join("hello.txt");

    write(VFileOptions::new().path(&target).value("hello"), ())?.await?;
    let file = read_sync(&target, Encoding::Utf8)?;
    assert_eq!(file.value(), Some(&Value::from("hello")));
    Ok(())
}

#[tokio::test]
async fn test_deferred_read_existing_file_keeps_its_fields() -> Result<()> {
    let dir = tempdir()?;
    std::fs::write(dir.path().join("doc.md"), "# Title")?;

    let mut file = VFile::new(VFileOptions::new().cwd(dir.path()).path("draft.md"))?;
    file.set_path("doc.md")?;
    let file = read(file, Encoding::Utf8)?.await?;

    assert_eq!(file.cwd(), dir.path());
    assert_eq!(file.history().len(), 2);
    assert_eq!(file.to_string(), "# Title");
    Ok(())
}

#[tokio::test]
async fn test_callback_with_and_without_options_agree() -> Result<()> {
    let dir = tempdir()?;
    let target = dir.path().join("same.txt");
    std::fs::write(&target, "payload")?;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let omitted = tx.clone();
    read_with(&target, (), move |result| {
        let _ = omitted.send(result);
    })?
    .await?;
    read_with(&target, ReadOptions::default(), move |result| {
        let _ = tx.send(result);
    })?
    .await?;

    let first = rx.recv().await.expect("first callback")?;
    let second = rx.recv().await.expect("second callback")?;
    assert_eq!(first, second);
    assert_eq!(first.value(), Some(&Value::Bytes(b"payload".to_vec())));
    Ok(())
}

#[tokio::test]
async fn test_callback_failure_reports_error_once() -> Result<()> {
    let dir = tempdir()?;
    let (tx, mut rx) = mpsc::unbounded_channel();

    read_with(dir.path().join("absent"), (), move |result| {
        let _ = tx.send(result);
    })?
    .await?;

    let err = rx.recv().await.expect("callback").unwrap_err();
    assert_eq!(err.io_kind(), Some(std::io::ErrorKind::NotFound));
    // Sender dropped with the callback: nothing else will arrive
    assert!(rx.recv().await.is_none());
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_writes_each_settle() -> Result<()> {
    init_tracing();
    let dir = tempdir()?;
    let target = dir.path().join("contended.txt");
    let (tx, mut rx) = mpsc::unbounded_channel();

    let mut handles = Vec::new();
    for value in ["first", "second"] {
        let tx = tx.clone();
        let options = VFileOptions::new().path(&target).value(value);
        handles.push(write_with(options, (), move |result| {
            let _ = tx.send(result);
        })?);
    }
    drop(tx);
    for handle in handles {
        handle.await?;
    }

    let mut settled = 0;
    while let Some(result) = rx.recv().await {
        result?;
        settled += 1;
    }
    assert_eq!(settled, 2);

    let contents = std::fs::read_to_string(&target)?;
    assert!(!contents.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_write_returns_caller_file() -> Result<()> {
    let dir = tempdir()?;
    let options = VFileOptions::new().cwd(dir.path()).path("out.bin");
    let file = VFile::new(options.value(vec![0u8, 1, 2]))?;
    let expected = file.clone();

    let returned = write(file, ())?.await?;
    assert_eq!(returned, expected);
    assert_eq!(std::fs::read(dir.path().join("out.bin"))?, vec![0u8, 1, 2]);
    Ok(())
}
