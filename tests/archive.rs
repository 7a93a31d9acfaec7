use huffpack::{Archive, ArchiveConfig, Error};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_compress_then_decompress_file() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("notes.txt");
    let text = "It was the best of times, it was the worst of times.\n";
    fs::write(&source, text).unwrap();

    let archive = Archive::new(&source, ArchiveConfig::default());
    let payload_path = archive.compress().unwrap();
    assert_eq!(payload_path, dir.path().join("notes.bin"));
    assert!(dir.path().join("notes_table.bin").exists());
    assert!(fs::metadata(&payload_path).unwrap().len() < text.len() as u64);

    let restored = archive.decompress(&payload_path).unwrap();
    assert_eq!(restored, dir.path().join("notes_decompressed.txt"));
    assert_eq!(fs::read_to_string(restored).unwrap(), text);
}

#[test]
fn test_binary_file_with_spaces() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("blob.dat");
    let data: Vec<u8> = (0..2048u32).map(|i| (i * 31 % 7) as u8 | 0x20).collect();
    fs::write(&source, &data).unwrap();

    let archive = Archive::new(&source, ArchiveConfig::default());
    let payload_path = archive.compress().unwrap();
    let restored = archive.decompress(payload_path).unwrap();
    assert_eq!(fs::read(restored).unwrap(), data);
}

#[test]
fn test_trim_trailing_whitespace() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("poem.txt");
    fs::write(&source, "roses are red  \n\n").unwrap();

    let config = ArchiveConfig {
        trim_trailing_whitespace: true,
        ..ArchiveConfig::default()
    };
    let archive = Archive::new(&source, config);
    let payload_path = archive.compress().unwrap();
    let restored = archive.decompress(payload_path).unwrap();
    assert_eq!(fs::read_to_string(restored).unwrap(), "roses are red");
}

#[test]
fn test_source_with_payload_extension_is_left_alone() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("data.bin");
    fs::write(&source, "hello hello hello").unwrap();

    let archive = Archive::new(&source, ArchiveConfig::default());
    assert_eq!(archive.payload_path().unwrap(), source);
    match archive.compress() {
        Err(Error::Io(err)) => assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput),
        other => panic!("expected an InvalidInput error, got {other:?}"),
    }
    assert_eq!(fs::read_to_string(&source).unwrap(), "hello hello hello");
    assert!(!dir.path().join("data_table.bin").exists());
}

#[test]
fn test_table_name_matching_source_is_refused() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("data.txt");
    fs::write(&source, "keep me").unwrap();

    // Payload goes to "data", but the table would land on "data.txt".
    let config = ArchiveConfig {
        payload_extension: String::new(),
        table_suffix: ".txt".to_string(),
        ..ArchiveConfig::default()
    };
    let archive = Archive::new(&source, config);
    assert_eq!(archive.table_path().unwrap(), source);
    assert!(matches!(archive.compress(), Err(Error::Io(_))));
    assert_eq!(fs::read_to_string(&source).unwrap(), "keep me");
    assert!(!dir.path().join("data").exists());
}

#[test]
fn test_restored_name_matching_source_is_refused() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("notes.txt");
    fs::write(&source, "abcabc").unwrap();

    let config = ArchiveConfig {
        decompressed_suffix: String::new(),
        ..ArchiveConfig::default()
    };
    let archive = Archive::new(&source, config);
    let payload_path = archive.compress().unwrap();
    assert!(matches!(archive.decompress(payload_path), Err(Error::Io(_))));
    assert_eq!(fs::read_to_string(&source).unwrap(), "abcabc");
}

#[test]
fn test_missing_table_file() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("notes.txt");
    fs::write(&source, "abc").unwrap();

    let archive = Archive::new(&source, ArchiveConfig::default());
    let payload_path = archive.compress().unwrap();
    fs::remove_file(archive.table_path().unwrap()).unwrap();

    assert!(matches!(
        archive.decompress(payload_path),
        Err(Error::MissingCodeTable(_))
    ));
}

#[test]
fn test_empty_file() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("empty.txt");
    fs::write(&source, "").unwrap();

    let archive = Archive::new(&source, ArchiveConfig::default());
    assert!(matches!(archive.compress(), Err(Error::EmptyInput)));
}
