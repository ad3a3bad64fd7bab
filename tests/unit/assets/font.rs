use super::*;

#[test]
fn missing_font_file_is_an_error() {
    let src = FontSource::File(PathBuf::from("target/does-not-exist/font.ttf"));
    let err = src.load().unwrap_err();
    assert!(err.to_string().contains("does-not-exist"));
}

#[test]
fn empty_font_file_is_a_render_error() {
    let dir = PathBuf::from("target").join("font_unit");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("empty.ttf");
    std::fs::write(&path, b"").unwrap();

    let err = FontSource::File(path).load().unwrap_err();
    assert!(matches!(err, WavyError::Render(_)));
}

#[test]
fn garbage_bytes_register_no_family() {
    let font = LoadedFont {
        bytes: Arc::new(b"definitely not a font".to_vec()),
        index: 0,
        family: None,
    };
    assert!(TextLayoutEngine::new(font).is_err());
}

#[test]
fn default_source_is_system() {
    assert_eq!(FontSource::default(), FontSource::System);
}

#[test]
fn loaded_font_debug_hides_bytes() {
    let font = LoadedFont {
        bytes: Arc::new(vec![0; 1024]),
        index: 2,
        family: Some("Mono".to_string()),
    };
    let s = format!("{font:?}");
    assert!(s.contains("bytes_len: 1024"));
    assert!(s.contains("Mono"));
}
