use super::*;
use std::io::Write;
use tempfile::TempDir;

// =========================================================================
// Layout selection
// =========================================================================

#[test]
fn test_variant_layouts() {
    assert_eq!(Variant::default(), Variant::Dual);
    assert_eq!(Variant::Dual.layout(), Layout::dual());
    assert_eq!(Variant::Single.layout(), Layout::single());
}

#[test]
fn test_load_layout_prefers_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("layout.yaml");
    let mut custom = Layout::single();
    custom.value_columns = vec!["K".to_string()];
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(custom.to_yaml().unwrap().as_bytes()).unwrap();

    let loaded = load_layout(Variant::Dual, Some(&path)).unwrap();
    assert_eq!(loaded, custom);
    assert_eq!(load_layout(Variant::Single, None).unwrap(), Layout::single());
}

#[test]
fn test_load_layout_missing_file() {
    let result = load_layout(Variant::Dual, Some(Path::new("no/such/layout.yaml")));
    assert!(matches!(result, Err(ExtractError::Io(_))));
}

#[test]
fn test_load_layout_bad_yaml() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("layout.yaml");
    std::fs::write(&path, "identity_columns: 12\n").unwrap();
    assert!(matches!(
        load_layout(Variant::Dual, Some(&path)),
        Err(ExtractError::Yaml(_))
    ));
}

// =========================================================================
// Output folder
// =========================================================================

#[test]
fn test_output_folder_defaults_to_input_folder() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("folha.ods");
    let dir = output_folder(&input, None).unwrap();
    assert_eq!(dir, std::path::absolute(temp_dir.path()).unwrap());
}

#[test]
fn test_output_folder_override_is_absolute() {
    let dir = output_folder(Path::new("folha.ods"), Some(Path::new("out"))).unwrap();
    assert!(dir.is_absolute());
    assert!(dir.ends_with("out"));
}

#[test]
fn test_output_folder_of_bare_file_name() {
    let dir = output_folder(Path::new("folha.ods"), None).unwrap();
    assert_eq!(dir, std::env::current_dir().unwrap());
}

// =========================================================================
// run_extract failures
// =========================================================================

#[test]
fn test_run_extract_missing_source() {
    let temp_dir = TempDir::new().unwrap();
    let options = ExtractOptions::new(temp_dir.path().join("missing.ods"));
    assert!(matches!(
        run_extract(&options),
        Err(ExtractError::SourceNotFound(_))
    ));
}

#[test]
fn test_run_extract_unreadable_source() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("broken.ods");
    std::fs::write(&input, b"this is not a zip archive").unwrap();

    let options = ExtractOptions::new(&input);
    assert!(matches!(
        run_extract(&options),
        Err(ExtractError::SourceOpen { .. })
    ));
    // Nothing is written on failure
    assert!(!temp_dir.path().join("Progressão por Mérito UFGD.xlsx").exists());
}

#[test]
fn test_run_extract_invalid_layout_fails_before_reading() {
    let temp_dir = TempDir::new().unwrap();
    let layout_path = temp_dir.path().join("layout.yaml");
    let mut bad = Layout::dual();
    bad.identity_columns[0] = "1A".to_string();
    std::fs::write(&layout_path, bad.to_yaml().unwrap()).unwrap();

    let mut options = ExtractOptions::new(temp_dir.path().join("missing.ods"));
    options.layout_file = Some(layout_path);
    assert!(matches!(
        run_extract(&options),
        Err(ExtractError::InvalidColumn(_))
    ));
}
