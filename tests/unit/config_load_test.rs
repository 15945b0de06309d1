use assert_matches::assert_matches;
use md2html::config::{HighlightStyle, TopLevelDivision, Wrap};
use md2html::{ConfigError, ConversionConfig};
use pretty_assertions::assert_eq;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(json: &str) -> NamedTempFile {
    let mut tmp = NamedTempFile::new().unwrap();
    write!(tmp, "{}", json).unwrap();
    tmp
}

/// (field, rejected value, accepted value)
const ENUMERATED_FIELDS: &[(&str, &str, &str)] = &[
    ("track-changes", "maybe", "accept"),
    ("wrap", "sometimes", "preserve"),
    ("highlight-style", "solarized", "breezeDark"),
    ("reference-location", "page", "block"),
    ("top-level-division", "volume", "chapter"),
    ("html-math-method", "latex", "katex"),
    ("email-obfuscation", "rot13", "javascript"),
    ("ipynb-output", "some", "best"),
    ("cite-method", "apa", "biblatex"),
];

#[test]
fn test_each_enumerated_field_rejects_unknown_values() {
    for (field, bad, good) in ENUMERATED_FIELDS {
        let tmp = write_config(&format!(r#"{{"from": "markdown", "{}": "{}"}}"#, field, bad));
        let err = ConversionConfig::load(tmp.path()).unwrap_err();
        assert_eq!(err.field(), Some(*field));
        assert!(err.to_string().contains(bad), "{} should name {}", err, bad);

        let tmp = write_config(&format!(r#"{{"from": "markdown", "{}": "{}"}}"#, field, good));
        assert!(ConversionConfig::load(tmp.path()).is_ok(), "{} = {}", field, good);

        let tmp = write_config(&format!(r#"{{"from": "markdown", "{}": ""}}"#, field));
        assert!(ConversionConfig::load(tmp.path()).is_ok(), "{} unset", field);
    }
}

#[test]
fn test_port_normalization() {
    let tmp = write_config(r#"{"port": "8080"}"#);
    assert_eq!(ConversionConfig::load(tmp.path()).unwrap().port, ":8080");

    let tmp = write_config(r#"{}"#);
    assert_eq!(ConversionConfig::load(tmp.path()).unwrap().port, ":3030");

    let tmp = write_config(r#"{"port": ":9000"}"#);
    assert_eq!(ConversionConfig::load(tmp.path()).unwrap().port, ":9000");
}

#[test]
fn test_full_document() {
    let tmp = write_config(
        r#"{
            "from": "markdown",
            "to": "html5",
            "standalone": true,
            "shift-heading-level-by": -1,
            "tab-stop": 4,
            "wrap": "none",
            "columns": 80,
            "table-of-contents": true,
            "toc-depth": 2,
            "highlight-style": "tango",
            "top-level-division": "section",
            "number-offset": [1, 2],
            "bibliography": ["refs.bib"],
            "variables": {"lang": "en", "draft": true},
            "files": {"logo.png": "iVBORw0KGgo="}
        }"#,
    );
    let config = ConversionConfig::load(tmp.path()).unwrap();

    assert_eq!(config.standalone, Some(true));
    assert_eq!(config.shift_heading_level_by, Some(-1));
    assert_eq!(config.tab_stop, Some(4));
    assert_eq!(config.wrap, Some(Wrap::None));
    assert_eq!(config.columns, Some(80));
    assert_eq!(config.toc_depth, Some(2));
    assert_eq!(config.highlight_style, Some(HighlightStyle::Tango));
    assert_eq!(config.top_level_division, Some(TopLevelDivision::Section));
    assert_eq!(config.number_offset, vec![1, 2]);
    assert_eq!(config.bibliography, vec!["refs.bib".to_string()]);
    assert_eq!(config.variables["lang"], "en");
    assert_eq!(config.files["logo.png"], "iVBORw0KGgo=");
    assert!(!config.verbose);
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.json");
    let err = ConversionConfig::load(&path).unwrap_err();
    assert_matches!(err, ConfigError::Io { path: ref p, .. } if p == &path);
}

#[test]
fn test_malformed_document_names_file() {
    let tmp = write_config(r#"{"from": "markdown""#);
    let err = ConversionConfig::load(tmp.path()).unwrap_err();
    assert_matches!(err, ConfigError::Parse { path: Some(_), .. });
    assert!(err.to_string().contains(&tmp.path().display().to_string()));
}

#[test]
fn test_wrong_value_type_is_a_parse_error() {
    let tmp = write_config(r#"{"standalone": "yes"}"#);
    assert_matches!(
        ConversionConfig::load(tmp.path()),
        Err(ConfigError::Parse { .. })
    );
}
