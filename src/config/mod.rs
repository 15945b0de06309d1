//! Conversion configuration loaded from a JSON document
//!
//! The configuration mirrors the request schema of the conversion service's
//! root endpoint. Every option is optional and left out of the request body
//! when unset. Options with a fixed set of values are parsed into closed enums
//! so an invalid value cannot survive loading.

pub mod options;

use crate::error::ConfigError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;

pub use options::{
    CiteMethod, EmailObfuscation, HighlightStyle, HtmlMathMethod, IpynbOutput, OptionValue,
    ReferenceLocation, TopLevelDivision, TrackChanges, Wrap,
};

/// Port used when the configuration does not name one
pub const DEFAULT_PORT: &str = ":3030";

/// Extension to document type mapping used when `ext-types` leaves one out
pub const DEFAULT_EXT_TYPES: &[(&str, &str)] = &[(".md", "markdown"), (".html", "html5")];

/// Options sent to the conversion service, plus local connection settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConversionConfig {
    /// Port the conversion service listens on, always starting with ':'
    #[serde(default, deserialize_with = "port_from_json", skip_serializing)]
    pub port: String,
    /// Source document type, e.g. markdown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// Target document type, e.g. html5
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub shift_heading_level_by: Option<i32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub indented_code_classes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_image_extension: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tab_stop: Option<u32>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub track_changes: Option<TrackChanges>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub abbreviations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standalone: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub variables: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dpi: Option<u32>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub wrap: Option<Wrap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_of_contents: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toc_depth: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strip_comments: Option<bool>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub highlight_style: Option<HighlightStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embed_resources: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_q_tags: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ascii: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_links: Option<bool>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub reference_location: Option<ReferenceLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub setext_headers: Option<bool>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub top_level_division: Option<TopLevelDivision>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_sections: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub number_offset: Vec<u32>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub html_math_method: Option<HtmlMathMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listings: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incremental: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slide_level: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_divs: Option<bool>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub email_obfuscation: Option<EmailObfuscation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_doc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epub_cover_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epub_metadata: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epub_chapter_level: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epub_subdirectory: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub epub_fonts: Vec<String>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub ipynb_output: Option<IpynbOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub citeproc: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bibliography: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csl: Option<String>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub cite_method: Option<CiteMethod>,
    /// Extra files made available to the service, path to base64 contents
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub files: BTreeMap<String, String>,

    /// File extension to document type, e.g. ".html" to "html5"
    #[serde(default, skip_serializing)]
    pub ext_types: BTreeMap<String, String>,

    /// Log successful exchanges as well as failures
    #[serde(skip)]
    pub verbose: bool,
}

impl ConversionConfig {
    /// Create an empty configuration pointing at the default port
    pub fn new() -> Self {
        let mut config = Self {
            port: DEFAULT_PORT.to_string(),
            ..Default::default()
        };
        config.apply_default_ext_types();
        config
    }

    /// Read a JSON configuration document from `path`
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        Self::from_json_str(&src).map_err(|err| match err {
            ConfigError::Parse { path: None, source } => ConfigError::Parse {
                path: Some(path.to_path_buf()),
                source,
            },
            other => other,
        })
    }

    /// Parse, normalize and validate a JSON configuration document
    pub fn from_json_str(src: &str) -> Result<Self, ConfigError> {
        let parse = |source| ConfigError::Parse { path: None, source };

        let mut doc: Map<String, Value> = serde_json::from_str(src).map_err(parse)?;
        let choices = EnumChoices::take_from(&mut doc);
        let mut config: ConversionConfig =
            serde_json::from_value(Value::Object(doc)).map_err(parse)?;

        config.port = normalize_port(&config.port);
        config.apply_default_ext_types();
        choices.apply(&mut config)?;
        Ok(config)
    }

    /// Address of the service's root endpoint
    pub fn endpoint(&self) -> String {
        format!("http://localhost{}/", normalize_port(&self.port))
    }

    /// Document type registered for a file extension (leading dot optional)
    pub fn doc_type_for(&self, ext: &str) -> Option<&str> {
        let key = if ext.starts_with('.') {
            ext.to_string()
        } else {
            format!(".{}", ext)
        };
        self.ext_types.get(&key).map(String::as_str)
    }

    /// Set the source document type
    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    /// Set the target document type
    pub fn with_to(mut self, to: impl Into<String>) -> Self {
        self.to = Some(to.into());
        self
    }

    /// Enable/disable verbose logging
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    fn apply_default_ext_types(&mut self) {
        for (ext, doc_type) in DEFAULT_EXT_TYPES {
            self.ext_types
                .entry(ext.to_string())
                .or_insert_with(|| doc_type.to_string());
        }
    }
}

/// Prefix `port` with ':' and fall back to the default when empty
pub fn normalize_port(port: &str) -> String {
    if port.is_empty() {
        DEFAULT_PORT.to_string()
    } else if port.starts_with(':') {
        port.to_string()
    } else {
        format!(":{}", port)
    }
}

fn port_from_json<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Port {
        Text(String),
        Number(u16),
    }

    Ok(match Option::<Port>::deserialize(deserializer)? {
        Some(Port::Text(s)) => s,
        Some(Port::Number(n)) => n.to_string(),
        None => String::new(),
    })
}

/// Raw values of the enumerated fields, validated after the rest of the
/// document has been parsed.
struct EnumChoices {
    values: Map<String, Value>,
}

const ENUM_FIELDS: &[&str] = &[
    TrackChanges::FIELD,
    Wrap::FIELD,
    HighlightStyle::FIELD,
    ReferenceLocation::FIELD,
    TopLevelDivision::FIELD,
    HtmlMathMethod::FIELD,
    EmailObfuscation::FIELD,
    IpynbOutput::FIELD,
    CiteMethod::FIELD,
];

impl EnumChoices {
    fn take_from(doc: &mut Map<String, Value>) -> Self {
        let values = ENUM_FIELDS
            .iter()
            .filter_map(|field| doc.remove(*field).map(|v| (field.to_string(), v)))
            .collect();
        Self { values }
    }

    /// Validation stops at the first rejected value, in this order.
    fn apply(mut self, config: &mut ConversionConfig) -> Result<(), ConfigError> {
        config.track_changes = self.take()?;
        config.wrap = self.take()?;
        config.highlight_style = self.take()?;
        config.reference_location = self.take()?;
        config.top_level_division = self.take()?;
        config.html_math_method = self.take()?;
        config.email_obfuscation = self.take()?;
        config.ipynb_output = self.take()?;
        config.cite_method = self.take()?;
        Ok(())
    }

    /// An absent, null or empty value leaves the option unset.
    fn take<T: OptionValue>(&mut self) -> Result<Option<T>, ConfigError> {
        match self.values.remove(T::FIELD) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) if s.is_empty() => Ok(None),
            Some(Value::String(s)) => s.parse().map(Some),
            Some(other) => Err(ConfigError::unsupported(T::FIELD, other.to_string())),
        }
    }
}
