//! Markdown to HTML conversion through a pandoc-server compatible service
//!
//! A JSON configuration document supplies the request options, a
//! [`ConversionClient`] posts documents to the service's root endpoint, and
//! [`walk`](walk::walk) converts a whole directory tree.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod walk;

// Re-export commonly used types
pub use client::{ContentType, ConversionClient, ConversionRequest};
pub use config::ConversionConfig;
pub use error::{ConfigError, ConvertError, Error, FileError, Result, WalkError};
pub use walk::{walk, WalkOptions, WalkReport};

/// Load a configuration document and convert `input` with it
pub fn convert_with_config_file<R: std::io::Read>(
    config_path: impl AsRef<std::path::Path>,
    input: R,
    content_type: &str,
) -> Result<Vec<u8>> {
    let client = ConversionClient::new(ConversionConfig::load(config_path)?);
    Ok(client.convert(input, content_type)?)
}
