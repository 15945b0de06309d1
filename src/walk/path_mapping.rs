use std::path::{Path, PathBuf};

/// Map a source file to the file its converted output is written to.
/// The output sits next to the source with its extension replaced.
pub fn map_source_to_target(source: &Path, to_ext: &str) -> PathBuf {
    source.with_extension(super::filter::bare_extension(to_ext))
}
