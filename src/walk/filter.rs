use std::path::Path;

/// Strip the leading dot from an extension such as ".md"
pub fn bare_extension(ext: &str) -> &str {
    ext.strip_prefix('.').unwrap_or(ext)
}

/// Return true if the path is a regular file with the given extension
pub fn has_extension(path: &Path, ext: &str) -> bool {
    path.is_file() && path.extension().is_some_and(|e| e == bare_extension(ext))
}
