use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// One `<base>.pat`/`<base>.doc` pair from the examples directory.
///
/// The document path is derived from the pattern path, never discovered on
/// its own; neither file is checked for existence here. A missing document
/// simply surfaces as a failure from the matcher when the pair is invoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamplePair {
    /// Shared base name of the two files, e.g. `hello` for `hello.pat`.
    pub base: String,
    /// Path of the pattern file (`<base>.pat`).
    pub pattern: PathBuf,
    /// Path of the document file (`<base>.doc`), same directory as `pattern`.
    pub doc: PathBuf,
}

impl ExamplePair {
    /// Build a pair from a pattern-file path.
    ///
    /// Returns `None` unless the path carries a `.pat` extension; the
    /// document path is the same path with the suffix swapped for `.doc`.
    pub fn from_pattern(pattern: PathBuf) -> Option<Self> {
        if pattern.extension()? != "pat" {
            return None;
        }
        let base = pattern.file_stem()?.to_string_lossy().into_owned();
        let doc = pattern.with_extension("doc");
        Some(Self { base, pattern, doc })
    }
}

/// List the example pairs in `dir`, sorted lexicographically by base name.
///
/// Only regular files with a `.pat` extension count; everything else in the
/// directory is ignored. Directory listing order is not stable across
/// platforms, so the result is sorted to keep demo output reproducible.
pub fn discover_pairs(dir: &Path) -> Result<Vec<ExamplePair>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("cannot list examples directory {}", dir.display()))?;

    let mut pairs = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("cannot read entry in {}", dir.display()))?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if let Some(pair) = ExamplePair::from_pattern(entry.path()) {
            pairs.push(pair);
        }
    }
    pairs.sort_by(|a, b| a.base.cmp(&b.base));
    Ok(pairs)
}
