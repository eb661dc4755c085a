//! System output files and their alignment with a benchmark manifest.
//!
//! Output files are named `<number>.<ext>` or `<number>_<label>.<ext>`. The
//! number orders the files; after sorting, the *i*-th file belongs to the
//! *i*-th dataset of the manifest.

use crate::errors::{DomainError, DomainResult};
use crate::manifest::ManifestEntry;
use std::cmp::Ordering;
use std::fmt;
use std::path::{Path, PathBuf};

/// Numeric prefix of an output file name.
///
/// Kept as its decimal digits without leading zeros, so prefixes of any
/// length compare by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ordinal(String);

impl Ordinal {
    fn from_digits(digits: &[u8]) -> Self {
        let start = digits
            .iter()
            .position(|&b| b != b'0')
            .unwrap_or(digits.len().saturating_sub(1));
        Self(digits[start..].iter().map(|&b| char::from(b)).collect())
    }

    /// Digits of the prefix, without leading zeros
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Ord for Ordinal {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for Ordinal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Ordinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A system output file together with its ordering key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    /// Path as given by the user
    pub path: PathBuf,
    /// Numeric prefix of the file name
    pub ordinal: Ordinal,
}

impl OutputFile {
    /// Validate a path against the naming convention
    pub fn parse(path: impl Into<PathBuf>) -> DomainResult<Self> {
        let path = path.into();
        match ordinal_of(&path) {
            Some(ordinal) => Ok(Self { path, ordinal }),
            None => Err(DomainError::InvalidOutputFileName { path }),
        }
    }

    /// File name without directories, for display
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Numeric prefix of a file name: the part before the first `.`, then before the first `_`.
///
/// Works on the raw name bytes; the rest of the name need not be UTF-8.
fn ordinal_of(path: &Path) -> Option<Ordinal> {
    let name = path.file_name()?.as_encoded_bytes();
    let stem = name.split(|&b| b == b'.').next().unwrap_or_default();
    let prefix = stem.split(|&b| b == b'_').next().unwrap_or_default();

    if prefix.is_empty() || !prefix.iter().all(u8::is_ascii_digit) {
        return None;
    }
    Some(Ordinal::from_digits(prefix))
}

/// Validate every path and sort them by numeric prefix.
///
/// A single bad name rejects the whole set. Files sharing a prefix keep the
/// order they were given in.
pub fn order_output_files<I, P>(paths: I) -> DomainResult<Vec<OutputFile>>
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    let mut files = paths
        .into_iter()
        .map(OutputFile::parse)
        .collect::<DomainResult<Vec<_>>>()?;

    // stable: ties keep their input order
    files.sort_by(|a, b| a.ordinal.cmp(&b.ordinal));
    Ok(files)
}

/// Pair manifest entries with sorted output files by position.
///
/// Fails when there are fewer files than entries. Files past the end of the
/// manifest are left unpaired.
pub fn pair_with_manifest<'a>(
    entries: &'a [ManifestEntry],
    files: &'a [OutputFile],
) -> DomainResult<Vec<(&'a ManifestEntry, &'a OutputFile)>> {
    if files.len() < entries.len() {
        return Err(DomainError::OutputCountMismatch {
            entries: entries.len(),
            files: files.len(),
        });
    }
    if files.len() > entries.len() {
        tracing::warn!(
            entries = entries.len(),
            files = files.len(),
            "more system output files than benchmark datasets, extra files are ignored"
        );
    }
    Ok(entries.iter().zip(files.iter()).collect())
}
