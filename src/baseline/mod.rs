// src/baseline/mod.rs
//! Baseline generation over a file or directory tree.

pub mod store;

pub use store::{atomic_write, load_lines, parse_lines, Baseline};

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::discovery::{self, ExcludeSet};
use crate::error::{Error, Result};
use crate::extract::{scan, ExtractionFailure, Extractor, FailureMode, ScanOptions, ScanOutput};
use crate::syntax::{parse_cpp, TsNode};

#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub excludes: ExcludeSet,
    pub scan: ScanOptions,
}

/// Outcome for one source file.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: PathBuf,
    pub patterns: usize,
    pub failures: Vec<ExtractionFailure>,
    /// Read or parse error; the file contributed nothing.
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateStats {
    pub files_scanned: usize,
    pub files_failed: usize,
    pub extraction_failures: usize,
    pub patterns_found: usize,
    pub unique_patterns: usize,
    pub duration_ms: u128,
}

#[derive(Debug, Clone, Default)]
pub struct Generated {
    pub baseline: Baseline,
    pub files: Vec<FileReport>,
    pub stats: GenerateStats,
}

/// Scans every C/C++ source under `root` in parallel and unions the patterns.
///
/// # Errors
/// Returns error if `root` is missing, or, in strict mode, on the first file
/// that cannot be read, parsed or fully extracted.
pub fn generate(root: &Path, extractor: &Extractor, options: &GenerateOptions) -> Result<Generated> {
    let start = Instant::now();
    let files = discovery::discover(root, &options.excludes)?;
    info!(files = files.len(), root = %root.display(), "scanning sources");

    let results: Vec<(PathBuf, Result<ScanOutput>)> = files
        .par_iter()
        .map(|path| (path.clone(), scan_file(path, extractor, options.scan)))
        .collect();

    let mut generated = Generated::default();
    for (path, result) in results {
        match result {
            Ok(output) => {
                debug!(
                    path = %path.display(),
                    patterns = output.patterns.len(),
                    failures = output.failures.len(),
                    "scanned"
                );
                for failure in &output.failures {
                    warn!("{}: {failure}", path.display());
                }
                generated.stats.patterns_found += output.patterns.len();
                generated.stats.extraction_failures += output.failures.len();
                generated.files.push(FileReport {
                    path,
                    patterns: output.patterns.len(),
                    failures: output.failures,
                    error: None,
                });
                generated.baseline.extend_patterns(output.patterns);
            }
            Err(e) if options.scan.mode == FailureMode::Strict => return Err(e),
            Err(e) => {
                warn!("{e}");
                generated.stats.files_failed += 1;
                generated.files.push(FileReport {
                    path,
                    patterns: 0,
                    failures: Vec::new(),
                    error: Some(e.to_string()),
                });
            }
        }
    }

    generated.stats.files_scanned = generated.files.len();
    generated.stats.unique_patterns = generated.baseline.len();
    generated.stats.duration_ms = start.elapsed().as_millis();
    Ok(generated)
}

/// Reads and scans one file.
///
/// # Errors
/// Returns error if the file cannot be read or parsed, or on an extraction
/// failure in strict mode.
pub fn scan_file(path: &Path, extractor: &Extractor, options: ScanOptions) -> Result<ScanOutput> {
    let bytes = fs::read(path).map_err(|e| Error::io(e, path))?;
    let source = String::from_utf8_lossy(&bytes);
    scan_source(&source, path, extractor, options)
}

/// Parses and scans source text. `path` is only used in errors.
///
/// # Errors
/// Returns error if parsing fails, or on an extraction failure in strict mode.
pub fn scan_source(
    source: &str,
    path: &Path,
    extractor: &Extractor,
    options: ScanOptions,
) -> Result<ScanOutput> {
    let tree = parse_cpp(source).map_err(|e| {
        debug!(error = %e, "parser setup failed");
        Error::Parse(path.to_path_buf())
    })?;
    let root = TsNode::root(&tree, source.as_bytes());
    scan(&root, extractor, options).map_err(|failure| Error::Extraction {
        path: path.to_path_buf(),
        failure,
    })
}
