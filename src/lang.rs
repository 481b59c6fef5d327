// src/lang.rs
use std::path::Path;

use tree_sitter::Language;

/// Source languages the scanner understands.
///
/// C headers and sources are parsed with the C++ grammar, which accepts the
/// string-building idioms of both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lang {
    Cpp,
}

/// Extensions treated as C/C++ sources.
pub const CPP_EXTENSIONS: &[&str] = &["c", "cc", "cpp", "cxx", "h", "hh", "hpp", "hxx"];

impl Lang {
    #[must_use]
    pub fn from_ext(ext: &str) -> Option<Self> {
        let lower = ext.to_ascii_lowercase();
        if CPP_EXTENSIONS.contains(&lower.as_str()) {
            Some(Self::Cpp)
        } else {
            None
        }
    }

    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_ext)
    }

    #[must_use]
    pub fn grammar(self) -> Language {
        match self {
            Self::Cpp => tree_sitter_cpp::LANGUAGE.into(),
        }
    }
}
