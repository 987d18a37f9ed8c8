//! Loading the parser's JSON AST into the in-memory IR.
//!
//! The schema lives in [`dto`]. Lowering interns every identifier and
//! converts `[start, end]` pairs to spans; malformed offsets and empty
//! identifiers are load errors, never validation problems.

pub mod dto;
mod lower;

use std::path::{Path, PathBuf};

use okl_ir::{InternError, Module, Span, SpanError, StringInterner};
use thiserror::Error;

pub use lower::lower_module;

/// Errors raised while reading or lowering an AST file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("`{}` is not a valid AST: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid span: {0}")]
    Span(#[from] SpanError),

    #[error("empty {what} name at {span:?}")]
    EmptyName { what: &'static str, span: Span },

    #[error(transparent)]
    Intern(#[from] InternError),
}

/// Parse an AST from JSON text. `origin` names the text in errors.
#[tracing::instrument(level = "debug", skip_all, fields(origin = %origin.display()))]
pub fn parse_module(
    text: &str,
    origin: &Path,
    interner: &StringInterner,
) -> Result<Module, LoadError> {
    let dto: dto::ModuleDto = serde_json::from_str(text).map_err(|source| LoadError::Json {
        path: origin.to_path_buf(),
        source,
    })?;
    let module = lower_module(&dto, interner)?;
    tracing::debug!(functions = module.functions.len(), "AST loaded");
    Ok(module)
}

/// Read and parse an AST file.
pub fn load_module(path: &Path, interner: &StringInterner) -> Result<Module, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_module(&text, path, interner)
}

#[cfg(test)]
mod tests;
