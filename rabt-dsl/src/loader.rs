//! Loads binding files into a container.

use std::fs;
use std::path::Path;

use rabt_container::Container;
use tracing::{info, instrument};

use crate::error::{DslError, Result};
use crate::parser::DependencyParser;

/// Reads a binding file and feeds its lines to a [`DependencyParser`].
#[derive(Debug, Clone, Copy)]
pub struct DependencyFile<'p> {
    parser: &'p DependencyParser,
}

impl<'p> DependencyFile<'p> {
    pub fn new(parser: &'p DependencyParser) -> Self {
        Self { parser }
    }

    pub fn parser(&self) -> &'p DependencyParser {
        self.parser
    }

    /// Binds every line of the file at `path`; returns the number of bindings.
    ///
    /// # Errors
    /// - [`DslError::FileNotFound`] when `path` is not an existing file
    /// - [`DslError::Io`] when it cannot be read
    /// - any error of [`DependencyParser::bind_text_to`]
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load_from_file(&self, container: &mut Container, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(DslError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let text = fs::read_to_string(path).map_err(|source| DslError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let bound = self.parser.bind_text_to(container, text.lines())?;
        info!(bindings = bound, "Loaded binding file");
        Ok(bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TypeCatalog;
    use crate::fixtures::{Bar, Foo, IBar, IFoo};

    const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/dependencies.txt");

    fn parser() -> DependencyParser {
        DependencyParser::new(
            TypeCatalog::new()
                .with::<dyn IFoo>()
                .with::<Foo>()
                .with::<dyn IBar>()
                .with::<Bar>(),
        )
    }

    #[test]
    fn missing_file() {
        let parser = parser();
        let mut container = Container::new();
        let err = DependencyFile::new(&parser)
            .load_from_file(&mut container, "FileNameThatNotExists.txt")
            .unwrap_err();
        assert_eq!(err.to_string(), "File not found");
        assert!(matches!(err, DslError::FileNotFound { .. }));
    }

    #[test]
    fn directory_is_not_a_file() {
        let parser = parser();
        let mut container = Container::new();
        let err = DependencyFile::new(&parser)
            .load_from_file(&mut container, env!("CARGO_MANIFEST_DIR"))
            .unwrap_err();
        assert!(matches!(err, DslError::FileNotFound { .. }));
    }

    #[test]
    fn loads_fixture() {
        let parser = parser();
        let mut container = Container::new();
        let bound = DependencyFile::new(&parser)
            .load_from_file(&mut container, FIXTURE)
            .unwrap();

        assert_eq!(bound, 2);
        assert!(container.get::<dyn IBar>().is_ok());
    }
}
