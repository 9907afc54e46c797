//! Line parser for the binding DSL.

use rabt_container::{Container, TypeInfo};
use tracing::{debug, trace};

use crate::catalog::TypeCatalog;
use crate::error::{DslError, Result};

const TYPE_DELIMITER: &str = "->";
const END_DELIMITER: &str = ";";
const COMMENT: &str = "//";

/// Splits a binding line into its left and right names.
///
/// Returns `Ok(None)` for blank lines and `//` comments.
///
/// ```
/// use rabt_dsl::split_line;
///
/// assert_eq!(split_line("  IBar -> Bar;").unwrap(), Some(("IBar", "Bar")));
/// assert_eq!(split_line("// IBar -> Bar;").unwrap(), None);
/// assert!(split_line("IBar - Bar;").is_err());
/// ```
pub fn split_line(line: &str) -> Result<Option<(&str, &str)>> {
    let trimmed = line.trim_start();
    if trimmed.is_empty() || trimmed.starts_with(COMMENT) {
        return Ok(None);
    }

    let delimiter = find_pattern(line, TYPE_DELIMITER, 0)?;
    let right_start = delimiter + TYPE_DELIMITER.len();
    let end = find_pattern(line, END_DELIMITER, right_start)?;

    let left = line[..delimiter].trim();
    let right = line[right_start..end].trim();
    Ok(Some((left, right)))
}

fn find_pattern(line: &str, pattern: &'static str, from: usize) -> Result<usize> {
    line[from..]
        .find(pattern)
        .map(|position| from + position)
        .ok_or_else(|| DslError::PatternNotFound {
            pattern,
            line: line.to_string(),
        })
}

/// Turns binding lines into container bindings.
#[derive(Debug, Clone)]
pub struct DependencyParser {
    catalog: TypeCatalog,
}

impl DependencyParser {
    pub fn new(catalog: TypeCatalog) -> Self {
        Self { catalog }
    }

    /// A parser over every type registered with [`catalog!`](crate::catalog).
    pub fn global() -> Self {
        Self::new(TypeCatalog::global())
    }

    pub fn catalog(&self) -> &TypeCatalog {
        &self.catalog
    }

    /// Parses one line into a (capability, implementation) pair.
    ///
    /// `Ok(None)` for comments, blank lines and lines naming a type the
    /// catalog does not know.
    pub fn parse(&self, line: &str) -> Result<Option<(TypeInfo, TypeInfo)>> {
        let Some((left, right)) = split_line(line)? else {
            return Ok(None);
        };

        match (self.catalog.find(left), self.catalog.find(right)) {
            (Some(capability), Some(implementation)) => Ok(Some((capability, implementation))),
            (capability, implementation) => {
                debug!(
                    left,
                    right,
                    left_known = capability.is_some(),
                    right_known = implementation.is_some(),
                    "Skipping line with unknown type"
                );
                Ok(None)
            }
        }
    }

    /// Parses `line` and binds the pair; `false` when the line was skipped.
    pub fn bind_to(&self, container: &mut Container, line: &str) -> Result<bool> {
        let Some((capability, implementation)) = self.parse(line)? else {
            return Ok(false);
        };
        trace!(capability = %capability.key(), implementation = %implementation.key(), "Binding parsed line");
        container.bind_types(capability, implementation)?;
        Ok(true)
    }

    /// Binds every line in order, stopping at the first failure.
    ///
    /// Returns the number of bindings created. Failures carry their
    /// 1-based line number.
    pub fn bind_text_to<I, S>(&self, container: &mut Container, lines: I) -> Result<usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut bound = 0;
        for (index, line) in lines.into_iter().enumerate() {
            let created = self
                .bind_to(container, line.as_ref())
                .map_err(|source| DslError::AtLine {
                    number: index + 1,
                    source: Box::new(source),
                })?;
            if created {
                bound += 1;
            }
        }
        Ok(bound)
    }
}
