//! Aggregate resolver
//!
//! Expands a list of `;`-separated resource expressions into the final set of
//! locators: inclusion matches minus exclusion matches. The first expression
//! that fails to parse or scan fails the whole call; there is no partial
//! success and nothing is cached between calls.
//!
//! # Examples
//!
//! ```no_run
//! use specrun::resolver::Resolver;
//! use specrun::roots::ResourceRoots;
//!
//! let roots = ResourceRoots::new().with("lib.jar").unwrap();
//! let resolver = Resolver::new(roots);
//! let set = resolver.expand("classpath:/pkg/*.js;~classpath:/pkg/*Test.js").unwrap();
//! ```

use std::collections::BTreeSet;

use thiserror::Error;

use crate::expression::{Expression, ExpressionError};
use crate::locator::Locator;
use crate::roots::ResourceRoots;
use crate::scanner::{ScanError, Scanner};

/// Errors that can occur during resolution
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Expression does not parse
    #[error("invalid expression `{expression}`: {source}")]
    Parse {
        /// The expression as supplied
        expression: String,
        /// Underlying parse error
        source: ExpressionError,
    },

    /// Scanning the expression failed
    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// How exclusion matches combine with inclusion matches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExclusionMode {
    /// Set subtraction: inclusions minus exclusions. An exclusion matching
    /// nothing that was included has no effect.
    #[default]
    Subtract,

    /// Symmetric difference, reproducing the legacy behavior: an exclusion
    /// match with no inclusion counterpart reappears in the output.
    Disjunction,
}

/// Resolves expression lists against a set of resource roots
#[derive(Debug, Default)]
pub struct Resolver {
    /// Registered resource roots for `classpath:` lookups
    roots: ResourceRoots,

    /// Exclusion combination semantics
    mode: ExclusionMode,
}

impl Resolver {
    /// Create a resolver over the given roots, using subtraction semantics
    #[must_use]
    pub fn new(roots: ResourceRoots) -> Self {
        Self {
            roots,
            mode: ExclusionMode::default(),
        }
    }

    /// Switch the exclusion combination semantics
    #[must_use]
    pub const fn with_mode(mut self, mode: ExclusionMode) -> Self {
        self.mode = mode;
        self
    }

    /// The registered resource roots
    #[must_use]
    pub const fn roots(&self) -> &ResourceRoots {
        &self.roots
    }

    /// The active exclusion combination semantics
    #[must_use]
    pub const fn mode(&self) -> ExclusionMode {
        self.mode
    }

    /// Expand one `;`-separated expression list
    pub fn expand(&self, expressions: &str) -> Result<BTreeSet<Locator>, ResolveError> {
        self.expand_all(&[expressions])
    }

    /// Expand several expression lists into one resolved set
    ///
    /// Every element may itself be `;`-separated; blank fragments are
    /// skipped. All inclusion matches accumulate into one set, all exclusion
    /// matches into another, and the final result combines them per the
    /// resolver's [`ExclusionMode`].
    pub fn expand_all<S: AsRef<str>>(
        &self,
        expressions: &[S],
    ) -> Result<BTreeSet<Locator>, ResolveError> {
        let mut includes = BTreeSet::new();
        let mut excludes = BTreeSet::new();

        for raw in expressions
            .iter()
            .flat_map(|list| list.as_ref().split(';'))
            .map(str::trim)
            .filter(|fragment| !fragment.is_empty())
        {
            let expression =
                Expression::parse(raw).map_err(|source| ResolveError::Parse {
                    expression: raw.to_string(),
                    source,
                })?;
            let scanner = Scanner::for_expression(&expression, &self.roots)?;
            let found = scanner.list()?;

            if expression.is_exclusion() {
                excludes.extend(found);
            } else {
                includes.extend(found);
            }
        }

        let resolved = match self.mode {
            ExclusionMode::Subtract => includes.difference(&excludes).cloned().collect(),
            ExclusionMode::Disjunction => {
                includes.symmetric_difference(&excludes).cloned().collect()
            }
        };
        Ok(resolved)
    }
}
