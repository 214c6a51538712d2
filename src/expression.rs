//! Resource expression parsing
//!
//! An expression describes a set of resources to include or exclude.
//! Expressions support:
//! - Classpath resources: `classpath:/org/app/*.js`
//! - Filesystem resources: `file:/tmp/data/*.html`, `src/js/runner.js`
//! - Opaque remote URLs: `http://example.com/lib.js` (no glob expansion)
//! - Exclusions: a leading `~` removes the matches from the final set
//!
//! # Examples
//!
//! ```
//! use specrun::expression::{Expression, Protocol};
//!
//! let e = Expression::parse("classpath:/org/app/*.js").unwrap();
//! assert_eq!(e.protocol(), Protocol::Classpath);
//! assert_eq!(e.root_dir(), "/org/app");
//! assert_eq!(e.pattern(), "*.js");
//! assert!(!e.is_exclusion());
//!
//! let e = Expression::parse("~file:/tmp/x/*Test.html").unwrap();
//! assert!(e.is_exclusion());
//! assert_eq!(e.root_dir(), "/tmp/x");
//! ```

use std::path::Path;
use std::sync::LazyLock;

use glob::{MatchOptions, Pattern};
use regex::Regex;
use thiserror::Error;

/// Scheme tokens must look like a URL scheme before we reject them
static SCHEME_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]*$").expect("scheme regex"));

/// Glob matching options: `*` and `?` stay within one path segment,
/// `**` spans directories
const GLOB_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Errors that can occur when parsing an expression
#[derive(Debug, Error)]
pub enum ExpressionError {
    /// Expression string was empty
    #[error("empty expression")]
    Empty,

    /// Scheme token is not `classpath`, `file` or a URL scheme
    #[error("unknown scheme `{scheme}` in expression `{expression}`")]
    UnknownScheme {
        /// The offending scheme token
        scheme: String,
        /// The expression as supplied
        expression: String,
    },

    /// Wildcard pattern does not compile
    #[error("invalid pattern in expression `{expression}`: {source}")]
    InvalidPattern {
        /// The expression as supplied
        expression: String,
        /// Underlying glob compilation error
        source: glob::PatternError,
    },
}

/// Protocol of a resource expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    /// Resource resolved through the registered resource roots
    Classpath,
    /// Plain filesystem resource (also the default when no scheme is given)
    File,
    /// Opaque network URL, carried literally without expansion
    Remote,
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Classpath => write!(f, "classpath"),
            Self::File => write!(f, "file"),
            Self::Remote => write!(f, "remote"),
        }
    }
}

/// The pattern portion of an expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternSpec {
    /// Exact resource name, must match exactly one resource
    Exact(String),
    /// Wildcard pattern matched against paths relative to the root
    Glob(GlobPattern),
}

/// A compiled glob pattern
#[derive(Debug, Clone)]
pub struct GlobPattern {
    /// Original pattern string
    pattern: String,

    /// Compiled matcher
    compiled: Pattern,
}

impl PartialEq for GlobPattern {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

impl Eq for GlobPattern {}

/// A parsed resource expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    /// The original expression string, `~` included
    raw: String,

    /// True when the expression removes matches from the final set
    exclusion: bool,

    /// Derived protocol
    protocol: Protocol,

    /// Scheme and path with the exclusion marker stripped
    location: String,

    /// Path portion up to the first wildcard-bearing segment
    root_dir: String,

    /// Pattern portion from the first wildcard-bearing segment on
    pattern: PatternSpec,
}

impl Expression {
    /// Parse a raw expression string
    ///
    /// # Format
    ///
    /// ```text
    /// ["~"] [scheme ":"] path
    ///
    /// scheme: classpath | file      (anything URL-shaped passes through)
    /// path:   filesystem-like path, optionally containing * or ? globs
    /// ```
    pub fn parse(s: &str) -> Result<Self, ExpressionError> {
        let raw = s.trim();
        if raw.is_empty() {
            return Err(ExpressionError::Empty);
        }

        let (exclusion, location) =
            raw.strip_prefix('~').map_or((false, raw), |rest| (true, rest));
        if location.is_empty() {
            return Err(ExpressionError::Empty);
        }

        let (protocol, path) = Self::split_scheme(raw, location)?;

        // Remote URLs are literal resources, there is nothing to split
        if protocol == Protocol::Remote {
            return Ok(Self {
                raw: raw.to_string(),
                exclusion,
                protocol,
                location: location.to_string(),
                root_dir: String::new(),
                pattern: PatternSpec::Exact(location.to_string()),
            });
        }

        let (root_dir, pattern_text) = Self::split_root(path);
        let pattern = if pattern_text.contains(['*', '?']) {
            let compiled = Pattern::new(&pattern_text).map_err(|source| {
                ExpressionError::InvalidPattern {
                    expression: raw.to_string(),
                    source,
                }
            })?;
            PatternSpec::Glob(GlobPattern {
                pattern: pattern_text,
                compiled,
            })
        } else {
            PatternSpec::Exact(pattern_text)
        };

        Ok(Self {
            raw: raw.to_string(),
            exclusion,
            protocol,
            location: location.to_string(),
            root_dir,
            pattern,
        })
    }

    /// Classify the scheme token and return the protocol with the path
    /// portion. `raw` is only used for error reporting.
    fn split_scheme<'a>(
        raw: &str,
        location: &'a str,
    ) -> Result<(Protocol, &'a str), ExpressionError> {
        let Some(colon) = location.find(':') else {
            return Ok((Protocol::File, location));
        };
        let token = &location[..colon];
        let path = &location[colon + 1..];

        match token {
            "classpath" => Ok((Protocol::Classpath, path)),
            "file" => Ok((Protocol::File, path)),
            // Single letter before ':' is a Windows drive, not a scheme
            _ if token.len() == 1 => Ok((Protocol::File, location)),
            _ if !SCHEME_TOKEN.is_match(token) => Ok((Protocol::File, location)),
            _ if path.starts_with("//") => Ok((Protocol::Remote, location)),
            _ => Err(ExpressionError::UnknownScheme {
                scheme: token.to_string(),
                expression: raw.to_string(),
            }),
        }
    }

    /// Split a path at the last `/` preceding the first wildcard segment.
    /// Without a wildcard the split is parent directory / exact filename.
    fn split_root(path: &str) -> (String, String) {
        let segments: Vec<&str> = path.split('/').collect();
        let split_at = segments
            .iter()
            .position(|segment| segment.contains(['*', '?']))
            .unwrap_or(segments.len().saturating_sub(1));

        let mut root = segments[..split_at].join("/");
        if root.is_empty() && path.starts_with('/') {
            root.push('/');
        }
        let pattern = segments[split_at..].join("/");
        (root, pattern)
    }

    /// The original expression string, exclusion marker included
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Whether this expression removes its matches from the final set
    #[must_use]
    pub const fn is_exclusion(&self) -> bool {
        self.exclusion
    }

    /// Derived protocol
    #[must_use]
    pub const fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// Scheme and path with the exclusion marker stripped
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Root directory portion (no wildcard in it)
    #[must_use]
    pub fn root_dir(&self) -> &str {
        &self.root_dir
    }

    /// Pattern portion as text
    #[must_use]
    pub fn pattern(&self) -> &str {
        match &self.pattern {
            PatternSpec::Exact(p) => p,
            PatternSpec::Glob(g) => &g.pattern,
        }
    }

    /// The parsed pattern
    #[must_use]
    pub const fn pattern_spec(&self) -> &PatternSpec {
        &self.pattern
    }

    /// Whether the pattern carries a wildcard
    #[must_use]
    pub const fn is_glob(&self) -> bool {
        matches!(self.pattern, PatternSpec::Glob(_))
    }

    /// Whether the pattern spans more than one path segment, requiring a
    /// recursive scan
    #[must_use]
    pub fn spans_directories(&self) -> bool {
        self.pattern().contains('/')
    }

    /// The literal URL of a remote expression
    #[must_use]
    pub fn remote_url(&self) -> Option<&str> {
        match self.protocol {
            Protocol::Remote => Some(&self.location),
            Protocol::Classpath | Protocol::File => None,
        }
    }

    /// Check whether a path, relative to the expression root, matches the
    /// pattern
    pub fn matches(&self, path: impl AsRef<Path>) -> bool {
        match &self.pattern {
            PatternSpec::Exact(exact) => Path::new(exact) == path.as_ref(),
            PatternSpec::Glob(g) => g.compiled.matches_path_with(path.as_ref(), GLOB_OPTIONS),
        }
    }
}
