//! Typed stylesheet model consumed by the analysis passes
//!
//! Zero-copy node definitions using lifetime-generic `&'a str` spans into the
//! source text, produced by an external CSS parser before the engine runs.
//! Node order is cascade order and is preserved by every pass except where an
//! entry is deleted outright; the engine never constructs new rules,
//! selectors, or declarations.
//!
//! # Thread Safety
//!
//! All nodes hold shared `&'a str` data only and are `Send + Sync`. A single
//! analysis run takes exclusive `&mut` ownership of the tree for its
//! duration.
//!
//! # Examples
//!
//! ```rust
//! use rmrules_core::stylesheet::{Compound, Declaration, Node, Rule, Selector, Stylesheet};
//!
//! // `.note { color: red; }`
//! let stylesheet = Stylesheet {
//!     nodes: vec![Node::Rule(Rule {
//!         selectors: vec![Selector {
//!             compounds: vec![Compound { classes: vec!["note"], ..Compound::default() }],
//!         }],
//!         declarations: vec![Declaration { property: "color", value: "red" }],
//!     })],
//! };
//!
//! assert_eq!(stylesheet.to_string(), ".note{color:red;}");
//! ```

use alloc::vec::Vec;
use core::fmt;

mod selector;

pub(crate) use selector::set_equal;
pub use selector::{Attribute, Combinator, Compound, Pseudo, Selector};

/// Ordered stylesheet: the top-level node sequence in cascade order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Stylesheet<'a> {
    /// Top-level nodes in cascade order
    pub nodes: Vec<Node<'a>>,
}

impl<'a> Stylesheet<'a> {
    /// Number of style rules (excluding at-rules and comments)
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.nodes.iter().filter_map(Node::as_rule).count()
    }
}

/// Top-level stylesheet node
///
/// At-rules and comments are opaque to the engine and passed through
/// unchanged; only [`Rule`] nodes participate in the analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<'a> {
    /// Style rule: selector group plus declaration block
    Rule(Rule<'a>),
    /// At-rule, kept verbatim
    AtRule(AtRule<'a>),
    /// Comment, kept verbatim
    Comment(Comment<'a>),
}

impl<'a> Node<'a> {
    /// View this node as a style rule, if it is one
    #[must_use]
    pub const fn as_rule(&self) -> Option<&Rule<'a>> {
        match self {
            Self::Rule(rule) => Some(rule),
            Self::AtRule(_) | Self::Comment(_) => None,
        }
    }

    /// Mutable view of this node as a style rule, if it is one
    pub fn as_rule_mut(&mut self) -> Option<&mut Rule<'a>> {
        match self {
            Self::Rule(rule) => Some(rule),
            Self::AtRule(_) | Self::Comment(_) => None,
        }
    }
}

/// Style rule: a comma-separated selector group sharing one declaration block
///
/// Both sequences are cascade-significant. Among selectors, the position
/// decides which group member loses when two of them are separately
/// overridden; among declarations, a later declaration of the same property
/// wins within the rule.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Rule<'a> {
    /// Selector group, in written order
    pub selectors: Vec<Selector<'a>>,
    /// Declaration block, in written order
    pub declarations: Vec<Declaration<'a>>,
}

/// Opaque at-rule, stored as its raw source span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtRule<'a> {
    /// Raw at-rule text including the `@` prefix and body/terminator
    pub text: &'a str,
}

/// Comment node, stored without the `/*` and `*/` delimiters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comment<'a> {
    /// Comment body text
    pub text: &'a str,
}

/// Single property declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Declaration<'a> {
    /// Property name
    pub property: &'a str,
    /// Raw value text, importance marker included
    pub value: &'a str,
}

impl<'a> Declaration<'a> {
    /// Whether the value carries an `!important` marker
    ///
    /// Derived from the raw value text; an important declaration is never
    /// treated as overridden by a non-important one.
    #[must_use]
    pub fn is_important(&self) -> bool {
        self.value.contains("!important")
    }
}

impl fmt::Display for Declaration<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{};", self.property, self.value)
    }
}

impl fmt::Display for Rule<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, selector) in self.selectors.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{selector}")?;
        }
        write!(f, "{{")?;
        for declaration in &self.declarations {
            write!(f, "{declaration}")?;
        }
        write!(f, "}}")
    }
}

impl fmt::Display for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rule(rule) => write!(f, "{rule}"),
            Self::AtRule(at_rule) => write!(f, "{}", at_rule.text),
            Self::Comment(comment) => write!(f, "/*{}*/", comment.text),
        }
    }
}

/// Compact CSS serialization, used by diagnostics and tests
impl fmt::Display for Stylesheet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in &self.nodes {
            write!(f, "{node}")?;
        }
        Ok(())
    }
}
