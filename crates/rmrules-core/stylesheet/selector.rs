//! Selector chain model
//!
//! A selector is a chain of compound selectors joined by combinators. The
//! chain is stored key-first: index 0 is the key (rightmost/target) compound
//! and ascending indices walk outward to the leftmost ancestor, mirroring the
//! back-linked shape an external selector parser produces. Each compound
//! carries the combinator that joins it to its ancestor; for the outermost
//! compound that field is vacuous and left at [`Combinator::Descendant`].
//!
//! Class, attribute, and pseudo collections compare with set semantics:
//! `.a.b` and `.b.a` are structurally equal.

use alloc::vec::Vec;
use core::fmt;

/// Combinator joining a compound to its ancestor compound
///
/// `Descendant` (whitespace) is the weakest, most permissive operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Combinator {
    /// Whitespace combinator, matches any ancestor
    #[default]
    Descendant,
    /// `>` combinator, matches the direct parent only
    Child,
    /// `+` combinator, matches the immediately preceding sibling
    NextSibling,
    /// `~` combinator, matches any preceding sibling
    SubsequentSibling,
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Descendant => write!(f, " "),
            Self::Child => write!(f, ">"),
            Self::NextSibling => write!(f, "+"),
            Self::SubsequentSibling => write!(f, "~"),
        }
    }
}

/// Attribute predicate `[name]` or `[name operator "value"]`
///
/// Presence-only predicates store empty `operator` and `value`. Attribute
/// matching is not assumption-driven, so the override proof demands exact
/// equality on all three fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute<'a> {
    /// Attribute name
    pub name: &'a str,
    /// Match operator (`=`, `~=`, `|=`, `^=`, `$=`, `*=`), empty for presence
    pub operator: &'a str,
    /// Literal value, empty for presence
    pub value: &'a str,
}

impl fmt::Display for Attribute<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.operator.is_empty() {
            write!(f, "[{}]", self.name)
        } else {
            write!(f, "[{}{}\"{}\"]", self.name, self.operator, self.value)
        }
    }
}

/// Pseudo-class or pseudo-element predicate
///
/// The engine never reasons about pseudo contents (`:not(...)` included);
/// pseudos only participate in the proof through exact set equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pseudo<'a> {
    /// Pseudo name without the leading colon(s)
    pub name: &'a str,
    /// Raw argument text between the parentheses, if any
    pub argument: Option<&'a str>,
}

impl fmt::Display for Pseudo<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.argument {
            Some(argument) => write!(f, ":{}({})", self.name, argument),
            None => write!(f, ":{}", self.name),
        }
    }
}

/// Constraints applying to one selected element, no combinators
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Compound<'a> {
    /// Tag name constraint
    pub tag: Option<&'a str>,
    /// Id constraint, without the `#`
    pub id: Option<&'a str>,
    /// Class constraints, without the `.`; set semantics
    pub classes: Vec<&'a str>,
    /// Attribute predicates; set semantics
    pub attributes: Vec<Attribute<'a>>,
    /// Pseudo predicates; set semantics
    pub pseudos: Vec<Pseudo<'a>>,
    /// Combinator joining this compound to its ancestor compound
    pub combinator: Combinator,
}

impl<'a> Compound<'a> {
    /// The match-everything compound: no constraints, descendant link
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            tag: None,
            id: None,
            classes: Vec::new(),
            attributes: Vec::new(),
            pseudos: Vec::new(),
            combinator: Combinator::Descendant,
        }
    }

    /// Whether this compound constrains nothing
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.tag.is_none()
            && self.id.is_none()
            && self.classes.is_empty()
            && self.attributes.is_empty()
            && self.pseudos.is_empty()
    }

    /// Structural equality over the five constraint fields, collections
    /// compared as sets; the combinator link is chain state, not a
    /// constraint, and is excluded
    #[must_use]
    pub fn structurally_equal(&self, other: &Self) -> bool {
        self.tag == other.tag
            && self.id == other.id
            && set_equal(&self.classes, &other.classes)
            && set_equal(&self.attributes, &other.attributes)
            && set_equal(&self.pseudos, &other.pseudos)
    }
}

/// Order-independent slice equality
pub(crate) fn set_equal<T: PartialEq>(a: &[T], b: &[T]) -> bool {
    a.iter().all(|item| b.contains(item)) && b.iter().all(|item| a.contains(item))
}

impl fmt::Display for Compound<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(tag) = self.tag {
            write!(f, "{tag}")?;
        }
        if let Some(id) = self.id {
            write!(f, "#{id}")?;
        }
        for class in &self.classes {
            write!(f, ".{class}")?;
        }
        for attribute in &self.attributes {
            write!(f, "{attribute}")?;
        }
        for pseudo in &self.pseudos {
            write!(f, "{pseudo}")?;
        }
        if self.is_unconstrained() {
            write!(f, "*")?;
        }
        Ok(())
    }
}

/// Selector chain, key compound first
///
/// The chain is never empty; the key compound always exists. This invariant
/// is the external parser's to uphold and is asserted in debug builds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector<'a> {
    /// Compounds from the key element outward to the leftmost ancestor
    pub compounds: Vec<Compound<'a>>,
}

impl<'a> Selector<'a> {
    /// The key (rightmost/target) compound
    #[must_use]
    pub fn key(&self) -> &Compound<'a> {
        debug_assert!(!self.compounds.is_empty(), "selector chain is never empty");
        &self.compounds[0]
    }

    /// Structural chain equality: same length, pairwise structurally equal
    /// compounds, identical combinator links
    #[must_use]
    pub fn structurally_equal(&self, other: &Self) -> bool {
        self.compounds.len() == other.compounds.len()
            && self
                .compounds
                .iter()
                .zip(&other.compounds)
                .all(|(a, b)| a.structurally_equal(b) && a.combinator == b.combinator)
    }
}

/// Renders the chain in written order, outermost ancestor first
impl fmt::Display for Selector<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, compound) in self.compounds.iter().enumerate().rev() {
            write!(f, "{compound}")?;
            if i > 0 {
                // The inner compound holds the combinator joining it to us.
                write!(f, "{}", self.compounds[i - 1].combinator)?;
            }
        }
        Ok(())
    }
}
