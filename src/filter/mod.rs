//! Attribute predicates
//!
//! A [`FilterChain`] is built from raw `(flag, value)` pairs as they appear on the
//! command line and evaluated conjunctively against a [`FileStat`]. The set of
//! predicates is closed, so each atom is a variant of [`FilterAtom`] carrying its
//! already-parsed operand.

use crate::fs::FileStat;
use std::fmt;
use thiserror::Error;

#[cfg(test)]
mod tests;

/// Flag that carries its comparator as the first character of the value
const SIZE_FLAG: &str = "-size";

/// Validation failure while building a filter chain
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("Unknown filter argument '{0}'")]
    UnknownFilter(String),

    #[error("Invalid value '{value}' for '{flag}': {reason}")]
    InvalidValue {
        flag: String,
        value: String,
        reason: String,
    },
}

/// The fixed set of predicates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    InodeEquals,
    NameEquals,
    SizeLess,
    SizeEqual,
    SizeGreater,
    LinkCountEquals,
}

impl FilterKind {
    pub const ALL: [FilterKind; 6] = [
        FilterKind::InodeEquals,
        FilterKind::NameEquals,
        FilterKind::SizeLess,
        FilterKind::SizeEqual,
        FilterKind::SizeGreater,
        FilterKind::LinkCountEquals,
    ];

    /// Look up a normalized flag identifier
    pub fn from_flag(flag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.flag() == flag)
    }

    pub fn flag(self) -> &'static str {
        match self {
            FilterKind::InodeEquals => "-inum",
            FilterKind::NameEquals => "-name",
            FilterKind::SizeLess => "-size-",
            FilterKind::SizeEqual => "-size=",
            FilterKind::SizeGreater => "-size+",
            FilterKind::LinkCountEquals => "-nlinks",
        }
    }

    pub fn is_numeric(self) -> bool {
        !matches!(self, FilterKind::NameEquals)
    }
}

/// One validated predicate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterAtom {
    InodeEquals(u64),
    NameEquals(String),
    SizeLess(u64),
    SizeEqual(u64),
    SizeGreater(u64),
    LinkCountEquals(u64),
}

impl FilterAtom {
    /// Validate `raw` for `kind`. Name values are taken verbatim; everything
    /// else must be an unsigned decimal integer.
    pub fn parse(kind: FilterKind, raw: &str) -> Result<Self, FilterError> {
        let invalid = |reason: String| FilterError::InvalidValue {
            flag: kind.flag().to_string(),
            value: raw.to_string(),
            reason,
        };
        // u64::from_str tolerates a leading '+', command-line values may not
        let number = || {
            if !raw.starts_with(|c: char| c.is_ascii_digit()) {
                return Err(invalid("expected an unsigned decimal integer".to_string()));
            }
            raw.parse::<u64>().map_err(|e| invalid(e.to_string()))
        };

        Ok(match kind {
            FilterKind::InodeEquals => FilterAtom::InodeEquals(number()?),
            FilterKind::NameEquals => FilterAtom::NameEquals(raw.to_string()),
            FilterKind::SizeLess => FilterAtom::SizeLess(number()?),
            FilterKind::SizeEqual => FilterAtom::SizeEqual(number()?),
            FilterKind::SizeGreater => FilterAtom::SizeGreater(number()?),
            FilterKind::LinkCountEquals => FilterAtom::LinkCountEquals(number()?),
        })
    }

    pub fn kind(&self) -> FilterKind {
        match self {
            FilterAtom::InodeEquals(_) => FilterKind::InodeEquals,
            FilterAtom::NameEquals(_) => FilterKind::NameEquals,
            FilterAtom::SizeLess(_) => FilterKind::SizeLess,
            FilterAtom::SizeEqual(_) => FilterKind::SizeEqual,
            FilterAtom::SizeGreater(_) => FilterKind::SizeGreater,
            FilterAtom::LinkCountEquals(_) => FilterKind::LinkCountEquals,
        }
    }

    pub fn matches(&self, stat: &FileStat) -> bool {
        match self {
            FilterAtom::InodeEquals(inode) => stat.inode == *inode,
            FilterAtom::NameEquals(name) => stat.name == *name,
            FilterAtom::SizeLess(size) => stat.size_bytes < *size,
            FilterAtom::SizeEqual(size) => stat.size_bytes == *size,
            FilterAtom::SizeGreater(size) => stat.size_bytes > *size,
            FilterAtom::LinkCountEquals(links) => stat.link_count == *links,
        }
    }
}

impl fmt::Display for FilterAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flag = self.kind().flag();
        match self {
            FilterAtom::NameEquals(name) => write!(f, "{flag} {name}"),
            FilterAtom::InodeEquals(n)
            | FilterAtom::SizeLess(n)
            | FilterAtom::SizeEqual(n)
            | FilterAtom::SizeGreater(n)
            | FilterAtom::LinkCountEquals(n) => write!(f, "{flag} {n}"),
        }
    }
}

/// Ordered, AND-combined collection of filter atoms
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterChain {
    atoms: Vec<FilterAtom>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `flag` introduces a filter (before size normalization)
    pub fn accepts_flag(flag: &str) -> bool {
        flag == SIZE_FLAG || FilterKind::from_flag(flag).is_some()
    }

    /// Parse and append one `(flag, value)` pair.
    ///
    /// `-size` takes its comparator from the first character of `value`, so
    /// `("-size", "+100")` is the same atom as `("-size+", "100")`.
    pub fn add_filter(&mut self, flag: &str, value: &str) -> Result<(), FilterError> {
        let (flag, value) = normalize(flag, value);

        let kind = FilterKind::from_flag(&flag).ok_or(FilterError::UnknownFilter(flag))?;
        self.atoms.push(FilterAtom::parse(kind, value)?);
        Ok(())
    }

    /// True iff every atom matches. An empty chain matches everything.
    pub fn apply(&self, stat: &FileStat) -> bool {
        self.atoms.iter().all(|atom| atom.matches(stat))
    }

    pub fn atoms(&self) -> &[FilterAtom] {
        &self.atoms
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }
}

fn normalize<'a>(flag: &str, value: &'a str) -> (String, &'a str) {
    if flag != SIZE_FLAG {
        return (flag.to_string(), value);
    }
    match value.chars().next() {
        Some(comparator) => {
            let mut flag = flag.to_string();
            flag.push(comparator);
            (flag, &value[comparator.len_utf8()..])
        }
        None => (flag.to_string(), value),
    }
}
