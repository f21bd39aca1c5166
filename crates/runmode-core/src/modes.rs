//! Run mode sets
//!
//! [`parse_modes`] turns the raw comma separated property into a working
//! [`ModeSet`]. Resolution threads that working set through each step by
//! value and finally freezes it into [`RunModes`].

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};

/// Separator between mode names in the base modes property.
pub const MODE_SEPARATOR: char = ',';

/// Working set of mode names used while resolving.
pub type ModeSet = BTreeSet<String>;

/// Parse a comma separated list of run modes.
///
/// `None` and blank input yield an empty set. Otherwise every segment is
/// trimmed and inserted. Trailing empty segments are dropped (`"a,"` yields
/// `{"a"}`) but an inner blank segment is kept as the empty name
/// (`"a, ,b"` yields `{"", "a", "b"}`).
pub fn parse_modes(raw: Option<&str>) -> ModeSet {
    match raw.map(str::trim) {
        Some(raw) if !raw.is_empty() => split_segments(raw, MODE_SEPARATOR)
            .into_iter()
            .map(|mode| mode.trim().to_string())
            .collect(),
        _ => ModeSet::new(),
    }
}

/// Split `text` on `separator`, dropping trailing empty segments.
///
/// Text without any separator comes back as its only segment, even when it
/// is empty; text made only of separators yields no segments.
pub(crate) fn split_segments(text: &str, separator: char) -> Vec<&str> {
    let mut segments: Vec<&str> = text.split(separator).collect();
    if segments.len() > 1 {
        while segments.last().is_some_and(|segment| segment.is_empty()) {
            segments.pop();
        }
    }
    segments
}

/// Membership test used by the run mode matcher.
pub trait ModeLookup {
    fn contains_mode(&self, mode: &str) -> bool;
}

impl ModeLookup for BTreeSet<String> {
    fn contains_mode(&self, mode: &str) -> bool {
        self.contains(mode)
    }
}

impl ModeLookup for HashSet<String> {
    fn contains_mode(&self, mode: &str) -> bool {
        self.contains(mode)
    }
}

impl ModeLookup for [&str] {
    fn contains_mode(&self, mode: &str) -> bool {
        self.iter().any(|m| *m == mode)
    }
}

impl<T: ModeLookup + ?Sized> ModeLookup for &T {
    fn contains_mode(&self, mode: &str) -> bool {
        (**self).contains_mode(mode)
    }
}

/// The resolved, immutable set of active run modes.
///
/// Clones share storage; the set can be handed to any number of readers
/// across threads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunModes {
    modes: Arc<ModeSet>,
}

impl RunModes {
    /// Freeze a working set.
    pub fn freeze(modes: ModeSet) -> Self {
        Self {
            modes: Arc::new(modes),
        }
    }

    pub fn contains(&self, mode: &str) -> bool {
        self.modes.contains(mode)
    }

    /// Iterate over the modes in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.modes.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.modes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    /// Borrow the underlying set.
    pub fn as_set(&self) -> &ModeSet {
        &self.modes
    }
}

impl ModeLookup for RunModes {
    fn contains_mode(&self, mode: &str) -> bool {
        self.contains(mode)
    }
}

impl From<ModeSet> for RunModes {
    fn from(modes: ModeSet) -> Self {
        Self::freeze(modes)
    }
}

impl<'a> FromIterator<&'a str> for RunModes {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self::freeze(iter.into_iter().map(str::to_string).collect())
    }
}

impl fmt::Display for RunModes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, mode) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{mode}")?;
        }
        write!(f, "]")
    }
}

impl Serialize for RunModes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}
