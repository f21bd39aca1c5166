//! Mutually exclusive option groups
//!
//! A groups specification looks like `a,b,c|d,e,f`: each `|` separated
//! group lists candidates of which exactly one ends up active.

use serde::{Deserialize, Serialize};

use crate::modes::{MODE_SEPARATOR, ModeSet, split_segments};

/// Separator between option groups.
pub const GROUP_SEPARATOR: char = '|';

/// One resolved option group: its candidates and the selected one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionGroup {
    modes: Vec<String>,
    selected: String,
}

impl OptionGroup {
    /// Create a group, checking that `selected` is one of `modes`.
    ///
    /// Returns `None` when the invariant does not hold.
    pub fn new(modes: Vec<String>, selected: impl Into<String>) -> Option<Self> {
        let selected = selected.into();
        if modes.iter().any(|m| *m == selected) {
            Some(Self { modes, selected })
        } else {
            None
        }
    }

    /// Candidates in declaration order.
    pub fn modes(&self) -> &[String] {
        &self.modes
    }

    pub fn selected(&self) -> &str {
        &self.selected
    }

    /// Whether `selected` is drawn from `modes`.
    pub fn is_valid(&self) -> bool {
        self.modes.iter().any(|m| *m == self.selected)
    }
}

/// Resolve every group of `spec` against the working set.
///
/// For each group the first candidate already active is selected and every
/// candidate after it is removed, even one repeating the selected name; if
/// none is active the first candidate is selected and added. Blank
/// candidates are ignored and a group without candidates is skipped, so the
/// empty name never becomes active here. Returns the updated set and the
/// groups in order.
pub fn resolve_options(mut active: ModeSet, spec: Option<&str>) -> (ModeSet, Vec<OptionGroup>) {
    let mut groups = Vec::new();
    let Some(spec) = spec.map(str::trim).filter(|s| !s.is_empty()) else {
        return (active, groups);
    };

    for group in split_segments(spec, GROUP_SEPARATOR) {
        let modes: Vec<String> = split_segments(group.trim(), MODE_SEPARATOR)
            .into_iter()
            .map(str::trim)
            .filter(|mode| !mode.is_empty())
            .map(String::from)
            .collect();
        let Some(first) = modes.first() else {
            tracing::debug!(group, "Skipping option group without candidates");
            continue;
        };

        let mut selected: Option<&String> = None;
        for mode in &modes {
            if selected.is_some() {
                active.remove(mode);
            } else if active.contains(mode) {
                selected = Some(mode);
            }
        }

        let selected = match selected {
            Some(mode) => mode.clone(),
            None => {
                active.insert(first.clone());
                first.clone()
            }
        };

        tracing::debug!(candidates = ?modes, selected = %selected, "Resolved option group");
        groups.push(OptionGroup { modes, selected });
    }

    (active, groups)
}
