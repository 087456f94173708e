//! Identity types for the pipeline system.
//!
//! `NodeId` is a session-local handle that never changes for the lifetime of
//! a node. `UniqueName` is the user-facing name derived from the component
//! kind; it is assigned once in `Pipeline::add_node` and never reassigned.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable handle for a node within one `Pipeline`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct NodeId(pub u32);

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Name of a node, unique within its pipeline (e.g. `AWSUtils0`).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UniqueName(String);

impl UniqueName {
    /// Build a name from a kind prefix and a per-kind ordinal.
    pub fn from_ordinal(prefix: &str, ordinal: u32) -> Self {
        Self(format!("{prefix}{ordinal}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UniqueName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for UniqueName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for UniqueName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for UniqueName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for UniqueName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Debug for UniqueName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UniqueName({})", self.0)
    }
}

impl fmt::Display for UniqueName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
