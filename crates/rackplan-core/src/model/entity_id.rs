// ── Core identity types ──
//
// EntityId names every card, radio unit, and connection a solve produces.
// Ids come from an injectable `IdGenerator` so that solver output is
// reproducible under test and collision resistant in production.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ── EntityId ────────────────────────────────────────────────────────

/// Opaque identifier for a card, radio-unit instance, or connection.
///
/// Ids are `<prefix>-<suffix>` strings. The prefix tells a reader what
/// kind of entity it is (`rru-AHEGC-1-2-3`, `conn`, `manual-conn`); the
/// suffix comes from whichever [`IdGenerator`] was used for the solve.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this id was minted with the given prefix.
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.0
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('-'))
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntityId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ── Id generation ───────────────────────────────────────────────────

/// Source of fresh entity ids for one solve.
///
/// A generator is owned by the caller and threaded through
/// `aggregate` / `solve` / the edit patches, so two concurrent solves
/// never share state.
pub trait IdGenerator {
    fn next_id(&mut self, prefix: &str) -> EntityId;
}

/// Monotonic counter: `prefix-1`, `prefix-2`, ...
///
/// The counter is shared across prefixes, so every id in one topology is
/// unique even when prefixes collide.
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting after `issued` ids, e.g. to continue numbering manual
    /// edits after a solve.
    pub fn starting_after(issued: u64) -> Self {
        Self { next: issued }
    }

    pub fn issued(&self) -> u64 {
        self.next
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self, prefix: &str) -> EntityId {
        self.next += 1;
        EntityId(format!("{prefix}-{}", self.next))
    }
}

/// UUID v4 suffixes. Not reproducible; use [`SequentialIds`] in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&mut self, prefix: &str) -> EntityId {
        EntityId(format!("{prefix}-{}", Uuid::new_v4().simple()))
    }
}
