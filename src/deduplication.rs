// 🔍 Deduplication Filter - Upgrade collapse
// An "r"-suffixed skin supersedes its base when the player lists both

use crate::extractor::OwnershipRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Trailing marker of an upgraded (reinforced) skin
pub const UPGRADE_MARKER: char = 'r';

// ============================================================================
// COLLAPSE RESULT
// ============================================================================

/// A base skin dropped because its upgrade is also owned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollapsedBase {
    pub base: String,
    pub upgraded: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollapseResult {
    /// Records whose identifier survived, in page order
    pub kept: Vec<OwnershipRecord>,

    /// Which bases were removed, and by which upgrade
    pub collapsed: Vec<CollapsedBase>,
}

impl CollapseResult {
    pub fn is_kept(&self, identifier: &str) -> bool {
        self.kept.iter().any(|r| r.identifier == identifier)
    }
}

// ============================================================================
// DEDUPLICATION FILTER
// ============================================================================

pub struct DeduplicationFilter {
    /// Suffix character marking an upgrade (default: 'r')
    pub marker: char,
}

impl DeduplicationFilter {
    pub fn new() -> Self {
        DeduplicationFilter {
            marker: UPGRADE_MARKER,
        }
    }

    /// Decide which identifiers survive, then keep every record carrying one
    ///
    /// Membership is decided over distinct identifiers, not counts. Only one
    /// trailing marker is ever stripped: "xrr" removes "xr", never "x".
    pub fn collapse(&self, records: &[OwnershipRecord]) -> CollapseResult {
        let present: HashSet<&str> = records.iter().map(|r| r.identifier.as_str()).collect();
        let mut dropped: HashSet<&str> = HashSet::new();
        let mut collapsed = Vec::new();

        for record in records {
            let Some(base) = record.identifier.strip_suffix(self.marker) else {
                continue;
            };
            if present.contains(base) && dropped.insert(base) {
                debug!(base, upgraded = %record.identifier, "collapsing base into upgrade");
                collapsed.push(CollapsedBase {
                    base: base.to_string(),
                    upgraded: record.identifier.clone(),
                });
            }
        }

        let kept = records
            .iter()
            .filter(|r| !dropped.contains(r.identifier.as_str()))
            .cloned()
            .collect();

        CollapseResult { kept, collapsed }
    }
}

impl Default for DeduplicationFilter {
    fn default() -> Self {
        Self::new()
    }
}

/// Records left after upgrade collapse with the default marker
pub fn collapse_upgrades(records: &[OwnershipRecord]) -> Vec<OwnershipRecord> {
    DeduplicationFilter::new().collapse(records).kept
}

// ============================================================================
// TESTS
// ============================================================================
