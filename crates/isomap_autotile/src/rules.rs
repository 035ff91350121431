//! Rule tables: per tileset and group, the candidate tiles for each mask

use crate::mask::Mask;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identifies one auto-tiling group within one tileset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupKey<'a> {
    pub tileset: &'a str,
    pub group: &'a str,
}

impl<'a> GroupKey<'a> {
    /// Returns `None` when either name is empty
    pub fn new(tileset: &'a str, group: &'a str) -> Option<Self> {
        if tileset.is_empty() || group.is_empty() {
            None
        } else {
            Some(Self { tileset, group })
        }
    }
}

/// mask -> candidate tile indices for one group
pub type GroupRules = BTreeMap<Mask, Vec<u32>>;

type RuleMap = BTreeMap<String, BTreeMap<String, GroupRules>>;

/// tileset -> group -> mask -> candidate tile indices.
///
/// Candidate lists are never empty: removing the last candidate removes the
/// mask entry, and empty lists are dropped on load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RuleMap", into = "RuleMap")]
pub struct RuleTable {
    sets: RuleMap,
}

impl From<RuleMap> for RuleTable {
    fn from(mut sets: RuleMap) -> Self {
        for groups in sets.values_mut() {
            for rules in groups.values_mut() {
                rules.retain(|_, candidates| !candidates.is_empty());
            }
            groups.retain(|_, rules| !rules.is_empty());
        }
        sets.retain(|_, groups| !groups.is_empty());
        Self { sets }
    }
}

impl From<RuleTable> for RuleMap {
    fn from(table: RuleTable) -> Self {
        table.sets
    }
}

impl RuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// All rules of one group
    pub fn group_rules(&self, key: GroupKey) -> Option<&GroupRules> {
        self.sets.get(key.tileset)?.get(key.group)
    }

    /// Candidate tiles for a mask; empty when no rule exists
    pub fn candidates(&self, key: GroupKey, mask: Mask) -> &[u32] {
        self.group_rules(key)
            .and_then(|rules| rules.get(&mask))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether `index` appears as a candidate for any mask of the group
    pub fn is_member(&self, key: GroupKey, index: u32) -> bool {
        self.group_rules(key)
            .map_or(false, |rules| rules.values().any(|c| c.contains(&index)))
    }

    /// Groups configured for a tileset
    pub fn groups(&self, tileset: &str) -> Vec<&str> {
        self.sets
            .get(tileset)
            .map(|groups| groups.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Replace the candidate list of a mask. Duplicates are dropped, and an
    /// empty list removes the rule.
    pub fn set_candidates(&mut self, key: GroupKey, mask: Mask, candidates: Vec<u32>) {
        let mut unique = Vec::with_capacity(candidates.len());
        for index in candidates {
            if !unique.contains(&index) {
                unique.push(index);
            }
        }
        if unique.is_empty() {
            self.clear_mask(key, mask);
            return;
        }
        self.group_rules_mut(key).insert(mask, unique);
    }

    /// Append a candidate. Returns `false` if it was already listed.
    pub fn add_candidate(&mut self, key: GroupKey, mask: Mask, index: u32) -> bool {
        let candidates = self.group_rules_mut(key).entry(mask).or_default();
        if candidates.contains(&index) {
            return false;
        }
        candidates.push(index);
        true
    }

    /// Remove a candidate. Returns `false` if it was not listed.
    pub fn remove_candidate(&mut self, key: GroupKey, mask: Mask, index: u32) -> bool {
        let Some(candidates) = self
            .sets
            .get_mut(key.tileset)
            .and_then(|groups| groups.get_mut(key.group))
            .and_then(|rules| rules.get_mut(&mask))
        else {
            return false;
        };
        let before = candidates.len();
        candidates.retain(|&c| c != index);
        let removed = candidates.len() != before;
        if candidates.is_empty() {
            self.clear_mask(key, mask);
        }
        removed
    }

    /// Remove every candidate of a mask, returning them
    pub fn clear_mask(&mut self, key: GroupKey, mask: Mask) -> Option<Vec<u32>> {
        let groups = self.sets.get_mut(key.tileset)?;
        let rules = groups.get_mut(key.group)?;
        let removed = rules.remove(&mask);
        if rules.is_empty() {
            groups.remove(key.group);
        }
        if groups.is_empty() {
            self.sets.remove(key.tileset);
        }
        removed
    }

    fn group_rules_mut(&mut self, key: GroupKey) -> &mut GroupRules {
        self.sets
            .entry(key.tileset.to_string())
            .or_default()
            .entry(key.group.to_string())
            .or_default()
    }
}
