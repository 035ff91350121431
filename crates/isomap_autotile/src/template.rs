//! 3x3 role templates and their synchronization into rule tables

use crate::mask::{neighbors, Mask};
use crate::rules::{GroupKey, RuleTable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Positional role in the 3x3 authoring template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    TopLeft,
    Top,
    TopRight,
    Left,
    Center,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

impl Role {
    /// Roles in reading order of the 3x3 grid
    pub const ALL: [Role; 9] = [
        Role::TopLeft,
        Role::Top,
        Role::TopRight,
        Role::Left,
        Role::Center,
        Role::Right,
        Role::BottomLeft,
        Role::Bottom,
        Role::BottomRight,
    ];

    /// The mask a tile in this position is drawn for.
    ///
    /// An edge role lacks the neighbor on its own side: `Top` has no northern
    /// neighbor, so its mask is E|S|W.
    pub const fn mask(self) -> Mask {
        use neighbors::*;

        let bits = match self {
            Role::Center => N | E | S | W,
            Role::Top => E | S | W,
            Role::Bottom => N | E | W,
            Role::Left => N | E | S,
            Role::Right => N | S | W,
            Role::TopLeft => E | S,
            Role::TopRight => S | W,
            Role::BottomLeft => N | E,
            Role::BottomRight => N | W,
        };
        match Mask::new(bits) {
            Some(mask) => mask,
            None => Mask::FULL,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Role::TopLeft => "top-left",
            Role::Top => "top",
            Role::TopRight => "top-right",
            Role::Left => "left",
            Role::Center => "center",
            Role::Right => "right",
            Role::BottomLeft => "bottom-left",
            Role::Bottom => "bottom",
            Role::BottomRight => "bottom-right",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.name() == s)
            .ok_or_else(|| format!("unknown template role '{s}'"))
    }
}

/// tileset -> group -> role -> tile index
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Template {
    sets: BTreeMap<String, BTreeMap<String, BTreeMap<Role, u32>>>,
}

impl Template {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: GroupKey, role: Role) -> Option<u32> {
        self.sets.get(key.tileset)?.get(key.group)?.get(&role).copied()
    }

    /// Assigned roles of one group, in role order
    pub fn roles(&self, key: GroupKey) -> Vec<(Role, u32)> {
        self.sets
            .get(key.tileset)
            .and_then(|groups| groups.get(key.group))
            .map(|roles| roles.iter().map(|(r, i)| (*r, *i)).collect())
            .unwrap_or_default()
    }

    fn set(&mut self, key: GroupKey, role: Role, index: u32) {
        self.sets
            .entry(key.tileset.to_string())
            .or_default()
            .entry(key.group.to_string())
            .or_default()
            .insert(role, index);
    }
}

/// Assign a tile to a template role.
///
/// Records the assignment in `template` and makes `index` the sole candidate
/// for the role's mask in `rules`, overwriting whatever was there.
pub fn apply_template_assignment(
    template: &mut Template,
    rules: &mut RuleTable,
    key: GroupKey,
    role: Role,
    index: u32,
) {
    template.set(key, role, index);
    rules.set_candidates(key, role.mask(), vec![index]);
    log::debug!(
        "template {}/{}: {} -> tile {} (mask {})",
        key.tileset,
        key.group,
        role,
        index,
        role.mask()
    );
}
