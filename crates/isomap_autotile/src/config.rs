//! Autotile configuration and brush state

use crate::apply::AutotileContext;
use crate::mask::Mask;
use crate::rules::{GroupKey, RuleTable};
use crate::template::{apply_template_assignment, Role, Template};
use isomap_core::TileCatalog;
use serde::{Deserialize, Serialize};

/// Rule tables and templates of a project.
///
/// The two are persisted separately but edited together: template
/// assignments always flow into `rules` through [`AutotileConfig::assign_role`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AutotileConfig {
    #[serde(default)]
    pub rules: RuleTable,
    #[serde(default)]
    pub templates: Template,
}

impl AutotileConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a tile to a template role, overwriting the rule for its mask
    pub fn assign_role(&mut self, key: GroupKey, role: Role, index: u32) {
        apply_template_assignment(&mut self.templates, &mut self.rules, key, role, index);
    }

    pub fn set_rule(&mut self, key: GroupKey, mask: Mask, candidates: Vec<u32>) {
        self.rules.set_candidates(key, mask, candidates);
    }

    /// Group names usable for auto-tiling in a tileset: tag groups first,
    /// then groups that only exist in the rule table.
    pub fn groups<'a>(&'a self, catalog: &'a TileCatalog, tileset: &str) -> Vec<&'a str> {
        let mut groups: Vec<&str> = catalog
            .tileset(tileset)
            .map(|set| set.groups())
            .unwrap_or_default();
        for group in self.rules.groups(tileset) {
            if !groups.contains(&group) {
                groups.push(group);
            }
        }
        groups
    }

    pub fn context<'a>(&'a self, catalog: &'a TileCatalog) -> AutotileContext<'a> {
        AutotileContext::new(catalog, &self.rules)
    }
}

/// Auto-tiling brush state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutotileBrush {
    /// Group painted with; empty when none is chosen
    pub group: String,
    /// Whether painting goes through the autotile pipeline
    pub active: bool,
}

impl AutotileBrush {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, group: impl Into<String>) {
        self.group = group.into();
        self.active = true;
    }

    pub fn deselect(&mut self) {
        self.group.clear();
        self.active = false;
    }

    /// The group to paint in, if auto-tiling is on and a group is chosen
    pub fn active_key<'a>(&'a self, tileset: &'a str) -> Option<GroupKey<'a>> {
        if !self.active {
            return None;
        }
        GroupKey::new(tileset, &self.group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use isomap_core::TileBitmap;

    #[test]
    fn test_brush_needs_group_and_active() {
        let mut brush = AutotileBrush::new();
        assert!(brush.active_key("grassland").is_none());

        brush.active = true;
        assert!(brush.active_key("grassland").is_none());

        brush.select("ground");
        let key = brush.active_key("grassland").unwrap();
        assert_eq!(key.group, "ground");

        brush.deselect();
        assert!(brush.active_key("grassland").is_none());
    }

    #[test]
    fn test_groups_merge_tags_and_rules() {
        let mut catalog = TileCatalog::with_builtin();
        catalog
            .add_tile("grassland", TileBitmap::blank(1).with_group("ground"))
            .unwrap();

        let mut config = AutotileConfig::new();
        let water = GroupKey::new("grassland", "water").unwrap();
        config.assign_role(water, Role::Center, 0);
        let ground = GroupKey::new("grassland", "ground").unwrap();
        config.set_rule(ground, Mask::ISOLATED, vec![0]);

        assert_eq!(config.groups(&catalog, "grassland"), ["ground", "water"]);
        assert!(config.groups(&catalog, "desert").is_empty());
    }
}
