//! Local workspace: the editor's working state, one JSON file per key

use crate::error::ProjectError;
use crate::payload::{parse_layers, parse_tiles};
use directories::ProjectDirs;
use isomap_autotile::{AutotileConfig, RuleTable, Template};
use isomap_core::{LayerStack, TileBitmap, TileCatalog};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const TILES_KEY: &str = "tiles";
pub const LAYERS_KEY: &str = "layers";
pub const SETS_KEY: &str = "sets";
pub const RULES_KEY: &str = "autorules";
pub const TEMPLATE_KEY: &str = "autotemplate";

/// Everything the editor keeps between sessions
#[derive(Debug, Clone, PartialEq)]
pub struct WorkspaceState {
    pub catalog: TileCatalog,
    pub layers: LayerStack,
    pub autotile: AutotileConfig,
}

impl Default for WorkspaceState {
    fn default() -> Self {
        Self {
            catalog: TileCatalog::with_builtin(),
            layers: LayerStack::new(),
            autotile: AutotileConfig::new(),
        }
    }
}

/// Tileset names and palettes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SetsRecord {
    #[serde(default)]
    sets: Vec<String>,
    #[serde(default)]
    palettes: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct LocalWorkspace {
    dir: PathBuf,
}

impl LocalWorkspace {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The platform data directory, if one can be determined
    pub fn default_location() -> Option<Self> {
        ProjectDirs::from("com", "isomap", "isomap").map(|dirs| Self::new(dirs.data_dir()))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    fn write_key<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), ProjectError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.key_path(key), serde_json::to_string(value)?)?;
        Ok(())
    }

    fn read_key(&self, key: &str) -> Result<Option<Value>, ProjectError> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    pub fn save_tiles(&self, catalog: &TileCatalog) -> Result<(), ProjectError> {
        let tiles: BTreeMap<&str, &[TileBitmap]> = catalog
            .tilesets()
            .iter()
            .map(|set| (set.name.as_str(), set.tiles()))
            .collect();
        self.write_key(TILES_KEY, &tiles)
    }

    pub fn save_sets(&self, catalog: &TileCatalog) -> Result<(), ProjectError> {
        let record = SetsRecord {
            sets: catalog.names().map(str::to_string).collect(),
            palettes: catalog
                .tilesets()
                .iter()
                .map(|set| (set.name.clone(), set.palette.clone()))
                .collect(),
        };
        self.write_key(SETS_KEY, &record)
    }

    pub fn save_layers(&self, layers: &LayerStack) -> Result<(), ProjectError> {
        self.write_key(LAYERS_KEY, layers.layers())
    }

    pub fn save_rules(&self, rules: &RuleTable) -> Result<(), ProjectError> {
        self.write_key(RULES_KEY, rules)
    }

    pub fn save_templates(&self, template: &Template) -> Result<(), ProjectError> {
        self.write_key(TEMPLATE_KEY, template)
    }

    /// Write every key
    pub fn save(&self, state: &WorkspaceState) -> Result<(), ProjectError> {
        self.save_sets(&state.catalog)?;
        self.save_tiles(&state.catalog)?;
        self.save_layers(&state.layers)?;
        self.save_rules(&state.autotile.rules)?;
        self.save_templates(&state.autotile.templates)?;
        log::info!("Saved workspace to {:?}", self.dir);
        Ok(())
    }

    /// Rebuild the workspace from disk.
    ///
    /// Each key is hydrated on its own: a missing or unreadable key keeps its
    /// default and never leaves partial data behind.
    pub fn load(&self) -> WorkspaceState {
        let mut state = WorkspaceState::default();

        self.hydrate(SETS_KEY, |value| {
            let record: SetsRecord = serde_json::from_value(value)?;
            let mut catalog = state.catalog.clone();
            for name in &record.sets {
                catalog.ensure_tileset(name);
            }
            for (name, palette) in record.palettes {
                if !palette.is_empty() {
                    catalog.ensure_tileset(&name).palette = palette;
                }
            }
            state.catalog = catalog;
            Ok(())
        });

        self.hydrate(TILES_KEY, |value| {
            let tiles = parse_tiles(&value)?;
            let mut catalog = state.catalog.clone();
            for (name, bitmaps) in tiles {
                catalog.ensure_tileset(&name).set_tiles(bitmaps)?;
            }
            state.catalog = catalog;
            Ok(())
        });

        self.hydrate(LAYERS_KEY, |value| {
            if let Some(layers) = parse_layers(&value)? {
                state.layers.replace(layers);
            }
            Ok(())
        });

        self.hydrate(RULES_KEY, |value| {
            state.autotile.rules = serde_json::from_value(value)?;
            Ok(())
        });

        self.hydrate(TEMPLATE_KEY, |value| {
            state.autotile.templates = serde_json::from_value(value)?;
            Ok(())
        });

        state
    }

    fn hydrate<F>(&self, key: &str, apply: F)
    where
        F: FnOnce(Value) -> Result<(), ProjectError>,
    {
        let result = match self.read_key(key) {
            Ok(Some(value)) => apply(value),
            Ok(None) => Ok(()),
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            log::warn!("Discarding stored '{}': {}", key, e);
        }
    }
}
