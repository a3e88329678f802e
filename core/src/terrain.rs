//! Terrain variants and the symbol catalog used to build maps.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

use crate::ConfigurationError;

/// Closed set of terrain variants a cell may carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Terrain {
    /// Featureless open ground.
    Generic,
    /// Trodden path.
    Path,
    /// Woodland.
    Forest,
    /// Sand.
    Desert,
    /// Impassable rock.
    Mountain,
    /// Molten ground. Passable; its effect hook is where a hazard would go.
    Lava,
    /// Impassable water.
    Water,
}

impl Terrain {
    /// Every terrain variant in declaration order.
    pub const ALL: [Terrain; 7] = [
        Terrain::Generic,
        Terrain::Path,
        Terrain::Forest,
        Terrain::Desert,
        Terrain::Mountain,
        Terrain::Lava,
        Terrain::Water,
    ];

    /// Stable lowercase name used in configuration and logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::Path => "path",
            Self::Forest => "forest",
            Self::Desert => "desert",
            Self::Mountain => "mountain",
            Self::Lava => "lava",
            Self::Water => "water",
        }
    }

    /// Looks up a variant by its [`name`](Self::name).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Terrain> {
        Self::ALL.into_iter().find(|terrain| terrain.name() == name)
    }

    /// Whether entities may ever stand on this terrain.
    #[must_use]
    pub const fn is_passable(self) -> bool {
        !matches!(self, Self::Mountain | Self::Water)
    }

    /// Effect fired by default when an entity enters this terrain.
    #[must_use]
    pub const fn default_effect(self) -> Option<OccupyEffect> {
        match self {
            Self::Path => Some(OccupyEffect::Path),
            Self::Forest => Some(OccupyEffect::Forest),
            Self::Desert => Some(OccupyEffect::Desert),
            Self::Lava => Some(OccupyEffect::Lava),
            Self::Generic | Self::Mountain | Self::Water => None,
        }
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identifier of the hook invoked when an entity enters a cell.
///
/// Hooks currently have no gameplay consequence; the world reports each
/// firing through [`Event::TerrainEffectTriggered`](crate::Event).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OccupyEffect {
    /// Entered a path.
    Path,
    /// Entered a forest.
    Forest,
    /// Entered a desert.
    Desert,
    /// Entered lava.
    Lava,
}

/// Immutable description of what a map symbol stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TerrainKind {
    symbol: char,
    terrain: Terrain,
    passable: bool,
    on_occupy: Option<OccupyEffect>,
}

impl TerrainKind {
    /// Creates a kind with the terrain's default passability and effect.
    #[must_use]
    pub const fn new(symbol: char, terrain: Terrain) -> Self {
        Self {
            symbol,
            terrain,
            passable: terrain.is_passable(),
            on_occupy: terrain.default_effect(),
        }
    }

    /// Replaces the effect fired on entry. Passability cannot be overridden.
    #[must_use]
    pub const fn with_effect(mut self, effect: Option<OccupyEffect>) -> Self {
        self.on_occupy = effect;
        self
    }

    /// Symbol that denotes this kind in map instructions.
    #[must_use]
    pub const fn symbol(&self) -> char {
        self.symbol
    }

    /// Terrain variant.
    #[must_use]
    pub const fn terrain(&self) -> Terrain {
        self.terrain
    }

    /// Whether entities may stand on cells of this kind.
    #[must_use]
    pub const fn passable(&self) -> bool {
        self.passable
    }

    /// Effect fired when an entity enters a cell of this kind.
    #[must_use]
    pub const fn on_occupy(&self) -> Option<OccupyEffect> {
        self.on_occupy
    }
}

/// Mapping from map symbols to terrain kinds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TerrainCatalog {
    kinds: BTreeMap<char, TerrainKind>,
}

impl TerrainCatalog {
    /// Catalog with no entries; every symbol is unmapped.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            kinds: BTreeMap::new(),
        }
    }

    /// The default symbol set.
    #[must_use]
    pub fn standard() -> Self {
        let mut catalog = Self::empty();
        for kind in [
            TerrainKind::new(' ', Terrain::Generic),
            TerrainKind::new('-', Terrain::Path),
            TerrainKind::new('%', Terrain::Forest),
            TerrainKind::new('.', Terrain::Desert),
            TerrainKind::new('^', Terrain::Mountain),
            TerrainKind::new('#', Terrain::Lava),
            TerrainKind::new('~', Terrain::Water),
        ] {
            let _ = catalog.insert(kind);
        }
        catalog
    }

    /// Adds or rebinds the kind's symbol, returning the previous binding.
    pub fn insert(&mut self, kind: TerrainKind) -> Option<TerrainKind> {
        self.kinds.insert(kind.symbol(), kind)
    }

    /// Kind bound to `symbol`, if any.
    #[must_use]
    pub fn get(&self, symbol: char) -> Option<&TerrainKind> {
        self.kinds.get(&symbol)
    }

    /// Resolves the symbol found at `(row, column)` of a map.
    pub fn lookup(
        &self,
        symbol: char,
        row: usize,
        column: usize,
    ) -> Result<TerrainKind, ConfigurationError> {
        self.get(symbol)
            .copied()
            .ok_or(ConfigurationError::UnmappedSymbol {
                symbol,
                row,
                column,
            })
    }

    /// Iterator over the bound kinds in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = &TerrainKind> {
        self.kinds.values()
    }

    /// Number of bound symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Reports whether no symbol is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl Default for TerrainCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
