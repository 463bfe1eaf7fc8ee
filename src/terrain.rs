/// Classification of a map cell as maintained by the map editor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TerrainType {
    #[default]
    None,
    Empty,
    Road,
    Wall,
    SpawnPoint,
    Destination,
}

impl TerrainType {
    /// Enemies may only walk on roads and on the spawn and destination cells themselves.
    pub fn is_walkable(self) -> bool {
        matches!(
            self,
            TerrainType::Road | TerrainType::SpawnPoint | TerrainType::Destination
        )
    }
}

/// Builds a `width` by `height` terrain grid, indexed `[x][y]`, filled with a single kind.
pub fn filled(width: usize, height: usize, kind: TerrainType) -> Vec<Vec<TerrainType>> {
    vec![vec![kind; height]; width]
}
