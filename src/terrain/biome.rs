//! Biome classification and a noise-driven biome map

use noise::{NoiseFn, Perlin};
use serde::{Deserialize, Serialize};

use crate::terrain::grid::BiomeGrid;

/// Terrain classification of a single grid cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiomeType {
    Water,
    Ocean,
    River,
    MountainPeak,
    Mountain,
    Hills,
    Snow,
    Ice,
    SnowyHills,
    Dunes,
    Oasis,
    Sand,
    DenseJungle,
    Jungle,
    DeepWater,
    Marsh,
    Swamp,
    DenseForest,
    Forest,
    Clearing,
    RollingHills,
    FlowerField,
    Grassland,
    Desert,
    RoughTerrain,
    AncientRuins,
    Plain,
    Wasteland,
    ToxicZone,
    RadiationField,
    CrystalGarden,
    UrbanRuins,
    InfectedNormal,
    InfectedHeavy,
    InfectedCore,
}

impl BiomeType {
    /// Every classification, in declaration order
    pub const ALL: [BiomeType; 35] = [
        BiomeType::Water,
        BiomeType::Ocean,
        BiomeType::River,
        BiomeType::MountainPeak,
        BiomeType::Mountain,
        BiomeType::Hills,
        BiomeType::Snow,
        BiomeType::Ice,
        BiomeType::SnowyHills,
        BiomeType::Dunes,
        BiomeType::Oasis,
        BiomeType::Sand,
        BiomeType::DenseJungle,
        BiomeType::Jungle,
        BiomeType::DeepWater,
        BiomeType::Marsh,
        BiomeType::Swamp,
        BiomeType::DenseForest,
        BiomeType::Forest,
        BiomeType::Clearing,
        BiomeType::RollingHills,
        BiomeType::FlowerField,
        BiomeType::Grassland,
        BiomeType::Desert,
        BiomeType::RoughTerrain,
        BiomeType::AncientRuins,
        BiomeType::Plain,
        BiomeType::Wasteland,
        BiomeType::ToxicZone,
        BiomeType::RadiationField,
        BiomeType::CrystalGarden,
        BiomeType::UrbanRuins,
        BiomeType::InfectedNormal,
        BiomeType::InfectedHeavy,
        BiomeType::InfectedCore,
    ];

    /// Whether this biome is part of the spreading infection
    pub fn is_infected(&self) -> bool {
        matches!(
            self,
            BiomeType::InfectedNormal | BiomeType::InfectedHeavy | BiomeType::InfectedCore
        )
    }

    /// Whether this biome is open water
    pub fn is_water(&self) -> bool {
        matches!(
            self,
            BiomeType::Water | BiomeType::Ocean | BiomeType::River | BiomeType::DeepWater
        )
    }
}

/// Biome map generator based on temperature, moisture and elevation noise.
///
/// Stands in for the game-state authority when no grid is supplied, e.g. in
/// benchmarks and the `render_grid` binary.
pub struct BiomeMap {
    temperature_noise: Perlin,
    moisture_noise: Perlin,
    elevation_noise: Perlin,
    temp_scale: f64,
    moisture_scale: f64,
    elevation_scale: f64,
}

impl BiomeMap {
    /// Create new biome map with given seed
    pub fn new(seed: u32) -> Self {
        Self {
            temperature_noise: Perlin::new(seed),
            moisture_noise: Perlin::new(seed.wrapping_add(1000)),
            elevation_noise: Perlin::new(seed.wrapping_add(2000)),
            temp_scale: 0.02,
            moisture_scale: 0.035,
            elevation_scale: 0.05,
        }
    }

    /// Temperature at a cell (-1 to 1, cold to hot)
    pub fn temperature_at(&self, x: f64, y: f64) -> f32 {
        self.temperature_noise.get([x * self.temp_scale, y * self.temp_scale]) as f32
    }

    /// Moisture at a cell (0 to 1, dry to wet)
    pub fn moisture_at(&self, x: f64, y: f64) -> f32 {
        let m = self.moisture_noise.get([x * self.moisture_scale, y * self.moisture_scale]) as f32;
        ((m + 1.0) * 0.5).clamp(0.0, 1.0)
    }

    /// Elevation at a cell (-1 to 1)
    pub fn elevation_at(&self, x: f64, y: f64) -> f32 {
        self.elevation_noise.get([x * self.elevation_scale, y * self.elevation_scale]) as f32
    }

    /// Classify a single cell
    pub fn biome_at(&self, x: i32, y: i32) -> BiomeType {
        let (fx, fy) = (x as f64, y as f64);
        let elevation = self.elevation_at(fx, fy);
        let temp = self.temperature_at(fx, fy);
        let moisture = self.moisture_at(fx, fy);

        if elevation < -0.35 {
            return BiomeType::DeepWater;
        }
        if elevation < -0.15 {
            return BiomeType::Water;
        }
        if elevation > 0.5 {
            return if temp < 0.0 { BiomeType::MountainPeak } else { BiomeType::Mountain };
        }
        if elevation > 0.35 {
            return if temp < -0.2 { BiomeType::SnowyHills } else { BiomeType::Hills };
        }

        match (temp, moisture) {
            (t, _) if t < -0.3 => BiomeType::Snow,
            (t, m) if t > 0.3 => {
                if m > 0.6 {
                    BiomeType::Jungle
                } else if m > 0.3 {
                    BiomeType::Grassland
                } else {
                    BiomeType::Desert
                }
            }
            (_, m) => {
                if m > 0.65 {
                    BiomeType::Marsh
                } else if m > 0.5 {
                    BiomeType::Forest
                } else if m > 0.3 {
                    BiomeType::Grassland
                } else {
                    BiomeType::Plain
                }
            }
        }
    }

    /// Classify a whole `width × height` grid
    pub fn generate_grid(&self, width: usize, height: usize) -> BiomeGrid {
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                cells.push(self.biome_at(x as i32, y as i32));
            }
        }
        BiomeGrid::from_cells(width, height, cells)
    }
}
