//! Shared types and enums used across NDVIPRO.
//! Includes `CompositeMethod`, `AreaUnit`, and the `CrsKind` tag that
//! decides how per-pixel ground areas are derived.
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Per-pixel reduction applied across the temporal stack of index rasters.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
pub enum CompositeMethod {
    Median,
    Mean,
    Min,
    Max,
}

impl std::fmt::Display for CompositeMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CompositeMethod::Median => "Median",
            CompositeMethod::Mean => "Mean",
            CompositeMethod::Min => "Min",
            CompositeMethod::Max => "Max",
        };
        write!(f, "{}", s)
    }
}

/// Physical unit for the reported area.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub enum AreaUnit {
    SquareMeters,
    Hectares,
    SquareKilometers,
}

impl AreaUnit {
    /// Convert an area in square meters into this unit.
    pub fn from_m2(self, m2: f64) -> f64 {
        match self {
            AreaUnit::SquareMeters => m2,
            AreaUnit::Hectares => m2 / 10_000.0,
            AreaUnit::SquareKilometers => m2 / 1_000_000.0,
        }
    }

    /// Short suffix used in summary keys, e.g. `area_ha`.
    pub fn suffix(&self) -> &'static str {
        match self {
            AreaUnit::SquareMeters => "m2",
            AreaUnit::Hectares => "ha",
            AreaUnit::SquareKilometers => "km2",
        }
    }
}

// Manual implementation so the CLI accepts the conventional short names
impl clap::ValueEnum for AreaUnit {
    fn value_variants<'a>() -> &'a [Self] {
        &[
            AreaUnit::SquareMeters,
            AreaUnit::Hectares,
            AreaUnit::SquareKilometers,
        ]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(match self {
            AreaUnit::SquareMeters => clap::builder::PossibleValue::new("m2"),
            AreaUnit::Hectares => clap::builder::PossibleValue::new("ha"),
            AreaUnit::SquareKilometers => clap::builder::PossibleValue::new("km2"),
        })
    }
}

impl std::fmt::Display for AreaUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.suffix())
    }
}

/// Coordinate reference system family of a grid.
///
/// Projected grids have pixel sizes in meters; geographic grids have pixel
/// sizes in degrees and need a spheroidal area computation.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum CrsKind {
    Projected,
    Geographic,
}

impl std::fmt::Display for CrsKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CrsKind::Projected => write!(f, "Projected"),
            CrsKind::Geographic => write!(f, "Geographic"),
        }
    }
}
