//! Friendly area labels for raw upstream location names.
//!
//! Two lookups live here and they treat unknown input differently:
//!
//! - [`AreaTable::area_for`] is used when aggregating. A raw name that is not
//!   in the table (or is empty) has no area and is dropped.
//! - [`display_name`] is used when showing individual locations. A raw name
//!   without a friendlier spelling is shown as-is; an empty name becomes
//!   [`UNKNOWN_LOCATION`].

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::Serialize;

use crate::error::CoreError;

/// Label shown for a location whose raw name is missing or blank.
pub const UNKNOWN_LOCATION: &str = "Unknown";

/// Built-in area table: friendly label followed by the raw names it covers.
pub const STANDARD_AREAS: &[(&str, &[&str])] = &[
    (
        "Village Strength Area",
        &["UV Strength Landing", "UV Strength Room"],
    ),
    ("Village Cardio Area", &["UV Cardio Landing", "UV Cardio Room"]),
    (
        "Lyon Weight Rooms",
        &[
            "LRC Weight Room",
            "LRC Functional Training Room",
            "LRC Free Weights & Stretching",
        ],
    ),
    (
        "Lyon Courts",
        &[
            "LRC Main Gym Court A",
            "LRC Main Gym Court B",
            "LRC Main Gym Court C",
        ],
    ),
    ("HSC Cardio", &["HSC Cardio"]),
    ("HSC Weights", &["HSC Strength Machines", "HSC Weight Room"]),
    (
        "Aquatics",
        &[
            "UAC Comp Pool",
            "PED Pool",
            "UAC Dive Pool - No Divers",
            "UAC Dive Pool - Divers",
        ],
    ),
];

/// Per-location display spellings used by the live view.
const DISPLAY_NAMES: &[(&str, &str)] = &[
    // Village
    ("UV Strength Landing", "Village Strength Area"),
    ("UV Cardio Landing", "Village Cardio Area"),
    ("UV Cardio Room", "Village Cardio Room"),
    ("UV Strength Room", "Village Strength Room"),
    ("UV Group Ex 1", "Village Group Studio 1"),
    ("UV Group Ex 2", "Village Group Studio 2"),
    ("UV Queenax", "Village Functional Rig"),
    // Lyon Center
    ("LRC Weight Room", "Lyon Weight Room"),
    ("LRC Functional Training Room", "Lyon Functional Room"),
    ("LRC Free Weights & Stretching", "Lyon Free Weights"),
    ("LRC Robinson Room", "Lyon Robinson Room"),
    ("LRC Main Gym Court A", "Lyon Court A"),
    ("LRC Main Gym Court B", "Lyon Court B"),
    ("LRC Main Gym Court C", "Lyon Court C"),
    // Pools
    ("UAC Comp Pool", "Uytengsu Competition Pool"),
    ("UAC Dive Pool - No Divers", "Dive Pool (no divers)"),
    ("UAC Dive Pool - Divers", "Dive Pool (with divers)"),
];

static STANDARD: LazyLock<AreaTable> =
    LazyLock::new(|| AreaTable::new(STANDARD_AREAS).expect("built-in area table is valid"));

static DISPLAY: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| DISPLAY_NAMES.iter().copied().collect());

/// One friendly area and the raw location names it aggregates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaDef {
    pub area: String,
    pub raw_names: Vec<String>,
}

/// Validated many-to-one mapping from raw location names to area labels.
#[derive(Debug, Clone)]
pub struct AreaTable {
    areas: Vec<AreaDef>,
    by_raw: HashMap<String, usize>,
}

impl AreaTable {
    /// Build a table from `(area, raw_names)` pairs, preserving their order.
    ///
    /// Fails when a label is blank or repeated, or when a raw name is blank or
    /// assigned to more than one area.
    pub fn new(entries: &[(&str, &[&str])]) -> Result<Self, CoreError> {
        let mut areas = Vec::with_capacity(entries.len());
        let mut by_raw = HashMap::new();

        for (idx, (area, raw_names)) in entries.iter().enumerate() {
            let area = area.trim();
            if area.is_empty() {
                return Err(CoreError::Validation(format!(
                    "area label at position {idx} is blank"
                )));
            }
            if areas.iter().any(|a: &AreaDef| a.area == area) {
                return Err(CoreError::Validation(format!(
                    "area '{area}' is defined more than once"
                )));
            }

            let mut names = Vec::with_capacity(raw_names.len());
            for raw in raw_names.iter() {
                let raw = raw.trim();
                if raw.is_empty() {
                    return Err(CoreError::Validation(format!(
                        "area '{area}' lists a blank raw name"
                    )));
                }
                if let Some(&prev) = by_raw.get(raw) {
                    let other: &AreaDef = &areas[prev];
                    return Err(CoreError::Validation(format!(
                        "raw name '{raw}' is assigned to both '{}' and '{area}'",
                        other.area
                    )));
                }
                by_raw.insert(raw.to_string(), idx);
                names.push(raw.to_string());
            }

            areas.push(AreaDef {
                area: area.to_string(),
                raw_names: names,
            });
        }

        Ok(Self { areas, by_raw })
    }

    /// The built-in table, validated once on first use.
    pub fn standard() -> &'static AreaTable {
        &STANDARD
    }

    /// Area label for a raw name, or `None` if the name is unmapped or blank.
    pub fn area_for(&self, raw_name: &str) -> Option<&str> {
        self.index_of(raw_name).map(|i| self.areas[i].area.as_str())
    }

    /// Position of the area covering `raw_name` in table order.
    pub fn index_of(&self, raw_name: &str) -> Option<usize> {
        let raw = raw_name.trim();
        if raw.is_empty() {
            return None;
        }
        self.by_raw.get(raw).copied()
    }

    /// Area labels in table order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.areas.iter().map(|a| a.area.as_str())
    }

    pub fn areas(&self) -> &[AreaDef] {
        &self.areas
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }
}

/// Friendly spelling of a single raw location name.
///
/// Unlisted names pass through unchanged (trimmed). Missing or blank names
/// become [`UNKNOWN_LOCATION`].
pub fn display_name(raw_name: Option<&str>) -> String {
    let raw = raw_name.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return UNKNOWN_LOCATION.to_string();
    }
    DISPLAY.get(raw).copied().unwrap_or(raw).to_string()
}
