//! Component kinds and their display names
//!
//! Names and symbols come from exhaustive matches on [`ComponentType`], so
//! adding a kind without naming it is a compile error rather than a runtime
//! lookup failure.

use std::fmt;

use crate::io::error::{CircuitError, Result};

/// Closed set of placeable circuit elements
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum ComponentType {
    /// No component in the cell
    #[default]
    Empty = 0,
    /// Plain conductor
    Wire = 1,
    /// Resistor
    Resistor = 2,
    /// Capacitor
    Capacitor = 3,
    /// Inductor
    Inductor = 4,
    /// Diode
    Diode = 5,
    /// Light-emitting diode
    Led = 6,
    /// Switch
    Switch = 7,
    /// Power source terminal
    Battery = 8,
    /// Ground terminal
    Ground = 9,
}

impl ComponentType {
    /// Every kind in catalog order
    pub const ALL: [Self; 10] = [
        Self::Empty,
        Self::Wire,
        Self::Resistor,
        Self::Capacitor,
        Self::Inductor,
        Self::Diode,
        Self::Led,
        Self::Switch,
        Self::Battery,
        Self::Ground,
    ];

    /// Every kind a random fill may place
    pub const PLACEABLE: [Self; 9] = [
        Self::Wire,
        Self::Resistor,
        Self::Capacitor,
        Self::Inductor,
        Self::Diode,
        Self::Led,
        Self::Switch,
        Self::Battery,
        Self::Ground,
    ];

    /// Components that sit between the terminals and limit current
    pub const LOADS: [Self; 6] = [
        Self::Resistor,
        Self::Capacitor,
        Self::Inductor,
        Self::Diode,
        Self::Led,
        Self::Switch,
    ];

    /// Human-readable name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Empty => "Empty",
            Self::Wire => "Wire",
            Self::Resistor => "Resistor",
            Self::Capacitor => "Capacitor",
            Self::Inductor => "Inductor",
            Self::Diode => "Diode",
            Self::Led => "LED",
            Self::Switch => "Switch",
            Self::Battery => "Battery",
            Self::Ground => "Ground",
        }
    }

    /// Single character used by the text renderer
    pub const fn symbol(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Wire => '-',
            Self::Resistor => 'R',
            Self::Capacitor => 'C',
            Self::Inductor => 'L',
            Self::Diode => 'D',
            Self::Led => '*',
            Self::Switch => 'S',
            Self::Battery => 'B',
            Self::Ground => 'G',
        }
    }

    /// Stable numeric code, also accepted by `add`
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Whether the cell holds a component
    pub const fn is_component(self) -> bool {
        !matches!(self, Self::Empty)
    }

    /// Whether the kind is a circuit terminal (battery or ground)
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Battery | Self::Ground)
    }

    /// Whether the kind is a load component
    pub const fn is_load(self) -> bool {
        self.is_component() && !self.is_terminal() && !matches!(self, Self::Wire)
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for ComponentType {
    type Error = CircuitError;

    fn try_from(code: u8) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.code() == code)
            .ok_or_else(|| CircuitError::UnknownComponent {
                name: code.to_string(),
            })
    }
}

/// One catalog row
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Component kind
    pub kind: ComponentType,
    /// Display name
    pub name: &'static str,
    /// Render symbol
    pub symbol: char,
}

/// Kind to name mapping built once at startup
#[derive(Clone, Debug)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// Build the catalog from the closed kind set
    pub fn new() -> Self {
        let entries = ComponentType::ALL
            .iter()
            .map(|&kind| CatalogEntry {
                kind,
                name: kind.name(),
                symbol: kind.symbol(),
            })
            .collect();

        Self { entries }
    }

    /// All rows in catalog order
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Number of kinds, including the empty sentinel
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no rows
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Display name for a kind
    pub fn name_of(&self, kind: ComponentType) -> &'static str {
        self.entries
            .iter()
            .find(|entry| entry.kind == kind)
            .map_or_else(|| kind.name(), |entry| entry.name)
    }

    /// Resolve operator input to a kind
    ///
    /// Accepts a catalog name (case-insensitive), a render symbol, or a
    /// numeric code.
    ///
    /// # Errors
    ///
    /// Returns `UnknownComponent` when nothing in the catalog matches
    pub fn resolve(&self, input: &str) -> Result<ComponentType> {
        let trimmed = input.trim();

        if let Ok(code) = trimmed.parse::<u8>() {
            return ComponentType::try_from(code);
        }

        let mut symbol = trimmed.chars();
        let single = match (symbol.next(), symbol.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        };

        self.entries
            .iter()
            .find(|entry| {
                entry.name.eq_ignore_ascii_case(trimmed)
                    || single.is_some_and(|c| c.eq_ignore_ascii_case(&entry.symbol))
            })
            .map(|entry| entry.kind)
            .ok_or_else(|| CircuitError::UnknownComponent {
                name: trimmed.to_string(),
            })
    }
}
