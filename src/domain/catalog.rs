//! Emission Catalog
//!
//! Fixed table of ADEME emission factors (kg CO₂e per passenger-km) with the
//! per-mode capability tags that drive which form fields are collected.

use serde::Serialize;

use super::DomainError;

/// Reference data source for the factors
pub const FACTOR_SOURCE: &str = "ADEME - Base Empreinte";

/// ADEME trip calculator the factors were taken from
pub const FACTOR_SOURCE_URL: &str = "https://agirpourlatransition.ademe.fr/particuliers/evaluer-son-impact/calculer-empreinte-carbone/calculer-emissions-carbone-trajets";

/// Open source methodology behind the factors
pub const METHODOLOGY_URL: &str = "https://github.com/incubateur-ademe/impactco2";

/// Mode used as the baseline for avoided emissions: one person alone in a combustion car
pub const REFERENCE_MODE: &str = "Voiture thermique";

/// One row of the catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmissionFactor {
    /// Mode label, as offered to participants and stored in the database
    pub mode: &'static str,
    /// kg CO₂e per passenger-km
    pub factor: f64,
    /// Emissions are split between the driver and extra passengers
    pub shares_vehicle: bool,
    /// Participants are asked what would help them switch to soft mobility
    pub invites_feedback: bool,
    /// Walking, cycling and light electric modes
    pub soft_mobility: bool,
}

impl EmissionFactor {
    const fn new(mode: &'static str, factor: f64) -> Self {
        Self {
            mode,
            factor,
            shares_vehicle: false,
            invites_feedback: false,
            soft_mobility: false,
        }
    }

    const fn shared(mut self) -> Self {
        self.shares_vehicle = true;
        self
    }

    const fn feedback(mut self) -> Self {
        self.invites_feedback = true;
        self
    }

    const fn soft(mut self) -> Self {
        self.soft_mobility = true;
        self
    }
}

/// ADEME factors, in the order they are offered to participants.
///
/// The `shared` and `feedback` sets differ on purpose: light scooters are asked
/// for feedback but never for a passenger count, bikes the other way around.
const ADEME_FACTORS: [EmissionFactor; 11] = [
    EmissionFactor::new("Marche", 0.0).soft(),
    EmissionFactor::new("Vélo mécanique", 0.00017).shared().soft(),
    EmissionFactor::new("Tramway", 0.00428).soft(),
    EmissionFactor::new("Vélo à assistance électrique", 0.011).shared().soft(),
    EmissionFactor::new("Trottinette à assistance électrique", 0.0249).soft(),
    EmissionFactor::new("Scooter ou moto légère thermique", 0.076).feedback(),
    EmissionFactor::new("Voiture électrique", 0.103).shared().feedback(),
    EmissionFactor::new("Bus GNV ou thermique", 0.122),
    EmissionFactor::new("Moto thermique", 0.217).shared().feedback(),
    EmissionFactor::new("Train (TER)", 0.277),
    EmissionFactor::new("Voiture thermique", 0.218).shared().feedback(),
];

/// Immutable mode → factor lookup, built once at startup and shared via `Arc`.
#[derive(Debug, Clone)]
pub struct EmissionCatalog {
    entries: Vec<EmissionFactor>,
}

impl EmissionCatalog {
    /// Catalog with the ADEME factors
    pub fn ademe() -> Self {
        Self {
            entries: ADEME_FACTORS.to_vec(),
        }
    }

    /// Look up the catalog row for a mode label
    pub fn entry(&self, mode: &str) -> Result<&EmissionFactor, DomainError> {
        self.entries
            .iter()
            .find(|e| e.mode == mode)
            .ok_or_else(|| DomainError::UnknownMode(mode.to_string()))
    }

    /// Emission factor for a mode, in kg CO₂e per passenger-km
    pub fn factor_for(&self, mode: &str) -> Result<f64, DomainError> {
        self.entry(mode).map(|e| e.factor)
    }

    /// All rows in declaration order
    pub fn modes(&self) -> impl Iterator<Item = &EmissionFactor> {
        self.entries.iter()
    }

    pub fn contains(&self, mode: &str) -> bool {
        self.entry(mode).is_ok()
    }

    /// Whether the passenger count is collected for this mode
    pub fn shares_vehicle(&self, mode: &str) -> bool {
        self.entry(mode).map(|e| e.shares_vehicle).unwrap_or(false)
    }

    /// Whether a free-text reason is collected for this mode
    pub fn invites_feedback(&self, mode: &str) -> bool {
        self.entry(mode).map(|e| e.invites_feedback).unwrap_or(false)
    }

    pub fn soft_mobility(&self, mode: &str) -> bool {
        self.entry(mode).map(|e| e.soft_mobility).unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for EmissionCatalog {
    fn default() -> Self {
        Self::ademe()
    }
}
