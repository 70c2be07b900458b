#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Safe-point checklist and certification types.
//!
//! A safe point is a physical waypoint (gas station, rest area, checkpoint)
//! where an escorted convoy can stop. Its security suitability is a fixed
//! 12-item weighted checklist; the weights sum to exactly 100 so the score
//! doubles as a percentage, and the certification tier is derived from the
//! score alone.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// The 12-item boolean safety checklist for a waypoint.
///
/// Field order follows the evaluation form: surveillance first, then
/// visibility, then operational amenities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafePointCriteria {
    /// On-site security guard.
    pub has_security_guard: bool,
    /// Working CCTV coverage.
    pub has_cctv: bool,
    /// Police presence or regular patrols nearby.
    pub has_police_nearby: bool,
    /// Open around the clock.
    pub is_24_hours: bool,
    /// Well lit at night.
    pub has_good_lighting: bool,
    /// Clearly visible from the road.
    pub is_visible_from_road: bool,
    /// Steady flow of people and vehicles.
    pub has_high_traffic: bool,
    /// Fenced or walled perimeter.
    pub has_perimeter_fence: bool,
    /// Room to park a loaded tractor-trailer.
    pub has_truck_parking: bool,
    /// Fuel available on site.
    pub has_fuel_station: bool,
    /// Food available on site.
    pub has_food_service: bool,
    /// Restrooms available.
    pub has_restrooms: bool,
}

/// Checklist category groupings used for the dashboard breakdown.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CriterionCategory {
    /// Surveillance and human presence.
    Vigilancia,
    /// Visibility and deterrence.
    Visibilidad,
    /// Operational amenities for the convoy.
    Operacional,
}

impl CriterionCategory {
    /// Human-readable category heading.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Vigilancia => "Vigilancia y presencia",
            Self::Visibilidad => "Visibilidad y disuasión",
            Self::Operacional => "Operacional",
        }
    }

    /// Maximum points attainable in this category.
    #[must_use]
    pub const fn max_points(self) -> u8 {
        match self {
            Self::Vigilancia => 40,
            Self::Visibilidad => 35,
            Self::Operacional => 25,
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Vigilancia, Self::Visibilidad, Self::Operacional]
    }
}

/// One item of the safety checklist, with its fixed point weight.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Criterion {
    // ── Vigilancia y presencia ──────────────────────────
    /// On-site security guard.
    SecurityGuard,
    /// Working CCTV coverage.
    Cctv,
    /// Police presence or regular patrols nearby.
    PoliceNearby,
    /// Open 24 hours.
    TwentyFourHours,

    // ── Visibilidad y disuasión ─────────────────────────
    /// Well lit at night.
    GoodLighting,
    /// Clearly visible from the road.
    VisibleFromRoad,
    /// Steady flow of people and vehicles.
    HighTraffic,
    /// Fenced or walled perimeter.
    PerimeterFence,

    // ── Operacional ─────────────────────────────────────
    /// Room to park a loaded tractor-trailer.
    TruckParking,
    /// Fuel available on site.
    FuelStation,
    /// Food available on site.
    FoodService,
    /// Restrooms available.
    Restrooms,
}

impl Criterion {
    /// Fixed point weight of this criterion. Weights sum to exactly 100
    /// across all 12 criteria (40 + 35 + 25 by category).
    #[must_use]
    pub const fn weight(self) -> u8 {
        match self {
            Self::SecurityGuard => 15,
            Self::Cctv | Self::GoodLighting => 10,
            Self::VisibleFromRoad | Self::TruckParking => 9,
            Self::PoliceNearby | Self::HighTraffic | Self::PerimeterFence => 8,
            Self::TwentyFourHours => 7,
            Self::FuelStation => 6,
            Self::FoodService | Self::Restrooms => 5,
        }
    }

    /// Category this criterion belongs to.
    #[must_use]
    pub const fn category(self) -> CriterionCategory {
        match self {
            Self::SecurityGuard | Self::Cctv | Self::PoliceNearby | Self::TwentyFourHours => {
                CriterionCategory::Vigilancia
            }
            Self::GoodLighting
            | Self::VisibleFromRoad
            | Self::HighTraffic
            | Self::PerimeterFence => CriterionCategory::Visibilidad,
            Self::TruckParking | Self::FuelStation | Self::FoodService | Self::Restrooms => {
                CriterionCategory::Operacional
            }
        }
    }

    /// Whether this criterion is met in the given checklist.
    #[must_use]
    pub const fn is_met(self, criteria: &SafePointCriteria) -> bool {
        match self {
            Self::SecurityGuard => criteria.has_security_guard,
            Self::Cctv => criteria.has_cctv,
            Self::PoliceNearby => criteria.has_police_nearby,
            Self::TwentyFourHours => criteria.is_24_hours,
            Self::GoodLighting => criteria.has_good_lighting,
            Self::VisibleFromRoad => criteria.is_visible_from_road,
            Self::HighTraffic => criteria.has_high_traffic,
            Self::PerimeterFence => criteria.has_perimeter_fence,
            Self::TruckParking => criteria.has_truck_parking,
            Self::FuelStation => criteria.has_fuel_station,
            Self::FoodService => criteria.has_food_service,
            Self::Restrooms => criteria.has_restrooms,
        }
    }

    /// Evaluation-form label shown to field staff.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::SecurityGuard => "Guardia de seguridad en sitio",
            Self::Cctv => "Cámaras de videovigilancia",
            Self::PoliceNearby => "Presencia policial cercana",
            Self::TwentyFourHours => "Operación 24 horas",
            Self::GoodLighting => "Iluminación nocturna adecuada",
            Self::VisibleFromRoad => "Visible desde la carretera",
            Self::HighTraffic => "Flujo constante de personas",
            Self::PerimeterFence => "Perímetro bardeado",
            Self::TruckParking => "Estacionamiento para tractocamión",
            Self::FuelStation => "Estación de combustible",
            Self::FoodService => "Servicio de alimentos",
            Self::Restrooms => "Sanitarios",
        }
    }

    /// Returns all criteria belonging to the given category.
    #[must_use]
    pub fn for_category(category: CriterionCategory) -> Vec<Self> {
        Self::all()
            .iter()
            .copied()
            .filter(|criterion| criterion.category() == category)
            .collect()
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::SecurityGuard,
            Self::Cctv,
            Self::PoliceNearby,
            Self::TwentyFourHours,
            Self::GoodLighting,
            Self::VisibleFromRoad,
            Self::HighTraffic,
            Self::PerimeterFence,
            Self::TruckParking,
            Self::FuelStation,
            Self::FoodService,
            Self::Restrooms,
        ]
    }
}

/// Certification tier derived from a safe point's score.
///
/// Variants are declared in ascending order so `Ord` matches tier rank:
/// precaución < bronce < plata < oro.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CertificationLevel {
    /// Below every certification threshold; use only with extra measures.
    Precaucion,
    /// Meets the minimum bar for a supervised stop.
    Bronce,
    /// Solid security posture, suitable for routine stops.
    Plata,
    /// Highest tier; suitable for overnight layovers.
    Oro,
}

impl CertificationLevel {
    /// Minimum score for this tier.
    #[must_use]
    pub const fn min_score(self) -> u8 {
        match self {
            Self::Precaucion => 0,
            Self::Bronce => 35,
            Self::Plata => 55,
            Self::Oro => 75,
        }
    }

    /// Display label for badges and reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Precaucion => "Precaución",
            Self::Bronce => "Bronce",
            Self::Plata => "Plata",
            Self::Oro => "Oro",
        }
    }

    /// One-line guidance shown next to the badge.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Precaucion => "Punto sin certificar; detenerse solo con custodia reforzada",
            Self::Bronce => "Apto para paradas breves con supervisión",
            Self::Plata => "Apto para paradas de ruta regulares",
            Self::Oro => "Apto para pernocta y estancias prolongadas",
        }
    }

    /// Returns all tiers, ascending.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Precaucion, Self::Bronce, Self::Plata, Self::Oro]
    }
}

/// A certified waypoint with its evaluated checklist and derived score.
///
/// `total_score` and `certification_level` are derived from `criteria` and
/// must always be recomputed together; mutating one without the other
/// breaks the scoring invariant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafePoint {
    /// Store-assigned identifier.
    pub id: String,
    /// Display name (e.g. "Gasolinera La Y, km 112").
    pub name: String,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Street address or highway marker.
    pub address: String,
    /// Municipality the point sits in.
    pub municipality: String,
    /// State the point sits in.
    pub state: String,
    /// Free-form evaluator notes.
    pub notes: Option<String>,
    /// Evaluated checklist.
    pub criteria: SafePointCriteria,
    /// Weighted checklist score, 0-100.
    pub total_score: u8,
    /// Tier derived from `total_score`.
    pub certification_level: CertificationLevel,
}

/// Points earned in one checklist category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    /// The category.
    pub category: CriterionCategory,
    /// Points earned from met criteria.
    pub points: u8,
    /// Maximum points attainable in the category.
    pub max_points: u8,
}

/// A safe point paired with its distance from a query position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbySafePoint {
    /// The safe point.
    pub point: SafePoint,
    /// Great-circle distance from the query position, in kilometers.
    pub distance_km: f64,
}
