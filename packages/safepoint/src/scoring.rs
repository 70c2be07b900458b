//! Weighted checklist scoring and certification tiering.

use custodia_safepoint_models::{
    CategoryBreakdown, CertificationLevel, Criterion, CriterionCategory, SafePoint,
    SafePointCriteria,
};

/// Static upgrade shortlist: the four highest-weight criteria that field
/// audits most often find missing, in priority order.
///
/// This is deliberately a fixed shortlist, not an optimal remaining-gain
/// sort over all twelve criteria; recommendations never mention items
/// outside it.
pub const PRIORITY_UPGRADES: [Criterion; 4] = [
    Criterion::SecurityGuard,
    Criterion::Cctv,
    Criterion::GoodLighting,
    Criterion::VisibleFromRoad,
];

/// Maximum number of upgrade recommendations returned for one point.
pub const MAX_RECOMMENDATIONS: usize = 3;

/// Weighted sum of the met criteria, 0-100.
///
/// Pure and idempotent: the same checklist always yields the same score.
#[must_use]
pub fn calculate_score(criteria: &SafePointCriteria) -> u8 {
    Criterion::all()
        .iter()
        .filter(|criterion| criterion.is_met(criteria))
        .map(|criterion| criterion.weight())
        .sum()
}

/// Certification tier for a score, thresholds checked highest-first.
#[must_use]
pub const fn certification_for(score: u8) -> CertificationLevel {
    if score >= CertificationLevel::Oro.min_score() {
        CertificationLevel::Oro
    } else if score >= CertificationLevel::Plata.min_score() {
        CertificationLevel::Plata
    } else if score >= CertificationLevel::Bronce.min_score() {
        CertificationLevel::Bronce
    } else {
        CertificationLevel::Precaucion
    }
}

/// Score and tier for a checklist, computed together.
///
/// The tier is derived from the score, never stored authoritatively, so
/// this pair is the only sanctioned way to refresh both.
#[must_use]
pub fn score_and_certify(criteria: &SafePointCriteria) -> (u8, CertificationLevel) {
    let score = calculate_score(criteria);
    (score, certification_for(score))
}

/// Replaces a safe point's checklist and refreshes both derived fields.
///
/// Going through this function keeps `total_score` and
/// `certification_level` consistent with `criteria`; callers must not set
/// either field directly.
pub fn apply_criteria(point: &mut SafePoint, criteria: SafePointCriteria) {
    let (score, level) = score_and_certify(&criteria);
    point.criteria = criteria;
    point.total_score = score;
    point.certification_level = level;
}

/// Per-category points for the dashboard breakdown.
///
/// The three category sums always add up to [`calculate_score`] for the
/// same checklist.
#[must_use]
pub fn category_breakdown(criteria: &SafePointCriteria) -> Vec<CategoryBreakdown> {
    CriterionCategory::all()
        .iter()
        .map(|&category| {
            let points = Criterion::for_category(category)
                .iter()
                .filter(|criterion| criterion.is_met(criteria))
                .map(|criterion| criterion.weight())
                .sum();
            CategoryBreakdown {
                category,
                points,
                max_points: category.max_points(),
            }
        })
        .collect()
}

/// Upgrade recommendations for a point: the unmet entries of
/// [`PRIORITY_UPGRADES`], at most [`MAX_RECOMMENDATIONS`] of them.
#[must_use]
pub fn recommended_upgrades(criteria: &SafePointCriteria) -> Vec<Criterion> {
    PRIORITY_UPGRADES
        .iter()
        .copied()
        .filter(|criterion| !criterion.is_met(criteria))
        .take(MAX_RECOMMENDATIONS)
        .collect()
}
