//! Warehouse selection.
//!
//! Picks the single warehouse, among those in the selected stores' city, that
//! minimizes the requested criterion. Selection is a linear arg-min over the
//! scored candidates; ties go to the lowest warehouse id.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use geo::GeodesicDistance;
use serde::Serialize;

use crate::catalog::Catalog;
use crate::models::{Store, Warehouse};
use crate::SelectionError;

/// The dimension candidates are scored on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Criterion {
    Cost,
    Distance,
    Both,
    Capacity,
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Criterion::Cost => write!(f, "cost"),
            Criterion::Distance => write!(f, "distance"),
            Criterion::Both => write!(f, "both"),
            Criterion::Capacity => write!(f, "capacity"),
        }
    }
}

impl FromStr for Criterion {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cost" => Ok(Criterion::Cost),
            "distance" => Ok(Criterion::Distance),
            "both" => Ok(Criterion::Both),
            "capacity" => Ok(Criterion::Capacity),
            other => Err(SelectionError::InvalidCriterion(other.to_string())),
        }
    }
}

/// Per-candidate metrics computed for one selection request.
///
/// `score` is the value the selection minimizes. Normalized component scores
/// are only populated for the criterion that uses them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WarehouseMetric {
    pub warehouse_id: i64,
    pub total_distance_km: f64,
    pub cost: f64,
    pub capacity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combined_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity_score: Option<f64>,
    pub score: f64,
}

/// Outcome of a successful selection.
#[derive(Debug, Clone, Serialize)]
pub struct Selection {
    pub criterion: Criterion,
    pub city: String,
    pub warehouse: Warehouse,
    pub metric: WarehouseMetric,
    /// Store ids that contributed to the distance metrics.
    pub store_ids: Vec<i64>,
    /// Selected stores ignored because they are in a different city.
    pub dropped_store_ids: Vec<i64>,
    /// Requested ids with no matching store.
    pub unknown_store_ids: Vec<i64>,
    /// Every candidate, best first.
    pub ranking: Vec<WarehouseMetric>,
}

/// Selects the best warehouse for `store_ids` under `criterion`.
///
/// The city of the first matching store (in catalog order) is authoritative;
/// selected stores elsewhere are dropped and reported in
/// [`Selection::dropped_store_ids`].
///
/// # Errors
///
/// - [`SelectionError::EmptyStoreSelection`] if `store_ids` is empty.
/// - [`SelectionError::UnresolvedStores`] if no id matches a store.
/// - [`SelectionError::NoCandidates`] if the resolved city has no warehouses.
pub fn select_warehouse(
    catalog: &Catalog,
    store_ids: &[i64],
    criterion: Criterion,
) -> Result<Selection, SelectionError> {
    if store_ids.is_empty() {
        return Err(SelectionError::EmptyStoreSelection);
    }

    let requested: HashSet<i64> = store_ids.iter().copied().collect();
    let resolved: Vec<&Store> = catalog
        .stores()
        .iter()
        .filter(|s| requested.contains(&s.id))
        .collect();

    let Some(first) = resolved.first() else {
        return Err(SelectionError::UnresolvedStores);
    };
    let city = first.city.clone();

    let (stores, dropped): (Vec<&Store>, Vec<&Store>) =
        resolved.into_iter().partition(|s| s.city == city);

    let known: HashSet<i64> = stores.iter().chain(dropped.iter()).map(|s| s.id).collect();
    let mut seen = HashSet::new();
    let unknown_store_ids: Vec<i64> = store_ids
        .iter()
        .copied()
        .filter(|id| !known.contains(id) && seen.insert(*id))
        .collect();
    let dropped_store_ids: Vec<i64> = dropped.iter().map(|s| s.id).collect();

    if !dropped_store_ids.is_empty() {
        tracing::warn!(
            city = %city,
            dropped = ?dropped_store_ids,
            "selected stores outside the resolved city were ignored"
        );
    }
    if !unknown_store_ids.is_empty() {
        tracing::warn!(unknown = ?unknown_store_ids, "selected store ids not found");
    }

    let candidates: Vec<&Warehouse> = catalog.warehouses_in_city(&city).collect();
    if candidates.is_empty() {
        return Err(SelectionError::NoCandidates { city });
    }

    let mut metrics: Vec<WarehouseMetric> = candidates
        .iter()
        .map(|w| WarehouseMetric {
            warehouse_id: w.id,
            total_distance_km: total_distance_km(&stores, w),
            cost: w.cost,
            capacity: w.capacity,
            distance_score: None,
            cost_score: None,
            combined_score: None,
            capacity_score: None,
            score: 0.0,
        })
        .collect();
    score_metrics(&mut metrics, criterion);

    let (best_idx, best) = metrics
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| rank_order(a, b))
        .ok_or_else(|| SelectionError::NoCandidates { city: city.clone() })?;
    let metric = best.clone();
    let warehouse = candidates[best_idx].clone();

    let mut ranking = metrics;
    ranking.sort_by(rank_order);

    tracing::debug!(
        criterion = %criterion,
        city = %city,
        candidates = ranking.len(),
        warehouse_id = warehouse.id,
        score = metric.score,
        "warehouse selected"
    );

    Ok(Selection {
        criterion,
        city,
        warehouse,
        metric,
        store_ids: stores.iter().map(|s| s.id).collect(),
        dropped_store_ids,
        unknown_store_ids,
        ranking,
    })
}

/// WGS-84 geodesic distance between a store and a warehouse, in kilometres.
#[must_use]
pub fn distance_km(store: &Store, warehouse: &Warehouse) -> f64 {
    store.point().geodesic_distance(&warehouse.point()) / 1000.0
}

fn total_distance_km(stores: &[&Store], warehouse: &Warehouse) -> f64 {
    stores.iter().map(|s| distance_km(s, warehouse)).sum()
}

fn score_metrics(metrics: &mut [WarehouseMetric], criterion: Criterion) {
    match criterion {
        Criterion::Cost => {
            for m in metrics.iter_mut() {
                m.score = m.cost;
            }
        }
        Criterion::Distance => {
            for m in metrics.iter_mut() {
                m.score = m.total_distance_km;
            }
        }
        Criterion::Both => {
            let max_distance = max_of(metrics.iter().map(|m| m.total_distance_km));
            let max_cost = max_of(metrics.iter().map(|m| m.cost));
            for m in metrics.iter_mut() {
                let distance_score = normalize(m.total_distance_km, max_distance);
                let cost_score = normalize(m.cost, max_cost);
                m.distance_score = Some(distance_score);
                m.cost_score = Some(cost_score);
                m.combined_score = Some(distance_score + cost_score);
                m.score = distance_score + cost_score;
            }
        }
        Criterion::Capacity => {
            let max_capacity = max_of(metrics.iter().map(|m| m.capacity));
            for m in metrics.iter_mut() {
                let capacity_score = normalize(m.capacity, max_capacity);
                m.capacity_score = Some(capacity_score);
                // subtract from +0.0 so an empty warehouse scores 0, not -0
                m.score = 0.0 - capacity_score;
            }
        }
    }
}

fn max_of(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(0.0, f64::max)
}

/// `value / max`, or 0 when the maximum is not positive.
fn normalize(value: f64, max: f64) -> f64 {
    if max > 0.0 {
        value / max
    } else {
        0.0
    }
}

fn rank_order(a: &WarehouseMetric, b: &WarehouseMetric) -> Ordering {
    a.score
        .total_cmp(&b.score)
        .then_with(|| a.warehouse_id.cmp(&b.warehouse_id))
}

#[cfg(test)]
#[path = "selector_test.rs"]
mod tests;
