//! Deduplicated places.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use geo::Coord;
use tripscore_core::{ClusterKey, Continent, ResolvedLocation, UserId, Visit};

/// One or more visits sharing a cluster key.
///
/// The first visit in chronological order is the representative: it supplies
/// the coordinate, address, and canonical location. Later visits in the same
/// cell are absorbed into the counters only.
#[derive(Debug, Clone, PartialEq)]
pub struct UniquePlace {
    /// Grid cell identifying the place.
    pub key: ClusterKey,
    /// Coordinate of the representative visit (`x = longitude`).
    pub coordinate: Coord<f64>,
    /// Address of the representative visit.
    pub address: String,
    /// Canonical country.
    pub country: String,
    /// Canonical continent.
    pub continent: Continent,
    /// Owner of the representative visit.
    pub owner: UserId,
    /// Identifier of the representative visit.
    pub first_visit_id: String,
    /// Post attached to the representative visit.
    pub first_post_id: Option<String>,
    /// When the place was first visited.
    pub first_visited_at: DateTime<Utc>,
    /// Number of visits absorbed into the place, the representative included.
    pub visit_count: usize,
    /// Distinct users who visited the place.
    pub visitors: BTreeSet<UserId>,
    /// Category tags across every absorbed visit, in first-seen order.
    pub category_tags: Vec<String>,
}

impl UniquePlace {
    pub(crate) fn first(
        key: ClusterKey,
        coordinate: Coord<f64>,
        visit: &Visit,
        location: ResolvedLocation,
    ) -> Self {
        let mut place = Self {
            key,
            coordinate,
            address: visit.address.trim().to_owned(),
            country: location.country,
            continent: location.continent,
            owner: visit.user_id.clone(),
            first_visit_id: visit.id.clone(),
            first_post_id: visit.post_id.clone(),
            first_visited_at: visit.visited_at(),
            visit_count: 0,
            visitors: BTreeSet::new(),
            category_tags: Vec::new(),
        };
        place.absorb(visit);
        place
    }

    /// Fold a later visit of the same cell into the counters.
    pub(crate) fn absorb(&mut self, visit: &Visit) {
        self.visit_count = self.visit_count.saturating_add(1);
        self.visitors.insert(visit.user_id.clone());
        for tag in &visit.category_tags {
            let trimmed = tag.trim();
            if !trimmed.is_empty() && !self.category_tags.iter().any(|t| t == trimmed) {
                self.category_tags.push(trimmed.to_owned());
            }
        }
    }

    /// Display name: the address, or the country when no address is known.
    #[must_use]
    pub fn name(&self) -> &str {
        if self.address.is_empty() {
            &self.country
        } else {
            &self.address
        }
    }
}
