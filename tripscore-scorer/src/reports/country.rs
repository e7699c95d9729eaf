//! Places within one country.

use log::warn;
use serde::Serialize;
use tripscore_core::{MediaLookup, PlaceMediaRequest, round_km};

use super::{Coordinates, report_date};
use crate::{ScoreSnapshot, UniquePlace};

/// One visited place.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceDetail {
    /// Address of the place, or its country when no address is known.
    pub name: String,
    /// Always 1: a place counts once however often it was visited.
    pub score: usize,
    /// First visit, RFC 3339.
    pub date: String,
    /// Representative coordinate.
    pub coordinates: Coordinates,
    /// Categories attached to the place's visits.
    pub category_tags: Vec<String>,
    /// Representative image, when the media lookup produced one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// `{ country, countryScore, countryDistanceKm, places: [...] }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryDetails {
    /// Canonical country name.
    pub country: String,
    /// Unique places in the country.
    pub country_score: usize,
    /// Cumulative distance between the places, whole kilometres.
    pub country_distance_km: u64,
    /// Places, newest first.
    pub places: Vec<PlaceDetail>,
}

/// Shape a country-scoped snapshot into its place list.
///
/// `media` is consulted once per place. A failed lookup is logged and the
/// image omitted; it never fails the report.
#[must_use]
pub fn country_details<M: MediaLookup>(
    snapshot: &ScoreSnapshot,
    country: &str,
    media: &M,
) -> CountryDetails {
    let places = snapshot
        .places()
        .iter()
        .rev()
        .map(|place| PlaceDetail {
            name: place.name().to_owned(),
            score: 1,
            date: report_date(place.first_visited_at),
            coordinates: place.coordinate.into(),
            category_tags: place.category_tags.clone(),
            image_url: image_for(place, media),
        })
        .collect();

    CountryDetails {
        country: country.to_owned(),
        country_score: snapshot.total_score(),
        country_distance_km: round_km(snapshot.distance_km()),
        places,
    }
}

fn image_for<M: MediaLookup>(place: &UniquePlace, media: &M) -> Option<String> {
    let request = PlaceMediaRequest {
        user_id: place.owner.clone(),
        visit_id: place.first_visit_id.clone(),
        post_id: place.first_post_id.clone(),
        cluster_key: place.key,
    };
    match media.representative_media(&request) {
        Ok(found) => found.map(|media_ref| media_ref.url),
        Err(err) => {
            warn!("representative media lookup failed for place {}: {err}", place.key);
            None
        }
    }
}
