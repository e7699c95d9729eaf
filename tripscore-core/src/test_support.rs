//! Test-only builders and scripted collaborators used by unit and behaviour
//! tests across the workspace.

use std::collections::HashMap;

use chrono::{DateTime, TimeDelta, Utc};

use crate::{
    MediaLookup, MediaLookupError, MediaRef, PlaceMediaRequest, TrustLevel, UserId,
    VerificationStatus, Visit, VisitQuery, VisitSource, VisitStore, VisitStoreError,
};

/// 2024-01-01T00:00:00Z; day offsets passed to [`VisitBuilder::day`] count
/// from here.
pub const BASE_EPOCH_SECONDS: i64 = 1_704_067_200;

/// Timestamp `days` after [`BASE_EPOCH_SECONDS`].
#[must_use]
pub fn day(days: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(BASE_EPOCH_SECONDS, 0).unwrap_or_default() + TimeDelta::days(days)
}

/// Fluent builder for [`Visit`] values.
///
/// Defaults describe a scoring-eligible visit with no coordinates, no
/// location strings, captured live on day zero.
#[derive(Debug, Clone)]
pub struct VisitBuilder {
    visit: Visit,
}

impl VisitBuilder {
    /// Start a visit with the given id and owner.
    ///
    /// # Panics
    /// Panics when `user` is not a valid [`UserId`].
    #[must_use]
    #[expect(
        clippy::expect_used,
        reason = "builders are fed literal user ids in tests"
    )]
    pub fn new(id: &str, user: &str) -> Self {
        let user_id = UserId::parse(user).expect("test user id must be valid");
        Self {
            visit: Visit {
                id: id.to_owned(),
                user_id,
                post_id: None,
                lat: None,
                lng: None,
                address: String::new(),
                raw_country: String::new(),
                raw_continent: String::new(),
                source: VisitSource::CameraLive,
                trust_level: TrustLevel::High,
                verification_status: VerificationStatus::AutoVerified,
                taken_at: Some(day(0)),
                uploaded_at: day(0),
                is_active: true,
                category_tags: Vec::new(),
            },
        }
    }

    /// Set latitude and longitude.
    #[must_use]
    pub fn at(mut self, lat: f64, lng: f64) -> Self {
        self.visit.lat = Some(lat);
        self.visit.lng = Some(lng);
        self
    }

    /// Set the raw country string.
    #[must_use]
    pub fn country(mut self, country: &str) -> Self {
        country.clone_into(&mut self.visit.raw_country);
        self
    }

    /// Set the raw continent string.
    #[must_use]
    pub fn continent(mut self, continent: &str) -> Self {
        continent.clone_into(&mut self.visit.raw_continent);
        self
    }

    /// Set the address.
    #[must_use]
    pub fn address(mut self, address: &str) -> Self {
        address.clone_into(&mut self.visit.address);
        self
    }

    /// Set the capture source.
    #[must_use]
    pub fn source(mut self, source: VisitSource) -> Self {
        self.visit.source = source;
        self
    }

    /// Set the trust level.
    #[must_use]
    pub fn trust(mut self, trust: TrustLevel) -> Self {
        self.visit.trust_level = trust;
        self
    }

    /// Set the verification status.
    #[must_use]
    pub fn status(mut self, status: VerificationStatus) -> Self {
        self.visit.verification_status = status;
        self
    }

    /// Set whether the visit is active.
    #[must_use]
    pub fn active(mut self, active: bool) -> Self {
        self.visit.is_active = active;
        self
    }

    /// Capture and upload the visit `days` after the base date.
    #[must_use]
    pub fn day(mut self, days: i64) -> Self {
        self.visit.taken_at = Some(day(days));
        self.visit.uploaded_at = day(days) + TimeDelta::hours(1);
        self
    }

    /// Drop the capture time so ordering falls back to the upload time.
    #[must_use]
    pub fn uploaded_only(mut self, days: i64) -> Self {
        self.visit.taken_at = None;
        self.visit.uploaded_at = day(days);
        self
    }

    /// Attach a post id.
    #[must_use]
    pub fn post(mut self, post_id: &str) -> Self {
        self.visit.post_id = Some(post_id.to_owned());
        self
    }

    /// Attach category tags.
    #[must_use]
    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.visit.category_tags = tags.iter().map(|&tag| tag.to_owned()).collect();
        self
    }

    /// Finish the visit.
    #[must_use]
    pub fn build(self) -> Visit {
        self.visit
    }
}

/// `VisitStore` whose reads always fail.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingVisitStore;

impl VisitStore for FailingVisitStore {
    fn fetch_visits(&self, _query: &VisitQuery) -> Result<Vec<Visit>, VisitStoreError> {
        Err(VisitStoreError::Unavailable {
            message: "scripted outage".to_owned(),
        })
    }
}

/// `MediaLookup` answering from a fixed map keyed by visit id.
///
/// Visit ids listed in `failing` produce errors.
#[derive(Debug, Default, Clone)]
pub struct ScriptedMediaLookup {
    urls: HashMap<String, String>,
    failing: Vec<String>,
}

impl ScriptedMediaLookup {
    /// Serve `url` for the place represented by `visit_id`.
    #[must_use]
    pub fn with_url(mut self, visit_id: &str, url: &str) -> Self {
        self.urls.insert(visit_id.to_owned(), url.to_owned());
        self
    }

    /// Fail lookups for the place represented by `visit_id`.
    #[must_use]
    pub fn failing_for(mut self, visit_id: &str) -> Self {
        self.failing.push(visit_id.to_owned());
        self
    }
}

impl MediaLookup for ScriptedMediaLookup {
    fn representative_media(
        &self,
        request: &PlaceMediaRequest,
    ) -> Result<Option<MediaRef>, MediaLookupError> {
        if self.failing.contains(&request.visit_id) {
            return Err(MediaLookupError::Unavailable {
                message: format!("scripted failure for {}", request.visit_id),
            });
        }
        Ok(self
            .urls
            .get(&request.visit_id)
            .map(|url| MediaRef { url: url.clone() }))
    }
}
