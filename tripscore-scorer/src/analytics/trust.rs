//! Trust and verification views.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tripscore_core::{
    TrustLevel, UserId, VerificationStatus, Visit, VisitSource, normalize_country,
};

use super::Tally;

/// Classification counts over active visits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustBreakdown {
    /// Active visits considered.
    pub total_visits: usize,
    /// Every trust level, zero counts included.
    pub by_trust_level: Vec<Tally<TrustLevel>>,
    /// Every verification status, zero counts included.
    pub by_verification_status: Vec<Tally<VerificationStatus>>,
    /// Every capture source, zero counts included.
    pub by_source: Vec<Tally<VisitSource>>,
}

/// Count active visits per classification.
#[must_use]
pub fn trust_breakdown(visits: &[Visit]) -> TrustBreakdown {
    let active: Vec<&Visit> = visits.iter().filter(|v| v.is_active).collect();
    TrustBreakdown {
        total_visits: active.len(),
        by_trust_level: tally(&active, TrustLevel::ALL, |v| v.trust_level),
        by_verification_status: tally(&active, VerificationStatus::ALL, |v| {
            v.verification_status
        }),
        by_source: tally(&active, VisitSource::ALL, |v| v.source),
    }
}

fn tally<K, F>(visits: &[&Visit], values: impl IntoIterator<Item = K>, classify: F) -> Vec<Tally<K>>
where
    K: PartialEq + Copy,
    F: Fn(&Visit) -> K,
{
    values
        .into_iter()
        .map(|value| Tally {
            value,
            count: visits.iter().filter(|&&v| classify(v) == value).count(),
        })
        .collect()
}

/// An active visit flagged for review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuspiciousVisit {
    /// Visit identifier.
    pub visit_id: String,
    /// Owner.
    pub user_id: UserId,
    /// Attached post, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_id: Option<String>,
    /// Capture source.
    pub source: VisitSource,
    /// Current verification outcome.
    pub verification_status: VerificationStatus,
    /// Whether the visit currently scores.
    pub scoring: bool,
    /// Canonical country.
    pub country: String,
    /// Free-form address.
    pub address: String,
    /// Upload time.
    pub uploaded_at: DateTime<Utc>,
}

/// List active visits with suspicious trust, newest upload first.
#[must_use]
pub fn suspicious_visits(visits: &[Visit], limit: usize) -> Vec<SuspiciousVisit> {
    let mut flagged: Vec<&Visit> = visits
        .iter()
        .filter(|v| v.is_active && v.trust_level == TrustLevel::Suspicious)
        .collect();
    flagged.sort_by(|a, b| {
        b.uploaded_at
            .cmp(&a.uploaded_at)
            .then_with(|| a.id.cmp(&b.id))
    });
    flagged
        .into_iter()
        .take(limit)
        .map(|visit| SuspiciousVisit {
            visit_id: visit.id.clone(),
            user_id: visit.user_id.clone(),
            post_id: visit.post_id.clone(),
            source: visit.source,
            verification_status: visit.verification_status,
            scoring: visit.is_scoring_eligible(),
            country: normalize_country(&visit.raw_country),
            address: visit.address.clone(),
            uploaded_at: visit.uploaded_at,
        })
        .collect()
}

/// Width of a timeline bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeBucket {
    /// Calendar day.
    #[default]
    Day,
    /// ISO week starting on Monday.
    Week,
    /// Calendar month.
    Month,
}

impl TimeBucket {
    /// First day of the bucket containing `date`.
    #[must_use]
    pub fn start_of(self, date: NaiveDate) -> NaiveDate {
        match self {
            Self::Day => date,
            Self::Week => {
                let offset = u64::from(date.weekday().num_days_from_monday());
                date.checked_sub_days(Days::new(offset)).unwrap_or(date)
            }
            Self::Month => date.with_day(1).unwrap_or(date),
        }
    }
}

/// Trust counts for one bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineBucket {
    /// First day of the bucket.
    pub start: NaiveDate,
    /// Active visits uploaded in the bucket.
    pub total: usize,
    /// Every trust level, zero counts included.
    pub by_trust_level: Vec<Tally<TrustLevel>>,
}

/// Bucket active visits by upload date, oldest bucket first.
///
/// Only buckets containing at least one visit are returned.
#[must_use]
pub fn trust_timeline(visits: &[Visit], bucket: TimeBucket) -> Vec<TimelineBucket> {
    let mut buckets: BTreeMap<NaiveDate, Vec<&Visit>> = BTreeMap::new();
    for visit in visits.iter().filter(|v| v.is_active) {
        buckets
            .entry(bucket.start_of(visit.uploaded_at.date_naive()))
            .or_default()
            .push(visit);
    }
    buckets
        .into_iter()
        .map(|(start, members)| TimelineBucket {
            start,
            total: members.len(),
            by_trust_level: tally(&members, TrustLevel::ALL, |v| v.trust_level),
        })
        .collect()
}
