//! Geotagged visit records and their classification.
//!
//! Visits are owned by the ingestion pipeline. The engine reads them, gates
//! them on [`Visit::is_scoring_eligible`], and never mutates them.

use std::fmt;

use chrono::{DateTime, Utc};
use geo::Coord;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest accepted user identifier, in bytes.
const MAX_USER_ID_LEN: usize = 128;

/// How the media behind a visit was captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitSource {
    /// Captured in-app with a live location fix.
    CameraLive,
    /// Picked from the gallery with EXIF coordinates.
    GalleryExif,
    /// Picked from the gallery without EXIF coordinates.
    GalleryNoExif,
    /// Location entered by hand.
    ManualOnly,
}

impl VisitSource {
    /// Every source in declaration order.
    pub const ALL: [Self; 4] = [
        Self::CameraLive,
        Self::GalleryExif,
        Self::GalleryNoExif,
        Self::ManualOnly,
    ];
}

/// Quality or suspicion signal attached by the ingestion pipeline.
///
/// Trust is reported on but never gates scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrustLevel {
    /// Strong evidence the visit happened where it claims.
    High,
    /// Some corroborating evidence.
    Medium,
    /// Weak evidence.
    Low,
    /// No evidence either way.
    Unverified,
    /// Flagged for review.
    Suspicious,
}

impl TrustLevel {
    /// Every trust level in declaration order.
    pub const ALL: [Self; 5] = [
        Self::High,
        Self::Medium,
        Self::Low,
        Self::Unverified,
        Self::Suspicious,
    ];
}

/// Verification outcome; the only classification that gates scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    /// Awaiting review.
    Pending,
    /// Accepted automatically by the ingestion pipeline.
    AutoVerified,
    /// Accepted by a reviewer.
    Approved,
    /// Refused by a reviewer.
    Rejected,
}

impl VerificationStatus {
    /// Every status in declaration order.
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::AutoVerified,
        Self::Approved,
        Self::Rejected,
    ];

    /// Report whether visits with this status count towards a score.
    #[must_use]
    pub const fn is_scoring(self) -> bool {
        matches!(self, Self::AutoVerified | Self::Approved)
    }
}

/// A validated user identifier.
///
/// # Examples
/// ```
/// use tripscore_core::UserId;
///
/// let user = UserId::parse(" user-42 ").expect("valid id");
/// assert_eq!(user.as_str(), "user-42");
/// assert!(UserId::parse("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

/// Errors returned by [`UserId::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserIdError {
    /// The identifier was empty or whitespace.
    #[error("user id must not be empty")]
    Empty,
    /// The identifier exceeded the maximum length.
    #[error("user id is {len} bytes long; the maximum is {max}")]
    TooLong {
        /// Length of the rejected identifier.
        len: usize,
        /// Maximum accepted length.
        max: usize,
    },
    /// The identifier contained a character outside the accepted set.
    #[error("user id contains invalid character {found:?}")]
    InvalidCharacter {
        /// First offending character.
        found: char,
    },
}

impl UserId {
    /// Validate and construct a [`UserId`].
    ///
    /// Surrounding whitespace is trimmed. Accepted characters are ASCII
    /// alphanumerics plus `-`, `_`, `.` and `:`.
    ///
    /// # Errors
    /// Returns [`UserIdError`] when the identifier is empty, too long, or
    /// contains other characters.
    pub fn parse(raw: &str) -> Result<Self, UserIdError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(UserIdError::Empty);
        }
        if trimmed.len() > MAX_USER_ID_LEN {
            return Err(UserIdError::TooLong {
                len: trimmed.len(),
                max: MAX_USER_ID_LEN,
            });
        }
        if let Some(found) = trimmed
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':')))
        {
            return Err(UserIdError::InvalidCharacter { found });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for UserId {
    type Error = UserIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

/// A single geotagged photo or short video.
///
/// Coordinates are WGS84 degrees. Country and continent strings arrive as
/// the ingestion pipeline attached them and may be inconsistently named; the
/// engine normalises them with [`crate::region`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    /// Unique identifier.
    pub id: String,
    /// Owning user.
    pub user_id: UserId,
    /// Post the media was published with, if any.
    #[serde(default)]
    pub post_id: Option<String>,
    /// Latitude in degrees.
    #[serde(default)]
    pub lat: Option<f64>,
    /// Longitude in degrees.
    #[serde(default)]
    pub lng: Option<f64>,
    /// Free-form address.
    #[serde(default)]
    pub address: String,
    /// Country as attached upstream.
    #[serde(default, rename = "country")]
    pub raw_country: String,
    /// Continent as attached upstream.
    #[serde(default, rename = "continent")]
    pub raw_continent: String,
    /// Capture source.
    pub source: VisitSource,
    /// Ingestion trust signal.
    pub trust_level: TrustLevel,
    /// Verification outcome.
    pub verification_status: VerificationStatus,
    /// Capture time, when known.
    #[serde(default)]
    pub taken_at: Option<DateTime<Utc>>,
    /// Upload time.
    pub uploaded_at: DateTime<Utc>,
    /// Whether the visit is still live.
    pub is_active: bool,
    /// Place categories attached to the media (for example `"beach"`).
    #[serde(default)]
    pub category_tags: Vec<String>,
}

impl Visit {
    /// Report whether the visit contributes to any score.
    ///
    /// A visit scores if and only if it is active and its verification
    /// status is `auto_verified` or `approved`. Trust level is ignored.
    #[must_use]
    pub const fn is_scoring_eligible(&self) -> bool {
        self.is_active && self.verification_status.is_scoring()
    }

    /// Return the visit position as `x = longitude`, `y = latitude`.
    ///
    /// Missing, zero, non-finite, or out-of-range values on either axis
    /// yield `None`; such visits are never clustered or counted.
    #[must_use]
    pub fn coordinate(&self) -> Option<Coord<f64>> {
        let lat = self.lat.filter(|v| is_usable_axis(*v, 90.0))?;
        let lng = self.lng.filter(|v| is_usable_axis(*v, 180.0))?;
        Some(Coord { x: lng, y: lat })
    }

    /// Time used to order visits: capture time, else upload time.
    #[must_use]
    pub fn visited_at(&self) -> DateTime<Utc> {
        self.taken_at.unwrap_or(self.uploaded_at)
    }
}

fn is_usable_axis(value: f64, bound: f64) -> bool {
    value.is_finite() && value != 0.0 && value.abs() <= bound
}
