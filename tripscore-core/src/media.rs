//! Best-effort lookup of a representative image for a place.
//!
//! Media enriches reports only. A failed lookup removes the image from the
//! response; it never fails the request.

use std::error::Error as StdError;

use serde::Serialize;
use thiserror::Error;

use crate::{ClusterKey, UserId};

/// Identifies the place a representative image is wanted for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceMediaRequest {
    /// Owner of the visits.
    pub user_id: UserId,
    /// Visit that represents the place.
    pub visit_id: String,
    /// Post attached to the representative visit, if any.
    pub post_id: Option<String>,
    /// Cluster the place was deduplicated into.
    pub cluster_key: ClusterKey,
}

/// Reference to a displayable image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaRef {
    /// Signed or public URL of the image.
    pub url: String,
}

/// Errors raised by a [`MediaLookup`].
#[derive(Debug, Error)]
pub enum MediaLookupError {
    /// The media collaborator could not be reached.
    #[error("media lookup unavailable: {message}")]
    Unavailable {
        /// Description of the outage.
        message: String,
    },
    /// The media collaborator failed.
    #[error("media lookup failed")]
    Backend {
        /// Underlying error.
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

/// Resolve a representative image for a place.
pub trait MediaLookup: Send + Sync {
    /// Return an image for `request`, `Ok(None)` when the place has none.
    ///
    /// # Errors
    /// Returns [`MediaLookupError`] when the collaborator fails; callers
    /// degrade to omitting the image.
    fn representative_media(
        &self,
        request: &PlaceMediaRequest,
    ) -> Result<Option<MediaRef>, MediaLookupError>;
}

impl<M: MediaLookup + ?Sized> MediaLookup for &M {
    fn representative_media(
        &self,
        request: &PlaceMediaRequest,
    ) -> Result<Option<MediaRef>, MediaLookupError> {
        (**self).representative_media(request)
    }
}

/// `MediaLookup` that never has an image.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoMediaLookup;

impl MediaLookup for NoMediaLookup {
    fn representative_media(
        &self,
        _request: &PlaceMediaRequest,
    ) -> Result<Option<MediaRef>, MediaLookupError> {
        Ok(None)
    }
}
