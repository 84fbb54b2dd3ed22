pub mod comment;
pub mod dashboard;
pub mod feed;
pub mod notification;
pub mod post;
pub mod profile;
pub mod user;

use derive_where::derive_where;
use std::{fmt::Display, marker::PhantomData};
use thiserror::Error;

/// Opaque entity identifier, branded with a marker type so post, comment,
/// user and notification ids cannot be mixed up.
///
/// The backing representation is whatever string the data source assigned
/// (`post-0`, `comment-srv-3`, ...); nothing may be read into its contents.
#[derive_where(
    Clone,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Debug,
    Default,
    Hash,
    Serialize,
    Deserialize
)]
#[serde(transparent)]
pub struct Id<Marker>(Box<str>, #[serde(skip)] PhantomData<Marker>);

impl<Marker> Id<Marker> {
    #[must_use]
    pub fn new(inner: impl Into<Box<str>>) -> Self {
        Self(inner.into(), PhantomData)
    }

    #[must_use]
    pub fn get(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> Box<str> {
        self.0
    }
}

impl<Marker> Display for Id<Marker> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl<Marker> From<String> for Id<Marker> {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl<Marker> From<&str> for Id<Marker> {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Submitted text was empty once surrounding whitespace is removed.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Error)]
#[error("The body is empty after trimming whitespace.")]
pub struct EmptyBodyError;
