//! Representative request/response shapes for the API.
//!
//! Each shape comes in two layers: a serde struct for typed access, and a
//! checker that verifies a raw [`serde_json::Value`] before it is trusted to
//! deserialise. Nested objects are validated by delegating to the nested
//! checker, so a broken user object inside an illust fails the illust's
//! `user` label rather than aborting the whole check.

pub mod common;
pub mod endpoints;
pub mod error_response;
pub mod illust;

pub use common::{
  ImageUrls, ImageUrlsCheck, PrivacyPolicy, PrivacyPolicyCheck, ProfileImageUrls,
  Series, SeriesCheck, Tag, TagCheck, User, UserCheck, UserItem, UserItemCheck,
};
pub use error_response::{ApiError, ApiErrorCheck};
pub use illust::{Illust, IllustCheck};
