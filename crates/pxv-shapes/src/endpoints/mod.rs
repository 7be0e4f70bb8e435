//! Dual-shape checkers for individual endpoints.

pub mod illust_detail;
pub mod user_detail;

pub use illust_detail::{IllustDetailCheck, IllustDetailRequest, IllustDetailResponse};
pub use user_detail::{Filter, UserDetailCheck, UserDetailRequest, UserDetailResponse};
