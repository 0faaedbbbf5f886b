//! Token stacks: independently expiring values folded into one aggregate.
//!
//! A [`TokenManager`] owns every live token; callers keep only the
//! [`TokenHandle`] returned when the token was added. The aggregate is never
//! cached, so an add or remove is visible to the very next [`TokenManager::value`].

pub mod combine;
pub mod duration;
pub mod manager;

pub use combine::{AllTrue, AnyTrue, Combine, CombineKind, FoldWith, Highest, Lowest, Product, Sum};
pub use duration::TokenDuration;
pub use manager::{TokenExpired, TokenHandle, TokenManager, TokenView};
