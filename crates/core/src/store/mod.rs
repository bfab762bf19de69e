//! Collaborator contracts implemented by the persistence crates.

mod store_traits;

pub use store_traits::*;

#[cfg(test)]
pub(crate) mod fakes;
