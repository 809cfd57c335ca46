//! Common, shared types.

pub mod layers;
pub mod state;
pub mod timer;
pub mod tunables;

#[cfg(test)]
pub mod test_utils;
