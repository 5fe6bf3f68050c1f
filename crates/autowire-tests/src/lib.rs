//! Fixtures exercising generated initializers against the in-memory
//! `autowire::scene::Scene` host.

pub mod components;
pub mod wired;

#[cfg(test)]
mod test;

///
/// Prelude
///

pub mod prelude {
    pub use crate::components::*;
    pub use autowire::{create, prelude::*, scene::Scene};
}
