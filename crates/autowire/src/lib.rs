//! Compile-time member wiring for component-based object graphs.
//!
//! Annotate struct fields with `#[inject(..)]` locator directives and derive
//! [`Inject`]; the derive emits `initialize_in_editor` / `initialize_in_runtime`
//! methods that resolve each field against a [`Host`].
//!
//! ```ignore
//! use autowire::{Entity, Inject, Ref};
//!
//! #[derive(Default, Inject)]
//! #[inject(generate_awake)]
//! pub struct Turret {
//!     #[inject(get, add)]
//!     body: Option<Ref<RigidBody>>,
//!
//!     #[inject(find = "Player", inject_in_runtime)]
//!     target: Option<Entity>,
//! }
//! ```
//!
//! Structs can instead be wired from a build script: mark them
//! `#[derive(Wired)]`, list their files in `autowire_build::build!`, and
//! place `autowire::include_wired!("<unit>.rs")` next to each struct.

pub mod entity;
pub mod host;
pub mod lifecycle;
pub mod scene;

mod macros;

pub use autowire_derive::{Inject, Wired};
pub use entity::{Entity, Ref};
pub use host::{FindInactive, Host, SortMode};
pub use lifecycle::{Awake, OnValidate, create};

/// Whether design-time initializers are compiled into this build.
pub const EDITOR: bool = cfg!(feature = "editor");

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        Inject, Wired,
        entity::{Entity, Ref},
        host::{FindInactive, Host, SortMode},
        lifecycle::{Awake, OnValidate},
    };
}
