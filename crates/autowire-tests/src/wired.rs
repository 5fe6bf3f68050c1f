//! Structs wired by the build script rather than the derive.

use crate::components::{Hinge, Label};
use autowire::{Entity, Ref, Wired};

///
/// Door
///

#[derive(Debug, Default, Wired)]
#[inject(generate_awake)]
pub struct Door {
    #[inject(get, add, inject_in_runtime)]
    pub hinge: Option<Ref<Hinge>>,

    #[inject(find = "Key", stable_sort)]
    pub key: Option<Entity>,

    pub open: bool,
}

autowire::include_wired!("wired_door_wired.rs");

pub mod ui {
    use super::*;

    ///
    /// Hud
    ///

    #[derive(Debug, Default, Wired)]
    pub struct Hud {
        #[inject(get_in_children, ignore_self, include_inactive)]
        pub labels: Vec<Ref<Label>>,
    }

    autowire::include_wired!("wired_ui_hud_wired.rs");
}
