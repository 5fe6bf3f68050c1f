use autowire::prelude::*;

pub struct Body;

// every member is skipped, so no initializer is emitted
#[derive(Default, Inject)]
pub struct Inert {
    #[inject(get_in_children)]
    player: Option<Entity>,

    #[inject(get)]
    count: u32,

    #[inject(stable_sort)]
    sorted: Option<Ref<Body>>,

    #[inject(get_in_assets)]
    unfiltered: Option<Ref<Body>>,
}

fn main() {
    let _ = Inert::default();
}
