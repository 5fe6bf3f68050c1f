use autowire::{prelude::*, scene::Scene};

#[derive(Default)]
pub struct Wheel;

#[derive(Default, Inject)]
#[inject(generate_initializers, test_helpers)]
pub struct Vehicle<T: Default + 'static>
where
    T: Clone,
{
    #[inject(get_in_children, add)]
    wheels: Box<[Ref<Wheel>]>,

    #[inject(get, inject_in_runtime)]
    payload: Option<Ref<T>>,
}

fn main() {
    let mut scene = Scene::new();
    let this = scene.spawn("Truck");
    let mut truck = autowire::create::<Vehicle<u8>, _>(&mut scene, this);

    truck.initialize_in_editor(&mut scene, this);
    truck.on_validate(&mut scene, this);
    let _ = truck.wheels().len();
    truck.set_payload(None);
}
