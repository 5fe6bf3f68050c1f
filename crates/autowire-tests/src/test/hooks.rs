use crate::prelude::*;

///
/// Inspected
///

#[derive(Default, Inject)]
#[inject(test_helpers, generate_awake)]
pub struct Inspected {
    #[inject(get, add)]
    body: Option<Ref<Body>>,

    #[inject(get_in_children)]
    lights: Vec<Ref<Light>>,
}

///
/// Idle
///
/// Hooks with nothing to run still exist.
///

#[derive(Default, Inject)]
#[inject(generate_awake, generate_on_validate)]
struct Idle {
    count: u32,
}

///
/// TESTS
///

#[test]
fn test_helpers_expose_wired_members() {
    let mut scene = Scene::new();
    let owner = scene.spawn("Owner");
    let child = scene.spawn_child(owner, "Bulb").unwrap();
    let light = scene.insert(child, Light(3)).unwrap();
    let mut inspected = Inspected::default();

    inspected.initialize_in_editor(&mut scene, owner);

    assert!(inspected.body().is_some());
    assert_eq!(inspected.lights(), &vec![light]);

    inspected.set_lights(Vec::new());
    inspected.set_body(None);
    assert!(inspected.lights().is_empty());
    assert!(inspected.body().is_none());
}

#[test]
fn awake_with_an_empty_runtime_phase_is_a_no_op() {
    let mut scene = Scene::new();
    let owner = scene.spawn("Owner");

    let inspected = create::<Inspected, _>(&mut scene, owner);
    assert!(inspected.body().is_none());

    let mut idle = create::<Idle, _>(&mut scene, owner);
    idle.on_validate(&mut scene, owner);
    assert_eq!(idle.count, 0);
    assert!(scene.component::<Body>(owner).is_none());
}
