use crate::prelude::*;

///
/// Phased
///

#[derive(Default, Inject)]
#[inject(generate_initializers)]
struct Phased {
    #[inject(get)]
    editor_only: Option<Ref<Body>>,

    #[inject(get, inject_in_runtime)]
    runtime_only: Option<Ref<Health>>,

    #[inject(get, inject_in_editor, inject_in_runtime)]
    both: Option<Ref<Marker>>,
}

///
/// Palette
///

#[derive(Default, Inject)]
struct Palette {
    #[inject(get_in_assets = "Materials/")]
    first: Option<Ref<Material>>,

    #[inject(get_in_assets = "Materials/")]
    all: Vec<Ref<Material>>,

    // asset lookups never run at runtime, even when asked to
    #[inject(get_in_assets = "Materials/", inject_in_runtime)]
    pinned: Option<Ref<Material>>,
}

fn owner() -> (Scene, Entity) {
    let mut scene = Scene::new();
    let owner = scene.spawn("Owner");
    scene.insert(owner, Body).unwrap();
    scene.insert(owner, Health(10)).unwrap();
    scene.insert(owner, Marker).unwrap();

    (scene, owner)
}

///
/// TESTS
///

#[test]
fn editor_initializer_covers_editor_members() {
    let (mut scene, owner) = owner();
    let mut phased = Phased::default();

    phased.initialize_in_editor(&mut scene, owner);

    assert!(phased.editor_only.is_some());
    assert!(phased.runtime_only.is_none());
    assert!(phased.both.is_some());
}

#[test]
fn awake_runs_the_runtime_initializer() {
    let (mut scene, owner) = owner();

    let phased = create::<Phased, _>(&mut scene, owner);

    assert!(phased.editor_only.is_none());
    assert!(phased.runtime_only.is_some());
    assert!(phased.both.is_some());
}

#[test]
fn on_validate_runs_the_editor_initializer() {
    let (mut scene, owner) = owner();
    let mut phased = Phased::default();

    phased.on_validate(&mut scene, owner);

    assert!(phased.editor_only.is_some());
    assert!(phased.runtime_only.is_none());
}

#[test]
fn asset_lookups_stay_in_the_editor_phase() {
    let mut scene = Scene::new();
    let owner = scene.spawn("Owner");
    let stone = scene.add_asset("Materials/Stone");
    let wood = scene.add_asset("Materials/Wood");
    let sound = scene.add_asset("Sounds/Stone");
    let stone = scene.insert(stone, Material("stone")).unwrap();
    let wood = scene.insert(wood, Material("wood")).unwrap();
    scene.insert(sound, Material("echo")).unwrap();
    let mut palette = Palette::default();

    palette.initialize_in_editor(&mut scene, owner);

    assert_eq!(palette.first, Some(stone));
    assert_eq!(palette.all, vec![stone, wood]);
    assert_eq!(palette.pinned, Some(stone));
    assert_eq!(scene.len(), 1);
}
