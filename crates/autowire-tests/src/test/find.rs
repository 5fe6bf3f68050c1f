use crate::prelude::*;

const TARGET_NAME: &str = "Target";

///
/// Seeker
///

#[derive(Default, Inject)]
struct Seeker {
    #[inject(find = "Target")]
    any: Option<Entity>,

    #[inject(find = "Target", stable_sort)]
    oldest: Option<Entity>,

    #[inject(find = TARGET_NAME, ignore_self)]
    other: Option<Entity>,

    #[inject(find = "Target")]
    active: Vec<Entity>,

    #[inject(find = "Target", include_inactive)]
    all: Vec<Entity>,
}

///
/// Switchboard
///

#[derive(Default, Inject)]
struct Switchboard {
    #[inject(get_by_name = "Lamp")]
    lamp: Option<Ref<Light>>,

    #[inject(find = "Lamp", get)]
    lamps: Box<[Ref<Light>]>,

    #[inject(find = "Lamp", get, ignore_self)]
    other_lamp: Option<Ref<Light>>,

    #[inject(get_by_name = "Lamp", ignore_self)]
    other_lamps: Vec<Ref<Light>>,
}

///
/// TESTS
///

#[test]
fn unordered_scans_follow_the_hierarchy() {
    let mut scene = Scene::new();
    let child = scene.spawn("Target");
    let parent = scene.spawn("Target");
    scene.set_parent(child, Some(parent)).unwrap();
    let mut seeker = Seeker::default();

    seeker.initialize_in_editor(&mut scene, parent);

    assert_eq!(seeker.any, Some(parent));
    assert_eq!(seeker.oldest, Some(child));
    assert_eq!(seeker.other, Some(child));
}

#[test]
fn include_inactive_widens_the_scan() {
    let mut scene = Scene::new();
    let owner = scene.spawn("Owner");
    scene.spawn("Target");
    let hidden = scene.spawn("Target");
    scene.spawn("Decoy");
    scene.set_active(hidden, false).unwrap();
    let mut seeker = Seeker::default();

    seeker.initialize_in_editor(&mut scene, owner);

    assert_eq!(seeker.active.len(), 1);
    assert_eq!(seeker.all.len(), 2);
    assert!(seeker.all.contains(&hidden));
}

#[test]
fn no_match_leaves_members_unset() {
    let mut scene = Scene::new();
    let owner = scene.spawn("Owner");
    let mut seeker = Seeker::default();

    seeker.initialize_in_editor(&mut scene, owner);

    assert!(seeker.any.is_none());
    assert!(seeker.all.is_empty());
}

#[test]
fn named_roots_yield_their_components() {
    let mut scene = Scene::new();
    let owner = scene.spawn("Owner");
    let dark = scene.spawn("Lamp");
    let lit = scene.spawn("Lamp");
    let bulb = scene.insert(lit, Light(1)).unwrap();
    let spare = scene.insert(lit, Light(2)).unwrap();
    let mut board = Switchboard::default();

    board.initialize_in_editor(&mut scene, owner);

    assert!(scene.component::<Light>(dark).is_none());
    assert_eq!(board.lamp, Some(bulb));
    assert_eq!(&*board.lamps, &[bulb, spare]);
}

#[test]
fn ignore_self_skips_the_owner_among_named_roots() {
    let mut scene = Scene::new();
    let owner = scene.spawn("Lamp");
    let own = scene.insert(owner, Light(0)).unwrap();
    let other = scene.spawn("Lamp");
    let bulb = scene.insert(other, Light(1)).unwrap();
    let spare = scene.insert(other, Light(2)).unwrap();
    let mut board = Switchboard::default();

    board.initialize_in_editor(&mut scene, owner);

    assert_eq!(board.lamp, Some(own));
    assert_eq!(board.lamps.len(), 3);
    assert_eq!(board.other_lamp, Some(bulb));
    assert_eq!(board.other_lamps, vec![bulb, spare]);
}
