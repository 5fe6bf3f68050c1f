use autowire::prelude::*;

#[derive(Inject)]
#[inject(generate_awake)]
pub enum Mode {
    On,
    Off,
}

#[derive(Inject)]
pub union Bits {
    int: u32,
    float: f32,
}

fn main() {
    let _ = Mode::On;
    let _ = Mode::Off;
    let _ = Bits { int: 1 };
}
