///
/// Body
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Body;

///
/// Collider
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Collider(pub u8);

///
/// Health
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Health(pub u32);

///
/// Hinge
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Hinge {
    pub angle: i16,
}

///
/// Label
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Label(pub &'static str);

///
/// Light
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Light(pub u8);

///
/// Marker
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Marker;

///
/// Material
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Material(pub &'static str);
