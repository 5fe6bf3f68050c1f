// __editor_only
// wraps generated design-time items; they vanish when the `editor` feature is off
#[cfg(feature = "editor")]
#[doc(hidden)]
#[macro_export]
macro_rules! __editor_only {
    ($($item:item)*) => {
        $($item)*
    };
}

#[cfg(not(feature = "editor"))]
#[doc(hidden)]
#[macro_export]
macro_rules! __editor_only {
    ($($item:item)*) => {};
}

// include_wired
// pulls a unit written by `autowire_build::build!` into the current module
#[macro_export]
macro_rules! include_wired {
    ($name:literal) => {
        include!(concat!(env!("OUT_DIR"), "/", $name));
    };
}
