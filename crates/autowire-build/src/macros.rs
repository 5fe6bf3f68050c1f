//! Build-script entry point: wires every `#[inject]` struct in the listed
//! source files and writes one unit per struct into `OUT_DIR`.
//!
//! Include a unit next to its struct with `autowire::include_wired!`.
#[macro_export]
macro_rules! build {
    ($($source:expr),+ $(,)?) => {
        //
        // CARGO
        //

        println!("cargo:rerun-if-changed=build.rs");

        //
        // WIRED UNITS
        //

        let config = $crate::Config::from_env([$($source),+])?;
        $crate::generate(&config)?;
    };
}
