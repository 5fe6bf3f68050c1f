fn main() -> Result<(), Box<dyn std::error::Error>> {
    autowire_build::build!("src/wired.rs");

    Ok(())
}
