mod macros;

use autowire_codegen::{
    CratePaths, GeneratedUnit,
    pass::file_module_path,
    render::TokenRenderer,
    sink::{DirSink, UnitSink},
    trace::{TraceEvent, TraceSink},
};
use std::{
    env,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;

///
/// BuildError
///

#[derive(Debug, ThisError)]
pub enum BuildError {
    #[error("environment variable {0} is not set")]
    MissingEnv(&'static str),

    #[error(transparent)]
    Codegen(#[from] autowire_codegen::Error),
}

///
/// Config
///
/// Which source files to scan and where generated units go. Sources are
/// relative to `root`; their path below it decides the module path that
/// prefixes each unit name.
///

#[derive(Clone, Debug)]
pub struct Config {
    pub root: PathBuf,
    pub sources: Vec<PathBuf>,
    pub out_dir: PathBuf,
}

impl Config {
    #[must_use]
    pub fn new(
        root: impl Into<PathBuf>,
        sources: impl IntoIterator<Item = impl Into<PathBuf>>,
        out_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            root: root.into(),
            sources: sources.into_iter().map(Into::into).collect(),
            out_dir: out_dir.into(),
        }
    }

    /// Cargo build-script configuration: sources are relative to the
    /// package root, units land in `OUT_DIR`.
    pub fn from_env(
        sources: impl IntoIterator<Item = impl Into<PathBuf>>,
    ) -> Result<Self, BuildError> {
        let root = env::var_os("CARGO_MANIFEST_DIR")
            .map(PathBuf::from)
            .ok_or(BuildError::MissingEnv("CARGO_MANIFEST_DIR"))?;
        let out_dir = env::var_os("OUT_DIR")
            .map(PathBuf::from)
            .ok_or(BuildError::MissingEnv("OUT_DIR"))?;

        Ok(Self::new(root, sources, out_dir))
    }

    // module_path
    fn module_path(&self, source: &Path) -> Vec<String> {
        file_module_path(source.strip_prefix(&self.root).unwrap_or(source))
    }
}

///
/// CargoWarningSink
///
/// Surfaces skipped classes and members as `cargo:warning` lines.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct CargoWarningSink;

impl CargoWarningSink {
    #[must_use]
    pub fn message(event: &TraceEvent) -> Option<String> {
        match event {
            TraceEvent::ClassGenerated { .. } => None,
            TraceEvent::ClassSkipped { class, reason } => {
                Some(format!("autowire: skipped {class}: {reason}"))
            }
            TraceEvent::MemberSkipped {
                class,
                member,
                reason,
            } => Some(format!("autowire: skipped {class}::{member}: {reason}")),
        }
    }
}

impl TraceSink for CargoWarningSink {
    fn on_event(&self, event: TraceEvent) {
        if let Some(message) = Self::message(&event) {
            println!("cargo:warning={message}");
        }
    }
}

// generate
/// Run the generation pass over every configured source and write the units.
pub fn generate(config: &Config) -> Result<Vec<GeneratedUnit>, BuildError> {
    generate_with(config, &CargoWarningSink)
}

/// As [`generate`], reporting to a caller-supplied trace sink.
pub fn generate_with(
    config: &Config,
    trace: &dyn TraceSink,
) -> Result<Vec<GeneratedUnit>, BuildError> {
    let renderer = TokenRenderer::new(CratePaths::new());
    let mut sink = DirSink::new(&config.out_dir);
    let mut units = Vec::new();

    for source in &config.sources {
        let path = config.root.join(source);
        println!("cargo:rerun-if-changed={}", path.display());

        let module_path = config.module_path(source);
        for unit in autowire_codegen::generate_source(&path, &module_path, &renderer, trace)? {
            sink.write(&unit)?;
            units.push(unit);
        }
    }

    Ok(units)
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use autowire_codegen::{SkipReason, trace::RecordingSink};
    use std::fs;

    #[test]
    fn warnings_name_the_skipped_member() {
        let event = TraceEvent::MemberSkipped {
            class: "Door".to_string(),
            member: "key".to_string(),
            reason: SkipReason::UnsupportedCombination,
        };

        assert_eq!(
            CargoWarningSink::message(&event).as_deref(),
            Some("autowire: skipped Door::key: unsupported directive combination")
        );
        assert!(
            CargoWarningSink::message(&TraceEvent::ClassGenerated {
                class: "Door".to_string(),
                editor: 1,
                runtime: 0,
            })
            .is_none()
        );
    }

    // scratch
    // fresh package root with `src/` and an output directory
    fn scratch(name: &str) -> (PathBuf, PathBuf) {
        let root = env::temp_dir().join(format!("autowire-build-{name}-{}", std::process::id()));
        let out_dir = root.join("out");
        fs::create_dir_all(root.join("src")).unwrap();
        fs::create_dir_all(&out_dir).unwrap();

        (root, out_dir)
    }

    #[test]
    fn generate_writes_one_file_per_struct() {
        let (root, out_dir) = scratch("scene");
        fs::write(
            root.join("src/scene.rs"),
            r#"
            pub struct Camera {
                #[inject(find = "Main Camera")]
                main: Option<Entity>,
            }

            mod ui {
                pub struct Hud {
                    #[inject(get_in_children, inject_in_runtime)]
                    labels: Vec<Ref<Label>>,
                }
            }
            "#,
        )
        .unwrap();

        let config = Config::new(&root, ["src/scene.rs"], &out_dir);
        let trace = RecordingSink::default();
        let units = generate_with(&config, &trace).unwrap();

        assert_eq!(units.len(), 2);
        assert!(out_dir.join("scene_camera_wired.rs").exists());
        assert!(out_dir.join("scene_ui_hud_wired.rs").exists());
        assert_eq!(trace.take().len(), 2);

        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn same_struct_name_in_two_files_yields_two_units() {
        let (root, out_dir) = scratch("camera");
        fs::write(
            root.join("src/player.rs"),
            r#"
            pub struct Camera {
                #[inject(find = "PlayerRig")]
                rig: Option<Entity>,
            }
            "#,
        )
        .unwrap();
        fs::create_dir_all(root.join("src/enemy")).unwrap();
        fs::write(
            root.join("src/enemy/mod.rs"),
            r#"
            pub struct Camera {
                #[inject(find = "EnemyRig")]
                rig: Option<Entity>,
            }
            "#,
        )
        .unwrap();

        let config = Config::new(
            &root,
            [root.join("src/player.rs"), PathBuf::from("src/enemy/mod.rs")],
            &out_dir,
        );
        let units = generate_with(&config, &RecordingSink::default()).unwrap();

        let names: Vec<_> = units.iter().map(|unit| unit.name.as_str()).collect();
        assert_eq!(names, vec!["player_camera_wired.rs", "enemy_camera_wired.rs"]);

        let player = fs::read_to_string(out_dir.join("player_camera_wired.rs")).unwrap();
        let enemy = fs::read_to_string(out_dir.join("enemy_camera_wired.rs")).unwrap();
        assert!(player.contains("PlayerRig") && !player.contains("EnemyRig"));
        assert!(enemy.contains("EnemyRig") && !enemy.contains("PlayerRig"));

        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn unreadable_sources_fail_the_build() {
        let config = Config::new(env::temp_dir(), ["/definitely/not/here.rs"], env::temp_dir());
        let err = generate_with(&config, &RecordingSink::default()).unwrap_err();

        assert!(matches!(
            err,
            BuildError::Codegen(autowire_codegen::Error::Read { .. })
        ));
    }
}
