//! Loader for the movement tuning RON file at startup.

use std::fs;
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use ron::Options;

use super::tuning::{InvalidTuning, MotionStats, MotionTuning};

/// Default location of the tuning file, relative to the working directory.
pub const TUNING_PATH: &str = "assets/data/movement.ron";

#[derive(Debug, thiserror::Error)]
pub enum TuningLoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("{path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: InvalidTuning,
    },
}

/// RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse and validate tuning from RON text. `label` names the source in errors.
pub fn tuning_from_str(label: &Path, contents: &str) -> Result<MotionTuning, TuningLoadError> {
    let stats: MotionStats =
        ron_options()
            .from_str(contents)
            .map_err(|source| TuningLoadError::Parse {
                path: label.to_path_buf(),
                source,
            })?;

    MotionTuning::new(stats).map_err(|source| TuningLoadError::Invalid {
        path: label.to_path_buf(),
        source,
    })
}

pub fn load_tuning(path: &Path) -> Result<MotionTuning, TuningLoadError> {
    let contents = fs::read_to_string(path).map_err(|source| TuningLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tuning_from_str(path, &contents)
}

/// Startup system: replace the default tuning with the file's, if it loads.
pub(crate) fn load_motion_tuning(mut tuning: ResMut<MotionTuning>) {
    match load_tuning(Path::new(TUNING_PATH)) {
        Ok(loaded) => {
            info!(
                "Loaded movement tuning from {}: jump height={}, jumps={}, dashes={}",
                TUNING_PATH,
                loaded.jump_height,
                loaded.number_of_jumps_allowed,
                loaded.number_of_dashes
            );
            *tuning = loaded;
        }
        Err(e) => {
            warn!("{}; keeping default movement tuning", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let ron = r#"(
            jump_height: 4.0,
            number_of_jumps_allowed: 3,
            wall_jump_direction: (-15.0, 5.0),
            probe: (head_width: 0.5),
        )"#;

        let tuning = tuning_from_str(Path::new("inline"), ron).expect("valid partial tuning");

        assert_eq!(tuning.jump_height, 4.0);
        assert_eq!(tuning.number_of_jumps_allowed, 3);
        assert_eq!(tuning.wall_jump_direction(), Vec2::new(-15.0, 5.0));
        assert_eq!(tuning.probe.head_width, 0.5);
        assert_eq!(tuning.probe.feet_width, 0.9);
        assert_eq!(tuning.dash_speed, MotionStats::default().dash_speed);
    }

    #[test]
    fn test_empty_struct_is_default() {
        let tuning = tuning_from_str(Path::new("inline"), "()").expect("empty tuning");
        assert_eq!(tuning.stats(), &MotionStats::default());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_tuning(Path::new("does/not/exist/movement.ron")).unwrap_err();
        assert!(matches!(err, TuningLoadError::Io { .. }));
    }

    #[test]
    fn test_syntax_error_is_parse_error() {
        let err = tuning_from_str(Path::new("inline"), "(jump_height: )").unwrap_err();
        assert!(matches!(err, TuningLoadError::Parse { .. }));
    }

    #[test]
    fn test_out_of_range_values_are_rejected() {
        let err = tuning_from_str(Path::new("inline"), "(dash_time: 0.0)").unwrap_err();
        match err {
            TuningLoadError::Invalid { source, .. } => {
                assert_eq!(source.0.len(), 1);
            }
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn test_shipped_tuning_file_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(TUNING_PATH);
        let tuning = load_tuning(&path).expect("shipped movement.ron is valid");
        assert!(tuning.number_of_jumps_allowed >= 1);
    }
}
