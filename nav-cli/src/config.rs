use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr};
use nav_core::NavConfig;
use tracing::{debug, info};

/// `<config dir>/maze-nav/nav.toml`, if the platform has a config dir.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join("maze-nav").join("nav.toml"))
}

/// Load the config from `path`, or from the default location when it
/// exists, or fall back to the built-in defaults.
pub fn load(path: Option<&Path>) -> Result<NavConfig> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match default_path().filter(|path| path.is_file()) {
            Some(path) => path,
            None => {
                debug!("no config file found, using built-in defaults");
                return Ok(NavConfig::default());
            }
        },
    };

    let text = std::fs::read_to_string(&path)
        .wrap_err_with(|| format!("failed to read {}", path.display()))?;
    let config = parse(&text).wrap_err_with(|| format!("invalid config {}", path.display()))?;
    info!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Parse and validate a TOML config. Missing tables and keys keep their
/// defaults.
pub fn parse(text: &str) -> Result<NavConfig> {
    let config: NavConfig = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use nav_core::{ConfigError, Scenario, Thresholds};

    use super::*;

    #[test]
    fn empty_file_is_the_default() {
        assert_eq!(parse("").unwrap(), NavConfig::default());
    }

    #[test]
    fn partial_tables_keep_defaults() {
        let config = parse(
            r#"
            [thresholds]
            side_min = 100
            side_max = 200

            [calibration]
            max_raw = 3000
            "#,
        )
        .unwrap();
        assert_eq!(
            config.thresholds,
            Thresholds {
                side_min: 100,
                side_max: 200,
                ..Thresholds::DEFAULT
            }
        );
        assert_eq!(config.calibration.max_raw, 3000);
        assert_eq!(config.calibration.slope, 1_195_172);
        assert_eq!(config.thresholds.classify(150, 650, 150), Scenario::Straight);
        assert_eq!(config.calibration.convert(3000), 800);
    }

    #[test]
    fn line_weights_from_toml() {
        let config = parse("[line]\nweights = [8, 6, 4, 2, -2, -4, -6, -8]\n").unwrap();
        assert_eq!(config.line.position(0x01), 8);
    }

    #[test]
    fn huge_line_weights_still_give_a_position() {
        let config =
            parse("[line]\nweights = [2147483647, 2147483647, 0, 0, 0, 0, 0, 0]\n").unwrap();
        assert_eq!(config.line.position(0x03), i32::MAX);
        assert_eq!(config.line.position(0x07), 1_431_655_764);
    }

    #[test]
    fn defaults_survive_a_toml_round_trip() {
        let text = toml::to_string_pretty(&NavConfig::default()).unwrap();
        assert_eq!(parse(&text).unwrap(), NavConfig::default());
    }

    #[test]
    fn invalid_bands_are_rejected() {
        let err = parse("[thresholds]\nside_min = 500\n").unwrap_err();
        assert_eq!(
            err.downcast_ref::<ConfigError>(),
            Some(&ConfigError::InvertedWallBand { min: 500, max: 354 })
        );
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(parse("[thresholds\nside_min = 1").is_err());
        assert!(parse("[thresholds]\nside_min = \"near\"").is_err());
    }

    #[test]
    fn missing_file_is_reported() {
        let err = load(Some(Path::new("/nonexistent/maze-nav.toml"))).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
