//! Level and rules file loading.

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use gridlock_core::LevelData;
use gridlock_world::Rules;

const SUPPORTED_RULES_VERSION: u32 = 1;

/// Reads a JSON level descriptor from disk.
pub(crate) fn load_level(path: &Path) -> Result<LevelData> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read level file at {}", path.display()))?;
    parse_level(&contents).with_context(|| format!("invalid level file {}", path.display()))
}

/// Reads a TOML rules file from disk.
pub(crate) fn load_rules(path: &Path) -> Result<Rules> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read rules file at {}", path.display()))?;
    parse_rules(&contents).with_context(|| format!("invalid rules file {}", path.display()))
}

pub(crate) fn parse_level(contents: &str) -> Result<LevelData> {
    serde_json::from_str(contents).context("failed to parse level json contents")
}

#[derive(Debug, serde::Deserialize)]
struct RulesFile {
    version: u32,
    #[serde(default)]
    rules: Rules,
}

pub(crate) fn parse_rules(contents: &str) -> Result<Rules> {
    let file: RulesFile =
        toml::from_str(contents).context("failed to parse rules toml contents")?;
    if file.version != SUPPORTED_RULES_VERSION {
        bail!(
            "unsupported rules file version {}; expected {}",
            file.version,
            SUPPORTED_RULES_VERSION
        );
    }
    Ok(file.rules)
}

#[cfg(test)]
mod tests {
    use gridlock_core::{Coord, OccupierKind};

    use super::*;

    #[test]
    fn rules_file_overrides_selected_switches() {
        let rules = parse_rules(
            r#"
                version = 1

                [rules]
                push_advances_player = true
            "#,
        )
        .expect("valid rules");

        assert!(rules.push_advances_player);
        assert!(rules.exit_requires_wall, "unset switches keep defaults");
    }

    #[test]
    fn rules_table_is_optional() {
        assert_eq!(parse_rules("version = 1").expect("valid"), Rules::default());
    }

    #[test]
    fn rules_file_rejects_unknown_version() {
        let error = parse_rules("version = 2").expect_err("version 2 is unknown");
        assert!(error.to_string().contains("unsupported rules file version 2"));
    }

    #[test]
    fn rules_file_requires_version() {
        assert!(parse_rules("[rules]\nexit_requires_wall = false").is_err());
    }

    #[test]
    fn level_parses_with_defaulted_tiles() {
        let level = parse_level(
            r#"{ "columns": 2, "rows": 1, "tiles": [[{ "occupier": "Hero" }], [{}]] }"#,
        )
        .expect("valid level");

        assert_eq!(level.columns(), 2);
        assert_eq!(
            level.tile(Coord::new(0, 0)).map(|tile| tile.occupier),
            Some(OccupierKind::Hero)
        );
        assert_eq!(
            level.tile(Coord::new(1, 0)).map(|tile| tile.occupier),
            Some(OccupierKind::Empty)
        );
    }

    #[test]
    fn malformed_level_is_reported() {
        let error = parse_level(r#"{ "columns": 1 }"#).expect_err("rows missing");
        assert!(error.to_string().contains("failed to parse level json"));
    }

    #[test]
    fn missing_file_names_the_path() {
        let error = load_level(Path::new("does/not/exist.json")).expect_err("missing file");
        assert!(error.to_string().contains("does/not/exist.json"));
    }

    #[test]
    fn bundled_level_and_rules_load() {
        let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../levels");
        let level = load_level(&root.join("courtyard.json")).expect("bundled level");
        let rules = load_rules(&root.join("rules.toml")).expect("bundled rules");

        assert_eq!((level.columns(), level.rows()), (5, 3));
        assert_eq!(rules, Rules::default());
        assert!(gridlock_world::GameRun::with_rules(&level, rules)
            .errors()
            .is_empty());
    }
}
