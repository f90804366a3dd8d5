use crate::refine::RefineOptions;
use crate::session::{Command, SessionParams};
use crate::types::Point;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct RefineDemoConfig {
    pub input: PathBuf,
    /// RGB channel holding the intensity to align boundaries with
    /// (0 = red, 1 = green, 2 = blue).
    #[serde(default)]
    pub scoring_channel: usize,
    pub seeds: Vec<Point>,
    #[serde(default)]
    pub session: SessionParams,
    #[serde(default)]
    pub refine: RefineOptions,
    /// Scripted commands, applied in order before `keys`.
    #[serde(default)]
    pub commands: Vec<Command>,
    /// Keystrokes translated with [`Command::from_key`]; unknown keys are skipped.
    #[serde(default)]
    pub keys: String,
    pub output: RefineDemoOutputConfig,
}

impl RefineDemoConfig {
    /// Scripted commands followed by the translated keystrokes.
    pub fn command_script(&self) -> Vec<Command> {
        let step = self.session.move_step;
        self.commands
            .iter()
            .cloned()
            .chain(self.keys.chars().filter_map(|k| Command::from_key(k, step)))
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct RefineDemoOutputConfig {
    #[serde(default)]
    pub composite_image: Option<PathBuf>,
    #[serde(default)]
    pub edge_field_image: Option<PathBuf>,
    #[serde(default)]
    pub report_json: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<RefineDemoConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::RefineDemoConfig;
    use crate::session::Command;

    #[test]
    fn minimal_config_uses_defaults() {
        let cfg: RefineDemoConfig = serde_json::from_str(
            r#"{
                "input": "cells.png",
                "seeds": [{"x": 10.0, "y": 12.0}],
                "keys": "d\tq?",
                "output": {"report_json": "out/report.json"}
            }"#,
        )
        .expect("valid config");
        assert_eq!(cfg.scoring_channel, 0);
        assert_eq!(cfg.session.edge_gradient_width, 10);
        assert_eq!(cfg.refine.max_evals, 20_000);
        assert!(cfg.output.composite_image.is_none());
        assert_eq!(
            cfg.command_script(),
            vec![
                Command::Move { dx: 2.0, dy: 0.0 },
                Command::SelectNext,
                Command::Quit
            ]
        );
    }
}
