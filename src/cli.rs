//! Command line and config-file handling for the `tui-flappy` binary.

use std::fs;

use anyhow::{anyhow, Context, Result};

use crate::engine::{parse_headless_args, HeadlessOptions};
use crate::types::GameConfig;

/// Env var naming an optional JSON config file.
pub const CONFIG_PATH_ENV: &str = "FLAPPY_CONFIG";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Interactive terminal game. `None` seeds from the clock.
    Play { seed: Option<u32> },
    Headless(HeadlessOptions),
}

/// Parse arguments (without the program name).
pub fn parse_args(args: &[String]) -> Result<Command> {
    if let Some(opts) = parse_headless_args(args)? {
        return Ok(Command::Headless(opts));
    }

    let mut seed = None;
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --seed"))?;
                seed = Some(
                    v.parse::<u32>()
                        .map_err(|_| anyhow!("invalid --seed value: {}", v))?,
                );
            }
            other => {
                return Err(anyhow!("unknown argument: {}", other));
            }
        }
        i += 1;
    }

    Ok(Command::Play { seed })
}

/// Defaults, then the `FLAPPY_CONFIG` file, then `FLAPPY_*` variables.
pub fn load_config() -> Result<GameConfig> {
    load_config_with(|var| std::env::var(var).ok())
}

/// [`load_config`] with an injectable variable lookup.
pub fn load_config_with<F>(lookup: F) -> Result<GameConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let path = lookup(CONFIG_PATH_ENV)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let base = match path {
        Some(path) => {
            let doc = fs::read_to_string(&path)
                .with_context(|| format!("reading config file {}", path))?;
            GameConfig::from_json(&doc).with_context(|| format!("parsing config file {}", path))?
        }
        None => GameConfig::default(),
    };

    let config = base
        .with_overrides(lookup)
        .context("applying FLAPPY_* overrides")?;
    config.validate().context("invalid game config")?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn test_play_is_the_default_command() {
        assert_eq!(parse_args(&[]).unwrap(), Command::Play { seed: None });
        assert_eq!(
            parse_args(&args(&["--seed", "77"])).unwrap(),
            Command::Play { seed: Some(77) }
        );
        assert!(parse_args(&args(&["--seed", "x"])).is_err());
        assert!(parse_args(&args(&["--wat"])).is_err());
    }

    #[test]
    fn test_headless_subcommand() {
        let cmd = parse_args(&args(&["headless", "--ticks", "9"])).unwrap();
        match cmd {
            Command::Headless(opts) => assert_eq!(opts.max_ticks, 9),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("tui-flappy-cli-{}.json", std::process::id()));
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, r#"{{"gravity": 0.5, "pipe_speed": 4.0}}"#).unwrap();
        drop(file);

        let path_str = path.to_string_lossy().to_string();
        let config = load_config_with(lookup(&[
            (CONFIG_PATH_ENV, path_str.as_str()),
            ("FLAPPY_PIPE_SPEED", "5"),
        ]))
        .unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(config.gravity, 0.5);
        assert_eq!(config.pipe_speed, 5.0);
        assert_eq!(config.gap_height, 200.0);
    }

    #[test]
    fn test_missing_file_and_bad_values_are_errors() {
        let err = load_config_with(lookup(&[(CONFIG_PATH_ENV, "/nonexistent/flappy.json")]))
            .unwrap_err();
        assert!(err.to_string().contains("reading config file"));

        let err = load_config_with(lookup(&[("FLAPPY_GAP_HEIGHT", "700")])).unwrap_err();
        assert!(err.to_string().contains("invalid game config"));
    }

    #[test]
    fn test_blank_config_path_uses_defaults() {
        let config = load_config_with(lookup(&[(CONFIG_PATH_ENV, "  ")])).unwrap();
        assert_eq!(config, GameConfig::default());
    }
}
