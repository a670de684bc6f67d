// Copyright (c) 2026 minitty contributors. Licensed under Apache License, Version 2.0.

//! Configuration: a single optional CLI argument (font size), falling
//! back to `$HOME/.xst`'s first line, falling back to a built-in default.

use std::path::PathBuf;

use clap::Parser;

const DEFAULT_FONT_SIZE: u32 = 16;
const MIN_SANE_FONT_SIZE: u32 = 5;

/// A minimal graphical terminal emulator.
#[derive(Debug, Parser)]
#[command(name = "minitty", version, about)]
pub struct Cli {
    /// Font size in pixels. Falls back to `$HOME/.xst`, then to 16.
    pub font_size: Option<u32>,
}

/// Resolves the effective font size: CLI argument wins; otherwise the
/// config file's first line; otherwise the default. A config value of 5
/// or less is treated as nonsensical and replaced with the default, same
/// as an unparsable or missing config file.
#[must_use]
pub fn resolve_font_size(cli: &Cli, home: Option<&str>) -> u32 {
    if let Some(size) = cli.font_size {
        return size;
    }

    let Some(home) = home else { return DEFAULT_FONT_SIZE };
    let path = PathBuf::from(home).join(".xst");
    let Ok(contents) = std::fs::read_to_string(&path) else { return DEFAULT_FONT_SIZE };
    let Some(first_line) = contents.lines().next() else { return DEFAULT_FONT_SIZE };
    match first_line.trim().parse::<u32>() {
        Ok(size) if size > MIN_SANE_FONT_SIZE => size,
        _ => DEFAULT_FONT_SIZE,
    }
}

/// The shell to spawn in the PTY: `$SHELL`, or `/bin/sh` if unset.
#[must_use]
pub fn resolve_shell(shell_env: Option<&str>) -> String {
    shell_env.filter(|s| !s.is_empty()).unwrap_or("/bin/sh").to_string()
}

/// Fixed candidate font paths, tried in order; the first readable file
/// wins. Fatal (`StartupError::FontNotFound`) if none exist.
pub const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/liberation/LiberationMono-Regular.ttf",
];

#[must_use]
pub fn find_font_path() -> Option<&'static str> {
    FONT_CANDIDATES.iter().copied().find(|p| std::path::Path::new(p).is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    fn cli_arg_wins_over_everything() {
        let cli = Cli { font_size: Some(40) };
        assert_eq!(resolve_font_size(&cli, Some("/nonexistent")), 40);
    }

    #[test]
    fn missing_home_falls_back_to_default() {
        let cli = Cli { font_size: None };
        assert_eq!(resolve_font_size(&cli, None), DEFAULT_FONT_SIZE);
    }

    #[test]
    #[serial]
    fn config_file_value_above_floor_is_used() {
        let dir = std::env::temp_dir().join(format!("minitty-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let mut f = std::fs::File::create(dir.join(".xst")).unwrap();
        writeln!(f, "32").unwrap();
        let cli = Cli { font_size: None };
        assert_eq!(resolve_font_size(&cli, Some(dir.to_str().unwrap())), 32);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    #[serial]
    fn config_file_value_at_or_below_floor_falls_back_to_default() {
        let dir = std::env::temp_dir().join(format!("minitty-test-low-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let mut f = std::fs::File::create(dir.join(".xst")).unwrap();
        writeln!(f, "3").unwrap();
        let cli = Cli { font_size: None };
        assert_eq!(resolve_font_size(&cli, Some(dir.to_str().unwrap())), DEFAULT_FONT_SIZE);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn shell_falls_back_to_bin_sh() {
        assert_eq!(resolve_shell(None), "/bin/sh");
        assert_eq!(resolve_shell(Some("")), "/bin/sh");
        assert_eq!(resolve_shell(Some("/bin/zsh")), "/bin/zsh");
    }
}
