use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use lantern::core::config::{CliOverrides, ConfigError, load_config, resolve};

fn scratch_file(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("lantern-config-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_explicit_file_is_loaded_and_resolved() {
    let path = scratch_file(
        "full.toml",
        r#"
[general]
status_text = "Offline"
welcome_message = "Hi."

[composer]
min_height = 4
max_height = 9

[echo]
prefix = "> "
reply_timeout_ms = 0
"#,
    );

    let config = load_config(Some(&path)).unwrap();
    let resolved = resolve(&config, &CliOverrides::default());

    assert_eq!(resolved.status_text, "Offline");
    assert_eq!(resolved.welcome_message.as_deref(), Some("Hi."));
    assert_eq!(resolved.composer_bounds.min, 4);
    assert_eq!(resolved.composer_bounds.max, 9);
    assert_eq!(resolved.echo_prefix, "> ");
    assert_eq!(resolved.reply_timeout, Duration::ZERO);
}

#[test]
fn test_cli_overrides_win() {
    let path = scratch_file("delay.toml", "[echo]\ndelay_ms = 900\n");
    let config = load_config(Some(&path)).unwrap();

    let resolved = resolve(
        &config,
        &CliOverrides {
            delay_ms: Some(5),
            no_welcome: true,
        },
    );

    assert_eq!(resolved.echo_delay, Duration::from_millis(5));
    assert_eq!(resolved.welcome_message, None);
}

#[test]
fn test_malformed_file_is_parse_error() {
    let path = scratch_file("broken.toml", "[general\nwindow_title = ");
    assert!(matches!(load_config(Some(&path)), Err(ConfigError::Parse(_))));
}

#[test]
fn test_missing_explicit_file_is_io_error() {
    let path = std::env::temp_dir().join("lantern-definitely-missing.toml");
    assert!(matches!(load_config(Some(&path)), Err(ConfigError::Io(_))));
}
