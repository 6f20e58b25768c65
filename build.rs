// Build script - reads config.yaml at compile time and generates defaults
// This allows changing defaults during development without editing source code

use std::env;
use std::fs;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=src/config.yaml");

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    let dest_path = Path::new(&out_dir).join("compiled_config.rs");

    // Fall back to hardcoded defaults when config.yaml is missing
    let config = if Path::new("src/config.yaml").exists() {
        let content = fs::read_to_string("src/config.yaml")
            .expect("Failed to read src/config.yaml");
        parse_config(&content)
    } else {
        CompiledConfig::default()
    };

    let generated = format!(
        r#"// Auto-generated from config.yaml at compile time
// Do not edit - modify config.yaml and rebuild instead

pub const API_BASE_URL: &str = {api_base_url:?};
pub const REQUEST_TIMEOUT_MS: u64 = {request_timeout_ms};

pub const TITLE: &str = {title:?};
pub const TOAST_DURATION_MS: u64 = {toast_duration_ms};
pub const DRAWER_WIDTH: u16 = {drawer_width};
pub const CARD_WIDTH: u16 = {card_width};
pub const TICK_RATE_MS: u64 = {tick_rate_ms};
"#,
        api_base_url = config.api_base_url,
        request_timeout_ms = config.request_timeout_ms,
        title = config.title,
        toast_duration_ms = config.toast_duration_ms,
        drawer_width = config.drawer_width,
        card_width = config.card_width,
        tick_rate_ms = config.tick_rate_ms,
    );

    fs::write(&dest_path, generated).expect("Failed to write compiled config");
}

struct CompiledConfig {
    api_base_url: String,
    request_timeout_ms: u64,
    title: String,
    toast_duration_ms: u64,
    drawer_width: u16,
    card_width: u16,
    tick_rate_ms: u64,
}

impl Default for CompiledConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3000".to_string(),
            request_timeout_ms: 10_000,
            title: "CNAPP Dashboard".to_string(),
            toast_duration_ms: 6_000,
            drawer_width: 40,
            card_width: 24,
            tick_rate_ms: 50,
        }
    }
}

fn parse_config(content: &str) -> CompiledConfig {
    let mut config = CompiledConfig::default();

    // Simple YAML parsing (avoiding external dependencies in build script)
    let mut in_api = false;
    let mut in_ui = false;

    for line in content.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with("api:") {
            in_api = true;
            in_ui = false;
            continue;
        } else if trimmed.starts_with("ui:") {
            in_api = false;
            in_ui = true;
            continue;
        }

        // A top-level key ends the current section
        if !trimmed.is_empty()
            && !trimmed.starts_with('#')
            && !line.starts_with(' ')
            && !line.starts_with('\t')
        {
            in_api = false;
            in_ui = false;
        }

        let Some((key, value)) = parse_kv(trimmed) else {
            continue;
        };

        if in_api {
            match key {
                "base_url" => config.api_base_url = unquote(value).to_string(),
                "request_timeout_ms" => {
                    config.request_timeout_ms = value.parse().unwrap_or(config.request_timeout_ms)
                }
                _ => {}
            }
        } else if in_ui {
            match key {
                "title" => config.title = unquote(value).to_string(),
                "toast_duration_ms" => {
                    config.toast_duration_ms = value.parse().unwrap_or(config.toast_duration_ms)
                }
                "drawer_width" => config.drawer_width = value.parse().unwrap_or(config.drawer_width),
                "card_width" => config.card_width = value.parse().unwrap_or(config.card_width),
                "tick_rate_ms" => config.tick_rate_ms = value.parse().unwrap_or(config.tick_rate_ms),
                _ => {}
            }
        }
    }

    config
}

fn parse_kv(line: &str) -> Option<(&str, &str)> {
    if line.starts_with('#') || line.is_empty() {
        return None;
    }

    let colon_pos = line.find(':')?;
    let key = line[..colon_pos].trim();
    let mut value = line[colon_pos + 1..].trim();

    // Strip inline comments, but only when # is preceded by a space
    if let Some(comment_pos) = value.find(" #") {
        value = value[..comment_pos].trim();
    }

    if value.is_empty() {
        return None;
    }

    Some((key, value))
}

fn unquote(s: &str) -> &str {
    s.trim().trim_matches('"').trim_matches('\'')
}
