use std::path::PathBuf;

use crate::app_config::{AppConfig, Viewport};
use crate::ConfigError;

pub(crate) const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Parsing is decoupled from the real environment so tests can drive it with
/// a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| invalid(var, e.to_string()))
    };

    let log_level = or_default("SUBPULSE_LOG_LEVEL", "info");
    let headless = parse_bool(&or_default("SUBPULSE_HEADLESS", "true"))
        .ok_or_else(|| invalid("SUBPULSE_HEADLESS", "expected true or false".to_string()))?;
    let chrome_path = lookup("SUBPULSE_CHROME_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);
    let user_agent = or_default("SUBPULSE_USER_AGENT", DEFAULT_USER_AGENT);
    let viewport = parse_viewport(&or_default("SUBPULSE_VIEWPORT", "1536x816"))
        .ok_or_else(|| invalid("SUBPULSE_VIEWPORT", "expected WIDTHxHEIGHT".to_string()))?;
    let locale = or_default("SUBPULSE_LOCALE", "en-US");
    let timezone = or_default("SUBPULSE_TIMEZONE", "America/New_York");

    let nav_timeout_secs = parse_u64("SUBPULSE_NAV_TIMEOUT_SECS", "30")?;
    let ready_timeout_secs = parse_u64("SUBPULSE_READY_TIMEOUT_SECS", "10")?;
    let settle_delay_ms = parse_u64("SUBPULSE_SETTLE_DELAY_MS", "1000")?;
    let render_delay_ms = parse_u64("SUBPULSE_RENDER_DELAY_MS", "500")?;
    let inter_request_delay_ms = parse_u64("SUBPULSE_INTER_REQUEST_DELAY_MS", "1000")?;

    Ok(AppConfig {
        log_level,
        headless,
        chrome_path,
        user_agent,
        viewport,
        locale,
        timezone,
        nav_timeout_secs,
        ready_timeout_secs,
        settle_delay_ms,
        render_delay_ms,
        inter_request_delay_ms,
    })
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// Parse `"1536x816"` into a [`Viewport`]. Both sides must be non-zero.
fn parse_viewport(s: &str) -> Option<Viewport> {
    let (w, h) = s.trim().split_once(['x', 'X'])?;
    let width = w.trim().parse::<u32>().ok().filter(|v| *v > 0)?;
    let height = h.trim().parse::<u32>().ok().filter(|v| *v > 0)?;
    Some(Viewport { width, height })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
