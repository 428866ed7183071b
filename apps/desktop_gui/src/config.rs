use std::{fs, io::ErrorKind, path::PathBuf};

use anyhow::{bail, Context};
use client_core::{DEFAULT_API_BASE_URL, PLACEHOLDER_IMAGE_URL};
use serde::Deserialize;
use url::Url;

pub const DEFAULT_CONFIG_FILE: &str = "catalog.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub placeholder_image_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            placeholder_image_url: PLACEHOLDER_IMAGE_URL.into(),
        }
    }
}

/// Values given on the command line; they win over file and environment.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub config_path: Option<PathBuf>,
    pub api_base_url: Option<String>,
    pub placeholder_image_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    api_base_url: Option<String>,
    placeholder_image_url: Option<String>,
}

pub fn load_settings(overrides: &SettingsOverrides) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let config_path = overrides
        .config_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    match fs::read_to_string(&config_path) {
        Ok(raw) => apply_file(&mut settings, &raw)
            .with_context(|| format!("invalid config file '{}'", config_path.display()))?,
        // Only an explicitly requested file has to exist.
        Err(err) if err.kind() == ErrorKind::NotFound && overrides.config_path.is_none() => {}
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read config file '{}'", config_path.display()))
        }
    }

    apply_env(&mut settings, |name| std::env::var(name).ok());

    if let Some(v) = &overrides.api_base_url {
        settings.api_base_url = v.clone();
    }
    if let Some(v) = &overrides.placeholder_image_url {
        settings.placeholder_image_url = v.clone();
    }

    settings.api_base_url = normalize_api_base_url(&settings.api_base_url)?;
    Ok(settings)
}

fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;
    if let Some(v) = file_cfg.api_base_url {
        settings.api_base_url = v;
    }
    if let Some(v) = file_cfg.placeholder_image_url {
        settings.placeholder_image_url = v;
    }
    Ok(())
}

fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("CATALOG_API_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = var("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    if let Some(v) = var("CATALOG_PLACEHOLDER_IMAGE_URL") {
        settings.placeholder_image_url = v;
    }
    if let Some(v) = var("APP__PLACEHOLDER_IMAGE_URL") {
        settings.placeholder_image_url = v;
    }
}

fn normalize_api_base_url(raw: &str) -> anyhow::Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed =
        Url::parse(trimmed).with_context(|| format!("api base url '{raw}' is not a valid url"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!("api base url '{raw}' must use http or https");
    }
    Ok(trimmed.to_string())
}
