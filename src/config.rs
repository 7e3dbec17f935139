use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::options::ClientConfig;

pub(crate) const URL_ENV: &str = "ROOFTOP_URL";
pub(crate) const TOKEN_ENV: &str = "ROOFTOP_API_TOKEN";
pub(crate) const RC_ENV: &str = "ROOFTOP_RC";
const RC_NAME: &str = ".rooftoprc";
const RC_KEYS: [&str; 4] = ["url", "token", "apiToken", "verify"];

#[derive(Debug, Default, PartialEq)]
struct RcConfig {
    url: Option<String>,
    token: Option<String>,
    verify: Option<bool>,
}

/// A [`ClientConfig`] plus where its values could have come from.
#[derive(Debug)]
pub(crate) struct LoadedConfig {
    pub(crate) config: ClientConfig,
    searched: Vec<PathBuf>,
    used: Option<PathBuf>,
}

impl LoadedConfig {
    pub(crate) fn describe_sources(&self) -> String {
        match &self.used {
            Some(path) => format!("invalid Rooftop configuration (read {})", path.display()),
            None if self.searched.is_empty() => format!(
                "invalid or missing Rooftop configuration (set {} and {} or create {})",
                URL_ENV, TOKEN_ENV, RC_NAME
            ),
            None => format!(
                "invalid or missing Rooftop configuration (set {} and {} or put `url:` and `token:` in one of: {})",
                URL_ENV,
                TOKEN_ENV,
                self.searched
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }
}

pub(crate) fn load_config(url: Option<String>, token: Option<String>) -> Result<LoadedConfig> {
    load_config_with(url, token, |k| std::env::var(k).ok(), rc_candidates)
}

fn load_config_with(
    url: Option<String>,
    token: Option<String>,
    env: impl Fn(&str) -> Option<String>,
    candidates: impl FnOnce(&dyn Fn(&str) -> Option<String>) -> Vec<PathBuf>,
) -> Result<LoadedConfig> {
    // Both given by the caller: no env or rc lookup, and rc `verify` is not read.
    if let (Some(url), Some(token)) = (&url, &token) {
        return Ok(LoadedConfig {
            config: ClientConfig::new(url.as_str(), token.as_str()),
            searched: Vec::new(),
            used: None,
        });
    }

    let mut url = url.or_else(|| env(URL_ENV));
    let mut token = token.or_else(|| env(TOKEN_ENV));

    let env: &dyn Fn(&str) -> Option<String> = &env;
    let searched = candidates(env);
    let mut verify: Option<bool> = None;
    let mut used = None;

    for rc_path in &searched {
        if !rc_path.exists() {
            continue;
        }
        let cfg = read_rc(rc_path).with_context(|| {
            format!("failed to read configuration file {}", rc_path.display())
        })?;

        if url.is_none() {
            url = cfg.url;
        }
        if token.is_none() {
            token = cfg.token;
        }
        verify = cfg.verify;
        used = Some(rc_path.clone());
        break;
    }

    let config = ClientConfig {
        url,
        api_token: token,
        verify: verify.unwrap_or(true),
        ..ClientConfig::default()
    };

    Ok(LoadedConfig {
        config,
        searched,
        used,
    })
}

fn read_rc(path: &Path) -> Result<RcConfig> {
    let text = std::fs::read_to_string(path)?;
    Ok(parse_rc(&text))
}

fn parse_rc(text: &str) -> RcConfig {
    let mut cfg = RcConfig::default();

    // `token:` may be on one line with the value on the next.
    let mut pending_key: Option<&str> = None;

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(pk) = pending_key.take() {
            if !is_key_line(line) {
                set_rc_value(&mut cfg, pk, strip_quotes(line));
                continue;
            }
        }

        let Some((k, v)) = line.split_once(':') else {
            continue;
        };
        let k = k.trim();
        let v = strip_quotes(v.trim());
        match k {
            "url" | "token" | "apiToken" => {
                if v.is_empty() {
                    pending_key = Some(k);
                } else {
                    set_rc_value(&mut cfg, k, v);
                }
            }
            "verify" => {
                if !v.is_empty() {
                    cfg.verify = Some(v != "0");
                }
            }
            _ => {}
        }
    }

    cfg
}

fn is_key_line(line: &str) -> bool {
    line.split_once(':')
        .is_some_and(|(k, _)| RC_KEYS.contains(&k.trim()))
}

fn set_rc_value(cfg: &mut RcConfig, key: &str, value: &str) {
    match key {
        "url" => cfg.url = Some(value.to_string()),
        "token" | "apiToken" => cfg.token = Some(value.to_string()),
        _ => {}
    }
}

fn strip_quotes(s: &str) -> &str {
    let s = s.trim();
    if (s.starts_with('"') && s.ends_with('"') && s.len() >= 2)
        || (s.starts_with('\'') && s.ends_with('\'') && s.len() >= 2)
    {
        &s[1..s.len() - 1]
    } else {
        s
    }
}

// 1) ROOFTOP_RC (explicit)
// 2) ./.rooftoprc
// 3) ~/.rooftoprc
fn rc_candidates(env: &dyn Fn(&str) -> Option<String>) -> Vec<PathBuf> {
    if let Some(p) = env(RC_ENV) {
        return vec![PathBuf::from(p)];
    }

    let mut v = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        v.push(cwd.join(RC_NAME));
    }
    if let Some(home) = dirs::home_dir() {
        v.push(home.join(RC_NAME));
    }
    v
}
