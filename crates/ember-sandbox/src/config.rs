use anyhow::{Context, Result};

use ember_engine::window::RuntimeConfig;

/// Builds the window configuration, applying `EMBER_*` overrides from the environment.
pub fn runtime_config() -> Result<RuntimeConfig> {
    from_lookup(|key| std::env::var(key).ok())
}

fn from_lookup<F>(lookup: F) -> Result<RuntimeConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = RuntimeConfig {
        title: "ember sandbox".to_string(),
        ..RuntimeConfig::default()
    };

    if let Some(title) = lookup("EMBER_TITLE") {
        config.title = title;
    }
    if let Some(w) = lookup("EMBER_WIDTH") {
        config.width = parse_dimension("EMBER_WIDTH", &w)?;
    }
    if let Some(h) = lookup("EMBER_HEIGHT") {
        config.height = parse_dimension("EMBER_HEIGHT", &h)?;
    }

    Ok(config)
}

fn parse_dimension(key: &str, value: &str) -> Result<u32> {
    let v: u32 = value
        .trim()
        .parse()
        .with_context(|| format!("{key}={value:?} is not a valid size"))?;
    anyhow::ensure!(v > 0, "{key} must be non-zero");
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_env() {
        let cfg = from_lookup(|_| None).unwrap();
        assert_eq!((cfg.width, cfg.height), (800, 600));
        assert_eq!(cfg.title, "ember sandbox");
    }

    #[test]
    fn overrides_apply() {
        let cfg = from_lookup(|k| match k {
            "EMBER_WIDTH" => Some("1024".into()),
            "EMBER_HEIGHT" => Some(" 768 ".into()),
            "EMBER_TITLE" => Some("demo".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!((cfg.width, cfg.height), (1024, 768));
        assert_eq!(cfg.title, "demo");
    }

    #[test]
    fn invalid_size_is_an_error() {
        let err = from_lookup(|k| (k == "EMBER_WIDTH").then(|| "wide".to_string())).unwrap_err();
        assert!(err.to_string().contains("EMBER_WIDTH"));

        assert!(from_lookup(|k| (k == "EMBER_HEIGHT").then(|| "0".to_string())).is_err());
    }
}
