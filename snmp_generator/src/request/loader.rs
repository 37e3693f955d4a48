//! Loading the generator configuration from TOML

use super::error::{RequestError, RequestResult};
use super::types::GeneratorConfig;
use crate::logging::codes;
use crate::{log_error, log_success};
use std::fs;
use std::path::Path;

pub fn load_config(path: &Path) -> RequestResult<GeneratorConfig> {
    let source = fs::read_to_string(path).map_err(|e| {
        let error = RequestError::io(path, &e);
        log_error!(error.error_code(), &error.to_string(), "path" => path.display());
        error
    })?;

    parse_config(&source, &path.display().to_string())
}

/// Parse and validate configuration text; `origin` names the source in errors
pub fn parse_config(source: &str, origin: &str) -> RequestResult<GeneratorConfig> {
    let config: GeneratorConfig = toml::from_str(source).map_err(|e| {
        let error = RequestError::parse(origin, &e);
        log_error!(error.error_code(), &error.to_string(), "path" => origin);
        error
    })?;

    if let Err(error) = config.validate() {
        log_error!(error.error_code(), &error.to_string(), "path" => origin);
        return Err(error);
    }

    log_success!(
        codes::success::CONFIG_LOADED,
        "Generator configuration loaded",
        "path" => origin,
        "modules" => config.modules.len()
    );

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::LookupRule;
    use assert_matches::assert_matches;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CONFIG: &str = r#"
[modules.if_mib]
walk = ["sysUpTime", "interfaces", "ifXTable"]

[[modules.if_mib.lookups]]
old_index = "ifIndex"
new_index = "ifDescr"

[modules.if_mib.overrides.ifAlias]
type = "DisplayString"

[modules.if_mib.overrides.ifType.regex_extracts]
Ethernet = [{ value = "1", regex = "^6$" }]

[modules.system]
walk = ["system"]
"#;

    #[test]
    fn test_parse_config() {
        let config = parse_config(CONFIG, "inline").unwrap();
        assert_eq!(config.modules.len(), 2);

        let if_mib = &config.modules["if_mib"];
        assert_eq!(if_mib.walk, vec!["sysUpTime", "interfaces", "ifXTable"]);
        assert_eq!(if_mib.lookups, vec![LookupRule::new("ifIndex", "ifDescr")]);
        assert_eq!(
            if_mib.overrides["ifAlias"].metric_type.as_deref(),
            Some("DisplayString")
        );
        assert_eq!(if_mib.overrides["ifType"].regex_extracts["Ethernet"][0].regex, "^6$");

        assert!(config.modules["system"].overrides.is_empty());
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(CONFIG.as_bytes()).unwrap();

        let config = load_config(file.path()).unwrap();
        assert!(config.modules.contains_key("system"));
    }

    #[test]
    fn test_malformed_toml() {
        assert_matches!(
            parse_config("[modules.x\nwalk = 1", "inline"),
            Err(RequestError::Parse { .. })
        );
    }

    #[test]
    fn test_validation_runs_on_load() {
        let source = "[modules.bad]\nwalk = []\n";
        assert_matches!(parse_config(source, "inline"), Err(RequestError::EmptyWalk { .. }));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert_matches!(
            load_config(&dir.path().join("generator.toml")),
            Err(RequestError::Io { .. })
        );
    }
}
