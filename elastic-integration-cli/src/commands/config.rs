//! `elastic-integration config` command handler

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use elastic_integration_connection::ConnectionValidator;
use elastic_integration_core::config::IntegrationConfig;
use elastic_integration_core::error::IntegrationError;

use crate::cli::{ConfigAction, ConfigArgs, Section};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `config` command.
///
/// `loaded` is the outcome of loading `config_path`; `validate` reports a load
/// failure instead of returning it.
pub fn execute(
    args: ConfigArgs,
    config_path: &Path,
    loaded: Result<IntegrationConfig, IntegrationError>,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let validator = ConnectionValidator::new();
    match args.action {
        ConfigAction::Validate => {
            let report = match &loaded {
                Ok(config) => validation_report(config_path, config, &validator),
                Err(e) => ConfigValidationReport::load_failure(config_path, e),
            };
            writer.render(&report)?;
            if report.valid {
                Ok(())
            } else {
                Err(CliError::Config("configuration is invalid".to_owned()))
            }
        }
        ConfigAction::Show { section } => {
            let report = show_report(config_path, &loaded?, &validator, section)?;
            writer.render(&report)
        }
    }
}

/// Run the validator and summarise the outcome.
///
/// Never fails: validation errors are part of the report.
pub fn validation_report(
    config_path: &Path,
    config: &IntegrationConfig,
    validator: &ConnectionValidator,
) -> ConfigValidationReport {
    info!(path = %config_path.display(), "validating connection settings");
    let source = config_path.display().to_string();

    match validator.validate(&config.elastic_integration) {
        Ok(validated) => ConfigValidationReport {
            source,
            valid: true,
            id: Some(validated.config.id().to_owned()),
            ssl_enabled: Some(validated.config.ssl_enabled()),
            hosts: validated
                .config
                .hosts()
                .map(|hosts| hosts.iter().map(ToString::to_string).collect())
                .unwrap_or_default(),
            warnings: validated
                .warnings
                .iter()
                .map(|warning| warning.message().to_owned())
                .collect(),
            error: None,
        },
        Err(err) => ConfigValidationReport {
            source,
            valid: false,
            id: None,
            ssl_enabled: None,
            hosts: Vec::new(),
            warnings: Vec::new(),
            error: Some(ValidationFailure {
                kind: err.kind().to_string(),
                message: err.to_string(),
            }),
        },
    }
}

/// Validate and render the frozen configuration (or one part of it).
pub fn show_report(
    config_path: &Path,
    config: &IntegrationConfig,
    validator: &ConnectionValidator,
    section: Section,
) -> Result<ConfigReport, CliError> {
    info!(path = %config_path.display(), section = section.as_str(), "showing validated configuration");

    let validated = validator.validate(&config.elastic_integration)?;
    let frozen = &validated.config;

    let (value, config_toml) = match section {
        Section::Target => render_section(section, frozen.target())?,
        Section::Tls => render_section(section, frozen.tls())?,
        Section::Auth => render_section(section, frozen.auth())?,
        Section::All => {
            let text = toml::to_string_pretty(frozen)
                .unwrap_or_else(|e| format!("(serialization error: {e})\n"));
            (serde_json::to_value(frozen)?, text)
        }
    };

    Ok(ConfigReport {
        source: config_path.display().to_string(),
        section: (section != Section::All).then(|| section.as_str().to_owned()),
        config: value,
        config_toml,
    })
}

/// JSON carries the section value itself; TOML nests it under the section name.
fn render_section<T: Serialize>(
    section: Section,
    value: &T,
) -> Result<(serde_json::Value, String), CliError> {
    let json = serde_json::to_value(value)?;
    let table = BTreeMap::from([(section.as_str(), value)]);
    let text = toml::to_string_pretty(&table)
        .unwrap_or_else(|e| format!("(serialization error: {e})\n"));
    Ok((json, text))
}

/// Validated configuration display report.
///
/// `config_toml` is only used for text rendering; JSON output carries `config`.
#[derive(Debug, Serialize)]
pub struct ConfigReport {
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    pub config: serde_json::Value,
    #[serde(skip)]
    pub config_toml: String,
}

impl Render for ConfigReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        match &self.section {
            Some(section) => writeln!(
                w,
                "Validated configuration {} (source: {})",
                format!("[{section}]").bold(),
                self.source
            )?,
            None => writeln!(w, "Validated configuration (source: {})", self.source.bold())?,
        }
        writeln!(w)?;
        write!(w, "{}", self.config_toml)
    }
}

/// First validation failure, as reported to the operator.
#[derive(Debug, Serialize)]
pub struct ValidationFailure {
    pub kind: String,
    pub message: String,
}

/// Configuration validation report.
#[derive(Debug, Serialize)]
pub struct ConfigValidationReport {
    pub source: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl_enabled: Option<bool>,
    pub hosts: Vec<String>,
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ValidationFailure>,
}

impl ConfigValidationReport {
    /// Report for a file that could not be read or parsed.
    pub fn load_failure(config_path: &Path, err: &IntegrationError) -> Self {
        Self {
            source: config_path.display().to_string(),
            valid: false,
            id: None,
            ssl_enabled: None,
            hosts: Vec::new(),
            warnings: Vec::new(),
            error: Some(ValidationFailure {
                kind: "load".to_owned(),
                message: err.to_string(),
            }),
        }
    }
}

impl Render for ConfigValidationReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Config Validation: {}", self.source.bold())?;

        match &self.error {
            None => {
                writeln!(w, "  Result: {}", "VALID".green().bold())?;
                if let Some(id) = &self.id {
                    writeln!(w, "  Id: {id}")?;
                }
                if let Some(ssl_enabled) = self.ssl_enabled {
                    writeln!(w, "  SSL enabled: {ssl_enabled}")?;
                }
                for host in &self.hosts {
                    writeln!(w, "  Host: {host}")?;
                }
                for warning in &self.warnings {
                    writeln!(w, "  Warning: {}", warning.yellow())?;
                }
            }
            Some(failure) => {
                writeln!(w, "  Result: {}", "INVALID".red().bold())?;
                writeln!(w, "  Kind: {}", failure.kind)?;
                writeln!(w, "  Error: {}", failure.message.red())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use elastic_integration_connection::{PathProbe, SystemTrust};

    struct AllowAll;

    impl PathProbe for AllowAll {
        fn is_readable(&self, _: &Path) -> bool {
            true
        }
        fn is_writable(&self, _: &Path) -> bool {
            false
        }
    }

    fn validator() -> ConnectionValidator {
        ConnectionValidator::builder()
            .path_probe(AllowAll)
            .system_trust(SystemTrust::Available("/etc/ssl/cert.pem".into()))
            .build()
    }

    fn parse(toml: &str) -> IntegrationConfig {
        IntegrationConfig::parse(toml).expect("test config should parse")
    }

    fn render(payload: &impl Render) -> String {
        let mut buffer = Vec::new();
        payload
            .render_text(&mut buffer)
            .expect("text rendering should succeed");
        String::from_utf8(buffer).expect("valid UTF-8")
    }

    #[test]
    fn test_validation_report_valid_lists_normalized_hosts() {
        let config = parse(
            "[elastic_integration]\nid = \"f1\"\nhosts = [\"127.0.0.1\", \"127.0.0.2:9300\"]\napi_key = \"k\"\n",
        );
        let report = validation_report(&PathBuf::from("filter.toml"), &config, &validator());

        assert!(report.valid);
        assert_eq!(report.id.as_deref(), Some("f1"));
        assert_eq!(report.ssl_enabled, Some(true));
        assert_eq!(
            report.hosts,
            vec!["https://127.0.0.1:9200/", "https://127.0.0.2:9300/"]
        );
        assert!(report.warnings.is_empty());

        let output = render(&report);
        assert!(output.contains("VALID"));
        assert!(output.contains("https://127.0.0.2:9300/"));
    }

    #[test]
    fn test_validation_report_invalid_names_kind() {
        let config = parse("[elastic_integration]\nhosts = [\"http://a:1111\", \"https://b:2222\"]\n");
        let report = validation_report(&PathBuf::from("bad.toml"), &config, &validator());

        assert!(!report.valid);
        let failure = report.error.as_ref().expect("failure should be reported");
        assert_eq!(failure.kind, "mixed_protocols");

        let output = render(&report);
        assert!(output.contains("INVALID"));
        assert!(output.contains("mixed protocols"));
    }

    #[test]
    fn test_validation_report_includes_warnings() {
        let config = parse("[elastic_integration]\ncloud_id = \"x\"\nssl_verification_mode = \"none\"\n");
        let report = validation_report(&PathBuf::from("filter.toml"), &config, &validator());

        assert!(report.valid);
        assert_eq!(report.warnings.len(), 2);
        let json = serde_json::to_value(&report).expect("report should serialize");
        assert!(json.get("error").is_none());
        assert_eq!(json["warnings"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_show_report_redacts_secrets() {
        let config = parse(
            "[elastic_integration]\nhosts = [\"es.local\"]\nusername = \"elastic\"\npassword = \"hunter2\"\n",
        );
        let report = show_report(&PathBuf::from("filter.toml"), &config, &validator(), Section::All)
            .expect("show should succeed");

        assert!(report.section.is_none());
        assert_eq!(report.config["auth"]["password"], "[REDACTED]");
        assert!(!report.config_toml.contains("hunter2"));
        assert!(report.config_toml.contains("[REDACTED]"));
    }

    #[test]
    fn test_show_report_single_section() {
        let config = parse("[elastic_integration]\nhosts = [\"es.local\"]\n");
        let report = show_report(&PathBuf::from("filter.toml"), &config, &validator(), Section::Target)
            .expect("show should succeed");

        assert_eq!(report.section.as_deref(), Some("target"));
        assert_eq!(report.config["hosts"][0], "https://es.local:9200/");

        let output = render(&report);
        assert!(output.contains("[target]"));
        assert!(output.contains("https://es.local:9200/"));
    }

    #[test]
    fn test_show_report_fails_on_invalid_config() {
        let config = parse("[elastic_integration]\n");
        let err = show_report(&PathBuf::from("filter.toml"), &config, &validator(), Section::Tls)
            .unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_load_failure_report_is_invalid() {
        let err = IntegrationConfig::parse("[elastic_integration\n").unwrap_err();
        let report = ConfigValidationReport::load_failure(&PathBuf::from("bad.toml"), &err);

        assert!(!report.valid);
        assert_eq!(report.error.as_ref().map(|f| f.kind.as_str()), Some("load"));
        assert!(render(&report).contains("INVALID"));
    }

    #[test]
    fn test_config_report_json_skips_toml() {
        let report = ConfigReport {
            source: "filter.toml".to_owned(),
            section: Some("tls".to_owned()),
            config: serde_json::json!({"status": "disabled"}),
            config_toml: "status = \"disabled\"\n".to_owned(),
        };
        let json = serde_json::to_value(&report).expect("report should serialize");
        assert_eq!(json["section"], "tls");
        assert!(json.get("config_toml").is_none());
    }
}
