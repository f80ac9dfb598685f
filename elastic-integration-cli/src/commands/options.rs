//! `elastic-integration options` command handler

use std::io::Write;

use serde::Serialize;

use elastic_integration_core::options::{OPTIONS, OptionSpec};

use crate::cli::OptionsArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `options` command.
pub fn execute(args: OptionsArgs, writer: &OutputWriter) -> Result<(), CliError> {
    writer.render(&options_report(args.tls_only))
}

/// Build the option listing, optionally restricted to TLS-only options.
pub fn options_report(tls_only: bool) -> OptionsReport {
    let options = OPTIONS
        .iter()
        .filter(|spec| !tls_only || spec.tls_only)
        .map(OptionEntry::from)
        .collect();
    OptionsReport { options }
}

/// One recognized option.
#[derive(Debug, Serialize)]
pub struct OptionEntry {
    pub name: &'static str,
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<&'static str>,
    pub tls_only: bool,
    pub secret: bool,
    pub description: &'static str,
}

impl From<&OptionSpec> for OptionEntry {
    fn from(spec: &OptionSpec) -> Self {
        Self {
            name: spec.name,
            kind: spec.kind.to_string(),
            default: spec.default,
            tls_only: spec.tls_only,
            secret: spec.secret,
            description: spec.description,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OptionsReport {
    pub options: Vec<OptionEntry>,
}

impl Render for OptionsReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(
            w,
            "{:<30} {:<32} {:<8} {}",
            "NAME".bold(),
            "KIND".bold(),
            "FLAGS".bold(),
            "DESCRIPTION".bold()
        )?;
        for entry in &self.options {
            let mut flags = String::new();
            if entry.tls_only {
                flags.push('T');
            }
            if entry.secret {
                flags.push('S');
            }
            write!(
                w,
                "{:<30} {:<32} {:<8} {}",
                entry.name, entry.kind, flags, entry.description
            )?;
            if let Some(default) = entry.default {
                write!(w, " (default: {default})")?;
            }
            writeln!(w)?;
        }
        writeln!(w)?;
        writeln!(w, "Flags: T = requires TLS, S = secret (redacted in output)")
    }
}
