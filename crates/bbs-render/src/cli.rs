//! Command-line parsing and command execution.

use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context as _};
use clap::{Parser, Subcommand};

use bbs_render::{
    analyze_frame, frame_options_schema, Error, FrameOptions, RenderConfig, RenderContext,
    RenderingService, TemplateRegistry,
};

/// Command line of the `bbs-render` binary.
#[derive(Debug, Parser)]
#[command(name = "bbs-render", version, about)]
#[command(arg_required_else_help(true))]
#[command(after_help = "\
Contexts: terminal_80 (default), telnet_80, web_80, or any defined in --config.
Log level: RUST_LOG, else logging.level from --config, else info.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// A parsed subcommand.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Per-line width report for stored ANSI frames
    Analyze {
        #[arg(
            value_name = "FILE",
            default_values = ["data/ansi/welcome.ans", "data/ansi/goodbye.ans"]
        )]
        files: Vec<PathBuf>,
    },
    /// Render a JSON frame request for a context
    Frame {
        #[arg(value_name = "REQUEST_JSON")]
        request: PathBuf,
        /// Context name (builtin or from --config)
        #[arg(long)]
        context: Option<String>,
        /// YAML configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Render a configured template with variables
    Template {
        id: String,
        /// YAML configuration file holding the template
        #[arg(long)]
        config: PathBuf,
        /// Context name (builtin or from --config)
        #[arg(long)]
        context: Option<String>,
        /// Template variable, repeatable
        #[arg(long = "var", value_name = "KEY=VALUE", value_parser = parse_var)]
        vars: Vec<(String, String)>,
    },
    /// Print the JSON Schema of frame requests
    Schema,
}

impl Command {
    /// Configuration file named on the command line, if any.
    pub fn config_path(&self) -> Option<&PathBuf> {
        match self {
            Command::Frame { config, .. } => config.as_ref(),
            Command::Template { config, .. } => Some(config),
            _ => None,
        }
    }
}

/// Split a `--var` argument at its first `=`.
fn parse_var(arg: &str) -> Result<(String, String), String> {
    arg.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got '{arg}'"))
}

/// Load the configuration a command refers to.
pub fn load_config(command: &Command) -> anyhow::Result<Option<RenderConfig>> {
    command
        .config_path()
        .map(|path| {
            RenderConfig::from_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))
        })
        .transpose()
}

fn resolve_context(
    name: Option<&str>,
    config: Option<&RenderConfig>,
) -> anyhow::Result<RenderContext> {
    let Some(name) = name else {
        return Ok(RenderContext::default());
    };
    config
        .and_then(|c| c.context(name))
        .or_else(|| RenderContext::builtin(name))
        .ok_or_else(|| anyhow!("unknown context '{name}'"))
}

/// Execute `command`, writing results to `out`.
pub fn run<W: Write>(
    command: &Command,
    config: Option<&RenderConfig>,
    out: &mut W,
) -> anyhow::Result<()> {
    match command {
        Command::Schema => {
            let schema = serde_json::to_string_pretty(&frame_options_schema())?;
            writeln!(out, "{schema}")?;
        }

        Command::Analyze { files } => {
            let mut failures = 0;
            for file in files {
                match std::fs::read_to_string(file) {
                    Ok(text) => {
                        writeln!(out, "\n=== Analyzing {} ===\n", file.display())?;
                        write!(out, "{}", analyze_frame(&text).summary())?;
                    }
                    Err(e) => {
                        tracing::error!("Error analyzing {}: {}", file.display(), e);
                        failures += 1;
                    }
                }
            }
            if failures > 0 {
                bail!("{failures} file(s) could not be analyzed");
            }
        }

        Command::Frame {
            request, context, ..
        } => {
            let json = std::fs::read_to_string(request)
                .with_context(|| format!("failed to read {}", request.display()))?;
            let options: FrameOptions = serde_json::from_str(&json)
                .with_context(|| format!("invalid frame request {}", request.display()))?;
            let context = resolve_context(context.as_deref(), config)?;

            let rendered = RenderingService::default().render_frame(&options, &context)?;
            writeln!(out, "{rendered}")?;
        }

        Command::Template {
            id, context, vars, ..
        } => {
            let config = config.ok_or_else(|| anyhow!("template needs --config FILE"))?;
            let registry = Arc::new(TemplateRegistry::from_config(config)?);
            let context = resolve_context(context.as_deref(), Some(config))?;
            let vars: HashMap<String, String> = vars.iter().cloned().collect();

            let rendered = RenderingService::new(Arc::clone(&registry))
                .render_template(id, &vars, &context)
                .map_err(|e| match e {
                    Error::UnknownTemplate(_) => {
                        anyhow!("{e} (available: {})", registry.ids().join(", "))
                    }
                    other => other.into(),
                })?;
            writeln!(out, "{rendered}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<Command, clap::Error> {
        Cli::try_parse_from(std::iter::once("bbs-render").chain(args.iter().copied()))
            .map(|cli| cli.command)
    }

    #[test]
    fn test_parse_help() {
        let err = parse(&[]).unwrap_err();
        assert_eq!(
            err.kind(),
            ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
        );
        assert_eq!(parse(&["--help"]).unwrap_err().kind(), ErrorKind::DisplayHelp);
        assert_eq!(
            parse(&["frame", "-h"]).unwrap_err().kind(),
            ErrorKind::DisplayHelp
        );
    }

    #[test]
    fn test_parse_analyze() {
        let command = parse(&["analyze", "a.ans", "b.ans"]).unwrap();
        assert_eq!(
            command,
            Command::Analyze {
                files: vec![PathBuf::from("a.ans"), PathBuf::from("b.ans")]
            }
        );
    }

    #[test]
    fn test_parse_analyze_defaults_to_stock_screens() {
        let command = parse(&["analyze"]).unwrap();
        assert_eq!(
            command,
            Command::Analyze {
                files: vec![
                    PathBuf::from("data/ansi/welcome.ans"),
                    PathBuf::from("data/ansi/goodbye.ans"),
                ]
            }
        );
    }

    #[test]
    fn test_parse_frame() {
        let command = parse(&["frame", "req.json", "--context", "telnet_80"]).unwrap();
        assert_eq!(
            command,
            Command::Frame {
                request: PathBuf::from("req.json"),
                context: Some("telnet_80".to_string()),
                config: None,
            }
        );
        assert!(parse(&["frame"]).is_err());
        assert!(parse(&["frame", "a.json", "b.json"]).is_err());
        assert!(parse(&["frame", "a.json", "--context"]).is_err());
    }

    #[test]
    fn test_parse_template() {
        let command = parse(&[
            "template", "welcome", "--config", "bbs.yaml", "--var", "user=ami", "--var",
            "motd=a=b",
        ])
        .unwrap();

        let Command::Template {
            id, config, vars, ..
        } = command
        else {
            panic!("expected template command");
        };
        assert_eq!(id, "welcome");
        assert_eq!(config, PathBuf::from("bbs.yaml"));
        assert_eq!(
            vars,
            vec![
                ("user".to_string(), "ami".to_string()),
                ("motd".to_string(), "a=b".to_string()),
            ]
        );

        assert_eq!(
            parse(&["template", "welcome"]).unwrap_err().kind(),
            ErrorKind::MissingRequiredArgument
        );
        assert_eq!(
            parse(&["template", "w", "--config", "c", "--var", "novalue"])
                .unwrap_err()
                .kind(),
            ErrorKind::ValueValidation
        );
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!(parse(&["draw"]).is_err());
        assert!(parse(&["schema", "--verbose"]).is_err());
    }

    #[test]
    fn test_parse_var() {
        assert_eq!(
            parse_var("user=").unwrap(),
            ("user".to_string(), String::new())
        );
        assert!(parse_var("user").is_err());
    }

    #[test]
    fn test_resolve_context() {
        assert_eq!(
            resolve_context(None, None).unwrap(),
            RenderContext::TERMINAL_80
        );
        assert_eq!(
            resolve_context(Some("web_80"), None).unwrap(),
            RenderContext::WEB_80
        );
        assert!(resolve_context(Some("vt52"), None).is_err());
    }

    #[test]
    fn test_run_schema() {
        let mut out = Vec::new();
        run(&Command::Schema, None, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\"content_lines\""));
    }

    #[test]
    fn test_run_unknown_template_lists_available() {
        let config = RenderConfig::from_yaml(
            r#"
templates:
  - id: banner
    frame: { width: 12, content_lines: [{ text: "BBS" }] }
"#,
        )
        .unwrap();
        let command = Command::Template {
            id: "motd".to_string(),
            config: PathBuf::from("bbs.yaml"),
            context: None,
            vars: Vec::new(),
        };

        let err = run(&command, Some(&config), &mut Vec::new()).unwrap_err();
        assert_eq!(err.to_string(), "Unknown template: motd (available: banner)");
    }
}
