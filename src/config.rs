use crate::entity::{EntityId, EntityType};
use anyhow::{Context, Result};
use clap::{ArgGroup, Parser, Subcommand};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "wikidata-display",
    about = "Format Wikidata SPARQL results for display",
    version
)]
pub struct CliArgs {
    #[arg(
        long,
        value_name = "FILE",
        help = "Path to a configuration file (YAML or JSON)",
        global = true
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        env = "WIKIDATA_DISPLAY_TEMPLATES_DIR",
        value_name = "DIR",
        help = "Directory of .sparql files overriding the bundled query templates",
        global = true
    )]
    pub templates_dir: Option<PathBuf>,

    #[arg(
        long,
        env = "WIKIDATA_DISPLAY_PRETTY",
        help = "Pretty-print JSON output",
        global = true
    )]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Turn SPARQL results into a display document
    Format {
        #[arg(long, value_name = "TYPE", help = "Entity type: person, book, country or landmark")]
        entity_type: EntityType,

        #[arg(long, value_name = "FILE", help = "SPARQL results JSON (stdin when omitted)")]
        input: Option<PathBuf>,
    },

    /// Classify an entity from its `get_instance` results
    Classify {
        #[arg(long, value_name = "FILE", help = "SPARQL results JSON (stdin when omitted)")]
        input: Option<PathBuf>,

        #[arg(long, value_name = "URI", help = "Entity URI to report alongside the type")]
        uri: Option<String>,
    },

    /// Print a query template with the entity id filled in
    #[command(group(ArgGroup::new("entity").required(true).args(["uri", "id"])))]
    Query {
        #[arg(long, value_name = "NAME")]
        template: String,

        #[arg(long, value_name = "URI", help = "Entity URI or page URL")]
        uri: Option<String>,

        #[arg(long, value_name = "QID", help = "Bare item id such as Q42")]
        id: Option<String>,
    },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub templates_dir: Option<PathBuf>,
    pub pretty: bool,
    pub command: Command,
}

impl AppConfig {
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let CliArgs {
            config,
            templates_dir: cli_templates_dir,
            pretty: cli_pretty,
            command,
        } = args;

        let file_config = if let Some(path) = config.as_ref() {
            load_config_file(path)?
        } else {
            PartialConfig::default()
        };

        let PartialConfig {
            templates_dir: file_templates_dir,
            pretty: file_pretty,
        } = file_config;

        let templates_dir = cli_templates_dir.or(file_templates_dir);
        let pretty = cli_pretty || file_pretty.unwrap_or(false);

        Ok(Self {
            templates_dir,
            pretty,
            command,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(dir) = self.templates_dir.as_ref() {
            anyhow::ensure!(dir.exists(), "templates directory {:?} does not exist", dir);
            anyhow::ensure!(dir.is_dir(), "templates directory {:?} is not a directory", dir);
        }
        Ok(())
    }
}

/// Item id for the `query` command, from `--uri` or `--id`
pub fn resolve_entity_id(uri: Option<&str>, id: Option<&str>) -> Result<EntityId> {
    let entity_id = match (uri, id) {
        (Some(uri), None) => EntityId::from_uri(uri)?,
        (None, Some(id)) => EntityId::parse(id)?,
        (Some(_), Some(_)) => anyhow::bail!("--uri and --id cannot be combined"),
        (None, None) => anyhow::bail!("one of --uri or --id is required"),
    };
    Ok(entity_id)
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PartialConfig {
    templates_dir: Option<PathBuf>,
    pretty: Option<bool>,
}

fn load_config_file(path: &Path) -> Result<PartialConfig> {
    if !path.exists() {
        anyhow::bail!("config file {:?} does not exist", path);
    }
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {:?}", path))?;
    let ext = path
        .extension()
        .and_then(|os| os.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let parsed = match ext.as_str() {
        "yaml" | "yml" => serde_yaml::from_str(&contents)
            .with_context(|| format!("failed to parse YAML config {:?}", path))?,
        "json" => serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse JSON config {:?}", path))?,
        other => anyhow::bail!("unsupported config extension: {other}"),
    };
    Ok(parsed)
}
