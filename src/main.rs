use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use std::io::{self, Write};
use wikidata_display::{
    AppConfig, CliArgs, Command, EntityId, LoggingConfig, classify_instance_results,
    config::resolve_entity_id, format_entity, init_logging, load_results, load_templates,
    logging::command_span,
};

fn main() -> anyhow::Result<()> {
    let logging_config = LoggingConfig::from_env();
    let _guard = init_logging(logging_config)?;

    let cli = CliArgs::parse();
    let config = AppConfig::from_args(cli)?;

    // Fail fast on bad configuration
    config.validate()?;

    run(config)
}

fn run(config: AppConfig) -> anyhow::Result<()> {
    match &config.command {
        Command::Format { entity_type, input } => {
            let _span = command_span("format").entered();
            let results = load_results(input.as_deref()).context("failed to read SPARQL results")?;
            let document = format_entity(*entity_type, &results)
                .with_context(|| format!("failed to format {entity_type} results"))?;
            tracing::info!(
                %entity_type,
                title = %document.title,
                labels = document.entries.len(),
                "formatted entity"
            );
            write_json(&document, config.pretty)
        }
        Command::Classify { input, uri } => {
            let _span = command_span("classify").entered();
            let results = load_results(input.as_deref()).context("failed to read SPARQL results")?;
            let entity_type = classify_instance_results(&results)?;
            let id = uri.as_deref().map(EntityId::from_uri).transpose()?;
            write_json(
                &serde_json::json!({ "id": id, "entity_type": entity_type }),
                config.pretty,
            )
        }
        Command::Query { template, uri, id } => {
            let _span = command_span("query").entered();
            let id = resolve_entity_id(uri.as_deref(), id.as_deref())?;
            let templates = load_templates(config.templates_dir.as_deref())
                .context("failed to load query templates")?;
            let query = templates.render(template, id.as_str())?;
            let mut stdout = io::stdout().lock();
            stdout.write_all(query.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}

fn write_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut stdout, value)?;
    } else {
        serde_json::to_writer(&mut stdout, value)?;
    }
    writeln!(stdout)?;
    Ok(())
}
