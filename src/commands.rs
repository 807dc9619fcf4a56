//! Subcommand handlers.
//!
//! Pipeline failures are printed as a JSON [`WireError`] and turn into a
//! non-zero exit code. Only local I/O problems surface as `anyhow` errors.

use std::path::Path;
use std::process::ExitCode;
use std::str::FromStr;

use anyhow::Context;
use serde::Serialize;
use serde_json::json;
use tokio::task::JoinSet;
use tracing::{debug, info};

use selectorlab_assistant_bridge::{AssistantBridge, ConnectivityProbe, discover};
use selectorlab_config::Config;
use selectorlab_protocols::error::ErrorKind;
use selectorlab_protocols::types::{ExtractionMode, Locator};
use selectorlab_protocols::wire::{SelectorTestRequest, SelectorTestResponse, WireError};
use selectorlab_session::{SessionContext, export_payload, import_payload};
use selectorlab_tools_inspect::{InspectedDocument, Synthesizer};
use selectorlab_tools_web::{FetchProxy, Retriever, Verifier, verify_html};

use crate::cli::Commands;

pub(crate) async fn run(command: Commands, config: &Config) -> anyhow::Result<ExitCode> {
    match command {
        Commands::Fetch { url, output } => fetch(config, &url, output.as_deref()).await,
        Commands::Verify {
            url,
            expression,
            mode,
            field,
        } => verify(config, url, expression, &mode, field).await,
        Commands::VerifySet { payload, url } => verify_set(config, &payload, url).await,
        Commands::Synthesize { url, expression } => synthesize(config, &url, &expression).await,
        Commands::Generate { url, intent, save } => {
            generate(config, &url, &intent, save.as_deref()).await
        }
        Commands::Refine {
            url,
            field,
            expression,
        } => refine(config, &url, &field, &expression).await,
        Commands::Probe { discover } => probe(config, discover).await,
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn report(error: WireError) -> anyhow::Result<ExitCode> {
    print_json(&error)?;
    Ok(ExitCode::FAILURE)
}

fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

async fn fetch(config: &Config, url: &str, output: Option<&Path>) -> anyhow::Result<ExitCode> {
    let proxy = FetchProxy::new(Retriever::from_config(&config.network));
    let document = match proxy.fetch_for_embedding(url).await {
        Ok(document) => document,
        Err(e) => return report(WireError::from(&e)),
    };

    match output {
        Some(path) => {
            std::fs::write(path, &document.rewritten_markup)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(url = %document.final_url, path = %path.display(), "Saved proxied page");
        }
        None => println!("{}", document.rewritten_markup),
    }
    Ok(ExitCode::SUCCESS)
}

async fn verify(
    config: &Config,
    url: String,
    expression: String,
    mode: &str,
    field_name: Option<String>,
) -> anyhow::Result<ExitCode> {
    let extraction_mode = match ExtractionMode::from_str(mode) {
        Ok(mode) => mode,
        Err(e) => return report(WireError::from(&e)),
    };

    let verifier = Verifier::from_config(&config.network, &config.verify);
    let response = verifier
        .handle(&SelectorTestRequest {
            url,
            expression,
            extraction_mode,
            field_name,
        })
        .await;
    print_json(&response)?;
    Ok(exit_code(response.success))
}

/// Verify all locators of a payload concurrently.
///
/// Results come back in completion order and are reconciled by field name.
async fn verify_set(config: &Config, path: &Path, url: Option<String>) -> anyhow::Result<ExitCode> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let set = match import_payload(&text) {
        Ok(set) => set,
        Err(e) => return report(WireError::from(&e).with_input(path.display().to_string())),
    };
    let url = url.unwrap_or_else(|| set.target_url.clone());

    let locators: Vec<Locator> = set
        .item_container
        .iter()
        .chain(set.pagination.iter())
        .chain(set.fields())
        .cloned()
        .collect();

    let session = SessionContext::new();
    let verifier = Verifier::from_config(&config.network, &config.verify);
    let mut tasks = JoinSet::new();
    for locator in &locators {
        let ticket = session.issue_ticket(Some(locator.name()));
        let request = SelectorTestRequest {
            url: url.clone(),
            expression: locator.expression(),
            extraction_mode: locator.mode().clone(),
            field_name: Some(locator.name().to_string()),
        };
        let verifier = verifier.clone();
        tasks.spawn(async move { (ticket, verifier.handle(&request).await) });
    }

    let mut responses = Vec::with_capacity(locators.len());
    while let Some(joined) = tasks.join_next().await {
        let (ticket, response) = joined.context("Verification task failed")?;
        if session.accepts(&ticket) {
            responses.push(response);
        } else {
            debug!(field = ?ticket.field_name, "Dropping result from a previous session");
        }
    }
    let responses = in_locator_order(responses, &locators);

    let success = responses.iter().all(|r| r.success);
    print_json(&json!({ "target_url": url, "results": responses }))?;
    Ok(exit_code(success))
}

/// Reorder completion-ordered responses to follow `locators` by field name.
///
/// Responses without a matching locator go last, in arrival order.
fn in_locator_order(
    mut responses: Vec<SelectorTestResponse>,
    locators: &[Locator],
) -> Vec<SelectorTestResponse> {
    responses.sort_by_key(|r| {
        locators
            .iter()
            .position(|l| r.field_name.as_deref() == Some(l.name()))
            .unwrap_or(usize::MAX)
    });
    responses
}

async fn synthesize(config: &Config, url: &str, expression: &str) -> anyhow::Result<ExitCode> {
    let retriever = Retriever::from_config(&config.network);
    let page = match retriever.retrieve_html(url).await {
        Ok(page) => page,
        Err(e) => return report(WireError::from(&e)),
    };

    let synthesizer = Synthesizer::new(config.inspect.excluded_classes.iter().cloned());
    match synthesize_path(
        page.final_url.as_str(),
        &page.body,
        expression,
        &synthesizer,
        config.verify.preview_chars,
    ) {
        Ok(result) => {
            print_json(&result)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => report(e),
    }
}

/// Treat the first match of `expression` as the clicked element and
/// synthesize its path, checking the path against the same markup.
fn synthesize_path(
    url: &str,
    markup: &str,
    expression: &str,
    synthesizer: &Synthesizer,
    preview_chars: usize,
) -> Result<serde_json::Value, WireError> {
    let document = InspectedDocument::load(url, markup).map_err(|e| WireError::from(&e))?;
    let access = document.access(url).map_err(|e| WireError::from(&e))?;
    let clicked = access
        .first_match(expression)
        .map_err(|e| WireError::from(&e))?
        .ok_or_else(|| {
            WireError::new(
                ErrorKind::SynthesisInput,
                format!("No element matches '{}'", expression),
            )
            .with_input("expression")
        })?;

    let path = access
        .synthesize(synthesizer, clicked)
        .map_err(|e| WireError::from(&e))?;
    let locator = Locator::parse("synthesized", &path).map_err(|e| WireError::from(&e))?;
    let check = verify_html(markup, &locator, preview_chars).map_err(|e| WireError::from(&e))?;

    Ok(json!({
        "url": url,
        "clicked": expression,
        "expression": path,
        "match_count": check.match_count,
        "sample_text": check.sample_text,
    }))
}

async fn generate(
    config: &Config,
    url: &str,
    intent: &str,
    save: Option<&Path>,
) -> anyhow::Result<ExitCode> {
    let bridge = AssistantBridge::connect(config).await;
    let generated = match bridge.generate(url, intent).await {
        Ok(generated) => generated,
        Err(e) => return report(WireError::from(&e)),
    };

    if let Some(path) = save {
        let payload = match export_payload(&generated.locators) {
            Ok(payload) => payload,
            Err(e) => return report(WireError::from(&e)),
        };
        std::fs::write(path, payload)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), "Saved transfer payload");
    }

    print_json(&generated)?;
    Ok(ExitCode::SUCCESS)
}

async fn refine(
    config: &Config,
    url: &str,
    field_name: &str,
    expression: &str,
) -> anyhow::Result<ExitCode> {
    let bridge = AssistantBridge::connect(config).await;
    match bridge.refine_field(url, field_name, expression).await {
        Ok(suggestion) => {
            print_json(&suggestion)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => report(WireError::from(&e)),
    }
}

async fn probe(config: &Config, run_discovery: bool) -> anyhow::Result<ExitCode> {
    if run_discovery {
        return match discover(config).await {
            Some(endpoint) => {
                print_json(&json!({ "discovered": endpoint }))?;
                Ok(ExitCode::SUCCESS)
            }
            None => report(WireError::new(
                ErrorKind::AssistantUnavailable,
                "No assistant endpoint reachable",
            )),
        };
    }

    let result = ConnectivityProbe::from_config(config)
        .probe(&config.assistant.endpoint_url)
        .await;
    print_json(&result)?;
    Ok(exit_code(result.reachable))
}
