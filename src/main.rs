//! Vaidya CLI entrypoint.
//!
//! ```text
//! vaidya [--filters <json>] similar <item-id>
//! vaidya [--filters <json>] history <item-id>...
//! vaidya [--filters <json>] dosha <classification> [goal]
//! vaidya [--filters <json>] hybrid <request-json>
//! vaidya [--filters <json>] search <text>...
//! vaidya goal <goal> [classification]
//! ```

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, bail};
use mimalloc::MiMalloc;
use serde_json::json;

use vaidya::config::Config;
use vaidya::embedding::{MiniLmConfig, MiniLmEncoder, StubEncoder, VectorEncoder};
use vaidya::knowledge::{Classification, DomainKnowledge, StaticKnowledge};
use vaidya::{
    Filters, HybridRequest, ItemRecord, QueryKind, Recommender, SearchHit, read_records,
};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const USAGE: &str = "usage: vaidya [--filters <json>] <similar|history|dosha|hybrid|search|goal> <args>...";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let (filters, command) = parse_args(std::env::args().skip(1).collect())?;

    let config = Config::from_env()?;
    config.validate()?;

    tracing::info!(
        embedding_dim = config.embedding_dim,
        default_limit = config.default_limit,
        "Vaidya starting"
    );

    let encoder: Arc<dyn VectorEncoder> = if let Some(path) = &config.model_path {
        Arc::new(MiniLmEncoder::load(MiniLmConfig::new(
            path.clone(),
            config.embedding_dim,
        ))?)
    } else {
        tracing::warn!("No VAIDYA_MODEL_PATH configured, running encoder in stub mode");
        Arc::new(StubEncoder::new(config.embedding_dim))
    };
    let knowledge = Arc::new(StaticKnowledge::new());
    let recommender = Arc::new(Recommender::new(
        encoder,
        Arc::clone(&knowledge) as Arc<dyn DomainKnowledge>,
        &config,
    )?);

    let catalog_path = config
        .catalog_path
        .as_deref()
        .context("VAIDYA_CATALOG_PATH must point to a catalog JSON file")?;
    let records = read_records(catalog_path)?;
    load_snapshot(&recommender, records, config.index_path.as_deref()).await?;

    let n = config.default_limit;
    let output = match command.as_slice() {
        [cmd, id] if cmd == "similar" => {
            let found = recommender.content_based(id, n, &filters)?;
            json!(recommender.describe(found)?)
        }
        [cmd, history @ ..] if cmd == "history" => {
            let found = recommender.user_based(history, n, &filters)?;
            json!(recommender.describe(found)?)
        }
        [cmd, classification, rest @ ..] if cmd == "dosha" && rest.len() <= 1 => {
            let goal = rest.first().map(String::as_str);
            let found = recommender.domain_based(classification, goal, n, &filters)?;
            json!(recommender.describe(found)?)
        }
        [cmd, request] if cmd == "hybrid" => {
            let request: HybridRequest =
                serde_json::from_str(request).context("hybrid request must be a JSON object")?;
            let found = recommender.hybrid(&request, n, &filters)?;
            json!(recommender.describe(found)?)
        }
        [cmd, words @ ..] if cmd == "search" && !words.is_empty() => {
            json!(recommender.search(&words.join(" "), QueryKind::Search, n, &filters)?)
        }
        [cmd, goal, rest @ ..] if cmd == "goal" && rest.len() <= 1 => {
            let classification = rest.first().map(String::as_str);
            let hits = recommender.domain_search(goal, classification, n)?;
            let guidance = match classification.and_then(|c| knowledge.canonical_classification(c))
            {
                Some(c) => Some(goal_guidance(&recommender, &knowledge, goal, c, &hits)?),
                None => None,
            };
            json!({ "results": hits, "guidance": guidance })
        }
        _ => bail!(USAGE),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Splits an optional leading `--filters <json>` from the command words.
fn parse_args(mut args: Vec<String>) -> anyhow::Result<(Filters, Vec<String>)> {
    if args.first().map(String::as_str) != Some("--filters") {
        return Ok((Filters::default(), args));
    }
    if args.len() < 2 {
        bail!(USAGE);
    }
    let rest = args.split_off(2);
    let filters = serde_json::from_str(&args[1]).context("--filters must be a JSON object")?;
    Ok((filters, rest))
}

/// Classification and goal advice, plus how well each hit's ingredients fit `classification`.
fn goal_guidance(
    recommender: &Recommender,
    knowledge: &StaticKnowledge,
    goal: &str,
    classification: Classification,
    hits: &[SearchHit],
) -> anyhow::Result<serde_json::Value> {
    let snapshot = recommender.snapshot()?;
    let mut fit = Vec::with_capacity(hits.len());
    for hit in hits {
        let item = snapshot.catalog().lookup_by_id(&hit.candidate.id)?;
        fit.push(json!({
            "id": item.id,
            "compatibility": knowledge.compatibility_score(&item.tags, classification),
        }));
    }

    let goal_profile = knowledge.goal_profile(goal, classification);
    if goal_profile.is_none() {
        tracing::warn!(goal = %goal, "Goal has no built-in guidance");
    }

    Ok(json!({
        "classification": knowledge.classification_profile(classification),
        "goal": goal_profile,
        "known_goals": knowledge.goals().collect::<Vec<_>>(),
        "ingredient_fit": fit,
    }))
}

/// Restores from a saved index when possible, otherwise encodes the catalog and saves.
async fn load_snapshot(
    recommender: &Arc<Recommender>,
    records: Vec<ItemRecord>,
    index_path: Option<&Path>,
) -> anyhow::Result<()> {
    let Some(path) = index_path else {
        recommender.reload_blocking(records).await?;
        return Ok(());
    };

    if path.exists() {
        match recommender.restore(records.clone(), path) {
            Ok(_) => return Ok(()),
            Err(e) => tracing::warn!(
                path = %path.display(),
                error = %e,
                "Saved index unusable, re-encoding catalog"
            ),
        }
    }

    recommender.reload_blocking(records).await?;
    recommender.save_index(path)?;
    Ok(())
}
