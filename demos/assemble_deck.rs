use std::{env, fs};

use anyhow::Context;
use dotenvy::dotenv;
use gslides_assembler::{assemble, markdown::render_outline, AssemblyConfig, DeckRequest, PreTagged, Presentation, TemplateCatalog};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn path_var(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let template_path = path_var("DECK_TEMPLATE", "template_presentation.json");
    let catalog_path = path_var("DECK_CATALOG", "template_catalog.json");
    let request_path = path_var("DECK_REQUEST", "deck_request.json");
    let output_path = path_var("DECK_OUTPUT", "assembled_presentation.json");

    let presentation: Presentation = serde_json::from_str(
        &fs::read_to_string(&template_path).with_context(|| format!("reading {template_path}"))?,
    )
    .with_context(|| format!("parsing {template_path}"))?;
    let catalog = TemplateCatalog::from_json_str(
        &fs::read_to_string(&catalog_path).with_context(|| format!("reading {catalog_path}"))?,
    )?;
    let request: DeckRequest = serde_json::from_str(
        &fs::read_to_string(&request_path).with_context(|| format!("reading {request_path}"))?,
    )
    .with_context(|| format!("parsing {request_path}"))?;
    let config = match env::var("DECK_CONFIG") {
        Ok(path) => AssemblyConfig::from_json_str(&fs::read_to_string(&path).with_context(|| format!("reading {path}"))?)?,
        Err(_) => AssemblyConfig::default(),
    };

    let rng = match env::var("DECK_SEED").ok().and_then(|s| s.parse().ok()) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let deck = assemble(presentation, &catalog, config, &request, &PreTagged, rng)?;
    fs::write(&output_path, &deck.bytes).with_context(|| format!("writing {output_path}"))?;
    log::info!("Wrote {} generated page(s) to {}", deck.pages_added, output_path);

    let assembled: Presentation = serde_json::from_slice(&deck.bytes)?;
    println!("{}", render_outline(&assembled));
    Ok(())
}
