//! `vitae doctor` — Diagnose configuration, documents, and credentials.

use std::path::PathBuf;

use vitae_core::provider::Provider;
use vitae_knowledge::KnowledgeBase;
use vitae_providers::OpenAiCompatProvider;

pub async fn run(config_path: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    println!("🩺 Vitae Doctor — Deployment Diagnostics");
    println!("========================================\n");

    let mut issues = 0;

    // Check config
    let config = match super::load_config(config_path) {
        Ok(config) => {
            println!("  ✅ Configuration valid");
            println!("     Persona: {}", config.persona.name);
            println!(
                "     Model:   {} @ {}",
                config.provider.model, config.provider.base_url
            );
            config
        }
        Err(e) => {
            println!("  ❌ Configuration invalid: {e}");
            println!();
            println!("  ⚠️  1 issue(s) found. See above for details.");
            return Ok(());
        }
    };

    // Check API key
    if config.has_api_key() {
        println!("  ✅ API key configured");
    } else {
        println!("  ⚠️  No API key — set GROQ_API_KEY or add api_key to vitae.toml");
        issues += 1;
    }

    // Check each configured document
    let documents = super::document_set(&config);
    for path in documents
        .pdfs
        .iter()
        .chain(&documents.texts)
        .chain(&documents.images)
    {
        if path.exists() {
            println!("  ✅ Document found: {}", path.display());
        } else {
            println!("  ❌ Document missing: {}", path.display());
            issues += 1;
        }
    }

    let knowledge = KnowledgeBase::load(&documents);
    if knowledge.is_empty() {
        println!("  ⚠️  Knowledge base is empty — the assistant has nothing to draw on");
        issues += 1;
    } else {
        println!(
            "  ✅ Knowledge base: {} chars of text, {} image(s)",
            knowledge.text.chars().count(),
            knowledge.image_paths.len()
        );
    }

    // Check notification channel
    if config.pushover.is_configured() {
        println!("  ✅ Pushover configured — contact notifications will be pushed");
    } else {
        println!("  ⚠️  Pushover not configured — notifications go to the log only");
    }

    // Check provider reachability (only when a key is present)
    if let Some(api_key) = config.provider.api_key.clone() {
        let provider = OpenAiCompatProvider::new("groq", &config.provider.base_url, api_key);
        match provider.health_check().await {
            Ok(true) => println!("  ✅ Provider reachable: {}", config.provider.base_url),
            Ok(false) => {
                println!("  ❌ Provider rejected the request: {}", config.provider.base_url);
                issues += 1;
            }
            Err(e) => {
                println!("  ❌ Provider unreachable: {e}");
                issues += 1;
            }
        }
    }

    // Summary
    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
