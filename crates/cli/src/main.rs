//! Interactive assistant entry point
//!
//! Wires the catalog, retriever, generator and advisor together and runs
//! the line-based conversation loop. Exit tokens in either language end
//! the session without a round trip through the advisor.

use std::io::Write;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use advisor_agent::{is_exit_command, Advisor, GenerationChain, IntentClassifier};
use advisor_config::{load_settings, IntentPatterns, Keywords, Settings};
use advisor_core::{Catalog, Language};
use advisor_llm::{GeminiBackend, GeneratorConfig, TextGenerator};
use advisor_rag::{EmbedderConfig, HttpEmbedder, SemanticRetriever};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Tracing not yet initialized; early failures go to stderr.
    let settings = match load_settings(None) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Warning: failed to load settings: {e}. Using defaults.");
            Settings::default()
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    tracing::info!("Starting product advisor v{}", env!("CARGO_PKG_VERSION"));

    let mut advisor = build_advisor(&settings)?;

    print_banner();

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        print!("Вие: ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            // EOF
            println!("\n[BOT] {}", advisor_agent::messages::goodbye(Language::Bulgarian));
            break;
        };
        let input = line.trim().to_string();

        if is_exit_command(&input) {
            println!("\n[BOT] {}", advisor_agent::messages::goodbye(advisor.context().language));
            break;
        }

        if input.is_empty() {
            continue;
        }

        let response = advisor.generate_response(&input).await;
        println!("\n[BOT] Фибанк асистент:");
        println!("{response}");
        println!("\n{}", "-".repeat(60));
    }

    Ok(())
}

/// Construct the advisor from settings. A missing catalog is fatal;
/// everything else degrades.
fn build_advisor(settings: &Settings) -> anyhow::Result<Advisor> {
    let catalog = Arc::new(Catalog::load(
        &settings.data.cards_path,
        &settings.data.loans_path,
    )?);
    tracing::info!(products = catalog.len(), "Knowledge base loaded");

    let embedder = Arc::new(HttpEmbedder::new(EmbedderConfig::from(&settings.embedding))?);
    let retriever = Arc::new(SemanticRetriever::new(Arc::clone(&catalog), embedder));

    let generator_config = GeneratorConfig::from(&settings.generation);
    let generator: Option<Arc<dyn TextGenerator>> = match GeminiBackend::new(generator_config) {
        Ok(backend) if backend.is_available() => {
            tracing::info!(model = backend.model_name(), "Generative backend configured");
            Some(Arc::new(backend))
        }
        Ok(_) => {
            tracing::warn!("Generative backend not available, running in fallback mode");
            None
        }
        Err(e) => {
            tracing::warn!(error = %e, "Generative backend setup failed, running in fallback mode");
            None
        }
    };

    let classifier = IntentClassifier::new(IntentPatterns::load_or_default(&settings.intents_path));
    let keywords = Keywords::load_or_default(&settings.keywords_path);
    let chain = GenerationChain::new(generator, retriever, settings.retrieval.clone());

    Ok(Advisor::new(catalog, classifier, keywords, chain))
}

fn print_banner() {
    println!("=== ФИБАНК ВИРТУАЛЕН АСИСТЕНТ ===");
    println!("Добре дошли във виртуалния асистент на Fibank!");
    println!("Мога да ви помогна с информация за нашите кредитни карти и кредити.");
    println!("Можете да задавате въпроси на български или английски език.");
    println!("Напишете 'quit', 'exit' или 'довиждане' за край.");
    println!();
    println!("Съвет: опитайте 'Какви кредитни карти предлагате?' или 'Разкажете ми за кредитите'");
    println!();
}
