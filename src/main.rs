//! ClipIQ - Intelligent Clipboard Processing
//!
//! Watches a global hotkey, reads the clipboard, optionally extracts an
//! embedded `<#command>` directive and writes the model's answer back.

use anyhow::Result;
use clap::Parser;
use clipiq::clipboard::{ClipboardProvider, SystemClipboard};
use clipiq::config::Config;
use clipiq::hotkey::{self, HotkeyEvent};
use clipiq::llm::OpenAiClient;
use clipiq::processor::Processor;
use clipiq::templates::TemplateRegistry;
use std::sync::Arc;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Print the resolved configuration and exit
    #[arg(long)]
    show_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Setup logging
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config::load()?;

    if args.show_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    info!("📋 ClipIQ v{} starting...", env!("CARGO_PKG_VERSION"));

    let registry = TemplateRegistry::with_default(config.resolve_default_template());
    let model = Arc::new(OpenAiClient::new(&config));
    let processor = Processor::new(registry, model.clone());

    let mut clipboard = SystemClipboard::new()?;

    if model.health_check().await {
        info!("✅ Model endpoint reachable at {}", config.api_url);
    } else {
        warn!("⚠️ Model endpoint not reachable - processing will fall back to passthrough");
    }

    print_usage(&processor);

    let mut events = hotkey::spawn_listener();
    info!("🎯 Ready! Press Ctrl+Shift+Z to process clipboard content");
    info!("   Press Ctrl+Shift+X to exit");

    while let Some(event) = events.recv().await {
        match event {
            HotkeyEvent::Activate => {
                let original = match clipboard.read() {
                    Some(text) if !text.is_empty() => text,
                    _ => {
                        warn!("⚠️ Clipboard is empty");
                        continue;
                    }
                };

                info!("📝 Processing: {}", truncate(&original, 50));

                let outcome = processor.process(&original).await;
                for warning in &outcome.warnings {
                    warn!("   {}", warning);
                }

                match clipboard.write(&outcome.text) {
                    Ok(()) => {
                        info!("✅ Processed and copied to clipboard ({:?})", outcome.route);
                        info!("📋 Result: {}", truncate(&outcome.text, 100));
                    }
                    Err(e) => warn!("❌ Could not write clipboard: {}", e),
                }
            }
            HotkeyEvent::Exit => {
                info!("👋 Exiting ClipIQ...");
                break;
            }
        }
    }

    Ok(())
}

fn print_usage(processor: &Processor) {
    info!("🧠 Directive syntax: put <#command> anywhere in the copied text");
    info!("   <#translate to [language]>   - Translate text");
    info!("   <#explain>                   - Explain in simple terms");
    info!("   <#fix>                       - Fix errors");
    info!("   <#elaborate>                 - Add more detail");
    info!("   <#complete>                  - Complete code/text");
    info!("   <#summarize>                 - Create summary");
    info!("   <#[any instruction]>         - Custom processing");
    info!("   Plain text without a directive gets typo fixing");
    info!("   Known templates: {}", processor.available_commands().join(", "));
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let prefix: String = text.chars().take(max_chars).collect();
        format!("{prefix}...")
    }
}
