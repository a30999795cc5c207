//! `vitae chat` — Interactive or single-message chat mode.

use std::io::Write;
use std::path::PathBuf;

use vitae_agent::FALLBACK_ANSWER;
use vitae_core::error::EngineError;
use vitae_core::message::Message;

pub async fn run(
    config_path: Option<PathBuf>,
    message: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path)?;
    let notifier = super::build_notifier(&config);
    let assistant = super::build_assistant(&config, notifier)?;

    if let Some(msg) = message {
        // Single message mode
        eprint!("  Thinking...");
        let reply = match assistant.respond(&msg, &[]).await {
            Ok(answer) => answer,
            Err(EngineError::LoopBoundExceeded { .. }) => FALLBACK_ANSWER.to_string(),
            Err(e) => {
                eprint!("\r              \r");
                return Err(e.into());
            }
        };
        eprint!("\r              \r");
        println!("{reply}");
        return Ok(());
    }

    // Interactive mode
    let name = assistant.persona_name().to_string();
    println!();
    println!("  Chat with {name}");
    println!("  Ask about professional background, skills, and experience.");
    println!();
    println!("  Type your message and press Enter.");
    println!("  Type 'exit' or Ctrl+C to quit.");
    println!();

    let stdin = std::io::stdin();
    let mut history: Vec<Message> = Vec::new();

    loop {
        print!("  You > ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break; // EOF
        }
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        if text.eq_ignore_ascii_case("exit") || text.eq_ignore_ascii_case("quit") {
            break;
        }

        eprint!("  ...");

        match assistant.respond(text, &history).await {
            Ok(answer) => {
                eprint!("\r     \r");
                println!();
                for line in answer.lines() {
                    println!("  {name} > {line}");
                }
                println!();
                history.push(Message::user(text));
                history.push(Message::assistant(&answer));
            }
            Err(EngineError::LoopBoundExceeded { rounds }) => {
                eprint!("\r     \r");
                tracing::warn!(rounds, "turn hit the model-call bound");
                println!();
                println!("  {name} > {FALLBACK_ANSWER}");
                println!();
            }
            Err(e) => {
                eprint!("\r     \r");
                eprintln!("  [Error] {e}");
                println!();
            }
        }
    }

    println!();
    println!("  Goodbye! 👋");
    println!();

    Ok(())
}
