use std::io::Write as _;
use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use deskmate_actions::ActionExecutor;
use deskmate_chat::{CancelFlag, ChatClient, ChatError, GREETING};
use deskmate_core::{ActionRunner, Coordinator, TurnEvent, TurnResult};

mod config;

use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    println!("╔════════════════════════════════════════╗");
    println!("║   Deskmate - your local desk buddy     ║");
    println!("╚════════════════════════════════════════╝");
    println!();

    let mut config = Config::load()?;

    let client = ChatClient::new(config.backend_url.clone(), config.model.clone());
    if config.auto_start_backend {
        if let Err(e) = client.manager().ensure_running().await {
            eprintln!("⚠️  {e}");
        }
    }

    let runner: Arc<dyn ActionRunner> = Arc::new(ActionExecutor::new());
    let mut coordinator = Coordinator::new(client, runner);

    println!("{GREETING}");
    println!("(commands: /clear, /models, /model <name>, /quit - Ctrl+C cancels a reply)");
    println!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("you> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim().to_string();
        if line.is_empty() {
            continue;
        }

        match line.as_str() {
            "/quit" | "/exit" => break,
            "/clear" => {
                coordinator.clear();
                println!("(conversation cleared)");
                println!("{GREETING}");
                continue;
            }
            "/models" => {
                print_models(&coordinator).await;
                continue;
            }
            _ if line.starts_with("/model ") => {
                let name = line["/model ".len()..].trim().to_string();
                if name.is_empty() {
                    println!("usage: /model <name>");
                } else {
                    switch_model(&mut coordinator, &mut config, name)?;
                }
                continue;
            }
            _ if line.starts_with('/') => {
                println!("unknown command: {line}");
                continue;
            }
            _ => {}
        }

        match run_turn(&mut coordinator, &line).await {
            Ok(TurnResult::Completed { .. }) => {}
            Ok(TurnResult::Cancelled) => println!("\n(cancelled)"),
            Ok(TurnResult::ModelUnavailable { installed }) => {
                println!(
                    "\n🤔 Model '{}' isn't installed.",
                    coordinator.client().model()
                );
                if let Some(choice) = pick_model(&installed, &mut lines).await? {
                    switch_model(&mut coordinator, &mut config, choice)?;
                    println!("(try your message again)");
                }
            }
            Err(e) => report_chat_error(&e),
        }
    }

    println!("Bye! 👋");
    Ok(())
}

/// Run one turn, printing fragments and action results as they arrive.
/// Ctrl+C while the reply streams sets the cancel flag instead of
/// quitting the program.
async fn run_turn(coordinator: &mut Coordinator, text: &str) -> Result<TurnResult, ChatError> {
    let cancel = CancelFlag::new();
    let (tx, mut rx) = mpsc::channel::<TurnEvent>(32);

    let printer = tokio::spawn(async move {
        let mut printed_any = false;
        while let Some(event) = rx.recv().await {
            match event {
                TurnEvent::Fragment(text) => {
                    if !printed_any {
                        print!("deskmate> ");
                        printed_any = true;
                    }
                    print!("{text}");
                    let _ = std::io::stdout().flush();
                }
                TurnEvent::ActionResult { result, .. } => {
                    println!("⚡ {result}");
                }
            }
        }
        if printed_any {
            println!();
        }
    });

    // Inner block ends the turn future's borrow of `tx` before the drop.
    let result = {
        let turn = coordinator.run_turn(text, &cancel, &tx);
        tokio::pin!(turn);
        loop {
            tokio::select! {
                res = &mut turn => break res,
                _ = tokio::signal::ctrl_c() => {
                    cancel.cancel();
                }
            }
        }
    };

    drop(tx);
    let _ = printer.await;
    result
}

async fn print_models(coordinator: &Coordinator) {
    let models = coordinator.client().manager().list_models().await;
    if models.is_empty() {
        println!("(no models installed, or backend unreachable)");
        return;
    }
    println!("installed models:");
    for name in models {
        let marker = if name == coordinator.client().model() {
            " (current)"
        } else {
            ""
        };
        println!("  {name}{marker}");
    }
}

/// Numbered picker over the installed models; empty input skips.
async fn pick_model(
    installed: &[String],
    lines: &mut Lines<BufReader<Stdin>>,
) -> Result<Option<String>> {
    println!("Installed models:");
    for (i, name) in installed.iter().enumerate() {
        println!("  {}. {name}", i + 1);
    }
    print!("pick one (1-{}, blank to skip): ", installed.len());
    std::io::stdout().flush()?;

    let Some(line) = lines.next_line().await? else {
        return Ok(None);
    };
    let choice = line.trim();
    if choice.is_empty() {
        return Ok(None);
    }
    match choice.parse::<usize>() {
        Ok(n) if (1..=installed.len()).contains(&n) => Ok(Some(installed[n - 1].clone())),
        _ => {
            println!("(that wasn't one of the options)");
            Ok(None)
        }
    }
}

fn switch_model(
    coordinator: &mut Coordinator,
    config: &mut Config,
    model: String,
) -> Result<()> {
    println!("(switching to '{model}')");
    config.model = model.clone();
    config.save()?;
    coordinator.set_client(ChatClient::new(config.backend_url.clone(), model));
    Ok(())
}

fn report_chat_error(err: &ChatError) {
    match err {
        ChatError::Unreachable(_) | ChatError::Timeout => {
            eprintln!("❌ {err}");
            eprintln!("💡 Is Ollama running? Try 'ollama serve'.");
        }
        _ => eprintln!("❌ {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn run_turn_reports_unreachable_backend() {
        // Nothing listens on this port; the turn fails fast and the
        // fragment channel is torn down cleanly.
        let runner: Arc<dyn ActionRunner> = Arc::new(ActionExecutor::new());
        let mut coordinator =
            Coordinator::new(ChatClient::new("http://127.0.0.1:1", "test-model"), runner);
        let result = run_turn(&mut coordinator, "hello").await;
        assert!(matches!(result, Err(ChatError::Unreachable(_))));
    }
}
