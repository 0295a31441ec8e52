//! `chalkmate discuss`: interactive or single-question classroom mode.

use chalkmate_classroom::{
    default_roster, ConversationContext, DiscussionLoop, KnowledgeIndex, ResponseEngine,
    SpeakerController, TurnOutcome,
};
use chalkmate_config::AppConfig;

const DEFAULT_QUESTION: &str = "你好，请介绍一下C语言的指针。";

pub async fn run(
    message: Option<String>,
    seed: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    // Check for an API key early and give a clear error
    if !config.has_api_key() {
        eprintln!();
        eprintln!("  ERROR: No API key configured!");
        eprintln!();
        eprintln!("  Set one of these environment variables:");
        eprintln!("    CHALKMATE_API_KEY = 'sk-...'");
        eprintln!("    OPENAI_API_KEY    = 'sk-...'");
        eprintln!();
        eprintln!("  Or add it to your config file:");
        eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    }

    let service = chalkmate_providers::build_from_config(&config)?;

    let context = ConversationContext::new(KnowledgeIndex::course_c_programming());
    let mut controller = SpeakerController::new(
        default_roster(),
        service.clone(),
        config.default_temperature,
        config.history_window,
    );
    if let Some(seed) = seed {
        controller = controller.with_seed(seed);
    }
    let engine = ResponseEngine::new(
        service,
        config.default_temperature,
        config.reply_temperature,
        config.history_window,
    );

    let mut discussion = DiscussionLoop::new(context, controller, engine);

    if let Some(question) = message {
        // Single-question mode: one student turn, one persona turn.
        discussion.student_says(&question);
        eprint!("  Thinking...");
        let outcome = discussion.step().await?;
        eprint!("\r             \r");
        print_outcome(&outcome);
        return Ok(());
    }

    // Interactive mode
    println!();
    println!("  === chalkmate — C Programming Lab (interactive) ===");
    println!();
    println!("  Model:   {}", config.model);
    println!("  Roster:  Insight Sparker, Critical Challenger, Fundamentals Checker, Synthesis Expert");
    println!();
    println!("  Type a question and press Enter to open the discussion.");
    println!("  After each reply: type to interject, press Enter to stay");
    println!("  silent (the assistants keep talking), or type 'q' to quit.");
    println!();

    let first = read_line("  You > ")?;
    let first = if first.trim().is_empty() {
        DEFAULT_QUESTION.to_string()
    } else {
        first
    };
    discussion.student_says(&first);

    loop {
        eprint!("  ...");
        let outcome = match discussion.step().await {
            Ok(outcome) => outcome,
            Err(e) => {
                eprint!("\r     \r");
                eprintln!("  [Error] {e}");
                break;
            }
        };
        eprint!("\r     \r");
        print_outcome(&outcome);

        let input = read_line("  You (Enter to stay silent, 'q' to quit) > ")?;
        let input = input.trim();

        if input.eq_ignore_ascii_case("q") {
            println!("  Leaving the discussion.");
            break;
        }
        if input.is_empty() {
            println!("  (staying silent — the assistants continue)");
            continue;
        }
        discussion.student_says(input);
    }

    Ok(())
}

fn print_outcome(outcome: &TurnOutcome) {
    println!();
    println!("  [{} — {}]", outcome.persona, outcome.assessment.readout());
    for line in outcome.reply.lines() {
        println!("  {} > {line}", outcome.persona);
    }
    println!();
}

fn read_line(prompt: &str) -> std::io::Result<String> {
    use std::io::Write;
    print!("{prompt}");
    std::io::stdout().flush()?;
    let mut buf = String::new();
    std::io::stdin().read_line(&mut buf)?;
    Ok(buf.trim_end_matches(['\r', '\n']).to_string())
}
