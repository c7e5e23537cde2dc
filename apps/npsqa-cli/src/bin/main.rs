use std::env;

use npsqa_core::config::Config;
use npsqa_core::traits::DocumentStore;
use npsqa_core::types::{ChatRequest, PipelineResult};
use npsqa_llm::OllamaClient;

const USAGE: &str = "Usage: npsqa <ask|detect|count|health> [args...]\n  \
ask \"<question>\" [--lang <code>] [--top-k N] [--temperature T] [--json]\n  \
detect \"<text>\"\n  count\n  health";

fn usage_exit() -> ! {
    eprintln!("{USAGE}");
    std::process::exit(1);
}

fn flag_value<'a>(args: &'a [String], i: usize, flag: &str) -> &'a str {
    match args.get(i + 1) {
        Some(v) => v.as_str(),
        None => {
            eprintln!("Error: {flag} requires a value");
            std::process::exit(1);
        }
    }
}

fn parse_ask(args: &[String]) -> (ChatRequest, bool) {
    let mut request = ChatRequest::new(String::new());
    let mut json = false;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--lang" | "-l" => {
                request.language = Some(flag_value(args, i, "--lang").to_string());
                i += 1;
            }
            "--top-k" | "-k" => {
                let Ok(k) = flag_value(args, i, "--top-k").parse::<usize>() else {
                    eprintln!("Error: --top-k requires a number");
                    std::process::exit(1);
                };
                request.top_k = k;
                i += 1;
            }
            "--temperature" | "-t" => {
                let Ok(t) = flag_value(args, i, "--temperature").parse::<f32>() else {
                    eprintln!("Error: --temperature requires a number");
                    std::process::exit(1);
                };
                request.temperature = t;
                i += 1;
            }
            "--json" => json = true,
            arg if !arg.starts_with('-') => {
                if !request.query.is_empty() {
                    request.query.push(' ');
                }
                request.query.push_str(arg);
            }
            other => {
                eprintln!("Unknown flag: {other}");
                usage_exit();
            }
        }
        i += 1;
    }
    (request, json)
}

fn print_result(result: &PipelineResult) {
    println!("{}\n", result.final_response);
    println!("Language: {} ({})", result.detected_language, result.detected_language.name());
    if let Some(q) = &result.english_query {
        println!("English query: {q}");
    }
    println!("Retrieved documents: {}", result.retrieved_count);
    for (i, source) in result.sources.iter().enumerate() {
        println!("  {}. [{}] distance={:.4}\n     {}", i + 1, source.id, source.distance, source.text);
    }
    if let Some(t) = &result.timing {
        println!(
            "Timing: total={:.2}s detect={:.2}s trans_q={:.2}s search={:.2}s llm={:.2}s trans_r={:.2}s",
            t.total, t.detection, t.translation_q, t.retrieval, t.generation, t.translation_r
        );
    }
    if let Some(e) = &result.error {
        eprintln!("Error: {e}");
    }
}

fn main() -> anyhow::Result<()> {
    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {e}");
        e
    })?;
    let settings = config.settings()?;
    npsqa_cli::init_tracing(&settings.log.level);

    let mut args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        usage_exit();
    }
    let cmd = args.remove(0);
    match cmd.as_str() {
        "ask" => {
            let (request, json) = parse_ask(&args);
            let pipeline = npsqa_cli::build_pipeline(&settings)?;
            let result = pipeline.handle(&request)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_result(&result);
            }
        }
        "detect" => {
            let text = args.join(" ");
            let lang = npsqa_cli::build_resolver(&settings).detect_language(&text);
            println!("{} ({})", lang, lang.name());
        }
        "count" => {
            let store = npsqa_vector::open_from_settings(&settings)?;
            println!("{}", store.count()?);
        }
        "health" => {
            let ollama = OllamaClient::from_settings(&settings.ollama)?;
            let ollama_ok = ollama.check_health();
            let documents = npsqa_vector::open_from_settings(&settings).and_then(|s| s.count());
            let status = if ollama_ok && documents.is_ok() { "healthy" } else { "degraded" };
            println!("status: {status}");
            println!("ollama: {} ({} @ {})", if ollama_ok { "connected" } else { "disconnected" }, ollama.model(), ollama.base_url());
            match documents {
                Ok(n) => println!("documents: {n}"),
                Err(e) => println!("documents: unavailable ({e})"),
            }
            let langs: Vec<&str> = settings.languages.supported.iter().map(|l| l.code()).collect();
            println!("languages: {}", langs.join(", "));
        }
        _ => {
            eprintln!("Unknown command: {cmd}");
            usage_exit();
        }
    }
    Ok(())
}
