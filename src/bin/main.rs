use clap::Parser;
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};
use rijm_core::config::load_config;
use rijm_core::{generate_flow_variations, RhymeCandidate, RhymeEngine, SlangTerm};
use std::io::{stdin, stdout, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rijmhulp")]
#[command(author, version, about = "Rhyme, flow and slang assistant for Dutch lyrics")]
struct Cli {
    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Tempo for flow analysis (overrides config)
    #[arg(long)]
    bpm: Option<u32>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let default_filter = format!("rijmhulp={},rijm_core={},warn", log_level, log_level);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(bpm) = cli.bpm {
        config.bpm = bpm;
    }

    let mut engine = RhymeEngine::from_config(&config);
    let mut verse: Vec<String> = Vec::new();
    let mut status = String::from("Typ een regel en druk op [Enter].");

    loop {
        let rhymes = verse.last().map(|l| engine.suggest(l)).unwrap_or_default();
        print_ui(&engine, &verse, &rhymes, &status)?;

        let mut input = String::new();
        if stdin().read_line(&mut input)? == 0 {
            break;
        }
        let cmd = input.trim();

        status = match cmd {
            "exit" => break,
            "" => String::new(),
            ":flow" => {
                let flow = engine.analyze_flow(&verse);
                format!("Lettergrepen {:?}: {}", flow.syllables, flow.suggestion_text())
            }
            ":var" => match verse.last() {
                Some(line) => generate_flow_variations(line).join("\n  "),
                None => "Nog geen regels.".to_string(),
            },
            ":undo" => {
                verse.pop();
                String::new()
            }
            s if s.starts_with(":bpm ") => match s[5..].trim().parse() {
                Ok(bpm) => {
                    engine.set_bpm(bpm);
                    format!("BPM staat op {}", bpm)
                }
                Err(_) => "Gebruik: :bpm <getal>".to_string(),
            },
            s if s.starts_with(":slang ") => describe_slang(&engine, s[7..].trim()),
            s if s.starts_with(":learn ") => learn(&mut engine, &s[7..]),
            s if s.starts_with(":forget ") => {
                let term = s[8..].trim();
                match engine.remove_slang_term(term) {
                    Ok(()) => format!("'{}' vergeten", term),
                    Err(e) => format!("'{}' vergeten, maar niet opgeslagen: {}", term, e),
                }
            }
            line => {
                verse.push(line.to_string());
                unknown_words(&engine, line)
            }
        };
    }

    Ok(())
}

fn describe_slang(engine: &RhymeEngine, word: &str) -> String {
    let detection = engine.detect_slang(word);
    match (detection.is_slang, detection.term) {
        (true, Some(term)) => format!(
            "{} = {} ({:.0}%)",
            term.term,
            term.meaning,
            detection.confidence * 100.0
        ),
        (true, None) => format!(
            "'{}' is onbekend. Leer het met :learn {} = <betekenis>",
            word, word
        ),
        (false, _) => format!("'{}' is geen slang", word),
    }
}

fn learn(engine: &mut RhymeEngine, spec: &str) -> String {
    let Some((term, meaning)) = spec.split_once('=') else {
        return "Gebruik: :learn <woord> = <betekenis>".to_string();
    };
    let mut slang = SlangTerm::new(term.trim(), meaning.trim(), 1.0);
    slang.added_by = Some("user".to_string());
    match engine.add_slang_term(slang) {
        Ok(()) => format!("'{}' geleerd", term.trim()),
        Err(e) => format!("'{}' geleerd, maar niet opgeslagen: {}", term.trim(), e),
    }
}

fn unknown_words(engine: &RhymeEngine, line: &str) -> String {
    let unknown: Vec<&str> = line
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| !w.is_empty())
        .filter(|w| {
            let d = engine.detect_slang(w);
            d.is_slang && d.term.is_none()
        })
        .collect();
    if unknown.is_empty() {
        String::new()
    } else {
        format!("Onbekend: {}  (:learn <woord> = <betekenis>)", unknown.join(", "))
    }
}

fn print_ui(
    engine: &RhymeEngine,
    verse: &[String],
    rhymes: &[RhymeCandidate],
    status: &str,
) -> std::io::Result<()> {
    let mut out = stdout();
    execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;

    println!("{}", "Rijmhulp".bold());
    println!("---------------------------------------------------------------");
    println!(":flow  :var  :undo  :bpm <n>  :slang <w>  :learn <w> = <betekenis>  :forget <w>");
    println!("exit\n");
    println!("BPM: {}", engine.bpm());

    for (i, line) in verse.iter().enumerate() {
        println!("{:>3}  {}", i + 1, line);
    }

    if !rhymes.is_empty() {
        println!("\n{}", "Rijmen:".bold());
        for candidate in rhymes {
            let label = format!("{:<14}", candidate.text);
            let label = match candidate.rhyme_type {
                rijm_core::RhymeType::Perfect => label.green(),
                rijm_core::RhymeType::Multisyllabic => label.cyan(),
                rijm_core::RhymeType::Assonance => label.yellow(),
                rijm_core::RhymeType::Alliteration => label.dark_grey(),
            };
            println!(
                "  {} {:<13} {:.1}  ({} lettergr.)",
                label, candidate.rhyme_type, candidate.score, candidate.meter_info.syllables
            );
        }
    }

    if !status.is_empty() {
        println!("\n{}", status);
    }
    print!("\n> ");
    out.flush()
}
