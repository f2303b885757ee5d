use colored::*;
use console::Term;
use dialoguer::{ theme::ColorfulTheme, Select };
use indicatif::{ ProgressBar, ProgressStyle };
use std::time::Duration;
use textwrap::wrap;

use ptltl_bench::models::common::Domain;
use ptltl_bench::models::record::SuccessTally;
use ptltl_bench::models::verification::EquivalenceVerdict;

/// UI theme for consistent appearance
pub fn get_theme() -> ColorfulTheme {
    ColorfulTheme::default()
}

/// Print a section header
pub fn print_header(title: &str) {
    let title = format!(" {} ", title);
    println!("\n{}\n", title.bold().white().on_blue());
}

/// Print text wrapped to the terminal width
pub fn print_text(text: &str) {
    let width = Term::stdout().size().1 as usize;
    for line in text.lines() {
        if line.is_empty() {
            println!();
            continue;
        }
        for wrapped_line in wrap(line, width.saturating_sub(4).max(20)) {
            println!("{}", wrapped_line);
        }
    }
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "ERROR:".red().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "WARNING:".yellow().bold(), message);
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "SUCCESS:".green().bold(), message);
}

/// Print information
pub fn print_info(message: &str) {
    println!("{} {}", "INFO:".blue().bold(), message);
}

/// Print a formatted result
pub fn print_result(label: &str, value: &str) {
    println!("{}: {}", label.bold(), value);
}

/// Spinner shown while a single long call is in flight
pub fn spinner_with_message(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Print an equivalence verdict with color
pub fn print_verdict(verdict: &EquivalenceVerdict) {
    match verdict {
        EquivalenceVerdict::Equivalent => println!("{}", "✓ Equivalent".green().bold()),
        EquivalenceVerdict::NotEquivalent => println!("{}", "✗ Not equivalent".red().bold()),
        EquivalenceVerdict::Inconclusive(reason) => {
            println!("{}", format!("? Inconclusive - {}", reason).yellow().bold())
        }
    }
}

/// Print the counters of a finished run
pub fn print_tally(tally: &SuccessTally) {
    print_result("Equivalent / conclusive", &tally.ratio());
    print_result("Inconclusive", &tally.inconclusive.to_string());
    if let Some(accuracy) = tally.accuracy() {
        print_result("Accuracy", &format!("{:.1}%", accuracy * 100.0));
    }
}

/// Interactive selection among the registered domains
pub fn select_domain(registered: &[String]) -> std::io::Result<Domain> {
    let labels: Vec<String> = registered
        .iter()
        .map(|key| key.parse::<Domain>().map(|d| d.to_string()).unwrap_or_else(|_| key.clone()))
        .collect();

    let selection = Select::with_theme(&get_theme())
        .with_prompt("Select use case")
        .items(&labels)
        .default(0)
        .interact()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    registered[selection]
        .parse::<Domain>()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))
}
