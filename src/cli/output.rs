use crate::checker::suggestions::Suggestion;
use crate::{CheckResult, WordReport, WordStatus};
use anyhow::{Context, Result};
use colored::*;
use dialoguer::Input;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonFrequency<'a> {
    word: &'a str,
    frequency: Option<u64>,
    error: Option<String>,
}

pub fn print_reports(result: &CheckResult, colored_output: bool, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for report in &result.reports {
                print_text_report(report, colored_output);
            }
            Ok(())
        }
        OutputFormat::Json => print_json(result),
    }
}

pub fn print_text_report(report: &WordReport, colored_output: bool) {
    let status = match report.status {
        WordStatus::Known => format!("known (frequency {})", report.frequency),
        WordStatus::Unknown => "unknown".to_string(),
        WordStatus::Ignored => "ignored".to_string(),
        WordStatus::Empty => "no letters".to_string(),
    };

    if colored_output {
        let word = match report.status {
            WordStatus::Known => report.word.green().bold(),
            WordStatus::Unknown => report.word.red().bold(),
            _ => report.word.dimmed(),
        };
        println!("{} {}", word, status.dimmed());
    } else {
        println!("{} {}", report.word, status);
    }

    if matches!(report.status, WordStatus::Ignored | WordStatus::Empty) {
        return;
    }

    if report.suggestions.is_empty() {
        if colored_output {
            println!("    {} {}", "→".dimmed(), "no suggestions".yellow());
        } else {
            println!("    → no suggestions");
        }
        return;
    }

    let separator = if colored_output {
        ", ".dimmed().to_string()
    } else {
        ", ".to_string()
    };
    let suggestions = report
        .suggestions
        .iter()
        .map(|s| format_suggestion(s, colored_output))
        .collect::<Vec<_>>()
        .join(&separator);

    if colored_output {
        println!("    {} {}", "→".dimmed(), suggestions);
    } else {
        println!("    → {}", suggestions);
    }
}

fn format_suggestion(suggestion: &Suggestion, colored: bool) -> String {
    let detail = format!(
        "({}, {})",
        suggestion.edit_distance(),
        suggestion.frequency()
    );
    if colored {
        let word = match suggestion.edit_distance() {
            0 => suggestion.word().green().bold(),
            1 => suggestion.word().green(),
            _ => suggestion.word().yellow(),
        };
        format!("{} {}", word, detail.dimmed())
    } else {
        format!("{} {}", suggestion.word(), detail)
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

/// Print `frequency_of` results; a lookup error is shown in place of the count.
pub fn print_frequencies(
    entries: &[(String, crate::Result<u64>)],
    colored_output: bool,
    format: &OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let rows: Vec<JsonFrequency<'_>> = entries
                .iter()
                .map(|(word, freq)| JsonFrequency {
                    word,
                    frequency: freq.as_ref().ok().copied(),
                    error: freq.as_ref().err().map(|e| e.to_string()),
                })
                .collect();
            print_json(&rows)
        }
        OutputFormat::Text => {
            for (word, freq) in entries {
                match freq {
                    Ok(count) if colored_output => {
                        println!("{} {}", word.bold(), count.to_string().cyan())
                    }
                    Ok(count) => println!("{} {}", word, count),
                    Err(e) if colored_output => println!("{} {}", word.bold(), e.to_string().red()),
                    Err(e) => println!("{} {}", word, e),
                }
            }
            Ok(())
        }
    }
}

pub fn print_check_summary(unknown: usize, checked: usize, colored: bool) {
    println!();
    if unknown == 0 {
        if colored {
            println!("{}", "✓ All words recognized!".green().bold());
        } else {
            println!("✓ All words recognized!");
        }
    } else {
        let unknown_word = if unknown == 1 { "word" } else { "words" };
        if colored {
            println!(
                "{} {} unknown {} out of {} checked",
                "✗".red().bold(),
                unknown.to_string().red().bold(),
                unknown_word,
                checked
            );
        } else {
            println!(
                "✗ {} unknown {} out of {} checked",
                unknown, unknown_word, checked
            );
        }
    }
}

/// Prompt for the next word; `None` ends the session.
pub fn prompt_word(colored: bool) -> Result<Option<String>> {
    let prompt = if colored {
        "Word (empty to quit)".cyan().to_string()
    } else {
        "Word (empty to quit)".to_string()
    };

    let input: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .context("Failed to read word from terminal")?;
    let input = input.trim().to_string();

    if input.is_empty() || input == ":q" {
        Ok(None)
    } else {
        Ok(Some(input))
    }
}
