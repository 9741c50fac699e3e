use crate::checker::dictionary::Dictionary;
use crate::dict::source;
use anyhow::{Context, Result};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File name of the word list used when none is configured.
pub const DEFAULT_WORD_LIST: &str = "words.txt";

pub struct DictionaryInfo {
    pub name: String,
    pub path: PathBuf,
    pub word_count: usize,
    pub node_count: usize,
    pub total_frequency: u64,
    pub size_bytes: u64,
}

/// Path of the installed default word list, if the data directory is known.
pub fn default_word_list() -> Option<PathBuf> {
    crate::config::Config::data_dir().map(|dir| dir.join(DEFAULT_WORD_LIST))
}

/// Build a dictionary from a word list and an optional corpus.
///
/// Without a corpus every word keeps frequency 1.
pub fn build(word_list: &Path, corpus: Option<&Path>, progress: bool) -> Result<Dictionary> {
    let pb = if progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .context("Invalid progress template")?,
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message(format!("Loading {}...", word_list.display()));
        Some(pb)
    } else {
        None
    };

    let dict = match corpus {
        Some(corpus) => Dictionary::from_paths(word_list, corpus),
        None => source::open(word_list).and_then(|words| {
            Dictionary::from_readers(words, io::empty())
                .map_err(|e| source::with_path(e, word_list))
        }),
    }
    .with_context(|| format!("Failed to build dictionary from {}", word_list.display()))?;

    if let Some(pb) = pb {
        pb.finish_with_message(format!("Loaded {} words", dict.word_count()));
    }
    Ok(dict)
}

pub fn list_dictionaries() -> Result<()> {
    let data_dir = crate::config::Config::data_dir().context("Failed to get data directory")?;

    if !data_dir.exists() {
        println!("{}", "No word lists installed.".yellow());
        println!(
            "Run {} to install one.",
            "spellsuggest dict install <PATH>".cyan()
        );
        return Ok(());
    }

    println!("{}", "Installed word lists:".bold());
    println!();

    let mut found_any = false;
    for entry in fs::read_dir(&data_dir)? {
        let path = entry?.path();
        if !is_word_list(&path) {
            continue;
        }
        found_any = true;

        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown");
        let size_kb = fs::metadata(&path)?.len() / 1024;
        let marker = if name == DEFAULT_WORD_LIST {
            " (default)".dimmed().to_string()
        } else {
            String::new()
        };

        println!(
            "  {} {} ({}){}",
            "✓".green(),
            name.cyan().bold(),
            format!("{}KB", size_kb).dimmed(),
            marker
        );
    }

    if !found_any {
        println!("{}", "No word lists found.".yellow());
    }

    println!();
    println!(
        "Data directory: {}",
        data_dir.display().to_string().dimmed()
    );

    Ok(())
}

/// Validate a word list and copy it into the data directory.
///
/// Without `name` the list becomes the default word list.
pub fn install_dictionary(path: &Path, name: Option<&str>) -> Result<PathBuf> {
    let dict = build(path, None, true)?;
    if dict.word_count() == 0 {
        anyhow::bail!("{} contains no words", path.display());
    }

    let data_dir = crate::config::Config::data_dir().context("Failed to get data directory")?;
    fs::create_dir_all(&data_dir).context("Failed to create data directory")?;

    let target = data_dir.join(name.unwrap_or(DEFAULT_WORD_LIST));
    fs::copy(path, &target).with_context(|| {
        format!(
            "Failed to copy {} to {}",
            path.display(),
            target.display()
        )
    })?;

    println!(
        "{} Installed {} words: {}",
        "✓".green().bold(),
        dict.word_count().to_string().yellow(),
        target.display().to_string().cyan()
    );

    Ok(target)
}

pub fn collect_info(path: &Path, corpus: Option<&Path>) -> Result<DictionaryInfo> {
    let dict = build(path, corpus, false)?;
    let size_bytes = fs::metadata(path)
        .with_context(|| format!("Failed to stat {}", path.display()))?
        .len();

    Ok(DictionaryInfo {
        name: path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string(),
        path: path.to_path_buf(),
        word_count: dict.word_count(),
        node_count: dict.node_count(),
        total_frequency: dict.total_frequency(),
        size_bytes,
    })
}

pub fn show_info(path: &Path, corpus: Option<&Path>) -> Result<()> {
    if !path.exists() {
        println!(
            "{} Word list {} not found.",
            "✗".red().bold(),
            path.display().to_string().yellow()
        );
        println!(
            "Run {} to install one.",
            "spellsuggest dict install <PATH>".cyan()
        );
        return Ok(());
    }

    let info = collect_info(path, corpus)?;

    println!("{}", format!("Word list: {}", info.name).bold());
    println!("  Path: {}", info.path.display());
    println!("  Size: {} KB", info.size_bytes / 1024);
    println!("  Words: {}", info.word_count);
    println!("  Trie nodes: {}", info.node_count);
    println!("  Total frequency: {}", info.total_frequency);
    if let Some(corpus) = corpus {
        println!("  Corpus: {}", corpus.display());
    }

    Ok(())
}

fn is_word_list(path: &Path) -> bool {
    match path.extension().and_then(|s| s.to_str()) {
        Some("txt") => true,
        Some("gz") => path
            .file_stem()
            .and_then(|s| s.to_str())
            .is_some_and(|stem| stem.ends_with(".txt")),
        _ => false,
    }
}
