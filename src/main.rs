use anyhow::{Context, Result};
use clap::{ArgAction, CommandFactory, Parser};
use clap_complete::{generate, Shell};
use env_logger::Builder;
use log::{info, LevelFilter};
use spellsuggest::cli::output::{self, OutputFormat};
use spellsuggest::config::Overrides;
use spellsuggest::dict::manager;
use spellsuggest::{Config, DedupPolicy, SpellChecker};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "spellsuggest")]
#[command(version, about = "Ranked spelling suggestions from a word list and a frequency corpus", long_about = None)]
struct Cli {
    /// Words to check
    #[arg(value_name = "WORDS")]
    words: Vec<String>,

    /// Word list (whitespace-separated words, optionally .gz)
    #[arg(short, long, global = true, env = "SPELLSUGGEST_DICTIONARY")]
    dictionary: Option<PathBuf>,

    /// Corpus used to count word frequencies
    #[arg(short, long, global = true, env = "SPELLSUGGEST_CORPUS")]
    corpus: Option<PathBuf>,

    /// Personal dictionary file
    #[arg(long, global = true)]
    personal_dict: Option<PathBuf>,

    /// Add words to personal dictionary
    #[arg(long)]
    add_to_dict: Vec<String>,

    /// Pattern to ignore (regex)
    #[arg(long)]
    ignore_pattern: Vec<String>,

    /// Maximum suggestions per word (0 for all)
    #[arg(short = 'n', long)]
    max_suggestions: Option<usize>,

    /// How repeated discoveries of a word are merged (closest, overwrite-only)
    #[arg(long)]
    policy: Option<DedupPolicy>,

    /// Output format (text, json)
    #[arg(short = 'o', long, default_value = "text", global = true)]
    format: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Exit with code 0 even if unknown words are found
    #[arg(long)]
    no_fail: bool,

    /// Prompt for words one at a time
    #[arg(short, long)]
    interactive: bool,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Parser, Debug)]
enum Commands {
    /// Word list management
    Dict {
        #[command(subcommand)]
        action: DictCommands,
    },
    /// Print the corpus frequency of each word
    Freq {
        #[arg(required = true)]
        words: Vec<String>,
    },
}

#[derive(Parser, Debug)]
enum DictCommands {
    /// List installed word lists
    List,
    /// Copy a word list into the data directory
    Install {
        /// Word list to install
        path: PathBuf,
        /// File name to install under (default: words.txt)
        #[arg(long)]
        name: Option<String>,
    },
    /// Show word list statistics
    Info {
        /// Word list (default: the configured or installed one)
        path: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Handle shell completion generation
    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "spellsuggest", &mut io::stdout());
        return Ok(());
    }

    let colored = !cli.no_color;
    if !colored {
        colored::control::set_override(false);
    }

    let config = Config::load(Overrides {
        dictionary: cli.dictionary.clone(),
        corpus: cli.corpus.clone(),
        personal_dictionary: cli.personal_dict.clone(),
        ignore_patterns: cli.ignore_pattern.clone(),
        max_suggestions: cli.max_suggestions,
        dedup_policy: cli.policy,
    })?;

    // Handle subcommands
    if let Some(command) = cli.command {
        return handle_command(command, &config, colored, &cli.format);
    }

    if !cli.add_to_dict.is_empty() {
        add_to_personal_dict(&config, &cli.add_to_dict)?;
        if cli.words.is_empty() && !cli.interactive {
            return Ok(());
        }
    }

    if cli.words.is_empty() && !cli.interactive {
        anyhow::bail!("No words specified. Use --help for usage information.");
    }

    let checker = SpellChecker::new(&config, matches!(cli.format, OutputFormat::Text))?;
    info!(
        "dictionary ready: {} words, {} nodes",
        checker.dictionary().word_count(),
        checker.dictionary().node_count()
    );

    if cli.interactive {
        while let Some(word) = output::prompt_word(colored)? {
            output::print_text_report(&checker.check_word(&word), colored);
        }
        return Ok(());
    }

    let result = checker.check_words(&cli.words);
    output::print_reports(&result, colored, &cli.format)?;

    if matches!(cli.format, OutputFormat::Text) {
        output::print_check_summary(result.unknown_count, result.checked, colored);
    }

    // Exit with appropriate code
    if result.unknown_count > 0 && !cli.no_fail {
        std::process::exit(1);
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    Builder::new()
        .filter_level(level)
        .parse_env("RUST_LOG")
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();
}

fn handle_command(
    command: Commands,
    config: &Config,
    colored: bool,
    format: &OutputFormat,
) -> Result<()> {
    match command {
        Commands::Dict { action } => match action {
            DictCommands::List => {
                manager::list_dictionaries()?;
            }
            DictCommands::Install { path, name } => {
                manager::install_dictionary(&path, name.as_deref())?;
            }
            DictCommands::Info { path } => {
                let path = path
                    .or_else(|| config.word_list_path())
                    .context("No word list given and no data directory available")?;
                manager::show_info(&path, config.corpus.as_deref())?;
            }
        },
        Commands::Freq { words } => {
            let checker = SpellChecker::new(config, false)?;
            let entries: Vec<_> = words
                .into_iter()
                .map(|word| {
                    let freq = checker.dictionary().frequency_of(&word);
                    (word, freq)
                })
                .collect();
            output::print_frequencies(&entries, colored, format)?;
        }
    }
    Ok(())
}

fn add_to_personal_dict(config: &Config, words: &[String]) -> Result<()> {
    let path = config
        .personal_dictionary
        .clone()
        .or_else(Config::default_personal_dict_path)
        .context("No personal dictionary path available")?;
    append_words(&path, words)?;
    println!("Added {} word(s) to {}", words.len(), path.display());
    Ok(())
}

fn append_words(path: &Path, words: &[String]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create personal dictionary directory")?;
    }
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open personal dictionary: {}", path.display()))?;
    for word in words {
        writeln!(file, "{}", word)
            .with_context(|| format!("Failed to write personal dictionary: {}", path.display()))?;
    }
    Ok(())
}
