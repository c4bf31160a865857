use clap::{Parser, Subcommand};
use scanpars::config::RuntimeConfig;
use scanpars::lexical::{get_token_counts, kinds, sanitizer, LexicalAnalyzer};
use scanpars::logging;
use scanpars::tokens::TokenType;
use scanpars::utils::SourceMap;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scanpars")]
#[command(about = "Tokenize files with the scanpars rule catalog")]
#[command(version)]
struct Cli {
    /// Runtime configuration (TOML) with lexical, parser and logging sections
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the tokens of a file as (lexeme, TYPE) pairs
    Tokenize {
        file: PathBuf,

        /// Keep line breaks, tabs and blanks in the output
        #[arg(long)]
        keep_whitespace: bool,

        /// Keep whitespace tokens of this type (repeatable), e.g. `--keep LF`
        #[arg(long = "keep", value_name = "TYPE")]
        keep: Vec<String>,

        /// Emit the tokens as a JSON array
        #[arg(long)]
        json: bool,
    },
    /// Print token counts per type
    Stats {
        file: PathBuf,

        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => RuntimeConfig::load(path)?,
        None => RuntimeConfig::default(),
    };
    logging::config::init_runtime_preferences(config.logging.clone())?;
    logging::init_global_logging()?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match run(&cli.command, &config, &mut out)? {
        true => Ok(()),
        false => std::process::exit(1),
    }
}

/// Execute one command; `Ok(false)` when the input could not be tokenized
fn run(
    command: &Commands,
    config: &RuntimeConfig,
    out: &mut impl Write,
) -> Result<bool, Box<dyn std::error::Error>> {
    let (file, json) = match command {
        Commands::Tokenize { file, json, .. } | Commands::Stats { file, json } => (file, *json),
    };
    let source = std::fs::read_to_string(file)?;

    let mut analyzer = LexicalAnalyzer::with_preferences(config.lexical.clone());
    let tokens = match analyzer.tokenize(&source) {
        Ok(tokens) => tokens,
        Err(error) => {
            let message = format!("{}: {}", file.display(), error);
            match error.span() {
                Some(span) => eprint!("{}", SourceMap::new(source).format_error(&span, &message)),
                None => eprintln!("error: {}", message),
            }
            return Ok(false);
        }
    };

    match command {
        Commands::Tokenize {
            keep_whitespace,
            keep,
            ..
        } => {
            let keep: Vec<TokenType> = if *keep_whitespace {
                kinds::WHITESPACE.to_vec()
            } else {
                keep.iter().map(|label| TokenType::new(label.as_str())).collect()
            };
            let tokens = sanitizer::whitespace(tokens, &keep);
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&tokens)?)?;
            } else {
                for token in &tokens {
                    writeln!(out, "{}", token)?;
                }
            }
        }
        Commands::Stats { .. } => {
            let counts = get_token_counts(&tokens);
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&counts)?)?;
            } else {
                writeln!(out, "total: {}", counts.total)?;
                writeln!(out, "significant: {}", counts.significant())?;
                for (kind, count) in &counts.by_type {
                    writeln!(out, "{:>20} {}", kind, count)?;
                }
            }
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn execute(args: &[&str]) -> (bool, String) {
        let cli = Cli::try_parse_from(args).unwrap();
        let mut out = Vec::new();
        let ok = run(&cli.command, &RuntimeConfig::default(), &mut out).unwrap();
        (ok, String::from_utf8(out).unwrap())
    }

    fn source_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_tokenize_drops_whitespace_by_default() {
        let file = source_file("1 - 2");
        let path = file.path().to_str().unwrap();

        let (ok, out) = execute(&["scanpars", "tokenize", path]);
        assert!(ok);
        assert_eq!(out, "(\"1\", UINT)\n(\"-\", MINUS)\n(\"2\", UINT)\n");

        let (_, out) = execute(&["scanpars", "tokenize", path, "--keep-whitespace"]);
        assert_eq!(out.lines().count(), 5);
    }

    #[test]
    fn test_tokenize_keeps_selected_whitespace() {
        let file = source_file("a b\nc");
        let path = file.path().to_str().unwrap();

        let (ok, out) = execute(&["scanpars", "tokenize", path, "--keep", "LF"]);
        assert!(ok);
        assert_eq!(out, "(\"a\", WORD)\n(\"b\", WORD)\n(\"\\n\", LF)\n(\"c\", WORD)\n");
    }

    #[test]
    fn test_tokenize_json() {
        let file = source_file("x");
        let (_, out) = execute(&["scanpars", "tokenize", file.path().to_str().unwrap(), "--json"]);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["lexeme"], "x");
        assert_eq!(value[0]["type"], "WORD");
    }

    #[test]
    fn test_stats() {
        let file = source_file("a b 1");
        let (ok, out) = execute(&["scanpars", "stats", file.path().to_str().unwrap()]);
        assert!(ok);
        assert!(out.starts_with("total: 5\nsignificant: 3\n"));
        assert!(out.contains("WORD 2"));
    }

    #[test]
    fn test_unrecognized_character_fails() {
        let file = source_file("a \u{7}");
        let (ok, out) = execute(&["scanpars", "tokenize", file.path().to_str().unwrap()]);
        assert!(!ok);
        assert!(out.is_empty());
    }

    #[test]
    fn test_missing_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["scanpars"]).is_err());
    }
}
