use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::Read;
use std::path::PathBuf;

use furigana_core::explain::{ensure_pitch_marks, format_word_list};
use furigana_core::render::{normalize_whitespace, render_plain};
use furigana_core::{ConvertOptions, FeatureLayout, FuriganaService, KeywordRules, Mode, Script, VibratoAnalyzer};

#[derive(Parser)]
#[command(name = "furigana", about = "Annotate Japanese text with furigana and pick out key words")]
struct Args {
    /// Compiled vibrato dictionary (.dic or zstd-compressed .dic.zst)
    #[arg(long, env = "FURIGANA_DICT_PATH", default_value = "output/system.dic.zst")]
    dict: PathBuf,

    /// TOML file overriding the keyword word lists
    #[arg(long, env = "FURIGANA_RULES_PATH")]
    rules: Option<PathBuf>,

    /// Feature column holding the part of speech
    #[arg(long, default_value_t = FeatureLayout::IPADIC.pos)]
    pos_column: usize,

    /// Feature column holding the dictionary form
    #[arg(long, default_value_t = FeatureLayout::IPADIC.basic_form)]
    basic_form_column: usize,

    /// Feature column holding the reading
    #[arg(long, default_value_t = FeatureLayout::IPADIC.reading)]
    reading_column: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print ruby-annotated HTML
    Render {
        /// Text to annotate; read from stdin when omitted
        text: Option<String>,

        /// Warn when the visible text of the output differs from the input
        #[arg(long)]
        check: bool,
    },
    /// Print the key words worth explaining
    Keywords {
        text: Option<String>,

        #[arg(long, value_enum, default_value_t = KeywordFormat::Json)]
        format: KeywordFormat,
    },
    /// Print the reading of the whole text
    Reading {
        text: Option<String>,

        /// Katakana instead of hiragana
        #[arg(long)]
        katakana: bool,

        /// Separate words with a space
        #[arg(long)]
        spaced: bool,
    },
    /// Print the analyzer's token stream as JSON
    Tokens { text: Option<String> },
    /// Print the HTML and the key words together as JSON
    Annotate { text: Option<String> },
    /// Add missing pitch-accent marks to a word explanation read from stdin
    Pitch,
}

#[derive(Clone, Copy, ValueEnum)]
enum KeywordFormat {
    Json,
    /// `word(reading)` per line
    List,
}

fn read_input(text: Option<String>) -> Result<String> {
    match text {
        Some(text) => Ok(text),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read text from stdin")?;
            Ok(buf)
        }
    }
}

fn reading_options(katakana: bool, spaced: bool) -> ConvertOptions {
    ConvertOptions {
        to: if katakana { Script::Katakana } else { Script::Hiragana },
        mode: if spaced { Mode::Spaced } else { Mode::Normal },
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let rules = match &args.rules {
        Some(path) => KeywordRules::load(path).with_context(|| format!("failed to load rules {:?}", path))?,
        None => KeywordRules::default(),
    };
    let layout = FeatureLayout {
        pos: args.pos_column,
        basic_form: args.basic_form_column,
        reading: args.reading_column,
    };
    let service: FuriganaService<VibratoAnalyzer> = FuriganaService::vibrato(args.dict.clone(), layout, rules);

    match args.command {
        Command::Render { text, check } => {
            let text = read_input(text)?;
            let html = service.render(&text).await.context("failed to render furigana")?;
            if check {
                let visible = render_plain(&html);
                let expected = normalize_whitespace(&text);
                if visible != expected {
                    log::warn!("Visible text changed: {:?} -> {:?}", expected, visible);
                }
            }
            println!("{}", html);
        }
        Command::Keywords { text, format } => {
            let text = read_input(text)?;
            let keywords = service.key_words(&text).await.context("failed to extract key words")?;
            match format {
                KeywordFormat::Json => println!("{}", serde_json::to_string_pretty(&keywords)?),
                KeywordFormat::List => println!("{}", format_word_list(&keywords)),
            }
        }
        Command::Reading { text, katakana, spaced } => {
            let text = read_input(text)?;
            let reading = service
                .convert(&text, &reading_options(katakana, spaced))
                .await
                .context("failed to read text")?;
            println!("{}", reading);
        }
        Command::Tokens { text } => {
            let text = read_input(text)?;
            let tokens = service.tokens(&text).await.context("failed to analyze text")?;
            println!("{}", serde_json::to_string_pretty(&tokens)?);
        }
        Command::Annotate { text } => {
            let text = read_input(text)?;
            let annotation = service.annotate(&text).await.context("failed to annotate text")?;
            println!("{}", serde_json::to_string_pretty(&annotation)?);
        }
        Command::Pitch => {
            let explanation = read_input(None)?;
            println!("{}", ensure_pitch_marks(&explanation));
        }
    }

    Ok(())
}
