use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, Subcommand};

use lock_cli::commands::{config_ops, transform_ops, voice_ops};
use lock_cli::trace_init::init_tracing;

#[derive(Parser)]
#[command(
    name = "locktool",
    about = "Rewrite Japanese text so every syllable falls into one consonant row"
)]
struct Cli {
    /// Custom settings TOML (see `settings-export`)
    #[arg(long, global = true)]
    settings: Option<String>,
    /// Custom kana → romaji TOML (see `romaji-export`)
    #[arg(long, global = true)]
    romaji: Option<String>,
    /// Custom rows TOML (see `rows-export`)
    #[arg(long, global = true)]
    rows: Option<String>,
    /// More log output (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// Write JSON-lines traces to this directory (requires --features trace)
    #[arg(long, global = true)]
    trace_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rewrite text into a consonant row
    Transform {
        /// Text to rewrite (hiragana/katakana; kanji with --kanji)
        text: String,
        /// Row name, e.g. pa, ka, sa (default: transform.default_row)
        #[arg(short, long)]
        row: Option<String>,
        /// Read kanji as hiragana through the configured service first
        #[arg(long)]
        kanji: bool,
        /// Print {"result": ...} instead of plain text
        #[arg(long)]
        json: bool,
    },
    /// Show every pipeline stage for a text
    Explain {
        /// Text to rewrite
        text: String,
        /// Row name (default: transform.default_row)
        #[arg(short, long)]
        row: Option<String>,
        /// Read kanji as hiragana through the configured service first
        #[arg(long)]
        kanji: bool,
    },
    /// List the available rows (* marks the default)
    Rows,
    /// Synthesize speech with VOICEVOX, optionally rewriting the text first
    Speak {
        /// Text to speak
        text: String,
        /// Output WAV file
        #[arg(short, long)]
        out: String,
        /// Rewrite into this row before speaking
        #[arg(short, long)]
        row: Option<String>,
        /// Read kanji as hiragana first (implies a rewrite)
        #[arg(long)]
        kanji: bool,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
    /// Export default kana → romaji mappings as TOML
    RomajiExport,
    /// Validate a custom romaji TOML file
    RomajiValidate {
        /// Path to the TOML file
        file: String,
    },
    /// Export default rows as TOML
    RowsExport,
    /// Validate a custom rows TOML file
    RowsValidate {
        /// Path to the TOML file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();
    let _guard = init_tracing(cli.verbose, cli.trace_dir.as_deref());

    if let Err(e) = config_ops::install_custom(
        cli.settings.as_deref(),
        cli.romaji.as_deref(),
        cli.rows.as_deref(),
    ) {
        eprintln!("Error: {e}");
        process::exit(1);
    }

    match cli.command {
        Command::Transform {
            text,
            row,
            kanji,
            json,
        } => transform_ops::transform_cmd(&text, row.as_deref(), kanji, json),
        Command::Explain { text, row, kanji } => {
            transform_ops::explain_cmd(&text, row.as_deref(), kanji)
        }
        Command::Rows => transform_ops::rows_cmd(),
        Command::Speak {
            text,
            out,
            row,
            kanji,
        } => voice_ops::speak_cmd(&text, &out, row.as_deref(), kanji),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
        Command::RomajiExport => config_ops::romaji_export(),
        Command::RomajiValidate { file } => config_ops::romaji_validate(&file),
        Command::RowsExport => config_ops::rows_export(),
        Command::RowsValidate { file } => config_ops::rows_validate(&file),
    }
}
