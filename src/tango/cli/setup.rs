use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tango", bin_name = "tango", version)]
#[command(about = "Japanese vocabulary notebook with Vietnamese meanings", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding vocabularies.json and config.json (default: $TANGO_HOME or the OS data dir)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

/// The four text fields of an entry.
#[derive(Args, Debug, Default, Clone)]
pub struct FieldArgs {
    /// Kanji form (may be empty for kana-only words)
    #[arg(long)]
    pub kanji: Option<String>,

    /// Hiragana reading
    #[arg(long)]
    pub hiragana: Option<String>,

    /// Romaji reading
    #[arg(long)]
    pub romaji: Option<String>,

    /// Vietnamese meaning
    #[arg(long)]
    pub vietnamese: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List entries, optionally filtered
    #[command(alias = "ls", display_order = 1)]
    List {
        /// Only entries whose field contains this text
        #[arg(short, long)]
        query: Option<String>,

        /// Field to search: romaji, hiragana or vietnamese
        #[arg(short = 't', long = "type", value_name = "TYPE")]
        search_type: Option<String>,
    },

    /// Search entries
    #[command(alias = "s", display_order = 2)]
    Search {
        /// Search words (joined with spaces)
        #[arg(required = true, num_args = 1..)]
        term: Vec<String>,

        /// Field to search: romaji, hiragana or vietnamese
        #[arg(short = 't', long = "type", value_name = "TYPE")]
        search_type: Option<String>,
    },

    /// Add an entry
    #[command(alias = "a", display_order = 3)]
    Add {
        #[command(flatten)]
        fields: FieldArgs,

        /// Keep empty readings empty instead of deriving them
        #[arg(long)]
        no_convert: bool,
    },

    /// Change fields of an entry
    #[command(alias = "e", display_order = 4)]
    Edit {
        /// Entry number (from list) or UUID
        selector: String,

        #[command(flatten)]
        fields: FieldArgs,

        /// Keep empty readings empty instead of deriving them
        #[arg(long)]
        no_convert: bool,
    },

    /// Delete an entry
    #[command(alias = "rm", display_order = 5)]
    Delete {
        /// Entry number (from list) or UUID
        selector: String,
    },

    /// Export the collection as pretty JSON
    #[command(display_order = 10)]
    Export {
        /// Directory to write into (default: current directory)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Check and fix stored entries
    #[command(display_order = 11)]
    Doctor,

    /// Fill empty hiragana/romaji across the collection
    #[command(display_order = 12)]
    FillReadings,

    /// Get or set configuration
    #[command(display_order = 20)]
    Config {
        /// Configuration key (search_type, export_file, readings_file)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn naked_invocation_has_no_command() {
        let cli = parse(&["tango"]);
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn search_collects_all_words() {
        let cli = parse(&["tango", "search", "nói", "chuyện", "-t", "vietnamese"]);
        match cli.command {
            Some(Commands::Search { term, search_type }) => {
                assert_eq!(term, vec!["nói", "chuyện"]);
                assert_eq!(search_type.as_deref(), Some("vietnamese"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn add_takes_field_flags() {
        let cli = parse(&["tango", "add", "--kanji", "男", "--hiragana", "おとこ", "--no-convert"]);
        match cli.command {
            Some(Commands::Add { fields, no_convert }) => {
                assert_eq!(fields.kanji.as_deref(), Some("男"));
                assert_eq!(fields.romaji, None);
                assert!(no_convert);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn global_flags_work_after_subcommand() {
        let cli = parse(&["tango", "rm", "3", "--data-dir", "/tmp/t", "-v"]);
        assert!(cli.verbose);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/t")));
        assert!(matches!(cli.command, Some(Commands::Delete { selector }) if selector == "3"));
    }

    #[test]
    fn fill_readings_is_kebab_case() {
        let cli = parse(&["tango", "fill-readings"]);
        assert!(matches!(cli.command, Some(Commands::FillReadings)));
    }

    #[test]
    fn edit_requires_selector() {
        assert!(Cli::try_parse_from(["tango", "edit"]).is_err());
    }
}
