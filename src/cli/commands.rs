//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "daybook")]
#[command(about = "Calendar diary: one photo and a note per day", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new diary
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Store a photo and note for a day, replacing what was there
    Add {
        /// Day (today, yesterday, tomorrow, YYYY-MM-DD, DD-MM-YYYY)
        day: String,

        /// Image file (any format the decoder understands)
        image: PathBuf,

        /// Note text
        #[arg(short, long, default_value = "")]
        note: String,
    },

    /// Show the entry of a day
    Show {
        /// Day (today, yesterday, tomorrow, YYYY-MM-DD, DD-MM-YYYY)
        day: String,

        /// Write the stored photo to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Remove the entry of a day
    Remove {
        /// Day (today, yesterday, tomorrow, YYYY-MM-DD, DD-MM-YYYY)
        day: String,
    },

    /// Print the calendar grid of a month
    Month {
        /// Month (this, last, next, YYYY-MM, MM-YYYY)
        #[arg(default_value = "this")]
        month: String,
    },

    /// List stored entries, oldest first
    List {
        /// Only entries of this month (this, last, next, YYYY-MM, MM-YYYY)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },
}
