pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "freshet")]
#[command(about = "A feed loading and list rendering pipeline", long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch a feed and print its items
    Fetch {
        /// Configured feed name or a feed URL
        source: String,

        /// URL template parameter (repeatable)
        #[arg(short, long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,

        /// Tag (XML) or key (JSON) that marks one item
        #[arg(long)]
        item_location: Option<String>,

        /// Keep matched XML elements raw instead of converting them
        #[arg(long)]
        raw: bool,

        /// Print items as JSON
        #[arg(long)]
        json: bool,
    },
    /// Render a feed through an item template
    Render {
        /// Configured feed name or a feed URL
        source: String,

        /// URL template parameter (repeatable)
        #[arg(short, long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,

        /// Tag (XML) or key (JSON) that marks one item
        #[arg(long)]
        item_location: Option<String>,

        /// Item template file with [[field]] placeholders
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// Focus-chasing axis (requires --template)
        #[arg(long, value_parser = ["vertical", "horizontal"])]
        chasing: Option<String>,

        /// First item to render
        #[arg(long)]
        start: Option<usize>,

        /// Number of items to render
        #[arg(long)]
        count: Option<usize>,

        /// Write the markup to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List configured feeds
    Feeds,
}
