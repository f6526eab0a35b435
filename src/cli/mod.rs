pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "weibo-harvest")]
#[command(about = "Archive Weibo posts as markdown articles", long_about = None)]
pub struct Cli {
    /// Path to a config file (default: ~/.config/weibo-harvest/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Harvest every post of a user, one JSON article per line
    User {
        /// Weibo user id
        uid: String,

        /// Stop after this many articles
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Harvest the friends timeline of a logged-in account
    Timeline {
        /// Value of the SUB login cookie
        #[arg(long, env = "WEIBO_COOKIE_SUB", hide_env_values = true)]
        sub: String,

        /// Stop after this many articles
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Print the posts container id of a user
    Container {
        /// Weibo user id
        uid: String,
    },
    /// List the available reader services
    Services,
}
