use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use mailman_core::ModerationAction;

#[derive(Parser, Debug)]
#[command(
    name = "mailman-admin",
    about = "Administer a Mailman 2 mailing list through its web interface",
    arg_required_else_help = true
)]
pub struct Cli {
    /// RON profile with base_url, list, password, timeouts and layout overrides
    #[arg(long, global = true)]
    pub profile: Option<PathBuf>,

    /// Mailman CGI root, e.g. https://lists.example.org/mailman
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[arg(long, global = true)]
    pub list: Option<String>,

    #[arg(long, global = true, env = "MAILMAN_ADMIN_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Also write logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Increase log detail (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List member addresses from the admin members page
    Members,
    /// List member addresses from the public roster
    Roster,
    /// Show per-member settings
    Settings {
        /// Server-side member search
        #[arg(long)]
        find: Option<String>,
    },
    /// Apply member settings from a JSON file
    SetSettings { file: PathBuf },
    /// Subscribe addresses
    Add {
        #[arg(required = true)]
        emails: Vec<String>,
        #[arg(long)]
        welcome: bool,
        #[arg(long)]
        notify_owner: bool,
    },
    /// Unsubscribe addresses
    Remove {
        #[arg(required = true)]
        emails: Vec<String>,
        #[arg(long)]
        ack: bool,
        #[arg(long)]
        notify_owner: bool,
    },
    /// Make the membership exactly these addresses
    Sync { emails: Vec<String> },
    /// List held messages
    Queue,
    /// Show headers and excerpt of one held message
    Show { id: u64 },
    /// Defer, approve, reject or discard a held message
    Moderate(ModerateArgs),
    /// Set or clear the moderation bit of every member
    ModerateAll {
        #[arg(value_enum)]
        state: Toggle,
    },
    /// Replace the non-member addresses accepted without moderation
    AcceptSenders { senders: Vec<String> },
    /// Show general options
    Options,
    /// Apply general option changes from a JSON file
    SetOptions { file: PathBuf },
    /// Show how many members the admin pages list at once
    ChunkSize,
}

#[derive(Args, Debug)]
pub struct ModerateArgs {
    pub id: u64,
    /// defer, approve, reject or discard
    pub action: ModerationAction,
    /// Explanation sent to the poster on reject
    #[arg(long)]
    pub reason: Option<String>,
    /// Keep a copy for the site administrator
    #[arg(long)]
    pub preserve: bool,
    /// Forward the message to this address
    #[arg(long)]
    pub forward_to: Option<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    pub fn enabled(self) -> bool {
        self == Toggle::On
    }
}
