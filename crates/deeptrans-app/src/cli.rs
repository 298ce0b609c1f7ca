use clap::{Parser, Subcommand};
use deeptrans_config::ProviderKind;

#[derive(Parser, Debug)]
#[command(name = "deeptrans", version, about = "Translate text with LLM providers")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Translate TEXT, or stdin when no text is given
    Translate {
        /// Source language code, `auto` to detect
        #[arg(long)]
        from: Option<String>,
        /// Target language code
        #[arg(long)]
        to: Option<String>,
        /// Provider name or number, instead of the active one
        #[arg(long)]
        provider: Option<String>,
        text: Vec<String>,
    },

    /// Manage configured providers
    Providers {
        #[command(subcommand)]
        action: Option<ProvidersAction>,
    },

    /// List the models a provider offers
    Models {
        #[arg(long)]
        provider: Option<String>,
        /// Ignore the cached list
        #[arg(long, default_value_t = false)]
        refresh: bool,
    },

    /// Show or edit translation history
    History {
        #[arg(long, default_value_t = 20)]
        limit: usize,
        #[command(subcommand)]
        action: Option<HistoryAction>,
    },

    /// List supported languages
    Languages,
}

#[derive(Subcommand, Debug)]
pub enum ProvidersAction {
    List,
    /// Make a provider the active one
    Use { name: String },
    SetKey { name: String, key: String },
    SetModel { name: String, model: String },
    /// Add a stock vendor with its default model
    Add {
        kind: ProviderKind,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, default_value = "")]
        key: String,
    },
    /// Add an OpenAI-compatible endpoint
    AddCustom {
        name: String,
        endpoint: String,
        model: String,
        #[arg(long, default_value = "")]
        key: String,
    },
    Remove { name: String },
}

#[derive(Subcommand, Debug)]
pub enum HistoryAction {
    Clear,
    /// Remove one entry by id or unique id prefix
    Remove { id: String },
}
