//! `oilempires` - CLI for the oil empires infographic
//!
//! This binary browses the static content and reads or submits visitor
//! feedback against the configured content store.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::sync::Arc;

use anyhow::{bail, Context};
use clap::Parser;
use tracing::debug;

use oilempires::cli::{
    render, Cli, Command, CommentCommand, CompaniesCommand, ConfigCommand, FeedbackCommand,
    OutputFormat, RateCommand,
};
use oilempires::content::profiles::{reference_companies, DEFAULT_EXPANDED};
use oilempires::content::{CompanyTable, OilMap, ProfileAccordion, Tab, TabBar, Timeline};
use oilempires::feedback::SubmitOutcome;
use oilempires::{
    init_logging, Config, FeedbackOptions, FeedbackSection, Identity, Notice, SqliteStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone()).context("loading configuration")?;

    match cli.command {
        Command::Companies(cmd) => handle_companies(&config, cmd).await,
        Command::Feedback(cmd) => handle_feedback(&config, cmd).await,
        Command::Comment(cmd) => handle_comment(&config, cmd).await,
        Command::Rate(cmd) => handle_rate(&config, cmd).await,
        Command::Timeline(cmd) => {
            let mut timeline = Timeline::new();
            if let Some(index) = cmd.index {
                if !timeline.select(index) {
                    bail!(
                        "no timeline event {index} (valid: 0..={})",
                        timeline.events().len() - 1
                    );
                }
            }
            print!("{}", render::timeline(&timeline));
            Ok(())
        }
        Command::Map(cmd) => {
            let mut map = OilMap::new();
            if let Some(region) = cmd.region {
                if !map.hover(&region) {
                    let ids: Vec<&str> = map.regions().iter().map(|r| r.id).collect();
                    bail!("unknown region '{region}' (known: {})", ids.join(", "));
                }
            }
            print!("{}", render::map(&map));
            Ok(())
        }
        Command::Profiles(cmd) => {
            let mut accordion = ProfileAccordion::new();
            if let Some(id) = cmd.expand {
                if accordion.profile(&id).is_none() {
                    bail!("unknown profile '{id}'");
                }
                if id != DEFAULT_EXPANDED {
                    accordion.toggle(&id);
                }
            }
            print!("{}", render::profiles(&accordion));
            Ok(())
        }
        Command::Tabs(cmd) => {
            let mut bar = TabBar::new();
            if let Some(id) = cmd.select {
                bar.select(id.parse::<Tab>()?);
            }
            print!("{}", render::tabs(&bar));
            Ok(())
        }
        Command::Seed => {
            let store = open_store(&config)?;
            let inserted = store.seed_companies(&reference_companies())?;
            println!("Seeded {inserted} companies into {}", store.path().display());
            Ok(())
        }
        Command::Status(cmd) => {
            let store = open_store(&config)?;
            let stats = store.stats()?;
            print!("{}", render::status(&stats, store.path(), cmd.json)?);
            Ok(())
        }
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn open_store(config: &Config) -> anyhow::Result<Arc<SqliteStore>> {
    let path = config.database_path();
    let store = SqliteStore::open(&path)
        .with_context(|| format!("opening content store at {}", path.display()))?;
    Ok(Arc::new(store))
}

fn feedback_section(
    config: &Config,
    section: String,
    identity: Identity,
) -> anyhow::Result<FeedbackSection<SqliteStore>> {
    let store = open_store(config)?;
    let options = FeedbackOptions::from_config(section, &config.feedback).with_identity(identity);
    Ok(FeedbackSection::new(store, options))
}

fn print_notices(notices: &[Notice]) {
    eprint!("{}", render::notices(notices));
}

async fn handle_companies(config: &Config, cmd: CompaniesCommand) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let mut table = CompanyTable::new(config.display.companies_page_size);
    table.load(&*store).await?;
    table.go_to_page(cmd.page);

    if let Some(name) = cmd.select {
        if !table.select_by_name(&name) {
            bail!("no company named '{name}'");
        }
    }

    print!("{}", render::companies(&table, cmd.format)?);
    Ok(())
}

async fn handle_feedback(config: &Config, cmd: FeedbackCommand) -> anyhow::Result<()> {
    let mut section = feedback_section(config, cmd.section, Identity::Anonymous)?;
    section.load().await;
    print_notices(&section.take_notices());
    print!("{}", render::feedback(&section, cmd.format)?);
    Ok(())
}

async fn handle_comment(config: &Config, cmd: CommentCommand) -> anyhow::Result<()> {
    let identity = cmd.identity.map_or(Identity::Anonymous, Identity::authenticated);
    let mut section = feedback_section(config, cmd.section, identity)?;
    section.load().await;

    if let Some(name) = cmd.name {
        section.set_name(name);
    }
    section.set_body(cmd.body);

    let outcome = section.submit_comment().await?;
    debug!("Comment submission finished: {:?}", outcome);
    print_notices(&section.take_notices());

    if outcome != SubmitOutcome::Stored {
        bail!("comment was not stored");
    }
    print!("{}", render::feedback(&section, OutputFormat::Plain)?);
    Ok(())
}

async fn handle_rate(config: &Config, cmd: RateCommand) -> anyhow::Result<()> {
    let mut section = feedback_section(config, cmd.section, Identity::Anonymous)?;
    section.load().await;

    let outcome = section.submit_rating(cmd.value).await?;
    print_notices(&section.take_notices());

    if outcome != SubmitOutcome::Stored {
        bail!("rating was not stored");
    }
    println!("{}", render::stars(section.highlighted_stars()));
    if let Some(summary) = section.rating_summary() {
        println!("{} now averages {summary}", section.section());
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Store]");
                println!("  Database path:        {}", config.database_path().display());
                println!();
                println!("[Feedback]");
                println!(
                    "  Identity waives name: {}",
                    config.feedback.identity_waives_name
                );
                println!("  Default title:        {}", config.feedback.default_title);
                println!();
                println!("[Display]");
                println!(
                    "  Companies per page:   {}",
                    config.display.companies_page_size
                );
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::validate_file(&path) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => bail!("configuration error: {e}"),
            }
        }
    }
    Ok(())
}
