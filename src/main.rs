use clap::Parser;
use colored::*;
use eyre::{Context, Result, bail};
use log::info;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use outreach::api::{CampaignApi, HttpCampaignApi};
use outreach::domain::{Campaign, CampaignStatus, Lead};
use outreach::form::FormStore;
use outreach::pages::{
    CampaignEditor, Clipboard, CommandClipboard, CopyMethod, Dashboard, DashboardView, FileClipboard, LeadEditor,
    MessageGenerator,
};
use outreach::resource::RetryPhase;

mod cli;
mod config;

use cli::Cli;
use cli::commands::{CampaignArgs, Commands, ProfileArgs};
use config::Config;

fn setup_logging() -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("outreach")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("outreach.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

async fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    let mut http = config.api.http_config();
    if let Some(url) = &cli.api_url {
        http.base_url = url.clone();
    }
    if cli.is_verbose() {
        println!("Backend: {}", http.base_url.dimmed());
    }
    let api: Arc<dyn CampaignApi> = Arc::new(HttpCampaignApi::new(http).context("Failed to create API client")?);

    match &cli.command {
        Commands::List => handle_list_command(api, config).await,
        Commands::Show { id } => handle_show_command(api, id).await,
        Commands::Create { fields } => handle_save_command(api, None, fields).await,
        Commands::Update { id, fields } => handle_save_command(api, Some(id), fields).await,
        Commands::Toggle { id } => handle_toggle_command(api, id, config).await,
        Commands::Delete { id, yes } => handle_delete_command(api, id, *yes, config).await,
        Commands::Generate { profile, copy, copy_to } => {
            handle_generate_command(api, profile, *copy, copy_to.as_ref()).await
        }
        Commands::Lead {
            name,
            email,
            phone,
            company,
            job_title,
            notes,
        } => {
            let lead = Lead {
                name: name.clone(),
                email: email.clone(),
                phone: phone.clone().unwrap_or_default(),
                company: company.clone().unwrap_or_default(),
                job_title: job_title.clone().unwrap_or_default(),
                notes: notes.clone().unwrap_or_default(),
            };
            handle_lead_command(&lead).await
        }
    }
}

fn print_campaign(campaign: &Campaign) {
    let status = match campaign.status {
        CampaignStatus::Active => campaign.status.as_str().green(),
        CampaignStatus::Inactive => campaign.status.as_str().yellow(),
    };
    println!("{} {} [{}]", campaign.id.dimmed(), campaign.name.bold(), status);
    if !campaign.description.is_empty() {
        println!("  {}", campaign.description);
    }
    println!("  {} leads, {} accounts", campaign.leads.len(), campaign.account_ids.len());
}

fn print_form_errors(form: &FormStore) {
    for (field, message) in form.errors() {
        eprintln!("  {} {}", format!("{}:", field).red(), message);
    }
}

/// Wait out background retries so the final list state is printed
async fn settle(dashboard: &Dashboard) {
    while matches!(
        dashboard.retry_phase(),
        RetryPhase::Scheduled { .. } | RetryPhase::Invoking { .. }
    ) {
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
}

fn render_dashboard(dashboard: &Dashboard) {
    match dashboard.view() {
        DashboardView::Loading => println!("{}", "Loading campaigns...".cyan()),
        DashboardView::Empty { error } => {
            if let Some(error) = error {
                eprintln!("{} {}", "Error:".red(), error);
            }
            println!("No campaigns found. Create a new campaign to get started.");
        }
        DashboardView::Campaigns { campaigns, error } => {
            if let Some(error) = error {
                eprintln!("{} {}", "Error:".red(), error);
            }
            for campaign in &campaigns {
                print_campaign(campaign);
            }
        }
    }
}

async fn handle_list_command(api: Arc<dyn CampaignApi>, config: &Config) -> Result<()> {
    info!("Listing campaigns");
    let dashboard = Dashboard::new(api, config.retry.policy());
    dashboard.load().await;
    settle(&dashboard).await;
    render_dashboard(&dashboard);

    if let Some(error) = dashboard.state().error {
        bail!("Failed to load campaigns: {}", error);
    }
    Ok(())
}

async fn handle_show_command(api: Arc<dyn CampaignApi>, id: &str) -> Result<()> {
    info!("Showing campaign: {}", id);
    let campaign = api.get_campaign(id).await.context("Failed to fetch campaign details")?;
    print_campaign(&campaign);
    for lead in &campaign.leads {
        println!("  - {}", lead);
    }
    for account in &campaign.account_ids {
        println!("  # {}", account);
    }
    Ok(())
}

fn apply_campaign_args(editor: &mut CampaignEditor, fields: &CampaignArgs) -> Result<()> {
    if let Some(name) = &fields.name {
        editor.edit_field("name", name.as_str());
    }
    if let Some(description) = &fields.description {
        editor.edit_field("description", description.as_str());
    }
    if let Some(status) = &fields.status {
        let status: CampaignStatus = status.parse().map_err(|e: String| eyre::eyre!(e))?;
        editor.edit_field("status", status.as_str());
    }

    let mut lead_lines = fields.leads.join("\n");
    if let Some(path) = &fields.leads_file {
        let content =
            fs::read_to_string(path).context(format!("Failed to read leads file {}", path.display()))?;
        lead_lines.push('\n');
        lead_lines.push_str(&content);
    }
    if !lead_lines.trim().is_empty() {
        editor.edit_leads(&lead_lines);
    }
    if !fields.accounts.is_empty() {
        editor.edit_account_ids(&fields.accounts.join("\n"));
    }
    Ok(())
}

async fn handle_save_command(api: Arc<dyn CampaignApi>, id: Option<&String>, fields: &CampaignArgs) -> Result<()> {
    let mut editor = match id {
        Some(id) => {
            info!("Updating campaign: {}", id);
            let mut editor = CampaignEditor::edit(api, id.clone())?;
            if editor.load().await.is_err() {
                print_form_errors(editor.form());
                bail!("Failed to load campaign {}", id);
            }
            editor
        }
        None => {
            info!("Creating campaign");
            CampaignEditor::create(api)?
        }
    };

    apply_campaign_args(&mut editor, fields)?;

    match editor.submit().await {
        Ok(campaign) => {
            let verb = if editor.is_edit_mode() { "Updated:" } else { "Created:" };
            println!("{}", verb.green());
            print_campaign(&campaign);
            Ok(())
        }
        Err(e) => {
            print_form_errors(editor.form());
            Err(e).context("Failed to save campaign")
        }
    }
}

async fn handle_toggle_command(api: Arc<dyn CampaignApi>, id: &str, config: &Config) -> Result<()> {
    info!("Toggling campaign: {}", id);
    let campaign = api.get_campaign(id).await.context("Failed to fetch campaign details")?;
    let dashboard = Dashboard::new(api, config.retry.policy());
    let updated = dashboard
        .toggle_status(&campaign)
        .await
        .context("Failed to update campaign status")?;
    println!("{} {} is now {}", "Toggled:".green(), updated.name, updated.status);
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

async fn handle_delete_command(api: Arc<dyn CampaignApi>, id: &str, yes: bool, config: &Config) -> Result<()> {
    if !yes && !confirm("Are you sure you want to delete this campaign?")? {
        println!("{}", "Cancelled".yellow());
        return Ok(());
    }

    info!("Deleting campaign: {}", id);
    let dashboard = Dashboard::new(api, config.retry.policy());
    dashboard.delete(id).await.context("Failed to delete campaign")?;
    println!("{} {}", "Deleted:".red(), id);

    settle(&dashboard).await;
    match dashboard.state().error {
        None => println!("{} campaigns remaining", dashboard.campaigns().len()),
        Some(error) => eprintln!("{} {}", "Could not refresh campaigns:".yellow(), error),
    }
    Ok(())
}

async fn handle_generate_command(
    api: Arc<dyn CampaignApi>,
    profile: &ProfileArgs,
    copy: bool,
    copy_to: Option<&PathBuf>,
) -> Result<()> {
    info!("Generating personalized message");
    let mut generator = MessageGenerator::new(api)?;
    let edits = [
        ("name", &profile.name),
        ("job_title", &profile.job_title),
        ("company", &profile.company),
        ("location", &profile.location),
        ("summary", &profile.summary),
    ];
    for (field, value) in edits {
        if let Some(value) = value {
            generator.edit_field(field, value.as_str());
        }
    }

    println!("{}", "Generating your personalized message...".cyan());
    let Some(message) = generator.submit().await else {
        print_form_errors(generator.form());
        let error = generator.state().error.unwrap_or_else(|| "invalid profile".to_string());
        bail!("Failed to generate message: {}", error);
    };
    println!("\n{}\n", message);

    if copy || copy_to.is_some() {
        let primary = CommandClipboard::detect();
        let fallback_path = copy_to
            .cloned()
            .unwrap_or_else(|| std::env::temp_dir().join("outreach-message.txt"));
        let fallback = FileClipboard::new(&fallback_path);
        let primary: &dyn Clipboard = &primary;

        match generator.copy_to_clipboard(primary, &fallback)? {
            CopyMethod::Primary => println!("{}", "Copied to clipboard".green()),
            CopyMethod::Fallback => println!("{} {}", "Saved to".yellow(), fallback_path.display()),
        }
    }
    Ok(())
}

async fn handle_lead_command(lead: &Lead) -> Result<()> {
    info!("Validating lead: {}", lead.name);
    let mut editor = LeadEditor::with_initial(lead)?;
    let result = editor
        .submit(|lead| async move {
            let json = serde_json::to_string_pretty(&lead)?;
            println!("{}", json);
            Ok::<(), serde_json::Error>(())
        })
        .await;

    if let Err(e) = result {
        print_form_errors(editor.form());
        return Err(e).context("Lead is not valid");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Setup logging first
    setup_logging().context("Failed to setup logging")?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    if let Some(level) = &config.log_level
        && let Ok(filter) = level.parse::<log::LevelFilter>()
    {
        log::set_max_level(filter);
    }

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config).await.context("Application failed")?;

    Ok(())
}
