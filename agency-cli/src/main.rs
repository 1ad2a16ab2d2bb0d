use agency_core::api::UploadDocumentForm;
use agency_core::models::{
    Application, Client, Faq, Hotel, Lead, LoanPlan, MarketplaceProduct, StockItem, Ticket, VisaCase,
};
use agency_core::config::DEFAULT_CONFIG_FILE;
use agency_core::table::{CellKind, PaginationModel};
use agency_core::{
    AdminApiClient, Config, Definitions, Entity, LookupKind, LookupTable, PageController, PageId,
    TableAction, TableView,
};
use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod output;

#[derive(Parser, Debug)]
#[command(name = "agency-admin", version, about = "Browse and manage agency admin data from the terminal")]
struct Cli {
    /// Configuration file (defaults to ./agency-admin.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Lists every dashboard page with its section and data source.
    Pages,
    /// Searches, filters and pages through one dashboard page.
    List(ListArgs),
    /// Prints one lookup table.
    Lookup {
        /// user-types, client-types, service-categories or document-types
        kind: LookupKind,
    },
    /// Writes the effective configuration to the config file.
    InitConfig {
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
    /// Uploads a document for a client.
    Upload {
        #[arg(long)]
        client: String,
        #[arg(long)]
        document_type: i64,
        file: PathBuf,
    },
}

#[derive(Args, Debug)]
struct ListArgs {
    #[arg(value_name = "PAGE")]
    target: PageId,

    /// Case-insensitive text search over the page's search fields
    #[arg(long)]
    search: Option<String>,

    /// Categorical filter, repeatable
    #[arg(long = "filter", value_name = "DIMENSION=VALUE", value_parser = output::parse_filter)]
    filters: Vec<(String, String)>,

    /// Page number, starting at 1
    #[arg(long, default_value = "1")]
    page: NonZeroUsize,

    #[arg(long)]
    page_size: Option<usize>,

    /// Print the page as JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(url) = &cli.base_url {
        config.api.base_url = url.trim_end_matches('/').to_string();
    }
    tracing::debug!(base_url = %config.api.base_url, "configuration loaded");

    let api = AdminApiClient::new(&config.api);

    match cli.command {
        Commands::Pages => print_pages(),
        Commands::InitConfig { force } => init_config(&config, cli.config.as_deref(), force)?,
        Commands::List(args) => list(&api, &config, &args).await?,
        Commands::Lookup { kind } => lookup(&api, kind).await?,
        Commands::Upload { client, document_type, file } => {
            upload(&api, client, document_type, file).await?
        }
    }
    Ok(())
}

fn print_pages() {
    let rows: Vec<Vec<String>> = PageId::ALL
        .iter()
        .map(|page| {
            vec![
                page.slug().to_string(),
                page.title().to_string(),
                page.section().title().to_string(),
                page.source_kind().as_str().to_string(),
            ]
        })
        .collect();
    print!("{}", output::render_table(&["Page", "Title", "Section", "Source"], &rows));
}

fn init_config(config: &Config, path: Option<&Path>, force: bool) -> Result<()> {
    let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
    if path.exists() && !force {
        bail!("{} already exists (use --force to replace it)", path.display());
    }
    config.save_to(path)?;
    println!("Wrote {}", path.display());
    Ok(())
}

async fn list(api: &AdminApiClient, config: &Config, args: &ListArgs) -> Result<()> {
    match args.target {
        PageId::Applications => list_page::<Application>(api, config, args).await,
        PageId::VisaCases => list_page::<VisaCase>(api, config, args).await,
        PageId::LoanPlans => list_page::<LoanPlan>(api, config, args).await,
        PageId::Hotels => list_page::<Hotel>(api, config, args).await,
        PageId::StockItems => list_page::<StockItem>(api, config, args).await,
        PageId::Tickets => list_page::<Ticket>(api, config, args).await,
        PageId::Faqs => list_page::<Faq>(api, config, args).await,
        PageId::Clients => list_page::<Client>(api, config, args).await,
        PageId::Leads => list_page::<Lead>(api, config, args).await,
        PageId::MarketplaceProducts => list_page::<MarketplaceProduct>(api, config, args).await,
    }
}

async fn list_page<R: Entity + Serialize>(api: &AdminApiClient, config: &Config, args: &ListArgs) -> Result<()> {
    let page_size = args.page_size.unwrap_or(config.table.default_page_size);
    let model = PaginationModel::new(args.page.get() - 1, page_size)?;

    let source = R::source(api)?;
    let mut controller = PageController::<R>::new(source, page_size)?;

    let descriptor = R::descriptor();
    for (dimension, value) in &args.filters {
        if descriptor.dimension(dimension).is_none() {
            let known: Vec<&str> = descriptor.filters.iter().map(|f| f.key).collect();
            bail!(
                "'{}' has no filter '{}' (available: {})",
                R::PAGE.slug(),
                dimension,
                known.join(", ")
            );
        }
        controller.dispatch(TableAction::SetFilter { dimension: dimension.clone(), value: value.clone() });
    }
    if let Some(term) = &args.search {
        controller.dispatch(TableAction::SetSearch(term.clone()));
    }
    controller.dispatch(TableAction::ChangePage(model));
    controller.run_pending().await;

    let needs_lookups = descriptor.columns.iter().any(|c| matches!(c.kind, CellKind::Lookup(_)));
    let definitions = if needs_lookups {
        Definitions::load(api).await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "lookup tables unavailable, ids will show as placeholders");
            Definitions::new()
        })
    } else {
        Definitions::new()
    };

    let table = controller.table();
    match table.view() {
        TableView::Loading => bail!("{} is still loading", R::PAGE.title()),
        TableView::Error(message) => bail!("{}: {}", R::PAGE.title(), message),
        view @ TableView::Empty if !args.json => {
            println!("{}", view.message().unwrap_or_default());
            return Ok(());
        }
        _ => {}
    }

    if args.json {
        let body = serde_json::json!({
            "page": R::PAGE.slug(),
            "pagination": table.pagination(),
            "total": table.row_count(),
            "rows": table.page_rows(),
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    let columns = table.visible_columns();
    let headers: Vec<&str> = columns.iter().map(|c| c.header).collect();
    let rows: Vec<Vec<String>> = table
        .page_rows()
        .into_iter()
        .map(|record| columns.iter().map(|c| c.display(record, &definitions)).collect())
        .collect();

    print!("{}", output::render_table(&headers, &rows));

    let window = table.pagination().window(table.row_count());
    if window.is_empty() {
        println!("\nPage {} is past the end ({} matching records)", args.page, table.row_count());
    } else {
        println!(
            "\nShowing {}-{} of {} (page {} of {})",
            window.start + 1,
            window.end,
            table.row_count(),
            table.pagination().page + 1,
            table.page_count()
        );
    }
    Ok(())
}

async fn lookup(api: &AdminApiClient, kind: LookupKind) -> Result<()> {
    let entries = api
        .definitions(kind)
        .await
        .with_context(|| format!("failed to load {}", kind.title()))?;
    let table = LookupTable::from_definitions(entries);

    let rows: Vec<Vec<String>> = table.iter().map(|(id, term)| vec![id.to_string(), term.to_string()]).collect();
    print!("{}", output::render_table(&["ID", "Term"], &rows));
    Ok(())
}

async fn upload(api: &AdminApiClient, client: String, document_type: i64, file: PathBuf) -> Result<()> {
    let mut form = UploadDocumentForm::new();
    form.set_client(client);
    form.set_document_type(Some(document_type));
    form.load_file(&file)?;

    if let Some(reason) = form.missing() {
        bail!("cannot upload {}: {}", file.display(), reason);
    }

    tracing::info!(file = %file.display(), bytes = form.file_len(), "uploading document");
    let response = api.upload_document(&form).await.context("upload failed")?;
    println!("{}", response.message.unwrap_or_else(|| "Document uploaded".to_string()));
    Ok(())
}
