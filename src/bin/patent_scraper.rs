use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use patent_scraper::app::App;
use patent_scraper::config::{ConfigLoader, ResolvedConfig};
use patent_scraper::domain::{LookupTarget, PatentId};
use patent_scraper::error::ScraperError;
use patent_scraper::fetch::HttpFetcher;
use patent_scraper::output::{JsonOutput, LogSink, RunOutput};

#[derive(Parser)]
#[command(name = "patent-scraper")]
#[command(about = "Scrape Google Patents pages into structured JSON records")]
#[command(version, author)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Fetch and parse patents (identifiers or config list)")]
    Scrape(ScrapeArgs),
}

#[derive(Args)]
struct ScrapeArgs {
    #[arg(help = "Publication numbers, e.g. US2668287A; replaces the config list")]
    patents: Vec<String>,

    #[arg(long)]
    config: Option<String>,

    #[arg(long, conflicts_with = "patents", help = "Scrape a single patent page URL")]
    url: Option<String>,

    #[arg(long = "abstract")]
    include_abstract: bool,

    #[arg(long = "description")]
    include_description: bool,

    #[arg(long = "claim")]
    include_claim: bool,

    #[arg(long)]
    download_pdf: bool,

    #[arg(long)]
    download_dir: Option<Utf8PathBuf>,

    #[arg(long, help = "Proxy for every request; an empty value disables proxying")]
    proxy: Option<String>,

    #[arg(long, help = "Skip TLS certificate checks for PDF downloads only")]
    insecure_pdf: bool,
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(err) = report.downcast_ref::<ScraperError>() {
            return ExitCode::from(map_exit_code(err));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &ScraperError) -> u8 {
    match error {
        ScraperError::MissingConfig | ScraperError::NoIdentifiers => 2,
        _ => 1,
    }
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Scrape(args) => run_scrape(args),
    }
}

fn run_scrape(args: ScrapeArgs) -> miette::Result<()> {
    let needs_config_list = args.patents.is_empty() && args.url.is_none();
    let mut config = ConfigLoader::resolve(args.config.as_deref(), needs_config_list)?;
    apply_overrides(&mut config, &args);

    let pages = HttpFetcher::new(&config.transport)?;
    let documents = HttpFetcher::new(&config.pdf_transport)?;
    let mut app = App::with_layout(pages, documents, config.options.clone(), &config.layout)?;

    if let Some(url) = args.url {
        let lookup = app.single(&LookupTarget::Url(url));
        JsonOutput::print_lookup(&lookup).into_diagnostic()?;
        return Ok(());
    }

    let patents = if args.patents.is_empty() {
        config.patents
    } else {
        args.patents
            .iter()
            .map(|value| value.parse::<PatentId>())
            .collect::<Result<Vec<_>, _>>()?
    };
    app.register_all(patents);

    let report = app.run(&LogSink)?;
    JsonOutput::print_run(&RunOutput {
        report: &report,
        statuses: app.statuses(),
        records: app.records(),
    })
    .into_diagnostic()?;
    Ok(())
}

fn apply_overrides(config: &mut ResolvedConfig, args: &ScrapeArgs) {
    let extract = &mut config.options.extract;
    extract.include_abstract |= args.include_abstract;
    extract.include_description |= args.include_description;
    extract.include_claim |= args.include_claim;
    config.options.auto_download_pdf |= args.download_pdf;
    if let Some(dir) = &args.download_dir {
        config.options.download_dir = dir.clone();
    }
    if let Some(proxy) = &args.proxy {
        config.transport.proxy = Some(proxy.clone());
        config.pdf_transport.proxy = Some(proxy.clone());
    }
    config.pdf_transport.accept_invalid_certs |= args.insecure_pdf;
}
