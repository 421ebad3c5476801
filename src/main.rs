use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use quarantine_console::{
    config::{self, Config},
    context::AppContext,
    domain::{
        Contact, Enterprise, EnterpriseDraft, EnterpriseStatus, EnterpriseType, EnterpriseUpdate,
        QuarantineTask, ReportSummary, TaskStatus, TaskStatusUpdate,
    },
    logger::{self, LogTag},
    pages::{self, render, ListRequest, Resource, SUMMARY_PATH},
};
use std::collections::BTreeMap;

#[derive(Parser)]
#[command(name = "quarantine-console")]
#[command(about = "Quarantine and inspection records console", long_about = None)]
struct Cli {
    /// Config file (defaults are used when it does not exist)
    #[arg(long, global = true, default_value = config::CONFIG_FILE_PATH)]
    config: String,

    /// Enable debug logs for a tag (cache, request, table, mock, webserver, all)
    #[arg(long = "debug", global = true, value_name = "TAG")]
    debug: Vec<String>,

    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write the effective configuration to the config path
    InitConfig,
    /// Run the mock REST backend until Ctrl-C
    Serve {
        /// Override [webserver] port
        #[arg(long)]
        port: Option<u16>,
    },
    /// List one page of a resource
    List(ListArgs),
    /// Show one record
    Show { resource: Resource, id: String },
    /// Show the report summary
    Summary,
    /// Register an enterprise (starts PENDING)
    CreateEnterprise {
        #[arg(long)]
        name: String,
        #[arg(long = "type", value_name = "TYPE")]
        enterprise_type: EnterpriseType,
        #[arg(long)]
        contact: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long)]
        code: Option<String>,
        #[arg(long)]
        address: Option<String>,
    },
    /// Change an enterprise's registration status
    SetEnterpriseStatus { id: String, status: EnterpriseStatus },
    DeleteEnterprise { id: String },
    /// Move a quarantine task to a new status
    SetTaskStatus { id: String, status: TaskStatus },
}

#[derive(Args)]
struct ListArgs {
    resource: Resource,
    /// Name or code contains (case-insensitive)
    #[arg(long)]
    keyword: Option<String>,
    #[arg(long)]
    status: Option<String>,
    #[arg(long = "type", value_name = "TYPE")]
    enterprise_type: Option<String>,
    #[arg(long)]
    level: Option<String>,
    #[arg(long)]
    priority: Option<String>,
    #[arg(long)]
    conclusion: Option<String>,
    /// Range start, YYYY-MM-DD
    #[arg(long)]
    from: Option<String>,
    /// Range end, YYYY-MM-DD (inclusive)
    #[arg(long)]
    to: Option<String>,
    #[arg(long, default_value_t = 1)]
    page: usize,
    #[arg(long)]
    page_size: Option<usize>,
}

impl ListArgs {
    fn into_request(self) -> ListRequest {
        let mut selects = BTreeMap::new();
        for (name, value) in [
            ("status", self.status),
            ("type", self.enterprise_type),
            ("level", self.level),
            ("priority", self.priority),
            ("conclusion", self.conclusion),
        ] {
            if let Some(value) = value {
                selects.insert(name.to_string(), value);
            }
        }

        ListRequest {
            keyword: self.keyword,
            selects,
            from: self.from,
            to: self.to,
            page: self.page,
            page_size: self.page_size,
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logger::init_from_flags(&cli.debug, cli.verbose, cli.quiet);

    if let Err(e) = run(cli).await {
        logger::error(LogTag::System, &format!("{:#}", e));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    config::load_config(&cli.config)
        .map_err(anyhow::Error::msg)
        .with_context(|| format!("Failed to load config from {}", cli.config))?;
    let config = config::get_config_clone();

    match cli.command {
        Command::InitConfig => {
            config::save_config(&config, &cli.config).map_err(anyhow::Error::msg)?;
            logger::info(LogTag::Config, &format!("Wrote configuration to {}", cli.config));
            return Ok(());
        }
        Command::Serve { port } => return serve(config, port).await,
        _ => {}
    }

    let context = AppContext::start(config)
        .await
        .map_err(anyhow::Error::msg)
        .context("Failed to start application context")?;
    let result = execute(&context, cli.command).await;
    context.shutdown().await;
    result
}

#[cfg(feature = "web")]
async fn serve(config: Config, port: Option<u16>) -> Result<()> {
    let mut webserver = config.webserver.clone();
    if let Some(port) = port {
        webserver.port = port;
    }

    let handle = quarantine_console::webserver::start_server(&webserver, &config.api, &config.pagination)
        .await
        .map_err(anyhow::Error::msg)?;
    logger::info(
        LogTag::System,
        &format!("Serving {}/api, press Ctrl-C to stop", handle.base_url()),
    );

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;
    handle.stop().await.map_err(anyhow::Error::msg)
}

#[cfg(not(feature = "web"))]
async fn serve(_config: Config, _port: Option<u16>) -> Result<()> {
    anyhow::bail!("this build does not include the mock backend (enable feature `web`)")
}

async fn execute(context: &AppContext, command: Command) -> Result<()> {
    let dispatcher = &context.dispatcher;

    match command {
        Command::InitConfig | Command::Serve { .. } => {
            anyhow::bail!("this command runs without a client context")
        }
        Command::List(args) => {
            let resource = args.resource;
            let output = pages::list_table(
                resource,
                dispatcher,
                &context.config.pagination,
                &args.into_request(),
            )
            .await
            .with_context(|| format!("Invalid {} search", resource.title()))?;
            logger::print_stdout_safe(&output);
        }
        Command::Show { resource, id } => {
            let output = pages::detail_table(resource, dispatcher, &id).await?;
            logger::print_stdout_safe(&output);
        }
        Command::Summary => {
            let summary: ReportSummary = dispatcher
                .get(SUMMARY_PATH, Default::default())
                .await?;
            logger::print_stdout_safe(&render::render_summary(&summary));
        }
        Command::CreateEnterprise {
            name,
            enterprise_type,
            contact,
            phone,
            code,
            address,
        } => {
            let draft = EnterpriseDraft {
                name: Some(name),
                code,
                enterprise_type: Some(enterprise_type),
                contact: Some(Contact {
                    name: contact,
                    phone,
                }),
                address,
            };
            let created: Enterprise = dispatcher.post(Resource::Enterprises.path(), &draft).await?;
            pages::invalidate_after_write(Resource::Enterprises, dispatcher);
            logger::print_stdout_safe(&format!(
                "Registered {} ({}) as {}\n",
                created.name, created.code, created.id
            ));
        }
        Command::SetEnterpriseStatus { id, status } => {
            let update = EnterpriseUpdate {
                status: Some(status),
                ..Default::default()
            };
            let path = format!("{}/{}", Resource::Enterprises.path(), id);
            let updated: Enterprise = dispatcher.put(&path, &update).await?;
            pages::invalidate_after_write(Resource::Enterprises, dispatcher);
            logger::print_stdout_safe(&format!(
                "{} is now {}\n",
                updated.name,
                updated.status.label()
            ));
        }
        Command::DeleteEnterprise { id } => {
            let path = format!("{}/{}", Resource::Enterprises.path(), id);
            let removed: Enterprise = dispatcher.delete(&path).await?;
            pages::invalidate_after_write(Resource::Enterprises, dispatcher);
            logger::print_stdout_safe(&format!("Deleted {} ({})\n", removed.name, removed.code));
        }
        Command::SetTaskStatus { id, status } => {
            let path = format!("{}/{}/status", Resource::Tasks.path(), id);
            let task: QuarantineTask = dispatcher.patch(&path, &TaskStatusUpdate { status }).await?;
            pages::invalidate_after_write(Resource::Tasks, dispatcher);
            logger::print_stdout_safe(&format!(
                "{} is now {}\n",
                task.task_no,
                task.status.label()
            ));
        }
    }

    Ok(())
}
