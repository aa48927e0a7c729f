use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;

use super::{Cli, Command, EditArgs, ListArgs};
use crate::client::{ClientError, HttpReferralApi, ReferralApi};
use crate::config::Config;
use crate::db::{self, ReferralRepository};
use crate::domain::{ListFilter, Pagination, Referral, ReferralDraft};
use crate::server::ReferralServer;
use crate::store::{
    CreateReferral, DeleteReferral, LogNotifier, ReferralContext, ReferralList, UpdateReferral,
};
use crate::view::{render_detail, render_table, PageWindow};

/// Execute a parsed command line.
///
/// Service failures are reported through the notifier and end in
/// `ExitCode::FAILURE`; setup failures (config, database, bind) are errors.
pub async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Command::Serve => serve(&config).await,
        Command::Seed => seed(&config),
        Command::List(args) => list(&config, args).await,
        Command::Show { id } => show(&config, id).await,
        Command::Add(fields) => add(&config, fields.into()).await,
        Command::Edit(args) => edit(&config, args).await,
        Command::Delete { id } => delete(&config, id).await,
    }
}

fn open_repository(config: &Config) -> anyhow::Result<ReferralRepository> {
    let path = &config.server.database_path;
    ReferralRepository::open(path)
        .with_context(|| format!("Failed to open database {}", path.display()))
}

async fn serve(config: &Config) -> anyhow::Result<ExitCode> {
    let addr = config.bind_addr()?;
    let repository = open_repository(config)?;
    let server = ReferralServer::bind(addr, repository, &config.server.api_token).await?;
    server.run().await?;
    Ok(ExitCode::SUCCESS)
}

fn seed(config: &Config) -> anyhow::Result<ExitCode> {
    let repository = open_repository(config)?;
    let inserted = db::seed(&repository).context("Failed to seed referrals")?;
    println!("Seeded {} sample referrals", inserted.len());
    Ok(ExitCode::SUCCESS)
}

fn context(config: &Config) -> anyhow::Result<ReferralContext> {
    let api = HttpReferralApi::from_config(&config.client)?;
    tracing::debug!(base_url = api.base_url(), "Using referral service");
    Ok(ReferralContext::new(Arc::new(api), Arc::new(LogNotifier)))
}

fn exit_code(ok: bool) -> ExitCode {
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

// The hook has already reported a failure through the notifier.
fn print_outcome(result: Result<Referral, ClientError>) -> ExitCode {
    match result {
        Ok(referral) => {
            print!("{}", render_detail(&referral));
            ExitCode::SUCCESS
        }
        Err(_) => ExitCode::FAILURE,
    }
}

async fn list(config: &Config, args: ListArgs) -> anyhow::Result<ExitCode> {
    let ctx = context(config)?;
    let limit = args.limit.unwrap_or(config.client.page_size);
    let window = PageWindow::new(&Pagination::new(0, limit, 0));
    let mut filter = ListFilter::page(limit, window.offset_for_page(args.page));
    filter.status = args.status;

    let list = ReferralList::new(&ctx, filter);
    list.activate().await;

    print!("{}", render_table(&list.snapshot()));
    Ok(exit_code(!list.is_error()))
}

async fn show(config: &Config, id: i64) -> anyhow::Result<ExitCode> {
    let ctx = context(config)?;
    match ReferralApi::get(ctx.api.as_ref(), id).await {
        Ok(referral) => {
            print!("{}", render_detail(&referral));
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            ctx.notifier.error(&e.user_message("Failed to get referral"));
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn add(config: &Config, draft: ReferralDraft) -> anyhow::Result<ExitCode> {
    let ctx = context(config)?;
    let create = CreateReferral::new(&ctx);
    Ok(print_outcome(create.mutate(draft).await))
}

async fn edit(config: &Config, args: EditArgs) -> anyhow::Result<ExitCode> {
    let ctx = context(config)?;
    let update = UpdateReferral::new(&ctx);
    Ok(print_outcome(update.mutate(args.id, args.changes()).await))
}

async fn delete(config: &Config, id: i64) -> anyhow::Result<ExitCode> {
    let ctx = context(config)?;
    let delete = DeleteReferral::new(&ctx);
    Ok(match delete.mutate(id).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    })
}
