//! # Dispatch CLI Entry Point
//!
//! The main executable for the `dispatch` tool. This file drives the application lifecycle:
//!
//! 1. **Initialization**: Parses command-line arguments using [`cli::Cli`] and installs
//!    the log subscriber (`RUST_LOG`, warnings by default).
//! 2. **Connection**: Builds the channel to the dispatch service via `dispatch_client`.
//! 3. **Execution**: Runs the requested subcommand against the [`DispatchClient`].
//! 4. **Presentation**: Prints the resulting dispatches as JSON, errors to standard error.

mod cli;
mod formatter;

use anyhow::{Context, bail};
use clap::Parser;
use cli::{Cli, Commands, DispatchIds, FilterArgs, RecurrenceArgs};
use dispatch_client::{
    ChannelConfig, DispatchClient, DispatchId, DispatchUpdate, ListFilter, ListParams,
    MicrogridId, NewDispatch, RecurrenceRule, RecurrenceUpdate, SortOptions, SortOrder, TlsMode,
};
use formatter::{BatchSummary, FormattedString, GenericError, ListSummary};
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();

    if let Err(err) = run(args).await {
        eprintln!("{}", FormattedString::from(GenericError("Error", format!("{err:#}"))));
        process::exit(1);
    }
}

async fn run(args: Cli) -> anyhow::Result<()> {
    let client = connect(&args).await?;

    match args.command {
        Commands::List {
            microgrid_id,
            filter,
            sort,
            desc,
            page_size,
        } => {
            let mut params = ListParams::new(microgrid_id).with_filter(list_filter(filter));
            if let Some(field) = sort {
                let order = if desc {
                    SortOrder::Descending
                } else {
                    SortOrder::Ascending
                };
                params = params.with_sort(SortOptions::new(field, order));
            }
            if let Some(page_size) = page_size {
                params = params.with_page_size(page_size);
            }
            list(&client, params).await
        }
        Commands::Create {
            microgrid_id,
            dispatch_type,
            start_time,
            duration,
            selector,
            inactive,
            dry_run,
            payload,
            recurrence,
        } => {
            let new = NewDispatch::new(dispatch_type, start_time, duration, selector)
                .with_active(!inactive)
                .with_dry_run(dry_run)
                .with_payload(payload.unwrap_or_default())
                .with_recurrence(recurrence_rule(&recurrence));

            let created = client.create(microgrid_id, new).await?;
            println!("{}", FormattedString::from(&created));
            println!("Dispatch created.");
            Ok(())
        }
        Commands::Update {
            microgrid_id,
            dispatch_id,
            start_time,
            duration,
            selector,
            active,
            payload,
            recurrence,
            no_end,
        } => {
            let mut changes = DispatchUpdate {
                start_time,
                duration,
                selector,
                active,
                payload,
                ..DispatchUpdate::default()
            };
            changes.recurrence = RecurrenceUpdate {
                frequency: recurrence.frequency,
                interval: recurrence.interval,
                end_criteria: recurrence.end_criteria_update(no_end),
                byminutes: recurrence.byminutes,
                byhours: recurrence.byhours,
                byweekdays: recurrence.byweekdays,
                bymonthdays: recurrence.bymonthdays,
                bymonths: recurrence.bymonths,
            };

            if changes.is_empty() {
                bail!("At least one field must be given to update");
            }

            let updated = client
                .update(microgrid_id, dispatch_id, &changes)
                .await
                .with_context(|| format!("Update of dispatch {dispatch_id} failed"))?;
            println!("{}", FormattedString::from(&updated));
            println!("Dispatch updated.");
            Ok(())
        }
        Commands::Get { microgrid_id, ids } => get(&client, microgrid_id, ids).await,
        Commands::Delete { microgrid_id, ids } => delete(&client, microgrid_id, ids).await,
    }
}

async fn connect(args: &Cli) -> anyhow::Result<DispatchClient> {
    let tls = if args.insecure {
        TlsMode::Insecure
    } else {
        TlsMode::from_env()
    };

    let mut config = ChannelConfig::new(args.url.clone()).with_tls_mode(tls);
    if let Some(path) = &args.root_cert {
        let pem = std::fs::read(path)
            .with_context(|| format!("Failed to read root certificate {}", path.display()))?;
        config = config.with_root_certificate(pem);
    }

    debug!(uri = %config.uri(), ?tls, "connecting");
    let client = DispatchClient::connect(&config).await?;
    match &args.key {
        Some(key) => Ok(client.with_api_key(key)?),
        None => Ok(client),
    }
}

async fn list(client: &DispatchClient, params: ListParams) -> anyhow::Result<()> {
    let mut pager = client.list_with(params);
    let mut count = 0;

    while let Some(dispatch) = pager.next().await {
        println!("{}", FormattedString::from(&dispatch?));
        count += 1;
    }

    println!("{}", FormattedString::from(ListSummary(count)));
    Ok(())
}

async fn get(
    client: &DispatchClient,
    microgrid_id: MicrogridId,
    ids: Vec<DispatchIds>,
) -> anyhow::Result<()> {
    let mut summary = BatchSummary {
        action: "fetched",
        succeeded: Vec::new(),
        failed: Vec::new(),
    };

    for id in cli::flatten_ids(ids) {
        match client.get(microgrid_id, id).await {
            Ok(dispatch) => {
                println!("{}", FormattedString::from(&dispatch));
                summary.succeeded.push(id);
            }
            Err(err) => {
                report_failure("Error getting dispatch", id, err);
                summary.failed.push(id);
            }
        }
    }

    finish_batch(&summary)
}

async fn delete(
    client: &DispatchClient,
    microgrid_id: MicrogridId,
    ids: Vec<DispatchIds>,
) -> anyhow::Result<()> {
    let mut summary = BatchSummary {
        action: "deleted",
        succeeded: Vec::new(),
        failed: Vec::new(),
    };

    for id in cli::flatten_ids(ids) {
        match client.delete(microgrid_id, id).await {
            Ok(()) => summary.succeeded.push(id),
            Err(err) => {
                report_failure("Error deleting dispatch", id, err);
                summary.failed.push(id);
            }
        }
    }

    println!("{}", FormattedString::from(&summary));
    finish_batch(&summary)
}

fn report_failure(msg: &'static str, id: DispatchId, err: impl std::fmt::Display) {
    eprintln!(
        "{}",
        FormattedString::from(GenericError(msg, format!("{id}: {err}")))
    );
}

fn finish_batch(summary: &BatchSummary) -> anyhow::Result<()> {
    match (summary.succeeded.is_empty(), summary.failed.is_empty()) {
        (_, true) => Ok(()),
        (true, false) => bail!("All requests failed"),
        (false, false) => bail!("Some requests failed"),
    }
}

fn list_filter(args: FilterArgs) -> ListFilter {
    ListFilter {
        selectors: args.selectors,
        start_from: args.start_from,
        start_to: args.start_to,
        end_from: args.end_from,
        end_to: args.end_to,
        active: args.active,
        dry_run: args.dry_run,
    }
}

fn recurrence_rule(args: &RecurrenceArgs) -> RecurrenceRule {
    if args.frequency.is_none() {
        return RecurrenceRule::default();
    }

    RecurrenceRule {
        frequency: args.frequency,
        interval: args.interval.unwrap_or(1),
        end_criteria: args.end_criteria(),
        byminutes: args.byminutes.clone().unwrap_or_default(),
        byhours: args.byhours.clone().unwrap_or_default(),
        byweekdays: args.byweekdays.clone().unwrap_or_default(),
        bymonthdays: args.bymonthdays.clone().unwrap_or_default(),
        bymonths: args.bymonths.clone().unwrap_or_default(),
    }
}
