//! resmon CLI Entry Point
//!
//! Dry-run front end for the resource monitor client. Each subcommand builds the
//! typed options, runs the operation against a recording executor and prints
//! the statements that would have been sent:
//! - `create` - Create a resource monitor
//! - `alter` - Modify a resource monitor
//! - `drop` - Remove a resource monitor
//! - `show` - List resource monitors
//!
//! All output to stdout is JSON-only. Logs go to stderr.

use std::time::Instant;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::json;

use resmon::config::load_with_precedence;
use resmon::logging::init_logging;
use resmon::{
    AccountObjectIdentifier, AlterResourceMonitorOptions, Client, CreateResourceMonitorOptions,
    ErrorEnvelope, ErrorInfo, Frequency, Like, Metadata, NotifyUsers, RecordingExecutor,
    ResmonError, ResourceMonitorSet, ShowResourceMonitorOptions, SuccessEnvelope, TriggerAction,
    TriggerDefinition,
};

/// resmon - Resource monitor statement client
#[derive(Parser)]
#[command(name = "resmon")]
#[command(about = "Render and validate resource monitor statements")]
#[command(version)]
struct Cli {
    /// Refuse CREATE/ALTER/DROP (overrides config files)
    #[arg(long, global = true)]
    read_only: bool,

    /// Log level for stderr output (off, error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Quota and schedule parameters shared by create and alter
#[derive(Args)]
struct QuotaArgs {
    /// Credits allowed per interval
    #[arg(long)]
    credit_quota: Option<u64>,

    /// Reset interval (MONTHLY, DAILY, WEEKLY, YEARLY, NEVER)
    #[arg(long)]
    frequency: Option<Frequency>,

    /// Start of the schedule (IMMEDIATELY or a timestamp)
    #[arg(long)]
    start_timestamp: Option<String>,

    /// End of the schedule
    #[arg(long)]
    end_timestamp: Option<String>,
}

/// Notification parameters shared by create and alter
#[derive(Args)]
struct NotifyArgs {
    /// User to notify (repeatable)
    #[arg(long = "notify-user")]
    notify_users: Vec<String>,

    /// Trigger as <percent>:<action>, e.g. 90:suspend (repeatable)
    #[arg(long = "trigger", value_parser = parse_trigger)]
    triggers: Vec<TriggerDefinition>,
}

impl NotifyArgs {
    fn notify_users(&self) -> Option<NotifyUsers> {
        (!self.notify_users.is_empty()).then(|| NotifyUsers::new(self.notify_users.iter().cloned()))
    }

    fn triggers(&self) -> Option<Vec<TriggerDefinition>> {
        (!self.triggers.is_empty()).then(|| self.triggers.clone())
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create a resource monitor
    Create {
        name: String,

        #[arg(long)]
        or_replace: bool,

        #[command(flatten)]
        quota: QuotaArgs,

        #[command(flatten)]
        notify: NotifyArgs,
    },

    /// Modify a resource monitor
    Alter {
        name: String,

        #[arg(long)]
        if_exists: bool,

        #[command(flatten)]
        quota: QuotaArgs,

        #[command(flatten)]
        notify: NotifyArgs,
    },

    /// Remove a resource monitor
    Drop { name: String },

    /// List resource monitors
    Show {
        /// Name pattern ('%' and '_' wildcards)
        #[arg(long)]
        like: Option<String>,
    },
}

impl Commands {
    const fn name(&self) -> &'static str {
        match self {
            Self::Create { .. } => "create",
            Self::Alter { .. } => "alter",
            Self::Drop { .. } => "drop",
            Self::Show { .. } => "show",
        }
    }
}

fn parse_trigger(s: &str) -> Result<TriggerDefinition, String> {
    let (threshold, action) = s
        .split_once(':')
        .ok_or_else(|| format!("expected <percent>:<action>, got {s:?}"))?;
    let threshold = threshold
        .trim()
        .trim_end_matches('%')
        .parse::<u32>()
        .map_err(|e| format!("invalid threshold {threshold:?}: {e}"))?;
    let action = action.trim().parse::<TriggerAction>().map_err(|e| e.to_string())?;
    Ok(TriggerDefinition::new(threshold, action))
}

fn flag(value: bool) -> Option<bool> {
    value.then_some(true)
}

/// Run one command; returns the envelope data and the number of monitors listed
async fn run(
    command: Commands,
    client: &Client<RecordingExecutor>,
) -> anyhow::Result<(serde_json::Value, Option<usize>)> {
    let monitors = client.resource_monitors();

    let listed = match command {
        Commands::Create {
            name,
            or_replace,
            quota,
            notify,
        } => {
            let mut opts = CreateResourceMonitorOptions::default();
            opts.or_replace = flag(or_replace);
            opts.credit_quota = quota.credit_quota;
            opts.frequency = quota.frequency;
            opts.start_timestamp = quota.start_timestamp;
            opts.end_timestamp = quota.end_timestamp;
            opts.notify_users = notify.notify_users();
            opts.triggers = notify.triggers();
            monitors.create(&AccountObjectIdentifier::new(name), opts).await?;
            None
        }
        Commands::Alter {
            name,
            if_exists,
            quota,
            notify,
        } => {
            let set = ResourceMonitorSet {
                credit_quota: quota.credit_quota,
                frequency: quota.frequency,
                start_timestamp: quota.start_timestamp,
                end_timestamp: quota.end_timestamp,
            };
            let mut opts = AlterResourceMonitorOptions::default();
            opts.if_exists = flag(if_exists);
            opts.set = (set != ResourceMonitorSet::default()).then_some(set);
            opts.notify_users = notify.notify_users();
            opts.triggers = notify.triggers();
            monitors.alter(&AccountObjectIdentifier::new(name), opts).await?;
            None
        }
        Commands::Drop { name } => {
            monitors.drop(&AccountObjectIdentifier::new(name)).await?;
            None
        }
        Commands::Show { like } => {
            let opts = ShowResourceMonitorOptions {
                like: like.map(Like::new),
            };
            Some(monitors.show(opts).await?)
        }
    };

    let statements = client.executor().statements();
    Ok(match listed {
        Some(listed) => {
            let count = listed.len();
            (json!({ "statements": statements, "resource_monitors": listed }), Some(count))
        }
        None => (json!({ "statements": statements }), None),
    })
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string(value) {
        Ok(json) => println!("{json}"),
        Err(e) => println!(
            r#"{{"ok": false, "error": {{"code": "INTERNAL_ERROR", "message": "failed to serialize output: {e}"}}}}"#
        ),
    }
}

fn error_envelope(command: &str, err: &anyhow::Error) -> ErrorEnvelope {
    match err.downcast_ref::<ResmonError>() {
        Some(resmon_err) => ErrorEnvelope::from_error(command, resmon_err),
        None => ErrorEnvelope::new(command, ErrorInfo::new("INTERNAL_ERROR", format!("{err:#}"))),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let command_name = cli.command.name();
    let start = Instant::now();

    let config = match load_with_precedence().context("loading configuration") {
        Ok(mut config) => {
            config.read_only |= cli.read_only;
            if cli.log_level.is_some() {
                config.log_level = cli.log_level;
            }
            config
        }
        Err(err) => {
            print_json(&error_envelope(command_name, &err));
            std::process::exit(1);
        }
    };

    init_logging(config.log_level.as_deref());
    let client = Client::with_config(RecordingExecutor::new(), config);

    match run(cli.command, &client).await {
        Ok((data, rows)) => {
            let elapsed = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
            let meta = match rows {
                Some(rows) => Metadata::with_rows(elapsed, rows),
                None => Metadata::new(elapsed),
            };
            print_json(&SuccessEnvelope::new(command_name, data, meta));
        }
        Err(err) => {
            print_json(&error_envelope(command_name, &err));
            std::process::exit(1);
        }
    }
}
