//! resmon - Typed Resource Monitor Client
//!
//! resmon manages resource monitors (account-level credit quotas with
//! threshold-driven suspend/notify actions) by rendering administrative SQL and
//! decoding the rows the database reports back.
//!
//! # Core Principles
//! - Statements are composed from typed options, never from string templates
//! - Options are validated before anything is rendered or sent
//! - Rows decode all-or-nothing into typed domain objects
//! - The transport is a trait; this crate never opens a connection itself
//!
//! # Module Organization
//! - [`error`] - Error types and handling
//! - [`identifier`] - Object identifiers and their validity rules
//! - [`sql`] - Statement builder
//! - [`resource_monitor`] - Options, row decoder and operations
//! - [`engine`] - Executor trait and the recording executor
//! - [`client`] - Dispatch point binding executor and configuration
//! - [`capability`] - Statement classification and read-only enforcement
//! - [`config`] - Configuration management
//! - [`logging`] - Subscriber setup for binaries
//! - [`output`] - JSON output envelope types

pub mod capability;
pub mod client;
pub mod config;
pub mod engine;
pub mod error;
pub mod identifier;
pub mod logging;
pub mod output;
pub mod resource_monitor;
pub mod sql;

// Re-export commonly used types for convenience
pub use client::Client;
pub use config::ClientConfig;
pub use engine::{Executor, QueryResult, RecordingExecutor, Row};
pub use error::{ResmonError, Result};
pub use identifier::{valid_object_identifier, AccountObjectIdentifier, ObjectType};
pub use output::{ErrorEnvelope, ErrorInfo, Metadata, SuccessEnvelope};
pub use resource_monitor::{
    AlterResourceMonitorOptions, CreateResourceMonitorOptions, Frequency, Like, NotifyUsers,
    ResourceMonitor, ResourceMonitorSet, ResourceMonitors, ShowResourceMonitorOptions,
    TriggerAction, TriggerDefinition,
};
pub use sql::ToSql;
