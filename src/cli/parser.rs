//! CLI argument parsing with clap
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, arguments, and their documentation.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::models::UserRole;

/// Blog backend: user management API server and its maintenance commands
#[derive(Parser, Debug)]
#[command(name = "blog-rs")]
#[command(about = "Blog backend: user management API server")]
#[command(long_about = "
blog-rs serves the user management API of the blog backend: registration,
login with JWT access tokens, profile updates and admin-only user administration.

EXAMPLES:
    # Start the server with default configuration
    blog-rs serve

    # Start server on custom host and port
    blog-rs serve --host 0.0.0.0 --port 8080

    # Use custom configuration file
    blog-rs --config /path/to/config.toml serve

    # Check configuration without starting server
    blog-rs serve --dry-run

    # Run database migrations
    blog-rs migrate

    # Preview pending migrations
    blog-rs migrate --dry-run

    # Rollback last 2 migrations
    blog-rs migrate --rollback 2

    # Make an existing user the first administrator
    blog-rs promote --email admin@example.com --role admin
")]
#[command(version = crate::clap_long_version())]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Load this single TOML file instead of the layered `config/` directory.
    /// Environment variables (BLOG_*) still override its values.
    ///
    /// Example: --config /etc/blog-rs/production.toml
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection (BLOG_APP_ENV)
    ///
    /// Selects which `config/{environment}.toml` layer is loaded.
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Enable verbose logging (debug level)
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the web server (default)
    ///
    /// Examples:
    ///   blog-rs serve                           # Start with defaults
    ///   blog-rs serve --host 0.0.0.0 --port 80 # Bind to all interfaces on port 80
    ///   blog-rs serve --dry-run                 # Validate config without starting
    Serve {
        /// Host address to bind to
        #[arg(long, value_name = "ADDRESS", value_parser = super::validation::validate_host_address)]
        host: Option<String>,

        /// Port number to listen on
        #[arg(short, long, value_name = "PORT", value_parser = super::validation::validate_port)]
        port: Option<u16>,

        /// Log level override; takes precedence over --verbose/--quiet
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Validate configuration and exit
        #[arg(long)]
        dry_run: bool,
    },
    /// Database migration operations
    ///
    /// Examples:
    ///   blog-rs migrate                    # Apply all pending migrations
    ///   blog-rs migrate --dry-run          # Show pending migrations without applying
    ///   blog-rs migrate --rollback 3       # Rollback the last 3 migrations
    Migrate {
        /// Show pending migrations without applying
        #[arg(long, conflicts_with = "rollback")]
        dry_run: bool,

        /// Number of migrations to rollback (1-100)
        #[arg(long, value_name = "STEPS", conflicts_with = "dry_run", value_parser = super::validation::validate_rollback_steps)]
        rollback: Option<u32>,
    },
    /// Set the role of an existing user directly in the database
    ///
    /// This is how the first administrator is created, since the role
    /// endpoint itself requires an admin token.
    ///
    /// Example:
    ///   blog-rs promote --email admin@example.com --role admin
    Promote {
        /// Email of the user to change
        #[arg(long, value_name = "EMAIL", value_parser = super::validation::validate_email)]
        email: String,

        /// New role: admin, chiefeditor, editor or user
        #[arg(long, value_name = "ROLE", value_parser = super::validation::validate_role)]
        role: UserRole,
    },
}

/// Environment options
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

/// Log level options
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Test => crate::config::Environment::Test,
            Environment::Staging => crate::config::Environment::Staging,
            Environment::Production => crate::config::Environment::Production,
        }
    }
}
