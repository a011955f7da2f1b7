//! Command-line argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Study-time tracker.
///
/// Records timed study sessions per subject and reports daily and weekly
/// totals, goal progress, and the consecutive-day streak.
#[derive(Debug, Parser)]
#[command(name = "st", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Act as this user (overrides `default_user` from the config).
    #[arg(short, long, global = true)]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Manage subjects.
    Subject {
        #[command(subcommand)]
        action: SubjectAction,
    },

    /// Record a finished study session.
    Log {
        /// ID of the subject that was studied.
        subject_id: String,

        /// Session length in minutes.
        #[arg(long)]
        minutes: i64,
    },

    /// Show today's totals and per-subject goal progress.
    Dashboard {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show the study streak and the trailing week per subject.
    Progress {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Manage long-term goals.
    Goal {
        #[command(subcommand)]
        action: GoalAction,
    },
}

/// Subject management actions.
#[derive(Debug, Subcommand)]
pub enum SubjectAction {
    /// Create a subject.
    Add {
        /// Display name.
        name: String,

        /// Display color as a hex string.
        #[arg(long, default_value = "#6366F1")]
        color: String,

        /// Display icon.
        #[arg(long, default_value = "📚")]
        icon: String,

        /// Weekly study goal in hours.
        #[arg(long)]
        goal_hours: Option<f64>,
    },

    /// List subjects.
    List {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Delete a subject. Its logged sessions are kept.
    Delete {
        /// ID of the subject to delete.
        id: String,
    },
}

/// Goal management actions.
#[derive(Debug, Subcommand)]
pub enum GoalAction {
    /// Create a goal.
    Add {
        /// Goal title.
        title: String,

        /// Optional longer description.
        #[arg(long)]
        description: Option<String>,

        /// Target date (YYYY-MM-DD).
        #[arg(long)]
        target_date: NaiveDate,
    },

    /// List goals.
    List {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Mark a goal completed.
    Complete {
        /// ID of the goal to complete.
        id: String,
    },
}
