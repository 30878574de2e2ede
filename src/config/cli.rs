use clap::Subcommand;

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Log in and store the session token
    Login {
        #[arg(long)]
        email: String,

        /// Read from VISIT_WEEK_PASSWORD when omitted
        #[arg(long, env = "VISIT_WEEK_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored session token
    Logout,

    /// Check whether a date (YYYY-MM-DD) falls in a visit week
    Check {
        date: String,

        /// Skip the lookup service and answer locally
        #[arg(long)]
        offline: bool,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check whether a date (YYYY-MM-DD) falls in a travel week
    Travel { date: String },

    /// Print a month (YYYY-MM, default current) with its visit days
    Calendar {
        month: Option<String>,

        /// Highlight the week of this date (YYYY-MM-DD)
        #[arg(long)]
        consulted: Option<String>,
    },

    /// Print reminder e-mail and calendar links for a date's visit week
    Reminder {
        date: String,

        /// Recipient; defaults to the address returned by the lookup service
        #[arg(long)]
        email: Option<String>,
    },
}
