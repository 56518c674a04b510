use clap::Subcommand;

#[derive(Subcommand)]
pub(crate) enum AuditorCommands {
    /// Show bank-wide totals
    Overview {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// List customer login activity
    Logins {
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        size: u32,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// List all transactions
    Transactions {
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        size: u32,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub(crate) enum LoanCommands {
    /// Show loan totals per status
    Counts {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// List loan applications
    List {
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        size: u32,
        #[arg(long)]
        status: Option<String>,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Approve a loan
    Approve { loan_id: i64 },

    /// Reject a loan
    Reject { loan_id: i64 },

    /// Move a loan under review
    Process { loan_id: i64 },
}

#[derive(Subcommand)]
pub(crate) enum SupportCommands {
    /// List support tickets
    Tickets {
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        size: u32,
        #[arg(long)]
        status: Option<String>,
        /// Match against ticket text
        #[arg(long)]
        search: Option<String>,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one ticket
    Show {
        ticket_id: i64,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Tickets opened per weekday
    #[command(name = "weekly-stats")]
    WeeklyStats {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve a ticket
    Resolve {
        ticket_id: i64,
        #[arg(long)]
        note: Option<String>,
    },

    /// Close a ticket
    Close {
        ticket_id: i64,
        #[arg(long)]
        note: Option<String>,
    },

    /// Reopen a ticket
    Reopen { ticket_id: i64 },
}

#[derive(Subcommand)]
pub(crate) enum AdminCommands {
    /// Show the system summary
    Summary {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// List customer accounts
    Users {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// List employees
    Employees {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// List every support ticket
    Tickets {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },
}
