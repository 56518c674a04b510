use clap::Subcommand;

#[derive(Subcommand)]
pub(crate) enum CustomerCommands {
    /// Show the account profile
    Profile {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// List transactions
    Transactions {
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        size: u32,
        /// DEPOSIT|WITHDRAWAL|TRANSFER
        #[arg(long = "type")]
        kind: Option<String>,
        #[arg(long)]
        status: Option<String>,
        /// yyyy-mm-dd
        #[arg(long)]
        from: Option<String>,
        /// yyyy-mm-dd
        #[arg(long)]
        to: Option<String>,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// List loan applications
    Loans {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// List support tickets
    Tickets {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Deposit into the account
    Deposit {
        #[arg(long)]
        amount: f64,
    },

    /// Transfer to another account
    Transfer {
        #[arg(long)]
        to: String,
        #[arg(long)]
        amount: f64,
    },

    /// Apply for a loan
    #[command(name = "apply-loan")]
    ApplyLoan {
        /// PERSONAL|HOME|AUTO|EDUCATION
        #[arg(long = "type")]
        loan_type: String,
        #[arg(long)]
        amount: f64,
    },

    /// Open a support ticket
    #[command(name = "open-ticket")]
    OpenTicket {
        #[arg(long = "issue")]
        issue_type: String,
        #[arg(long)]
        description: String,
    },
}
