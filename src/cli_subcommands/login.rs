use clap::Subcommand;

#[derive(Subcommand)]
pub(crate) enum LoginCommands {
    /// Sign in as a customer
    Customer {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Sign in as an employee; the role comes from the issued token
    Employee {
        #[arg(long)]
        employee_id: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
}
