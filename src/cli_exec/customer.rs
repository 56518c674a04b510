use bankdesk::dashboards::{TransactionFilter, TransferRequest};

use super::*;

pub(super) fn handle_customer_command(session: &Session, command: CustomerCommands) -> Result<()> {
    match command {
        CustomerCommands::Profile { json } => {
            let profile = session.customer_profile()?;
            if json {
                return print_json(&profile, "profile");
            }
            println!("name: {}", profile.full_name.as_deref().unwrap_or("-"));
            println!("email: {}", profile.email.as_deref().unwrap_or("-"));
            println!("account: {}", profile.account_number.as_deref().unwrap_or("-"));
            if let Some(balance) = profile.account_balance {
                println!("balance: {:.2}", balance);
            }
            println!("status: {}", profile.account_status.as_deref().unwrap_or("-"));
        }
        CustomerCommands::Transactions {
            page,
            size,
            kind,
            status,
            from,
            to,
            json,
        } => {
            let filter = TransactionFilter {
                page,
                size,
                kind,
                status,
                from_date: from,
                to_date: to,
            };
            let txs = session.customer_transactions(&filter)?;
            if json {
                return print_json(&txs, "transactions");
            }
            for t in &txs.transactions {
                println!(
                    "{} {} {} {:.2} {}",
                    t.id,
                    t.timestamp.as_deref().unwrap_or("-"),
                    t.kind.as_deref().unwrap_or("-"),
                    t.amount.unwrap_or_default(),
                    t.status.as_deref().unwrap_or("-"),
                );
            }
            println!(
                "page {} ({} of {} total){}",
                txs.page,
                txs.transactions.len(),
                txs.total,
                if txs.has_more() { ", more available" } else { "" }
            );
        }
        CustomerCommands::Loans { json } => {
            let loans = session.customer_loans()?;
            if json {
                return print_json(&loans, "loans");
            }
            for l in loans {
                println!(
                    "{} {} {:.2} {}",
                    l.id,
                    l.loan_type.as_deref().unwrap_or("-"),
                    l.amount_requested.unwrap_or_default(),
                    l.status.as_deref().unwrap_or("-"),
                );
            }
        }
        CustomerCommands::Tickets { json } => {
            let tickets = session.customer_tickets()?;
            if json {
                return print_json(&tickets, "tickets");
            }
            for t in tickets {
                println!(
                    "{} {} {}",
                    t.id,
                    t.issue_type.as_deref().unwrap_or("-"),
                    t.status.as_deref().unwrap_or("-"),
                );
            }
        }
        CustomerCommands::Deposit { amount } => {
            if amount <= 0.0 {
                anyhow::bail!("deposit amount must be positive");
            }
            let receipt = session.deposit(amount)?;
            println!("{}", receipt.message.as_deref().unwrap_or("Deposit successful"));
            if let Some(balance) = receipt.balance {
                println!("balance: {:.2}", balance);
            }
        }
        CustomerCommands::Transfer { to, amount } => {
            if amount <= 0.0 {
                anyhow::bail!("transfer amount must be positive");
            }
            let receipt = session.transfer(&TransferRequest {
                recipient_account_number: to,
                amount,
            })?;
            println!("{}", receipt.message.as_deref().unwrap_or("Transfer successful"));
            if let Some(balance) = receipt.balance {
                println!("balance: {:.2}", balance);
            }
        }
        CustomerCommands::ApplyLoan { loan_type, amount } => {
            if amount <= 0.0 {
                anyhow::bail!("loan amount must be positive");
            }
            session.apply_for_loan(&loan_type, amount)?;
            println!("Loan application submitted");
        }
        CustomerCommands::OpenTicket {
            issue_type,
            description,
        } => {
            if description.trim().is_empty() {
                anyhow::bail!("ticket description must not be empty");
            }
            session.open_ticket(&issue_type, &description)?;
            println!("Ticket opened");
        }
    }

    Ok(())
}
