use bankdesk::dashboards::{LoanDecision, TicketAction, TicketFilter};

use super::*;

pub(super) fn handle_auditor_command(session: &Session, command: AuditorCommands) -> Result<()> {
    match command {
        AuditorCommands::Overview { json } => {
            let o = session.auditor_overview()?;
            if json {
                return print_json(&o, "overview");
            }
            println!("customers: {}", o.total_customers);
            println!("transactions: {}", o.total_transactions);
            if let Some(d) = o.total_deposits {
                println!("deposits: {:.2}", d);
            }
            if let Some(w) = o.total_withdrawals {
                println!("withdrawals: {:.2}", w);
            }
        }
        AuditorCommands::Logins { page, size, json } => {
            let logins = session.auditor_login_activities(page, size)?;
            if json {
                return print_json(&logins, "login activity");
            }
            for a in &logins.content {
                println!(
                    "{} {} {} {}",
                    a.timestamp.as_deref().unwrap_or("-"),
                    a.customer_email.as_deref().unwrap_or("-"),
                    a.ip_address.as_deref().unwrap_or("-"),
                    a.device.as_deref().unwrap_or("-"),
                );
            }
            println!(
                "page {} of {}",
                logins.number + 1,
                logins.total_pages.max(1)
            );
        }
        AuditorCommands::Transactions { page, size, json } => {
            let txs = session.auditor_transactions(page, size)?;
            if json {
                return print_json(&txs, "transactions");
            }
            for t in &txs.content {
                println!(
                    "{} {} {} {:.2}",
                    t.id,
                    t.timestamp.as_deref().unwrap_or("-"),
                    t.kind.as_deref().unwrap_or("-"),
                    t.amount.unwrap_or_default(),
                );
            }
            println!("page {} of {}", txs.number + 1, txs.total_pages.max(1));
        }
    }

    Ok(())
}

pub(super) fn handle_loan_command(session: &Session, command: LoanCommands) -> Result<()> {
    let (loan_id, decision) = match command {
        LoanCommands::Counts { json } => {
            let counts = session.loan_counts()?;
            if json {
                return print_json(&counts, "loan counts");
            }
            for (status, n) in counts {
                println!("{}: {}", status, n);
            }
            return Ok(());
        }
        LoanCommands::List {
            page,
            size,
            status,
            json,
        } => {
            let loans = session.loans(page, size, status.as_deref())?;
            if json {
                return print_json(&loans, "loans");
            }
            for l in &loans.content {
                println!(
                    "{} {} {} {:.2} {}",
                    l.id,
                    l.customer_name.as_deref().unwrap_or("-"),
                    l.loan_type.as_deref().unwrap_or("-"),
                    l.amount_requested.unwrap_or_default(),
                    l.status.as_deref().unwrap_or("-"),
                );
            }
            println!("page {} of {}", loans.number + 1, loans.total_pages.max(1));
            return Ok(());
        }
        LoanCommands::Approve { loan_id } => (loan_id, LoanDecision::Approve),
        LoanCommands::Reject { loan_id } => (loan_id, LoanDecision::Reject),
        LoanCommands::Process { loan_id } => (loan_id, LoanDecision::Process),
    };

    let loan = session.decide_loan(loan_id, decision)?;
    println!(
        "Loan {} is now {}",
        loan.id,
        loan.status.as_deref().unwrap_or("updated")
    );
    Ok(())
}

pub(super) fn handle_support_command(session: &Session, command: SupportCommands) -> Result<()> {
    let (ticket_id, action, note) = match command {
        SupportCommands::Tickets {
            page,
            size,
            status,
            search,
            json,
        } => {
            let tickets = session.support_tickets(&TicketFilter {
                page,
                size,
                status,
                search,
            })?;
            if json {
                return print_json(&tickets, "tickets");
            }
            for t in &tickets.content {
                println!(
                    "{} {} {} {}",
                    t.id,
                    t.issue_type.as_deref().unwrap_or("-"),
                    t.status.as_deref().unwrap_or("-"),
                    t.description.as_deref().unwrap_or(""),
                );
            }
            println!(
                "page {} of {}",
                tickets.number + 1,
                tickets.total_pages.max(1)
            );
            return Ok(());
        }
        SupportCommands::Show { ticket_id, json } => {
            let t = session.support_ticket(ticket_id)?;
            if json {
                return print_json(&t, "ticket");
            }
            println!("ticket {}", t.id);
            println!("issue: {}", t.issue_type.as_deref().unwrap_or("-"));
            println!("status: {}", t.status.as_deref().unwrap_or("-"));
            println!("opened: {}", t.created_at.as_deref().unwrap_or("-"));
            if let Some(by) = t.handled_by.as_deref() {
                println!("handled by: {}", by);
            }
            if let Some(note) = t.resolution_note.as_deref() {
                println!("resolution: {}", note);
            }
            println!("{}", t.description.as_deref().unwrap_or(""));
            return Ok(());
        }
        SupportCommands::WeeklyStats { json } => {
            let stats = session.support_weekly_stats()?;
            if json {
                return print_json(&stats, "weekly stats");
            }
            for s in &stats {
                println!("{} {}", s.day, s.count);
            }
            return Ok(());
        }
        SupportCommands::Resolve { ticket_id, note } => (ticket_id, TicketAction::Resolve, note),
        SupportCommands::Close { ticket_id, note } => (ticket_id, TicketAction::Close, note),
        SupportCommands::Reopen { ticket_id } => (ticket_id, TicketAction::Reopen, None),
    };

    let ticket = session.update_ticket(ticket_id, action, note.as_deref())?;
    println!(
        "Ticket {} is now {}",
        ticket.id,
        ticket.status.as_deref().unwrap_or("updated")
    );
    Ok(())
}

pub(super) fn handle_admin_command(session: &Session, command: AdminCommands) -> Result<()> {
    match command {
        AdminCommands::Summary { json } => {
            let s = session.super_admin_summary()?;
            if json {
                return print_json(&s, "summary");
            }
            println!("users: {} ({} active)", s.total_users, s.active_users);
            println!("employees: {}", s.total_employees);
            println!("loans: {}", s.total_loans);
            println!("pending tickets: {}", s.pending_tickets);
            if let Some(assets) = s.total_assets {
                println!("assets: {:.2}", assets);
            }
        }
        AdminCommands::Users { json } => {
            let users = session.super_admin_users()?;
            if json {
                return print_json(&users, "users");
            }
            for u in users {
                println!(
                    "{} {} {}",
                    u.id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string()),
                    u.full_name.as_deref().unwrap_or("-"),
                    u.email.as_deref().unwrap_or("-"),
                );
            }
        }
        AdminCommands::Employees { json } => {
            let employees = session.super_admin_employees()?;
            if json {
                return print_json(&employees, "employees");
            }
            for e in employees {
                println!(
                    "{} {} {}",
                    e.id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string()),
                    e.name.as_deref().unwrap_or("-"),
                    e.role.as_deref().unwrap_or("-"),
                );
            }
        }
        AdminCommands::Tickets { json } => {
            let tickets = session.super_admin_tickets()?;
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
    }

    Ok(())
}
