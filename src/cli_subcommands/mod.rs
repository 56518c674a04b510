mod customer;
mod employee;
mod login;

pub(crate) use self::customer::CustomerCommands;
pub(crate) use self::employee::{AdminCommands, AuditorCommands, LoanCommands, SupportCommands};
pub(crate) use self::login::LoginCommands;
