mod budget;
mod expense;

pub(crate) use budget::{percent_used, Budget};
pub(crate) use expense::{CategoryTotal, Expense};
