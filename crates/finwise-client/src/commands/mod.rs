pub mod budgets;
pub(crate) mod common;
pub mod demo;
pub mod goals;
pub mod overview;
pub mod tips;
pub mod transactions;
