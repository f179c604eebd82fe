pub mod finance_testkit;
