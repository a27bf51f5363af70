pub mod spending_testkit;
