//! Spending arithmetic over in-memory subscription lists.
//!
//! Everything here is a pure function of its arguments. Time-sensitive
//! operations take the reference moment explicitly instead of reading a clock.

pub mod aggregate;
pub mod cycle;
pub mod date;
pub mod forecast;
pub mod listing;
pub mod renewal;
pub mod types;

pub use aggregate::{
    SpendBreakdown, SpendBucket, average_monthly, by_billing_cycle, by_category, total_monthly,
    total_yearly,
};
pub use cycle::{BillingCycle, monthly_cost};
pub use forecast::{MonthProjection, UpcomingPayment, project_months, upcoming_payments};
pub use listing::{ListFilter, ListSort, ListedSubscription, list_subscriptions};
pub use renewal::{days_until_renewal, is_due_soon, renewal_status_label};
pub use types::{OTHER_CATEGORY, Subscription, SubscriptionStatus};
