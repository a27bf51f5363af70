use chrono::NaiveDate;

use crate::ClientResult;
use crate::spending::cycle::monthly_cost;
use crate::spending::date::parse_renewal_date;

/// Label used for subscriptions without a category.
pub const OTHER_CATEGORY: &str = "Other";

pub const DEFAULT_CURRENCY: &str = "USD";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionStatus {
    Active,
    Cancelled,
    Paused,
}

impl SubscriptionStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Cancelled => "cancelled",
            Self::Paused => "paused",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(Self::Active),
            "cancelled" => Some(Self::Cancelled),
            "paused" => Some(Self::Paused),
            _ => None,
        }
    }
}

/// A subscription record as handed over by the data-access layer.
///
/// `billing_cycle` and `next_renewal` stay in their raw textual form: the
/// cycle is the grouping key for per-cycle totals, and the renewal date is
/// parsed on use so a malformed value surfaces as an error at the point it
/// matters.
#[derive(Debug, Clone, PartialEq)]
pub struct Subscription {
    pub id: Option<i64>,
    pub name: String,
    pub cost: f64,
    pub billing_cycle: String,
    pub category: Option<String>,
    pub next_renewal: String,
    pub vendor: Option<String>,
    pub currency: String,
    pub status: SubscriptionStatus,
}

impl Subscription {
    pub fn new(name: &str, cost: f64, billing_cycle: &str, next_renewal: &str) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            cost,
            billing_cycle: billing_cycle.to_string(),
            category: None,
            next_renewal: next_renewal.to_string(),
            vendor: None,
            currency: DEFAULT_CURRENCY.to_string(),
            status: SubscriptionStatus::Active,
        }
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    pub fn with_status(mut self, status: SubscriptionStatus) -> Self {
        self.status = status;
        self
    }

    pub fn category_label(&self) -> &str {
        self.category
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or(OTHER_CATEGORY)
    }

    pub fn monthly_cost(&self) -> f64 {
        monthly_cost(self.cost, &self.billing_cycle)
    }

    pub fn renewal_date(&self) -> ClientResult<NaiveDate> {
        parse_renewal_date(&self.next_renewal)
    }

    pub fn is_active(&self) -> bool {
        self.status == SubscriptionStatus::Active
    }
}
