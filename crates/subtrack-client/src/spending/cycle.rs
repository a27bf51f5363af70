#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BillingCycle {
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl BillingCycle {
    pub const ALL: [Self; 4] = [Self::Weekly, Self::Monthly, Self::Quarterly, Self::Yearly];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "weekly" => Some(Self::Weekly),
            "monthly" => Some(Self::Monthly),
            "quarterly" => Some(Self::Quarterly),
            "yearly" => Some(Self::Yearly),
            _ => None,
        }
    }

    /// Average cost per month using calendar-average divisors
    /// (52 weeks and 4 quarters per 12 months).
    pub fn monthly_equivalent(self, cost: f64) -> f64 {
        match self {
            Self::Weekly => cost * 52.0 / 12.0,
            Self::Monthly => cost,
            Self::Quarterly => cost * 4.0 / 12.0,
            Self::Yearly => cost / 12.0,
        }
    }
}

/// Monthly-equivalent rate of `cost` charged every `billing_cycle`.
///
/// Unrecognized cycles are treated as monthly and return `cost` unchanged.
/// That fallback masks bad input rather than reporting it; the loader warns
/// about such rows with `unrecognized_billing_cycle`.
pub fn monthly_cost(cost: f64, billing_cycle: &str) -> f64 {
    match BillingCycle::parse(billing_cycle) {
        Some(cycle) => cycle.monthly_equivalent(cost),
        None => cost,
    }
}
