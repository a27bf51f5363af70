use std::cmp::Ordering;

use chrono::{NaiveDate, NaiveDateTime};

use crate::ClientResult;
use crate::spending::renewal::{days_until_renewal, renewal_status_label};
use crate::spending::types::Subscription;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListSort {
    #[default]
    Name,
    Cost,
    Renewal,
}

impl ListSort {
    pub const ALL: [Self; 3] = [Self::Name, Self::Cost, Self::Renewal];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Cost => "cost",
            Self::Renewal => "renewal",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "name" => Some(Self::Name),
            "cost" => Some(Self::Cost),
            "renewal" => Some(Self::Renewal),
            _ => None,
        }
    }
}

/// Narrows a list: `search` is a case-insensitive substring of the name,
/// `category` a case-insensitive match on the category label (`Other` for
/// uncategorized rows).
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub search: Option<String>,
    pub category: Option<String>,
}

impl ListFilter {
    pub fn matches(&self, subscription: &Subscription) -> bool {
        let name_matches = self.search.as_deref().is_none_or(|term| {
            subscription
                .name
                .to_lowercase()
                .contains(&term.trim().to_lowercase())
        });
        let category_matches = self.category.as_deref().is_none_or(|wanted| {
            subscription
                .category_label()
                .eq_ignore_ascii_case(wanted.trim())
        });
        name_matches && category_matches
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListedSubscription<'a> {
    pub subscription: &'a Subscription,
    pub monthly_cost: f64,
    pub yearly_cost: f64,
    pub renewal_date: NaiveDate,
    pub days_until: i64,
    pub status_label: String,
}

/// Filters and orders subscriptions for display.
///
/// `Name` sorts alphabetically ignoring case, `Cost` by monthly cost with the
/// most expensive first, `Renewal` by days until renewal with overdue rows
/// first. Ties keep their input order. Fails on the first unreadable
/// renewal date.
pub fn list_subscriptions<'a>(
    subscriptions: &'a [Subscription],
    filter: &ListFilter,
    sort: ListSort,
    reference_now: NaiveDateTime,
) -> ClientResult<Vec<ListedSubscription<'a>>> {
    let mut listed = Vec::new();
    for subscription in subscriptions.iter().filter(|item| filter.matches(item)) {
        let renewal_date = subscription.renewal_date()?;
        let monthly_cost = subscription.monthly_cost();
        listed.push(ListedSubscription {
            subscription,
            monthly_cost,
            yearly_cost: monthly_cost * 12.0,
            renewal_date,
            days_until: days_until_renewal(renewal_date, reference_now),
            status_label: renewal_status_label(renewal_date, reference_now),
        });
    }

    listed.sort_by(|left, right| compare_listed(left, right, sort));
    Ok(listed)
}

fn compare_listed(
    left: &ListedSubscription<'_>,
    right: &ListedSubscription<'_>,
    sort: ListSort,
) -> Ordering {
    match sort {
        ListSort::Name => left
            .subscription
            .name
            .to_lowercase()
            .cmp(&right.subscription.name.to_lowercase()),
        ListSort::Cost => right.monthly_cost.total_cmp(&left.monthly_cost),
        ListSort::Renewal => left.days_until.cmp(&right.days_until),
    }
}
