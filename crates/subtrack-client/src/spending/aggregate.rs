use crate::spending::types::Subscription;

#[derive(Debug, Clone, PartialEq)]
pub struct SpendBucket {
    pub key: String,
    pub monthly_total: f64,
    pub count: usize,
}

/// Monthly spend grouped by a label, in first-occurrence order of the label.
///
/// The order follows the input list and is not a sorting contract; callers
/// that need a stable order should use [`SpendBreakdown::sorted_by_key`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpendBreakdown {
    buckets: Vec<SpendBucket>,
}

impl SpendBreakdown {
    pub fn buckets(&self) -> &[SpendBucket] {
        &self.buckets
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.buckets
            .iter()
            .find(|bucket| bucket.key == key)
            .map(|bucket| bucket.monthly_total)
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.buckets
            .iter()
            .fold(0.0, |total, bucket| total + bucket.monthly_total)
    }

    pub fn sorted_by_key(&self) -> Vec<SpendBucket> {
        let mut sorted = self.buckets.clone();
        sorted.sort_by(|left, right| left.key.cmp(&right.key));
        sorted
    }

    fn add(&mut self, key: &str, monthly_cost: f64) {
        if let Some(bucket) = self.buckets.iter_mut().find(|bucket| bucket.key == key) {
            bucket.monthly_total += monthly_cost;
            bucket.count += 1;
            return;
        }
        self.buckets.push(SpendBucket {
            key: key.to_string(),
            monthly_total: monthly_cost,
            count: 1,
        });
    }
}

pub fn total_monthly(subscriptions: &[Subscription]) -> f64 {
    subscriptions
        .iter()
        .fold(0.0, |total, subscription| total + subscription.monthly_cost())
}

pub fn total_yearly(subscriptions: &[Subscription]) -> f64 {
    total_monthly(subscriptions) * 12.0
}

pub fn by_category(subscriptions: &[Subscription]) -> SpendBreakdown {
    group_monthly(subscriptions, Subscription::category_label)
}

/// Groups by the raw `billing_cycle` text. Unrecognized cycles get their own
/// bucket even though their cost is normalized as monthly.
pub fn by_billing_cycle(subscriptions: &[Subscription]) -> SpendBreakdown {
    group_monthly(subscriptions, |subscription| {
        subscription.billing_cycle.as_str()
    })
}

/// Mean monthly cost per subscription, zero for an empty list.
pub fn average_monthly(subscriptions: &[Subscription]) -> f64 {
    if subscriptions.is_empty() {
        return 0.0;
    }
    total_monthly(subscriptions) / (subscriptions.len() as f64)
}

fn group_monthly<F>(subscriptions: &[Subscription], key_of: F) -> SpendBreakdown
where
    F: Fn(&Subscription) -> &str,
{
    let mut breakdown = SpendBreakdown::default();
    for subscription in subscriptions {
        breakdown.add(key_of(subscription), subscription.monthly_cost());
    }
    breakdown
}
