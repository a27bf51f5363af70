use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct SourceHint {
    pub kind: String,
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoadSummary {
    pub rows_read: i64,
    pub rows_valid: i64,
    pub rows_invalid: i64,
    pub active: i64,
    pub inactive: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoadIssue {
    pub row: i64,
    pub field: String,
    pub code: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoadWarning {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryData {
    pub as_of: String,
    pub active_subscriptions: i64,
    pub total_monthly: f64,
    pub total_yearly: f64,
    pub average_monthly: f64,
    pub currencies: Vec<String>,
    pub source: SourceHint,
    pub warnings: Vec<LoadWarning>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategorySpendRow {
    pub category: String,
    pub monthly_total: f64,
    pub count: i64,
    pub share: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoriesData {
    pub total_monthly: f64,
    pub rows: Vec<CategorySpendRow>,
    pub source: SourceHint,
    pub warnings: Vec<LoadWarning>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CycleSpendRow {
    pub billing_cycle: String,
    pub recognized: bool,
    pub monthly_total: f64,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CyclesData {
    pub total_monthly: f64,
    pub rows: Vec<CycleSpendRow>,
    pub source: SourceHint,
    pub warnings: Vec<LoadWarning>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpcomingRow {
    pub name: String,
    pub cost: f64,
    pub currency: String,
    pub billing_cycle: String,
    pub category: String,
    pub next_renewal: String,
    pub days_until: i64,
    pub status_label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpcomingData {
    pub as_of: String,
    pub within_days: i64,
    pub total_due: f64,
    pub rows: Vec<UpcomingRow>,
    pub source: SourceHint,
    pub warnings: Vec<LoadWarning>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectionRow {
    pub month: String,
    pub month_start: String,
    pub projected_amount: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ForecastData {
    pub as_of: String,
    pub months: i64,
    pub rows: Vec<ProjectionRow>,
    pub horizon_total: f64,
    pub average_per_month: f64,
    pub upcoming_window_days: i64,
    pub upcoming_total: f64,
    pub upcoming_count: i64,
    pub assumption: String,
    pub source: SourceHint,
    pub warnings: Vec<LoadWarning>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListRow {
    pub name: String,
    pub cost: f64,
    pub currency: String,
    pub billing_cycle: String,
    pub category: String,
    pub status: String,
    pub monthly_cost: f64,
    pub yearly_cost: f64,
    pub next_renewal: String,
    pub days_until: i64,
    pub status_label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListData {
    pub as_of: String,
    pub sort: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub include_inactive: bool,
    pub matching: i64,
    pub monthly_total: f64,
    pub rows: Vec<ListRow>,
    pub source: SourceHint,
    pub warnings: Vec<LoadWarning>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopCategory {
    pub category: String,
    pub monthly_total: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashData {
    pub as_of: String,
    pub total_monthly_spend: f64,
    pub active_subscriptions: i64,
    pub top_category: Option<TopCategory>,
    pub upcoming_window_days: i64,
    pub upcoming_renewals: Vec<UpcomingRow>,
    pub spend_by_category: Vec<CategorySpendRow>,
    pub source: SourceHint,
    pub warnings: Vec<LoadWarning>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidateData {
    pub message: String,
    pub summary: LoadSummary,
    pub source: SourceHint,
    pub warnings: Vec<LoadWarning>,
}
