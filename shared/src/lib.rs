use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Largest amount the backend accepts for a single expense.
pub const MAX_EXPENSE_AMOUNT: f64 = 99_999_999.99;

/// Minimum interval between two insights fetches, in milliseconds.
pub const INSIGHTS_MIN_INTERVAL_MS: f64 = 60_000.0;

/// Local-storage key holding the epoch-millis timestamp of the last
/// successful insights fetch. Persisted per browser, not per session.
pub const INSIGHTS_LAST_REQUEST_KEY: &str = "lastAIRequest";

/// A single expense record as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    /// Non-negative decimal amount, at most `MAX_EXPENSE_AMOUNT`
    pub amount: f64,
    pub description: String,
    /// Calendar date in YYYY-MM-DD format, if the user provided one
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub category_name: Option<String>,
}

/// Request body shared by expense create (POST) and full-replace update (PUT).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpensePayload {
    pub amount: f64,
    pub description: String,
    pub date: Option<String>,
    pub category_name: Option<String>,
}

/// Spending aggregated by category within a summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub name: String,
    pub amount: f64,
}

/// Server-computed aggregate over the selected range. Replaced wholesale on
/// every fetch. Fields beyond `total` are lenient so a partially-shaped
/// response still deserializes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total: f64,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub by_category: Vec<CategoryTotal>,
}

/// AI narrative text. The backend has shipped both a plain string and a
/// `{ "text": ... }` object for this field; both shapes are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InsightText {
    Plain(String),
    Rich { text: String },
}

impl InsightText {
    pub fn text(&self) -> &str {
        match self {
            InsightText::Plain(s) => s,
            InsightText::Rich { text } => text,
        }
    }
}

/// Headline metrics embedded in an insights response.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InsightCards {
    #[serde(default)]
    pub total_spent: Option<f64>,
    #[serde(default)]
    pub top_category: Option<String>,
}

/// Server-computed AI insights. Slower and staler than `Summary` because
/// fetches are throttled. Every field is optional; the display layer falls
/// back across `Summary` and `Insights` as needed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Insights {
    #[serde(default)]
    pub insight: Option<InsightText>,
    #[serde(default)]
    pub cards: Option<InsightCards>,
    /// Fallback summary shape some responses carry
    #[serde(default)]
    pub summary: Option<Summary>,
}

/// Time-bucketing mode driving default date-range computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Weekly,
    Monthly,
    All,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Weekly => "weekly",
            Period::Monthly => "monthly",
            Period::All => "all",
        }
    }
}

/// Transient list-filter state. Dates are YYYY-MM-DD strings, empty when
/// unset (mirrors the date-input values they are bound to).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExpenseFilters {
    pub start: String,
    pub end: String,
    pub search: String,
}

impl ExpenseFilters {
    /// Explicit dates take effect only when both ends are present.
    pub fn explicit_range(&self) -> Option<(String, String)> {
        if self.start.is_empty() || self.end.is_empty() {
            None
        } else {
            Some((self.start.clone(), self.end.clone()))
        }
    }
}

// ---------------------------------------------------------------------------
// Date-range resolution
// ---------------------------------------------------------------------------

const DATE_FMT: &str = "%Y-%m-%d";

/// Monday through Sunday of the week containing `today`.
pub fn week_bounds(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let monday = today - Duration::days(today.weekday().num_days_from_monday() as i64);
    (monday, monday + Duration::days(6))
}

/// First and last calendar day of the given month, or `None` for an invalid
/// (year, month) pair.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((first, next_first - Duration::days(1)))
}

/// Resolve the effective (start, end) date strings for a list query.
///
/// Explicit filter dates override the period unconditionally. Otherwise the
/// period picks the current week, the current month, or no bounds at all.
pub fn resolve_date_range(
    period: Period,
    filters: &ExpenseFilters,
    today: NaiveDate,
) -> (Option<String>, Option<String>) {
    if let Some((start, end)) = filters.explicit_range() {
        return (Some(start), Some(end));
    }
    match period {
        Period::Weekly => {
            let (monday, sunday) = week_bounds(today);
            (
                Some(monday.format(DATE_FMT).to_string()),
                Some(sunday.format(DATE_FMT).to_string()),
            )
        }
        Period::Monthly => match month_bounds(today.year(), today.month()) {
            Some((first, last)) => (
                Some(first.format(DATE_FMT).to_string()),
                Some(last.format(DATE_FMT).to_string()),
            ),
            None => (None, None),
        },
        Period::All => (None, None),
    }
}

/// Clamp a requested month so no future month of the current year can be
/// selected. Past months and other years pass through unchanged.
pub fn clamp_to_current_month(month: u32, year: i32, today: NaiveDate) -> u32 {
    if year == today.year() && month > today.month() {
        today.month()
    } else {
        month
    }
}

/// Filter range (first day, last day) for an explicitly selected month.
pub fn month_filter_range(year: i32, month: u32) -> Option<(String, String)> {
    let (first, last) = month_bounds(year, month)?;
    Some((
        first.format(DATE_FMT).to_string(),
        last.format(DATE_FMT).to_string(),
    ))
}

// ---------------------------------------------------------------------------
// Insights throttle
// ---------------------------------------------------------------------------

/// Minimum-interval gate on repeated insights fetches. Pure decision logic;
/// the caller supplies the persisted last-fetch timestamp and the clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InsightsThrottle {
    pub min_interval_ms: f64,
}

impl Default for InsightsThrottle {
    fn default() -> Self {
        Self {
            min_interval_ms: INSIGHTS_MIN_INTERVAL_MS,
        }
    }
}

impl InsightsThrottle {
    /// Whether an insights fetch should be issued now. `force` bypasses the
    /// interval check entirely (used when filters or period change).
    pub fn should_fetch(&self, last_fetch_ms: Option<f64>, now_ms: f64, force: bool) -> bool {
        if force {
            return true;
        }
        match last_fetch_ms {
            None => true,
            Some(last) => now_ms - last >= self.min_interval_ms,
        }
    }
}

// ---------------------------------------------------------------------------
// API error taxonomy and message composition
// ---------------------------------------------------------------------------

/// Transport- and server-level failures from the expenses API.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// Request never produced a response (offline, DNS, CORS, ...)
    #[error("Network error: {0}")]
    Network(String),
    /// Non-2xx response; `body` is the raw response text
    #[error("Server error {status}")]
    Server { status: u16, body: String },
    /// A request or response body failed to (de)serialize
    #[error("Failed to parse response: {0}")]
    Decode(String),
}

/// Compose the user-facing message for a failed expense creation.
///
/// Server bodies are interpreted with this precedence: a JSON string, a
/// `detail` field, then the first field-level validation error (rendered as
/// "field: message"). Anything else falls back to the raw body or the
/// transport error text.
pub fn create_failure_message(err: &ApiError) -> String {
    let mut msg = String::from("Failed to create expense. ");
    match err {
        ApiError::Server { body, .. } => match serde_json::from_str::<Value>(body) {
            Ok(Value::String(s)) => msg.push_str(&s),
            Ok(Value::Object(map)) => {
                if let Some(detail) = map.get("detail").and_then(Value::as_str) {
                    msg.push_str(detail);
                } else if let Some((field, value)) = map.iter().next() {
                    msg.push_str(&format!("{}: {}", field, first_error_text(value)));
                }
            }
            _ => msg.push_str(body),
        },
        other => msg.push_str(&other.to_string()),
    }
    msg
}

fn first_error_text(value: &Value) -> String {
    let inner = match value {
        Value::Array(items) => items.first().unwrap_or(&Value::Null),
        other => other,
    };
    match inner {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Expense form
// ---------------------------------------------------------------------------

/// Raw text state of the expense modal form, bound to its inputs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExpenseForm {
    pub amount: String,
    pub description: String,
    /// YYYY-MM-DD, empty for "no date"
    pub date: String,
    pub category: String,
}

/// Validation failures caught before any network call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error("Amount and description are required")]
    MissingRequired,
    #[error("Amount must be a valid number")]
    InvalidAmount,
    #[error("Amount must be between 0 and 99,999,999.99")]
    AmountOutOfRange,
}

impl ExpenseForm {
    /// Fresh create form defaulting the date to today.
    pub fn for_date(today: &str) -> Self {
        Self {
            date: today.to_string(),
            ..Self::default()
        }
    }

    /// Pre-populate the form from an existing record for editing.
    pub fn from_expense(expense: &Expense) -> Self {
        Self {
            amount: expense.amount.to_string(),
            description: expense.description.clone(),
            date: expense.date.clone().unwrap_or_default(),
            category: expense.category_name.clone().unwrap_or_default(),
        }
    }

    fn parsed_amount(&self) -> Result<f64, FormError> {
        if self.amount.trim().is_empty() || self.description.trim().is_empty() {
            return Err(FormError::MissingRequired);
        }
        let amount: f64 = self
            .amount
            .trim()
            .parse()
            .map_err(|_| FormError::InvalidAmount)?;
        if !(0.0..=MAX_EXPENSE_AMOUNT).contains(&amount) {
            return Err(FormError::AmountOutOfRange);
        }
        Ok(amount)
    }

    /// Payload for expense creation. Empty category becomes null; the
    /// description is submitted as typed.
    pub fn create_payload(&self) -> Result<ExpensePayload, FormError> {
        let amount = self.parsed_amount()?;
        Ok(ExpensePayload {
            amount,
            description: self.description.clone(),
            date: none_if_empty(&self.date),
            category_name: none_if_empty(&self.category),
        })
    }

    /// Payload for a full-replace update. Text fields are trimmed, and empty
    /// date/category null-coalesce.
    pub fn update_payload(&self) -> Result<ExpensePayload, FormError> {
        let amount = self.parsed_amount()?;
        Ok(ExpensePayload {
            amount,
            description: self.description.trim().to_string(),
            date: none_if_empty(&self.date),
            category_name: none_if_empty(self.category.trim()),
        })
    }
}

fn none_if_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

// ---------------------------------------------------------------------------
// Derived display values
// ---------------------------------------------------------------------------
//
// Computed fresh on every render, never stored. The two endpoints load and
// fail independently, so each value falls back across whichever responses
// are present, in a fixed precedence order.

/// The summary to display: the summary endpoint's response if present, else
/// the fallback summary embedded in an insights response.
pub fn effective_summary<'a>(
    summary: Option<&'a Summary>,
    insights: Option<&'a Insights>,
) -> Option<&'a Summary> {
    summary.or_else(|| insights.and_then(|i| i.summary.as_ref()))
}

/// Total spent: effective summary total, else the insights headline metric.
pub fn total_spent(summary: Option<&Summary>, insights: Option<&Insights>) -> Option<f64> {
    effective_summary(summary, insights)
        .map(|s| s.total)
        .or_else(|| {
            insights
                .and_then(|i| i.cards.as_ref())
                .and_then(|c| c.total_spent)
        })
}

/// Top category: insights headline metric first, else the leading category
/// of the effective summary.
pub fn top_category<'a>(
    summary: Option<&'a Summary>,
    insights: Option<&'a Insights>,
) -> Option<&'a str> {
    insights
        .and_then(|i| i.cards.as_ref())
        .and_then(|c| c.top_category.as_deref())
        .or_else(|| {
            effective_summary(summary, insights)
                .and_then(|s| s.by_category.first())
                .map(|c| c.name.as_str())
        })
}

/// Narrative text from the insights response, whichever shape it arrived in.
pub fn insight_text(insights: Option<&Insights>) -> Option<&str> {
    insights
        .and_then(|i| i.insight.as_ref())
        .map(InsightText::text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_bounds_always_monday_to_sunday() {
        // Every day of an arbitrary week resolves to the same Monday..Sunday
        for day in 16..=22 {
            let (start, end) = week_bounds(date(2025, 6, day));
            assert_eq!(start, date(2025, 6, 16));
            assert_eq!(end, date(2025, 6, 22));
            assert_eq!(start.weekday(), Weekday::Mon);
            assert_eq!(end.weekday(), Weekday::Sun);
        }
    }

    #[test]
    fn test_week_bounds_sunday_stays_in_current_week() {
        // A Sunday reference date must not roll into the following week
        let (start, end) = week_bounds(date(2025, 6, 22));
        assert_eq!(start, date(2025, 6, 16));
        assert_eq!(end, date(2025, 6, 22));
    }

    #[test]
    fn test_week_bounds_across_month_and_year_boundary() {
        // Thu 2026-01-01 belongs to the week of Mon 2025-12-29
        let (start, end) = week_bounds(date(2026, 1, 1));
        assert_eq!(start, date(2025, 12, 29));
        assert_eq!(end, date(2026, 1, 4));
    }

    #[test]
    fn test_month_bounds_lengths() {
        assert_eq!(
            month_bounds(2025, 4).unwrap(),
            (date(2025, 4, 1), date(2025, 4, 30))
        );
        assert_eq!(
            month_bounds(2025, 12).unwrap(),
            (date(2025, 12, 1), date(2025, 12, 31))
        );
        // Leap year February
        assert_eq!(
            month_bounds(2024, 2).unwrap(),
            (date(2024, 2, 1), date(2024, 2, 29))
        );
        assert_eq!(
            month_bounds(2025, 2).unwrap(),
            (date(2025, 2, 1), date(2025, 2, 28))
        );
    }

    #[test]
    fn test_resolve_range_explicit_filters_win() {
        let filters = ExpenseFilters {
            start: "2024-01-10".into(),
            end: "2024-01-20".into(),
            search: String::new(),
        };
        for period in [Period::Weekly, Period::Monthly, Period::All] {
            let (start, end) = resolve_date_range(period, &filters, date(2025, 6, 18));
            assert_eq!(start.as_deref(), Some("2024-01-10"));
            assert_eq!(end.as_deref(), Some("2024-01-20"));
        }
    }

    #[test]
    fn test_resolve_range_partial_filters_fall_back_to_period() {
        // Only one explicit date set: period still decides
        let filters = ExpenseFilters {
            start: "2024-01-10".into(),
            ..Default::default()
        };
        let (start, end) = resolve_date_range(Period::Monthly, &filters, date(2025, 6, 18));
        assert_eq!(start.as_deref(), Some("2025-06-01"));
        assert_eq!(end.as_deref(), Some("2025-06-30"));
    }

    #[test]
    fn test_resolve_range_weekly_and_all() {
        let filters = ExpenseFilters::default();
        let (start, end) = resolve_date_range(Period::Weekly, &filters, date(2025, 6, 18));
        assert_eq!(start.as_deref(), Some("2025-06-16"));
        assert_eq!(end.as_deref(), Some("2025-06-22"));

        let (start, end) = resolve_date_range(Period::All, &filters, date(2025, 6, 18));
        assert_eq!(start, None);
        assert_eq!(end, None);
    }

    #[test]
    fn test_clamp_future_month_in_current_year() {
        let today = date(2025, 6, 18);
        assert_eq!(clamp_to_current_month(9, 2025, today), 6);
        assert_eq!(clamp_to_current_month(6, 2025, today), 6);
        // Past months in the current year are unaffected
        assert_eq!(clamp_to_current_month(3, 2025, today), 3);
        // Other years are unaffected either way
        assert_eq!(clamp_to_current_month(12, 2024, today), 12);
    }

    #[test]
    fn test_throttle_skips_within_interval() {
        let throttle = InsightsThrottle::default();
        let now = 1_700_000_000_000.0;
        assert!(throttle.should_fetch(None, now, false));
        assert!(!throttle.should_fetch(Some(now - 59_999.0), now, false));
        assert!(throttle.should_fetch(Some(now - 60_000.0), now, false));
    }

    #[test]
    fn test_throttle_force_bypasses_interval() {
        let throttle = InsightsThrottle::default();
        let now = 1_700_000_000_000.0;
        assert!(throttle.should_fetch(Some(now - 1.0), now, true));
        assert!(throttle.should_fetch(Some(now), now, true));
    }

    #[test]
    fn test_throttle_forced_load_ignores_persisted_timestamp() {
        // A timestamp persisted by a previous page load must not block the
        // forced fetch issued when a fresh signed-in view comes up, or the
        // panel would stay empty until the user touched a filter.
        let throttle = InsightsThrottle::default();
        let now = 1_700_000_000_000.0;
        assert!(throttle.should_fetch(Some(now - 10_000.0), now, true));
    }

    #[test]
    fn test_create_payload_null_coalesces_category() {
        let form = ExpenseForm {
            amount: "25.50".into(),
            description: "Coffee".into(),
            date: "2024-03-01".into(),
            category: String::new(),
        };
        let payload = form.create_payload().unwrap();
        assert_eq!(payload.amount, 25.50);
        assert_eq!(payload.description, "Coffee");
        assert_eq!(payload.date.as_deref(), Some("2024-03-01"));
        assert_eq!(payload.category_name, None);
    }

    #[test]
    fn test_create_payload_requires_amount_and_description() {
        let form = ExpenseForm {
            amount: "12".into(),
            description: String::new(),
            date: String::new(),
            category: String::new(),
        };
        let err = form.create_payload().unwrap_err();
        assert_eq!(err, FormError::MissingRequired);
        assert_eq!(err.to_string(), "Amount and description are required");
    }

    #[test]
    fn test_create_payload_rejects_bad_amounts() {
        let mut form = ExpenseForm {
            amount: "abc".into(),
            description: "Taxi".into(),
            ..Default::default()
        };
        assert_eq!(form.create_payload().unwrap_err(), FormError::InvalidAmount);

        form.amount = "-5".into();
        assert_eq!(
            form.create_payload().unwrap_err(),
            FormError::AmountOutOfRange
        );

        form.amount = "100000000".into();
        assert_eq!(
            form.create_payload().unwrap_err(),
            FormError::AmountOutOfRange
        );
    }

    #[test]
    fn test_update_payload_trims_and_null_coalesces() {
        let form = ExpenseForm {
            amount: "40".into(),
            description: "  Groceries  ".into(),
            date: String::new(),
            category: "   ".into(),
        };
        let payload = form.update_payload().unwrap();
        assert_eq!(payload.description, "Groceries");
        assert_eq!(payload.date, None);
        assert_eq!(payload.category_name, None);
    }

    #[test]
    fn test_form_round_trips_saved_expense() {
        let expense = Expense {
            id: 7,
            amount: 19.99,
            description: "Lunch".into(),
            date: Some("2024-05-02".into()),
            category_name: Some("Food".into()),
        };
        let form = ExpenseForm::from_expense(&expense);
        let payload = form.update_payload().unwrap();
        assert_eq!(payload.amount, expense.amount);
        assert_eq!(payload.description, expense.description);
        assert_eq!(payload.date, expense.date);
        assert_eq!(payload.category_name, expense.category_name);
    }

    #[test]
    fn test_create_failure_message_field_map() {
        let err = ApiError::Server {
            status: 400,
            body: r#"{"amount": ["must be positive"]}"#.into(),
        };
        assert_eq!(
            create_failure_message(&err),
            "Failed to create expense. amount: must be positive"
        );
    }

    #[test]
    fn test_create_failure_message_detail_and_string() {
        let err = ApiError::Server {
            status: 403,
            body: r#"{"detail": "Not allowed"}"#.into(),
        };
        assert_eq!(
            create_failure_message(&err),
            "Failed to create expense. Not allowed"
        );

        let err = ApiError::Server {
            status: 400,
            body: r#""Bad request body""#.into(),
        };
        assert_eq!(
            create_failure_message(&err),
            "Failed to create expense. Bad request body"
        );
    }

    #[test]
    fn test_create_failure_message_network() {
        let err = ApiError::Network("connection refused".into());
        assert_eq!(
            create_failure_message(&err),
            "Failed to create expense. Network error: connection refused"
        );
    }

    #[test]
    fn test_insight_text_accepts_both_shapes() {
        let plain: Insights =
            serde_json::from_str(r#"{"insight": "Spend less on coffee"}"#).unwrap();
        assert_eq!(insight_text(Some(&plain)), Some("Spend less on coffee"));

        let rich: Insights =
            serde_json::from_str(r#"{"insight": {"text": "Groceries are trending up"}}"#).unwrap();
        assert_eq!(insight_text(Some(&rich)), Some("Groceries are trending up"));

        assert_eq!(insight_text(Some(&Insights::default())), None);
        assert_eq!(insight_text(None), None);
    }

    #[test]
    fn test_display_fallback_chain() {
        let summary = Summary {
            total: 120.0,
            start: None,
            end: None,
            count: Some(4),
            by_category: vec![CategoryTotal {
                name: "Food".into(),
                amount: 80.0,
            }],
        };
        let insights = Insights {
            insight: None,
            cards: Some(InsightCards {
                total_spent: Some(99.0),
                top_category: Some("Transport".into()),
            }),
            summary: Some(Summary {
                total: 111.0,
                start: None,
                end: None,
                count: None,
                by_category: vec![],
            }),
        };

        // Summary present: its total wins, but the insights card still
        // provides the top category.
        assert_eq!(total_spent(Some(&summary), Some(&insights)), Some(120.0));
        assert_eq!(
            top_category(Some(&summary), Some(&insights)),
            Some("Transport")
        );

        // No summary: fall back to the insights-embedded summary.
        assert_eq!(total_spent(None, Some(&insights)), Some(111.0));
        assert_eq!(
            effective_summary(None, Some(&insights)).map(|s| s.total),
            Some(111.0)
        );

        // No embedded summary either: headline card total.
        let cards_only = Insights {
            summary: None,
            ..insights.clone()
        };
        assert_eq!(total_spent(None, Some(&cards_only)), Some(99.0));

        // Summary without card metrics: leading category of the summary.
        assert_eq!(top_category(Some(&summary), None), Some("Food"));
        assert_eq!(total_spent(None, None), None);
    }
}
