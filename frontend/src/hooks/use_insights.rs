use shared::{ExpenseFilters, Insights, InsightsThrottle, Period, Summary};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::dates;
use crate::services::session::InsightsThrottleStore;

#[derive(Clone, PartialEq)]
pub struct OverviewState {
    pub summary: Option<Summary>,
    pub insights: Option<Insights>,
    pub summary_loading: bool,
    pub insights_loading: bool,
}

pub struct UseSummaryInsightsResult {
    pub state: OverviewState,
    /// Refresh both resources; the boolean forces the insights fetch past
    /// the throttle.
    pub refresh: Callback<bool>,
}

/// Summary and insights snapshots with independent fetch paths.
///
/// The summary fetch always runs. The insights fetch is gated on the
/// persisted last-request timestamp unless forced, and records that
/// timestamp only on success. The two requests run concurrently, carry
/// separate loading flags, and fail independently; failures are logged
/// and leave the previous snapshot in place. Stale responses are dropped
/// via per-resource generation counters.
#[hook]
pub fn use_summary_insights(
    api: &ApiClient,
    filters: ExpenseFilters,
    period: Period,
) -> UseSummaryInsightsResult {
    let summary = use_state(|| Option::<Summary>::None);
    let insights = use_state(|| Option::<Insights>::None);
    let summary_loading = use_state(|| true);
    let insights_loading = use_state(|| false);
    let summary_generation = use_mut_ref(|| 0u64);
    let insights_generation = use_mut_ref(|| 0u64);

    let refresh = {
        let api = api.clone();
        let summary = summary.clone();
        let insights = insights.clone();
        let summary_loading = summary_loading.clone();
        let insights_loading = insights_loading.clone();
        let summary_generation = summary_generation.clone();
        let insights_generation = insights_generation.clone();

        use_callback((filters.clone(), period), move |force: bool, deps| {
            let (filters, period) = deps.clone();
            let range = filters.explicit_range();

            // Summary: the fast path, always refetched.
            {
                let api = api.clone();
                let summary = summary.clone();
                let summary_loading = summary_loading.clone();
                let summary_generation = summary_generation.clone();
                let range = range.clone();

                let request_generation = {
                    let mut current = summary_generation.borrow_mut();
                    *current += 1;
                    *current
                };

                summary_loading.set(true);
                spawn_local(async move {
                    let (start, end) = match &range {
                        Some((start, end)) => (Some(start.as_str()), Some(end.as_str())),
                        None => (None, None),
                    };
                    let result = api.get_summary(period, start, end).await;
                    if *summary_generation.borrow() != request_generation {
                        return;
                    }
                    match result {
                        Ok(data) => summary.set(Some(data)),
                        Err(e) => {
                            gloo::console::error!("Failed to fetch summary:", e.to_string());
                        }
                    }
                    summary_loading.set(false);
                });
            }

            // Insights: the slow AI path, throttled unless forced.
            let should_fetch = InsightsThrottle::default().should_fetch(
                InsightsThrottleStore::last_request_ms(),
                dates::now_ms(),
                force,
            );
            if should_fetch {
                let api = api.clone();
                let insights = insights.clone();
                let insights_loading = insights_loading.clone();
                let insights_generation = insights_generation.clone();

                let request_generation = {
                    let mut current = insights_generation.borrow_mut();
                    *current += 1;
                    *current
                };

                insights_loading.set(true);
                spawn_local(async move {
                    let (start, end) = match &range {
                        Some((start, end)) => (Some(start.as_str()), Some(end.as_str())),
                        None => (None, None),
                    };
                    let result = api.get_insights(period, start, end).await;
                    if *insights_generation.borrow() != request_generation {
                        return;
                    }
                    match result {
                        Ok(data) => {
                            insights.set(Some(data));
                            InsightsThrottleStore::record(dates::now_ms());
                        }
                        Err(e) => {
                            gloo::console::error!("Failed to fetch insights:", e.to_string());
                        }
                    }
                    insights_loading.set(false);
                });
            }
        })
    };

    UseSummaryInsightsResult {
        state: OverviewState {
            summary: (*summary).clone(),
            insights: (*insights).clone(),
            summary_loading: *summary_loading,
            insights_loading: *insights_loading,
        },
        refresh,
    }
}
