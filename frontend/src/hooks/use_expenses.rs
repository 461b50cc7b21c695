use shared::{resolve_date_range, Expense, ExpenseFilters, Period};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::dates;

#[derive(Clone, PartialEq)]
pub struct ExpensesState {
    pub expenses: Vec<Expense>,
    pub loading: bool,
    pub error: Option<String>,
}

pub struct UseExpensesResult {
    pub state: ExpensesState,
    pub refresh: Callback<()>,
}

/// Local expense store plus its refresh path.
///
/// `refresh` resolves the effective date range from the current filters and
/// period, fetches the list, and replaces the store wholesale. On failure
/// the previous list stays visible behind a user-facing error banner.
/// Responses superseded by a newer refresh are discarded via a request
/// generation counter.
#[hook]
pub fn use_expenses(
    api: &ApiClient,
    filters: ExpenseFilters,
    period: Period,
) -> UseExpensesResult {
    let expenses = use_state(Vec::<Expense>::new);
    let loading = use_state(|| true);
    let error = use_state(|| Option::<String>::None);
    let generation = use_mut_ref(|| 0u64);

    let refresh = {
        let api = api.clone();
        let expenses = expenses.clone();
        let loading = loading.clone();
        let error = error.clone();
        let generation = generation.clone();

        use_callback((filters.clone(), period), move |_, deps| {
            let (filters, period) = deps.clone();
            let api = api.clone();
            let expenses = expenses.clone();
            let loading = loading.clone();
            let error = error.clone();
            let generation = generation.clone();

            let request_generation = {
                let mut current = generation.borrow_mut();
                *current += 1;
                *current
            };

            spawn_local(async move {
                loading.set(true);
                error.set(None);

                let (start, end) = resolve_date_range(period, &filters, dates::today());
                let search = if filters.search.is_empty() {
                    None
                } else {
                    Some(filters.search.as_str())
                };

                let result = api
                    .list_expenses(start.as_deref(), end.as_deref(), search)
                    .await;

                // A newer refresh was issued while this one was in flight
                if *generation.borrow() != request_generation {
                    return;
                }

                match result {
                    Ok(list) => {
                        expenses.set(list);
                    }
                    Err(e) => {
                        gloo::console::error!("Failed to fetch expenses:", e.to_string());
                        error.set(Some(
                            "Something went wrong while loading your expenses.".to_string(),
                        ));
                    }
                }
                loading.set(false);
            });
        })
    };

    UseExpensesResult {
        state: ExpensesState {
            expenses: (*expenses).clone(),
            loading: *loading,
            error: (*error).clone(),
        },
        refresh,
    }
}
