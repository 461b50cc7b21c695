use chrono::Datelike;
use shared::{
    clamp_to_current_month, effective_summary, insight_text, month_filter_range, top_category,
    total_spent, ExpenseFilters, Period,
};
use yew::prelude::*;

mod auth;
mod components;
mod hooks;
mod services;

use auth::AuthSession;
use components::{ExpenseModal, ExpenseTable, Header, InsightsPanel, SpendingChart, SummaryCards};
use hooks::{use_auth, use_expense_form, use_expenses, use_summary_insights};
use services::api::ApiClient;
use services::dates;

#[derive(Clone, Copy, PartialEq)]
enum Tab {
    Overview,
    Expenses,
}

#[function_component(App)]
fn app() -> Html {
    let session = AuthSession;
    let auth = use_auth(&session);
    let api = use_memo((), |_| ApiClient::from_window(AuthSession));

    let today = dates::today();
    let period = use_state(|| Period::Monthly);
    let filters = use_state(ExpenseFilters::default);
    let selected_month = use_state(|| today.month());
    let selected_year = use_state(|| today.year());
    let active_tab = use_state(|| Tab::Overview);

    let expenses = use_expenses(&api, (*filters).clone(), *period);
    let overview = use_summary_insights(&api, (*filters).clone(), *period);

    let on_saved = {
        let refresh_expenses = expenses.refresh.clone();
        let refresh_overview = overview.refresh.clone();
        Callback::from(move |_| {
            refresh_expenses.emit(());
            refresh_overview.emit(false);
        })
    };
    let form = use_expense_form(&api, on_saved);

    // Refetch whenever the signed-in view changes: sign-in, filters or
    // period. Each is an explicit view change, so the insights fetch is
    // forced past the throttle; only post-mutation refreshes stay gated.
    {
        let refresh_expenses = expenses.refresh.clone();
        let refresh_overview = overview.refresh.clone();
        use_effect_with(
            (auth.signed_in, (*filters).clone(), *period),
            move |(signed_in, _, _)| {
                if *signed_in {
                    refresh_expenses.emit(());
                    refresh_overview.emit(true);
                }
                || ()
            },
        );
    }

    let on_select_weekly = {
        let period = period.clone();
        let filters = filters.clone();
        Callback::from(move |_| {
            period.set(Period::Weekly);
            let mut updated = (*filters).clone();
            updated.start = String::new();
            updated.end = String::new();
            filters.set(updated);
        })
    };

    let on_select_monthly = {
        let period = period.clone();
        let filters = filters.clone();
        let selected_month = selected_month.clone();
        let selected_year = selected_year.clone();
        Callback::from(move |_| {
            let today = dates::today();
            period.set(Period::Monthly);
            selected_month.set(today.month());
            selected_year.set(today.year());
            let mut updated = (*filters).clone();
            updated.start = String::new();
            updated.end = String::new();
            filters.set(updated);
        })
    };

    let on_month_change = {
        let period = period.clone();
        let filters = filters.clone();
        let selected_month = selected_month.clone();
        let selected_year = selected_year.clone();
        Callback::from(move |(month, year): (u32, i32)| {
            let month = clamp_to_current_month(month, year, dates::today());
            selected_month.set(month);
            selected_year.set(year);
            period.set(Period::Monthly);
            if let Some((start, end)) = month_filter_range(year, month) {
                let mut updated = (*filters).clone();
                updated.start = start;
                updated.end = end;
                filters.set(updated);
            }
        })
    };

    let on_all_time = {
        let period = period.clone();
        let filters = filters.clone();
        let selected_month = selected_month.clone();
        let selected_year = selected_year.clone();
        Callback::from(move |_| {
            let today = dates::today();
            if *period == Period::All {
                period.set(Period::Monthly);
                selected_month.set(today.month());
                selected_year.set(today.year());
            } else {
                period.set(Period::All);
            }
            let mut updated = (*filters).clone();
            updated.start = String::new();
            updated.end = String::new();
            filters.set(updated);
        })
    };

    let on_filters_change = {
        let filters = filters.clone();
        Callback::from(move |updated: ExpenseFilters| filters.set(updated))
    };

    let show_overview = {
        let active_tab = active_tab.clone();
        Callback::from(move |_: MouseEvent| active_tab.set(Tab::Overview))
    };
    let show_expenses = {
        let active_tab = active_tab.clone();
        Callback::from(move |_: MouseEvent| active_tab.set(Tab::Expenses))
    };

    let on_add_click = {
        let open_create = form.actions.open_create.clone();
        Callback::from(move |_: MouseEvent| open_create.emit(()))
    };

    let on_sign_in = {
        let session = session.clone();
        Callback::from(move |_: MouseEvent| session.sign_in())
    };

    if !auth.loaded {
        return html! {
            <div class="app-loading">
                <div class="loading">{"Loading..."}</div>
            </div>
        };
    }

    if !auth.signed_in {
        return html! {
            <div class="landing">
                <div class="landing-card">
                    <div class="logo">{"Money"}<span>{"Notes"}</span></div>
                    <p class="punchline">{"A quiet place to understand your spending"}</p>
                    <button class="btn btn-primary" onclick={on_sign_in}>
                        {"Sign in to continue"}
                    </button>
                </div>
            </div>
        };
    }

    let summary = overview.state.summary.as_ref();
    let insights = overview.state.insights.as_ref();
    let effective = effective_summary(summary, insights);
    let expense_count = effective
        .and_then(|s| s.count)
        .unwrap_or(expenses.state.expenses.len() as u64);
    let range = effective.and_then(|s| match (&s.start, &s.end) {
        (Some(start), Some(end)) => Some((start.clone(), end.clone())),
        _ => None,
    });

    html! {
        <div class="app">
            <Header
                period={*period}
                selected_month={*selected_month}
                selected_year={*selected_year}
                on_select_weekly={on_select_weekly}
                on_select_monthly={on_select_monthly}
                on_month_change={on_month_change}
            />

            <main class="main">
                <div class="tab-bar">
                    <button
                        class={if *active_tab == Tab::Overview { "tab tab-active" } else { "tab" }}
                        onclick={show_overview}
                    >
                        {"Overview"}
                    </button>
                    <button
                        class={if *active_tab == Tab::Expenses { "tab tab-active" } else { "tab" }}
                        onclick={show_expenses}
                    >
                        {"Expenses"}
                    </button>
                </div>

                {match *active_tab {
                    Tab::Overview => html! {
                        <section class="overview-section">
                            <SummaryCards
                                total_spent={total_spent(summary, insights)}
                                top_category={top_category(summary, insights).map(str::to_string)}
                                expense_count={expense_count}
                                period={*period}
                                range={range}
                                loading={overview.state.summary_loading}
                            />
                            <SpendingChart
                                expenses={expenses.state.expenses.clone()}
                                loading={expenses.state.loading}
                            />
                            <InsightsPanel
                                insight_text={insight_text(insights).map(str::to_string)}
                                loading={overview.state.insights_loading}
                            />
                        </section>
                    },
                    Tab::Expenses => html! {
                        <ExpenseTable
                            expenses={expenses.state.expenses.clone()}
                            loading={expenses.state.loading}
                            error={expenses.state.error.clone()}
                            filters={(*filters).clone()}
                            period={*period}
                            on_filters_change={on_filters_change}
                            on_edit={form.actions.open_edit.clone()}
                            on_all_time={on_all_time}
                        />
                    },
                }}
            </main>

            <button class="fab" onclick={on_add_click} title="Add expense">
                {"+ Add Expense"}
            </button>

            <ExpenseModal
                show={form.state.visible}
                is_edit={form.state.editing.is_some()}
                form={form.state.form.clone()}
                submitting={form.state.submitting}
                error={form.state.error.clone()}
                on_close={form.actions.close.clone()}
                on_submit={form.actions.submit.clone()}
                on_delete={form.actions.delete.clone()}
                on_amount_change={form.actions.on_amount_change.clone()}
                on_description_change={form.actions.on_description_change.clone()}
                on_date_change={form.actions.on_date_change.clone()}
                on_category_change={form.actions.on_category_change.clone()}
            />
        </div>
    }
}

/// Replace the page with a minimal recovery screen if the app panics.
/// A panicked wasm module cannot continue, so the only action is a reload.
fn install_failure_screen() {
    std::panic::set_hook(Box::new(|info| {
        gloo::console::error!("Application panicked:", info.to_string());
        if let Some(body) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.body())
        {
            body.set_inner_html(
                "<div class=\"fatal-error\">\
                    <h1>Something went wrong</h1>\
                    <p>The app hit an unexpected error and needs to restart.</p>\
                    <button onclick=\"window.location.reload()\">Reload</button>\
                </div>",
            );
        }
    }));
}

fn main() {
    install_failure_screen();
    yew::Renderer::<App>::new().render();
}
