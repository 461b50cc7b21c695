use shared::{Expense, ExpenseFilters, Period};
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ExpenseTableProps {
    pub expenses: Vec<Expense>,
    pub loading: bool,
    pub error: Option<String>,
    pub filters: ExpenseFilters,
    pub period: Period,
    pub on_filters_change: Callback<ExpenseFilters>,
    pub on_edit: Callback<Expense>,
    pub on_all_time: Callback<()>,
}

/// Expense list tab: filter inputs, the all-time toggle and the table.
///
/// On a fetch error the previous rows stay rendered behind the error
/// banner rather than blanking the table.
#[function_component(ExpenseTable)]
pub fn expense_table(props: &ExpenseTableProps) -> Html {
    let filter_handler = {
        let filters = props.filters.clone();
        let on_filters_change = props.on_filters_change.clone();
        move |apply: fn(&mut ExpenseFilters, String)| {
            let filters = filters.clone();
            let on_filters_change = on_filters_change.clone();
            Callback::from(move |e: Event| {
                let input: HtmlInputElement = e.target_unchecked_into();
                let mut updated = filters.clone();
                apply(&mut updated, input.value());
                on_filters_change.emit(updated);
            })
        }
    };

    let on_start_change = filter_handler(|filters, value| filters.start = value);
    let on_end_change = filter_handler(|filters, value| filters.end = value);
    let on_search_change = filter_handler(|filters, value| filters.search = value);

    let on_all_time_click = {
        let on_all_time = props.on_all_time.clone();
        Callback::from(move |_: MouseEvent| on_all_time.emit(()))
    };

    html! {
        <section class="expenses-section">
            <div class="card">
                <div class="card-header">
                    <h2 class="card-title">{"Expenses"}</h2>
                    <p class="card-subtext">{"Detailed list of your transactions"}</p>
                </div>
                <div class="card-content">
                    <div class="grid-filters">
                        <div class="filter-field">
                            <label for="start">{"From"}</label>
                            <input
                                id="start"
                                type="date"
                                value={props.filters.start.clone()}
                                onchange={on_start_change}
                            />
                        </div>
                        <div class="filter-field">
                            <label for="end">{"To"}</label>
                            <input
                                id="end"
                                type="date"
                                value={props.filters.end.clone()}
                                onchange={on_end_change}
                            />
                        </div>
                        <div class="filter-field filter-search">
                            <label for="search">{"Search"}</label>
                            <input
                                id="search"
                                type="text"
                                placeholder="Filter expenses..."
                                value={props.filters.search.clone()}
                                onchange={on_search_change}
                            />
                        </div>
                        <div class="filter-field">
                            <button
                                class={if props.period == Period::All { "btn btn-secondary" } else { "btn btn-outline" }}
                                onclick={on_all_time_click}
                                title="Show all expenses"
                            >
                                {"All Time"}
                            </button>
                        </div>
                    </div>

                    {if let Some(error) = &props.error {
                        html! { <div class="error-banner">{error}</div> }
                    } else {
                        html! {}
                    }}

                    {if props.loading {
                        html! { <div class="loading">{"Loading expenses..."}</div> }
                    } else if props.expenses.is_empty() {
                        html! { <div class="table-empty">{"No expenses found for this view."}</div> }
                    } else {
                        html! {
                            <div class="table-container">
                                <table class="expenses-table">
                                    <thead>
                                        <tr>
                                            <th>{"Date"}</th>
                                            <th>{"Description"}</th>
                                            <th>{"Category"}</th>
                                            <th class="text-right">{"Amount"}</th>
                                            <th class="text-center">{"Actions"}</th>
                                        </tr>
                                    </thead>
                                    <tbody>
                                        {for props.expenses.iter().map(|expense| {
                                            let on_edit = {
                                                let on_edit = props.on_edit.clone();
                                                let expense = expense.clone();
                                                Callback::from(move |_: MouseEvent| on_edit.emit(expense.clone()))
                                            };
                                            html! {
                                                <tr key={expense.id}>
                                                    <td class="date">{expense.date.clone().unwrap_or_else(|| "–".to_string())}</td>
                                                    <td class="description">{&expense.description}</td>
                                                    <td>
                                                        <span class="category-chip">
                                                            {expense.category_name.clone().unwrap_or_else(|| "Uncategorized".to_string())}
                                                        </span>
                                                    </td>
                                                    <td class="text-right">{format!("₹{:.2}", expense.amount)}</td>
                                                    <td class="text-center">
                                                        <button class="btn btn-ghost" onclick={on_edit} title="Edit expense">
                                                            {"Edit"}
                                                        </button>
                                                    </td>
                                                </tr>
                                            }
                                        })}
                                    </tbody>
                                </table>
                            </div>
                        }
                    }}
                </div>
            </div>
        </section>
    }
}
