use shared::{ExpenseForm, MAX_EXPENSE_AMOUNT};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ExpenseModalProps {
    pub show: bool,
    pub is_edit: bool,
    pub form: ExpenseForm,
    pub submitting: bool,
    pub error: Option<String>,
    pub on_close: Callback<()>,
    pub on_submit: Callback<()>,
    pub on_delete: Callback<()>,
    pub on_amount_change: Callback<Event>,
    pub on_description_change: Callback<Event>,
    pub on_date_change: Callback<Event>,
    pub on_category_change: Callback<Event>,
}

/// Modal form for creating or editing an expense. All controls are
/// disabled while a mutation is in flight so submissions cannot overlap.
#[function_component(ExpenseModal)]
pub fn expense_modal(props: &ExpenseModalProps) -> Html {
    if !props.show {
        return html! {};
    }

    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let on_modal_click = Callback::from(|e: MouseEvent| {
        e.stop_propagation();
    });

    let on_cancel_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let on_delete_click = {
        let on_delete = props.on_delete.clone();
        Callback::from(move |_: MouseEvent| on_delete.emit(()))
    };

    let on_form_submit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };

    let submit_label = match (props.submitting, props.is_edit) {
        (true, true) => "Updating...",
        (true, false) => "Adding...",
        (false, true) => "Save Changes",
        (false, false) => "Save Expense",
    };

    html! {
        <div class="modal-overlay" onclick={on_backdrop_click}>
            <div class="modal-content" onclick={on_modal_click}>
                <div class="modal-header">
                    <h2>{if props.is_edit { "Edit Expense" } else { "Add New Expense" }}</h2>
                    <p class="modal-subtext">
                        {if props.is_edit {
                            "Make changes to your expense here."
                        } else {
                            "Add the details of your new expense."
                        }}
                    </p>
                </div>

                <form class="expense-form" onsubmit={on_form_submit}>
                    <div class="form-row">
                        <div class="form-group">
                            <label for="amount">{"Amount *"}</label>
                            <input
                                id="amount"
                                type="number"
                                step="0.01"
                                min="0"
                                max={MAX_EXPENSE_AMOUNT.to_string()}
                                placeholder="0.00"
                                value={props.form.amount.clone()}
                                onchange={props.on_amount_change.clone()}
                                disabled={props.submitting}
                            />
                        </div>
                        <div class="form-group">
                            <label for="date">{"Date"}</label>
                            <input
                                id="date"
                                type="date"
                                value={props.form.date.clone()}
                                onchange={props.on_date_change.clone()}
                                disabled={props.submitting}
                            />
                        </div>
                    </div>

                    <div class="form-group">
                        <label for="description">{"Description *"}</label>
                        <input
                            id="description"
                            type="text"
                            placeholder="e.g. Groceries, Coffee, Taxi..."
                            value={props.form.description.clone()}
                            onchange={props.on_description_change.clone()}
                            disabled={props.submitting}
                        />
                    </div>

                    <div class="form-group">
                        <label for="category">
                            {if props.is_edit { "Category" } else { "Category (Optional)" }}
                        </label>
                        <input
                            id="category"
                            type="text"
                            placeholder="e.g. Food, Transport, Entertainment..."
                            value={props.form.category.clone()}
                            onchange={props.on_category_change.clone()}
                            disabled={props.submitting}
                        />
                    </div>

                    {if let Some(error) = &props.error {
                        html! { <div class="form-message error">{error}</div> }
                    } else {
                        html! {}
                    }}

                    <div class="modal-buttons">
                        {if props.is_edit {
                            html! {
                                <button
                                    type="button"
                                    class="btn btn-destructive"
                                    onclick={on_delete_click}
                                    disabled={props.submitting}
                                >
                                    {if props.submitting { "Deleting..." } else { "Delete" }}
                                </button>
                            }
                        } else {
                            html! {}
                        }}
                        <button
                            type="button"
                            class="btn btn-outline"
                            onclick={on_cancel_click}
                            disabled={props.submitting}
                        >
                            {"Cancel"}
                        </button>
                        <button type="submit" class="btn btn-primary" disabled={props.submitting}>
                            {submit_label}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
