use shared::{create_failure_message, Expense, ExpenseForm};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::dates;

#[derive(Clone, PartialEq)]
pub struct ExpenseFormState {
    pub visible: bool,
    /// The record being edited; `None` means the modal creates a new one
    pub editing: Option<Expense>,
    pub form: ExpenseForm,
    pub submitting: bool,
    pub error: Option<String>,
}

#[derive(Clone)]
pub struct ExpenseFormActions {
    pub open_create: Callback<()>,
    pub open_edit: Callback<Expense>,
    pub close: Callback<()>,
    pub submit: Callback<()>,
    pub delete: Callback<()>,
    pub on_amount_change: Callback<Event>,
    pub on_description_change: Callback<Event>,
    pub on_date_change: Callback<Event>,
    pub on_category_change: Callback<Event>,
}

pub struct UseExpenseFormResult {
    pub state: ExpenseFormState,
    pub actions: ExpenseFormActions,
}

/// Expense modal state and the create/edit/delete mutation handlers.
///
/// All three mutations share one `submitting` flag that disables the modal
/// controls for their duration and is released on every outcome. Validation
/// failures block submission without touching the network. `on_saved` fires
/// after any successful mutation so the caller can refresh its data.
#[hook]
pub fn use_expense_form(api: &ApiClient, on_saved: Callback<()>) -> UseExpenseFormResult {
    let visible = use_state(|| false);
    let editing = use_state(|| Option::<Expense>::None);
    let form = use_state(|| ExpenseForm::for_date(&dates::today_string()));
    let submitting = use_state(|| false);
    let error = use_state(|| Option::<String>::None);

    let open_create = {
        let visible = visible.clone();
        let editing = editing.clone();
        let form = form.clone();
        let error = error.clone();
        use_callback((), move |_, _| {
            form.set(ExpenseForm::for_date(&dates::today_string()));
            editing.set(None);
            error.set(None);
            visible.set(true);
        })
    };

    let open_edit = {
        let visible = visible.clone();
        let editing = editing.clone();
        let form = form.clone();
        let error = error.clone();
        use_callback((), move |expense: Expense, _| {
            form.set(ExpenseForm::from_expense(&expense));
            editing.set(Some(expense));
            error.set(None);
            visible.set(true);
        })
    };

    let close = {
        let visible = visible.clone();
        let editing = editing.clone();
        use_callback((), move |_, _| {
            visible.set(false);
            editing.set(None);
        })
    };

    let submit = {
        let api = api.clone();
        let visible = visible.clone();
        let editing_handle = editing.clone();
        let form_handle = form.clone();
        let submitting = submitting.clone();
        let error = error.clone();
        let on_saved = on_saved.clone();

        use_callback(
            ((*form).clone(), (*editing).clone()),
            move |_, deps: &(ExpenseForm, Option<Expense>)| {
                let (form, editing) = deps.clone();
                let api = api.clone();
                let visible = visible.clone();
                let editing_handle = editing_handle.clone();
                let form_handle = form_handle.clone();
                let submitting = submitting.clone();
                let error = error.clone();
                let on_saved = on_saved.clone();

                let payload = match &editing {
                    None => form.create_payload(),
                    Some(_) => form.update_payload(),
                };
                let payload = match payload {
                    Ok(payload) => payload,
                    Err(validation) => {
                        error.set(Some(validation.to_string()));
                        return;
                    }
                };

                spawn_local(async move {
                    submitting.set(true);
                    error.set(None);

                    let outcome = match &editing {
                        None => api.create_expense(&payload).await.map(|_| ()),
                        Some(expense) => api.update_expense(expense.id, &payload).await.map(|_| ()),
                    };

                    match outcome {
                        Ok(()) => {
                            if editing.is_none() {
                                form_handle.set(ExpenseForm::for_date(&dates::today_string()));
                            }
                            visible.set(false);
                            editing_handle.set(None);
                            on_saved.emit(());
                        }
                        Err(e) => {
                            gloo::console::error!("Expense mutation failed:", e.to_string());
                            let message = match &editing {
                                None => create_failure_message(&e),
                                Some(_) => {
                                    "Failed to update expense. Please try again.".to_string()
                                }
                            };
                            error.set(Some(message));
                        }
                    }

                    // Always released, whatever the outcome
                    submitting.set(false);
                });
            },
        )
    };

    let delete = {
        let api = api.clone();
        let visible = visible.clone();
        let editing_handle = editing.clone();
        let submitting = submitting.clone();
        let error = error.clone();
        let on_saved = on_saved.clone();

        use_callback((*editing).clone(), move |_, editing: &Option<Expense>| {
            // Delete requires a currently selected record
            let Some(expense) = editing.clone() else {
                return;
            };
            let api = api.clone();
            let visible = visible.clone();
            let editing_handle = editing_handle.clone();
            let submitting = submitting.clone();
            let error = error.clone();
            let on_saved = on_saved.clone();

            spawn_local(async move {
                submitting.set(true);
                error.set(None);

                match api.delete_expense(expense.id).await {
                    Ok(()) => {
                        visible.set(false);
                        editing_handle.set(None);
                        on_saved.emit(());
                    }
                    Err(e) => {
                        gloo::console::error!("Failed to delete expense:", e.to_string());
                        error.set(Some("Failed to delete expense. Please try again.".to_string()));
                    }
                }

                submitting.set(false);
            });
        })
    };

    let field_handler = |apply: fn(&mut ExpenseForm, String)| {
        let form = form.clone();
        let error = error.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut updated = (*form).clone();
            apply(&mut updated, input.value());
            form.set(updated);
            error.set(None);
        })
    };

    let actions = ExpenseFormActions {
        open_create,
        open_edit,
        close,
        submit,
        delete,
        on_amount_change: field_handler(|form, value| form.amount = value),
        on_description_change: field_handler(|form, value| form.description = value),
        on_date_change: field_handler(|form, value| form.date = value),
        on_category_change: field_handler(|form, value| form.category = value),
    };

    UseExpenseFormResult {
        state: ExpenseFormState {
            visible: *visible,
            editing: (*editing).clone(),
            form: (*form).clone(),
            submitting: *submitting,
            error: (*error).clone(),
        },
        actions,
    }
}
