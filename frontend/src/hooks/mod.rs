pub mod use_auth;
pub mod use_expense_form;
pub mod use_expenses;
pub mod use_insights;

pub use use_auth::use_auth;
pub use use_expense_form::use_expense_form;
pub use use_expenses::use_expenses;
pub use use_insights::use_summary_insights;
