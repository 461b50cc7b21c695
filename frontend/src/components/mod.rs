pub mod expense_modal;
pub mod expense_table;
pub mod header;
pub mod insights_panel;
pub mod spending_chart;
pub mod summary_cards;

pub use expense_modal::ExpenseModal;
pub use expense_table::ExpenseTable;
pub use header::Header;
pub use insights_panel::InsightsPanel;
pub use spending_chart::SpendingChart;
pub use summary_cards::SummaryCards;
