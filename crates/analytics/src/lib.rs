pub mod breakdown;
pub mod series;
pub mod summary;
pub mod trend;

pub use breakdown::{category_breakdown, color_for, CategorySpend};
pub use series::{anchored_balance, running_balance, running_net_worth, SeriesPoint};
pub use summary::{expense_stats, totals, ExpenseStats, Totals};
pub use trend::trend_slope;
