//! Statistics derived from a dataset: summary table, cross-tabulation, box statistics.

mod boxstats;
mod crosstab;
mod describe;
mod quantile;

pub use boxstats::{group_by_category, BoxStats, Group};
pub use crosstab::{CrossTab, CrossTabValues};
pub use describe::{CategoricalSummary, ColumnSummary, Describe, NumericSummary, Stat, SummaryKind};
pub use quantile::{mean, percentile, sample_std, sorted_finite, sorted_non_nan};

pub(crate) use describe::{display_width, pad_left};
