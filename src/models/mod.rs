pub mod host;
pub mod report;

pub use host::{Amount, AmountNode, AmountOverTime, ContributionStats, ExpenseStats, HostStats};
pub use report::{
    BucketMode, BucketWindow, BucketedSeries, ChartData, DataPoint, Granularity, ProportionalArea,
    SeriesInput,
};
