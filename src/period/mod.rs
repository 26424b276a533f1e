//! Period resolution, aggregation, and navigation.
//!
//! Everything here is a pure function of its inputs except
//! [`PeriodNavigator::go_to_today`], which reads the injected clock.

pub mod aggregate;
pub mod calendar;
pub mod granularity;
pub mod navigator;
pub mod resolver;
pub mod window;

pub use aggregate::{aggregate, CategoryTotal, PeriodAggregate};
pub use granularity::{Granularity, LabelStyle};
pub use navigator::{step, Direction, PeriodNavigator};
pub use resolver::{
    abbreviated_label, day_bounds, format_label, full_label, resolve, resolve_with_style,
};
pub use window::{PeriodScope, PeriodWindow};
