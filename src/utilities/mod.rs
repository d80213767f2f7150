pub mod asls;
pub use asls::{AslsOptions, asls};

pub mod banded;
pub use banded::{second_diff_band, solve_banded};

pub mod calculate_baseline;
pub use calculate_baseline::{calculate_baseline, calculate_baseline_batch};

pub mod errors;
pub use errors::SmoothError;

pub mod utilities;
pub use utilities::{first_non_finite, min_max};
