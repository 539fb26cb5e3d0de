//! Layout planning. Pure; no rendering surface required.
//!
//! | Module | Role |
//! |---|---|
//! | [`rows`] | Grid masonry rows (hero / pair / triplet) |
//! | [`mosaic`] | Overview wall partitioned into `K` flex rows |
//! | `calculations` | Width fractions and row-count math shared by both |

mod calculations;
pub mod mosaic;
pub mod rows;

pub use calculations::{mosaic_row_count, row_total_ratio, width_fractions, width_percents};
pub use mosaic::{Mosaic, partition_mosaic};
pub use rows::{Row, RowKind, RowRules, plan_rows};
