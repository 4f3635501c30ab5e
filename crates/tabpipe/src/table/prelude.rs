//! Bring the types needed to build and query Tables into scope with
//! `use tabpipe::table::prelude::*;`.

pub use super::Table;
pub use super::column::Column;
pub use super::series::Series;
pub use super::types::{DataType, Scalar};
pub use super::io::{ReadOptions, WriteOptions};
pub use super::select::{Predicate, mask_and, mask_or};
pub use super::derive::ArithOp;
pub use super::reduce::{Reduction, DESCRIBE_STATISTICS};
pub use super::group::{Aggregation, GroupedTable};
pub use super::join::JoinType;
pub use super::resample::Frequency;
pub use crate::error::{Error, Result};
