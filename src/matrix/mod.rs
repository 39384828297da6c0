// Matrix data structures and operations

pub mod config;
pub mod coo;
pub mod reference;
pub mod row_index;

pub use config::{Schedule, SpmvConfig, SystemParameters};
pub use coo::{sort_key, CooMatrix};
pub use reference::reference_spmv;
pub use row_index::{RowIndex, RowRange};
