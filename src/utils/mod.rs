//! Various unsorted geometrical and logical operators.

pub use self::center::center;
pub use self::sample_unit_vector::sample_unit_vector;
pub use self::sorted_pair::SortedPair;
pub use self::stats::mean_std_dev;

pub(crate) use self::point_key::PointKey;
pub(crate) use self::wops::WBasis;

mod center;
mod point_key;
mod sample_unit_vector;
mod sorted_pair;
mod stats;
mod wops;
