//! Pure functions over a [`DataSource`](crate::source::DataSource). Nothing
//! here holds state between calls.

pub mod county;
pub mod density;
pub mod network;
pub mod specialty;
pub mod terminated;
