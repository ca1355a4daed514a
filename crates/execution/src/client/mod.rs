//! Remote execution API abstraction and the Dune implementation.

mod traits;

pub mod dune;

pub use traits::ExecutionApi;
