//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod task;
pub mod todo;

pub use validation::ValidationError;
pub use task::{TaskText, MAX_TASK_LEN};
pub use todo::{ListOrder, TodoRow};
