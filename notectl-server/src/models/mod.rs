//! Domain models
//!
//! Request values are typed and immutable once extracted; handlers never see
//! raw JSON.

pub mod note;
pub mod pagination;
pub mod validation;

pub use note::{DeleteConfirmation, Note, NoteInput};
pub use pagination::{Window, WindowParams};
pub use validation::ValidationError;
