pub mod place;
pub mod user;
pub mod validation;

pub use place::{NewPlace, Place, PlaceDraft, PlacePatch};
pub use user::{NewUser, Signup, SignupRequest, User};
pub use validation::{FieldError, ValidationErrors};
