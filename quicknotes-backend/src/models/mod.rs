pub mod note;
pub mod user;

pub use note::{Note, NotePayload};
pub use user::{AuthResponse, LoginRequest, PublicUser, SignupRequest, User};
