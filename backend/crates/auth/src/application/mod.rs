//! Application Layer
//!
//! Use cases and application services.

pub mod authenticate;
pub mod config;
pub mod forgot_password;
pub mod refresh;
pub mod reset_password;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;
pub mod tokens;

// Re-exports
pub use authenticate::{AuthContext, AuthenticateUseCase};
pub use config::AuthConfig;
pub use forgot_password::ForgotPasswordUseCase;
pub use refresh::RefreshUseCase;
pub use reset_password::{ResetPasswordInput, ResetPasswordUseCase};
pub use sign_in::{SignInInput, SignInUseCase};
pub use sign_out::SignOutUseCase;
pub use sign_up::{SessionOutput, SignUpInput, SignUpUseCase};
pub use tokens::TokenPair;
