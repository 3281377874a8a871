//! Identity and session endpoints under `/api/v1/users`

pub mod change_password;
pub mod login;
pub mod logout;
pub mod me;
pub mod refresh;
pub mod signup;

pub use change_password::change_password;
pub use login::login;
pub use logout::logout;
pub use me::me;
pub use refresh::refresh_token;
pub use signup::signup;
