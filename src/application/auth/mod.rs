pub mod login_user;
pub mod logout_user;

pub use login_user::{LoginUserCommand, LoginUserResponse, LoginUserUseCase};
pub use logout_user::{LogoutUserCommand, LogoutUserUseCase};
