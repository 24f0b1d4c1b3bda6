mod admin;
pub use admin::AdminView;

mod gate;
pub use gate::AdminGate;

mod login;
pub use login::LoginView;
