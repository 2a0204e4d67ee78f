pub mod service;

pub use service::{AdminBootstrap, AuthResult, AuthService, SignUp};
