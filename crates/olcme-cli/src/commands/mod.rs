pub mod auth;
pub mod dispatch;
pub mod health;
pub mod instrument;
pub mod results;
pub mod run;
pub mod session;
pub mod shared;
pub mod study;
