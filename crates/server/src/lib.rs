pub mod config;
pub mod dashboard;
pub mod dispatch;
pub mod effect;
pub mod entity;
pub mod events;
pub mod form;
pub mod map;
pub mod net;
pub mod player;
pub mod protocol;
pub mod rules;
pub mod server;
pub mod session;
