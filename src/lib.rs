pub mod api;
pub mod app;
pub mod err;
pub mod init;
pub mod timestamp;
pub mod web;

use timestamp::TimestampResolver;

#[derive(Clone)]
pub struct SharedState {
    pub resolver: TimestampResolver,
}
