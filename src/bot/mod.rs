pub mod dispatcher;
pub mod processor;
pub mod spawn;
