use std::sync::Arc;
use std::time::Duration;

use crate::assembler::Assembler;
use crate::upstream::ItemSource;

pub struct HandlerState<S: ItemSource + 'static> {
    pub assembler: Arc<Assembler<S>>,

    pub request_timeout: Duration,
}

impl<S: ItemSource + 'static> Clone for HandlerState<S> {
    fn clone(&self) -> Self {
        Self {
            assembler: Arc::clone(&self.assembler),
            request_timeout: self.request_timeout,
        }
    }
}

impl<S: ItemSource + 'static> HandlerState<S> {
    pub fn new(assembler: Arc<Assembler<S>>, request_timeout: Duration) -> Self {
        Self {
            assembler,
            request_timeout,
        }
    }
}
