use std::collections::VecDeque;

use six_cities_logging::{set_dispatch_seq, sc_trace};

use crate::{update, AppState, Effect, LoadHooks, Msg};

/// Owns the state and the load hooks. Every dispatch runs `update` and then
/// the hooks, feeding any messages they produce back in until things settle.
#[derive(Debug, Clone, Default)]
pub struct Store {
    state: AppState,
    hooks: LoadHooks,
    seq: u64,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn consume_dirty(&mut self) -> bool {
        self.state.consume_dirty()
    }

    /// Runs the mount-time hooks with the token read from persistent storage.
    pub fn mount(&mut self, persisted_token: Option<String>) -> Vec<Effect> {
        let msgs = self.hooks.mount(persisted_token);
        self.drain(msgs.into())
    }

    pub fn dispatch(&mut self, msg: Msg) -> Vec<Effect> {
        self.drain(VecDeque::from([msg]))
    }

    fn drain(&mut self, mut queue: VecDeque<Msg>) -> Vec<Effect> {
        let mut effects = Vec::new();
        while let Some(msg) = queue.pop_front() {
            self.seq += 1;
            set_dispatch_seq(self.seq);
            sc_trace!("dispatch {:?}", msg);

            let state = std::mem::take(&mut self.state);
            let (state, produced) = update(state, msg);
            self.state = state;
            effects.extend(produced);
            queue.extend(self.hooks.run(&self.state));
        }
        effects
    }
}
