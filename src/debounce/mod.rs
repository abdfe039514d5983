use futures::{future::BoxFuture, FutureExt};

use std::{
    future::Future,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

type Handler<A> = Arc<dyn Fn(A) -> BoxFuture<'static, ()> + Send + Sync>;

struct State<A> {
    args: Option<A>,
    generation: u64,
}

/// Collapses bursts of triggers into one call of the handler, made with the
/// arguments of the last trigger once `delay` passed without a new one.
pub struct Debouncer<A> {
    delay: Duration,
    handler: Handler<A>,
    state: Arc<Mutex<State<A>>>,
}

impl<A: Send + 'static> Debouncer<A> {
    pub fn new<F, Fut>(delay: Duration, handler: F) -> Self
    where
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self {
            delay,
            handler: Arc::new(move |args| handler(args).boxed()),
            state: Arc::new(Mutex::new(State {
                args: None,
                generation: 0,
            })),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Re-arms the window. Must be called from within a tokio runtime.
    pub fn trigger(&self, args: A) {
        let generation = {
            let mut state = lock(&self.state);
            state.args = Some(args);
            state.generation += 1;
            state.generation
        };

        let state = Arc::clone(&self.state);
        let handler = Arc::clone(&self.handler);
        let delay = self.delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let args = {
                let mut state = lock(&state);
                if state.generation != generation {
                    return;
                }
                state.args.take()
            };
            if let Some(args) = args {
                handler(args).await;
            }
        });
    }

    /// Runs the handler now with the pending arguments, if any, and waits for it.
    pub async fn flush(&self) {
        let args = {
            let mut state = lock(&self.state);
            state.generation += 1;
            state.args.take()
        };
        if let Some(args) = args {
            (self.handler)(args).await;
        }
    }

    pub fn cancel(&self) {
        let mut state = lock(&self.state);
        state.generation += 1;
        state.args = None;
    }

    pub fn is_pending(&self) -> bool {
        lock(&self.state).args.is_some()
    }
}

fn lock<A>(state: &Mutex<State<A>>) -> MutexGuard<'_, State<A>> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
