use backend::certify::Certifier;
use crossbeam::channel;
use std::env;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

mod arguments;

use crate::arguments::parse_base_limit;

type SharedEngine = Arc<RwLock<Certifier>>;

/// Drives the engine one whole base at a time, so a stop request never
/// lands in the middle of a step and the engine state stays consistent.
fn run_engine(
    engine: SharedEngine,
    limit: Option<u64>,
    stop: Arc<AtomicBool>,
    tx: channel::Sender<u64>,
) {
    while !stop.load(Ordering::Relaxed) {
        let confirmed = {
            let mut engine = engine.write().unwrap();
            if limit.map_or(false, |max| engine.bases_consumed() >= max) {
                break;
            }
            engine.step()
        };
        for n in confirmed {
            if tx.send(n).is_err() {
                return;
            }
        }
    }
}

#[tokio::main]
async fn main() {
    let args: Vec<String> = env::args().collect();
    let limit = parse_base_limit(args);

    match limit {
        Some(max) => println!("Certifying orders for the first {} odd prime bases", max),
        None => println!("Certifying orders until interrupted (ctrl-c to stop)"),
    }

    let engine: SharedEngine = Arc::new(RwLock::new(Certifier::new()));
    let stop = Arc::new(AtomicBool::new(false));

    let (tx, rx) = channel::unbounded();

    let worker = tokio::task::spawn_blocking({
        let engine = engine.clone();
        let stop = stop.clone();
        move || run_engine(engine, limit, stop, tx)
    });

    let printer = tokio::task::spawn_blocking(move || {
        while let Ok(n) = rx.recv() {
            println!("{}", n);
        }
    });

    let interrupt = tokio::spawn({
        let stop = stop.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                println!("Stopping after the current base");
                stop.store(true, Ordering::Relaxed);
            }
        }
    });

    worker.await.unwrap();
    // the worker dropped its sender, so the printer drains and exits
    printer.await.unwrap();
    interrupt.abort();

    let engine = engine.read().unwrap();
    println!("{}", serde_json::to_string(&engine.snapshot()).unwrap());
}
