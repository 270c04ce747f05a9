//! Connects to the compositor named by the environment and prints every
//! global it announces.

use std::sync::Arc;

use waylite::interfaces::WlRegistryGlobalEvent;
use waylite::{Display, Event};

fn main() {
    let conn = Display::connect("").expect("cannot connect to the compositor");

    {
        let conn = conn.clone();
        std::thread::spawn(move || {
            if let Err(err) = conn.event_loop() {
                eprintln!("event loop: {err}");
            }
        });
    }

    let registry = conn
        .display()
        .get_registry(&conn)
        .expect("cannot request the registry");
    conn.register_handler(
        registry.id(),
        Arc::new(|event: &dyn Event| {
            if let Some(global) = event.downcast_ref::<WlRegistryGlobalEvent>() {
                println!("[{}] {} (version {})", global.name, global.interface, global.version);
            }
        }),
    );

    // one round-trip guarantees every queued announcement has arrived
    conn.sync().expect("sync round-trip failed");
    conn.close().expect("closing the connection failed");
}
