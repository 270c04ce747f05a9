mod helpers;

use std::os::unix::net::UnixStream;

use waylite::interfaces::WlRegistryGlobalRemoveEvent;
use waylite::{Display, ObjectId};

use helpers::{global_body, read_message, string_arg, uint_arg, write_event};

/// A compositor announcing `wl_compositor` v4 and `wl_shm` v1 and serving
/// exactly one bind.
fn scripted_compositor(mut server: UnixStream) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        // registry bootstrap: get_registry, then the sync barrier
        let (object, opcode, body) = read_message(&mut server);
        assert_eq!((object, opcode), (1, 1));
        let registry = uint_arg(&body, 0);

        let (object, opcode, body) = read_message(&mut server);
        assert_eq!((object, opcode), (1, 0));
        let callback = uint_arg(&body, 0);

        write_event(&mut server, registry, 0, &global_body(1, "wl_compositor", 4));
        write_event(&mut server, registry, 0, &global_body(2, "wl_shm", 1));
        write_event(&mut server, callback, 0, &1u32.to_ne_bytes());

        // exactly one bind for wl_compositor must follow
        let (object, opcode, body) = read_message(&mut server);
        assert_eq!((object, opcode), (registry, 0));
        let name = uint_arg(&body, 0);
        let (interface, at) = string_arg(&body, 4);
        let version = uint_arg(&body, at);
        let new_id = uint_arg(&body, at + 4);
        assert_eq!(name, 1);
        assert_eq!(interface, "wl_compositor");
        assert_eq!(version, 4);
        assert!(new_id > callback);

        // nothing else may arrive before the client hangs up
        helpers::assert_eof(&mut server);
    })
}

#[test]
fn globals_bootstrap_binds_each_interface_once() {
    let (client, server) = UnixStream::pair().unwrap();
    let conn = Display::from_stream(client);

    let looper = {
        let conn = conn.clone();
        std::thread::spawn(move || conn.event_loop())
    };
    let compositor = scripted_compositor(server);

    let globals = conn.globals();

    // both announcements are in after the bootstrap sync
    let announced = globals.announced("wl_shm").unwrap();
    assert_eq!(announced.name, 2);
    assert_eq!(announced.version, 1);

    let first = globals.wl_compositor().unwrap().expect("announced global");
    assert_eq!(first.version(), 4);
    assert!(first.id() > ObjectId(2));
    assert!(conn.proxy(first.id()).is_some());

    // second call reuses the cached proxy without another bind
    let second = globals.wl_compositor().unwrap().expect("cached global");
    assert_eq!(first, second);

    // a never-announced global resolves to None without wire traffic
    assert!(globals.wl_output().unwrap().is_none());

    conn.close().unwrap();
    assert!(looper.join().unwrap().is_ok());
    compositor.join().unwrap();
}

#[test]
fn global_remove_forgets_the_announcement() {
    let (client, server) = UnixStream::pair().unwrap();
    let conn = Display::from_stream(client);

    let looper = {
        let conn = conn.clone();
        std::thread::spawn(move || conn.event_loop())
    };
    let compositor = scripted_compositor(server);

    let globals = conn.globals();
    globals.wl_compositor().unwrap().expect("announced global");

    // the compositor withdraws the global (numeric name 1)
    let removal = WlRegistryGlobalRemoveEvent { name: 1 };
    conn.dispatch_event(globals.registry().unwrap().id(), &removal);

    assert!(globals.announced("wl_compositor").is_none());
    assert!(globals.wl_compositor().unwrap().is_none());

    conn.close().unwrap();
    assert!(looper.join().unwrap().is_ok());
    compositor.join().unwrap();
}
