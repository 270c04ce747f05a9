// Environment-variable handling for Connect; kept in its own integration
// test binary so the env mutation stays process-local.

use std::os::unix::net::UnixListener;

use waylite::{ConnectError, Display, ObjectId, Proxy};

#[test]
fn connect_resolves_the_socket_from_the_environment() {
    std::env::remove_var("XDG_RUNTIME_DIR");
    std::env::remove_var("WAYLAND_DISPLAY");

    // no runtime dir: configuration error before any socket work
    assert!(matches!(Display::connect(""), Err(ConnectError::NoRuntimeDir)));

    let runtime_dir = std::env::temp_dir().join(format!("waylite-test-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&runtime_dir);
    std::fs::create_dir_all(&runtime_dir).unwrap();
    std::env::set_var("XDG_RUNTIME_DIR", &runtime_dir);

    // runtime dir set but nothing listening at wayland-0
    assert!(matches!(Display::connect(""), Err(ConnectError::Io(_))));

    // an empty display name falls back to wayland-0
    let listener = UnixListener::bind(runtime_dir.join("wayland-0")).unwrap();
    let conn = Display::connect("").unwrap();
    let (_server, _) = listener.accept().unwrap();

    // the table holds exactly the display singleton; nothing was sent
    match conn.proxy(ObjectId::DISPLAY) {
        Some(Proxy::WlDisplay(display)) => assert_eq!(display.id(), ObjectId(1)),
        other => panic!("unexpected table entry: {other:?}"),
    }
    assert!(conn.proxy(ObjectId(2)).is_none());
    conn.close().unwrap();

    // $WAYLAND_DISPLAY overrides the default name
    let _named = UnixListener::bind(runtime_dir.join("wayland-7")).unwrap();
    std::env::set_var("WAYLAND_DISPLAY", "wayland-7");
    let conn = Display::connect("").unwrap();
    conn.close().unwrap();

    // an explicit display name wins over the environment
    assert!(matches!(Display::connect("wayland-missing"), Err(ConnectError::Io(_))));

    std::fs::remove_dir_all(&runtime_dir).unwrap();
}
