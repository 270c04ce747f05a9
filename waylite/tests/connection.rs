mod helpers;

use std::os::unix::net::UnixStream;
use std::sync::{Arc, Mutex};

use waylite::interfaces::{
    WlDisplayDeleteIDEvent, WlDisplayErrorEvent, WlShmCreatePoolRequest,
};
use waylite::wire::EventScanner;
use waylite::{
    Connection, Display, Event, EventHandler, Fd, ObjectId, ProtocolError, WaylandError,
};

use helpers::{read_message, uint_arg, write_event};

fn pair() -> (Display, UnixStream) {
    let (client, server) = UnixStream::pair().unwrap();
    (Display::from_stream(client), server)
}

struct Recorder {
    tag: &'static str,
    log: Arc<Mutex<Vec<&'static str>>>,
}

impl EventHandler for Recorder {
    fn handle(&self, _: &dyn Event) {
        self.log.lock().unwrap().push(self.tag);
    }
}

#[test]
fn ids_are_allocated_monotonically() {
    let (conn, _server) = pair();
    assert_eq!(conn.new_id(), ObjectId(2));
    assert_eq!(conn.new_id(), ObjectId(3));
    assert_eq!(conn.new_id(), ObjectId(4));
}

#[test]
fn sync_round_trip() {
    let (conn, mut server) = pair();

    let looper = {
        let conn = conn.clone();
        std::thread::spawn(move || conn.event_loop())
    };
    let compositor = std::thread::spawn(move || {
        // wl_display.sync is a 12-byte request naming the callback
        let (object, opcode, body) = read_message(&mut server);
        assert_eq!(object, 1);
        assert_eq!(opcode, 0);
        assert_eq!(body.len(), 4);
        let callback = uint_arg(&body, 0);

        // answer with wl_callback.done carrying a serial
        write_event(&mut server, callback, 0, &0xdead_beefu32.to_ne_bytes());
        helpers::assert_eof(&mut server);
        callback
    });

    let serial = conn.sync().unwrap();
    assert_eq!(serial, 0xdead_beef);

    conn.close().unwrap();
    assert!(looper.join().unwrap().is_ok());
    let callback = compositor.join().unwrap();

    // the callback proxy and its internal handler are gone
    assert!(conn.proxy(ObjectId(callback)).is_none());
    assert_eq!(conn.handler_count(ObjectId(callback)), 0);
}

#[test]
fn sync_fails_when_the_event_loop_dies() {
    let (conn, server) = pair();

    let looper = {
        let conn = conn.clone();
        std::thread::spawn(move || conn.event_loop())
    };
    // compositor hangs up without answering
    std::thread::spawn(move || {
        std::thread::sleep(std::time::Duration::from_millis(50));
        drop(server);
    });

    // usually WaylandError::Closed; EmitError if the hangup won the race
    assert!(conn.sync().is_err());
    assert!(looper.join().unwrap().is_ok());
}

#[test]
fn create_pool_carries_one_fd_and_a_16_byte_message() {
    let (conn, server) = pair();

    let request = WlShmCreatePoolRequest { id: 6, fd: Fd(1), size: 4096 };
    conn.send_request(ObjectId(5), &request).unwrap();

    // scan it back server-side: header + two scalar fields, descriptor in
    // the ancillary payload
    let mut scanner = EventScanner::read(&server).unwrap();
    assert_eq!(scanner.header().object_id, 5);
    assert_eq!(usize::from(scanner.header().size), 16);
    assert_eq!(scanner.new_id().unwrap(), 6);
    assert!(scanner.fd().is_ok());
    assert_eq!(scanner.int().unwrap(), 4096);
}

#[test]
fn unknown_object_is_rejected() {
    let (conn, mut server) = pair();
    write_event(&mut server, 99, 0, &7u32.to_ne_bytes());
    match conn.poll_event() {
        Err(WaylandError::UnknownObject(id)) => assert_eq!(id, ObjectId(99)),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn unknown_opcode_is_rejected() {
    let (conn, mut server) = pair();
    write_event(&mut server, 1, 7, &[]);
    match conn.poll_event() {
        Err(WaylandError::UnknownOpcode { interface, object, opcode }) => {
            assert_eq!(interface, "wl_display");
            assert_eq!(object, ObjectId(1));
            assert_eq!(opcode, 7);
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn handlers_run_in_registration_order() {
    let (conn, _server) = pair();
    let log = Arc::new(Mutex::new(Vec::new()));
    let object = ObjectId(1);

    for tag in ["first", "second", "third"] {
        conn.register_handler(object, Arc::new(Recorder { tag, log: log.clone() }));
    }

    let event = WlDisplayDeleteIDEvent { id: 42 };
    conn.dispatch_event(object, &event);
    assert_eq!(*log.lock().unwrap(), ["first", "second", "third"]);
}

#[test]
fn unregister_removes_the_first_matching_handler() {
    let (conn, _server) = pair();
    let log = Arc::new(Mutex::new(Vec::new()));
    let object = ObjectId(1);

    let handler: Arc<dyn EventHandler> = Arc::new(Recorder { tag: "dup", log });
    conn.register_handler(object, handler.clone());
    conn.register_handler(object, handler.clone());
    assert_eq!(conn.handler_count(object), 2);

    conn.unregister_handler(object, &handler);
    assert_eq!(conn.handler_count(object), 1);

    // removing the last one drops the mapping entirely
    conn.unregister_handler(object, &handler);
    assert_eq!(conn.handler_count(object), 0);
}

#[test]
fn delete_id_drops_proxy_and_handlers() {
    let (conn, mut server) = pair();

    // fabricate a bound callback with a handler attached
    let id = conn.new_id();
    conn.register_proxy(waylite::Proxy::WlCallback(
        waylite::interfaces::WlCallback::new(id),
    ));
    let log = Arc::new(Mutex::new(Vec::new()));
    conn.register_handler(id, Arc::new(Recorder { tag: "cb", log }));
    assert!(conn.proxy(id).is_some());

    write_event(&mut server, 1, 1, &id.protocol_id().to_ne_bytes());
    let (object, event) = conn.poll_event().unwrap();
    conn.dispatch_event(object, &*event);

    assert!(conn.proxy(id).is_none());
    assert_eq!(conn.handler_count(id), 0);
}

#[test]
fn delete_id_for_an_unknown_object_is_a_no_op() {
    let (conn, _server) = pair();
    let event = WlDisplayDeleteIDEvent { id: 999 };
    conn.dispatch_event(ObjectId(1), &event);
    assert!(conn.proxy(ObjectId(1)).is_some());
}

#[test]
fn protocol_errors_go_to_the_policy_not_the_handlers() {
    let (conn, _server) = pair();

    let reported: Arc<Mutex<Vec<ProtocolError>>> = Arc::new(Mutex::new(Vec::new()));
    {
        let reported = reported.clone();
        conn.set_error_handler(Arc::new(move |error: ProtocolError| {
            reported.lock().unwrap().push(error);
        }));
    }

    let log = Arc::new(Mutex::new(Vec::new()));
    conn.register_handler(ObjectId(1), Arc::new(Recorder { tag: "display", log: log.clone() }));

    let event = WlDisplayErrorEvent {
        object_id: 5,
        code: 2,
        message: "invalid surface".to_owned(),
    };
    conn.dispatch_event(ObjectId(1), &event);

    let reported = reported.lock().unwrap();
    assert_eq!(reported.len(), 1);
    assert_eq!(reported[0].object_id, ObjectId(5));
    assert_eq!(reported[0].code, 2);
    assert_eq!(reported[0].message, "invalid surface");
    // the per-object handler was suppressed
    assert!(log.lock().unwrap().is_empty());
}

#[test]
fn event_loop_ends_cleanly_when_the_server_hangs_up() {
    let (conn, server) = pair();
    drop(server);
    assert!(conn.event_loop().is_ok());
}

#[test]
fn events_downcast_to_their_concrete_records() {
    let (conn, mut server) = pair();
    let mut body = Vec::new();
    helpers::put_uint(&mut body, 5);
    helpers::put_uint(&mut body, 2);
    helpers::put_string(&mut body, "invalid surface");
    write_event(&mut server, 1, 0, &body);

    let (object, event) = conn.poll_event().unwrap();
    assert_eq!(object, ObjectId(1));
    assert_eq!(event.message_name(), "WlDisplayErrorEvent");
    let error = event.downcast_ref::<WlDisplayErrorEvent>().unwrap();
    assert_eq!(error.object_id, 5);
    assert_eq!(error.code, 2);
    assert_eq!(error.message, "invalid surface");
}
