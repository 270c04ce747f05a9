//! The Wayland connection: socket lifecycle, object and handler tables,
//! event dispatch and the synchronization barrier.

use std::collections::HashMap;
use std::env;
use std::io;
use std::net::Shutdown;
use std::os::unix::net::UnixStream;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Condvar, Mutex, RwLock, Weak};

use crate::globals::GlobalsState;
use crate::interfaces::{
    Proxy, WlCallback, WlCallbackDoneEvent, WlDisplay, WlDisplayDeleteIDEvent,
    WlDisplayErrorEvent, WlDisplaySyncRequest, WlRegistryGlobalEvent, WlRegistryGlobalRemoveEvent,
};
use crate::protocol::{
    Connection, Event, EventHandler, ObjectId, ProtocolError, Request,
};
use crate::wire::{self, EmitError, EventScanner, ScanError};

/// An error that can occur when opening a connection.
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    /// `XDG_RUNTIME_DIR` is not set, so no socket path can be resolved.
    #[error("XDG_RUNTIME_DIR environment variable is not set")]
    NoRuntimeDir,
    /// Dialing the compositor socket failed.
    #[error("could not connect to the compositor socket: {0}")]
    Io(#[from] io::Error),
}

/// An error that can occur while using an open connection.
#[derive(Debug, thiserror::Error)]
pub enum WaylandError {
    /// The connection is closed. The event loop treats this as a normal
    /// termination; every other caller sees it as a failure.
    #[error("the connection to the compositor is closed")]
    Closed,
    /// A request could not be serialized or written.
    #[error("sending request: {0}")]
    Emit(#[from] EmitError),
    /// An event could not be read from the socket.
    #[error("reading event: {0}")]
    Scan(#[from] ScanError),
    /// An incoming event targets an object missing from the proxy table.
    #[error("unknown object id: {0}")]
    UnknownObject(ObjectId),
    /// An incoming event carries an opcode its interface does not define.
    #[error("unknown event opcode {opcode} for object {object} (interface {interface})")]
    UnknownOpcode {
        interface: &'static str,
        object: ObjectId,
        opcode: u16,
    },
    /// An event record failed to scan its payload.
    #[error("scanning event {name} for object {object} (interface {interface}): {source}")]
    Event {
        interface: &'static str,
        object: ObjectId,
        name: &'static str,
        source: ScanError,
    },
}

/// Policy invoked on server-reported protocol errors.
///
/// The server reports a protocol error once and then usually closes the
/// connection. The default policy panics so protocol bugs are loud during
/// development; long-running clients install a recording or forwarding
/// policy via [`Display::set_error_handler`].
pub trait ErrorHandler: Send + Sync {
    fn handle(&self, error: ProtocolError);
}

impl<F> ErrorHandler for F
where
    F: Fn(ProtocolError) + Send + Sync,
{
    fn handle(&self, error: ProtocolError) {
        self(error)
    }
}

/// The default error policy: panic with the server's message.
#[derive(Debug, Default)]
pub struct PanicOnError;

impl ErrorHandler for PanicOnError {
    fn handle(&self, error: ProtocolError) {
        panic!("{error}");
    }
}

enum SyncState {
    Pending,
    Done(u32),
    Failed,
}

/// Single-shot rendezvous between [`Display::sync`] and the event loop.
struct SyncCell {
    state: Mutex<SyncState>,
    cond: Condvar,
}

impl SyncCell {
    fn new() -> SyncCell {
        SyncCell { state: Mutex::new(SyncState::Pending), cond: Condvar::new() }
    }

    fn complete(&self, result: Result<u32, ()>) {
        let mut state = self.state.lock().unwrap();
        if let SyncState::Pending = *state {
            *state = match result {
                Ok(serial) => SyncState::Done(serial),
                Err(()) => SyncState::Failed,
            };
            self.cond.notify_all();
        }
    }

    fn wait(&self) -> Result<u32, ()> {
        let mut state = self.state.lock().unwrap();
        loop {
            match *state {
                SyncState::Pending => state = self.cond.wait(state).unwrap(),
                SyncState::Done(serial) => return Ok(serial),
                SyncState::Failed => return Err(()),
            }
        }
    }
}

struct SyncHandler {
    cell: Arc<SyncCell>,
}

impl EventHandler for SyncHandler {
    fn handle(&self, event: &dyn Event) {
        if let Some(done) = event.downcast_ref::<WlCallbackDoneEvent>() {
            self.cell.complete(Ok(done.callback_data));
        }
    }
}

struct Inner {
    socket: UnixStream,
    // held across framing + write so a message and its ancillary payload
    // are never interleaved with another thread's
    write_lock: Mutex<()>,
    next_id: AtomicU32,
    closed: AtomicBool,
    objects: RwLock<HashMap<ObjectId, Proxy>>,
    handlers: RwLock<HashMap<ObjectId, Vec<Arc<dyn EventHandler>>>>,
    globals: Mutex<GlobalsState>,
    error_handler: Mutex<Arc<dyn ErrorHandler>>,
    syncs: Mutex<Vec<Weak<SyncCell>>>,
}

/// A connection to a Wayland compositor.
///
/// Cheap to clone; all clones share one socket and one set of tables. One
/// thread typically runs [`Display::event_loop`] while others originate
/// requests.
#[derive(Clone)]
pub struct Display {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for Display {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Display").field("socket", &self.inner.socket).finish_non_exhaustive()
    }
}

fn socket_path(display: &str) -> Result<PathBuf, ConnectError> {
    let runtime_dir = env::var_os("XDG_RUNTIME_DIR").ok_or(ConnectError::NoRuntimeDir)?;
    let name = if display.is_empty() {
        env::var("WAYLAND_DISPLAY").unwrap_or_else(|_| "wayland-0".to_owned())
    } else {
        display.to_owned()
    };
    let mut path = PathBuf::from(runtime_dir);
    path.push(name);
    Ok(path)
}

impl Display {
    /// Connects to the compositor socket at `$XDG_RUNTIME_DIR/<display>`.
    ///
    /// An empty `display` falls back to `$WAYLAND_DISPLAY`, then to
    /// `wayland-0`. The object table starts with the display singleton at
    /// id 1; nothing is sent.
    pub fn connect(display: &str) -> Result<Display, ConnectError> {
        let stream = UnixStream::connect(socket_path(display)?)?;
        Ok(Display::from_stream(stream))
    }

    /// Wraps an already-connected stream, e.g. one end of a socket pair.
    pub fn from_stream(stream: UnixStream) -> Display {
        let mut objects = HashMap::new();
        objects.insert(ObjectId::DISPLAY, Proxy::WlDisplay(WlDisplay::new(ObjectId::DISPLAY)));

        Display {
            inner: Arc::new(Inner {
                socket: stream,
                write_lock: Mutex::new(()),
                next_id: AtomicU32::new(1),
                closed: AtomicBool::new(false),
                objects: RwLock::new(objects),
                handlers: RwLock::new(HashMap::new()),
                globals: Mutex::new(GlobalsState::new()),
                error_handler: Mutex::new(Arc::new(PanicOnError)),
                syncs: Mutex::new(Vec::new()),
            }),
        }
    }

    /// The display singleton proxy (object id 1).
    pub fn display(&self) -> WlDisplay {
        WlDisplay::new(ObjectId::DISPLAY)
    }

    /// Replaces the protocol-error policy.
    pub fn set_error_handler(&self, handler: Arc<dyn ErrorHandler>) {
        *self.inner.error_handler.lock().unwrap() = handler;
    }

    /// Looks up the proxy registered for `id`.
    pub fn proxy(&self, id: ObjectId) -> Option<Proxy> {
        self.inner.objects.read().unwrap().get(&id).copied()
    }

    /// The number of handlers currently registered for `object`.
    pub fn handler_count(&self, object: ObjectId) -> usize {
        self.inner.handlers.read().unwrap().get(&object).map_or(0, Vec::len)
    }

    /// Registers `handler` for events on `object`, after any handlers
    /// already present.
    pub fn register_handler(&self, object: ObjectId, handler: Arc<dyn EventHandler>) {
        self.inner.handlers.write().unwrap().entry(object).or_default().push(handler);
    }

    /// Removes the first registration of `handler` on `object`, comparing
    /// by identity. Removing the last handler removes the mapping.
    pub fn unregister_handler(&self, object: ObjectId, handler: &Arc<dyn EventHandler>) {
        let mut handlers = self.inner.handlers.write().unwrap();
        if let Some(list) = handlers.get_mut(&object) {
            if let Some(at) = list.iter().position(|h| Arc::ptr_eq(h, handler)) {
                list.remove(at);
            }
            if list.is_empty() {
                handlers.remove(&object);
            }
        }
    }

    /// Removes every handler registered for `object`.
    pub fn unregister_handlers(&self, object: ObjectId) {
        self.inner.handlers.write().unwrap().remove(&object);
    }

    /// Removes a proxy from the object table.
    pub fn unregister_proxy(&self, proxy: Proxy) {
        self.unregister_object(proxy.id());
    }

    /// Reads exactly one event from the socket and scans it into a typed
    /// record. Does not dispatch.
    pub fn poll_event(&self) -> Result<(ObjectId, Box<dyn Event>), WaylandError> {
        let mut scanner = EventScanner::read(&self.inner.socket).map_err(|e| match e {
            ScanError::Closed => WaylandError::Closed,
            other => WaylandError::Scan(other),
        })?;

        let object = ObjectId(scanner.header().object_id);
        let opcode = scanner.header().opcode;

        let (interface, mut event) = {
            let objects = self.inner.objects.read().unwrap();
            let proxy = objects.get(&object).ok_or(WaylandError::UnknownObject(object))?;
            let interface = proxy.descriptor().name;
            let event = proxy.dispatch(opcode).ok_or(WaylandError::UnknownOpcode {
                interface,
                object,
                opcode,
            })?;
            (interface, event)
        };

        if let Err(source) = event.scan(&mut scanner) {
            return Err(WaylandError::Event {
                interface,
                object,
                name: event.message_name(),
                source,
            });
        }

        log::debug!("Dispatching {}@{}", event.message_name(), object);
        Ok((object, event))
    }

    /// Applies the built-in semantics of `event`, then invokes the handlers
    /// registered for `object` in registration order.
    ///
    /// Built-ins: `wl_display.delete_id` drops the object's proxy and
    /// handlers, registry announcements maintain the globals table, and
    /// `wl_display.error` goes to the error policy instead of the per-object
    /// handlers.
    pub fn dispatch_event(&self, object: ObjectId, event: &dyn Event) {
        if let Some(deleted) = event.downcast_ref::<WlDisplayDeleteIDEvent>() {
            self.unregister_object(ObjectId(deleted.id));
            self.unregister_handlers(ObjectId(deleted.id));
        } else if let Some(global) = event.downcast_ref::<WlRegistryGlobalEvent>() {
            self.inner.globals.lock().unwrap().register_global(global);
        } else if let Some(removed) = event.downcast_ref::<WlRegistryGlobalRemoveEvent>() {
            self.inner.globals.lock().unwrap().unregister_global(removed.name);
        } else if let Some(error) = event.downcast_ref::<WlDisplayErrorEvent>() {
            let error = ProtocolError {
                object_id: ObjectId(error.object_id),
                code: error.code,
                message: error.message.clone(),
            };
            log::error!("{error}");
            let handler = self.inner.error_handler.lock().unwrap().clone();
            handler.handle(error);
            return;
        }

        // snapshot, so a handler can mutate the registrations of any object
        // (including its own) without corrupting this iteration
        let snapshot: Vec<Arc<dyn EventHandler>> = self
            .inner
            .handlers
            .read()
            .unwrap()
            .get(&object)
            .cloned()
            .unwrap_or_default();
        for handler in snapshot {
            handler.handle(event);
        }
    }

    /// Polls and dispatches events until the connection closes (`Ok`) or a
    /// read fails (`Err`). Pending [`Display::sync`] calls are woken as
    /// failed on either exit.
    pub fn event_loop(&self) -> Result<(), WaylandError> {
        let result = loop {
            match self.poll_event() {
                Ok((object, event)) => self.dispatch_event(object, &*event),
                Err(WaylandError::Closed) => break Ok(()),
                Err(e) => break Err(e),
            }
        };
        self.notify_closed();
        result
    }

    /// Round-trip barrier: sends `wl_display.sync` and blocks until the
    /// compositor answers with `wl_callback.done` (dispatched by the thread
    /// running [`Display::event_loop`]), returning the event's serial.
    ///
    /// The callback proxy and its internal handler are gone from the tables
    /// by the time this returns, success or failure.
    pub fn sync(&self) -> Result<u32, WaylandError> {
        let callback = WlCallback::new(self.new_id());
        let cell = Arc::new(SyncCell::new());
        let weak = Arc::downgrade(&cell);
        let handler: Arc<dyn EventHandler> = Arc::new(SyncHandler { cell: cell.clone() });

        self.register_proxy(Proxy::WlCallback(callback));
        self.register_handler(callback.id(), handler.clone());
        self.inner.syncs.lock().unwrap().push(weak.clone());
        if self.inner.closed.load(Ordering::SeqCst) {
            cell.complete(Err(()));
        }

        let result = match self.send_request(
            ObjectId::DISPLAY,
            &WlDisplaySyncRequest { callback: callback.id().protocol_id() },
        ) {
            Ok(()) => cell.wait().map_err(|()| WaylandError::Closed),
            Err(e) => Err(WaylandError::Emit(e)),
        };

        self.inner.syncs.lock().unwrap().retain(|w| !Weak::ptr_eq(w, &weak));
        self.unregister_handler(callback.id(), &handler);
        self.unregister_object(callback.id());
        result
    }

    /// Shuts the socket down, waking the event loop (which then returns
    /// success) and failing pending syncs.
    pub fn close(&self) -> io::Result<()> {
        let result = self.inner.socket.shutdown(Shutdown::Both);
        self.notify_closed();
        result
    }

    fn notify_closed(&self) {
        self.inner.closed.store(true, Ordering::SeqCst);
        let waiters = std::mem::take(&mut *self.inner.syncs.lock().unwrap());
        for waiter in waiters {
            if let Some(cell) = waiter.upgrade() {
                cell.complete(Err(()));
            }
        }
    }

    pub(crate) fn with_globals<R>(&self, f: impl FnOnce(&mut GlobalsState) -> R) -> R {
        f(&mut self.inner.globals.lock().unwrap())
    }
}

impl Connection for Display {
    /// Allocates the next object id. The counter starts past the display
    /// singleton and never recycles.
    fn new_id(&self) -> ObjectId {
        ObjectId(self.inner.next_id.fetch_add(1, Ordering::Relaxed) + 1)
    }

    fn register_proxy(&self, proxy: Proxy) {
        self.inner.objects.write().unwrap().insert(proxy.id(), proxy);
    }

    fn unregister_object(&self, id: ObjectId) {
        self.inner.objects.write().unwrap().remove(&id);
    }

    /// Serializes `request` and writes it under the socket write lock. Does
    /// not wait for a reply.
    fn send_request(&self, id: ObjectId, request: &dyn Request) -> Result<(), EmitError> {
        let _guard = self.inner.write_lock.lock().unwrap();
        log::debug!("Sending {}@{}", request.message_name(), id);
        wire::write_request(&self.inner.socket, id, request)
    }
}
