//! Client-side library for the Wayland display-server protocol.
//!
//! Three layers:
//!
//! - [`wire`] — the bit-exact codec for the Wayland wire format over a UNIX
//!   stream socket, including out-of-band file descriptor passing.
//! - [`conn`] — the connection core: object id allocation, the proxy and
//!   handler tables, event dispatch and the `sync` barrier.
//! - [`interfaces`] — the typed message layer for the core `wayland`
//!   protocol, produced by `waylite-scanner` from `protocols/wayland.xml`.
//!
//! A minimal session:
//!
//! ```no_run
//! use waylite::Display;
//!
//! let conn = Display::connect("").unwrap();
//! {
//!     let conn = conn.clone();
//!     std::thread::spawn(move || conn.event_loop());
//! }
//!
//! let globals = conn.globals();
//! if let Some(compositor) = globals.wl_compositor().unwrap() {
//!     println!("bound wl_compositor v{}", compositor.version());
//! }
//! conn.close().unwrap();
//! ```
//!
//! Logging goes through the [`log`] facade; install any logger backend to
//! see per-message traffic at the `debug` level.

pub mod conn;
pub mod globals;
pub mod interfaces;
pub mod protocol;
pub mod wire;

pub use conn::{ConnectError, Display, ErrorHandler, PanicOnError, WaylandError};
pub use globals::{Global, Globals};
pub use interfaces::Proxy;
pub use protocol::{
    Connection, Event, EventHandler, Fd, Fixed, Message, ObjectId, ProtocolError, Request,
};
