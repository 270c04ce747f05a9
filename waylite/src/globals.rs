//! Registry bootstrap and lazy binding of well-known globals.
//!
//! The compositor advertises its globals through `wl_registry` events. The
//! connection records every announcement; the accessors here bind a global
//! at most once per connection and hand back the cached proxy afterwards.

use std::collections::HashMap;

use crate::conn::{Display, WaylandError};
use crate::interfaces::{
    Proxy, WlCompositor, WlOutput, WlRegistry, WlRegistryBindRequest, WlRegistryGlobalEvent,
    WlShm, WlSubcompositor, WL_COMPOSITOR_INTERFACE, WL_OUTPUT_INTERFACE, WL_SHM_INTERFACE,
    WL_SUBCOMPOSITOR_INTERFACE,
};
use crate::protocol::Connection;

/// One `wl_registry.global` announcement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Global {
    /// The numeric name the compositor assigned to this global.
    pub name: u32,
    /// The interface it implements.
    pub interface: String,
    /// The highest version the compositor offers.
    pub version: u32,
}

/// Mutable globals bookkeeping, owned by the connection and maintained by
/// the dispatch flow.
///
/// Invariant: a `bound` entry for an interface implies an `announced` entry
/// it was bound from, so `global_remove` evicts both.
pub(crate) struct GlobalsState {
    registry: Option<WlRegistry>,
    announced: HashMap<String, Global>,
    bound: HashMap<String, Proxy>,
}

impl GlobalsState {
    pub(crate) fn new() -> GlobalsState {
        GlobalsState {
            registry: None,
            announced: HashMap::new(),
            bound: HashMap::new(),
        }
    }

    /// The most recent announcement wins, as the compositor may re-announce
    /// an interface under a new numeric name.
    pub(crate) fn register_global(&mut self, event: &WlRegistryGlobalEvent) {
        self.announced.insert(
            event.interface.clone(),
            Global {
                name: event.name,
                interface: event.interface.clone(),
                version: event.version,
            },
        );
    }

    pub(crate) fn unregister_global(&mut self, name: u32) {
        let interface = self
            .announced
            .iter()
            .find(|(_, global)| global.name == name)
            .map(|(interface, _)| interface.clone());
        if let Some(interface) = interface {
            self.announced.remove(&interface);
            self.bound.remove(&interface);
        }
    }
}

/// Accessors for the compositor's well-known globals.
///
/// Obtained from [`Display::globals`]. The first use performs the registry
/// bootstrap: a `wl_display.get_registry` followed by a [`Display::sync`]
/// round-trip so all queued announcements are in, which means the event
/// loop must already be running on another thread.
#[derive(Debug, Clone)]
pub struct Globals {
    conn: Display,
}

impl Display {
    /// The globals manager for this connection.
    pub fn globals(&self) -> Globals {
        Globals { conn: self.clone() }
    }
}

macro_rules! global_accessor {
    ($(#[$doc:meta])* $fn_name:ident, $proxy:ident, $desc:ident) => {
        $(#[$doc])*
        pub fn $fn_name(&self) -> Result<Option<$proxy>, WaylandError> {
            let registry = self.registry()?;
            let (global, cached) = self.conn.with_globals(|state| {
                (
                    state.announced.get($desc.name).cloned(),
                    state.bound.get($desc.name).copied(),
                )
            });
            let Some(global) = global else { return Ok(None) };
            if let Some(Proxy::$proxy(proxy)) = cached {
                return Ok(Some(proxy));
            }

            let id = self.conn.new_id();
            let proxy = $proxy::with_version(id, global.version);
            self.conn.register_proxy(Proxy::$proxy(proxy));
            let request = WlRegistryBindRequest {
                name: global.name,
                interface: global.interface.clone(),
                version: global.version,
                id: id.protocol_id(),
            };
            if let Err(e) = self.conn.send_request(registry.id(), &request) {
                self.conn.unregister_object(id);
                return Err(e.into());
            }
            self.conn.with_globals(|state| {
                state.bound.insert(global.interface.clone(), Proxy::$proxy(proxy))
            });
            Ok(Some(proxy))
        }
    };
}

impl Globals {
    /// The registry proxy, requesting and syncing it on first use.
    pub fn registry(&self) -> Result<WlRegistry, WaylandError> {
        if let Some(registry) = self.conn.with_globals(|state| state.registry) {
            return Ok(registry);
        }
        let registry = self.conn.display().get_registry(&self.conn)?;
        self.conn.with_globals(|state| state.registry = Some(registry));
        // guarantees the server has flushed all queued announcements
        self.conn.sync()?;
        Ok(registry)
    }

    /// The announcement recorded for `interface`, if any.
    pub fn announced(&self, interface: &str) -> Option<Global> {
        self.conn.with_globals(|state| state.announced.get(interface).cloned())
    }

    global_accessor!(
        /// Binds and returns the `wl_compositor` global, or `None` if the
        /// compositor never announced one.
        wl_compositor,
        WlCompositor,
        WL_COMPOSITOR_INTERFACE
    );

    global_accessor!(
        /// Binds and returns the `wl_shm` global, or `None` if the
        /// compositor never announced one.
        wl_shm,
        WlShm,
        WL_SHM_INTERFACE
    );

    global_accessor!(
        /// Binds and returns the `wl_subcompositor` global, or `None` if
        /// the compositor never announced one.
        wl_subcompositor,
        WlSubcompositor,
        WL_SUBCOMPOSITOR_INTERFACE
    );

    global_accessor!(
        /// Binds and returns the `wl_output` global, or `None` if the
        /// compositor never announced one.
        wl_output,
        WlOutput,
        WL_OUTPUT_INTERFACE
    );
}
