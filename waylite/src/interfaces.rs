// THIS FILE IS GENERATED BY WAYLITE-SCANNER. DO NOT EDIT.
// Generated with: waylite-scanner protocols
#![allow(non_upper_case_globals)]
#![allow(unused_imports)]

use crate::protocol::{
    Connection, Event, EventDesc, Fd, Fixed, InterfaceDesc, Message, ObjectId, ProtocolDesc,
    Request, RequestDesc,
};
use crate::wire::{EmitError, EventScanner, RequestEmitter, ScanError};

////////////////////////////////////////////////////////////////////////////////
// protocol: wayland

/// Protocol descriptor for `wayland`.
pub static WAYLAND_PROTOCOL: ProtocolDesc = ProtocolDesc {
    name: "wayland",
    interfaces: &[
        &WL_DISPLAY_INTERFACE,
        &WL_REGISTRY_INTERFACE,
        &WL_CALLBACK_INTERFACE,
        &WL_COMPOSITOR_INTERFACE,
        &WL_SHM_POOL_INTERFACE,
        &WL_SHM_INTERFACE,
        &WL_BUFFER_INTERFACE,
        &WL_SURFACE_INTERFACE,
        &WL_OUTPUT_INTERFACE,
        &WL_REGION_INTERFACE,
        &WL_SUBCOMPOSITOR_INTERFACE,
        &WL_SUBSURFACE_INTERFACE,
    ],
};

// ----------------------------------------------------------------------------
// interface: wayland.wl_display

/// core global object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WlDisplay {
    id: ObjectId,
    version: u32,
}

impl WlDisplay {
    /// Wraps object `id` without version information.
    pub fn new(id: ObjectId) -> WlDisplay {
        WlDisplay { id, version: 0 }
    }

    /// Wraps object `id` bound at `version`.
    pub fn with_version(id: ObjectId, version: u32) -> WlDisplay {
        WlDisplay { id, version }
    }

    /// The proxied object id.
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// The bound protocol version, or 0 if unknown.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// asynchronous roundtrip
    pub fn sync(&self, conn: &impl Connection) -> Result<WlCallback, EmitError> {
        let callback = WlCallback::new(conn.new_id());
        conn.register_proxy(Proxy::WlCallback(callback));
        let request = WlDisplaySyncRequest {
            callback: callback.id().protocol_id(),
        };
        conn.send_request(self.id, &request)?;
        Ok(callback)
    }

    /// get global registry object
    pub fn get_registry(&self, conn: &impl Connection) -> Result<WlRegistry, EmitError> {
        let registry = WlRegistry::new(conn.new_id());
        conn.register_proxy(Proxy::WlRegistry(registry));
        let request = WlDisplayGetRegistryRequest {
            registry: registry.id().protocol_id(),
        };
        conn.send_request(self.id, &request)?;
        Ok(registry)
    }
}

/// Interface descriptor for `wl_display`.
pub static WL_DISPLAY_INTERFACE: InterfaceDesc = InterfaceDesc {
    name: "wl_display",
    requests: &[
        RequestDesc {
            name: "sync",
            opcode: 0,
            new_request: || Box::new(WlDisplaySyncRequest::default()),
        },
        RequestDesc {
            name: "get_registry",
            opcode: 1,
            new_request: || Box::new(WlDisplayGetRegistryRequest::default()),
        },
    ],
    events: &[
        EventDesc {
            name: "error",
            opcode: 0,
            new_event: || Box::new(WlDisplayErrorEvent::default()),
        },
        EventDesc {
            name: "delete_id",
            opcode: 1,
            new_event: || Box::new(WlDisplayDeleteIDEvent::default()),
        },
    ],
    new_proxy: |id| Proxy::WlDisplay(WlDisplay::new(id)),
};

/// global error values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WlDisplayError(pub i32);

/// server couldn't find object
pub const WlDisplayErrorInvalidObject: WlDisplayError = WlDisplayError(0);
/// method doesn't exist on the specified interface or malformed request
pub const WlDisplayErrorInvalidMethod: WlDisplayError = WlDisplayError(1);
/// server is out of memory
pub const WlDisplayErrorNoMemory: WlDisplayError = WlDisplayError(2);
/// implementation error in compositor
pub const WlDisplayErrorImplementation: WlDisplayError = WlDisplayError(3);

/// asynchronous roundtrip
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WlDisplaySyncRequest {
    /// callback object for the sync request
    pub callback: u32,
}

impl Message for WlDisplaySyncRequest {
    fn opcode(&self) -> u16 {
        0
    }

    fn message_name(&self) -> &'static str {
        "WlDisplaySyncRequest"
    }
}

impl Request for WlDisplaySyncRequest {
    fn emit(&self, e: &mut RequestEmitter) {
        e.put_new_id(self.callback);
    }
}

/// get global registry object
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WlDisplayGetRegistryRequest {
    /// global registry object
    pub registry: u32,
}

impl Message for WlDisplayGetRegistryRequest {
    fn opcode(&self) -> u16 {
        1
    }

    fn message_name(&self) -> &'static str {
        "WlDisplayGetRegistryRequest"
    }
}

impl Request for WlDisplayGetRegistryRequest {
    fn emit(&self, e: &mut RequestEmitter) {
        e.put_new_id(self.registry);
    }
}

/// fatal error event
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WlDisplayErrorEvent {
    /// object where the error occurred
    pub object_id: u32,
    /// error code
    pub code: u32,
    /// error description
    pub message: String,
}

impl Message for WlDisplayErrorEvent {
    fn opcode(&self) -> u16 {
        0
    }

    fn message_name(&self) -> &'static str {
        "WlDisplayErrorEvent"
    }
}

impl Event for WlDisplayErrorEvent {
    fn scan(&mut self, s: &mut EventScanner) -> Result<(), ScanError> {
        self.object_id = s.object()?;
        self.code = s.uint()?;
        self.message = s.string()?;
        Ok(())
    }
}

/// acknowledge object id deletion
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WlDisplayDeleteIDEvent {
    /// deleted object id
    pub id: u32,
}

impl Message for WlDisplayDeleteIDEvent {
    fn opcode(&self) -> u16 {
        1
    }

    fn message_name(&self) -> &'static str {
        "WlDisplayDeleteIDEvent"
    }
}

impl Event for WlDisplayDeleteIDEvent {
    fn scan(&mut self, s: &mut EventScanner) -> Result<(), ScanError> {
        self.id = s.uint()?;
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// interface: wayland.wl_registry

/// global registry object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WlRegistry {
    id: ObjectId,
    version: u32,
}

impl WlRegistry {
    /// Wraps object `id` without version information.
    pub fn new(id: ObjectId) -> WlRegistry {
        WlRegistry { id, version: 0 }
    }

    /// Wraps object `id` bound at `version`.
    pub fn with_version(id: ObjectId, version: u32) -> WlRegistry {
        WlRegistry { id, version }
    }

    /// The proxied object id.
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// The bound protocol version, or 0 if unknown.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// bind an object to the display
    pub fn bind(
        &self,
        conn: &impl Connection,
        name: u32,
        interface: &str,
        version: u32,
    ) -> Result<ObjectId, EmitError> {
        let id = conn.new_id();
        let request = WlRegistryBindRequest {
            name,
            interface: interface.to_owned(),
            version,
            id: id.protocol_id(),
        };
        conn.send_request(self.id, &request)?;
        Ok(id)
    }
}

/// Interface descriptor for `wl_registry`.
pub static WL_REGISTRY_INTERFACE: InterfaceDesc = InterfaceDesc {
    name: "wl_registry",
    requests: &[
        RequestDesc {
            name: "bind",
            opcode: 0,
            new_request: || Box::new(WlRegistryBindRequest::default()),
        },
    ],
    events: &[
        EventDesc {
            name: "global",
            opcode: 0,
            new_event: || Box::new(WlRegistryGlobalEvent::default()),
        },
        EventDesc {
            name: "global_remove",
            opcode: 1,
            new_event: || Box::new(WlRegistryGlobalRemoveEvent::default()),
        },
    ],
    new_proxy: |id| Proxy::WlRegistry(WlRegistry::new(id)),
};

/// bind an object to the display
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WlRegistryBindRequest {
    /// unique numeric name of the object
    pub name: u32,
    pub interface: String,
    pub version: u32,
    /// bounded object
    pub id: u32,
}

impl Message for WlRegistryBindRequest {
    fn opcode(&self) -> u16 {
        0
    }

    fn message_name(&self) -> &'static str {
        "WlRegistryBindRequest"
    }
}

impl Request for WlRegistryBindRequest {
    fn emit(&self, e: &mut RequestEmitter) {
        e.put_uint(self.name);
        e.put_string(&self.interface);
        e.put_uint(self.version);
        e.put_new_id(self.id);
    }
}

/// announce global object
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WlRegistryGlobalEvent {
    /// numeric name of the global object
    pub name: u32,
    /// interface implemented by the object
    pub interface: String,
    /// interface version
    pub version: u32,
}

impl Message for WlRegistryGlobalEvent {
    fn opcode(&self) -> u16 {
        0
    }

    fn message_name(&self) -> &'static str {
        "WlRegistryGlobalEvent"
    }
}

impl Event for WlRegistryGlobalEvent {
    fn scan(&mut self, s: &mut EventScanner) -> Result<(), ScanError> {
        self.name = s.uint()?;
        self.interface = s.string()?;
        self.version = s.uint()?;
        Ok(())
    }
}

/// announce removal of global object
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WlRegistryGlobalRemoveEvent {
    /// numeric name of the global object
    pub name: u32,
}

impl Message for WlRegistryGlobalRemoveEvent {
    fn opcode(&self) -> u16 {
        1
    }

    fn message_name(&self) -> &'static str {
        "WlRegistryGlobalRemoveEvent"
    }
}

impl Event for WlRegistryGlobalRemoveEvent {
    fn scan(&mut self, s: &mut EventScanner) -> Result<(), ScanError> {
        self.name = s.uint()?;
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// interface: wayland.wl_callback

/// callback object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WlCallback {
    id: ObjectId,
    version: u32,
}

impl WlCallback {
    /// Wraps object `id` without version information.
    pub fn new(id: ObjectId) -> WlCallback {
        WlCallback { id, version: 0 }
    }

    /// Wraps object `id` bound at `version`.
    pub fn with_version(id: ObjectId, version: u32) -> WlCallback {
        WlCallback { id, version }
    }

    /// The proxied object id.
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// The bound protocol version, or 0 if unknown.
    pub fn version(&self) -> u32 {
        self.version
    }
}

/// Interface descriptor for `wl_callback`.
pub static WL_CALLBACK_INTERFACE: InterfaceDesc = InterfaceDesc {
    name: "wl_callback",
    requests: &[],
    events: &[
        EventDesc {
            name: "done",
            opcode: 0,
            new_event: || Box::new(WlCallbackDoneEvent::default()),
        },
    ],
    new_proxy: |id| Proxy::WlCallback(WlCallback::new(id)),
};

/// done event
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WlCallbackDoneEvent {
    /// request-specific data for the callback
    pub callback_data: u32,
}

impl Message for WlCallbackDoneEvent {
    fn opcode(&self) -> u16 {
        0
    }

    fn message_name(&self) -> &'static str {
        "WlCallbackDoneEvent"
    }
}

impl Event for WlCallbackDoneEvent {
    fn scan(&mut self, s: &mut EventScanner) -> Result<(), ScanError> {
        self.callback_data = s.uint()?;
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// interface: wayland.wl_compositor

/// the compositor singleton
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WlCompositor {
    id: ObjectId,
    version: u32,
}

impl WlCompositor {
    /// Wraps object `id` without version information.
    pub fn new(id: ObjectId) -> WlCompositor {
        WlCompositor { id, version: 0 }
    }

    /// Wraps object `id` bound at `version`.
    pub fn with_version(id: ObjectId, version: u32) -> WlCompositor {
        WlCompositor { id, version }
    }

    /// The proxied object id.
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// The bound protocol version, or 0 if unknown.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// create new surface
    pub fn create_surface(&self, conn: &impl Connection) -> Result<WlSurface, EmitError> {
        let id = WlSurface::new(conn.new_id());
        conn.register_proxy(Proxy::WlSurface(id));
        let request = WlCompositorCreateSurfaceRequest {
            id: id.id().protocol_id(),
        };
        conn.send_request(self.id, &request)?;
        Ok(id)
    }

    /// create new region
    pub fn create_region(&self, conn: &impl Connection) -> Result<WlRegion, EmitError> {
        let id = WlRegion::new(conn.new_id());
        conn.register_proxy(Proxy::WlRegion(id));
        let request = WlCompositorCreateRegionRequest {
            id: id.id().protocol_id(),
        };
        conn.send_request(self.id, &request)?;
        Ok(id)
    }
}

/// Interface descriptor for `wl_compositor`.
pub static WL_COMPOSITOR_INTERFACE: InterfaceDesc = InterfaceDesc {
    name: "wl_compositor",
    requests: &[
        RequestDesc {
            name: "create_surface",
            opcode: 0,
            new_request: || Box::new(WlCompositorCreateSurfaceRequest::default()),
        },
        RequestDesc {
            name: "create_region",
            opcode: 1,
            new_request: || Box::new(WlCompositorCreateRegionRequest::default()),
        },
    ],
    events: &[],
    new_proxy: |id| Proxy::WlCompositor(WlCompositor::new(id)),
};

/// create new surface
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WlCompositorCreateSurfaceRequest {
    /// the new surface
    pub id: u32,
}

impl Message for WlCompositorCreateSurfaceRequest {
    fn opcode(&self) -> u16 {
        0
    }

    fn message_name(&self) -> &'static str {
        "WlCompositorCreateSurfaceRequest"
    }
}

impl Request for WlCompositorCreateSurfaceRequest {
    fn emit(&self, e: &mut RequestEmitter) {
        e.put_new_id(self.id);
    }
}

/// create new region
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WlCompositorCreateRegionRequest {
    /// the new region
    pub id: u32,
}

impl Message for WlCompositorCreateRegionRequest {
    fn opcode(&self) -> u16 {
        1
    }

    fn message_name(&self) -> &'static str {
        "WlCompositorCreateRegionRequest"
    }
}

impl Request for WlCompositorCreateRegionRequest {
    fn emit(&self, e: &mut RequestEmitter) {
        e.put_new_id(self.id);
    }
}

// ----------------------------------------------------------------------------
// interface: wayland.wl_shm_pool

/// a shared memory pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WlShmPool {
    id: ObjectId,
    version: u32,
}

impl WlShmPool {
    /// Wraps object `id` without version information.
    pub fn new(id: ObjectId) -> WlShmPool {
        WlShmPool { id, version: 0 }
    }

    /// Wraps object `id` bound at `version`.
    pub fn with_version(id: ObjectId, version: u32) -> WlShmPool {
        WlShmPool { id, version }
    }

    /// The proxied object id.
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// The bound protocol version, or 0 if unknown.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// create a buffer from the pool
    pub fn create_buffer(
        &self,
        conn: &impl Connection,
        offset: i32,
        width: i32,
        height: i32,
        stride: i32,
        format: u32,
    ) -> Result<WlBuffer, EmitError> {
        let id = WlBuffer::new(conn.new_id());
        conn.register_proxy(Proxy::WlBuffer(id));
        let request = WlShmPoolCreateBufferRequest {
            id: id.id().protocol_id(),
            offset,
            width,
            height,
            stride,
            format,
        };
        conn.send_request(self.id, &request)?;
        Ok(id)
    }

    /// destroy the pool
    pub fn destroy(&self, conn: &impl Connection) -> Result<(), EmitError> {
        let request = WlShmPoolDestroyRequest {};
        conn.send_request(self.id, &request)?;
        conn.unregister_object(self.id);
        Ok(())
    }

    /// change the size of the pool mapping
    pub fn resize(
        &self,
        conn: &impl Connection,
        size: i32,
    ) -> Result<(), EmitError> {
        let request = WlShmPoolResizeRequest {
            size,
        };
        conn.send_request(self.id, &request)?;
        Ok(())
    }
}

/// Interface descriptor for `wl_shm_pool`.
pub static WL_SHM_POOL_INTERFACE: InterfaceDesc = InterfaceDesc {
    name: "wl_shm_pool",
    requests: &[
        RequestDesc {
            name: "create_buffer",
            opcode: 0,
            new_request: || Box::new(WlShmPoolCreateBufferRequest::default()),
        },
        RequestDesc {
            name: "destroy",
            opcode: 1,
            new_request: || Box::new(WlShmPoolDestroyRequest::default()),
        },
        RequestDesc {
            name: "resize",
            opcode: 2,
            new_request: || Box::new(WlShmPoolResizeRequest::default()),
        },
    ],
    events: &[],
    new_proxy: |id| Proxy::WlShmPool(WlShmPool::new(id)),
};

/// create a buffer from the pool
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WlShmPoolCreateBufferRequest {
    /// buffer to create
    pub id: u32,
    /// buffer byte offset within the pool
    pub offset: i32,
    /// buffer width, in pixels
    pub width: i32,
    /// buffer height, in pixels
    pub height: i32,
    /// number of bytes from the beginning of one row to the beginning of the next row
    pub stride: i32,
    /// buffer pixel format
    pub format: u32,
}

impl Message for WlShmPoolCreateBufferRequest {
    fn opcode(&self) -> u16 {
        0
    }

    fn message_name(&self) -> &'static str {
        "WlShmPoolCreateBufferRequest"
    }
}

impl Request for WlShmPoolCreateBufferRequest {
    fn emit(&self, e: &mut RequestEmitter) {
        e.put_new_id(self.id);
        e.put_int(self.offset);
        e.put_int(self.width);
        e.put_int(self.height);
        e.put_int(self.stride);
        e.put_uint(self.format);
    }
}

/// destroy the pool
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WlShmPoolDestroyRequest {}

impl Message for WlShmPoolDestroyRequest {
    fn opcode(&self) -> u16 {
        1
    }

    fn message_name(&self) -> &'static str {
        "WlShmPoolDestroyRequest"
    }
}

impl Request for WlShmPoolDestroyRequest {
    fn emit(&self, _: &mut RequestEmitter) {}
}

/// change the size of the pool mapping
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WlShmPoolResizeRequest {
    /// new size of the pool, in bytes
    pub size: i32,
}

impl Message for WlShmPoolResizeRequest {
    fn opcode(&self) -> u16 {
        2
    }

    fn message_name(&self) -> &'static str {
        "WlShmPoolResizeRequest"
    }
}

impl Request for WlShmPoolResizeRequest {
    fn emit(&self, e: &mut RequestEmitter) {
        e.put_int(self.size);
    }
}

// ----------------------------------------------------------------------------
// interface: wayland.wl_shm

/// shared memory support
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WlShm {
    id: ObjectId,
    version: u32,
}

impl WlShm {
    /// Wraps object `id` without version information.
    pub fn new(id: ObjectId) -> WlShm {
        WlShm { id, version: 0 }
    }

    /// Wraps object `id` bound at `version`.
    pub fn with_version(id: ObjectId, version: u32) -> WlShm {
        WlShm { id, version }
    }

    /// The proxied object id.
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// The bound protocol version, or 0 if unknown.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// create a shm pool
    pub fn create_pool(
        &self,
        conn: &impl Connection,
        fd: Fd,
        size: i32,
    ) -> Result<WlShmPool, EmitError> {
        let id = WlShmPool::new(conn.new_id());
        conn.register_proxy(Proxy::WlShmPool(id));
        let request = WlShmCreatePoolRequest {
            id: id.id().protocol_id(),
            fd,
            size,
        };
        conn.send_request(self.id, &request)?;
        Ok(id)
    }

    /// release the shm object
    pub fn release(&self, conn: &impl Connection) -> Result<(), EmitError> {
        let request = WlShmReleaseRequest {};
        conn.send_request(self.id, &request)?;
        conn.unregister_object(self.id);
        Ok(())
    }
}

/// Interface descriptor for `wl_shm`.
pub static WL_SHM_INTERFACE: InterfaceDesc = InterfaceDesc {
    name: "wl_shm",
    requests: &[
        RequestDesc {
            name: "create_pool",
            opcode: 0,
            new_request: || Box::new(WlShmCreatePoolRequest::default()),
        },
        RequestDesc {
            name: "release",
            opcode: 1,
            new_request: || Box::new(WlShmReleaseRequest::default()),
        },
    ],
    events: &[
        EventDesc {
            name: "format",
            opcode: 0,
            new_event: || Box::new(WlShmFormatEvent::default()),
        },
    ],
    new_proxy: |id| Proxy::WlShm(WlShm::new(id)),
};

/// wl_shm error values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WlShmError(pub i32);

/// buffer format is not known
pub const WlShmErrorInvalidFormat: WlShmError = WlShmError(0);
/// invalid size or stride during pool or buffer creation
pub const WlShmErrorInvalidStride: WlShmError = WlShmError(1);
/// mmapping the file descriptor failed
pub const WlShmErrorInvalidFD: WlShmError = WlShmError(2);

/// pixel formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WlShmFormat(pub i32);

/// 32-bit ARGB format, [31:0] A:R:G:B 8:8:8:8 little endian
pub const WlShmFormatArgb8888: WlShmFormat = WlShmFormat(0);
/// 32-bit RGB format, [31:0] x:R:G:B 8:8:8:8 little endian
pub const WlShmFormatXrgb8888: WlShmFormat = WlShmFormat(1);
pub const WlShmFormatRgb565: WlShmFormat = WlShmFormat(909199186);
pub const WlShmFormatRgb888: WlShmFormat = WlShmFormat(875710290);
pub const WlShmFormatXbgr8888: WlShmFormat = WlShmFormat(875709016);
pub const WlShmFormatAbgr8888: WlShmFormat = WlShmFormat(875708993);

/// create a shm pool
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WlShmCreatePoolRequest {
    /// pool to create
    pub id: u32,
    /// file descriptor for the pool
    pub fd: Fd,
    /// pool size, in bytes
    pub size: i32,
}

impl Message for WlShmCreatePoolRequest {
    fn opcode(&self) -> u16 {
        0
    }

    fn message_name(&self) -> &'static str {
        "WlShmCreatePoolRequest"
    }
}

impl Request for WlShmCreatePoolRequest {
    fn emit(&self, e: &mut RequestEmitter) {
        e.put_new_id(self.id);
        e.put_fd(self.fd);
        e.put_int(self.size);
    }
}

/// release the shm object
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WlShmReleaseRequest {}

impl Message for WlShmReleaseRequest {
    fn opcode(&self) -> u16 {
        1
    }

    fn message_name(&self) -> &'static str {
        "WlShmReleaseRequest"
    }
}

impl Request for WlShmReleaseRequest {
    fn emit(&self, _: &mut RequestEmitter) {}
}

/// pixel format description
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WlShmFormatEvent {
    /// buffer pixel format
    pub format: u32,
}

impl Message for WlShmFormatEvent {
    fn opcode(&self) -> u16 {
        0
    }

    fn message_name(&self) -> &'static str {
        "WlShmFormatEvent"
    }
}

impl Event for WlShmFormatEvent {
    fn scan(&mut self, s: &mut EventScanner) -> Result<(), ScanError> {
        self.format = s.uint()?;
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// interface: wayland.wl_buffer

/// content for a wl_surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WlBuffer {
    id: ObjectId,
    version: u32,
}

impl WlBuffer {
    /// Wraps object `id` without version information.
    pub fn new(id: ObjectId) -> WlBuffer {
        WlBuffer { id, version: 0 }
    }

    /// Wraps object `id` bound at `version`.
    pub fn with_version(id: ObjectId, version: u32) -> WlBuffer {
        WlBuffer { id, version }
    }

    /// The proxied object id.
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// The bound protocol version, or 0 if unknown.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// destroy a buffer
    pub fn destroy(&self, conn: &impl Connection) -> Result<(), EmitError> {
        let request = WlBufferDestroyRequest {};
        conn.send_request(self.id, &request)?;
        conn.unregister_object(self.id);
        Ok(())
    }
}

/// Interface descriptor for `wl_buffer`.
pub static WL_BUFFER_INTERFACE: InterfaceDesc = InterfaceDesc {
    name: "wl_buffer",
    requests: &[
        RequestDesc {
            name: "destroy",
            opcode: 0,
            new_request: || Box::new(WlBufferDestroyRequest::default()),
        },
    ],
    events: &[
        EventDesc {
            name: "release",
            opcode: 0,
            new_event: || Box::new(WlBufferReleaseEvent::default()),
        },
    ],
    new_proxy: |id| Proxy::WlBuffer(WlBuffer::new(id)),
};

/// destroy a buffer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WlBufferDestroyRequest {}

impl Message for WlBufferDestroyRequest {
    fn opcode(&self) -> u16 {
        0
    }

    fn message_name(&self) -> &'static str {
        "WlBufferDestroyRequest"
    }
}

impl Request for WlBufferDestroyRequest {
    fn emit(&self, _: &mut RequestEmitter) {}
}

/// compositor releases buffer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WlBufferReleaseEvent {}

impl Message for WlBufferReleaseEvent {
    fn opcode(&self) -> u16 {
        0
    }

    fn message_name(&self) -> &'static str {
        "WlBufferReleaseEvent"
    }
}

impl Event for WlBufferReleaseEvent {
    fn scan(&mut self, _: &mut EventScanner) -> Result<(), ScanError> {
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// interface: wayland.wl_surface

/// an onscreen surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WlSurface {
    id: ObjectId,
    version: u32,
}

impl WlSurface {
    /// Wraps object `id` without version information.
    pub fn new(id: ObjectId) -> WlSurface {
        WlSurface { id, version: 0 }
    }

    /// Wraps object `id` bound at `version`.
    pub fn with_version(id: ObjectId, version: u32) -> WlSurface {
        WlSurface { id, version }
    }

    /// The proxied object id.
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// The bound protocol version, or 0 if unknown.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// delete surface
    pub fn destroy(&self, conn: &impl Connection) -> Result<(), EmitError> {
        let request = WlSurfaceDestroyRequest {};
        conn.send_request(self.id, &request)?;
        conn.unregister_object(self.id);
        Ok(())
    }

    /// set the surface contents
    pub fn attach(
        &self,
        conn: &impl Connection,
        buffer: ObjectId,
        x: i32,
        y: i32,
    ) -> Result<(), EmitError> {
        let request = WlSurfaceAttachRequest {
            buffer: buffer.protocol_id(),
            x,
            y,
        };
        conn.send_request(self.id, &request)?;
        Ok(())
    }

    /// mark part of the surface damaged
    pub fn damage(
        &self,
        conn: &impl Connection,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    ) -> Result<(), EmitError> {
        let request = WlSurfaceDamageRequest {
            x,
            y,
            width,
            height,
        };
        conn.send_request(self.id, &request)?;
        Ok(())
    }

    /// request a frame throttling hint
    pub fn frame(&self, conn: &impl Connection) -> Result<WlCallback, EmitError> {
        let callback = WlCallback::new(conn.new_id());
        conn.register_proxy(Proxy::WlCallback(callback));
        let request = WlSurfaceFrameRequest {
            callback: callback.id().protocol_id(),
        };
        conn.send_request(self.id, &request)?;
        Ok(callback)
    }

    /// set opaque region
    pub fn set_opaque_region(
        &self,
        conn: &impl Connection,
        region: ObjectId,
    ) -> Result<(), EmitError> {
        let request = WlSurfaceSetOpaqueRegionRequest {
            region: region.protocol_id(),
        };
        conn.send_request(self.id, &request)?;
        Ok(())
    }

    /// set input region
    pub fn set_input_region(
        &self,
        conn: &impl Connection,
        region: ObjectId,
    ) -> Result<(), EmitError> {
        let request = WlSurfaceSetInputRegionRequest {
            region: region.protocol_id(),
        };
        conn.send_request(self.id, &request)?;
        Ok(())
    }

    /// commit pending surface state
    pub fn commit(&self, conn: &impl Connection) -> Result<(), EmitError> {
        let request = WlSurfaceCommitRequest {};
        conn.send_request(self.id, &request)?;
        Ok(())
    }

    /// sets the buffer transformation
    pub fn set_buffer_transform(
        &self,
        conn: &impl Connection,
        transform: i32,
    ) -> Result<(), EmitError> {
        let request = WlSurfaceSetBufferTransformRequest {
            transform,
        };
        conn.send_request(self.id, &request)?;
        Ok(())
    }

    /// sets the buffer scaling factor
    pub fn set_buffer_scale(
        &self,
        conn: &impl Connection,
        scale: i32,
    ) -> Result<(), EmitError> {
        let request = WlSurfaceSetBufferScaleRequest {
            scale,
        };
        conn.send_request(self.id, &request)?;
        Ok(())
    }

    /// mark part of the surface damaged using buffer coordinates
    pub fn damage_buffer(
        &self,
        conn: &impl Connection,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    ) -> Result<(), EmitError> {
        let request = WlSurfaceDamageBufferRequest {
            x,
            y,
            width,
            height,
        };
        conn.send_request(self.id, &request)?;
        Ok(())
    }
}

/// Interface descriptor for `wl_surface`.
pub static WL_SURFACE_INTERFACE: InterfaceDesc = InterfaceDesc {
    name: "wl_surface",
    requests: &[
        RequestDesc {
            name: "destroy",
            opcode: 0,
            new_request: || Box::new(WlSurfaceDestroyRequest::default()),
        },
        RequestDesc {
            name: "attach",
            opcode: 1,
            new_request: || Box::new(WlSurfaceAttachRequest::default()),
        },
        RequestDesc {
            name: "damage",
            opcode: 2,
            new_request: || Box::new(WlSurfaceDamageRequest::default()),
        },
        RequestDesc {
            name: "frame",
            opcode: 3,
            new_request: || Box::new(WlSurfaceFrameRequest::default()),
        },
        RequestDesc {
            name: "set_opaque_region",
            opcode: 4,
            new_request: || Box::new(WlSurfaceSetOpaqueRegionRequest::default()),
        },
        RequestDesc {
            name: "set_input_region",
            opcode: 5,
            new_request: || Box::new(WlSurfaceSetInputRegionRequest::default()),
        },
        RequestDesc {
            name: "commit",
            opcode: 6,
            new_request: || Box::new(WlSurfaceCommitRequest::default()),
        },
        RequestDesc {
            name: "set_buffer_transform",
            opcode: 7,
            new_request: || Box::new(WlSurfaceSetBufferTransformRequest::default()),
        },
        RequestDesc {
            name: "set_buffer_scale",
            opcode: 8,
            new_request: || Box::new(WlSurfaceSetBufferScaleRequest::default()),
        },
        RequestDesc {
            name: "damage_buffer",
            opcode: 9,
            new_request: || Box::new(WlSurfaceDamageBufferRequest::default()),
        },
    ],
    events: &[
        EventDesc {
            name: "enter",
            opcode: 0,
            new_event: || Box::new(WlSurfaceEnterEvent::default()),
        },
        EventDesc {
            name: "leave",
            opcode: 1,
            new_event: || Box::new(WlSurfaceLeaveEvent::default()),
        },
    ],
    new_proxy: |id| Proxy::WlSurface(WlSurface::new(id)),
};

/// wl_surface error values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WlSurfaceError(pub i32);

/// buffer scale value is invalid
pub const WlSurfaceErrorInvalidScale: WlSurfaceError = WlSurfaceError(0);
/// buffer transform value is invalid
pub const WlSurfaceErrorInvalidTransform: WlSurfaceError = WlSurfaceError(1);
/// buffer size is invalid
pub const WlSurfaceErrorInvalidSize: WlSurfaceError = WlSurfaceError(2);

/// delete surface
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WlSurfaceDestroyRequest {}

impl Message for WlSurfaceDestroyRequest {
    fn opcode(&self) -> u16 {
        0
    }

    fn message_name(&self) -> &'static str {
        "WlSurfaceDestroyRequest"
    }
}

impl Request for WlSurfaceDestroyRequest {
    fn emit(&self, _: &mut RequestEmitter) {}
}

/// set the surface contents
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WlSurfaceAttachRequest {
    /// buffer of surface contents
    pub buffer: u32,
    /// surface-local x coordinate
    pub x: i32,
    /// surface-local y coordinate
    pub y: i32,
}

impl Message for WlSurfaceAttachRequest {
    fn opcode(&self) -> u16 {
        1
    }

    fn message_name(&self) -> &'static str {
        "WlSurfaceAttachRequest"
    }
}

impl Request for WlSurfaceAttachRequest {
    fn emit(&self, e: &mut RequestEmitter) {
        e.put_object(self.buffer);
        e.put_int(self.x);
        e.put_int(self.y);
    }
}

/// mark part of the surface damaged
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WlSurfaceDamageRequest {
    /// surface-local x coordinate
    pub x: i32,
    /// surface-local y coordinate
    pub y: i32,
    /// width of damage rectangle
    pub width: i32,
    /// height of damage rectangle
    pub height: i32,
}

impl Message for WlSurfaceDamageRequest {
    fn opcode(&self) -> u16 {
        2
    }

    fn message_name(&self) -> &'static str {
        "WlSurfaceDamageRequest"
    }
}

impl Request for WlSurfaceDamageRequest {
    fn emit(&self, e: &mut RequestEmitter) {
        e.put_int(self.x);
        e.put_int(self.y);
        e.put_int(self.width);
        e.put_int(self.height);
    }
}

/// request a frame throttling hint
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WlSurfaceFrameRequest {
    /// callback object for the frame request
    pub callback: u32,
}

impl Message for WlSurfaceFrameRequest {
    fn opcode(&self) -> u16 {
        3
    }

    fn message_name(&self) -> &'static str {
        "WlSurfaceFrameRequest"
    }
}

impl Request for WlSurfaceFrameRequest {
    fn emit(&self, e: &mut RequestEmitter) {
        e.put_new_id(self.callback);
    }
}

/// set opaque region
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WlSurfaceSetOpaqueRegionRequest {
    /// opaque region of the surface
    pub region: u32,
}

impl Message for WlSurfaceSetOpaqueRegionRequest {
    fn opcode(&self) -> u16 {
        4
    }

    fn message_name(&self) -> &'static str {
        "WlSurfaceSetOpaqueRegionRequest"
    }
}

impl Request for WlSurfaceSetOpaqueRegionRequest {
    fn emit(&self, e: &mut RequestEmitter) {
        e.put_object(self.region);
    }
}

/// set input region
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WlSurfaceSetInputRegionRequest {
    /// input region of the surface
    pub region: u32,
}

impl Message for WlSurfaceSetInputRegionRequest {
    fn opcode(&self) -> u16 {
        5
    }

    fn message_name(&self) -> &'static str {
        "WlSurfaceSetInputRegionRequest"
    }
}

impl Request for WlSurfaceSetInputRegionRequest {
    fn emit(&self, e: &mut RequestEmitter) {
        e.put_object(self.region);
    }
}

/// commit pending surface state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WlSurfaceCommitRequest {}

impl Message for WlSurfaceCommitRequest {
    fn opcode(&self) -> u16 {
        6
    }

    fn message_name(&self) -> &'static str {
        "WlSurfaceCommitRequest"
    }
}

impl Request for WlSurfaceCommitRequest {
    fn emit(&self, _: &mut RequestEmitter) {}
}

/// sets the buffer transformation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WlSurfaceSetBufferTransformRequest {
    /// transform for interpreting buffer contents
    pub transform: i32,
}

impl Message for WlSurfaceSetBufferTransformRequest {
    fn opcode(&self) -> u16 {
        7
    }

    fn message_name(&self) -> &'static str {
        "WlSurfaceSetBufferTransformRequest"
    }
}

impl Request for WlSurfaceSetBufferTransformRequest {
    fn emit(&self, e: &mut RequestEmitter) {
        e.put_int(self.transform);
    }
}

/// sets the buffer scaling factor
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WlSurfaceSetBufferScaleRequest {
    /// scale for interpreting buffer contents
    pub scale: i32,
}

impl Message for WlSurfaceSetBufferScaleRequest {
    fn opcode(&self) -> u16 {
        8
    }

    fn message_name(&self) -> &'static str {
        "WlSurfaceSetBufferScaleRequest"
    }
}

impl Request for WlSurfaceSetBufferScaleRequest {
    fn emit(&self, e: &mut RequestEmitter) {
        e.put_int(self.scale);
    }
}

/// mark part of the surface damaged using buffer coordinates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WlSurfaceDamageBufferRequest {
    /// buffer-local x coordinate
    pub x: i32,
    /// buffer-local y coordinate
    pub y: i32,
    /// width of damage rectangle
    pub width: i32,
    /// height of damage rectangle
    pub height: i32,
}

impl Message for WlSurfaceDamageBufferRequest {
    fn opcode(&self) -> u16 {
        9
    }

    fn message_name(&self) -> &'static str {
        "WlSurfaceDamageBufferRequest"
    }
}

impl Request for WlSurfaceDamageBufferRequest {
    fn emit(&self, e: &mut RequestEmitter) {
        e.put_int(self.x);
        e.put_int(self.y);
        e.put_int(self.width);
        e.put_int(self.height);
    }
}

/// surface enters an output
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WlSurfaceEnterEvent {
    /// output entered by the surface
    pub output: u32,
}

impl Message for WlSurfaceEnterEvent {
    fn opcode(&self) -> u16 {
        0
    }

    fn message_name(&self) -> &'static str {
        "WlSurfaceEnterEvent"
    }
}

impl Event for WlSurfaceEnterEvent {
    fn scan(&mut self, s: &mut EventScanner) -> Result<(), ScanError> {
        self.output = s.object()?;
        Ok(())
    }
}

/// surface leaves an output
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WlSurfaceLeaveEvent {
    /// output left by the surface
    pub output: u32,
}

impl Message for WlSurfaceLeaveEvent {
    fn opcode(&self) -> u16 {
        1
    }

    fn message_name(&self) -> &'static str {
        "WlSurfaceLeaveEvent"
    }
}

impl Event for WlSurfaceLeaveEvent {
    fn scan(&mut self, s: &mut EventScanner) -> Result<(), ScanError> {
        self.output = s.object()?;
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// interface: wayland.wl_output

/// compositor output region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WlOutput {
    id: ObjectId,
    version: u32,
}

impl WlOutput {
    /// Wraps object `id` without version information.
    pub fn new(id: ObjectId) -> WlOutput {
        WlOutput { id, version: 0 }
    }

    /// Wraps object `id` bound at `version`.
    pub fn with_version(id: ObjectId, version: u32) -> WlOutput {
        WlOutput { id, version }
    }

    /// The proxied object id.
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// The bound protocol version, or 0 if unknown.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// release the output object
    pub fn release(&self, conn: &impl Connection) -> Result<(), EmitError> {
        let request = WlOutputReleaseRequest {};
        conn.send_request(self.id, &request)?;
        conn.unregister_object(self.id);
        Ok(())
    }
}

/// Interface descriptor for `wl_output`.
pub static WL_OUTPUT_INTERFACE: InterfaceDesc = InterfaceDesc {
    name: "wl_output",
    requests: &[
        RequestDesc {
            name: "release",
            opcode: 0,
            new_request: || Box::new(WlOutputReleaseRequest::default()),
        },
    ],
    events: &[
        EventDesc {
            name: "geometry",
            opcode: 0,
            new_event: || Box::new(WlOutputGeometryEvent::default()),
        },
        EventDesc {
            name: "mode",
            opcode: 1,
            new_event: || Box::new(WlOutputModeEvent::default()),
        },
        EventDesc {
            name: "done",
            opcode: 2,
            new_event: || Box::new(WlOutputDoneEvent::default()),
        },
        EventDesc {
            name: "scale",
            opcode: 3,
            new_event: || Box::new(WlOutputScaleEvent::default()),
        },
    ],
    new_proxy: |id| Proxy::WlOutput(WlOutput::new(id)),
};

/// subpixel geometry information
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WlOutputSubpixel(pub i32);

/// unknown geometry
pub const WlOutputSubpixelUnknown: WlOutputSubpixel = WlOutputSubpixel(0);
/// no geometry
pub const WlOutputSubpixelNone: WlOutputSubpixel = WlOutputSubpixel(1);
/// horizontal RGB
pub const WlOutputSubpixelHorizontalRgb: WlOutputSubpixel = WlOutputSubpixel(2);
/// horizontal BGR
pub const WlOutputSubpixelHorizontalBgr: WlOutputSubpixel = WlOutputSubpixel(3);
/// vertical RGB
pub const WlOutputSubpixelVerticalRgb: WlOutputSubpixel = WlOutputSubpixel(4);
/// vertical BGR
pub const WlOutputSubpixelVerticalBgr: WlOutputSubpixel = WlOutputSubpixel(5);

/// transform from framebuffer to output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WlOutputTransform(pub i32);

/// no transform
pub const WlOutputTransformNormal: WlOutputTransform = WlOutputTransform(0);
/// 90 degrees counter-clockwise
pub const WlOutputTransform90: WlOutputTransform = WlOutputTransform(1);
/// 180 degrees counter-clockwise
pub const WlOutputTransform180: WlOutputTransform = WlOutputTransform(2);
/// 270 degrees counter-clockwise
pub const WlOutputTransform270: WlOutputTransform = WlOutputTransform(3);
/// 180 degree flip around a vertical axis
pub const WlOutputTransformFlipped: WlOutputTransform = WlOutputTransform(4);
/// flip and rotate 90 degrees counter-clockwise
pub const WlOutputTransformFlipped90: WlOutputTransform = WlOutputTransform(5);
/// flip and rotate 180 degrees counter-clockwise
pub const WlOutputTransformFlipped180: WlOutputTransform = WlOutputTransform(6);
/// flip and rotate 270 degrees counter-clockwise
pub const WlOutputTransformFlipped270: WlOutputTransform = WlOutputTransform(7);

/// mode information
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WlOutputMode(pub u32);

/// indicates this is the current mode
pub const WlOutputModeCurrent: WlOutputMode = WlOutputMode(1);
/// indicates this is the preferred mode
pub const WlOutputModePreferred: WlOutputMode = WlOutputMode(2);

/// release the output object
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WlOutputReleaseRequest {}

impl Message for WlOutputReleaseRequest {
    fn opcode(&self) -> u16 {
        0
    }

    fn message_name(&self) -> &'static str {
        "WlOutputReleaseRequest"
    }
}

impl Request for WlOutputReleaseRequest {
    fn emit(&self, _: &mut RequestEmitter) {}
}

/// properties of the output
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WlOutputGeometryEvent {
    /// x position within the global compositor space
    pub x: i32,
    /// y position within the global compositor space
    pub y: i32,
    /// width in millimeters of the output
    pub physical_width: i32,
    /// height in millimeters of the output
    pub physical_height: i32,
    /// subpixel orientation of the output
    pub subpixel: i32,
    /// textual description of the manufacturer
    pub make: String,
    /// textual description of the model
    pub model: String,
    /// transform that maps framebuffer to output
    pub transform: i32,
}

impl Message for WlOutputGeometryEvent {
    fn opcode(&self) -> u16 {
        0
    }

    fn message_name(&self) -> &'static str {
        "WlOutputGeometryEvent"
    }
}

impl Event for WlOutputGeometryEvent {
    fn scan(&mut self, s: &mut EventScanner) -> Result<(), ScanError> {
        self.x = s.int()?;
        self.y = s.int()?;
        self.physical_width = s.int()?;
        self.physical_height = s.int()?;
        self.subpixel = s.int()?;
        self.make = s.string()?;
        self.model = s.string()?;
        self.transform = s.int()?;
        Ok(())
    }
}

/// advertise available modes for the output
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WlOutputModeEvent {
    /// bitfield of mode flags
    pub flags: u32,
    /// width of the mode in hardware units
    pub width: i32,
    /// height of the mode in hardware units
    pub height: i32,
    /// vertical refresh rate in mHz
    pub refresh: i32,
}

impl Message for WlOutputModeEvent {
    fn opcode(&self) -> u16 {
        1
    }

    fn message_name(&self) -> &'static str {
        "WlOutputModeEvent"
    }
}

impl Event for WlOutputModeEvent {
    fn scan(&mut self, s: &mut EventScanner) -> Result<(), ScanError> {
        self.flags = s.uint()?;
        self.width = s.int()?;
        self.height = s.int()?;
        self.refresh = s.int()?;
        Ok(())
    }
}

/// sent all information about output
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WlOutputDoneEvent {}

impl Message for WlOutputDoneEvent {
    fn opcode(&self) -> u16 {
        2
    }

    fn message_name(&self) -> &'static str {
        "WlOutputDoneEvent"
    }
}

impl Event for WlOutputDoneEvent {
    fn scan(&mut self, _: &mut EventScanner) -> Result<(), ScanError> {
        Ok(())
    }
}

/// output scaling properties
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WlOutputScaleEvent {
    /// scaling factor of output
    pub factor: i32,
}

impl Message for WlOutputScaleEvent {
    fn opcode(&self) -> u16 {
        3
    }

    fn message_name(&self) -> &'static str {
        "WlOutputScaleEvent"
    }
}

impl Event for WlOutputScaleEvent {
    fn scan(&mut self, s: &mut EventScanner) -> Result<(), ScanError> {
        self.factor = s.int()?;
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// interface: wayland.wl_region

/// region interface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WlRegion {
    id: ObjectId,
    version: u32,
}

impl WlRegion {
    /// Wraps object `id` without version information.
    pub fn new(id: ObjectId) -> WlRegion {
        WlRegion { id, version: 0 }
    }

    /// Wraps object `id` bound at `version`.
    pub fn with_version(id: ObjectId, version: u32) -> WlRegion {
        WlRegion { id, version }
    }

    /// The proxied object id.
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// The bound protocol version, or 0 if unknown.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// destroy region
    pub fn destroy(&self, conn: &impl Connection) -> Result<(), EmitError> {
        let request = WlRegionDestroyRequest {};
        conn.send_request(self.id, &request)?;
        conn.unregister_object(self.id);
        Ok(())
    }

    /// add rectangle to region
    pub fn add(
        &self,
        conn: &impl Connection,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    ) -> Result<(), EmitError> {
        let request = WlRegionAddRequest {
            x,
            y,
            width,
            height,
        };
        conn.send_request(self.id, &request)?;
        Ok(())
    }

    /// subtract rectangle from region
    pub fn subtract(
        &self,
        conn: &impl Connection,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    ) -> Result<(), EmitError> {
        let request = WlRegionSubtractRequest {
            x,
            y,
            width,
            height,
        };
        conn.send_request(self.id, &request)?;
        Ok(())
    }
}

/// Interface descriptor for `wl_region`.
pub static WL_REGION_INTERFACE: InterfaceDesc = InterfaceDesc {
    name: "wl_region",
    requests: &[
        RequestDesc {
            name: "destroy",
            opcode: 0,
            new_request: || Box::new(WlRegionDestroyRequest::default()),
        },
        RequestDesc {
            name: "add",
            opcode: 1,
            new_request: || Box::new(WlRegionAddRequest::default()),
        },
        RequestDesc {
            name: "subtract",
            opcode: 2,
            new_request: || Box::new(WlRegionSubtractRequest::default()),
        },
    ],
    events: &[],
    new_proxy: |id| Proxy::WlRegion(WlRegion::new(id)),
};

/// destroy region
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WlRegionDestroyRequest {}

impl Message for WlRegionDestroyRequest {
    fn opcode(&self) -> u16 {
        0
    }

    fn message_name(&self) -> &'static str {
        "WlRegionDestroyRequest"
    }
}

impl Request for WlRegionDestroyRequest {
    fn emit(&self, _: &mut RequestEmitter) {}
}

/// add rectangle to region
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WlRegionAddRequest {
    /// region-local x coordinate
    pub x: i32,
    /// region-local y coordinate
    pub y: i32,
    /// rectangle width
    pub width: i32,
    /// rectangle height
    pub height: i32,
}

impl Message for WlRegionAddRequest {
    fn opcode(&self) -> u16 {
        1
    }

    fn message_name(&self) -> &'static str {
        "WlRegionAddRequest"
    }
}

impl Request for WlRegionAddRequest {
    fn emit(&self, e: &mut RequestEmitter) {
        e.put_int(self.x);
        e.put_int(self.y);
        e.put_int(self.width);
        e.put_int(self.height);
    }
}

/// subtract rectangle from region
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WlRegionSubtractRequest {
    /// region-local x coordinate
    pub x: i32,
    /// region-local y coordinate
    pub y: i32,
    /// rectangle width
    pub width: i32,
    /// rectangle height
    pub height: i32,
}

impl Message for WlRegionSubtractRequest {
    fn opcode(&self) -> u16 {
        2
    }

    fn message_name(&self) -> &'static str {
        "WlRegionSubtractRequest"
    }
}

impl Request for WlRegionSubtractRequest {
    fn emit(&self, e: &mut RequestEmitter) {
        e.put_int(self.x);
        e.put_int(self.y);
        e.put_int(self.width);
        e.put_int(self.height);
    }
}

// ----------------------------------------------------------------------------
// interface: wayland.wl_subcompositor

/// sub-surface compositing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WlSubcompositor {
    id: ObjectId,
    version: u32,
}

impl WlSubcompositor {
    /// Wraps object `id` without version information.
    pub fn new(id: ObjectId) -> WlSubcompositor {
        WlSubcompositor { id, version: 0 }
    }

    /// Wraps object `id` bound at `version`.
    pub fn with_version(id: ObjectId, version: u32) -> WlSubcompositor {
        WlSubcompositor { id, version }
    }

    /// The proxied object id.
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// The bound protocol version, or 0 if unknown.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// unbind from the subcompositor interface
    pub fn destroy(&self, conn: &impl Connection) -> Result<(), EmitError> {
        let request = WlSubcompositorDestroyRequest {};
        conn.send_request(self.id, &request)?;
        conn.unregister_object(self.id);
        Ok(())
    }

    /// give a surface the role sub-surface
    pub fn get_subsurface(
        &self,
        conn: &impl Connection,
        surface: ObjectId,
        parent: ObjectId,
    ) -> Result<WlSubsurface, EmitError> {
        let id = WlSubsurface::new(conn.new_id());
        conn.register_proxy(Proxy::WlSubsurface(id));
        let request = WlSubcompositorGetSubsurfaceRequest {
            id: id.id().protocol_id(),
            surface: surface.protocol_id(),
            parent: parent.protocol_id(),
        };
        conn.send_request(self.id, &request)?;
        Ok(id)
    }
}

/// Interface descriptor for `wl_subcompositor`.
pub static WL_SUBCOMPOSITOR_INTERFACE: InterfaceDesc = InterfaceDesc {
    name: "wl_subcompositor",
    requests: &[
        RequestDesc {
            name: "destroy",
            opcode: 0,
            new_request: || Box::new(WlSubcompositorDestroyRequest::default()),
        },
        RequestDesc {
            name: "get_subsurface",
            opcode: 1,
            new_request: || Box::new(WlSubcompositorGetSubsurfaceRequest::default()),
        },
    ],
    events: &[],
    new_proxy: |id| Proxy::WlSubcompositor(WlSubcompositor::new(id)),
};

/// wl_subcompositor error values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WlSubcompositorError(pub i32);

/// the to-be sub-surface is invalid
pub const WlSubcompositorErrorBadSurface: WlSubcompositorError = WlSubcompositorError(0);
/// the to-be sub-surface parent is invalid
pub const WlSubcompositorErrorBadParent: WlSubcompositorError = WlSubcompositorError(1);

/// unbind from the subcompositor interface
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WlSubcompositorDestroyRequest {}

impl Message for WlSubcompositorDestroyRequest {
    fn opcode(&self) -> u16 {
        0
    }

    fn message_name(&self) -> &'static str {
        "WlSubcompositorDestroyRequest"
    }
}

impl Request for WlSubcompositorDestroyRequest {
    fn emit(&self, _: &mut RequestEmitter) {}
}

/// give a surface the role sub-surface
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WlSubcompositorGetSubsurfaceRequest {
    /// the new sub-surface object
    pub id: u32,
    /// the surface to be turned into a sub-surface
    pub surface: u32,
    /// the parent surface
    pub parent: u32,
}

impl Message for WlSubcompositorGetSubsurfaceRequest {
    fn opcode(&self) -> u16 {
        1
    }

    fn message_name(&self) -> &'static str {
        "WlSubcompositorGetSubsurfaceRequest"
    }
}

impl Request for WlSubcompositorGetSubsurfaceRequest {
    fn emit(&self, e: &mut RequestEmitter) {
        e.put_new_id(self.id);
        e.put_object(self.surface);
        e.put_object(self.parent);
    }
}

// ----------------------------------------------------------------------------
// interface: wayland.wl_subsurface

/// sub-surface interface to a wl_surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WlSubsurface {
    id: ObjectId,
    version: u32,
}

impl WlSubsurface {
    /// Wraps object `id` without version information.
    pub fn new(id: ObjectId) -> WlSubsurface {
        WlSubsurface { id, version: 0 }
    }

    /// Wraps object `id` bound at `version`.
    pub fn with_version(id: ObjectId, version: u32) -> WlSubsurface {
        WlSubsurface { id, version }
    }

    /// The proxied object id.
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// The bound protocol version, or 0 if unknown.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// remove sub-surface interface
    pub fn destroy(&self, conn: &impl Connection) -> Result<(), EmitError> {
        let request = WlSubsurfaceDestroyRequest {};
        conn.send_request(self.id, &request)?;
        conn.unregister_object(self.id);
        Ok(())
    }

    /// reposition the sub-surface
    pub fn set_position(
        &self,
        conn: &impl Connection,
        x: i32,
        y: i32,
    ) -> Result<(), EmitError> {
        let request = WlSubsurfaceSetPositionRequest {
            x,
            y,
        };
        conn.send_request(self.id, &request)?;
        Ok(())
    }

    /// restack the sub-surface
    pub fn place_above(
        &self,
        conn: &impl Connection,
        sibling: ObjectId,
    ) -> Result<(), EmitError> {
        let request = WlSubsurfacePlaceAboveRequest {
            sibling: sibling.protocol_id(),
        };
        conn.send_request(self.id, &request)?;
        Ok(())
    }

    /// restack the sub-surface
    pub fn place_below(
        &self,
        conn: &impl Connection,
        sibling: ObjectId,
    ) -> Result<(), EmitError> {
        let request = WlSubsurfacePlaceBelowRequest {
            sibling: sibling.protocol_id(),
        };
        conn.send_request(self.id, &request)?;
        Ok(())
    }

    /// set sub-surface to synchronized mode
    pub fn set_sync(&self, conn: &impl Connection) -> Result<(), EmitError> {
        let request = WlSubsurfaceSetSyncRequest {};
        conn.send_request(self.id, &request)?;
        Ok(())
    }

    /// set sub-surface to desynchronized mode
    pub fn set_desync(&self, conn: &impl Connection) -> Result<(), EmitError> {
        let request = WlSubsurfaceSetDesyncRequest {};
        conn.send_request(self.id, &request)?;
        Ok(())
    }
}

/// Interface descriptor for `wl_subsurface`.
pub static WL_SUBSURFACE_INTERFACE: InterfaceDesc = InterfaceDesc {
    name: "wl_subsurface",
    requests: &[
        RequestDesc {
            name: "destroy",
            opcode: 0,
            new_request: || Box::new(WlSubsurfaceDestroyRequest::default()),
        },
        RequestDesc {
            name: "set_position",
            opcode: 1,
            new_request: || Box::new(WlSubsurfaceSetPositionRequest::default()),
        },
        RequestDesc {
            name: "place_above",
            opcode: 2,
            new_request: || Box::new(WlSubsurfacePlaceAboveRequest::default()),
        },
        RequestDesc {
            name: "place_below",
            opcode: 3,
            new_request: || Box::new(WlSubsurfacePlaceBelowRequest::default()),
        },
        RequestDesc {
            name: "set_sync",
            opcode: 4,
            new_request: || Box::new(WlSubsurfaceSetSyncRequest::default()),
        },
        RequestDesc {
            name: "set_desync",
            opcode: 5,
            new_request: || Box::new(WlSubsurfaceSetDesyncRequest::default()),
        },
    ],
    events: &[],
    new_proxy: |id| Proxy::WlSubsurface(WlSubsurface::new(id)),
};

/// wl_subsurface error values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WlSubsurfaceError(pub i32);

/// wl_surface is not a sibling or the parent
pub const WlSubsurfaceErrorBadSurface: WlSubsurfaceError = WlSubsurfaceError(0);

/// remove sub-surface interface
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WlSubsurfaceDestroyRequest {}

impl Message for WlSubsurfaceDestroyRequest {
    fn opcode(&self) -> u16 {
        0
    }

    fn message_name(&self) -> &'static str {
        "WlSubsurfaceDestroyRequest"
    }
}

impl Request for WlSubsurfaceDestroyRequest {
    fn emit(&self, _: &mut RequestEmitter) {}
}

/// reposition the sub-surface
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WlSubsurfaceSetPositionRequest {
    /// x coordinate in the parent surface
    pub x: i32,
    /// y coordinate in the parent surface
    pub y: i32,
}

impl Message for WlSubsurfaceSetPositionRequest {
    fn opcode(&self) -> u16 {
        1
    }

    fn message_name(&self) -> &'static str {
        "WlSubsurfaceSetPositionRequest"
    }
}

impl Request for WlSubsurfaceSetPositionRequest {
    fn emit(&self, e: &mut RequestEmitter) {
        e.put_int(self.x);
        e.put_int(self.y);
    }
}

/// restack the sub-surface
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WlSubsurfacePlaceAboveRequest {
    /// the reference surface
    pub sibling: u32,
}

impl Message for WlSubsurfacePlaceAboveRequest {
    fn opcode(&self) -> u16 {
        2
    }

    fn message_name(&self) -> &'static str {
        "WlSubsurfacePlaceAboveRequest"
    }
}

impl Request for WlSubsurfacePlaceAboveRequest {
    fn emit(&self, e: &mut RequestEmitter) {
        e.put_object(self.sibling);
    }
}

/// restack the sub-surface
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WlSubsurfacePlaceBelowRequest {
    /// the reference surface
    pub sibling: u32,
}

impl Message for WlSubsurfacePlaceBelowRequest {
    fn opcode(&self) -> u16 {
        3
    }

    fn message_name(&self) -> &'static str {
        "WlSubsurfacePlaceBelowRequest"
    }
}

impl Request for WlSubsurfacePlaceBelowRequest {
    fn emit(&self, e: &mut RequestEmitter) {
        e.put_object(self.sibling);
    }
}

/// set sub-surface to synchronized mode
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WlSubsurfaceSetSyncRequest {}

impl Message for WlSubsurfaceSetSyncRequest {
    fn opcode(&self) -> u16 {
        4
    }

    fn message_name(&self) -> &'static str {
        "WlSubsurfaceSetSyncRequest"
    }
}

impl Request for WlSubsurfaceSetSyncRequest {
    fn emit(&self, _: &mut RequestEmitter) {}
}

/// set sub-surface to desynchronized mode
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WlSubsurfaceSetDesyncRequest {}

impl Message for WlSubsurfaceSetDesyncRequest {
    fn opcode(&self) -> u16 {
        5
    }

    fn message_name(&self) -> &'static str {
        "WlSubsurfaceSetDesyncRequest"
    }
}

impl Request for WlSubsurfaceSetDesyncRequest {
    fn emit(&self, _: &mut RequestEmitter) {}
}

////////////////////////////////////////////////////////////////////////////////
// proxies

/// A tagged reference to one bound protocol object, one variant per
/// generated interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Proxy {
    WlDisplay(WlDisplay),
    WlRegistry(WlRegistry),
    WlCallback(WlCallback),
    WlCompositor(WlCompositor),
    WlShmPool(WlShmPool),
    WlShm(WlShm),
    WlBuffer(WlBuffer),
    WlSurface(WlSurface),
    WlOutput(WlOutput),
    WlRegion(WlRegion),
    WlSubcompositor(WlSubcompositor),
    WlSubsurface(WlSubsurface),
}

impl Proxy {
    /// The object id this proxy stands in for.
    pub fn id(&self) -> ObjectId {
        match *self {
            Proxy::WlDisplay(p) => p.id(),
            Proxy::WlRegistry(p) => p.id(),
            Proxy::WlCallback(p) => p.id(),
            Proxy::WlCompositor(p) => p.id(),
            Proxy::WlShmPool(p) => p.id(),
            Proxy::WlShm(p) => p.id(),
            Proxy::WlBuffer(p) => p.id(),
            Proxy::WlSurface(p) => p.id(),
            Proxy::WlOutput(p) => p.id(),
            Proxy::WlRegion(p) => p.id(),
            Proxy::WlSubcompositor(p) => p.id(),
            Proxy::WlSubsurface(p) => p.id(),
        }
    }

    /// The interface descriptor of the proxied object.
    pub fn descriptor(&self) -> &'static InterfaceDesc {
        match *self {
            Proxy::WlDisplay(_) => &WL_DISPLAY_INTERFACE,
            Proxy::WlRegistry(_) => &WL_REGISTRY_INTERFACE,
            Proxy::WlCallback(_) => &WL_CALLBACK_INTERFACE,
            Proxy::WlCompositor(_) => &WL_COMPOSITOR_INTERFACE,
            Proxy::WlShmPool(_) => &WL_SHM_POOL_INTERFACE,
            Proxy::WlShm(_) => &WL_SHM_INTERFACE,
            Proxy::WlBuffer(_) => &WL_BUFFER_INTERFACE,
            Proxy::WlSurface(_) => &WL_SURFACE_INTERFACE,
            Proxy::WlOutput(_) => &WL_OUTPUT_INTERFACE,
            Proxy::WlRegion(_) => &WL_REGION_INTERFACE,
            Proxy::WlSubcompositor(_) => &WL_SUBCOMPOSITOR_INTERFACE,
            Proxy::WlSubsurface(_) => &WL_SUBSURFACE_INTERFACE,
        }
    }

    /// A fresh, empty event record for `opcode`, or `None` if the interface
    /// defines no such event.
    pub fn dispatch(&self, opcode: u16) -> Option<Box<dyn Event>> {
        self.descriptor().events.get(usize::from(opcode)).map(|desc| (desc.new_event)())
    }
}
