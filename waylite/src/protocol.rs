//! Core types shared by the connection, the wire codec and the generated
//! message layer.
//!
//! The generated code in [`crate::interfaces`] produces one record type per
//! request and event, one proxy type per interface, and static descriptor
//! tables. Everything here is the vocabulary those records are written in.

use std::fmt;
use std::os::unix::io::RawFd;

use downcast_rs::{impl_downcast, Downcast};

use crate::interfaces::Proxy;
use crate::wire::{EmitError, EventScanner, RequestEmitter, ScanError};

/// An incrementing, per-connection object id.
///
/// Id 0 is the null reference and id 1 is reserved for the display
/// singleton. Client-allocated ids start at 2 and are never recycled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ObjectId(pub u32);

impl ObjectId {
    /// The null object reference.
    pub const NULL: ObjectId = ObjectId(0);
    /// The display singleton, present in every connection.
    pub const DISPLAY: ObjectId = ObjectId(1);

    /// Whether this is the null reference.
    pub fn is_null(self) -> bool {
        self.0 == 0
    }

    /// The raw 32-bit value as it appears on the wire.
    pub fn protocol_id(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A signed 24.8 fixed point number, transported as 32 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Fixed(pub i32);

impl Fixed {
    /// Converts a `f64` to a fixed point value, truncating excess precision.
    pub fn from_f64(v: f64) -> Fixed {
        Fixed((v * 256.0) as i32)
    }

    /// Converts this fixed point value to a `f64`.
    pub fn to_f64(self) -> f64 {
        f64::from(self.0) / 256.0
    }

    /// Converts an integer to a fixed point value.
    pub fn from_int(v: i32) -> Fixed {
        Fixed(v * 256)
    }

    /// Truncates this fixed point value to an integer.
    pub fn to_int(self) -> i32 {
        self.0 / 256
    }
}

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.to_f64())
    }
}

/// A UNIX file descriptor argument.
///
/// Never encoded into the message payload: descriptors travel as
/// `SCM_RIGHTS` ancillary data attached to the socket message that carries
/// the declaring request or event. The wrapped value is not owned; closing
/// a received descriptor is up to the handler that consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fd(pub RawFd);

impl Default for Fd {
    fn default() -> Fd {
        Fd(-1)
    }
}

impl fmt::Display for Fd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Implemented by every request and event record.
pub trait Message {
    /// The zero-based position of this message within its interface's
    /// request or event list.
    fn opcode(&self) -> u16;

    /// The mangled name of the record type, e.g. `WlDisplaySyncRequest`.
    fn message_name(&self) -> &'static str;
}

/// A client-to-server message. Emits its fields in declaration order.
pub trait Request: Message {
    /// Pushes the record's scalar fields and ancillary descriptors into the
    /// emitter. Framing and the size check happen in
    /// [`crate::wire::write_request`].
    fn emit(&self, emitter: &mut RequestEmitter);
}

/// A server-to-client message. Scans its fields in declaration order.
///
/// Events are created empty by [`Proxy::dispatch`] and filled from the
/// payload; handlers recover the concrete record via
/// [`Downcast::downcast_ref`].
pub trait Event: Message + Downcast + fmt::Debug {
    /// Fills the record's fields from the scanned payload.
    fn scan(&mut self, scanner: &mut EventScanner) -> Result<(), ScanError>;
}
impl_downcast!(Event);

/// An event callback registered on one object.
///
/// Handlers for an object are invoked in registration order, on the thread
/// running the event loop.
pub trait EventHandler: Send + Sync {
    fn handle(&self, event: &dyn Event);
}

impl<F> EventHandler for F
where
    F: Fn(&dyn Event) + Send + Sync,
{
    fn handle(&self, event: &dyn Event) {
        self(event)
    }
}

/// The seam between generated proxy helpers and a concrete connection.
///
/// Request helpers on proxy types only need these four operations, so they
/// are written against this trait rather than [`crate::conn::Display`].
pub trait Connection {
    /// Allocates the next object id. Ids are never recycled.
    fn new_id(&self) -> ObjectId;

    /// Inserts a proxy into the object table.
    ///
    /// For a request carrying a `new_id`, registration must complete before
    /// the request naming the id is sent, or an event for the new object can
    /// race ahead of the registration.
    fn register_proxy(&self, proxy: Proxy);

    /// Removes an object from the object table.
    fn unregister_object(&self, id: ObjectId);

    /// Serializes `request` and writes it, with its ancillary descriptors,
    /// as one socket message on behalf of object `id`.
    fn send_request(&self, id: ObjectId, request: &dyn Request) -> Result<(), EmitError>;
}

/// Runtime metadata for a whole protocol document.
#[derive(Debug)]
pub struct ProtocolDesc {
    /// The protocol name as it appears in the XML.
    pub name: &'static str,
    /// Interface descriptors in schema order.
    pub interfaces: &'static [&'static InterfaceDesc],
}

/// Runtime metadata for one interface.
#[derive(Debug)]
pub struct InterfaceDesc {
    /// The interface name as it appears in the XML, e.g. `wl_compositor`.
    pub name: &'static str,
    /// Request descriptors, ordered by opcode.
    pub requests: &'static [RequestDesc],
    /// Event descriptors, ordered by opcode.
    pub events: &'static [EventDesc],
    /// Constructs a fresh proxy for an object of this interface.
    pub new_proxy: fn(ObjectId) -> Proxy,
}

impl fmt::Display for InterfaceDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Runtime metadata for one request.
#[derive(Debug)]
pub struct RequestDesc {
    /// The request name as it appears in the XML.
    pub name: &'static str,
    /// Zero-based position within the interface's request list.
    pub opcode: u16,
    /// Constructs an exemplar record with default field values.
    pub new_request: fn() -> Box<dyn Request>,
}

/// Runtime metadata for one event.
#[derive(Debug)]
pub struct EventDesc {
    /// The event name as it appears in the XML.
    pub name: &'static str,
    /// Zero-based position within the interface's event list.
    pub opcode: u16,
    /// Constructs an empty record for [`Proxy::dispatch`] to hand to the
    /// scanner.
    pub new_event: fn() -> Box<dyn Event>,
}

/// A server-reported protocol error.
///
/// Delivered to the connection's error policy, not returned from the event
/// loop; the server usually closes the connection right after sending one.
#[derive(Debug, Clone)]
pub struct ProtocolError {
    /// The object the error occurred on.
    pub object_id: ObjectId,
    /// The error code, an entry of the object interface's `error` enum.
    pub code: u32,
    /// The human-readable message sent by the server.
    pub message: String,
}

impl std::error::Error for ProtocolError {}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "protocol error {} on object {}: {}",
            self.code, self.object_id, self.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_conversions() {
        assert_eq!(Fixed::from_int(7).0, 7 * 256);
        assert_eq!(Fixed::from_int(-3).to_int(), -3);
        assert_eq!(Fixed::from_f64(1.5).0, 384);
        assert_eq!(Fixed(384).to_f64(), 1.5);
        assert_eq!(Fixed(-89).to_f64(), -89.0 / 256.0);
    }

    #[test]
    fn object_id_constants() {
        assert!(ObjectId::NULL.is_null());
        assert!(!ObjectId::DISPLAY.is_null());
        assert_eq!(ObjectId::DISPLAY.protocol_id(), 1);
        assert_eq!(ObjectId(42).to_string(), "42");
    }
}
