//! Wire codec for the Wayland protocol over a UNIX stream socket.
//!
//! Every message starts with an 8-byte header: object id (32 bits), opcode
//! (16 bits) and total size including the header (16 bits), all native
//! endian. File descriptor arguments are not part of the payload; they ride
//! along as `SCM_RIGHTS` control messages on the socket message that carries
//! the header.

use std::collections::VecDeque;
use std::io::{self, IoSlice, IoSliceMut, Read};
use std::mem::MaybeUninit;
use std::os::unix::io::{BorrowedFd, IntoRawFd, OwnedFd, RawFd};
use std::os::unix::net::UnixStream;

use rustix::io::retry_on_intr;
use rustix::net::{
    recvmsg, send, sendmsg, RecvAncillaryBuffer, RecvAncillaryMessage, RecvFlags, ReturnFlags,
    SendAncillaryBuffer, SendAncillaryMessage, SendFlags,
};
use smallvec::SmallVec;

use crate::protocol::{Fd, Fixed, ObjectId, Request};

/// Size of the fixed message header, in bytes.
pub const HEADER_LEN: usize = 8;

/// Size of the control-message buffer used when receiving one event.
///
/// Large enough for a single descriptor per message, which is all the core
/// protocol ever attaches.
pub const OOB_BUFFER_LEN: usize = rustix::cmsg_space!(ScmRights(1));

/// Error generated when serializing and writing a request.
#[derive(Debug)]
pub enum EmitError {
    /// The framed message would exceed the 65535-byte size limit.
    MessageOverflow,
    /// The socket accepted only part of the message. The codec does not
    /// retry; the connection is in an undefined state.
    ShortWrite,
    /// The socket write failed.
    Io(io::Error),
}

impl std::error::Error for EmitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EmitError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl std::fmt::Display for EmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmitError::MessageOverflow => f.write_str("message exceeds the 65535 byte limit"),
            EmitError::ShortWrite => f.write_str("short write on the socket"),
            EmitError::Io(e) => write!(f, "writing to the socket: {e}"),
        }
    }
}

/// Error generated when reading and deserializing an event.
#[derive(Debug)]
pub enum ScanError {
    /// The peer closed the connection. The event loop treats this as a
    /// normal termination.
    Closed,
    /// The socket delivered fewer bytes than the message claims.
    ShortRead,
    /// The header carries a size smaller than the header itself.
    Malformed,
    /// The kernel truncated the ancillary payload; it did not fit the
    /// fixed-size control buffer.
    OutOfBandBufferShort,
    /// The message declares a descriptor argument but the ancillary queue
    /// is empty.
    NoOutOfBand,
    /// A string argument is not valid UTF-8.
    BadUtf8,
    /// The socket read failed.
    Io(io::Error),
}

impl std::error::Error for ScanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScanError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl std::fmt::Display for ScanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanError::Closed => f.write_str("the connection is closed"),
            ScanError::ShortRead => f.write_str("short read on the socket"),
            ScanError::Malformed => f.write_str("message header carries an impossible size"),
            ScanError::OutOfBandBufferShort => f.write_str("out-of-band buffer too short"),
            ScanError::NoOutOfBand => f.write_str("no out-of-band control message"),
            ScanError::BadUtf8 => f.write_str("string argument is not valid UTF-8"),
            ScanError::Io(e) => write!(f, "reading from the socket: {e}"),
        }
    }
}

// Stabilized as usize::next_multiple_of in Rust 1.73.
fn next_multiple_of(lhs: usize, rhs: usize) -> usize {
    match lhs % rhs {
        0 => lhs,
        r => lhs + (rhs - r),
    }
}

/*
 * Request emission
 */

/// Serializer for one outgoing request.
///
/// The payload buffer is pre-seeded with an 8-byte hole for the header,
/// which [`write_request`] back-patches once the size is known. Descriptor
/// arguments accumulate separately and are attached as one `SCM_RIGHTS`
/// control message each, in declaration order.
#[derive(Debug)]
pub struct RequestEmitter {
    buf: Vec<u8>,
    fds: SmallVec<[RawFd; 2]>,
}

impl RequestEmitter {
    fn new() -> RequestEmitter {
        RequestEmitter { buf: vec![0; HEADER_LEN], fds: SmallVec::new() }
    }

    pub fn put_int(&mut self, v: i32) {
        self.buf.extend_from_slice(&v.to_ne_bytes());
    }

    pub fn put_uint(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_ne_bytes());
    }

    pub fn put_fixed(&mut self, v: Fixed) {
        self.buf.extend_from_slice(&v.0.to_ne_bytes());
    }

    pub fn put_object(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_ne_bytes());
    }

    pub fn put_new_id(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_ne_bytes());
    }

    /// Writes a length prefix (including the trailing NUL for nonempty
    /// strings), the bytes, and zero padding up to 4-byte alignment.
    pub fn put_string(&mut self, v: &str) {
        if v.is_empty() {
            self.put_uint(0);
            return;
        }
        let len = v.len() + 1;
        self.put_uint(len as u32);
        self.buf.extend_from_slice(v.as_bytes());
        let padded = next_multiple_of(len, 4);
        self.buf.resize(self.buf.len() + padded - v.len(), 0);
    }

    /// Writes a length prefix, the bytes, and zero padding up to 4-byte
    /// alignment.
    pub fn put_array(&mut self, v: &[u8]) {
        self.put_uint(v.len() as u32);
        self.buf.extend_from_slice(v);
        let padded = next_multiple_of(v.len(), 4);
        self.buf.resize(self.buf.len() + padded - v.len(), 0);
    }

    /// Queues a descriptor for the ancillary payload. Nothing is written to
    /// the byte buffer.
    pub fn put_fd(&mut self, v: Fd) {
        self.fds.push(v.0);
    }
}

/// Frames `request` on behalf of object `id` and writes it, together with
/// its ancillary descriptors, as a single socket message.
///
/// A partial write of either the bytes or the control messages is fatal;
/// the codec does not retry.
pub fn write_request(
    socket: &UnixStream,
    id: ObjectId,
    request: &dyn Request,
) -> Result<(), EmitError> {
    let mut emitter = RequestEmitter::new();
    request.emit(&mut emitter);

    let size = emitter.buf.len();
    if size > usize::from(u16::MAX) {
        return Err(EmitError::MessageOverflow);
    }
    emitter.buf[0..4].copy_from_slice(&id.protocol_id().to_ne_bytes());
    emitter.buf[4..6].copy_from_slice(&request.opcode().to_ne_bytes());
    emitter.buf[6..8].copy_from_slice(&(size as u16).to_ne_bytes());

    let sent = if emitter.fds.is_empty() {
        retry_on_intr(|| send(socket, &emitter.buf, SendFlags::NOSIGNAL))
    } else {
        let borrowed: SmallVec<[BorrowedFd<'_>; 2]> = emitter
            .fds
            .iter()
            .map(|&fd| unsafe { BorrowedFd::borrow_raw(fd) })
            .collect();
        let mut cmsg_space =
            vec![MaybeUninit::uninit(); OOB_BUFFER_LEN * borrowed.len()];
        let mut cmsg_buffer = SendAncillaryBuffer::new(&mut cmsg_space);
        for fd in &borrowed {
            cmsg_buffer.push(SendAncillaryMessage::ScmRights(std::slice::from_ref(fd)));
        }
        let iov = [IoSlice::new(&emitter.buf)];
        retry_on_intr(|| sendmsg(socket, &iov, &mut cmsg_buffer, SendFlags::NOSIGNAL))
    };

    match sent {
        Ok(n) if n == size => Ok(()),
        Ok(_) => Err(EmitError::ShortWrite),
        Err(errno) => Err(EmitError::Io(errno.into())),
    }
}

/*
 * Event scanning
 */

/// The decoded fixed header of one incoming event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventHeader {
    /// The target object.
    pub object_id: u32,
    /// Zero-based event index within the target's interface.
    pub opcode: u16,
    /// Total message size, header included.
    pub size: u16,
}

/// Deserializer for one incoming event.
///
/// Construction reads exactly one header plus its ancillary payload, then
/// exactly `size - 8` body bytes, so a scanner can never run into the next
/// message on the stream. Received descriptors form a FIFO consumed by
/// [`EventScanner::fd`].
#[derive(Debug)]
pub struct EventScanner {
    header: EventHeader,
    fds: VecDeque<OwnedFd>,
    body: Vec<u8>,
    at: usize,
}

impl EventScanner {
    /// Reads one event from the socket.
    pub fn read(socket: &UnixStream) -> Result<EventScanner, ScanError> {
        let mut header = [0u8; HEADER_LEN];
        let mut cmsg_space = [MaybeUninit::uninit(); OOB_BUFFER_LEN];
        let mut cmsg_buffer = RecvAncillaryBuffer::new(&mut cmsg_space);

        let msg = {
            let mut iov = [IoSliceMut::new(&mut header)];
            retry_on_intr(|| {
                recvmsg(socket, &mut iov, &mut cmsg_buffer, RecvFlags::CMSG_CLOEXEC)
            })
            .map_err(|errno| {
                if errno == rustix::io::Errno::CONNRESET {
                    ScanError::Closed
                } else {
                    ScanError::Io(errno.into())
                }
            })?
        };

        if msg.bytes == 0 {
            return Err(ScanError::Closed);
        }
        if msg.flags.contains(ReturnFlags::CTRUNC) {
            return Err(ScanError::OutOfBandBufferShort);
        }
        if msg.bytes != HEADER_LEN {
            return Err(ScanError::ShortRead);
        }

        let mut fds = VecDeque::new();
        fds.extend(
            cmsg_buffer
                .drain()
                .filter_map(|cmsg| match cmsg {
                    RecvAncillaryMessage::ScmRights(received) => Some(received),
                    _ => None,
                })
                .flatten(),
        );

        let header = EventHeader {
            object_id: u32::from_ne_bytes(header[0..4].try_into().unwrap()),
            opcode: u16::from_ne_bytes(header[4..6].try_into().unwrap()),
            size: u16::from_ne_bytes(header[6..8].try_into().unwrap()),
        };
        if usize::from(header.size) < HEADER_LEN {
            return Err(ScanError::Malformed);
        }

        let mut body = vec![0u8; usize::from(header.size) - HEADER_LEN];
        let mut reader = socket;
        reader.read_exact(&mut body).map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => ScanError::ShortRead,
            _ => ScanError::Io(e),
        })?;

        Ok(EventScanner { header, fds, body, at: 0 })
    }

    /// The decoded header of the message being scanned.
    pub fn header(&self) -> EventHeader {
        self.header
    }

    fn take(&mut self, n: usize) -> Result<&[u8], ScanError> {
        if self.at + n > self.body.len() {
            return Err(ScanError::ShortRead);
        }
        let taken = &self.body[self.at..self.at + n];
        self.at += n;
        Ok(taken)
    }

    pub fn int(&mut self) -> Result<i32, ScanError> {
        Ok(i32::from_ne_bytes(self.take(4)?.try_into().unwrap()))
    }

    pub fn uint(&mut self) -> Result<u32, ScanError> {
        Ok(u32::from_ne_bytes(self.take(4)?.try_into().unwrap()))
    }

    pub fn fixed(&mut self) -> Result<Fixed, ScanError> {
        Ok(Fixed(self.int()?))
    }

    pub fn object(&mut self) -> Result<u32, ScanError> {
        self.uint()
    }

    pub fn new_id(&mut self) -> Result<u32, ScanError> {
        self.uint()
    }

    /// Reads a length-prefixed, 4-byte-aligned string and strips the
    /// trailing NUL byte(s).
    pub fn string(&mut self) -> Result<String, ScanError> {
        let len = self.uint()? as usize;
        if len == 0 {
            return Ok(String::new());
        }
        let bytes = self.take(next_multiple_of(len, 4))?;
        let mut end = len;
        while end > 0 && bytes[end - 1] == 0 {
            end -= 1;
        }
        match std::str::from_utf8(&bytes[..end]) {
            Ok(s) => Ok(s.to_owned()),
            Err(_) => Err(ScanError::BadUtf8),
        }
    }

    /// Reads a length-prefixed, 4-byte-aligned byte array.
    pub fn array(&mut self) -> Result<Vec<u8>, ScanError> {
        let len = self.uint()? as usize;
        let bytes = self.take(next_multiple_of(len, 4))?;
        Ok(bytes[..len].to_vec())
    }

    /// Dequeues the front descriptor of the ancillary FIFO. The caller
    /// becomes responsible for closing it.
    pub fn fd(&mut self) -> Result<Fd, ScanError> {
        match self.fds.pop_front() {
            Some(fd) => Ok(Fd(fd.into_raw_fd())),
            None => Err(ScanError::NoOutOfBand),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{Event, Message};
    use std::os::unix::io::{AsFd, FromRawFd};

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Sample {
        serial: u32,
        delta: i32,
        origin: Fixed,
        target: u32,
        fresh: u32,
        title: String,
        payload: Vec<u8>,
    }

    impl Message for Sample {
        fn opcode(&self) -> u16 {
            7
        }
        fn message_name(&self) -> &'static str {
            "Sample"
        }
    }

    impl Request for Sample {
        fn emit(&self, e: &mut RequestEmitter) {
            e.put_uint(self.serial);
            e.put_int(self.delta);
            e.put_fixed(self.origin);
            e.put_object(self.target);
            e.put_new_id(self.fresh);
            e.put_string(&self.title);
            e.put_array(&self.payload);
        }
    }

    impl Event for Sample {
        fn scan(&mut self, s: &mut EventScanner) -> Result<(), ScanError> {
            self.serial = s.uint()?;
            self.delta = s.int()?;
            self.origin = s.fixed()?;
            self.target = s.object()?;
            self.fresh = s.new_id()?;
            self.title = s.string()?;
            self.payload = s.array()?;
            Ok(())
        }
    }

    #[derive(Debug, Clone, Copy, Default, PartialEq)]
    struct PassFds {
        first: Fd,
        second: Fd,
    }

    impl Message for PassFds {
        fn opcode(&self) -> u16 {
            3
        }
        fn message_name(&self) -> &'static str {
            "PassFds"
        }
    }

    impl Request for PassFds {
        fn emit(&self, e: &mut RequestEmitter) {
            e.put_fd(self.first);
            e.put_fd(self.second);
        }
    }

    impl Event for PassFds {
        fn scan(&mut self, s: &mut EventScanner) -> Result<(), ScanError> {
            self.first = s.fd()?;
            self.second = s.fd()?;
            Ok(())
        }
    }

    #[derive(Debug, Clone, Copy, Default, PartialEq)]
    struct Empty {}

    impl Message for Empty {
        fn opcode(&self) -> u16 {
            2
        }
        fn message_name(&self) -> &'static str {
            "Empty"
        }
    }

    impl Request for Empty {
        fn emit(&self, _: &mut RequestEmitter) {}
    }

    fn same_file(a: BorrowedFd, b: BorrowedFd) -> bool {
        let stat1 = rustix::fs::fstat(a).unwrap();
        let stat2 = rustix::fs::fstat(b).unwrap();
        stat1.st_dev == stat2.st_dev && stat1.st_ino == stat2.st_ino
    }

    #[test]
    fn write_read_cycle() {
        let msg = Sample {
            serial: 3,
            delta: -25,
            origin: Fixed(-89),
            target: 88,
            fresh: 56,
            title: "I like trains!".to_owned(),
            payload: vec![1, 2, 3, 4, 5, 6, 7, 8, 9],
        };

        let (client, server) = UnixStream::pair().unwrap();
        write_request(&client, ObjectId(42), &msg).unwrap();

        let mut scanner = EventScanner::read(&server).unwrap();
        assert_eq!(scanner.header().object_id, 42);
        assert_eq!(scanner.header().opcode, 7);

        let mut rebuilt = Sample::default();
        rebuilt.scan(&mut scanner).unwrap();
        assert_eq!(rebuilt, msg);
    }

    #[test]
    fn write_read_cycle_fd() {
        let msg = PassFds { first: Fd(0), second: Fd(1) };

        let (client, server) = UnixStream::pair().unwrap();
        write_request(&client, ObjectId(42), &msg).unwrap();

        let mut scanner = EventScanner::read(&server).unwrap();
        let mut rebuilt = PassFds::default();
        rebuilt.scan(&mut scanner).unwrap();

        // SCM_RIGHTS delivers duplicates, so compare the files rather than
        // the descriptor numbers.
        for (sent, received) in [(msg.first, rebuilt.first), (msg.second, rebuilt.second)] {
            let sent = unsafe { BorrowedFd::borrow_raw(sent.0) };
            let received = unsafe { OwnedFd::from_raw_fd(received.0) };
            assert!(same_file(sent, received.as_fd()));
        }
    }

    #[test]
    fn back_to_back_messages_do_not_bleed() {
        let first = Sample { title: "first".to_owned(), ..Sample::default() };
        let second = Sample { serial: 9, title: "second".to_owned(), ..Sample::default() };

        let (client, server) = UnixStream::pair().unwrap();
        write_request(&client, ObjectId(5), &first).unwrap();
        write_request(&client, ObjectId(6), &second).unwrap();

        let mut scanner = EventScanner::read(&server).unwrap();
        let mut got = Sample::default();
        got.scan(&mut scanner).unwrap();
        assert_eq!(got, first);

        let mut scanner = EventScanner::read(&server).unwrap();
        assert_eq!(scanner.header().object_id, 6);
        let mut got = Sample::default();
        got.scan(&mut scanner).unwrap();
        assert_eq!(got, second);
    }

    #[test]
    fn header_layout() {
        let (client, server) = UnixStream::pair().unwrap();
        write_request(&client, ObjectId(0x0102_0304), &Empty {}).unwrap();

        let mut raw = [0u8; HEADER_LEN];
        let mut reader = &server;
        reader.read_exact(&mut raw).unwrap();
        assert_eq!(raw[0..4], 0x0102_0304u32.to_ne_bytes());
        assert_eq!(raw[4..6], 2u16.to_ne_bytes());
        assert_eq!(raw[6..8], 8u16.to_ne_bytes());
    }

    #[test]
    fn string_encoding() {
        let mut e = RequestEmitter::new();
        e.put_string("hi");
        // length includes the trailing NUL, payload is padded to 4 bytes
        assert_eq!(&e.buf[HEADER_LEN..], &[3, 0, 0, 0, b'h', b'i', 0, 0]);

        let mut e = RequestEmitter::new();
        e.put_string("abc");
        assert_eq!(&e.buf[HEADER_LEN..], &[4, 0, 0, 0, b'a', b'b', b'c', 0]);

        // a length that is already a multiple of 4 still gains its NUL plus
        // padding
        let mut e = RequestEmitter::new();
        e.put_string("wl_shm");
        assert_eq!(
            &e.buf[HEADER_LEN..],
            &[7, 0, 0, 0, b'w', b'l', b'_', b's', b'h', b'm', 0, 0]
        );
    }

    #[test]
    fn empty_string_is_a_bare_length() {
        let mut e = RequestEmitter::new();
        e.put_string("");
        assert_eq!(&e.buf[HEADER_LEN..], &[0, 0, 0, 0]);

        let msg = Sample::default();
        let (client, server) = UnixStream::pair().unwrap();
        write_request(&client, ObjectId(1), &msg).unwrap();
        let mut scanner = EventScanner::read(&server).unwrap();
        let mut rebuilt = Sample { title: "leftover".to_owned(), ..Sample::default() };
        rebuilt.scan(&mut scanner).unwrap();
        assert_eq!(rebuilt.title, "");
    }

    #[test]
    fn array_padding() {
        let mut e = RequestEmitter::new();
        e.put_array(&[1, 2, 3, 4, 5]);
        assert_eq!(&e.buf[HEADER_LEN..], &[5, 0, 0, 0, 1, 2, 3, 4, 5, 0, 0, 0]);
    }

    #[test]
    fn message_overflow() {
        let (client, _server) = UnixStream::pair().unwrap();
        let msg = Sample { title: "x".repeat(70_000), ..Sample::default() };
        assert!(matches!(
            write_request(&client, ObjectId(1), &msg),
            Err(EmitError::MessageOverflow)
        ));
    }

    #[test]
    fn message_at_the_size_limit_emits() {
        // scalar fields (20) + string length prefix (4) + array length
        // prefix (4) + header (8) leave 65496 bytes of padded string room
        let msg = Sample { title: "x".repeat(65_495), ..Sample::default() };
        let (client, server) = UnixStream::pair().unwrap();
        write_request(&client, ObjectId(1), &msg).unwrap();

        let mut scanner = EventScanner::read(&server).unwrap();
        assert_eq!(usize::from(scanner.header().size), 65_532);
        let mut rebuilt = Sample::default();
        rebuilt.scan(&mut scanner).unwrap();
        assert_eq!(rebuilt.title.len(), 65_495);

        let msg = Sample { title: "x".repeat(65_496), ..Sample::default() };
        assert!(matches!(
            write_request(&client, ObjectId(1), &msg),
            Err(EmitError::MessageOverflow)
        ));
    }

    #[test]
    fn missing_fd_is_reported() {
        let msg = Empty {};
        let (client, server) = UnixStream::pair().unwrap();
        write_request(&client, ObjectId(1), &msg).unwrap();

        let mut scanner = EventScanner::read(&server).unwrap();
        assert!(matches!(scanner.fd(), Err(ScanError::NoOutOfBand)));
    }

    #[test]
    fn closed_socket_reports_closed() {
        let (client, server) = UnixStream::pair().unwrap();
        drop(client);
        assert!(matches!(EventScanner::read(&server), Err(ScanError::Closed)));
    }
}
