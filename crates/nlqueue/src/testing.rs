//! Scripted sock_diag kernel for exercising the monitor without a socket.
//!
//! [`FakeKernel`] is a [`Connector`] whose transports answer requests from an
//! in-memory listener table, framed with [`MessageBuilder`] exactly as the
//! kernel frames them. It counts opens, requests and live transports so
//! tests can check that every exchange released its descriptor.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;

use crate::netlink::message::{NLM_F_MULTI, NLMSG_HDRLEN};
use crate::netlink::{Connector, Error, MessageBuilder, NlMsgType, Result, Transport};
use crate::sockdiag::request;
use crate::sockdiag::types::{TCP_LISTEN, UNIX_DIAG_NAME, UNIX_DIAG_RQLEN, UnixShow};
use crate::sockdiag::{UnixDiagMsg, UnixDiagReq, UnixDiagRqLen};

/// How the fake kernel answers requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FakeMode {
    /// Answer like the kernel.
    Normal,
    /// Accept requests and never reply.
    Silent,
    /// Reply to every request with `NLMSG_ERROR` carrying this code.
    Errno(i32),
    /// Fail to open transports.
    OpenFails,
    /// Cut the last four bytes off every reply datagram.
    Truncated,
}

#[derive(Debug, Clone)]
struct Listener {
    name: Vec<u8>,
    inode: u32,
    cookie: [u32; 2],
    rqueue: u32,
    wqueue: u32,
}

#[derive(Debug)]
struct State {
    listeners: Vec<Listener>,
    mode: FakeMode,
    records_per_datagram: usize,
    opens: usize,
    open_sockets: usize,
    dumps: usize,
    exact: Vec<UnixDiagReq>,
}

impl Default for State {
    fn default() -> Self {
        Self {
            listeners: Vec::new(),
            mode: FakeMode::Normal,
            records_per_datagram: usize::MAX,
            opens: 0,
            open_sockets: 0,
            dumps: 0,
            exact: Vec::new(),
        }
    }
}

/// Shared handle to the fake kernel.
#[derive(Debug, Clone, Default)]
pub struct FakeKernel {
    state: Rc<RefCell<State>>,
}

impl FakeKernel {
    /// Create a kernel with no listeners that answers normally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a listening stream socket. A leading `@` binds in the abstract
    /// namespace.
    pub fn add_listener(&self, name: &str, inode: u32, cookie: [u32; 2], rqueue: u32, wqueue: u32) {
        let name = match name.strip_prefix('@') {
            Some(abstract_name) => {
                let mut raw = vec![0u8];
                raw.extend_from_slice(abstract_name.as_bytes());
                raw
            }
            None => {
                let mut raw = name.as_bytes().to_vec();
                raw.push(0);
                raw
            }
        };
        self.state.borrow_mut().listeners.push(Listener {
            name,
            inode,
            cookie,
            rqueue,
            wqueue,
        });
    }

    /// Change the queue lengths of the listener with `inode`.
    pub fn set_queue(&self, inode: u32, rqueue: u32, wqueue: u32) {
        let mut state = self.state.borrow_mut();
        if let Some(listener) = state.listeners.iter_mut().find(|l| l.inode == inode) {
            listener.rqueue = rqueue;
            listener.wqueue = wqueue;
        }
    }

    /// Forget the listener with `inode`, as if it had been closed.
    pub fn remove_listener(&self, inode: u32) {
        self.state.borrow_mut().listeners.retain(|l| l.inode != inode);
    }

    /// Change how subsequent requests are answered.
    pub fn set_mode(&self, mode: FakeMode) {
        self.state.borrow_mut().mode = mode;
    }

    /// Split dump replies into datagrams of at most `n` records.
    pub fn set_records_per_datagram(&self, n: usize) {
        self.state.borrow_mut().records_per_datagram = n.max(1);
    }

    /// Transports successfully opened so far.
    pub fn opens(&self) -> usize {
        self.state.borrow().opens
    }

    /// Transports opened and not yet dropped.
    pub fn open_sockets(&self) -> usize {
        self.state.borrow().open_sockets
    }

    /// Dump requests received.
    pub fn dumps(&self) -> usize {
        self.state.borrow().dumps
    }

    /// Exact lookup requests received, in order.
    pub fn exact_requests(&self) -> Vec<UnixDiagReq> {
        self.state.borrow().exact.clone()
    }
}

impl Connector for FakeKernel {
    type Transport = FakeTransport;

    fn open(&self) -> Result<FakeTransport> {
        let mut state = self.state.borrow_mut();
        if state.mode == FakeMode::OpenFails {
            return Err(Error::Io(io::Error::from_raw_os_error(libc::EMFILE)));
        }
        state.opens += 1;
        state.open_sockets += 1;
        Ok(FakeTransport {
            state: Rc::clone(&self.state),
            replies: RefCell::new(VecDeque::new()),
        })
    }
}

/// One transport handed out by [`FakeKernel`].
#[derive(Debug)]
pub struct FakeTransport {
    state: Rc<RefCell<State>>,
    replies: RefCell<VecDeque<Vec<u8>>>,
}

impl Transport for FakeTransport {
    async fn send_request(&self, request: MessageBuilder) -> Result<()> {
        let msg = request.finish();
        let (is_dump, req) = request::decode(&msg)
            .ok_or_else(|| Error::InvalidMessage("fake kernel: bad request".into()))?;
        let echoed = &msg[..NLMSG_HDRLEN];

        let mut state = self.state.borrow_mut();
        let datagrams = if is_dump {
            state.dumps += 1;
            match state.mode {
                FakeMode::Errno(code) => vec![error_record(code, echoed)],
                _ => dump_reply(&state),
            }
        } else {
            state.exact.push(req);
            match state.mode {
                FakeMode::Errno(code) => vec![error_record(code, echoed)],
                _ => vec![exact_reply(&state, &req, echoed)],
            }
        };

        let mut replies = self.replies.borrow_mut();
        match state.mode {
            FakeMode::Silent => {}
            FakeMode::Truncated => replies.extend(datagrams.into_iter().map(|mut d| {
                d.truncate(d.len().saturating_sub(4));
                d
            })),
            _ => replies.extend(datagrams),
        }
        Ok(())
    }

    async fn recv(&self) -> Result<Vec<u8>> {
        let next = self.replies.borrow_mut().pop_front();
        match next {
            Some(datagram) => Ok(datagram),
            None => std::future::pending().await,
        }
    }
}

impl Drop for FakeTransport {
    fn drop(&mut self) {
        self.state.borrow_mut().open_sockets -= 1;
    }
}

fn diag_msg(listener: &Listener) -> UnixDiagMsg {
    UnixDiagMsg {
        udiag_family: libc::AF_UNIX as u8,
        udiag_type: libc::SOCK_STREAM as u8,
        udiag_state: TCP_LISTEN,
        pad: 0,
        udiag_ino: listener.inode,
        udiag_cookie: listener.cookie,
    }
}

fn dump_reply(state: &State) -> Vec<Vec<u8>> {
    let mut records: Vec<Vec<u8>> = state
        .listeners
        .iter()
        .map(|listener| {
            let mut b = MessageBuilder::new(NlMsgType::SOCK_DIAG_BY_FAMILY, NLM_F_MULTI);
            b.append(&diag_msg(listener));
            b.append_attr(UNIX_DIAG_NAME, &listener.name);
            b.finish()
        })
        .collect();

    let mut done = MessageBuilder::new(NlMsgType::DONE, NLM_F_MULTI);
    done.append_bytes(&0i32.to_ne_bytes());
    records.push(done.finish());

    records
        .chunks(state.records_per_datagram)
        .map(|chunk| chunk.concat())
        .collect()
}

fn exact_reply(state: &State, req: &UnixDiagReq, echoed: &[u8]) -> Vec<u8> {
    let found = state
        .listeners
        .iter()
        .find(|l| l.inode == req.udiag_ino && l.cookie == req.udiag_cookie);
    let Some(listener) = found else {
        return error_record(-libc::ENOENT, echoed);
    };

    let mut b = MessageBuilder::new(NlMsgType::SOCK_DIAG_BY_FAMILY, 0);
    b.append(&diag_msg(listener));
    if req.udiag_show & UnixShow::RqLen.mask() != 0 {
        let rqlen = UnixDiagRqLen {
            udiag_rqueue: listener.rqueue,
            udiag_wqueue: listener.wqueue,
        };
        b.append_attr(UNIX_DIAG_RQLEN, zerocopy::IntoBytes::as_bytes(&rqlen));
    }
    b.finish()
}

fn error_record(code: i32, echoed: &[u8]) -> Vec<u8> {
    let mut b = MessageBuilder::new(NlMsgType::ERROR, 0);
    b.append_bytes(&code.to_ne_bytes());
    b.append_bytes(echoed);
    b.finish()
}
