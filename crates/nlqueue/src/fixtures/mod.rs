//! Netlink message fixtures for testing.
//!
//! Hand-assembled sock_diag replies laid out the way a little-endian kernel
//! sends them, for testing the parser without a live socket.
//!
//! The fixtures are provided as functions that return Vec<u8> to ensure
//! proper alignment for the parser.

/// Dump reply listing two listening stream sockets, then `NLMSG_DONE`.
///
/// `/run/app.sock` (inode 42, cookie 7:9) and abstract `@hidden`
/// (inode 43, cookie 1:0).
pub fn dump_two_listeners() -> Vec<u8> {
    vec![
        // nlmsghdr: len=52, type=SOCK_DIAG_BY_FAMILY, flags=NLM_F_MULTI, seq=1, pid=0
        0x34, 0x00, 0x00, 0x00, // len = 52
        0x14, 0x00, // type = 20
        0x02, 0x00, // flags = NLM_F_MULTI
        0x01, 0x00, 0x00, 0x00, // seq = 1
        0x00, 0x00, 0x00, 0x00, // pid = 0
        // unix_diag_msg
        0x01, // family = AF_UNIX
        0x01, // type = SOCK_STREAM
        0x0a, // state = TCP_LISTEN
        0x00, // pad
        0x2a, 0x00, 0x00, 0x00, // ino = 42
        0x07, 0x00, 0x00, 0x00, // cookie[0] = 7
        0x09, 0x00, 0x00, 0x00, // cookie[1] = 9
        // UNIX_DIAG_NAME = "/run/app.sock\0"
        0x12, 0x00, // len = 18
        0x00, 0x00, // type = UNIX_DIAG_NAME (0)
        b'/', b'r', b'u', b'n', b'/', b'a', b'p', b'p', b'.', b's', b'o', b'c', b'k', 0x00,
        0x00, 0x00, // padding
        // nlmsghdr: len=44
        0x2c, 0x00, 0x00, 0x00, // len = 44
        0x14, 0x00, // type = 20
        0x02, 0x00, // flags = NLM_F_MULTI
        0x01, 0x00, 0x00, 0x00, // seq = 1
        0x00, 0x00, 0x00, 0x00, // pid = 0
        // unix_diag_msg
        0x01, 0x01, 0x0a, 0x00, // AF_UNIX, SOCK_STREAM, TCP_LISTEN, pad
        0x2b, 0x00, 0x00, 0x00, // ino = 43
        0x01, 0x00, 0x00, 0x00, // cookie[0] = 1
        0x00, 0x00, 0x00, 0x00, // cookie[1] = 0
        // UNIX_DIAG_NAME = "\0hidden"
        0x0b, 0x00, // len = 11
        0x00, 0x00, // type = UNIX_DIAG_NAME (0)
        0x00, b'h', b'i', b'd', b'd', b'e', b'n', // abstract name
        0x00, // padding
        // NLMSG_DONE
        0x14, 0x00, 0x00, 0x00, // len = 20
        0x03, 0x00, // type = NLMSG_DONE
        0x02, 0x00, // flags = NLM_F_MULTI
        0x01, 0x00, 0x00, 0x00, // seq = 1
        0x00, 0x00, 0x00, 0x00, // pid = 0
        0x00, 0x00, 0x00, 0x00, // status = 0
    ]
}

/// Exact-lookup reply for inode 42 carrying `UNIX_DIAG_RQLEN` 3/128.
pub fn exact_rqlen() -> Vec<u8> {
    vec![
        // nlmsghdr: len=44, type=SOCK_DIAG_BY_FAMILY, flags=0
        0x2c, 0x00, 0x00, 0x00, // len = 44
        0x14, 0x00, // type = 20
        0x00, 0x00, // flags = 0 (single part)
        0x02, 0x00, 0x00, 0x00, // seq = 2
        0x00, 0x00, 0x00, 0x00, // pid = 0
        // unix_diag_msg
        0x01, 0x01, 0x0a, 0x00, // AF_UNIX, SOCK_STREAM, TCP_LISTEN, pad
        0x2a, 0x00, 0x00, 0x00, // ino = 42
        0x07, 0x00, 0x00, 0x00, // cookie[0] = 7
        0x09, 0x00, 0x00, 0x00, // cookie[1] = 9
        // UNIX_DIAG_RQLEN
        0x0c, 0x00, // len = 12
        0x04, 0x00, // type = UNIX_DIAG_RQLEN (4)
        0x03, 0x00, 0x00, 0x00, // rqueue = 3
        0x80, 0x00, 0x00, 0x00, // wqueue = 128
    ]
}

/// `NLMSG_ERROR` carrying `code` and the echoed request header.
pub fn error_reply(code: i32) -> Vec<u8> {
    let mut buf = vec![
        // nlmsghdr: len=36, type=NLMSG_ERROR, flags=0
        0x24, 0x00, 0x00, 0x00, // len = 36
        0x02, 0x00, // type = NLMSG_ERROR
        0x00, 0x00, // flags = 0
        0x02, 0x00, 0x00, 0x00, // seq = 2
        0x00, 0x00, 0x00, 0x00, // pid = 0
    ];
    buf.extend_from_slice(&code.to_le_bytes());
    buf.extend_from_slice(&[
        // original nlmsghdr
        0x28, 0x00, 0x00, 0x00, // len = 40
        0x14, 0x00, // type = 20
        0x01, 0x00, // flags = NLM_F_REQUEST
        0x02, 0x00, 0x00, 0x00, // seq = 2
        0x00, 0x00, 0x00, 0x00, // pid = 0
    ]);
    buf
}

/// A bare `NLMSG_DONE`.
pub fn done() -> Vec<u8> {
    vec![
        0x14, 0x00, 0x00, 0x00, // len = 20
        0x03, 0x00, // type = NLMSG_DONE
        0x02, 0x00, // flags = NLM_F_MULTI
        0x01, 0x00, 0x00, 0x00, // seq = 1
        0x00, 0x00, 0x00, 0x00, // pid = 0
        0x00, 0x00, 0x00, 0x00, // status = 0
    ]
}

/// Data record whose payload is too short for `unix_diag_msg`.
pub fn short_data_record() -> Vec<u8> {
    vec![
        0x18, 0x00, 0x00, 0x00, // len = 24
        0x14, 0x00, // type = 20
        0x00, 0x00, // flags = 0
        0x02, 0x00, 0x00, 0x00, // seq = 2
        0x00, 0x00, 0x00, 0x00, // pid = 0
        0x01, 0x01, 0x0a, 0x00, // AF_UNIX, SOCK_STREAM, TCP_LISTEN, pad
        0x2a, 0x00, 0x00, 0x00, // ino = 42, header ends here
    ]
}

/// Exact-lookup reply whose `UNIX_DIAG_RQLEN` carries only 4 bytes.
pub fn short_rqlen() -> Vec<u8> {
    vec![
        0x28, 0x00, 0x00, 0x00, // len = 40
        0x14, 0x00, // type = 20
        0x00, 0x00, // flags = 0
        0x02, 0x00, 0x00, 0x00, // seq = 2
        0x00, 0x00, 0x00, 0x00, // pid = 0
        0x01, 0x01, 0x0a, 0x00, // AF_UNIX, SOCK_STREAM, TCP_LISTEN, pad
        0x2a, 0x00, 0x00, 0x00, // ino = 42
        0x07, 0x00, 0x00, 0x00, // cookie[0] = 7
        0x09, 0x00, 0x00, 0x00, // cookie[1] = 9
        0x08, 0x00, // len = 8
        0x04, 0x00, // type = UNIX_DIAG_RQLEN (4)
        0x03, 0x00, 0x00, 0x00, // rqueue only
    ]
}
