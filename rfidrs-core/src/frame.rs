//! Frame encoding and decoding
//!
//! # Wire format
//!
//! ```text
//! Request:  ┌─────────┬─────────┬─────────┬─────────┬──────────┐
//!           │ Prefix  │ Length  │ Command │  Data   │ Checksum │
//!           │ 2 bytes │ 2 bytes │ 2 bytes │ N bytes │  1 byte  │
//!           └─────────┴─────────┴─────────┴─────────┴──────────┘
//!
//! Response: ┌─────────┬─────────┬─────────┬────────┬─────────┬──────────┐
//!           │ Prefix  │ Length  │ Command │ Status │ Answer  │ Checksum │
//!           │ 2 bytes │ 2 bytes │ 2 bytes │ 1 byte │ M bytes │  1 byte  │
//!           └─────────┴─────────┴─────────┴────────┴─────────┴──────────┘
//! ```
//!
//! Multi-byte fields are big-endian. `Length` counts every byte after
//! itself, command through checksum. `Checksum` is the XOR of the bytes
//! between the length field and the checksum byte.
//!
//! # Examples
//!
//! ```
//! use rfidrs_core::{Command, Request};
//!
//! let request = Request::new(Command::Beep, vec![0x7F]);
//! let encoded = request.encode();
//! assert_eq!(&encoded[..], &[0xAA, 0xDD, 0x00, 0x04, 0x01, 0x03, 0x7F, 0x7D]);
//! ```

use std::fmt;

use bytes::{Buf, BufMut, Bytes, BytesMut};
use tracing::trace;

use crate::{
    checksum,
    command::Command,
    constants::PREFIX,
    error::{Error, Result},
    status::Status,
};

/// Size of the fixed frame header (prefix + length) preceding the
/// length-counted body.
pub const HEADER_LEN: usize = 4;

/// Smallest admissible declared length: command (2) + status (1) +
/// checksum (1), i.e. a response with an empty answer.
pub const MIN_BODY_LEN: u16 = 4;

/// Largest data payload that still fits the 16-bit length field together
/// with the command and checksum.
pub const MAX_DATA_LEN: usize = u16::MAX as usize - 3;

/// Frame header: the prefix and length fields.
///
/// Parsed first, on its own, so the caller knows how many more bytes make
/// up the rest of the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    length: u16,
}

impl Header {
    /// Parse and validate a frame header.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `buf` holds fewer than [`HEADER_LEN`] bytes
    /// - the prefix is not the protocol constant
    /// - the declared length is below [`MIN_BODY_LEN`]
    pub fn parse(mut buf: &[u8]) -> Result<Self> {
        if buf.len() < HEADER_LEN {
            return Err(Error::TruncatedHeader {
                available: buf.len(),
            });
        }

        let prefix = buf.get_u16();
        if prefix != PREFIX {
            return Err(Error::BadPrefix { received: prefix });
        }

        let length = buf.get_u16();
        if length < MIN_BODY_LEN {
            return Err(Error::InvalidLength { length });
        }

        Ok(Self { length })
    }

    /// Number of bytes remaining on the wire after the header.
    pub fn body_len(&self) -> usize {
        self.length as usize
    }
}

/// An outgoing request frame.
#[derive(Clone, PartialEq, Eq)]
pub struct Request {
    command: Command,
    data: Bytes,
}

impl Request {
    /// Create a request carrying `data`.
    ///
    /// `data` must not exceed [`MAX_DATA_LEN`]; no device command comes
    /// anywhere near that.
    pub fn new(command: Command, data: impl Into<Bytes>) -> Self {
        let data = data.into();
        debug_assert!(data.len() <= MAX_DATA_LEN);
        Self { command, data }
    }

    /// Encode to wire bytes.
    ///
    /// Infallible: the frame is assembled field by field and the checksum
    /// appended over the body.
    pub fn encode(&self) -> BytesMut {
        let body_len = 2 + self.data.len() + 1;
        let mut buf = BytesMut::with_capacity(HEADER_LEN + body_len);

        buf.put_u16(PREFIX);
        buf.put_u16(body_len as u16);
        buf.put_u16(self.command.into());
        buf.put_slice(&self.data);
        let sum = checksum::calculate(&buf[HEADER_LEN..]);
        buf.put_u8(sum);

        trace!(frame = %hex::encode(&buf), "encoded request");

        buf
    }
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("command", &self.command)
            .field("data", &hex::encode(&self.data))
            .finish()
    }
}

/// A decoded response frame.
#[derive(Clone, PartialEq, Eq)]
pub struct Response {
    /// Command code echoed by the device
    pub command: Command,

    /// Outcome status
    pub status: Status,

    /// Answer bytes (command-specific, may be empty)
    pub answer: Bytes,
}

impl Response {
    /// Create a response value.
    ///
    /// The decoder builds these; constructing one directly is useful for
    /// tests and device emulation together with [`Response::encode`].
    pub fn new(command: Command, status: Status, answer: impl Into<Bytes>) -> Self {
        Self {
            command,
            status,
            answer: answer.into(),
        }
    }

    /// Parse the length-counted body of a response frame.
    ///
    /// The caller reads [`Header::body_len`] bytes off the wire after the
    /// header and hands them here. The checksum is verified before any
    /// field is interpreted.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is shorter than [`MIN_BODY_LEN`], the
    /// checksum does not match, or the echoed command code is unknown.
    ///
    /// # Examples
    ///
    /// ```
    /// use rfidrs_core::{Command, Response, Status};
    ///
    /// // No-tag response to a read command: empty answer
    /// let body = [0x01, 0x0C, 0x01, 0x0C];
    /// let response = Response::parse(&body).unwrap();
    /// assert_eq!(response.command, Command::Read);
    /// assert_eq!(response.status, Status::NoTag);
    /// assert!(response.answer.is_empty());
    /// ```
    pub fn parse(body: &[u8]) -> Result<Self> {
        if body.len() < MIN_BODY_LEN as usize {
            return Err(Error::InvalidLength {
                length: body.len() as u16,
            });
        }

        let (mut payload, tail) = body.split_at(body.len() - 1);
        let received = tail[0];
        let expected = checksum::calculate(payload);
        if received != expected {
            return Err(Error::ChecksumMismatch { expected, received });
        }

        let command = Command::try_from(payload.get_u16())?;
        let status = Status::from(payload.get_u8());
        let answer = Bytes::copy_from_slice(payload);

        trace!(command = %command, status = %status, answer_len = answer.len(), "decoded response");

        Ok(Self {
            command,
            status,
            answer,
        })
    }

    /// Encode this response in wire form, header included.
    ///
    /// The device side of the conversation; used by tests and emulators.
    pub fn encode(&self) -> BytesMut {
        let body_len = 2 + 1 + self.answer.len() + 1;
        let mut buf = BytesMut::with_capacity(HEADER_LEN + body_len);

        buf.put_u16(PREFIX);
        buf.put_u16(body_len as u16);
        buf.put_u16(self.command.into());
        buf.put_u8(self.status.into());
        buf.put_slice(&self.answer);
        let sum = checksum::calculate(&buf[HEADER_LEN..]);
        buf.put_u8(sum);

        buf
    }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("command", &self.command)
            .field("status", &self.status)
            .field("answer", &hex::encode(&self.answer))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_request_encode_beep() {
        let request = Request::new(Command::Beep, vec![0x7F]);
        let encoded = request.encode();

        assert_eq!(
            &encoded[..],
            &[0xAA, 0xDD, 0x00, 0x04, 0x01, 0x03, 0x7F, 0x01 ^ 0x03 ^ 0x7F]
        );
    }

    #[test]
    fn test_request_encode_empty_data() {
        let request = Request::new(Command::Read, Bytes::new());
        let encoded = request.encode();

        assert_eq!(&encoded[..], &[0xAA, 0xDD, 0x00, 0x03, 0x01, 0x0C, 0x0D]);
    }

    #[test]
    fn test_header_parse() {
        let header = Header::parse(&[0xAA, 0xDD, 0x00, 0x10]).unwrap();
        assert_eq!(header.body_len(), 16);
    }

    #[test]
    fn test_header_truncated() {
        let result = Header::parse(&[0xAA, 0xDD, 0x00]);
        assert!(matches!(result, Err(Error::TruncatedHeader { available: 3 })));
    }

    #[test]
    fn test_header_bad_prefix() {
        let result = Header::parse(&[0xAA, 0xDE, 0x00, 0x10]);
        assert!(matches!(result, Err(Error::BadPrefix { received: 0xAADE })));
    }

    #[test]
    fn test_header_length_below_minimum() {
        let result = Header::parse(&[0xAA, 0xDD, 0x00, 0x03]);
        assert!(matches!(result, Err(Error::InvalidLength { length: 3 })));

        // The minimum itself is a legal empty-answer response
        assert!(Header::parse(&[0xAA, 0xDD, 0x00, 0x04]).is_ok());
    }

    #[test]
    fn test_response_parse_no_tag_wire_vector() {
        let frame = [0xAA, 0xDD, 0x00, 0x04, 0x01, 0x0C, 0x01, 0x01 ^ 0x0C ^ 0x01];

        let header = Header::parse(&frame[..HEADER_LEN]).unwrap();
        assert_eq!(header.body_len(), 4);

        let response = Response::parse(&frame[HEADER_LEN..]).unwrap();
        assert_eq!(response.command, Command::Read);
        assert_eq!(response.status, Status::NoTag);
        assert!(response.answer.is_empty());
    }

    #[test]
    fn test_response_round_trip() {
        let original = Response::new(Command::Info, Status::Ok, &b"RFID-READER"[..]);
        let encoded = original.encode();

        let header = Header::parse(&encoded[..HEADER_LEN]).unwrap();
        assert_eq!(header.body_len(), encoded.len() - HEADER_LEN);

        let decoded = Response::parse(&encoded[HEADER_LEN..]).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_response_checksum_mismatch() {
        let mut encoded = Response::new(Command::Read, Status::Ok, vec![0xDE, 0xAD]).encode();
        encoded[6] ^= 0x01; // corrupt the status byte

        let result = Response::parse(&encoded[HEADER_LEN..]);
        assert!(matches!(result, Err(Error::ChecksumMismatch { .. })));
    }

    #[test]
    fn test_response_body_too_short() {
        let result = Response::parse(&[0x01, 0x0C, 0x0D]);
        assert!(matches!(result, Err(Error::InvalidLength { length: 3 })));
    }

    #[test]
    fn test_response_unknown_command() {
        // Body claiming command 0x0105 with a valid checksum
        let payload = [0x01, 0x05, 0x00];
        let mut body = payload.to_vec();
        body.push(checksum::calculate(&payload));

        let result = Response::parse(&body);
        assert!(matches!(result, Err(Error::UnknownCommand(0x0105))));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn command_strategy() -> impl Strategy<Value = Command> {
            prop_oneof![
                Just(Command::Info),
                Just(Command::Beep),
                Just(Command::Led),
                Just(Command::Read),
                Just(Command::Write2),
                Just(Command::Write3),
            ]
        }

        proptest! {
            #[test]
            fn response_round_trip(
                command in command_strategy(),
                status in any::<u8>(),
                answer in proptest::collection::vec(any::<u8>(), 0..64),
            ) {
                let original = Response::new(command, Status::from(status), answer.clone());
                let encoded = original.encode();

                let header = Header::parse(&encoded[..HEADER_LEN]).unwrap();
                prop_assert_eq!(header.body_len(), encoded.len() - HEADER_LEN);

                let decoded = Response::parse(&encoded[HEADER_LEN..]).unwrap();
                prop_assert_eq!(decoded.command, command);
                prop_assert_eq!(decoded.status, Status::from(status));
                prop_assert_eq!(decoded.answer.as_ref(), answer.as_slice());
            }

            #[test]
            fn any_single_bit_flip_in_payload_fails_integrity(
                (mut encoded, index, bit) in (
                    command_strategy(),
                    any::<u8>(),
                    proptest::collection::vec(any::<u8>(), 0..32),
                )
                    .prop_map(|(command, status, answer)| {
                        Response::new(command, Status::from(status), answer).encode()
                    })
                    .prop_flat_map(|encoded| {
                        let len = encoded.len();
                        (Just(encoded), HEADER_LEN..len - 1, 0u32..8)
                    }),
            ) {
                encoded[index] ^= 1u8 << bit;

                let result = Response::parse(&encoded[HEADER_LEN..]);
                let is_checksum_mismatch = matches!(result, Err(Error::ChecksumMismatch { .. }));
                prop_assert!(is_checksum_mismatch);
            }

            #[test]
            fn request_length_field_counts_remaining_bytes(
                command in command_strategy(),
                data in proptest::collection::vec(any::<u8>(), 0..64),
            ) {
                let encoded = Request::new(command, data).encode();

                let declared = u16::from_be_bytes([encoded[2], encoded[3]]) as usize;
                prop_assert_eq!(declared, encoded.len() - HEADER_LEN);

                let sum = checksum::calculate(&encoded[HEADER_LEN..encoded.len() - 1]);
                prop_assert_eq!(sum, *encoded.last().unwrap());
            }
        }
    }
}
