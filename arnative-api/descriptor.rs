/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Versioned native-handle records.
//!
//! AR backends expose accessors which return records of this family to
//! embedding code. The first field is always a version number, so code
//! which receives one of these records as raw memory can check the version
//! before interpreting the rest of the record.
//!
//! Each record matches the C declaration
//! `struct { int32_t version; void *handle; }` on targets where `usize` has
//! the size and alignment of `void *`. The handle field therefore sits at
//! offset 4 on 32-bit targets and offset 8 on 64-bit targets, and multi-byte
//! fields use the machine's endianness. The layout tests below assert the
//! version offset, the handle offset and the record size.

use crate::Error;
use crate::NativeHandle;

use log::warn;

use std::fmt;
use std::marker::PhantomData;
use std::mem;

#[cfg(feature = "ipc")]
use serde::{Deserialize, Serialize};

pub const NATIVE_SESSION_VERSION: i32 = 1;
pub const NATIVE_PLANE_VERSION: i32 = 1;
pub const NATIVE_REFERENCE_POINT_VERSION: i32 = 1;

/// A kind of tracked entity that has a native record.
///
/// Versions are independent per kind. Two kinds sharing a version number
/// says nothing about their layouts being interchangeable.
pub trait DescriptorKind {
    const VERSION: i32;
    const NAME: &'static str;
}

/// The AR session itself.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "ipc", derive(Serialize, Deserialize))]
pub enum Session {}

/// A plane detected by the runtime.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "ipc", derive(Serialize, Deserialize))]
pub enum Plane {}

/// A reference point placed in the runtime.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "ipc", derive(Serialize, Deserialize))]
pub enum ReferencePoint {}

impl DescriptorKind for Session {
    const VERSION: i32 = NATIVE_SESSION_VERSION;
    const NAME: &'static str = "session";
}

impl DescriptorKind for Plane {
    const VERSION: i32 = NATIVE_PLANE_VERSION;
    const NAME: &'static str = "plane";
}

impl DescriptorKind for ReferencePoint {
    const VERSION: i32 = NATIVE_REFERENCE_POINT_VERSION;
    const NAME: &'static str = "reference point";
}

/// A versioned snapshot of the native handle behind one tracked entity.
///
/// Records are produced by the native layer and are read-only on the
/// consumer's side. A record does not keep its handle alive; it is a
/// snapshot, not a live resource.
///
/// The kind parameter is what distinguishes records, not the version value:
///
/// ```compile_fail
/// use arnative_api::{NativeHandle, NativePlane, NativeSession};
///
/// let session = NativeSession::new(NativeHandle::from_bits(1));
/// let plane: NativePlane = session;
/// ```
#[repr(C)]
pub struct NativeDescriptor<K> {
    version: i32,
    handle: NativeHandle,
    kind: PhantomData<K>,
}

pub type NativeSession = NativeDescriptor<Session>;
pub type NativePlane = NativeDescriptor<Plane>;
pub type NativeReferencePoint = NativeDescriptor<ReferencePoint>;

impl<K: DescriptorKind> NativeDescriptor<K> {
    /// Size of the raw record in bytes, padding included.
    pub const SIZE: usize = mem::size_of::<NativeDescriptor<K>>();

    const HANDLE_OFFSET: usize = mem::offset_of!(Self, handle);

    /// Wraps a handle in a record carrying the current version.
    pub fn new(handle: NativeHandle) -> NativeDescriptor<K> {
        NativeDescriptor {
            version: K::VERSION,
            handle,
            kind: PhantomData,
        }
    }

    pub fn version(&self) -> i32 {
        self.version
    }

    pub fn handle(&self) -> NativeHandle {
        self.handle
    }

    /// Reads a record out of raw memory written by the native layer.
    ///
    /// The leading version field is read first. If it is not the version
    /// this build understands, the rest of the buffer is left uninterpreted
    /// and `Error::UnsupportedVersion` is returned.
    pub fn from_bytes(bytes: &[u8]) -> Result<NativeDescriptor<K>, Error> {
        let version = peek_version(bytes).ok_or(Error::Truncated {
            kind: K::NAME,
            expected: Self::SIZE,
            found: bytes.len(),
        })?;
        if version != K::VERSION {
            warn!(
                "{} record carries unknown version {} (expected {})",
                K::NAME,
                version,
                K::VERSION
            );
            return Err(Error::UnsupportedVersion {
                kind: K::NAME,
                expected: K::VERSION,
                found: version,
            });
        }
        if bytes.len() < Self::SIZE {
            return Err(Error::Truncated {
                kind: K::NAME,
                expected: Self::SIZE,
                found: bytes.len(),
            });
        }
        let mut word = [0u8; mem::size_of::<usize>()];
        let offset = Self::HANDLE_OFFSET;
        word.copy_from_slice(&bytes[offset..offset + mem::size_of::<usize>()]);
        Ok(NativeDescriptor {
            version,
            handle: NativeHandle::from_bits(usize::from_ne_bytes(word)),
            kind: PhantomData,
        })
    }

    /// Writes the record into a caller-supplied buffer, in the layout the
    /// native layer uses. Padding bytes are zeroed.
    pub fn write_to(&self, buf: &mut [u8]) -> Result<(), Error> {
        if buf.len() < Self::SIZE {
            return Err(Error::Truncated {
                kind: K::NAME,
                expected: Self::SIZE,
                found: buf.len(),
            });
        }
        let buf = &mut buf[..Self::SIZE];
        for byte in buf.iter_mut() {
            *byte = 0;
        }
        buf[..4].copy_from_slice(&self.version.to_ne_bytes());
        let offset = Self::HANDLE_OFFSET;
        buf[offset..offset + mem::size_of::<usize>()]
            .copy_from_slice(&self.handle.to_bits().to_ne_bytes());
        Ok(())
    }
}

impl<K> Clone for NativeDescriptor<K> {
    fn clone(&self) -> NativeDescriptor<K> {
        *self
    }
}

impl<K> Copy for NativeDescriptor<K> {}

impl<K: DescriptorKind> fmt::Debug for NativeDescriptor<K> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct(K::NAME)
            .field("version", &self.version)
            .field("handle", &self.handle)
            .finish()
    }
}

#[cfg(feature = "ipc")]
impl<K> Serialize for NativeDescriptor<K> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.version, self.handle).serialize(serializer)
    }
}

#[cfg(feature = "ipc")]
impl<'de, K> Deserialize<'de> for NativeDescriptor<K> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (version, handle) = <(i32, NativeHandle)>::deserialize(deserializer)?;
        Ok(NativeDescriptor {
            version,
            handle,
            kind: PhantomData,
        })
    }
}

/// Reads the leading version field of a raw record without interpreting
/// anything past it. Returns `None` if there are not even four bytes to
/// read.
pub fn peek_version(bytes: &[u8]) -> Option<i32> {
    if bytes.len() < 4 {
        return None;
    }
    let mut field = [0u8; 4];
    field.copy_from_slice(&bytes[..4]);
    Some(i32::from_ne_bytes(field))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_field_leads_every_record() {
        assert_eq!(mem::offset_of!(NativeSession, version), 0);
        assert_eq!(mem::offset_of!(NativePlane, version), 0);
        assert_eq!(mem::offset_of!(NativeReferencePoint, version), 0);
    }

    #[test]
    fn records_match_the_documented_layout() {
        let handle_offset = mem::align_of::<NativeHandle>().max(4);
        assert_eq!(mem::offset_of!(NativeSession, handle), handle_offset);
        assert_eq!(NativeSession::SIZE, handle_offset + mem::size_of::<NativeHandle>());
        assert_eq!(NativePlane::SIZE, NativeSession::SIZE);
        assert_eq!(NativeReferencePoint::SIZE, NativeSession::SIZE);
    }

    #[test]
    fn current_versions_are_all_one() {
        assert_eq!(NATIVE_SESSION_VERSION, 1);
        assert_eq!(NATIVE_PLANE_VERSION, 1);
        assert_eq!(NATIVE_REFERENCE_POINT_VERSION, 1);
        assert_eq!(Session::VERSION, NATIVE_SESSION_VERSION);
        assert_eq!(Plane::VERSION, NATIVE_PLANE_VERSION);
        assert_eq!(ReferencePoint::VERSION, NATIVE_REFERENCE_POINT_VERSION);
    }

    #[test]
    fn producer_writes_the_current_version() {
        let record = NativeSession::new(NativeHandle::NULL);
        assert_eq!(record.version(), NATIVE_SESSION_VERSION);
        assert_eq!(record.handle(), NativeHandle::NULL);
    }

    #[test]
    fn raw_record_round_trips_through_a_caller_buffer() {
        let handle = NativeHandle::from_bits(0xdead_beef);
        let record = NativePlane::new(handle);
        // Dirty buffer, so zeroed padding is observable.
        let mut buf = [0xaau8; mem::size_of::<NativePlane>()];
        record.write_to(&mut buf).unwrap();
        assert_eq!(peek_version(&buf), Some(NATIVE_PLANE_VERSION));
        let read = NativePlane::from_bytes(&buf).unwrap();
        assert_eq!(read.version(), NATIVE_PLANE_VERSION);
        assert_eq!(read.handle(), handle);
    }

    #[test]
    fn unknown_versions_are_refused() {
        let mut buf = [0u8; mem::size_of::<NativeSession>()];
        NativeSession::new(NativeHandle::from_bits(0x10))
            .write_to(&mut buf)
            .unwrap();
        buf[..4].copy_from_slice(&2i32.to_ne_bytes());
        match NativeSession::from_bytes(&buf) {
            Err(Error::UnsupportedVersion {
                kind,
                expected,
                found,
            }) => {
                assert_eq!(kind, "session");
                assert_eq!(expected, NATIVE_SESSION_VERSION);
                assert_eq!(found, 2);
            }
            other => panic!("expected a version mismatch, got {:?}", other),
        }
    }

    #[test]
    fn short_buffers_are_refused() {
        let mut buf = [0u8; mem::size_of::<NativeReferencePoint>()];
        NativeReferencePoint::new(NativeHandle::from_bits(0x20))
            .write_to(&mut buf)
            .unwrap();
        assert_eq!(peek_version(&buf[..3]), None);
        assert!(NativeReferencePoint::from_bytes(&buf[..3]).is_err());
        assert!(NativeReferencePoint::from_bytes(&buf[..7]).is_err());
        let mut short = [0u8; 4];
        assert!(NativeReferencePoint::new(NativeHandle::NULL)
            .write_to(&mut short)
            .is_err());
    }

    #[test]
    fn kinds_share_a_version_value_but_not_a_type() {
        // Both constants happen to be 1 today. The types, not the values,
        // are what keep session and plane records apart; the compile_fail
        // doctest on NativeDescriptor covers the type-level half.
        assert_eq!(NATIVE_SESSION_VERSION, NATIVE_PLANE_VERSION);
        assert_ne!(
            <Session as DescriptorKind>::NAME,
            <Plane as DescriptorKind>::NAME
        );
    }
}
