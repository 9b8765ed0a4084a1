//! EXIF Typed Values
//!
//! Every decoded entry becomes an [`ExifValue`]: the tag, the directory it
//! belongs to and an [`ExifData`] payload. The payload is one closed enum
//! over the TIFF element kinds; decode, encode and formatting dispatch on
//! the variant.

use std::borrow::Cow;
use std::fmt;
use std::fmt::Write as _;

use super::tag::{ExifIfd, ExifTag, TagShape};
use super::types::{ByteOrder, ExifDataType, Rational, SignedRational};

/// Decoded payload of an EXIF entry
#[derive(Debug, Clone, PartialEq)]
pub enum ExifData {
    Byte(Vec<u8>),
    /// Raw ASCII payload: the text, its NUL terminator and anything a
    /// writer stored after it
    Ascii(Vec<u8>),
    Short(Vec<u16>),
    Long(Vec<u32>),
    Rational(Vec<Rational>),
    SignedByte(Vec<i8>),
    Undefined(Vec<u8>),
    SignedShort(Vec<i16>),
    SignedLong(Vec<i32>),
    SignedRational(Vec<SignedRational>),
    Float(Vec<f32>),
    Double(Vec<f64>),
    /// Entry with an unrecognised type code, written back with the count
    /// and bytes it was read with
    Unknown { code: u16, count: u32, bytes: Vec<u8> },
}

impl ExifData {
    /// Empty payload of the given type
    pub fn empty(data_type: ExifDataType) -> Self {
        match data_type {
            ExifDataType::Byte => Self::Byte(Vec::new()),
            ExifDataType::Ascii => Self::Ascii(Vec::new()),
            ExifDataType::Short => Self::Short(Vec::new()),
            ExifDataType::Long => Self::Long(Vec::new()),
            ExifDataType::Rational => Self::Rational(Vec::new()),
            ExifDataType::SignedByte => Self::SignedByte(Vec::new()),
            ExifDataType::Undefined => Self::Undefined(Vec::new()),
            ExifDataType::SignedShort => Self::SignedShort(Vec::new()),
            ExifDataType::SignedLong => Self::SignedLong(Vec::new()),
            ExifDataType::SignedRational => Self::SignedRational(Vec::new()),
            ExifDataType::Float => Self::Float(Vec::new()),
            ExifDataType::Double => Self::Double(Vec::new()),
            ExifDataType::Unknown(code) => Self::Unknown {
                code,
                count: 0,
                bytes: Vec::new(),
            },
        }
    }

    /// NUL-terminated ASCII payload holding `text`
    pub fn ascii(text: &str) -> Self {
        let mut bytes = Vec::with_capacity(text.len() + 1);
        bytes.extend_from_slice(text.as_bytes());
        bytes.push(0);
        Self::Ascii(bytes)
    }

    /// Text of an ASCII payload up to its first NUL, decoded lossily
    pub fn text(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Ascii(bytes) => Some(String::from_utf8_lossy(ascii_text(bytes))),
            _ => None,
        }
    }

    pub fn data_type(&self) -> ExifDataType {
        match self {
            Self::Byte(_) => ExifDataType::Byte,
            Self::Ascii(_) => ExifDataType::Ascii,
            Self::Short(_) => ExifDataType::Short,
            Self::Long(_) => ExifDataType::Long,
            Self::Rational(_) => ExifDataType::Rational,
            Self::SignedByte(_) => ExifDataType::SignedByte,
            Self::Undefined(_) => ExifDataType::Undefined,
            Self::SignedShort(_) => ExifDataType::SignedShort,
            Self::SignedLong(_) => ExifDataType::SignedLong,
            Self::SignedRational(_) => ExifDataType::SignedRational,
            Self::Float(_) => ExifDataType::Float,
            Self::Double(_) => ExifDataType::Double,
            Self::Unknown { code, .. } => ExifDataType::Unknown(*code),
        }
    }

    /// Element count as written in the directory entry
    ///
    /// Ascii counts cover the raw payload, terminator included.
    pub fn count(&self) -> usize {
        match self {
            Self::Byte(v) | Self::Undefined(v) | Self::Ascii(v) => v.len(),
            Self::Unknown { count, .. } => *count as usize,
            Self::Short(v) => v.len(),
            Self::Long(v) => v.len(),
            Self::Rational(v) => v.len(),
            Self::SignedByte(v) => v.len(),
            Self::SignedShort(v) => v.len(),
            Self::SignedLong(v) => v.len(),
            Self::SignedRational(v) => v.len(),
            Self::Float(v) => v.len(),
            Self::Double(v) => v.len(),
        }
    }

    /// Decode `bytes` (exactly `count * element_size` long) as `data_type`
    pub fn decode(data_type: ExifDataType, bytes: &[u8], order: ByteOrder) -> Self {
        fn each<const N: usize, T>(bytes: &[u8], f: impl Fn([u8; N]) -> T) -> Vec<T> {
            bytes
                .chunks_exact(N)
                .map(|c| {
                    let mut b = [0u8; N];
                    b.copy_from_slice(c);
                    f(b)
                })
                .collect()
        }

        match data_type {
            ExifDataType::Byte => Self::Byte(bytes.to_vec()),
            ExifDataType::Undefined => Self::Undefined(bytes.to_vec()),
            ExifDataType::Unknown(code) => Self::Unknown {
                code,
                count: (bytes.len() / data_type.element_size()) as u32,
                bytes: bytes.to_vec(),
            },
            ExifDataType::SignedByte => Self::SignedByte(bytes.iter().map(|&b| b as i8).collect()),
            ExifDataType::Ascii => Self::Ascii(bytes.to_vec()),
            ExifDataType::Short => Self::Short(each(bytes, |b| order.u16_from(b))),
            ExifDataType::SignedShort => {
                Self::SignedShort(each(bytes, |b| order.u16_from(b) as i16))
            }
            ExifDataType::Long => Self::Long(each(bytes, |b| order.u32_from(b))),
            ExifDataType::SignedLong => Self::SignedLong(each(bytes, |b| order.u32_from(b) as i32)),
            ExifDataType::Float => {
                Self::Float(each(bytes, |b| f32::from_bits(order.u32_from(b))))
            }
            ExifDataType::Double => {
                Self::Double(each(bytes, |b| f64::from_bits(order.u64_from(b))))
            }
            ExifDataType::Rational => Self::Rational(each(bytes, |b: [u8; 8]| {
                Rational::new(
                    order.u32_from([b[0], b[1], b[2], b[3]]),
                    order.u32_from([b[4], b[5], b[6], b[7]]),
                )
            })),
            ExifDataType::SignedRational => Self::SignedRational(each(bytes, |b: [u8; 8]| {
                SignedRational::new(
                    order.u32_from([b[0], b[1], b[2], b[3]]) as i32,
                    order.u32_from([b[4], b[5], b[6], b[7]]) as i32,
                )
            })),
        }
    }

    /// Encode into the on-disk layout; inverse of [`ExifData::decode`]
    pub fn encode(&self, order: ByteOrder) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.count() * self.data_type().element_size());
        match self {
            Self::Byte(v) | Self::Undefined(v) | Self::Ascii(v) => out.extend_from_slice(v),
            Self::Unknown { bytes, .. } => out.extend_from_slice(bytes),
            Self::SignedByte(v) => out.extend(v.iter().map(|&b| b as u8)),
            Self::Short(v) => v.iter().for_each(|&x| out.extend(order.u16_bytes(x))),
            Self::SignedShort(v) => v.iter().for_each(|&x| out.extend(order.u16_bytes(x as u16))),
            Self::Long(v) => v.iter().for_each(|&x| out.extend(order.u32_bytes(x))),
            Self::SignedLong(v) => v.iter().for_each(|&x| out.extend(order.u32_bytes(x as u32))),
            Self::Float(v) => v.iter().for_each(|&x| out.extend(order.u32_bytes(x.to_bits()))),
            Self::Double(v) => v.iter().for_each(|&x| out.extend(order.u64_bytes(x.to_bits()))),
            Self::Rational(v) => v.iter().for_each(|r| {
                out.extend(order.u32_bytes(r.numerator));
                out.extend(order.u32_bytes(r.denominator));
            }),
            Self::SignedRational(v) => v.iter().for_each(|r| {
                out.extend(order.u32_bytes(r.numerator as u32));
                out.extend(order.u32_bytes(r.denominator as u32));
            }),
        }
        out
    }

    /// Canonical, locale-independent string form
    pub fn string_value(&self, is_array: bool) -> String {
        fn join<T: fmt::Display>(v: &[T]) -> String {
            let mut s = String::new();
            for (i, x) in v.iter().enumerate() {
                if i > 0 {
                    s.push(' ');
                }
                let _ = write!(s, "{}", x);
            }
            s
        }

        fn hex(v: &[u8]) -> String {
            let mut s = String::with_capacity(v.len() * 2);
            for b in v {
                let _ = write!(s, "{:02X}", b);
            }
            s
        }

        match self {
            Self::Byte(v) if !is_array => v.first().map(|b| format!("{:02X}", b)).unwrap_or_default(),
            Self::Byte(v) | Self::Undefined(v) => hex(v),
            Self::Unknown { bytes, .. } => hex(bytes),
            Self::Ascii(bytes) => String::from_utf8_lossy(ascii_text(bytes)).into_owned(),
            Self::Short(v) => join(v),
            Self::Long(v) => join(v),
            Self::Rational(v) => join(v),
            Self::SignedByte(v) => join(v),
            Self::SignedShort(v) => join(v),
            Self::SignedLong(v) => join(v),
            Self::SignedRational(v) => join(v),
            Self::Float(v) => join(v),
            Self::Double(v) => join(v),
        }
    }
}

/// A value offered to [`ExifValue::try_set_value`]
///
/// Scalars are coerced into the declared element kind where the conversion
/// is lossless; arrays must already carry the declared kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ExifInput {
    Integer(i64),
    Float(f64),
    Text(String),
    Rational(Rational),
    SignedRational(SignedRational),
    Array(ExifData),
}

impl ExifInput {
    /// Type and shape a new, unknown tag gets when created from this input
    pub(crate) fn inferred_type(&self) -> Option<(ExifDataType, bool)> {
        match self {
            Self::Integer(i) if u32::try_from(*i).is_ok() => Some((ExifDataType::Long, false)),
            Self::Integer(i) if i32::try_from(*i).is_ok() => {
                Some((ExifDataType::SignedLong, false))
            }
            Self::Integer(_) => None,
            Self::Float(_) => Some((ExifDataType::Double, false)),
            Self::Text(_) => Some((ExifDataType::Ascii, false)),
            Self::Rational(_) => Some((ExifDataType::Rational, false)),
            Self::SignedRational(_) => Some((ExifDataType::SignedRational, false)),
            Self::Array(data) => Some((data.data_type(), true)),
        }
    }
}

macro_rules! input_from {
    ($($t:ty => $variant:ident $(as $cast:ty)?),* $(,)?) => {
        $(
            impl From<$t> for ExifInput {
                fn from(value: $t) -> Self {
                    Self::$variant(value $(as $cast)?)
                }
            }
        )*
    };
}

input_from! {
    u8 => Integer as i64,
    u16 => Integer as i64,
    u32 => Integer as i64,
    i8 => Integer as i64,
    i16 => Integer as i64,
    i32 => Integer as i64,
    i64 => Integer,
    f32 => Float as f64,
    f64 => Float,
    String => Text,
    Rational => Rational,
    SignedRational => SignedRational,
    ExifData => Array,
}

impl From<&str> for ExifInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

macro_rules! input_from_vec {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<Vec<$t>> for ExifInput {
                fn from(value: Vec<$t>) -> Self {
                    Self::Array(ExifData::$variant(value))
                }
            }

            impl<const N: usize> From<[$t; N]> for ExifInput {
                fn from(value: [$t; N]) -> Self {
                    Self::Array(ExifData::$variant(value.to_vec()))
                }
            }
        )*
    };
}

input_from_vec! {
    u8 => Byte,
    u16 => Short,
    u32 => Long,
    i8 => SignedByte,
    i16 => SignedShort,
    i32 => SignedLong,
    f32 => Float,
    f64 => Double,
    Rational => Rational,
    SignedRational => SignedRational,
}

/// A single EXIF value: tag, directory and typed payload
#[derive(Debug, Clone, PartialEq)]
pub struct ExifValue {
    tag: ExifTag,
    ifd: ExifIfd,
    is_array: bool,
    data: ExifData,
}

impl ExifValue {
    pub(crate) fn new(tag: ExifTag, ifd: ExifIfd, is_array: bool, data: ExifData) -> Self {
        Self {
            tag,
            ifd,
            is_array,
            data,
        }
    }

    /// Empty value with the declared type and shape for `tag`
    pub(crate) fn declared(tag: ExifTag, ifd: ExifIfd, data_type: ExifDataType, is_array: bool) -> Self {
        Self::new(tag, ifd, is_array, ExifData::empty(data_type))
    }

    pub fn tag(&self) -> ExifTag {
        self.tag
    }

    pub fn ifd(&self) -> ExifIfd {
        self.ifd
    }

    pub fn data_type(&self) -> ExifDataType {
        self.data.data_type()
    }

    pub fn is_array(&self) -> bool {
        self.is_array
    }

    pub fn data(&self) -> &ExifData {
        &self.data
    }

    /// Canonical string representation
    pub fn string_value(&self) -> String {
        self.data.string_value(self.is_array)
    }

    /// First element as u32, for the unsigned integer kinds
    pub fn as_u32(&self) -> Option<u32> {
        match &self.data {
            ExifData::Byte(v) => v.first().map(|&x| x as u32),
            ExifData::Short(v) => v.first().map(|&x| x as u32),
            ExifData::Long(v) => v.first().copied(),
            _ => None,
        }
    }

    /// ASCII text up to the first NUL
    ///
    /// None for text that is not valid UTF-8; [`ExifValue::string_value`]
    /// gives a lossy rendering of it.
    pub fn as_str(&self) -> Option<&str> {
        match &self.data {
            ExifData::Ascii(bytes) => std::str::from_utf8(ascii_text(bytes)).ok(),
            _ => None,
        }
    }

    pub fn as_rational(&self) -> Option<Rational> {
        match &self.data {
            ExifData::Rational(v) => v.first().copied(),
            _ => None,
        }
    }

    pub fn as_rationals(&self) -> Option<&[Rational]> {
        match &self.data {
            ExifData::Rational(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match &self.data {
            ExifData::Byte(v) | ExifData::Undefined(v) => Some(v),
            ExifData::Unknown { bytes, .. } => Some(bytes),
            _ => None,
        }
    }

    /// Expected element count for arrays with a fixed size
    fn fixed_len(&self) -> Option<usize> {
        match self.tag.info_in(self.ifd)?.shape {
            TagShape::Fixed(n) => Some(n),
            _ => None,
        }
    }

    /// Replace the payload if `input` fits the declared type and shape
    ///
    /// Returns false and leaves the value untouched on mismatch.
    pub fn try_set_value(&mut self, input: impl Into<ExifInput>) -> bool {
        match self.coerce(input.into()) {
            Some(data) => {
                self.data = data;
                true
            }
            None => false,
        }
    }

    fn coerce(&self, input: ExifInput) -> Option<ExifData> {
        let declared = self.data.data_type();
        match input {
            ExifInput::Integer(i) if !self.is_array => match declared {
                ExifDataType::Byte => Some(ExifData::Byte(vec![u8::try_from(i).ok()?])),
                ExifDataType::Short => Some(ExifData::Short(vec![u16::try_from(i).ok()?])),
                ExifDataType::Long => Some(ExifData::Long(vec![u32::try_from(i).ok()?])),
                ExifDataType::SignedByte => {
                    Some(ExifData::SignedByte(vec![i8::try_from(i).ok()?]))
                }
                ExifDataType::SignedShort => {
                    Some(ExifData::SignedShort(vec![i16::try_from(i).ok()?]))
                }
                ExifDataType::SignedLong => {
                    Some(ExifData::SignedLong(vec![i32::try_from(i).ok()?]))
                }
                _ => None,
            },
            ExifInput::Float(f) if !self.is_array => match declared {
                ExifDataType::Float => Some(ExifData::Float(vec![f as f32])),
                ExifDataType::Double => Some(ExifData::Double(vec![f])),
                _ => None,
            },
            // A NUL would end the text early on the next read
            ExifInput::Text(s) => match declared {
                ExifDataType::Ascii if !s.contains('\0') => Some(ExifData::ascii(&s)),
                _ => None,
            },
            ExifInput::Rational(r) if !self.is_array => match declared {
                ExifDataType::Rational => Some(ExifData::Rational(vec![r])),
                _ => None,
            },
            ExifInput::SignedRational(r) if !self.is_array => match declared {
                ExifDataType::SignedRational => Some(ExifData::SignedRational(vec![r])),
                _ => None,
            },
            ExifInput::Array(data) if self.is_array => {
                let data = match (declared, data) {
                    (ExifDataType::Undefined, ExifData::Byte(v)) => ExifData::Undefined(v),
                    (ExifDataType::Byte, ExifData::Undefined(v)) => ExifData::Byte(v),
                    (ExifDataType::Unknown(code), ExifData::Byte(v) | ExifData::Undefined(v)) => {
                        let size = declared.element_size();
                        if v.len() % size != 0 {
                            return None;
                        }
                        ExifData::Unknown {
                            code,
                            count: (v.len() / size) as u32,
                            bytes: v,
                        }
                    }
                    (declared, data) if data.data_type() == declared => data,
                    _ => return None,
                };
                match self.fixed_len() {
                    Some(n) if data.count() != n => None,
                    _ => Some(data),
                }
            }
            _ => None,
        }
    }
}

/// Bytes of an ASCII payload before the first NUL
fn ascii_text(bytes: &[u8]) -> &[u8] {
    match bytes.iter().position(|&b| b == 0) {
        Some(nul) => &bytes[..nul],
        None => bytes,
    }
}

impl fmt::Display for ExifValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.string_value())
    }
}
