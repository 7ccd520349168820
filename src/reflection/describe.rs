use super::type_desc::{Scalar, TypeDesc};

/// Static reflection: maps a Rust type onto the descriptor model.
///
/// Object types are not covered here; register an [`ObjectDef`](super::ObjectDef)
/// and reference it with [`TypeDesc::object`].
pub trait Describe {
    fn type_desc() -> TypeDesc;
}

impl TypeDesc {
    pub fn of<T: Describe + ?Sized>() -> TypeDesc {
        T::type_desc()
    }
}

macro_rules! describe_scalar {
    ($($ty:ty => $scalar:ident),* $(,)?) => {
        $(
            impl Describe for $ty {
                fn type_desc() -> TypeDesc {
                    TypeDesc::scalar(Scalar::$scalar)
                }
            }
        )*
    };
}

describe_scalar! {
    bool => Boolean,
    u8 => Byte,
    i8 => SByte,
    i16 => Int16,
    u16 => UInt16,
    i32 => Int32,
    u32 => UInt32,
    i64 => Int64,
    u64 => UInt64,
    f32 => Single,
    f64 => Double,
    char => Char,
    str => String,
    String => String,
    uuid::Uuid => Guid,
    chrono::NaiveDateTime => DateTime,
    std::time::Duration => TimeSpan,
}

impl<Tz: chrono::TimeZone> Describe for chrono::DateTime<Tz> {
    fn type_desc() -> TypeDesc {
        TypeDesc::scalar(Scalar::DateTimeOffset)
    }
}

impl Describe for () {
    fn type_desc() -> TypeDesc {
        TypeDesc::Void
    }
}

impl<T: Describe> Describe for Vec<T> {
    fn type_desc() -> TypeDesc {
        TypeDesc::list(T::type_desc())
    }
}

impl<T: Describe> Describe for Option<T> {
    fn type_desc() -> TypeDesc {
        TypeDesc::nullable(T::type_desc())
    }
}

impl<T: Describe + ?Sized> Describe for Box<T> {
    fn type_desc() -> TypeDesc {
        T::type_desc()
    }
}
