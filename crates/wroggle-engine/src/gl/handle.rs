use std::fmt;

use super::Driver;

macro_rules! typed_handle {
    ($(#[$meta:meta])* $name:ident => $raw:ident) => {
        $(#[$meta])*
        pub struct $name<D: Driver + ?Sized>(D::$raw);

        impl<D: Driver + ?Sized> $name<D> {
            /// Wraps a raw driver name. Only driver implementations mint handles.
            #[inline]
            pub fn from_raw(raw: D::$raw) -> Self {
                Self(raw)
            }

            #[inline]
            pub fn raw(self) -> D::$raw {
                self.0
            }
        }

        impl<D: Driver + ?Sized> Clone for $name<D> {
            #[inline]
            fn clone(&self) -> Self {
                *self
            }
        }

        impl<D: Driver + ?Sized> Copy for $name<D> {}

        impl<D: Driver + ?Sized> PartialEq for $name<D> {
            #[inline]
            fn eq(&self, other: &Self) -> bool {
                self.0 == other.0
            }
        }

        impl<D: Driver + ?Sized> fmt::Debug for $name<D> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.0).finish()
            }
        }
    };
}

typed_handle! {
    /// One compiled (or compiling) shader stage object.
    StageHandle => Shader
}

typed_handle! {
    /// A program object; the linkable unit of a vertex and a fragment stage.
    ProgramHandle => Program
}

typed_handle! {
    /// A GPU buffer object.
    BufferHandle => Buffer
}

typed_handle! {
    /// A vertex array object.
    VertexArrayHandle => VertexArray
}
