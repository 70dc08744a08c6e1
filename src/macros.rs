// src/macros.rs
#[macro_export]
macro_rules! index_type {
    // Zero-based position newtype; serializes as the bare integer.
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, ::serde::Serialize)]
        #[serde(transparent)]
        pub struct $name(pub usize);

        impl $name {
            /// Index of the entity a vector is about to receive.
            pub fn next<T>(items: &[T]) -> Self {
                Self(items.len())
            }

            pub fn get(self) -> usize {
                self.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}
