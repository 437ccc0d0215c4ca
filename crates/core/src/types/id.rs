//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types. All IDs are assigned
//! by the server; the client never mints one.

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `i64` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_i64()`
/// - `From<i64>` and `Into<i64>` implementations
/// - `Display` (the bare number, so IDs drop straight into URL paths)
///
/// # Example
///
/// ```rust
/// # use tomato_core::define_id;
/// define_id!(BookId);
/// define_id!(ShelfId);
///
/// let book_id = BookId::new(1);
/// let shelf_id = ShelfId::new(1);
/// assert_eq!(book_id.to_string(), "1");
///
/// // These are different types, so this won't compile:
/// // let _: BookId = shelf_id;
/// # let _ = shelf_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Create a new ID from an i64 value.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the underlying i64 value.
            #[must_use]
            pub const fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(UserId);
define_id!(ProductId);
define_id!(SpecificationId);
define_id!(StockpileId);
define_id!(CartItemId);
define_id!(OrderId);
define_id!(ReviewId);
define_id!(NoteId);
define_id!(CommentId);
define_id!(AdvertisementId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_serializes_transparently() {
        let id = NoteId::new(42);
        assert_eq!(serde_json::to_string(&id).ok().as_deref(), Some("42"));

        let parsed: ProductId = serde_json::from_str("7").unwrap_or(ProductId::new(0));
        assert_eq!(parsed, ProductId::new(7));
    }

    #[test]
    fn test_id_display_is_bare_number() {
        assert_eq!(OrderId::new(40002).to_string(), "40002");
        assert_eq!(i64::from(CartItemId::from(3)), 3);
    }
}
