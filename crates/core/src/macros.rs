// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Declarative macros shared by the workspace crates.

/// `Display` for an enum whose variants each print as a fixed string.
///
/// ```ignore
/// crate::simple_display! {
///     TestStatus {
///         Idle => "idle",
///         Queued => "queued",
///     }
/// }
/// ```
#[macro_export]
macro_rules! simple_display {
    ($enum:ty { $( $variant:ident => $text:expr ),+ $(,)? }) => {
        impl std::fmt::Display for $enum {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(match self {
                    $( Self::$variant => $text, )+
                })
            }
        }
    };
}

/// Test-only builder for a plain struct: `Default` with fixture values,
/// one setter per field, and `build()`.
///
/// `into` fields take `impl Into<T>`; `set` fields take `T` as is. Every
/// generated item only exists under `test` or the `test-support` feature.
///
/// ```ignore
/// crate::builder! {
///     pub struct TestDescriptorBuilder => TestDescriptor {
///         into { name: String = "TestExample" }
///         set { line: u32 = 1 }
///     }
/// }
/// ```
#[macro_export]
macro_rules! builder {
    (
        pub struct $builder:ident => $target:ident {
            into { $( $into:ident : $into_ty:ty = $into_default:expr ),* $(,)? }
            set { $( $set:ident : $set_ty:ty = $set_default:expr ),* $(,)? }
        }
    ) => {
        #[cfg(any(test, feature = "test-support"))]
        pub struct $builder {
            $( $into: $into_ty, )*
            $( $set: $set_ty, )*
        }

        #[cfg(any(test, feature = "test-support"))]
        impl Default for $builder {
            fn default() -> Self {
                Self {
                    $( $into: $into_default.into(), )*
                    $( $set: $set_default, )*
                }
            }
        }

        #[cfg(any(test, feature = "test-support"))]
        impl $builder {
            $(
                pub fn $into(mut self, value: impl Into<$into_ty>) -> Self {
                    self.$into = value.into();
                    self
                }
            )*
            $(
                pub fn $set(mut self, value: $set_ty) -> Self {
                    self.$set = value;
                    self
                }
            )*

            pub fn build(self) -> $target {
                $target { $( $into: self.$into, )* $( $set: self.$set, )* }
            }
        }

        #[cfg(any(test, feature = "test-support"))]
        impl $target {
            pub fn builder() -> $builder {
                $builder::default()
            }
        }
    };
}
