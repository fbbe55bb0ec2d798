//! Table-generating macros.
//!
//! Each dispatch table is declared once with [`dispatch_table!`]. The macro
//! expands to a struct holding one typed pointer per entry point and a
//! `load_with` constructor that resolves every name through a caller-supplied
//! resolver.
//!
//! Core entries are mandatory. Entries listed under `extensions` are only
//! resolved when their extension is part of the enabled set, and are stored
//! as `Option<PFN_*>`.

/// Produces a `&'static CStr` holding the identifier followed by a NUL byte.
macro_rules! c_name {
    ($name:ident) => {{
        const NAME: &::std::ffi::CStr =
            match ::std::ffi::CStr::from_bytes_with_nul(concat!(stringify!($name), "\0").as_bytes()) {
                Ok(name) => name,
                Err(_) => panic!("entry point name contains an interior NUL byte"),
            };
        NAME
    }};
}

macro_rules! dispatch_table {
    (
        $(#[$meta:meta])*
        $vis:vis struct $table:ident: $tier:expr;
        core {
            $($core:ident),* $(,)?
        }
        extensions {
            $($ext_fn:ident => $ext:expr),* $(,)?
        }
    ) => {
        paste::paste! {
            $(#[$meta])*
            #[allow(non_snake_case)]
            #[derive(Clone, Copy)]
            $vis struct $table {
                $(pub $core: ::ash::vk::[<PFN_ $core>],)*
                $(pub $ext_fn: Option<::ash::vk::[<PFN_ $ext_fn>]>,)*
            }

            impl $table {
                /// Tier this table is resolved at.
                pub const TIER: $crate::loader::Tier = $tier;

                /// Entry points that must always resolve.
                pub const CORE_FUNCTIONS: &'static [&'static str] = &[$(stringify!($core)),*];

                /// Extension-gated entry points as `(function, extension)` pairs.
                pub const EXTENSION_FUNCTIONS: &'static [(&'static str, &'static str)] =
                    &[$((stringify!($ext_fn), $ext)),*];

                /// Resolves every entry point of the table through `resolve`.
                ///
                /// # Safety
                ///
                /// Every non-null pointer returned by `resolve` must have the
                /// signature of the Vulkan command whose name it was asked for.
                pub unsafe fn load_with<F>(
                    mut resolve: F,
                    enabled: &$crate::loader::ExtensionSet,
                ) -> $crate::errors::Result<Self>
                where
                    F: FnMut(&::std::ffi::CStr) -> ::ash::vk::PFN_vkVoidFunction,
                {
                    let _ = enabled;
                    Ok(Self {
                        $($core: {
                            let ptr = $crate::loader::load_core(&mut resolve, Self::TIER, c_name!($core))?;
                            // SAFETY: the resolver contract guarantees the signature.
                            unsafe {
                                ::std::mem::transmute::<
                                    $crate::loader::VoidFunction,
                                    ::ash::vk::[<PFN_ $core>],
                                >(ptr)
                            }
                        },)*
                        $($ext_fn: $crate::loader::load_extension(
                            &mut resolve,
                            Self::TIER,
                            enabled,
                            $ext,
                            c_name!($ext_fn),
                        )?
                        .map(|ptr| {
                            // SAFETY: the resolver contract guarantees the signature.
                            unsafe {
                                ::std::mem::transmute::<
                                    $crate::loader::VoidFunction,
                                    ::ash::vk::[<PFN_ $ext_fn>],
                                >(ptr)
                            }
                        }),)*
                    })
                }
            }

            impl ::std::fmt::Debug for $table {
                fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                    f.debug_struct(stringify!($table))
                        $(.field(stringify!($core), &(self.$core as *const ())))*
                        $(.field(stringify!($ext_fn), &self.$ext_fn.is_some()))*
                        .finish()
                }
            }
        }
    };
}
