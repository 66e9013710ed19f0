//! macros used by panicrs

/// implement [`crate::config::validate::Validate`] for a config section
///
/// every field is an `Option`; unset fields are skipped
#[macro_export]
macro_rules! validator {
    ($struct_name:ty, $( $field:ident => $requirement:expr, $err_msg:expr );* $(;)? ) => {
        impl $crate::config::validate::Validate for $struct_name {
            fn validate(&self) -> Result<(), Vec<String>> {
                let mut errors: Vec<String> = Vec::new();

                $(
                    if let Some(ref value) = self.$field {
                        if !($requirement)(value) {
                            errors.push(format!("{}: {}", stringify!($field), $err_msg));
                        }
                    }
                )*

                if errors.is_empty() {
                    Ok(())
                } else {
                    Err(errors)
                }
            }
        }
    };
}

/// implement [`crate::config::validate::Validate`] for a config made of other sections
#[macro_export]
macro_rules! validator_nested {
    ($struct_name:ty, nested: { $( $nested:ident );* $(;)? }) => {
        impl $crate::config::validate::Validate for $struct_name {
            fn validate(&self) -> Result<(), Vec<String>> {
                let mut errors: Vec<String> = Vec::new();

                $(
                    if let Some(ref nested) = self.$nested {
                        if let Err(nested_errors) = nested.validate() {
                            for err in nested_errors {
                                errors.push(format!("{}.{}", stringify!($nested), err));
                            }
                        }
                    }
                )*

                if errors.is_empty() {
                    Ok(())
                } else {
                    Err(errors)
                }
            }
        }
    };
}

/// get a setting from a loaded config, falling back to its default value
///
/// # Examples
///
/// ```
/// use panicrs::{config::PanicRs, getopt};
///
/// let cfg = PanicRs::default();
/// assert_eq!(getopt!(cfg, api.version).as_deref(), Some("v1"));
/// ```
#[macro_export]
macro_rules! getopt {
    ($cfg:expr, $lvl1:ident . $field:ident) => {{
        $cfg.$lvl1
            .as_ref()
            .and_then(|sub| sub.$field.clone())
            .or_else(|| {
                $crate::config::options::PanicRs::default()
                    .$lvl1
                    .and_then(|sub| sub.$field)
            })
    }};
}
