//! Casing conversions between resource identifiers and generated binding names.
//!
//! A layout resource `main_screen` is exposed as the binding class
//! `MainScreenBinding`, and a view id `submit_button` as the binding property
//! `submitButton`. The conversions mirror the matching convention of the
//! generated binding classes: segments are split on underscores and joined
//! with capitalization, and a segment that cannot be capitalized (leading
//! digit, empty segment) is passed through unmodified.

/// Converts an underscore-delimited resource identifier to a type name.
///
/// `main_screen` becomes `MainScreen`.
pub fn to_type_name(identifier: &str) -> String {
    identifier.split('_').map(capitalize).collect()
}

/// Converts an underscore-delimited resource identifier to a property name.
///
/// The first segment keeps its casing, the rest are capitalized:
/// `submit_button` becomes `submitButton`.
pub fn to_property_name(identifier: &str) -> String {
    let mut segments = identifier.split('_');
    let mut out = String::with_capacity(identifier.len());
    if let Some(first) = segments.next() {
        out.push_str(first);
    }
    for segment in segments {
        out.push_str(&capitalize(segment));
    }
    out
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
