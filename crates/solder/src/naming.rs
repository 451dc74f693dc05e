//! Identifier casing conversions
//!
//! Tag names and attribute names are kebab-case on the DOM side; component
//! type names and property names are CamelCase on the struct side. These
//! two functions are the only place the mapping lives.

/// `MyElement` -> `my-element`. A single-word name produces no hyphen,
/// which is how the validator detects it.
pub fn camel_to_kebab(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// `my-element` -> `MyElement`: the exported-identifier inverse of
/// [`camel_to_kebab`]. Every word including the first is title-cased, so
/// observed attribute names map straight back to exported property names.
pub fn kebab_to_camel(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = true;
    for c in name.chars() {
        if c == '-' {
            upper_next = true;
            continue;
        }
        out.push(if upper_next { c.to_ascii_uppercase() } else { c });
        upper_next = false;
    }
    out
}
