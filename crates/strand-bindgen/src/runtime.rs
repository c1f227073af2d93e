//! Call shapes of the runtime marshalling helpers referenced by generated code.
//!
//! The helpers themselves live in the hand-written part of the managed
//! binding; the generator only needs to spell their calls correctly.

/// Capacity first guessed by the measure-then-fill string protocol.
pub const GROWABLE_INITIAL_CAPACITY: usize = 256;

/// Capacity of the buffer used when the native API offers no way to learn
/// the required length. Longer strings are truncated.
pub const FIXED_BUFFER_CAPACITY: usize = 256;

pub const BUFFER_TYPE: &str = "Utf8Buffer";
pub const UTF8_STRING_TYPE: &str = "Utf8String";
pub const MARSHALLING_CLASS: &str = "SpotifyMarshalling";

/// `using` header that opens a scoped native buffer.
pub fn allocate_buffer(local: &str, capacity: usize) -> String {
    format!("using ({BUFFER_TYPE} {local} = {BUFFER_TYPE}.Allocate({capacity}))")
}

/// Grow `local` to `length` bytes.
pub fn reallocate_buffer(local: &str, length: &str) -> String {
    format!("{local}.Reallocate({length});")
}

/// Pointer to the storage of a scoped buffer or encoded string.
pub fn buffer_pointer(local: &str) -> String {
    format!("{local}.IntPtr")
}

pub fn buffer_capacity(local: &str) -> String {
    format!("{local}.Capacity")
}

/// Decode a scoped buffer, optionally bounded by a length expression.
pub fn buffer_to_string(local: &str, length: Option<&str>) -> String {
    match length {
        Some(length) => format!("{local}.GetString({length})"),
        None => format!("{local}.GetString()"),
    }
}

/// `using` header that encodes a managed string to UTF-8 for one call.
pub fn encode_string(local: &str, argument: &str) -> String {
    format!(
        "using ({UTF8_STRING_TYPE} {local} = {MARSHALLING_CLASS}.StringToUtf8({argument}))"
    )
}

/// Decode a NUL-terminated UTF-8 pointer.
pub fn decode_string(pointer: &str) -> String {
    format!("{MARSHALLING_CLASS}.Utf8ToString({pointer})")
}

/// Wrap a raw native pointer in its wrapper class.
pub fn construct_handle(class: &str, pointer: &str) -> String {
    format!("new {class}({pointer})")
}

/// Local variable name for the scoped string backing input parameter `name`.
pub fn scoped_local(name: &str) -> String {
    format!("utf8_{name}")
}

/// Local variable name for the scoped buffer backing output parameter `name`.
/// Never equal to [`scoped_local`] of any parameter.
pub fn output_local(name: &str) -> String {
    format!("out_{name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_and_output_locals_differ() {
        assert_eq!(scoped_local("buffer"), "utf8_buffer");
        assert_eq!(output_local("buffer"), "out_buffer");
        assert_ne!(scoped_local("buffer"), output_local("buffer"));
    }
}
