//! Grammar productions for Lua.
//!
//! This module implements all `parse_*` methods as an extension of `Parser`.
//! Statements are recursive descent keyed on the leading token; expressions use
//! one function per precedence level, with left-associative levels unrolled into
//! loops that wrap the finished operand via `precede`.

mod expressions;
mod statements;
