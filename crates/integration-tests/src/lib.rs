//! Router-level tests live in `tests/`; this crate exists only to host them.
