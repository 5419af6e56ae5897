//! Test-only dump methods for parse inspection.
