//! Cross-module tests: decision scenarios and property checks over the
//! whole authorization core.
