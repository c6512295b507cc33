// SecureLink: URL safety checks against Google Safe Browsing
//
// This is the library root. The core (validator + threat checker) is
// implemented once here; the web server and the CLI are thin adapters.

pub mod config;
pub mod output;
pub mod safebrowsing;
pub mod validator;

#[cfg(feature = "web")]
pub mod web;
