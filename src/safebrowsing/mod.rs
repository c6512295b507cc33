// Threat checking: trait-based abstraction over the reputation service.
//
// The ThreatChecker trait defines the interface. SafeBrowsingClient implements
// it using Google's Safe Browsing v4 Lookup API.

pub mod client;
pub mod traits;
